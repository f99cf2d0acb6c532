#[tokio::main]
async fn main() -> std::io::Result<()> {
    blast_jumper::run_with_config().await
}
