// Framework bootstrap for the blast jumper runtime.

use crate::domain::SandboxWorld;
use crate::domain::tuning::BlastTuning;
use crate::frameworks::config::{self, BlastConfig};
use crate::interface_adapters::net::{
    interact_handler, join_handler, leave_handler, place_object_handler, world_handler,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{
    DetonateCommand, DetonationTimer, ExplosiveLifecycleManager, HostEvent, LifecycleSettings,
    WorldSnapshot, world_task,
};

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};
use tokio::sync::{Notify, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let path = config::config_path();
    let blast_config = config::load_blast_config(&path)
        .map_err(|e| std::io::Error::other(format!("failed to load {}: {e:?}", path.display())))?;
    tracing::info!(
        radius = blast_config.effect.radius,
        power = blast_config.effect.power,
        "effect config loaded"
    );

    // build state
    let (state, shutdown) = build_state(blast_config);
    let app = Router::new()
        .route("/riders", post(join_handler))
        .route("/riders/leave", post(leave_handler))
        .route("/objects", post(place_object_handler))
        .route("/interact", post(interact_handler))
        .route("/world", get(world_handler))
        .with_state(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    // Stop the world task once no more requests can reach it.
    shutdown.notify_one();
    served.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state(blast_config: BlastConfig) -> (Arc<AppState>, Arc<Notify>) {
    // input_tx/rx: every host event goes to the single world task.
    let (input_tx, input_rx) = mpsc::channel::<HostEvent>(config::INPUT_CHANNEL_CAPACITY);
    // command_tx/rx: elapsed fuses are posted back onto the same task.
    let (command_tx, command_rx) =
        mpsc::channel::<DetonateCommand>(config::DETONATION_CHANNEL_CAPACITY);
    let (snapshot_tx, snapshot_rx) = watch::channel(WorldSnapshot::default());

    let manager = ExplosiveLifecycleManager::new(
        SandboxWorld::default(),
        DetonationTimer::new(command_tx),
        LifecycleSettings {
            effect_radius: blast_config.effect.radius,
            effect_power: blast_config.effect.power,
            tuning: BlastTuning::default(),
            tick_interval: config::TICK_INTERVAL,
        },
    );

    // Spawn the authoritative world task; it owns the world and every session.
    let shutdown = Arc::new(Notify::new());
    tokio::spawn(world_task(
        input_rx,
        command_rx,
        manager,
        snapshot_tx,
        shutdown.clone(),
    ));

    let state = Arc::new(AppState {
        input_tx,
        snapshot_rx,
    });
    (state, shutdown)
}
