// Interface adapters: HTTP input source and snapshot DTOs.

pub mod http;
pub mod net;
pub mod protocol;
pub mod state;
