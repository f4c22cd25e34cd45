// Adapters layer: concrete implementations for external systems (http client, dev server).

pub mod http;

#[cfg(feature = "cli")]
pub mod server;
