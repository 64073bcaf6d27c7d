//! # courier-server
//!
//! HTTP front of the message store: `POST /sendMessage`, `GET /retrieveMessages`,
//! `GET /getRecipients`. Config from env, CLI parsing, and the server runner.

pub mod cli;
pub mod config;
pub mod http;
pub mod runner;

pub use cli::{load_config, Cli, Commands};
pub use config::ServerConfig;
pub use http::{build_router, ApiError, AppState};
pub use runner::{run_server, serve, shutdown_signal};
