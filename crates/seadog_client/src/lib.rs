//! Console client for the Mendable question-answering API.
//! `ask` holds a conversation; `ingest` submits data sources for indexing.

pub mod ask;
pub mod client;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod ingest;
pub mod messages;

pub use client::{ClientError, MendableClient};
pub use command::{Command, Options};
pub use config::{default_config_path, ApiKey, ApiSection, Config, ConfigError, Settings};
pub use console::Console;
pub use error::RunError;
pub use ingest::OutputFormat;
