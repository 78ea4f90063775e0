#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod app;
pub mod cli;
pub mod config;
pub mod content;
pub mod cron;
pub mod error;
pub mod history;
pub mod media;
pub mod onboard;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod topics;
pub mod utils;

pub use config::Config;
pub use error::{ConfigError, GenerationError, GeneratorError, StorageError};
