//! Core module - process setup shared by the binary and tests
//!
//! - [`settings`] - [`ClientSettings`] and JSON persistence
//! - [`logging`] - tracing subscriber setup
//! - [`error`] - [`CoreError`] and [`CoreResult`]

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use logging::init_tracing;
pub use settings::{
    load_settings_from, save_settings_to, settings_path,
    ClientSettings, SERVER_URL_ENV,
};
