//! Lyssnar Library
//!
//! This library backs a small web service that shows what a registered user is
//! currently listening to on Spotify. Users authorize the service once through
//! the OAuth 2.0 authorization-code flow; their token pair is stored and used
//! on every lookup, refreshed transparently when Spotify reports it expired.
//!
//! # Modules
//!
//! - `api` - JSON endpoints and the OAuth authorize/callback handlers
//! - `config` - Configuration management and environment variables
//! - `logging` - Tracing subscriber setup
//! - `management` - Credential storage (Postgres and in-process)
//! - `server` - Router construction and the HTTP listener
//! - `spotify` - Spotify Web API client with token lifecycle handling
//! - `types` - Data structures and type definitions
//! - `ui` - Embedded templates, static assets and HTML views
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use lyssnar::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> lyssnar::Res<()> {
//!     config::load_env();
//!     // Build the state and call server::serve(...)
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod logging;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod ui;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the process bootstrap where any failure ends the program. The
/// library modules return their own typed errors instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a success message with a green checkmark.
///
/// Used by the maintenance subcommands (`migrate`, `forget`) to report their
/// outcome on the terminal. The server itself logs through `tracing`.
///
/// # Example
///
/// ```
/// success!("Removed credential for {}", user_id);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal bootstrap errors where recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Failed to connect to database: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}
