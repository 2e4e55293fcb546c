//! Mood-based playlist generation on top of the Spotify Web API.
//!
//! The library turns a listener's mood, genre, energy and duration
//! preferences into a Spotify recommendation query, fetches candidate
//! tracks, and assembles a playlist that fits the requested duration.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the playlist service
//! - `cli` - Command-line interface implementations
//! - `clock` - Wall-clock abstraction used for token expiry
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors shared by the client and the assembler
//! - `logging` - Tracing subscriber setup
//! - `management` - Access token caching and refresh coordination
//! - `playlist` - Preference mapping, duration fitting and metadata
//! - `server` - HTTP server wiring
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use moodlist::{config, playlist::PlaylistAssembler, spotify::SpotifyClient};
//! use moodlist::types::{Mood, PlaylistRequest};
//!
//! #[tokio::main]
//! async fn main() -> moodlist::Res<()> {
//!     config::load_env().await?;
//!     let client = Arc::new(SpotifyClient::new(config::SpotifyConfig::from_env()));
//!     let assembler = PlaylistAssembler::new(client);
//!     let playlist = assembler.generate_playlist(&PlaylistRequest::new(Mood::Happy)).await?;
//!     println!("{}", playlist.name);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod playlist;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the CLI and server plumbing where any error is reported to the
/// user as-is. The core returns [`error::PlaylistError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Fetching recommendations...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for the CLI entry points: the process terminates with exit
/// code 1 right after the message is printed, so code following the macro
/// never runs. Library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Failed to generate playlist: {}", e);
/// // Program exits here
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues the user should notice, such as missing
/// credentials reported by `moodlist status`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
