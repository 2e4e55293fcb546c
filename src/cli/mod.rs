//! # CLI Module
//!
//! Command-line front end of moodlist. Every command builds a
//! [`crate::spotify::SpotifyClient`] from the environment, runs one
//! operation and prints the result.
//!
//! ## Commands
//!
//! - [`generate`] - Builds a mood playlist and prints it as a table or JSON
//! - [`search`] - Searches the Spotify catalog for tracks
//! - [`track`] - Shows a single track
//! - [`status`] - Shows configuration and checks the credentials
//! - [`serve`] - Runs the HTTP API
//!
//! ## Usage Patterns
//!
//! ```bash
//! moodlist generate --mood happy
//! moodlist generate --mood sad --genre jazz --energy low --duration 45
//! moodlist search "daft punk" --limit 5
//! moodlist serve
//! ```
//!
//! Failures are reported through the `error!` macro, which terminates the
//! process with a non-zero exit code.

mod generate;
mod serve;
mod status;
mod tracks;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use generate::generate;
pub use serve::serve;
pub use status::status;
pub use tracks::search;
pub use tracks::track;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
