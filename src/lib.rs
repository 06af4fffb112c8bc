//! Monthly Liked Songs Playlist Library
//!
//! This library implements a run-to-completion job that collects the tracks a
//! user liked on Spotify during the current calendar month and appends them to a
//! playlist named after that month (for example `Jan'25`). The job is meant to be
//! started by an external scheduler; repeated runs inside the same month are
//! idempotent because the playlist is searched before it is created and every
//! track is checked for membership before it is added.
//!
//! # Modules
//!
//! - `cli` - Command handlers that drive a sync and print the outcome
//! - `config` - Environment loading, credentials and page-size limits
//! - `error` - Error taxonomy shared by the client and the driver
//! - `spotify` - Spotify Web API client and the `SpotifyApi` seam
//! - `sync` - The linear sync workflow (auth, fetch, resolve, append)
//! - `types` - Domain entities and API request/response shapes
//! - `utils` - Playlist naming and month filtering helpers
//!
//! # Example
//!
//! ```
//! use monthlify::{config, spotify::SpotifyClient, sync};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> monthlify::Result<()> {
//!     config::load_env()?;
//!     let config = config::Config::from_env()?;
//!     let client = SpotifyClient::new(config.endpoints.clone());
//!     // Build a sync::SyncRequest and call sync::run(&client, &request)...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod spotify;
pub mod sync;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for progress lines such as the
/// number of liked tracks found or the track currently being checked.
///
/// # Example
///
/// ```
/// info!("Were found {} liked song(s) for this month", count);
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
/// # Example
///
/// ```
/// success!("Tracks synced to playlist: {}", name);
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
/// Terminates the process with exit code 1 right after printing. Only the
/// binary entry point uses it; library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Error getting access token: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for notices that don't stop the run, such as a dry run skipping the
/// playlist creation or the track additions.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
