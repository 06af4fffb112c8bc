//! # CLI Module
//!
//! Command handlers behind the `monthlify` binary. Each handler loads what it
//! needs from the environment, calls into the library and reports the outcome
//! on the console with the crate's output macros.
//!
//! ## Commands
//!
//! - [`sync`] - Copies this month's liked tracks into the month-named playlist
//!
//! ## Usage Patterns
//!
//! ```bash
//! monthlify                              # Sync the current month
//! monthlify sync --date 2025-01-15       # Sync as if it were January 2025
//! monthlify sync --dry-run               # Report what would change
//! ```
//!
//! ## Exit Status
//!
//! Any failure prints a step-specific message and exits with status 1 through
//! the [`crate::error!`] macro. Partial progress (for example a playlist that
//! was created before appending failed) is left in place; the next scheduled
//! run completes it.

mod sync;

pub use sync::sync;
