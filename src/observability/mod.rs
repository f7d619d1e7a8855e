//! Structured logging to a rotating file.
//!
//! All modules log through `tracing` macros; this module installs the
//! subscriber that writes them to disk.
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter → unimatch.log (+3 backups)
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
pub mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
