//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{data_dir_from, default_data_dir, expand_tilde, expand_tilde_with};
