//! inplace - command-line host for inline-editable field markup
//!
//! Loads a [`config::HostConfig`] with figment, reads a record description
//! and an options bag from disk, and prints what
//! [`inplace_fields::InPlaceContext`] renders.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod record_file;
pub mod render;

pub use cli::{Cli, Commands};
pub use config::{HostConfig, RoutesConfig};
pub use error::{CliError, Result};
