//! CLI definition for the inplace command-line interface.
//!
//! This module only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// inplace - render inline-editable field markup
///
/// Reads a record description and an options bag, prints the `<span>` a
/// client-side script turns into an in-place editor.
#[derive(Parser, Debug)]
#[command(name = "inplace")]
#[command(version)]
#[command(about = "Render inline-editable field markup")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Host configuration file (toml, yaml or json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the editable element for one field of a record
    Render {
        /// Record description (JSON object or array)
        #[arg(short, long)]
        record: PathBuf,
        /// Field to edit
        #[arg(short, long)]
        field: String,
        /// Options bag (yaml or json)
        #[arg(short, long)]
        options: Option<PathBuf>,
        /// Namespace segment, repeatable and applied in order
        #[arg(short, long = "namespace")]
        namespace: Vec<String>,
        /// Render markup only when true; otherwise print the plain value
        #[arg(long = "if", default_value_t = true, action = ArgAction::Set)]
        condition: bool,
    },
    /// List the named formatters available to display_with
    Formatters,
}
