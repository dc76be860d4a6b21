//! inplace CLI - render inline-editable field markup.
//!
//! Commands:
//! - `inplace render --record <file> --field <name>`: print the editable element
//! - `inplace formatters`: list the named formatters
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error

use clap::Parser;

use inplace::render::{run_formatters, run_render, RenderArgs};
use inplace::{logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let exit_code = dispatch_command(cli);
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
fn dispatch_command(cli: Cli) -> i32 {
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Render {
            record,
            field,
            options,
            namespace,
            condition,
        } => {
            let args = RenderArgs {
                record,
                field,
                options,
                namespace,
                condition,
            };
            result_to_exit(run_render(&args, config).map(print))
        }
        Commands::Formatters => result_to_exit(run_formatters(config).map(print)),
    }
}

fn print(output: String) {
    println!("{}", output);
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_render_defaults() {
        let cli = Cli::parse_from(["inplace", "render", "--record", "u.json", "--field", "name"]);
        assert!(!cli.debug);
        match cli.command {
            Commands::Render {
                record,
                field,
                options,
                namespace,
                condition,
            } => {
                assert_eq!(record, PathBuf::from("u.json"));
                assert_eq!(field, "name");
                assert!(options.is_none());
                assert!(namespace.is_empty());
                assert!(condition);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parsing_namespaces_and_condition() {
        let cli = Cli::parse_from([
            "inplace", "render", "-r", "u.json", "-f", "name", "-n", "admin", "-n", "v2", "--if",
            "false",
        ]);
        match cli.command {
            Commands::Render {
                namespace,
                condition,
                ..
            } => {
                assert_eq!(namespace, vec!["admin".to_string(), "v2".to_string()]);
                assert!(!condition);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from(["inplace", "formatters", "--debug", "--config", "host.toml"]);
        assert!(cli.debug);
        assert_eq!(cli.config, Some(PathBuf::from("host.toml")));
        assert!(matches!(cli.command, Commands::Formatters));
    }

    #[test]
    fn test_result_to_exit() {
        assert_eq!(result_to_exit::<String>(Ok(())), 0);
        assert_eq!(result_to_exit(Err("boom")), 1);
    }
}
