//! Command handlers

use std::path::{Path, PathBuf};

use inplace_fields::{FormatterLookup, Options, RecordRef};
use tracing::debug;

use crate::config::HostConfig;
use crate::error::Result;
use crate::logging::Pretty;
use crate::record_file::{load_options, load_record};

/// Arguments of `inplace render`
#[derive(Debug, Clone)]
pub struct RenderArgs {
    pub record: PathBuf,
    pub field: String,
    pub options: Option<PathBuf>,
    pub namespace: Vec<String>,
    pub condition: bool,
}

/// Render one field, returning the markup or the plain value when the
/// condition is false.
pub fn run_render(args: &RenderArgs, config: Option<&Path>) -> Result<String> {
    let host = HostConfig::load(config)?;
    render_with(&host, args)
}

/// Render against an already loaded configuration.
pub fn render_with(host: &HostConfig, args: &RenderArgs) -> Result<String> {
    let loaded = load_record(&args.record)?;
    let options = match &args.options {
        Some(path) => load_options(path)?,
        None => Options::default(),
    };
    debug!("options: {}", Pretty(&options));

    let record = loaded.as_readable();
    let reference = if args.namespace.is_empty() {
        RecordRef::Plain(record)
    } else {
        RecordRef::Namespaced(&args.namespace, record)
    };

    let rendered = host
        .context()
        .render_if(args.condition, reference, &args.field, Some(&options))?;
    Ok(rendered.into_string())
}

/// Names of the formatters `display_with` may reference, one per line.
pub fn run_formatters(config: Option<&Path>) -> Result<String> {
    let host = HostConfig::load(config)?;
    Ok(host.formatters().names().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn render_namespaced_record() {
        let dir = TempDir::new().unwrap();
        let record = write(
            &dir,
            "user.json",
            r#"{"type":"User","id":3,"fields":{"name":"Lucia"}}"#,
        );
        let args = RenderArgs {
            record,
            field: "name".into(),
            options: None,
            namespace: vec!["admin".into()],
            condition: true,
        };
        let html = render_with(&HostConfig::default(), &args).unwrap();
        assert!(html.contains("id=\"best_in_place_admin_user_3_name\""));
        assert!(html.contains("data-url=\"/admin/users/3\""));
    }

    #[test]
    fn false_condition_prints_plain_value() {
        let dir = TempDir::new().unwrap();
        let record = write(
            &dir,
            "user.json",
            r#"{"type":"User","id":3,"fields":{"name":"Lucia"}}"#,
        );
        let args = RenderArgs {
            record,
            field: "name".into(),
            options: None,
            namespace: vec![],
            condition: false,
        };
        assert_eq!(render_with(&HostConfig::default(), &args).unwrap(), "Lucia");
    }

    #[test]
    fn conflicting_options_surface_as_error() {
        let dir = TempDir::new().unwrap();
        let record = write(&dir, "user.json", r#"{"type":"User","id":3}"#);
        let options = write(
            &dir,
            "opts.yaml",
            "display_as: shout\ndisplay_with: number_to_currency\n",
        );
        let args = RenderArgs {
            record,
            field: "name".into(),
            options: Some(options),
            namespace: vec![],
            condition: true,
        };
        let err = render_with(&HostConfig::default(), &args).unwrap_err();
        assert_eq!(err.to_string(), "conflicting display options");
    }

    #[test]
    fn configured_currency_applies() {
        let dir = TempDir::new().unwrap();
        let record = write(
            &dir,
            "item.json",
            r#"{"type":"Item","id":1,"fields":{"price":150}}"#,
        );
        let options = write(&dir, "opts.yaml", "display_with: number_to_currency\n");
        let mut host = HostConfig::default();
        host.currency.unit = "º".into();
        let args = RenderArgs {
            record,
            field: "price".into(),
            options: Some(options),
            namespace: vec![],
            condition: true,
        };
        let html = render_with(&host, &args).unwrap();
        assert!(html.contains(">º150.00</span>"));
    }
}
