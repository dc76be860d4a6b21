//! Displayed text, value token and serialized collection for a field.

use tracing::warn;

use crate::error::Result;
use crate::options::{DisplayMode, ResolvedOptions};
use crate::record::FieldReadable;
use crate::types::{Collection, WidgetType};
use crate::value::FieldValue;

/// Output of the value formatter. `text` is unescaped.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formatted {
    pub text: String,
    /// Raw value for select widgets
    pub value_token: Option<String>,
    /// Collection as a JSON array, for checkbox and select widgets
    pub collection_json: Option<String>,
}

impl Formatted {
    fn text(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }
}

/// Text shown for `field` with no options at all.
pub fn plain_text(record: &dyn FieldReadable, field: &str) -> String {
    record.read(field).to_string()
}

/// Compute what the element shows for `field`.
pub fn format_value(
    record: &dyn FieldReadable,
    field: &str,
    resolved: &ResolvedOptions,
) -> Result<Formatted> {
    let raw = record.read(field);

    match &resolved.display {
        DisplayMode::Method(method) => Ok(Formatted::text(
            record.present(method).unwrap_or_default(),
        )),
        DisplayMode::Formatter(f, helper_options) => Ok(Formatted::text(f(&raw, helper_options))),
        DisplayMode::Callable(f) => Ok(Formatted::text(f(&raw))),
        DisplayMode::Widget => format_widget(&raw, field, resolved),
    }
}

fn format_widget(raw: &FieldValue, field: &str, resolved: &ResolvedOptions) -> Result<Formatted> {
    match (resolved.widget, resolved.collection.as_ref()) {
        (WidgetType::Date, _) => Ok(Formatted::text(
            raw.calendar_date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| raw.to_string()),
        )),
        (WidgetType::Checkbox, Some(collection @ Collection::Labels(labels))) => {
            let text = labels
                .get(usize::from(raw.is_truthy()))
                .cloned()
                .unwrap_or_default();
            Ok(Formatted {
                text,
                value_token: None,
                collection_json: Some(serde_json::to_string(collection)?),
            })
        }
        (WidgetType::Select, Some(collection @ Collection::Pairs(pairs))) => {
            let token = raw.to_string();
            let text = match pairs.iter().find(|(value, _)| value.to_string() == token) {
                Some((_, label)) => label.clone(),
                None => {
                    warn!(field, value = %token, "no select label matches the field value");
                    String::new()
                }
            };
            Ok(Formatted {
                text,
                value_token: Some(token),
                collection_json: Some(serde_json::to_string(collection)?),
            })
        }
        _ => Ok(Formatted::text(raw.to_string())),
    }
}
