//! Validation and normalization of an options bag.

use indexmap::IndexMap;

use crate::error::{ConfigError, Result};
use crate::formatters::{FormatterLookup, NamedFormatter};
use crate::record::FieldReadable;
use crate::types::{
    Collection, DisplayWith, HelperOptions, Options, PathOption, ValueFormatter, WidgetType,
};

/// Labels used by checkboxes without a collection: `[false, true]`.
pub const DEFAULT_CHECKBOX_LABELS: [&str; 2] = ["No", "Yes"];

/// How the displayed text is produced.
#[derive(Clone)]
pub enum DisplayMode {
    /// Widget rules (input, date, checkbox, select)
    Widget,
    /// A presenter method on the record
    Method(String),
    /// A named formatter with its helper options
    Formatter(NamedFormatter, HelperOptions),
    /// A transform supplied by the caller
    Callable(ValueFormatter),
}

impl std::fmt::Debug for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Widget => f.write_str("Widget"),
            DisplayMode::Method(name) => f.debug_tuple("Method").field(name).finish(),
            DisplayMode::Formatter(_, opts) => f.debug_tuple("Formatter").field(opts).finish(),
            DisplayMode::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

/// An options bag with conflicts rejected and defaults filled in.
#[derive(Debug, Clone)]
pub struct ResolvedOptions {
    pub widget: WidgetType,
    pub display: DisplayMode,
    /// Present for checkbox (defaulted) and select (required)
    pub collection: Option<Collection>,
    pub object_name: Option<String>,
    pub path: Option<PathOption>,
    /// `data-*` attributes emitted only when supplied, in emission order
    pub pass_through: Vec<(&'static str, String)>,
    pub data: IndexMap<String, serde_json::Value>,
}

impl ResolvedOptions {
    /// Defaults for an empty bag: a text input displaying the raw value.
    pub fn plain() -> Self {
        Self {
            widget: WidgetType::Input,
            display: DisplayMode::Widget,
            collection: None,
            object_name: None,
            path: None,
            pass_through: Vec::new(),
            data: IndexMap::new(),
        }
    }
}

/// Validate `options` for a render of `record`.
///
/// Named formatters and presenter methods are resolved here so a bad bag
/// fails before any markup is built.
pub fn resolve(
    options: &Options,
    record: &dyn FieldReadable,
    formatters: &dyn FormatterLookup,
) -> Result<ResolvedOptions> {
    let display = resolve_display(options, record, formatters)?;
    let widget = options.widget.unwrap_or_default();
    let collection = resolve_collection(widget, options.collection.as_ref())?;

    let pass_through = [
        ("data-activator", &options.activator),
        ("data-ok-button", &options.ok_button),
        ("data-ok-button-class", &options.ok_button_class),
        ("data-cancel-button", &options.cancel_button),
        ("data-cancel-button-class", &options.cancel_button_class),
        ("data-use-confirm", &options.use_confirm),
        ("data-nil", &options.nil),
        ("data-inner-class", &options.inner_class),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone())))
    .collect();

    Ok(ResolvedOptions {
        widget,
        display,
        collection,
        object_name: options.object_name.clone(),
        path: options.path.clone(),
        pass_through,
        data: options.data.clone(),
    })
}

fn resolve_display(
    options: &Options,
    record: &dyn FieldReadable,
    formatters: &dyn FormatterLookup,
) -> Result<DisplayMode> {
    match (&options.display_as, &options.display_with) {
        (Some(_), Some(_)) => Err(ConfigError::ConflictingDisplayOptions),
        (Some(method), None) => {
            if record.responds_to(method) {
                Ok(DisplayMode::Method(method.clone()))
            } else {
                Err(ConfigError::UnknownDisplayMethod {
                    name: method.clone(),
                    type_name: record.type_name().into_owned(),
                })
            }
        }
        (None, Some(DisplayWith::Named(name))) => formatters
            .lookup(name)
            .map(|f| DisplayMode::Formatter(f, options.helper_options.clone()))
            .ok_or_else(|| ConfigError::UnknownDisplayHelper { name: name.clone() }),
        (None, Some(DisplayWith::Callable(f))) => Ok(DisplayMode::Callable(f.clone())),
        (None, None) => Ok(DisplayMode::Widget),
    }
}

fn resolve_collection(
    widget: WidgetType,
    collection: Option<&Collection>,
) -> Result<Option<Collection>> {
    match widget {
        WidgetType::Checkbox => match collection {
            None => Ok(Some(Collection::labels(DEFAULT_CHECKBOX_LABELS))),
            Some(Collection::Labels(labels)) if labels.len() == 2 => {
                Ok(Some(Collection::Labels(labels.clone())))
            }
            Some(_) => Err(ConfigError::InvalidCollection {
                widget: widget.to_string(),
                reason: "expected exactly two labels [false, true]".into(),
            }),
        },
        WidgetType::Select => match collection {
            Some(pairs @ Collection::Pairs(_)) => Ok(Some(pairs.clone())),
            Some(Collection::Labels(_)) => Err(ConfigError::InvalidCollection {
                widget: widget.to_string(),
                reason: "expected [value, label] pairs".into(),
            }),
            None => Err(ConfigError::InvalidCollection {
                widget: widget.to_string(),
                reason: "a select needs a collection".into(),
            }),
        },
        WidgetType::Input | WidgetType::Textarea | WidgetType::Date => Ok(None),
    }
}
