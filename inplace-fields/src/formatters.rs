//! Named formatters reachable through `display_with`.
//!
//! A named formatter takes the raw value plus the `helper_options` mapping.
//! The defaults cover the usual number helpers; hosts register their own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::types::HelperOptions;
use crate::value::FieldValue;

/// A formatter resolvable by name.
pub type NamedFormatter = Arc<dyn Fn(&FieldValue, &HelperOptions) -> String + Send + Sync>;

/// Lookup of formatters by name, consumed by the option resolver.
pub trait FormatterLookup: Send + Sync {
    fn lookup(&self, name: &str) -> Option<NamedFormatter>;

    /// Names known to this lookup, for diagnostics.
    fn names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Base settings for `number_to_currency`; `helper_options` override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyFormat {
    pub unit: String,
    pub precision: usize,
    pub delimiter: String,
    pub separator: String,
    /// `%u` is replaced by the unit, `%n` by the number
    pub format: String,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            unit: "$".into(),
            precision: 2,
            delimiter: ",".into(),
            separator: ".".into(),
            format: "%u%n".into(),
        }
    }
}

/// Formatters registered by name.
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    formatters: BTreeMap<String, NamedFormatter>,
}

impl FormatterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number helpers with stock currency settings.
    pub fn with_defaults() -> Self {
        Self::with_currency(CurrencyFormat::default())
    }

    /// The number helpers with `currency` as the base for `number_to_currency`.
    pub fn with_currency(currency: CurrencyFormat) -> Self {
        Self::new()
            .register("number_to_currency", move |v, opts| {
                number_to_currency(v, &currency, opts)
            })
            .register("number_with_precision", number_with_precision)
            .register("number_with_delimiter", number_with_delimiter)
            .register("number_to_percentage", number_to_percentage)
    }

    /// Register (or replace) a formatter.
    pub fn register<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&FieldValue, &HelperOptions) -> String + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(f));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FormatterLookup for FormatterRegistry {
    fn lookup(&self, name: &str) -> Option<NamedFormatter> {
        self.formatters.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.formatters.keys().cloned().collect()
    }
}

fn opt_string(opts: &HelperOptions, key: &str) -> Option<String> {
    match opts.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Largest `precision` honored; larger requests are clamped.
pub const MAX_PRECISION: usize = 100;

fn opt_usize(opts: &HelperOptions, key: &str) -> Option<usize> {
    match opts.get(key)? {
        serde_json::Value::Number(n) => n.as_u64().map(|n| n as usize),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// `1234567.891` with precision 2, `,` and `.` becomes `1,234,567.89`.
fn format_number(x: f64, precision: Option<usize>, delimiter: &str, separator: &str) -> String {
    let digits = match precision {
        Some(p) => format!("{:.*}", p.min(MAX_PRECISION), x.abs()),
        None => format!("{}", x.abs()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (digits, None),
    };

    let mut grouped = String::new();
    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(delimiter);
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if x < 0.0 && x.abs() > 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part.filter(|f| !f.is_empty()) {
        out.push_str(separator);
        out.push_str(&frac);
    }
    out
}

/// `150` becomes `$150.00`.
pub fn number_to_currency(
    value: &FieldValue,
    base: &CurrencyFormat,
    opts: &HelperOptions,
) -> String {
    let Some(x) = value.as_f64() else {
        return value.to_string();
    };
    let unit = opt_string(opts, "unit").unwrap_or_else(|| base.unit.clone());
    let precision = opt_usize(opts, "precision").unwrap_or(base.precision);
    let delimiter = opt_string(opts, "delimiter").unwrap_or_else(|| base.delimiter.clone());
    let separator = opt_string(opts, "separator").unwrap_or_else(|| base.separator.clone());
    let format = opt_string(opts, "format").unwrap_or_else(|| base.format.clone());

    let number = format_number(x.abs(), Some(precision), &delimiter, &separator);
    let formatted = format.replace("%u", &unit).replace("%n", &number);
    if x < 0.0 {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Fixed number of decimals, default 3.
pub fn number_with_precision(value: &FieldValue, opts: &HelperOptions) -> String {
    let Some(x) = value.as_f64() else {
        return value.to_string();
    };
    let precision = opt_usize(opts, "precision").unwrap_or(3);
    let delimiter = opt_string(opts, "delimiter").unwrap_or_default();
    let separator = opt_string(opts, "separator").unwrap_or_else(|| ".".into());
    format_number(x, Some(precision), &delimiter, &separator)
}

/// Thousands grouping, decimals untouched.
pub fn number_with_delimiter(value: &FieldValue, opts: &HelperOptions) -> String {
    let Some(x) = value.as_f64() else {
        return value.to_string();
    };
    let delimiter = opt_string(opts, "delimiter").unwrap_or_else(|| ",".into());
    let separator = opt_string(opts, "separator").unwrap_or_else(|| ".".into());
    format_number(x, None, &delimiter, &separator)
}

/// `12.5` becomes `12.500%`.
pub fn number_to_percentage(value: &FieldValue, opts: &HelperOptions) -> String {
    let Some(x) = value.as_f64() else {
        return value.to_string();
    };
    let precision = opt_usize(opts, "precision").unwrap_or(3);
    let delimiter = opt_string(opts, "delimiter").unwrap_or_default();
    let separator = opt_string(opts, "separator").unwrap_or_else(|| ".".into());
    let format = opt_string(opts, "format").unwrap_or_else(|| "%n%".into());
    format.replace(
        "%n",
        &format_number(x, Some(precision), &delimiter, &separator),
    )
}
