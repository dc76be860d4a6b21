//! Option types accepted by the renderer.
//!
//! Everything here deserializes from YAML/JSON using the same keys a template
//! author would pass (`type`, `path`, `collection`, `display_with`, ...).
//! Callables for `display_with` can only be attached from code.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::record::RecordRef;
use crate::value::FieldValue;

/// Extra arguments handed to a named formatter.
pub type HelperOptions = serde_json::Map<String, serde_json::Value>;

/// A unary transform supplied directly as `display_with`.
pub type ValueFormatter = Arc<dyn Fn(&FieldValue) -> String + Send + Sync>;

/// Which inline editor the client script should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    #[default]
    Input,
    Textarea,
    Date,
    Checkbox,
    Select,
}

impl WidgetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetType::Input => "input",
            WidgetType::Textarea => "textarea",
            WidgetType::Date => "date",
            WidgetType::Checkbox => "checkbox",
            WidgetType::Select => "select",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label set for checkbox and select widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Collection {
    /// `[false_label, true_label]` for checkboxes
    Labels(Vec<String>),
    /// `[value, label]` pairs for selects
    Pairs(Vec<(FieldValue, String)>),
}

impl Collection {
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Collection::Labels(labels.into_iter().map(Into::into).collect())
    }

    pub fn pairs<I, V, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, S)>,
        V: Into<FieldValue>,
        S: Into<String>,
    {
        Collection::Pairs(
            pairs
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
        )
    }
}

/// A route described as controller/action/params.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FieldValue>,
    #[serde(flatten)]
    pub params: IndexMap<String, FieldValue>,
}

impl RouteSpec {
    pub fn new(controller: impl Into<String>) -> Self {
        Self {
            controller: Some(controller.into()),
            ..Default::default()
        }
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn id(mut self, id: impl Into<FieldValue>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for RouteSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{:?}", self),
        }
    }
}

/// Everything a router needs to build the conventional url of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLocator {
    #[serde(default)]
    pub namespace: Vec<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ResourceLocator {
    /// Locator for a record reference; `None` when the record has no identity.
    pub fn for_record(record: RecordRef<'_>) -> Option<Self> {
        let base = record.record();
        let identity = base.identity()?;
        Some(Self {
            namespace: record.namespace().to_vec(),
            type_name: base.type_name().into_owned(),
            id: identity.id(),
        })
    }
}

/// Explicit submission url for the element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathOption {
    /// An already-formed url, e.g. `/custom/path` or a route helper's output
    Url(String),
    /// The conventional url of another record
    Resource { resource: ResourceLocator },
    /// A route mapping expanded by the router
    Route(RouteSpec),
}

impl From<&str> for PathOption {
    fn from(url: &str) -> Self {
        PathOption::Url(url.to_string())
    }
}

impl From<String> for PathOption {
    fn from(url: String) -> Self {
        PathOption::Url(url)
    }
}

impl From<RouteSpec> for PathOption {
    fn from(route: RouteSpec) -> Self {
        PathOption::Route(route)
    }
}

impl From<ResourceLocator> for PathOption {
    fn from(resource: ResourceLocator) -> Self {
        PathOption::Resource { resource }
    }
}

/// Formatter used to compute the displayed text.
#[derive(Clone)]
pub enum DisplayWith {
    /// A formatter registered with the renderer's lookup
    Named(String),
    /// A transform supplied directly
    Callable(ValueFormatter),
}

impl fmt::Debug for DisplayWith {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayWith::Named(name) => f.debug_tuple("Named").field(name).finish(),
            DisplayWith::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl Serialize for DisplayWith {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayWith::Named(name) => serializer.serialize_str(name),
            DisplayWith::Callable(_) => serializer.serialize_str("<callable>"),
        }
    }
}

impl<'de> Deserialize<'de> for DisplayWith {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(DisplayWith::Named)
    }
}

/// The options bag for a single render call.
///
/// Absent keys mean "use the default"; pass-through attributes are only
/// emitted when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub widget: Option<WidgetType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<Collection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_as: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_with: Option<DisplayWith>,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub helper_options: HelperOptions,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub inner_class: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub activator: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ok_button: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ok_button_class: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancel_button: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cancel_button_class: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub use_confirm: Option<String>,
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub nil: Option<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub data: IndexMap<String, serde_json::Value>,
}

/// Accept any scalar (`false`, `3`, `"text"`) for a pass-through attribute.
fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<FieldValue>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        FieldValue::Nil => None,
        other => Some(other.to_string()),
    }))
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<PathOption>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    pub fn widget(mut self, widget: WidgetType) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn collection(mut self, collection: Collection) -> Self {
        self.collection = Some(collection);
        self
    }

    pub fn display_as(mut self, method: impl Into<String>) -> Self {
        self.display_as = Some(method.into());
        self
    }

    /// Display through a formatter registered by name.
    pub fn display_with(mut self, name: impl Into<String>) -> Self {
        self.display_with = Some(DisplayWith::Named(name.into()));
        self
    }

    /// Display through a transform of the raw value.
    pub fn display_with_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FieldValue) -> String + Send + Sync + 'static,
    {
        self.display_with = Some(DisplayWith::Callable(Arc::new(f)));
        self
    }

    pub fn helper_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.helper_options.insert(key.into(), value.into());
        self
    }

    pub fn inner_class(mut self, class: impl Into<String>) -> Self {
        self.inner_class = Some(class.into());
        self
    }

    pub fn activator(mut self, selector: impl Into<String>) -> Self {
        self.activator = Some(selector.into());
        self
    }

    pub fn ok_button(mut self, text: impl Into<String>) -> Self {
        self.ok_button = Some(text.into());
        self
    }

    pub fn ok_button_class(mut self, class: impl Into<String>) -> Self {
        self.ok_button_class = Some(class.into());
        self
    }

    pub fn cancel_button(mut self, text: impl Into<String>) -> Self {
        self.cancel_button = Some(text.into());
        self
    }

    pub fn cancel_button_class(mut self, class: impl Into<String>) -> Self {
        self.cancel_button_class = Some(class.into());
        self
    }

    pub fn use_confirm(mut self, value: impl ToString) -> Self {
        self.use_confirm = Some(value.to_string());
        self
    }

    pub fn nil(mut self, placeholder: impl Into<String>) -> Self {
        self.nil = Some(placeholder.into());
        self
    }

    /// Add an arbitrary `data-<key>` attribute.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_yaml_uses_template_keys() {
        let yaml = r#"
type: select
path: /custom/path
collection:
  - [1, "Joe's Country"]
  - [2, "Bob's Country"]
display_with: number_to_currency
helper_options:
  unit: "º"
use_confirm: false
data:
  foo: awesome
"#;
        let opts: Options = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(opts.widget, Some(WidgetType::Select));
        assert_eq!(opts.path, Some(PathOption::Url("/custom/path".into())));
        assert_eq!(
            opts.collection,
            Some(Collection::pairs([(1, "Joe's Country"), (2, "Bob's Country")]))
        );
        assert!(matches!(opts.display_with, Some(DisplayWith::Named(ref n)) if n == "number_to_currency"));
        assert_eq!(opts.helper_options["unit"], "º");
        assert_eq!(opts.use_confirm.as_deref(), Some("false"));
        assert_eq!(opts.data["foo"], "awesome");
    }

    #[test]
    fn checkbox_labels_deserialize_as_labels() {
        let opts: Options =
            serde_yaml_ng::from_str("type: checkbox\ncollection: [Nain, Da]").unwrap();
        assert_eq!(opts.collection, Some(Collection::labels(["Nain", "Da"])));
    }

    #[test]
    fn route_path_deserializes_as_mapping() {
        let opts: Options =
            serde_yaml_ng::from_str("path: {controller: users, action: edit, id: 23}").unwrap();
        let expected = RouteSpec::new("users").action("edit").id(23);
        assert_eq!(opts.path, Some(PathOption::Route(expected)));
    }

    #[test]
    fn resource_path_deserializes() {
        let opts: Options =
            serde_yaml_ng::from_str("path: {resource: {type: User, id: '7'}}").unwrap();
        match opts.path {
            Some(PathOption::Resource { resource }) => {
                assert_eq!(resource.type_name, "User");
                assert_eq!(resource.id.as_deref(), Some("7"));
                assert!(resource.namespace.is_empty());
            }
            other => panic!("expected resource path, got {:?}", other),
        }
    }

    #[test]
    fn widget_names() {
        assert_eq!(WidgetType::default(), WidgetType::Input);
        assert_eq!(WidgetType::Checkbox.to_string(), "checkbox");
    }

    #[test]
    fn callable_display_with_serializes_as_marker() {
        let opts = Options::new().display_with_fn(|v| v.to_string().to_uppercase());
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["display_with"], "<callable>");
    }
}
