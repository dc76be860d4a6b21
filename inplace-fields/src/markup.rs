//! Minimal element builder with attribute and text escaping.

/// A single element with ordered attributes and escaped text content.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(String, String)>,
    text: String,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            text: String::new(),
        }
    }

    pub fn span() -> Self {
        Self::new("span")
    }

    /// Append an attribute. Values are escaped on render.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Append an attribute only when `value` is present.
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Unescaped text content.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to markup. Attribute values escape both quote kinds so
    /// JSON payloads stay intact inside the attribute.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64 + self.text.len());
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');
        out.push_str(&html_escape::encode_text(&self.text));
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
        out
    }
}

/// `data-<key>` name for a free-form data key: lower-case, `_` and spaces as `-`.
///
/// `None` when nothing of the key survives normalization.
pub fn data_attribute_name(key: &str) -> Option<String> {
    let key: String = key
        .trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            c => c.to_ascii_lowercase(),
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.' || *c == ':')
        .collect();
    let key = key.trim_matches('-');
    if key.is_empty() {
        None
    } else {
        Some(format!("data-{}", key))
    }
}

/// Attribute value for a free-form data entry: strings verbatim, other
/// values as JSON.
pub fn data_attribute_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_escaped_attributes_and_text() {
        let html = Element::span()
            .attr("id", "x")
            .attr("data-collection", r#"[[1,"Joe's"]]"#)
            .text("<b>5' 5\"</b>")
            .render();
        let (open, rest) = html.split_once('>').unwrap();
        assert!(open.starts_with("<span id=\"x\" data-collection=\""));
        assert!(!open.contains('\''));
        assert_eq!(open.matches('"').count(), 4);
        let encoded = open
            .trim_start_matches("<span id=\"x\" data-collection=\"")
            .trim_end_matches('"');
        assert_eq!(
            html_escape::decode_html_entities(encoded),
            r#"[[1,"Joe's"]]"#
        );
        assert!(rest.starts_with("&lt;b&gt;5"));
        assert!(rest.ends_with("&lt;/b&gt;</span>"));
    }

    #[test]
    fn optional_attributes() {
        let el = Element::span()
            .attr_opt("data-url", None::<String>)
            .attr_opt("data-value", Some("2"));
        assert_eq!(el.attribute("data-url"), None);
        assert_eq!(el.attribute("data-value"), Some("2"));
    }

    #[test]
    fn data_names_and_values() {
        assert_eq!(data_attribute_name("foo").as_deref(), Some("data-foo"));
        assert_eq!(data_attribute_name("Foo_bar").as_deref(), Some("data-foo-bar"));
        assert_eq!(data_attribute_name(""), None);
        assert_eq!(data_attribute_name("__"), None);
        assert_eq!(data_attribute_name("¡¿"), None);
        assert_eq!(data_attribute_value(&json!("awesome")), "awesome");
        assert_eq!(data_attribute_value(&json!([1, 2])), "[1,2]");
        assert_eq!(data_attribute_value(&json!(true)), "true");
    }
}
