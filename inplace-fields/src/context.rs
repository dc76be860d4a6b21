//! InPlaceContext: main API surface for rendering editable fields.
//!
//! Holds the two collaborators a render needs (a [`Router`] and a
//! [`FormatterLookup`]) and runs the pipeline: resolve options, resolve
//! identity, format the value, build the element.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::Result;
use crate::format::{format_value, plain_text};
use crate::formatters::{FormatterLookup, FormatterRegistry};
use crate::identity::{resolve_identity, ELEMENT_CLASS};
use crate::markup::{data_attribute_name, data_attribute_value, Element};
use crate::options::resolve;
use crate::record::RecordRef;
use crate::routing::{ConventionalRouter, Router};
use crate::types::{Options, WidgetType};

/// Builder for `InPlaceContext`. Created by `InPlaceContext::builder()`.
pub struct InPlaceContextBuilder {
    router: Option<Arc<dyn Router>>,
    formatters: Option<Arc<dyn FormatterLookup>>,
}

impl InPlaceContextBuilder {
    /// Use `router` for route mappings and conventional urls.
    pub fn with_router(mut self, router: impl Router + 'static) -> Self {
        self.router = Some(Arc::new(router));
        self
    }

    /// Use `formatters` to resolve `display_with` names.
    pub fn with_formatters(mut self, formatters: impl FormatterLookup + 'static) -> Self {
        self.formatters = Some(Arc::new(formatters));
        self
    }

    /// Missing collaborators fall back to [`ConventionalRouter`] and
    /// [`FormatterRegistry::with_defaults`].
    pub fn build(self) -> InPlaceContext {
        InPlaceContext {
            router: self
                .router
                .unwrap_or_else(|| Arc::new(ConventionalRouter::new())),
            formatters: self
                .formatters
                .unwrap_or_else(|| Arc::new(FormatterRegistry::with_defaults())),
        }
    }
}

/// Everything derived for one render call, before it becomes markup.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    pub dom_id: String,
    pub class: String,
    pub object_name: String,
    pub attribute: String,
    pub widget: WidgetType,
    pub text: String,
    pub url: Option<String>,
    pub collection_json: Option<String>,
    pub value_token: Option<String>,
    pub pass_through: Vec<(&'static str, String)>,
    pub data: IndexMap<String, serde_json::Value>,
}

impl RenderContext {
    /// The element carrying this context as `data-*` attributes.
    pub fn to_element(&self) -> Element {
        let mut element = Element::span()
            .attr("class", self.class.clone())
            .attr("id", self.dom_id.clone())
            .attr_opt("data-url", self.url.clone())
            .attr("data-object", self.object_name.clone())
            .attr("data-attribute", self.attribute.clone())
            .attr("data-type", self.widget.as_str())
            .attr_opt("data-collection", self.collection_json.clone())
            .attr_opt("data-value", self.value_token.clone());
        for (name, value) in &self.pass_through {
            element = element.attr(*name, value.clone());
        }
        // Attributes emitted above win over free-form data of the same name.
        for (key, value) in &self.data {
            match data_attribute_name(key) {
                Some(name) if element.attribute(&name).is_none() => {
                    element = element.attr(name, data_attribute_value(value));
                }
                Some(name) => {
                    warn!(attribute = %name, "data key collides with an emitted attribute; skipped")
                }
                None => warn!(key = %key, "data key is empty after normalization; skipped"),
            }
        }
        element.text(self.text.clone())
    }
}

/// Result of [`InPlaceContext::render_if`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Full editable element
    Markup(String),
    /// Plain, unescaped field value
    Text(String),
}

impl Rendered {
    pub fn as_str(&self) -> &str {
        match self {
            Rendered::Markup(s) | Rendered::Text(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Rendered::Markup(s) | Rendered::Text(s) => s,
        }
    }

    pub fn is_markup(&self) -> bool {
        matches!(self, Rendered::Markup(_))
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders inline-editable elements for record fields.
///
/// Stateless between calls; share one context across threads freely.
#[derive(Clone)]
pub struct InPlaceContext {
    router: Arc<dyn Router>,
    formatters: Arc<dyn FormatterLookup>,
}

impl InPlaceContext {
    /// Start configuring a context.
    ///
    /// ```rust,ignore
    /// let ctx = InPlaceContext::builder()
    ///     .with_router(ConventionalRouter::new().with_mount("/app"))
    ///     .with_formatters(FormatterRegistry::with_defaults())
    ///     .build();
    /// ```
    pub fn builder() -> InPlaceContextBuilder {
        InPlaceContextBuilder {
            router: None,
            formatters: None,
        }
    }

    /// A context with the default collaborators.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn formatters(&self) -> &dyn FormatterLookup {
        self.formatters.as_ref()
    }

    pub fn router(&self) -> &dyn Router {
        self.router.as_ref()
    }

    /// Resolve everything needed to render `field` of `record`.
    pub fn render_context<'a>(
        &self,
        record: impl Into<RecordRef<'a>>,
        field: &str,
        options: &Options,
    ) -> Result<RenderContext> {
        let record = record.into();
        let base = record.record();

        let resolved = resolve(options, base, self.formatters.as_ref())?;
        let identity = resolve_identity(record, field, resolved.path.as_ref(), self.router.as_ref())?;
        let formatted = format_value(base, field, &resolved)?;

        Ok(RenderContext {
            dom_id: identity.dom_id,
            class: ELEMENT_CLASS.to_string(),
            object_name: resolved.object_name.unwrap_or(identity.type_name),
            attribute: field.to_string(),
            widget: resolved.widget,
            text: formatted.text,
            url: identity.url,
            collection_json: formatted.collection_json,
            value_token: formatted.value_token,
            pass_through: resolved.pass_through,
            data: resolved.data,
        })
    }

    /// Render the editable element for `field` of `record`.
    ///
    /// Either returns the complete markup or fails with a
    /// [`ConfigError`](crate::ConfigError); nothing partial is produced.
    pub fn render<'a>(
        &self,
        record: impl Into<RecordRef<'a>>,
        field: &str,
        options: &Options,
    ) -> Result<String> {
        let ctx = self.render_context(record, field, options)?;
        debug!(
            dom_id = %ctx.dom_id,
            widget = %ctx.widget,
            url = ?ctx.url,
            "rendered in-place field"
        );
        Ok(ctx.to_element().render())
    }

    /// Render the element when `condition` holds, else the plain value.
    pub fn render_if<'a>(
        &self,
        condition: bool,
        record: impl Into<RecordRef<'a>>,
        field: &str,
        options: Option<&Options>,
    ) -> Result<Rendered> {
        let record = record.into();
        if condition {
            let empty = Options::default();
            self.render(record, field, options.unwrap_or(&empty))
                .map(Rendered::Markup)
        } else {
            Ok(Rendered::Text(plain_text(record.record(), field)))
        }
    }
}

impl Default for InPlaceContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InPlaceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InPlaceContext")
            .field("formatters", &self.formatters.names())
            .finish_non_exhaustive()
    }
}
