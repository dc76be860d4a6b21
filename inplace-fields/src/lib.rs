//! Inline-editable field markup
//!
//! `inplace-fields` renders a single `<span>` per record field carrying the
//! metadata a client-side script needs to turn it into an in-place editor:
//! current value, widget type, submission url, button labels and
//! collections. Persistence, routing and the script itself live elsewhere;
//! routing and named formatters are injected as collaborators.
//!
//! # Architecture
//!
//! - **Option resolver** ([`options`]): rejects contradictory bags, fills defaults
//! - **Identity** ([`identity`]): element id and submission url from the record
//! - **Value formatter** ([`format`]): displayed text, select value, collection JSON
//! - **Renderer** ([`context`]): composes the above into markup; `render_if`
//!   short-circuits to the plain value
//!
//! ```rust,ignore
//! use inplace_fields::{InPlaceContext, MapRecord, Options, WidgetType};
//!
//! let user = MapRecord::new("User").with_id(7).field("receive_email", false);
//! let html = InPlaceContext::new()
//!     .render(&user, "receive_email", &Options::new().widget(WidgetType::Checkbox))?;
//! ```

pub mod context;
pub mod error;
pub mod format;
pub mod formatters;
pub mod identity;
pub mod markup;
pub mod options;
pub mod record;
pub mod routing;
pub mod types;
pub mod value;

pub use context::{InPlaceContext, InPlaceContextBuilder, RenderContext, Rendered};
pub use error::{ConfigError, Result};
pub use format::Formatted;
pub use formatters::{CurrencyFormat, FormatterLookup, FormatterRegistry, NamedFormatter};
pub use identity::{dom_id, underscore, Identity};
pub use options::{DisplayMode, ResolvedOptions};
pub use record::{FieldReadable, Identifiable, MapRecord, RecordRef};
pub use routing::{ConventionalRouter, Router};
pub use types::{
    Collection, DisplayWith, HelperOptions, Options, PathOption, ResourceLocator, RouteSpec,
    ValueFormatter, WidgetType,
};
pub use value::FieldValue;
