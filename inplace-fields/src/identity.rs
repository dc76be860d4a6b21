//! Element identity and submission url for a record reference.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::record::RecordRef;
use crate::routing::Router;
use crate::types::{PathOption, ResourceLocator};

/// Prefix shared by every element id and the element's class.
pub const ELEMENT_CLASS: &str = "best_in_place";

static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("static regex"));
static WORD_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Identity of the element being rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub dom_id: String,
    /// Underscored type name of the base record, e.g. `cuca_car`
    pub type_name: String,
    pub url: Option<String>,
}

/// `lower_snake_case` form of a type or namespace name.
///
/// `Cuca::Car` becomes `cuca_car`, `BlogPost` becomes `blog_post`; runs of
/// anything that is not an ASCII letter or digit collapse to one underscore.
pub fn underscore(name: &str) -> String {
    let s = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    let s = WORD_BOUNDARY.replace_all(&s, "${1}_${2}");
    let s = s.to_lowercase();
    NON_ALNUM.replace_all(&s, "_").trim_matches('_').to_string()
}

/// Element id: `best_in_place[_<namespace>...]_<type>[_<id>]_<field>`.
pub fn dom_id(record: RecordRef<'_>, field: &str) -> String {
    let base = record.record();
    let mut parts: Vec<String> = vec![ELEMENT_CLASS.to_string()];
    parts.extend(
        record
            .namespace()
            .iter()
            .map(|s| underscore(s))
            .filter(|s| !s.is_empty()),
    );
    parts.push(underscore(&base.type_name()));
    if let Some(id) = base.identity().and_then(|i| i.id()) {
        parts.push(id_segment(&id));
    }
    parts.push(id_segment(field));
    parts.retain(|p| !p.is_empty());
    parts.join("_")
}

/// Whitespace runs become `_` so the id stays a single token.
fn id_segment(raw: &str) -> String {
    WHITESPACE.replace_all(raw.trim(), "_").into_owned()
}

/// Resolve id, type name and url for `record`.
///
/// An explicit `path` always wins. Without one the router builds the
/// conventional url of the record, which requires an identity.
pub fn resolve_identity(
    record: RecordRef<'_>,
    field: &str,
    path: Option<&PathOption>,
    router: &dyn Router,
) -> Result<Identity> {
    let type_name = underscore(&record.record().type_name());
    let url = resolve_url(record, path, router, &type_name)?;
    Ok(Identity {
        dom_id: dom_id(record, field),
        type_name,
        url,
    })
}

fn resolve_url(
    record: RecordRef<'_>,
    path: Option<&PathOption>,
    router: &dyn Router,
    type_name: &str,
) -> Result<Option<String>> {
    match path {
        Some(PathOption::Url(url)) => Ok(Some(url.clone()).filter(|u| !u.is_empty())),
        Some(PathOption::Route(route)) => router
            .expand(route)
            .map(Some)
            .ok_or_else(|| ConfigError::UnresolvableRoute {
                route: route.to_string(),
            }),
        Some(PathOption::Resource { resource }) => Ok(conventional_url(router, resource)),
        None => {
            let resource = ResourceLocator::for_record(record).ok_or_else(|| {
                ConfigError::MissingPath {
                    type_name: type_name.to_string(),
                }
            })?;
            Ok(conventional_url(router, &resource))
        }
    }
}

fn conventional_url(router: &dyn Router, resource: &ResourceLocator) -> Option<String> {
    let url = router.resource_url(resource);
    if url.is_none() {
        warn!(
            type_name = %resource.type_name,
            "no conventional url for resource; omitting data-url"
        );
    }
    url
}
