//! Routing collaborator: turns route mappings and records into urls.

use std::collections::HashSet;

use crate::identity::underscore;
use crate::types::{ResourceLocator, RouteSpec};

/// Url construction consumed by the renderer.
pub trait Router: Send + Sync {
    /// Expand a controller/action/params mapping. `None` when the mapping
    /// does not describe a known route.
    fn expand(&self, route: &RouteSpec) -> Option<String>;

    /// Conventional update url for a record.
    fn resource_url(&self, resource: &ResourceLocator) -> Option<String>;
}

/// REST-style routes: `/users/7`, `/admin/users/7`, `/users/7/edit`.
#[derive(Debug, Clone, Default)]
pub struct ConventionalRouter {
    mount: String,
    controllers: HashSet<String>,
}

impl ConventionalRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every generated url with `mount` (e.g. `/app`).
    pub fn with_mount(mut self, mount: impl Into<String>) -> Self {
        self.mount = mount.into().trim_end_matches('/').to_string();
        self
    }

    /// Restrict route mappings to these controllers. Without any, every
    /// controller is accepted.
    pub fn with_controllers<I, S>(mut self, controllers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controllers = controllers.into_iter().map(Into::into).collect();
        self
    }

    /// Mount followed by `segments`, each percent-encoded.
    fn join(&self, segments: &[&str]) -> String {
        let mut url = self.mount.clone();
        for segment in segments.iter().filter(|s| !s.is_empty()) {
            url.push('/');
            url.push_str(&encode_segment(segment));
        }
        if url.is_empty() {
            url.push('/');
        }
        url
    }
}

impl Router for ConventionalRouter {
    fn expand(&self, route: &RouteSpec) -> Option<String> {
        let controller = route.controller.as_deref()?.trim_matches('/');
        if controller.is_empty() {
            return None;
        }
        if !self.controllers.is_empty() && !self.controllers.contains(controller) {
            return None;
        }

        let id = route
            .id
            .as_ref()
            .map(|v| v.to_string())
            .filter(|s| !s.is_empty());
        let action = route.action.as_deref().unwrap_or("show");

        let mut segments: Vec<&str> = controller.split('/').collect();
        match (action, id.as_deref()) {
            ("index" | "create", _) => {}
            ("show" | "update" | "destroy", Some(id)) => segments.push(id),
            ("show" | "update" | "destroy", None) => {}
            (action, Some(id)) => {
                segments.push(id);
                segments.push(action);
            }
            (action, None) => segments.push(action),
        }

        let mut url = self.join(&segments);
        let query = route
            .params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    urlencoding::encode(k),
                    urlencoding::encode(&v.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Some(url)
    }

    fn resource_url(&self, resource: &ResourceLocator) -> Option<String> {
        let plural = pluralize(&underscore(&resource.type_name));
        if plural.is_empty() {
            return None;
        }
        let namespace: Vec<String> = resource.namespace.iter().map(|s| underscore(s)).collect();
        let mut segments: Vec<&str> = namespace.iter().map(String::as_str).collect();
        segments.push(&plural);
        if let Some(id) = resource.id.as_deref() {
            segments.push(id);
        }
        Some(self.join(&segments))
    }
}

/// Percent-encode one path segment; dot segments are encoded too so they
/// never act as `.` or `..`.
fn encode_segment(segment: &str) -> String {
    if segment.chars().all(|c| c == '.') {
        return segment.replace('.', "%2E");
    }
    urlencoding::encode(segment).into_owned()
}

/// English plural of a snake_case resource name.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    if word.ends_with('y') {
        let stem = &word[..word.len() - 1];
        let after_vowel = stem.ends_with(['a', 'e', 'i', 'o', 'u']);
        if !after_vowel {
            return format!("{}ies", stem);
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|end| word.ends_with(end)) {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Option<&str>) -> ResourceLocator {
        ResourceLocator {
            namespace: Vec::new(),
            type_name: "User".into(),
            id: id.map(String::from),
        }
    }

    #[test]
    fn resource_url_member_and_collection() {
        let router = ConventionalRouter::new();
        assert_eq!(router.resource_url(&user(Some("7"))).as_deref(), Some("/users/7"));
        assert_eq!(router.resource_url(&user(None)).as_deref(), Some("/users"));
    }

    #[test]
    fn resource_url_is_namespaced() {
        let router = ConventionalRouter::new();
        let mut resource = user(Some("7"));
        resource.namespace = vec!["admin".into()];
        assert_eq!(router.resource_url(&resource).as_deref(), Some("/admin/users/7"));
    }

    #[test]
    fn resource_url_underscores_nested_types() {
        let router = ConventionalRouter::new().with_mount("/app/");
        let resource = ResourceLocator {
            namespace: Vec::new(),
            type_name: "Cuca::Car".into(),
            id: Some("1".into()),
        };
        assert_eq!(router.resource_url(&resource).as_deref(), Some("/app/cuca_cars/1"));
    }

    #[test]
    fn expand_member_action() {
        let router = ConventionalRouter::new();
        let route = RouteSpec::new("users").action("edit").id(23);
        assert_eq!(router.expand(&route).as_deref(), Some("/users/23/edit"));
    }

    #[test]
    fn expand_collection_and_show() {
        let router = ConventionalRouter::new();
        assert_eq!(
            router.expand(&RouteSpec::new("users").action("index")).as_deref(),
            Some("/users")
        );
        assert_eq!(
            router.expand(&RouteSpec::new("users").id(4)).as_deref(),
            Some("/users/4")
        );
        assert_eq!(
            router.expand(&RouteSpec::new("users").action("search")).as_deref(),
            Some("/users/search")
        );
    }

    #[test]
    fn expand_appends_query_params() {
        let router = ConventionalRouter::new();
        let route = RouteSpec::new("users")
            .action("update")
            .id(1)
            .param("locale", "pt br");
        assert_eq!(router.expand(&route).as_deref(), Some("/users/1?locale=pt%20br"));
    }

    #[test]
    fn expand_rejects_unknown_controller() {
        let router = ConventionalRouter::new().with_controllers(["users"]);
        assert!(router.expand(&RouteSpec::new("cars")).is_none());
        assert!(router.expand(&RouteSpec::default()).is_none());
        assert!(router.expand(&RouteSpec::new("users")).is_some());
    }

    #[test]
    fn dynamic_segments_are_encoded() {
        let router = ConventionalRouter::new();
        assert_eq!(
            router
                .resource_url(&user(Some("a b/../../admin")))
                .as_deref(),
            Some("/users/a%20b%2F..%2F..%2Fadmin")
        );
        assert_eq!(
            router.resource_url(&user(Some(".."))).as_deref(),
            Some("/users/%2E%2E")
        );

        let route = RouteSpec::new("admin/users")
            .action("re view")
            .id("7/../1");
        assert_eq!(
            router.expand(&route).as_deref(),
            Some("/admin/users/7%2F..%2F1/re%20view")
        );
    }

    #[test]
    fn pluralize_rules() {
        assert_eq!(pluralize("user"), "users");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("match"), "matches");
    }
}
