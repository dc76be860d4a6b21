//! Property-based tests for the rendering pipeline
//!
//! Generated records and option bags check the invariants that must hold for
//! every input, not just the hand-picked fixtures.

use inplace_fields::{
    dom_id, Collection, ConfigError, FieldValue, InPlaceContext, MapRecord, Options, RecordRef,
    WidgetType,
};
use proptest::prelude::*;
use scraper::{Html, Selector};

/// Generate type names like `User` or `LineItem`
fn type_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[A-Z][a-z]{1,8}([A-Z][a-z]{1,8})?").expect("valid regex")
}

/// Generate field names (snake case)
fn field_name() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[a-z][a-z_]{0,12}[a-z]").expect("valid regex")
}

/// Generate labels, including quotes and apostrophes
fn label() -> impl Strategy<Value = String> {
    prop::string::string_regex(r#"[A-Za-z0-9 '"&<>]{1,20}"#).expect("valid regex")
}

fn span_attr(html: &str, name: &str) -> Option<String> {
    let doc = Html::parse_fragment(html);
    let selector = Selector::parse("span").unwrap();
    let span = doc.select(&selector).next()?;
    span.value().attr(name).map(String::from)
}

proptest! {
    /// Property: supplying both display options always fails, whatever else is set
    #[test]
    fn prop_conflicting_display_options(
        method in field_name(),
        helper in field_name(),
        widget in prop::sample::select(vec![
            WidgetType::Input, WidgetType::Textarea, WidgetType::Date,
        ]),
        object_name in prop::option::of(field_name()),
    ) {
        let record = MapRecord::new("User").with_id(1).method(method.clone(), "x");
        let mut opts = Options::new().widget(widget).display_as(method).display_with(helper);
        opts.object_name = object_name;
        let err = InPlaceContext::new().render(&record, "name", &opts).unwrap_err();
        prop_assert!(matches!(err, ConfigError::ConflictingDisplayOptions));
    }

    /// Property: dom id is `best_in_place_<type>[_<id>]_<field>`
    #[test]
    fn prop_dom_id_shape(
        ty in type_name(),
        id in prop::option::of(1u32..100_000),
        field in field_name(),
    ) {
        let mut record = MapRecord::new(ty.clone());
        if let Some(id) = id {
            record = record.with_id(id);
        }
        let expected_type = inplace_fields::underscore(&ty);
        let expected = match id {
            Some(id) => format!("best_in_place_{}_{}_{}", expected_type, id, field),
            None => format!("best_in_place_{}_{}", expected_type, field),
        };
        prop_assert_eq!(dom_id(RecordRef::from(&record), &field), expected);
        prop_assert!(!expected_type.contains(|c: char| c.is_ascii_uppercase()));
    }

    /// Property: the rendered id never contains whitespace, whatever the field
    #[test]
    fn prop_dom_id_has_no_whitespace(
        words in prop::collection::vec("[a-z]{1,6}", 1..4),
        gap in "[ \t\n]{1,3}",
    ) {
        let field = words.join(&gap);
        let record = MapRecord::new("User").with_id(7).field(field.clone(), "v");
        let html = InPlaceContext::new().render(&record, &field, &Options::new()).unwrap();
        let id = span_attr(&html, "id").unwrap();
        prop_assert!(!id.chars().any(char::is_whitespace));
        prop_assert_eq!(id, format!("best_in_place_user_7_{}", words.join("_")));
    }

    /// Property: namespaces prefix the id and the url in order
    #[test]
    fn prop_namespaces_prefix_id_and_url(
        namespace in prop::collection::vec("[a-z]{2,8}", 1..4),
        id in 1u32..1000,
    ) {
        let record = MapRecord::new("User").with_id(id).field("name", "n");
        let html = InPlaceContext::new()
            .render(RecordRef::Namespaced(&namespace, &record), "name", &Options::new())
            .unwrap();
        let joined = namespace.join("_");
        prop_assert_eq!(
            span_attr(&html, "id"),
            Some(format!("best_in_place_{}_user_{}_name", joined, id))
        );
        prop_assert_eq!(
            span_attr(&html, "data-url"),
            Some(format!("/{}/users/{}", namespace.join("/"), id))
        );
    }

    /// Property: select collections round-trip through the attribute and
    /// data-value is the stringified raw value
    #[test]
    fn prop_select_collection_round_trip(
        labels in prop::collection::vec(label(), 1..8),
        pick in any::<prop::sample::Index>(),
    ) {
        let collection = Collection::pairs(
            labels.iter().enumerate().map(|(i, l)| (i as i64, l.clone())),
        );
        let chosen = pick.index(labels.len());
        let record = MapRecord::new("User")
            .with_id(1)
            .field("country", FieldValue::Integer(chosen as i64));
        let opts = Options::new()
            .widget(WidgetType::Select)
            .collection(collection.clone());
        let html = InPlaceContext::new().render(&record, "country", &opts).unwrap();

        let json = span_attr(&html, "data-collection").unwrap();
        let parsed: Collection = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(parsed, collection);
        prop_assert_eq!(span_attr(&html, "data-value"), Some(chosen.to_string()));
    }

    /// Property: a false gate yields exactly the element's text content
    #[test]
    fn prop_gate_false_matches_inner_text(value in label()) {
        let record = MapRecord::new("User").with_id(1).field("name", value.clone());
        let ctx = InPlaceContext::new();
        let markup = ctx.render_if(true, &record, "name", None).unwrap();
        let plain = ctx.render_if(false, &record, "name", None).unwrap();

        let doc = Html::parse_fragment(markup.as_str());
        let selector = Selector::parse("span").unwrap();
        let text: String = doc.select(&selector).next().unwrap().text().collect();
        prop_assert_eq!(plain.as_str(), text.as_str());
        prop_assert_eq!(plain.as_str(), value.as_str());
    }
}
