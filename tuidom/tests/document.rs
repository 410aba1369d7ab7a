use tuidom::{Document, Element, Selector};

fn accordion() -> Document {
    Document::new(
        Element::col()
            .key("doc")
            .child(
                Element::box_()
                    .key("first")
                    .id("faq")
                    .class("section")
                    .child(
                        Element::text("Question")
                            .key("first-handle")
                            .attr("data-expandible-toggle", ""),
                    )
                    .child(
                        Element::box_()
                            .key("first-body")
                            .child(
                                Element::text("Nested")
                                    .key("nested")
                                    .attr("data-expandible-toggle", ""),
                            ),
                    ),
            )
            .child(
                Element::box_()
                    .key("second")
                    .class("section")
                    .child(
                        Element::text("Other")
                            .key("second-handle")
                            .attr("data-expandible-toggle", ""),
                    ),
            ),
    )
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_get_and_mutate() {
    let mut doc = accordion();

    assert!(doc.get("first-body").is_some());
    assert!(doc.get("missing").is_none());

    let el = doc.get_mut("first").unwrap();
    el.add_class("is-expanded");
    el.set_attr("aria-expanded", "true");

    let el = doc.get("first").unwrap();
    assert!(el.has_class("is-expanded"));
    assert_eq!(el.get_attr("aria-expanded"), Some("true"));
}

#[test]
fn test_element_by_id() {
    let doc = accordion();
    assert_eq!(doc.element_by_id("faq"), Some("first"));
    assert_eq!(doc.element_by_id("nope"), None);
}

#[test]
fn test_contains_and_parent() {
    let doc = accordion();

    assert!(doc.contains("first", "first"));
    assert!(doc.contains("first", "nested"));
    assert!(doc.contains("doc", "second-handle"));
    assert!(!doc.contains("first", "second-handle"));
    assert!(!doc.contains("first", "missing"));

    assert_eq!(doc.parent("nested"), Some("first-body"));
    assert_eq!(doc.parent("doc"), None);
    assert_eq!(doc.parent("missing"), None);
}

#[test]
fn test_append_child() {
    let mut doc = accordion();

    assert!(doc.append_child("second", Element::box_().key("late")));
    assert!(doc.contains("second", "late"));
    assert!(!doc.append_child("missing", Element::box_()));
}

// ============================================================================
// Selector Queries
// ============================================================================

#[test]
fn test_query_selector_returns_first_in_tree_order() {
    let doc = accordion();
    let toggle = Selector::parse("[data-expandible-toggle]").unwrap();

    assert_eq!(doc.query_selector("first", &toggle), Some("first-handle"));
    assert_eq!(doc.query_selector("second", &toggle), Some("second-handle"));
    assert_eq!(
        doc.query_selector_all("doc", &toggle),
        vec!["first-handle", "nested", "second-handle"]
    );
}

#[test]
fn test_query_selector_excludes_scope() {
    let doc = accordion();
    let section = Selector::parse(".section").unwrap();

    assert_eq!(doc.query_selector("first", &section), None);
    assert_eq!(doc.query_selector_all("doc", &section), vec!["first", "second"]);
}

#[test]
fn test_query_selector_uses_ancestors_outside_scope() {
    let doc = accordion();
    let selector = Selector::parse("#faq [data-expandible-toggle]").unwrap();

    assert_eq!(doc.query_selector("first-body", &selector), Some("nested"));
    assert_eq!(doc.query_selector("second", &selector), None);
}

#[test]
fn test_query_parses_selector() {
    let doc = accordion();

    assert_eq!(doc.query("doc", "#faq > [data-expandible-toggle]").unwrap(), Some("first-handle"));
    assert!(doc.query("doc", "[broken").is_err());
    assert_eq!(doc.query("missing", ".section").unwrap(), None);
}
