//! Integration tests for expression composition feeding the namespace.

mod helpers;

use editor_core::expression::{
    BraceError, Composer, accept_suggestion, composition_at, validate_braces,
};
use editor_core::namespace::{NamespaceBuilder, VariableCategory};
use helpers::*;

#[test]
fn accepting_a_suggestion_matches_the_documented_offsets() {
    let (text, cursor) = accept_suggestion("foo @{us", 8, "@{user.id}").unwrap();
    assert_eq!(text, "foo @{user.id}");
    assert_eq!(cursor, 14);
}

#[test]
fn brace_validation_cases() {
    assert_eq!(validate_braces("@{a}"), None);
    assert_eq!(validate_braces("@{a"), Some(BraceError::UnclosedExpression));
    assert_eq!(validate_braces("a}"), Some(BraceError::ExtraClosingBrace));
    assert_eq!(validate_braces("@{a}@{b}"), None);
}

#[test]
fn live_query_drives_namespace_filtering() {
    let nodes = vec![order_trigger("trigger-1"), email_action("action-1")];

    // User types into the action's config field.
    let text = "Notify @{cust";
    let cursor = text.len();
    let composition = composition_at(text, cursor).unwrap();
    assert_eq!(composition.query, "cust");

    let namespace = NamespaceBuilder::new(&nodes, "action-1")
        .with_search(composition.query.clone())
        .build();

    // Only the trigger's customer fields survive the filter.
    let trigger_group = namespace.group(VariableCategory::Trigger).unwrap();
    let values: Vec<&str> = trigger_group.variables.iter().map(|v| v.value.as_str()).collect();
    assert_eq!(
        values,
        vec!["@{trigger-1.customer.email}", "@{trigger-1.customer.name}"]
    );

    // Accepting the first suggestion completes the token in place.
    let (accepted, new_cursor) = accept_suggestion(text, cursor, values[0]).unwrap();
    assert_eq!(accepted, "Notify @{trigger-1.customer.email}");
    assert_eq!(new_cursor, accepted.len());
    assert_eq!(validate_braces(&accepted), None);
}

#[test]
fn composer_keystroke_cycle() {
    let mut composer = Composer::new();

    assert!(composer.update("Send to ", 8).is_none());
    assert!(composer.update("Send to @{", 10).is_some());
    assert_eq!(composer.active().unwrap().query, "");

    assert!(composer.update("Send to @{ord", 13).is_some());
    assert_eq!(composer.active().unwrap().query, "ord");

    // Closing the brace by hand returns to idle.
    assert!(composer.update("Send to @{order}", 16).is_none());
}
