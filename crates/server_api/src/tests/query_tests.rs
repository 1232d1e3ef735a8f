use super::*;

#[test]
fn parses_with_or_without_leading_question_mark() {
    let with = QueryParams::parse("?search=pika+chu&type=electric");
    let without = QueryParams::parse("search=pika+chu&type=electric");
    assert_eq!(with, without);
    assert_eq!(with.get("search"), Some("pika chu"));
}

#[test]
fn set_replaces_first_occurrence_in_place_and_drops_duplicates() {
    let mut query = QueryParams::parse("type=fire&pokemon=1&type=water&search=x");
    query.set("type", "grass");
    assert_eq!(query.to_query_string(), "type=grass&pokemon=1&search=x");
}

#[test]
fn set_appends_missing_key() {
    let mut query = QueryParams::parse("pokemon=1");
    query.set("search", "bulba");
    assert_eq!(query.to_query_string(), "pokemon=1&search=bulba");
}

#[test]
fn delete_removes_every_occurrence() {
    let mut query = QueryParams::parse("type=fire&pokemon=1&type=water");
    query.delete("type");
    assert_eq!(query.to_query_string(), "pokemon=1");
}

#[test]
fn blank_values_are_treated_as_absent() {
    let query = QueryParams::parse("search=%20%20&type=");
    assert_eq!(query.get("search"), Some("  "));
    assert_eq!(query.get_non_empty("search"), None);
    assert_eq!(query.get_non_empty("type"), None);
}

#[test]
fn location_omits_empty_query() {
    assert_eq!(QueryParams::default().location("/selected"), "/selected");
    assert_eq!(
        QueryParams::parse("pokemon=1,4").location("/"),
        "/?pokemon=1%2C4"
    );
}
