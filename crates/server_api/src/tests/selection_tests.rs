use super::*;
use shared::domain::PokemonId;

#[test]
fn parse_suppresses_duplicates_keeping_first_seen_order() {
    let selection = Selection::parse("4, 1,4,bulbasaur,BULBASAUR,,1");
    assert_eq!(selection.encode(), "4,1,bulbasaur");
    assert_eq!(selection.len(), 3);
}

#[test]
fn toggle_adds_then_removes() {
    let mut selection = Selection::parse("1");
    assert!(selection.toggle(SelectionId::Id(PokemonId(4))));
    assert_eq!(selection.encode(), "1,4");
    assert!(!selection.toggle(SelectionId::Id(PokemonId(4))));
    assert_eq!(selection, Selection::parse("1"));
}

#[test]
fn toggle_record_matches_aliases() {
    let mut selection = Selection::parse("bulbasaur,7");
    let aliases = [SelectionId::Name("bulbasaur".into())];
    assert!(!selection.toggle_record(SelectionId::Id(PokemonId(1)), &aliases));
    assert_eq!(selection.encode(), "7");

    assert!(selection.toggle_record(SelectionId::Id(PokemonId(1)), &aliases));
    assert_eq!(selection.encode(), "7,1");
}

#[test]
fn insert_reports_existing_entries() {
    let mut selection = Selection::default();
    assert!(selection.insert(SelectionId::Name("eevee".into())));
    assert!(!selection.insert(SelectionId::Name("eevee".into())));
    assert!(selection.contains(&SelectionId::Name("eevee".into())));
}

#[test]
fn write_to_drops_parameter_when_empty() {
    let mut query = QueryParams::parse("pokemon=1&search=a");
    Selection::default().write_to(&mut query);
    assert_eq!(query.to_query_string(), "search=a");

    Selection::parse("7,25").write_to(&mut query);
    assert_eq!(query.get("pokemon"), Some("7,25"));
}
