use crate::{
    domain::{PokemonDetail, PokemonId, PokemonType, SelectionId},
    error::{ApiError, ErrorCode},
    protocol::PokedexForm,
};

fn charmander() -> PokemonDetail {
    PokemonDetail {
        id: PokemonId(4),
        name: "charmander".into(),
        sprite_url: "https://img.example/4.png".into(),
        types: vec![PokemonType {
            slot: 1,
            name: "fire".into(),
        }],
    }
}

#[test]
fn selection_id_parses_numbers_as_ids_and_everything_else_as_names() {
    assert_eq!(SelectionId::parse(" 25 "), Some(SelectionId::Id(PokemonId(25))));
    assert_eq!(
        SelectionId::parse("Pikachu"),
        Some(SelectionId::Name("pikachu".into()))
    );
    assert_eq!(SelectionId::parse("   "), None);
}

#[test]
fn oversized_numeric_token_falls_back_to_name() {
    assert_eq!(
        SelectionId::parse("99999999999"),
        Some(SelectionId::Name("99999999999".into()))
    );
}

#[test]
fn record_is_identified_by_id_or_case_insensitive_name() {
    let record = charmander();
    assert!(record.is_identified_by(&SelectionId::Id(PokemonId(4))));
    assert!(record.is_identified_by(&SelectionId::Name("charmander".into())));
    assert!(!record.is_identified_by(&SelectionId::Id(PokemonId(5))));
    assert!(record.has_type("fire"));
    assert!(!record.has_type("Fire"));
}

#[test]
fn form_defaults_missing_fields_to_empty() {
    let form: PokedexForm = serde_json::from_str(r#"{"intent":"toggle"}"#).expect("form");
    assert_eq!(form.intent, "toggle");
    assert!(form.pokemon.is_empty());
    assert!(form.type_name.is_empty());
}

#[test]
fn api_error_serializes_snake_case_code() {
    let err = ApiError::new(ErrorCode::NotFound, "gone");
    let json = serde_json::to_value(&err).expect("json");
    assert_eq!(json["code"], "not_found");
    assert_eq!(err.to_string(), "NotFound: gone");
}
