use serde::{Deserialize, Serialize};

pub const PARAM_POKEMON: &str = "pokemon";
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_TYPE: &str = "type";

pub const FIELD_INTENT: &str = "intent";
pub const FIELD_NAME: &str = "name";
pub const FIELD_REMOVE: &str = "remove";

pub const INTENT_FILTER: &str = "filter";
pub const INTENT_CLEAR: &str = "clear";
pub const INTENT_TOGGLE: &str = "toggle";

/// Fields posted by the Pokédex forms. Absent fields arrive as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PokedexForm {
    pub intent: String,
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub pokemon: String,
    pub remove: String,
}

/// Record shape posted by the legacy single-select form; only the name is read.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyPokemonPayload {
    pub name: String,
}
