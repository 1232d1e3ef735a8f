use shared::{
    domain::SelectionId,
    error::ApiError,
    protocol::{
        LegacyPokemonPayload, PokedexForm, FIELD_INTENT, FIELD_NAME, FIELD_REMOVE, INTENT_CLEAR,
        INTENT_FILTER, INTENT_TOGGLE, PARAM_POKEMON, PARAM_SEARCH, PARAM_TYPE,
    },
};
use tracing::debug;

use crate::{query::QueryParams, selection::Selection};

/// Reads a urlencoded form body without rejecting it: the first value of a
/// repeated field wins and absent fields are empty.
pub fn read_form(body: &str) -> PokedexForm {
    let fields = QueryParams::parse(body);
    let field = |key: &str| fields.get(key).unwrap_or_default().to_string();
    PokedexForm {
        intent: field(FIELD_INTENT),
        name: field(FIELD_NAME),
        type_name: field(PARAM_TYPE),
        pokemon: field(PARAM_POKEMON),
        remove: field(FIELD_REMOVE),
    }
}

/// Write operation requested by a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    SetFilter { name: String, type_name: String },
    ClearFilter,
    /// `name` is the record's other identifier, so entries stored either way are removed.
    Toggle { pokemon: String, name: String },
    /// Form posted without an `intent` field: single-select by name.
    Legacy { pokemon: String, remove: String },
}

impl TryFrom<PokedexForm> for FormIntent {
    type Error = ApiError;

    fn try_from(form: PokedexForm) -> Result<Self, Self::Error> {
        match form.intent.trim() {
            INTENT_FILTER => Ok(Self::SetFilter {
                name: form.name,
                type_name: form.type_name,
            }),
            INTENT_CLEAR => Ok(Self::ClearFilter),
            INTENT_TOGGLE => Ok(Self::Toggle {
                pokemon: form.pokemon,
                name: form.name,
            }),
            "" => Ok(Self::Legacy {
                pokemon: form.pokemon,
                remove: form.remove,
            }),
            other => Err(ApiError::validation(format!("unknown intent '{other}'"))),
        }
    }
}

impl FormIntent {
    /// Query string that results from applying this intent to `current`.
    pub fn apply(&self, current: &QueryParams) -> Result<QueryParams, ApiError> {
        let mut next = current.clone();
        match self {
            Self::SetFilter { name, type_name } => {
                next.set_or_delete(PARAM_SEARCH, name);
                next.set_or_delete(PARAM_TYPE, type_name);
            }
            Self::ClearFilter => {
                next.delete(PARAM_SEARCH);
                next.delete(PARAM_TYPE);
            }
            Self::Toggle { pokemon, name } => {
                let Some(id) = SelectionId::parse(pokemon) else {
                    debug!("toggle without a pokemon id; leaving selection unchanged");
                    return Ok(next);
                };
                let aliases: Vec<SelectionId> = SelectionId::parse(name).into_iter().collect();
                let mut selection = Selection::from_query(current);
                selection.toggle_record(id, &aliases);
                selection.write_to(&mut next);
            }
            Self::Legacy { pokemon, remove } => {
                if !remove.trim().is_empty() {
                    next.delete(PARAM_POKEMON);
                    return Ok(next);
                }
                let id = legacy_selection(pokemon)?;
                next.set(PARAM_POKEMON, id.to_string());
            }
        }
        Ok(next)
    }
}

/// Accepts either a posted JSON record carrying `name` or a bare identifier.
fn legacy_selection(raw: &str) -> Result<SelectionId, ApiError> {
    let raw = raw.trim();
    let name = if raw.starts_with('{') {
        let payload: LegacyPokemonPayload = serde_json::from_str(raw)
            .map_err(|e| ApiError::validation(format!("invalid pokemon payload: {e}")))?;
        payload.name
    } else {
        raw.to_string()
    };
    SelectionId::parse(&name).ok_or_else(|| ApiError::validation("missing pokemon"))
}
