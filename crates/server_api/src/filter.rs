use shared::{
    domain::PokemonDetail,
    protocol::{PARAM_SEARCH, PARAM_TYPE},
};

use crate::query::QueryParams;

/// Name/type filter carried in the `search` and `type` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Lowercased name substring.
    pub search: Option<String>,
    pub type_name: Option<String>,
}

impl Filter {
    pub fn from_query(query: &QueryParams) -> Self {
        Self {
            search: query.get_non_empty(PARAM_SEARCH).map(str::to_lowercase),
            type_name: query.get_non_empty(PARAM_TYPE).map(str::to_string),
        }
    }

    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.type_name.is_some()
    }

    /// Both predicates must hold when both are set.
    pub fn matches(&self, pokemon: &PokemonDetail) -> bool {
        let name_ok = self
            .search
            .as_deref()
            .map_or(true, |needle| pokemon.name.to_lowercase().contains(needle));
        let type_ok = self
            .type_name
            .as_deref()
            .map_or(true, |type_name| pokemon.has_type(type_name));
        name_ok && type_ok
    }

    pub fn apply(&self, collection: &[PokemonDetail]) -> Vec<PokemonDetail> {
        collection
            .iter()
            .filter(|pokemon| self.matches(pokemon))
            .cloned()
            .collect()
    }
}
