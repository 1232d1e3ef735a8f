use shared::{domain::SelectionId, protocol::PARAM_POKEMON};

use crate::query::QueryParams;

/// Selected Pokémon in first-seen order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<SelectionId>,
}

impl Selection {
    /// Parses a comma-joined list; blank entries are skipped.
    pub fn parse(raw: &str) -> Self {
        let mut selection = Self::default();
        for id in raw.split(',').filter_map(SelectionId::parse) {
            selection.insert(id);
        }
        selection
    }

    pub fn from_query(query: &QueryParams) -> Self {
        query.get(PARAM_POKEMON).map(Self::parse).unwrap_or_default()
    }

    /// Returns false when `id` was already present.
    pub fn insert(&mut self, id: SelectionId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &SelectionId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        self.ids.len() != before
    }

    /// Adds `id` when absent, removes it otherwise. Returns true if it was added.
    pub fn toggle(&mut self, id: SelectionId) -> bool {
        self.toggle_record(id, &[])
    }

    /// Toggle for a record reachable under several tokens (its id and its name).
    /// Every entry equal to `id` or one of `aliases` is dropped; `id` is added
    /// only when none was present.
    pub fn toggle_record(&mut self, id: SelectionId, aliases: &[SelectionId]) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| *existing != id && !aliases.contains(existing));
        if self.ids.len() != before {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: &SelectionId) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SelectionId> {
        self.ids.iter()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn encode(&self) -> String {
        self.ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Writes the selection back, dropping the parameter when empty.
    pub fn write_to(&self, query: &mut QueryParams) {
        if self.is_empty() {
            query.delete(PARAM_POKEMON);
        } else {
            query.set(PARAM_POKEMON, self.encode());
        }
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
