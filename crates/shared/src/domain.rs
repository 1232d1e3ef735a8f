use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PokemonId(pub u32);

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Listing entry pointing at a detail resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndetailedPokemon {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetail {
    pub id: PokemonId,
    pub name: String,
    pub sprite_url: String,
    pub types: Vec<PokemonType>,
}

impl PokemonDetail {
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.type_names().any(|t| t == name)
    }

    /// True when `selection` refers to this record, by id or by name.
    pub fn is_identified_by(&self, selection: &SelectionId) -> bool {
        match selection {
            SelectionId::Id(id) => self.id == *id,
            SelectionId::Name(name) => self.name.eq_ignore_ascii_case(name),
        }
    }
}

/// One entry of the selection set carried in the `pokemon` query parameter.
///
/// Purely numeric tokens are ids; anything else is a name, stored lowercase
/// to match the upstream naming.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionId {
    Id(PokemonId),
    Name(String),
}

impl SelectionId {
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = raw.parse::<u32>() {
                return Some(Self::Id(PokemonId(id)));
            }
        }
        Some(Self::Name(raw.to_lowercase()))
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<PokemonId> for SelectionId {
    fn from(value: PokemonId) -> Self {
        Self::Id(value)
    }
}
