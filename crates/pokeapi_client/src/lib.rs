//! Read-only client for the PokeAPI REST service.
//!
//! Listing references are resolved into detail records concurrently; any
//! single failure aborts the whole collection. Detail payloads are validated
//! by deserializing into a fixed shape, so a missing or mistyped field fails
//! the fetch instead of producing a partial record.

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use shared::domain::{PokemonDetail, PokemonId, PokemonType, SelectionId, UndetailedPokemon};
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("unexpected payload shape from {url}: {source}")]
    Shape {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub fn url(&self) -> &str {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Shape { url, .. } => url,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

#[async_trait]
pub trait PokemonSource: Send + Sync {
    /// First `limit` references of the Pokémon collection.
    async fn list(&self, limit: u32) -> Result<Vec<UndetailedPokemon>, FetchError>;

    /// Detail record behind a listing reference.
    async fn detail_at(&self, url: &str) -> Result<PokemonDetail, FetchError>;

    /// Detail record looked up by id or name.
    async fn detail(&self, id: &SelectionId) -> Result<PokemonDetail, FetchError>;

    /// Lists `limit` references and resolves all of them concurrently.
    /// Output order follows the listing, whatever order the fetches finish in.
    async fn collection(&self, limit: u32) -> Result<Vec<PokemonDetail>, FetchError> {
        let references = self.list(limit).await?;
        let details = try_join_all(references.iter().map(|r| self.detail_at(&r.url))).await?;
        info!(count = details.len(), "resolved pokemon collection");
        Ok(details)
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    results: Vec<UndetailedPokemon>,
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    sprites: SpritesResponse,
    types: Vec<TypeSlotResponse>,
}

#[derive(Debug, Deserialize)]
struct SpritesResponse {
    front_default: String,
}

#[derive(Debug, Deserialize)]
struct TypeSlotResponse {
    slot: u8,
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

impl From<PokemonResponse> for PokemonDetail {
    fn from(value: PokemonResponse) -> Self {
        Self {
            id: PokemonId(value.id),
            name: value.name,
            sprite_url: value.sprites.front_default,
            types: value
                .types
                .into_iter()
                .map(|slot| PokemonType {
                    slot: slot.slot,
                    name: slot.type_info.name,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: Client,
    base_url: Url,
}

impl PokeApiClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: &str) -> Result<Self, FetchError> {
        let base_url = parse_url(base_url.trim())?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl {
                url: base_url.to_string(),
                reason: "url cannot carry path segments".into(),
            });
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn listing_url(&self, limit: u32) -> Url {
        let mut url = self.endpoint(&["pokemon"]);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());
        url
    }

    pub fn detail_url(&self, id: &SelectionId) -> Url {
        let id = id.to_string();
        self.endpoint(&["pokemon", id.as_str()])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        debug!(%url, "fetching");
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        serde_json::from_slice(&body).map_err(|source| FetchError::Shape {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PokemonSource for PokeApiClient {
    async fn list(&self, limit: u32) -> Result<Vec<UndetailedPokemon>, FetchError> {
        let response: ListResponse = self.get_json(self.listing_url(limit)).await?;
        Ok(response.results)
    }

    async fn detail_at(&self, url: &str) -> Result<PokemonDetail, FetchError> {
        let response: PokemonResponse = self.get_json(parse_url(url)?).await?;
        Ok(response.into())
    }

    async fn detail(&self, id: &SelectionId) -> Result<PokemonDetail, FetchError> {
        let response: PokemonResponse = self.get_json(self.detail_url(id)).await?;
        Ok(response.into())
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
