use std::{
    collections::{BTreeSet, HashSet},
    sync::Arc,
};

use futures::future::try_join_all;
use pokeapi_client::{FetchError, PokemonSource};
use shared::{
    domain::PokemonDetail,
    error::{ApiError, ErrorCode},
    protocol::PokedexForm,
};
use tracing::{debug, error, info};

pub mod filter;
pub mod intent;
pub mod query;
pub mod selection;

pub use filter::Filter;
pub use intent::{read_form, FormIntent};
pub use query::QueryParams;
pub use selection::Selection;

/// Types always offered by the filter form, whatever the listing contains.
pub const BASELINE_TYPES: [&str; 3] = ["fire", "water", "grass"];

#[derive(Clone)]
pub struct ApiContext {
    pub source: Arc<dyn PokemonSource>,
    pub listing_limit: u32,
}

#[derive(Debug, Clone)]
pub struct PokedexPage {
    pub query: QueryParams,
    pub filter: Filter,
    pub selection: Selection,
    pub filtered: Vec<PokemonDetail>,
    pub selected: Vec<PokemonDetail>,
    pub type_options: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct SelectedPage {
    pub query: QueryParams,
    pub selection: Selection,
    pub selected: Vec<PokemonDetail>,
}

/// Read side of the main page: fetch the listing, filter it, resolve the selection.
pub async fn load_pokedex(ctx: &ApiContext, query: &QueryParams) -> Result<PokedexPage, ApiError> {
    let filter = Filter::from_query(query);
    let selection = Selection::from_query(query);

    let collection = ctx
        .source
        .collection(ctx.listing_limit)
        .await
        .map_err(upstream)?;
    let filtered = filter.apply(&collection);
    let selected = resolve_selection(ctx.source.as_ref(), &selection, &collection)
        .await
        .map_err(upstream)?;

    info!(
        listed = collection.len(),
        filtered = filtered.len(),
        selected = selected.len(),
        "pokedex page loaded"
    );

    Ok(PokedexPage {
        query: query.clone(),
        type_options: type_options(&collection),
        filter,
        selection,
        filtered,
        selected,
    })
}

/// Resolves only the selection, one detail fetch per entry.
pub async fn load_selected(
    ctx: &ApiContext,
    query: &QueryParams,
) -> Result<SelectedPage, ApiError> {
    let selection = Selection::from_query(query);
    let selected = resolve_selection(ctx.source.as_ref(), &selection, &[])
        .await
        .map_err(upstream)?;
    info!(selected = selected.len(), "selected page loaded");

    Ok(SelectedPage {
        query: query.clone(),
        selection,
        selected,
    })
}

/// Write side: the redirect location for a form posted to `path`.
pub fn submit_form(
    path: &str,
    query: &QueryParams,
    form: PokedexForm,
) -> Result<String, ApiError> {
    let intent = FormIntent::try_from(form)?;
    let location = intent.apply(query)?.location(path);
    info!(?intent, %location, "form submitted");
    Ok(location)
}

pub fn type_options(collection: &[PokemonDetail]) -> Vec<String> {
    let mut options: BTreeSet<String> = BASELINE_TYPES.iter().map(|t| t.to_string()).collect();
    options.extend(
        collection
            .iter()
            .flat_map(|pokemon| pokemon.type_names().map(str::to_string)),
    );
    options.into_iter().collect()
}

/// Looks each selected id up in `collection`, fetching the ones it lacks.
/// Result order follows the selection; records reached twice (id and name) appear once.
async fn resolve_selection(
    source: &dyn PokemonSource,
    selection: &Selection,
    collection: &[PokemonDetail],
) -> Result<Vec<PokemonDetail>, FetchError> {
    let lookups = selection.iter().map(|id| async move {
        if let Some(found) = collection.iter().find(|p| p.is_identified_by(id)) {
            return Ok(found.clone());
        }
        debug!(%id, "selection outside listing; fetching individually");
        source.detail(id).await
    });

    let resolved = try_join_all(lookups).await?;
    let mut seen = HashSet::new();
    Ok(resolved
        .into_iter()
        .filter(|pokemon| seen.insert(pokemon.id))
        .collect())
}

fn upstream(err: FetchError) -> ApiError {
    error!(url = err.url(), %err, "upstream fetch failed");
    let code = if err.is_not_found() {
        ErrorCode::NotFound
    } else {
        ErrorCode::Upstream
    };
    ApiError::new(code, err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
