use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use pokeapi_client::{PokeApiClient, PokemonSource, DEFAULT_BASE_URL};
use server_api::{load_pokedex, submit_form, ApiContext, QueryParams};
use shared::{
    domain::{PokemonDetail, SelectionId},
    protocol::{PokedexForm, PARAM_POKEMON, PARAM_SEARCH, PARAM_TYPE},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the listing, filter it and resolve a selection.
    List {
        #[arg(long, default_value_t = 5)]
        limit: u32,
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type")]
        type_name: Option<String>,
        /// Comma-joined ids or names.
        #[arg(long)]
        select: Option<String>,
    },
    /// Fetch a single Pokémon by id or name.
    Show { pokemon: String },
    /// Print the location a form submission would redirect to.
    Submit {
        #[arg(long, default_value = "/")]
        path: String,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = "")]
        intent: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long = "type", default_value = "")]
        type_name: String,
        #[arg(long, default_value = "")]
        pokemon: String,
        #[arg(long, default_value = "")]
        remove: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let client = PokeApiClient::new(&cli.base_url)?;

    match cli.command {
        Command::List {
            limit,
            search,
            type_name,
            select,
        } => {
            let mut query = QueryParams::default();
            for (key, value) in [
                (PARAM_SEARCH, search),
                (PARAM_TYPE, type_name),
                (PARAM_POKEMON, select),
            ] {
                if let Some(value) = value {
                    query.set_or_delete(key, &value);
                }
            }

            let ctx = ApiContext {
                source: Arc::new(client),
                listing_limit: limit,
            };
            let page = load_pokedex(&ctx, &query).await?;

            println!("matching ({}):", page.filtered.len());
            for pokemon in &page.filtered {
                println!("  {}", summary(pokemon));
            }
            if !page.selected.is_empty() {
                println!("selected ({}):", page.selected.len());
                for pokemon in &page.selected {
                    println!("  {}", summary(pokemon));
                }
            }
        }
        Command::Show { pokemon } => {
            let id = SelectionId::parse(&pokemon)
                .ok_or_else(|| anyhow!("pokemon identifier must not be empty"))?;
            let detail = client.detail(&id).await?;
            println!("{}", summary(&detail));
            println!("  sprite: {}", detail.sprite_url);
        }
        Command::Submit {
            path,
            query,
            intent,
            name,
            type_name,
            pokemon,
            remove,
        } => {
            let form = PokedexForm {
                intent,
                name,
                type_name,
                pokemon,
                remove,
            };
            let location = submit_form(&path, &QueryParams::parse(&query), form)?;
            println!("{location}");
        }
    }

    Ok(())
}

fn summary(pokemon: &PokemonDetail) -> String {
    format!(
        "#{:<4} {:<16} {}",
        pokemon.id.0,
        pokemon.name,
        pokemon.type_names().collect::<Vec<_>>().join(", ")
    )
}
