//! Server-rendered HTML for the Pokédex pages.
//!
//! Forms post back to the current URL (no `action` attribute), so the query
//! string the handler receives is the state the page was rendered from.

use server_api::{PokedexPage, QueryParams, SelectedPage};
use shared::{
    domain::PokemonDetail,
    protocol::{INTENT_CLEAR, INTENT_FILTER, INTENT_TOGGLE},
};

pub fn render_pokedex(page: &PokedexPage) -> String {
    let search = page.filter.search.as_deref().unwrap_or_default();
    let selected_type = page.filter.type_name.as_deref().unwrap_or_default();

    let mut options = String::from(r#"<option value="">Any type</option>"#);
    for type_name in &page.type_options {
        let selected = if type_name == selected_type { " selected" } else { "" };
        options.push_str(&format!(
            r#"<option value="{0}"{selected}>{0}</option>"#,
            escape(type_name)
        ));
    }

    let list = if page.filtered.is_empty() {
        r#"<p class="empty">No Pokémon match the current filter.</p>"#.to_string()
    } else {
        let items: String = page
            .filtered
            .iter()
            .map(|pokemon| {
                let is_selected = page.selected.iter().any(|s| s.id == pokemon.id);
                format!(
                    r#"<li><span>#{id} {name}</span> <small>{types}</small>{button}</li>"#,
                    id = pokemon.id,
                    name = escape(&pokemon.name),
                    types = escape(&type_list(pokemon)),
                    button = toggle_form(pokemon, if is_selected { "remove" } else { "add" }),
                )
            })
            .collect();
        format!(r#"<ul class="pokemon-list">{items}</ul>"#)
    };

    let selected = if page.selected.is_empty() {
        String::new()
    } else {
        format!(
            r#"<section class="selected"><h3>Selected Pokémon</h3>{}</section>"#,
            cards(&page.selected)
        )
    };

    layout(
        "Pokédex",
        &format!(
            r#"<h1>Pokédex</h1>
<form method="post" class="filter">
<input type="hidden" name="intent" value="{INTENT_FILTER}">
<input type="text" name="name" placeholder="Name" value="{search}">
<select name="type">{options}</select>
<button type="submit">Filter</button>
</form>
<form method="post" class="clear">
<input type="hidden" name="intent" value="{INTENT_CLEAR}">
<button type="submit">Clear filter</button>
</form>
<nav><a href="{selected_href}">View selected ({count})</a></nav>
<div class="content">{list}{selected}</div>"#,
            search = escape(search),
            selected_href = href("/selected", &page.query),
            count = page.selected.len(),
        ),
    )
}

pub fn render_selected(page: &SelectedPage) -> String {
    let body = if page.selected.is_empty() {
        r#"<p class="empty">Nothing selected yet.</p>"#.to_string()
    } else {
        cards(&page.selected)
    };

    layout(
        "Selected Pokémon",
        &format!(
            r#"<nav><a href="{back}">Back</a></nav>
<h1>Selected Pokémon</h1>
{body}"#,
            back = href("/", &page.query),
        ),
    )
}

/// Generic failure page; details stay in the logs.
pub fn render_failure(title: &str) -> String {
    layout(
        title,
        &format!(
            r#"<h1>{}</h1><p>Something went wrong while loading the Pokédex.</p><nav><a href="/">Start over</a></nav>"#,
            escape(title)
        ),
    )
}

fn cards(selected: &[PokemonDetail]) -> String {
    selected
        .iter()
        .map(|pokemon| {
            format!(
                r#"<article class="card"><img src="{sprite}" alt="{name}"><p>{name}</p><p>{types}</p>{button}</article>"#,
                sprite = escape(&pokemon.sprite_url),
                name = escape(&pokemon.name),
                types = escape(&type_list(pokemon)),
                button = toggle_form(pokemon, "remove"),
            )
        })
        .collect()
}

/// Posts both the id and the name so a selection stored under either one is removed.
fn toggle_form(pokemon: &PokemonDetail, label: &str) -> String {
    format!(
        r#"<form method="post"><input type="hidden" name="intent" value="{INTENT_TOGGLE}"><input type="hidden" name="pokemon" value="{}"><input type="hidden" name="name" value="{}"><button type="submit">{label}</button></form>"#,
        pokemon.id,
        escape(&pokemon.name)
    )
}

fn type_list(pokemon: &PokemonDetail) -> String {
    pokemon.type_names().collect::<Vec<_>>().join(", ")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>{}</title></head>
<body><main>
{body}
</main></body>
</html>
"#,
        escape(title)
    )
}

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Link target that keeps the current state while switching pages.
fn href(path: &str, query: &QueryParams) -> String {
    escape(&query.location(path))
}

#[cfg(test)]
#[path = "tests/views_tests.rs"]
mod tests;
