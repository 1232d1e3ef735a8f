use super::*;
use server_api::{Filter, Selection};
use shared::domain::{PokemonId, PokemonType};

fn record(id: u32, name: &str, type_name: &str) -> PokemonDetail {
    PokemonDetail {
        id: PokemonId(id),
        name: name.into(),
        sprite_url: format!("https://img.example/{id}.png"),
        types: vec![PokemonType {
            slot: 1,
            name: type_name.into(),
        }],
    }
}

fn page(query: &str) -> PokedexPage {
    let query = QueryParams::parse(query);
    PokedexPage {
        filter: Filter::from_query(&query),
        selection: Selection::from_query(&query),
        filtered: vec![record(4, "charmander", "fire"), record(7, "squirtle", "water")],
        selected: vec![record(4, "charmander", "fire")],
        type_options: vec!["fire".into(), "water".into()],
        query,
    }
}

#[test]
fn escapes_markup_sensitive_characters() {
    assert_eq!(
        escape(r#"<a href="x">&'"#),
        "&lt;a href=&quot;x&quot;&gt;&amp;&#39;"
    );
}

#[test]
fn pokedex_page_marks_selected_entries_and_keeps_state_in_links() {
    let html = render_pokedex(&page("pokemon=4&type=fire&search=%3Cb%3E"));

    assert!(html.contains(r#"<option value="fire" selected>fire</option>"#));
    assert!(html.contains(r#"value="&lt;b&gt;""#));
    assert!(html.contains(r#"href="/selected?pokemon=4&amp;type=fire&amp;search=%3Cb%3E""#));
    assert!(html.contains(r#"<button type="submit">remove</button></form></li>"#));
    assert!(html.contains(r#"<button type="submit">add</button></form></li>"#));
    assert!(html.contains(r#"<img src="https://img.example/4.png" alt="charmander">"#));
}

#[test]
fn pokedex_page_reports_empty_filter_result() {
    let mut page = page("type=grass");
    page.filtered.clear();
    page.selected.clear();
    let html = render_pokedex(&page);
    assert!(html.contains("No Pokémon match the current filter."));
    assert!(!html.contains(r#"class="selected""#));
}

#[test]
fn selected_page_links_back_with_query() {
    let query = QueryParams::parse("pokemon=25");
    let html = render_selected(&SelectedPage {
        selection: Selection::from_query(&query),
        selected: vec![record(25, "pikachu", "electric")],
        query,
    });
    assert!(html.contains(r#"<a href="/?pokemon=25">Back</a>"#));
    assert!(html.contains("<p>electric</p>"));
}

#[test]
fn failure_page_hides_details() {
    let html = render_failure("Upstream unavailable");
    assert!(html.contains("<title>Upstream unavailable</title>"));
    assert!(html.contains("Something went wrong"));
}

#[test]
fn search_box_shows_the_applied_filter() {
    let html = render_pokedex(&page("search=%20Char%20"));
    assert!(html.contains(r#"name="name" placeholder="Name" value="char">"#));
}

#[test]
fn toggle_forms_post_id_and_name() {
    let html = render_pokedex(&page(""));
    assert!(html.contains(
        r#"<input type="hidden" name="pokemon" value="7"><input type="hidden" name="name" value="squirtle">"#
    ));
}
