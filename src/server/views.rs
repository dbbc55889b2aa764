// src/server/views.rs
//! HTML rendering for the recipe pages
//!
//! Pages share one layout that links the stylesheet and the browser
//! script from `/assets`. All recipe text is escaped before it reaches
//! the markup.

use crate::store::Recipe;
use std::fmt::Write;

/// Fields offered by the new-recipe form, in display order
pub const FORM_FIELDS: &[(&str, &str)] = &[
    ("title", "Title"),
    ("ingredients", "Ingredients"),
    ("steps", "Steps"),
];

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Make serialized JSON safe to embed inside a `<script>` element
fn escape_script_json(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Link to a recipe's detail page
///
/// Ids we generate are plain hex, but hand-edited files can hold anything.
pub fn recipe_href(recipe: &Recipe) -> String {
    format!("/recipes/{}", urlencoding::encode(&recipe.id))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title} - Potluck</title>
  <link rel="stylesheet" href="/assets/style.css">
</head>
<body>
  <header><a href="/">Potluck</a> <a href="/recipes">All recipes</a></header>
  <main>
{body}
  </main>
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

fn recipe_list(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return r#"    <p class="empty">No recipes yet.</p>"#.to_string();
    }

    let mut html = String::from("    <ul id=\"recipe-list\">\n");
    for recipe in recipes {
        let _ = writeln!(
            html,
            r#"      <li><a href="{href}">{title}</a><span class="spinner hide">Loading...</span></li>"#,
            href = recipe_href(recipe),
            title = escape_html(recipe.title()),
        );
    }
    html.push_str("    </ul>");
    html
}

fn new_recipe_form() -> String {
    let mut html = String::from("    <form method=\"post\" action=\"/\" class=\"new-recipe\">\n");
    for (name, label) in FORM_FIELDS {
        let input = if *name == "title" {
            format!(r#"<input type="text" id="form-{name}" name="{name}" required>"#)
        } else {
            format!(r#"<textarea id="form-{name}" name="{name}" rows="5"></textarea>"#)
        };
        let _ = writeln!(
            html,
            r#"      <label for="form-{name}">{label}</label>
      {input}"#
        );
    }
    html.push_str("      <button type=\"submit\">Add recipe</button>\n    </form>");
    html
}

/// Home page: recipe list plus the new-recipe form
pub fn home_page(recipes: &[Recipe]) -> String {
    let body = format!(
        "    <h1>Recipes</h1>\n{}\n    <h2>Share a recipe</h2>\n{}",
        recipe_list(recipes),
        new_recipe_form()
    );
    layout("Home", &body)
}

/// Recipe index with the raw collection embedded for the browser script
pub fn recipes_page(recipes: &[Recipe]) -> String {
    let data = serde_json::to_string(recipes).unwrap_or_else(|_| "[]".to_string());

    let mut placeholder = String::from(
        "    <article id=\"full-recipe-placeholder\" class=\"hide\">\n",
    );
    for (name, label) in FORM_FIELDS {
        let _ = writeln!(
            placeholder,
            r#"      <h2>{label}</h2>
      <p id="{name}"></p>"#
        );
    }
    placeholder.push_str("    </article>");

    let body = format!(
        r#"    <h1>All recipes</h1>
{list}
{placeholder}
    <script type="application/json" id="recipes-data">{data}</script>
    <script src="/assets/browser.js" defer></script>"#,
        list = recipe_list(recipes),
        placeholder = placeholder,
        data = escape_script_json(&data),
    );
    layout("All recipes", &body)
}

/// Detail page for one recipe
pub fn recipe_page(recipe: &Recipe) -> String {
    let mut body = format!("    <h1>{}</h1>\n", escape_html(recipe.title()));
    body.push_str("    <article class=\"recipe\">\n");
    for (name, value) in recipe.fields() {
        if name == "title" {
            continue;
        }
        let _ = writeln!(
            body,
            r#"      <h2>{name}</h2>
      <p id="{name}">{value}</p>"#,
            name = escape_html(name),
            value = escape_html(value),
        );
    }
    body.push_str("    </article>\n    <p><a href=\"/recipes\">Back to all recipes</a></p>");
    layout(recipe.title(), &body)
}

/// Page for an unknown recipe id
pub fn not_found_page(id: &str) -> String {
    let body = format!(
        "    <h1>Recipe not found</h1>\n    <p>No recipe with id <code>{}</code>.</p>\n    <p><a href=\"/recipes\">Back to all recipes</a></p>",
        escape_html(id)
    );
    layout("Not found", &body)
}

/// Page shown when the recipe file cannot be read or written
pub fn error_page() -> String {
    layout(
        "Error",
        "    <h1>Something went wrong</h1>\n    <p>The recipe collection could not be loaded. Please try again later.</p>",
    )
}
