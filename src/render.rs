//! HTML rendering for the web front-end.
//!
//! Pure functions from store results to markup. The page layout pulls in
//! htmx so the table, search box and form can swap fragments in place;
//! every fragment is also usable on its own.
//!
//! All user-provided text passes through `html-escape` before it reaches
//! the output.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;

use recipe_manager_core::name::MAX_NAME_LEN;
use recipe_manager_core::Ingredient;

const TABLE_ID: &str = "ingredients-table";
const FORM_SLOT_ID: &str = "ingredient-form";

/// Full HTML document around `body`.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} · Recipe Manager</title>
<script src="https://unpkg.com/htmx.org@2.0.4"></script>
</head>
<body>
<header><h1>{title}</h1></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = encode_text(title),
        body = body,
    )
}

/// Ingredients page: search box, "add" button, form slot and table.
pub fn ingredients_page(items: &[Ingredient], query: &str) -> String {
    let body = format!(
        r##"<section class="toolbar">
<input type="search" name="search" placeholder="Search ingredients..." value="{query}"
       hx-get="/ingredients/search" hx-trigger="input changed delay:300ms, search"
       hx-target="#{table}" hx-swap="outerHTML">
<button hx-get="/ingredients/new" hx-target="#{slot}">Add ingredient</button>
</section>
<div id="{slot}"></div>
{table_html}"##,
        query = encode_double_quoted_attribute(query),
        table = TABLE_ID,
        slot = FORM_SLOT_ID,
        table_html = ingredients_table(items),
    );
    layout("Ingredients", &body)
}

/// The ingredients table fragment.
pub fn ingredients_table(items: &[Ingredient]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<table id="{}">"#, TABLE_ID);
    out.push_str("<thead><tr><th>ID</th><th>Name</th><th>Updated</th><th></th></tr></thead>\n<tbody>\n");

    if items.is_empty() {
        out.push_str("<tr class=\"empty\"><td colspan=\"4\">No ingredients found</td></tr>\n");
    }

    for item in items {
        let _ = writeln!(
            out,
            r##"<tr id="ingredient-{id}"><td>{id}</td><td>{name}</td><td><time datetime="{ts}">{when}</time></td><td><button hx-get="/ingredients/{id}/edit" hx-target="#{slot}">Edit</button> <button hx-delete="/ingredients/{id}" hx-target="closest tr" hx-swap="outerHTML" hx-confirm="Delete {confirm}?">Delete</button></td></tr>"##,
            id = item.id,
            name = encode_text(&item.name),
            ts = item.updated_at.to_rfc3339(),
            when = item.updated_at.format("%Y-%m-%d %H:%M"),
            slot = FORM_SLOT_ID,
            confirm = encode_double_quoted_attribute(&item.name),
        );
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Create form, or edit form when `existing` is given.
pub fn ingredient_form(existing: Option<&Ingredient>) -> String {
    let (heading, verb_attr, value, submit) = match existing {
        Some(item) => (
            "Edit Ingredient",
            format!(r#"hx-put="/ingredients/{}""#, item.id),
            item.name.as_str(),
            "Save",
        ),
        None => (
            "Add Ingredient",
            r#"hx-post="/ingredients""#.to_string(),
            "",
            "Add",
        ),
    };

    format!(
        r##"<form {verb_attr} hx-target="#{table}" hx-swap="outerHTML">
<h2>{heading}</h2>
<label>Name <input type="text" name="name" value="{value}" required maxlength="{max}"></label>
<button type="submit">{submit}</button>
</form>
"##,
        verb_attr = verb_attr,
        table = TABLE_ID,
        heading = heading,
        value = encode_double_quoted_attribute(value),
        max = MAX_NAME_LEN,
        submit = submit,
    )
}
