// src/ports/html.rs
use crate::application::BoardView;
use crate::constants::BOARD_TITLE;
use crate::domain::Note;
use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::instrument;

#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    fn render_card(&self, note: &Note) -> String {
        let image = match note.image_url() {
            Some(url) => format!(
                r#"<img class="card-image" src="{}" alt="{}">"#,
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(&note.name)
            ),
            None => String::new(),
        };
        let id = note.id.as_deref().unwrap_or_default();

        format!(
            r#"        <div class="card" data-note-id="{id}">
            {image}
            <h3 class="card-title">{title}</h3>
            <p class="card-description">{description}</p>
            <button class="delete" data-note-id="{id}">Delete note</button>
        </div>
"#,
            id = encode_double_quoted_attribute(id),
            image = image,
            title = encode_text(&note.name),
            description = encode_text(&note.description),
        )
    }

    fn render_flagged(&self, flagged: &[Note]) -> String {
        if flagged.is_empty() {
            return String::new();
        }
        let items: String = flagged
            .iter()
            .map(|note| {
                format!(
                    "        <li>{} ({})</li>\n",
                    encode_text(&note.name),
                    encode_text(note.id.as_deref().unwrap_or("no id"))
                )
            })
            .collect();
        format!(
            r#"    <section class="out-of-sync">
        <h2>Out of sync</h2>
        <p>The server did not confirm these deletions. Reload to see the server state.</p>
        <ul>
{items}        </ul>
    </section>
"#
        )
    }

    #[instrument(level = "debug", skip_all, fields(notes = view.notes.len()))]
    pub fn render(&self, view: &BoardView<'_>) -> String {
        let cards: String = view.notes.iter().map(|note| self.render_card(note)).collect();
        let error = view
            .last_error
            .map(|message| {
                format!(
                    "    <div class=\"error\" role=\"alert\">{}</div>\n",
                    encode_text(message)
                )
            })
            .unwrap_or_default();

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            margin: 0;
            background-color: #f5f5f5;
            text-align: center;
        }}
        nav {{
            background: #ff5722;
            color: white;
            padding: 1rem 2rem;
            text-align: left;
            font-weight: bold;
        }}
        .form {{
            background: white;
            max-width: 1000px;
            margin: auto;
            padding: 24px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
            gap: 24px;
        }}
        .grid {{
            padding: 24px;
            display: grid;
            grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
            gap: 24px;
        }}
        .card {{
            background: white;
            border-radius: 8px;
            padding: 1rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        .card-image {{
            width: 100%;
            border-radius: 4px;
        }}
        .error {{
            max-width: 1000px;
            margin: 1rem auto;
            padding: 0.5rem 1rem;
            background: #fdecea;
            color: #b71c1c;
            border-radius: 4px;
        }}
        .out-of-sync {{
            color: #666;
        }}
    </style>
</head>
<body>
    <nav>{title}</nav>
    <h1>{title}</h1>
{error}    <form class="form">
        <input name="name" placeholder="Note name" value="{name}">
        <input name="description" placeholder="Note description" value="{description}">
        <input type="file" name="image" accept="image/*">
        <button type="button">Create Note</button>
    </form>
    <div class="grid">
{cards}    </div>
{flagged}</body>
</html>
"#,
            title = BOARD_TITLE,
            error = error,
            name = encode_double_quoted_attribute(&view.draft.name),
            description = encode_double_quoted_attribute(&view.draft.description),
            cards = cards,
            flagged = self.render_flagged(view.flagged),
        )
    }
}
