//! Server-side rendering of the whole notebook page.
//!
//! Every request that changes something ends in a redirect to `/`, which renders
//! the full view again from the stores. Nothing on the page is updated in place
//! except the canvas, which the browser owns until it is saved.

use crate::state::AppState;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};
use sketchnotes_core::{DrawingEntry, Note, SessionView, PEN_WIDTH_RANGE};

pub const PAGE_TITLE: &str = "Notebook App";
pub const NO_NOTES: &str = "No notes yet.";
pub const NO_DRAWINGS: &str = "No drawings saved yet.";

const CAPTION_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const LINK_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

const STYLE: &str = r"
body { font-family: sans-serif; max-width: 1100px; margin: 0 auto; padding: 1rem 2rem; }
textarea { width: 100%; min-height: 6rem; }
canvas { border: 1px solid #ccc; touch-action: none; max-width: 100%; }
.item { display: flex; align-items: flex-start; justify-content: space-between; gap: 1rem; margin: .5rem 0; }
.item img { max-width: 100%; border: 1px solid #eee; }
.info { background: #e8f0fe; padding: .75rem; border-radius: .4rem; }
.success { background: #e6f4ea; padding: .75rem; border-radius: .4rem; }
.error { background: #fce8e6; padding: .75rem; border-radius: .4rem; }
ol, ul { list-style: none; padding: 0; }
";

const CANVAS_SCRIPT: &str = include_str!("../assets/canvas.js");

/// Escapes text for use as HTML body content.
pub fn escape(text: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, std::iter::once(Event::Text(CowStr::Borrowed(text))));
    out
}

/// True for relative URLs and for `http`, `https` and `mailto` ones.
fn is_safe_url(url: &str) -> bool {
    let Some(colon) = url.find(':') else {
        return true;
    };
    if url[..colon].contains(['/', '?', '#']) {
        return true;
    }
    // browsers ignore control characters and whitespace inside a scheme
    let scheme: String = url[..colon]
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    LINK_SCHEMES.contains(&scheme.as_str())
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) {
        url
    } else {
        log::warn!("Dropped unsafe link target in note: {}", &*url);
        CowStr::Borrowed("")
    }
}

/// Renders one note as Markdown, prefixed with its 1-based position in bold.
///
/// Raw HTML in the note is shown as text, never interpreted. Link and image
/// targets outside `http`, `https`, `mailto` and relative URLs are emptied.
pub fn render_note(position: usize, note: &Note) -> String {
    let markdown = format!("**{position}.** {}", note.text());
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
    let events = Parser::new_ext(&markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    });
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

fn drawing_url(filename: &str) -> String {
    format!("/drawings/{}", urlencoding::encode(filename))
}

fn render_drawing(out: &mut String, entry: &DrawingEntry) {
    let url = drawing_url(&entry.filename);
    let caption = match &entry.created_at {
        Some(at) => format!("{} ({})", escape(&entry.filename), at.format(CAPTION_FORMAT)),
        None => escape(&entry.filename),
    };
    out.push_str(&format!(
        r#"<li class="item"><figure><img src="{url}" alt=""><figcaption>{caption}</figcaption></figure><form method="post" action="{url}/delete"><button type="submit" title="Delete drawing">🗑️</button></form></li>"#
    ));
}

/// The full page: note form, drawing board, note list and drawing list.
///
/// `saved` is the filename of a drawing saved by the previous action, if any.
pub fn render_page(view: &SessionView, state: &AppState, saved: Option<&str>) -> String {
    let mut out = format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>📓 {PAGE_TITLE}</title><style>{STYLE}</style></head><body><h1>{PAGE_TITLE}</h1>"#
    );

    // note entry
    out.push_str(
        r#"<h2>✍️ Add a Text Note</h2><form method="post" action="/notes"><label for="new-note">Write your note:</label><textarea id="new-note" name="text"></textarea><button type="submit">💾 Save Note</button></form>"#,
    );

    // drawing board
    out.push_str(&format!(
        r#"<h2>🎨 Drawing Board</h2><p><label>Pick a pen color <input type="color" id="pen-color" value="{color}"></label></p><p><label>Pen width <input type="range" id="pen-width" min="{min}" max="{max}" value="{width}"></label> <span id="pen-width-value">{width}</span></p><canvas id="canvas" width="{cw}" height="{ch}" data-background="{bg}"></canvas><p><button type="button" id="save-drawing">💾 Save Drawing</button></p>"#,
        color = state.pen.color(),
        width = state.pen.width(),
        min = PEN_WIDTH_RANGE.start(),
        max = PEN_WIDTH_RANGE.end(),
        cw = state.canvas_width,
        ch = state.canvas_height,
        bg = state.canvas_background,
    ));
    if let Some(name) = saved {
        out.push_str(&format!(
            r#"<p class="success">Drawing saved as {}</p>"#,
            escape(name)
        ));
    }

    // notes
    out.push_str("<h2>📝 Your Notes</h2>");
    if view.notes.is_empty() {
        out.push_str(&format!(r#"<p class="info">{NO_NOTES}</p>"#));
    } else {
        out.push_str("<ol>");
        for (index, note) in view.notes.iter().enumerate() {
            out.push_str(&format!(
                r#"<li class="item"><div class="note">{}</div><form method="post" action="/notes/{index}/delete"><button type="submit" title="Delete note">❌</button></form></li>"#,
                render_note(index + 1, note)
            ));
        }
        out.push_str("</ol>");
    }

    // drawings
    out.push_str("<h2>🖼️ Saved Drawings</h2>");
    if view.drawings.is_empty() {
        out.push_str(&format!(r#"<p class="info">{NO_DRAWINGS}</p>"#));
    } else {
        out.push_str("<ul>");
        for entry in &view.drawings {
            render_drawing(&mut out, entry);
        }
        out.push_str("</ul>");
    }

    out.push_str(&format!("<script>{CANVAS_SCRIPT}</script></body></html>"));
    out
}

/// Page shown when an action fails.
pub fn render_error(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>📓 {PAGE_TITLE}</title><style>{STYLE}</style></head><body><h1>{PAGE_TITLE}</h1><p class="error">{}</p><p><a href="/">Back to the notebook</a></p></body></html>"#,
        escape(message)
    )
}
