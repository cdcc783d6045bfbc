//! HTML page rendering.
//!
//! Turns a [`GalleryPage`] into one self-contained HTML document: CSS and
//! the lightbox script are inlined, and the page's navigation list is
//! embedded as JSON for the script to read.
//!
//! ## Page Layout
//!
//! - **Header**: site title (root) or breadcrumb back to `/` (folder), plus
//!   the light/dark theme toggle
//! - **Grid**: folder tiles link to `/<folder>`; file tiles are buttons that
//!   open the lightbox at their `data-index`
//! - **Lightbox**: hidden until a file tile is clicked; prev/next wrap around,
//!   arrow keys navigate, Escape closes
//! - **Footer**: author credit, when configured
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: layout and lightbox styles (colors injected from config)
//! - `static/gallery.js`: lightbox and theme toggle
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Captions and folder names come from the filesystem and from EXIF, so
//! maud's automatic escaping matters here.

use crate::config::{self, SiteConfig};
use crate::naming::display_title;
use crate::types::{FileItem, FolderItem, GalleryItem, GalleryPage, MediaEntry, MediaKind, View};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// Placeholder shown for folders without any media.
pub const FOLDER_ICON_PATH: &str = "/_folio/folder.svg";
pub const FOLDER_ICON_SVG: &str = include_str!("../static/folder.svg");

/// Render a complete page.
pub fn render_page(config: &SiteConfig, page: &GalleryPage) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    let (title, header) = match &page.view {
        View::Root => (config.title.clone(), html! { h1 { (config.title) } }),
        View::Folder { name } => {
            let folder_title = display_title(name);
            let folder_title = if folder_title.is_empty() {
                name.clone()
            } else {
                folder_title
            };
            (
                format!("{} · {}", folder_title, config.title),
                html! {
                    nav.breadcrumb {
                        a href="/" { (config.title) }
                        " › "
                        (folder_title)
                    }
                },
            )
        }
    };

    let content = html! {
        (site_header(header))
        main {
            @if page.items.is_empty() {
                p.empty-note { "Nothing here yet." }
            } @else {
                div.grid {
                    @for item in &page.items {
                        (render_item(item))
                    }
                }
            }
        }
        @if !config.author.trim().is_empty() {
            footer.site-footer { "Photos by " (config.author) }
        }
        (lightbox())
        script id="media-data" type="application/json" { (PreEscaped(media_json(&page.media))) }
        script { (PreEscaped(JS)) }
    };

    base_document(&title, &css, content)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(heading: Markup) -> Markup {
    html! {
        header.site-header {
            (heading)
            button.theme-toggle type="button" aria-label="Toggle dark mode" { "◐" }
        }
    }
}

fn render_item(item: &GalleryItem) -> Markup {
    match item {
        GalleryItem::Folder(folder) => render_folder_tile(folder),
        GalleryItem::File(file) => render_file_tile(file),
    }
}

fn thumbnail(url: &str, kind: MediaKind, alt: &str) -> Markup {
    html! {
        @match kind {
            MediaKind::Video => {
                video src=(url) muted preload="metadata" playsinline {}
            }
            MediaKind::Image => {
                img src=(url) alt=(alt) loading="lazy";
            }
        }
    }
}

fn render_folder_tile(folder: &FolderItem) -> Markup {
    html! {
        a.tile.folder-tile href=(folder.link_path) title=(folder.name) {
            @match &folder.thumbnail_url {
                Some(url) => {
                    (thumbnail(url, folder.thumbnail_kind, &folder.caption))
                }
                None => {
                    img.placeholder src=(FOLDER_ICON_PATH) alt="";
                }
            }
            span.tile-caption { (folder.caption) }
        }
    }
}

fn render_file_tile(file: &FileItem) -> Markup {
    html! {
        button.tile.file-tile type="button" data-index=(file.index) title=(file.entry.caption) {
            (thumbnail(&file.thumbnail_url, file.entry.kind(), &file.entry.caption))
            span.tile-caption { (file.entry.caption) }
        }
    }
}

fn lightbox() -> Markup {
    html! {
        div.lightbox id="lightbox" hidden role="dialog" aria-modal="true" {
            button.lightbox-close type="button" aria-label="Close" { "×" }
            button.lightbox-prev type="button" aria-label="Previous" { "‹" }
            figure.lightbox-stage {}
            p.lightbox-caption {
                span.lightbox-caption-text {}
                span.lightbox-counter {}
            }
            button.lightbox-next type="button" aria-label="Next" { "›" }
        }
    }
}

/// The navigation list as JSON, safe to place inside a `<script>` element.
pub fn media_json(media: &[MediaEntry]) -> String {
    // Serializing plain structs of strings cannot fail.
    let json = serde_json::to_string(media).unwrap_or_else(|_| "[]".to_string());
    json.replace("</", "<\\/")
}

// ============================================================================
// Tests
// ============================================================================
