// ABOUTME: HTML preview module for the script-deck application
// ABOUTME: Renders the finished slide set as a self-contained HTML page before export

use crate::deck::{RenderModel, SlideLayout};
use crate::errors::{DeckError, Result};
use comrak::{markdown_to_html, ComrakOptions};
use log::info;
use quick_xml::escape::escape;
use std::fs;
use std::path::Path;

const PREVIEW_CSS: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; background: #f4f6f9; margin: 2rem; color: #222; }
h2 { color: #00529B; }
.slide-preview { background: #fff; border-radius: 8px; box-shadow: 0 1px 4px rgba(0,0,0,.12); padding: 1.5rem; margin-bottom: 1.5rem; display: flex; flex-wrap: wrap; gap: 1rem; }
.slide-preview header { flex-basis: 100%; }
.slide-number { font-size: .8rem; color: #777; }
.slide-preview h3 { color: #00529B; margin: .25rem 0 0; }
.slide-content-preview { flex: 1 1 45%; }
.slide-preview img { flex: 1 1 45%; max-width: 45%; object-fit: contain; }
.slide-preview.image-left img { order: -1; }
.no-image { color: #999; font-size: .8rem; border: 1px dashed #ccc; padding: 1rem; text-align: center; flex-basis: 100%; }
"#;

/// Render the preview page for a render model
pub fn generate_preview(model: &RenderModel, title: &str) -> String {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = false; // Raw HTML from the model is never passed through

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", escape(title)));
    html_doc.push_str(&format!("<style>{}</style>\n", PREVIEW_CSS));
    html_doc.push_str("</head>\n<body>\n<h2>Preview</h2>\n<div id=\"slide-previews-container\">\n");

    for slide in model.iter() {
        let layout_class = match slide.layout {
            SlideLayout::TextOnly => "text-only",
            SlideLayout::TextLeftImageRight => "image-right",
            SlideLayout::ImageLeftTextRight => "image-left",
        };
        html_doc.push_str(&format!(
            "<div class=\"slide-preview {}\">\n<header><span class=\"slide-number\">Slide {}</span>\n<h3>{}</h3></header>\n",
            layout_class,
            slide.index + 1,
            escape(slide.entry.title.as_str())
        ));

        html_doc.push_str("<div class=\"slide-content-preview\">");
        for line in &slide.entry.content {
            html_doc.push_str(markdown_to_html(line, &options).trim());
        }
        html_doc.push_str("</div>\n");

        match slide.image {
            Some(image) => html_doc.push_str(&format!(
                "<img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"Slide {} image\">\n",
                escape(image.encoded_payload.as_str()),
                image.width,
                image.height,
                slide.index + 1
            )),
            None => html_doc
                .push_str("<p class=\"no-image\">No image (generation failed)</p>\n"),
        }

        html_doc.push_str("</div>\n");
    }

    html_doc.push_str("</div>\n</body>\n</html>");
    html_doc
}

/// Utility function to write the preview page to a file
pub fn write_preview_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing preview to file: {:?}", output_path);

    crate::utils::ensure_parent_directory_exists(output_path)?;

    fs::write(output_path, html_content)
        .map_err(|e| DeckError::PreviewError(format!("Failed to write {:?}: {}", output_path, e)))?;

    Ok(())
}
