//! Minimal built-in template used when a renderer fails.
//!
//! It only needs the geometry and the plain text of each block, takes no
//! styles into account and cannot fail.

use v_htmlescape::escape;

use tessera_core::document::{BlockContent, Document};

use crate::export::html::{
    CANVAS_CLASS, RESPONSIVE_CSS, document_title, tracking_pixel, wrapper_open,
};

pub(super) fn render(document: &Document, with_tracking_pixel: bool) -> String {
    let globals = document.global_styles();
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(document_title(document))));
    html.push_str(&format!("<style>\n{RESPONSIVE_CSS}\n</style>\n</head>\n<body>\n"));
    html.push_str(&format!(
        "<div class=\"{CANVAS_CLASS}\" style=\"position:relative;width:{}px;height:{}px;margin:0 auto;\">\n",
        globals.content_width(),
        globals.content_height()
    ));

    for block in document.blocks() {
        html.push_str(&wrapper_open(block));
        match block.content() {
            BlockContent::Header(header) => {
                html.push_str(&format!("<h1>{}</h1>\n", escape(&header.text)));
            }
            BlockContent::Text(text) => {
                html.push_str(&format!("<div>{}</div>\n", text.html));
            }
            BlockContent::Image(image) => {
                if let Some(src) = &image.src {
                    html.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\" style=\"max-width:100%;\">\n",
                        escape(src),
                        escape(&image.alt)
                    ));
                }
            }
            BlockContent::Button(button) => {
                html.push_str(&format!(
                    "<a href=\"{}\">{}</a>\n",
                    escape(&super::normalize_href(&button.href)),
                    escape(&button.text)
                ));
            }
            BlockContent::Divider => html.push_str("<hr>\n"),
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n");

    if with_tracking_pixel {
        html.push_str(&tracking_pixel());
    }
    html.push_str("</body>\n</html>\n");
    html
}
