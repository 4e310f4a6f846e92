//! The standard HTML renderer.
//!
//! Every block becomes an absolutely positioned wrapper inside a fixed-size
//! canvas container, with all styling inlined for email clients. A single
//! media query collapses the wrappers into normal flow, in document order,
//! on narrow screens.

mod blocks;

use std::fmt::Write;

use log::debug;
use v_htmlescape::escape;

use tessera_core::{
    color::Color,
    document::{Block, Document},
};

use crate::{config::StyleConfig, export::{RenderError, Renderer}};

pub use blocks::normalize_href;

/// Inner padding of every block wrapper, in pixels.
pub const BLOCK_PADDING: i32 = 24;

/// Placeholder the sending service replaces with the real tracking URL.
pub const TRACKING_PIXEL_URL: &str = "{{TRACKING_PIXEL_URL}}";

pub(crate) const CANVAS_CLASS: &str = "tessera-canvas";
pub(crate) const BLOCK_CLASS: &str = "tessera-block";

pub(crate) const RESPONSIVE_CSS: &str = "\
@media only screen and (max-width: 600px) {
  .tessera-canvas { width: 100% !important; height: auto !important; }
  .tessera-block { position: relative !important; left: auto !important; top: auto !important; width: 100% !important; height: auto !important; }
  .tessera-block img { max-width: 100% !important; height: auto !important; }
}";

/// Renders documents as absolutely positioned HTML.
#[derive(Debug, Clone)]
pub struct StandardRenderer {
    tracking_pixel: bool,
}

impl Default for StandardRenderer {
    fn default() -> Self {
        Self {
            tracking_pixel: true,
        }
    }
}

impl StandardRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(style: &StyleConfig) -> Self {
        Self {
            tracking_pixel: style.tracking_pixel(),
        }
    }

    pub fn with_tracking_pixel(mut self, tracking_pixel: bool) -> Self {
        self.tracking_pixel = tracking_pixel;
        self
    }
}

impl Renderer for StandardRenderer {
    fn render(&self, document: &Document) -> Result<String, RenderError> {
        let globals = document.global_styles();
        let background = css_color(globals.background_color(), "global background color")?;
        let mut html = String::new();

        write_head(&mut html, document)?;
        writeln!(
            html,
            "<body style=\"margin:0;padding:0;background-color:{};font-family:{};\">",
            escape(background),
            escape(globals.font_family())
        )?;
        writeln!(
            html,
            "<div class=\"{CANVAS_CLASS}\" style=\"position:relative;width:{}px;height:{}px;margin:0 auto;background-color:{};\">",
            globals.content_width(),
            globals.content_height(),
            escape(background)
        )?;

        for block in document.blocks() {
            html.push_str(&wrapper_open(block));
            blocks::write_content(&mut html, block, globals)?;
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");

        if self.tracking_pixel {
            html.push_str(&tracking_pixel());
        }
        html.push_str("</body>\n</html>\n");

        debug!(blocks = document.blocks().len(); "Rendered standard template");
        Ok(html)
    }

    fn tracking_pixel(&self) -> bool {
        self.tracking_pixel
    }
}

fn write_head(html: &mut String, document: &Document) -> Result<(), RenderError> {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    writeln!(html, "<title>{}</title>", escape(document_title(document)))?;
    writeln!(html, "<style>\n{RESPONSIVE_CSS}\n</style>")?;
    html.push_str("</head>\n");
    Ok(())
}

/// Title shown by mail clients; the subject when the title is empty.
pub(crate) fn document_title(document: &Document) -> &str {
    if document.title().trim().is_empty() {
        document.subject()
    } else {
        document.title()
    }
}

/// Opening tag of a block's positioned wrapper.
pub(crate) fn wrapper_open(block: &Block) -> String {
    let rect = block.position();
    format!(
        "<div class=\"{BLOCK_CLASS} {BLOCK_CLASS}-{kind}\" data-block-id=\"{id}\" style=\"position:absolute;left:{x}px;top:{y}px;width:{w}px;height:{h}px;padding:{BLOCK_PADDING}px;box-sizing:border-box;overflow:hidden;\">\n",
        kind = block.kind(),
        id = escape(block.id().as_str()),
        x = rect.x(),
        y = rect.y(),
        w = rect.width(),
        h = rect.height(),
    )
}

pub(crate) fn tracking_pixel() -> String {
    format!(
        "<img class=\"tessera-tracking-pixel\" src=\"{TRACKING_PIXEL_URL}\" width=\"1\" height=\"1\" alt=\"\" style=\"display:block;width:1px;height:1px;border:0;\">\n"
    )
}

/// Checks that `value` is a CSS color, returning it trimmed.
fn css_color<'a>(value: &'a str, context: &str) -> Result<&'a str, RenderError> {
    Color::new(value).map_err(|reason| RenderError::InvalidColor {
        value: value.to_string(),
        context: context.to_string(),
        reason,
    })?;
    Ok(value.trim())
}
