//! Per-type content rendering.

use std::{borrow::Cow, fmt::Write};

use v_htmlescape::escape;

use tessera_core::document::{
    Block, BlockContent, BlockStyles, ButtonContent, GlobalStyles, HeaderContent, ImageContent,
    TextAlign, TextContent,
};

use super::{BLOCK_PADDING, css_color};
use crate::export::RenderError;

const HEADER_FONT_SIZE: u32 = 32;
const TEXT_FONT_SIZE: u32 = 16;
const TEXT_COLOR: &str = "#000000";
const BUTTON_FONT_SIZE: u32 = 16;
const BUTTON_PADDING: u32 = 12;
const BUTTON_RADIUS: u32 = 6;
const BUTTON_TEXT_COLOR: &str = "#ffffff";
const DIVIDER_COLOR: &str = "#e5e7eb";
const DIVIDER_THICKNESS: u32 = 1;

/// Writes the inner HTML of `block`.
pub(super) fn write_content(
    html: &mut String,
    block: &Block,
    globals: &GlobalStyles,
) -> Result<(), RenderError> {
    let styles = block.styles();
    match block.content() {
        BlockContent::Header(header) => write_header(html, header, styles, globals),
        BlockContent::Text(text) => write_text(html, text, styles),
        BlockContent::Image(image) => write_image(html, image, styles, block),
        BlockContent::Button(button) => write_button(html, button, styles, globals),
        BlockContent::Divider => write_divider(html, styles),
    }
}

fn write_header(
    html: &mut String,
    header: &HeaderContent,
    styles: &BlockStyles,
    globals: &GlobalStyles,
) -> Result<(), RenderError> {
    let color = css_color(styles.color().unwrap_or(globals.primary_color()), "header color")?;
    writeln!(
        html,
        "<h1 style=\"margin:0;font-size:{}px;font-weight:bold;line-height:1.2;color:{};text-align:{};\">{}</h1>",
        styles.font_size().unwrap_or(HEADER_FONT_SIZE),
        escape(color),
        styles.text_align().unwrap_or(TextAlign::Center),
        escape(&header.text)
    )?;
    Ok(())
}

fn write_text(html: &mut String, text: &TextContent, styles: &BlockStyles) -> Result<(), RenderError> {
    let color = css_color(styles.color().unwrap_or(TEXT_COLOR), "text color")?;
    // Rich text is sanitized upstream and passed through verbatim.
    writeln!(
        html,
        "<div style=\"margin:0;font-size:{}px;line-height:1.5;color:{};text-align:{};\">{}</div>",
        styles.font_size().unwrap_or(TEXT_FONT_SIZE),
        escape(color),
        styles.text_align().unwrap_or(TextAlign::Left),
        text.html
    )?;
    Ok(())
}

fn write_image(
    html: &mut String,
    image: &ImageContent,
    styles: &BlockStyles,
    block: &Block,
) -> Result<(), RenderError> {
    let rect = block.position();
    let width = (rect.width() - 2 * BLOCK_PADDING).max(0);
    let height = (rect.height() - 2 * BLOCK_PADDING).max(0);
    let radius = styles.border_radius().unwrap_or(0);

    let Some(src) = image.src.as_deref().filter(|src| !src.trim().is_empty()) else {
        writeln!(
            html,
            "<div style=\"width:{width}px;height:{height}px;box-sizing:border-box;border:2px dashed #d1d5db;border-radius:{radius}px;background-color:#f3f4f6;color:#9ca3af;font-size:14px;line-height:{height}px;text-align:center;\">Image</div>"
        )?;
        return Ok(());
    };

    let img = format!(
        "<img src=\"{}\" alt=\"{}\" width=\"{width}\" height=\"{height}\" style=\"display:block;width:{width}px;height:{height}px;border:0;border-radius:{radius}px;\">",
        escape(src.trim()),
        escape(&image.alt)
    );
    match image.href.as_deref().filter(|href| !href.trim().is_empty()) {
        Some(href) => writeln!(
            html,
            "<a href=\"{}\" target=\"_blank\">{img}</a>",
            escape(&normalize_href(href))
        )?,
        None => writeln!(html, "{img}")?,
    }
    Ok(())
}

fn write_button(
    html: &mut String,
    button: &ButtonContent,
    styles: &BlockStyles,
    globals: &GlobalStyles,
) -> Result<(), RenderError> {
    let background = css_color(
        styles.background_color().unwrap_or(globals.primary_color()),
        "button background color",
    )?;
    let color = css_color(styles.color().unwrap_or(BUTTON_TEXT_COLOR), "button text color")?;
    let padding = styles.padding().unwrap_or(BUTTON_PADDING);
    let href = normalize_href(&button.href);
    let target = if href == "#" { "" } else { " target=\"_blank\"" };

    writeln!(
        html,
        "<div style=\"text-align:{};\"><a href=\"{}\"{target} style=\"display:inline-block;padding:{}px {}px;background-color:{};color:{};border-radius:{}px;font-size:{}px;font-weight:bold;text-decoration:none;\">{}</a></div>",
        styles.text_align().unwrap_or(TextAlign::Center),
        escape(&href),
        padding,
        padding * 2,
        escape(background),
        escape(color),
        styles.border_radius().unwrap_or(BUTTON_RADIUS),
        styles.font_size().unwrap_or(BUTTON_FONT_SIZE),
        escape(&button.text)
    )?;
    Ok(())
}

fn write_divider(html: &mut String, styles: &BlockStyles) -> Result<(), RenderError> {
    let color = css_color(styles.color().unwrap_or(DIVIDER_COLOR), "divider color")?;
    writeln!(
        html,
        "<hr style=\"width:80%;margin:0 auto;border:0;border-top:{}px solid {};\">",
        styles.thickness().unwrap_or(DIVIDER_THICKNESS),
        escape(color)
    )?;
    Ok(())
}

/// Normalizes a link target.
///
/// Empty links and `#` become the no-op link `#`; fragment links and links
/// with a scheme are kept; anything else is assumed to be a web address and
/// gets `https://` prepended.
///
/// # Examples
///
/// ```
/// # use tessera::export::normalize_href;
/// assert_eq!(normalize_href(""), "#");
/// assert_eq!(normalize_href("example.com/news"), "https://example.com/news");
/// assert_eq!(normalize_href("mailto:team@example.com"), "mailto:team@example.com");
/// assert_eq!(normalize_href("//cdn.example.com"), "https://cdn.example.com");
/// ```
pub fn normalize_href(href: &str) -> Cow<'_, str> {
    let href = href.trim();
    if href.is_empty() || href == "#" {
        Cow::Borrowed("#")
    } else if href.starts_with('#') || has_scheme(href) {
        Cow::Borrowed(href)
    } else if let Some(rest) = href.strip_prefix("//") {
        Cow::Owned(format!("https://{rest}"))
    } else {
        Cow::Owned(format!("https://{href}"))
    }
}

/// Schemes whose payload may be a bare number, like `tel:5551234`.
const NUMERIC_SCHEMES: [&str; 3] = ["tel", "sms", "fax"];

/// Whether `href` starts with a URL scheme rather than a `host:port`.
fn has_scheme(href: &str) -> bool {
    let Some((scheme, rest)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let well_formed = chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-'));
    if !well_formed {
        return false;
    }

    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let looks_like_port = !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit());
    !looks_like_port || NUMERIC_SCHEMES.iter().any(|s| scheme.eq_ignore_ascii_case(s))
}
