//! Per-block and document-wide style records.
//!
//! Styles only carry what the HTML serializer consumes. Every field is
//! optional on the wire; the serializer supplies per-type defaults.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a block's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Returns the CSS `text-align` keyword
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for TextAlign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(format!("invalid alignment `{other}`")),
        }
    }
}

impl fmt::Display for TextAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Visual settings of a single block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockStyles {
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thickness: Option<u32>,
}

impl BlockStyles {
    /// Foreground color (text, divider line)
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Background color (button fill)
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    pub fn text_align(&self) -> Option<TextAlign> {
        self.text_align
    }

    /// Font size in pixels
    pub fn font_size(&self) -> Option<u32> {
        self.font_size
    }

    /// Corner radius in pixels
    pub fn border_radius(&self) -> Option<u32> {
        self.border_radius
    }

    /// Inner padding of buttons in pixels
    pub fn padding(&self) -> Option<u32> {
        self.padding
    }

    /// Divider line thickness in pixels
    pub fn thickness(&self) -> Option<u32> {
        self.thickness
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_font_size(mut self, size: u32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_border_radius(mut self, radius: u32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_thickness(mut self, thickness: u32) -> Self {
        self.thickness = Some(thickness);
        self
    }
}

/// Document-wide style settings; the canvas size is derived from these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalStyles {
    primary_color: String,
    background_color: String,
    content_width: i32,
    content_height: i32,
    font_family: String,
}

impl Default for GlobalStyles {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            background_color: "#ffffff".to_string(),
            content_width: 600,
            content_height: 800,
            font_family: "Arial, sans-serif".to_string(),
        }
    }
}

impl GlobalStyles {
    /// Accent color; the default for headers and button fills
    pub fn primary_color(&self) -> &str {
        &self.primary_color
    }

    /// Page background surrounding the canvas
    pub fn background_color(&self) -> &str {
        &self.background_color
    }

    /// Canvas width in pixels
    pub fn content_width(&self) -> i32 {
        self.content_width
    }

    /// Canvas height in pixels
    pub fn content_height(&self) -> i32 {
        self.content_height
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = color.into();
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Sets the canvas dimensions (builder style).
    pub fn with_content_size(mut self, width: i32, height: i32) -> Self {
        self.content_width = width;
        self.content_height = height;
        self
    }

    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = font_family.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_align_round_trip_through_str() {
        for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
            assert_eq!(align.to_string().parse::<TextAlign>(), Ok(align));
        }
        assert!("justify".parse::<TextAlign>().is_err());
    }

    #[test]
    fn test_block_styles_skip_unset_fields() {
        let styles = BlockStyles::default().with_font_size(18);
        let json = serde_json::to_string(&styles).unwrap();
        assert_eq!(json, r#"{"fontSize":18}"#);
    }

    #[test]
    fn test_global_styles_partial_json_uses_defaults() {
        let styles: GlobalStyles = serde_json::from_str(r#"{"contentWidth": 700}"#).unwrap();
        assert_eq!(styles.content_width(), 700);
        assert_eq!(styles.content_height(), 800);
        assert_eq!(styles.primary_color(), "#2563eb");
    }
}
