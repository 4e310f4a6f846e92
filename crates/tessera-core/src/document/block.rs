//! Blocks: positioned content units on the canvas.
//!
//! A [`Block`] pairs typed [`BlockContent`] with its [`BlockStyles`] and the
//! rectangle it occupies. On the wire a block is a flat record with a string
//! `type` discriminant and an untyped `content` object ([`RawBlock`]);
//! converting a raw block into a typed one is where unknown or corrupted
//! types are recovered.

use std::{fmt, str::FromStr};

use log::warn;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::{
    document::styles::BlockStyles,
    error::{Diagnostic, DiagnosticCode},
    geometry::{Rect, Size},
    identifier::BlockId,
};

/// Longest text that is still taken for a heading when a block's type has
/// to be inferred from its content.
const HEADER_TEXT_MAX_CHARS: usize = 80;

/// The five kinds of block the editor can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Header,
    Text,
    Image,
    Button,
    Divider,
}

impl BlockKind {
    /// All kinds, in palette order.
    pub const ALL: [BlockKind; 5] = [
        BlockKind::Header,
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::Button,
        BlockKind::Divider,
    ];

    /// Size a new block of this kind gets when the caller does not ask for one.
    pub fn default_size(self) -> Size {
        match self {
            Self::Header => Size::new(400, 80),
            Self::Text => Size::new(450, 120),
            Self::Image => Size::new(400, 250),
            Self::Button => Size::new(200, 60),
            Self::Divider => Size::new(450, 40),
        }
    }

    /// Returns the wire name of the kind
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Text => "text",
            Self::Image => "image",
            Self::Button => "button",
            Self::Divider => "divider",
        }
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(Self::Header),
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            "button" => Ok(Self::Button),
            "divider" => Ok(Self::Divider),
            other => Err(format!("unknown block type `{other}`")),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content of a header block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderContent {
    pub text: String,
}

/// Content of a text block: rich HTML, sanitized upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    pub html: String,
}

/// Content of an image block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Content of a button block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonContent {
    pub text: String,
    pub href: String,
}

impl Default for ButtonContent {
    fn default() -> Self {
        Self {
            text: String::new(),
            href: "#".to_string(),
        }
    }
}

/// Typed content of a block; the variant determines the block's kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockContent {
    Header(HeaderContent),
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Divider,
}

impl BlockContent {
    /// Placeholder content for a freshly added block of the given kind.
    pub fn placeholder(kind: BlockKind) -> Self {
        match kind {
            BlockKind::Header => Self::Header(HeaderContent {
                text: "Your headline here".to_string(),
            }),
            BlockKind::Text => Self::Text(TextContent {
                html: "<p>Start writing your story...</p>".to_string(),
            }),
            BlockKind::Image => Self::Image(ImageContent::default()),
            BlockKind::Button => Self::Button(ButtonContent {
                text: "Read more".to_string(),
                href: "#".to_string(),
            }),
            BlockKind::Divider => Self::Divider,
        }
    }

    /// Returns the kind implied by the variant
    pub fn kind(&self) -> BlockKind {
        match self {
            Self::Header(_) => BlockKind::Header,
            Self::Text(_) => BlockKind::Text,
            Self::Image(_) => BlockKind::Image,
            Self::Button(_) => BlockKind::Button,
            Self::Divider => BlockKind::Divider,
        }
    }

    /// Returns the plain text shown for this content, if it has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Header(header) => Some(&header.text),
            Self::Text(text) => Some(&text.html),
            Self::Image(image) => Some(&image.alt),
            Self::Button(button) => Some(&button.text),
            Self::Divider => None,
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match self {
            Self::Header(header) => {
                map.insert("text".to_string(), Value::from(header.text.as_str()));
            }
            Self::Text(text) => {
                map.insert("html".to_string(), Value::from(text.html.as_str()));
            }
            Self::Image(image) => {
                if let Some(src) = &image.src {
                    map.insert("src".to_string(), Value::from(src.as_str()));
                }
                map.insert("alt".to_string(), Value::from(image.alt.as_str()));
                if let Some(href) = &image.href {
                    map.insert("href".to_string(), Value::from(href.as_str()));
                }
            }
            Self::Button(button) => {
                map.insert("text".to_string(), Value::from(button.text.as_str()));
                map.insert("href".to_string(), Value::from(button.href.as_str()));
            }
            Self::Divider => {}
        }
        map
    }
}

/// A positioned content unit on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "RawBlock")]
pub struct Block {
    id: BlockId,
    content: BlockContent,
    styles: BlockStyles,
    position: Rect,
    order: Option<i64>,
}

impl Block {
    /// Creates a block with default styles at the origin.
    pub fn new(id: impl Into<BlockId>, content: BlockContent) -> Self {
        Self {
            id: id.into(),
            content,
            styles: BlockStyles::default(),
            position: Rect::default(),
            order: None,
        }
    }

    pub fn with_position(mut self, position: Rect) -> Self {
        self.position = position;
        self
    }

    pub fn with_styles(mut self, styles: BlockStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Sets the legacy ordering hint (builder style).
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn id(&self) -> &BlockId {
        &self.id
    }

    pub fn kind(&self) -> BlockKind {
        self.content.kind()
    }

    pub fn content(&self) -> &BlockContent {
        &self.content
    }

    pub fn styles(&self) -> &BlockStyles {
        &self.styles
    }

    /// The rectangle the block occupies on the canvas
    pub fn position(&self) -> Rect {
        self.position
    }

    pub fn set_position(&mut self, position: Rect) {
        self.position = position;
    }

    pub fn set_content(&mut self, content: BlockContent) {
        self.content = content;
    }

    pub fn set_styles(&mut self, styles: BlockStyles) {
        self.styles = styles;
    }

    /// The legacy ordering hint. Layout never consults it.
    pub fn order(&self) -> Option<i64> {
        self.order
    }
}

/// Wire form of a block, as stored by the surrounding application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBlock {
    id: BlockId,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    content: Map<String, Value>,
    #[serde(default)]
    styles: BlockStyles,
    position: Rect,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
}

impl RawBlock {
    /// Converts the wire form into a typed block.
    ///
    /// Never fails: a block with an unknown type is reclassified from the
    /// shape of its content (`src` means image, `html` means text, a `text`
    /// with an `href` means button, a short `text` means header) and content
    /// that does not match its type is replaced by defaults. Every such
    /// repair is reported as a warning diagnostic.
    pub fn into_block(self) -> (Block, Option<Diagnostic>) {
        let RawBlock {
            id,
            kind,
            content,
            styles,
            position,
            order,
        } = self;

        let (content, diagnostic) = match kind.parse::<BlockKind>() {
            Ok(kind) => decode_content(&id, kind, content),
            Err(_) => reclassify(&id, &kind, content),
        };

        let block = Block {
            id,
            content,
            styles,
            position,
            order,
        };
        (block, diagnostic)
    }
}

impl From<Block> for RawBlock {
    fn from(block: Block) -> Self {
        Self {
            kind: block.kind().as_str().to_string(),
            content: block.content.to_map(),
            id: block.id,
            styles: block.styles,
            position: block.position,
            order: block.order,
        }
    }
}

fn decode_content(
    id: &BlockId,
    kind: BlockKind,
    content: Map<String, Value>,
) -> (BlockContent, Option<Diagnostic>) {
    let decoded = match kind {
        BlockKind::Header => decode::<HeaderContent>(content).map(BlockContent::Header),
        BlockKind::Text => decode::<TextContent>(content).map(BlockContent::Text),
        BlockKind::Image => decode::<ImageContent>(content).map(BlockContent::Image),
        BlockKind::Button => decode::<ButtonContent>(content).map(BlockContent::Button),
        BlockKind::Divider => Ok(BlockContent::Divider),
    };

    match decoded {
        Ok(content) => (content, None),
        Err(err) => {
            warn!(block_id = id.as_str(), kind = kind.as_str(), err:%; "Replacing malformed block content");
            let diagnostic = Diagnostic::warning(format!(
                "content of {kind} block `{id}` is malformed: {err}"
            ))
            .with_code(DiagnosticCode::W101)
            .with_help("the block was kept with empty content");
            (empty_content(kind), Some(diagnostic))
        }
    }
}

fn reclassify(
    id: &BlockId,
    raw_kind: &str,
    content: Map<String, Value>,
) -> (BlockContent, Option<Diagnostic>) {
    let text = content.get("text").and_then(Value::as_str);
    let inferred = if content.contains_key("src") {
        Some(BlockKind::Image)
    } else if content.contains_key("html") {
        Some(BlockKind::Text)
    } else if text.is_some() && content.contains_key("href") {
        Some(BlockKind::Button)
    } else if text.is_some_and(|text| text.chars().count() <= HEADER_TEXT_MAX_CHARS) {
        Some(BlockKind::Header)
    } else {
        None
    };

    match inferred {
        Some(kind) => {
            warn!(block_id = id.as_str(), raw_kind, kind = kind.as_str(); "Reclassified block with unknown type");
            let (content, _) = decode_content(id, kind, content);
            let diagnostic = Diagnostic::warning(format!(
                "block `{id}` has unknown type `{raw_kind}`"
            ))
            .with_code(DiagnosticCode::W100)
            .with_help(format!("treated as a {kind} block based on its content"));
            (content, Some(diagnostic))
        }
        None => {
            warn!(block_id = id.as_str(), raw_kind; "Block type could not be inferred");
            // Long free text is kept as a text block rather than dropped.
            let html = text.map(str::to_string).unwrap_or_default();
            let diagnostic = Diagnostic::warning(format!(
                "block `{id}` has unknown type `{raw_kind}` and unrecognizable content"
            ))
            .with_code(DiagnosticCode::W101)
            .with_help("treated as a text block");
            (BlockContent::Text(TextContent { html }), Some(diagnostic))
        }
    }
}

fn decode<T: DeserializeOwned>(content: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(content))
}

fn empty_content(kind: BlockKind) -> BlockContent {
    match kind {
        BlockKind::Header => BlockContent::Header(HeaderContent::default()),
        BlockKind::Text => BlockContent::Text(TextContent::default()),
        BlockKind::Image => BlockContent::Image(ImageContent::default()),
        BlockKind::Button => BlockContent::Button(ButtonContent::default()),
        BlockKind::Divider => BlockContent::Divider,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::Severity;

    fn raw(value: Value) -> RawBlock {
        serde_json::from_value(value).expect("valid raw block")
    }

    fn position() -> Value {
        json!({ "x": 40, "y": 40, "width": 400, "height": 80 })
    }

    #[test]
    fn test_known_type_decodes_without_diagnostic() {
        let (block, diag) = raw(json!({
            "id": "b1",
            "type": "button",
            "content": { "text": "Buy", "href": "shop.example.com" },
            "position": position(),
            "order": 3
        }))
        .into_block();

        assert!(diag.is_none());
        assert_eq!(block.kind(), BlockKind::Button);
        assert_eq!(block.order(), Some(3));
        assert_eq!(
            block.content(),
            &BlockContent::Button(ButtonContent {
                text: "Buy".to_string(),
                href: "shop.example.com".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_type_with_src_becomes_image() {
        let (block, diag) = raw(json!({
            "id": "b2",
            "type": "hero",
            "content": { "src": "https://cdn.example.com/a.png", "alt": "A" },
            "position": position()
        }))
        .into_block();

        let diag = diag.expect("reclassification is reported");
        assert_eq!(diag.code(), Some(DiagnosticCode::W100));
        assert_eq!(diag.severity(), Severity::Warning);
        assert_eq!(block.kind(), BlockKind::Image);
    }

    #[test]
    fn test_unknown_type_with_html_becomes_text() {
        let (block, _) = raw(json!({
            "id": "b3",
            "content": { "html": "<p>hi</p>" },
            "position": position()
        }))
        .into_block();
        assert_eq!(block.kind(), BlockKind::Text);
    }

    #[test]
    fn test_unknown_type_with_short_text_becomes_header() {
        let (block, _) = raw(json!({
            "id": "b4",
            "type": "title",
            "content": { "text": "Welcome" },
            "position": position()
        }))
        .into_block();
        assert_eq!(block.kind(), BlockKind::Header);
        assert_eq!(block.content().text(), Some("Welcome"));
    }

    #[test]
    fn test_unknown_type_with_long_text_falls_back_to_text() {
        let long = "x".repeat(200);
        let (block, diag) = raw(json!({
            "id": "b5",
            "type": "???",
            "content": { "text": long },
            "position": position()
        }))
        .into_block();
        assert_eq!(block.kind(), BlockKind::Text);
        assert_eq!(diag.and_then(|d| d.code()), Some(DiagnosticCode::W101));
    }

    #[test]
    fn test_malformed_content_is_replaced() {
        let (block, diag) = raw(json!({
            "id": "b6",
            "type": "header",
            "content": { "text": 42 },
            "position": position()
        }))
        .into_block();
        assert_eq!(block.content(), &BlockContent::Header(HeaderContent::default()));
        assert_eq!(diag.and_then(|d| d.code()), Some(DiagnosticCode::W101));
    }

    #[test]
    fn test_serializes_to_wire_form() {
        let block = Block::new(
            "b7",
            BlockContent::Header(HeaderContent {
                text: "Hi".to_string(),
            }),
        )
        .with_position(Rect::new(100, 30, 400, 80));

        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "b7",
                "type": "header",
                "content": { "text": "Hi" },
                "styles": {},
                "position": { "x": 100, "y": 30, "width": 400, "height": 80 }
            })
        );
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(BlockKind::Header.default_size(), Size::new(400, 80));
        assert_eq!(BlockKind::Image.default_size(), Size::new(400, 250));
        assert_eq!(BlockKind::Divider.default_size(), Size::new(450, 40));
    }
}
