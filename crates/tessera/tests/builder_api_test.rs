//! Integration tests for the NewsletterBuilder API

use tessera::{
    BlockKind, DiagnosticCode, NewsletterBuilder, Point, TesseraError,
    config::{AppConfig, LayoutConfig, StyleConfig},
    editor::Event,
    export::html::TRACKING_PIXEL_URL,
};

const WEEKLY: &str = r##"{
    "title": "Weekly",
    "subject": "This week at Tessera",
    "status": "draft",
    "globalStyles": {"primaryColor": "#0f766e", "contentWidth": 600, "contentHeight": 900},
    "blocks": [
        {"id": "intro", "type": "header", "content": {"text": "Hello"},
         "position": {"x": 100, "y": 30, "width": 400, "height": 80}, "order": 0},
        {"id": "story", "type": "text", "content": {"html": "<p>Story</p>"},
         "position": {"x": 75, "y": 150, "width": 450, "height": 120}, "order": 1},
        {"id": "hero", "type": "banner", "content": {"src": "https://example.com/hero.png", "alt": "Hero"},
         "position": {"x": 100, "y": 310, "width": 400, "height": 250}, "order": 2}
    ]
}"##;

#[test]
fn test_load_reports_reclassified_blocks() {
    let builder = NewsletterBuilder::default();
    let loaded = builder.load(WEEKLY).expect("Failed to load document");

    assert_eq!(loaded.document().blocks().len(), 3);
    assert_eq!(loaded.document().blocks()[2].kind(), BlockKind::Image);
    assert_eq!(loaded.warnings().len(), 1);
    assert_eq!(loaded.warnings()[0].code(), Some(DiagnosticCode::W100));
    assert!(loaded.report().is_clean());
}

#[test]
fn test_load_repairs_geometry() {
    let source = r#"{"blocks": [{"id": "a", "type": "divider", "content": {},
        "position": {"x": 550, "y": -20, "width": 450, "height": 10}}]}"#;
    let loaded = NewsletterBuilder::default().load(source).expect("Failed to load document");

    let rect = loaded.document().blocks()[0].position();
    assert_eq!((rect.x(), rect.y(), rect.width(), rect.height()), (120, 30, 450, 80));
    assert_eq!(loaded.report().adjustments().len(), 1);
}

#[test]
fn test_invalid_json_is_a_parse_error() {
    let err = NewsletterBuilder::default().load("{\"blocks\": [").unwrap_err();
    match err {
        TesseraError::Parse { err, src } => {
            assert_eq!(err.diagnostics()[0].code(), Some(DiagnosticCode::E001));
            assert_eq!(src, "{\"blocks\": [");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_render_contains_every_block() {
    let builder = NewsletterBuilder::default();
    let loaded = builder.load(WEEKLY).expect("Failed to load document");
    let html = builder.render_html(loaded.document());

    assert_eq!(html.matches("class=\"tessera-block ").count(), 3);
    assert!(html.contains("<p>Story</p>"));
    assert!(html.contains("color:#0f766e;"));
    assert!(html.contains(TRACKING_PIXEL_URL));
}

#[test]
fn test_style_config_disables_tracking_pixel() {
    let config = AppConfig::new(LayoutConfig::default(), StyleConfig::default().with_tracking_pixel(false));
    let builder = NewsletterBuilder::new(config);
    let loaded = builder.load(WEEKLY).expect("Failed to load document");
    assert!(!builder.render_html(loaded.document()).contains(TRACKING_PIXEL_URL));
}

#[test]
fn test_json_output_reloads_to_same_layout() {
    let builder = NewsletterBuilder::default();
    let loaded = builder.load(WEEKLY).expect("Failed to load document");
    let json = builder.to_json(loaded.document()).expect("Failed to serialize");

    assert!(json.contains("\"globalStyles\""));
    assert!(json.contains("\"type\": \"image\""));

    let reloaded = builder.load(&json).expect("Failed to reload");
    assert!(reloaded.warnings().is_empty());
    assert_eq!(reloaded.document().blocks(), loaded.document().blocks());
}

#[test]
fn test_session_edits_and_undoes() {
    let builder = NewsletterBuilder::default();
    let loaded = builder.load(WEEKLY).expect("Failed to load document");
    let mut session = builder.session(loaded.into_document());

    session.dispatch(Event::AddBlock { kind: BlockKind::Button, size: None });
    assert_eq!(session.document().blocks().len(), 4);

    session.dispatch(Event::BeginDrag { id: "intro".into(), pointer: Point::new(120, 40) });
    session.dispatch(Event::PointerMove { pointer: Point::new(120, 700) });
    session.dispatch(Event::PointerUp);

    assert!(session.undo());
    assert!(session.undo());
    assert_eq!(session.document().blocks().len(), 3);
    assert!(!session.undo());
}
