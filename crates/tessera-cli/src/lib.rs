//! CLI logic for the Tessera newsletter tool.
//!
//! Loads a newsletter document, reports what had to be recovered or
//! repaired, and writes the email HTML.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::{info, warn};

use tessera::{NewsletterBuilder, TesseraError};

use error_adapter::warnings_to_reportables;

/// Run the Tessera CLI application
///
/// Reads the input document, validates its geometry and writes the rendered
/// HTML to the output file. With `--normalized`, the validated document is
/// written back out as JSON as well.
///
/// # Errors
///
/// Returns `TesseraError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Documents that cannot be parsed
/// - JSON serialization errors
pub fn run(args: &Args) -> Result<(), TesseraError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing newsletter"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = NewsletterBuilder::new(app_config);
    let loaded = builder.load(&source)?;
    report_warnings(&loaded, &source);

    for adjustment in loaded.report().adjustments() {
        info!(
            block_id = adjustment.block_id().as_str(),
            before:? = adjustment.before(),
            after:? = adjustment.after();
            "Block geometry repaired"
        );
    }

    let html = builder.render_html(loaded.document());
    fs::write(&args.output, html)?;
    info!(output_file = args.output; "HTML exported successfully");

    if let Some(path) = &args.normalized {
        let json = builder.to_json(loaded.document())?;
        fs::write(path, json)?;
        info!(output_file = path; "Normalized document written");
    }

    Ok(())
}

fn report_warnings(loaded: &tessera::Loaded, source: &str) {
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in warnings_to_reportables(loaded.warnings(), source) {
        let mut writer = String::new();
        if reporter.render_report(&mut writer, &reportable).is_ok() {
            warn!("{writer}");
        }
    }
}
