//! Tessera Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tessera layout
//! engines and exporters. It includes:
//!
//! - **Geometry**: Integer rectangle math, overlap, clamping and snapping ([`geometry`] module)
//! - **Canvas**: Canvas bounds, grid and block size limits ([`canvas`] module)
//! - **Colors**: CSS color validation ([`color::Color`])
//! - **Identifiers**: Opaque block identifiers ([`identifier::BlockId`])
//! - **Document**: Blocks, styles and documents, plus JSON ingest ([`document`] module)
//! - **Errors**: Ingest diagnostics ([`error`] module)

pub mod canvas;
pub mod color;
pub mod document;
pub mod error;
pub mod geometry;
pub mod identifier;
