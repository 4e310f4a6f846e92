//! Canvas layout engines.
//!
//! Everything here is a pure function of geometry: the engines read block
//! rectangles and a [`Canvas`](tessera_core::canvas::Canvas) and return new
//! rectangles. They never touch block content.
//!
//! - [`allocator`] finds space for new blocks
//! - [`drag`] moves a block under the pointer, with [`forces`] nudging it
//! - [`resize`] resizes a block by one of its eight handles
//! - [`validate`] repairs stored geometry on load

pub mod allocator;
pub mod drag;
pub mod forces;
pub mod resize;
mod validate;

pub use allocator::{Allocator, Placement, Strategy};
pub use drag::{DragEngine, DragSession};
pub use forces::{ForceEngine, ForceModel, MagneticForces, RigidForces};
pub use resize::{ResizeEngine, ResizeHandle, ResizeSession};
pub use validate::{Adjustment, ValidationReport, validate, validate_with_report};
