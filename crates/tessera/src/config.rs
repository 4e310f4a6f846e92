//! Configuration types for the Tessera editor and exporter.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Grid snapping, drag force model and undo depth.
//! - [`StyleConfig`] - Options of the HTML export.
//!
//! # Example
//!
//! ```
//! # use tessera::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(!config.layout().snap_to_grid());
//! assert!(config.style().tracking_pixel());
//! ```

use serde::Deserialize;

use crate::layout::{ForceEngine, ForceModel, MagneticForces};

/// Default number of snapshots kept by the undo history.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Editor layout configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Whether positions and sizes are snapped to the 20px grid.
    snap_to_grid: bool,

    /// Force model applied while dragging.
    drag_forces: ForceEngine,

    /// Weights of the magnetic force model.
    magnetic: MagneticForces,

    /// Number of snapshots kept by the undo history.
    history_limit: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            drag_forces: ForceEngine::default(),
            magnetic: MagneticForces::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl LayoutConfig {
    pub fn snap_to_grid(&self) -> bool {
        self.snap_to_grid
    }

    /// Returns the selected [`ForceEngine`].
    pub fn drag_forces(&self) -> ForceEngine {
        self.drag_forces
    }

    pub fn magnetic(&self) -> MagneticForces {
        self.magnetic
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Sets whether snapping is enabled (builder style).
    pub fn with_snap_to_grid(mut self, snap_to_grid: bool) -> Self {
        self.snap_to_grid = snap_to_grid;
        self
    }

    /// Selects the drag force model (builder style).
    pub fn with_drag_forces(mut self, drag_forces: ForceEngine) -> Self {
        self.drag_forces = drag_forces;
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    /// Instantiates the configured force model.
    pub fn force_model(&self) -> Box<dyn ForceModel> {
        self.drag_forces.build(self.magnetic)
    }
}

/// HTML export configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Whether to emit the tracking pixel placeholder.
    tracking_pixel: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            tracking_pixel: true,
        }
    }
}

impl StyleConfig {
    pub fn tracking_pixel(&self) -> bool {
        self.tracking_pixel
    }

    pub fn with_tracking_pixel(mut self, tracking_pixel: bool) -> Self {
        self.tracking_pixel = tracking_pixel;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"layout": {"drag_forces": "rigid"}}"#).unwrap();
        assert_eq!(config.layout().drag_forces(), ForceEngine::Rigid);
        assert_eq!(config.layout().history_limit(), DEFAULT_HISTORY_LIMIT);
        assert!(config.style().tracking_pixel());
    }

    #[test]
    fn test_builders() {
        let layout = LayoutConfig::default()
            .with_snap_to_grid(true)
            .with_history_limit(5);
        let config = AppConfig::new(layout, StyleConfig::default().with_tracking_pixel(false));
        assert!(config.layout().snap_to_grid());
        assert_eq!(config.layout().history_limit(), 5);
        assert!(!config.style().tracking_pixel());
    }
}
