//! Force models for the drag engine
//!
//! A force model nudges the dragged block after it has been clamped into the
//! canvas. The default [`MagneticForces`] model blends three components with
//! fixed weights and damping; it is a physical analogy rather than a
//! constraint solver, so the drag engine never relies on it for correctness
//! (hard collision resolution runs afterwards).

use std::fmt;

use serde::Deserialize;

use tessera_core::{
    canvas::{Canvas, HARD_MARGIN},
    geometry::{self, Axis, Rect, Vector},
};

/// Strategy computing the displacement applied to a dragged block.
pub trait ForceModel: fmt::Debug {
    /// Returns the displacement to add to `rect`, the dragged block's
    /// clamped position, given the rectangles of every other block.
    fn displacement(&self, rect: Rect, others: &[Rect], canvas: Canvas) -> Vector;
}

/// Available force models, selected by configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceEngine {
    /// Grid attraction, edge alignment and overlap repulsion (default)
    #[default]
    Magnetic,
    /// No forces; only clamping, snapping and collision resolution apply
    Rigid,
}

impl ForceEngine {
    /// Instantiates the selected model, using `magnetic` for its weights.
    pub fn build(self, magnetic: MagneticForces) -> Box<dyn ForceModel> {
        match self {
            ForceEngine::Magnetic => Box::new(magnetic),
            ForceEngine::Rigid => Box::new(RigidForces),
        }
    }
}

/// A model that never moves the block.
#[derive(Debug, Clone, Copy, Default)]
pub struct RigidForces;

impl ForceModel for RigidForces {
    fn displacement(&self, _rect: Rect, _others: &[Rect], _canvas: Canvas) -> Vector {
        Vector::default()
    }
}

/// Magnetic attraction and repulsion.
///
/// - grid attraction: within `grid_range` of the nearest grid line, pull by
///   `grid_weight` times the residual;
/// - alignment: for each neighbor edge within `alignment_range` of the same
///   edge of the dragged block, pull by `alignment_weight` times the delta;
/// - repulsion: for each neighbor overlapping the margin-expanded block, push
///   along the axis of least overlap by `repulsion_weight` times the depth,
///   away from the neighbor's center.
///
/// The sum is scaled by `damping`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MagneticForces {
    grid_range: f32,
    grid_weight: f32,
    alignment_range: f32,
    alignment_weight: f32,
    repulsion_weight: f32,
    damping: f32,
    #[serde(skip)]
    margin: i32,
}

impl Default for MagneticForces {
    fn default() -> Self {
        Self {
            grid_range: 10.0,
            grid_weight: 0.3,
            alignment_range: 15.0,
            alignment_weight: 0.4,
            repulsion_weight: 2.0,
            damping: 0.7,
            margin: HARD_MARGIN,
        }
    }
}

impl MagneticForces {
    /// Create a magnetic model with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the weight of the grid attraction
    pub fn set_grid_weight(&mut self, weight: f32) -> &mut Self {
        self.grid_weight = weight;
        self
    }

    /// Set the weight of the edge alignment attraction
    pub fn set_alignment_weight(&mut self, weight: f32) -> &mut Self {
        self.alignment_weight = weight;
        self
    }

    /// Set the weight of the overlap repulsion
    pub fn set_repulsion_weight(&mut self, weight: f32) -> &mut Self {
        self.repulsion_weight = weight;
        self
    }

    /// Set the damping factor applied to the summed forces
    pub fn set_damping(&mut self, damping: f32) -> &mut Self {
        self.damping = damping;
        self
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    fn grid_force(&self, rect: Rect, canvas: Canvas) -> Vector {
        let grid = canvas.grid_size();
        let pull = |value: i32| {
            let residual = (geometry::snap(value, grid) - value) as f32;
            if residual.abs() <= self.grid_range {
                residual * self.grid_weight
            } else {
                0.0
            }
        };
        Vector::new(pull(rect.x()), pull(rect.y()))
    }

    fn alignment_force(&self, rect: Rect, others: &[Rect]) -> Vector {
        let pull = |delta: i32| {
            let distance = delta.abs() as f32;
            if delta != 0 && distance <= self.alignment_range {
                delta as f32 * self.alignment_weight
            } else {
                0.0
            }
        };

        others.iter().fold(Vector::default(), |force, other| {
            force.add(Vector::new(
                pull(other.x() - rect.x()) + pull(other.right() - rect.right()),
                pull(other.y() - rect.y()) + pull(other.bottom() - rect.bottom()),
            ))
        })
    }

    fn repulsion_force(&self, rect: Rect, others: &[Rect]) -> Vector {
        others.iter().fold(Vector::default(), |force, &other| {
            let overlap = geometry::overlap(rect, other, self.margin);
            if !overlap.is_overlapping() {
                return force;
            }

            let axis = overlap.min_axis();
            let push = self.repulsion_weight * overlap.depth(axis) as f32;
            match axis {
                Axis::Horizontal => {
                    force.add(Vector::new(push * away(rect.center_x(), other.center_x()), 0.0))
                }
                Axis::Vertical => {
                    force.add(Vector::new(0.0, push * away(rect.center_y(), other.center_y())))
                }
            }
        })
    }
}

impl ForceModel for MagneticForces {
    fn displacement(&self, rect: Rect, others: &[Rect], canvas: Canvas) -> Vector {
        self.grid_force(rect, canvas)
            .add(self.alignment_force(rect, others))
            .add(self.repulsion_force(rect, others))
            .scale(self.damping)
    }
}

/// Direction pointing from `other` towards `own`; coincident centers push
/// towards the positive axis.
fn away(own: f32, other: f32) -> f32 {
    if own < other { -1.0 } else { 1.0 }
}
