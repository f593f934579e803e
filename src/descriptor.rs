//! Immutable particle descriptors.
//!
//! Descriptors are produced once by the generators in [`crate::spawn`] and
//! [`crate::sub_emitter`] and never mutated afterwards. Every per-frame value
//! is derived from a descriptor and the progress scalar by
//! [`crate::kinematics`].

use serde::{Deserialize, Serialize};

/// Droplet size class.
///
/// Larger droplets are bigger, slower and travel a shorter distance; mist is
/// tiny, fast and travels furthest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Large,
    Medium,
    Small,
    Mist,
}

impl Category {
    /// All categories in threshold order.
    pub const ALL: [Category; 4] = [Category::Large, Category::Medium, Category::Small, Category::Mist];
}

/// A splash droplet.
///
/// Angles are radians, `rotation` and `spin` are degrees, lengths are pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleDescriptor {
    /// Generation index; secondary particles are derived from it.
    pub index: u32,
    /// Launch direction in radians (screen space, y down).
    pub angle: f32,
    pub category: Category,
    /// Travel distance at terminal progress.
    pub distance: f32,
    /// Base sprite width.
    pub size: f32,
    /// Speed multiplier applied to the eased progress.
    pub speed: f32,
    /// Height/width ratio of the sprite.
    pub elongation: f32,
    /// Base rotation in degrees.
    pub rotation: f32,
    /// Progress offset before the droplet starts moving.
    pub delay: f32,
    /// Gravity multiplier.
    pub gravity: f32,
    /// Perspective depth in `[0, 1)`; larger is closer.
    pub z_depth: f32,
    /// Resistance to velocity deformation.
    pub surface_tension: f32,
    /// Degrees of tumbling over the full flight.
    pub spin: f32,
    /// Whether a trail droplet follows this one.
    pub has_trail: bool,
}

impl Default for ParticleDescriptor {
    /// A neutral medium droplet flying right with no delay, gravity or spin.
    fn default() -> Self {
        Self {
            index: 0,
            angle: 0.0,
            category: Category::Medium,
            distance: 100.0,
            size: 20.0,
            speed: 1.0,
            elongation: 1.0,
            rotation: 0.0,
            delay: 0.0,
            gravity: 0.0,
            z_depth: 0.5,
            surface_tension: 1.0,
            spin: 0.0,
            has_trail: false,
        }
    }
}

/// A radial water stream bursting from the centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamDescriptor {
    pub index: u32,
    /// Direction in radians.
    pub angle: f32,
    /// Full stream length in pixels.
    pub length: f32,
    /// Stream thickness in pixels.
    pub width: f32,
    pub speed: f32,
    /// Peak opacity.
    pub opacity: f32,
    /// How much the stream thins as it extends.
    pub taper: f32,
}

/// A splash hitting the "glass" in front of the viewer.
///
/// Position is given in percent of the viewport, relative to its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatterDescriptor {
    pub index: u32,
    pub x_percent: f32,
    pub y_percent: f32,
    /// Blob diameter at full impact.
    pub size: f32,
    pub delay: f32,
    pub drip_length: f32,
    pub drip_width: f32,
    /// Number of sub-droplets thrown off by the impact.
    pub sub_droplets: u32,
    /// Fan angle of the sub-droplets in degrees.
    pub spread_angle: f32,
}

/// A drip running down from the top edge of the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DripDescriptor {
    pub index: u32,
    /// Horizontal position in percent of the viewport width.
    pub x_percent: f32,
    pub delay: f32,
    pub width: f32,
    pub max_height: f32,
}

/// A caustic light patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CausticDescriptor {
    pub index: u32,
    /// Top-left corner in percent of the viewport.
    pub x_percent: f32,
    pub y_percent: f32,
    pub size: f32,
    /// Highlight strength passed through to the sprite tint.
    pub intensity: f32,
    pub delay: f32,
}
