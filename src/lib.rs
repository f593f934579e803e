//! # Aquasplash - procedural scroll-driven water splash
//!
//! A splash of water that bursts toward the viewer as the user scrolls. The
//! whole animation is a pure function of one progress scalar in `[0, 1]`:
//! scroll input accumulates into progress, and every particle's transform is
//! computed in closed form from its immutable descriptor and that progress.
//!
//! ## Quick Start
//!
//! ```ignore
//! use aquasplash::prelude::*;
//!
//! fn main() -> Result<(), ViewerError> {
//!     Splash::new()
//!         .with_config(SplashConfig::bucket())
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Descriptors
//!
//! [`spawn`] generates droplets, streams, splatters, edge drips and caustics
//! deterministically: every "random" attribute is `frac(index * C)` for an
//! irrational constant `C`, so the same index always yields the same
//! particle. [`sub_emitter`] derives trails, sub-droplets and secondary drips
//! from their parents.
//!
//! ### Kinematics
//!
//! [`transform`] maps a droplet and a progress value to a [`RenderFrame`]
//! (offset, scale, rotation, opacity). Other families implement the same
//! [`Animate`] trait. Nothing is integrated, so frames can be rendered in
//! any order:
//!
//! ```ignore
//! let droplets = spawn::generate(120)?;
//! let frame = transform(&droplets[0], 0.4);
//! ```
//!
//! ### Progress
//!
//! [`SplashController`] accumulates wheel and touch deltas until the
//! configured scroll distance is reached, then latches at 1 and passes all
//! further input through to the host.
//!
//! ### Composition
//!
//! [`Scene`] renders every family at one progress value into a back-to-front
//! list of sprites, with the global fade applied to each layer.

pub mod compositor;
pub mod config;
pub mod controller;
pub mod descriptor;
pub mod error;
pub mod gpu;
pub mod input;
pub mod kinematics;
pub mod shader;
pub mod spawn;
pub mod sub_emitter;
pub mod viewer;

pub use glam::Vec2;

pub use compositor::{Backdrop, Scene, SceneFrame, Sprite, SpriteInstance, SpriteKind, Viewport};
pub use config::{AngleLayout, DropletConfig, SplashConfig};
pub use controller::{Disposition, InputKind, ScrollInput, SplashController, SplashState, DEFAULT_DURATION};
pub use descriptor::{
    CausticDescriptor, Category, DripDescriptor, ParticleDescriptor, SplatterDescriptor, StreamDescriptor,
};
pub use error::{GpuError, SplashError, ViewerError};
pub use input::ScrollInputTracker;
pub use kinematics::{transform, Animate, Progress, RenderFrame};
pub use spawn::{generate, ParticleCount, SpawnContext};
pub use viewer::Splash;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use aquasplash::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compositor::{Scene, SceneFrame, Viewport};
    pub use crate::config::SplashConfig;
    pub use crate::controller::{Disposition, ScrollInput, SplashController};
    pub use crate::descriptor::{Category, ParticleDescriptor};
    pub use crate::error::{SplashError, ViewerError};
    pub use crate::kinematics::{transform, Animate, Progress, RenderFrame};
    pub use crate::spawn;
    pub use crate::viewer::Splash;
    pub use crate::Vec2;
}
