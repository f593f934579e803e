//! Secondary particles derived from a parent descriptor.
//!
//! A trail droplet follows a droplet, an impact throws off sub-droplets, and
//! splatters and edge drips grow secondary drips. Each secondary particle is
//! a descriptor of its own, derived deterministically from its parent and
//! rendered with its own [`Animate`] implementation, usually with a time
//! offset and reduced scale or opacity.
//!
//! # Example
//!
//! ```ignore
//! let droplets = spawn::generate(120)?;
//! let trails = sub_emitter::derive_trails(&droplets);
//! for trail in &trails {
//!     let frame = trail.frame(progress);
//! }
//! ```

use crate::descriptor::{DripDescriptor, ParticleDescriptor, SplatterDescriptor};
use crate::kinematics::{
    impact_progress, splatter_fade, spread_progress, unit, Animate, Progress, RenderFrame, SPLATTER_ONSET,
};
use crate::spawn::SpawnContext;
use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

/// Progress lag of a trail behind its droplet.
pub const TRAIL_LAG: f32 = 0.015;
/// Trails are only drawn while their local progress is inside this window.
pub const TRAIL_WINDOW: (f32, f32) = (0.2, 0.8);
const TRAIL_REACH: f32 = 0.85;
const TRAIL_LIFT_PX: f32 = 10.0;
const TRAIL_SCALE: f32 = 0.6;
/// Trail width as a fraction of the parent droplet's size.
const TRAIL_WIDTH: f32 = 0.3;
/// Trail height as a fraction of the parent droplet's size.
const TRAIL_HEIGHT: f32 = 0.4;
const TRAIL_OPACITY: f32 = 0.5;

const SUB_DROPLET_DISTANCE: f64 = 1.618;
const SUB_DROPLET_SIZE: f64 = 2.718;
const SUB_DROPLET_STAGGER: f32 = 0.02;

/// Progress after impact before drips start running.
const DRIP_START: f32 = 0.15;
const DRIP_RATE: f32 = 1.8;
const SECONDARY_DRIP_START: f32 = 0.3;

/// A smaller droplet trailing a larger one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailDescriptor {
    pub parent_index: u32,
    /// The trail flies as a droplet of its own.
    pub body: ParticleDescriptor,
}

/// Derive the trail for a droplet, if it has one.
pub fn derive_trail(parent: &ParticleDescriptor) -> Option<TrailDescriptor> {
    if !parent.has_trail {
        return None;
    }
    Some(TrailDescriptor {
        parent_index: parent.index,
        body: ParticleDescriptor {
            distance: parent.distance * TRAIL_REACH,
            gravity: parent.gravity * TRAIL_REACH,
            size: parent.size * TRAIL_WIDTH,
            elongation: TRAIL_HEIGHT / TRAIL_WIDTH,
            delay: parent.delay + TRAIL_LAG,
            rotation: 0.0,
            spin: 0.0,
            surface_tension: 1.0,
            has_trail: false,
            ..*parent
        },
    })
}

/// Trails for every droplet that has one, in droplet order.
pub fn derive_trails(droplets: &[ParticleDescriptor]) -> Vec<TrailDescriptor> {
    droplets.iter().filter_map(derive_trail).collect()
}

impl Animate for TrailDescriptor {
    fn extent(&self) -> Vec2 {
        self.body.extent()
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let body = self.body.frame(progress);
        let (start, end) = TRAIL_WINDOW;
        if !(body.local_progress > start && body.local_progress < end) {
            return RenderFrame::HIDDEN;
        }
        RenderFrame {
            position: body.position - Vec2::new(0.0, TRAIL_LIFT_PX),
            scale: body.scale * TRAIL_SCALE,
            rotation: body.rotation,
            opacity: body.opacity * TRAIL_OPACITY,
            local_progress: body.local_progress,
        }
    }
}

/// A droplet thrown off by a splatter's impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubDroplet {
    pub parent_index: u32,
    pub slot: u32,
    /// Global progress at which the parent splatter starts.
    pub onset: f32,
    /// Final offset from the splatter centre.
    pub offset: Vec2,
    pub size: f32,
    /// Delay within the parent's spread progress.
    pub delay: f32,
}

/// Fan of sub-droplets for a splatter.
pub fn derive_sub_droplets(splatter: &SplatterDescriptor) -> Vec<SubDroplet> {
    let count = splatter.sub_droplets;
    (0..count)
        .map(|slot| {
            let ctx = SpawnContext::new(slot, count);
            let angle = (splatter.spread_angle * (ctx.progress() - 0.5)).to_radians() + FRAC_PI_2;
            let dist = 15.0 + ctx.factor(SUB_DROPLET_DISTANCE) * 35.0;
            SubDroplet {
                parent_index: splatter.index,
                slot,
                onset: SPLATTER_ONSET + splatter.delay,
                offset: Vec2::new(angle.cos() * dist, angle.sin() * dist + dist * 0.3),
                size: 4.0 + ctx.factor(SUB_DROPLET_SIZE) * 8.0,
                delay: slot as f32 * SUB_DROPLET_STAGGER,
            }
        })
        .collect()
}

impl Animate for SubDroplet {
    fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let adjusted = (progress.get() - self.onset).max(0.0);
        let drop = (spread_progress(adjusted) - self.delay).max(0.0);
        if drop <= 0.0 {
            return RenderFrame::HIDDEN;
        }
        RenderFrame {
            position: self.offset * drop,
            scale: Vec2::new(1.0, 1.2),
            rotation: 0.0,
            opacity: unit((0.8 - drop * 0.6) * splatter_fade(progress)),
            local_progress: drop,
        }
    }
}

/// Which of a splatter's two drips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DripRole {
    Main,
    Secondary,
}

/// A drip running down from a splatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplatterDrip {
    pub parent_index: u32,
    pub role: DripRole,
    pub onset: f32,
    /// Diameter of the parent splatter.
    pub splatter_size: f32,
    /// Full drip length in pixels.
    pub length: f32,
    pub width: f32,
}

/// The main and secondary drips of a splatter.
pub fn derive_splatter_drips(splatter: &SplatterDescriptor) -> [SplatterDrip; 2] {
    let drip = |role, length, width| SplatterDrip {
        parent_index: splatter.index,
        role,
        onset: SPLATTER_ONSET + splatter.delay,
        splatter_size: splatter.size,
        length,
        width,
    };
    [
        drip(DripRole::Main, splatter.drip_length, splatter.drip_width),
        drip(DripRole::Secondary, splatter.drip_length * 0.5, splatter.drip_width * 0.6),
    ]
}

impl Animate for SplatterDrip {
    fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.length)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let adjusted = (progress.get() - self.onset).max(0.0);
        let impact = impact_progress(adjusted);
        let drip = (adjusted - DRIP_START).max(0.0) * DRIP_RATE;

        let (run, top, left, opacity) = match self.role {
            DripRole::Main => (drip, 0.5, -0.05, 1.0 - adjusted * 0.4),
            DripRole::Secondary => {
                if drip <= SECONDARY_DRIP_START {
                    return RenderFrame::HIDDEN;
                }
                ((drip - SECONDARY_DRIP_START) * 1.4, 0.6, 0.1, 0.8 - adjusted * 0.4)
            }
        };
        if run <= 0.0 {
            return RenderFrame::HIDDEN;
        }

        // Drips hang from inside the blob, whose top sits 0.375 sizes above centre.
        let size = self.splatter_size * impact;
        let top = size * (top - 0.375);
        let length = self.length * run;

        RenderFrame {
            position: Vec2::new(size * left, top + length * 0.5),
            scale: Vec2::new(1.0, run),
            rotation: 0.0,
            opacity: unit(opacity * splatter_fade(progress)),
            local_progress: run.min(1.0),
        }
    }
}

/// The bulging droplet at the tip of an edge drip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DripTip {
    pub drip: DripDescriptor,
}

pub fn derive_drip_tip(drip: &DripDescriptor) -> DripTip {
    DripTip { drip: *drip }
}

impl Animate for DripTip {
    fn extent(&self) -> Vec2 {
        Vec2::new(self.drip.width * 1.8, self.drip.width * 2.2)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let run = (progress.get() - self.drip.delay).max(0.0);
        if run <= 0.1 {
            return RenderFrame::HIDDEN;
        }
        let length = self.drip.length(progress);

        RenderFrame {
            position: Vec2::new(self.drip.wobble(progress), length - self.drip.width * 0.1),
            scale: Vec2::ONE,
            rotation: 0.0,
            opacity: unit(1.0 - run * 0.3),
            local_progress: run.min(1.0),
        }
    }
}
