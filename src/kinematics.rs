//! Closed-form kinematics.
//!
//! Every particle's frame is a pure function of its descriptor and the
//! progress scalar. Nothing is integrated and nothing is stored between
//! frames, so any progress value can be rendered in any order.
//!
//! Positions are pixels in screen space (y grows downward) relative to the
//! particle's anchor; [`crate::compositor`] places anchors on the viewport.
//! `scale` multiplies the extent reported by [`Animate::extent`].

use crate::descriptor::{
    CausticDescriptor, DripDescriptor, ParticleDescriptor, SplatterDescriptor, StreamDescriptor,
};
use crate::error::SplashError;
use glam::Vec2;

/// Frames below this opacity need not be painted.
pub const VISIBILITY_EPSILON: f32 = 0.01;

/// Exponent of the droplet ease (`adjusted^k`, fast start then decelerate).
pub const EASE_EXPONENT: f32 = 0.5;
/// Multiplier turning eased progress into local flight progress.
///
/// A slower scale of 2.2 leaves the slowest droplets short of `local = 1` at
/// progress 1. With 2.8 the slowest preset speed (0.4) at the longest delay
/// still reaches its terminal frame, so droplets fly somewhat faster.
pub const DROPLET_TIME_SCALE: f32 = 2.8;
/// Downward pixels per unit gravity at terminal progress.
pub const GRAVITY_PX: f32 = 280.0;
/// Horizontal damping at terminal progress.
pub const AIR_RESISTANCE: f32 = 0.15;
pub const STREAM_TIME_SCALE: f32 = 2.8;
/// Progress at which splatters start hitting the glass.
pub const SPLATTER_ONSET: f32 = 0.25;

const FADE_IN_WINDOW: f32 = 0.02;
const FADE_POWER: f32 = 1.5;
const DROPLET_FADE_START: f32 = 0.5;
const STREAM_FADE_IN_WINDOW: f32 = 0.04;
const STREAM_FADE_START: f32 = 0.45;
const STREAM_ROOT_PX: f32 = 40.0;
const DRIP_SPEED_PX: f32 = 400.0;
const CAUSTIC_LIFETIME: f32 = 0.6;

/// Global animation progress in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Progress(f32);

impl Progress {
    pub const ZERO: Progress = Progress(0.0);
    pub const ONE: Progress = Progress(1.0);

    /// Checked constructor; rejects values outside `[0, 1]` and NaN.
    pub fn new(value: f32) -> Result<Self, SplashError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(SplashError::InvalidProgress(value))
        }
    }

    /// Clamp into `[0, 1]`; NaN becomes zero.
    pub fn clamped(value: f32) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
}

/// One particle's transform for one paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    /// Offset from the particle's anchor in pixels.
    pub position: Vec2,
    /// Multiplier of the particle's base extent (width, height).
    pub scale: Vec2,
    /// Degrees, clockwise on screen.
    pub rotation: f32,
    /// Always within `[0, 1]`.
    pub opacity: f32,
    /// The particle's own progress after delay, easing and speed.
    pub local_progress: f32,
}

impl RenderFrame {
    /// Inert frame for particles that have not started yet.
    pub const HIDDEN: RenderFrame = RenderFrame {
        position: Vec2::ZERO,
        scale: Vec2::ZERO,
        rotation: 0.0,
        opacity: 0.0,
        local_progress: 0.0,
    };

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity >= VISIBILITY_EPSILON
    }
}

/// Anything that can be rendered from a progress value.
pub trait Animate {
    /// Base extent in pixels (width, height) that `RenderFrame::scale` multiplies.
    fn extent(&self) -> Vec2;

    /// Transform at the given progress.
    fn frame(&self, progress: Progress) -> RenderFrame;
}

/// Transform a droplet, clamping out-of-range progress.
pub fn transform(descriptor: &ParticleDescriptor, progress: f32) -> RenderFrame {
    descriptor.frame(Progress::clamped(progress))
}

/// Clamp into `[0, 1]`, mapping NaN to zero.
#[inline]
pub(crate) fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[inline]
fn fade_out(local: f32) -> f32 {
    (1.0 - local).max(0.0).powf(FADE_POWER) * 2.0
}

impl ParticleDescriptor {
    /// Local flight progress for a delay-adjusted progress value.
    #[inline]
    pub fn local_progress(&self, adjusted: f32) -> f32 {
        (adjusted.powf(EASE_EXPONENT) * self.speed * DROPLET_TIME_SCALE).min(1.0)
    }

    /// Displacement along the launch direction, without gravity sag.
    #[inline]
    pub fn launch_offset(&self, local: f32) -> Vec2 {
        let air = 1.0 - local * AIR_RESISTANCE;
        Vec2::new(
            self.angle.cos() * self.distance * local * air,
            self.angle.sin() * self.distance * local,
        )
    }
}

impl Animate for ParticleDescriptor {
    fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let adjusted = (progress.get() - self.delay).max(0.0);
        if adjusted <= 0.0 {
            return RenderFrame::HIDDEN;
        }
        let local = self.local_progress(adjusted);

        let gravity_offset = local * local * self.gravity * GRAVITY_PX;
        let position = self.launch_offset(local) + Vec2::new(0.0, gravity_offset);

        let opacity = if adjusted < FADE_IN_WINDOW {
            adjusted / FADE_IN_WINDOW
        } else if local > DROPLET_FADE_START {
            fade_out(local)
        } else {
            1.0
        };

        let perspective = (0.4 + local * 0.7) * (0.8 + self.z_depth * 0.6);
        // Faster droplets flatten along their motion; surface tension resists.
        let velocity = self.speed * (1.0 - local * 0.3);
        let deformation = 1.0 + velocity * 0.15 * (1.0 - self.surface_tension);

        let run = if position.x != 0.0 { position.x } else { 1.0 };
        let motion_angle = (gravity_offset + 1.0).atan2(run).to_degrees();

        RenderFrame {
            position,
            scale: Vec2::new(perspective * deformation, perspective * self.elongation / deformation),
            rotation: self.rotation + motion_angle + self.spin * local,
            opacity: unit(opacity),
            local_progress: local,
        }
    }
}

impl Animate for StreamDescriptor {
    fn extent(&self) -> Vec2 {
        Vec2::new(self.length, self.width)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let p = progress.get();
        if p <= 0.0 {
            return RenderFrame::HIDDEN;
        }
        let local = (p * self.speed * STREAM_TIME_SCALE).min(1.0);

        let root = STREAM_ROOT_PX * local;
        let bend = local * local * 0.3;
        let start = Vec2::new(self.angle.cos() * root, self.angle.sin() * root + bend * root);

        let rotation = self.angle.to_degrees() + bend * 20.0;
        let heading = rotation.to_radians();
        let half_length = self.length * local * 0.5;
        let center = start + Vec2::new(heading.cos(), heading.sin()) * half_length;

        let opacity = if p < STREAM_FADE_IN_WINDOW {
            p / STREAM_FADE_IN_WINDOW
        } else if local > STREAM_FADE_START {
            fade_out(local) * self.opacity
        } else {
            self.opacity
        };

        RenderFrame {
            position: center,
            scale: Vec2::new(local, 1.0 - local * self.taper * 0.5),
            rotation,
            opacity: unit(opacity),
            local_progress: local,
        }
    }
}

/// Fade applied to everything a splatter owns.
#[inline]
pub fn splatter_fade(progress: Progress) -> f32 {
    let p = progress.get();
    if p > 0.7 {
        (1.0 - (p - 0.7) * 3.0).max(0.0)
    } else {
        1.0
    }
}

impl SplatterDescriptor {
    /// Progress after the global onset and this splatter's delay.
    #[inline]
    pub fn adjusted(&self, progress: Progress) -> f32 {
        (progress.get() - SPLATTER_ONSET - self.delay).max(0.0)
    }
}

/// How far a splatter's impact has grown.
#[inline]
pub fn impact_progress(adjusted: f32) -> f32 {
    (adjusted * 5.0).min(1.0)
}

/// How far a splatter's sub-droplets have been thrown.
#[inline]
pub fn spread_progress(adjusted: f32) -> f32 {
    (adjusted * 3.0).min(1.0)
}

impl Animate for SplatterDescriptor {
    fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let adjusted = self.adjusted(progress);
        let impact = impact_progress(adjusted);
        if impact <= 0.0 {
            return RenderFrame::HIDDEN;
        }
        let swell = 1.0 + spread_progress(adjusted) * 0.2;

        RenderFrame {
            position: Vec2::ZERO,
            scale: Vec2::new(impact, impact * 0.75) * swell,
            rotation: 0.0,
            opacity: unit((1.0 - adjusted * 0.7) * splatter_fade(progress)),
            local_progress: impact,
        }
    }
}

impl DripDescriptor {
    #[inline]
    fn drip_progress(&self, progress: Progress) -> f32 {
        (progress.get() - self.delay).max(0.0)
    }

    /// Current drip length in pixels.
    #[inline]
    pub fn length(&self, progress: Progress) -> f32 {
        (self.drip_progress(progress) * DRIP_SPEED_PX).min(self.max_height)
    }

    /// Sideways wobble in pixels.
    #[inline]
    pub fn wobble(&self, progress: Progress) -> f32 {
        (self.drip_progress(progress) * std::f32::consts::TAU).sin() * 2.0
    }
}

impl Animate for DripDescriptor {
    fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.max_height)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let drip = self.drip_progress(progress);
        if drip <= 0.0 {
            return RenderFrame::HIDDEN;
        }
        let length = self.length(progress);

        RenderFrame {
            // Hangs from the anchor on the top edge.
            position: Vec2::new(self.wobble(progress), length * 0.5),
            scale: Vec2::new(1.0, length / self.max_height),
            rotation: 0.0,
            opacity: unit(1.0 - drip * 0.4),
            local_progress: (length / self.max_height).min(1.0),
        }
    }
}

impl Animate for CausticDescriptor {
    fn extent(&self) -> Vec2 {
        Vec2::splat(self.size)
    }

    fn frame(&self, progress: Progress) -> RenderFrame {
        let c = (progress.get() - self.delay).max(0.0);
        if c <= 0.0 || c > CAUSTIC_LIFETIME {
            return RenderFrame::HIDDEN;
        }
        let grow = 1.0 + c * 0.5;

        RenderFrame {
            // Anchored at the top-left corner.
            position: Vec2::splat(self.size * grow * 0.5),
            scale: Vec2::splat(grow),
            rotation: c * 45.0,
            opacity: unit((c * std::f32::consts::PI / CAUSTIC_LIFETIME).sin() * 0.7),
            local_progress: c / CAUSTIC_LIFETIME,
        }
    }
}
