//! Scene composition.
//!
//! A [`Scene`] owns every descriptor family, generated once from a
//! [`SplashConfig`]. [`Scene::render`] turns a progress value into a flat,
//! back-to-front list of [`Sprite`]s in pixels relative to the viewport
//! centre, plus the full-screen [`Backdrop`] intensities. Rendering is pure;
//! the same progress always yields the same frame.
//!
//! Everything the scene paints is multiplied by the global fade, which takes
//! the whole splash from fully visible at `p = 0.7` to gone at `p ≈ 1`.

use crate::config::SplashConfig;
use crate::descriptor::{
    CausticDescriptor, Category, DripDescriptor, ParticleDescriptor, SplatterDescriptor, StreamDescriptor,
};
use crate::error::SplashError;
use crate::kinematics::{Animate, Progress, RenderFrame, VISIBILITY_EPSILON};
use crate::spawn;
use crate::sub_emitter::{self, DripTip, SplatterDrip, SubDroplet, TrailDescriptor};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;

const FADE_START: f32 = 0.7;
const FADE_RATE: f32 = 3.33;

const CENTRAL_MASS_PX: Vec2 = Vec2::new(200.0, 250.0);
const SHEET_PX: f32 = 100.0;
const SHEET_PEAK_ALPHA: f32 = 0.4;
const RIPPLE_PX: f32 = 80.0;
const RIPPLE_COUNT: u32 = 5;
const RIPPLE_STAGGER: f32 = 0.04;

/// Mist overlay spots: centre in percent of the viewport, radius as a
/// fraction of the larger dimension, and strength per unit of mist.
const MIST_SPOTS: [(f32, f32, f32, f32); 5] = [
    (25.0, 35.0, 0.25, 0.18),
    (75.0, 25.0, 0.20, 0.15),
    (50.0, 65.0, 0.30, 0.12),
    (15.0, 70.0, 0.22, 0.10),
    (85.0, 60.0, 0.18, 0.10),
];

/// Fade applied to the whole scene.
#[inline]
pub fn global_fade(progress: Progress) -> f32 {
    let p = progress.get();
    if p > FADE_START {
        (1.0 - (p - FADE_START) * FADE_RATE).max(0.0)
    } else {
        1.0
    }
}

/// Surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Point given in percent of the viewport, measured from the top-left
    /// corner, as pixels from the centre.
    #[inline]
    pub fn from_corner(&self, x_percent: f32, y_percent: f32) -> Vec2 {
        Vec2::new(x_percent, y_percent) * 0.01 * self.size() - self.size() * 0.5
    }

    /// Point given in percent of the viewport, measured from the centre.
    #[inline]
    pub fn from_center(&self, x_percent: f32, y_percent: f32) -> Vec2 {
        Vec2::new(x_percent, y_percent) * 0.01 * self.size()
    }
}

/// What a sprite depicts; selects the mask and colour in the shader.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Droplet = 0,
    Mist = 1,
    Trail = 2,
    Stream = 3,
    Splatter = 4,
    SubDroplet = 5,
    Drip = 6,
    DripTip = 7,
    Caustic = 8,
    CentralMass = 9,
    Sheet = 10,
    Ripple = 11,
    /// Soft radial wash (atmosphere and mist spots).
    Wash = 12,
    /// Vertical sheen of water left on the glass.
    Sheen = 13,
}

/// One textured quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Pixels from the viewport centre, y down.
    pub center: Vec2,
    /// Full width and height in pixels.
    pub size: Vec2,
    /// Degrees, clockwise.
    pub rotation: f32,
    pub opacity: f32,
    /// Kind-specific shading parameter (depth, ring thickness, highlight).
    pub tint: f32,
}

/// GPU layout of a [`Sprite`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    /// Radians.
    pub rotation: f32,
    pub opacity: f32,
    pub tint: f32,
    pub kind: u32,
}

impl Sprite {
    pub fn to_instance(&self) -> SpriteInstance {
        SpriteInstance {
            center: self.center.to_array(),
            size: self.size.to_array(),
            rotation: self.rotation.to_radians(),
            opacity: self.opacity,
            tint: self.tint,
            kind: self.kind as u32,
        }
    }
}

/// Full-screen layer intensities, already multiplied by the global fade.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Backdrop {
    /// Peak alpha of the blue haze behind the splash.
    pub atmosphere: f32,
    /// Strength of the fine mist spray overlay.
    pub mist: f32,
    /// Strongest alpha of the water left on the glass.
    pub wetness: f32,
}

impl Backdrop {
    pub fn at(progress: Progress) -> Self {
        let fade = global_fade(progress);
        let raw = Self::unfaded(progress);
        Self {
            atmosphere: raw.atmosphere * fade,
            mist: raw.mist * fade,
            wetness: raw.wetness * fade,
        }
    }

    fn unfaded(progress: Progress) -> Self {
        let p = progress.get();
        let atmosphere = 0.15 * p * if p > 0.1 { 1.0 } else { p * 10.0 };
        let mist = if p > 0.15 {
            (p - 0.15) * (1.0 - (p - 0.55) * 2.2).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let wetness = if p > 0.35 {
            ((p - 0.35) * 0.25).min(0.1) * (1.0 - (p - 0.7) * 3.0).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            atmosphere,
            mist,
            wetness,
        }
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    pub progress: Progress,
    pub global_fade: f32,
    pub backdrop: Backdrop,
    /// Back to front.
    pub sprites: Vec<Sprite>,
}

impl SceneFrame {
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn instances(&self) -> Vec<SpriteInstance> {
        self.sprites.iter().map(Sprite::to_instance).collect()
    }
}

/// Central water mass: scale and opacity before the global fade.
pub fn central_mass(progress: Progress) -> (f32, f32) {
    let p = progress.get();
    let scale = if p < 0.15 {
        1.0 + p * 12.0
    } else {
        (2.8 - (p - 0.15) * 5.0).max(0.0)
    };
    let opacity = if p < 0.25 {
        (p * 6.0).min(1.0)
    } else {
        (1.0 - (p - 0.25) * 2.5).max(0.0)
    };
    (scale, opacity)
}

/// Expanding water sheet: scale and opacity before the global fade.
pub fn sheet(progress: Progress) -> (f32, f32) {
    let s = (progress.get() - 0.1).max(0.0);
    let opacity = if s < 0.25 {
        s * 2.5
    } else {
        (0.65 - (s - 0.25) * 1.8).max(0.0)
    };
    (s * 18.0, opacity)
}

/// Impact ripple `ring` (1 to 5): scale and opacity before the global fade.
pub fn ripple(progress: Progress, ring: u32) -> (f32, f32) {
    let r = (progress.get() - ring as f32 * RIPPLE_STAGGER).max(0.0);
    (r * (ring as f32 + 4.0), (0.5 - r * 0.8).max(0.0))
}

/// All generated descriptors for one splash.
#[derive(Debug, Clone)]
pub struct Scene {
    droplets: Vec<ParticleDescriptor>,
    trails: Vec<TrailDescriptor>,
    streams: Vec<StreamDescriptor>,
    splatters: Vec<SplatterDescriptor>,
    sub_droplets: Vec<SubDroplet>,
    splatter_drips: Vec<SplatterDrip>,
    drips: Vec<DripDescriptor>,
    tips: Vec<DripTip>,
    caustics: Vec<CausticDescriptor>,
}

impl Scene {
    /// Validate the configuration and generate every family.
    pub fn new(config: &SplashConfig) -> Result<Self, SplashError> {
        config.validate()?;

        let droplets = spawn::generate_with(config.droplets.count.get(), &config.droplets)?;
        let splatters = spawn::generate_splatters(config.splatters.get())?;
        let drips = spawn::generate_drips(config.drips.get())?;

        let scene = Self {
            trails: sub_emitter::derive_trails(&droplets),
            sub_droplets: splatters.iter().flat_map(sub_emitter::derive_sub_droplets).collect(),
            splatter_drips: splatters.iter().flat_map(sub_emitter::derive_splatter_drips).collect(),
            tips: drips.iter().map(sub_emitter::derive_drip_tip).collect(),
            streams: spawn::generate_streams(config.streams.get())?,
            caustics: spawn::generate_caustics(config.caustics.get())?,
            droplets,
            splatters,
            drips,
        };
        log::debug!(
            "scene: {} droplets, {} trails, {} streams, {} splatters, {} sub-droplets, {} drips, {} caustics",
            scene.droplets.len(),
            scene.trails.len(),
            scene.streams.len(),
            scene.splatters.len(),
            scene.sub_droplets.len(),
            scene.drips.len(),
            scene.caustics.len()
        );
        Ok(scene)
    }

    pub fn droplets(&self) -> &[ParticleDescriptor] {
        &self.droplets
    }

    pub fn splatters(&self) -> &[SplatterDescriptor] {
        &self.splatters
    }

    /// Upper bound on the sprites a frame can hold.
    pub fn capacity(&self) -> usize {
        self.droplets.len()
            + self.trails.len()
            + self.streams.len()
            + self.splatters.len()
            + self.sub_droplets.len()
            + self.splatter_drips.len()
            + self.drips.len()
            + self.tips.len()
            + self.caustics.len()
            + RIPPLE_COUNT as usize
            + MIST_SPOTS.len()
            + 4
    }

    /// Compose the frame for `progress`.
    pub fn render(&self, progress: Progress, viewport: Viewport) -> SceneFrame {
        let fade = global_fade(progress);
        if fade <= 0.0 {
            return SceneFrame {
                progress,
                global_fade: 0.0,
                backdrop: Backdrop::default(),
                sprites: Vec::new(),
            };
        }

        let backdrop = Backdrop::at(progress);
        let wash = Backdrop::unfaded(progress);
        let mut layer = Layer {
            sprites: Vec::with_capacity(self.capacity()),
            fade,
        };

        for caustic in &self.caustics {
            let anchor = viewport.from_corner(caustic.x_percent, caustic.y_percent);
            layer.push_frame(SpriteKind::Caustic, caustic, caustic.frame(progress), anchor, caustic.intensity);
        }

        let reach = viewport.size().max_element();
        layer.push_raw(SpriteKind::Wash, Vec2::ZERO, Vec2::splat(reach * 1.4), wash.atmosphere, 0.0);

        let (scale, opacity) = central_mass(progress);
        layer.push_raw(SpriteKind::CentralMass, Vec2::ZERO, CENTRAL_MASS_PX * scale, opacity, 0.9);

        let (scale, opacity) = sheet(progress);
        layer.push_raw(SpriteKind::Sheet, Vec2::ZERO, Vec2::splat(SHEET_PX * scale), opacity, SHEET_PEAK_ALPHA);

        for ring in 1..=RIPPLE_COUNT {
            let (scale, opacity) = ripple(progress, ring);
            let diameter = RIPPLE_PX * scale;
            // Border thickness as a fraction of the radius.
            let thickness = if diameter > 0.0 {
                ((3.0 - ring as f32 * 0.4) / (diameter * 0.5)).min(1.0)
            } else {
                0.0
            };
            layer.push_raw(SpriteKind::Ripple, Vec2::ZERO, Vec2::splat(diameter), opacity, thickness);
        }

        for stream in &self.streams {
            layer.push_frame(SpriteKind::Stream, stream, stream.frame(progress), Vec2::ZERO, 0.0);
        }

        for (droplet, trail) in self.droplets_with_trails() {
            let kind = if droplet.category == Category::Mist {
                SpriteKind::Mist
            } else {
                SpriteKind::Droplet
            };
            layer.push_frame(kind, droplet, droplet.frame(progress), Vec2::ZERO, droplet.z_depth);
            if let Some(trail) = trail {
                layer.push_frame(SpriteKind::Trail, trail, trail.frame(progress), Vec2::ZERO, droplet.z_depth);
            }
        }

        for splatter in &self.splatters {
            let anchor = viewport.from_center(splatter.x_percent, splatter.y_percent);
            layer.push_frame(SpriteKind::Splatter, splatter, splatter.frame(progress), anchor, 0.0);
            let index = splatter.index;
            for drop in self.sub_droplets.iter().filter(|d| d.parent_index == index) {
                layer.push_frame(SpriteKind::SubDroplet, drop, drop.frame(progress), anchor, 0.0);
            }
            for drip in self.splatter_drips.iter().filter(|d| d.parent_index == index) {
                layer.push_frame(SpriteKind::Drip, drip, drip.frame(progress), anchor, 0.0);
            }
        }

        for (drip, tip) in self.drips.iter().zip(&self.tips) {
            let anchor = viewport.from_corner(drip.x_percent, 0.0);
            layer.push_frame(SpriteKind::Drip, drip, drip.frame(progress), anchor, 0.0);
            layer.push_frame(SpriteKind::DripTip, tip, tip.frame(progress), anchor, 0.0);
        }

        for (x, y, radius, strength) in MIST_SPOTS {
            let center = viewport.from_corner(x, y);
            let diameter = Vec2::splat(reach * radius * 2.0);
            layer.push_raw(SpriteKind::Wash, center, diameter, wash.mist * strength, 0.0);
        }

        layer.push_raw(SpriteKind::Sheen, Vec2::ZERO, viewport.size(), wash.wetness, 0.0);

        SceneFrame {
            progress,
            global_fade: fade,
            backdrop,
            sprites: layer.sprites,
        }
    }

    fn droplets_with_trails(&self) -> impl Iterator<Item = (&ParticleDescriptor, Option<&TrailDescriptor>)> {
        let mut trails = self.trails.iter().peekable();
        self.droplets.iter().map(move |droplet| {
            let trail = trails.next_if(|t| t.parent_index == droplet.index);
            (droplet, trail)
        })
    }
}

/// Sprite list under construction.
struct Layer {
    sprites: Vec<Sprite>,
    fade: f32,
}

impl Layer {
    fn push_frame(&mut self, kind: SpriteKind, particle: &impl Animate, frame: RenderFrame, anchor: Vec2, tint: f32) {
        if !frame.is_visible() {
            return;
        }
        let size = particle.extent() * frame.scale;
        self.push(Sprite {
            kind,
            center: anchor + frame.position,
            size,
            rotation: frame.rotation,
            opacity: frame.opacity * self.fade,
            tint,
        });
    }

    fn push_raw(&mut self, kind: SpriteKind, center: Vec2, size: Vec2, opacity: f32, tint: f32) {
        self.push(Sprite {
            kind,
            center,
            size,
            rotation: 0.0,
            opacity: opacity.clamp(0.0, 1.0) * self.fade,
            tint,
        });
    }

    fn push(&mut self, sprite: Sprite) {
        if sprite.opacity < VISIBILITY_EPSILON || sprite.size.x <= 0.0 || sprite.size.y <= 0.0 {
            return;
        }
        self.sprites.push(sprite);
    }
}
