//! Deterministic descriptor generation.
//!
//! There is no RNG here. Every "random" attribute is a pseudo-random factor
//! `frac(index * C)` for an irrational constant `C`, so the same index always
//! produces the same particle and a scene looks identical on every page view.
//!
//! ```ignore
//! let droplets = spawn::generate(120)?;
//! assert_eq!(droplets, spawn::generate(120)?);
//! ```

use crate::config::{AngleLayout, DropletConfig};
use crate::descriptor::{
    CausticDescriptor, Category, DripDescriptor, ParticleDescriptor, SplatterDescriptor, StreamDescriptor,
};
use crate::error::SplashError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::f32::consts::TAU;

/// Largest count any generator accepts.
pub const MAX_PARTICLE_COUNT: usize = 65_536;

// Droplet factor multipliers.
pub const GOLDEN_RATIO: f64 = 1.618033988749;
pub const EULER: f64 = 2.718281828459;
pub const PI_DIGITS: f64 = 3.141592653589;

// Stream factor multipliers.
pub const SQRT_2: f64 = 1.414213562373;
pub const SQRT_3: f64 = 1.732050807569;

/// Multiplier for angular jitter, shared by every family.
pub const JITTER_MULTIPLIER: f64 = 2.645751311065;

// Splatters were tuned with truncated constants.
const SPLATTER_X: f64 = 3.14159265;
const SPLATTER_Y: f64 = 2.71828182;
const SPLATTER_FACTOR: f64 = 1.61803398;
const SPLATTER_DRIP: f64 = 2.23606797;

// Caustics likewise.
const CAUSTIC_X: f64 = 1.618;
const CAUSTIC_Y: f64 = 2.718;

/// Per-particle generation context.
///
/// Wraps the index and total count and hands out the deterministic factors
/// every generator is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: u32,
    /// Total number of particles being spawned.
    pub count: u32,
}

impl SpawnContext {
    pub fn new(index: u32, count: u32) -> Self {
        Self { index, count }
    }

    /// Normalized progress through the spawn (0.0 to 1.0).
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.count == 0 {
            0.0
        } else {
            self.index as f32 / self.count as f32
        }
    }

    /// `frac(index * multiplier)` in `[0, 1)`.
    ///
    /// Computed in `f64` so large indices keep their fractional digits.
    #[inline]
    pub fn factor(&self, multiplier: f64) -> f32 {
        (self.index as f64 * multiplier).fract() as f32
    }

    /// Base angle evenly dividing the circle by `count`.
    #[inline]
    pub fn even_angle(&self) -> f32 {
        self.progress() * TAU
    }

    /// Base angle on a golden-angle spiral.
    #[inline]
    pub fn golden_angle(&self) -> f32 {
        let golden = PI * (3.0 - 5.0_f64.sqrt());
        (self.index as f64 * golden) as f32
    }

    /// Angular jitter centred on zero with total width `width`.
    #[inline]
    pub fn jitter(&self, width: f32) -> f32 {
        (self.factor(JITTER_MULTIPLIER) - 0.5) * width
    }
}

/// A validated particle count.
///
/// Untyped sources such as JSON numbers go through `TryFrom<f64>`, which
/// rejects negative, fractional and non-finite values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "usize")]
pub struct ParticleCount(usize);

impl ParticleCount {
    pub fn new(count: usize) -> Result<Self, SplashError> {
        if count > MAX_PARTICLE_COUNT {
            return Err(count_too_large(count));
        }
        Ok(Self(count))
    }

    /// A count capped at [`MAX_PARTICLE_COUNT`], for presets.
    pub const fn saturating(count: usize) -> Self {
        if count > MAX_PARTICLE_COUNT {
            Self(MAX_PARTICLE_COUNT)
        } else {
            Self(count)
        }
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<f64> for ParticleCount {
    type Error = SplashError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
            return Err(SplashError::InvalidArgument(format!(
                "particle count must be a non-negative integer, got {value}"
            )));
        }
        if value > MAX_PARTICLE_COUNT as f64 {
            return Err(count_too_large(value as usize));
        }
        Ok(Self(value as usize))
    }
}

impl From<ParticleCount> for usize {
    fn from(count: ParticleCount) -> Self {
        count.0
    }
}

impl PartialEq<usize> for ParticleCount {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

fn count_too_large(count: usize) -> SplashError {
    SplashError::InvalidArgument(format!(
        "particle count {count} exceeds the limit of {MAX_PARTICLE_COUNT}"
    ))
}

/// Contexts for `0..count`.
fn contexts(count: usize) -> Result<impl Iterator<Item = SpawnContext>, SplashError> {
    let count = ParticleCount::new(count)?.get() as u32;
    Ok((0..count).map(move |i| SpawnContext::new(i, count)))
}

/// Generate `count` droplets with the default tuning.
pub fn generate(count: usize) -> Result<Vec<ParticleDescriptor>, SplashError> {
    generate_with(count, &DropletConfig::default())
}

/// Generate `count` droplets with the given tuning.
pub fn generate_with(count: usize, config: &DropletConfig) -> Result<Vec<ParticleDescriptor>, SplashError> {
    Ok(contexts(count)?.map(|ctx| spawn_droplet(&ctx, config)).collect())
}

fn spawn_droplet(ctx: &SpawnContext, config: &DropletConfig) -> ParticleDescriptor {
    let f1 = ctx.factor(GOLDEN_RATIO);
    let f2 = ctx.factor(EULER);
    let f3 = ctx.factor(PI_DIGITS);

    let category = config.categorize(f1);
    let ranges = config.ranges(category);

    let base_angle = match config.layout {
        AngleLayout::Even => ctx.even_angle(),
        AngleLayout::Golden => ctx.golden_angle(),
    };

    let (elongation, gravity) = match category {
        Category::Large => (1.3 + f1 * 0.8, 0.8 + f1 * 0.4),
        Category::Medium => (1.3 + f1 * 0.8, 0.5 + f1 * 0.3),
        Category::Small => (1.3 + f1 * 0.8, 0.2 + f1 * 0.2),
        Category::Mist => (2.5 + f1 * 1.5, 0.2 + f1 * 0.2),
    };

    ParticleDescriptor {
        index: ctx.index,
        angle: base_angle + ctx.jitter(config.jitter),
        category,
        distance: ranges.distance.at(f1),
        size: ranges.size.at(f2),
        speed: ranges.speed.at(f3),
        elongation,
        rotation: f3 * 360.0,
        delay: f2 * config.max_delay,
        gravity,
        z_depth: f1,
        surface_tension: 0.3 + f2 * 0.7,
        spin: (f3 - 0.5) * 720.0,
        has_trail: category != Category::Mist && f1 > 0.6,
    }
}

/// Generate `count` radial streams.
pub fn generate_streams(count: usize) -> Result<Vec<StreamDescriptor>, SplashError> {
    Ok(contexts(count)?
        .map(|ctx| {
            let f = ctx.factor(SQRT_2);
            let g = ctx.factor(SQRT_3);
            StreamDescriptor {
                index: ctx.index,
                angle: ctx.even_angle() + ctx.jitter(0.2),
                length: 120.0 + f * 280.0,
                width: 2.0 + g * 6.0,
                speed: 0.7 + f * 0.5,
                opacity: 0.5 + g * 0.4,
                taper: 0.3 + g * 0.5,
            }
        })
        .collect())
}

/// Generate `count` screen splatters.
pub fn generate_splatters(count: usize) -> Result<Vec<SplatterDescriptor>, SplashError> {
    Ok(contexts(count)?
        .map(|ctx| {
            let fx = ctx.factor(SPLATTER_X);
            let fy = ctx.factor(SPLATTER_Y);
            let f = ctx.factor(SPLATTER_FACTOR);
            SplatterDescriptor {
                index: ctx.index,
                x_percent: (fx - 0.5) * 120.0,
                y_percent: (fy - 0.5) * 80.0,
                size: 25.0 + f * 100.0,
                delay: f * 0.25,
                drip_length: 40.0 + ctx.factor(SPLATTER_DRIP) * 150.0,
                drip_width: 3.0 + f * 4.0,
                sub_droplets: (3.0 + f * 5.0).floor() as u32,
                spread_angle: 30.0 + f * 60.0,
            }
        })
        .collect())
}

/// Generate `count` drips along the top edge.
pub fn generate_drips(count: usize) -> Result<Vec<DripDescriptor>, SplashError> {
    Ok(contexts(count)?
        .map(|ctx| {
            let i = ctx.index;
            DripDescriptor {
                index: i,
                x_percent: 5.0 + i as f32 * 8.0,
                delay: 0.4 + i as f32 * 0.025,
                width: 4.0 + (i % 4) as f32 * 2.0,
                max_height: 250.0 + (i % 3) as f32 * 100.0,
            }
        })
        .collect())
}

/// Generate `count` caustic light patches.
pub fn generate_caustics(count: usize) -> Result<Vec<CausticDescriptor>, SplashError> {
    Ok(contexts(count)?
        .map(|ctx| {
            let f = ctx.factor(CAUSTIC_X);
            let g = ctx.factor(CAUSTIC_Y);
            CausticDescriptor {
                index: ctx.index,
                x_percent: f * 100.0,
                y_percent: g * 100.0,
                size: 50.0 + f * 150.0,
                intensity: 0.1 + g * 0.2,
                delay: 0.05 + f * 0.2,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_context_progress() {
        let ctx = SpawnContext::new(50, 100);
        assert!((ctx.progress() - 0.5).abs() < 0.001);
        assert_eq!(SpawnContext::new(0, 0).progress(), 0.0);
    }

    #[test]
    fn test_factor_is_fractional_part() {
        assert_eq!(SpawnContext::new(0, 10).factor(GOLDEN_RATIO), 0.0);
        let f = SpawnContext::new(1, 10).factor(GOLDEN_RATIO);
        assert!((f - 0.618034).abs() < 1e-6);
        let f = SpawnContext::new(2, 10).factor(EULER);
        assert!((f - 0.436564).abs() < 1e-5);
    }

    #[test]
    fn test_jitter_bounds() {
        for i in 0..500 {
            let j = SpawnContext::new(i, 500).jitter(0.3);
            assert!((-0.15..0.15).contains(&j), "jitter {j} out of range");
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        assert_eq!(generate(120).unwrap(), generate(120).unwrap());
        assert_eq!(generate_streams(32).unwrap(), generate_streams(32).unwrap());
        assert_eq!(generate_splatters(18).unwrap(), generate_splatters(18).unwrap());
    }

    #[test]
    fn test_generate_empty() {
        assert!(generate(0).unwrap().is_empty());
        assert!(generate_streams(0).unwrap().is_empty());
        assert!(generate_caustics(0).unwrap().is_empty());
    }

    #[test]
    fn test_generate_rejects_oversized_count() {
        let err = generate(MAX_PARTICLE_COUNT + 1).unwrap_err();
        assert!(matches!(err, SplashError::InvalidArgument(_)));
    }

    #[test]
    fn test_first_droplet_is_large() {
        let droplets = generate(1).unwrap();
        assert_eq!(droplets.len(), 1);
        let d = droplets[0];
        assert_eq!(d.category, Category::Large);
        assert_eq!(d.delay, 0.0);
        assert_eq!(d.size, 35.0);
        assert_eq!(d.distance, 200.0);
        assert!(!d.has_trail);
    }

    #[test]
    fn test_category_ranges_hold() {
        let config = DropletConfig::default();
        for d in generate(500).unwrap() {
            let r = config.ranges(d.category);
            assert!(d.size >= r.size.base && d.size <= r.size.base + r.size.range);
            assert!(d.speed >= r.speed.base && d.speed <= r.speed.base + r.speed.range);
            assert!(d.delay >= 0.0 && d.delay < config.max_delay);
            if d.category == Category::Mist {
                assert!(!d.has_trail);
            }
        }
    }

    #[test]
    fn test_all_categories_appear() {
        let droplets = generate(120).unwrap();
        for category in Category::ALL {
            assert!(droplets.iter().any(|d| d.category == category), "no {category:?} droplets");
        }
    }

    #[test]
    fn test_golden_layout_differs_from_even() {
        let golden = DropletConfig {
            layout: AngleLayout::Golden,
            ..DropletConfig::default()
        };
        let even = generate(10).unwrap();
        let spiral = generate_with(10, &golden).unwrap();
        assert_eq!(even[0].angle, spiral[0].angle);
        assert_ne!(even[3].angle, spiral[3].angle);
        assert_eq!(even[3].size, spiral[3].size);
    }

    #[test]
    fn test_particle_count_from_f64() {
        assert_eq!(ParticleCount::try_from(120.0).unwrap().get(), 120);
        assert_eq!(ParticleCount::try_from(0.0).unwrap().get(), 0);
        for bad in [-1.0, 2.5, f64::NAN, f64::INFINITY, 1e9] {
            assert!(
                matches!(ParticleCount::try_from(bad), Err(SplashError::InvalidArgument(_))),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn test_particle_count_saturates() {
        assert_eq!(ParticleCount::saturating(12).get(), 12);
        assert_eq!(ParticleCount::saturating(usize::MAX).get(), MAX_PARTICLE_COUNT);
        assert!(ParticleCount::new(MAX_PARTICLE_COUNT + 1).is_err());
    }

    #[test]
    fn test_drip_layout() {
        let drips = generate_drips(12).unwrap();
        assert_eq!(drips[0].x_percent, 5.0);
        assert_eq!(drips[11].x_percent, 93.0);
        assert_eq!(drips[5].width, 6.0);
        assert_eq!(drips[5].max_height, 450.0);
        assert!((drips[4].delay - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_splatter_sub_droplet_counts() {
        for s in generate_splatters(18).unwrap() {
            assert!((3..=7).contains(&s.sub_droplets));
            assert!(s.x_percent.abs() <= 60.0 && s.y_percent.abs() <= 40.0);
        }
    }
}
