//! Splash configuration and presets.
//!
//! The page variants of the splash differ only in tuning (particle counts,
//! category thresholds, speed ranges), so they are expressed as presets of
//! one [`SplashConfig`]. Configurations serialize to JSON:
//!
//! ```ignore
//! let config = SplashConfig::load("splash.json")?;
//! let scene = Scene::new(&config)?;
//! ```

use crate::controller::DEFAULT_DURATION;
use crate::descriptor::Category;
use crate::error::SplashError;
use crate::kinematics::DROPLET_TIME_SCALE;
use crate::spawn::ParticleCount;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How droplet base angles are laid out around the circle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleLayout {
    /// `i * TAU / count`.
    #[default]
    Even,
    /// `i * PI * (3 - sqrt(5))`, a sunflower spiral.
    Golden,
}

/// A linear attribute range: `base + factor * range`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub base: f32,
    pub range: f32,
}

impl Span {
    pub const fn new(base: f32, range: f32) -> Self {
        Self { base, range }
    }

    /// Value at a pseudo-random factor in `[0, 1)`.
    #[inline]
    pub fn at(&self, factor: f32) -> f32 {
        self.base + factor * self.range
    }
}

/// Size, speed and travel distance for one droplet category.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryRanges {
    pub size: Span,
    pub speed: Span,
    pub distance: Span,
}

/// Droplet generation tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropletConfig {
    pub count: ParticleCount,
    #[serde(default)]
    pub layout: AngleLayout,
    /// Total width of the angular jitter in radians.
    pub jitter: f32,
    /// Upper bounds for Large, Medium and Small; everything above is Mist.
    pub thresholds: [f32; 3],
    pub large: CategoryRanges,
    pub medium: CategoryRanges,
    pub small: CategoryRanges,
    pub mist: CategoryRanges,
    /// Largest start delay a droplet can get.
    pub max_delay: f32,
}

impl Default for DropletConfig {
    fn default() -> Self {
        Self {
            count: ParticleCount::saturating(120),
            layout: AngleLayout::Even,
            jitter: 0.3,
            thresholds: [0.15, 0.4, 0.75],
            large: CategoryRanges {
                size: Span::new(35.0, 30.0),
                speed: Span::new(0.4, 0.2),
                distance: Span::new(200.0, 400.0),
            },
            medium: CategoryRanges {
                size: Span::new(15.0, 18.0),
                speed: Span::new(0.6, 0.3),
                distance: Span::new(300.0, 500.0),
            },
            small: CategoryRanges {
                size: Span::new(6.0, 10.0),
                speed: Span::new(0.9, 0.4),
                distance: Span::new(400.0, 600.0),
            },
            mist: CategoryRanges {
                size: Span::new(2.0, 5.0),
                speed: Span::new(1.1, 0.5),
                distance: Span::new(500.0, 700.0),
            },
            max_delay: 0.12,
        }
    }
}

impl DropletConfig {
    /// Bucket a pseudo-random factor into a category.
    pub fn categorize(&self, factor: f32) -> Category {
        let [large, medium, small] = self.thresholds;
        if factor < large {
            Category::Large
        } else if factor < medium {
            Category::Medium
        } else if factor < small {
            Category::Small
        } else {
            Category::Mist
        }
    }

    /// Attribute ranges for a category.
    pub fn ranges(&self, category: Category) -> &CategoryRanges {
        match category {
            Category::Large => &self.large,
            Category::Medium => &self.medium,
            Category::Small => &self.small,
            Category::Mist => &self.mist,
        }
    }

    /// Check jitter, thresholds, ranges and that every droplet arrives by
    /// progress 1.
    pub fn validate(&self) -> Result<(), SplashError> {
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return Err(SplashError::InvalidConfig(format!(
                "droplets.jitter must be a finite non-negative width, got {}",
                self.jitter
            )));
        }

        let [a, b, c] = self.thresholds;
        if !(0.0 < a && a < b && b < c && c < 1.0) {
            return Err(SplashError::InvalidConfig(format!(
                "droplet thresholds must increase strictly within (0, 1), got {:?}",
                self.thresholds
            )));
        }

        if !(self.max_delay.is_finite() && (0.0..1.0).contains(&self.max_delay)) {
            return Err(SplashError::InvalidConfig(format!(
                "droplets.max_delay must be in [0, 1), got {}",
                self.max_delay
            )));
        }

        // The slowest droplet with the longest delay still has to reach its
        // terminal position when progress hits 1.
        let latest_eased = (1.0 - self.max_delay).sqrt();
        for category in Category::ALL {
            let ranges = self.ranges(category);
            for (name, span) in [("size", ranges.size), ("speed", ranges.speed), ("distance", ranges.distance)] {
                if !(span.base.is_finite() && span.range.is_finite() && span.base >= 0.0 && span.range >= 0.0) {
                    return Err(SplashError::InvalidConfig(format!(
                        "{category:?} {name} range must be finite and non-negative, got {span:?}"
                    )));
                }
            }
            if ranges.speed.base * DROPLET_TIME_SCALE * latest_eased < 1.0 {
                return Err(SplashError::InvalidConfig(format!(
                    "{category:?} droplets with speed {} cannot finish before progress reaches 1",
                    ranges.speed.base
                )));
            }
        }

        Ok(())
    }
}

fn default_duration() -> f64 {
    DEFAULT_DURATION
}

/// Complete splash configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplashConfig {
    /// Accumulated scroll magnitude (pixels) needed to finish the splash.
    #[serde(default = "default_duration")]
    pub duration: f64,
    #[serde(default)]
    pub droplets: DropletConfig,
    pub streams: ParticleCount,
    pub splatters: ParticleCount,
    pub drips: ParticleCount,
    pub caustics: ParticleCount,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            droplets: DropletConfig::default(),
            streams: ParticleCount::saturating(32),
            splatters: ParticleCount::saturating(18),
            drips: ParticleCount::saturating(12),
            caustics: ParticleCount::saturating(12),
        }
    }
}

impl SplashConfig {
    /// The page's bucket splash: droplets on a golden-angle spiral.
    pub fn bucket() -> Self {
        Self {
            droplets: DropletConfig {
                layout: AngleLayout::Golden,
                ..DropletConfig::default()
            },
            ..Self::default()
        }
    }

    /// A lighter splash for small screens: half the particles, shorter scroll.
    pub fn light() -> Self {
        Self {
            duration: 1500.0,
            droplets: DropletConfig {
                count: ParticleCount::saturating(60),
                thresholds: [0.2, 0.5, 0.85],
                ..DropletConfig::default()
            },
            streams: ParticleCount::saturating(16),
            splatters: ParticleCount::saturating(8),
            drips: ParticleCount::saturating(6),
            caustics: ParticleCount::saturating(6),
        }
    }

    /// Look up a preset by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "bucket" => Some(Self::bucket()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, SplashError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        check_counts(&document)?;
        let config: SplashConfig = serde_json::from_value(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SplashError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SplashError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SplashError> {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return Err(SplashError::InvalidConfig(format!(
                "duration must be a positive number, got {}",
                self.duration
            )));
        }
        self.droplets.validate()
    }
}

/// JSON pointers of every particle count in a configuration document.
const COUNT_FIELDS: [&str; 5] = ["/droplets/count", "/streams", "/splatters", "/drips", "/caustics"];

/// Reject counts that are not non-negative integers before typed parsing.
fn check_counts(document: &serde_json::Value) -> Result<(), SplashError> {
    for pointer in COUNT_FIELDS {
        let Some(field) = document.pointer(pointer) else {
            continue;
        };
        let value = field
            .as_f64()
            .ok_or_else(|| SplashError::InvalidArgument(format!("{pointer} must be a number, got {field}")))?;
        ParticleCount::try_from(value)?;
    }
    Ok(())
}
