//! Ring layout and spotlight timing configuration.
//!
//! The defaults reproduce the reference front page: three rings at 70, 150
//! and 250 px split at 10k and 20k views. Every field can be overridden from
//! JSON, after which [`OrbitConfig::validate`] must be called.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("at least one ring is required")]
    NoRings,
    #[error("ring {ring}: radius must be positive, got {radius}")]
    BadRadius { ring: usize, radius: f32 },
    #[error("ring {ring}: size range {min}..{max} is inverted or negative")]
    BadSizeRange { ring: usize, min: f32, max: f32 },
    #[error("ring {ring}: view boundary {max_views} does not increase past the previous ring")]
    BoundaryNotIncreasing { ring: usize, max_views: u64 },
    #[error("ring {ring}: only the last ring may be unbounded")]
    UnboundedInner { ring: usize },
    #[error("last ring must be unbounded above")]
    BoundedOuter,
    #[error("relevance range {floor}..{ceiling} is empty")]
    EmptyRelevanceRange { floor: f64, ceiling: f64 },
    #[error("spotlight interval must be non-zero")]
    ZeroInterval,
}

/// One concentric ring.
///
/// `max_views` is the inclusive upper view boundary of the ring's bucket;
/// the lower boundary is one past the previous ring's `max_views` (or zero).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RingConfig {
    pub radius: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub max_views: Option<u64>,
}

impl RingConfig {
    /// Revolution period; larger rings turn more slowly.
    pub fn period(&self) -> Duration {
        Duration::from_secs_f32(self.radius * PERIOD_SECS_PER_PX)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub rings: Vec<RingConfig>,
    pub relevance_floor: f64,
    pub relevance_ceiling: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let rings = (0..RING_RADII.len())
            .map(|i| RingConfig {
                radius: RING_RADII[i],
                min_size: RING_SIZE_RANGES[i][0],
                max_size: RING_SIZE_RANGES[i][1],
                max_views: RING_MAX_VIEWS[i],
            })
            .collect();
        Self {
            rings,
            relevance_floor: RELEVANCE_FLOOR,
            relevance_ceiling: RELEVANCE_CEILING,
        }
    }
}

impl OrbitConfig {
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Check that the view boundaries partition `[0, ∞)` and that every
    /// ring has a usable radius and size range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rings.is_empty() {
            return Err(ConfigError::NoRings);
        }
        if !(self.relevance_ceiling > self.relevance_floor) {
            return Err(ConfigError::EmptyRelevanceRange {
                floor: self.relevance_floor,
                ceiling: self.relevance_ceiling,
            });
        }
        let last = self.rings.len() - 1;
        let mut prev_max: Option<u64> = None;
        for (i, ring) in self.rings.iter().enumerate() {
            if !(ring.radius > 0.0) {
                return Err(ConfigError::BadRadius {
                    ring: i,
                    radius: ring.radius,
                });
            }
            if ring.min_size < 0.0 || ring.min_size > ring.max_size {
                return Err(ConfigError::BadSizeRange {
                    ring: i,
                    min: ring.min_size,
                    max: ring.max_size,
                });
            }
            match ring.max_views {
                Some(_) if i == last => return Err(ConfigError::BoundedOuter),
                Some(max_views) => {
                    if prev_max.is_some_and(|p| max_views <= p) {
                        return Err(ConfigError::BoundaryNotIncreasing { ring: i, max_views });
                    }
                    prev_max = Some(max_views);
                }
                None if i != last => return Err(ConfigError::UnboundedInner { ring: i }),
                None => {}
            }
        }
        Ok(())
    }
}

/// Timing and layering for the autonomous spotlight.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightConfig {
    #[serde(with = "millis")]
    pub initial_delay: Duration,
    #[serde(with = "millis")]
    pub interval: Duration,
    pub spotlight_layer: i32,
    pub hover_layer: i32,
}

impl Default for SpotlightConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(SPOTLIGHT_INITIAL_DELAY_MS),
            interval: Duration::from_millis(SPOTLIGHT_INTERVAL_MS),
            spotlight_layer: SPOTLIGHT_LAYER,
            hover_layer: HOVER_LAYER,
        }
    }
}

impl SpotlightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Both halves of the configuration, as loaded from a single JSON document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualizerConfig {
    pub orbit: OrbitConfig,
    pub spotlight: SpotlightConfig,
}

impl VisualizerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.orbit.validate()?;
        cfg.spotlight.validate()?;
        Ok(cfg)
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
