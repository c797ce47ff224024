//! Tunable effect parameters.

use serde::{Deserialize, Serialize};

/// Half-open range `[min, max)` sampled with a unit random value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UniformRange {
    pub min: f64,
    pub max: f64,
}

impl UniformRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map `unit` in `[0, 1)` onto the range.
    pub fn sample(&self, unit: f64) -> f64 {
        self.min + unit * (self.max - self.min)
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Settings for every effect the controller drives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub spotlight: SpotlightSettings,
    pub particles: ParticleSettings,
    pub shooting_stars: ShootingStarSettings,
    pub tilt: TiltSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotlightSettings {
    pub enabled: bool,
}

impl Default for SpotlightSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    /// Target population, seeded once at start.
    pub count: usize,
    pub size_px: UniformRange,
    pub duration_s: UniformRange,
    pub delay_s: UniformRange,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 30,
            size_px: UniformRange::new(2.0, 8.0),
            duration_s: UniformRange::new(10.0, 30.0),
            delay_s: UniformRange::new(0.0, 10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShootingStarSettings {
    pub interval_ms: u64,
    pub lifetime_ms: u64,
    pub left_vw: UniformRange,
    pub top_vh: UniformRange,
}

impl Default for ShootingStarSettings {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            lifetime_ms: 1000,
            left_vw: UniformRange::new(0.0, 100.0),
            top_vh: UniformRange::new(0.0, 30.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltSettings {
    /// Offset from the card center is divided by this to get degrees.
    pub divisor: f64,
    pub perspective_px: f64,
    pub scale: f64,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            divisor: 10.0,
            perspective_px: 1000.0,
            scale: 1.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_range_sample() {
        let range = UniformRange::new(2.0, 8.0);
        assert_eq!(range.sample(0.0), 2.0);
        assert_eq!(range.sample(0.5), 5.0);
        assert!(range.sample(0.999_999) < 8.0);
    }

    #[test]
    fn test_uniform_range_validity() {
        assert!(UniformRange::new(0.0, 0.0).is_valid());
        assert!(!UniformRange::new(3.0, 1.0).is_valid());
        assert!(!UniformRange::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_defaults() {
        let config = EffectsConfig::default();
        assert!(config.spotlight.enabled);
        assert_eq!(config.particles.count, 30);
        assert_eq!(config.shooting_stars.interval_ms, 2000);
        assert_eq!(config.shooting_stars.lifetime_ms, 1000);
        assert_eq!(config.tilt.divisor, 10.0);
        assert_eq!(config.tilt.scale, 1.05);
    }
}
