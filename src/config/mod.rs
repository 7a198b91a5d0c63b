use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use thiserror::Error;
use crate::combat::WeaponType;

pub const DEFAULT_DUNGEON_WIDTH: i32 = 50;
pub const DEFAULT_DUNGEON_HEIGHT: i32 = 50;
/// Upper bound on room attempts in a single generation run.
pub const MAX_ROOM_ATTEMPTS: i32 = 1_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("dungeon dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("minimum room size must be at least 1")]
    ZeroRoomSize,
    #[error("maximum room size {max} is below minimum room size {min}")]
    InvertedRoomSize { min: i32, max: i32 },
    #[error("room count base and spread must not be negative")]
    NegativeRoomCount,
    #[error("margin must not be negative, got {0}")]
    NegativeMargin(i32),
    #[error("margin {margin} leaves no room inside a {width}x{height} dungeon")]
    MarginTooLarge { margin: i32, width: i32, height: i32 },
    #[error("room count base plus spread must be at most {max}")]
    TooManyRoomAttempts { max: i32 },
    #[error("wave interval must be positive")]
    ZeroWaveInterval,
    #[error("spawn exclusion radius must be a finite, non-negative number, got {0}")]
    InvalidExclusionRadius(f32),
}

/// Knobs for room placement. Defaults match the shipped game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub width: i32,
    pub height: i32,
    /// Attempts = base + floor(r * spread).
    pub room_count_base: i32,
    pub room_count_spread: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Gap kept between rooms and the grid edge.
    pub margin: i32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_DUNGEON_WIDTH,
            height: DEFAULT_DUNGEON_HEIGHT,
            room_count_base: 10,
            room_count_spread: 10,
            min_room_size: 5,
            max_room_size: 12,
            margin: 1,
        }
    }
}

impl GeneratorConfig {
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.min_room_size < 1 {
            return Err(ConfigError::ZeroRoomSize);
        }
        if self.max_room_size < self.min_room_size {
            return Err(ConfigError::InvertedRoomSize {
                min: self.min_room_size,
                max: self.max_room_size,
            });
        }
        if self.room_count_base < 0 || self.room_count_spread < 0 {
            return Err(ConfigError::NegativeRoomCount);
        }
        if self.margin < 0 {
            return Err(ConfigError::NegativeMargin(self.margin));
        }
        let both_margins = self.margin.saturating_mul(2);
        if both_margins >= self.width || both_margins >= self.height {
            return Err(ConfigError::MarginTooLarge {
                margin: self.margin,
                width: self.width,
                height: self.height,
            });
        }
        let max_attempts = self.room_count_base.checked_add(self.room_count_spread);
        if max_attempts.map_or(true, |attempts| attempts > MAX_ROOM_ATTEMPTS) {
            return Err(ConfigError::TooManyRoomAttempts {
                max: MAX_ROOM_ATTEMPTS,
            });
        }
        Ok(())
    }

    /// Number of distinct room sizes per axis.
    pub fn room_size_spread(&self) -> i32 {
        self.max_room_size
            .saturating_sub(self.min_room_size)
            .saturating_add(1)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub initial_enemies: usize,
    pub wave_size: usize,
    pub wave_interval_ms: u64,
    /// Enemies never spawn within this many pixels of the player.
    pub spawn_exclusion_radius: f32,
    pub score_per_kill: u32,
    pub weapon: WeaponType,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_enemies: 5,
            wave_size: 2,
            wave_interval_ms: 10_000,
            spawn_exclusion_radius: 200.0,
            score_per_kill: 10,
            weapon: WeaponType::Sword,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wave_interval_ms == 0 {
            return Err(ConfigError::ZeroWaveInterval);
        }
        if !self.spawn_exclusion_radius.is_finite() || self.spawn_exclusion_radius < 0.0 {
            return Err(ConfigError::InvalidExclusionRadius(self.spawn_exclusion_radius));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generator: GeneratorConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&data)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(data).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        self.session.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_ranges() {
        let config = GeneratorConfig::default();
        assert_eq!(config.room_count_base, 10);
        assert_eq!(config.room_count_spread, 10);
        assert_eq!(config.min_room_size, 5);
        assert_eq!(config.room_size_spread(), 8);
        assert!(config.validate().is_ok());
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_generator_values() {
        assert_eq!(
            GeneratorConfig::with_size(0, 10).validate(),
            Err(ConfigError::InvalidDimensions { width: 0, height: 10 })
        );

        let inverted = GeneratorConfig {
            min_room_size: 8,
            max_room_size: 4,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvertedRoomSize { min: 8, max: 4 })
        );

        let zero = GeneratorConfig {
            min_room_size: 0,
            ..GeneratorConfig::default()
        };
        assert_eq!(zero.validate(), Err(ConfigError::ZeroRoomSize));
    }

    #[test]
    fn test_rejects_margin_that_swallows_grid() {
        let config = GeneratorConfig {
            margin: 1_500_000_000,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MarginTooLarge { margin: 1_500_000_000, width: 50, height: 50 })
        );

        let narrow = GeneratorConfig {
            margin: 5,
            ..GeneratorConfig::with_size(80, 10)
        };
        assert!(matches!(narrow.validate(), Err(ConfigError::MarginTooLarge { .. })));

        let fits = GeneratorConfig {
            margin: 4,
            ..GeneratorConfig::with_size(80, 10)
        };
        assert!(fits.validate().is_ok());
    }

    #[test]
    fn test_rejects_unbounded_room_attempts() {
        let huge = GeneratorConfig {
            room_count_base: i32::MAX,
            room_count_spread: 1,
            ..GeneratorConfig::default()
        };
        assert_eq!(
            huge.validate(),
            Err(ConfigError::TooManyRoomAttempts { max: MAX_ROOM_ATTEMPTS })
        );

        let at_cap = GeneratorConfig {
            room_count_base: MAX_ROOM_ATTEMPTS - 10,
            room_count_spread: 10,
            ..GeneratorConfig::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn test_room_size_spread_saturates() {
        let config = GeneratorConfig {
            min_room_size: 1,
            max_room_size: i32::MAX,
            ..GeneratorConfig::default()
        };
        assert_eq!(config.room_size_spread(), i32::MAX);
    }

    #[test]
    fn test_rejects_bad_session_values() {
        let config = SessionConfig {
            spawn_exclusion_radius: f32::NAN,
            ..SessionConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidExclusionRadius(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "generator": { "width": 80 } }"#).unwrap();
        assert_eq!(config.generator.width, 80);
        assert_eq!(config.generator.height, DEFAULT_DUNGEON_HEIGHT);
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_invalid_json_values_are_reported() {
        let err = AppConfig::from_json(r#"{ "generator": { "width": -5 } }"#).unwrap_err();
        assert!(err.to_string().contains("dimensions"));
    }

    #[test]
    fn test_huge_margin_in_json_is_rejected() {
        let err = AppConfig::from_json(r#"{ "generator": { "margin": 1500000000 } }"#).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MarginTooLarge { .. })
        ));
    }
}
