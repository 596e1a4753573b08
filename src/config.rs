//! Game balance configuration
//!
//! Read once at startup (optionally overridden from LocalStorage) and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Background fill drawn every frame (translucent, leaves motion trails)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub color: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            color: "rgba(0, 0, 0, 0.1)".to_string(),
        }
    }
}

/// Points awarded per event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    /// Per tick survived
    pub survive: u64,
    /// Enemy hit but still above minimum radius
    pub hit: u64,
    /// Enemy destroyed
    pub destroy: u64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            survive: 1,
            hit: 500,
            destroy: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub color: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            color: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub radius: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            speed: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Above this score, spawned radii are randomized
    pub randomized_size_threshold: u64,
    pub radius_reduction_per_hit: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            randomized_size_threshold: 10_000,
            radius_reduction_per_hit: 10.0,
            min_radius: 10.0,
            max_radius: 30.0,
        }
    }
}

impl EnemyConfig {
    /// Radius used before the randomization threshold
    pub fn midpoint_radius(&self) -> f32 {
        (self.min_radius + self.max_radius) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionConfig {
    pub max_radius: f32,
    /// Fraction of velocity lost per tick
    pub velocity_reduction_rate: f32,
    /// Upper bound of the per-axis burst speed
    pub max_explosion_size: f32,
}

impl Default for ExplosionConfig {
    fn default() -> Self {
        Self {
            max_radius: 3.0,
            velocity_reduction_rate: 0.02,
            max_explosion_size: 9.0,
        }
    }
}

/// Static starfield drawn on top of every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundParticleConfig {
    pub colors: Vec<String>,
    pub max_radius: f32,
    pub total: usize,
    pub initial_alpha: f32,
}

impl Default for BackgroundParticleConfig {
    fn default() -> Self {
        Self {
            colors: ["white", "royalblue", "lightyellow", "coral"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_radius: 1.0,
            total: 1000,
            initial_alpha: 0.1,
        }
    }
}

/// All tunables
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub background: BackgroundConfig,
    pub score: ScoreConfig,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub enemy: EnemyConfig,
    pub explosion: ExplosionConfig,
    pub background_particles: BackgroundParticleConfig,
}

impl Config {
    /// LocalStorage key for overrides
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "nova_shooter_config";

    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load config overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config overrides from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring malformed config overrides: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native: defaults only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
