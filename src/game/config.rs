//! Gameplay tunables. Everything the simulation randomizes or scores against
//! is parameterized here so sessions (and tests) can be constructed with
//! explicit numbers instead of scattered magic constants. Defaults are the
//! desktop difficulty; `for_device(true)` derives the mobile variant.

/// All simulation tunables. Spawn chances are per tick, speeds are logical
/// pixels per tick, the shot cooldown is wall-clock milliseconds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub asteroid_spawn_chance: f64,
    pub star_spawn_chance: f64,
    /// Points for shooting an asteroid.
    pub asteroid_points: u32,
    /// Points for flying through a star.
    pub star_points: u32,
    pub shot_cooldown_ms: f64,

    pub player_size: f64,
    pub player_speed: f64,

    pub asteroid_min_size: f64,
    pub asteroid_size_variation: f64,
    pub asteroid_base_speed: f64,
    pub asteroid_speed_variation: f64,

    pub star_min_size: f64,
    pub star_size_variation: f64,
    pub star_base_speed: f64,

    pub bullet_width: f64,
    pub bullet_height: f64,
    pub bullet_speed: f64,

    /// Total horizontal margin kept free of spawns (half on each side).
    pub spawn_margin: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            asteroid_spawn_chance: 0.02,
            star_spawn_chance: 0.01,
            asteroid_points: 10,
            star_points: 20,
            shot_cooldown_ms: 200.0,

            player_size: 30.0,
            player_speed: 5.0,

            asteroid_min_size: 20.0,
            asteroid_size_variation: 30.0,
            asteroid_base_speed: 2.0,
            asteroid_speed_variation: 3.0,

            star_min_size: 15.0,
            star_size_variation: 10.0,
            star_base_speed: 1.5,

            bullet_width: 4.0,
            bullet_height: 15.0,
            bullet_speed: 8.0,

            spawn_margin: 20.0,
        }
    }
}

impl GameConfig {
    /// Asteroid base speed used when the host reports a touch device.
    const MOBILE_ASTEROID_BASE_SPEED: f64 = 1.2;

    /// Difficulty-scaled config. The mobile flag is classified by the host
    /// (touch capability), never by the simulation itself.
    pub fn for_device(mobile: bool) -> Self {
        let mut cfg = Self::default();
        if mobile {
            cfg.asteroid_base_speed = Self::MOBILE_ASTEROID_BASE_SPEED;
        }
        cfg
    }
}
