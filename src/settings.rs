//! Difficulty profiles and board dimensions
//!
//! A profile is fixed for a session; pick it before `start()`.

use serde::{Deserialize, Serialize};

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Physics and spawn tuning for this level
    pub fn profile(&self) -> Profile {
        match self {
            Difficulty::Easy => Profile {
                gravity: 0.3,
                impulse: -6.0,
                obstacle_speed: 3.0,
                spawn_interval_ms: 1800.0,
            },
            Difficulty::Medium => Profile {
                gravity: 0.4,
                impulse: -7.0,
                obstacle_speed: 4.0,
                spawn_interval_ms: 1500.0,
            },
            Difficulty::Hard => Profile {
                gravity: 0.5,
                impulse: -8.0,
                obstacle_speed: 5.0,
                spawn_interval_ms: 1200.0,
            },
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable tuning tuple. Velocities and accelerations are per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Added to the actor's vertical velocity every tick
    pub gravity: f64,
    /// Vertical velocity set by an impulse (negative is upward)
    pub impulse: f64,
    /// Obstacle leftward movement per tick
    pub obstacle_speed: f64,
    /// Real time between spawns
    pub spawn_interval_ms: f64,
}

/// Board dimensions supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoardSize {
    pub width: f64,
    pub height: f64,
}

impl BoardSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(Difficulty::from_str("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("Hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(&d.to_string()), Some(d));
        }
    }

    #[test]
    fn test_profiles_get_harder() {
        let [easy, medium, hard] = Difficulty::ALL.map(|d| d.profile());
        assert_eq!(easy.gravity, 0.3);
        assert_eq!(easy.impulse, -6.0);
        assert_eq!(easy.obstacle_speed, 3.0);
        assert_eq!(easy.spawn_interval_ms, 1800.0);
        assert_eq!(medium.gravity, 0.4);
        assert_eq!(medium.impulse, -7.0);
        assert_eq!(medium.obstacle_speed, 4.0);
        assert_eq!(medium.spawn_interval_ms, 1500.0);
        assert_eq!(hard.gravity, 0.5);
        assert_eq!(hard.impulse, -8.0);
        assert_eq!(hard.obstacle_speed, 5.0);
        assert_eq!(hard.spawn_interval_ms, 1200.0);
        assert!(easy.gravity < medium.gravity && medium.gravity < hard.gravity);
        assert!(easy.obstacle_speed < medium.obstacle_speed && medium.obstacle_speed < hard.obstacle_speed);
        assert!(easy.spawn_interval_ms > medium.spawn_interval_ms);
        assert!(medium.spawn_interval_ms > hard.spawn_interval_ms);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Difficulty::Medium).unwrap(), "\"medium\"");
        let d: Difficulty = serde_json::from_str("\"hard\"").unwrap();
        assert_eq!(d, Difficulty::Hard);
    }
}
