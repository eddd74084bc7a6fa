//! Life gauge value object

use serde::{Deserialize, Serialize};

/// Remaining life of a character.
///
/// A gauge is either `Alive` with a positive number of points or `Dead`.
/// `Dead` serializes as the legacy `-1` sentinel, and deserializing any
/// value at or below zero yields `Dead`, so stored rows and API payloads
/// keep their historical shape while the domain never does arithmetic on
/// a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i64", from = "i64")]
pub enum LifeGauge {
    // Declared before `Alive` so the derived ordering ranks any living
    // gauge above a dead one.
    Dead,
    Alive(i64),
}

impl LifeGauge {
    /// Build a gauge from raw points. Zero or negative points mean dead.
    pub fn from_points(points: i64) -> Self {
        Self::from(points)
    }

    /// Remaining points, or `None` when dead.
    pub fn points(self) -> Option<i64> {
        match self {
            LifeGauge::Dead => None,
            LifeGauge::Alive(points) => Some(points),
        }
    }

    pub fn is_dead(self) -> bool {
        matches!(self, LifeGauge::Dead)
    }

    pub fn is_alive(self) -> bool {
        !self.is_dead()
    }

    /// Apply damage, collapsing to `Dead` when nothing remains.
    pub fn take_damage(self, damage: i64) -> Self {
        match self {
            LifeGauge::Dead => LifeGauge::Dead,
            LifeGauge::Alive(points) if points <= damage => LifeGauge::Dead,
            LifeGauge::Alive(points) => LifeGauge::Alive(points - damage),
        }
    }
}

impl From<i64> for LifeGauge {
    fn from(points: i64) -> Self {
        if points <= 0 {
            LifeGauge::Dead
        } else {
            LifeGauge::Alive(points)
        }
    }
}

impl From<LifeGauge> for i64 {
    fn from(gauge: LifeGauge) -> Self {
        match gauge {
            LifeGauge::Dead => -1,
            LifeGauge::Alive(points) => points,
        }
    }
}

impl std::fmt::Display for LifeGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_or_negative_points_mean_dead() {
        assert_eq!(LifeGauge::from_points(0), LifeGauge::Dead);
        assert_eq!(LifeGauge::from_points(-7), LifeGauge::Dead);
        assert_eq!(LifeGauge::from_points(3), LifeGauge::Alive(3));
    }

    #[test]
    fn damage_below_points_stays_alive() {
        assert_eq!(
            LifeGauge::Alive(31).take_damage(18),
            LifeGauge::Alive(13)
        );
        assert_eq!(LifeGauge::Alive(5).take_damage(0), LifeGauge::Alive(5));
    }

    #[test]
    fn lethal_damage_kills() {
        assert_eq!(LifeGauge::Alive(10).take_damage(10), LifeGauge::Dead);
        assert_eq!(LifeGauge::Alive(10).take_damage(31), LifeGauge::Dead);
    }

    #[test]
    fn dead_gauges_ignore_further_damage() {
        assert_eq!(LifeGauge::Dead.take_damage(5), LifeGauge::Dead);
    }

    #[test]
    fn dead_serializes_as_sentinel() {
        assert_eq!(serde_json::to_value(LifeGauge::Dead).unwrap(), -1);
        assert_eq!(serde_json::to_value(LifeGauge::Alive(20)).unwrap(), 20);

        let revived: LifeGauge = serde_json::from_str("-1").unwrap();
        assert_eq!(revived, LifeGauge::Dead);
        let alive: LifeGauge = serde_json::from_str("12").unwrap();
        assert_eq!(alive, LifeGauge::Alive(12));
    }

    #[test]
    fn ordering_ranks_dead_below_any_living_gauge() {
        assert!(LifeGauge::Dead < LifeGauge::Alive(1));
        assert!(LifeGauge::Alive(1) < LifeGauge::Alive(2));
        assert_eq!(LifeGauge::Alive(4).cmp(&LifeGauge::Alive(4)), std::cmp::Ordering::Equal);
    }
}
