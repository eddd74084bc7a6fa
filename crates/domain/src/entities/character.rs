//! Character entity - A combatant with a life gauge and an experience score

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::TypeTag;
use crate::ids::CharacterId;
use crate::value_objects::LifeGauge;

/// Experience score given to freshly created characters. The life gauge
/// starts at the same value, since experience caps life.
pub const DEFAULT_EXPERIENCE_POINTS: i64 = 20;

/// A battle participant.
///
/// Characters are mutated only by battle resolution (life and experience),
/// by an explicit kill, and by the timestamp refresh on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    #[serde(rename = "type")]
    pub type_tag: TypeTag,
    pub experience_points: i64,
    pub life_gauge: LifeGauge,
    /// When this character was last written by the application.
    pub last_checked: Option<DateTime<Utc>>,
}

impl Character {
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            type_tag,
            experience_points: DEFAULT_EXPERIENCE_POINTS,
            life_gauge: LifeGauge::Alive(DEFAULT_EXPERIENCE_POINTS),
            last_checked: None,
        }
    }

    /// Override the experience score, clamping the life gauge back under it.
    pub fn with_experience_points(mut self, experience_points: i64) -> Self {
        self.experience_points = experience_points;
        if let Some(points) = self.life_gauge.points() {
            self.life_gauge = LifeGauge::from_points(points.min(experience_points));
        }
        self
    }

    /// Override the life gauge. Points above the experience score are
    /// clamped down to it.
    pub fn with_life_gauge(mut self, points: i64) -> Self {
        self.life_gauge = LifeGauge::from_points(points.min(self.experience_points));
        self
    }

    /// Record that this character was written at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_checked = Some(now);
    }

    /// Put this character down for good.
    pub fn kill(&mut self) {
        self.life_gauge = LifeGauge::Dead;
    }

    pub fn gain_experience(&mut self, amount: i64) {
        self.experience_points += amount;
    }

    pub fn is_dead(&self) -> bool {
        self.life_gauge.is_dead()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_characters_start_at_the_default_score() {
        let octo = Character::new("octo", TypeTag::Geek);
        assert_eq!(octo.experience_points, DEFAULT_EXPERIENCE_POINTS);
        assert_eq!(octo.life_gauge, LifeGauge::Alive(DEFAULT_EXPERIENCE_POINTS));
        assert!(octo.last_checked.is_none());
    }

    #[test]
    fn life_gauge_is_capped_by_experience() {
        let octo = Character::new("octo", TypeTag::Geek)
            .with_experience_points(10)
            .with_life_gauge(50);
        assert_eq!(octo.life_gauge, LifeGauge::Alive(10));

        let weakened = Character::new("pus", TypeTag::Charmer).with_life_gauge(4);
        assert_eq!(weakened.life_gauge, LifeGauge::Alive(4));
    }

    #[test]
    fn lowering_experience_recaps_the_gauge() {
        let octo = Character::new("octo", TypeTag::Cleaner).with_experience_points(5);
        assert_eq!(octo.life_gauge, LifeGauge::Alive(5));
    }

    #[test]
    fn killed_characters_serialize_the_dead_sentinel() {
        let mut octo = Character::new("octo", TypeTag::Assassin);
        octo.kill();
        assert!(octo.is_dead());

        let value = serde_json::to_value(&octo).unwrap();
        assert_eq!(value["lifeGauge"], -1);
        assert_eq!(value["type"], "assassin");
    }

    #[test]
    fn experience_accumulates() {
        let mut octo = Character::new("octo", TypeTag::Functional);
        octo.gain_experience(2);
        octo.gain_experience(1);
        assert_eq!(octo.experience_points, DEFAULT_EXPERIENCE_POINTS + 3);
    }
}
