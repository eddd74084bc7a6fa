//! Turn-based battle resolution.
//!
//! The engine is a pure function over two characters and their ordered
//! language sequences: no I/O, no clock, no randomness. All mutation happens
//! on the two `Character` values passed in, and only after every precondition
//! has been checked, so an error always leaves both combatants untouched.

use std::cmp::Ordering;

use thiserror::Error;

use crate::catalog::{self, LanguageSpec};
use crate::entities::{Character, Language};
use crate::ids::CharacterId;

/// Why a battle request was refused. No strikes are resolved and no
/// character is mutated when any of these fire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("A character cannot battle itself")]
    SelfBattle,

    #[error("{name} is dead and cannot battle")]
    DeadCombatant { name: String },

    #[error("{name} has no languages to battle with")]
    NoLanguages { name: String },

    #[error("{name} has no experience points, which would divide a strike by zero")]
    ZeroExperience { name: String },

    #[error("{name} knows {language}, which is not in the language catalog")]
    UnknownLanguage { name: String, language: String },
}

/// The result of a resolved battle: who won (if anyone) and the full log,
/// ending with the victory or tie line.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleOutcome {
    pub winner_id: Option<CharacterId>,
    pub log: Vec<String>,
}

/// Resolve a battle between `challenger` and `challenged`.
///
/// Turns pair the two language sequences index by index and stop when the
/// shorter one runs out or a combatant dies. Within a turn the side whose
/// language has the higher catalog speed strikes first; a speed tie falls
/// back to the higher learned power level, and a full tie lets the
/// challenger lead. The second striker only acts if the first strike did
/// not kill.
///
/// A killing blow credits the striker 2 experience points on the spot.
/// After the loop, the side with the strictly higher remaining life gauge
/// wins and gains 1 more point; equal gauges are a tie and award nothing.
pub fn resolve(
    challenger: &mut Character,
    challenged: &mut Character,
    challenger_languages: &[Language],
    challenged_languages: &[Language],
) -> Result<BattleOutcome, BattleError> {
    if challenger.id == challenged.id {
        return Err(BattleError::SelfBattle);
    }
    if challenger.is_dead() {
        return Err(BattleError::DeadCombatant {
            name: challenger.name.clone(),
        });
    }
    if challenged.is_dead() {
        return Err(BattleError::DeadCombatant {
            name: challenged.name.clone(),
        });
    }
    if challenger_languages.is_empty() {
        return Err(BattleError::NoLanguages {
            name: challenger.name.clone(),
        });
    }
    if challenged_languages.is_empty() {
        return Err(BattleError::NoLanguages {
            name: challenged.name.clone(),
        });
    }
    // Experience only grows during a battle, so checking the divisors once
    // up front covers every later strike.
    if challenger.experience_points <= 0 {
        return Err(BattleError::ZeroExperience {
            name: challenger.name.clone(),
        });
    }
    if challenged.experience_points <= 0 {
        return Err(BattleError::ZeroExperience {
            name: challenged.name.clone(),
        });
    }

    let challenger_specs = resolve_specs(challenger, challenger_languages)?;
    let challenged_specs = resolve_specs(challenged, challenged_languages)?;

    let rounds = challenger_languages.len().min(challenged_languages.len());
    let mut log = Vec::new();

    for turn in 0..rounds {
        let challenger_ability = &challenger_languages[turn];
        let challenged_ability = &challenged_languages[turn];

        let challenger_first = match challenger_specs[turn].speed.cmp(&challenged_specs[turn].speed)
        {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => challenger_ability.power_level >= challenged_ability.power_level,
        };

        let someone_died = if challenger_first {
            exchange(
                challenger,
                challenged,
                challenger_ability,
                challenged_ability,
                &mut log,
            )
        } else {
            exchange(
                challenged,
                challenger,
                challenged_ability,
                challenger_ability,
                &mut log,
            )
        };

        if someone_died {
            break;
        }
    }

    let winner = match challenger.life_gauge.cmp(&challenged.life_gauge) {
        Ordering::Greater => Some(&mut *challenger),
        Ordering::Less => Some(&mut *challenged),
        Ordering::Equal => None,
    };

    let winner_id = match winner {
        Some(winner) => {
            winner.gain_experience(1);
            log.push(format!("{} won the battle!", winner.name));
            Some(winner.id)
        }
        None => {
            log.push("This match was a tie!".to_string());
            None
        }
    };

    Ok(BattleOutcome { winner_id, log })
}

/// Look up every learned language in the catalog, so speed reads and the
/// unknown-name precondition both happen before any strike.
fn resolve_specs(
    owner: &Character,
    languages: &[Language],
) -> Result<Vec<&'static LanguageSpec>, BattleError> {
    languages
        .iter()
        .map(|language| {
            catalog::language(&language.name).ok_or_else(|| BattleError::UnknownLanguage {
                name: owner.name.clone(),
                language: language.name.clone(),
            })
        })
        .collect()
}

/// One turn's exchange: the first striker attacks, and the second strikes
/// back only if still alive. Returns true when either combatant died.
fn exchange(
    first: &mut Character,
    second: &mut Character,
    first_ability: &Language,
    second_ability: &Language,
    log: &mut Vec<String>,
) -> bool {
    if strike(first, second, first_ability, log) {
        return true;
    }
    strike(second, first, second_ability, log)
}

/// Execute a single strike and return whether it killed the target.
///
/// Damage is `(striker experience * power level + weight) / target
/// experience`, halved when the striker's type does not match the
/// language's, then rounded to the nearest life point so the logged number
/// is exactly what the gauge loses. The same convention applies to both
/// sides of a turn.
fn strike(
    striker: &mut Character,
    target: &mut Character,
    language: &Language,
    log: &mut Vec<String>,
) -> bool {
    let raw = (striker.experience_points * language.power_level + language.weight) as f64
        / target.experience_points as f64;
    let effective = if striker.type_tag == language.type_tag {
        raw
    } else {
        raw / 2.0
    };
    let damage = effective.round() as i64;

    log.push(format!(
        "{} (hp: {}) attacks {} (hp: {}) with the {} language. Power level: {}; Weight: {}. Took {} damage",
        striker.name,
        i64::from(striker.life_gauge),
        target.name,
        i64::from(target.life_gauge),
        language.name,
        language.power_level,
        language.weight,
        damage
    ));

    target.life_gauge = target.life_gauge.take_damage(damage);

    if target.is_dead() {
        log.push(format!("{} died.", target.name));
        striker.gain_experience(2);
        return true;
    }
    false
}
