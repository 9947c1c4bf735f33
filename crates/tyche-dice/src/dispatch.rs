//! Routing one input string to the first system that recognizes it.

use serde::Serialize;
use tracing::{debug, trace};

use crate::config::DiceConfig;
use crate::error::ParseResult;
use crate::source::DieSource;
use crate::system::{
    Apocalypse, DiceSystem, Generic, RollSpec, SystemKind, WorldOfDarkness,
};

/// A finished roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rolled {
    /// The system that claimed the input.
    pub system: SystemKind,
    /// What was rolled.
    pub spec: RollSpec,
    /// Raw faces in the order they were drawn.
    pub faces: Vec<u32>,
    /// The rendered result.
    pub text: String,
}

impl std::fmt::Display for Rolled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A configured system instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum System {
    Generic(Generic),
    WorldOfDarkness(WorldOfDarkness),
    Apocalypse(Apocalypse),
}

impl System {
    fn build(kind: SystemKind, config: &DiceConfig) -> Self {
        match kind {
            SystemKind::Generic => Self::Generic(Generic {
                max_dice: config.max_dice,
            }),
            SystemKind::WorldOfDarkness => Self::WorldOfDarkness(WorldOfDarkness {
                max_dice: config.max_dice,
                max_explosion_rounds: config.max_explosion_rounds.max(1),
            }),
            SystemKind::Apocalypse => Self::Apocalypse(Apocalypse),
        }
    }

    fn kind(&self) -> SystemKind {
        match self {
            Self::Generic(s) => s.kind(),
            Self::WorldOfDarkness(s) => s.kind(),
            Self::Apocalypse(s) => s.kind(),
        }
    }

    fn evaluate<D: DieSource + ?Sized>(&self, input: &str, dice: &mut D) -> ParseResult<Rolled> {
        match self {
            Self::Generic(s) => s.evaluate(input, dice),
            Self::WorldOfDarkness(s) => s.evaluate(input, dice),
            Self::Apocalypse(s) => s.evaluate(input, dice),
        }
    }
}

/// Tries each system in a fixed order; the first to parse owns the roll.
///
/// Holds no mutable state, so one dispatcher can serve any number of
/// concurrent callers, each bringing its own [`DieSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    systems: Vec<System>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::from_config(&DiceConfig::default())
    }
}

impl Dispatcher {
    /// Systems in the given order, with default limits.
    pub fn new(order: impl IntoIterator<Item = SystemKind>) -> Self {
        Self::from_config(&DiceConfig::default().with_systems(order))
    }

    /// Systems and limits taken from `config`.
    pub fn from_config(config: &DiceConfig) -> Self {
        Self {
            systems: config
                .systems
                .iter()
                .map(|&kind| System::build(kind, config))
                .collect(),
        }
    }

    /// The dispatch order.
    pub fn order(&self) -> Vec<SystemKind> {
        self.systems.iter().map(System::kind).collect()
    }

    /// Roll `input` with the first system that parses it.
    ///
    /// Returns `None` when every system rejects the input.
    pub fn roll<D: DieSource + ?Sized>(&self, input: &str, dice: &mut D) -> Option<Rolled> {
        for system in &self.systems {
            match system.evaluate(input, dice) {
                Ok(rolled) => {
                    debug!(system = %rolled.system, input, faces = rolled.faces.len(), "rolled");
                    return Some(rolled);
                }
                Err(err) => trace!(system = %system.kind(), %err, "rejected"),
            }
        }
        debug!(input, "no dice system recognized input");
        None
    }

    /// Like [`Dispatcher::roll`], keeping only the rendered text.
    pub fn roll_text<D: DieSource + ?Sized>(&self, input: &str, dice: &mut D) -> Option<String> {
        self.roll(input, dice).map(|rolled| rolled.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RngSource, ScriptedDice};
    use crate::system::{GenericRoll, MoveRoll, PoolRoll};

    #[test]
    fn default_order() {
        assert_eq!(Dispatcher::default().order(), SystemKind::ALL.to_vec());
    }

    #[test]
    fn generic_claims_dice_notation() {
        let mut dice = ScriptedDice::new([3, 4]);
        let rolled = Dispatcher::default().roll("2d6+1", &mut dice).unwrap();
        assert_eq!(rolled.system, SystemKind::Generic);
        assert_eq!(
            rolled.spec,
            RollSpec::Generic(GenericRoll {
                count: 2,
                sides: 6,
                modifier: 1
            })
        );
        assert_eq!(rolled.text, "3, 4 [+1] (total 8)");
    }

    #[test]
    fn bare_number_falls_through_to_pool() {
        let mut dice = ScriptedDice::new([8, 2, 1]);
        let rolled = Dispatcher::default().roll("3", &mut dice).unwrap();
        assert_eq!(rolled.system, SystemKind::WorldOfDarkness);
        assert_eq!(
            rolled.spec,
            RollSpec::Pool(PoolRoll {
                count: 3,
                explode_at: 10,
                rote: false
            })
        );
        assert_eq!(rolled.text, "Success [1]\n(8, 2, 1)");
    }

    #[test]
    fn signed_number_reaches_apocalypse() {
        let mut dice = ScriptedDice::new([5, 4]);
        let rolled = Dispatcher::default().roll("+3", &mut dice).unwrap();
        assert_eq!(rolled.system, SystemKind::Apocalypse);
        assert_eq!(rolled.spec, RollSpec::Move(MoveRoll { modifier: 3 }));
        assert_eq!(rolled.text, "Exceptional hit [12]");
    }

    #[test]
    fn unrecognized_input_yields_nothing() {
        let mut dice = ScriptedDice::new([]);
        assert_eq!(Dispatcher::default().roll("xyz", &mut dice), None);
        assert_eq!(Dispatcher::default().roll_text("", &mut dice), None);
    }

    #[test]
    fn rejected_input_consumes_no_dice() {
        let mut dice = ScriptedDice::new([6, 6]);
        assert!(Dispatcher::default().roll("5e6", &mut dice).is_none());
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn order_decides_ambiguous_input() {
        // "5e8" is a pool for the default order; drop the pool roller and
        // nothing else recognizes it.
        let only_generic = Dispatcher::new([SystemKind::Generic, SystemKind::Apocalypse]);
        assert!(only_generic.roll("5e8", &mut ScriptedDice::new([])).is_none());

        let pool_first = Dispatcher::new([SystemKind::WorldOfDarkness, SystemKind::Generic]);
        let rolled = pool_first
            .roll("2d6", &mut ScriptedDice::new([7, 3]))
            .unwrap();
        assert_eq!(rolled.system, SystemKind::WorldOfDarkness);
    }

    #[test]
    fn rejected_dice_notation_falls_through_to_pool() {
        // A generic rejection is just another ParseError; the pool roller
        // still reads the leading count.
        let dispatcher = Dispatcher::default();
        for input in ["2d0", "2d6+99999999999999999999"] {
            let rolled = dispatcher
                .roll(input, &mut ScriptedDice::new([8, 3]))
                .unwrap();
            assert_eq!(rolled.system, SystemKind::WorldOfDarkness, "{input:?}");
        }
        let rolled = dispatcher
            .roll("2d0", &mut ScriptedDice::new([8, 3]))
            .unwrap();
        assert_eq!(rolled.text, "Success [1]\n(8, 3)");

        let small = Dispatcher::from_config(&DiceConfig::default().with_max_dice(10));
        let rolled = small.roll("9d6", &mut ScriptedDice::new([])).unwrap();
        assert_eq!(rolled.system, SystemKind::Generic);
        // Past the limit both rollers reject the count.
        assert!(small.roll("11d6", &mut ScriptedDice::new([])).is_none());
    }

    #[test]
    fn extreme_modifiers_roll_without_overflow() {
        let dispatcher = Dispatcher::default();
        assert_eq!(
            dispatcher.roll_text("d6+9223372036854775807", &mut ScriptedDice::new([3])),
            Some("3 [+9223372036854775807] (total 9223372036854775810)".to_string())
        );
        assert_eq!(
            dispatcher.roll_text("+9223372036854775807", &mut ScriptedDice::new([3, 3])),
            Some("Exceptional hit [9223372036854775813]".to_string())
        );
    }

    #[test]
    fn config_limits_reach_systems() {
        let config = DiceConfig::default().with_max_dice(5);
        let dispatcher = Dispatcher::from_config(&config);
        assert!(dispatcher.roll("6d6", &mut ScriptedDice::new([])).is_none());
        assert!(dispatcher.roll("5d6", &mut ScriptedDice::new([])).is_some());
    }

    #[test]
    fn rolled_displays_its_text() {
        let rolled = Dispatcher::default()
            .roll("-1", &mut ScriptedDice::new([2, 2]))
            .unwrap();
        assert_eq!(rolled.to_string(), "Miss [3]");
    }

    #[test]
    fn rolled_serializes() {
        let rolled = Dispatcher::default()
            .roll("d4", &mut ScriptedDice::new([3]))
            .unwrap();
        let json = serde_json::to_value(&rolled).unwrap();
        assert_eq!(json["system"], "generic");
        assert_eq!(json["spec"]["generic"]["sides"], 4);
        assert_eq!(json["faces"][0], 3);
        assert_eq!(json["text"], "3 (total 3)");
    }

    #[test]
    fn concurrent_rolls_share_one_dispatcher() {
        let dispatcher = Dispatcher::default();
        std::thread::scope(|scope| {
            for seed in 0..4 {
                let dispatcher = &dispatcher;
                scope.spawn(move || {
                    let mut dice = RngSource::seeded(seed);
                    for _ in 0..50 {
                        assert!(dispatcher.roll("3d6+2", &mut dice).is_some());
                        assert!(dispatcher.roll("6e8r", &mut dice).is_some());
                    }
                });
            }
        });
    }
}
