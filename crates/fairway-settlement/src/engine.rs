use serde::Serialize;

use fairway_core::config::SettlementConfig;
use fairway_core::format_registry::FormatRegistry;
use fairway_core::format_trait::{Payout, SettlementContext};
use fairway_core::game::{FormatMode, Game, GameFormat, GameSettings};
use fairway_core::round::Round;

use crate::default_registry;

/// What one call to [`SettlementEngine::settle`] did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settlement {
    /// The game's own format.
    pub requested: GameFormat,
    /// The last format consulted after following fallbacks. `None` if no
    /// strategy was registered for a format in the chain.
    pub applied: Option<GameFormat>,
    /// Whether participants' winnings were overwritten.
    pub written: bool,
    /// Sum of all participants' winnings after settlement.
    pub ledger_total: f64,
}

impl Settlement {
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.ledger_total.abs() <= tolerance
    }
}

/// Dispatches rounds to the registered format strategy and writes winnings
/// back. The only component that mutates a round.
#[derive(Debug)]
pub struct SettlementEngine {
    registry: FormatRegistry,
    config: SettlementConfig,
}

impl Default for SettlementEngine {
    fn default() -> Self {
        Self::new(SettlementConfig::default())
    }
}

impl SettlementEngine {
    /// Engine with every built-in format registered.
    pub fn new(config: SettlementConfig) -> Self {
        Self::with_registry(default_registry(), config)
    }

    /// Engine configured from `FAIRWAY_SETTLEMENT_CONFIG` or
    /// `config/settlement.toml`.
    pub fn from_env() -> Self {
        Self::new(SettlementConfig::load())
    }

    pub fn with_registry(registry: FormatRegistry, config: SettlementConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Follow the format chain from the game's format until a strategy
    /// produces winnings or declines.
    fn resolve(&self, settings: &GameSettings, round: &Round) -> (Option<GameFormat>, Option<Vec<f64>>) {
        let ctx = SettlementContext::new(settings, round, &self.config);
        let mut format = settings.format;
        let mut visited = Vec::new();
        loop {
            if visited.contains(&format) {
                tracing::warn!(format = ?format, "Settlement fallback loop, leaving winnings unchanged");
                return (Some(format), None);
            }
            visited.push(format);

            let Some(strategy) = self.registry.get(format) else {
                tracing::warn!(format = ?format, "No settlement strategy registered");
                return (None, None);
            };
            match strategy.settle(&ctx) {
                Payout::Winnings(winnings) => return (Some(format), Some(winnings)),
                Payout::Unchanged => return (Some(format), None),
                Payout::Delegate(next) => {
                    tracing::debug!(from = ?format, to = ?next, "Settlement format falls back");
                    format = next;
                },
            }
        }
    }

    /// Winnings the round would settle to, without touching it. `None` when
    /// settlement would leave stored winnings unchanged.
    pub fn compute(&self, settings: &GameSettings, round: &Round) -> Option<(GameFormat, Vec<f64>)> {
        match self.resolve(settings, round) {
            (Some(format), Some(winnings)) => Some((format, winnings)),
            _ => None,
        }
    }

    /// Recompute and store every participant's winnings for `round`.
    ///
    /// Always a full replay of the round's scores; calling it again on
    /// unchanged scores writes the same values.
    pub fn settle(&self, settings: &GameSettings, round: &mut Round) -> Settlement {
        if !round.matches_mode(settings.mode == FormatMode::Team) {
            tracing::debug!(mode = ?settings.mode, "Round participants do not match the game mode");
        }

        let (applied, winnings) = self.resolve(settings, round);
        let mut written = false;
        if let Some(winnings) = winnings {
            if winnings.len() == round.participants.len() {
                for (participant, amount) in round.participants.iter_mut().zip(winnings) {
                    participant.set_winnings(amount);
                }
                written = true;
            } else {
                tracing::warn!(
                    expected = round.participants.len(),
                    got = winnings.len(),
                    "Strategy returned the wrong number of winnings, ignoring"
                );
            }
        }

        let settlement = Settlement {
            requested: settings.format,
            applied,
            written,
            ledger_total: round.ledger_total(),
        };
        tracing::debug!(
            format = ?settings.format,
            applied = ?settlement.applied,
            written,
            ledger_total = settlement.ledger_total,
            "Round settled"
        );
        settlement
    }

    /// Settle every round of a game, in order.
    pub fn settle_game(&self, game: &mut Game) -> Vec<Settlement> {
        let settings = &game.settings;
        game.rounds
            .iter_mut()
            .map(|round| self.settle(settings, round))
            .collect()
    }
}
