use std::ops::RangeInclusive;

use crate::config::SettlementConfig;
use crate::game::{FormatMode, GameFormat, GameSettings};
use crate::round::{PressRequest, Round, RoundType};
use crate::scorecard::{ScoringContext, Scorecard};

/// Strategy that turns one round's scorecards into winnings for one
/// wagering format.
///
/// Implementations are pure: the same context always produces the same
/// payout. The engine owns dispatch and the write-back of winnings.
pub trait SettlementFormat: Send + Sync {
    /// The format tag this strategy is registered under.
    fn format(&self) -> GameFormat;

    /// Compute the payout for the round described by `ctx`.
    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout;
}

/// Result of running a settlement strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Payout {
    /// One amount per participant, in participant order.
    Winnings(Vec<f64>),
    /// Leave stored winnings untouched.
    Unchanged,
    /// Settle with another format instead.
    Delegate(GameFormat),
}

/// Everything a strategy may read about a round.
#[derive(Debug, Clone)]
pub struct SettlementContext<'a> {
    pub format: GameFormat,
    pub mode: FormatMode,
    pub round_type: RoundType,
    pub bet_amount: f64,
    /// One derived scorecard per participant, in participant order.
    pub cards: Vec<Scorecard>,
    pub press_requests: &'a [PressRequest],
    pub config: &'a SettlementConfig,
}

impl<'a> SettlementContext<'a> {
    pub fn new(settings: &GameSettings, round: &'a Round, config: &'a SettlementConfig) -> Self {
        let scoring = ScoringContext::new(settings, round.round_type);
        let cards = round
            .participants
            .iter()
            .map(|p| scoring.participant_card(p))
            .collect();
        Self {
            format: settings.format,
            mode: settings.mode,
            round_type: round.round_type,
            bet_amount: round.bet_amount,
            cards,
            press_requests: &round.press_requests,
            config,
        }
    }

    pub fn participant_count(&self) -> usize {
        self.cards.len()
    }

    pub fn hole_range(&self) -> RangeInclusive<u8> {
        self.round_type.hole_range()
    }
}
