use std::ops::RangeInclusive;

use serde::Serialize;

use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;
use fairway_core::scorecard::Scorecard;

/// What happened on one hole of a skins game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum SkinOutcome {
    /// Outright low net. `amount` includes any carried pot.
    Won { hole: u8, winner: usize, amount: f64 },
    /// Tied for low net; the pot rolls forward.
    Carried { hole: u8 },
    /// Tied with carry-overs disabled.
    Dead { hole: u8 },
    /// Not every side has scored the hole yet.
    Skipped { hole: u8 },
}

/// Full replay of a skins game from the first hole of the round.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinsLedger {
    pub winnings: Vec<f64>,
    pub holes_won: Vec<u8>,
    /// Pot waiting for the next decided hole.
    pub carry_over: f64,
    /// Consecutive tied holes feeding `carry_over`.
    pub carried_holes: u8,
    pub outcomes: Vec<SkinOutcome>,
}

impl SkinsLedger {
    /// Replay every hole from the start of `range` to the last hole anyone
    /// has scored. Never incremental: the carry-over depends on the whole
    /// hole history.
    pub fn replay(cards: &[Scorecard], range: RangeInclusive<u8>, bet: f64, carry_over: bool) -> Self {
        let n = cards.len();
        let mut ledger = Self {
            winnings: vec![0.0; n],
            holes_won: vec![0; n],
            carry_over: 0.0,
            carried_holes: 0,
            outcomes: Vec::new(),
        };
        let Some(last) = cards.iter().filter_map(|c| c.restrict(range.clone()).last_hole()).max()
        else {
            return ledger;
        };

        for hole in range.filter(|&h| h <= last) {
            let nets: Option<Vec<i32>> = cards.iter().map(|c| c.net(hole)).collect();
            let Some(nets) = nets else {
                ledger.outcomes.push(SkinOutcome::Skipped { hole });
                continue;
            };
            let Some(&low) = nets.iter().min() else {
                continue;
            };
            let mut at_low = nets.iter().enumerate().filter(|&(_, &net)| net == low);
            let Some((winner, _)) = at_low.next() else {
                continue;
            };

            if at_low.next().is_none() {
                let amount = bet * (n - 1) as f64 + ledger.carry_over;
                for (i, w) in ledger.winnings.iter_mut().enumerate() {
                    if i == winner {
                        *w += amount;
                    } else {
                        *w -= bet;
                    }
                }
                ledger.holes_won[winner] += 1;
                ledger.outcomes.push(SkinOutcome::Won {
                    hole,
                    winner,
                    amount,
                });
                ledger.carry_over = 0.0;
                ledger.carried_holes = 0;
            } else if carry_over {
                ledger.carry_over += bet * n as f64;
                ledger.carried_holes += 1;
                ledger.outcomes.push(SkinOutcome::Carried { hole });
            } else {
                ledger.outcomes.push(SkinOutcome::Dead { hole });
            }
        }
        ledger
    }
}

/// Low net wins each hole; ties carry the pot to the next decided hole.
pub struct Skins;

impl SettlementFormat for Skins {
    fn format(&self) -> GameFormat {
        GameFormat::Skins
    }

    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout {
        let ledger = SkinsLedger::replay(
            &ctx.cards,
            ctx.hole_range(),
            ctx.bet_amount,
            ctx.config.skins.carry_over,
        );
        if ledger.carry_over > 0.0 {
            tracing::debug!(
                pot = ledger.carry_over,
                holes = ledger.carried_holes,
                "Skins pot still carrying after last scored hole"
            );
        }
        Payout::Winnings(ledger.winnings)
    }
}
