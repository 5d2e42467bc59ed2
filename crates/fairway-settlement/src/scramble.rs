use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;
use fairway_core::scorecard::Scorecard;

/// The whole field plays as one team. Each participant is credited an equal
/// share of the bet; this is a team payout, not a transfer between players,
/// so it does not sum to zero.
pub struct Scramble;

/// Team gross: per-hole lowest gross across everyone, summed.
pub fn team_gross(cards: &[Scorecard]) -> i32 {
    Scorecard::best_ball(cards).total_gross()
}

impl SettlementFormat for Scramble {
    fn format(&self) -> GameFormat {
        GameFormat::Scramble
    }

    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout {
        let n = ctx.participant_count();
        if n == 0 {
            return Payout::Unchanged;
        }
        tracing::debug!(team_gross = team_gross(&ctx.cards), "Scramble team total");
        Payout::Winnings(vec![ctx.bet_amount / n as f64; n])
    }
}
