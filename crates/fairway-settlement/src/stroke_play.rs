use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;
use fairway_core::scorecard::Scorecard;

/// Low net total takes the pot. Tied leaders split the winning share.
pub struct StrokePlay;

/// Winnings for a pot of `bet` per participant going to the lowest total.
///
/// Each player at the low total gets `pot / tied - bet`; everyone else pays
/// `bet`.
pub fn split_pot(totals: &[i32], bet: f64) -> Vec<f64> {
    let Some(&low) = totals.iter().min() else {
        return Vec::new();
    };
    let tied = totals.iter().filter(|&&t| t == low).count();
    let pot = bet * totals.len() as f64;
    let share = pot / tied as f64 - bet;
    totals
        .iter()
        .map(|&t| if t == low { share } else { -bet })
        .collect()
}

impl SettlementFormat for StrokePlay {
    fn format(&self) -> GameFormat {
        GameFormat::StrokePlay
    }

    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout {
        let common = Scorecard::common_holes(&ctx.cards);
        if common.is_empty() || common.iter().any(Scorecard::is_empty) {
            tracing::debug!("Stroke play waits until every participant has a score");
            return Payout::Unchanged;
        }
        let totals: Vec<i32> = common.iter().map(Scorecard::total_net).collect();
        Payout::Winnings(split_pot(&totals, ctx.bet_amount))
    }
}
