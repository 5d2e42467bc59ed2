use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::{FormatMode, GameFormat};
use fairway_core::scorecard::Scorecard;

/// Default pairing for individual games played as teams: first half of the
/// participant list against the second half, each folded to its best ball.
///
/// `None` unless there are at least four participants and an even count.
pub fn split_halves(cards: &[Scorecard]) -> Option<(Scorecard, Scorecard)> {
    let n = cards.len();
    if n < 4 || n % 2 != 0 {
        return None;
    }
    let (first, second) = cards.split_at(n / 2);
    Some((Scorecard::best_ball(first), Scorecard::best_ball(second)))
}

/// Which half of the participant list `index` falls in.
pub fn side_of(index: usize, participant_count: usize) -> usize {
    usize::from(index >= participant_count / 2)
}

/// Two-side best-ball on net totals.
///
/// With real teams the team cards are already folded, so this is stroke
/// play between teams.
pub struct BestBall;

impl SettlementFormat for BestBall {
    fn format(&self) -> GameFormat {
        GameFormat::BestBall
    }

    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout {
        if ctx.mode == FormatMode::Team {
            return Payout::Delegate(GameFormat::StrokePlay);
        }

        let n = ctx.participant_count();
        let Some((a, b)) = split_halves(&ctx.cards) else {
            tracing::debug!(
                participants = n,
                "Best ball needs an even number of players, at least four"
            );
            return Payout::Unchanged;
        };
        let common = Scorecard::common_holes(&[a, b]);
        let [a, b] = common.as_slice() else {
            return Payout::Unchanged;
        };
        if a.is_empty() || b.is_empty() {
            return Payout::Unchanged;
        }

        let winner = match a.total_net().cmp(&b.total_net()) {
            std::cmp::Ordering::Less => 0,
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Equal => return Payout::Winnings(vec![0.0; n]),
        };
        let winnings = (0..n)
            .map(|i| {
                if side_of(i, n) == winner {
                    ctx.bet_amount
                } else {
                    -ctx.bet_amount
                }
            })
            .collect();
        Payout::Winnings(winnings)
    }
}
