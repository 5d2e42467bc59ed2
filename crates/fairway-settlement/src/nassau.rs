use std::ops::RangeInclusive;

use serde::Serialize;

use fairway_core::config::NassauConfig;
use fairway_core::format_trait::{Payout, SettlementContext, SettlementFormat};
use fairway_core::game::GameFormat;
use fairway_core::round::{NassauBet, PressRequest, RoundType};
use fairway_core::scorecard::Scorecard;

use crate::best_ball::{side_of, split_halves};
use crate::match_play::MatchTally;

/// Where a Nassau bet came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BetKind {
    Front,
    Back,
    Overall,
    /// A press on the bet at index `parent`, starting at `from_hole`.
    Press { parent: usize, from_hole: u8 },
}

/// One match-play bet inside a Nassau: a base bet or a press.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NassauBetState {
    pub kind: BetKind,
    /// The base bet this one belongs to. Presses inherit it from their parent.
    pub base: NassauBet,
    pub first_hole: u8,
    pub last_hole: u8,
    pub tally: MatchTally,
}

impl NassauBetState {
    fn base_bet(base: NassauBet) -> Self {
        let range = base.hole_range();
        let kind = match base {
            NassauBet::Front => BetKind::Front,
            NassauBet::Back => BetKind::Back,
            NassauBet::Overall => BetKind::Overall,
        };
        Self {
            kind,
            base,
            first_hole: *range.start(),
            last_hole: *range.end(),
            tally: MatchTally::default(),
        }
    }

    pub fn range(&self) -> RangeInclusive<u8> {
        self.first_hole..=self.last_hole
    }

    pub fn is_press(&self) -> bool {
        matches!(self.kind, BetKind::Press { .. })
    }

    pub fn label(&self) -> String {
        let base = match self.base {
            NassauBet::Front => "Front 9",
            NassauBet::Back => "Back 9",
            NassauBet::Overall => "Overall",
        };
        match self.kind {
            BetKind::Press { from_hole, .. } => format!("{base} press from {from_hole}"),
            _ => base.to_string(),
        }
    }
}

/// Front, back and overall bets plus every press that took effect, replayed
/// from the full hole history of two sides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NassauState {
    pub bets: Vec<NassauBetState>,
}

impl NassauState {
    pub fn replay(
        a: &Scorecard,
        b: &Scorecard,
        requests: &[PressRequest],
        config: &NassauConfig,
    ) -> Self {
        let mut state = Self {
            bets: [NassauBet::Front, NassauBet::Back, NassauBet::Overall]
                .into_iter()
                .map(NassauBetState::base_bet)
                .collect(),
        };

        let mut requests = requests.to_vec();
        requests.sort_by_key(|r| r.from_hole);
        requests.dedup();
        for request in &requests {
            let parent = match request.bet {
                NassauBet::Front => 0,
                NassauBet::Back => 1,
                NassauBet::Overall => 2,
            };
            if !state.try_press(a, b, parent, request.from_hole, config.press_threshold) {
                tracing::debug!(
                    bet = ?request.bet,
                    from_hole = request.from_hole,
                    "Press request ignored"
                );
            }
        }

        if config.auto_press {
            state.auto_press(a, b, config.press_threshold);
        }

        for bet in &mut state.bets {
            bet.tally = MatchTally::compute(a, b, bet.range());
        }
        state
    }

    /// Open a press on `parent` from `from_hole` if, over the holes before
    /// it, one side is at least `threshold` down and the bet is still live.
    fn try_press(
        &mut self,
        a: &Scorecard,
        b: &Scorecard,
        parent: usize,
        from_hole: u8,
        threshold: u8,
    ) -> bool {
        let Some(bet) = self.bets.get(parent) else {
            return false;
        };
        if from_hole <= bet.first_hole || from_hole > bet.last_hole {
            return false;
        }
        let already_open = self.bets.iter().any(|open| {
            open.kind
                == BetKind::Press {
                    parent,
                    from_hole,
                }
        });
        if already_open {
            return false;
        }

        let standing = MatchTally::through(a, b, bet.range(), from_hole - 1);
        if standing.up() < threshold.max(1) || standing.is_decided() {
            return false;
        }

        tracing::debug!(
            bet = ?bet.base,
            from_hole,
            down = standing.up(),
            "Press opened"
        );
        let press = NassauBetState {
            kind: BetKind::Press { parent, from_hole },
            base: bet.base,
            first_hole: from_hole,
            last_hole: bet.last_hole,
            tally: MatchTally::default(),
        };
        self.bets.push(press);
        true
    }

    /// Walk the round hole by hole, pressing each bet (presses included)
    /// the first time it reaches the threshold.
    fn auto_press(&mut self, a: &Scorecard, b: &Scorecard, threshold: u8) {
        let mut pressed = vec![false; self.bets.len()];
        let last = self.bets.iter().map(|bet| bet.last_hole).max().unwrap_or(0);
        for hole in 2..=last {
            let mut i = 0;
            while i < self.bets.len() {
                if !pressed[i] && self.try_press(a, b, i, hole, threshold) {
                    pressed[i] = true;
                    pressed.push(false);
                }
                i += 1;
            }
        }
    }

    /// Net bets won by each side: +1 per bet led, -1 per bet trailed.
    pub fn side_units(&self) -> [i32; 2] {
        let mut units = [0; 2];
        for bet in &self.bets {
            if let Some(leader) = bet.tally.leader() {
                units[leader] += 1;
                units[1 - leader] -= 1;
            }
        }
        units
    }

    pub fn presses(&self) -> impl Iterator<Item = &NassauBetState> {
        self.bets.iter().filter(|b| b.is_press())
    }
}

/// The two sides a Nassau is played between, if the field allows one.
///
/// Two participants play each other directly; an even field of four or more
/// splits into halves by list order, each side playing its best ball.
pub fn nassau_sides(cards: &[Scorecard]) -> Option<(Scorecard, Scorecard)> {
    match cards {
        [a, b] => Some((a.clone(), b.clone())),
        _ => split_halves(cards),
    }
}

/// Front nine, back nine and overall match-play bets, with presses.
pub struct Nassau;

impl SettlementFormat for Nassau {
    fn format(&self) -> GameFormat {
        GameFormat::Nassau
    }

    fn settle(&self, ctx: &SettlementContext<'_>) -> Payout {
        let n = ctx.participant_count();
        let Some((a, b)) = nassau_sides(&ctx.cards) else {
            tracing::debug!(participants = n, "Nassau needs two sides, falling back");
            return Payout::Delegate(GameFormat::StrokePlay);
        };
        if ctx.round_type != RoundType::Full18 {
            tracing::debug!(round_type = ?ctx.round_type, "Nassau only settles full rounds");
            return Payout::Unchanged;
        }

        let state = NassauState::replay(&a, &b, ctx.press_requests, &ctx.config.nassau);
        let units = state.side_units();
        let share = ctx.bet_amount / (n / 2) as f64;
        let winnings = (0..n)
            .map(|i| f64::from(units[side_of(i, n)]) * share)
            .collect();
        Payout::Winnings(winnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairway_core::config::SettlementConfig;
    use fairway_core::round::Round;
    use fairway_core::test_helpers::{
        contract_idempotent, contract_one_entry_per_participant, contract_zero_sum,
        individual_round, settings,
    };

    const PAR_ROW: [u32; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 5, 4, 4, 4, 3, 5, 4];

    /// Par on every hole, one under on the listed holes.
    fn birdies_on(holes: &[usize]) -> Vec<u32> {
        let mut row = PAR_ROW.to_vec();
        for &h in holes {
            row[h - 1] -= 1;
        }
        row
    }

    fn settle(round: &Round, config: &SettlementConfig) -> (Payout, NassauState) {
        let ctx = SettlementContext::new(&settings(GameFormat::Nassau), round, config);
        let state = NassauState::replay(
            &ctx.cards[0],
            &ctx.cards[1],
            ctx.press_requests,
            &config.nassau,
        );
        (Nassau.settle(&ctx), state)
    }

    #[test]
    fn three_bets_settle_independently() {
        // Front and overall to player 1, back to player 2.
        let round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1, 2]), &birdies_on(&[10])],
        );
        let config = SettlementConfig::default();
        let (payout, state) = settle(&round, &config);

        assert_eq!(state.bets.len(), 3);
        assert_eq!(state.bets[0].tally.leader(), Some(0));
        assert_eq!(state.bets[1].tally.leader(), Some(1));
        assert_eq!(state.bets[2].tally.leader(), Some(0));
        assert_eq!(state.side_units(), [1, -1]);
        assert_eq!(payout, Payout::Winnings(vec![10.0, -10.0]));
    }

    #[test]
    fn partial_round_type_is_a_no_op() {
        let round = individual_round(RoundType::Front9, 10.0, &[&PAR_ROW[..9], &PAR_ROW[..9]]);
        let config = SettlementConfig::default();
        let ctx = SettlementContext::new(&settings(GameFormat::Nassau), &round, &config);
        assert_eq!(Nassau.settle(&ctx), Payout::Unchanged);
    }

    #[test]
    fn manual_press_pays_on_its_own() {
        // Player 1 goes 2 up through 2; player 2 wins holes 3 and 4.
        let mut round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1, 2]), &birdies_on(&[3, 4])],
        );
        round.request_press(NassauBet::Front, 3);
        let config = SettlementConfig::default();
        let (payout, state) = settle(&round, &config);

        let presses: Vec<_> = state.presses().collect();
        assert_eq!(presses.len(), 1);
        assert_eq!(presses[0].range(), 3..=9);
        assert_eq!(presses[0].tally.leader(), Some(1));
        assert_eq!(presses[0].label(), "Front 9 press from 3");
        // Front and overall are square; only the press pays.
        assert_eq!(payout, Payout::Winnings(vec![-10.0, 10.0]));
    }

    #[test]
    fn press_needs_the_threshold() {
        let mut round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1, 2]), &birdies_on(&[3, 4])],
        );
        // Only 1 down after hole 1.
        round.request_press(NassauBet::Front, 2);
        // Not inside the back nine's range.
        round.request_press(NassauBet::Back, 5);
        let config = SettlementConfig::default();
        let (payout, state) = settle(&round, &config);

        assert_eq!(state.presses().count(), 0);
        assert_eq!(payout, Payout::Winnings(vec![0.0, 0.0]));
    }

    #[test]
    fn press_on_a_decided_bet_is_ignored() {
        // Player 1 wins the first five holes: 5 up with 4 to play on the front.
        let mut round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1, 2, 3, 4, 5]), &PAR_ROW],
        );
        round.request_press(NassauBet::Front, 6);
        let config = SettlementConfig::default();
        let (_, state) = settle(&round, &config);
        assert_eq!(state.presses().count(), 0);
    }

    #[test]
    fn auto_press_opens_once_per_bet() {
        let round = individual_round(RoundType::Full18, 10.0, &[&birdies_on(&[1, 2]), &PAR_ROW]);
        let mut config = SettlementConfig::default();
        config.nassau.auto_press = true;
        let (payout, state) = settle(&round, &config);

        let presses: Vec<_> = state.presses().map(|p| p.kind).collect();
        assert_eq!(
            presses,
            vec![
                BetKind::Press {
                    parent: 0,
                    from_hole: 3
                },
                BetKind::Press {
                    parent: 2,
                    from_hole: 3
                },
            ]
        );
        // Presses halved; front and overall to player 1.
        assert_eq!(payout, Payout::Winnings(vec![20.0, -20.0]));
    }

    #[test]
    fn auto_press_chains_onto_presses() {
        // 2 up after hole 2 opens a press from 3; winning 3 and 4 puts that
        // press 2 up as well.
        let round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1, 2, 3, 4]), &PAR_ROW],
        );
        let mut config = SettlementConfig::default();
        config.nassau.auto_press = true;
        let (_, state) = settle(&round, &config);

        assert!(state.bets.iter().any(|b| b.kind
            == BetKind::Press {
                parent: 3,
                from_hole: 5
            }));
    }

    #[test]
    fn even_field_splits_into_halves() {
        // Side A wins hole 1 only: front and overall, back halved.
        let round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1]), &PAR_ROW, &PAR_ROW, &PAR_ROW],
        );
        let config = SettlementConfig::default();
        let ctx = SettlementContext::new(&settings(GameFormat::Nassau), &round, &config);

        let payout = contract_zero_sum(&Nassau, &ctx, 1e-9);
        assert_eq!(payout, Payout::Winnings(vec![10.0, 10.0, -10.0, -10.0]));
        contract_one_entry_per_participant(&Nassau, &ctx);
    }

    #[test]
    fn odd_field_falls_back_to_stroke_play() {
        let round = individual_round(RoundType::Full18, 10.0, &[&PAR_ROW, &PAR_ROW, &PAR_ROW]);
        let config = SettlementConfig::default();
        let ctx = SettlementContext::new(&settings(GameFormat::Nassau), &round, &config);
        assert_eq!(Nassau.settle(&ctx), Payout::Delegate(GameFormat::StrokePlay));
    }

    #[test]
    fn replay_is_idempotent() {
        let mut round = individual_round(
            RoundType::Full18,
            10.0,
            &[&birdies_on(&[1, 2, 12]), &birdies_on(&[3, 4, 15])],
        );
        round.request_press(NassauBet::Overall, 3);
        let config = SettlementConfig::default();
        let ctx = SettlementContext::new(&settings(GameFormat::Nassau), &round, &config);
        contract_idempotent(&Nassau, &ctx);
        contract_zero_sum(&Nassau, &ctx, 1e-9);
    }
}
