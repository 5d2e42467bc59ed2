pub mod config;
pub mod course;
pub mod format_registry;
pub mod format_trait;
pub mod game;
pub mod handicap;
pub mod player;
pub mod round;
pub mod scorecard;
pub mod team;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::course::{Course, Gender, Hole, Tee, TeeRating};
    use crate::format_trait::{Payout, SettlementContext, SettlementFormat};
    use crate::game::{FormatMode, GameFormat, GameSettings};
    use crate::player::{Player, PlayerId};
    use crate::round::{
        HandicapAllowance, Participant, PlayerScore, Round, RoundType, Team, TeamScore,
        TeamScoringType,
    };

    const PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 4, 5, 4, 3, 5, 4, 4, 4, 3, 5, 4];
    const RANKS: [u8; 18] = [7, 11, 15, 1, 3, 9, 17, 13, 5, 8, 16, 2, 10, 4, 12, 18, 6, 14];

    /// A par-72 course. The "White" men's tee is rated 72.0 / 113, so a
    /// course handicap there equals the rounded handicap index.
    pub fn standard_course() -> Course {
        let holes = (1..=18u8)
            .map(|n| Hole {
                number: n,
                par: PARS[n as usize - 1],
                handicap_rank: RANKS[n as usize - 1],
            })
            .collect();
        Course {
            name: "Test Links".to_string(),
            holes,
            tees: vec![
                Tee {
                    name: "White".to_string(),
                    mens: Some(TeeRating {
                        rating: 72.0,
                        slope: 113,
                    }),
                    womens: Some(TeeRating {
                        rating: 74.0,
                        slope: 125,
                    }),
                },
                Tee {
                    name: "Blue".to_string(),
                    mens: Some(TeeRating {
                        rating: 75.3,
                        slope: 135,
                    }),
                    womens: None,
                },
            ],
        }
    }

    /// Individual-mode settings on the standard course, White tees, bet 10.
    pub fn settings(format: GameFormat) -> GameSettings {
        GameSettings {
            name: format!("{} test", format.display_name()),
            format,
            mode: FormatMode::Individual,
            course: standard_course(),
            tee: "White".to_string(),
            gender: Gender::Male,
            default_bet: 10.0,
            par_override: None,
        }
    }

    pub fn team_settings(format: GameFormat) -> GameSettings {
        GameSettings {
            mode: FormatMode::Team,
            ..settings(format)
        }
    }

    /// Create `n` scratch players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| Player::new(i as PlayerId + 1, format!("Player{}", i + 1), 0.0))
            .collect()
    }

    /// Score record with consecutive holes starting at `first_hole`.
    pub fn card(player: Player, first_hole: u8, grosses: &[u32]) -> PlayerScore {
        let mut score = PlayerScore::new(player);
        for (i, &gross) in grosses.iter().enumerate() {
            score.record(first_hole + i as u8, gross);
        }
        score
    }

    /// Round of scratch players, one gross list per player, scored from the
    /// first hole of the round.
    pub fn individual_round(round_type: RoundType, bet: f64, grosses: &[&[u32]]) -> Round {
        let first = *round_type.hole_range().start();
        let participants = make_players(grosses.len())
            .into_iter()
            .zip(grosses)
            .map(|(p, g)| Participant::Player(card(p, first, g)))
            .collect();
        Round::new(round_type, bet, participants)
    }

    /// Round of teams; each team lists one gross list per member. Player IDs
    /// run on across teams; team IDs start at 100.
    pub fn team_round(
        round_type: RoundType,
        bet: f64,
        scoring_type: TeamScoringType,
        teams: &[&[&[u32]]],
    ) -> Round {
        let first = *round_type.hole_range().start();
        let mut next_id: PlayerId = 1;
        let participants = teams
            .iter()
            .enumerate()
            .map(|(t, members)| {
                let members = members
                    .iter()
                    .map(|g| {
                        let player = Player::new(next_id, format!("Player{next_id}"), 0.0);
                        next_id += 1;
                        card(player, first, g)
                    })
                    .collect();
                Participant::Team(TeamScore {
                    team: Team {
                        id: 100 + t as u64,
                        name: format!("Team{}", t + 1),
                        scoring_type,
                        allowance: HandicapAllowance::Individual,
                    },
                    members,
                    winnings: 0.0,
                })
            })
            .collect();
        Round::new(round_type, bet, participants)
    }

    // ================================================================
    // Settlement Format Contract Tests
    // ================================================================
    // Every SettlementFormat implementation must pass these. Format
    // modules call them from their own #[cfg(test)] modules.

    /// Settling the same context twice gives the same payout.
    pub fn contract_idempotent(format: &dyn SettlementFormat, ctx: &SettlementContext<'_>) {
        let first = format.settle(ctx);
        let second = format.settle(ctx);
        assert_eq!(first, second, "settle() must be a pure function of its context");
    }

    /// Winnings, when produced, sum to zero within `tolerance`.
    pub fn contract_zero_sum(
        format: &dyn SettlementFormat,
        ctx: &SettlementContext<'_>,
        tolerance: f64,
    ) -> Payout {
        let payout = format.settle(ctx);
        if let Payout::Winnings(ref w) = payout {
            let total: f64 = w.iter().sum();
            assert!(
                total.abs() <= tolerance,
                "winnings must balance, got total {total} from {w:?}"
            );
        }
        payout
    }

    /// Winnings, when produced, have one entry per participant.
    pub fn contract_one_entry_per_participant(
        format: &dyn SettlementFormat,
        ctx: &SettlementContext<'_>,
    ) {
        if let Payout::Winnings(w) = format.settle(ctx) {
            assert_eq!(
                w.len(),
                ctx.participant_count(),
                "winnings must have one entry per participant"
            );
        }
    }
}
