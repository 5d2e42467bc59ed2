use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::course::{Course, Gender};
use crate::handicap::HandicapParams;
use crate::round::{Participant, ParticipantId, Round, RoundType};

/// Wagering format of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameFormat {
    Skins,
    Nassau,
    MatchPlay,
    StrokePlay,
    Scramble,
    Wolf,
    BestBall,
    Custom,
}

impl GameFormat {
    pub const ALL: [GameFormat; 8] = [
        Self::Skins,
        Self::Nassau,
        Self::MatchPlay,
        Self::StrokePlay,
        Self::Scramble,
        Self::Wolf,
        Self::BestBall,
        Self::Custom,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Skins => "Skins",
            Self::Nassau => "Nassau",
            Self::MatchPlay => "Match Play",
            Self::StrokePlay => "Stroke Play",
            Self::Scramble => "Scramble",
            Self::Wolf => "Wolf",
            Self::BestBall => "Best Ball",
            Self::Custom => "Custom",
        }
    }
}

/// Whether participants are single players or teams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatMode {
    #[default]
    Individual,
    Team,
}

/// Everything about a game except its rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    pub name: String,
    pub format: GameFormat,
    #[serde(default)]
    pub mode: FormatMode,
    pub course: Course,
    /// Name of the tee being played.
    pub tee: String,
    #[serde(default)]
    pub gender: Gender,
    pub default_bet: f64,
    /// Par used in the course handicap formula instead of the course total.
    #[serde(default)]
    pub par_override: Option<u8>,
}

impl GameSettings {
    /// Effective rating, slope and par for handicap purposes, if the selected
    /// tee carries a rating for the selected gender.
    pub fn handicap_params(&self) -> Option<HandicapParams> {
        let rating = self.course.tee(&self.tee)?.rating_for(self.gender)?;
        let par = match self.par_override {
            Some(par) => par,
            None => self.course.par()?,
        };
        if par == 0 {
            return None;
        }
        Some(HandicapParams {
            rating: rating.rating,
            slope: rating.slope,
            par,
        })
    }
}

/// A game: its settings and the rounds played under them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub settings: GameSettings,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Game {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            rounds: Vec::new(),
        }
    }

    /// Append a round at the game's default bet.
    pub fn start_round(&mut self, round_type: RoundType, participants: Vec<Participant>) -> &mut Round {
        let round = Round::new(round_type, self.settings.default_bet, participants);
        self.rounds.push(round);
        let last = self.rounds.len() - 1;
        &mut self.rounds[last]
    }

    /// Each participant's winnings summed over every round.
    pub fn total_winnings(&self) -> BTreeMap<ParticipantId, f64> {
        let mut totals = BTreeMap::new();
        for round in &self.rounds {
            for p in &round.participants {
                *totals.entry(p.id()).or_insert(0.0) += p.winnings();
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::{Hole, Tee, TeeRating};
    use crate::player::Player;
    use crate::round::PlayerScore;

    fn settings() -> GameSettings {
        GameSettings {
            name: "Saturday".to_string(),
            format: GameFormat::Skins,
            mode: FormatMode::Individual,
            course: Course {
                name: "Links".to_string(),
                holes: (1..=18)
                    .map(|n| Hole {
                        number: n,
                        par: 4,
                        handicap_rank: n,
                    })
                    .collect(),
                tees: vec![Tee {
                    name: "White".to_string(),
                    mens: Some(TeeRating {
                        rating: 70.5,
                        slope: 121,
                    }),
                    womens: None,
                }],
            },
            tee: "White".to_string(),
            gender: Gender::Male,
            default_bet: 2.0,
            par_override: None,
        }
    }

    #[test]
    fn params_from_tee_and_gender() {
        let s = settings();
        assert_eq!(
            s.handicap_params(),
            Some(HandicapParams {
                rating: 70.5,
                slope: 121,
                par: 72
            })
        );
    }

    #[test]
    fn missing_rating_is_unresolvable() {
        let mut s = settings();
        s.gender = Gender::Female;
        assert_eq!(s.handicap_params(), None);

        let mut s = settings();
        s.tee = "Gold".to_string();
        assert_eq!(s.handicap_params(), None);

        let mut s = settings();
        s.course.holes = (0..60)
            .map(|_| Hole {
                number: 2,
                par: 5,
                handicap_rank: 2,
            })
            .collect();
        assert_eq!(s.handicap_params(), None);
    }

    #[test]
    fn par_override_wins() {
        let mut s = settings();
        s.par_override = Some(70);
        assert_eq!(s.handicap_params().map(|p| p.par), Some(70));
    }

    #[test]
    fn totals_across_rounds() {
        let mut game = Game::new(settings());
        for amount in [3.0, -1.0] {
            let round = game.start_round(
                RoundType::Full18,
                vec![Participant::Player(PlayerScore::new(Player::new(1, "A", 5.0)))],
            );
            round.participants[0].set_winnings(amount);
        }
        assert_eq!(game.rounds[0].bet_amount, 2.0);
        assert_eq!(game.total_winnings()[&ParticipantId::Player(1)], 2.0);
    }
}
