use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::course::{ALL_HOLES, BACK_NINE, FRONT_NINE};
use crate::player::{Player, PlayerId};

/// Unique identifier for a team.
pub type TeamId = u64;

/// The stretch of holes a round wagers on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundType {
    SingleHole(u8),
    Front9,
    Back9,
    Full18,
    Custom { first: u8, last: u8 },
}

impl RoundType {
    /// Inclusive range of hole numbers the round covers, clipped to the
    /// holes a course has. Empty if nothing is left after clipping.
    pub fn hole_range(&self) -> RangeInclusive<u8> {
        let (first, last) = match *self {
            Self::SingleHole(n) => (n, n),
            Self::Front9 => return FRONT_NINE,
            Self::Back9 => return BACK_NINE,
            Self::Full18 => return ALL_HOLES,
            Self::Custom { first, last } => (first, last),
        };
        first.max(*ALL_HOLES.start())..=last.min(*ALL_HOLES.end())
    }

    /// How many holes must be scored for the round to be complete.
    pub fn expected_holes(&self) -> u8 {
        let range = self.hole_range();
        if range.is_empty() {
            0
        } else {
            range.end() - range.start() + 1
        }
    }
}

/// One player's gross score on one hole. A gross of 0 means not yet entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub hole_number: u8,
    pub gross_score: u32,
}

impl HoleScore {
    pub fn is_entered(&self) -> bool {
        self.gross_score > 0
    }
}

/// A player's participation in a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player: Player,
    /// Ordered by hole number, at most one entry per hole.
    pub holes: Vec<HoleScore>,
    #[serde(default)]
    pub winnings: f64,
}

impl PlayerScore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            holes: Vec::new(),
            winnings: 0.0,
        }
    }

    /// Insert or replace the score for a hole, keeping hole order.
    pub fn record(&mut self, hole_number: u8, gross_score: u32) {
        match self.holes.binary_search_by_key(&hole_number, |h| h.hole_number) {
            Ok(i) => self.holes[i].gross_score = gross_score,
            Err(i) => self.holes.insert(
                i,
                HoleScore {
                    hole_number,
                    gross_score,
                },
            ),
        }
    }

    /// Entered gross score on a hole, ignoring placeholders.
    pub fn gross_on(&self, hole_number: u8) -> Option<u32> {
        self.holes
            .iter()
            .find(|h| h.hole_number == hole_number && h.is_entered())
            .map(|h| h.gross_score)
    }

    pub fn has_score(&self, hole_number: u8) -> bool {
        self.gross_on(hole_number).is_some()
    }

    pub fn total_gross(&self) -> u32 {
        self.holes.iter().map(|h| h.gross_score).sum()
    }

    /// Entered holes inside `range`.
    pub fn holes_entered(&self, range: &RangeInclusive<u8>) -> usize {
        self.holes
            .iter()
            .filter(|h| h.is_entered() && range.contains(&h.hole_number))
            .count()
    }
}

/// How member scores fold into one team score per hole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamScoringType {
    #[default]
    BestBall,
    Scramble,
    Aggregate,
    AlternateShot,
}

/// Which course handicap a team plays off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandicapAllowance {
    /// Each member's own strokes are applied before folding.
    #[default]
    Individual,
    /// Mean of member indexes.
    Average,
    /// Lowest member course handicap.
    Lowest,
    /// Highest member course handicap.
    Highest,
}

/// A named group of players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub scoring_type: TeamScoringType,
    #[serde(default)]
    pub allowance: HandicapAllowance,
}

/// A team's participation in a round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team: Team,
    pub members: Vec<PlayerScore>,
    #[serde(default)]
    pub winnings: f64,
}

impl TeamScore {
    pub fn new(team: Team, members: Vec<Player>) -> Self {
        Self {
            team,
            members: members.into_iter().map(PlayerScore::new).collect(),
            winnings: 0.0,
        }
    }

    /// Whether the team has a usable score on a hole under its scoring type.
    pub fn has_score(&self, hole_number: u8) -> bool {
        match self.team.scoring_type {
            TeamScoringType::BestBall | TeamScoringType::Scramble => {
                self.members.iter().any(|m| m.has_score(hole_number))
            },
            TeamScoringType::Aggregate => {
                !self.members.is_empty() && self.members.iter().all(|m| m.has_score(hole_number))
            },
            TeamScoringType::AlternateShot => self
                .members
                .first()
                .is_some_and(|m| m.has_score(hole_number)),
        }
    }
}

/// Identity of a participant, unique within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ParticipantId {
    Player(PlayerId),
    Team(TeamId),
}

/// A score record that wins or loses money: one player, or one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Participant {
    Player(PlayerScore),
    Team(TeamScore),
}

impl Participant {
    pub fn id(&self) -> ParticipantId {
        match self {
            Self::Player(p) => ParticipantId::Player(p.player.id),
            Self::Team(t) => ParticipantId::Team(t.team.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Player(p) => &p.player.name,
            Self::Team(t) => &t.team.name,
        }
    }

    pub fn winnings(&self) -> f64 {
        match self {
            Self::Player(p) => p.winnings,
            Self::Team(t) => t.winnings,
        }
    }

    pub fn set_winnings(&mut self, amount: f64) {
        match self {
            Self::Player(p) => p.winnings = amount,
            Self::Team(t) => t.winnings = amount,
        }
    }

    /// The individual score records behind this participant.
    pub fn members(&self) -> &[PlayerScore] {
        match self {
            Self::Player(p) => std::slice::from_ref(p),
            Self::Team(t) => &t.members,
        }
    }

    pub fn has_score(&self, hole_number: u8) -> bool {
        match self {
            Self::Player(p) => p.has_score(hole_number),
            Self::Team(t) => t.has_score(hole_number),
        }
    }

    pub fn is_team(&self) -> bool {
        matches!(self, Self::Team(_))
    }
}

/// The three concurrent bets of a Nassau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NassauBet {
    Front,
    Back,
    Overall,
}

impl NassauBet {
    pub fn hole_range(&self) -> RangeInclusive<u8> {
        match self {
            Self::Front => FRONT_NINE,
            Self::Back => BACK_NINE,
            Self::Overall => ALL_HOLES,
        }
    }
}

/// A manual press on a Nassau bet, starting at `from_hole`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressRequest {
    pub bet: NassauBet,
    pub from_hole: u8,
}

/// One wagering unit within a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_type: RoundType,
    pub bet_amount: f64,
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub press_requests: Vec<PressRequest>,
}

impl Round {
    pub fn new(round_type: RoundType, bet_amount: f64, participants: Vec<Participant>) -> Self {
        Self {
            round_type,
            bet_amount,
            participants,
            press_requests: Vec::new(),
        }
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// Record a gross score for `player` on behalf of `participant`.
    pub fn record_score(
        &mut self,
        participant: ParticipantId,
        player: PlayerId,
        hole_number: u8,
        gross_score: u32,
    ) -> Result<(), ScoreError> {
        if !ALL_HOLES.contains(&hole_number) {
            return Err(ScoreError::HoleOutOfRange(hole_number));
        }
        if !self.round_type.hole_range().contains(&hole_number) {
            return Err(ScoreError::HoleNotInRound(hole_number));
        }

        let entry = self
            .participants
            .iter_mut()
            .find(|p| p.id() == participant)
            .ok_or(ScoreError::UnknownParticipant(participant))?;

        let score = match entry {
            Participant::Player(p) if p.player.id == player => p,
            Participant::Player(_) => return Err(ScoreError::UnknownPlayer(player)),
            Participant::Team(t) => t
                .members
                .iter_mut()
                .find(|m| m.player.id == player)
                .ok_or(ScoreError::UnknownPlayer(player))?,
        };
        score.record(hole_number, gross_score);
        Ok(())
    }

    /// Ask for a press on a Nassau bet. Whether it takes effect is decided
    /// at settlement time.
    pub fn request_press(&mut self, bet: NassauBet, from_hole: u8) {
        let request = PressRequest { bet, from_hole };
        if !self.press_requests.contains(&request) {
            self.press_requests.push(request);
        }
    }

    /// Overwrite one participant's winnings by hand. Returns false if the
    /// participant is not in this round.
    pub fn set_manual_winnings(&mut self, participant: ParticipantId, amount: f64) -> bool {
        match self.participants.iter_mut().find(|p| p.id() == participant) {
            Some(p) => {
                p.set_winnings(amount);
                true
            },
            None => false,
        }
    }

    /// Holes scored so far, counted from the first participant's card.
    pub fn holes_played(&self) -> u8 {
        let Some(first) = self.participants.first() else {
            return 0;
        };
        self.round_type
            .hole_range()
            .filter(|&h| first.has_score(h))
            .count() as u8
    }

    /// Every participant has a real score on every hole of the round.
    pub fn is_completed(&self) -> bool {
        !self.participants.is_empty()
            && self
                .participants
                .iter()
                .all(|p| self.round_type.hole_range().all(|h| p.has_score(h)))
    }

    /// Sum of all participants' winnings.
    pub fn ledger_total(&self) -> f64 {
        self.participants.iter().map(Participant::winnings).sum()
    }

    /// Whether every participant matches the game's individual/team mode.
    pub fn matches_mode(&self, team_mode: bool) -> bool {
        self.participants.iter().all(|p| p.is_team() == team_mode)
    }
}

/// Reasons a score entry is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    HoleOutOfRange(u8),
    HoleNotInRound(u8),
    UnknownParticipant(ParticipantId),
    UnknownPlayer(PlayerId),
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HoleOutOfRange(n) => write!(f, "hole {n} is not between 1 and 18"),
            Self::HoleNotInRound(n) => write!(f, "hole {n} is not part of this round"),
            Self::UnknownParticipant(id) => write!(f, "participant {id:?} is not in this round"),
            Self::UnknownPlayer(id) => write!(f, "player {id} is not part of that score record"),
        }
    }
}

impl std::error::Error for ScoreError {}
