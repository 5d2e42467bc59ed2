use serde::{Deserialize, Serialize};

/// Unique identifier for a player on the roster.
pub type PlayerId = u64;

/// Highest handicap index accepted by the World Handicap System.
pub const MAX_HANDICAP_INDEX: f64 = 54.0;

/// A golfer on the roster.
///
/// Score records hold a snapshot of the player taken when the round was set
/// up, so later roster edits do not rewrite settled rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub handicap_index: f64,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, handicap_index: f64) -> Self {
        Self {
            id,
            name: name.into(),
            handicap_index,
        }
    }

    /// Check the handicap index is a finite value in `0..=54`.
    pub fn validate(&self) -> Result<(), PlayerError> {
        if !self.handicap_index.is_finite()
            || !(0.0..=MAX_HANDICAP_INDEX).contains(&self.handicap_index)
        {
            return Err(PlayerError::HandicapOutOfRange {
                player_id: self.id,
                handicap_index: self.handicap_index,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    HandicapOutOfRange {
        player_id: PlayerId,
        handicap_index: f64,
    },
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HandicapOutOfRange {
                player_id,
                handicap_index,
            } => write!(
                f,
                "player {player_id} has handicap index {handicap_index}, expected 0..={MAX_HANDICAP_INDEX}"
            ),
        }
    }
}

impl std::error::Error for PlayerError {}
