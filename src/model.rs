//! Core record types for tournaments, entrants and matches

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::bracket::score::Score;
use crate::error::BracketError;

/// Display name that marks a non-competitor placeholder
pub const BYE: &str = "BYE";

/// Whether a display name is the bye sentinel (case-insensitive)
pub fn is_bye_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(BYE)
}

macro_rules! record_id {
    ($name:ident, $label:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} #{}", $label, self.0)
            }
        }
    };
}

record_id!(TournamentId, "tournament");
record_id!(EntrantId, "entrant");
record_id!(MatchId, "match");

/// Supported bracket sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BracketSize {
    Four,
    Eight,
    Sixteen,
}

impl BracketSize {
    /// Number of entrant slots in the first round
    pub fn entrants(self) -> usize {
        match self {
            BracketSize::Four => 4,
            BracketSize::Eight => 8,
            BracketSize::Sixteen => 16,
        }
    }

    /// Total number of rounds (log2 of the size)
    pub fn total_rounds(self) -> u32 {
        match self {
            BracketSize::Four => 2,
            BracketSize::Eight => 3,
            BracketSize::Sixteen => 4,
        }
    }

    /// Number of matches played in `round` (1-indexed)
    pub fn matches_in_round(self, round: u32) -> usize {
        if round == 0 || round > self.total_rounds() {
            return 0;
        }
        self.entrants() >> round
    }
}

impl TryFrom<u32> for BracketSize {
    type Error = BracketError;

    fn try_from(size: u32) -> Result<Self, Self::Error> {
        match size {
            4 => Ok(BracketSize::Four),
            8 => Ok(BracketSize::Eight),
            16 => Ok(BracketSize::Sixteen),
            other => Err(BracketError::unsupported_size(other)),
        }
    }
}

impl fmt::Display for BracketSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entrants())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub stage: Option<String>,
    pub size: BracketSize,
    pub randomized: bool,
    pub created_at: DateTime<Utc>,
}

/// A competitor (or bye placeholder) registered for one tournament
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    pub id: EntrantId,
    pub tournament_id: TournamentId,
    pub name: String,
}

impl Entrant {
    pub fn is_bye(&self) -> bool {
        is_bye_name(&self.name)
    }

    /// How this entrant sits in a match slot: byes become placeholders
    pub fn occupant(&self) -> Occupant {
        if self.is_bye() {
            Occupant::bye()
        } else {
            Occupant::Resolved(self.id)
        }
    }
}

/// Occupant of a match slot, also used for a match winner
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Occupant {
    /// A known entrant
    Resolved(EntrantId),
    /// Free-text placeholder such as `"BYE"`
    Unresolved(String),
}

impl Occupant {
    pub fn bye() -> Self {
        Occupant::Unresolved(BYE.to_string())
    }

    /// A placeholder whose text is the bye sentinel
    pub fn is_bye(&self) -> bool {
        matches!(self, Occupant::Unresolved(name) if is_bye_name(name))
    }

    pub fn entrant_id(&self) -> Option<EntrantId> {
        match self {
            Occupant::Resolved(id) => Some(*id),
            Occupant::Unresolved(_) => None,
        }
    }
}

/// One of a match's two occupant positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::One => 0,
            Slot::Two => 1,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Slot::One => 1,
            Slot::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Slot::One),
            2 => Some(Slot::Two),
            _ => None,
        }
    }
}

/// Outgoing edge from a match to the match its winner feeds into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextMatch {
    pub match_id: MatchId,
    pub slot: Slot,
}

/// Fields of a match before the store assigns it an id
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewMatch {
    pub round: u32,
    pub position: u32,
    pub slots: [Option<Occupant>; 2],
}

impl NewMatch {
    pub fn new(round: u32, position: u32) -> Self {
        Self {
            round,
            position,
            slots: [None, None],
        }
    }

    pub fn with_slots(mut self, one: Option<Occupant>, two: Option<Occupant>) -> Self {
        self.slots = [one, two];
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    /// 1-indexed, round 1 is the first round played
    pub round: u32,
    /// 1-indexed ordering key within the round
    pub position: u32,
    pub slots: [Option<Occupant>; 2],
    pub winner: Option<Occupant>,
    pub score: Option<Score>,
    pub scheduled_at: Option<NaiveDateTime>,
    pub next: Option<NextMatch>,
}

impl Match {
    pub fn slot(&self, slot: Slot) -> Option<&Occupant> {
        self.slots[slot.index()].as_ref()
    }

    pub fn set_slot(&mut self, slot: Slot, occupant: Option<Occupant>) {
        self.slots[slot.index()] = occupant;
    }

    /// The entrant that advances without playing, if exactly one slot is a
    /// bye and the other holds a resolved entrant
    pub fn walkover(&self) -> Option<EntrantId> {
        match (&self.slots[0], &self.slots[1]) {
            (Some(bye), Some(Occupant::Resolved(id))) if bye.is_bye() => Some(*id),
            (Some(Occupant::Resolved(id)), Some(bye)) if bye.is_bye() => Some(*id),
            _ => None,
        }
    }

    /// Both slots hold the bye sentinel
    pub fn is_double_bye(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| slot.as_ref().is_some_and(Occupant::is_bye))
    }

    /// Which slot the current winner was drawn from, if any
    pub fn winning_slot(&self) -> Option<Slot> {
        let winner = self.winner.as_ref()?;
        [Slot::One, Slot::Two]
            .into_iter()
            .find(|slot| self.slot(*slot) == Some(winner))
    }
}
