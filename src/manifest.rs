//! Tournament files
//!
//! A manifest describes one tournament in TOML: its name and size, the
//! entrant list, optional first-round scheduling and any results already
//! played. Results are replayed in file order.
//!
//! ```toml
//! name = "Club Open"
//! stage = "Quarter-finals"
//! size = 8
//! randomize = false
//! start = "2024-05-04T09:00"
//! interval_minutes = 30
//! entrants = ["Ana", "Bruno", "Carla", "Davi", "Elisa"]
//!
//! [[results]]
//! round = 1
//! position = 1
//! winner = 1
//! score = "6-4 6-3"
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use thiserror::Error;

use crate::bracket::{parse_time, PropagationPolicy};
use crate::error::{BracketError, ValidationError};
use crate::model::{Slot, Tournament};
use crate::store::RecordStore;
use crate::tournament::{
    create_tournament, find_match, record_result, ResultEntry, TournamentRequest, WinnerChoice,
};

/// Errors that can occur when loading or applying a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read tournament file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse tournament TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error(transparent)]
    Bracket(#[from] BracketError),
    #[error("no match at round {round}, position {position}")]
    NoSuchMatch { round: u32, position: u32 },
}

impl From<ValidationError> for ManifestError {
    fn from(err: ValidationError) -> Self {
        ManifestError::Bracket(err.into())
    }
}

fn default_randomize() -> bool {
    true
}

/// A tournament file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub name: String,
    #[serde(default)]
    pub stage: Option<String>,
    pub size: u32,
    #[serde(default = "default_randomize")]
    pub randomize: bool,
    /// Seed for the shuffle; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// `YYYY-MM-DDTHH:MM[:SS]`
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub interval_minutes: Option<i64>,
    #[serde(default)]
    pub entrants: Vec<String>,
    #[serde(default)]
    pub results: Vec<ResultRecord>,
}

/// One `[[results]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResultRecord {
    pub round: u32,
    pub position: u32,
    /// Winning slot (1 or 2), or 0 to clear the winner
    pub winner: u8,
    #[serde(default)]
    pub score: Option<String>,
}

impl ResultRecord {
    pub fn entry(&self) -> Result<ResultEntry, ValidationError> {
        let winner = match self.winner {
            0 => WinnerChoice::Clear,
            n => WinnerChoice::Slot(
                Slot::from_number(n).ok_or(ValidationError::UnknownSlot { slot: n })?,
            ),
        };
        Ok(ResultEntry {
            score: self.score.clone(),
            winner,
        })
    }
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a manifest from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        Ok(toml::from_str(content)?)
    }

    /// The creation request this manifest describes
    pub fn request(&self) -> Result<TournamentRequest, ValidationError> {
        let start = self.start.as_deref().map(parse_time).transpose()?;
        Ok(TournamentRequest {
            name: self.name.clone(),
            stage: self.stage.clone(),
            size: self.size,
            entrants: self.entrants.clone(),
            randomize: self.randomize,
            start,
            interval_minutes: self.interval_minutes,
        })
    }

    /// Shuffle source for this tournament; `seed` overrides the file's seed
    pub fn rng(&self, seed: Option<u64>) -> StdRng {
        match seed.or(self.seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Create the tournament in `store` and replay every recorded result
    pub fn apply<S, R>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
        rng: &mut R,
        policy: PropagationPolicy,
    ) -> Result<Tournament, ManifestError>
    where
        S: RecordStore,
        R: Rng + ?Sized,
    {
        let request = self.request()?;
        let entries = self
            .results
            .iter()
            .map(ResultRecord::entry)
            .collect::<Result<Vec<_>, _>>()?;

        let tournament = create_tournament(store, &request, now, rng)?;

        for (record, entry) in self.results.iter().zip(&entries) {
            let m = find_match(store, tournament.id, record.round, record.position).map_err(
                |err| match err {
                    BracketError::NoMatchAt { .. } => ManifestError::NoSuchMatch {
                        round: record.round,
                        position: record.position,
                    },
                    other => other.into(),
                },
            )?;
            debug!(
                "replaying result for round {} position {}",
                record.round, record.position
            );
            record_result(store, m.id, entry, policy)?;
        }
        Ok(tournament)
    }
}
