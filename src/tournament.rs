//! Tournament-level operations
//!
//! Each operation here is one logical unit of work and runs inside a single
//! commit boundary of the record store: it either fully succeeds or leaves
//! the store as it found it.

use chrono::{DateTime, NaiveDateTime, Utc};
use log::info;
use rand::Rng;

use crate::bracket::{
    build_bracket, propagate_with_policy, schedule_first_round, PropagationPolicy, Score,
};
use crate::error::{BracketError, ValidationError};
use crate::model::{BracketSize, Match, MatchId, Occupant, Slot, Tournament, TournamentId, BYE};
use crate::store::{NewTournament, RecordStore};

/// Longest accepted tournament name or stage
pub const MAX_NAME_LEN: usize = 200;

/// Everything needed to create a tournament and its bracket
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentRequest {
    pub name: String,
    pub stage: Option<String>,
    pub size: u32,
    /// Entrant names in seed order; blanks are ignored
    pub entrants: Vec<String>,
    pub randomize: bool,
    /// Start of the first round, if it should be scheduled
    pub start: Option<NaiveDateTime>,
    pub interval_minutes: Option<i64>,
}

/// Trim names, drop blanks and pad with byes up to the bracket size
pub fn seed_names(names: &[String], size: BracketSize) -> Result<Vec<String>, ValidationError> {
    let mut seeded: Vec<String> = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();
    if seeded.len() > size.entrants() {
        return Err(ValidationError::TooManyEntrants {
            count: seeded.len(),
            size: size.entrants(),
        });
    }
    seeded.resize(size.entrants(), BYE.to_string());
    Ok(seeded)
}

fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingName { field });
    }
    optional_text(field, trimmed).map(|v| v.unwrap_or_default())
}

fn optional_text(field: &'static str, value: &str) -> Result<Option<String>, ValidationError> {
    let trimmed = value.trim();
    let len = trimmed.chars().count();
    if len > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: MAX_NAME_LEN,
        });
    }
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// Create a tournament with its entrants and full bracket.
///
/// The bracket size is checked before anything is written. Entrants are
/// seeded with [`seed_names`], the bracket is built (shuffled with `rng` when
/// the request asks for it) and the first round is scheduled if a start time
/// is given.
pub fn create_tournament<S, R>(
    store: &mut S,
    request: &TournamentRequest,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Result<Tournament, BracketError>
where
    S: RecordStore,
    R: Rng + ?Sized,
{
    let size = BracketSize::try_from(request.size)?;
    let name = required_text("tournament name", &request.name)?;
    let stage = match &request.stage {
        Some(stage) => optional_text("stage", stage)?,
        None => None,
    };
    let names = seed_names(&request.entrants, size)?;

    let tournament = store.atomically(|store| {
        let tournament = store.create_tournament(NewTournament {
            name,
            stage,
            size,
            randomized: request.randomize,
            created_at: now,
        });
        let entrants = names
            .iter()
            .map(|n| store.create_entrant(tournament.id, n))
            .collect();
        build_bracket(store, &tournament, entrants, request.randomize, rng)?;

        if let Some(start) = request.start {
            schedule_first_round(
                store,
                tournament.id,
                start,
                request.interval_minutes.unwrap_or(0),
            )?;
        }
        Ok::<_, BracketError>(tournament)
    })?;

    info!(
        "created {} '{}' ({} entrants)",
        tournament.id, tournament.name, tournament.size
    );
    Ok(tournament)
}

/// Which occupant won, as picked by whoever enters the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerChoice {
    Slot(Slot),
    /// Remove any recorded winner
    Clear,
}

/// A result as entered for one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// Score text; `None` or blank keeps the stored score
    pub score: Option<String>,
    pub winner: WinnerChoice,
}

/// Record a result for a match and move the winner up the bracket.
///
/// A malformed score, or picking a slot that holds a bye, rejects the whole
/// entry. Picking a slot that is still empty clears the winner, and clearing
/// never touches the parent match.
pub fn record_result<S: RecordStore>(
    store: &mut S,
    match_id: MatchId,
    entry: &ResultEntry,
    policy: PropagationPolicy,
) -> Result<Match, BracketError> {
    let mut m = store.require_match(match_id)?;

    let score = match entry.score.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.parse::<Score>()?),
        _ => None,
    };
    let winner = match entry.winner {
        WinnerChoice::Slot(slot) => match m.slot(slot) {
            Some(occupant) if occupant.is_bye() => {
                return Err(ValidationError::ByeCannotWin {
                    slot: slot.number(),
                }
                .into());
            }
            Some(Occupant::Unresolved(name)) if name.is_empty() => None,
            occupant => occupant.cloned(),
        },
        WinnerChoice::Clear => None,
    };

    if let Some(score) = score {
        m.score = Some(score);
    }
    m.winner = winner;

    store.atomically(|store| {
        store.update_match(&m)?;
        if m.winner.is_some() {
            propagate_with_policy(store, &m, policy)?;
        }
        Ok::<_, BracketError>(())
    })?;

    info!(
        "recorded result for {} (winner: {})",
        m.id,
        m.winning_slot()
            .map(|s| format!("slot {}", s.number()))
            .unwrap_or_else(|| "none".to_string())
    );
    store.require_match(match_id)
}

/// Look up a match of a tournament by its round and position
pub fn find_match<S: RecordStore>(
    store: &S,
    tournament_id: TournamentId,
    round: u32,
    position: u32,
) -> Result<Match, BracketError> {
    store.require_tournament(tournament_id)?;
    store
        .list_matches(tournament_id)
        .into_iter()
        .find(|m| m.round == round && m.position == position)
        .ok_or_else(|| BracketError::no_match_at(round, position))
}
