//! Moving a decided winner into the match it feeds

use log::{debug, warn};

use crate::error::BracketError;
use crate::model::{Match, Occupant, TournamentId};
use crate::store::RecordStore;

/// How far a manual result travels up the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropagationPolicy {
    /// Write the winner into the parent and stop
    #[default]
    SingleLevel,
    /// After writing, keep advancing while the parent turns into a walkover
    Cascade,
}

/// Write `source`'s winner into its linked slot of the next match.
///
/// Returns the updated parent match. A final match, a match without a
/// winner, or a link to a match that no longer exists are all no-ops. The
/// target slot is overwritten unconditionally, so calling this again with the
/// same winner leaves the parent unchanged.
pub fn propagate_winner<S: RecordStore>(
    store: &mut S,
    source: &Match,
) -> Result<Option<Match>, BracketError> {
    let (Some(next), Some(winner)) = (source.next, source.winner.as_ref()) else {
        return Ok(None);
    };

    let Some(mut parent) = store.get_match(next.match_id) else {
        warn!(
            "{} links to missing {}, winner not propagated",
            source.id, next.match_id
        );
        return Ok(None);
    };

    parent.set_slot(next.slot, Some(winner.clone()));
    store.update_match(&parent)?;

    debug!(
        "{} winner moved into {} slot {}",
        source.id,
        parent.id,
        next.slot.number()
    );
    Ok(Some(parent))
}

/// Give a walkover match its winner and propagate it.
///
/// Returns the parent that received the winner, or `None` when the match is
/// not a walkover (including bye-vs-bye, which never gets a winner).
pub fn advance_walkover<S: RecordStore>(
    store: &mut S,
    m: &Match,
) -> Result<Option<Match>, BracketError> {
    if m.is_double_bye() {
        warn!("{} has a bye in both slots, no winner assigned", m.id);
        return Ok(None);
    }
    let Some(entrant) = m.walkover() else {
        return Ok(None);
    };

    let mut decided = m.clone();
    decided.winner = Some(Occupant::Resolved(entrant));
    store.update_match(&decided)?;
    debug!("{} auto-advanced {} past a bye", decided.id, entrant);

    propagate_winner(store, &decided)
}

/// Propagate `source`'s winner according to `policy`.
///
/// With [`PropagationPolicy::Cascade`], each parent that becomes a walkover
/// is decided and propagated in turn until the chain stops.
pub fn propagate_with_policy<S: RecordStore>(
    store: &mut S,
    source: &Match,
    policy: PropagationPolicy,
) -> Result<Option<Match>, BracketError> {
    let first = propagate_winner(store, source)?;
    if policy == PropagationPolicy::SingleLevel {
        return Ok(first);
    }

    let mut current = first.clone();
    while let Some(parent) = current {
        if parent.winner.is_some() {
            break;
        }
        current = advance_walkover(store, &parent)?;
    }
    Ok(first)
}

/// Run the bye auto-advance pass over every match of a tournament.
///
/// Matches are visited in (round, position) order and re-read from the
/// store, so advances made in one round are seen by the next. Returns the
/// number of matches that were decided.
pub fn auto_advance_byes<S: RecordStore>(
    store: &mut S,
    tournament_id: TournamentId,
) -> Result<usize, BracketError> {
    let ids: Vec<_> = store.list_matches(tournament_id).iter().map(|m| m.id).collect();
    let mut advanced = 0;
    for id in ids {
        let m = store.require_match(id)?;
        if m.winner.is_some() {
            continue;
        }
        if m.walkover().is_some() {
            advance_walkover(store, &m)?;
            advanced += 1;
        } else if m.is_double_bye() {
            warn!("{} has a bye in both slots, skipped", m.id);
        }
    }
    Ok(advanced)
}
