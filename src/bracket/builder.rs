//! Building the full match tree for a tournament

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{BracketError, ValidationError};
use crate::model::{BracketSize, Entrant, Match, NewMatch, NextMatch, Occupant, Slot, Tournament};
use crate::store::RecordStore;

use super::pairing::pair_entrants;
use super::propagation::auto_advance_byes;

/// Check that an entrant list can fill a bracket of `size`.
///
/// The list must hold exactly `size` entrants and at least half of them must
/// be real competitors; with more byes than that some first-round match
/// would have to be bye-vs-bye.
pub fn validate_entrants(entrants: &[Entrant], size: BracketSize) -> Result<(), ValidationError> {
    let capacity = size.entrants();
    if entrants.len() > capacity {
        return Err(ValidationError::TooManyEntrants {
            count: entrants.len(),
            size: capacity,
        });
    }
    if entrants.len() < capacity {
        return Err(ValidationError::NotEnoughEntrants {
            count: entrants.len(),
            required: capacity,
            size: capacity,
        });
    }
    let real = entrants.iter().filter(|e| !e.is_bye()).count();
    if real < capacity / 2 {
        return Err(ValidationError::NotEnoughEntrants {
            count: real,
            required: capacity / 2,
            size: capacity,
        });
    }
    Ok(())
}

/// Create and link every match of `tournament`, then advance bye winners.
///
/// `entrants` must already be padded with byes up to the bracket size. When
/// `randomize` is set they are shuffled with `rng` before pairing. Nothing is
/// written if validation fails; callers wrap this in a commit boundary.
pub fn build_bracket<S, R>(
    store: &mut S,
    tournament: &Tournament,
    mut entrants: Vec<Entrant>,
    randomize: bool,
    rng: &mut R,
) -> Result<Vec<Match>, BracketError>
where
    S: RecordStore,
    R: Rng + ?Sized,
{
    validate_entrants(&entrants, tournament.size)?;

    if randomize {
        entrants.shuffle(rng);
    }

    let pairing = pair_entrants(&entrants);
    let mut current: Vec<Match> = Vec::with_capacity(pairing.match_count());
    let mut position = 1;

    for (a, b) in &pairing.pairs {
        let new = NewMatch::new(1, position).with_slots(Some(a.occupant()), Some(b.occupant()));
        current.push(store.create_match(tournament.id, new));
        position += 1;
    }
    for leftover in &pairing.leftovers {
        let new =
            NewMatch::new(1, position).with_slots(Some(leftover.occupant()), Some(Occupant::bye()));
        current.push(store.create_match(tournament.id, new));
        position += 1;
    }
    debug!(
        "{}: round 1 has {} matches ({} leftovers)",
        tournament.id,
        current.len(),
        pairing.leftovers.len()
    );

    for round in 2..=tournament.size.total_rounds() {
        let mut next_round = Vec::with_capacity(current.len().div_ceil(2));
        for (index, sources) in current.chunks_mut(2).enumerate() {
            let child = store.create_match(tournament.id, NewMatch::new(round, index as u32 + 1));
            for (source, slot) in sources.iter_mut().zip([Slot::One, Slot::Two]) {
                source.next = Some(NextMatch {
                    match_id: child.id,
                    slot,
                });
                store.update_match(source)?;
            }
            next_round.push(child);
        }
        debug!("{}: round {} has {} matches", tournament.id, round, next_round.len());
        current = next_round;
    }

    let advanced = auto_advance_byes(store, tournament.id)?;
    let matches = store.list_matches(tournament.id);
    info!(
        "{}: built bracket of {} with {} matches, {} bye advances",
        tournament.id,
        tournament.size,
        matches.len(),
        advanced
    );
    Ok(matches)
}
