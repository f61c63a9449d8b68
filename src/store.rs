//! Record store interface and an in-memory implementation
//!
//! The bracket engine only talks to storage through [`RecordStore`]. Every
//! logical operation (bracket build, result entry plus propagation) runs
//! inside one [`RecordStore::atomically`] boundary so a half-linked tree or a
//! half-propagated winner is never left behind.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::error::{BracketError, RecordKind};
use crate::model::{
    BracketSize, Entrant, EntrantId, Match, MatchId, NewMatch, Tournament, TournamentId,
};

/// Fields of a tournament before the store assigns it an id
#[derive(Debug, Clone, PartialEq)]
pub struct NewTournament {
    pub name: String,
    pub stage: Option<String>,
    pub size: BracketSize,
    pub randomized: bool,
    pub created_at: DateTime<Utc>,
}

pub trait RecordStore {
    fn create_tournament(&mut self, tournament: NewTournament) -> Tournament;

    fn create_entrant(&mut self, tournament_id: TournamentId, name: &str) -> Entrant;

    fn create_match(&mut self, tournament_id: TournamentId, new: NewMatch) -> Match;

    fn get_tournament(&self, id: TournamentId) -> Option<Tournament>;

    fn get_entrant(&self, id: EntrantId) -> Option<Entrant>;

    fn get_match(&self, id: MatchId) -> Option<Match>;

    /// Entrants of a tournament in creation order
    fn list_entrants(&self, tournament_id: TournamentId) -> Vec<Entrant>;

    /// Matches of a tournament ordered by (round, position)
    fn list_matches(&self, tournament_id: TournamentId) -> Vec<Match>;

    /// Overwrite a stored match with the given record
    fn update_match(&mut self, updated: &Match) -> Result<(), BracketError>;

    /// Open a commit boundary
    fn begin(&mut self);

    /// Make every write since [`RecordStore::begin`] permanent
    fn commit(&mut self);

    /// Discard every write since [`RecordStore::begin`]
    fn rollback(&mut self);

    /// Run `op` inside a commit boundary, rolling back if it fails
    fn atomically<T, E>(&mut self, op: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
    {
        self.begin();
        match op(self) {
            Ok(value) => {
                self.commit();
                Ok(value)
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn require_tournament(&self, id: TournamentId) -> Result<Tournament, BracketError> {
        self.get_tournament(id)
            .ok_or_else(|| BracketError::not_found(RecordKind::Tournament, id.0))
    }

    fn require_match(&self, id: MatchId) -> Result<Match, BracketError> {
        self.get_match(id)
            .ok_or_else(|| BracketError::not_found(RecordKind::Match, id.0))
    }
}

#[derive(Debug, Clone, Default)]
struct Tables {
    tournaments: BTreeMap<TournamentId, Tournament>,
    entrants: BTreeMap<EntrantId, Entrant>,
    matches: BTreeMap<MatchId, Match>,
    next_tournament: u32,
    next_entrant: u32,
    next_match: u32,
}

/// Store backed by ordered maps, with snapshot-based rollback
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Tables,
    snapshot: Option<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a commit boundary is currently open
    pub fn in_transaction(&self) -> bool {
        self.snapshot.is_some()
    }
}

impl RecordStore for MemoryStore {
    fn create_tournament(&mut self, tournament: NewTournament) -> Tournament {
        self.tables.next_tournament += 1;
        let created = Tournament {
            id: TournamentId(self.tables.next_tournament),
            name: tournament.name,
            stage: tournament.stage,
            size: tournament.size,
            randomized: tournament.randomized,
            created_at: tournament.created_at,
        };
        self.tables.tournaments.insert(created.id, created.clone());
        created
    }

    fn create_entrant(&mut self, tournament_id: TournamentId, name: &str) -> Entrant {
        self.tables.next_entrant += 1;
        let entrant = Entrant {
            id: EntrantId(self.tables.next_entrant),
            tournament_id,
            name: name.to_string(),
        };
        self.tables.entrants.insert(entrant.id, entrant.clone());
        entrant
    }

    fn create_match(&mut self, tournament_id: TournamentId, new: NewMatch) -> Match {
        self.tables.next_match += 1;
        let created = Match {
            id: MatchId(self.tables.next_match),
            tournament_id,
            round: new.round,
            position: new.position,
            slots: new.slots,
            winner: None,
            score: None,
            scheduled_at: None,
            next: None,
        };
        self.tables.matches.insert(created.id, created.clone());
        created
    }

    fn get_tournament(&self, id: TournamentId) -> Option<Tournament> {
        self.tables.tournaments.get(&id).cloned()
    }

    fn get_entrant(&self, id: EntrantId) -> Option<Entrant> {
        self.tables.entrants.get(&id).cloned()
    }

    fn get_match(&self, id: MatchId) -> Option<Match> {
        self.tables.matches.get(&id).cloned()
    }

    fn list_entrants(&self, tournament_id: TournamentId) -> Vec<Entrant> {
        self.tables
            .entrants
            .values()
            .filter(|e| e.tournament_id == tournament_id)
            .cloned()
            .collect()
    }

    fn list_matches(&self, tournament_id: TournamentId) -> Vec<Match> {
        let mut matches: Vec<Match> = self
            .tables
            .matches
            .values()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect();
        matches.sort_by_key(|m| (m.round, m.position));
        matches
    }

    fn update_match(&mut self, updated: &Match) -> Result<(), BracketError> {
        match self.tables.matches.get_mut(&updated.id) {
            Some(stored) => {
                *stored = updated.clone();
                Ok(())
            }
            None => Err(BracketError::not_found(RecordKind::Match, updated.id.0)),
        }
    }

    fn begin(&mut self) {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.tables.clone());
        }
    }

    fn commit(&mut self) {
        self.snapshot = None;
    }

    fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.tables = snapshot;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Occupant;

    fn new_tournament() -> NewTournament {
        NewTournament {
            name: "Club Open".to_string(),
            stage: None,
            size: BracketSize::Four,
            randomized: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_ids_autoincrement() {
        let mut store = MemoryStore::new();
        let t = store.create_tournament(new_tournament());
        let a = store.create_entrant(t.id, "A");
        let b = store.create_entrant(t.id, "B");
        assert_eq!(t.id, TournamentId(1));
        assert_eq!(a.id, EntrantId(1));
        assert_eq!(b.id, EntrantId(2));
    }

    #[test]
    fn test_list_matches_is_ordered() {
        let mut store = MemoryStore::new();
        let t = store.create_tournament(new_tournament());
        store.create_match(t.id, NewMatch::new(2, 1));
        store.create_match(t.id, NewMatch::new(1, 2));
        store.create_match(t.id, NewMatch::new(1, 1));

        let order: Vec<(u32, u32)> = store
            .list_matches(t.id)
            .iter()
            .map(|m| (m.round, m.position))
            .collect();
        assert_eq!(order, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn test_update_missing_match_is_not_found() {
        let mut store = MemoryStore::new();
        let t = store.create_tournament(new_tournament());
        let mut m = store.create_match(t.id, NewMatch::new(1, 1));
        m.id = MatchId(99);
        let err = store.update_match(&m).unwrap_err();
        assert!(matches!(err, BracketError::NotFound { kind: RecordKind::Match, id: 99 }));
    }

    #[test]
    fn test_atomically_rolls_back_on_error() {
        let mut store = MemoryStore::new();
        let t = store.create_tournament(new_tournament());
        let result: Result<(), BracketError> = store.atomically(|store| {
            let mut m = store.create_match(t.id, NewMatch::new(1, 1));
            m.winner = Some(Occupant::bye());
            store.update_match(&m)?;
            Err(BracketError::unsupported_size(3))
        });

        assert!(result.is_err());
        assert!(store.list_matches(t.id).is_empty());
        assert!(!store.in_transaction());
    }

    #[test]
    fn test_atomically_commits_on_success() {
        let mut store = MemoryStore::new();
        let t = store.create_tournament(new_tournament());
        let created: Result<Match, BracketError> =
            store.atomically(|store| Ok(store.create_match(t.id, NewMatch::new(1, 1))));

        assert!(created.is_ok());
        assert_eq!(store.list_matches(t.id).len(), 1);
    }
}
