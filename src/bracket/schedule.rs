//! Scheduled start times for matches

use chrono::{Duration, NaiveDateTime};

use crate::error::{BracketError, ValidationError};
use crate::model::{Match, MatchId, TournamentId};
use crate::store::RecordStore;

/// Longest gap allowed between consecutive first-round matches
pub const MAX_INTERVAL_MINUTES: i64 = 24 * 60;

/// Formats accepted for times typed by hand (`datetime-local` style)
const TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a `YYYY-MM-DDTHH:MM[:SS]` timestamp
pub fn parse_time(input: &str) -> Result<NaiveDateTime, ValidationError> {
    let trimmed = input.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| ValidationError::MalformedTime {
            input: input.to_string(),
        })
}

/// Check an interval given in minutes; negative values clamp to zero
pub fn validate_interval(minutes: i64) -> Result<i64, ValidationError> {
    if minutes > MAX_INTERVAL_MINUTES {
        return Err(ValidationError::IntervalOutOfRange { minutes });
    }
    Ok(minutes.max(0))
}

/// Give round-1 matches consecutive start times.
///
/// Matches are taken in position order starting at `start`, each one
/// `interval_minutes` after the previous. An interval of zero puts them all
/// at `start`.
pub fn schedule_first_round<S: RecordStore>(
    store: &mut S,
    tournament_id: TournamentId,
    start: NaiveDateTime,
    interval_minutes: i64,
) -> Result<Vec<Match>, BracketError> {
    let step = Duration::minutes(validate_interval(interval_minutes)?);
    let mut at = start;
    let mut scheduled = Vec::new();
    for mut m in store
        .list_matches(tournament_id)
        .into_iter()
        .filter(|m| m.round == 1)
    {
        m.scheduled_at = Some(at);
        store.update_match(&m)?;
        scheduled.push(m);
        at += step;
    }
    Ok(scheduled)
}

/// Set or clear the scheduled time of one match
pub fn set_match_time<S: RecordStore>(
    store: &mut S,
    match_id: MatchId,
    at: Option<NaiveDateTime>,
) -> Result<Match, BracketError> {
    let mut m = store.require_match(match_id)?;
    m.scheduled_at = at;
    store.update_match(&m)?;
    Ok(m)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};

    use super::*;
    use crate::model::{BracketSize, NewMatch};
    use crate::store::{MemoryStore, NewTournament};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 9, 1)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn store_with_round(n: u32) -> (MemoryStore, TournamentId) {
        let mut store = MemoryStore::new();
        let t = store.create_tournament(NewTournament {
            name: "Cup".to_string(),
            stage: None,
            size: BracketSize::Eight,
            randomized: false,
            created_at: Utc::now(),
        });
        for position in (1..=n).rev() {
            store.create_match(t.id, NewMatch::new(1, position));
        }
        store.create_match(t.id, NewMatch::new(2, 1));
        (store, t.id)
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(parse_time("2025-09-01T18:30").unwrap(), at(18, 30));
        assert_eq!(parse_time("2025-09-01T18:30:00").unwrap(), at(18, 30));
        assert!(parse_time("01/09/2025 18:30").is_err());
    }

    #[test]
    fn test_interval_bounds() {
        assert_eq!(validate_interval(-5).unwrap(), 0);
        assert_eq!(validate_interval(1440).unwrap(), 1440);
        assert!(validate_interval(1441).is_err());
    }

    #[test]
    fn test_schedules_by_position() {
        let (mut store, t) = store_with_round(4);
        let scheduled = schedule_first_round(&mut store, t, at(18, 0), 30).unwrap();
        let times: Vec<_> = scheduled.iter().map(|m| (m.position, m.scheduled_at)).collect();
        assert_eq!(
            times,
            vec![
                (1, Some(at(18, 0))),
                (2, Some(at(18, 30))),
                (3, Some(at(19, 0))),
                (4, Some(at(19, 30))),
            ]
        );
        let final_match = store.list_matches(t).pop().unwrap();
        assert_eq!(final_match.scheduled_at, None);
    }

    #[test]
    fn test_zero_interval_keeps_start() {
        let (mut store, t) = store_with_round(2);
        let scheduled = schedule_first_round(&mut store, t, at(9, 15), 0).unwrap();
        assert!(scheduled.iter().all(|m| m.scheduled_at == Some(at(9, 15))));
    }

    #[test]
    fn test_set_and_clear_match_time() {
        let (mut store, t) = store_with_round(2);
        let id = store.list_matches(t)[0].id;
        let m = set_match_time(&mut store, id, Some(at(20, 0))).unwrap();
        assert_eq!(m.scheduled_at, Some(at(20, 0)));
        let m = set_match_time(&mut store, id, None).unwrap();
        assert_eq!(m.scheduled_at, None);
        assert!(set_match_time(&mut store, MatchId(999), None).is_err());
    }
}
