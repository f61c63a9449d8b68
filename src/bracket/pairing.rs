//! First-round pairing that never puts two byes against each other

use crate::model::Entrant;

/// Output of [`pair_entrants`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pairing {
    /// Matched pairs; a bye, when present, is always the second entrant
    pub pairs: Vec<(Entrant, Entrant)>,
    /// Entrants left unpaired, each later given a match against a forced bye
    pub leftovers: Vec<Entrant>,
}

impl Pairing {
    /// Number of first-round matches this pairing materializes into
    pub fn match_count(&self) -> usize {
        self.pairs.len() + self.leftovers.len()
    }
}

/// Pair entrants for the first round.
///
/// Byes are consumed against real entrants first, remaining real entrants
/// are paired with each other, and anything that cannot be paired without a
/// bye-vs-bye match is returned as a leftover. Entrants are taken from the
/// back of each partition; shuffling is up to the caller.
pub fn pair_entrants(entrants: &[Entrant]) -> Pairing {
    let (mut byes, mut real): (Vec<Entrant>, Vec<Entrant>) =
        entrants.iter().cloned().partition(Entrant::is_bye);

    let mut pairs = Vec::with_capacity(entrants.len() / 2);

    while !byes.is_empty() && !real.is_empty() {
        if let (Some(r), Some(b)) = (real.pop(), byes.pop()) {
            pairs.push((r, b));
        }
    }

    while real.len() >= 2 {
        if let (Some(a), Some(b)) = (real.pop(), real.pop()) {
            pairs.push((a, b));
        }
    }

    if real.len() == 1 && !byes.is_empty() {
        if let (Some(r), Some(b)) = (real.pop(), byes.pop()) {
            pairs.push((r, b));
        }
    }

    let mut leftovers = Vec::with_capacity(byes.len() + real.len());
    while let Some(b) = byes.pop() {
        leftovers.push(b);
    }
    leftovers.append(&mut real);

    Pairing { pairs, leftovers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntrantId, TournamentId};

    fn entrants(names: &[&str]) -> Vec<Entrant> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Entrant {
                id: EntrantId(i as u32 + 1),
                tournament_id: TournamentId(1),
                name: name.to_string(),
            })
            .collect()
    }

    fn names(pairing: &Pairing) -> Vec<(String, String)> {
        pairing
            .pairs
            .iter()
            .map(|(a, b)| (a.name.clone(), b.name.clone()))
            .collect()
    }

    #[test]
    fn test_byes_pair_with_real_first() {
        let pairing = pair_entrants(&entrants(&["A", "B", "C", "BYE"]));
        assert_eq!(
            names(&pairing),
            vec![
                ("C".to_string(), "BYE".to_string()),
                ("B".to_string(), "A".to_string()),
            ]
        );
        assert!(pairing.leftovers.is_empty());
    }

    #[test]
    fn test_all_real() {
        let pairing = pair_entrants(&entrants(&["A", "B", "C", "D", "E", "F", "G", "H"]));
        assert_eq!(pairing.pairs.len(), 4);
        assert!(pairing.leftovers.is_empty());
        assert!(pairing.pairs.iter().all(|(a, b)| !a.is_bye() && !b.is_bye()));
    }

    #[test]
    fn test_all_byes_are_never_paired() {
        let pairing = pair_entrants(&entrants(&["BYE", "bye", "Bye", "BYE"]));
        assert!(pairing.pairs.is_empty());
        assert_eq!(pairing.leftovers.len(), 4);
    }

    #[test]
    fn test_excess_byes_become_leftovers() {
        let pairing = pair_entrants(&entrants(&["A", "BYE", "BYE", "BYE"]));
        assert_eq!(names(&pairing), vec![("A".to_string(), "BYE".to_string())]);
        assert_eq!(pairing.leftovers.len(), 2);
        assert!(pairing.leftovers.iter().all(Entrant::is_bye));
        assert_eq!(pairing.match_count(), 3);
    }

    #[test]
    fn test_odd_real_count_pairs_last_real_with_bye() {
        let pairing = pair_entrants(&entrants(&["A", "B", "C"]));
        assert_eq!(pairing.pairs.len(), 1);
        assert_eq!(pairing.leftovers.len(), 1);
        assert_eq!(pairing.leftovers[0].name, "A");
    }

    #[test]
    fn test_no_pair_is_bye_vs_bye_for_any_mix() {
        for byes in 0..=8 {
            let mut list: Vec<&str> = vec!["P"; 8 - byes];
            list.extend(std::iter::repeat("BYE").take(byes));
            let pairing = pair_entrants(&entrants(&list));
            assert!(
                pairing.pairs.iter().all(|(a, b)| !(a.is_bye() && b.is_bye())),
                "bye-vs-bye with {byes} byes"
            );
            let consumed = pairing.pairs.len() * 2 + pairing.leftovers.len();
            assert_eq!(consumed, 8);
        }
    }
}
