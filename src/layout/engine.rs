//! Match box placement
//!
//! Columns are one per round. Round 1 is spread evenly down the available
//! height; every later match is centered between the two matches feeding
//! it. Pixel values are floored where the bracket image has always used
//! whole pixels, so the output lines up with previously rendered brackets.

use log::debug;

use super::config::LayoutConfig;
use super::types::{BoundingBox, BracketLayout, MatchBox, Rounds};

/// Compute the position and size of every match box.
pub fn compute(rounds: &Rounds<'_>, config: &LayoutConfig) -> BracketLayout {
    let total_rounds = rounds.keys().copied().max().unwrap_or(1).max(1);
    let margins = &config.margins;
    let column_width =
        ((config.width - margins.left - margins.right) / f64::from(total_rounds)).floor();
    let box_width = (column_width * config.box_width_ratio).floor();
    let box_height = config.box_height;
    let stacked = box_height + config.min_spacing;

    let mut layout = BracketLayout {
        total_rounds,
        column_width,
        box_width,
        box_height,
        ..BracketLayout::default()
    };
    for round in 1..=total_rounds {
        layout
            .round_x
            .insert(round, margins.left + f64::from(round - 1) * column_width);
    }

    if let Some(first) = rounds.get(&1) {
        let count = first.len().max(1) as f64;
        let available = config.available_height();
        let step = stacked.max((available / count).floor());
        let mut y = margins.top + ((available - step * count) / 2.0).floor().max(0.0);
        let x = layout.round_x[&1];
        for m in first {
            let bounds = BoundingBox::new(x, y, box_width, box_height);
            layout.boxes.insert(m.id, MatchBox::new(m.id, 1, bounds));
            y += step;
        }
    }

    for round in 2..=total_rounds {
        let Some(current) = rounds.get(&round) else {
            continue;
        };
        let previous_centers: Vec<Option<f64>> = rounds
            .get(&(round - 1))
            .map(|prev| prev.iter().map(|m| layout.center_y(m.id)).collect())
            .unwrap_or_default();
        let x = layout.round_x[&round];

        for (i, m) in current.iter().enumerate() {
            let sources = (
                previous_centers.get(2 * i).copied().flatten(),
                previous_centers.get(2 * i + 1).copied().flatten(),
            );
            let y = match sources {
                (Some(a), Some(b)) => (a + b) / 2.0 - box_height / 2.0,
                _ if i == 0 => {
                    let anchor = previous_centers
                        .iter()
                        .flatten()
                        .copied()
                        .next()
                        .unwrap_or(margins.top);
                    anchor - box_height / 2.0
                }
                _ => match layout.get(current[i - 1].id) {
                    Some(above) => above.bounds.bottom() + config.min_spacing,
                    None => margins.top + i as f64 * stacked,
                },
            };
            let bounds = BoundingBox::new(x, y, box_width, box_height);
            layout.boxes.insert(m.id, MatchBox::new(m.id, round, bounds));
        }
    }

    debug!(
        "laid out {} match boxes over {} rounds (column {}px, box {}x{})",
        layout.boxes.len(),
        total_rounds,
        column_width,
        box_width,
        box_height
    );
    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::types::group_rounds;
    use crate::model::{Match, MatchId, TournamentId};

    fn matches(per_round: &[u32]) -> Vec<Match> {
        let mut id = 0;
        let mut out = Vec::new();
        for (r, count) in per_round.iter().enumerate() {
            for position in 1..=*count {
                id += 1;
                out.push(Match {
                    id: MatchId(id),
                    tournament_id: TournamentId(1),
                    round: r as u32 + 1,
                    position,
                    slots: [None, None],
                    winner: None,
                    score: None,
                    scheduled_at: None,
                    next: None,
                });
            }
        }
        out
    }

    #[test]
    fn test_columns_and_box_width() {
        let all = matches(&[4, 2, 1]);
        let layout = compute(&group_rounds(&all), &LayoutConfig::default());
        // (1920 - 160) / 3 = 586.67 -> 586
        assert_eq!(layout.column_width, 586.0);
        assert_eq!(layout.box_width, 468.0);
        assert_eq!(layout.round_x[&1], 80.0);
        assert_eq!(layout.round_x[&2], 666.0);
        assert_eq!(layout.round_x[&3], 1252.0);
    }

    #[test]
    fn test_first_round_is_evenly_stepped() {
        let all = matches(&[4, 2, 1]);
        let layout = compute(&group_rounds(&all), &LayoutConfig::default());
        // available 860, step 215, no leftover so start at the top margin
        let ys: Vec<f64> = (1..=4).map(|i| layout.get(MatchId(i)).unwrap().bounds.y).collect();
        assert_eq!(ys, vec![160.0, 375.0, 590.0, 805.0]);
    }

    #[test]
    fn test_crowded_first_round_uses_minimum_step() {
        let all = matches(&[8, 4, 2, 1]);
        let config = LayoutConfig::default().with_canvas(1920.0, 600.0);
        let layout = compute(&group_rounds(&all), &config);
        let a = layout.get(MatchId(1)).unwrap().bounds.y;
        let b = layout.get(MatchId(2)).unwrap().bounds.y;
        assert_eq!(b - a, 112.0);
        assert_eq!(a, 160.0);
    }

    #[test]
    fn test_parents_are_centered() {
        let all = matches(&[4, 2, 1]);
        let layout = compute(&group_rounds(&all), &LayoutConfig::default());
        let c = |i| layout.center_y(MatchId(i)).unwrap();
        assert_eq!(c(5), (c(1) + c(2)) / 2.0);
        assert_eq!(c(6), (c(3) + c(4)) / 2.0);
        assert_eq!(c(7), (c(5) + c(6)) / 2.0);
    }

    #[test]
    fn test_missing_sources_fall_back() {
        // Round 2 has more matches than round 1 can feed
        let all = matches(&[2, 3]);
        let layout = compute(&group_rounds(&all), &LayoutConfig::default());
        let first_child = layout.get(MatchId(3)).unwrap().bounds;
        let second_child = layout.get(MatchId(4)).unwrap().bounds;
        let third_child = layout.get(MatchId(5)).unwrap().bounds;

        let expected = (layout.center_y(MatchId(1)).unwrap() + layout.center_y(MatchId(2)).unwrap())
            / 2.0;
        assert_eq!(first_child.center_y(), expected);
        assert_eq!(second_child.y, first_child.bottom() + 22.0);
        assert_eq!(third_child.y, second_child.bottom() + 22.0);
    }

    #[test]
    fn test_orphan_round_uses_margin() {
        let all = matches(&[0, 1]);
        let layout = compute(&group_rounds(&all), &LayoutConfig::default());
        assert_eq!(layout.get(MatchId(1)).unwrap().bounds.y, 160.0 - 45.0);
    }

    #[test]
    fn test_no_matches() {
        let layout = compute(&group_rounds(&[]), &LayoutConfig::default());
        assert!(layout.is_empty());
        assert_eq!(layout.total_rounds, 1);
    }
}
