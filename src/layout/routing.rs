//! Connector routing between matches

use log::warn;

use crate::model::Match;

use super::types::*;

/// Create a right-angle elbow between two points.
///
/// The path leaves `from` horizontally, turns at the midpoint between the
/// two x coordinates, runs vertically and enters `to` horizontally.
pub fn route_elbow(from: Point, to: Point) -> Vec<Point> {
    let mid_x = (from.x + to.x) / 2.0;
    vec![from, Point::new(mid_x, from.y), Point::new(mid_x, to.y), to]
}

/// Route a connector for every match that feeds another one.
///
/// Matches whose own box or whose target box is missing from the layout are
/// skipped.
pub fn route_connectors(matches: &[Match], layout: &BracketLayout) -> Vec<ConnectorLayout> {
    let mut connectors = Vec::new();
    for m in matches {
        let Some(next) = m.next else {
            continue;
        };
        let (Some(from), Some(to)) = (layout.get(m.id), layout.get(next.match_id)) else {
            warn!("no connector for {}: box for {} missing", m.id, next.match_id);
            continue;
        };
        connectors.push(ConnectorLayout {
            from_id: m.id,
            to_id: next.match_id,
            slot: next.slot,
            path: route_elbow(from.anchors.source, to.anchors.slot(next.slot)),
        });
    }
    connectors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MatchId, NextMatch, Slot, TournamentId};

    fn linked(id: u32, round: u32, position: u32, next: Option<(u32, Slot)>) -> Match {
        Match {
            id: MatchId(id),
            tournament_id: TournamentId(1),
            round,
            position,
            slots: [None, None],
            winner: None,
            score: None,
            scheduled_at: None,
            next: next.map(|(to, slot)| NextMatch {
                match_id: MatchId(to),
                slot,
            }),
        }
    }

    #[test]
    fn test_elbow_is_orthogonal() {
        let path = route_elbow(Point::new(100.0, 50.0), Point::new(200.0, 120.0));
        assert_eq!(
            path,
            vec![
                Point::new(100.0, 50.0),
                Point::new(150.0, 50.0),
                Point::new(150.0, 120.0),
                Point::new(200.0, 120.0),
            ]
        );
        for pair in path.windows(2) {
            assert!(pair[0].x == pair[1].x || pair[0].y == pair[1].y);
        }
    }

    #[test]
    fn test_connectors_enter_the_linked_slot() {
        let matches = vec![
            linked(1, 1, 1, Some((3, Slot::One))),
            linked(2, 1, 2, Some((3, Slot::Two))),
            linked(3, 2, 1, None),
        ];
        let layout = crate::layout::compute(
            &group_rounds(&matches),
            &crate::layout::LayoutConfig::default(),
        );
        let connectors = route_connectors(&matches, &layout);
        assert_eq!(connectors.len(), 2);

        let target = layout.get(MatchId(3)).unwrap().anchors;
        assert_eq!(connectors[0].path.last(), Some(&target.slot_one));
        assert_eq!(connectors[1].path.last(), Some(&target.slot_two));
        assert_eq!(
            connectors[0].path.first(),
            Some(&layout.get(MatchId(1)).unwrap().anchors.source)
        );
    }

    #[test]
    fn test_dangling_link_has_no_connector() {
        let matches = vec![linked(1, 1, 1, Some((9, Slot::One)))];
        let layout = crate::layout::compute(
            &group_rounds(&matches),
            &crate::layout::LayoutConfig::default(),
        );
        assert!(route_connectors(&matches, &layout).is_empty());
    }
}
