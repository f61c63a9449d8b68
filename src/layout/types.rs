//! Core types for the layout engine

use std::collections::BTreeMap;

use crate::model::{Match, MatchId, Slot};

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box representing the spatial extent of a match box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Vertical center
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Check if this bounding box contains a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Compute the union of two bounding boxes (smallest box containing both)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        BoundingBox::new(x, y, right - x, bottom - y)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Connector attachment points of a match box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchAnchors {
    /// Right-middle edge, where the connector to the next match leaves
    pub source: Point,
    /// Left edge, 30% down: entry point for the slot 1 feeder
    pub slot_one: Point,
    /// Left edge, 70% down: entry point for the slot 2 feeder
    pub slot_two: Point,
}

impl MatchAnchors {
    pub fn for_bounds(bounds: &BoundingBox) -> Self {
        Self {
            source: Point::new(bounds.right(), bounds.center_y()),
            slot_one: Point::new(bounds.x, bounds.y + bounds.height * 0.30),
            slot_two: Point::new(bounds.x, bounds.y + bounds.height * 0.70),
        }
    }

    /// Entry point for the feeder of `slot`
    pub fn slot(&self, slot: Slot) -> Point {
        match slot {
            Slot::One => self.slot_one,
            Slot::Two => self.slot_two,
        }
    }
}

/// Geometry computed for one match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchBox {
    pub match_id: MatchId,
    pub round: u32,
    pub bounds: BoundingBox,
    pub anchors: MatchAnchors,
}

impl MatchBox {
    pub fn new(match_id: MatchId, round: u32, bounds: BoundingBox) -> Self {
        Self {
            match_id,
            round,
            bounds,
            anchors: MatchAnchors::for_bounds(&bounds),
        }
    }
}

/// An orthogonal connector from a match to the slot it feeds
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorLayout {
    pub from_id: MatchId,
    pub to_id: MatchId,
    pub slot: Slot,
    pub path: Vec<Point>,
}

/// Matches grouped by round, each round sorted by position
pub type Rounds<'a> = BTreeMap<u32, Vec<&'a Match>>;

/// Group matches by round and sort each round by position
pub fn group_rounds(matches: &[Match]) -> Rounds<'_> {
    let mut rounds: Rounds<'_> = BTreeMap::new();
    for m in matches {
        rounds.entry(m.round).or_default().push(m);
    }
    for round in rounds.values_mut() {
        round.sort_by_key(|m| m.position);
    }
    rounds
}

/// The complete result of layout computation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BracketLayout {
    pub boxes: BTreeMap<MatchId, MatchBox>,
    /// Left edge of each round's column
    pub round_x: BTreeMap<u32, f64>,
    pub total_rounds: u32,
    pub column_width: f64,
    pub box_width: f64,
    pub box_height: f64,
}

impl BracketLayout {
    pub fn get(&self, id: MatchId) -> Option<&MatchBox> {
        self.boxes.get(&id)
    }

    /// Vertical center of a match box
    pub fn center_y(&self, id: MatchId) -> Option<f64> {
        self.get(id).map(|b| b.bounds.center_y())
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Bounding box enclosing every match box
    pub fn bounds(&self) -> BoundingBox {
        self.boxes
            .values()
            .map(|b| b.bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(20.0, 5.0, 10.0, 30.0);
        assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 30.0, 35.0));
    }

    #[test]
    fn test_anchors_sit_on_edges() {
        let bounds = BoundingBox::new(80.0, 200.0, 100.0, 90.0);
        let anchors = MatchAnchors::for_bounds(&bounds);
        assert_eq!(anchors.source, Point::new(180.0, 245.0));
        assert_eq!(anchors.slot(Slot::One), Point::new(80.0, 227.0));
        assert_eq!(anchors.slot(Slot::Two), Point::new(80.0, 263.0));
        assert!(bounds.contains(anchors.slot_two));
    }
}
