//! Layout engine for computing match box positions
//!
//! This module takes the matches of a tournament grouped by round and
//! computes where each match box sits, producing a BracketLayout with
//! anchored boxes and routed connectors.

pub mod config;
pub mod engine;
pub mod routing;
pub mod types;

pub use config::{LayoutConfig, Margins};
pub use engine::compute;
pub use routing::{route_connectors, route_elbow};
pub use types::*;

use log::debug;

/// Log one line per match box, grouped by round
pub fn log_layout(layout: &BracketLayout) {
    debug!("=== Layout Debug ===");
    for round in 1..=layout.total_rounds {
        for b in layout.boxes.values().filter(|b| b.round == round) {
            debug!(
                "  [round {}] {} x={:.1} y={:.1} w={:.1} h={:.1}",
                round, b.match_id, b.bounds.x, b.bounds.y, b.bounds.width, b.bounds.height
            );
        }
    }
    debug!("====================");
}
