//! Bracket renderer
//!
//! Draws a tournament onto a [`Surface`]. The SVG surface produces the
//! document written by the CLI; other surfaces only need the three drawing
//! primitives.

pub mod bracket;
pub mod config;
pub mod surface;
pub mod svg;

pub use bracket::{draw_bracket, match_labels, slot_colors, BracketView, MatchLabels};
pub use config::{FontSizes, Labels, SvgConfig};
pub use surface::{DrawCommand, RecordingSurface, Surface};
pub use svg::SvgSurface;
