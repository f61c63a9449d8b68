//! Drawing surface abstraction
//!
//! The bracket renderer computes every coordinate and colour itself and only
//! asks the surface to rasterize three primitives. Colours are CSS colour
//! strings (`#rrggbb`).

use std::io;
use std::path::Path;

use crate::layout::{BoundingBox, Point};

pub trait Surface {
    /// Draw text with its top-left corner at `at`
    fn draw_text(&mut self, at: Point, text: &str, color: &str, font_size: f64);

    /// Draw a polyline through `points`
    fn draw_line(&mut self, points: &[Point], color: &str, width: f64);

    /// Draw a filled, outlined rectangle with rounded corners
    fn draw_rounded_rect(
        &mut self,
        bounds: BoundingBox,
        radius: f64,
        fill: &str,
        outline: &str,
        outline_width: f64,
    );

    /// Write the finished drawing to `path`
    fn save(&self, path: &Path) -> io::Result<()>;
}

/// A single primitive issued to a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text {
        at: Point,
        text: String,
        color: String,
        font_size: f64,
    },
    Line {
        points: Vec<Point>,
        color: String,
        width: f64,
    },
    RoundedRect {
        bounds: BoundingBox,
        radius: f64,
        fill: String,
        outline: String,
        outline_width: f64,
    },
}

/// Surface that keeps the primitives it receives instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text command, as (position, text, colour)
    pub fn texts(&self) -> Vec<(Point, &str, &str)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text {
                    at, text, color, ..
                } => Some((*at, text.as_str(), color.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Colour of the first text command with exactly this content
    pub fn text_color(&self, content: &str) -> Option<&str> {
        self.texts()
            .into_iter()
            .find(|(_, text, _)| *text == content)
            .map(|(_, _, color)| color)
    }
}

impl Surface for RecordingSurface {
    fn draw_text(&mut self, at: Point, text: &str, color: &str, font_size: f64) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color: color.to_string(),
            font_size,
        });
    }

    fn draw_line(&mut self, points: &[Point], color: &str, width: f64) {
        self.commands.push(DrawCommand::Line {
            points: points.to_vec(),
            color: color.to_string(),
            width,
        });
    }

    fn draw_rounded_rect(
        &mut self,
        bounds: BoundingBox,
        radius: f64,
        fill: &str,
        outline: &str,
        outline_width: f64,
    ) {
        self.commands.push(DrawCommand::RoundedRect {
            bounds,
            radius,
            fill: fill.to_string(),
            outline: outline.to_string(),
            outline_width,
        });
    }

    fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, format!("{:#?}", self.commands))
    }
}
