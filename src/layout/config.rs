//! Configuration for the layout engine

/// Empty space kept around the bracket on each side of the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 80.0,
            right: 80.0,
            top: 160.0,
            bottom: 60.0,
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Canvas width in pixels
    pub width: f64,

    /// Canvas height in pixels
    pub height: f64,

    pub margins: Margins,

    /// Fixed height of every match box
    pub box_height: f64,

    /// Minimum vertical gap between stacked match boxes
    pub min_spacing: f64,

    /// Share of a round's column taken by its match boxes
    pub box_width_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1920.0,
            height: 1080.0,
            margins: Margins::default(),
            box_height: 90.0,
            min_spacing: 22.0,
            box_width_ratio: 0.80,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size
    pub fn with_canvas(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set all four margins
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set only the top margin (room for title and round labels)
    pub fn with_top_margin(mut self, top: f64) -> Self {
        self.margins.top = top;
        self
    }

    /// Set the match box height
    pub fn with_box_height(mut self, height: f64) -> Self {
        self.box_height = height;
        self
    }

    /// Set the minimum spacing between boxes
    pub fn with_min_spacing(mut self, spacing: f64) -> Self {
        self.min_spacing = spacing;
        self
    }

    /// Vertical room between the top and bottom margins
    pub fn available_height(&self) -> f64 {
        self.height - self.margins.top - self.margins.bottom
    }
}
