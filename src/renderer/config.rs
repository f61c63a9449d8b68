//! Configuration for bracket rendering

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "bk-" for "bk-box")
    pub class_prefix: Option<String>,

    /// CSS font-family applied to all text
    pub font_family: String,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("bk-".to_string()),
            font_family: "Arial, Helvetica, sans-serif".to_string(),
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }
}

/// Font sizes used when drawing a bracket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizes {
    pub title: f64,
    /// Stage line and round labels
    pub subtitle: f64,
    /// Entrant names inside match boxes
    pub name: f64,
    /// Scheduled time, score and footer
    pub small: f64,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 52.0,
            subtitle: 28.0,
            name: 22.0,
            small: 18.0,
        }
    }
}

/// Fixed words printed on the bracket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub stage: String,
    pub round: String,
    pub generated: String,
    /// Shown for a resolved entrant whose record is gone
    pub unknown: String,
    /// Shown for an empty slot
    pub empty_slot: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            stage: "Stage".to_string(),
            round: "Round".to_string(),
            generated: "Generated".to_string(),
            unknown: "Unknown".to_string(),
            empty_slot: "—".to_string(),
        }
    }
}
