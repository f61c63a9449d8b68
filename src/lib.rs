//! Bracketry - single-elimination tournament brackets
//!
//! This library builds bracket trees from a list of entrants (padding with
//! byes), propagates winners up the tree as results come in, and renders the
//! bracket as SVG.
//!
//! # Example
//!
//! ```rust
//! use bracketry::{create_tournament, render_tournament, MemoryStore, RenderConfig, TournamentRequest};
//! use chrono::{NaiveDate, Utc};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut store = MemoryStore::new();
//! let request = TournamentRequest {
//!     name: "Club Open".to_string(),
//!     stage: None,
//!     size: 4,
//!     entrants: vec!["Ana".into(), "Bruno".into(), "Carla".into()],
//!     randomize: false,
//!     start: None,
//!     interval_minutes: None,
//! };
//! let tournament =
//!     create_tournament(&mut store, &request, Utc::now(), &mut StdRng::seed_from_u64(7)).unwrap();
//!
//! let at = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let svg = render_tournament(&store, tournament.id, &RenderConfig::default(), at).unwrap();
//! assert!(svg.contains("Club Open"));
//! ```

pub mod bracket;
pub mod error;
pub mod layout;
pub mod logging;
pub mod manifest;
pub mod model;
pub mod renderer;
pub mod store;
pub mod stylesheet;
pub mod tournament;

pub use bracket::{PropagationPolicy, Score};
pub use error::{BracketError, RecordKind, ValidationError};
pub use layout::{BracketLayout, LayoutConfig, Margins};
pub use manifest::{Manifest, ManifestError};
pub use model::{
    BracketSize, Entrant, EntrantId, Match, MatchId, Occupant, Slot, Tournament, TournamentId,
};
pub use renderer::{draw_bracket, BracketView, FontSizes, Labels, SvgConfig, SvgSurface};
pub use store::{MemoryStore, RecordStore};
pub use tournament::{
    create_tournament, find_match, record_result, ResultEntry, TournamentRequest, WinnerChoice,
};

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use thiserror::Error;

use renderer::Surface;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Top margin the renderer leaves for the title, stage and round labels
pub const RENDER_TOP_MARGIN: f64 = 190.0;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tournament records could not be loaded
    #[error("bracket error: {0}")]
    Bracket(#[from] BracketError),

    /// Output could not be written
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    pub fonts: FontSizes,
    pub labels: Labels,
    /// Corner radius of match boxes
    pub corner_radius: f64,
    /// Debug mode: log the computed layout
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default().with_top_margin(RENDER_TOP_MARGIN),
            svg: SvgConfig::default(),
            stylesheet: Stylesheet::default(),
            fonts: FontSizes::default(),
            labels: Labels::default(),
            corner_radius: 10.0,
            debug: false,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Set the words printed on the bracket
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render a stored tournament to an SVG string
///
/// `generated_at` is the timestamp printed in the footer.
pub fn render_tournament<S: RecordStore>(
    store: &S,
    tournament_id: TournamentId,
    config: &RenderConfig,
    generated_at: NaiveDateTime,
) -> Result<String, RenderError> {
    let surface = draw_tournament(store, tournament_id, config, generated_at)?;
    Ok(surface.finish())
}

/// Render a stored tournament and write it to `dir/<slug>.svg`
pub fn render_to_dir<S: RecordStore>(
    store: &S,
    tournament_id: TournamentId,
    config: &RenderConfig,
    generated_at: NaiveDateTime,
    dir: &Path,
) -> Result<PathBuf, RenderError> {
    let surface = draw_tournament(store, tournament_id, config, generated_at)?;
    let tournament = store.require_tournament(tournament_id)?;
    let path = dir.join(output_file_name(&tournament.name));
    surface.save(&path)?;
    Ok(path)
}

fn draw_tournament<S: RecordStore>(
    store: &S,
    tournament_id: TournamentId,
    config: &RenderConfig,
    generated_at: NaiveDateTime,
) -> Result<SvgSurface, BracketError> {
    let tournament = store.require_tournament(tournament_id)?;
    let entrants = store.list_entrants(tournament_id);
    let matches = store.list_matches(tournament_id);

    let palette = config.stylesheet.palette();
    let mut surface = SvgSurface::new(
        config.svg.clone(),
        config.layout.width,
        config.layout.height,
        &palette.background,
    );
    let view = BracketView {
        tournament: &tournament,
        entrants: &entrants,
        matches: &matches,
    };
    draw_bracket(&mut surface, view, config, &palette, generated_at);
    Ok(surface)
}

/// File name for a rendered bracket, derived from the tournament name
pub fn output_file_name(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "bracket.svg".to_string()
    } else {
        format!("{slug}.svg")
    }
}
