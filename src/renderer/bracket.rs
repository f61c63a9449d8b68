//! Drawing a laid-out bracket onto a surface

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::layout::{self, group_rounds, route_connectors, BoundingBox, Point};
use crate::model::{Entrant, EntrantId, Match, Occupant, Tournament};
use crate::stylesheet::Palette;
use crate::RenderConfig;

use super::config::Labels;
use super::surface::Surface;

/// Stroke width of box outlines and connectors
const STROKE_WIDTH: f64 = 2.0;

const TITLE_AT: Point = Point { x: 40.0, y: 30.0 };
const STAGE_AT: Point = Point { x: 40.0, y: 100.0 };
const ROUND_LABEL_Y: f64 = 150.0;

/// Offsets of text inside a match box
const NAME_INSET_X: f64 = 10.0;
const SLOT_ONE_TEXT_Y: f64 = 10.0;
const SLOT_TWO_TEXT_Y: f64 = 46.0;
const META_INSET_RIGHT: f64 = 180.0;

/// Footer offsets from the bottom-right corner of the canvas
const FOOTER_INSET_RIGHT: f64 = 340.0;
const FOOTER_INSET_BOTTOM: f64 = 40.0;

/// Records needed to draw one tournament
#[derive(Debug, Clone, Copy)]
pub struct BracketView<'a> {
    pub tournament: &'a Tournament,
    pub entrants: &'a [Entrant],
    pub matches: &'a [Match],
}

/// Display text for one match box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLabels {
    /// Slot labels; empty for an empty slot
    pub names: [String; 2],
    pub byes: [bool; 2],
    pub time: Option<String>,
    pub score: Option<String>,
}

fn slot_label(
    occupant: Option<&Occupant>,
    names: &HashMap<EntrantId, &str>,
    labels: &Labels,
) -> String {
    match occupant {
        Some(Occupant::Resolved(id)) => names
            .get(id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| labels.unknown.clone()),
        Some(Occupant::Unresolved(text)) => text.clone(),
        None => String::new(),
    }
}

/// Compute the labels shown in a match box
pub fn match_labels(m: &Match, names: &HashMap<EntrantId, &str>, labels: &Labels) -> MatchLabels {
    let slot_names = [
        slot_label(m.slots[0].as_ref(), names, labels),
        slot_label(m.slots[1].as_ref(), names, labels),
    ];
    let byes = [0, 1].map(|i| {
        !matches!(m.slots[i], Some(Occupant::Resolved(_)))
            && crate::model::is_bye_name(&slot_names[i])
    });
    MatchLabels {
        names: slot_names,
        byes,
        time: m.scheduled_at.map(|t| t.format("%d/%m %H:%M").to_string()),
        score: m.score.as_ref().map(|s| s.to_string()),
    }
}

/// Pick the text colour of both slot names
pub fn slot_colors<'p>(m: &Match, labels: &MatchLabels, palette: &'p Palette) -> [&'p str; 2] {
    let neutral = |i: usize| {
        if labels.byes[i] {
            palette.bye.as_str()
        } else {
            palette.text.as_str()
        }
    };
    let beaten = |i: usize| {
        if labels.byes[i] {
            palette.bye.as_str()
        } else {
            palette.lose.as_str()
        }
    };

    let Some(winner) = &m.winner else {
        return [neutral(0), neutral(1)];
    };
    let won = [0, 1].map(|i| match winner {
        Occupant::Resolved(id) => m.slots[i] == Some(Occupant::Resolved(*id)),
        Occupant::Unresolved(text) => {
            !text.is_empty() && !labels.names[i].is_empty() && labels.names[i] == *text
        }
    });

    match won {
        [true, _] => [palette.win.as_str(), beaten(1)],
        [false, true] => [beaten(0), palette.win.as_str()],
        [false, false] => [neutral(0), neutral(1)],
    }
}

/// Draw a whole tournament bracket onto `surface`.
///
/// `palette` is the resolved form of `config.stylesheet`. With no matches
/// only the title and stage are drawn.
pub fn draw_bracket<S: Surface>(
    surface: &mut S,
    view: BracketView<'_>,
    config: &RenderConfig,
    palette: &Palette,
    generated_at: NaiveDateTime,
) {
    let fonts = &config.fonts;
    let labels = &config.labels;

    surface.draw_text(TITLE_AT, &view.tournament.name, &palette.title, fonts.title);
    if let Some(stage) = &view.tournament.stage {
        surface.draw_text(
            STAGE_AT,
            &format!("{}: {}", labels.stage, stage),
            &palette.stage,
            fonts.subtitle,
        );
    }

    let rounds = group_rounds(view.matches);
    if rounds.is_empty() {
        return;
    }

    let bracket = layout::compute(&rounds, &config.layout);
    if config.debug {
        layout::log_layout(&bracket);
    }

    for connector in route_connectors(view.matches, &bracket) {
        surface.draw_line(&connector.path, &palette.connector, STROKE_WIDTH);
    }

    let names: HashMap<EntrantId, &str> = view
        .entrants
        .iter()
        .map(|e| (e.id, e.name.as_str()))
        .collect();

    for (round, matches) in &rounds {
        let column_x = bracket.round_x.get(round).copied().unwrap_or_else(|| {
            config.layout.margins.left + f64::from(round - 1) * bracket.column_width
        });
        surface.draw_text(
            Point::new(column_x, ROUND_LABEL_Y),
            &format!("{} {}", labels.round, round),
            &palette.round_label,
            fonts.subtitle,
        );

        for m in matches {
            let Some(mbox) = bracket.get(m.id) else {
                continue;
            };
            draw_match(surface, m, mbox.bounds, &names, config, palette);
        }
    }

    surface.draw_text(
        Point::new(
            config.layout.width - FOOTER_INSET_RIGHT,
            config.layout.height - FOOTER_INSET_BOTTOM,
        ),
        &format!(
            "{}: {}",
            labels.generated,
            generated_at.format("%d/%m/%Y %H:%M")
        ),
        &palette.footer,
        fonts.small,
    );
}

fn draw_match<S: Surface>(
    surface: &mut S,
    m: &Match,
    bounds: BoundingBox,
    names: &HashMap<EntrantId, &str>,
    config: &RenderConfig,
    palette: &Palette,
) {
    surface.draw_rounded_rect(
        bounds,
        config.corner_radius,
        &palette.box_fill,
        &palette.box_outline,
        STROKE_WIDTH,
    );

    let text = match_labels(m, names, &config.labels);
    let colors = slot_colors(m, &text, palette);
    let rows = [SLOT_ONE_TEXT_Y, SLOT_TWO_TEXT_Y];

    for i in 0..2 {
        let label = if text.names[i].is_empty() {
            config.labels.empty_slot.as_str()
        } else {
            text.names[i].as_str()
        };
        surface.draw_text(
            Point::new(bounds.x + NAME_INSET_X, bounds.y + rows[i]),
            label,
            colors[i],
            config.fonts.name,
        );
    }

    let meta_x = bounds.right() - META_INSET_RIGHT;
    if let Some(time) = &text.time {
        surface.draw_text(
            Point::new(meta_x, bounds.y + SLOT_ONE_TEXT_Y),
            time,
            &palette.meta,
            config.fonts.small,
        );
    }
    if let Some(score) = &text.score {
        surface.draw_text(
            Point::new(meta_x, bounds.y + SLOT_TWO_TEXT_Y),
            score,
            &palette.score,
            config.fonts.small,
        );
    }
}
