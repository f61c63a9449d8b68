//! SVG drawing surface

use std::io;
use std::path::Path;

use crate::layout::{BoundingBox, Point};

use super::surface::Surface;
use super::SvgConfig;

/// Build an SVG document incrementally, one primitive at a time
pub struct SvgSurface {
    config: SvgConfig,
    width: f64,
    height: f64,
    background: String,
    elements: Vec<String>,
}

impl SvgSurface {
    /// Create a blank canvas of the given size filled with `background`
    pub fn new(config: SvgConfig, width: f64, height: f64, background: &str) -> Self {
        Self {
            config,
            width,
            height,
            background: background.to_string(),
            elements: vec![],
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Number of primitives drawn so far
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build the final SVG string
    pub fn finish(&self) -> String {
        let nl = self.newline();
        let prefix = self.prefix();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        ));
        svg.push_str(nl);

        svg.push_str(&format!(
            "{}<style>.{}text {{ font-family: {}; }}</style>",
            self.indent_str(),
            prefix,
            escape_xml(&self.config.font_family)
        ));
        svg.push_str(nl);

        svg.push_str(&format!(
            r#"{}<rect class="{}background" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            prefix,
            self.width,
            self.height,
            escape_xml(&self.background)
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

impl Surface for SvgSurface {
    fn draw_text(&mut self, at: Point, text: &str, color: &str, font_size: f64) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}text" x="{}" y="{}" font-size="{}" fill="{}" dominant-baseline="hanging">{}</text>"#,
            self.indent_str(),
            prefix,
            at.x,
            at.y,
            font_size,
            escape_xml(color),
            escape_xml(text)
        ));
    }

    fn draw_line(&mut self, points: &[Point], color: &str, width: f64) {
        if points.len() < 2 {
            return;
        }
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<path class="{}connector" d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            prefix,
            path_to_d(points),
            escape_xml(color),
            width
        ));
    }

    fn draw_rounded_rect(
        &mut self,
        bounds: BoundingBox,
        radius: f64,
        fill: &str,
        outline: &str,
        outline_width: f64,
    ) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}box" x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            prefix,
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            escape_xml(fill),
            escape_xml(outline),
            outline_width,
            r = radius
        ));
    }

    fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.finish())
    }
}

/// Convert a list of points to an SVG path d attribute
fn path_to_d(path: &[Point]) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut d = format!("M{} {}", path[0].x, path[0].y);
    for point in &path[1..] {
        d.push_str(&format!(" L{} {}", point.x, point.y));
    }
    d
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> SvgSurface {
        SvgSurface::new(SvgConfig::default(), 200.0, 100.0, "#f5f5f5")
    }

    #[test]
    fn test_path_to_d() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        assert_eq!(path_to_d(&path), "M0 0 L100 0 L100 100");
        assert_eq!(path_to_d(&[]), "");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_empty_canvas() {
        let svg = surface().finish();
        assert!(svg.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(svg.contains(r#"width="200" height="100" viewBox="0 0 200 100""#));
        assert!(svg.contains(r##"fill="#f5f5f5""##));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_not_standalone_omits_declaration() {
        let svg = SvgSurface::new(
            SvgConfig::default().with_standalone(false),
            10.0,
            10.0,
            "#fff",
        )
        .finish();
        assert!(svg.starts_with("<svg"));
    }

    #[test]
    fn test_text_is_escaped_and_top_anchored() {
        let mut s = surface();
        s.draw_text(Point::new(40.0, 30.0), "Cats & Dogs", "#141414", 52.0);
        let svg = s.finish();
        assert!(svg.contains(
            r##"<text class="bk-text" x="40" y="30" font-size="52" fill="#141414" dominant-baseline="hanging">Cats &amp; Dogs</text>"##
        ));
    }

    #[test]
    fn test_rounded_rect() {
        let mut s = surface();
        s.draw_rounded_rect(
            BoundingBox::new(80.0, 160.0, 468.0, 90.0),
            10.0,
            "#ffffff",
            "#c8c8c8",
            2.0,
        );
        assert!(s.finish().contains(
            r##"<rect class="bk-box" x="80" y="160" width="468" height="90" rx="10" ry="10" fill="#ffffff" stroke="#c8c8c8" stroke-width="2"/>"##
        ));
    }

    #[test]
    fn test_degenerate_line_is_skipped() {
        let mut s = surface();
        s.draw_line(&[Point::new(1.0, 1.0)], "#000", 2.0);
        assert!(s.is_empty());
        s.draw_line(&[Point::new(1.0, 1.0), Point::new(5.0, 1.0)], "#000", 2.0);
        assert_eq!(s.len(), 1);
        assert!(s.finish().contains(r#"d="M1 1 L5 1""#));
    }

    #[test]
    fn test_compact_output() {
        let mut s = SvgSurface::new(
            SvgConfig::default().with_pretty_print(false),
            10.0,
            10.0,
            "#fff",
        );
        s.draw_text(Point::new(0.0, 0.0), "x", "#000", 10.0);
        assert!(!s.finish().contains('\n'));
    }
}
