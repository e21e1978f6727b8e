//! SVG preview of an allocated bar

use crate::host::PanelReport;
use crate::layout::{ActorBox, Placement, PlacementIntent};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    labels: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            labels: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the default look for bar, element and corner rects
    pub fn add_default_styles(&mut self) {
        let p = self.prefix();
        self.styles.push(format!(
            ".{p}bar {{ fill: #1e1e1e; }} \
             .{p}element {{ fill: #3d6fb4; fill-opacity: 0.6; stroke: #9cc0f0; }} \
             .{p}corner {{ fill: #1e1e1e; }} \
             .{p}unresolved {{ fill: none; stroke: #e05d44; stroke-dasharray: 4 2; }} \
             .{p}label {{ fill: #ffffff; font-size: 10px; font-family: sans-serif; }}"
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, id: Option<&str>, rect: &ActorBox, classes: &[String]) {
        let id_attr = id.map(|i| format!(r#" id="{}""#, i)).unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements.push(format!(
            r#"{}<rect{}{} x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            id_attr,
            class_attr,
            rect.x1,
            rect.y1,
            rect.width(),
            rect.height()
        ));
    }

    /// Add a label centered on `rect`, drawn above every rect
    pub fn add_label(&mut self, text: &str, rect: &ActorBox) {
        let prefix = self.prefix();
        let x = (rect.x1 + rect.x2) / 2.0;
        let y = (rect.y1 + rect.y2) / 2.0;

        self.labels.push(format!(
            r#"{}<text class="{}label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            escape_xml(text)
        ));
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = -padding;
        let vb_y = -padding;
        let vb_w = width + 2.0 * padding;
        let vb_h = height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        for label in &self.labels {
            svg.push_str(label);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a bar-local preview of one allocation report
pub fn render_svg(report: &PanelReport, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let prefix = builder.prefix();

    builder.add_default_styles();

    let bar = ActorBox::from_size(0.0, 0.0, report.geometry.w, report.geometry.h);
    builder.add_rect(Some("bar"), &bar, &[format!("{}bar", prefix)]);

    for placement in &report.outcome.placements {
        render_placement(placement, &prefix, config.labels, &mut builder);
    }

    if let Some(corners) = &report.outcome.corners {
        let classes = [format!("{}corner", prefix)];
        builder.add_rect(Some("corner-left"), &corners.left, &classes);
        builder.add_rect(Some("corner-right"), &corners.right, &classes);
    }

    builder.build(report.clip.width(), report.clip.height())
}

fn render_placement(placement: &Placement, prefix: &str, labels: bool, builder: &mut SvgBuilder) {
    let mut classes = vec![
        format!("{}element", prefix),
        format!("{}{}", prefix, intent_class(placement.intent)),
    ];
    if !placement.resolved {
        classes.push(format!("{}unresolved", prefix));
    }

    let name = placement.id.as_str();
    builder.add_rect(Some(name), &placement.rect, &classes);

    if labels && placement.rect.width() > 0.0 && placement.rect.height() > 0.0 {
        builder.add_label(name, &placement.rect);
    }
}

fn intent_class(intent: PlacementIntent) -> &'static str {
    match intent {
        PlacementIntent::StartAnchored => "start",
        PlacementIntent::EndAnchored => "end",
        PlacementIntent::CenteredOnBar => "centered",
        PlacementIntent::CenteredOnMonitor => "center-monitor",
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
