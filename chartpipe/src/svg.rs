// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG serialization of a [`Scene`].

use std::fmt::Write as _;

use chartpipe_core::{Mark, MarkPayload, Scene, TextAnchor, TextBaseline};
use kurbo::Rect;
use peniko::Brush;

/// How hover text on marks is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TooltipMarkup {
    /// A nested `<title>`, shown natively by SVG viewers.
    Title,
    /// A `data-tooltip` attribute, read by the page's hover script.
    DataAttribute,
}

/// Serializes `scene` as an SVG document.
///
/// The view box is `view` grown to cover every non-text mark. Marks are written in
/// `(z_index, id)` order; hover text is written per `tooltips`.
pub(crate) fn to_svg_string(scene: &Scene, view: Rect, tooltips: TooltipMarkup) -> String {
    let view_box = scene.bounds().map_or(view, |b| view.union(b));
    let mut out = String::new();

    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
    let _ = write!(
        out,
        r#"viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif">"#,
        view_box.x0,
        view_box.y0,
        view_box.width(),
        view_box.height(),
        view_box.width(),
        view_box.height()
    );
    out.push('\n');

    for mark in scene.ordered() {
        write_mark(&mut out, mark, tooltips);
    }

    out.push_str("</svg>\n");
    out
}

fn write_mark(out: &mut String, mark: &Mark, tooltips: TooltipMarkup) {
    match &mark.payload {
        MarkPayload::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_paint_attr(out, "fill", &r.fill);
        }
        MarkPayload::Circle(c) => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                c.circle.center.x, c.circle.center.y, c.circle.radius
            );
            write_paint_attr(out, "fill", &c.fill);
            if c.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &c.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, c.stroke_width);
            }
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
                TextBaseline::Ideographic => "ideographic",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            );
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
            return;
        }
        MarkPayload::Path(p) => {
            let d = p.path.to_svg();
            let _ = write!(out, r#"<path d="{d}""#);
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
            }
        }
    }

    match (&mark.tooltip, tooltips) {
        (Some(tip), TooltipMarkup::Title) => {
            let _ = writeln!(
                out,
                "><title>{}</title></{}>",
                escape_xml(tip),
                element_name(&mark.payload),
            );
        }
        (Some(tip), TooltipMarkup::DataAttribute) => {
            let _ = writeln!(
                out,
                r#" data-tooltip="{}"/>"#,
                escape_xml(tip).replace('\n', "&#10;")
            );
        }
        (None, _) => out.push_str("/>\n"),
    }
}

fn element_name(payload: &MarkPayload) -> &'static str {
    match payload {
        MarkPayload::Rect(_) => "rect",
        MarkPayload::Circle(_) => "circle",
        MarkPayload::Text(_) => "text",
        MarkPayload::Path(_) => "path",
    }
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chartpipe_core::{Mark, MarkId, Scene, TextPayload};
    use kurbo::{Circle, Point};
    use peniko::color::palette::css;

    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    fn hover_scene() -> Scene {
        let mut scene = Scene::new();
        scene.replace([
            Mark::circle(MarkId::from_raw(1), Circle::new((10.0, 20.0), 6.0), css::DARK_ORANGE)
                .with_tooltip("Year: 1995\nName: <b>"),
            Mark::rect(MarkId::from_raw(2), Rect::new(0.0, 0.0, 5.0, 5.0), css::STEEL_BLUE),
        ]);
        scene
    }

    #[test]
    fn standalone_svg_uses_title_elements() {
        let svg = to_svg_string(
            &hover_scene(),
            Rect::new(0.0, 0.0, 100.0, 50.0),
            TooltipMarkup::Title,
        );
        assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 50""#));
        assert!(svg.contains(
            r##"<circle cx="10" cy="20" r="6" fill="#ff8c00"><title>Year: 1995
Name: &lt;b&gt;</title></circle>"##
        ));
        assert!(!svg.contains("data-tooltip"));
        assert!(svg.contains(r##"<rect x="0" y="0" width="5" height="5" fill="#4682b4"/>"##));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn page_svg_uses_data_attributes_only() {
        let svg = to_svg_string(
            &hover_scene(),
            Rect::new(0.0, 0.0, 100.0, 50.0),
            TooltipMarkup::DataAttribute,
        );
        assert!(svg.contains(
            r##"<circle cx="10" cy="20" r="6" fill="#ff8c00" data-tooltip="Year: 1995&#10;Name: &lt;b&gt;"/>"##
        ));
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn rotated_text_gets_a_transform() {
        let mut scene = Scene::new();
        scene.replace([Mark::text(
            MarkId::from_raw(1),
            TextPayload {
                pos: Point::new(6.0, 195.0),
                text: "GDP".into(),
                font_size: 12.0,
                angle: -90.0,
                anchor: TextAnchor::Middle,
                baseline: TextBaseline::Middle,
                fill: css::BLACK.into(),
            },
        )]);
        let svg = to_svg_string(&scene, Rect::new(0.0, 0.0, 600.0, 400.0), TooltipMarkup::Title);
        assert!(svg.contains(r#"transform="rotate(-90 6 195)""#));
        assert!(svg.contains(">GDP</text>"));
    }
}
