// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HTML page wrapping a chart SVG with a single shared hover tooltip.

use chartpipe_charts::{Fade, Tooltip};
use kurbo::{Point, Vec2};

use crate::svg::escape_xml;

const STYLE: &str = "\
body { font-family: sans-serif; }
#chart { position: relative; display: inline-block; }
#tooltip {
  position: absolute;
  opacity: 0;
  pointer-events: none;
  padding: 6px 8px;
  border-radius: 4px;
  background: #ffffe0;
  border: 1px solid #999;
  font-size: 12px;
  white-space: pre-line;
}";

const SCRIPT: &str = r##"
const tooltip = document.getElementById("tooltip");
for (const mark of document.querySelectorAll("#chart [data-tooltip]")) {
  mark.addEventListener("mouseover", (event) => {
    tooltip.textContent = mark.getAttribute("data-tooltip");
    tooltip.style.left = (event.pageX + @DX@) + "px";
    tooltip.style.top = (event.pageY + @DY@) + "px";
    tooltip.style.transition = "opacity @FADE_IN@ms";
    tooltip.style.opacity = "@OPACITY@";
  });
  mark.addEventListener("mouseout", () => {
    tooltip.style.transition = "opacity @FADE_OUT@ms";
    tooltip.style.opacity = "0";
  });
}
"##;

/// Hover parameters of the page script, read off the transitions of a [`Tooltip`].
#[derive(Clone, Copy, Debug, PartialEq)]
struct HoverScript {
    offset: Vec2,
    fade_in: Fade,
    fade_out: Fade,
}

impl HoverScript {
    fn from_tooltip() -> Self {
        let mut tooltip = Tooltip::new();
        let fade_in = tooltip.show(Point::ORIGIN, "");
        let offset = tooltip.pos - Point::ORIGIN;
        tooltip.advance(fade_in.duration_ms);
        let fade_out = tooltip.hide();
        Self {
            offset,
            fade_in,
            fade_out,
        }
    }

    fn render(&self) -> String {
        SCRIPT
            .replace("@DX@", &self.offset.x.to_string())
            .replace("@DY@", &self.offset.y.to_string())
            .replace("@FADE_IN@", &self.fade_in.duration_ms.to_string())
            .replace("@FADE_OUT@", &self.fade_out.duration_ms.to_string())
            .replace("@OPACITY@", &self.fade_in.to.to_string())
    }
}

/// Wraps `svg` in a page: the chart goes in `#chart`, one `#tooltip` element is appended to
/// the body, and a script drives it from the marks' `data-tooltip` attributes.
pub(crate) fn page(title: &str, svg: &str) -> String {
    let script = HoverScript::from_tooltip().render();

    let mut out = String::with_capacity(svg.len() + STYLE.len() + script.len() + 256);
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>");
    out.push_str(&escape_xml(title));
    out.push_str("</title>\n<style>\n");
    out.push_str(STYLE);
    out.push_str("\n</style>\n</head>\n<body>\n<div id=\"chart\">\n");
    out.push_str(svg);
    out.push_str("</div>\n<div id=\"tooltip\"></div>\n<script>");
    out.push_str(&script);
    out.push_str("</script>\n</body>\n</html>\n");
    out
}
