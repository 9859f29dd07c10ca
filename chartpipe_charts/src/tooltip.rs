// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tooltip state.
//!
//! A chart has a single tooltip that is shown next to the pointer while it is over a data mark
//! and faded out when it leaves. The state here is renderer-agnostic; the HTML output reads its
//! hover offset, opacity and fade durations from the transitions started by [`Tooltip::show`]
//! and [`Tooltip::hide`].

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Vec2};

/// Tooltip placement relative to the pointer.
pub const TOOLTIP_OFFSET: Vec2 = Vec2::new(10.0, -28.0);
/// Opacity of a fully shown tooltip.
pub const TOOLTIP_OPACITY: f64 = 0.9;
/// Fade-in duration in milliseconds.
pub const FADE_IN_MS: u32 = 200;
/// Fade-out duration in milliseconds.
pub const FADE_OUT_MS: u32 = 500;

/// A linear opacity transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    /// Opacity when the transition starts.
    pub from: f64,
    /// Opacity when the transition ends.
    pub to: f64,
    /// Transition length in milliseconds.
    pub duration_ms: u32,
}

impl Fade {
    /// Returns the opacity `elapsed_ms` into the transition.
    pub fn opacity_at(&self, elapsed_ms: u32) -> f64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to;
        }
        let t = f64::from(elapsed_ms) / f64::from(self.duration_ms);
        self.from + t * (self.to - self.from)
    }
}

/// The single tooltip of a chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
    /// Current text; empty while hidden.
    pub text: String,
    /// Top-left position in scene coordinates.
    pub pos: Point,
    /// Opacity at the start of the current fade (or the settled opacity).
    pub opacity: f64,
    /// The in-flight transition, if any.
    pub fade: Option<Fade>,
}

impl Tooltip {
    /// Creates a hidden tooltip.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows `text` offset from `pointer`, fading in from the current opacity.
    ///
    /// Returns the started fade.
    pub fn show(&mut self, pointer: Point, text: impl Into<String>) -> Fade {
        self.text = text.into();
        self.pos = pointer + TOOLTIP_OFFSET;
        self.start(TOOLTIP_OPACITY, FADE_IN_MS)
    }

    /// Starts fading out and returns the started fade. Text and position are kept so the fade
    /// is visible.
    pub fn hide(&mut self) -> Fade {
        self.start(0.0, FADE_OUT_MS)
    }

    fn start(&mut self, to: f64, duration_ms: u32) -> Fade {
        let fade = Fade {
            from: self.opacity,
            to,
            duration_ms,
        };
        self.fade = Some(fade);
        fade
    }

    /// Advances the in-flight fade by `elapsed_ms` and returns the resulting opacity.
    ///
    /// Finished fades settle into [`Tooltip::opacity`].
    pub fn advance(&mut self, elapsed_ms: u32) -> f64 {
        let Some(fade) = self.fade else {
            return self.opacity;
        };
        let opacity = fade.opacity_at(elapsed_ms);
        if elapsed_ms >= fade.duration_ms {
            self.opacity = fade.to;
            self.fade = None;
            if self.opacity == 0.0 {
                self.text.clear();
            }
        }
        opacity
    }

    /// Returns `true` when the tooltip is fully transparent with no transition pending.
    pub fn is_hidden(&self) -> bool {
        self.fade.is_none() && self.opacity == 0.0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn show_places_tooltip_up_and_right_of_pointer() {
        let mut tip = Tooltip::new();
        assert!(tip.is_hidden());
        tip.show(Point::new(100.0, 200.0), "Year: 1995");
        assert_eq!(tip.pos, Point::new(110.0, 172.0));
        assert_eq!(tip.advance(100), 0.45);
        assert_eq!(tip.advance(200), TOOLTIP_OPACITY);
        assert_eq!(tip.opacity, TOOLTIP_OPACITY);
        assert!(tip.fade.is_none());
    }

    #[test]
    fn hide_fades_out_over_500ms_then_clears_text() {
        let mut tip = Tooltip::new();
        tip.show(Point::ZERO, "x");
        tip.advance(FADE_IN_MS);
        tip.hide();
        assert!(tip.advance(250) > 0.0);
        assert_eq!(tip.text, "x");
        assert_eq!(tip.advance(500), 0.0);
        assert!(tip.is_hidden());
        assert!(tip.text.is_empty());
    }

    #[test]
    fn last_hover_wins() {
        let mut tip = Tooltip::new();
        tip.show(Point::new(0.0, 100.0), "a");
        let fade = tip.show(Point::new(50.0, 100.0), "b");
        assert_eq!(tip.text, "b");
        assert_eq!(tip.pos, Point::new(60.0, 72.0));
        assert_eq!((fade.to, fade.duration_ms), (TOOLTIP_OPACITY, FADE_IN_MS));
        assert_eq!(tip.hide().duration_ms, FADE_OUT_MS);
    }

    #[test]
    fn zero_length_fade_jumps_to_target() {
        let fade = Fade {
            from: 0.0,
            to: 1.0,
            duration_ms: 0,
        };
        assert_eq!(fade.opacity_at(0), 1.0);
    }
}
