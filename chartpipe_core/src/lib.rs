// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved mark model for `chartpipe`.
//!
//! A [`Mark`] is one positioned, styled shape in scene coordinates: a rectangle, a circle,
//! a line of unshaped text, or a stroked path. Marks carry a stable [`MarkId`], a z-index for
//! paint order, and optional hover text. A [`Scene`] holds the marks of the most recent render
//! and is replaced wholesale on the next one.
//!
//! Chart construction (scales, guides, layout) lives in `chartpipe_charts`; serialization
//! (SVG/HTML) lives in the `chartpipe` binary.

#![no_std]

extern crate alloc;

mod mark;
mod scene;

pub use mark::{
    CirclePayload, Mark, MarkId, MarkKind, MarkPayload, PathPayload, RectPayload, TextAnchor,
    TextBaseline, TextPayload,
};
pub use scene::Scene;
