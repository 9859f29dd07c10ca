// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A retained set of marks for the most recent render.

extern crate alloc;

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::{Mark, MarkId};

/// The marks produced by one render pass, keyed by [`MarkId`].
///
/// There is no incremental diffing: [`Scene::replace`] discards every mark of the previous
/// render before inserting the new ones.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Mark>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces every mark with `marks`, returning how many marks were discarded.
    ///
    /// If two marks share an id, the later one wins.
    pub fn replace(&mut self, marks: impl IntoIterator<Item = Mark>) -> usize {
        let discarded = self.marks.len();
        self.marks.clear();
        for mark in marks {
            self.marks.insert(mark.id, mark);
        }
        discarded
    }

    /// Returns the number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the scene holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Looks up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id)
    }

    /// Returns the marks in paint order: by `(z_index, id)`.
    pub fn ordered(&self) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self.marks.values().collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Returns the union of the geometric bounds of all non-text marks.
    pub fn bounds(&self) -> Option<Rect> {
        self.marks
            .values()
            .filter_map(|m| m.payload.bounds())
            .reduce(|a, b| a.union(b))
    }
}
