//! Ordered collections of rule lines.

use super::axis::Axis;
use crate::geometry::too_close;
use crate::types::Line;
use std::marker::PhantomData;

/// Which image borders get a synthetic rule when none was detected near them.
///
/// Leading is the top (horizontal) or left (vertical) border.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgePolicy {
    pub leading: bool,
    pub trailing: bool,
}

impl EdgePolicy {
    pub const NONE: EdgePolicy = EdgePolicy::new(false, false);
    pub const BOTH: EdgePolicy = EdgePolicy::new(true, true);
    pub const TRAILING: EdgePolicy = EdgePolicy::new(false, true);

    pub const fn new(leading: bool, trailing: bool) -> Self {
        Self { leading, trailing }
    }
}

/// Rule lines of one orientation, kept sorted by [`Axis::sort_key`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineSet<A: Axis> {
    lines: Vec<Line>,
    _axis: PhantomData<A>,
}

impl<A: Axis> Default for LineSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Axis> LineSet<A> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            _axis: PhantomData,
        }
    }

    /// Build a set from lines in any order.
    pub fn from_lines(mut lines: Vec<Line>) -> Self {
        lines.sort_by_key(A::sort_key);
        Self {
            lines,
            _axis: PhantomData,
        }
    }

    #[inline]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn first(&self) -> Option<&Line> {
        self.lines.first()
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Consecutive line pairs, i.e. the bounds of each row or column band.
    pub fn bands(&self) -> impl Iterator<Item = (&Line, &Line)> + '_ {
        self.lines.windows(2).map(|w| (&w[0], &w[1]))
    }

    /// Insert keeping the order; a line tied with existing ones goes after them.
    pub fn add_line(&mut self, line: Line) -> usize {
        let key = A::sort_key(&line);
        let at = self.lines.partition_point(|l| A::sort_key(l) <= key);
        self.lines.insert(at, line);
        at
    }

    /// Add a full-span rule `distance` pixels past `reference`.
    pub fn insert_line(&mut self, reference: &Line, distance: i32, width: usize, height: usize) -> Line {
        let line = A::shifted(reference, distance, width, height);
        self.add_line(line);
        line
    }

    /// Drop every line too close to the last kept one. Returns the number removed.
    pub fn dedup(&mut self, merge_distance: f64) -> usize {
        let before = self.lines.len();
        let mut kept: Vec<Line> = Vec::with_capacity(before);
        for line in self.lines.drain(..) {
            match kept.last() {
                Some(prev) if too_close(prev, &line, merge_distance) => {}
                _ => kept.push(line),
            }
        }
        self.lines = kept;
        before - self.lines.len()
    }

    /// Add border rules requested by `edges` unless a detected line already
    /// sits within `merge_distance` of that border.
    pub fn synthesize_edges(
        &mut self,
        edges: EdgePolicy,
        width: usize,
        height: usize,
        merge_distance: f64,
    ) {
        if edges.leading {
            let edge = A::rule_at(0, width, height);
            if self.first().map_or(true, |l| !too_close(&edge, l, merge_distance)) {
                self.add_line(edge);
            }
        }
        if edges.trailing {
            let edge = A::rule_at(A::span(width, height) as i32, width, height);
            if self.last().map_or(true, |l| !too_close(&edge, l, merge_distance)) {
                self.add_line(edge);
            }
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.lines
            .windows(2)
            .all(|w| A::sort_key(&w[0]) <= A::sort_key(&w[1]))
    }
}
