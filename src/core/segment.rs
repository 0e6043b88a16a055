//! Segmenter: split a page of strokes into single-glyph attempts
//!
//! Two strategies:
//! - Gap-based: a spatial jump between consecutive strokes starts a new glyph
//! - Grid-based: practice sheets with fixed cells, one bucket per cell
//!
//! Groups borrow their strokes; nothing is copied.

use std::collections::BTreeMap;

use crate::types::NormalizedStroke;
use crate::{GradingConfig, DEFAULT_GAP_THRESHOLD, DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS};

/// Strokes judged to belong to one handwriting attempt, in temporal order
pub type GlyphGroup<'a> = Vec<&'a NormalizedStroke>;

/// `(row, col)` of a grid cell, row 0 at the top
pub type GridCell = (usize, usize);

/// Segmenter holding the tunable thresholds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segmenter {
    pub gap_threshold: f64,
    pub rows: usize,
    pub cols: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            gap_threshold: DEFAULT_GAP_THRESHOLD,
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

impl Segmenter {
    pub fn from_config(config: &GradingConfig) -> Self {
        Self {
            gap_threshold: config.gap_threshold,
            rows: config.grid_rows,
            cols: config.grid_cols,
        }
    }

    pub fn by_gap<'a>(&self, strokes: &'a [NormalizedStroke]) -> Vec<GlyphGroup<'a>> {
        segment_glyphs(strokes, self.gap_threshold)
    }

    pub fn by_grid<'a>(&self, strokes: &'a [NormalizedStroke]) -> BTreeMap<GridCell, GlyphGroup<'a>> {
        segment_by_grid(strokes, self.rows, self.cols)
    }
}

/// Group strokes by the gap between the end of one stroke and the start of
/// the next. Single left-to-right pass; empty strokes are skipped without
/// opening or closing a group.
pub fn segment_glyphs(strokes: &[NormalizedStroke], gap_threshold: f64) -> Vec<GlyphGroup<'_>> {
    let mut groups: Vec<GlyphGroup<'_>> = Vec::new();

    for stroke in strokes {
        let Some(start) = stroke.first() else {
            continue;
        };

        // Every stroke already in a group is non-empty
        let prev_end = groups
            .last()
            .and_then(|g| g.last().copied())
            .and_then(|s| s.last());

        match prev_end {
            Some(end) if end.distance_to(start) <= gap_threshold => {
                if let Some(group) = groups.last_mut() {
                    group.push(stroke);
                }
            }
            _ => groups.push(vec![stroke]),
        }
    }

    groups
}

/// Bucket strokes into a `rows × cols` grid over the unit square by their
/// point centroid. Empty strokes are skipped; empty cells are absent.
pub fn segment_by_grid(
    strokes: &[NormalizedStroke],
    rows: usize,
    cols: usize,
) -> BTreeMap<GridCell, GlyphGroup<'_>> {
    let mut grid: BTreeMap<GridCell, GlyphGroup<'_>> = BTreeMap::new();
    if rows == 0 || cols == 0 {
        return grid;
    }

    let row_height = 1.0 / rows as f64;
    let col_width = 1.0 / cols as f64;

    for stroke in strokes {
        let Some((cx, cy)) = stroke.centroid() else {
            continue;
        };

        let row = ((cy / row_height).max(0.0) as usize).min(rows - 1);
        let col = ((cx / col_width).max(0.0) as usize).min(cols - 1);

        grid.entry((row, col)).or_default().push(stroke);
    }

    grid
}

// =============================================================================
// TESTS
// =============================================================================
