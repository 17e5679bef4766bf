//! Pure scroll-position tracking over measured section geometry.
//!
//! - `has_reached`: whether the scroll offset has arrived at a section
//! - `tab_bar_should_show`: whether any tab section has been reached
//! - `active_section`: which tab to highlight for a scroll offset
//!
//! Unmeasured sections are never treated as positioned at offset 0.

use crate::geometry::GeometryMap;
use crate::section::{SectionId, SectionOrder};

/// Distance from the end of the content within which the last tab is
/// always active.
pub const BOTTOM_SNAP_MARGIN: f64 = 100.0;

/// Viewport metrics needed to map an offset onto a tab.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerMetrics {
    pub tab_bar_height: f64,
    pub max_scroll_extent: f64,
    pub bottom_snap_margin: f64,
}

impl TrackerMetrics {
    pub fn new(tab_bar_height: f64, max_scroll_extent: f64) -> Self {
        Self {
            tab_bar_height,
            max_scroll_extent,
            bottom_snap_margin: BOTTOM_SNAP_MARGIN,
        }
    }

    pub fn with_bottom_snap_margin(mut self, margin: f64) -> Self {
        self.bottom_snap_margin = margin;
        self
    }
}

/// True iff `id` is measured and `offset >= position - threshold`.
pub fn has_reached(id: &str, offset: f64, geometry: &GeometryMap, threshold: f64) -> bool {
    geometry
        .get(id)
        .is_some_and(|section| offset >= section.position - threshold)
}

/// True iff there are tabs and at least one of them has been reached.
pub fn tab_bar_should_show(
    tabs: &[SectionId],
    offset: f64,
    geometry: &GeometryMap,
    threshold: f64,
) -> bool {
    tabs.iter()
        .any(|id| has_reached(id.as_str(), offset, geometry, threshold))
}

/// Resolve the tab to highlight for `offset`.
///
/// Returns `None` only when there are no tabs; once tabs exist every offset
/// maps to one of them.
///
/// ```text
/// 1. offset >= max_scroll_extent - bottom_snap_margin  -> last tab
/// 2. current = last measured section with position <= offset + tab_bar_height
///    (scan stops at the first measured section below that line)
/// 3. current is a tab                                  -> current
///    nearest tab declared before current               -> that tab
///    otherwise                                         -> first tab
/// ```
pub fn active_section(
    offset: f64,
    order: &SectionOrder,
    geometry: &GeometryMap,
    tabs: &[SectionId],
    metrics: &TrackerMetrics,
) -> Option<SectionId> {
    let first = tabs.first()?;
    let last = tabs.last()?;

    if offset >= metrics.max_scroll_extent - metrics.bottom_snap_margin {
        return Some(last.clone());
    }

    let viewport_top = offset + metrics.tab_bar_height;
    let mut current = None;
    for (index, id) in order.ids().iter().enumerate() {
        let Some(section) = geometry.get(id.as_str()) else {
            continue;
        };
        if section.position > viewport_top {
            break;
        }
        current = Some(index);
    }

    let nearest_tab = current.and_then(|index| {
        order
            .ids()
            .iter()
            .take(index + 1)
            .rev()
            .find(|id| tabs.contains(*id))
    });

    Some(nearest_tab.unwrap_or(first).clone())
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
