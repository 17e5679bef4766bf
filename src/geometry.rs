//! Measured section boundaries within the scrollable content.

use std::collections::HashMap;

use crate::section::SectionId;

/// Top offset and rendered height of a section, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionGeometry {
    pub position: f64,
    pub height: f64,
}

impl SectionGeometry {
    /// Negative values are clamped to zero.
    pub fn new(position: f64, height: f64) -> Self {
        Self {
            position: position.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.position + self.height
    }

    fn is_finite(&self) -> bool {
        self.position.is_finite() && self.height.is_finite()
    }
}

/// Snapshot of every measured section, keyed by id.
///
/// A measurement pass replaces the whole map; sections missing from the last
/// pass are "not yet positioned".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryMap {
    entries: HashMap<SectionId, SectionGeometry>,
}

impl GeometryMap {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Build a map from one measurement pass, dropping non-finite entries.
    pub fn from_measurements<I>(measurements: I) -> Self
    where
        I: IntoIterator<Item = (SectionId, SectionGeometry)>,
    {
        let entries = measurements
            .into_iter()
            .filter(|(_, geometry)| geometry.is_finite())
            .map(|(id, geometry)| (id, SectionGeometry::new(geometry.position, geometry.height)))
            .collect();
        Self { entries }
    }

    pub fn with(mut self, id: impl Into<SectionId>, position: f64, height: f64) -> Self {
        self.entries
            .insert(id.into(), SectionGeometry::new(position, height));
        self
    }

    pub fn get(&self, id: &str) -> Option<SectionGeometry> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
