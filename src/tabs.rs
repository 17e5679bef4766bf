use crate::section::{SectionId, SectionOrder};

/// Ordered list of section ids currently confirmed as tabs.
///
/// The list is always a subsequence of declaration order, no matter in which
/// order ids are inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabList {
    ids: Vec<SectionId>,
}

impl TabList {
    pub fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Insert `id` before the first entry declared after it.
    ///
    /// Returns false when the id is already present or unknown to `order`.
    pub fn insert(&mut self, id: &SectionId, order: &SectionOrder) -> bool {
        let Some(rank) = order.index_of(id.as_str()) else {
            return false;
        };
        if self.contains(id.as_str()) {
            return false;
        }

        let position = self
            .ids
            .iter()
            .position(|existing| {
                order
                    .index_of(existing.as_str())
                    .is_some_and(|existing_rank| existing_rank > rank)
            })
            .unwrap_or(self.ids.len());
        self.ids.insert(position, id.clone());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn as_slice(&self) -> &[SectionId] {
        &self.ids
    }

    pub fn to_vec(&self) -> Vec<SectionId> {
        self.ids.clone()
    }

    pub fn first(&self) -> Option<&SectionId> {
        self.ids.first()
    }

    pub fn last(&self) -> Option<&SectionId> {
        self.ids.last()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectionId> {
        self.ids.iter()
    }
}

impl<'a> IntoIterator for &'a TabList {
    type Item = &'a SectionId;
    type IntoIter = std::slice::Iter<'a, SectionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

#[cfg(test)]
#[path = "tests/tabs_tests.rs"]
mod tests;
