//! Change notifications published by the scroll coordinator.

use crate::section::SectionId;

/// Which tab is highlighted. `Top` is the overview state before any tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveSection {
    #[default]
    Top,
    Tab(SectionId),
}

impl ActiveSection {
    pub fn tab_id(&self) -> Option<&SectionId> {
        match self {
            ActiveSection::Top => None,
            ActiveSection::Tab(id) => Some(id),
        }
    }

    pub fn is_top(&self) -> bool {
        matches!(self, ActiveSection::Top)
    }
}

/// A confirmed tab with its display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabEntry {
    pub id: SectionId,
    pub title: String,
}

/// Latest presentation state of the tab bar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabBarSnapshot {
    pub tabs: Vec<TabEntry>,
    pub active: ActiveSection,
    pub visible: bool,
}

impl TabBarSnapshot {
    /// Index of the active tab within `tabs`, if a tab is active.
    pub fn active_index(&self) -> Option<usize> {
        let id = self.active.tab_id()?;
        self.tabs.iter().position(|tab| &tab.id == id)
    }
}

/// Events broadcast on every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorEvent {
    /// The confirmed tab list changed (cleared for a new pass or grew).
    TabsChanged(Vec<SectionId>),
    ActiveSectionChanged(ActiveSection),
    TabBarVisibilityChanged(bool),
    Disposed,
}
