//! Section descriptors and declaration-order bookkeeping.

use std::any::Any;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use crate::error::SectionError;

/// Identity of a section: map key, tab id and scroll target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Host-supplied check deciding whether a section earns a tab.
///
/// An `Err` is treated exactly like `Ok(false)`.
pub type VisibilityCheck = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<bool>> + Send + Sync>;

/// Opaque content capability, only ever downcast by the rendering layer.
pub type SectionBuilder = Arc<dyn Any + Send + Sync>;

/// Declarative record for one section of a scrollable screen.
#[derive(Clone)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub title: String,
    /// When false the section is rendered but never becomes a tab.
    pub show_in_tab: bool,
    /// Absent means the section is visible without waiting on anything.
    pub visibility_check: Option<VisibilityCheck>,
    pub builder: Option<SectionBuilder>,
}

impl SectionDescriptor {
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            show_in_tab: true,
            visibility_check: None,
            builder: None,
        }
    }

    /// Keep the section in the content but out of the tab bar.
    pub fn hidden_from_tabs(mut self) -> Self {
        self.show_in_tab = false;
        self
    }

    pub fn with_visibility_check<F, Fut>(mut self, check: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<bool>> + Send + 'static,
    {
        let check: VisibilityCheck =
            Arc::new(move || -> BoxFuture<'static, anyhow::Result<bool>> { Box::pin(check()) });
        self.visibility_check = Some(check);
        self
    }

    pub fn with_builder<T: Any + Send + Sync>(mut self, builder: T) -> Self {
        let builder: SectionBuilder = Arc::new(builder);
        self.builder = Some(builder);
        self
    }

    /// Downcast the builder to the type the rendering layer stored.
    pub fn builder<T: Any>(&self) -> Option<&T> {
        self.builder
            .as_deref()
            .and_then(|builder| builder.downcast_ref::<T>())
    }
}

impl fmt::Debug for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("show_in_tab", &self.show_in_tab)
            .field("has_visibility_check", &self.visibility_check.is_some())
            .field("has_builder", &self.builder.is_some())
            .finish()
    }
}

/// Declaration order of a validated section list.
///
/// Ids are unique and non-empty; the order never changes after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionOrder {
    ids: Vec<SectionId>,
    index: HashMap<SectionId, usize>,
}

impl SectionOrder {
    pub fn from_descriptors(descriptors: &[SectionDescriptor]) -> Result<Self, SectionError> {
        Self::from_ids(descriptors.iter().map(|section| section.id.clone()))
    }

    pub fn from_ids<I, T>(ids: I) -> Result<Self, SectionError>
    where
        I: IntoIterator<Item = T>,
        T: Into<SectionId>,
    {
        let mut order = Self::default();
        for (position, id) in ids.into_iter().enumerate() {
            let id = id.into();
            if id.as_str().is_empty() {
                return Err(SectionError::EmptyId { index: position });
            }
            if order.index.contains_key(&id) {
                return Err(SectionError::DuplicateId {
                    id: id.as_str().to_string(),
                });
            }
            order.index.insert(id.clone(), position);
            order.ids.push(id);
        }
        Ok(order)
    }

    /// Position of `id` in declaration order.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn ids(&self) -> &[SectionId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/section_tests.rs"]
mod tests;
