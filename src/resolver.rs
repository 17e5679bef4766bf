//! Tab resolution: which declared sections become tabs.
//!
//! Sections without a visibility check are inserted before any check is
//! started. All checks then run concurrently inside the resolving task and are
//! handled one by one as they settle; each `true` is inserted with
//! order-preserving insertion, so completion order never shows up in the
//! resulting tab order.

use futures::stream::{FuturesUnordered, StreamExt};

use crate::section::{SectionDescriptor, SectionId, SectionOrder};
use crate::tabs::TabList;

/// Typed result of a single visibility check.
#[derive(Debug)]
pub enum CheckOutcome {
    Visible,
    Hidden,
    /// The check itself failed; the section is treated as hidden.
    Failed(anyhow::Error),
}

impl CheckOutcome {
    pub fn from_result(result: anyhow::Result<bool>) -> Self {
        match result {
            Ok(true) => CheckOutcome::Visible,
            Ok(false) => CheckOutcome::Hidden,
            Err(err) => CheckOutcome::Failed(err),
        }
    }

    pub fn is_visible(&self) -> bool {
        matches!(self, CheckOutcome::Visible)
    }
}

/// Summary of one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub tabs: TabList,
    /// Sections confirmed as tabs, including those without a check.
    pub visible: usize,
    pub hidden: usize,
    pub failed: usize,
    /// Sections declared with `show_in_tab == false`.
    pub skipped: usize,
}

pub struct VisibilityResolver<'a> {
    sections: &'a [SectionDescriptor],
    order: &'a SectionOrder,
}

impl<'a> VisibilityResolver<'a> {
    pub fn new(sections: &'a [SectionDescriptor], order: &'a SectionOrder) -> Self {
        Self { sections, order }
    }

    /// Run one resolution pass.
    ///
    /// `on_each_resolved` is called after every insertion with the list as it
    /// stands. The returned future completes only after every launched check
    /// has settled.
    pub async fn resolve<F>(&self, mut on_each_resolved: F) -> ResolutionReport
    where
        F: FnMut(&TabList),
    {
        let mut report = ResolutionReport::default();
        let mut pending = FuturesUnordered::new();

        let candidates: Vec<&SectionDescriptor> = self
            .sections
            .iter()
            .filter(|section| section.show_in_tab)
            .collect();
        report.skipped = self.sections.len() - candidates.len();

        // Unchecked sections are confirmed before any check is started.
        for section in &candidates {
            if section.visibility_check.is_none() {
                self.confirm(&mut report, &section.id, &mut on_each_resolved);
            }
        }

        for section in &candidates {
            if let Some(check) = &section.visibility_check {
                let id = section.id.clone();
                let check = check();
                pending.push(async move { (id, CheckOutcome::from_result(check.await)) });
            }
        }

        tracing::trace!(
            immediate = report.visible,
            launched = pending.len(),
            "visibility checks launched"
        );

        while let Some((id, outcome)) = pending.next().await {
            match outcome {
                CheckOutcome::Visible => self.confirm(&mut report, &id, &mut on_each_resolved),
                CheckOutcome::Hidden => report.hidden += 1,
                CheckOutcome::Failed(_) => report.failed += 1,
            }
        }

        report
    }

    fn confirm<F>(&self, report: &mut ResolutionReport, id: &SectionId, on_each_resolved: &mut F)
    where
        F: FnMut(&TabList),
    {
        report.visible += 1;
        if report.tabs.insert(id, self.order) {
            on_each_resolved(&report.tabs);
        }
    }
}

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod tests;
