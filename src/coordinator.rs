//! Scroll coordinator for a section screen.
//!
//! Owns the resolved tab list, the measured geometry and the active state, and
//! publishes every change on two channels:
//! - a `broadcast` of [`CoordinatorEvent`]s (one event per change)
//! - a `watch` of the latest [`TabBarSnapshot`]
//!
//! State lives behind a short-lived `Mutex` that is never held across an
//! `.await` or while calling into the rendering layer's collaborators.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::collaborators::{AnimationOutcome, LayoutProbe, ScrollDriver};
use crate::config::TabScrollConfig;
use crate::error::SectionError;
use crate::events::{ActiveSection, CoordinatorEvent, TabBarSnapshot, TabEntry};
use crate::geometry::GeometryMap;
use crate::resolver::{ResolutionReport, VisibilityResolver};
use crate::section::{SectionDescriptor, SectionId, SectionOrder};
use crate::tabs::TabList;
use crate::tracker;

/// Result of a programmatic scroll request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Completed,
    Interrupted,
    /// The target section has not been measured yet; nothing happened.
    NotReady,
    Disposed,
}

impl From<AnimationOutcome> for NavigationOutcome {
    fn from(outcome: AnimationOutcome) -> Self {
        match outcome {
            AnimationOutcome::Completed => NavigationOutcome::Completed,
            AnimationOutcome::Interrupted => NavigationOutcome::Interrupted,
        }
    }
}

#[derive(Default)]
struct CoordinatorState {
    tabs: TabList,
    geometry: GeometryMap,
    active: ActiveSection,
    tab_bar_visible: bool,
    last_offset: f64,
    /// Set while the layout probe runs, so probe side effects cannot recurse.
    measuring: bool,
    /// Token of the programmatic scroll currently suppressing active tracking.
    animation: Option<u64>,
    next_animation: u64,
    /// Bumped on every resolution pass; stale passes stop mutating state.
    generation: u64,
    disposed: bool,
    scroll_subscription: Option<JoinHandle<()>>,
}

impl CoordinatorState {
    fn set_tabs(&mut self, tabs: TabList, events: &mut Vec<CoordinatorEvent>) {
        if self.tabs != tabs {
            events.push(CoordinatorEvent::TabsChanged(tabs.to_vec()));
            self.tabs = tabs;
        }
    }

    fn set_active(&mut self, active: ActiveSection, events: &mut Vec<CoordinatorEvent>) {
        if self.active != active {
            events.push(CoordinatorEvent::ActiveSectionChanged(active.clone()));
            self.active = active;
        }
    }

    fn set_tab_bar_visible(&mut self, visible: bool, events: &mut Vec<CoordinatorEvent>) {
        if self.tab_bar_visible != visible {
            events.push(CoordinatorEvent::TabBarVisibilityChanged(visible));
            self.tab_bar_visible = visible;
        }
    }

    fn begin_animation(&mut self) -> u64 {
        self.next_animation += 1;
        self.animation = Some(self.next_animation);
        self.next_animation
    }

    /// Only the most recent animation may lift the guard.
    fn finish_animation(&mut self, token: u64) {
        if self.animation == Some(token) {
            self.animation = None;
        }
    }
}

struct Inner {
    sections: Vec<SectionDescriptor>,
    order: SectionOrder,
    config: TabScrollConfig,
    probe: Arc<dyn LayoutProbe>,
    driver: Arc<dyn ScrollDriver>,
    state: Mutex<CoordinatorState>,
    events: broadcast::Sender<CoordinatorEvent>,
    snapshot: watch::Sender<TabBarSnapshot>,
    alive: watch::Sender<bool>,
}

/// Cheaply cloneable handle to a screen's scroll coordination state.
#[derive(Clone)]
pub struct ScrollCoordinator {
    inner: Arc<Inner>,
}

impl ScrollCoordinator {
    /// Create a coordinator for `sections`, whose order is fixed from here on.
    ///
    /// # Errors
    ///
    /// Returns an error if a section id is empty or declared twice.
    pub fn new(
        sections: Vec<SectionDescriptor>,
        config: TabScrollConfig,
        probe: Arc<dyn LayoutProbe>,
        driver: Arc<dyn ScrollDriver>,
    ) -> Result<Self, SectionError> {
        let order = SectionOrder::from_descriptors(&sections)?;
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        let (snapshot, _) = watch::channel(TabBarSnapshot::default());
        let (alive, _) = watch::channel(true);

        Ok(Self {
            inner: Arc::new(Inner {
                sections,
                order,
                config,
                probe,
                driver,
                state: Mutex::new(CoordinatorState::default()),
                events,
                snapshot,
                alive,
            }),
        })
    }

    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.inner.sections
    }

    pub fn config(&self) -> &TabScrollConfig {
        &self.inner.config
    }

    /// Title of the first section declared with `id`.
    pub fn title_of(&self, id: &str) -> Option<&str> {
        let index = self.inner.order.index_of(id)?;
        self.inner
            .sections
            .get(index)
            .map(|section| section.title.as_str())
    }

    pub fn tab_ids(&self) -> Vec<SectionId> {
        self.lock_state().tabs.to_vec()
    }

    pub fn tabs(&self) -> Vec<TabEntry> {
        self.tab_entries(&self.lock_state().tabs)
    }

    pub fn active_section(&self) -> ActiveSection {
        self.lock_state().active.clone()
    }

    pub fn tab_bar_visible(&self) -> bool {
        self.lock_state().tab_bar_visible
    }

    pub fn geometry(&self) -> GeometryMap {
        self.lock_state().geometry.clone()
    }

    pub fn is_animating(&self) -> bool {
        self.lock_state().animation.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.lock_state().disposed
    }

    pub fn snapshot(&self) -> TabBarSnapshot {
        let state = self.lock_state();
        self.snapshot_of(&state)
    }

    /// Subscribe to change events from this point on.
    pub fn subscribe(&self) -> broadcast::Receiver<CoordinatorEvent> {
        self.inner.events.subscribe()
    }

    /// Watch the latest tab bar state.
    pub fn watch_snapshot(&self) -> watch::Receiver<TabBarSnapshot> {
        self.inner.snapshot.subscribe()
    }

    /// Run a resolution pass, clearing and rebuilding the tab list.
    ///
    /// Tabs are published as each check confirms them. Returns `None` when the
    /// coordinator is disposed before or during the pass, or when a newer
    /// pass superseded this one. Disposal drops the pending checks.
    pub async fn trigger_resolution(&self) -> Option<ResolutionReport> {
        let generation = self.update(|state, events| {
            if state.disposed {
                return None;
            }
            state.generation += 1;
            state.set_tabs(TabList::new(), events);
            Some(state.generation)
        })?;
        tracing::debug!(
            generation,
            sections = self.inner.sections.len(),
            "tab resolution started"
        );

        let resolver = VisibilityResolver::new(&self.inner.sections, &self.inner.order);
        let pass = resolver.resolve(|tabs| {
            self.update(|state, events| {
                if state.disposed || state.generation != generation {
                    return;
                }
                state.set_tabs(tabs.clone(), events);
            });
        });

        let report = tokio::select! {
            report = pass => report,
            _ = wait_for_dispose(self.inner.alive.subscribe()) => {
                tracing::debug!(generation, "tab resolution cancelled by dispose");
                return None;
            }
        };

        let current =
            self.update(|state, _| !state.disposed && state.generation == generation);
        if !current {
            tracing::debug!(generation, "tab resolution superseded");
            return None;
        }

        tracing::debug!(
            generation,
            visible = report.visible,
            hidden = report.hidden,
            failed = report.failed,
            "tab resolution settled"
        );
        Some(report)
    }

    /// Observe a scroll offset reported by the rendering layer.
    pub fn on_scroll(&self, offset: f64) {
        if !offset.is_finite() {
            tracing::trace!(offset, "ignoring non-finite scroll offset");
            return;
        }
        if self.is_disposed() {
            return;
        }

        self.remeasure();
        let max_scroll_extent = self.inner.driver.max_scroll_extent();
        self.update(|state, events| {
            if state.disposed {
                return;
            }
            state.last_offset = offset;
            self.recompute(state, events, offset, max_scroll_extent);
        });
    }

    /// Re-measure after layout settled and re-evaluate the tab bar at the
    /// last observed offset, since a newly confirmed tab may already be
    /// within reach.
    pub fn on_layout_settled(&self) {
        if !self.remeasure() {
            return;
        }
        let max_scroll_extent = self.inner.driver.max_scroll_extent();
        self.update(|state, events| {
            if state.disposed {
                return;
            }
            let offset = state.last_offset;
            self.recompute(state, events, offset, max_scroll_extent);
        });
    }

    /// Animate so that `id` sits just below the tab bar.
    ///
    /// The section becomes active immediately; scroll-driven tracking stays
    /// suspended until the animation settles.
    pub async fn scroll_to_section(&self, id: &str) -> NavigationOutcome {
        let max_scroll_extent = self.inner.driver.max_scroll_extent().max(0.0);
        let prepared = self.update(|state, events| {
            if state.disposed {
                return Err(NavigationOutcome::Disposed);
            }
            let Some(section) = state.geometry.get(id) else {
                return Err(NavigationOutcome::NotReady);
            };

            let target =
                (section.position - self.inner.config.tab_bar_height).clamp(0.0, max_scroll_extent);
            let token = state.begin_animation();
            if let Some(tab) = state.tabs.iter().find(|tab| *tab == id).cloned() {
                state.set_active(ActiveSection::Tab(tab), events);
            }
            Ok((token, target))
        });

        let (token, target) = match prepared {
            Ok(prepared) => prepared,
            Err(outcome) => {
                if outcome == NavigationOutcome::NotReady {
                    tracing::debug!(section = id, "scroll target not measured yet");
                }
                return outcome;
            }
        };

        let outcome = self.animate(target).await;
        self.update(|state, _| {
            if state.disposed {
                return NavigationOutcome::Disposed;
            }
            state.finish_animation(token);
            outcome.into()
        })
    }

    /// Animate back to the top and return to the overview state.
    pub async fn scroll_to_top(&self) -> NavigationOutcome {
        let token = self.update(|state, events| {
            if state.disposed {
                return None;
            }
            let token = state.begin_animation();
            state.set_active(ActiveSection::Top, events);
            Some(token)
        });
        let Some(token) = token else {
            return NavigationOutcome::Disposed;
        };

        let outcome = self.animate(0.0).await;
        self.update(|state, events| {
            if state.disposed {
                return NavigationOutcome::Disposed;
            }
            state.finish_animation(token);
            state.set_tab_bar_visible(false, events);
            outcome.into()
        })
    }

    /// Follow the rendering layer's scroll offsets until disposal.
    ///
    /// Replaces any previous subscription. Must be called from within a
    /// tokio runtime.
    pub fn attach_scroll_source(&self, mut offsets: watch::Receiver<f64>) {
        let coordinator = self.clone();
        let handle = tokio::spawn(async move {
            loop {
                let offset = *offsets.borrow_and_update();
                coordinator.on_scroll(offset);
                if offsets.changed().await.is_err() {
                    break;
                }
            }
        });

        let stale = self.update(|state, _| {
            if state.disposed {
                Some(handle)
            } else {
                state.scroll_subscription.replace(handle)
            }
        });
        if let Some(stale) = stale {
            stale.abort();
        }
    }

    /// Release the scroll subscription and cancel in-flight checks.
    ///
    /// Every later continuation becomes a no-op. Calling it twice is harmless.
    pub fn dispose(&self) {
        let released = self.update(|state, events| {
            if state.disposed {
                return None;
            }
            state.disposed = true;
            state.animation = None;
            events.push(CoordinatorEvent::Disposed);
            Some(state.scroll_subscription.take())
        });
        let Some(subscription) = released else {
            return;
        };

        if let Some(subscription) = subscription {
            subscription.abort();
        }
        self.inner.alive.send_replace(false);
        tracing::debug!("scroll coordinator disposed");
    }

    async fn animate(&self, target: f64) -> AnimationOutcome {
        let config = &self.inner.config;
        self.inner
            .driver
            .animate_to(target, config.scroll_duration(), config.easing)
            .await
    }

    /// Replace the geometry with a fresh measurement of every section.
    ///
    /// Returns false if disposed or a measurement is already running.
    fn remeasure(&self) -> bool {
        let claimed = self.update(|state, _| {
            if state.disposed || state.measuring {
                return false;
            }
            state.measuring = true;
            true
        });
        if !claimed {
            return false;
        }

        let geometry = GeometryMap::from_measurements(self.inner.sections.iter().filter_map(
            |section| {
                self.inner
                    .probe
                    .measure(&section.id)
                    .map(|geometry| (section.id.clone(), geometry))
            },
        ));

        self.update(|state, _| {
            state.measuring = false;
            if !state.disposed {
                state.geometry = geometry;
            }
        });
        true
    }

    fn recompute(
        &self,
        state: &mut CoordinatorState,
        events: &mut Vec<CoordinatorEvent>,
        offset: f64,
        max_scroll_extent: f64,
    ) {
        let config = &self.inner.config;
        let animating = state.animation.is_some();

        if offset < config.top_reset_threshold {
            state.set_tab_bar_visible(false, events);
            if !animating {
                state.set_active(ActiveSection::Top, events);
            }
            return;
        }

        let visible = tracker::tab_bar_should_show(
            state.tabs.as_slice(),
            offset,
            &state.geometry,
            config.reach_threshold,
        );
        state.set_tab_bar_visible(visible, events);
        if !visible || animating {
            return;
        }

        let metrics = config.tracker_metrics(max_scroll_extent);
        let active = tracker::active_section(
            offset,
            &self.inner.order,
            &state.geometry,
            state.tabs.as_slice(),
            &metrics,
        );
        if let Some(id) = active {
            state.set_active(ActiveSection::Tab(id), events);
        }
    }

    /// Mutate state under the lock, then publish whatever changed.
    ///
    /// The snapshot is replaced before the lock is released so the `watch`
    /// value always matches the latest state; events go out afterwards.
    fn update<R>(
        &self,
        apply: impl FnOnce(&mut CoordinatorState, &mut Vec<CoordinatorEvent>) -> R,
    ) -> R {
        let mut events = Vec::new();
        let result = {
            let mut state = self.lock_state();
            let result = apply(&mut state, &mut events);
            if !events.is_empty() {
                self.inner.snapshot.send_replace(self.snapshot_of(&state));
            }
            result
        };

        for event in events {
            if self.inner.events.send(event).is_err() {
                tracing::trace!("no coordinator event subscribers");
            }
        }
        result
    }

    fn snapshot_of(&self, state: &CoordinatorState) -> TabBarSnapshot {
        TabBarSnapshot {
            tabs: self.tab_entries(&state.tabs),
            active: state.active.clone(),
            visible: state.tab_bar_visible,
        }
    }

    fn tab_entries(&self, tabs: &TabList) -> Vec<TabEntry> {
        tabs.iter()
            .map(|id| TabEntry {
                id: id.clone(),
                title: self.title_of(id.as_str()).unwrap_or_default().to_string(),
            })
            .collect()
    }

    fn lock_state(&self) -> MutexGuard<'_, CoordinatorState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Resolves once the coordinator is disposed.
async fn wait_for_dispose(mut alive: watch::Receiver<bool>) {
    while *alive.borrow_and_update() {
        if alive.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
#[path = "tests/coordinator_tests.rs"]
mod tests;
