use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

use section_tabs::{
    ActiveSection, AnimationOutcome, CoordinatorEvent, Easing, NavigationOutcome,
    ScrollCoordinator, ScrollDriver, SectionDescriptor, SectionGeometry, SectionId,
    TabBarSnapshot, TabScrollConfig,
};

/// Scroll view stand-in: jumps to the target and reports it on the scroll source.
struct ScrollView {
    offsets: watch::Sender<f64>,
    max_extent: f64,
    targets: Mutex<Vec<f64>>,
}

#[async_trait]
impl ScrollDriver for ScrollView {
    fn max_scroll_extent(&self) -> f64 {
        self.max_extent
    }

    async fn animate_to(&self, target: f64, duration: Duration, _easing: Easing) -> AnimationOutcome {
        self.targets.lock().unwrap().push(target);
        self.offsets.send_replace(target);
        tokio::time::sleep(duration).await;
        AnimationOutcome::Completed
    }
}

fn sections() -> Vec<SectionDescriptor> {
    vec![
        SectionDescriptor::new("hero", "Hero").hidden_from_tabs(),
        SectionDescriptor::new("general", "General"),
        SectionDescriptor::new("payment", "Payment").with_visibility_check(|| async {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(true)
        }),
        SectionDescriptor::new("hidden", "Hidden").with_visibility_check(|| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok(false)
        }),
    ]
}

fn layout() -> HashMap<&'static str, SectionGeometry> {
    HashMap::from([
        ("hero", SectionGeometry::new(0.0, 300.0)),
        ("general", SectionGeometry::new(300.0, 500.0)),
        ("payment", SectionGeometry::new(800.0, 600.0)),
        ("hidden", SectionGeometry::new(1400.0, 200.0)),
    ])
}

fn screen(config: TabScrollConfig) -> (ScrollCoordinator, Arc<ScrollView>) {
    let (offsets, source) = watch::channel(0.0);
    let view = Arc::new(ScrollView {
        offsets,
        max_extent: 1000.0,
        targets: Mutex::new(Vec::new()),
    });
    let geometry = layout();
    let probe = move |id: &SectionId| geometry.get(id.as_str()).copied();

    let coordinator =
        ScrollCoordinator::new(sections(), config, Arc::new(probe), view.clone()).unwrap();
    coordinator.attach_scroll_source(source);
    (coordinator, view)
}

async fn scroll_and_wait(
    view: &ScrollView,
    snapshots: &mut watch::Receiver<TabBarSnapshot>,
    offset: f64,
    until: impl FnMut(&TabBarSnapshot) -> bool,
) -> TabBarSnapshot {
    view.offsets.send_replace(offset);
    let snapshot = tokio::time::timeout(Duration::from_secs(1), snapshots.wait_for(until))
        .await
        .expect("snapshot never reached the expected state")
        .unwrap();
    snapshot.clone()
}

fn tab(id: &str) -> ActiveSection {
    ActiveSection::Tab(SectionId::from(id))
}

#[tokio::test(start_paused = true)]
async fn test_section_screen_walkthrough() {
    let (coordinator, view) = screen(TabScrollConfig::default());
    let mut events = coordinator.subscribe();
    let mut snapshots = coordinator.watch_snapshot();

    let report = coordinator.trigger_resolution().await.unwrap();
    assert_eq!(coordinator.tab_ids(), vec!["general", "payment"]);
    assert_eq!((report.visible, report.hidden, report.skipped), (2, 1, 1));

    let mut tab_updates = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let CoordinatorEvent::TabsChanged(ids) = event {
            tab_updates.push(ids);
        }
    }
    assert_eq!(
        tab_updates,
        vec![
            vec![SectionId::from("general")],
            vec![SectionId::from("general"), SectionId::from("payment")],
        ]
    );

    coordinator.on_layout_settled();

    let snapshot = scroll_and_wait(&view, &mut snapshots, 260.0, |s| s.visible).await;
    assert_eq!(snapshot.active, tab("general"));
    assert_eq!(snapshot.active_index(), Some(0));

    let snapshot = scroll_and_wait(&view, &mut snapshots, 760.0, |s| s.active == tab("payment")).await;
    assert!(snapshot.visible);

    let snapshot = scroll_and_wait(&view, &mut snapshots, 5.0, |s| !s.visible).await;
    assert_eq!(snapshot.active, ActiveSection::Top);

    coordinator.dispose();
    assert!(coordinator.is_disposed());
}

#[tokio::test(start_paused = true)]
async fn test_navigation_uses_configured_tab_bar_height() {
    let config = TabScrollConfig::from_yaml_str("tab_bar_height: 100\nscroll_duration_ms: 50\n").unwrap();
    let (coordinator, view) = screen(config);
    coordinator.trigger_resolution().await.unwrap();
    coordinator.on_layout_settled();

    let outcome = coordinator.scroll_to_section("payment").await;
    assert_eq!(outcome, NavigationOutcome::Completed);
    assert_eq!(*view.targets.lock().unwrap(), vec![700.0]);
    assert_eq!(coordinator.active_section(), tab("payment"));
    assert!(!coordinator.is_animating());

    let outcome = coordinator.scroll_to_top().await;
    assert_eq!(outcome, NavigationOutcome::Completed);
    assert_eq!(coordinator.active_section(), ActiveSection::Top);
    assert!(!coordinator.tab_bar_visible());

    coordinator.dispose();
    assert_eq!(
        coordinator.scroll_to_section("general").await,
        NavigationOutcome::Disposed
    );
}

#[tokio::test(start_paused = true)]
async fn test_dispose_during_resolution_keeps_partial_tabs() {
    let (coordinator, _view) = screen(TabScrollConfig::default());

    let pass = tokio::spawn({
        let coordinator = coordinator.clone();
        async move { coordinator.trigger_resolution().await }
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    coordinator.dispose();

    assert!(pass.await.unwrap().is_none());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(coordinator.tab_ids(), vec!["general"]);
}
