use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

use section_tabs::view::{tab_bar_line, TabBarTheme};
use section_tabs::{
    AnimationOutcome, CoordinatorEvent, Easing, LayoutProbe, ScrollCoordinator, ScrollDriver,
    SectionDescriptor, SectionGeometry, SectionId, TabBarSnapshot, TabScrollConfig,
};

const VIEWPORT_HEIGHT: f64 = 700.0;

/// Simulated layout: (id, top offset, height).
const LAYOUT: &[(&str, f64, f64)] = &[
    ("hero", 0.0, 320.0),
    ("general", 320.0, 580.0),
    ("payment", 900.0, 600.0),
    ("hidden", 1500.0, 300.0),
    ("support", 1800.0, 300.0),
];

#[derive(Parser)]
#[command(name = "section-tabs")]
#[command(about = "Walk through a section screen with an auto-revealing tab bar")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SECTION_TABS_GIT_SHA"), ")"))]
struct Cli {
    /// Tab scroll config file (YAML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scroll distance between printed frames, in logical pixels
    #[arg(long, default_value = "150")]
    step: f64,

    /// Section to jump to after the walkthrough
    #[arg(long, default_value = "payment")]
    jump_to: String,
}

struct DemoLayout;

impl LayoutProbe for DemoLayout {
    fn measure(&self, id: &SectionId) -> Option<SectionGeometry> {
        LAYOUT
            .iter()
            .find(|(section, _, _)| id == section)
            .map(|(_, position, height)| SectionGeometry::new(*position, *height))
    }
}

/// Animates by publishing interpolated offsets on the scroll source.
struct DemoDriver {
    offsets: watch::Sender<f64>,
}

#[async_trait]
impl ScrollDriver for DemoDriver {
    fn max_scroll_extent(&self) -> f64 {
        let content_height = LAYOUT
            .iter()
            .map(|(_, position, height)| position + height)
            .fold(0.0, f64::max);
        (content_height - VIEWPORT_HEIGHT).max(0.0)
    }

    async fn animate_to(&self, target: f64, duration: Duration, easing: Easing) -> AnimationOutcome {
        const FRAMES: u32 = 6;
        let start = *self.offsets.borrow();
        for frame in 1..=FRAMES {
            let progress = easing.apply(f64::from(frame) / f64::from(FRAMES));
            self.offsets.send_replace(start + (target - start) * progress);
            tokio::time::sleep(duration / FRAMES).await;
        }
        AnimationOutcome::Completed
    }
}

fn demo_sections() -> Vec<SectionDescriptor> {
    vec![
        SectionDescriptor::new("hero", "Overview")
            .hidden_from_tabs()
            .with_builder("Account banner"),
        SectionDescriptor::new("general", "General").with_builder("Name, address, contact details"),
        SectionDescriptor::new("payment", "Payment methods")
            .with_visibility_check(|| async {
                tokio::time::sleep(Duration::from_millis(400)).await;
                Ok(true)
            })
            .with_builder("Saved cards"),
        SectionDescriptor::new("hidden", "Beta features")
            .with_visibility_check(|| async {
                tokio::time::sleep(Duration::from_millis(150)).await;
                Ok(false)
            })
            .with_builder("Experimental toggles"),
        SectionDescriptor::new("support", "Support")
            .with_visibility_check(|| async { Err(anyhow::anyhow!("support service unavailable")) })
            .with_builder("Help center links"),
    ]
}

fn render(snapshot: &TabBarSnapshot) -> String {
    if !snapshot.visible {
        return "(tab bar hidden)".to_string();
    }
    tab_bar_line(snapshot, &TabBarTheme::default())
        .spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

fn print_frame(label: &str, coordinator: &ScrollCoordinator) {
    let snapshot = coordinator.snapshot();
    let active = snapshot
        .active
        .tab_id()
        .map_or("top", |id| id.as_str())
        .to_string();
    println!("{:>12} | active={:<8} | {}", label, active, render(&snapshot));
}

async fn print_tab_changes(mut events: broadcast::Receiver<CoordinatorEvent>) {
    loop {
        match events.recv().await {
            Ok(CoordinatorEvent::TabsChanged(ids)) => {
                let ids: Vec<&str> = ids.iter().map(SectionId::as_str).collect();
                println!("tabs: [{}]", ids.join(", "));
            }
            Ok(CoordinatorEvent::Disposed) | Err(broadcast::error::RecvError::Closed) => break,
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if !cli.step.is_finite() || cli.step <= 0.0 {
        anyhow::bail!("--step must be a positive number, got {}", cli.step);
    }

    let config = match &cli.config {
        Some(path) => TabScrollConfig::load(path)?,
        None => TabScrollConfig::default(),
    };

    let (offsets, offset_source) = watch::channel(0.0);
    let driver = Arc::new(DemoDriver { offsets });
    let coordinator =
        ScrollCoordinator::new(demo_sections(), config, Arc::new(DemoLayout), driver.clone())?;

    for section in coordinator.sections() {
        let body = section.builder::<&'static str>().copied().unwrap_or_default();
        println!("section {:<8} {:<16} {}", section.id.as_str(), section.title, body);
    }

    let printer = tokio::spawn(print_tab_changes(coordinator.subscribe()));
    coordinator.attach_scroll_source(offset_source);

    if let Some(report) = coordinator.trigger_resolution().await {
        println!(
            "resolved: {} visible, {} hidden, {} failed, {} not tabbable",
            report.visible, report.hidden, report.failed, report.skipped
        );
    }
    coordinator.on_layout_settled();

    let max_scroll_extent = driver.max_scroll_extent();
    let mut offset = 0.0;
    while offset <= max_scroll_extent {
        driver.offsets.send_replace(offset);
        tokio::task::yield_now().await;
        print_frame(&format!("{:.0}", offset), &coordinator);
        offset += cli.step;
    }

    let outcome = coordinator.scroll_to_section(&cli.jump_to).await;
    tokio::task::yield_now().await;
    print_frame(&format!("{:?}", outcome), &coordinator);

    let outcome = coordinator.scroll_to_top().await;
    tokio::task::yield_now().await;
    print_frame(&format!("{:?}", outcome), &coordinator);

    coordinator.dispose();
    printer.await?;
    Ok(())
}
