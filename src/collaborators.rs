//! Contracts supplied by the rendering layer.
//!
//! - `LayoutProbe`: reports where each section currently sits in the content
//! - `ScrollDriver`: exposes the scroll extent and animates the scroll offset

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::geometry::SectionGeometry;
use crate::section::SectionId;

/// Measures rendered sections after layout settles.
pub trait LayoutProbe: Send + Sync {
    /// Current geometry of `id`, or `None` if it has not been laid out yet.
    fn measure(&self, id: &SectionId) -> Option<SectionGeometry>;
}

impl<F> LayoutProbe for F
where
    F: Fn(&SectionId) -> Option<SectionGeometry> + Send + Sync,
{
    fn measure(&self, id: &SectionId) -> Option<SectionGeometry> {
        self(id)
    }
}

/// Easing curve for programmatic scroll animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Map animation progress `t` in `[0, 1]` onto eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// How a scroll animation settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationOutcome {
    Completed,
    /// Another scroll (user drag, competing animation) took over.
    Interrupted,
}

/// Drives the scroll position of the content.
#[async_trait]
pub trait ScrollDriver: Send + Sync {
    /// Largest reachable scroll offset for the current content.
    fn max_scroll_extent(&self) -> f64;

    /// Animate the offset to `target`, resolving once the transition settles.
    async fn animate_to(&self, target: f64, duration: Duration, easing: Easing)
        -> AnimationOutcome;
}

#[cfg(test)]
#[path = "tests/collaborators_tests.rs"]
mod tests;
