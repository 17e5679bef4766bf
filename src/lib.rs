//! Scroll coordination for section screens with an auto-revealing tab bar.
//!
//! A screen declares an ordered list of [`SectionDescriptor`]s. Sections whose
//! visibility checks resolve to `true` become tabs, always in declaration
//! order. The [`ScrollCoordinator`] tracks the scroll offset against measured
//! section geometry to decide which tab is active and whether the tab bar is
//! shown, and drives programmatic scrolling through a [`ScrollDriver`].
//!
//! Layout measurement and animation are supplied by the rendering layer
//! through the [`LayoutProbe`] and [`ScrollDriver`] traits. The [`view`]
//! module renders a [`TabBarSnapshot`] with ratatui.

pub mod collaborators;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod geometry;
pub mod resolver;
pub mod section;
pub mod tabs;
pub mod tracker;
pub mod view;

pub use collaborators::{AnimationOutcome, Easing, LayoutProbe, ScrollDriver};
pub use config::TabScrollConfig;
pub use coordinator::{NavigationOutcome, ScrollCoordinator};
pub use error::SectionError;
pub use events::{ActiveSection, CoordinatorEvent, TabBarSnapshot, TabEntry};
pub use geometry::{GeometryMap, SectionGeometry};
pub use resolver::{CheckOutcome, ResolutionReport, VisibilityResolver};
pub use section::{SectionDescriptor, SectionId, SectionOrder, VisibilityCheck};
pub use tabs::TabList;
pub use tracker::TrackerMetrics;
