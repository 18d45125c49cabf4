//! DevDash application layer
//!
//! Ties the capability bridge, the info provider and persistence together
//! into an event-driven controller, and renders app state into a pure
//! [`view::ViewModel`] applied through a thin [`view::Surface`] adapter.

pub mod controller;
pub mod view;

pub use controller::{AppController, AppEvent, Phase};
pub use view::{ConsoleSurface, SectionView, Surface, ViewModel, render_view};
