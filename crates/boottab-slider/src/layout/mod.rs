//! The seam between slider arithmetic and whatever draws it.

pub mod dom;

pub use dom::DomLayout;

use crate::geometry::{SliderState, TabMetrics};

/// Source of measurements and sink of state for one slider.
///
/// `measure` must not change anything on screen; `render` is the only
/// place the strip offset and control visibility are written.
pub trait TabLayout {
    fn measure(&self) -> TabMetrics;
    fn render(&mut self, state: &SliderState);
}
