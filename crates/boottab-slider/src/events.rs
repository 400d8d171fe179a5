//! DOM events the slider reacts to, and the listeners that deliver them.

use crate::error::{describe, SliderError};
use crate::geometry::Direction;
use crate::layout::DomLayout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

/// Input to [`crate::slider::TabSlider::handle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEvent {
    ScrollLeftClicked,
    ScrollRightClicked,
    WindowResized,
}

impl SliderEvent {
    pub fn clicked(direction: Direction) -> Self {
        match direction {
            Direction::Left => SliderEvent::ScrollLeftClicked,
            Direction::Right => SliderEvent::ScrollRightClicked,
        }
    }
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Owns registered listeners; dropping it unregisters all of them.
#[derive(Default)]
pub struct ListenerGuard {
    listeners: Vec<Listener>,
}

impl ListenerGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), SliderError> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|err| SliderError::Listener(describe(&err)))?;
        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            callback,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Unregister everything now instead of at drop.
    pub fn dispose(self) {}
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Wire both controls and the window resize to `dispatch`.
///
/// Missing controls are skipped. Resize is delivered as is, without debouncing.
pub fn bind_listeners<F>(layout: &DomLayout, dispatch: F) -> Result<ListenerGuard, SliderError>
where
    F: Fn(SliderEvent) + Clone + 'static,
{
    let mut guard = ListenerGuard::new();

    for direction in [Direction::Left, Direction::Right] {
        let Some(control) = layout.control(direction) else {
            continue;
        };
        let dispatch = dispatch.clone();
        guard.listen(control, "click", move |event: Event| {
            // the controls are usually bare anchors
            event.prevent_default();
            dispatch(SliderEvent::clicked(direction));
        })?;
    }

    let window = web_sys::window().ok_or(SliderError::NoWindow)?;
    guard.listen(&window, "resize", move |_event: Event| {
        dispatch(SliderEvent::WindowResized);
    })?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clicked_maps_direction() {
        assert_eq!(SliderEvent::clicked(Direction::Left), SliderEvent::ScrollLeftClicked);
        assert_eq!(SliderEvent::clicked(Direction::Right), SliderEvent::ScrollRightClicked);
    }

    #[test]
    fn test_empty_guard() {
        let guard = ListenerGuard::new();
        assert!(guard.is_empty());
        assert_eq!(guard.len(), 0);
        guard.dispose();
    }
}
