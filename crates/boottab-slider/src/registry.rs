//! Attach-once bookkeeping.
//!
//! Every container element gets a numeric key in a `data-boottab-slider`
//! attribute; the key maps to the live slider and its listeners. Attaching
//! to an element that already has an entry hands back the existing slider.

use crate::config::SliderSettings;
use crate::error::SliderError;
use crate::events::{bind_listeners, ListenerGuard, SliderEvent};
use crate::geometry::{Direction, SliderState};
use crate::layout::{DomLayout, TabLayout};
use crate::slider::TabSlider;
use std::cell::{Cell, RefCell};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};
use web_sys::{Element, Node};

pub const MARKER_ATTR: &str = "data-boottab-slider";

/// Map from element identity to whatever is attached to it.
#[derive(Debug)]
pub struct Registry<K, V> {
    entries: HashMap<K, V>,
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V> Registry<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing entry for `key`, or the result of `build` stored under it.
    /// The flag tells whether `build` ran.
    pub fn attach(&mut self, key: K, build: impl FnOnce() -> V) -> (&V, bool) {
        match self.try_attach(key, || Ok::<V, std::convert::Infallible>(build())) {
            Ok(found) => found,
            Err(never) => match never {},
        }
    }

    /// Like [`Registry::attach`]; a failed build stores nothing.
    pub fn try_attach<E>(
        &mut self,
        key: K,
        build: impl FnOnce() -> Result<V, E>,
    ) -> Result<(&V, bool), E> {
        match self.entries.entry(key) {
            Entry::Occupied(entry) => Ok((&*entry.into_mut(), false)),
            Entry::Vacant(entry) => {
                let value = build()?;
                Ok((&*entry.insert(value), true))
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn detach(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Slider shared between its handle and its listeners.
pub type SharedSlider<L> = Rc<RefCell<TabSlider<L>>>;

/// Routes events to a slider without keeping it alive.
pub struct Dispatcher<L> {
    slider: Weak<RefCell<TabSlider<L>>>,
}

impl<L> Clone for Dispatcher<L> {
    fn clone(&self) -> Self {
        Self {
            slider: self.slider.clone(),
        }
    }
}

impl<L: TabLayout> Dispatcher<L> {
    pub fn send(&self, event: SliderEvent) {
        let Some(slider) = self.slider.upgrade() else { return };
        match slider.try_borrow_mut() {
            Ok(mut slider) => slider.handle(event),
            Err(_) => log::warn!("boottab-slider: dropped {:?} during update", event),
        };
    }
}

/// A registered slider and the disposer of its listeners.
pub struct Attached<L, G> {
    slider: SharedSlider<L>,
    _listeners: G,
}

impl<L, G> Attached<L, G> {
    pub fn slider(&self) -> &SharedSlider<L> {
        &self.slider
    }
}

/// Key to use for an element carrying `marked`.
///
/// A marker whose entry belongs to another element (the attribute travels
/// with `cloneNode` and copied markup) is replaced by a `fresh` key. The flag
/// tells whether the element needs the new key written back.
pub fn resolve_key<L, G>(
    registry: &RefCell<Registry<u32, Attached<L, G>>>,
    marked: Option<u32>,
    owns: impl Fn(&L) -> bool,
    fresh: impl FnOnce() -> u32,
) -> (u32, bool)
where
    L: TabLayout,
{
    if let Some(key) = marked {
        let owned = registry
            .borrow()
            .get(&key)
            .map(|attached| owns(attached.slider.borrow().layout()));
        match owned {
            None | Some(true) => return (key, false),
            Some(false) => log::debug!("boottab-slider: marker {} copied from another element", key),
        }
    }
    (fresh(), true)
}

/// Attach-once core shared by the DOM entry point and the tests.
///
/// A new entry is built, stored, bound through `bind`, laid out, and only
/// then `complete` runs, with no registry or slider borrow held. An existing
/// entry is returned untouched. The flag tells whether the entry is new.
pub fn attach_to<L, G, E>(
    registry: &RefCell<Registry<u32, Attached<L, G>>>,
    key: u32,
    build: impl FnOnce() -> Result<L, E>,
    bind: impl FnOnce(&L, Dispatcher<L>) -> Result<G, E>,
    complete: Option<Box<dyn FnOnce()>>,
) -> Result<(SharedSlider<L>, bool), E>
where
    L: TabLayout,
{
    let (slider, created) = {
        let mut registry = registry.borrow_mut();
        let found = registry
            .try_attach(key, || {
                let slider = Rc::new(RefCell::new(TabSlider::new(build()?)));
                let dispatcher = Dispatcher {
                    slider: Rc::downgrade(&slider),
                };
                let listeners = bind(slider.borrow().layout(), dispatcher)?;
                Ok(Attached {
                    slider,
                    _listeners: listeners,
                })
            })
            .map(|(attached, created)| (attached.slider.clone(), created));
        found?
    };

    if !created {
        log::debug!("boottab-slider: element {} already attached", key);
        return Ok((slider, false));
    }

    slider.borrow_mut().init();
    log::debug!("boottab-slider: attached {}", key);

    if let Some(complete) = complete {
        complete();
    }
    Ok((slider, true))
}

/// Cloneable handle to a slider attached to a DOM element.
#[derive(Clone)]
pub struct SliderHandle {
    key: u32,
    slider: SharedSlider<DomLayout>,
}

impl SliderHandle {
    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn reset_tabs(&self) {
        self.slider.borrow_mut().reset_tabs();
    }

    pub fn scroll_tabs(&self, direction: Direction) {
        self.slider.borrow_mut().scroll_tabs(direction);
    }

    pub fn scroll_named(&self, direction: &str) {
        self.slider.borrow_mut().scroll_named(direction);
    }

    pub fn state(&self) -> SliderState {
        self.slider.borrow().state()
    }
}

thread_local! {
    static ATTACHED: RefCell<Registry<u32, Attached<DomLayout, ListenerGuard>>> =
        RefCell::new(Registry::new());
    static NEXT_KEY: Cell<u32> = const { Cell::new(1) };
}

/// Allocate a key for an element that is about to be attached.
pub fn next_key() -> u32 {
    NEXT_KEY.with(|next| {
        let key = next.get();
        next.set(key.wrapping_add(1));
        key
    })
}

fn marker(element: &Element) -> Option<u32> {
    element
        .get_attribute(MARKER_ATTR)
        .and_then(|value| value.parse::<u32>().ok())
}

fn same_element(layout: &DomLayout, element: &Element) -> bool {
    let node: &Node = element;
    layout.container().is_same_node(Some(node))
}

fn element_key(element: &Element) -> u32 {
    let (key, fresh) = ATTACHED.with(|attached| {
        resolve_key(
            attached,
            marker(element),
            |layout| same_element(layout, element),
            next_key,
        )
    });
    if fresh {
        let _ = element.set_attribute(MARKER_ATTR, &key.to_string());
    }
    key
}

/// Attach a slider to `element`, or return the one already there.
///
/// A fresh attachment binds its listeners, lays the tabs out and then runs
/// `settings.complete`. A repeated attachment does none of that.
///
/// The entry holds the element and its listeners until [`detach`] (or
/// `destroy` from JS); callers removing the container must detach it.
pub fn attach(element: &Element, settings: SliderSettings) -> Result<SliderHandle, SliderError> {
    let key = element_key(element);
    let SliderSettings { options, complete } = settings;

    let (slider, _) = ATTACHED.with(|attached| {
        attach_to(
            attached,
            key,
            || DomLayout::discover(element, options),
            |layout, dispatcher| bind_listeners(layout, move |event| dispatcher.send(event)),
            complete,
        )
    })?;
    Ok(SliderHandle { key, slider })
}

/// Handle of the slider attached to `element`, if any.
pub fn get(element: &Element) -> Option<SliderHandle> {
    let key = marker(element)?;
    let handle = get_key(key)?;
    let owned = same_element(handle.slider.borrow().layout(), element);
    owned.then_some(handle)
}

pub fn get_key(key: u32) -> Option<SliderHandle> {
    ATTACHED.with(|attached| {
        attached.borrow().get(&key).map(|a| SliderHandle {
            key,
            slider: a.slider.clone(),
        })
    })
}

/// Forget the slider on `element` and unregister its listeners.
pub fn detach(element: &Element) -> bool {
    match get(element) {
        Some(handle) => detach_key(handle.key()),
        None => false,
    }
}

pub fn detach_key(key: u32) -> bool {
    // dropped outside the borrow: listener removal must not re-enter the registry
    let removed = ATTACHED.with(|attached| attached.borrow_mut().detach(&key));
    let existed = removed.is_some();
    drop(removed);
    if existed {
        log::debug!("boottab-slider: detached {}", key);
    }
    existed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slider::tests::FakeLayout;

    #[test]
    fn test_attach_builds_once() {
        let mut registry = Registry::new();
        let mut builds = 0;

        let (value, created) = registry.attach(7u32, || {
            builds += 1;
            "first"
        });
        assert_eq!((*value, created), ("first", true));

        let (value, created) = registry.attach(7u32, || {
            builds += 1;
            "second"
        });
        assert_eq!((*value, created), ("first", false));
        assert_eq!(builds, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_failed_build_stores_nothing() {
        let mut registry: Registry<u32, &str> = Registry::new();
        let result = registry.try_attach(1, || Err("no container"));
        assert_eq!(result.err(), Some("no container"));
        assert!(registry.is_empty());

        let (value, created) = registry.try_attach(1, || Ok::<_, &str>("ok")).unwrap();
        assert_eq!((*value, created), ("ok", true));
    }

    #[test]
    fn test_detach_allows_fresh_attach() {
        let mut registry = Registry::new();
        registry.attach("nav", || 1);
        assert_eq!(registry.detach(&"nav"), Some(1));
        assert_eq!(registry.get(&"nav"), None);

        let (value, created) = registry.attach("nav", || 2);
        assert_eq!((*value, created), (2, true));
    }

    #[test]
    fn test_next_key_is_unique() {
        let a = next_key();
        let b = next_key();
        assert_ne!(a, b);
    }

    /// Stands in for `ListenerGuard`: counts live registrations.
    struct Bound {
        live: Rc<Cell<usize>>,
    }

    impl Drop for Bound {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    type FakeRegistry = RefCell<Registry<u32, Attached<FakeLayout, Bound>>>;

    #[derive(Default)]
    struct Harness {
        registry: Rc<FakeRegistry>,
        binds: Rc<Cell<usize>>,
        live: Rc<Cell<usize>>,
        renders_at_bind: Rc<RefCell<Vec<usize>>>,
        dispatchers: Rc<RefCell<Vec<Dispatcher<FakeLayout>>>>,
    }

    impl Harness {
        fn attach(
            &self,
            key: u32,
            container: u32,
            complete: Option<Box<dyn FnOnce()>>,
        ) -> Result<(SharedSlider<FakeLayout>, bool), &'static str> {
            attach_to(
                &*self.registry,
                key,
                || Ok(FakeLayout::new(vec![100.0; 5], 250.0).in_container(container)),
                |layout, dispatcher| {
                    self.binds.set(self.binds.get() + 1);
                    self.live.set(self.live.get() + 1);
                    self.renders_at_bind.borrow_mut().push(layout.renders.len());
                    self.dispatchers.borrow_mut().push(dispatcher);
                    Ok(Bound {
                        live: self.live.clone(),
                    })
                },
                complete,
            )
        }

        fn click(&self, event: SliderEvent) {
            for dispatcher in self.dispatchers.borrow().iter() {
                dispatcher.send(event);
            }
        }
    }

    #[test]
    fn test_attach_binds_then_lays_out_then_completes() {
        let harness = Harness::default();
        let completes = Rc::new(Cell::new(0));
        let renders_seen = Rc::new(Cell::new(None));

        let complete = {
            let registry = harness.registry.clone();
            let completes = completes.clone();
            let renders_seen = renders_seen.clone();
            Box::new(move || {
                completes.set(completes.get() + 1);
                // the registry is free again by the time the callback runs
                let registry = registry.borrow();
                let attached = registry.get(&1).unwrap();
                renders_seen.set(Some(attached.slider().borrow().layout().renders.len()));
            }) as Box<dyn FnOnce()>
        };

        let (slider, created) = harness.attach(1, 10, Some(complete)).unwrap();
        assert!(created);
        assert_eq!(harness.binds.get(), 1);
        assert_eq!(*harness.renders_at_bind.borrow(), vec![0]);
        assert_eq!(completes.get(), 1);
        assert_eq!(renders_seen.get(), Some(1));
        assert!(slider.borrow().state().show_right);
    }

    #[test]
    fn test_second_attach_skips_bind_and_complete() {
        let harness = Harness::default();
        let completes = Rc::new(Cell::new(0));
        let counting = || {
            let completes = completes.clone();
            Some(Box::new(move || completes.set(completes.get() + 1)) as Box<dyn FnOnce()>)
        };

        let (first, created_first) = harness.attach(1, 10, counting()).unwrap();
        let (second, created_second) = harness.attach(1, 10, counting()).unwrap();
        assert!(created_first);
        assert!(!created_second);
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(harness.binds.get(), 1);
        assert_eq!(completes.get(), 1);

        // one click scrolls once
        harness.click(SliderEvent::ScrollRightClicked);
        assert_eq!(first.borrow().offset(), -200.0);
        assert_eq!(first.borrow().layout().renders.len(), 2);
    }

    #[test]
    fn test_copied_marker_gets_fresh_key() {
        let harness = Harness::default();
        harness.attach(1, 10, None).unwrap();

        let same = resolve_key(&*harness.registry, Some(1), |l| l.container == 10, || 99);
        assert_eq!(same, (1, false));

        // a copy of container 10 carries its marker
        let copy = resolve_key(&*harness.registry, Some(1), |l| l.container == 20, || 99);
        assert_eq!(copy, (99, true));

        let unknown = resolve_key(&*harness.registry, Some(5), |_| false, || 99);
        assert_eq!(unknown, (5, false));
        let unmarked = resolve_key(&*harness.registry, None, |_| false, || 42);
        assert_eq!(unmarked, (42, true));

        let (copy_slider, created) = harness.attach(99, 20, None).unwrap();
        assert!(created);
        assert_eq!(copy_slider.borrow().layout().container, 20);
        assert_eq!(harness.binds.get(), 2);
        assert_eq!(harness.registry.borrow().len(), 2);
    }

    #[test]
    fn test_detach_disposes_listeners() {
        let harness = Harness::default();
        let (slider, _) = harness.attach(1, 10, None).unwrap();
        assert_eq!(harness.live.get(), 1);

        let removed = harness.registry.borrow_mut().detach(&1);
        drop(removed);
        assert_eq!(harness.live.get(), 0);

        // the slider outlives its entry through the handle, events still route
        harness.click(SliderEvent::ScrollRightClicked);
        assert_eq!(slider.borrow().offset(), -200.0);

        let (_, created) = harness.attach(1, 10, None).unwrap();
        assert!(created);
        assert_eq!(harness.binds.get(), 2);
    }

    #[test]
    fn test_dispatch_after_drop_is_ignored() {
        let harness = Harness::default();
        let (slider, _) = harness.attach(1, 10, None).unwrap();
        drop(slider);
        drop(harness.registry.borrow_mut().detach(&1));
        harness.click(SliderEvent::ScrollRightClicked);
        assert!(harness.registry.borrow().is_empty());
    }

    #[test]
    fn test_failed_layout_stores_nothing() {
        let harness = Harness::default();
        let completes = Rc::new(Cell::new(0));
        let complete = {
            let completes = completes.clone();
            Box::new(move || completes.set(completes.get() + 1)) as Box<dyn FnOnce()>
        };

        let result = attach_to(
            &*harness.registry,
            1,
            || Err::<FakeLayout, _>("bad selector"),
            |_, _| -> Result<Bound, &'static str> { unreachable!() },
            Some(complete),
        );
        assert_eq!(result.err(), Some("bad selector"));
        assert!(harness.registry.borrow().is_empty());
        assert_eq!(completes.get(), 0);
    }
}
