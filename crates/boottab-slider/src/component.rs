//! Leptos wrapper that renders the slider markup and attaches to it.

use crate::config::{SliderOptions, SliderSettings};
use crate::registry;
use leptos::html;
use leptos::prelude::*;

/// Tab bar with scroll controls. Children are the `<li>` items.
#[component]
pub fn TabSliderNav(
    /// Additional CSS classes on the container
    #[prop(optional, into)]
    class: MaybeProp<String>,
    /// Selectors and measuring options
    #[prop(optional)]
    options: Option<SliderOptions>,
    /// Called once after the first layout
    #[prop(optional)]
    on_complete: Option<Callback<()>>,
    /// Number of tabs; a change re-runs the layout
    #[prop(optional, into)]
    tab_count: MaybeProp<usize>,
    children: Children,
) -> impl IntoView {
    let key = registry::next_key();
    let container = NodeRef::<html::Div>::new();
    let options = options.unwrap_or_default();

    Effect::new(move |_| {
        let Some(div) = container.get() else { return };
        let mut settings = SliderSettings::new(options.clone());
        if let Some(on_complete) = on_complete {
            settings = settings.on_complete(move || on_complete.run(()));
        }
        if let Err(err) = registry::attach(&div, settings) {
            log::warn!("boottab-slider: {}", err);
        }
    });

    Effect::new(move |_| {
        let _ = tab_count.get();
        if let Some(handle) = registry::get_key(key) {
            handle.reset_tabs();
        }
    });

    on_cleanup(move || {
        registry::detach_key(key);
    });

    view! {
        <div
            class=move || format!("boottab-slider {}", class.get().unwrap_or_default())
            data-boottab-slider=key.to_string()
            node_ref=container
        >
            <a
                class="boottab-slider__scroll-left"
                href="#"
                role="button"
                aria-label="Scroll tabs left"
                style="display: none"
            >
                "‹"
            </a>
            <div class="boottab-slider__wrapper">
                <ul class="nav nav-tabs">{children()}</ul>
            </div>
            <a
                class="boottab-slider__scroll-right"
                href="#"
                role="button"
                aria-label="Scroll tabs right"
                style="display: none"
            >
                "›"
            </a>
        </div>
    }
}
