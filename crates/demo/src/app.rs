use boottab_slider::TabSliderNav;
use leptos::prelude::*;
use thaw::*;

fn tab_title(n: usize) -> String {
    format!("Section {}", n)
}

#[component]
pub fn App() -> impl IntoView {
    let (tabs, set_tabs) = signal((1..=12).map(tab_title).collect::<Vec<_>>());
    let (active, set_active) = signal(0usize);
    let tab_count = Signal::derive(move || tabs.with(|t| t.len()));

    let add_tab = move |_: leptos::ev::MouseEvent| {
        set_tabs.update(|t| {
            let n = t.len() + 1;
            t.push(tab_title(n));
        });
    };
    let remove_tab = move |_: leptos::ev::MouseEvent| {
        set_tabs.update(|t| {
            t.pop();
        });
        set_active.update(|a| *a = (*a).min(tab_count.get_untracked().saturating_sub(1)));
    };

    view! {
        <div class="demo">
            <h1>"boottab-slider"</h1>
            <TabSliderNav
                tab_count=tab_count
                on_complete=Callback::new(|_| log::info!("demo: slider ready"))
            >
                <For
                    each=move || tabs.get().into_iter().enumerate()
                    key=|(i, title)| (*i, title.clone())
                    children=move |(i, title)| {
                        view! {
                            <li class:active=move || active.get() == i>
                                <a
                                    href="#"
                                    on:click=move |ev| {
                                        ev.prevent_default();
                                        set_active.set(i);
                                    }
                                >
                                    {title}
                                </a>
                            </li>
                        }
                    }
                />
            </TabSliderNav>
            <p>{move || tabs.with(|t| t.get(active.get()).cloned().unwrap_or_default())}</p>
            <div class="demo__controls">
                <Flex vertical=false gap=FlexGap::Large>
                    <Button appearance=ButtonAppearance::Primary on_click=add_tab>
                        "Add tab"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=remove_tab>
                        "Remove tab"
                    </Button>
                </Flex>
            </div>
        </div>
    }
}
