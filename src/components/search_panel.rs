use crate::api::{format_duration, ChannelClient, VideoResult};
use crate::components::{Icon, RefreshTickSignal, SessionSignal};
use dioxus::prelude::*;

#[cfg(not(target_arch = "wasm32"))]
async fn search_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
async fn search_delay_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

/// Panel for adding a song to the channel queue. Self-contained: it searches
/// the service, posts the chosen result, and asks to be dismissed through
/// `on_hide` — its single capability from the queue screen. Cancel invokes
/// `on_hide` directly; a successful add bumps the queue refresh tick first.
#[component]
pub fn SearchPanel(on_hide: EventHandler<()>) -> Element {
    let session = use_context::<SessionSignal>().0;
    let refresh_tick = use_context::<RefreshTickSignal>().0;

    let mut search_query = use_signal(String::new);
    let debounced_query = use_signal(String::new);
    let search_results = use_signal(Vec::<VideoResult>::new);
    let is_searching = use_signal(|| false);
    let message = use_signal(|| None::<String>);
    let debounce_generation = use_signal(|| 0u64);
    let search_generation = use_signal(|| 0u64);

    // Debounce typing to avoid firing search requests on every keystroke.
    {
        let mut debounced_query = debounced_query.clone();
        let mut search_results = search_results.clone();
        let mut is_searching = is_searching.clone();
        let mut debounce_generation = debounce_generation.clone();
        use_effect(move || {
            let raw_query = search_query();
            let query = raw_query.trim().to_string();
            debounce_generation.with_mut(|value| *value = value.saturating_add(1));
            let generation = *debounce_generation.peek();

            if query.len() < 2 {
                debounced_query.set(String::new());
                search_results.set(Vec::new());
                is_searching.set(false);
                return;
            }

            let mut debounced_query = debounced_query.clone();
            let debounce_generation = debounce_generation.clone();
            spawn(async move {
                search_delay_ms(220).await;
                if *debounce_generation.peek() != generation {
                    return;
                }
                debounced_query.set(query);
            });
        });
    }

    // Execute search for the debounced query and drop stale responses.
    {
        let session = session.clone();
        let debounced_query = debounced_query.clone();
        let mut search_results = search_results.clone();
        let mut is_searching = is_searching.clone();
        let mut search_generation = search_generation.clone();
        let mut message = message.clone();
        use_effect(move || {
            let query = debounced_query().trim().to_string();
            if query.is_empty() {
                return;
            }
            let Some(current) = session() else {
                return;
            };

            search_generation.with_mut(|value| *value = value.saturating_add(1));
            let generation = *search_generation.peek();
            is_searching.set(true);

            let mut search_results = search_results.clone();
            let mut is_searching = is_searching.clone();
            let search_generation = search_generation.clone();
            let mut message = message.clone();
            spawn(async move {
                let client = ChannelClient::new(current.server_url.clone());
                let outcome = client.search(current.channel.id, &query).await;
                if *search_generation.peek() != generation {
                    return;
                }
                match outcome {
                    Ok(results) => {
                        message.set(None);
                        search_results.set(results);
                    }
                    Err(err) => {
                        message.set(Some(err));
                        search_results.set(Vec::new());
                    }
                }
                is_searching.set(false);
            });
        });
    }

    let on_add = {
        let session = session.clone();
        let mut refresh_tick = refresh_tick.clone();
        let mut message = message.clone();
        move |video_url: String| {
            let Some(current) = session() else {
                return;
            };
            let mut refresh_tick = refresh_tick.clone();
            let mut message = message.clone();
            spawn(async move {
                let client = ChannelClient::new(current.server_url.clone());
                match client.add_to_queue(current.channel.id, &video_url).await {
                    Ok(()) => {
                        refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
                        on_hide.call(());
                    }
                    Err(err) => message.set(Some(err)),
                }
            });
        }
    };

    rsx! {
        div { class: "search-panel",
            div { class: "search-panel--bar",
                Icon { name: "search".to_string(), class: "icon-small".to_string() }
                input {
                    class: "search-panel--input",
                    placeholder: "Search for a song...",
                    value: search_query,
                    oninput: move |e| {
                        let value = e.value();
                        search_query.set(value);
                    },
                }
                button {
                    class: "search-panel--cancel",
                    aria_label: "close search",
                    onclick: move |_| on_hide.call(()),
                    Icon { name: "x".to_string(), class: "icon-small".to_string() }
                }
            }

            if let Some(err) = message() {
                p { class: "search-panel--error", "{err}" }
            }

            if is_searching() {
                div { class: "search-panel--loading",
                    Icon { name: "loader".to_string(), class: "icon-small".to_string() }
                }
            } else {
                div { class: "search-panel--results",
                    for result in search_results() {
                        div { key: "{result.url}", class: "search-panel--result",
                            Icon { name: "music".to_string(), class: "icon-small".to_string() }
                            span { class: "col--song", "{result.name}" }
                            span { class: "col--duration", "{format_duration(result.duration)}" }
                            button {
                                class: "search-panel--add",
                                aria_label: "add to queue",
                                onclick: {
                                    let on_add = on_add.clone();
                                    let url = result.url.clone();
                                    move |_| on_add(url.clone())
                                },
                                Icon { name: "plus".to_string(), class: "icon-small".to_string() }
                            }
                        }
                    }
                }
            }
        }
    }
}
