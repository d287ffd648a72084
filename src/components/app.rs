use crate::api::{build_queue_snapshot, Channel, ChannelClient, QueueItem, User};
use crate::components::{JoinView, QueueView};
use dioxus::prelude::*;

const POLL_INTERVAL_MS: u64 = 4000;

#[cfg(not(target_arch = "wasm32"))]
async fn poll_delay_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

#[cfg(target_arch = "wasm32")]
async fn poll_delay_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

/// The channel the user joined, plus how to reach the service. Everything
/// below the join screen reads this from context.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSession {
    pub server_url: String,
    pub channel: Channel,
    pub user: User,
}

#[derive(Clone, Copy)]
pub struct SessionSignal(pub Signal<Option<ChannelSession>>);

/// Bumped by anything that wants a fresh queue snapshot fetched.
#[derive(Clone, Copy)]
pub struct RefreshTickSignal(pub Signal<u64>);

/// Owns the queue snapshot and the session. Hands `(queue, on_skip)` down to
/// [`QueueView`]; skip requests are fire-and-forget posts followed by a
/// snapshot refresh, so the service stays the source of truth.
#[component]
pub fn AppShell() -> Element {
    let session = use_context_provider(|| SessionSignal(Signal::new(None::<ChannelSession>))).0;
    let refresh_tick = use_context_provider(|| RefreshTickSignal(Signal::new(0u64))).0;
    let queue = use_signal(Vec::<QueueItem>::new);
    let sync_error = use_signal(|| None::<String>);

    // Refetch the snapshot whenever the tick changes.
    {
        let session = session.clone();
        let refresh_tick = refresh_tick.clone();
        let queue = queue.clone();
        let sync_error = sync_error.clone();
        use_effect(move || {
            let _ = refresh_tick();
            let Some(current) = session() else {
                return;
            };
            let mut queue = queue.clone();
            let mut sync_error = sync_error.clone();
            spawn(async move {
                let client = ChannelClient::new(current.server_url.clone());
                match client.get_queue(current.channel.id).await {
                    Ok(results) => {
                        sync_error.set(None);
                        queue.set(build_queue_snapshot(results));
                    }
                    Err(err) => sync_error.set(Some(err)),
                }
            });
        });
    }

    // Other channel members edit the queue too; poll while a session exists.
    {
        let session = session.clone();
        let mut refresh_tick = refresh_tick.clone();
        use_future(move || async move {
            loop {
                poll_delay_ms(POLL_INTERVAL_MS).await;
                if session.peek().is_some() {
                    refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
                }
            }
        });
    }

    let on_skip = {
        let session = session.clone();
        let refresh_tick = refresh_tick.clone();
        move |index: usize| {
            let Some(current) = session() else {
                return;
            };
            let mut refresh_tick = refresh_tick.clone();
            spawn(async move {
                let client = ChannelClient::new(current.server_url.clone());
                // Fire-and-forget; the follow-up refresh shows whatever the
                // service actually kept.
                let _ = client.skip(current.channel.id, index).await;
                refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
            });
        }
    };

    rsx! {
        main { class: "app",
            {
                match session() {
                    Some(current) => rsx! {
                        header { class: "app--header",
                            div {
                                h1 { class: "app--title", "{current.channel.name}" }
                                p { class: "app--subtitle",
                                    "Access code {current.channel.access_code} · listening as {current.user.nickname}"
                                }
                            }
                            if let Some(err) = sync_error() {
                                p { class: "app--error", "{err}" }
                            }
                        }
                        QueueView { queue: queue(), on_skip: move |index| on_skip(index) }
                    },
                    None => rsx! {
                        JoinView {}
                    },
                }
            }
        }
    }
}
