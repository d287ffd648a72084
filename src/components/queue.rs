use crate::api::QueueItem;
use crate::components::{Icon, SearchPanel};
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

/// Visibility of the search panel. Local to [`QueueView`], created `Hidden`
/// on mount and discarded on unmount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    AddClicked,
    HideRequested,
}

impl PanelVisibility {
    /// Pure transition function. `AddClicked` only shows a hidden panel and
    /// `HideRequested` only hides a visible one; any other pairing is a
    /// no-op.
    pub fn apply(self, event: PanelEvent) -> Self {
        match (self, event) {
            (Self::Hidden, PanelEvent::AddClicked) => Self::Visible,
            (Self::Visible, PanelEvent::HideRequested) => Self::Hidden,
            (state, _) => state,
        }
    }
}

/// Presentational description of one queue row.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueRow {
    /// View identity for the row; the item's id, never its position.
    pub key: String,
    pub title: String,
    pub nickname: String,
    /// Zero-based play position the row's skip control dispatches with.
    /// Captured at render time, so a queue edit between render and click can
    /// make it point at a different item; the service validates it.
    pub index: usize,
}

/// Derives row descriptors from a queue snapshot, preserving play order.
pub fn queue_rows(queue: &[QueueItem]) -> Vec<QueueRow> {
    queue
        .iter()
        .enumerate()
        .map(|(index, item)| QueueRow {
            key: item.id.clone(),
            title: item.video.name.clone(),
            nickname: item.user.nickname.clone(),
            index,
        })
        .collect()
}

/// The queue screen: an "Add song" control, one row per pending request, and
/// a search panel mounted only while [`PanelVisibility::Visible`]. Reads the
/// queue snapshot it is given and never mutates it; removal goes through
/// `on_skip` with the row's position.
#[component]
pub fn QueueView(queue: Vec<QueueItem>, on_skip: EventHandler<usize>) -> Element {
    let mut panel = use_signal(PanelVisibility::default);

    let rows = queue_rows(&queue);

    rsx! {
        div { class: "queue",
            input {
                r#type: "button",
                value: "Add song",
                class: "button-solid queue--add",
                onclick: move |_| panel.with_mut(|p| *p = p.apply(PanelEvent::AddClicked)),
            }
            div { class: "queue--list",
                div { class: "queue--headings",
                    span { class: "col--song", "Next" }
                    span { class: "col--user", "Added by" }
                }
                for row in rows {
                    div { key: "{row.key}", class: "queue--item",
                        span { class: "col--song", "{row.title}" }
                        span { class: "col--user", "{row.nickname}" }
                        button {
                            class: "col--skip",
                            aria_label: "skip",
                            onclick: {
                                let index = row.index;
                                move |_| on_skip.call(index)
                            },
                            Icon { name: "x".to_string(), class: "icon-small".to_string() }
                        }
                    }
                }
                {
                    match panel() {
                        PanelVisibility::Visible => rsx! {
                            SearchPanel {
                                on_hide: move |_| panel.with_mut(|p| *p = p.apply(PanelEvent::HideRequested)),
                            }
                        },
                        PanelVisibility::Hidden => rsx! {},
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{User, VideoResult};

    fn item(id: &str, title: &str, nickname: &str) -> QueueItem {
        QueueItem {
            id: id.to_string(),
            video: VideoResult {
                name: title.to_string(),
                ..Default::default()
            },
            user: User {
                id: 1,
                nickname: nickname.to_string(),
            },
        }
    }

    #[test]
    fn initial_visibility_is_hidden() {
        assert_eq!(PanelVisibility::default(), PanelVisibility::Hidden);
    }

    #[test]
    fn add_click_shows_panel_and_hide_request_hides_it() {
        let shown = PanelVisibility::Hidden.apply(PanelEvent::AddClicked);
        assert_eq!(shown, PanelVisibility::Visible);
        assert_eq!(
            shown.apply(PanelEvent::HideRequested),
            PanelVisibility::Hidden
        );
    }

    #[test]
    fn non_matching_events_leave_state_unchanged() {
        assert_eq!(
            PanelVisibility::Hidden.apply(PanelEvent::HideRequested),
            PanelVisibility::Hidden
        );
        assert_eq!(
            PanelVisibility::Visible.apply(PanelEvent::AddClicked),
            PanelVisibility::Visible
        );
    }

    #[test]
    fn add_hide_cycles_return_to_hidden() {
        let mut state = PanelVisibility::default();
        for _ in 0..3 {
            state = state.apply(PanelEvent::AddClicked);
            state = state.apply(PanelEvent::HideRequested);
        }
        assert_eq!(state, PanelVisibility::Hidden);
    }

    #[test]
    fn rows_are_empty_for_empty_queue() {
        assert!(queue_rows(&[]).is_empty());
    }

    #[test]
    fn row_count_matches_queue_length() {
        let queue: Vec<_> = (0..5)
            .map(|i| item(&format!("id-{i}"), &format!("Song {i}"), "alice"))
            .collect();
        assert_eq!(queue_rows(&queue).len(), queue.len());
    }

    #[test]
    fn rows_preserve_order_and_bind_positions() {
        let queue = vec![
            item("a", "Song A", "alice"),
            item("b", "Song B", "bob"),
            item("c", "Song C", "carol"),
        ];

        let rows = queue_rows(&queue);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.index, i);
            assert_eq!(row.key, queue[i].id);
            assert_eq!(row.title, queue[i].video.name);
            assert_eq!(row.nickname, queue[i].user.nickname);
        }
    }

    #[test]
    fn rows_are_keyed_by_id_not_position() {
        let queue = vec![item("zzz", "Song A", "alice")];
        let rows = queue_rows(&queue);
        assert_eq!(rows[0].key, "zzz");
        assert_eq!(rows[0].index, 0);
    }
}
