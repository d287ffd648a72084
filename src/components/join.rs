use crate::api::{Channel, ChannelClient, User};
use crate::components::{ChannelSession, RefreshTickSignal, SessionSignal};
use dioxus::prelude::*;

/// Picks the joined user out of the channel's member list. The service
/// appends new members, so the last matching nickname is ours; if the
/// service build doesn't echo members back, fall back to a local stand-in.
fn resolve_user(channel: &Channel, nickname: &str) -> User {
    channel
        .users
        .iter()
        .rev()
        .find(|user| user.nickname == nickname)
        .cloned()
        .unwrap_or_else(|| User {
            id: 0,
            nickname: nickname.to_string(),
        })
}

/// Entry screen: join an existing channel by id, or create a fresh one and
/// join it as its first member. A successful join installs the session and
/// asks for an initial queue snapshot.
#[component]
pub fn JoinView() -> Element {
    let session = use_context::<SessionSignal>().0;
    let refresh_tick = use_context::<RefreshTickSignal>().0;

    let mut server_url = use_signal(|| "http://localhost:8080".to_string());
    let mut channel_id = use_signal(String::new);
    let mut channel_name = use_signal(String::new);
    let mut nickname = use_signal(String::new);
    let is_busy = use_signal(|| false);
    let message = use_signal(|| None::<String>);

    let install_session = {
        let mut session = session.clone();
        let mut refresh_tick = refresh_tick.clone();
        move |server: String, channel: Channel, user: User| {
            session.set(Some(ChannelSession {
                server_url: server,
                channel,
                user,
            }));
            refresh_tick.with_mut(|tick| *tick = tick.wrapping_add(1));
        }
    };

    let on_join = {
        let install_session = install_session.clone();
        let mut is_busy = is_busy.clone();
        let mut message = message.clone();
        move |_| {
            let name = nickname().trim().to_string();
            if name.is_empty() {
                message.set(Some("Pick a nickname first".to_string()));
                return;
            }
            let Ok(id) = channel_id().trim().parse::<i64>() else {
                message.set(Some("Channel id must be a number".to_string()));
                return;
            };
            if *is_busy.peek() {
                return;
            }
            is_busy.set(true);

            let server = server_url().trim().to_string();
            let install_session = install_session.clone();
            let mut is_busy = is_busy.clone();
            let mut message = message.clone();
            spawn(async move {
                let client = ChannelClient::new(server.clone());
                match client.join(id, &name).await {
                    Ok(channel) => {
                        let user = resolve_user(&channel, &name);
                        let mut install_session = install_session.clone();
                        install_session(server, channel, user);
                    }
                    Err(err) => message.set(Some(err)),
                }
                is_busy.set(false);
            });
        }
    };

    let on_create = {
        let install_session = install_session.clone();
        let mut is_busy = is_busy.clone();
        let mut message = message.clone();
        move |_| {
            let name = nickname().trim().to_string();
            if name.is_empty() {
                message.set(Some("Pick a nickname first".to_string()));
                return;
            }
            let new_channel_name = channel_name().trim().to_string();
            if new_channel_name.is_empty() {
                message.set(Some("Give the new channel a name".to_string()));
                return;
            }
            if *is_busy.peek() {
                return;
            }
            is_busy.set(true);

            let server = server_url().trim().to_string();
            let install_session = install_session.clone();
            let mut is_busy = is_busy.clone();
            let mut message = message.clone();
            spawn(async move {
                let client = ChannelClient::new(server.clone());
                match client.create_channel(&new_channel_name, "", &name).await {
                    Ok(channel) => {
                        let user = resolve_user(&channel, &name);
                        let mut install_session = install_session.clone();
                        install_session(server, channel, user);
                    }
                    Err(err) => message.set(Some(err)),
                }
                is_busy.set(false);
            });
        }
    };

    rsx! {
        div { class: "join",
            h1 { class: "join--title", "vibequeue" }
            p { class: "join--subtitle", "Queue songs together, skip them together." }

            label { class: "join--label", "Server" }
            input {
                class: "join--input",
                value: server_url,
                oninput: move |e| server_url.set(e.value()),
            }

            label { class: "join--label", "Nickname" }
            input {
                class: "join--input",
                placeholder: "How the channel sees you",
                value: nickname,
                oninput: move |e| nickname.set(e.value()),
            }

            div { class: "join--section",
                label { class: "join--label", "Channel id" }
                input {
                    class: "join--input",
                    placeholder: "e.g. 1",
                    value: channel_id,
                    oninput: move |e| channel_id.set(e.value()),
                }
                button {
                    class: "button-solid",
                    disabled: is_busy(),
                    onclick: on_join,
                    "Join channel"
                }
            }

            div { class: "join--section",
                label { class: "join--label", "New channel name" }
                input {
                    class: "join--input",
                    placeholder: "Friday office playlist",
                    value: channel_name,
                    oninput: move |e| channel_name.set(e.value()),
                }
                button {
                    class: "button-solid",
                    disabled: is_busy(),
                    onclick: on_create,
                    "Create channel"
                }
            }

            if let Some(err) = message() {
                p { class: "join--error", "{err}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_user_prefers_latest_matching_member() {
        let channel = Channel {
            id: 1,
            users: vec![
                User {
                    id: 1,
                    nickname: "alice".into(),
                },
                User {
                    id: 2,
                    nickname: "bob".into(),
                },
                User {
                    id: 3,
                    nickname: "alice".into(),
                },
            ],
            ..Default::default()
        };

        let user = resolve_user(&channel, "alice");
        assert_eq!(user.id, 3);
    }

    #[test]
    fn resolve_user_falls_back_to_local_stand_in() {
        let channel = Channel::default();
        let user = resolve_user(&channel, "carol");
        assert_eq!(user.id, 0);
        assert_eq!(user.nickname, "carol");
    }
}
