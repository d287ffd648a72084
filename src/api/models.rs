use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub nickname: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Channel {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "accessCode")]
    pub access_code: String,
    #[serde(default, alias = "createdBy")]
    pub created_by: i64,
    #[serde(default)]
    pub users: Vec<User>,
}

/// One search result or queue entry as the channel service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoResult {
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub url: String,
    // Not every service build reports the submitter on queue entries.
    #[serde(default, alias = "addedBy")]
    pub added_by: Option<User>,
}

/// One pending playback request as the UI sees it. Built by the queue owner
/// from a service snapshot; `id` is unique within that snapshot and stable
/// across re-renders of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    pub id: String,
    pub video: VideoResult,
    pub user: User,
}

/// Converts a service queue snapshot into presentation items. Entries keep
/// their order (position 0 plays next); ids are derived from position + url
/// so duplicate urls still get distinct keys.
pub fn build_queue_snapshot(results: Vec<VideoResult>) -> Vec<QueueItem> {
    results
        .into_iter()
        .enumerate()
        .map(|(position, video)| QueueItem {
            id: format!("{position}:{url}", url = video.url),
            user: video.added_by.clone().unwrap_or_default(),
            video,
        })
        .collect()
}

// Response envelopes

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueueResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, alias = "count")]
    pub length: u32,
    #[serde(default)]
    pub queue: Vec<VideoResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub results: Vec<VideoResult>,
}

pub fn format_duration(seconds: u32) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;
    format!("{}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_response_parses_service_shape() {
        let json = r#"{
            "status": "ok",
            "length": 2,
            "queue": [
                {"name": "Song A", "thumbnail_url": "http://t/a.jpg", "duration": 213, "url": "http://v/a"},
                {"name": "Song B", "duration": 95, "url": "http://v/b", "added_by": {"id": 3, "nickname": "alice"}}
            ]
        }"#;

        let parsed: QueueResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "ok");
        assert_eq!(parsed.length, 2);
        assert_eq!(parsed.queue.len(), 2);
        assert_eq!(parsed.queue[0].name, "Song A");
        assert_eq!(parsed.queue[0].added_by, None);
        assert_eq!(parsed.queue[1].added_by.as_ref().unwrap().nickname, "alice");
    }

    #[test]
    fn search_response_tolerates_error_envelope() {
        let json = r#"{"status": "error", "error": "no such channel"}"#;
        let parsed: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "error");
        assert_eq!(parsed.error.as_deref(), Some("no such channel"));
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn channel_parses_with_users() {
        let json = r#"{
            "id": 1,
            "name": "friday",
            "description": "office playlist",
            "access_code": "k3j9x",
            "created_by": 1,
            "users": [{"id": 1, "nickname": "bob"}]
        }"#;
        let parsed: Channel = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_code, "k3j9x");
        assert_eq!(parsed.users[0].nickname, "bob");
    }

    #[test]
    fn snapshot_preserves_order_and_derives_unique_ids() {
        let results = vec![
            VideoResult {
                name: "Song A".into(),
                url: "http://v/same".into(),
                duration: 10,
                ..Default::default()
            },
            VideoResult {
                name: "Song B".into(),
                url: "http://v/same".into(),
                duration: 20,
                ..Default::default()
            },
        ];

        let snapshot = build_queue_snapshot(results);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].video.name, "Song A");
        assert_eq!(snapshot[1].video.name, "Song B");
        assert_ne!(snapshot[0].id, snapshot[1].id);
    }

    #[test]
    fn snapshot_fills_missing_submitter_with_default() {
        let snapshot = build_queue_snapshot(vec![VideoResult {
            name: "Song".into(),
            url: "http://v/x".into(),
            ..Default::default()
        }]);
        assert_eq!(snapshot[0].user.nickname, "");
    }

    #[test]
    fn format_duration_pads_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(600), "10:00");
    }
}
