use crate::api::models::*;
use once_cell::sync::Lazy;
use serde_json::json;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// HTTP client for the channel/queue service. One instance per base URL;
/// all methods take the channel id explicitly so a single client can serve
/// the join screen before a session exists.
pub struct ChannelClient {
    pub base_url: String,
}

impl ChannelClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path);
        for (index, (key, value)) in params.iter().enumerate() {
            url.push(if index == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    pub async fn create_channel(
        &self,
        name: &str,
        description: &str,
        created_by: &str,
    ) -> Result<Channel, String> {
        let url = self.build_url("channel", &[]);
        let response = HTTP_CLIENT
            .post(&url)
            .json(&json!({
                "name": name,
                "description": description,
                "created_by": created_by,
            }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        response.json::<Channel>().await.map_err(|e| e.to_string())
    }

    pub async fn get_channel(&self, channel_id: i64) -> Result<Channel, String> {
        let url = self.build_url(&format!("channel/{channel_id}"), &[]);
        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        response.json::<Channel>().await.map_err(|e| e.to_string())
    }

    pub async fn join(&self, channel_id: i64, nickname: &str) -> Result<Channel, String> {
        let url = self.build_url(&format!("channel/{channel_id}/user"), &[]);
        let response = HTTP_CLIENT
            .post(&url)
            .json(&json!({ "nickname": nickname }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        response.json::<Channel>().await.map_err(|e| e.to_string())
    }

    /// Fetches the current queue snapshot, in play order.
    pub async fn get_queue(&self, channel_id: i64) -> Result<Vec<VideoResult>, String> {
        let url = self.build_url(&format!("channel/{channel_id}/queue"), &[]);
        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let envelope: QueueResponse = response.json().await.map_err(|e| e.to_string())?;

        if envelope.status != "ok" {
            return Err(envelope.error.unwrap_or("Unknown error".to_string()));
        }

        Ok(envelope.queue)
    }

    pub async fn add_to_queue(&self, channel_id: i64, video_url: &str) -> Result<(), String> {
        let url = self.build_url(&format!("channel/{channel_id}/queue"), &[]);
        let response = HTTP_CLIENT
            .post(&url)
            .json(&json!({ "url": video_url }))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let envelope: StatusResponse = response.json().await.map_err(|e| e.to_string())?;

        if envelope.status != "ok" {
            return Err(envelope.error.unwrap_or("Unknown error".to_string()));
        }

        Ok(())
    }

    /// Requests removal of the queue entry at a zero-based position. The
    /// service owns index validation; a position that no longer exists comes
    /// back as an error envelope.
    pub async fn skip(&self, channel_id: i64, index: usize) -> Result<(), String> {
        let url = self.build_url(&format!("channel/{channel_id}/queue/{index}"), &[]);
        let response = HTTP_CLIENT
            .delete(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let envelope: StatusResponse = response.json().await.map_err(|e| e.to_string())?;

        if envelope.status != "ok" {
            return Err(envelope.error.unwrap_or("Unknown error".to_string()));
        }

        Ok(())
    }

    pub async fn search(&self, channel_id: i64, query: &str) -> Result<Vec<VideoResult>, String> {
        let url = self.build_url(
            &format!("channel/{channel_id}/search"),
            &[("query", query)],
        );
        let response = HTTP_CLIENT
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        let envelope: SearchResponse = response.json().await.map_err(|e| e.to_string())?;

        if envelope.status != "ok" {
            return Err(envelope.error.unwrap_or("Unknown error".to_string()));
        }

        Ok(envelope.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let client = ChannelClient::new("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn build_url_joins_path_and_params() {
        let client = ChannelClient::new("http://localhost:8080");
        assert_eq!(
            client.build_url("channel/1/queue", &[]),
            "http://localhost:8080/channel/1/queue"
        );
        assert_eq!(
            client.build_url("channel/1/search", &[("query", "daft punk")]),
            "http://localhost:8080/channel/1/search?query=daft%20punk"
        );
    }
}
