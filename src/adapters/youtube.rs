//! YouTube Data API v3 adapter.
//!
//! Implements the three API operations the pipeline needs: search-list
//! (channel discovery and recent-video lookup), channels-list, and a
//! batched videos-list. Count fields arrive as JSON strings on the wire
//! and are parsed to integers here.

use async_trait::async_trait;
use serde::Deserialize;

use super::{ChannelSearchPage, ChannelStats, PlatformError, VideoPlatform};
use crate::domain::ChannelId;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// YouTube Data API client
pub struct YouTubeClient {
    /// OAuth bearer token
    access_token: String,
    /// HTTP client
    client: reqwest::Client,
}

impl YouTubeClient {
    /// Create a new client from an OAuth access token
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            client: reqwest::Client::new(),
        }
    }

    /// Build API URL for a resource
    fn api_url(&self, resource: &str) -> String {
        format!("{}/{}", BASE_URL, resource)
    }

    /// Issue a GET and decode the JSON body, mapping non-2xx responses to
    /// `PlatformError::Api` with the server's error message when present.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        resource: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .get(self.api_url(resource))
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorEnvelope>()
                .await
                .map(|e| e.error.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(PlatformError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn search_channels(
        &self,
        query: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ChannelSearchPage, PlatformError> {
        let page_size = page_size.to_string();
        let mut params = vec![
            ("part", "snippet"),
            ("maxResults", page_size.as_str()),
            ("q", query),
            ("type", "channel"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let body: SearchListResponse = self.get_json("search", &params).await?;
        Ok(ChannelSearchPage {
            channel_ids: body
                .items
                .into_iter()
                .filter_map(|item| item.snippet.and_then(|s| s.channel_id))
                .map(ChannelId)
                .collect(),
            next_page_token: body.next_page_token,
        })
    }

    async fn channel_stats(&self, id: &ChannelId) -> Result<Option<ChannelStats>, PlatformError> {
        let body: ChannelListResponse = self
            .get_json("channels", &[("part", "snippet,statistics"), ("id", id.as_str())])
            .await?;

        let Some(item) = body.items.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(ChannelStats {
            title: item.snippet.title,
            // Hidden subscriber counts come back without the field
            subscribers: parse_count("subscriberCount", item.statistics.subscriber_count)?,
            total_views: parse_count("viewCount", Some(item.statistics.view_count))?,
            video_count: parse_count("videoCount", Some(item.statistics.video_count))?,
        }))
    }

    async fn recent_video_ids(
        &self,
        id: &ChannelId,
        max: u32,
    ) -> Result<Vec<String>, PlatformError> {
        let max = max.to_string();
        let body: SearchListResponse = self
            .get_json(
                "search",
                &[
                    ("part", "id"),
                    ("channelId", id.as_str()),
                    ("type", "video"),
                    ("order", "date"),
                    ("maxResults", max.as_str()),
                ],
            )
            .await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| item.id.and_then(|id| id.video_id))
            .collect())
    }

    async fn video_view_counts(&self, ids: &[String]) -> Result<Vec<u64>, PlatformError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids.join(",");
        let body: VideoListResponse = self
            .get_json("videos", &[("part", "statistics"), ("id", joined.as_str())])
            .await?;

        body.items
            .into_iter()
            .map(|item| parse_count("viewCount", Some(item.statistics.view_count)))
            .collect()
    }
}

/// Parse a wire count field (JSON string) into an integer; absent fields
/// count as zero.
fn parse_count(field: &'static str, value: Option<String>) -> Result<u64, PlatformError> {
    match value {
        None => Ok(0),
        Some(raw) => raw.parse::<u64>().map_err(|_| PlatformError::MalformedCount {
            field,
            value: raw,
        }),
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: Option<SearchItemId>,
    #[serde(default)]
    snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchSnippet {
    #[serde(rename = "channelId")]
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelListResponse {
    #[serde(default)]
    items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
struct ChannelItem {
    snippet: ChannelSnippet,
    statistics: ChannelStatistics,
}

#[derive(Debug, Deserialize)]
struct ChannelSnippet {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ChannelStatistics {
    #[serde(rename = "subscriberCount")]
    subscriber_count: Option<String>,
    #[serde(rename = "viewCount")]
    view_count: String,
    #[serde(rename = "videoCount")]
    video_count: String,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    statistics: VideoStatistics,
}

#[derive(Debug, Deserialize)]
struct VideoStatistics {
    #[serde(rename = "viewCount")]
    view_count: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        let client = YouTubeClient::new("TOKEN".to_string());
        assert_eq!(
            client.api_url("search"),
            "https://www.googleapis.com/youtube/v3/search"
        );
    }

    #[test]
    fn test_search_response_with_token() {
        let json = r#"{
            "nextPageToken": "CAUQAA",
            "items": [
                {"snippet": {"channelId": "UCaaa"}},
                {"snippet": {"channelId": "UCbbb"}}
            ]
        }"#;

        let parsed: SearchListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.next_page_token.as_deref(), Some("CAUQAA"));
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(
            parsed.items[0].snippet.as_ref().unwrap().channel_id.as_deref(),
            Some("UCaaa")
        );
    }

    #[test]
    fn test_search_response_last_page_has_no_token() {
        // A full page without nextPageToken still ends pagination
        let json = r#"{"items": [{"snippet": {"channelId": "UCccc"}}]}"#;

        let parsed: SearchListResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.next_page_token.is_none());
        assert_eq!(parsed.items.len(), 1);
    }

    #[test]
    fn test_channel_statistics_counts_are_wire_strings() {
        let json = r#"{
            "items": [{
                "snippet": {"title": "Example"},
                "statistics": {
                    "subscriberCount": "1200",
                    "viewCount": "340000",
                    "videoCount": "57"
                }
            }]
        }"#;

        let parsed: ChannelListResponse = serde_json::from_str(json).unwrap();
        let item = &parsed.items[0];
        assert_eq!(item.snippet.title, "Example");
        assert_eq!(item.statistics.subscriber_count.as_deref(), Some("1200"));
        assert_eq!(item.statistics.view_count, "340000");
    }

    #[test]
    fn test_hidden_subscriber_count_defaults_to_zero() {
        let json = r#"{
            "items": [{
                "snippet": {"title": "Hidden"},
                "statistics": {"viewCount": "10", "videoCount": "1"}
            }]
        }"#;

        let parsed: ChannelListResponse = serde_json::from_str(json).unwrap();
        let subs = parse_count(
            "subscriberCount",
            parsed.items[0].statistics.subscriber_count.clone(),
        )
        .unwrap();
        assert_eq!(subs, 0);
    }

    #[test]
    fn test_malformed_count_is_an_error() {
        let err = parse_count("viewCount", Some("12m".to_string())).unwrap_err();
        match err {
            PlatformError::MalformedCount { field, value } => {
                assert_eq!(field, "viewCount");
                assert_eq!(value, "12m");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_video_search_items_carry_video_ids() {
        let json = r#"{
            "items": [
                {"id": {"videoId": "vid1"}},
                {"id": {"videoId": "vid2"}}
            ]
        }"#;

        let parsed: SearchListResponse = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = parsed
            .items
            .into_iter()
            .filter_map(|i| i.id.and_then(|id| id.video_id))
            .collect();
        assert_eq!(ids, vec!["vid1", "vid2"]);
    }
}
