//! Pexels stock-footage provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use reel_models::Orientation;

use crate::error::{ProviderError, ProviderResult};
use crate::footage::{FootageHit, FootageProvider};

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/videos/search";

/// Configuration for the Pexels client.
#[derive(Debug, Clone)]
pub struct PexelsConfig {
    /// API key sent in the Authorization header
    pub api_key: String,
    /// Request timeout
    pub timeout: Duration,
    /// Candidates requested per search
    pub per_page: u32,
}

impl PexelsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
            per_page: 25,
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        let api_key = std::env::var("PEXELS_API_KEY")
            .map_err(|_| ProviderError::MissingConfig("PEXELS_API_KEY".to_string()))?;
        let timeout = Duration::from_secs(
            std::env::var("PEXELS_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        );
        Ok(Self {
            timeout,
            ..Self::new(api_key)
        })
    }
}

/// Pexels `videos/search` response subset.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    duration: f64,
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoFile {
    link: String,
    #[serde(default)]
    file_type: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// `FootageProvider` backed by the Pexels video search API.
pub struct PexelsFootage {
    http: Client,
    config: PexelsConfig,
}

impl PexelsFootage {
    pub fn new(config: PexelsConfig) -> ProviderResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> ProviderResult<Self> {
        Self::new(PexelsConfig::from_env()?)
    }

    async fn search(&self, query: &str, orientation: Orientation) -> ProviderResult<SearchResponse> {
        debug!(query, %orientation, "Searching Pexels footage");

        let response = self
            .http
            .get(PEXELS_SEARCH_URL)
            .header("Authorization", &self.config.api_key)
            .query(&[
                ("query", query),
                ("orientation", orientation.as_str()),
                ("per_page", &self.config.per_page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::FootageTimeout(e.to_string())
                } else {
                    ProviderError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::FootageSearch(format!(
                "Pexels returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl FootageProvider for PexelsFootage {
    async fn find(
        &self,
        terms: &[String],
        min_duration_seconds: f64,
        exclude_ids: &[String],
        orientation: Orientation,
    ) -> ProviderResult<FootageHit> {
        let query = terms.join(" ");
        let response = self.search(&query, orientation).await?;

        select_hit(
            &response.videos,
            min_duration_seconds,
            exclude_ids,
            orientation,
        )
        .ok_or(ProviderError::FootageNotFound)
    }
}

/// Pick the first non-excluded video that is long enough, preferring the
/// smallest mp4 file that still covers the output resolution.
fn select_hit(
    videos: &[PexelsVideo],
    min_duration_seconds: f64,
    exclude_ids: &[String],
    orientation: Orientation,
) -> Option<FootageHit> {
    for video in videos {
        let id = video.id.to_string();
        if exclude_ids.contains(&id) {
            continue;
        }
        if video.duration < min_duration_seconds {
            continue;
        }

        let mut candidates: Vec<&PexelsVideoFile> = video
            .video_files
            .iter()
            .filter(|f| f.file_type == "video/mp4")
            .filter(|f| {
                f.width.unwrap_or(0) >= orientation.width().min(orientation.height())
                    && f.height.unwrap_or(0) >= orientation.width().min(orientation.height())
            })
            .collect();
        candidates.sort_by_key(|f| f.width.unwrap_or(0) as u64 * f.height.unwrap_or(0) as u64);

        if let Some(file) = candidates.first() {
            return Some(FootageHit {
                id,
                url: file.link.clone(),
                width: file.width.unwrap_or(0),
                height: file.height.unwrap_or(0),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: u64, duration: f64, files: Vec<(u32, u32)>) -> PexelsVideo {
        PexelsVideo {
            id,
            duration,
            video_files: files
                .into_iter()
                .map(|(w, h)| PexelsVideoFile {
                    link: format!("https://example.com/{}x{}.mp4", w, h),
                    file_type: "video/mp4".to_string(),
                    width: Some(w),
                    height: Some(h),
                })
                .collect(),
        }
    }

    #[test]
    fn test_select_skips_excluded() {
        let videos = vec![
            video(1, 10.0, vec![(1080, 1920)]),
            video(2, 10.0, vec![(1080, 1920)]),
        ];
        let hit = select_hit(&videos, 2.0, &["1".to_string()], Orientation::Portrait).unwrap();
        assert_eq!(hit.id, "2");
    }

    #[test]
    fn test_select_skips_short_videos() {
        let videos = vec![
            video(1, 1.0, vec![(1080, 1920)]),
            video(2, 10.0, vec![(1080, 1920)]),
        ];
        let hit = select_hit(&videos, 5.0, &[], Orientation::Portrait).unwrap();
        assert_eq!(hit.id, "2");
    }

    #[test]
    fn test_select_prefers_smallest_qualifying_file() {
        let videos = vec![video(1, 10.0, vec![(2160, 3840), (1080, 1920)])];
        let hit = select_hit(&videos, 2.0, &[], Orientation::Portrait).unwrap();
        assert_eq!(hit.width, 1080);
    }

    #[test]
    fn test_select_rejects_undersized_files() {
        let videos = vec![video(1, 10.0, vec![(640, 360)])];
        assert!(select_hit(&videos, 2.0, &[], Orientation::Portrait).is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "videos": [{
                "id": 857251,
                "duration": 12.0,
                "video_files": [
                    {"link": "https://example.com/a.mp4", "file_type": "video/mp4",
                     "width": 1080, "height": 1920}
                ]
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.videos.len(), 1);
        assert_eq!(response.videos[0].id, 857251);
    }
}
