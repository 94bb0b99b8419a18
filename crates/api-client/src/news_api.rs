// In crates/api-client/src/news_api.rs

use std::time::Duration;

use app_config::NewsApiSettings;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::Headline;

use crate::error::{Error, Result};
use crate::types::{EverythingResponse, HeadlineQuery, RawArticle};
use crate::{HeadlineSource, USER_AGENT};

/// Title NewsAPI substitutes for articles that were taken down.
const REMOVED_TITLE: &str = "[Removed]";
/// Timestamp format accepted by the `from`/`to` parameters.
const QUERY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Client for the NewsAPI `everything` endpoint.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    /// The persistent HTTP client.
    http_client: reqwest::Client,
    api_key: String,
    /// The base URL, e.g. `https://newsapi.org/v2`.
    base_url: String,
}

impl NewsApiClient {
    /// Constructs a new client from `NewsApiSettings`.
    pub fn new(settings: &NewsApiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .ok_or_else(|| Error::ClientBuildError("NewsAPI key is not configured".to_string()))?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl HeadlineSource for NewsApiClient {
    fn name(&self) -> &'static str {
        "NewsAPI"
    }

    /// Fetches headlines via `GET /everything`, newest first.
    async fn fetch_headlines(&self, query: &HeadlineQuery) -> Result<Vec<Headline>> {
        let url = format!("{}/everything", self.base_url);
        let page_size = query.page_size.min(app_config::MAX_PAGE_SIZE).to_string();
        let from = query.from.format(QUERY_TIME_FORMAT).to_string();
        let to = query.to.format(QUERY_TIME_FORMAT).to_string();
        let terms = query.search_terms();

        tracing::debug!(q = %terms, %from, %to, "Contacting NewsAPI...");

        let response = self
            .http_client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", terms.as_str()),
                ("language", query.language.as_str()),
                ("sortBy", "publishedAt"),
                ("from", from.as_str()),
                ("to", to.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await
            .map_err(Error::RequestFailed)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(Error::RequestFailed)?;

        let headlines = parse_everything_response(status, &text)?;
        tracing::debug!(count = headlines.len(), "Fetched articles.");
        Ok(headlines)
    }
}

/// Turns a raw `/everything` response into headlines.
///
/// Error bodies become `ApiError` (or `RateLimited`). Articles without a usable
/// title or timestamp are dropped.
pub fn parse_everything_response(status: u16, body: &str) -> Result<Vec<Headline>> {
    let parsed: EverythingResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) if status == 429 => {
            return Err(Error::RateLimited { provider: "NewsAPI", msg: e.to_string() });
        }
        Err(e) if !(200..300).contains(&status) => {
            tracing::debug!(error = %e, "Unparsable NewsAPI error body.");
            return Err(Error::HttpStatus { status, body: body.to_string() });
        }
        Err(e) => return Err(Error::DeserializationFailed(e)),
    };

    // NewsAPI returns an error object on failure, so we check for that first.
    if parsed.status != "ok" || !(200..300).contains(&status) {
        let code = parsed.code.unwrap_or_else(|| parsed.status.clone());
        let msg = parsed.message.unwrap_or_else(|| "Unknown error".to_string());
        if status == 429 || code == "rateLimited" {
            return Err(Error::RateLimited { provider: "NewsAPI", msg });
        }
        return Err(Error::ApiError { code, msg });
    }

    if let Some(total) = parsed.total_results {
        tracing::debug!(total_results = total, returned = parsed.articles.len(), "NewsAPI result set.");
    }

    Ok(parsed.articles.into_iter().filter_map(into_headline).collect())
}

fn into_headline(raw: RawArticle) -> Option<Headline> {
    let title = raw.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())?;
    if title == REMOVED_TITLE {
        return None;
    }

    let published_at = match raw.published_at.as_deref().map(DateTime::parse_from_rfc3339) {
        Some(Ok(ts)) => ts.with_timezone(&Utc),
        Some(Err(e)) => {
            tracing::warn!(%title, error = %e, "Dropping article with an unparsable publishedAt.");
            return None;
        }
        None => {
            tracing::warn!(%title, "Dropping article without publishedAt.");
            return None;
        }
    };

    Some(Headline {
        text: title,
        published_at,
        description: raw.description.filter(|d| !d.trim().is_empty()),
        source: raw.source.and_then(|s| s.name),
        url: raw.url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const OK_BODY: &str = r#"{
        "status": "ok",
        "totalResults": 4,
        "articles": [
            {
                "source": {"id": null, "name": "Reuters"},
                "author": "Staff",
                "title": "Nvidia shares hit record high on AI demand",
                "description": "Chipmaker extends rally.",
                "url": "https://example.com/a",
                "publishedAt": "2024-05-01T14:30:00Z",
                "content": "..."
            },
            {
                "source": {"id": null, "name": "[Removed]"},
                "title": "[Removed]",
                "description": "[Removed]",
                "url": "https://removed.com",
                "publishedAt": "1970-01-01T00:00:00Z"
            },
            {
                "source": {"id": null, "name": "Blog"},
                "title": "   ",
                "publishedAt": "2024-05-01T13:00:00Z"
            },
            {
                "source": {"id": null, "name": "Wire"},
                "title": "Nvidia faces export curbs",
                "description": null,
                "url": null,
                "publishedAt": "2024-05-01T09:15:00+02:00"
            }
        ]
    }"#;

    #[test]
    fn test_parses_articles_and_drops_unusable_ones() {
        let headlines = parse_everything_response(200, OK_BODY).unwrap();
        assert_eq!(headlines.len(), 2);

        assert_eq!(headlines[0].text, "Nvidia shares hit record high on AI demand");
        assert_eq!(headlines[0].published_at, Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap());
        assert_eq!(headlines[0].source.as_deref(), Some("Reuters"));
        assert_eq!(headlines[0].description.as_deref(), Some("Chipmaker extends rally."));

        // Offsets are normalised to UTC.
        assert_eq!(headlines[1].published_at, Utc.with_ymd_and_hms(2024, 5, 1, 7, 15, 0).unwrap());
        assert!(headlines[1].description.is_none());
    }

    #[test]
    fn test_empty_result_set_is_not_an_error() {
        let body = r#"{"status":"ok","totalResults":0,"articles":[]}"#;
        assert!(parse_everything_response(200, body).unwrap().is_empty());
    }

    #[test]
    fn test_error_body_is_surfaced() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        match parse_everything_response(401, body) {
            Err(Error::ApiError { code, msg }) => {
                assert_eq!(code, "apiKeyInvalid");
                assert_eq!(msg, "Your API key is invalid.");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn test_rate_limit_is_recognised() {
        let body = r#"{"status":"error","code":"rateLimited","message":"Too many requests."}"#;
        assert!(matches!(parse_everything_response(429, body), Err(Error::RateLimited { .. })));
        assert!(matches!(parse_everything_response(200, body), Err(Error::RateLimited { .. })));
        assert!(matches!(parse_everything_response(429, "slow down"), Err(Error::RateLimited { .. })));
    }

    #[test]
    fn test_non_json_failure_keeps_status() {
        match parse_everything_response(502, "<html>Bad Gateway</html>") {
            Err(Error::HttpStatus { status, .. }) => assert_eq!(status, 502),
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[test]
    fn test_search_terms_include_upper_case_ticker() {
        let query = HeadlineQuery {
            ticker: "nvda".to_string(),
            from: Utc.with_ymd_and_hms(2024, 4, 30, 12, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            language: "en".to_string(),
            page_size: 100,
        };
        assert_eq!(query.search_terms(), "(nvda OR NVDA)");
    }

    #[test]
    fn test_client_requires_api_key() {
        let settings = NewsApiSettings::default();
        assert!(matches!(NewsApiClient::new(&settings), Err(Error::ClientBuildError(_))));
    }
}
