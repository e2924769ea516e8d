//! Weather API client.
//!
//! Fetches the current forecast for a prefecture's city code from the
//! tsukumijima forecast API (`GET /api/forecast?city={code}`). The post
//! detail page only needs the short description ("telop") of today's
//! forecast, and it must render even when the lookup fails, so the public
//! entry point [`WeatherClient::current_weather`] degrades every failure
//! (connect error, timeout, non-2xx, malformed payload) to a fixed
//! placeholder instead of propagating it. No retry, no cache.

use serde::Deserialize;
use thiserror::Error;

use crate::config::WeatherConfig;

/// Shown in place of the forecast when the lookup fails.
pub const WEATHER_PLACEHOLDER: &str = "エラーが起きました";

/// Errors that can occur when fetching the forecast.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed (connect error, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: status {status}")]
    Api { status: u16 },

    /// Failed to parse the response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The response parsed but contained no forecast entries.
    #[error("no forecasts in response")]
    MissingForecast,
}

/// Forecast API response (only the fields we read).
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub forecasts: Vec<Forecast>,
}

/// One day's forecast.
#[derive(Debug, Deserialize)]
pub struct Forecast {
    /// Short weather description, e.g. "晴れ" or "曇のち雨".
    pub telop: String,
}

/// Weather API client.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new weather client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `WeatherError::Http` if the HTTP client fails to build.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch today's forecast for a city code.
    ///
    /// # Errors
    ///
    /// Returns an error for any transport, status or parse failure.
    pub async fn fetch(&self, city_code: &str) -> Result<Forecast, WeatherError> {
        let url = format!("{}/api/forecast?city={city_code}", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
            });
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))?;

        forecast
            .forecasts
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingForecast)
    }

    /// Today's weather description for a city code, best effort.
    ///
    /// Any failure is logged and masked with [`WEATHER_PLACEHOLDER`]; the
    /// caller always gets a displayable string.
    pub async fn current_weather(&self, city_code: &str) -> String {
        match self.fetch(city_code).await {
            Ok(forecast) => forecast.telop,
            Err(e) => {
                tracing::warn!(city_code, error = %e, "weather lookup failed");
                WEATHER_PLACEHOLDER.to_string()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_client() -> WeatherClient {
        // Nothing listens on port 1; the connect fails immediately.
        WeatherClient::new(&WeatherConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: Duration::from_millis(500),
        })
        .unwrap()
    }

    #[test]
    fn test_parse_forecast_response() {
        let payload = r#"{
            "publicTimeFormatted": "2026-01-24 17:00:00",
            "title": "神奈川県 横浜 の天気",
            "forecasts": [
                {"date": "2026-01-24", "telop": "晴れ"},
                {"date": "2026-01-25", "telop": "曇り"}
            ]
        }"#;

        let parsed: ForecastResponse = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.forecasts.first().unwrap().telop, "晴れ");
    }

    #[test]
    fn test_parse_rejects_malformed_payload() {
        let result = serde_json::from_str::<ForecastResponse>(r#"{"error": "oops"}"#);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint_errors() {
        let client = unreachable_client();
        assert!(matches!(
            client.fetch("140010").await,
            Err(WeatherError::Http(_))
        ));
    }

    #[tokio::test]
    async fn test_current_weather_degrades_to_placeholder() {
        let client = unreachable_client();
        assert_eq!(client.current_weather("140010").await, WEATHER_PLACEHOLDER);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = WeatherClient::new(&WeatherConfig {
            base_url: "http://example.invalid/".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(client.base_url, "http://example.invalid");
    }
}
