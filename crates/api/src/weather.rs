//! Outbound weather forecast client.
//!
//! Queries an OpenWeather-style endpoint for the region of a scenic spot.
//! When no API key is configured the client runs in mock mode and returns
//! a deterministic canned forecast, so local development and tests never
//! touch the network. Lookup failures always degrade to `None`; weather is
//! advisory display data and must never fail a request.

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather client configuration.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Forecast endpoint (default: OpenWeatherMap current-weather API).
    pub api_url: String,
    /// API key. `None` switches the client to mock mode.
    pub api_key: Option<String>,
    /// Outbound request timeout in seconds (default: `10`).
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// Load weather configuration from environment variables.
    ///
    /// | Env Var               | Default                                             |
    /// |-----------------------|-----------------------------------------------------|
    /// | `WEATHER_API_URL`     | `https://api.openweathermap.org/data/2.5/weather`   |
    /// | `WEATHER_API_KEY`     | unset (mock mode)                                   |
    /// | `WEATHER_TIMEOUT_SECS`| `10`                                                |
    pub fn from_env() -> Self {
        let api_url = std::env::var("WEATHER_API_URL")
            .unwrap_or_else(|_| "https://api.openweathermap.org/data/2.5/weather".into());

        let api_key = std::env::var("WEATHER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let timeout_secs: u64 = std::env::var("WEATHER_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("WEATHER_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            api_key,
            timeout_secs,
        }
    }
}

/// A single-day forecast for a region, as shown alongside paid orders.
#[derive(Debug, Clone, Serialize)]
pub struct Forecast {
    pub date: NaiveDate,
    /// Display range, e.g. `"5-12°C"`.
    pub temperature: String,
    pub condition: String,
    pub wind: String,
    pub humidity: String,
    pub advice: String,
}

/// Subset of the OpenWeather current-weather response we consume.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    main: ApiMain,
    weather: Vec<ApiCondition>,
    wind: ApiWind,
}

#[derive(Debug, Deserialize)]
struct ApiMain {
    temp_min: f64,
    temp_max: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiWind {
    deg: i64,
    speed: f64,
}

/// Weather forecast client. Construct once at startup and share via state.
pub struct WeatherClient {
    config: WeatherConfig,
    http: reqwest::Client,
}

impl WeatherClient {
    pub fn new(config: WeatherConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    /// Whether the client is running in mock mode (no API key configured).
    pub fn is_mock(&self) -> bool {
        self.config.api_key.is_none()
    }

    /// Fetch the forecast for a region and date.
    ///
    /// Returns `None` when the lookup fails for any reason; callers render
    /// an "unavailable" payload instead of an error.
    pub async fn forecast(&self, region: &str, date: NaiveDate) -> Option<Forecast> {
        match &self.config.api_key {
            Some(key) => self.fetch_remote(region, date, key).await,
            None => Some(self.mock_forecast(region, date)),
        }
    }

    async fn fetch_remote(&self, region: &str, date: NaiveDate, key: &str) -> Option<Forecast> {
        let result = self
            .http
            .get(&self.config.api_url)
            .query(&[("q", region), ("appid", key), ("units", "metric")])
            .send()
            .await;

        let response = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(region, error = %e, "Weather request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(region, status = %response.status(), "Weather API returned error status");
            return None;
        }

        let body: ApiResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(region, error = %e, "Weather response parse failed");
                return None;
            }
        };

        let condition = body
            .weather
            .first()
            .map(|c| c.description.clone())
            .unwrap_or_else(|| "unknown".into());

        Some(Forecast {
            date,
            temperature: format!(
                "{}-{}°C",
                body.main.temp_min as i64, body.main.temp_max as i64
            ),
            advice: advice_for(&condition, body.main.temp_max),
            condition,
            wind: format!("{}° {}m/s", body.wind.deg, body.wind.speed as i64),
            humidity: format!("{}%", body.main.humidity),
        })
    }

    /// Deterministic canned forecast keyed on region name and day of month.
    fn mock_forecast(&self, region: &str, date: NaiveDate) -> Forecast {
        use chrono::Datelike;

        // Stable pseudo-variation so different regions and dates do not all
        // look identical in demos.
        let seed = region.bytes().map(u64::from).sum::<u64>() + u64::from(date.day());
        let low = (seed % 15) as i64;
        let high = low + 8;
        let conditions = ["clear sky", "few clouds", "light rain", "overcast clouds"];
        let condition = conditions[(seed % conditions.len() as u64) as usize];

        Forecast {
            date,
            temperature: format!("{low}-{high}°C"),
            condition: condition.to_string(),
            wind: format!("{}° {}m/s", (seed * 37) % 360, 1 + seed % 5),
            humidity: format!("{}%", 40 + seed % 40),
            advice: advice_for(condition, high as f64),
        }
    }
}

/// Map a condition and daily high to a one-line outing advice string.
fn advice_for(condition: &str, temp_max: f64) -> String {
    if condition.contains("rain") || condition.contains("drizzle") {
        "Rain expected, bring an umbrella".into()
    } else if condition.contains("snow") {
        "Snow expected, dress warmly and watch your step".into()
    } else if temp_max >= 30.0 {
        "Hot day, bring water and sun protection".into()
    } else if temp_max <= 5.0 {
        "Cold day, dress warmly".into()
    } else {
        "Pleasant conditions, enjoy your visit".into()
    }
}
