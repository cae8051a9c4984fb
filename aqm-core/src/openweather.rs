//! OpenWeatherMap client for air pollution, current weather and direct
//! geocoding.
use crate::{
    error::{ProviderError, Result},
    location::GeocodedPlace,
    pollutant::PollutantReading,
    provider::{AirQualityProvider, Geocoder, WeatherProvider},
    weather::WeatherSnapshot,
};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const AIR_POLLUTION_PATH: &str = "/data/2.5/air_pollution";
const WEATHER_PATH: &str = "/data/2.5/weather";
const GEOCODING_PATH: &str = "/geo/1.0/direct";

#[derive(Deserialize)]
struct AirPollutionResponse {
    list: Vec<AirPollutionEntry>,
}

#[derive(Deserialize)]
struct AirPollutionEntry {
    components: PollutantReading,
}

#[derive(Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
    wind: WeatherWind,
    #[serde(default)]
    visibility: Option<f64>,
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: f64,
}

#[derive(Deserialize)]
struct WeatherWind {
    speed: f64,
}

#[derive(Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Deserialize)]
struct GeocodingEntry {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    country: String,
}

/// Parse an air pollution body, taking the first (current) entry.
pub fn parse_pollution(body: &str) -> Result<PollutantReading> {
    let response: AirPollutionResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    response
        .list
        .into_iter()
        .next()
        .map(|entry| entry.components)
        .ok_or_else(|| ProviderError::Malformed(String::from("empty pollution list")))
}

/// Parse a current weather body (metric units).
pub fn parse_weather(body: &str) -> Result<WeatherSnapshot> {
    let response: WeatherResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    let description = response
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .unwrap_or_default();
    Ok(WeatherSnapshot {
        temperature: response.main.temp,
        humidity: response.main.humidity,
        wind_speed: response.wind.speed,
        visibility: response.visibility,
        description,
    })
}

/// Parse a direct geocoding body; an empty array means no match.
pub fn parse_geocoding(body: &str) -> Result<Option<GeocodedPlace>> {
    let entries: Vec<GeocodingEntry> =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
    Ok(entries.into_iter().next().map(|e| GeocodedPlace {
        name: e.name,
        country: e.country,
        lat: e.lat,
        lon: e.lon,
    }))
}

/// HTTP client for the OpenWeatherMap APIs.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
    max_tries: u32,
}

impl OpenWeatherClient {
    pub fn new(client: Client, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        OpenWeatherClient {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            max_tries: 1,
        }
    }

    /// Build a client with a request timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;
        Ok(Self::new(client, api_key, base_url))
    }

    /// Total attempts per request; more than one enables retry with
    /// exponential backoff on transport errors and 5xx responses.
    pub fn max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries.max(1);
        self
    }

    /// GET `path` and return the body, retrying with exponential backoff.
    async fn get_body(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let mut sleep_millis: u64 = 500;
        let mut last_error = ProviderError::Transport(String::from("no attempt made"));

        for attempt in 1..=self.max_tries {
            debug!("GET {} ({}/{})", url, attempt, self.max_tries);
            let request = self
                .client
                .get(&url)
                .query(query)
                .query(&[("appid", self.api_key.as_str())]);

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response
                            .text()
                            .await
                            .map_err(|e| ProviderError::Transport(e.to_string()));
                    }
                    warn!(
                        "Attempt {}/{}: Bad response status for {}: {}",
                        attempt, self.max_tries, endpoint, status
                    );
                    last_error = ProviderError::Status {
                        endpoint,
                        status: status.as_u16(),
                    };
                    if status.is_client_error() {
                        return Err(last_error);
                    }
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: Request failed for {}: {}",
                        attempt, self.max_tries, endpoint, e
                    );
                    last_error = ProviderError::Transport(e.to_string());
                }
            }

            if attempt < self.max_tries {
                info!(
                    "Sleeping for {} milliseconds before retry for {}",
                    sleep_millis, endpoint
                );
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }

        Err(last_error)
    }
}

impl AirQualityProvider for OpenWeatherClient {
    async fn pollution(&self, lat: f64, lon: f64) -> Result<PollutantReading> {
        let query = [("lat", lat.to_string()), ("lon", lon.to_string())];
        let body = self
            .get_body("air_pollution", AIR_POLLUTION_PATH, &query)
            .await?;
        parse_pollution(&body)
    }
}

impl WeatherProvider for OpenWeatherClient {
    async fn weather(&self, lat: f64, lon: f64) -> Result<WeatherSnapshot> {
        let query = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", String::from("metric")),
        ];
        let body = self.get_body("weather", WEATHER_PATH, &query).await?;
        parse_weather(&body)
    }
}

impl Geocoder for OpenWeatherClient {
    async fn geocode(&self, query: &str) -> Result<Option<GeocodedPlace>> {
        let params = [("q", query.to_string()), ("limit", String::from("1"))];
        let body = self.get_body("geocoding", GEOCODING_PATH, &params).await?;
        parse_geocoding(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local server answering every request with the same status and body.
    /// Returns its base URL, the request count and the last request line.
    async fn canned_server(
        status: u16,
        body: &'static str,
    ) -> (String, Arc<AtomicUsize>, Arc<Mutex<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let last_request = Arc::new(Mutex::new(String::new()));
        let (counter, recorder) = (hits.clone(), last_request.clone());

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                loop {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&chunk[..n]);
                    if request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let text = String::from_utf8_lossy(&request);
                *recorder.lock().unwrap() = text.lines().next().unwrap_or_default().to_string();

                let response = format!(
                    "HTTP/1.1 {} Canned\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), hits, last_request)
    }

    fn local_client(api_key: &str, base_url: String) -> OpenWeatherClient {
        let client = Client::builder().no_proxy().build().unwrap();
        OpenWeatherClient::new(client, api_key, base_url).max_tries(3)
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_up_to_max_tries() {
        let (base_url, hits, _) = canned_server(503, "").await;
        let client = local_client("key", base_url);
        let outcome = client.geocode("Paris").await;
        assert_eq!(
            outcome,
            Err(ProviderError::Status {
                endpoint: "geocoding",
                status: 503
            })
        );
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let (base_url, hits, _) = canned_server(401, r#"{"cod":401}"#).await;
        let client = local_client("bad", base_url);
        let outcome = client.geocode("Paris").await;
        assert_eq!(
            outcome,
            Err(ProviderError::Status {
                endpoint: "geocoding",
                status: 401
            })
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_geocoding_request() {
        let (base_url, hits, last_request) = canned_server(200, "[]").await;
        let client = local_client("key", base_url);
        assert_eq!(client.geocode("Paris").await, Ok(None));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        let request_line = last_request.lock().unwrap().clone();
        assert!(request_line.starts_with("GET /geo/1.0/direct?"));
        assert!(request_line.contains("q=Paris"));
        assert!(request_line.contains("limit=1"));
        assert!(request_line.contains("appid=key"));
    }

    // https://api.openweathermap.org/data/2.5/air_pollution?lat=28.6139&lon=77.209
    const POLLUTION_BODY: &str = r#"{"coord":{"lon":77.209,"lat":28.6139},"list":[{"main":{"aqi":5},"components":{"co":1121.52,"no":0.63,"no2":36.33,"o3":58.31,"so2":13.95,"pm2_5":88.19,"pm10":131.05,"nh3":18.2},"dt":1729235400}]}"#;

    const WEATHER_BODY: &str = r#"{"coord":{"lon":77.209,"lat":28.6139},"weather":[{"id":721,"main":"Haze","description":"haze","icon":"50d"}],"main":{"temp":31.05,"feels_like":33.2,"pressure":1011,"humidity":48},"visibility":2500,"wind":{"speed":2.06,"deg":300},"name":"New Delhi"}"#;

    #[test]
    fn test_parse_pollution() {
        let reading = parse_pollution(POLLUTION_BODY).unwrap();
        assert_eq!(reading.pm2_5, Some(88.19));
        assert_eq!(reading.pm10, Some(131.05));
        assert_eq!(reading.co, Some(1121.52));
    }

    #[test]
    fn test_parse_pollution_empty_list() {
        assert!(matches!(
            parse_pollution(r#"{"list":[]}"#),
            Err(ProviderError::Malformed(_))
        ));
        assert!(matches!(
            parse_pollution("not json"),
            Err(ProviderError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_weather() {
        let weather = parse_weather(WEATHER_BODY).unwrap();
        assert_eq!(weather.temperature, 31.05);
        assert_eq!(weather.humidity, 48.0);
        assert_eq!(weather.wind_speed, 2.06);
        assert_eq!(weather.visibility, Some(2500.0));
        assert_eq!(weather.description, "haze");
    }

    #[test]
    fn test_parse_weather_without_visibility() {
        let body = r#"{"weather":[],"main":{"temp":4.0,"humidity":90},"wind":{"speed":1.0}}"#;
        let weather = parse_weather(body).unwrap();
        assert_eq!(weather.visibility, None);
        assert_eq!(weather.description, "");
    }

    #[test]
    fn test_parse_geocoding() {
        let body = r#"[{"name":"London","local_names":{"en":"London"},"lat":51.5073219,"lon":-0.1276474,"country":"GB","state":"England"}]"#;
        let place = parse_geocoding(body).unwrap().unwrap();
        assert_eq!(place.display_name(), "London, GB");
        assert_eq!(parse_geocoding("[]").unwrap(), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = OpenWeatherClient::new(Client::new(), "key", "http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.max_tries(0).max_tries, 1);
    }
}
