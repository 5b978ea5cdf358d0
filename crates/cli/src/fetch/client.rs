use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use serde::Deserialize;
use xcprofile_course::ElevationError;
use xcprofile_course::ElevationService;
use xcprofile_course::GeometrySource;
use xcprofile_course::LatLng;
use xcprofile_course::LoadError;

use crate::fetch::error::FetchError;
use crate::fetch::error::Result;

const USER_AGENT: &str = concat!("xcprofile/", env!("CARGO_PKG_VERSION"));

pub(crate) fn http_client() -> Result<Client> {
    let client = Client::builder().user_agent(USER_AGENT).build()?;
    Ok(client)
}

/// Fetches course geometry payloads over HTTP.
pub(crate) struct CourseClient {
    client: Client,
}

impl CourseClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn get_geometry(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        match response.status() {
            StatusCode::OK => {
                let payload = response.text()?;
                Ok(payload)
            }
            status_code => {
                let message = response.text()?;
                let error = FetchError::Response {
                    status_code,
                    message,
                };
                Err(error)
            }
        }
    }
}

impl GeometrySource for CourseClient {
    fn fetch(&self, url: &str) -> std::result::Result<String, LoadError> {
        self.get_geometry(url)
            .map_err(|error| LoadError::Fetch(Box::new(error)))
    }
}

/// Looks up point elevations through the Google Maps Elevation API.
pub(crate) struct ElevationClient {
    client: Client,
    base_url: &'static str,
    api_key: String,
}

impl ElevationClient {
    pub fn new(client: Client, api_key: String) -> Self {
        let base_url = "https://maps.googleapis.com/maps/api/elevation/json";

        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn request(&self, points: &[LatLng]) -> RequestBuilder {
        self.client.get(self.base_url).query(&[
            ("locations", locations(points).as_str()),
            ("key", self.api_key.as_str()),
        ])
    }

    pub fn get_elevations(&self, points: &[LatLng]) -> Result<ElevationResponse> {
        let response = self.request(points).send()?;

        match response.status() {
            StatusCode::OK => {
                let elevations: ElevationResponse = response.json()?;
                Ok(elevations)
            }
            status_code => {
                let message = response.text()?;
                let error = FetchError::Response {
                    status_code,
                    message,
                };
                Err(error)
            }
        }
    }
}

impl ElevationService for ElevationClient {
    fn lookup(&self, points: &[LatLng]) -> std::result::Result<Vec<f64>, ElevationError> {
        self.get_elevations(points)
            .map_err(|error| ElevationError::Request(Box::new(error)))?
            .into_elevations()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ElevationResponse {
    status: String,
    #[serde(default)]
    results: Vec<ElevationResult>,
    error_message: Option<String>,
}

impl ElevationResponse {
    fn into_elevations(self) -> std::result::Result<Vec<f64>, ElevationError> {
        match self.status.as_str() {
            "OK" => Ok(self.results.into_iter().map(|r| r.elevation).collect()),
            status => {
                let status = match self.error_message {
                    Some(message) => format!("{status} ({message})"),
                    None => status.to_owned(),
                };
                Err(ElevationError::Status(status))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}

/// Joins the points as `lat,lng` pairs with six decimals (about 0.1 m),
/// which keeps a full batch under the service's URL length limit.
fn locations(points: &[LatLng]) -> String {
    points
        .iter()
        .map(|p| format!("{:.6},{:.6}", p.lat, p.lng))
        .collect::<Vec<String>>()
        .join("|")
}

#[cfg(test)]
mod tests {
    use xcprofile_course::elevation::ELEVATION_BATCH_SIZE;

    use super::*;

    #[test]
    fn locations_are_pipe_separated_lat_lng_pairs() {
        let points = [LatLng::new(-33.0, 150.0), LatLng::new(-33.1, 150.1)];

        assert_eq!(
            locations(&points),
            "-33.000000,150.000000|-33.100000,150.100000"
        );
    }

    #[test]
    fn locations_round_to_six_decimals() {
        let points = [LatLng::new(52.912_345_678_901_23, -1.354_321_987_654_32)];

        assert_eq!(locations(&points), "52.912346,-1.354322");
    }

    #[test]
    fn full_batch_request_url_fits_the_service_limit() {
        const MAX_URL_LENGTH: usize = 16_384;
        let points: Vec<LatLng> = (0..ELEVATION_BATCH_SIZE)
            .map(|i| {
                let offset = i as f64 * 1.234_567_890_123e-7;
                LatLng::new(-89.123_456_789_012_34 + offset, -179.987_654_321_098_7 + offset)
            })
            .collect();
        let client = ElevationClient::new(http_client().unwrap(), "k".repeat(39));

        let request = client.request(&points).build().unwrap();

        assert!(request.url().as_str().len() <= MAX_URL_LENGTH);
    }

    #[test]
    fn elevation_response_yields_elevations_in_order() {
        let body = r#"{ "status": "OK", "results": [
            { "elevation": 120.5, "location": { "lat": -33.0, "lng": 150.0 }, "resolution": 19.1 },
            { "elevation": 98.25, "location": { "lat": -33.1, "lng": 150.1 }, "resolution": 19.1 }
        ] }"#;
        let response: ElevationResponse = serde_json::from_str(body).unwrap();

        let elevations = response.into_elevations().unwrap();

        assert_eq!(elevations, [120.5, 98.25]);
    }

    #[test]
    fn elevation_response_with_error_status_is_an_error() {
        let body = r#"{ "status": "REQUEST_DENIED", "results": [], "error_message": "The provided API key is invalid." }"#;
        let response: ElevationResponse = serde_json::from_str(body).unwrap();

        let result = response.into_elevations();

        assert!(matches!(
            result,
            Err(ElevationError::Status(ref status)) if status == "REQUEST_DENIED (The provided API key is invalid.)"
        ));
    }
}
