//! Kakao address search client

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::entities::Coordinates;
use crate::domain::ports::Geocoder;
use crate::error::GeocodeError;

/// Implementation of the Geocoder port on the Kakao Local API
pub struct KakaoGeocoder {
    http: Client,
    base_url: String,
    api_key: String,
}

impl KakaoGeocoder {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/v2/local{}", self.base_url, path)
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, GeocodeError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| GeocodeError::Deserialization(e.to_string()))
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Response types for the Kakao API
#[derive(Debug, Deserialize)]
struct AddressSearchResponse {
    #[serde(default)]
    documents: Vec<AddressDocument>,
}

/// `x` is longitude and `y` is latitude, both sent as strings
#[derive(Debug, Deserialize)]
struct AddressDocument {
    x: String,
    y: String,
}

impl AddressDocument {
    fn coordinates(&self) -> Result<Coordinates, GeocodeError> {
        let invalid = || GeocodeError::InvalidCoordinates {
            x: self.x.clone(),
            y: self.y.clone(),
        };

        let lng: f64 = self.x.trim().parse().map_err(|_| invalid())?;
        let lat: f64 = self.y.trim().parse().map_err(|_| invalid())?;

        let coords = Coordinates { lat, lng };
        if lat == 0.0 || lng == 0.0 || !coords.is_valid() {
            return Err(invalid());
        }
        Ok(coords)
    }
}

#[async_trait]
impl Geocoder for KakaoGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let address = address.trim();

        let response = self
            .http
            .get(self.api_url("/search/address.json"))
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(&[
                ("query", address),
                ("analyze_type", "exact"),
                ("page", "1"),
                ("size", "1"),
            ])
            .send()
            .await?;

        let body: AddressSearchResponse = self.handle_response(response).await?;

        let doc = body
            .documents
            .first()
            .ok_or_else(|| GeocodeError::NoResult(address.to_string()))?;

        let coords = doc.coordinates()?;
        tracing::debug!(address, lat = coords.lat, lng = coords.lng, "Geocoded address");
        Ok(coords)
    }
}
