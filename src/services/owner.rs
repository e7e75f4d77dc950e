//! Owner dashboard endpoints under `/owner`.

use crate::api::types::{
    Car, CarIdRequest, CarsResponse, DashboardData, DashboardResponse, MessageResponse, NewCar,
};
use crate::api::{ApiClient, FormPart};
use crate::error::ApiError;

/// An image file to upload with a listing or as a profile picture.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Guess the MIME type from the file extension.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Self {
        let ext = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase());
        let mime = match ext.as_deref() {
            Some("png") => Some("image/png"),
            Some("jpg") | Some("jpeg") => Some("image/jpeg"),
            Some("webp") => Some("image/webp"),
            Some("gif") => Some("image/gif"),
            _ => None,
        };
        Self {
            file_name: file_name.to_string(),
            mime: mime.map(str::to_string),
            bytes,
        }
    }

    fn into_part(self) -> FormPart {
        FormPart::file("image", &self.file_name, self.mime.as_deref(), self.bytes)
    }
}

/// POST /owner/add-car as multipart: optional `image` plus `carData` JSON.
pub async fn add_car(
    client: &ApiClient,
    car: &NewCar,
    image: Option<ImageUpload>,
) -> Result<MessageResponse, ApiError> {
    let mut parts = Vec::with_capacity(2);
    if let Some(image) = image {
        parts.push(image.into_part());
    }
    parts.push(FormPart::text("carData", serde_json::to_string(car)?));
    client.post_multipart("/owner/add-car", parts).await?.data()
}

/// GET /owner/dashboard
pub async fn get_dashboard_data(client: &ApiClient) -> Result<DashboardData, ApiError> {
    let resp: DashboardResponse = client.get("/owner/dashboard").await?.data()?;
    Ok(resp.dashboard_data)
}

/// GET /owner/cars
pub async fn get_owner_cars(client: &ApiClient) -> Result<Vec<Car>, ApiError> {
    let resp: CarsResponse = client.get("/owner/cars").await?.data()?;
    Ok(resp.cars)
}

/// POST /owner/toggle-car
pub async fn toggle_car_availability(
    client: &ApiClient,
    car_id: &str,
) -> Result<MessageResponse, ApiError> {
    let body = CarIdRequest {
        car_id: car_id.to_string(),
    };
    client.post_json("/owner/toggle-car", &body).await?.data()
}

/// POST /owner/delete-car
pub async fn delete_car(client: &ApiClient, car_id: &str) -> Result<MessageResponse, ApiError> {
    let body = CarIdRequest {
        car_id: car_id.to_string(),
    };
    client.post_json("/owner/delete-car", &body).await?.data()
}

/// POST /owner/change-role
pub async fn change_role_to_owner(client: &ApiClient) -> Result<MessageResponse, ApiError> {
    client.post_empty("/owner/change-role").await?.data()
}

/// POST /owner/update-image as multipart with a single `image` part.
pub async fn update_user_image(
    client: &ApiClient,
    image: ImageUpload,
) -> Result<MessageResponse, ApiError> {
    client
        .post_multipart("/owner/update-image", vec![image.into_part()])
        .await?
        .data()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::navigation::LogNavigator;
    use crate::session::{MemoryStore, Session};

    fn owner_client(server: &MockServer) -> ApiClient {
        let store = Arc::new(MemoryStore::with_tokens(Some("A1"), Some("R1")));
        ApiClient::new(
            &Config::new(&server.uri()),
            Arc::new(Session::restore(store).unwrap()),
            Arc::new(LogNavigator),
        )
    }

    #[test]
    fn test_image_mime_guess() {
        assert_eq!(ImageUpload::from_bytes("car.PNG", vec![]).mime.as_deref(), Some("image/png"));
        assert_eq!(ImageUpload::from_bytes("car.jpeg", vec![]).mime.as_deref(), Some("image/jpeg"));
        assert_eq!(ImageUpload::from_bytes("car", vec![]).mime, None);
    }

    #[tokio::test]
    async fn test_toggle_car_sends_car_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/owner/toggle-car"))
            .and(header("authorization", "Bearer A1"))
            .and(body_json(json!({ "carId": "c1" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "message": "Availability Toggled" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resp = toggle_car_availability(&owner_client(&server), "c1").await.unwrap();
        assert_eq!(resp.message.as_deref(), Some("Availability Toggled"));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_add_car_sends_multipart_car_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/owner/add-car"))
            .and(body_string_contains("name=\"carData\""))
            .and(body_string_contains("\"brand\":\"Tesla\""))
            .and(body_string_contains("name=\"image\"; filename=\"model3.png\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "message": "Car Added" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let car = NewCar {
            brand: "Tesla".into(),
            model: "Model 3".into(),
            year: 2023,
            price_per_day: 120.0,
            ..Default::default()
        };
        let image = ImageUpload::from_bytes("model3.png", b"png-bytes".to_vec());
        let resp = add_car(&owner_client(&server), &car, Some(image)).await.unwrap();
        assert_eq!(resp.message.as_deref(), Some("Car Added"));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_owner_cars() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/owner/cars"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "cars": [
                    { "_id": "c1", "brand": "Kia", "model": "Rio", "isAvailable": true },
                    { "_id": "c2", "brand": "VW", "model": "Golf", "isAvailable": false }
                ]
            })))
            .mount(&server)
            .await;

        let cars = get_owner_cars(&owner_client(&server)).await.unwrap();
        assert_eq!(cars.len(), 2);
        assert!(!cars[1].is_available);
    }
}
