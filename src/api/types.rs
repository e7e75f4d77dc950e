//! Request and response types for the car rental API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! Documents carry their id as `_id`; a couple of car fields are snake_case
//! on the wire and are renamed explicitly.

use serde::{Deserialize, Serialize};

/// Role marking a user as a car owner.
pub const OWNER_ROLE: &str = "OWNER";

/// Login request body sent to POST /user/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register request body sent to POST /user/register.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Token pair issued by login and register.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Refresh request body sent to POST /user/refresh.
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub token: String,
}

/// Refresh response: only a new access token, the refresh token is kept.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl User {
    /// Owners are identified by their primary (first) role.
    pub fn is_owner(&self) -> bool {
        self.role.first().map(String::as_str) == Some(OWNER_ROLE)
    }
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub owner: Option<String>,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub year: u32,
    #[serde(default)]
    pub price_per_day: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub transmission: String,
    #[serde(default, rename = "fuel_type")]
    pub fuel_type: String,
    #[serde(default, rename = "seating_capacity")]
    pub seating_capacity: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Pagination {
    pub total_pages: u32,
    pub current_page: u32,
    pub total_cars: u64,
}

/// Page of the public car listing from GET /user/cars.
#[derive(Debug, Deserialize)]
pub struct CarsPage {
    pub cars: Vec<Car>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize)]
pub struct CarsResponse {
    pub cars: Vec<Car>,
}

/// Listing details sent as the `carData` form field of POST /owner/add-car.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCar {
    pub brand: String,
    pub model: String,
    pub year: u32,
    pub price_per_day: f64,
    pub category: String,
    pub transmission: String,
    #[serde(rename = "fuel_type")]
    pub fuel_type: String,
    #[serde(rename = "seating_capacity")]
    pub seating_capacity: u32,
    pub location: String,
    pub description: String,
}

/// Body of toggle-car and delete-car.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarIdRequest {
    pub car_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// A booking's car is either populated or just its id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BookingCar {
    Populated(Box<Car>),
    Id(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub car: BookingCar,
    pub pickup_date: String,
    pub return_date: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BookingsResponse {
    pub bookings: Vec<Booking>,
}

/// Body of POST /bookings/change-status.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeStatusRequest {
    pub booking_id: String,
    pub status: BookingStatus,
}

/// Body of POST /bookings/check-availability.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub location: String,
    pub pickup_date: String,
    pub return_date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available_cars: Vec<Car>,
}

/// Body of POST /bookings/create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub car: String,
    pub pickup_date: String,
    pub return_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub total_cars: u64,
    pub total_bookings: u64,
    pub pending_bookings: u64,
    pub completed_bookings: u64,
    pub recent_bookings: Vec<Booking>,
    pub monthly_revenue: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub dashboard_data: DashboardData,
}

/// Responses that carry nothing but a status message.
#[derive(Debug, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ForgetPasswordRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}
