//! Booking endpoints under `/bookings`.

use crate::api::types::{
    AvailabilityRequest, AvailabilityResponse, Booking, BookingStatus, BookingsResponse, Car,
    ChangeStatusRequest, CreateBookingRequest, MessageResponse,
};
use crate::api::ApiClient;
use crate::error::ApiError;
use crate::validation;

/// GET /bookings/user
pub async fn get_user_bookings(client: &ApiClient) -> Result<Vec<Booking>, ApiError> {
    let resp: BookingsResponse = client.get("/bookings/user").await?.data()?;
    Ok(resp.bookings)
}

/// GET /bookings/owner
pub async fn get_owner_bookings(client: &ApiClient) -> Result<Vec<Booking>, ApiError> {
    let resp: BookingsResponse = client.get("/bookings/owner").await?.data()?;
    Ok(resp.bookings)
}

/// POST /bookings/change-status
pub async fn change_booking_status(
    client: &ApiClient,
    booking_id: &str,
    status: BookingStatus,
) -> Result<MessageResponse, ApiError> {
    let body = ChangeStatusRequest {
        booking_id: booking_id.to_string(),
        status,
    };
    client.post_json("/bookings/change-status", &body).await?.data()
}

/// POST /bookings/check-availability
///
/// Dates are checked locally first; a bad range never reaches the server.
pub async fn check_availability(
    client: &ApiClient,
    location: &str,
    pickup_date: &str,
    return_date: &str,
) -> Result<Vec<Car>, ApiError> {
    validation::require("pickup location", location)?;
    validation::date_range(pickup_date, return_date)?;
    let body = AvailabilityRequest {
        location: location.to_string(),
        pickup_date: pickup_date.to_string(),
        return_date: return_date.to_string(),
    };
    let resp: AvailabilityResponse = client
        .post_json("/bookings/check-availability", &body)
        .await?
        .data()?;
    Ok(resp.available_cars)
}

/// POST /bookings/create
pub async fn create_booking(
    client: &ApiClient,
    car_id: &str,
    pickup_date: &str,
    return_date: &str,
) -> Result<MessageResponse, ApiError> {
    validation::date_range(pickup_date, return_date)?;
    let body = CreateBookingRequest {
        car: car_id.to_string(),
        pickup_date: pickup_date.to_string(),
        return_date: return_date.to_string(),
    };
    client.post_json("/bookings/create", &body).await?.data()
}
