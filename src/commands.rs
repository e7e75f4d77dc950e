//! Command handlers for the command line front end.
//!
//! Each handler performs one user action and returns the message for the
//! success notification. Listings are printed to stdout; failures come back
//! as the error text shown in the error notification.

use std::path::Path;

use carrental_client::api::types::{Booking, BookingCar, NewCar};
use carrental_client::catalog;
use carrental_client::services::owner::ImageUpload;
use carrental_client::services::{bookings, chat, owner, user};
use carrental_client::{AuthService, Config};

use crate::cli::{Command, OwnerCommand};

pub async fn run(command: Command, auth: &AuthService, config: &Config) -> Result<String, String> {
    let api = auth.api();
    match command {
        Command::Login { email, password } => {
            let message = auth.login(&email, &password).await.map_err(|e| e.to_string())?;
            Ok(message.unwrap_or_else(|| "Welcome back!".to_string()))
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            auth.register(&name, &email, &password)
                .await
                .map_err(|e| e.to_string())?;
            Ok("Account created successfully!".to_string())
        }
        Command::Logout => {
            auth.logout().await.map_err(|e| e.to_string())?;
            Ok("You have been logged out".to_string())
        }
        Command::Whoami => {
            require_login(auth).await?;
            let profile = auth.fetch_user().await.map_err(|e| e.to_string())?;
            let role = if profile.is_owner() { "owner" } else { "customer" };
            println!("{} <{}> ({})", profile.name, profile.email, role);
            println!("Session: {}", auth.session().state().await.label());
            Ok(format!("Logged in as {}", profile.name))
        }
        Command::Cars {
            page,
            limit,
            search,
        } => {
            let listing = user::get_cars(api, page, limit)
                .await
                .map_err(|e| e.to_string())?;
            let shown = catalog::filter_cars(&listing.cars, search.as_deref().unwrap_or(""));
            for car in &shown {
                println!("{}  {}", car.id, catalog::describe(car, &config.currency));
            }
            Ok(format!(
                "Page {} of {}: {} cars shown",
                page.max(1),
                listing.pagination.total_pages.max(1),
                shown.len()
            ))
        }
        Command::Availability {
            location,
            pickup,
            return_date,
        } => {
            let cars = bookings::check_availability(api, &location, &pickup, &return_date)
                .await
                .map_err(|e| e.to_string())?;
            for car in &cars {
                println!("{}  {}", car.id, catalog::describe(car, &config.currency));
            }
            if cars.is_empty() {
                return Err("No cars available".to_string());
            }
            Ok(format!("{} cars available", cars.len()))
        }
        Command::Book {
            car_id,
            pickup,
            return_date,
        } => {
            require_login(auth).await?;
            let resp = bookings::create_booking(api, &car_id, &pickup, &return_date)
                .await
                .map_err(|e| e.to_string())?;
            Ok(resp.message.unwrap_or_else(|| "Booking created".to_string()))
        }
        Command::Bookings { owner } => {
            require_login(auth).await?;
            let list = if owner {
                bookings::get_owner_bookings(api).await
            } else {
                bookings::get_user_bookings(api).await
            }
            .map_err(|e| e.to_string())?;
            for booking in &list {
                println!("{}", describe_booking(booking, &config.currency));
            }
            Ok(format!("{} bookings", list.len()))
        }
        Command::BookingStatus { booking_id, status } => {
            require_login(auth).await?;
            let resp = bookings::change_booking_status(api, &booking_id, status)
                .await
                .map_err(|e| e.to_string())?;
            Ok(resp.message.unwrap_or_else(|| "Status updated".to_string()))
        }
        Command::Owner(cmd) => {
            require_login(auth).await?;
            run_owner(cmd, auth, config).await
        }
        Command::ForgotPassword { email } => {
            let message = auth
                .request_password_reset(&email)
                .await
                .map_err(|e| e.to_string())?;
            Ok(message.unwrap_or_else(|| {
                "A password reset link has been sent to your email address.".to_string()
            }))
        }
        Command::ResetPassword {
            token,
            password,
            confirm,
        } => {
            let message = auth
                .reset_password(&token, &password, &confirm)
                .await
                .map_err(|e| e.to_string())?;
            Ok(message.unwrap_or_else(|| "Password reset successfully".to_string()))
        }
        Command::Chat { message } => {
            let reply = chat::send_chat_message(api, &message.join(" "))
                .await
                .map_err(|e| e.to_string())?;
            println!("{}", reply);
            Ok("Reply received".to_string())
        }
    }
}

async fn run_owner(cmd: OwnerCommand, auth: &AuthService, config: &Config) -> Result<String, String> {
    let api = auth.api();
    match cmd {
        OwnerCommand::Cars => {
            let cars = owner::get_owner_cars(api).await.map_err(|e| e.to_string())?;
            for car in &cars {
                println!("{}  {}", car.id, catalog::describe(car, &config.currency));
            }
            Ok(format!("{} cars listed", cars.len()))
        }
        OwnerCommand::Dashboard => {
            let data = owner::get_dashboard_data(api)
                .await
                .map_err(|e| e.to_string())?;
            println!("Total cars:         {}", data.total_cars);
            println!("Total bookings:     {}", data.total_bookings);
            println!("Pending bookings:   {}", data.pending_bookings);
            println!("Completed bookings: {}", data.completed_bookings);
            println!("Monthly revenue:    {}{}", config.currency, data.monthly_revenue);
            for booking in &data.recent_bookings {
                println!("  {}", describe_booking(booking, &config.currency));
            }
            Ok("Dashboard loaded".to_string())
        }
        OwnerCommand::AddCar {
            brand,
            model,
            year,
            price,
            category,
            transmission,
            fuel,
            seats,
            location,
            description,
            image,
        } => {
            let car = NewCar {
                brand,
                model,
                year,
                price_per_day: price,
                category,
                transmission,
                fuel_type: fuel,
                seating_capacity: seats,
                location,
                description,
            };
            let image = match image {
                Some(path) => Some(read_image(&path)?),
                None => None,
            };
            let resp = owner::add_car(api, &car, image)
                .await
                .map_err(|e| e.to_string())?;
            Ok(resp.message.unwrap_or_else(|| "Car added".to_string()))
        }
        OwnerCommand::Toggle { car_id } => {
            let resp = owner::toggle_car_availability(api, &car_id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(resp.message.unwrap_or_else(|| "Availability toggled".to_string()))
        }
        OwnerCommand::Delete { car_id } => {
            let resp = owner::delete_car(api, &car_id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(resp.message.unwrap_or_else(|| "Car removed".to_string()))
        }
        OwnerCommand::Become => {
            let profile = auth.become_owner().await.map_err(|e| e.to_string())?;
            Ok(format!("{} can now list cars", profile.name))
        }
        OwnerCommand::Image { path } => {
            let image = read_image(&path)?;
            let resp = owner::update_user_image(api, image)
                .await
                .map_err(|e| e.to_string())?;
            Ok(resp.message.unwrap_or_else(|| "Image updated".to_string()))
        }
    }
}

/// Fail early when there is no session, instead of sending a bare request.
async fn require_login(auth: &AuthService) -> Result<(), String> {
    if auth.session().is_authenticated().await {
        Ok(())
    } else {
        Err("You are not logged in. Run `carrental login` first.".to_string())
    }
}

fn read_image(path: &Path) -> Result<ImageUpload, String> {
    let bytes = std::fs::read(path)
        .map_err(|e| format!("Failed to read image {}: {}", path.display(), e))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image");
    Ok(ImageUpload::from_bytes(file_name, bytes))
}

fn describe_booking(booking: &Booking, currency: &str) -> String {
    let car = match &booking.car {
        BookingCar::Populated(car) => format!("{} {}", car.brand, car.model),
        BookingCar::Id(id) => id.clone(),
    };
    format!(
        "{}  {}  {} → {}  {}{}  {:?}",
        booking.id, car, booking.pickup_date, booking.return_date, currency, booking.price, booking.status
    )
}
