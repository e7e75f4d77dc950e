//! Command line arguments.

use std::path::PathBuf;

use carrental_client::api::types::BookingStatus;
use carrental_client::config::StoreKind;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "carrental", version, about = "Car rental marketplace client")]
pub struct Args {
    /// API base URL (overrides CARRENTAL_API_URL / VITE_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Token storage: file, keyring or memory
    #[arg(long, global = true)]
    pub store: Option<StoreKind>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Browse the public car listing
    Cars {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = carrental_client::services::user::DEFAULT_PAGE_SIZE)]
        limit: u32,
        /// Filter by brand, model, category or transmission
        #[arg(long)]
        search: Option<String>,
    },
    /// Find cars available at a location for a date range
    Availability {
        #[arg(long)]
        location: String,
        #[arg(long)]
        pickup: String,
        #[arg(long = "return")]
        return_date: String,
    },
    /// Book a car
    Book {
        car_id: String,
        #[arg(long)]
        pickup: String,
        #[arg(long = "return")]
        return_date: String,
    },
    /// List your bookings, or bookings of your cars with --owner
    Bookings {
        #[arg(long)]
        owner: bool,
    },
    /// Set the status of a booking on one of your cars
    BookingStatus {
        booking_id: String,
        status: BookingStatus,
    },
    /// Owner dashboard
    #[command(subcommand)]
    Owner(OwnerCommand),
    /// Email a password reset link
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the emailed reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Ask the assistant about our cars
    Chat { message: Vec<String> },
}

#[derive(Subcommand, Debug)]
pub enum OwnerCommand {
    /// List your cars
    Cars,
    /// Dashboard totals and recent bookings
    Dashboard,
    /// List a new car
    AddCar {
        #[arg(long)]
        brand: String,
        #[arg(long)]
        model: String,
        #[arg(long)]
        year: u32,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: String,
        #[arg(long)]
        transmission: String,
        #[arg(long)]
        fuel: String,
        #[arg(long)]
        seats: u32,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Toggle a car's availability
    Toggle { car_id: String },
    /// Delete a car
    Delete { car_id: String },
    /// Turn your account into an owner account
    Become,
    /// Upload a new profile image
    Image { path: PathBuf },
}
