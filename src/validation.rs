//! Client-side input checks that run before any network call.

use thiserror::Error;

/// Minimum accepted password length for register and reset.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter your {0}.")]
    EmptyField(&'static str),

    #[error("Password must be at least {min} characters long.")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Invalid date '{0}', expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Return date must not be before the pickup date.")]
    ReturnBeforePickup,
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Checks a new password and its confirmation, length first.
pub fn new_password(value: &str, confirm: &str) -> Result<(), ValidationError> {
    password(value)?;
    if value != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date into a sortable `(year, month, day)` tuple.
fn parse_date(value: &str) -> Result<(u32, u32, u32), ValidationError> {
    let invalid = || ValidationError::InvalidDate(value.to_string());
    let mut parts = value.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    if y.len() != 4 || m.len() != 2 || d.len() != 2 {
        return Err(invalid());
    }
    let year: u32 = y.parse().map_err(|_| invalid())?;
    let month: u32 = m.parse().map_err(|_| invalid())?;
    let day: u32 = d.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(invalid());
    }
    Ok((year, month, day))
}

/// Pickup and return dates for a booking or availability search.
pub fn date_range(pickup: &str, ret: &str) -> Result<(), ValidationError> {
    require("pickup date", pickup)?;
    require("return date", ret)?;
    if parse_date(ret)? < parse_date(pickup)? {
        return Err(ValidationError::ReturnBeforePickup);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("email", "a@b.c").is_ok());
        assert_eq!(require("email", "   "), Err(ValidationError::EmptyField("email")));
    }

    #[test]
    fn test_password_length() {
        assert!(password("secret").is_ok());
        assert_eq!(
            password("12345"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_new_password_checks_length_before_mismatch() {
        assert_eq!(
            new_password("123", "456"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
        assert_eq!(
            new_password("secret1", "secret2"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(new_password("secret1", "secret1").is_ok());
    }

    #[test]
    fn test_date_range() {
        assert!(date_range("2025-06-01", "2025-06-01").is_ok());
        assert!(date_range("2025-06-01", "2025-06-05").is_ok());
        assert_eq!(
            date_range("2025-06-05", "2025-06-01"),
            Err(ValidationError::ReturnBeforePickup)
        );
        assert_eq!(
            date_range("2025-13-01", "2025-06-01"),
            Err(ValidationError::InvalidDate("2025-13-01".into()))
        );
        assert_eq!(
            date_range("", "2025-06-01"),
            Err(ValidationError::EmptyField("pickup date"))
        );
    }
}
