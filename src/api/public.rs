//! Endpoints that never carry credentials and never trigger a refresh.

/// Path fragments of the public endpoints. A request path is public when it
/// contains any of them.
///
/// `/user/cars` is the public listing; the owner's own listing lives under
/// `/owner/cars` and does not match.
pub const PUBLIC_ENDPOINTS: &[&str] = &[
    "/user/login",
    "/user/register",
    "/user/refresh",
    "/user/cars",
    "/user/forget-password",
];

pub fn is_public(path: &str) -> bool {
    PUBLIC_ENDPOINTS.iter().any(|p| path.contains(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_endpoints() {
        assert!(is_public("/user/login"));
        assert!(is_public("/user/register"));
        assert!(is_public("/user/refresh"));
        assert!(is_public("/user/forget-password"));
        assert!(is_public("/user/cars?page=2&limit=6"));
    }

    #[test]
    fn test_protected_endpoints() {
        assert!(!is_public("/user/data"));
        assert!(!is_public("/user/reset-password"));
        assert!(!is_public("/owner/cars"));
        assert!(!is_public("/bookings/user"));
        assert!(!is_public("/chat"));
    }
}
