//! Client-facing error messages.

pub const INTERNAL_ERROR: &str = "Something went wrong!";
pub const UNAUTHORIZED: &str = "Unauthorized: Invalid API key";
pub const ROUTE_NOT_FOUND: &str = "The requested resource was not found";
