//! Reusable OpenAPI response types for consistent API documentation.

use super::{ErrorResponse, ValidationErrorResponse};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({ "message": "Something went wrong!" })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - one entry per invalid field",
    content_type = "application/json",
    example = json!({
        "errors": [
            { "category": "Category is required" },
            { "name": "Name is required" },
            { "price": "Price must be greater than 0" }
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request",
    content_type = "application/json",
    example = json!({ "message": "Name query param is required" })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "message": "Product not found" })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Unauthorized - API key missing or invalid",
    content_type = "application/json",
    example = json!({ "message": "Unauthorized: Invalid API key" })
)]
pub struct UnauthorizedResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({ "message": "Service is temporarily unavailable" })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
