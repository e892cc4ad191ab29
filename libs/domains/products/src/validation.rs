//! Payload checks for create and update.
//!
//! Every rule is evaluated; one [`FieldError`](axum_helpers::FieldError) is
//! reported per offending field, ordered by field name. A value of the wrong
//! JSON type breaks its field's rule like any other bad value.

use std::borrow::Cow;

use axum_helpers::field_errors;
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, NewProduct, ProductChanges, UpdateProduct};

const NAME_REQUIRED: &str = "Name is required";
const CATEGORY_REQUIRED: &str = "Category is required";
const PRICE_POSITIVE: &str = "Price must be greater than 0";

/// `name` must be a non-empty string.
pub fn validate_name(value: &Value) -> Result<(), ValidationError> {
    non_empty_text(value, NAME_REQUIRED)
}

/// `category` must be a non-empty string.
pub fn validate_category(value: &Value) -> Result<(), ValidationError> {
    non_empty_text(value, CATEGORY_REQUIRED)
}

/// `price` must be a number greater than 0.
pub fn validate_price(value: &Value) -> Result<(), ValidationError> {
    match value.as_f64() {
        Some(price) if price > 0.0 => Ok(()),
        _ => Err(invalid("price", PRICE_POSITIVE)),
    }
}

fn non_empty_text(value: &Value, message: &'static str) -> Result<(), ValidationError> {
    match value.as_str() {
        Some(text) if !text.is_empty() => Ok(()),
        _ => Err(invalid("required", message)),
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

fn number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Check a create payload and turn it into a storable [`NewProduct`].
///
/// `inStock` defaults to 0.
pub fn validate_create(input: CreateProduct) -> ProductResult<NewProduct> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(field_errors(&e)))?;

    let (Some(name), Some(category), Some(price)) = (
        text(input.name.as_ref()),
        text(input.category.as_ref()),
        number(input.price.as_ref()),
    ) else {
        return Err(ProductError::Internal(
            "required field missing after validation".to_string(),
        ));
    };

    Ok(NewProduct {
        name,
        category,
        description: input.description,
        price,
        in_stock: input.in_stock.unwrap_or(0),
        image_url: input.image_url,
    })
}

/// Check the fields present in a partial update and type them.
pub fn validate_update(input: UpdateProduct) -> ProductResult<ProductChanges> {
    input
        .validate()
        .map_err(|e| ProductError::Validation(field_errors(&e)))?;

    Ok(ProductChanges {
        name: text(input.name.as_ref()),
        category: text(input.category.as_ref()),
        description: input.description,
        price: number(input.price.as_ref()),
        in_stock: input.in_stock,
        image_url: input.image_url,
    })
}
