//! Rule lists for every products route.
//!
//! Each request type below declares its rules in order. The
//! [`Validated`](axum_helpers::Validated) extractor runs all of them and
//! rejects the request with 400 before the handler if any fail.

use axum_helpers::{AppError, RequestFields, Rule, ValidatedRequest, rules};

use crate::models::{CreateProduct, UpdateProduct};

const INVALID_ID: &str = "Invalid ID";

/// `GET`, `PATCH` and `DELETE /{id}`
pub const ID_RULES: &[Rule] = &[Rule::path("id", rules::is_int, INVALID_ID)];

/// `POST /`
pub const CREATE_RULES: &[Rule] = &[
    Rule::body("name", rules::not_blank, "Product name is required"),
    Rule::body("price", rules::is_numeric, "Invalid price value"),
    Rule::body("price", rules::not_empty, "Product price is required"),
    Rule::body("price", rules::is_positive, "Price must be greater than zero"),
];

/// `PUT /{id}`
pub const UPDATE_RULES: &[Rule] = &[
    Rule::path("id", rules::is_int, INVALID_ID),
    Rule::body("name", rules::not_blank, "Product name is required"),
    Rule::body("price", rules::is_numeric, "Invalid price value"),
    Rule::body("price", rules::not_empty, "Product price is required"),
    Rule::body("price", rules::is_positive, "Price must be greater than zero"),
    Rule::body("availability", rules::is_boolean, "Invalid availability value"),
];

/// Integer product id taken from the path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductId(pub i32);

impl ValidatedRequest for ProductId {
    const RULES: &'static [Rule] = ID_RULES;

    fn from_fields(fields: RequestFields) -> Result<Self, AppError> {
        fields.path_param("id").map(ProductId)
    }
}

impl ValidatedRequest for CreateProduct {
    const RULES: &'static [Rule] = CREATE_RULES;

    fn from_fields(fields: RequestFields) -> Result<Self, AppError> {
        fields.body_as()
    }
}

/// Path id plus the full replacement body of `PUT /{id}`
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub id: i32,
    pub input: UpdateProduct,
}

impl ValidatedRequest for ProductUpdate {
    const RULES: &'static [Rule] = UPDATE_RULES;

    fn from_fields(fields: RequestFields) -> Result<Self, AppError> {
        Ok(Self {
            id: fields.path_param("id")?,
            input: fields.body_as()?,
        })
    }
}
