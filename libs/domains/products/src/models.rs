use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;
use validator::Validate;

/// A product record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// System-assigned identifier
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor")]
    pub name: String,
    /// Always greater than zero
    #[schema(example = 300.0)]
    pub price: f64,
    pub availability: bool,
}

impl Product {
    /// Overwrites every mutable field
    pub fn apply_update(&mut self, input: UpdateProduct) {
        self.name = input.name;
        self.price = input.price;
        self.availability = input.availability;
    }

    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
    }
}

/// DTO for creating a product. New products are always available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100, message = "Product name must be 1 to 100 characters"))]
    #[schema(example = "Monitor", min_length = 1, max_length = 100)]
    pub name: String,

    /// Accepts a number or a numeric string
    #[serde(deserialize_with = "deserialize_price")]
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    #[schema(example = 300.0, exclusive_minimum = 0.0)]
    pub price: f64,
}

/// DTO for a full update. Every field is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100, message = "Product name must be 1 to 100 characters"))]
    #[schema(example = "Monitor 27\"", min_length = 1, max_length = 100)]
    pub name: String,

    /// Accepts a number or a numeric string
    #[serde(deserialize_with = "deserialize_price")]
    #[validate(range(exclusive_min = 0.0, message = "Price must be greater than zero"))]
    #[schema(example = 349.99, exclusive_minimum = 0.0)]
    pub price: f64,

    pub availability: bool,
}

/// Confirmation returned by a successful delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDeleted {
    #[schema(example = "Product deleted")]
    pub message: String,
}

impl Default for ProductDeleted {
    fn default() -> Self {
        Self {
            message: "Product deleted".to_string(),
        }
    }
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(n) => Ok(n),
        RawPrice::Text(s) => s
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| de::Error::custom(format!("invalid price value '{}'", s))),
    }
}
