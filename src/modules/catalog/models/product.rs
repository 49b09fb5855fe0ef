use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::product_type::FieldKind;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub product_type_id: i64,
    pub created_at: NaiveDateTime,
}

/// Stored attribute value joined with its definition, for product views
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttributeValue {
    pub attribute_id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub field_kind: FieldKind,
    pub value: String,
}

/// Product with its attribute values
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub attributes: Vec<AttributeValue>,
}

// Request payloads

#[derive(Debug, Deserialize)]
pub struct AttributeValueInput {
    pub attribute_id: i64,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    pub product_type_id: i64,
    #[serde(default)]
    pub attributes: Vec<AttributeValueInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i32,
    #[serde(default)]
    pub attributes: Vec<AttributeValueInput>,
}
