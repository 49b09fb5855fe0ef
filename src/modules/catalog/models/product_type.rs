// Product types and their attribute definitions.
//
// A product type declares which extra fields its products carry (e.g. a
// "Shoes" type with Size and Color). Each definition is typed: free text, a
// number, or a selection from a fixed option list. Values live in a generic
// per-product storage table keyed by (product, attribute).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Kind of value an attribute accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Short free text
    Text,
    /// Decimal number
    Number,
    /// One of a fixed list of options
    Selection,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Selection => "selection",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for FieldKind {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.as_str() {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "selection" => Ok(Self::Selection),
            _ => Err(format!("Invalid field kind: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductType {
    pub id: i64,
    pub name: String,
}

/// Attribute declared by a product type
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttributeDef {
    pub id: i64,
    pub product_type_id: i64,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub field_kind: FieldKind,
    /// Options, populated for Selection attributes
    #[sqlx(skip)]
    #[serde(default)]
    pub options: Vec<AttributeOption>,
}

impl AttributeDef {
    /// Check a raw value against this attribute's kind
    pub fn validate_value(&self, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(AppError::validation(format!(
                "Attribute '{}' requires a value",
                self.name
            )));
        }

        match self.field_kind {
            FieldKind::Text => Ok(()),
            FieldKind::Number => {
                value.parse::<rust_decimal::Decimal>().map_err(|_| {
                    AppError::validation(format!(
                        "Attribute '{}' expects a numeric value, got '{}'",
                        self.name, value
                    ))
                })?;
                Ok(())
            }
            FieldKind::Selection => {
                if self.options.iter().any(|o| o.value == value) {
                    Ok(())
                } else {
                    Err(AppError::validation(format!(
                        "'{}' is not a valid option for attribute '{}'",
                        value, self.name
                    )))
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AttributeOption {
    pub id: i64,
    pub attribute_id: i64,
    pub value: String,
}

/// Product type with its attribute definitions
#[derive(Debug, Clone, Serialize)]
pub struct ProductTypeDetail {
    pub id: i64,
    pub name: String,
    pub attributes: Vec<AttributeDef>,
}

// Request payloads

#[derive(Debug, Deserialize)]
pub struct CreateProductTypeRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAttributeRequest {
    pub name: String,
    pub field_kind: FieldKind,
}

#[derive(Debug, Deserialize)]
pub struct CreateOptionRequest {
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection_attr(options: &[&str]) -> AttributeDef {
        AttributeDef {
            id: 1,
            product_type_id: 1,
            name: "Size".to_string(),
            field_kind: FieldKind::Selection,
            options: options
                .iter()
                .enumerate()
                .map(|(i, v)| AttributeOption {
                    id: i as i64 + 1,
                    attribute_id: 1,
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_text_accepts_anything_nonempty() {
        let attr = AttributeDef {
            id: 1,
            product_type_id: 1,
            name: "Material".to_string(),
            field_kind: FieldKind::Text,
            options: vec![],
        };

        assert!(attr.validate_value("leather").is_ok());
        assert!(attr.validate_value("  ").is_err());
    }

    #[test]
    fn test_number_requires_decimal() {
        let attr = AttributeDef {
            id: 1,
            product_type_id: 1,
            name: "Weight".to_string(),
            field_kind: FieldKind::Number,
            options: vec![],
        };

        assert!(attr.validate_value("12.5").is_ok());
        assert!(attr.validate_value("heavy").is_err());
    }

    #[test]
    fn test_selection_must_match_option() {
        let attr = selection_attr(&["S", "M", "L"]);

        assert!(attr.validate_value("M").is_ok());
        assert!(attr.validate_value("XL").is_err());
    }
}
