use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    /// National ID or tax number, free-form
    pub id_document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CustomerPayload {
    pub first_name: String,
    pub last_name: Option<String>,
    pub id_document: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let customer = Customer {
            id: 1,
            first_name: "Ana".to_string(),
            last_name: Some("Pérez".to_string()),
            id_document: None,
            phone: None,
            email: None,
            address: None,
            city: None,
        };
        assert_eq!(customer.full_name(), "Ana Pérez");

        let no_last = Customer {
            last_name: None,
            ..customer
        };
        assert_eq!(no_last.full_name(), "Ana");
    }
}
