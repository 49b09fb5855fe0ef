use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Product line on a sale.
///
/// `unit_price` is a snapshot taken when the line is added; later catalog
/// price changes never affect recorded sales.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LineItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Line item joined with the product name, for sale views
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct LineItemDetail {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl LineItemDetail {
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtotal() {
        let item = LineItem {
            id: 1,
            sale_id: 1,
            product_id: 1,
            quantity: 3,
            unit_price: Decimal::new(1250, 2), // 12.50
        };

        assert_eq!(item.subtotal(), Decimal::new(3750, 2)); // 37.50
    }
}
