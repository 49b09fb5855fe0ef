use rust_decimal::Decimal;

/// Decimal places for all stored currency amounts
pub const SCALE: u32 = 2;

/// Rounds an amount to cent precision (banker's rounding)
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(SCALE)
}

/// Absorbed difference allowed when deciding that a sale is fully paid.
/// Payments are entered by hand, so exact equality is too strict.
pub fn settlement_tolerance() -> Decimal {
    Decimal::new(1, SCALE) // 0.01
}

/// Whether `paid` settles `total` within the cent tolerance
pub fn is_settled(paid: Decimal, total: Decimal) -> bool {
    total - paid <= settlement_tolerance()
}

/// Validates that an amount is non-negative and carries at most cent precision
pub fn validate_amount(amount: Decimal) -> std::result::Result<(), String> {
    if amount < Decimal::ZERO {
        return Err("amount cannot be negative".to_string());
    }

    if amount.scale() > SCALE {
        return Err(format!(
            "amounts must have at most {} decimal places, got {}",
            SCALE,
            amount.scale()
        ));
    }

    Ok(())
}

/// Formats an amount for receipts and messages
pub fn format_amount(amount: Decimal) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_cents() {
        // 33.333... rounds to 33.33
        assert_eq!(round(Decimal::new(333333, 4)), Decimal::new(3333, 2));
        // 10.005 rounds to 10.00 (banker's rounding)
        assert_eq!(round(Decimal::new(10005, 3)), Decimal::new(1000, 2));
    }

    #[test]
    fn test_is_settled_within_tolerance() {
        let total = Decimal::new(10000, 2); // 100.00
        assert!(is_settled(Decimal::new(10000, 2), total));
        assert!(is_settled(Decimal::new(9999, 2), total)); // 99.99
        assert!(!is_settled(Decimal::new(9998, 2), total)); // 99.98
        // Overpayment still counts as settled
        assert!(is_settled(Decimal::new(10001, 2), total));
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(Decimal::new(1050, 2)).is_ok());
        assert!(validate_amount(Decimal::ZERO).is_ok());
        assert!(validate_amount(Decimal::new(-1, 2)).is_err());
        assert!(validate_amount(Decimal::new(10001, 3)).is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(2050, 2)), "$20.50");
        assert_eq!(format_amount(Decimal::new(20, 0)), "$20.00");
    }
}
