//! Tools that need no context.

/// Applies a percentage discount to a price.
pub fn calculate_discount(price: f64, discount_percent: f64) -> String {
    if !(0.0..=100.0).contains(&discount_percent) {
        return "Invalid discount percentage. Must be between 0 and 100.".to_string();
    }
    let discount_amount = price * (discount_percent / 100.0);
    let final_price = price - discount_amount;
    format!(
        "Original price: ${:.2}\nDiscount: {}% (${:.2})\nFinal price: ${:.2}",
        price, discount_percent, discount_amount, final_price
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount() {
        let out = calculate_discount(200.0, 25.0);
        assert!(out.contains("Discount: 25% ($50.00)"));
        assert!(out.ends_with("Final price: $150.00"));
    }

    #[test]
    fn test_discount_out_of_range() {
        assert!(calculate_discount(10.0, 120.0).starts_with("Invalid discount"));
        assert!(calculate_discount(10.0, -1.0).starts_with("Invalid discount"));
    }
}
