use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unknown order status: {0}")]
pub struct ParseOrderStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(ParseOrderStatusError(s.to_string())),
        }
    }
}

/// Represents a customer order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: u64,
    pub user_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub order_date: NaiveDate,
    pub status: OrderStatus,
}

/// Payload for creating a new order. References are validated by the
/// order client before the payload reaches the order table.
#[derive(Debug)]
pub struct OrderCreate {
    pub user_id: u64,
    pub product_id: u64,
    pub quantity: u32,
    pub order_date: NaiveDate,
}

/// Payload for updating an existing order.
#[derive(Debug)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
}

impl Order {
    pub fn new(id: u64, user_id: u64, product_id: u64, quantity: u32, status: OrderStatus) -> Self {
        Self {
            id,
            user_id,
            product_id,
            quantity,
            order_date: chrono::Local::now().date_naive(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_case_insensitively() {
        assert_eq!("Shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(" pending ".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!("canceled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "lost".parse::<OrderStatus>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown order status: lost");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
        assert_eq!(OrderStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn test_order_as_log_field() {
        let mut order = Order::new(4, 1, 3, 2, OrderStatus::Pending);
        order.order_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let value = serde_json::json!({ "order": order });
        assert_eq!(
            value["order"],
            serde_json::json!({
                "id": 4,
                "user_id": 1,
                "product_id": 3,
                "quantity": 2,
                "order_date": "2024-01-15",
                "status": "pending",
            })
        );
    }
}
