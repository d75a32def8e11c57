//! Fixed sample rows every seeded store starts with.

use crate::domain::{Order, OrderStatus, Product, User};

pub fn users() -> Vec<User> {
    vec![
        User::new(1, "Alice Johnson", "alice@example.com"),
        User::new(2, "Bob Smith", "bob@example.com"),
        User::new(3, "Charlie Brown", "charlie@example.com"),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        Product::new(1, "Laptop", 999.99, "Electronics")
            .with_description("High-performance laptop for professionals"),
        Product::new(2, "Desk Chair", 299.99, "Furniture")
            .with_description("Ergonomic office chair"),
        Product::new(3, "Coffee Maker", 79.99, "Appliances")
            .with_description("Automatic drip coffee maker"),
        Product::new(4, "Notebook", 4.99, "Stationery").out_of_stock(),
    ]
}

pub fn orders() -> Vec<Order> {
    vec![
        Order::new(1, 1, 1, 1, OrderStatus::Completed),
        Order::new(2, 2, 3, 2, OrderStatus::Shipped),
        Order::new(3, 1, 2, 1, OrderStatus::Pending),
    ]
}
