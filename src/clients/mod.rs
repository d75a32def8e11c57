//! Typed handles over the table actors.

#[macro_use]
mod macros;
mod user_client;
mod product_client;
mod order_client;

pub use user_client::UserClient;
pub use product_client::ProductClient;
pub use order_client::OrderClient;
