//! # mock-shop
//!
//! An in-memory shop (users, products, orders) for wiring into agent tool
//! examples, with the settings and logging plumbing those examples share.
//!
//! ## Layout
//!
//! - **Domain types** - plain rows → [`domain::User`], [`domain::Product`], [`domain::Order`]
//! - **Actor framework** - one generic actor per table → [`actor_framework::ResourceActor`]
//! - **Clients** - typed, instrumented handles → [`clients::UserClient`], [`clients::ProductClient`], [`clients::OrderClient`]
//! - **Store** - startup, seeding and shutdown → [`app_system::MockStore`]
//! - **Settings** - `.env` + environment → [`config::Settings`]
//! - **Logging** - tracing setup and key-value events → [`app_system::setup_tracing`], [`logger::Logger`]
//! - **Tools** - store-backed tool functions → [`tools`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use mock_shop::app_system::MockStore;
//! use mock_shop::domain::OrderStatus;
//!
//! let store = MockStore::new();
//! let order = store.order_client.create_order(1, 1, 2).await?;
//! store.order_client.update_order_status(order.id, OrderStatus::Shipped).await?;
//! store.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod logger;
pub mod order_actor;
pub mod product_actor;
pub mod tools;
pub mod user_actor;

#[cfg(test)]
mod mock_framework;
