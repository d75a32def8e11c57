//! Store-backed tool functions.
//!
//! Each function takes its dependencies through [`ToolContext`] and renders
//! a human-readable answer. Misses (unknown product, out of stock, ...) are
//! answers, not errors; only a broken store yields [`ToolError`].

mod account;
mod catalog;
mod plain;

pub use account::*;
pub use catalog::*;
pub use plain::*;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;
use crate::app_system::MockStore;
use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ToolError {
    #[error("Store unavailable: {0}")]
    Store(String),
}

impl From<UserError> for ToolError {
    fn from(err: UserError) -> Self {
        ToolError::Store(err.to_string())
    }
}

impl From<ProductError> for ToolError {
    fn from(err: ProductError) -> Self {
        ToolError::Store(err.to_string())
    }
}

impl From<OrderError> for ToolError {
    fn from(err: OrderError) -> Self {
        ToolError::Store(err.to_string())
    }
}

/// Dependencies injected into every tool call.
#[derive(Clone)]
pub struct ToolContext {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub current_user_id: u64,
    pub now: NaiveDateTime,
    pub is_admin: bool,
    pub session_id: String,
}

impl ToolContext {
    pub fn new(store: &MockStore, current_user_id: u64) -> Self {
        Self {
            users: store.user_client.clone(),
            products: store.product_client.clone(),
            orders: store.order_client.clone(),
            current_user_id,
            now: Local::now().naive_local(),
            is_admin: false,
            session_id: "unknown".to_string(),
        }
    }

    pub fn admin(mut self) -> Self {
        self.is_admin = true;
        self
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Pins the clock, mostly for tests.
    pub fn at(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }
}
