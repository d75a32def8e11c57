use std::collections::BTreeSet;
use tracing::{debug, instrument};
use crate::domain::{Product, ProductFilter};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use crate::actor_framework::{FrameworkError, ResourceClient};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

impl ProductClient {
    /// Catalog listing in insertion order. `ProductFilter::default()` lists everything.
    #[instrument(skip(self))]
    pub async fn list_products(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list_where(move |p| filter.matches(p)).await?)
    }

    /// Case-insensitive substring search over name and description.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let query = query.to_string();
        Ok(self.inner.list_where(move |p| p.matches_query(&query)).await?)
    }

    /// Sorted, de-duplicated category names.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, ProductError> {
        debug!("Sending request");
        let categories: BTreeSet<String> = self
            .inner
            .list()
            .await?
            .into_iter()
            .map(|p| p.category)
            .collect();
        Ok(categories.into_iter().collect())
    }

    /// Stock flag of a product, `None` if it does not exist.
    #[instrument(skip(self))]
    pub async fn is_in_stock(&self, id: u64) -> Result<Option<bool>, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await {
            Ok(ProductActionResult::StockLevel(in_stock)) => Ok(Some(in_stock)),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
            Err(FrameworkError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Sets the stock flag. Returns `false` if the product does not exist.
    #[instrument(skip(self))]
    pub async fn set_in_stock(&self, id: u64, in_stock: bool) -> Result<bool, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::SetStock(in_stock)).await {
            Ok(ProductActionResult::StockChanged { .. }) => Ok(true),
            Ok(other) => Err(ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", other))),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
