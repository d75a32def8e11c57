use chrono::Local;
use tracing::{debug, error, info, instrument};
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};
use crate::order_actor::OrderError;
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::clients::{UserClient, ProductClient};

/// Client for interacting with the Order actor.
///
/// Order creation is orchestrated here: the user and product are checked
/// through their own clients before the order table is touched.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    user_client: UserClient,
    product_client: ProductClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        user_client: UserClient,
        product_client: ProductClient,
    ) -> Self {
        Self {
            inner,
            user_client,
            product_client,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_user_orders(&self, user_id: u64) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        Ok(self.inner.list_where(move |o| o.user_id == user_id).await?)
    }

    /// Places a pending order dated today.
    ///
    /// Stock is not decremented and the quantity is not validated.
    #[instrument(skip(self))]
    pub async fn create_order(&self, user_id: u64, product_id: u64, quantity: u32) -> Result<Order, OrderError> {
        info!("Processing create_order request");

        // Step 1: Validate user
        match self.user_client.get_user(user_id).await {
            Ok(Some(user)) => info!(user_name = %user.name, "User validation successful"),
            Ok(None) => {
                error!("User not found");
                return Err(OrderError::InvalidUser(user_id));
            }
            Err(e) => {
                error!(error = %e, "User validation failed");
                return Err(OrderError::ActorCommunicationError(e.to_string()));
            }
        }

        // Step 2: Validate product
        let product = match self.product_client.get_product(product_id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                error!("Product not found");
                return Err(OrderError::InvalidProduct(product_id));
            }
            Err(e) => {
                error!(error = %e, "Product validation failed");
                return Err(OrderError::ActorCommunicationError(e.to_string()));
            }
        };

        // Step 3: Check stock
        if !product.in_stock {
            error!(product_name = %product.name, "Product out of stock");
            return Err(OrderError::OutOfStock(product_id));
        }
        info!(product_name = %product.name, "Product validation successful");

        // Step 4: Create order in ResourceActor
        let payload = OrderCreate {
            user_id,
            product_id,
            quantity,
            order_date: Local::now().date_naive(),
        };
        let order = self.inner.create(payload).await?;
        info!(order_id = order.id, "Order created");
        Ok(order)
    }

    /// Returns `false` if the order does not exist.
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, order_id: u64, status: OrderStatus) -> Result<bool, OrderError> {
        debug!("Sending request");
        match self.inner.update(order_id, OrderPatch { status: Some(status) }).await {
            Ok(_) => Ok(true),
            Err(FrameworkError::NotFound(_)) => {
                debug!("Order not found");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl_client_methods!(OrderClient, Order, OrderError, order);
