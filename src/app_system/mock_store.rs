use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};
use crate::actor_framework::{Entity, ResourceActor, ResourceClient};
use crate::app_system::seed;
use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::domain::{Order, Product, User};

const BUFFER_SIZE: usize = 32;

/// The in-memory shop: one actor per table plus the clients that talk to them.
///
/// Each table is serialized by its own actor. Operations spanning tables
/// (order creation) are not transactional.
pub struct MockStore {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

/// Spawns one table actor. IDs continue after the largest seeded ID.
fn spawn_table<T: Entity<Id = u64>>(
    seed: Vec<T>,
) -> (ResourceClient<T>, JoinHandle<()>) {
    let first_id = seed.iter().map(|item| item.id()).max().unwrap_or(0) + 1;
    let counter = Arc::new(AtomicU64::new(first_id));
    let next_id = move || counter.fetch_add(1, Ordering::SeqCst);

    let (actor, client) = ResourceActor::<T>::new(BUFFER_SIZE, next_id);
    let handle = tokio::spawn(actor.with_seed(seed).run());
    (client, handle)
}

impl MockStore {
    /// Starts the store with the fixed sample users, products and orders.
    /// Must be called from within a tokio runtime.
    #[instrument(name = "mock_store")]
    pub fn new() -> Self {
        info!("Starting seeded mock store");
        Self::start(seed::users(), seed::products(), seed::orders())
    }

    /// Starts a store with no rows.
    #[instrument(name = "mock_store")]
    pub fn empty() -> Self {
        info!("Starting empty mock store");
        Self::start(Vec::new(), Vec::new(), Vec::new())
    }

    fn start(
        users: Vec<User>,
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> Self {
        // Sub-tables first, the order client depends on both.
        let (users, user_handle) = spawn_table(users);
        let user_client = UserClient::new(users);

        let (products, product_handle) = spawn_table(products);
        let product_client = ProductClient::new(products);

        let (orders, order_handle) = spawn_table(orders);
        let order_client = OrderClient::new(orders, user_client.clone(), product_client.clone());

        info!("Mock store started");
        Self {
            user_client,
            product_client,
            order_client,
            handles: vec![user_handle, product_handle, order_handle],
        }
    }

    /// Drops this store's clients and waits for the actors to drain.
    ///
    /// Actors only stop once every clone of their client is gone, so clones
    /// handed out earlier (for example inside a tool context) must be dropped
    /// first or this waits for them.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down mock store");

        drop(self.order_client);
        drop(self.user_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Mock store shutdown complete");
        Ok(())
    }
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}
