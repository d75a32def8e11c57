use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch, OrderStatus};

impl Entity for Order {
    type Id = u64;
    type CreatePayload = OrderCreate;
    type Patch = OrderPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> u64 {
        self.id
    }

    /// New orders always start out pending. Quantity is taken as given.
    fn from_create(id: u64, payload: OrderCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            user_id: payload.user_id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            order_date: payload.order_date,
            status: OrderStatus::Pending,
        })
    }

    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
