use crate::actor_framework::Entity;
use crate::domain::Product;
use super::actions::{ProductAction, ProductActionResult};

impl Entity for Product {
    type Id = u64;
    type CreatePayload = Product;
    type Patch = ();
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> u64 {
        self.id
    }

    /// Products exist only as seed rows; no client sends `Create`.
    fn from_create(id: u64, payload: Product) -> Result<Self, String> {
        Ok(Self { id, ..payload })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::StockLevel(self.in_stock)),
            ProductAction::SetStock(in_stock) => {
                let was_in_stock = self.in_stock;
                self.in_stock = in_stock;
                Ok(ProductActionResult::StockChanged { was_in_stock })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_takes_allocated_id() {
        let payload = Product::new(0, "Stapler", 12.5, "Stationery");
        let created = Product::from_create(5, payload).unwrap();
        assert_eq!(created.id, 5);
        assert_eq!(created.name, "Stapler");
    }

    #[test]
    fn test_set_stock_reports_previous_flag() {
        let mut notebook = Product::new(4, "Notebook", 4.99, "Stationery").out_of_stock();
        let result = notebook.handle_action(ProductAction::SetStock(true)).unwrap();
        assert_eq!(result, ProductActionResult::StockChanged { was_in_stock: false });
        assert_eq!(
            notebook.handle_action(ProductAction::CheckStock).unwrap(),
            ProductActionResult::StockLevel(true)
        );
    }
}
