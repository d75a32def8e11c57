/// Custom actions for Product rows.
///
/// The catalog is immutable after seeding except for the stock flag, so
/// stock is the only thing an action can read or change.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the stock flag without modifying it.
    CheckStock,
    /// Sets the stock flag.
    SetStock(bool),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    /// Current stock flag
    StockLevel(bool),
    /// Previous stock flag
    StockChanged { was_in_stock: bool },
}
