use serde::Serialize;

/// Represents a product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
    pub description: Option<String>,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: f64, category: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            in_stock: true,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    /// Case-insensitive substring match against name or description.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

/// Filter for catalog listings. The default matches every product.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub in_stock_only: bool,
}

impl ProductFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            in_stock_only: false,
        }
    }

    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        // An empty category string filters nothing.
        let category_ok = match self.category.as_deref() {
            Some(c) if !c.is_empty() => product.category.to_lowercase() == c.to_lowercase(),
            _ => true,
        };
        category_ok && (!self.in_stock_only || product.in_stock)
    }
}
