use serde_json::json;
use std::cmp::Ordering;
use crate::domain::{Product, ProductFilter};
use crate::logger::get_logger;
use super::{ToolContext, ToolError};

fn stock_label(product: &Product) -> &'static str {
    if product.in_stock {
        "In stock"
    } else {
        "Out of stock"
    }
}

/// Search for products by name or description.
pub async fn search_products(ctx: &ToolContext, query: &str) -> Result<String, ToolError> {
    let products = ctx.products.search_products(query).await?;
    get_logger("tools.catalog").info("products_searched", json!({ "query": query, "hits": products.len() }));

    if products.is_empty() {
        return Ok(format!("No products found matching '{}'", query));
    }
    let lines: Vec<String> = products
        .iter()
        .map(|p| format!("- {} (${}) - {} - {}", p.name, p.price, p.category, stock_label(p)))
        .collect();
    Ok(format!("Found products:\n{}", lines.join("\n")))
}

pub async fn get_product_details(ctx: &ToolContext, product_id: u64) -> Result<String, ToolError> {
    let log = get_logger("tools.catalog");
    let Some(product) = ctx.products.get_product(product_id).await? else {
        log.warning("product_not_found", json!({ "product_id": product_id }));
        return Ok(format!("Product with ID {} not found", product_id));
    };
    log.debug("product_details", json!({ "product": product }));
    let status = if product.in_stock { "Available" } else { "Out of stock" };
    Ok(format!(
        "Product: {}\nPrice: ${}\nCategory: {}\nStatus: {}\nDescription: {}",
        product.name,
        product.price,
        product.category,
        status,
        product.description.as_deref().unwrap_or("No description available"),
    ))
}

pub async fn get_product_price(ctx: &ToolContext, product_id: u64) -> Result<String, ToolError> {
    Ok(match ctx.products.get_product(product_id).await? {
        Some(product) => format!("${}", product.price),
        None => format!("Product {} not found", product_id),
    })
}

pub async fn list_categories(ctx: &ToolContext) -> Result<String, ToolError> {
    let categories = ctx.products.list_categories().await?;
    let lines: Vec<String> = categories.iter().map(|c| format!("- {}", c)).collect();
    Ok(format!("Available categories:\n{}", lines.join("\n")))
}

/// Products in a category, optionally only those in stock.
pub async fn browse_category(ctx: &ToolContext, category: &str, in_stock_only: bool) -> Result<String, ToolError> {
    let mut filter = ProductFilter::category(category);
    filter.in_stock_only = in_stock_only;
    let products = ctx.products.list_products(filter).await?;
    if products.is_empty() {
        return Ok(format!("No products in category '{}'", category));
    }
    let lines: Vec<String> = products
        .iter()
        .map(|p| format!("- {} (${}) - {}", p.name, p.price, stock_label(p)))
        .collect();
    Ok(format!("{}:\n{}", category, lines.join("\n")))
}

/// Top three products by price, standing in for order statistics.
pub async fn get_popular_products(ctx: &ToolContext) -> Result<String, ToolError> {
    let mut products = ctx.products.list_products(ProductFilter::default()).await?;
    products.sort_by(|a, b| b.price.partial_cmp(&a.price).unwrap_or(Ordering::Equal));
    let lines: Vec<String> = products
        .iter()
        .take(3)
        .map(|p| format!("- {} (${})", p.name, p.price))
        .collect();
    Ok(format!("Top products:\n{}", lines.join("\n")))
}
