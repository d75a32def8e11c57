use chrono::Timelike;
use serde_json::json;
use crate::logger::get_logger;
use crate::order_actor::OrderError;
use super::{ToolContext, ToolError};

const OPENING_HOUR: u32 = 9;
const CLOSING_HOUR: u32 = 17;

/// Information about the current user.
pub async fn get_my_info(ctx: &ToolContext) -> Result<String, ToolError> {
    let log = get_logger("tools.account");
    log.info("getting_user_info", json!({ "user_id": ctx.current_user_id, "is_admin": ctx.is_admin }));

    let Some(user) = ctx.users.get_user(ctx.current_user_id).await? else {
        log.warning("user_not_found", json!({ "user_id": ctx.current_user_id }));
        return Ok("User information not found".to_string());
    };
    let admin = if ctx.is_admin { " (Admin)" } else { "" };
    Ok(format!(
        "Name: {}{}\nEmail: {}\nAccount created: {}\nSession ID: {}",
        user.name,
        admin,
        user.email,
        user.created_at.format("%Y-%m-%d"),
        ctx.session_id,
    ))
}

/// Order history of the current user, newest last.
pub async fn get_my_orders(ctx: &ToolContext) -> Result<String, ToolError> {
    let log = get_logger("tools.account");
    log.info("getting_user_orders", json!({ "user_id": ctx.current_user_id }));

    let orders = ctx.orders.list_user_orders(ctx.current_user_id).await?;
    if orders.is_empty() {
        return Ok("You have no orders yet.".to_string());
    }
    log.info("orders_retrieved", json!({ "user_id": ctx.current_user_id, "order_count": orders.len() }));

    let mut result = format!("You have {} order(s):\n", orders.len());
    for order in &orders {
        let product_name = ctx
            .products
            .get_product(order.product_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| "Unknown".to_string());
        let days_ago = (ctx.now.date() - order.order_date).num_days();
        let when = if days_ago > 0 {
            format!("{} days ago", days_ago)
        } else {
            "today".to_string()
        };
        result.push_str(&format!(
            "- Order #{}: {}x {} ({}) - {}\n",
            order.id, order.quantity, product_name, order.status, when
        ));
    }
    Ok(result)
}

/// Places an order for the current user.
pub async fn place_order(ctx: &ToolContext, product_id: u64, quantity: u32) -> Result<String, ToolError> {
    let log = get_logger("tools.account");
    log.info(
        "placing_order",
        json!({ "user_id": ctx.current_user_id, "product_id": product_id, "quantity": quantity }),
    );

    let order = match ctx.orders.create_order(ctx.current_user_id, product_id, quantity).await {
        Ok(order) => order,
        Err(OrderError::InvalidUser(user_id)) => {
            log.error("order_failed_user_not_found", json!({ "user_id": user_id }));
            return Ok("Error: User not found".to_string());
        }
        Err(OrderError::InvalidProduct(product_id)) => {
            log.warning("order_failed_product_not_found", json!({ "product_id": product_id }));
            return Ok(format!("Error: Product {} does not exist.", product_id));
        }
        Err(OrderError::OutOfStock(product_id)) => {
            log.warning("order_failed_out_of_stock", json!({ "product_id": product_id }));
            return Ok("Error: Could not create order. Product is out of stock.".to_string());
        }
        Err(e) => return Err(e.into()),
    };

    let product_name = ctx
        .products
        .get_product(product_id)
        .await?
        .map(|p| p.name)
        .unwrap_or_else(|| "Unknown".to_string());
    log.info("order_placed_successfully", json!({ "order": order, "product_name": product_name }));
    Ok(format!(
        "Order placed successfully!\nOrder ID: {}\nProduct: {}\nQuantity: {}\nStatus: {}",
        order.id, product_name, order.quantity, order.status
    ))
}

/// Whether customer service is open at `ctx.now`.
pub fn check_business_hours(ctx: &ToolContext) -> String {
    let hour = ctx.now.hour();
    let is_available = (OPENING_HOUR..CLOSING_HOUR).contains(&hour);
    get_logger("tools.account").info("checking_business_hours", json!({ "hour": hour, "is_available": is_available }));

    let time = ctx.now.format("%H:%M");
    if is_available {
        format!("Customer service is available now! Current time: {}", time)
    } else {
        format!(
            "Customer service hours are 9 AM - 5 PM. Current time: {}. \
             Please leave a message or try again during business hours.",
            time
        )
    }
}

/// Admin-only view of any user.
pub async fn admin_view_user(ctx: &ToolContext, user_id: u64) -> Result<String, ToolError> {
    let log = get_logger("tools.account");
    log.info("admin_viewing_user", json!({ "admin_user_id": ctx.current_user_id, "target_user_id": user_id }));

    if !ctx.is_admin {
        log.warning("admin_access_denied", json!({ "user_id": ctx.current_user_id }));
        return Ok("Error: This function requires admin privileges".to_string());
    }
    let Some(user) = ctx.users.get_user(user_id).await? else {
        log.warning("admin_view_user_not_found", json!({ "user_id": user_id }));
        return Ok(format!("User with ID {} not found", user_id));
    };
    let orders = ctx.orders.list_user_orders(user_id).await?;
    Ok(format!(
        "[ADMIN VIEW]\nUser ID: {}\nName: {}\nEmail: {}\nTotal Orders: {}\nAccount Status: {}",
        user.id,
        user.name,
        user.email,
        orders.len(),
        if user.is_active { "Active" } else { "Inactive" },
    ))
}
