use serde_json::json;
use tracing::{error, info, Instrument};
use mock_shop::app_system::{setup_tracing, MockStore};
use mock_shop::config::Settings;
use mock_shop::domain::OrderStatus;
use mock_shop::logger::{get_logger, Logger};
use mock_shop::tools::{self, ToolContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Missing OPENAI_API_KEY stops here.
    let settings = Settings::global()?;
    setup_tracing(settings)?;

    info!(settings = ?settings, "Starting mock shop walkthrough");
    let log = get_logger("mock_shop");

    let store = MockStore::new();
    let ctx = ToolContext::new(&store, 1).with_session("demo_session");

    let span = tracing::info_span!("customer_request");
    let outcome = Logger::scope(async {
        Logger::bind_context(json!({ "request_id": "req_001", "user_id": ctx.current_user_id }));

        log.info("tool_output", json!({ "tool": "get_my_info", "output": tools::get_my_info(&ctx).await? }));
        log.info("tool_output", json!({ "tool": "search_products", "output": tools::search_products(&ctx, "laptop").await? }));
        log.info("tool_output", json!({ "tool": "place_order", "output": tools::place_order(&ctx, 1, 2).await? }));
        log.info("tool_output", json!({ "tool": "place_order", "output": tools::place_order(&ctx, 4, 1).await? }));
        log.info("tool_output", json!({ "tool": "get_my_orders", "output": tools::get_my_orders(&ctx).await? }));
        log.info("tool_output", json!({ "tool": "check_business_hours", "output": tools::check_business_hours(&ctx) }));
        log.info("tool_output", json!({ "tool": "calculate_discount", "output": tools::calculate_discount(999.99, 15.0) }));

        Logger::clear_context();
        Ok::<_, tools::ToolError>(())
    })
    .instrument(span)
    .await;

    if let Err(e) = &outcome {
        log.exception("walkthrough_failed", e, json!({}));
    }

    match store.order_client.update_order_status(1, OrderStatus::Shipped).await {
        Ok(updated) => info!(updated, "Order 1 marked shipped"),
        Err(e) => error!(error = %e, "Status update failed"),
    }

    drop(ctx);
    store.shutdown().await?;

    info!("Walkthrough completed");
    outcome.map_err(Into::into)
}
