use policygraph::condition::{DAYS_SINCE_PURCHASE, HAS_RECEIPT};
use policygraph::{Context, PolicyGraphBuilder};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Define clauses
    let graph = PolicyGraphBuilder::new()
        .clause("RETURN-001", |c| {
            c.title("Return Window")
                .category("Return Policy")
                .rule("30-day return window from delivery date")
                .precedence(3)
                .when("within_return_window")
                .when("receipt_required")
        })
        .clause("RETURN-002", |c| {
            c.title("Restocking Fee")
                .category("Return Policy")
                .rule("Opened items: 15% restocking fee")
                .precedence(4)
                .overridden_by("RETURN-004")
        })
        .clause("RETURN-004", |c| {
            c.title("Defective Items")
                .category("Return Policy")
                .rule("Defective items: full refund, no restocking fee")
                .precedence(1)
                .when("within_return_window")
                .overrides("RETURN-002")
        })
        .build()
        .expect("failed to build policy graph");

    println!("{graph}");

    // Resolve against a case
    let ctx = Context::new()
        .set(DAYS_SINCE_PURCHASE, 10_i64)
        .set(HAS_RECEIPT, true);

    let active = graph
        .resolve(&["RETURN-001", "RETURN-002", "RETURN-004"], &ctx)
        .expect("unknown clause");
    println!("Active: {active:?}");
}
