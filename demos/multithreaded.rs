use std::sync::Arc;
use std::thread;

use policygraph::condition::{DAYS_SINCE_PURCHASE, HAS_RECEIPT};
use policygraph::{presets, Context, DEFAULT_MAX_HOPS};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = Arc::new(presets::retail().expect("retail preset should compile"));
    let catalog = Arc::new(presets::retail_scenarios(&graph).expect("scenarios should validate"));

    let handles: Vec<_> = ["return_request", "shipping_issue", "warranty_claim", "billing"]
        .into_iter()
        .map(|query_type| {
            let graph = Arc::clone(&graph);
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                let ctx = Context::new()
                    .set(DAYS_SINCE_PURCHASE, 20_i64)
                    .set(HAS_RECEIPT, true);
                let mut lines = Vec::new();
                for template in catalog.templates_for(query_type) {
                    let active = template
                        .applicable_clauses(&graph, &ctx, DEFAULT_MAX_HOPS)
                        .expect("primary clause exists");
                    lines.push(format!("{query_type}/{}: {active:?}", template.id));
                }
                lines
            })
        })
        .collect();

    for handle in handles {
        for line in handle.join().expect("thread panicked") {
            println!("{line}");
        }
    }
}
