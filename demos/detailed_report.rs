use policygraph::condition::{DAYS_SINCE_PURCHASE, HAS_RECEIPT};
use policygraph::{presets, Context, DEFAULT_MAX_HOPS};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let graph = presets::retail().expect("retail preset should compile");

    let mut candidates = vec!["POL-RETURN-001"];
    candidates.extend(
        graph
            .related("POL-RETURN-001", DEFAULT_MAX_HOPS)
            .expect("clause exists"),
    );

    for days in [10_i64, 45] {
        let ctx = Context::new()
            .set(DAYS_SINCE_PURCHASE, days)
            .set(HAS_RECEIPT, true);
        let report = graph
            .resolve_detailed(&candidates, &ctx)
            .expect("candidates exist");

        println!("Day {days}: {report}");
        println!();
    }

    println!("{}", graph.summary());
}
