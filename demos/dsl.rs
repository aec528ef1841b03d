use policygraph::condition::ITEM_VALUE;
use policygraph::{Context, PolicyGraph};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let dsl = r#"
# Damage claims
clause POL-SHIP-005 (precedence 2):
    title "Damage Claims High Value"
    category "Shipping Policy"
    rule "Damaged items over $500: Photo required before replacement approved"
    when item_over_500
    modifies POL-SHIP-006

clause POL-SHIP-006 (precedence 4):
    title "Damage Claims Standard"
    category "Shipping Policy"
    rule "Damaged items under $500: Immediate replacement authorized"
    modified_by POL-SHIP-005
"#;

    let graph = PolicyGraph::from_dsl(dsl).expect("failed to parse policy");
    println!("{}", graph.render());
    println!();

    for value in [120_i64, 900] {
        let ctx = Context::new().set(ITEM_VALUE, value);
        let active = graph
            .applicable("POL-SHIP-006", &ctx, 2)
            .expect("clause exists");
        println!("item_value {value}: {active:?}");
    }

    println!();
    let text = graph.to_dsl().expect("parsed graphs are writable");
    print!("{text}");
}
