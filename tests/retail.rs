use policygraph::condition::{
    DAYS_SINCE_PURCHASE, HAS_RECEIPT, ITEM_VALUE, MONTHS_SINCE_PURCHASE,
};
use policygraph::{presets, Complexity, Context, Outcome, DEFAULT_MAX_HOPS};

#[test]
fn related_clauses_of_return_window() {
    let graph = presets::retail().unwrap();
    assert_eq!(
        graph.related("POL-RETURN-001", 1).unwrap(),
        vec![
            "POL-RETURN-002",
            "POL-RETURN-003",
            "POL-RETURN-004",
            "POL-HOLIDAY-001",
        ]
    );
    assert!(graph.related("POL-COMM-001", DEFAULT_MAX_HOPS).unwrap().is_empty());
}

#[test]
fn outside_window_scenario_denies_return() {
    let graph = presets::retail().unwrap();
    let catalog = presets::retail_scenarios(&graph).unwrap();
    let scenario = catalog.get("RETURN-001").unwrap();

    let ctx = Context::new()
        .set(DAYS_SINCE_PURCHASE, 45_i64)
        .set(HAS_RECEIPT, true)
        .set("item_condition", "unopened");
    assert!(scenario.requirements_met(&ctx));

    let active = scenario
        .applicable_clauses(&graph, &ctx, DEFAULT_MAX_HOPS)
        .unwrap();
    assert!(!active.contains(&"POL-RETURN-001"));
    assert!(active.contains(&"POL-HOLIDAY-001"));
}

#[test]
fn warranty_exclusion_beats_defect_coverage() {
    let graph = presets::retail().unwrap();
    let ctx = Context::new().set(MONTHS_SINCE_PURCHASE, 6_i64);
    let report = graph
        .resolve_detailed(
            &["POL-WARRANTY-001", "POL-WARRANTY-002", "POL-WARRANTY-003"],
            &ctx,
        )
        .unwrap();
    assert_eq!(report.active(), &["POL-WARRANTY-003", "POL-WARRANTY-001"]);
    assert_eq!(
        report.outcome("POL-WARRANTY-002"),
        Some(&Outcome::Overridden {
            by: "POL-WARRANTY-003".into()
        })
    );

    let expired = Context::new().set(MONTHS_SINCE_PURCHASE, 13_i64);
    let active = graph
        .applicable("POL-WARRANTY-001", &expired, DEFAULT_MAX_HOPS)
        .unwrap();
    assert!(active.is_empty());
}

#[test]
fn high_value_escalation() {
    let graph = presets::retail().unwrap();
    let cheap = Context::new().set(ITEM_VALUE, 500_i64);
    let pricey = Context::new().set(ITEM_VALUE, 1200.0);
    assert_eq!(graph.check_conditions("POL-COMM-002", &cheap), Ok(false));
    assert_eq!(graph.check_conditions("POL-COMM-002", &pricey), Ok(true));
}

#[test]
fn catalog_metadata() {
    let graph = presets::retail().unwrap();
    let catalog = presets::retail_scenarios(&graph).unwrap();

    let shipping = catalog.templates_for("shipping_issue");
    assert_eq!(shipping.len(), 4);
    assert_eq!(shipping[2].id, "SHIP-003");
    assert_eq!(shipping[2].complexity, Complexity::Complex);
    assert_eq!(shipping[2].expected_outcome, "conditional");

    for query_type in catalog.query_types() {
        for template in catalog.templates_for(query_type) {
            assert!(graph.contains(&template.primary_clause), "{}", template.id);
        }
    }
}

#[test]
fn rendered_document_layout() {
    let text = presets::retail().unwrap().render();
    assert!(text.starts_with(
        "\nReturn Policy\n=============\n\n[POL-RETURN-001] Return Window\nRule: ALL items: 30-day"
    ));
    assert!(text.ends_with("[POL-COMM-002] Escalation\nRule: Escalation: Available for orders over $1000"));
    assert!(text.contains("\n\nShipping Policy\n===============\n"));
    assert!(!text.contains("within_return_window"));
}

#[test]
fn summary_of_retail_graph() {
    let summary = presets::retail().unwrap().summary();
    assert_eq!(summary.clauses, 19);
    assert_eq!(
        summary.isolated,
        vec!["POL-SHIP-001", "POL-SHIP-004", "POL-ORDER-001", "POL-COMM-001", "POL-COMM-002"]
    );
}
