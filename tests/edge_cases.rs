use policygraph::condition::{
    DAYS_SINCE_PURCHASE, HAS_RECEIPT, ITEM_VALUE, MONTHS_SINCE_PURCHASE, ORDER_STATUS,
};
use policygraph::{
    ConfigurationError, Context, OrderStatus, Outcome, PolicyGraphBuilder, QueryError,
    RelationKind, Value, DEFAULT_MAX_HOPS,
};

#[test]
fn single_clause_graph() {
    let graph = PolicyGraphBuilder::new()
        .clause("only", |c| c.title("Only").rule("Always"))
        .build()
        .unwrap();

    assert_eq!(graph.resolve(&["only"], &Context::new()).unwrap(), vec!["only"]);
    assert!(graph.related("only", DEFAULT_MAX_HOPS).unwrap().is_empty());
}

#[test]
fn empty_graph() {
    let graph = PolicyGraphBuilder::new().build().unwrap();
    assert!(graph.is_empty());
    assert!(graph.resolve(&[], &Context::new()).unwrap().is_empty());
    assert_eq!(graph.render(), "");
    assert_eq!(
        graph.related("x", 1),
        Err(QueryError::NotFound { id: "x".into() })
    );
}

#[test]
fn deep_chain_respects_hop_limit() {
    // c0 -> c1 -> ... -> c25
    let mut builder = PolicyGraphBuilder::new();
    for i in 0..26 {
        let next = format!("c{}", i + 1);
        builder = builder.clause(&format!("c{i}"), move |c| {
            if i < 25 {
                c.requires(&next)
            } else {
                c
            }
        });
    }
    let graph = builder.build().unwrap();

    assert_eq!(graph.related("c0", 3).unwrap(), vec!["c1", "c2", "c3"]);
    assert_eq!(graph.related("c0", 100).unwrap().len(), 25);
    assert_eq!(graph.related("c0", 100).unwrap().last(), Some(&"c25"));
}

#[test]
fn dangling_reference_names_relation() {
    let result = PolicyGraphBuilder::new()
        .clause("RETURN-002", |c| c.overridden_by("RETURN-009"))
        .build();
    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::DanglingReference {
            clause: "RETURN-002".into(),
            relation: RelationKind::OverriddenBy,
            target: "RETURN-009".into(),
        }
    );
}

#[test]
fn dangling_reference_message() {
    let err = PolicyGraphBuilder::new()
        .clause("a", |c| c.modifies("ghost"))
        .build()
        .unwrap_err();
    assert_eq!(err.to_string(), "clause 'a' modifies unknown clause 'ghost'");
}

#[test]
fn empty_id_rejected() {
    let result = PolicyGraphBuilder::new().clause("", |c| c).build();
    assert_eq!(result.unwrap_err(), ConfigurationError::EmptyClauseId);
}

#[test]
fn self_reference_allowed() {
    let graph = PolicyGraphBuilder::new()
        .clause("loop", |c| c.interacts_with("loop").overrides("loop"))
        .build()
        .unwrap();
    assert!(graph.related("loop", 5).unwrap().is_empty());
    assert_eq!(graph.resolve(&["loop"], &Context::new()).unwrap(), vec!["loop"]);
}

#[test]
fn self_override_keeps_clause_active() {
    let graph = PolicyGraphBuilder::new()
        .clause("a", |c| c.precedence(1).overrides("a").overrides("b"))
        .clause("b", |c| c.precedence(2))
        .build()
        .unwrap();
    let report = graph.resolve_detailed(&["b", "a"], &Context::new()).unwrap();
    assert_eq!(report.active(), &["a"]);
    assert_eq!(report.outcome("a"), Some(&Outcome::Active));
    assert_eq!(
        report.outcome("b"),
        Some(&Outcome::Overridden { by: "a".into() })
    );
}

#[test]
fn duplicate_candidates_collapse() {
    let graph = PolicyGraphBuilder::new()
        .clause("a", |c| c.precedence(2))
        .clause("b", |c| c.precedence(1))
        .build()
        .unwrap();
    let active = graph
        .resolve(&["a", "a", "b", "a", "b"], &Context::new())
        .unwrap();
    assert_eq!(active, vec!["b", "a"]);
}

#[test]
fn negative_precedence_beats_zero() {
    let graph = PolicyGraphBuilder::new()
        .clause("zero", |c| c.precedence(0))
        .clause("neg", |c| c.precedence(-3).overrides("zero"))
        .build()
        .unwrap();
    assert_eq!(
        graph.resolve(&["zero", "neg"], &Context::new()).unwrap(),
        vec!["neg"]
    );
}

#[test]
fn return_window_boundary() {
    let graph = PolicyGraphBuilder::new()
        .clause("window", |c| c.when("within_return_window"))
        .build()
        .unwrap();
    let day = |d: i64| Context::new().set(DAYS_SINCE_PURCHASE, d);
    assert_eq!(graph.check_conditions("window", &day(30)), Ok(true));
    assert_eq!(graph.check_conditions("window", &day(31)), Ok(false));
    assert_eq!(graph.check_conditions("window", &Context::new()), Ok(true));
}

#[test]
fn float_facts_compare_against_integer_limits() {
    let graph = PolicyGraphBuilder::new()
        .clause("high", |c| c.when("item_over_500"))
        .clause("warranty", |c| c.when("warranty_period"))
        .build()
        .unwrap();
    let value = |v: f64| Context::new().set(ITEM_VALUE, v);
    assert_eq!(graph.check_conditions("high", &value(500.0)), Ok(false));
    assert_eq!(graph.check_conditions("high", &value(500.5)), Ok(true));

    let months = Context::new().set(MONTHS_SINCE_PURCHASE, 12.5);
    assert_eq!(graph.check_conditions("warranty", &months), Ok(false));
}

#[test]
fn wrongly_typed_fact_uses_default() {
    let graph = PolicyGraphBuilder::new()
        .clause("window", |c| c.when("within_return_window"))
        .clause("high", |c| c.when("item_over_500"))
        .build()
        .unwrap();
    let ctx = Context::new()
        .set(DAYS_SINCE_PURCHASE, "forty")
        .set(ITEM_VALUE, Value::Bool(true));
    assert_eq!(graph.check_conditions("window", &ctx), Ok(true));
    assert_eq!(graph.check_conditions("high", &ctx), Ok(false));
}

#[test]
fn receipt_truthiness() {
    let graph = PolicyGraphBuilder::new()
        .clause("receipt", |c| c.when("receipt_required"))
        .build()
        .unwrap();
    let with = |v: Value| Context::new().set(HAS_RECEIPT, v);
    assert_eq!(graph.check_conditions("receipt", &Context::new()), Ok(true));
    assert_eq!(graph.check_conditions("receipt", &with(true.into())), Ok(true));
    assert_eq!(graph.check_conditions("receipt", &with(false.into())), Ok(false));
    assert_eq!(graph.check_conditions("receipt", &with(0_i64.into())), Ok(false));
    assert_eq!(graph.check_conditions("receipt", &with("".into())), Ok(false));
    assert_eq!(graph.check_conditions("receipt", &with("yes".into())), Ok(true));
}

#[test]
fn order_status_strings() {
    let graph = PolicyGraphBuilder::new()
        .clause("change", |c| c.when("order_not_shipped"))
        .build()
        .unwrap();
    for (status, expected) in [
        (OrderStatus::Pending, true),
        (OrderStatus::Processing, true),
        (OrderStatus::Shipped, false),
        (OrderStatus::Delivered, false),
        (OrderStatus::Returned, true),
    ] {
        let ctx = Context::new().set(ORDER_STATUS, status);
        assert_eq!(
            graph.check_conditions("change", &ctx),
            Ok(expected),
            "failed for {status}"
        );
    }
    let raw = Context::new().set(ORDER_STATUS, "delivered");
    assert_eq!(graph.check_conditions("change", &raw), Ok(false));
}

#[test]
fn every_condition_must_hold() {
    let graph = PolicyGraphBuilder::new()
        .clause("both", |c| c.when("within_return_window").when("receipt_required"))
        .build()
        .unwrap();
    let ctx = Context::new()
        .set(DAYS_SINCE_PURCHASE, 5_i64)
        .set(HAS_RECEIPT, false);
    let report = graph.resolve_detailed(&["both"], &ctx).unwrap();
    assert!(report.active().is_empty());
    assert!(matches!(
        report.outcome("both"),
        Some(Outcome::ConditionFailed { condition }) if condition.name() == "receipt_required"
    ));
}

#[test]
fn large_candidate_set() {
    let mut builder = PolicyGraphBuilder::new();
    let ids: Vec<String> = (0..200).map(|i| format!("c{i:03}")).collect();
    for (i, id) in ids.iter().enumerate() {
        let prev = if i > 0 { Some(ids[i - 1].clone()) } else { None };
        builder = builder.clause(id, move |c| {
            let c = c.precedence(i32::try_from(i % 7).unwrap());
            match &prev {
                Some(p) if i % 2 == 0 => c.overrides(p),
                _ => c,
            }
        });
    }
    let graph = builder.build().unwrap();
    let candidates: Vec<&str> = ids.iter().map(String::as_str).collect();
    let active = graph.resolve(&candidates, &Context::new()).unwrap();
    assert!(!active.is_empty());
    assert!(active.len() < 200);
}
