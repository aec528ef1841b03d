//! Ready-made retail customer-service policy and matching scenario catalog.

use crate::condition::{DAYS_SINCE_PURCHASE, HAS_RECEIPT, ITEM_VALUE, MONTHS_SINCE_PURCHASE};
use crate::{
    Complexity, ConfigurationError, FactRequirement, PolicyGraph, PolicyGraphError,
    ScenarioCatalog, ScenarioTemplate, Value,
};

/// The retail policy document in DSL form.
pub const RETAIL_POLICY: &str = include_str!("../policies/retail.policy");

/// Query type used when a lookup names one the catalog does not know.
pub const DEFAULT_QUERY_TYPE: &str = "return_request";

/// Compile the retail policy: returns, shipping, warranty, price match,
/// order changes, the holiday extension and service standards.
///
/// # Errors
///
/// Returns [`PolicyGraphError`] if the embedded document fails to parse or
/// validate.
pub fn retail() -> Result<PolicyGraph, PolicyGraphError> {
    PolicyGraph::from_dsl(RETAIL_POLICY)
}

fn between(low: i64, high: i64) -> FactRequirement {
    FactRequirement::Between(low, high)
}

fn equals(value: impl Into<Value>) -> FactRequirement {
    FactRequirement::Equals(value.into())
}

/// Scenario templates for the retail policy, grouped by query type.
///
/// # Errors
///
/// Returns [`ConfigurationError`] if `graph` lacks one of the retail
/// clauses the scenarios start from.
pub fn retail_scenarios(graph: &PolicyGraph) -> Result<ScenarioCatalog, ConfigurationError> {
    ScenarioCatalog::builder(DEFAULT_QUERY_TYPE)
        .template(
            "return_request",
            ScenarioTemplate::new("RETURN-001", "return_outside_window", "POL-RETURN-001")
                .description("Customer wants to return item outside 30-day window")
                .expect("deny")
                .require(DAYS_SINCE_PURCHASE, between(31, 90))
                .require(HAS_RECEIPT, equals(true))
                .require("item_condition", equals("unopened")),
        )
        .template(
            "return_request",
            ScenarioTemplate::new("RETURN-002", "return_opened_item", "POL-RETURN-002")
                .description("Customer wants to return opened electronic item within window")
                .expect("approve_with_fee")
                .complexity(Complexity::Moderate)
                .require(DAYS_SINCE_PURCHASE, between(10, 25))
                .require(HAS_RECEIPT, equals(true))
                .require("item_condition", equals("opened")),
        )
        .template(
            "return_request",
            ScenarioTemplate::new("RETURN-003", "return_defective_item", "POL-RETURN-004")
                .description("Customer received defective item")
                .expect("approve")
                .complexity(Complexity::Moderate)
                .require(DAYS_SINCE_PURCHASE, between(1, 20))
                .require(HAS_RECEIPT, equals(true))
                .require("item_condition", equals("defective")),
        )
        .template(
            "return_request",
            ScenarioTemplate::new("RETURN-004", "return_no_receipt", "POL-RETURN-001")
                .description("Customer wants to return item without receipt")
                .expect("deny")
                .require(DAYS_SINCE_PURCHASE, between(5, 15))
                .require(HAS_RECEIPT, equals(false))
                .require("item_condition", equals("unopened")),
        )
        .template(
            "return_request",
            ScenarioTemplate::new("RETURN-005", "return_holiday_extended", "POL-HOLIDAY-001")
                .description("Customer returning holiday purchase within extended window")
                .expect("approve")
                .complexity(Complexity::Complex)
                .require(DAYS_SINCE_PURCHASE, between(35, 44))
                .require("purchase_month", between(11, 12))
                .require(HAS_RECEIPT, equals(true))
                .require("item_condition", equals("unopened")),
        )
        .template(
            "shipping_issue",
            ScenarioTemplate::new("SHIP-001", "package_not_received", "POL-SHIP-002")
                .description("Customer never received package marked as delivered")
                .expect("investigate")
                .complexity(Complexity::Moderate)
                .require("days_since_delivery", between(1, 7))
                .require("tracking_status", equals("delivered"))
                .require(ITEM_VALUE, between(50, 1000)),
        )
        .template(
            "shipping_issue",
            ScenarioTemplate::new("SHIP-002", "wrong_item_received", "POL-SHIP-004")
                .description("Customer received different product than ordered")
                .expect("approve")
                .require("days_since_delivery", between(1, 3))
                .require(ITEM_VALUE, between(20, 800)),
        )
        .template(
            "shipping_issue",
            ScenarioTemplate::new("SHIP-003", "damaged_high_value", "POL-SHIP-005")
                .description("High-value item arrived damaged")
                .expect("conditional")
                .complexity(Complexity::Complex)
                .require("days_since_delivery", between(1, 2))
                .require(ITEM_VALUE, between(501, 2000)),
        )
        .template(
            "shipping_issue",
            ScenarioTemplate::new("SHIP-004", "damaged_standard_value", "POL-SHIP-006")
                .description("Standard-value item arrived damaged")
                .expect("approve")
                .require("days_since_delivery", between(1, 3))
                .require(ITEM_VALUE, between(10, 500)),
        )
        .template(
            "product_defect",
            ScenarioTemplate::new("DEFECT-001", "warranty_claim", "POL-WARRANTY-001")
                .description("Product failed within warranty period")
                .expect("approve")
                .require(MONTHS_SINCE_PURCHASE, between(2, 11)),
        )
        .template(
            "product_defect",
            ScenarioTemplate::new("DEFECT-002", "water_damage_claim", "POL-WARRANTY-001")
                .description("Product damaged by water")
                .expect("deny")
                .complexity(Complexity::Moderate)
                .require(DAYS_SINCE_PURCHASE, between(30, 60)),
        )
        .template(
            "pricing_dispute",
            ScenarioTemplate::new("PRICE-001", "price_match_request", "POL-PRICE-001")
                .description("Customer found lower price elsewhere")
                .expect("conditional")
                .complexity(Complexity::Moderate)
                .require(DAYS_SINCE_PURCHASE, between(1, 14)),
        )
        .template(
            "pricing_dispute",
            ScenarioTemplate::new("PRICE-002", "price_match_too_late", "POL-PRICE-001")
                .description("Price match request after 14-day window")
                .expect("deny")
                .require(DAYS_SINCE_PURCHASE, between(20, 30)),
        )
        .template(
            "order_status",
            ScenarioTemplate::new("STATUS-001", "cancel_shipped_order", "POL-ORDER-001")
                .description("Customer wants to cancel already shipped order")
                .expect("deny")
                .require("days_since_order", between(3, 5)),
        )
        .template(
            "warranty_claim",
            ScenarioTemplate::new("WARRANTY-001", "expired_warranty", "POL-WARRANTY-001")
                .description("Product issue after warranty expired")
                .expect("deny")
                .require(MONTHS_SINCE_PURCHASE, between(13, 18)),
        )
        .build(graph)
}
