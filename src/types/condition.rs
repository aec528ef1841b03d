use std::fmt;

use super::{CompareOp, Context, Value};

pub const HAS_RECEIPT: &str = "has_receipt";
pub const DAYS_SINCE_PURCHASE: &str = "days_since_purchase";
pub const MONTHS_SINCE_PURCHASE: &str = "months_since_purchase";
pub const ITEM_VALUE: &str = "item_value";
pub const ORDER_STATUS: &str = "order_status";

const RETURN_WINDOW_DAYS: i64 = 30;
const PRICE_MATCH_WINDOW_DAYS: i64 = 14;
const HIGH_VALUE_THRESHOLD: i64 = 500;
const WARRANTY_MONTHS: i64 = 12;

/// A named applicability predicate attached to a clause.
///
/// | condition                   | fact                    | fails when            | absent fact  |
/// |-----------------------------|-------------------------|-----------------------|--------------|
/// | `receipt_required`          | `has_receipt`           | falsy                 | passes       |
/// | `within_return_window`      | `days_since_purchase`   | `> 30`                | treated as 0 |
/// | `within_price_match_window` | `days_since_purchase`   | `> 14`                | treated as 0 |
/// | `order_not_shipped`         | `order_status`          | shipped or delivered  | passes       |
/// | `item_over_500`             | `item_value`            | `<= 500`              | treated as 0 |
/// | `warranty_period`           | `months_since_purchase` | `> 12`                | treated as 0 |
///
/// A numeric fact holding a non-numeric value counts as absent. Names outside
/// this vocabulary become [`Condition::Unrecognized`] and always pass; use
/// [`PolicyGraphBuilder::strict_conditions()`](crate::PolicyGraphBuilder::strict_conditions)
/// to reject them when the graph is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum Condition {
    ReceiptRequired,
    WithinReturnWindow,
    WithinPriceMatchWindow,
    OrderNotShipped,
    ItemOver500,
    WarrantyPeriod,
    Unrecognized(String),
}

impl Condition {
    /// Every recognized condition, in table order.
    pub const KNOWN: [Condition; 6] = [
        Condition::ReceiptRequired,
        Condition::WithinReturnWindow,
        Condition::WithinPriceMatchWindow,
        Condition::OrderNotShipped,
        Condition::ItemOver500,
        Condition::WarrantyPeriod,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "receipt_required" => Condition::ReceiptRequired,
            "within_return_window" => Condition::WithinReturnWindow,
            "within_price_match_window" => Condition::WithinPriceMatchWindow,
            "order_not_shipped" => Condition::OrderNotShipped,
            "item_over_500" => Condition::ItemOver500,
            "warranty_period" => Condition::WarrantyPeriod,
            other => Condition::Unrecognized(other.to_owned()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Condition::ReceiptRequired => "receipt_required",
            Condition::WithinReturnWindow => "within_return_window",
            Condition::WithinPriceMatchWindow => "within_price_match_window",
            Condition::OrderNotShipped => "order_not_shipped",
            Condition::ItemOver500 => "item_over_500",
            Condition::WarrantyPeriod => "warranty_period",
            Condition::Unrecognized(name) => name,
        }
    }

    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Condition::Unrecognized(_))
    }

    /// Evaluate this condition against a context.
    #[must_use]
    pub fn holds(&self, ctx: &Context) -> bool {
        match self {
            Condition::ReceiptRequired => ctx.get(HAS_RECEIPT).map_or(true, Value::is_truthy),
            Condition::WithinReturnWindow => {
                !exceeds(ctx, DAYS_SINCE_PURCHASE, CompareOp::Gt, RETURN_WINDOW_DAYS)
            }
            Condition::WithinPriceMatchWindow => {
                !exceeds(ctx, DAYS_SINCE_PURCHASE, CompareOp::Gt, PRICE_MATCH_WINDOW_DAYS)
            }
            Condition::OrderNotShipped => !ctx
                .get(ORDER_STATUS)
                .and_then(Value::as_str)
                .is_some_and(|s| s == "shipped" || s == "delivered"),
            Condition::ItemOver500 => {
                !exceeds(ctx, ITEM_VALUE, CompareOp::Lte, HIGH_VALUE_THRESHOLD)
            }
            Condition::WarrantyPeriod => {
                !exceeds(ctx, MONTHS_SINCE_PURCHASE, CompareOp::Gt, WARRANTY_MONTHS)
            }
            Condition::Unrecognized(_) => true,
        }
    }
}

/// True when the numeric fact (0 if absent) satisfies `op limit`.
/// An incomparable value such as NaN never trips the threshold.
fn exceeds(ctx: &Context, fact: &str, op: CompareOp, limit: i64) -> bool {
    let value = ctx.number(fact).cloned().unwrap_or(Value::Int(0));
    value.compare(op, &Value::Int(limit)).unwrap_or(false)
}

/// Whether every condition holds. An empty list passes.
#[must_use]
pub fn check_conditions(conditions: &[Condition], ctx: &Context) -> bool {
    first_failing(conditions, ctx).is_none()
}

/// The first condition that does not hold, if any.
#[must_use]
pub fn first_failing<'a>(conditions: &'a [Condition], ctx: &Context) -> Option<&'a Condition> {
    conditions.iter().find(|c| !c.holds(ctx))
}

impl From<&str> for Condition {
    fn from(name: &str) -> Self {
        Condition::from_name(name)
    }
}

impl From<String> for Condition {
    fn from(name: String) -> Self {
        Condition::from_name(&name)
    }
}

impl From<Condition> for String {
    fn from(condition: Condition) -> Self {
        condition.name().to_owned()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
