use std::fmt;

use super::Condition;

/// What happened to one candidate during conflict resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// In the returned active set.
    Active,
    /// Never activated: an already active clause overrides it.
    Overridden { by: String },
    /// Activated, then removed by a later candidate that overrides it.
    Pruned { by: String },
    /// Not overridden, but one of its conditions does not hold.
    ConditionFailed { condition: Condition },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Active => write!(f, "active"),
            Outcome::Overridden { by } => write!(f, "overridden by {by}"),
            Outcome::Pruned { by } => write!(f, "pruned by {by}"),
            Outcome::ConditionFailed { condition } => write!(f, "failed {condition}"),
        }
    }
}

/// Detailed resolution record returned by
/// [`PolicyGraph::resolve_detailed()`](super::PolicyGraph::resolve_detailed).
///
/// Carries the same active set as [`resolve`](super::PolicyGraph::resolve)
/// plus the fate of every candidate in evaluation order, which downstream
/// generators use to explain why a clause does not apply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct ResolutionReport {
    active: Vec<String>,
    outcomes: Vec<(String, Outcome)>,
}

impl ResolutionReport {
    pub(crate) fn new(active: Vec<String>, outcomes: Vec<(String, Outcome)>) -> Self {
        Self { active, outcomes }
    }

    /// The active set, in evaluation order.
    #[must_use]
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Every candidate with its outcome, in evaluation order.
    #[must_use]
    pub fn outcomes(&self) -> &[(String, Outcome)] {
        &self.outcomes
    }

    /// Candidate ids in the order they were evaluated.
    pub fn evaluation_order(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(|(id, _)| id.as_str())
    }

    /// The outcome recorded for a candidate, if it was one.
    #[must_use]
    pub fn outcome(&self, id: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|(candidate, _)| candidate == id)
            .map(|(_, outcome)| outcome)
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "active: [{}]", self.active.join(", "))?;
        for (id, outcome) in &self.outcomes {
            write!(f, "\n  {id}: {outcome}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolutionReport {
        ResolutionReport::new(
            vec!["POL-RETURN-004".into()],
            vec![
                ("POL-RETURN-004".into(), Outcome::Active),
                (
                    "POL-RETURN-001".into(),
                    Outcome::ConditionFailed {
                        condition: Condition::ReceiptRequired,
                    },
                ),
                (
                    "POL-RETURN-002".into(),
                    Outcome::Overridden {
                        by: "POL-RETURN-004".into(),
                    },
                ),
            ],
        )
    }

    #[test]
    fn report_accessors() {
        let report = sample();
        assert_eq!(report.active(), &["POL-RETURN-004"]);
        assert_eq!(report.outcomes().len(), 3);
        assert_eq!(
            report.evaluation_order().collect::<Vec<_>>(),
            vec!["POL-RETURN-004", "POL-RETURN-001", "POL-RETURN-002"]
        );
        assert_eq!(report.outcome("POL-RETURN-004"), Some(&Outcome::Active));
        assert_eq!(report.outcome("POL-SHIP-001"), None);
    }

    #[test]
    fn report_display() {
        let s = sample().to_string();
        assert!(s.starts_with("active: [POL-RETURN-004]"));
        assert!(s.contains("POL-RETURN-001: failed receipt_required"));
        assert!(s.contains("POL-RETURN-002: overridden by POL-RETURN-004"));
    }

    #[test]
    fn pruned_display() {
        let outcome = Outcome::Pruned { by: "B".into() };
        assert_eq!(outcome.to_string(), "pruned by B");
    }
}
