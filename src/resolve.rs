use crate::types::{first_failing, CompiledClause, Condition, Context, Outcome, ResolutionReport};

/// A single decision taken while resolving, reported to the caller's sink.
enum Step<'a> {
    Activated(usize),
    Pruned { clause: usize, by: usize },
    Overridden { clause: usize, by: usize },
    ConditionFailed { clause: usize, condition: &'a Condition },
}

/// Resolve `order` (already deduplicated and sorted by precedence) to the
/// active set.
pub(crate) fn resolve(clauses: &[CompiledClause], order: &[usize], ctx: &Context) -> Vec<usize> {
    run(clauses, order, ctx, |_| {})
}

pub(crate) fn resolve_detailed(
    clauses: &[CompiledClause],
    order: &[usize],
    ctx: &Context,
) -> ResolutionReport {
    let mut outcomes: Vec<(usize, Outcome)> = Vec::with_capacity(order.len());
    let id = |idx: usize| clauses[idx].clause.id.clone();

    let active = run(clauses, order, ctx, |step| match step {
        Step::Activated(clause) => outcomes.push((clause, Outcome::Active)),
        Step::Overridden { clause, by } => {
            outcomes.push((clause, Outcome::Overridden { by: id(by) }));
        }
        Step::ConditionFailed { clause, condition } => outcomes.push((
            clause,
            Outcome::ConditionFailed {
                condition: condition.clone(),
            },
        )),
        Step::Pruned { clause, by } => {
            if let Some(entry) = outcomes.iter_mut().find(|(c, _)| *c == clause) {
                entry.1 = Outcome::Pruned { by: id(by) };
            }
        }
    });

    ResolutionReport::new(
        active.into_iter().map(id).collect(),
        outcomes
            .into_iter()
            .map(|(idx, outcome)| (id(idx), outcome))
            .collect(),
    )
}

fn run<'a>(
    clauses: &'a [CompiledClause],
    order: &[usize],
    ctx: &Context,
    mut record: impl FnMut(Step<'a>),
) -> Vec<usize> {
    let mut active: Vec<usize> = Vec::new();

    for &idx in order {
        let candidate = &clauses[idx];

        // `order` is deduplicated, so a candidate is never in `active` here and
        // a self-override has no effect.
        active.retain(|&a| {
            let keep = !candidate.overrides.contains(&a);
            if !keep {
                tracing::trace!(clause = %clauses[a].clause.id, by = %candidate.clause.id, "pruned");
                record(Step::Pruned { clause: a, by: idx });
            }
            keep
        });

        if let Some(&by) = active.iter().find(|&&a| clauses[a].overrides.contains(&idx)) {
            tracing::trace!(clause = %candidate.clause.id, by = %clauses[by].clause.id, "overridden");
            record(Step::Overridden { clause: idx, by });
            continue;
        }

        match first_failing(&candidate.clause.conditions, ctx) {
            Some(condition) => {
                tracing::trace!(clause = %candidate.clause.id, %condition, "condition failed");
                record(Step::ConditionFailed {
                    clause: idx,
                    condition,
                });
            }
            None => {
                active.push(idx);
                record(Step::Activated(idx));
            }
        }
    }

    active
}
