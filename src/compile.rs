use std::collections::{HashMap, HashSet};

use crate::types::{Clause, CompiledClause, ConfigurationError, InteractionIndex, PolicyGraph};

pub(crate) fn compile(
    clauses: Vec<Clause>,
    strict_conditions: bool,
) -> Result<PolicyGraph, ConfigurationError> {
    check_ids(&clauses)?;

    let index: HashMap<String, usize> = clauses
        .iter()
        .enumerate()
        .map(|(i, clause)| (clause.id.clone(), i))
        .collect();

    check_references(&clauses, &index)?;
    if strict_conditions {
        check_conditions(&clauses)?;
    }

    let interactions = InteractionIndex::build(&clauses, &index);

    let compiled: Vec<CompiledClause> = clauses
        .into_iter()
        .map(|clause| {
            let mut overrides: Vec<usize> = Vec::new();
            for target in &clause.relations.overrides {
                let idx = index[target.as_str()];
                if !overrides.contains(&idx) {
                    overrides.push(idx);
                }
            }
            CompiledClause { clause, overrides }
        })
        .collect();

    for (a, b) in mutual_overrides(&compiled) {
        let (ca, cb) = (&compiled[a].clause, &compiled[b].clause);
        if ca.precedence == cb.precedence {
            tracing::warn!(
                first = %ca.id,
                second = %cb.id,
                precedence = ca.precedence,
                "clauses override each other at equal precedence; id order decides"
            );
        }
    }

    tracing::info!(
        clauses = compiled.len(),
        relations = interactions.edge_count(),
        "compiled policy graph"
    );

    Ok(PolicyGraph {
        clauses: compiled,
        index,
        interactions,
    })
}

fn check_ids(clauses: &[Clause]) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for clause in clauses {
        if clause.id.is_empty() {
            return Err(ConfigurationError::EmptyClauseId);
        }
        if !seen.insert(clause.id.as_str()) {
            return Err(ConfigurationError::DuplicateClause {
                id: clause.id.clone(),
            });
        }
    }
    Ok(())
}

fn check_references(
    clauses: &[Clause],
    index: &HashMap<String, usize>,
) -> Result<(), ConfigurationError> {
    for clause in clauses {
        for (relation, target) in clause.relations.iter() {
            if !index.contains_key(target) {
                return Err(ConfigurationError::DanglingReference {
                    clause: clause.id.clone(),
                    relation,
                    target: target.to_owned(),
                });
            }
        }
    }
    Ok(())
}

fn check_conditions(clauses: &[Clause]) -> Result<(), ConfigurationError> {
    for clause in clauses {
        if let Some(unknown) = clause.conditions.iter().find(|c| !c.is_recognized()) {
            return Err(ConfigurationError::UnknownCondition {
                clause: clause.id.clone(),
                condition: unknown.name().to_owned(),
            });
        }
    }
    Ok(())
}

/// Index pairs `(a, b)` with `a < b` where each overrides the other.
pub(crate) fn mutual_overrides(clauses: &[CompiledClause]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for (a, clause) in clauses.iter().enumerate() {
        for &b in &clause.overrides {
            if a < b && clauses[b].overrides.contains(&a) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}
