use std::fmt::Write;

use crate::{Clause, DEFAULT_PRECEDENCE};

use super::error::WriteError;
use super::grammar::{is_clause_id, is_condition_name};

fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn check_names(clause: &Clause) -> Result<(), WriteError> {
    let unwritable_id = std::iter::once(clause.id.as_str())
        .chain(clause.relations.iter().map(|(_, target)| target))
        .find(|id| !is_clause_id(id));
    if let Some(id) = unwritable_id {
        return Err(WriteError::ClauseId { id: id.to_owned() });
    }
    if let Some(condition) = clause
        .conditions
        .iter()
        .find(|c| !is_condition_name(c.name()))
    {
        return Err(WriteError::Condition {
            clause: clause.id.clone(),
            condition: condition.name().to_owned(),
        });
    }
    Ok(())
}

/// Write clauses back out as policy DSL that [`parse`](super::parse) accepts.
///
/// Empty attributes and the default precedence are omitted.
///
/// # Errors
///
/// Returns [`WriteError`] if a clause id, relation target or condition name
/// falls outside what the grammar can read back.
pub fn to_dsl<'a>(clauses: impl IntoIterator<Item = &'a Clause>) -> Result<String, WriteError> {
    let mut out = String::new();
    for (i, clause) in clauses.into_iter().enumerate() {
        check_names(clause)?;
        if i > 0 {
            out.push('\n');
        }
        out.push_str("clause ");
        out.push_str(&clause.id);
        if clause.precedence != DEFAULT_PRECEDENCE {
            let _ = write!(out, " (precedence {})", clause.precedence);
        }
        out.push_str(":\n");

        for (keyword, text) in [
            ("title", &clause.title),
            ("category", &clause.category),
            ("rule", &clause.rule_text),
        ] {
            if !text.is_empty() {
                let _ = writeln!(out, "    {keyword} {}", quoted(text));
            }
        }
        if !clause.conditions.is_empty() {
            let names: Vec<&str> = clause.conditions.iter().map(|c| c.name()).collect();
            let _ = writeln!(out, "    when {}", names.join(", "));
        }
        for kind in crate::RelationKind::ALL {
            let targets = clause.relations.get(kind);
            if !targets.is_empty() {
                let _ = writeln!(out, "    {} {}", kind.keyword(), targets.join(", "));
            }
        }
    }
    Ok(out)
}
