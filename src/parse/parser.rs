use crate::Clause;

/// The result of parsing a policy document, in document order.
#[derive(Debug)]
pub struct ParsedPolicy {
    pub clauses: Vec<Clause>,
}
