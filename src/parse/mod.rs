mod error;
mod grammar;
mod parser;
mod writer;

pub use error::{ParseError, WriteError};
pub use parser::ParsedPolicy;
pub use writer::to_dsl;

/// Parse a policy DSL input string into a [`ParsedPolicy`].
///
/// The clauses are not validated against each other; use
/// [`PolicyGraph::from_dsl()`](crate::PolicyGraph::from_dsl) to parse and
/// compile in one step.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid DSL syntax.
pub fn parse(input: &str) -> Result<ParsedPolicy, ParseError> {
    use winnow::Parser;
    grammar::parse_policy
        .parse(input)
        .map_err(|e| {
            let mut message = e.inner().to_string();
            if message.is_empty() {
                message = "unexpected input".to_owned();
            }
            ParseError::at(input, e.offset(), message)
        })
}
