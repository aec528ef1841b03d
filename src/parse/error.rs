use std::fmt;

use thiserror::Error;

/// Errors produced when parsing policy DSL input.
#[derive(Debug)]
pub struct ParseError {
    message: String,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(crate) fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }

    /// Locate byte `offset` of `input` as a 1-based line and column.
    pub(crate) fn at(input: &str, offset: usize, message: impl Into<String>) -> Self {
        let consumed = input.get(..offset).unwrap_or(input);
        let line = consumed.matches('\n').count() + 1;
        let column = consumed
            .rsplit('\n')
            .next()
            .map_or(0, |tail| tail.chars().count())
            + 1;
        Self::new(message, line, column)
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at {}:{}: {}",
            self.line, self.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Names that the DSL grammar cannot express, found while writing clauses out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WriteError {
    #[error("clause id '{id}' cannot be written as DSL")]
    ClauseId { id: String },

    #[error("condition '{condition}' in clause '{clause}' cannot be written as DSL")]
    Condition { clause: String, condition: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ParseError::new("unexpected token", 3, 7);
        assert_eq!(err.to_string(), "parse error at 3:7: unexpected token");
    }

    #[test]
    fn write_error_messages() {
        let err = WriteError::ClauseId {
            id: "Return Window".into(),
        };
        assert_eq!(
            err.to_string(),
            "clause id 'Return Window' cannot be written as DSL"
        );
        let err = WriteError::Condition {
            clause: "a".into(),
            condition: "loyalty-member".into(),
        };
        assert_eq!(
            err.to_string(),
            "condition 'loyalty-member' in clause 'a' cannot be written as DSL"
        );
    }

    #[test]
    fn locates_offset() {
        let err = ParseError::at("clause a:\n    titel", 14, "bad");
        assert_eq!((err.line(), err.column()), (2, 5));
    }
}
