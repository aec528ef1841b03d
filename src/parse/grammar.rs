use winnow::ascii::{dec_int, multispace1, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, eof, opt, repeat, separated};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use crate::{Clause, Condition, RelationKind, DEFAULT_PRECEDENCE};

use super::parser::ParsedPolicy;

// -- Whitespace & comments --------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Identifiers ------------------------------------------------------------

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'
}

fn is_condition_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `id` can appear as a clause id in the DSL.
pub(crate) fn is_clause_id(id: &str) -> bool {
    let mut chars = id.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphanumeric()) && chars.all(is_id_char)
}

/// Whether `name` can appear in a `when` list.
pub(crate) fn is_condition_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_condition_char)
}

fn clause_id<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        take_while(1, |c: char| c.is_ascii_alphanumeric()),
        take_while(0.., is_id_char),
    )
        .take()
        .parse_next(input)
}

fn condition_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., is_condition_char).parse_next(input)
}

fn keyword<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_lowercase() || c == '_').parse_next(input)
}

fn list_separator(input: &mut &str) -> ModalResult<()> {
    (ws, ',', ws).void().parse_next(input)
}

// -- Values -----------------------------------------------------------------

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = any.parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = any.parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

// -- Clause bodies ----------------------------------------------------------

enum Attribute<'i> {
    Title(String),
    Category(String),
    Rule(String),
    When(Vec<&'i str>),
    Relation(RelationKind, Vec<&'i str>),
}

fn text(input: &mut &str) -> ModalResult<String> {
    cut_err(string_literal)
        .context(StrContext::Expected(StrContextValue::Description(
            "string literal",
        )))
        .parse_next(input)
}

fn attribute<'i>(input: &mut &'i str) -> ModalResult<Attribute<'i>> {
    ws.parse_next(input)?;
    let name = keyword.parse_next(input)?;
    ws.parse_next(input)?;
    match name {
        "title" => text.map(Attribute::Title).parse_next(input),
        "category" => text.map(Attribute::Category).parse_next(input),
        "rule" => text.map(Attribute::Rule).parse_next(input),
        "when" => cut_err(separated(1.., condition_name, list_separator))
            .context(StrContext::Expected(StrContextValue::Description(
                "condition name",
            )))
            .map(Attribute::When)
            .parse_next(input),
        other => match RelationKind::from_keyword(other) {
            Some(kind) => cut_err(separated(1.., clause_id, list_separator))
                .context(StrContext::Expected(StrContextValue::Description(
                    "clause id",
                )))
                .map(|ids| Attribute::Relation(kind, ids))
                .parse_next(input),
            // Not an attribute: the body ends here.
            None => Err(ErrMode::from_input(input)),
        },
    }
}

fn precedence_annotation(input: &mut &str) -> ModalResult<i32> {
    delimited(
        (ws, '(', ws, "precedence", ws),
        cut_err(dec_int::<_, i32, _>).context(StrContext::Expected(
            StrContextValue::Description("precedence"),
        )),
        (
            ws,
            cut_err(')').context(StrContext::Expected(StrContextValue::CharLiteral(')'))),
        ),
    )
    .parse_next(input)
}

fn clause_def(input: &mut &str) -> ModalResult<Clause> {
    ws.parse_next(input)?;
    ("clause", multispace1).parse_next(input)?;

    let id = cut_err(clause_id)
        .context(StrContext::Expected(StrContextValue::Description(
            "clause id",
        )))
        .parse_next(input)?;

    let precedence = opt(precedence_annotation)
        .parse_next(input)?
        .unwrap_or(DEFAULT_PRECEDENCE);

    ws.parse_next(input)?;
    cut_err(':')
        .context(StrContext::Expected(StrContextValue::CharLiteral(':')))
        .parse_next(input)?;

    let attributes: Vec<Attribute<'_>> = repeat(0.., attribute).parse_next(input)?;

    let mut clause = Clause::new(id);
    clause.precedence = precedence;
    for attribute in attributes {
        match attribute {
            Attribute::Title(title) => clause.title = title,
            Attribute::Category(category) => clause.category = category,
            Attribute::Rule(rule_text) => clause.rule_text = rule_text,
            Attribute::When(names) => clause
                .conditions
                .extend(names.into_iter().map(Condition::from_name)),
            Attribute::Relation(kind, ids) => clause
                .relations
                .get_mut(kind)
                .extend(ids.into_iter().map(str::to_owned)),
        }
    }
    Ok(clause)
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_policy(input: &mut &str) -> ModalResult<ParsedPolicy> {
    let clauses: Vec<Clause> = repeat(0.., clause_def).parse_next(input)?;
    ws.parse_next(input)?;
    eof.context(StrContext::Expected(StrContextValue::Description(
        "clause definition",
    )))
    .parse_next(input)?;
    Ok(ParsedPolicy { clauses })
}

#[cfg(test)]
mod tests {
    use crate::parse::parse;

    use super::*;

    #[test]
    fn parse_minimal_clause() {
        let result = parse("clause POL-A:").unwrap();
        assert_eq!(result.clauses.len(), 1);
        let clause = &result.clauses[0];
        assert_eq!(clause.id, "POL-A");
        assert_eq!(clause.precedence, DEFAULT_PRECEDENCE);
        assert!(clause.title.is_empty());
        assert!(clause.conditions.is_empty());
    }

    #[test]
    fn parse_full_clause() {
        let input = r#"
clause POL-RETURN-004 (precedence 1):
    title "Defective Items"
    category "Return Policy"
    rule "Full refund regardless of window"
    when within_return_window
    overrides POL-RETURN-002
    modifies POL-RETURN-001, POL-RETURN-003
"#;
        let result = parse(input).unwrap();
        let clause = &result.clauses[0];
        assert_eq!(clause.precedence, 1);
        assert_eq!(clause.title, "Defective Items");
        assert_eq!(clause.category, "Return Policy");
        assert_eq!(clause.rule_text, "Full refund regardless of window");
        assert_eq!(clause.conditions, vec![Condition::WithinReturnWindow]);
        assert_eq!(clause.relations.overrides, vec!["POL-RETURN-002"]);
        assert_eq!(
            clause.relations.modifies,
            vec!["POL-RETURN-001", "POL-RETURN-003"]
        );
    }

    #[test]
    fn parse_every_relation_keyword() {
        for kind in RelationKind::ALL {
            let input = format!("clause a:\n    {} b\nclause b:", kind.keyword());
            let result = parse(&input).unwrap();
            assert_eq!(
                result.clauses[0].relations.get(kind),
                ["b".to_owned()],
                "failed for {kind}"
            );
        }
    }

    #[test]
    fn parse_repeated_relation_accumulates() {
        let result = parse("clause a:\n    requires b\n    requires c, d").unwrap();
        assert_eq!(result.clauses[0].relations.requires, vec!["b", "c", "d"]);
    }

    #[test]
    fn parse_condition_list() {
        let result =
            parse("clause a:\n    when receipt_required, item_over_500 ,loyalty_member").unwrap();
        assert_eq!(
            result.clauses[0].conditions,
            vec![
                Condition::ReceiptRequired,
                Condition::ItemOver500,
                Condition::Unrecognized("loyalty_member".into()),
            ]
        );
    }

    #[test]
    fn parse_negative_precedence() {
        let result = parse("clause a (precedence -2):").unwrap();
        assert_eq!(result.clauses[0].precedence, -2);
    }

    #[test]
    fn parse_comments_ignored() {
        let input = "# Header\nclause a: # trailing\n    # inline\n    title \"T\"\n# end";
        let result = parse(input).unwrap();
        assert_eq!(result.clauses.len(), 1);
        assert_eq!(result.clauses[0].title, "T");
    }

    #[test]
    fn parse_multiple_clauses_in_order() {
        let input = "clause c:\nclause a:\n    interacts_with c\nclause b:";
        let ids: Vec<String> = parse(input)
            .unwrap()
            .clauses
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn parse_string_with_escapes() {
        let result = parse(r#"clause a:
    rule "say \"hi\"\\\n\tbye""#)
        .unwrap();
        assert_eq!(result.clauses[0].rule_text, "say \"hi\"\\\n\tbye");
    }

    #[test]
    fn parse_unicode_text() {
        let result = parse("clause a:\n    category \"Garantía\"").unwrap();
        assert_eq!(result.clauses[0].category, "Garantía");
    }

    #[test]
    fn parse_empty_document() {
        assert!(parse("").unwrap().clauses.is_empty());
        assert!(parse("  # nothing here\n").unwrap().clauses.is_empty());
    }

    #[test]
    fn lexical_predicates_match_parsers() {
        for id in ["POL-RETURN-001", "a", "7.b_c-d"] {
            assert!(is_clause_id(id), "{id}");
            assert_eq!(clause_id.parse(id).unwrap(), id);
        }
        for id in ["", "-lead", "_x", "Return Window", "a/b", "é"] {
            assert!(!is_clause_id(id), "{id:?}");
            assert!(clause_id.parse(id).is_err(), "{id:?}");
        }
        assert!(is_condition_name("item_over_500"));
        assert!(!is_condition_name("loyalty-member"));
        assert!(!is_condition_name(""));
    }

    #[test]
    fn reject_missing_colon() {
        let err = parse("clause a\n    title \"T\"").unwrap_err();
        assert_eq!((err.line(), err.column()), (2, 5));
        assert!(err.to_string().ends_with("expected `:`"), "{err}");
    }

    #[test]
    fn reject_unknown_attribute() {
        let err = parse("clause a:\n    priority 3").unwrap_err();
        assert_eq!((err.line(), err.column()), (2, 5));
        assert!(err.to_string().contains("clause definition"), "{err}");
    }

    #[test]
    fn reject_trailing_junk() {
        let err = parse("junk").unwrap_err();
        assert_eq!((err.line(), err.column()), (1, 1));
        assert!(err.to_string().contains("expected clause definition"), "{err}");
    }

    #[test]
    fn reject_unclosed_precedence() {
        let err = parse("clause a (precedence 2:").unwrap_err();
        assert!(err.to_string().ends_with("expected `)`"), "{err}");
    }

    #[test]
    fn reject_unterminated_string() {
        assert!(parse("clause a:\n    title \"oops").is_err());
    }

    #[test]
    fn reject_empty_relation_list() {
        assert!(parse("clause a:\n    overrides\nclause b:").is_err());
    }

    #[test]
    fn reject_bad_precedence() {
        assert!(parse("clause a (precedence high):").is_err());
    }
}
