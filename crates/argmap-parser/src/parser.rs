//! Line grammar of the argmap script language.
//!
//! Every non-blank script line is one [`Instruction`]. The alternatives are
//! tried in a fixed order, so a line that reads as a relation is never
//! taken for a claim:
//!
//! ```text
//! VAR ":" ["assume"] SRC+ (support|attack|warrant|undercut) "s" TARGET
//! VAR ":" ["assume"] (TEXT | '"' TEXT '"')
//! "style" PATH NUMBER
//! "position" VAR "at" INT INT
//! ```
//!
//! Quoting claim text keeps it from reading as a relation or as an
//! `assume` flag, and keeps surrounding whitespace. Only the outer pair of
//! quotes is removed; there are no escapes inside.
//!
//! Variables are lowercase ASCII alphanumerics. The parser only recognizes
//! shapes; resolving variables happens in [`elaborate`](crate::elaborate).

use winnow::{
    Parser as _,
    combinator::{alt, delimited, opt, preceded, separated},
    error::{ContextError, ErrMode},
    token::{literal, take_while},
};

use argmap_core::graph::RelationKind;

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// One recognized script line. All string slices borrow from that line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Instruction<'src> {
    Relation {
        variable: &'src str,
        assume: bool,
        sources: Vec<&'src str>,
        kind: RelationKind,
        target: &'src str,
    },
    Claim {
        variable: &'src str,
        assume: bool,
        text: &'src str,
    },
    Style {
        path: &'src str,
        value: f32,
    },
    Position {
        variable: &'src str,
        x: i32,
        y: i32,
    },
}

/// Recognizes a single script line.
///
/// Returns `None` if the line matches no instruction.
pub(crate) fn instruction(line: &str) -> Option<Instruction<'_>> {
    let mut input = line;
    alt((relation_line, claim_line, style_line, position_line))
        .parse_next(&mut input)
        .ok()
}

// ============================================================================
// Lexical helpers
// ============================================================================

fn backtrack<O>() -> IResult<O> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

fn ws0(input: &mut Input<'_>) -> IResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

fn ws1(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

/// Trailing whitespace, then nothing.
fn end_of_line(input: &mut Input<'_>) -> IResult<()> {
    ws0(input)?;
    if input.is_empty() {
        Ok(())
    } else {
        backtrack()
    }
}

/// The part of `start` that `input` has moved past.
fn consumed<'src>(start: Input<'src>, input: &Input<'src>) -> &'src str {
    &start[..start.len() - input.len()]
}

fn variable<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_lowercase() || c.is_ascii_digit()).parse_next(input)
}

fn digits<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

/// `VAR ":"` with the whitespace around the colon.
fn binding<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited(ws0, variable, (ws0, ':', ws0)).parse_next(input)
}

// ============================================================================
// Instructions
// ============================================================================

fn relation_line<'src>(input: &mut Input<'src>) -> IResult<Instruction<'src>> {
    let variable = binding(input)?;
    let words: Vec<&'src str> = separated(1.., self::variable, ws1).parse_next(input)?;
    end_of_line(input)?;

    let [sources @ .., keyword, target] = words.as_slice() else {
        return backtrack();
    };
    let Some(kind) = keyword
        .strip_suffix('s')
        .and_then(RelationKind::from_keyword)
    else {
        return backtrack();
    };

    // `assume` is only a flag when at least one source follows it
    let (assume, sources) = match sources {
        ["assume", rest @ ..] if !rest.is_empty() => (true, rest),
        _ => (false, sources),
    };
    if sources.is_empty() {
        return backtrack();
    }

    Ok(Instruction::Relation {
        variable,
        assume,
        sources: sources.to_vec(),
        kind,
        target: *target,
    })
}

fn claim_line<'src>(input: &mut Input<'src>) -> IResult<Instruction<'src>> {
    let variable = binding(input)?;
    let rest = take_while(0.., |_: char| true).parse_next(input)?;
    let text = rest.trim_end();

    let (assume, text) = match text.strip_prefix("assume") {
        Some(after) if after.starts_with(char::is_whitespace) => (true, after.trim_start()),
        _ => (false, text),
    };
    let text = match text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) {
        Some(quoted) => quoted,
        None if text.is_empty() => return backtrack(),
        None => text,
    };

    Ok(Instruction::Claim {
        variable,
        assume,
        text,
    })
}

fn style_line<'src>(input: &mut Input<'src>) -> IResult<Instruction<'src>> {
    (ws0, literal("style"), ws1).parse_next(input)?;
    let path = style_path(input)?;
    let value = preceded(ws1, number).parse_next(input)?;
    end_of_line(input)?;

    Ok(Instruction::Style { path, value })
}

/// Dot-separated alphanumeric segments, e.g. `claim.padding.top`.
fn style_path<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    let start = *input;
    let _segments: Vec<&str> =
        separated(1.., take_while(1.., |c: char| c.is_ascii_alphanumeric()), '.')
            .parse_next(input)?;
    Ok(consumed(start, input))
}

/// Unsigned decimal: `12`, `1.5` or `.5`.
fn number(input: &mut Input<'_>) -> IResult<f32> {
    let start = *input;
    take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    opt(preceded('.', digits)).parse_next(input)?;

    let text = consumed(start, input);
    match text.parse::<f32>() {
        Ok(value) if !text.is_empty() => Ok(value),
        _ => backtrack(),
    }
}

fn position_line<'src>(input: &mut Input<'src>) -> IResult<Instruction<'src>> {
    (ws0, literal("position"), ws1).parse_next(input)?;
    let variable = variable(input)?;
    (ws1, literal("at"), ws1).parse_next(input)?;
    let x = integer(input)?;
    ws1(input)?;
    let y = integer(input)?;
    end_of_line(input)?;

    Ok(Instruction::Position { variable, x, y })
}

fn integer(input: &mut Input<'_>) -> IResult<i32> {
    let start = *input;
    (opt('-'), digits).parse_next(input)?;
    consumed(start, input)
        .parse::<i32>()
        .or_else(|_| backtrack())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_claim(line: &str, variable: &str, assume: bool, text: &str) {
        assert_eq!(
            instruction(line),
            Some(Instruction::Claim {
                variable,
                assume,
                text
            }),
            "line: {line:?}"
        );
    }

    fn check_relation(
        line: &str,
        variable: &str,
        assume: bool,
        sources: &[&str],
        kind: RelationKind,
        target: &str,
    ) {
        assert_eq!(
            instruction(line),
            Some(Instruction::Relation {
                variable,
                assume,
                sources: sources.to_vec(),
                kind,
                target
            }),
            "line: {line:?}"
        );
    }

    #[test]
    fn test_claim_lines() {
        check_claim("a: rain", "a", false, "rain");
        check_claim("  b1 :wet ground  ", "b1", false, "wet ground");
        check_claim("c: assume it rains", "c", true, "it rains");
        check_claim("d: assumed facts", "d", false, "assumed facts");
        check_claim("e: 42 is the answer!", "e", false, "42 is the answer!");
    }

    #[test]
    fn test_bare_assume_is_claim_text() {
        check_claim("a: assume", "a", false, "assume");
        check_claim("a: assume   ", "a", false, "assume");
    }

    #[test]
    fn test_quoted_claim_text() {
        check_claim("a: \"b supports c\"", "a", false, "b supports c");
        check_claim("a: \"assume it rains\"", "a", false, "assume it rains");
        check_claim("a: assume \"assume it rains\"", "a", true, "assume it rains");
        check_claim("a: \"  padded \"  ", "a", false, "  padded ");
        check_claim("a: \"\"", "a", false, "");
        check_claim("a: assume \"\"", "a", true, "");
        check_claim("a: \"\"quoted\"\"", "a", false, "\"quoted\"");
        // A lone quote is plain text
        check_claim("a: \"", "a", false, "\"");
        check_claim("a: say \"hi\"", "a", false, "say \"hi\"");
    }

    #[test]
    fn test_relation_lines() {
        check_relation("c: a supports b", "c", false, &["a"], RelationKind::Support, "b");
        check_relation(
            "r: assume x y attacks z",
            "r",
            true,
            &["x", "y"],
            RelationKind::Attack,
            "z",
        );
        check_relation("w: p warrants c", "w", false, &["p"], RelationKind::Condition, "c");
        check_relation("u: q undercuts w ", "u", false, &["q"], RelationKind::Exception, "w");
    }

    #[test]
    fn test_assume_without_sources_is_a_source() {
        check_relation(
            "r: assume supports b",
            "r",
            false,
            &["assume"],
            RelationKind::Support,
            "b",
        );
    }

    #[test]
    fn test_relation_shaped_text_falls_back_to_claim() {
        // Unknown keyword
        check_claim("c: a proves b", "c", false, "a proves b");
        // Keyword without trailing `s`
        check_claim("c: a support b", "c", false, "a support b");
        // Uppercase words are not variables
        check_claim("c: A supports b", "c", false, "A supports b");
        // No sources
        check_claim("c: supports b", "c", false, "supports b");
    }

    #[test]
    fn test_style_lines() {
        assert_eq!(
            instruction("style scale 2"),
            Some(Instruction::Style {
                path: "scale",
                value: 2.0
            })
        );
        assert_eq!(
            instruction(" style claim.padding.top .5 "),
            Some(Instruction::Style {
                path: "claim.padding.top",
                value: 0.5
            })
        );
        assert_eq!(
            instruction("style claim.fontSize 14.25"),
            Some(Instruction::Style {
                path: "claim.fontSize",
                value: 14.25
            })
        );
    }

    #[test]
    fn test_style_rejects_malformed_numbers() {
        assert_eq!(instruction("style scale"), None);
        assert_eq!(instruction("style scale 2."), None);
        assert_eq!(instruction("style scale -2"), None);
        assert_eq!(instruction("style scale. 2"), None);
    }

    #[test]
    fn test_position_lines() {
        assert_eq!(
            instruction("position a at 10 -20"),
            Some(Instruction::Position {
                variable: "a",
                x: 10,
                y: -20
            })
        );
        assert_eq!(instruction("position a at 1.5 2"), None);
        assert_eq!(instruction("position a 1 2"), None);
        assert_eq!(instruction("position A at 1 2"), None);
    }

    #[test]
    fn test_unknown_instructions() {
        assert_eq!(instruction("hello world"), None);
        assert_eq!(instruction("A: upper case variable"), None);
        assert_eq!(instruction("a:"), None);
        assert_eq!(instruction("a:   "), None);
    }
}
