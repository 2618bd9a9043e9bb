//! Serialization of a graph into script text.
//!
//! The output lists claim lines first, then relation lines, then one
//! `position` line per claim. Parsing the output rebuilds an equivalent
//! graph: compound claims and the relations feeding them are not written
//! out, they are recreated from the multi-source relation line.
//!
//! Claim text that would read back differently, such as empty text, text
//! shaped like a relation line or text starting with `assume`, is quoted.
//! Line breaks inside claim text are written as spaces.

use std::collections::HashMap;

use log::{debug, warn};

use argmap_core::graph::{ClaimId, Element, Graph, Relation, RelationId};

use crate::parser::{Instruction, instruction};

/// Generates variable names `a` … `z`, `aa`, `ab`, … (bijective base 26).
#[derive(Debug, Default)]
struct VariableNames {
    next: usize,
}

impl VariableNames {
    fn next_name(&mut self) -> String {
        let mut n = self.next;
        self.next += 1;

        let mut reversed = String::new();
        loop {
            reversed.push(char::from(b'a' + (n % 26) as u8));
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        reversed.chars().rev().collect()
    }
}

/// Writes `graph` as script text.
///
/// A relation whose endpoints have no variable, such as one targeting a
/// hidden edge into a compound claim, cannot be expressed in the script
/// and is skipped with a warning.
pub fn serialize(graph: &Graph) -> String {
    let mut names = VariableNames::default();
    let mut variables: HashMap<Element, String> = HashMap::new();
    let mut claim_lines = Vec::new();
    let mut relation_lines = Vec::new();
    let mut position_lines = Vec::new();

    for (id, claim) in graph.claims().filter(|(_, claim)| !claim.is_compound()) {
        let name = names.next_name();
        claim_lines.push(claim_line(&name, claim.is_assumption(), claim.text()));

        let position = claim.position();
        position_lines.push(format!(
            "position {name} at {} {}",
            position.x().round() as i64,
            position.y().round() as i64
        ));

        variables.insert(id.into(), name);
    }

    for (id, relation) in graph.relations() {
        if targets_compound(graph, relation) {
            continue;
        }

        let sources = relation_sources(graph, relation);
        let Some((name, line)) = relation_line(graph, &variables, relation, &sources, &mut names)
        else {
            warn!(relation:% = id; "Relation cannot be written as a script line, skipped");
            continue;
        };
        relation_lines.push(line);
        variables.insert(id.into(), name);
    }

    debug!(
        claims = claim_lines.len(),
        relations = relation_lines.len();
        "Graph serialized"
    );

    claim_lines
        .into_iter()
        .chain(relation_lines)
        .chain(position_lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the line for one claim, quoting its text when the plain line
/// would parse to something else.
fn claim_line(name: &str, assume: bool, text: &str) -> String {
    let flag = if assume { "assume " } else { "" };
    let text = if text.contains(['\r', '\n']) {
        debug!(claim = name; "Line breaks in claim text written as spaces");
        text.replace(['\r', '\n'], " ")
    } else {
        text.to_owned()
    };

    let plain = format!("{name}: {flag}{text}");
    match instruction(&plain) {
        Some(Instruction::Claim {
            assume: parsed_assume,
            text: parsed_text,
            ..
        }) if parsed_assume == assume && parsed_text == text => plain,
        _ => format!("{name}: {flag}\"{text}\""),
    }
}

/// Builds the line for one relation, returning its variable and the line.
fn relation_line(
    graph: &Graph,
    variables: &HashMap<Element, String>,
    relation: &Relation,
    sources: &[ClaimId],
    names: &mut VariableNames,
) -> Option<(String, String)> {
    if sources.is_empty() {
        return None;
    }
    let source_names = sources
        .iter()
        .map(|source| variables.get(&Element::Claim(*source)).map(String::as_str))
        .collect::<Option<Vec<_>>>()?;
    let target = variables.get(&relation.target())?;

    let all_assumed = sources
        .iter()
        .all(|source| graph.claim(*source).is_some_and(|claim| claim.is_assumption()));
    let assume = relation.is_assumption() || (relation.is_merged() && all_assumed);

    let name = names.next_name();
    let line = format!(
        "{name}: {}{} {}s {target}",
        if assume { "assume " } else { "" },
        source_names.join(" "),
        relation.kind().keyword(),
    );
    Some((name, line))
}

/// The script-level sources of a relation.
///
/// A merged relation starts at a compound claim; its sources are the
/// sources of the relations feeding that claim.
fn relation_sources(graph: &Graph, relation: &Relation) -> Vec<ClaimId> {
    if !relation.is_merged() {
        return vec![relation.source()];
    }
    graph
        .incoming(relation.source())
        .filter_map(|feeder: RelationId| graph.relation(feeder))
        .map(Relation::source)
        .collect()
}

fn targets_compound(graph: &Graph, relation: &Relation) -> bool {
    relation
        .target()
        .as_claim()
        .and_then(|claim| graph.claim(claim))
        .is_some_and(|claim| claim.is_compound())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_names() {
        let mut names = VariableNames::default();
        let generated: Vec<String> = (0..703).map(|_| names.next_name()).collect();

        assert_eq!(generated[0], "a");
        assert_eq!(generated[25], "z");
        assert_eq!(generated[26], "aa");
        assert_eq!(generated[27], "ab");
        assert_eq!(generated[51], "az");
        assert_eq!(generated[52], "ba");
        assert_eq!(generated[701], "zz");
        assert_eq!(generated[702], "aaa");
    }

    #[test]
    fn test_claim_line_plain() {
        assert_eq!(claim_line("a", false, "rain"), "a: rain");
        assert_eq!(claim_line("b", true, "it rains"), "b: assume it rains");
        assert_eq!(claim_line("c", false, "say \"hi\""), "c: say \"hi\"");
    }

    #[test]
    fn test_claim_line_quotes_ambiguous_text() {
        assert_eq!(claim_line("a", false, ""), "a: \"\"");
        assert_eq!(claim_line("a", true, ""), "a: assume \"\"");
        assert_eq!(claim_line("a", false, "   "), "a: \"   \"");
        assert_eq!(claim_line("a", false, "assume it rains"), "a: \"assume it rains\"");
        assert_eq!(claim_line("a", false, "x supports y"), "a: \"x supports y\"");
        assert_eq!(claim_line("a", false, " rain "), "a: \" rain \"");
        assert_eq!(claim_line("a", false, "\"quoted\""), "a: \"\"quoted\"\"");
        // Bare `assume` reads back as text, so it stays plain
        assert_eq!(claim_line("a", false, "assume"), "a: assume");
    }

    #[test]
    fn test_claim_line_flattens_line_breaks() {
        assert_eq!(claim_line("a", false, "wet\r\nground"), "a: wet  ground");
    }

    #[test]
    fn test_variable_names_are_unique() {
        let mut names = VariableNames::default();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            assert!(seen.insert(names.next_name()));
        }
    }
}
