//! Integration tests for parsing and serializing whole scripts.

use argmap_core::{
    geometry::Point,
    graph::{ClaimAttrs, ClaimId, Element, Graph, RelationAttrs, RelationId, RelationKind},
    style::StyleConfig,
};
use argmap_parser::{ParseError, parse, serialize};
use proptest::{prelude::*, sample::Index};

fn parse_default(source: &str) -> Result<Graph, ParseError> {
    parse(source, &mut StyleConfig::default())
}

#[test]
fn test_rain_example_round_trips() {
    let graph = parse_default("a: rain\nb: wet ground\nc: a supports b").unwrap();
    let reparsed = parse_default(&serialize(&graph)).unwrap();

    assert_eq!(describe(&graph), describe(&reparsed));
    assert_eq!(reparsed.relation_count(), 1);
}

#[test]
fn test_multi_source_example() {
    let graph = parse_default("a: p1\nb: p2\nt: conclusion\nc: a b supports t").unwrap();
    let roots = graph.find_root_claims();

    assert_eq!(roots.len(), 1);
    assert_eq!(graph.claim(roots[0]).unwrap().text(), "conclusion");

    let reparsed = parse_default(&serialize(&graph)).unwrap();
    assert_eq!(describe(&graph), describe(&reparsed));
    assert_eq!(reparsed.claim_count(), 4);
}

#[test]
fn test_demo_script_parses() {
    let source = "\
        c: assume the ground is wet\n\
        r: it rained last night\n\
        s: sprinklers ran\n\
        w: r supports c\n\
        x: s attacks w\n\
        g: grass looks green\n\
        h: g r warrants c\n\
        style claim.maxWidth 180\n\
        position c at 20 20\n";
    let mut style = StyleConfig::default();
    let graph = parse(source, &mut style).unwrap();

    assert_eq!(style.claim().max_width(), 180.0);
    assert_eq!(graph.claim_count(), 5);
    assert_eq!(graph.relation_count(), 5);
}

#[test]
fn test_error_reports_line_number() {
    let err = parse_default("a: rain\nb: a supports nowhere").unwrap_err();

    assert!(err.to_string().starts_with("error[E200]: line 2:"), "{err}");
}

#[test]
fn test_texts_needing_quotes_round_trip() {
    let texts = [
        "",
        "   ",
        "assume it rains",
        "rain supports growth",
        " padded ",
        "\"quoted\"",
        "say \"hi\"",
    ];
    let mut graph = Graph::new();
    for (i, text) in texts.iter().enumerate() {
        graph.add_claim(*text, ClaimAttrs::new().with_assumption(i % 2 == 1));
    }

    let text = serialize(&graph);
    let reparsed = parse_default(&text).unwrap_or_else(|err| panic!("{err}\n{text}"));

    assert_eq!(describe(&graph), describe(&reparsed));
}

#[test]
fn test_line_breaks_in_claim_text_become_spaces() {
    let mut graph = Graph::new();
    graph.add_claim("wet\nground", ClaimAttrs::new());

    let reparsed = parse_default(&serialize(&graph)).unwrap();

    let (_, claim) = reparsed.claims().next().unwrap();
    assert_eq!(claim.text(), "wet ground");
}

// ============================================================================
// Round trip property
// ============================================================================

/// A relation as the script sees it: endpoints by position, feeders folded.
#[derive(Debug, PartialEq)]
struct RelationShape {
    sources: Vec<usize>,
    target: Target,
    kind: RelationKind,
    assumption: bool,
    merged: bool,
}

#[derive(Debug, PartialEq)]
enum Target {
    Claim(usize),
    Relation(usize),
}

/// Claims as `(text, assumption, rounded position)` and relations in order,
/// with compound claims and their feeding edges left out.
fn describe(graph: &Graph) -> (Vec<(String, bool, (i64, i64))>, Vec<RelationShape>) {
    let claims: Vec<ClaimId> = graph
        .claims()
        .filter(|(_, claim)| !claim.is_compound())
        .map(|(id, _)| id)
        .collect();
    let relations: Vec<RelationId> = graph
        .relations()
        .filter(|(_, relation)| {
            relation
                .target()
                .as_claim()
                .is_none_or(|target| !graph.claim(target).unwrap().is_compound())
        })
        .map(|(id, _)| id)
        .collect();

    let claim_index = |id: ClaimId| claims.iter().position(|c| *c == id).unwrap();

    let claim_shapes = claims
        .iter()
        .map(|id| {
            let claim = graph.claim(*id).unwrap();
            let position = claim.position();
            (
                claim.text().to_owned(),
                claim.is_assumption(),
                (position.x().round() as i64, position.y().round() as i64),
            )
        })
        .collect();

    let relation_shapes = relations
        .iter()
        .map(|id| {
            let relation = graph.relation(*id).unwrap();
            let sources = if relation.is_merged() {
                graph
                    .incoming(relation.source())
                    .map(|feeder| claim_index(graph.relation(feeder).unwrap().source()))
                    .collect()
            } else {
                vec![claim_index(relation.source())]
            };
            let target = match relation.target() {
                Element::Claim(claim) => Target::Claim(claim_index(claim)),
                Element::Relation(target) => {
                    Target::Relation(relations.iter().position(|r| *r == target).unwrap())
                }
            };
            RelationShape {
                sources,
                target,
                kind: relation.kind(),
                assumption: relation.is_assumption(),
                merged: relation.is_merged(),
            }
        })
        .collect();

    (claim_shapes, relation_shapes)
}

#[derive(Debug, Clone)]
struct ClaimPlan {
    text: String,
    assumption: bool,
    x: i32,
    y: i32,
}

#[derive(Debug, Clone)]
struct RelationPlan {
    sources: Vec<Index>,
    target: Index,
    kind: RelationKind,
    assumption: bool,
}

/// Claim texts, including ones that only survive the script when quoted.
fn claim_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][a-z]{0,8}( [a-z]{1,8}){0,3}",
        "[a-z]{1,8}( [a-z]{1,8}){0,3}",
        "assume( [a-z]{1,8}){0,2}",
        "[a-z]{1,2}( [a-z]{1,2}){0,2} (support|attack|warrant|undercut)s [a-z]{1,2}",
        "[A-Za-z \"]{0,12}",
    ]
}

fn claim_plan() -> impl Strategy<Value = ClaimPlan> {
    (
        claim_text(),
        any::<bool>(),
        -500..500i32,
        -500..500i32,
    )
        .prop_map(|(text, assumption, x, y)| ClaimPlan {
            text,
            assumption,
            x,
            y,
        })
}

fn relation_plan() -> impl Strategy<Value = RelationPlan> {
    (
        prop::collection::vec(any::<Index>(), 1..=3),
        any::<Index>(),
        prop::sample::select(RelationKind::ALL.to_vec()),
        any::<bool>(),
    )
        .prop_map(|(sources, target, kind, assumption)| RelationPlan {
            sources,
            target,
            kind,
            assumption,
        })
}

/// Builds a graph through the model API only.
fn build_graph(claim_plans: &[ClaimPlan], relation_plans: &[RelationPlan]) -> Graph {
    let mut graph = Graph::new();

    let claims: Vec<ClaimId> = claim_plans
        .iter()
        .map(|plan| {
            let id = graph.add_claim(
                plan.text.clone(),
                ClaimAttrs::new().with_assumption(plan.assumption),
            );
            graph.set_claim_position(id, Point::new(plan.x as f32, plan.y as f32));
            id
        })
        .collect();

    let mut targets: Vec<Element> = claims.iter().map(|id| Element::from(*id)).collect();
    for plan in relation_plans {
        let sources: Vec<ClaimId> = plan
            .sources
            .iter()
            .map(|index| *index.get(&claims))
            .collect();
        let target = *plan.target.get(&targets);

        // The script marks a merged relation as assumed when all its sources are
        let all_assumed = sources
            .iter()
            .all(|source| graph.claim(*source).unwrap().is_assumption());
        let assumption = plan.assumption || (sources.len() > 1 && all_assumed);

        let relation = graph
            .add_relation(
                sources,
                target,
                plan.kind,
                RelationAttrs::new().with_assumption(assumption),
            )
            .unwrap();
        targets.push(relation.into());
    }

    graph
}

proptest! {
    #[test]
    fn prop_serialize_then_parse_is_isomorphic(
        claim_plans in prop::collection::vec(claim_plan(), 1..8),
        relation_plans in prop::collection::vec(relation_plan(), 0..8),
    ) {
        let graph = build_graph(&claim_plans, &relation_plans);
        let text = serialize(&graph);
        let reparsed = parse_default(&text).map_err(|err| TestCaseError::fail(format!("{err}\n{text}")))?;

        prop_assert_eq!(graph.claim_count(), reparsed.claim_count());
        prop_assert_eq!(graph.relation_count(), reparsed.relation_count());
        prop_assert_eq!(describe(&graph), describe(&reparsed));
    }

    #[test]
    fn prop_serialization_is_stable(
        claim_plans in prop::collection::vec(claim_plan(), 1..6),
        relation_plans in prop::collection::vec(relation_plan(), 0..6),
    ) {
        let graph = build_graph(&claim_plans, &relation_plans);
        let text = serialize(&graph);
        let reparsed = parse_default(&text).map_err(|err| TestCaseError::fail(format!("{err}")))?;

        prop_assert_eq!(serialize(&reparsed), text);
    }
}
