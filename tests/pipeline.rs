use std::collections::HashMap;

use actorgraph::actor::{ActorParser, NameType};
use actorgraph::clustering::{combine, ActorStats, ClusterIndex};
use actorgraph::graph::IdentityGraph;
use actorgraph::similarity::{SimilarityCheck, SimilarityEvaluator, SimilaritySettings};
use pretty_assertions::assert_eq;

const AUTHORS: &str = "\
# name <email>\tcounts
John Smith <john.smith@example.com>\tauthor_commits=10\tcommitter_commits=2
<john.smith257@example.com>\tauthor_commits=3
Jane Williams <jane@company.test>\tauthor_commits=5
Smith, John <john.smith@company.test>\tauthor_commits=1\tcommitter_commits=1
CI <ci@builds.example.net>\tcommitter_commits=40
";

fn resolve(parser: &ActorParser) -> (IdentityGraph, HashMap<String, ActorStats>) {
    let mut graph = IdentityGraph::new(SimilarityEvaluator::default());
    let mut stats = HashMap::new();
    for line in AUTHORS.lines() {
        let Some(record) = ActorStats::parse_line(line).unwrap() else {
            continue;
        };
        let actor = parser.parse_actor(&record.name, &record.email, true);
        stats.insert(
            actor.actor_id().to_string(),
            ActorStats {
                actor_id: actor.actor_id().to_string(),
                name: actor.name().to_string(),
                email: actor.email().to_string(),
                counts: record.counts,
            },
        );
        graph.add_actor(actor, true);
    }
    (graph, stats)
}

#[test]
fn test_pipeline_groups_and_combines() {
    let parser = ActorParser::bundled().unwrap();
    let (graph, stats) = resolve(&parser);
    assert_eq!(graph.len(), 5);

    let clusters = graph.group_similar_actors();
    let ids: Vec<Vec<String>> = clusters.iter().map(|c| c.actor_ids().to_vec()).collect();
    assert_eq!(
        ids,
        vec![
            vec![
                "john smith <john.smith@example.com>".to_string(),
                "john smith <john.smith257@example.com>".to_string(),
                "smith, john <john.smith@company.test>".to_string(),
            ],
            vec!["jane williams <jane@company.test>".to_string()],
            vec!["ci <ci@builds.example.net>".to_string()],
        ]
    );

    let john = combine(&clusters[0], &stats).unwrap();
    assert_eq!(john.name, "John Smith");
    assert_eq!(john.email, "john.smith@example.com");
    assert_eq!(john.counts.get("author_commits"), Some(&14));
    assert_eq!(john.counts.get("committer_commits"), Some(&3));

    let bot = combine(&clusters[2], &stats).unwrap();
    assert_eq!(bot.counts.get("committer_commits"), Some(&40));

    let index = ClusterIndex::new(&clusters);
    assert_eq!(
        index.canonical_id("Smith, John", "John.Smith@company.test"),
        Some("john smith <john.smith@example.com>")
    );
    assert_eq!(
        index.canonical_id("Jane Williams", "jane@company.test"),
        Some("jane williams <jane@company.test>")
    );
}

#[test]
fn test_similarity_report_lists_group_edges() {
    let parser = ActorParser::bundled().unwrap();
    let (graph, _) = resolve(&parser);

    let report = graph.similarity_report();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].actor_ids.len(), 3);
    assert!(!report[0].edges.is_empty());
    assert!(report[0]
        .edges
        .iter()
        .all(|e| e.edge.similarity.as_ref().is_some_and(|s| s.possible)));
}

#[test]
fn test_email_name_scenario() {
    let parser = ActorParser::bundled().unwrap();
    let a = parser.parse_actor("John Smith", "john.smith@example.com", true);
    let b = parser.parse_actor("", "john.smith257@example.com", true);

    assert!(a.parsed_email().parsed_local_name.name.contains("john smith"));
    assert!(b.parsed_email().parsed_local_name.name.contains("john smith"));

    let similarity = SimilarityEvaluator::default().evaluate(&a, &b);
    assert!(similarity.possible);
    assert_eq!(similarity.matched_check, Some(SimilarityCheck::SimilarEmails));
}

#[test]
fn test_missing_domain_scenario() {
    let parser = ActorParser::bundled().unwrap();
    let a = parser.parse_actor("Smith", "john.smith", true);
    let b = parser.parse_actor("John Smith", "john.smith@example.com", true);

    assert!(!a.parsed_email().valid);
    assert_eq!(a.parsed_email().domain, "");

    let similarity = SimilarityEvaluator::default().evaluate(&a, &b);
    assert_eq!(similarity.email_domain_ratio, 0);
}

#[test]
fn test_role_scenario() {
    let mut parser = ActorParser::bundled().unwrap();
    parser.add_role_names([("ci", "automation")]);

    let ci = parser.parse_name("CI");
    assert_eq!(ci.name_type, NameType::Role("automation".to_string()));

    let bot = parser.parse_actor("CI", "ci@example.com", true);
    let person = parser.parse_actor("Jane Williams", "jane@example.com", true);
    let lenient = SimilarityEvaluator::new(SimilaritySettings {
        min_name_ratio: 0,
        ..SimilaritySettings::default()
    });
    let similarity = lenient.evaluate(&bot, &person);
    assert!(!similarity.proper_name_1);
    assert!(similarity.proper_name_2);
    assert!(!lenient.check(SimilarityCheck::SimilarProperNames, &similarity));
}

#[test]
fn test_actor_id_is_case_insensitive() {
    let parser = ActorParser::bundled().unwrap();
    assert_eq!(
        parser.parse_actor("John", "X@Y.com", true).actor_id(),
        parser.parse_actor("john", "x@y.com", true).actor_id()
    );
}

#[test]
fn test_manual_links_are_transitive() {
    let parser = ActorParser::bundled().unwrap();
    let mut graph = IdentityGraph::default();
    let ids: Vec<String> = [
        ("Alice", "alice@one.test"),
        ("Bob", "bob@two.test"),
        ("Carol", "carol@three.test"),
    ]
    .iter()
    .map(|(name, email)| {
        let actor = parser.parse_actor(name, email, true);
        let id = actor.actor_id().to_string();
        graph.add_actor(actor, false);
        id
    })
    .collect();

    graph.link(&ids[0], &ids[1], 1.0).unwrap();
    graph.link(&ids[1], &ids[2], 0.2).unwrap();
    assert!(graph.edge(&ids[0], &ids[2]).is_none());

    let clusters = graph.group_similar_actors();
    assert_eq!(clusters.len(), 1);
    assert_eq!(clusters[0].actor_ids(), ids.as_slice());
}
