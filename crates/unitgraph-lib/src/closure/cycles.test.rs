use super::*;
use crate::metadata::Unit;
use crate::testing::{bundle, needs_bundle};
use std::sync::Arc;

/// One single-unit project per key; `links` are (from, to) bundle requirements
fn chain(keys: &[&str], links: &[(&str, &str)]) -> DependencyClosureGraph {
    let input: Vec<(Project, Vec<Arc<Unit>>)> = keys
        .iter()
        .map(|&key| {
            let mut unit = bundle(key);
            for &(_, to) in links.iter().filter(|(from, _)| *from == key) {
                unit = unit.requires(needs_bundle(to));
            }
            (Project::new(key), vec![unit.build()])
        })
        .collect();
    DependencyClosureGraph::build(input).unwrap()
}

fn p(key: &str) -> Project {
    Project::new(key)
}

#[test]
fn test_two_project_cycle() {
    let graph = chain(&["A", "B"], &[("A", "B"), ("B", "A")]);

    assert_eq!(graph.classify(&p("A"), &p("B")), Some(EdgeKind::Cycle));
    assert_eq!(graph.classify(&p("B"), &p("A")), Some(EdgeKind::Cycle));
    assert!(graph.has_cycles());
    assert_eq!(graph.cycles(), vec![vec![&p("A"), &p("B")]]);
}

#[test]
fn test_three_project_cycle() {
    let graph = chain(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);

    for (from, to) in [("A", "B"), ("B", "C"), ("C", "A")] {
        assert_eq!(graph.classify(&p(from), &p(to)), Some(EdgeKind::Cycle));
    }
    assert_eq!(graph.cycles(), vec![vec![&p("A"), &p("B"), &p("C")]]);
}

#[test]
fn test_breaking_a_link_clears_the_cycle() {
    let graph = chain(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

    assert_eq!(graph.classify(&p("A"), &p("B")), Some(EdgeKind::Dependency));
    assert_eq!(graph.classify(&p("B"), &p("C")), Some(EdgeKind::Dependency));
    assert_eq!(graph.classify(&p("C"), &p("A")), None);
    assert!(!graph.has_cycles());
    assert!(graph.cycles().is_empty());
}

#[test]
fn test_edge_leaving_a_cycle_is_acyclic() {
    let graph = chain(&["A", "B", "C"], &[("A", "B"), ("B", "A"), ("B", "C")]);

    assert_eq!(graph.classify(&p("A"), &p("B")), Some(EdgeKind::Cycle));
    assert_eq!(graph.classify(&p("B"), &p("C")), Some(EdgeKind::Dependency));
}

#[test]
fn test_separate_cycles_in_input_order() {
    let graph = chain(
        &["A", "B", "C", "D"],
        &[("C", "D"), ("D", "C"), ("B", "A"), ("A", "B")],
    );
    assert_eq!(
        graph.cycles(),
        vec![vec![&p("A"), &p("B")], vec![&p("C"), &p("D")]]
    );
}

#[test]
fn test_self_reference_is_not_a_cycle() {
    let graph = chain(&["A", "B"], &[("A", "A"), ("A", "B")]);

    assert_eq!(graph.classify(&p("A"), &p("A")), Some(EdgeKind::SelfReference));
    assert_eq!(graph.classify(&p("A"), &p("B")), Some(EdgeKind::Dependency));
    assert_eq!(graph.classify(&p("B"), &p("B")), None);
    assert!(!graph.has_cycles());
}

#[test]
fn test_unknown_projects_are_unclassified() {
    let graph = chain(&["A"], &[]);
    assert_eq!(graph.classify(&p("A"), &p("Z")), None);
    assert_eq!(graph.classify(&p("Z"), &p("Z")), None);
}

#[test]
fn test_edges_grouped_by_source() {
    let graph = chain(&["A", "B"], &[("A", "B"), ("B", "B"), ("B", "A")]);

    let edges: Vec<(&str, &str, EdgeKind)> = graph
        .edges()
        .iter()
        .map(|edge| (edge.source.key(), edge.target.key(), edge.kind))
        .collect();
    assert_eq!(
        edges,
        vec![
            ("A", "B", EdgeKind::Cycle),
            ("B", "A", EdgeKind::Cycle),
            ("B", "B", EdgeKind::SelfReference),
        ]
    );
}

#[test]
fn test_edge_requirements() {
    let graph = chain(&["A", "B"], &[("A", "B")]);
    let edges = graph.edges();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].requirements.len(), 1);
    assert_eq!(edges[0].requirements[0].to_string(), "osgi.bundle; B");
}

#[test]
fn test_analysis_is_memoised() {
    let graph = chain(&["A", "B"], &[("A", "B"), ("B", "A")]);
    let first = graph.cycle_analysis() as *const CycleAnalysis;
    let second = graph.cycle_analysis() as *const CycleAnalysis;
    assert_eq!(first, second);
}

#[test]
fn test_analysis_shared_across_threads() {
    let graph = chain(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);

    let results: Vec<(usize, Vec<(String, String, EdgeKind)>)> = std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let analysis = graph.cycle_analysis() as *const CycleAnalysis as usize;
                    let edges = graph
                        .edges()
                        .iter()
                        .map(|edge| (edge.source.to_string(), edge.target.to_string(), edge.kind))
                        .collect();
                    (analysis, edges)
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .collect()
    });

    let (analysis, edges) = &results[0];
    assert_eq!(edges.len(), 3);
    assert!(edges.iter().all(|(_, _, kind)| *kind == EdgeKind::Cycle));
    for (other_analysis, other_edges) in &results[1..] {
        assert_eq!(other_analysis, analysis);
        assert_eq!(other_edges, edges);
    }
    assert_eq!(graph.cycle_analysis() as *const CycleAnalysis as usize, *analysis);
}

#[test]
fn test_edge_kind_display() {
    assert_eq!(EdgeKind::Dependency.to_string(), "dependency");
    assert_eq!(EdgeKind::Cycle.to_string(), "cycle");
    assert_eq!(EdgeKind::SelfReference.to_string(), "self-reference");
}
