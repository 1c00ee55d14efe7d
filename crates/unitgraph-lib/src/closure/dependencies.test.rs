use super::*;
use crate::metadata::{Capability, Unit, Version};
use crate::testing::{build_input, bundle, feature, needs_bundle, needs_package};

fn ids(units: &[&Arc<Unit>]) -> Vec<String> {
    units.iter().map(|unit| unit.id().to_string()).collect()
}

/// A needs bundle b, bundle c and the feature f
fn sample() -> DependencyClosureGraph {
    let a = bundle("a")
        .requires(needs_bundle("b"))
        .requires(needs_bundle("c"))
        .requires(Requirement::new("org.eclipse.equinox.p2.iu", "f.feature.group"))
        .build();
    DependencyClosureGraph::build(build_input([
        ("A", vec![a]),
        ("B", vec![bundle("b").build()]),
        ("C", vec![bundle("c").build()]),
        ("F", vec![feature("f.feature.group").build()]),
    ]))
    .unwrap()
}

#[test]
fn test_dependencies_in_discovery_order() {
    let graph = sample();
    let view = graph.project_dependencies(&Project::new("A"));
    assert_eq!(ids(&view.dependencies(&[])), vec!["b", "c", "f.feature.group"]);
    assert_eq!(view.owner(), Some(&Project::new("A")));
}

#[test]
fn test_excluding_kinds() {
    let graph = sample();
    let view = graph.project_dependencies(&Project::new("A"));

    assert_eq!(ids(&view.dependencies(&[UnitKind::Feature])), vec!["b", "c"]);
    assert_eq!(
        ids(&view.dependencies(&[UnitKind::Bundle])),
        vec!["f.feature.group"]
    );
    assert!(view.dependencies(&[UnitKind::Bundle, UnitKind::Feature]).is_empty());
    // excluding a kind nobody has changes nothing
    assert_eq!(view.dependencies(&[UnitKind::Product]).len(), 3);
}

#[test]
fn test_repeated_queries_are_identical() {
    let graph = sample();
    let view = graph.project_dependencies(&Project::new("A"));

    let first = view.dependencies(&[UnitKind::Feature]);
    let second = view.dependencies(&[UnitKind::Feature]);
    assert_eq!(first.len(), second.len());
    for (left, right) in first.iter().zip(&second) {
        assert!(Arc::ptr_eq(left, right));
    }
}

#[test]
fn test_provider_listed_once_for_several_requirements() {
    let a = bundle("a")
        .requires(needs_bundle("b"))
        .requires(needs_package("b.api"))
        .build();
    let b = bundle("b")
        .provides(Capability::new("java.package", "b.api", Version::new(1, 0, 0)))
        .build();
    let graph = DependencyClosureGraph::build(build_input([("A", vec![a]), ("B", vec![b])])).unwrap();

    let view = graph.project_dependencies(&Project::new("A"));
    assert_eq!(ids(&view.dependencies(&[])), vec!["b"]);
    assert_eq!(view.projects(), vec![&Project::new("B")]);
    assert_eq!(view.requirements().count(), 2);
}

#[test]
fn test_context_skips_satisfied_requirements() {
    let graph = sample();
    let view = graph.project_dependencies(&Project::new("A"));

    let b = Arc::clone(&graph.project_units(&Project::new("B"))[0]);
    assert_eq!(ids(&view.dependencies_with_context(&[b])), vec!["c", "f.feature.group"]);
}

#[test]
fn test_context_matches_by_capability_not_identity() {
    let graph = sample();
    let view = graph.project_dependencies(&Project::new("A"));

    // an outside unit that also provides bundle c
    let stand_in = bundle("c").build();
    assert_eq!(
        ids(&view.dependencies_with_context(&[stand_in])),
        vec!["b", "f.feature.group"]
    );
    assert_eq!(view.dependencies_with_context(&[]).len(), 3);
}

#[test]
fn test_requirements_pair_with_providers() {
    let graph = sample();
    let view = graph.project_dependencies(&Project::new("A"));

    let pairs: Vec<(String, Vec<String>)> = view
        .requirements()
        .map(|(req, providers)| (req.name.clone(), ids(&providers)))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("b".to_string(), vec!["b".to_string()]),
            ("c".to_string(), vec!["c".to_string()]),
            ("f.feature.group".to_string(), vec!["f.feature.group".to_string()]),
        ]
    );
}

#[test]
fn test_projects_of_view() {
    let graph = sample();
    let keys: Vec<&str> = graph
        .project_dependencies(&Project::new("A"))
        .projects()
        .into_iter()
        .map(Project::key)
        .collect();
    assert_eq!(keys, vec!["B", "C", "F"]);
}
