use super::*;
use crate::metadata::{Capability, Version};
use crate::testing::{bundle, fragment, needs_bundle as needs};

fn v1() -> Version {
    Version::new(1, 0, 0)
}

fn project(key: &str) -> Project {
    Project::new(key)
}

fn ids(units: &[&Arc<Unit>]) -> Vec<String> {
    units.iter().map(|unit| unit.id().to_string()).collect()
}

#[test]
fn test_basic_edge_discovery() {
    let a = bundle("a").requires(needs("b")).build();
    let b = bundle("b").build();
    let graph = DependencyClosureGraph::build(vec![
        (project("A"), vec![a]),
        (project("B"), vec![Arc::clone(&b)]),
    ])
    .unwrap();

    let deps = graph.project_dependencies(&project("A")).dependencies(&[]);
    assert_eq!(deps.len(), 1);
    assert!(Arc::ptr_eq(deps[0], &b));
    assert_eq!(graph.project(deps[0]), Some(&project("B")));
    assert_eq!(graph.dependency_projects(&project("A")), vec![&project("B")]);
    assert!(graph.project_dependencies(&project("B")).is_empty());
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_self_satisfaction_is_not_a_dependency() {
    let a = bundle("a").requires(needs("a")).build();
    let graph = DependencyClosureGraph::build(vec![(project("A"), vec![a])]).unwrap();

    assert!(graph.project_dependencies(&project("A")).dependencies(&[]).is_empty());
    assert_eq!(graph.edge_count(), 0);

    let markers = graph.self_references();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].project, &project("A"));
    assert_eq!(markers[0].unit.id(), "a");
    assert_eq!(markers[0].requirement.name, "a");
}

#[test]
fn test_meta_requirements_never_produce_edges() {
    let a = bundle("a").meta_requires(needs("b")).build();
    let b = bundle("b").build();
    let graph =
        DependencyClosureGraph::build(vec![(project("A"), vec![a]), (project("B"), vec![b])])
            .unwrap();

    assert!(graph.project_dependencies(&project("A")).is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.unsatisfied_requirements().is_empty());
}

#[test]
fn test_same_project_provider_is_dropped_silently() {
    let a1 = bundle("a1").requires(needs("a2")).build();
    let a2 = bundle("a2").build();
    let graph = DependencyClosureGraph::build(vec![(project("A"), vec![a1, a2])]).unwrap();

    assert!(graph.project_dependencies(&project("A")).is_empty());
    assert!(graph.self_references().is_empty());
    assert!(graph.unsatisfied_requirements().is_empty());
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_providers_in_own_and_other_project() {
    // a2 inside A and b outside both provide the package
    let a1 = bundle("a1")
        .requires(Requirement::new("java.package", "shared.api"))
        .build();
    let a2 = bundle("a2")
        .provides(Capability::new("java.package", "shared.api", v1()))
        .build();
    let b = bundle("b")
        .provides(Capability::new("java.package", "shared.api", v1()))
        .build();
    let graph = DependencyClosureGraph::build(vec![
        (project("A"), vec![a1, a2]),
        (project("B"), vec![b]),
    ])
    .unwrap();

    let deps = graph.project_dependencies(&project("A")).dependencies(&[]);
    assert_eq!(ids(&deps), vec!["b"]);
}

#[test]
fn test_unsatisfied_requirements_are_reported() {
    let a = bundle("a")
        .requires(needs("missing"))
        .requires(needs("b"))
        .build();
    let b = bundle("b").build();
    let graph =
        DependencyClosureGraph::build(vec![(project("A"), vec![a]), (project("B"), vec![b])])
            .unwrap();

    let unsatisfied = graph.unsatisfied_requirements();
    assert_eq!(unsatisfied.len(), 1);
    assert_eq!(unsatisfied[0].project, &project("A"));
    assert_eq!(unsatisfied[0].requirement.name, "missing");
    assert_eq!(graph.dependency_projects(&project("A")), vec![&project("B")]);
}

#[test]
fn test_empty_project_is_rejected() {
    let err = DependencyClosureGraph::build(vec![(project("A"), Vec::new())]).unwrap_err();
    assert!(matches!(err, ClosureError::EmptyProject { ref project } if project == "A"));
}

#[test]
fn test_duplicate_project_is_rejected() {
    let err = DependencyClosureGraph::build(vec![
        (project("A"), vec![bundle("a").build()]),
        (project("A"), vec![bundle("a2").build()]),
    ])
    .unwrap_err();
    assert!(matches!(err, ClosureError::DuplicateProject { .. }));
}

#[test]
fn test_unit_shared_between_projects_is_rejected() {
    let shared = bundle("shared").build();
    let err = DependencyClosureGraph::build(vec![
        (project("A"), vec![Arc::clone(&shared)]),
        (project("B"), vec![shared]),
    ])
    .unwrap_err();

    match err {
        ClosureError::SharedUnit {
            unit,
            first,
            second,
        } => {
            assert_eq!(unit, "shared 1.0.0");
            assert_eq!(first, "A");
            assert_eq!(second, "B");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unit_listed_twice_in_one_project_is_rejected() {
    let unit = bundle("a").build();
    let err =
        DependencyClosureGraph::build(vec![(project("A"), vec![Arc::clone(&unit), unit])])
            .unwrap_err();
    assert!(matches!(err, ClosureError::SharedUnit { .. }));
}

#[test]
fn test_unknown_project_yields_empty_results() {
    let graph = DependencyClosureGraph::build(vec![(project("A"), vec![bundle("a").build()])])
        .unwrap();
    let unknown = project("nope");

    let view = graph.project_dependencies(&unknown);
    assert!(view.is_empty());
    assert!(view.owner().is_none());
    assert!(view.dependencies(&[]).is_empty());
    assert!(graph.project_units(&unknown).is_empty());
    assert!(graph.dependency_projects(&unknown).is_empty());
    assert!(!graph.is_fragment(&unknown));
}

#[test]
fn test_unit_lookup_uses_instance_identity() {
    let a = bundle("a").build();
    let graph =
        DependencyClosureGraph::build(vec![(project("A"), vec![Arc::clone(&a)])]).unwrap();

    assert_eq!(graph.project(&a), Some(&project("A")));
    // equal id and version, different instance
    let lookalike = bundle("a").build();
    assert_eq!(graph.project(&lookalike), None);
}

#[test]
fn test_equal_units_in_different_projects_stay_distinct() {
    let b1 = bundle("b").build();
    let b2 = bundle("b").build();
    let c = bundle("c").requires(needs("b")).build();
    let graph = DependencyClosureGraph::build(vec![
        (project("B1"), vec![Arc::clone(&b1)]),
        (project("B2"), vec![Arc::clone(&b2)]),
        (project("C"), vec![c]),
    ])
    .unwrap();

    let deps = graph.project_dependencies(&project("C")).dependencies(&[]);
    assert_eq!(deps.len(), 2);
    assert!(Arc::ptr_eq(deps[0], &b1));
    assert!(Arc::ptr_eq(deps[1], &b2));
    assert_eq!(
        graph.dependency_projects(&project("C")),
        vec![&project("B1"), &project("B2")]
    );
    assert_eq!(graph.project(&b2), Some(&project("B2")));
}

#[test]
fn test_indexed_and_naive_scans_agree() {
    let input = vec![
        (
            project("A"),
            vec![
                bundle("a")
                    .requires(needs("b"))
                    .requires(Requirement::new("java.package", "c.api"))
                    .requires(needs("missing"))
                    .build(),
            ],
        ),
        (
            project("B"),
            vec![bundle("b").requires(needs("b")).requires(needs("a")).build()],
        ),
        (
            project("C"),
            vec![
                bundle("c")
                    .provides(Capability::new("java.package", "c.api", v1()))
                    .requires(needs("b").with_range("[2.0,3.0)".parse().unwrap()))
                    .build(),
            ],
        ),
    ];

    let indexed = DependencyClosureGraph::build_with(
        input.clone(),
        &BuildOptions {
            jobs: None,
            index_capabilities: true,
        },
    )
    .unwrap();
    let naive = DependencyClosureGraph::build_with(
        input,
        &BuildOptions {
            jobs: Some(2),
            index_capabilities: false,
        },
    )
    .unwrap();

    for key in ["A", "B", "C"] {
        let left = indexed.project_dependencies(&project(key)).dependencies(&[]);
        let right = naive.project_dependencies(&project(key)).dependencies(&[]);
        assert_eq!(left.len(), right.len(), "project {key}");
        for (l, r) in left.iter().zip(&right) {
            assert!(Arc::ptr_eq(l, r));
        }
    }
    assert_eq!(indexed.edge_count(), naive.edge_count());
    assert_eq!(
        indexed.unsatisfied_requirements().len(),
        naive.unsatisfied_requirements().len()
    );
    assert_eq!(indexed.self_references().len(), naive.self_references().len());
}

#[test]
fn test_dedicated_thread_pool() {
    let a = bundle("a").requires(needs("b")).build();
    let b = bundle("b").build();
    let options = BuildOptions {
        jobs: Some(1),
        ..BuildOptions::default()
    };
    let graph = DependencyClosureGraph::build_with(
        vec![(project("A"), vec![a]), (project("B"), vec![b])],
        &options,
    )
    .unwrap();
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_projects_and_counts() {
    let graph = DependencyClosureGraph::build(vec![
        (project("A"), vec![bundle("a").build(), bundle("a.tests").build()]),
        (project("B"), vec![bundle("b").build()]),
    ])
    .unwrap();

    let keys: Vec<&str> = graph.projects().map(Project::key).collect();
    assert_eq!(keys, vec!["A", "B"]);
    assert_eq!(graph.project_count(), 2);
    assert_eq!(graph.unit_count(), 3);
    assert_eq!(graph.project_units(&project("A")).len(), 2);
    assert_eq!(graph.dependencies().count(), 2);
}

#[test]
fn test_fragment_projects() {
    let host = bundle("host").build();
    let linux = fragment("host.linux", "host").build();
    let graph = DependencyClosureGraph::build(vec![
        (project("host"), vec![host]),
        (project("host.linux"), vec![linux]),
    ])
    .unwrap();

    assert!(graph.is_fragment(&project("host.linux")));
    assert!(!graph.is_fragment(&project("host")));
}
