//! Properties every query must hold regardless of the design.

use crate::fixtures;
use netlist_paths::{Options, Role, SearchLimits, VertexKind, Waypoints};
use pretty_assertions::assert_eq;

#[test]
fn test_three_parallel_branches() {
    let netlist = fixtures::parallel(3);
    let set = netlist
        .all_paths(
            &Waypoints::between("in", "out"),
            &Options::default(),
            SearchLimits::default(),
        )
        .unwrap();
    assert_eq!(set.len(), 3);
    assert!(!set.truncated);
    let numbers: Vec<usize> = set.numbered().map(|(n, _)| n).collect();
    assert_eq!(numbers, vec![0, 1, 2]);
}

#[test]
fn test_all_paths_cap() {
    let netlist = fixtures::parallel(6);
    let set = netlist
        .all_paths(
            &Waypoints::between("in", "out"),
            &Options::default(),
            SearchLimits::new(4),
        )
        .unwrap();
    assert_eq!(set.len(), 4);
    assert!(set.truncated);
}

#[test]
fn test_all_paths_are_simple() {
    let netlist = fixtures::parallel(4);
    let set = netlist
        .all_paths(
            &Waypoints::between("in", "out").through("branch_2"),
            &Options::default(),
            SearchLimits::default(),
        )
        .unwrap();
    assert_eq!(set.len(), 1);
    for path in &set.paths {
        let mut seen = path.clone();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), path.len());
    }
}

#[test]
fn test_queries_are_idempotent() {
    let netlist = fixtures::parallel(5);
    let options = Options::default();
    let waypoints = Waypoints::between("in", "out").avoid("branch_0");
    let first = netlist.any_path(&waypoints, &options).unwrap();
    let second = netlist.any_path(&waypoints, &options).unwrap();
    assert_eq!(first, second);
    let all_first = netlist
        .all_paths(&waypoints, &options, SearchLimits::default())
        .unwrap();
    let all_second = netlist
        .all_paths(&waypoints, &options, SearchLimits::default())
        .unwrap();
    assert_eq!(all_first, all_second);
    assert_eq!(all_first.len(), 4);
}

#[test]
fn test_eligibility_follows_restrict_flags() {
    let netlist = fixtures::pipeline(2);
    let strict = Options::default();
    let loose = Options::default()
        .with_restrict_start_points(false)
        .with_restrict_end_points(false);
    for vertex in netlist.graph().named_vertices() {
        let start = netlist.matcher(&strict).is_eligible(vertex, Role::Start);
        let finish = netlist.matcher(&strict).is_eligible(vertex, Role::Finish);
        assert_eq!(
            start,
            matches!(vertex.kind, VertexKind::Register | VertexKind::InputPort)
        );
        assert_eq!(
            finish,
            matches!(vertex.kind, VertexKind::Register | VertexKind::OutputPort)
        );
        assert!(netlist.matcher(&loose).is_eligible(vertex, Role::Start));
        assert!(netlist.matcher(&loose).is_eligible(vertex, Role::Finish));
    }
}

#[test]
fn test_hierarchy_markers() {
    let netlist = fixtures::hierarchy();
    let literal = Options::default().with_restrict_start_points(false);
    let folded = literal.clone().with_ignore_hierarchy_markers(true);
    for spec in ["a.b.c", "a/b/c", "a_b_c"] {
        assert!(netlist.startpoint_exists(spec, &folded).unwrap(), "{spec}");
    }
    assert!(netlist.startpoint_exists("a.b.c", &literal).unwrap());
    assert!(netlist.startpoint_exists("a/b/c", &literal).unwrap());
    assert!(!netlist.startpoint_exists("a_b_c", &literal).unwrap());
    assert!(netlist.reg_exists("a/b/c_q", &literal).unwrap());
}

#[test]
fn test_through_points_in_order() {
    let netlist = fixtures::pipeline(4);
    let options = Options::default().with_traverse_registers(true);
    let t1 = "pipeline.g_pipestage[1].u_pipestage.data_q";
    let t2 = "pipeline.g_pipestage[2].u_pipestage.data_q";
    let path = netlist
        .any_path(
            &Waypoints::between("pipeline.i_data", "pipeline.o_data")
                .through(t1)
                .through(t2),
            &options,
        )
        .unwrap();
    let position = |name: &str| {
        let id = netlist.graph().find_by_name(name).unwrap().id;
        path.iter().position(|&v| v == id).unwrap()
    };
    assert!(position(t1) < position(t2));
    assert!(position(t2) < path.len() - 1);

    // Reversed order cannot be satisfied in a feed-forward pipeline.
    let reversed = Waypoints::between("pipeline.i_data", "pipeline.o_data")
        .through(t2)
        .through(t1);
    assert!(netlist.any_path(&reversed, &options).unwrap().is_empty());
}

#[test]
fn test_fan_out_count_matches_reachable_endpoints() {
    let netlist = fixtures::parallel(3);
    let loose = Options::default().with_restrict_end_points(false);
    let paths = netlist.fan_out("in", &loose).unwrap();
    // three branch nets and the output
    assert_eq!(paths.len(), 4);
    let strict = netlist.fan_out("in", &Options::default()).unwrap();
    assert_eq!(strict.len(), 1);
}

#[test]
fn test_unmatched_policy() {
    let netlist = fixtures::parallel(2);
    let waypoints = Waypoints::between("in", "nowhere");
    assert!(netlist
        .any_path(&waypoints, &Options::default())
        .unwrap_err()
        .is_resolution());
    let lenient = Options::default().with_error_on_unmatched(false);
    assert!(netlist.any_path(&waypoints, &lenient).unwrap().is_empty());
    assert!(netlist
        .all_paths(&waypoints, &lenient, SearchLimits::default())
        .unwrap()
        .is_empty());
}
