use netlist_paths::{
    helpers, GraphBuilder, NetlistError, NetlistGraph, Options, PathSearch, SearchLimits,
    Waypoints,
};
use pretty_assertions::assert_eq;

/// `in` fans out to `x` and `y`, which both reach `mid`; `mid` fans out to
/// `p` and `q`, which both reach `out`. Four paths in total.
fn double_diamond() -> NetlistGraph {
    let mut b = GraphBuilder::new();
    let input = helpers::add_input(&mut b, "in").unwrap();
    let mid = helpers::add_net(&mut b, "mid").unwrap();
    let out = helpers::add_output(&mut b, "out").unwrap();
    for name in ["x", "y"] {
        let net = helpers::add_net(&mut b, name).unwrap();
        helpers::connect(&mut b, &[input, net, mid]).unwrap();
    }
    for name in ["p", "q"] {
        let net = helpers::add_net(&mut b, name).unwrap();
        helpers::connect(&mut b, &[mid, net, out]).unwrap();
    }
    b.build()
}

/// A register feeding itself through one logic vertex.
fn counter() -> NetlistGraph {
    let mut b = GraphBuilder::new();
    let count = helpers::add_register(&mut b, "count_q").unwrap();
    helpers::add_assign(&mut b, "ALWAYS", &[count], &[count]).unwrap();
    b.build()
}

fn name_path(graph: &NetlistGraph, path: &[usize]) -> Vec<String> {
    path.iter()
        .map(|&id| graph.vertex(id).unwrap().label())
        .collect()
}

#[test]
fn test_all_paths_double_diamond() {
    let graph = double_diamond();
    let options = Options::default();
    let search = PathSearch::new(&graph, &options);
    let set = search
        .all_paths(&Waypoints::between("in", "out"), SearchLimits::default())
        .unwrap();
    assert_eq!(set.len(), 4);
    let through_mid = search
        .all_paths(
            &Waypoints::between("in", "out").through("mid"),
            SearchLimits::default(),
        )
        .unwrap();
    assert_eq!(through_mid, set);
}

#[test]
fn test_any_path_prefers_first_edge() {
    let graph = double_diamond();
    let options = Options::default();
    let path = PathSearch::new(&graph, &options)
        .any_path(&Waypoints::between("in", "out"))
        .unwrap();
    assert_eq!(name_path(&graph, &path), vec!["in", "x", "mid", "p", "out"]);
}

#[test]
fn test_avoid_removes_branches() {
    let graph = double_diamond();
    let options = Options::default();
    let search = PathSearch::new(&graph, &options);
    let waypoints = Waypoints::between("in", "out").avoid("x").avoid("p");
    let path = search.any_path(&waypoints).unwrap();
    assert_eq!(name_path(&graph, &path), vec!["in", "y", "mid", "q", "out"]);
    let set = search.all_paths(&waypoints, SearchLimits::default()).unwrap();
    assert_eq!(set.len(), 1);

    let cut = Waypoints::between("in", "out").avoid("mid");
    assert!(!search.path_exists(&cut).unwrap());
}

#[test]
fn test_through_avoided_vertex_has_no_path() {
    let graph = double_diamond();
    let options = Options::default();
    let waypoints = Waypoints::between("in", "out").through("x").avoid("x");
    let path = PathSearch::new(&graph, &options).any_path(&waypoints).unwrap();
    assert!(path.is_empty());
}

#[test]
fn test_depth_limit_truncates() {
    let graph = double_diamond();
    let options = Options::default();
    let search = PathSearch::new(&graph, &options);
    let waypoints = Waypoints::between("in", "out");
    let shallow = search
        .all_paths(&waypoints, SearchLimits::unbounded().with_max_depth(3))
        .unwrap();
    assert!(shallow.is_empty());
    assert!(shallow.truncated);
    let deep = search
        .all_paths(&waypoints, SearchLimits::unbounded().with_max_depth(4))
        .unwrap();
    assert_eq!(deep.len(), 4);
}

#[test]
fn test_self_loop_on_register() {
    let graph = counter();
    let options = Options::default();
    let search = PathSearch::new(&graph, &options);
    let waypoints = Waypoints::between("count_q", "count_q");
    let path = search.any_path(&waypoints).unwrap();
    assert_eq!(name_path(&graph, &path), vec!["count_q", "ALWAYS", "count_q"]);
    let set = search.all_paths(&waypoints, SearchLimits::default()).unwrap();
    assert_eq!(set.paths, vec![path]);
}

#[test]
fn test_start_equals_finish_without_cycle() {
    let graph = double_diamond();
    let options = Options::default()
        .with_restrict_start_points(false)
        .with_restrict_end_points(false);
    let search = PathSearch::new(&graph, &options);
    assert!(!search.path_exists(&Waypoints::between("mid", "mid")).unwrap());
}

#[test]
fn test_fan_queries_reject_extra_waypoints() {
    let graph = double_diamond();
    let options = Options::default();
    let search = PathSearch::new(&graph, &options);
    let err = search
        .fan_out(&Waypoints::from_start("in").through("mid"))
        .unwrap_err();
    assert!(matches!(err, NetlistError::Usage { .. }));
    let err = search
        .fan_in(&Waypoints::to_finish("out").avoid("mid"))
        .unwrap_err();
    assert!(matches!(err, NetlistError::Usage { .. }));
    let err = search.fan_out(&Waypoints::between("in", "out")).unwrap_err();
    assert!(matches!(err, NetlistError::Usage { .. }));
}

#[test]
fn test_missing_endpoint_is_usage_error() {
    let graph = double_diamond();
    let options = Options::default();
    let search = PathSearch::new(&graph, &options);
    let err = search.any_path(&Waypoints::from_start("in")).unwrap_err();
    assert!(matches!(err, NetlistError::Usage { .. }));
}

#[test]
fn test_fan_in_paths_run_forward() {
    let graph = double_diamond();
    let options = Options::default().with_restrict_start_points(false);
    let paths = PathSearch::new(&graph, &options)
        .fan_in(&Waypoints::to_finish("out"))
        .unwrap();
    // in, mid, x, y, p, q all reach out
    assert_eq!(paths.len(), 6);
    for path in &paths {
        assert_eq!(graph.vertex(*path.last().unwrap()).unwrap().name(), "out");
    }
    assert_eq!(name_path(&graph, &paths[0]), vec!["in", "x", "mid", "p", "out"]);
}

/// `s -> ta -> tb -> f` through logic, with `ta` and `tb` registers.
fn two_registers() -> NetlistGraph {
    let mut b = GraphBuilder::new();
    let s = helpers::add_input(&mut b, "s").unwrap();
    let ta = helpers::add_register(&mut b, "ta").unwrap();
    let tb = helpers::add_register(&mut b, "tb").unwrap();
    let f = helpers::add_output(&mut b, "f").unwrap();
    helpers::add_assign(&mut b, "ALWAYS", &[s], &[ta]).unwrap();
    helpers::add_assign(&mut b, "ALWAYS", &[ta], &[tb]).unwrap();
    helpers::add_assign(&mut b, "ASSIGNW", &[tb], &[f]).unwrap();
    b.build()
}

#[test]
fn test_several_through_registers_stay_opaque() {
    let graph = two_registers();
    let options = Options::wildcard();
    let search = PathSearch::new(&graph, &options);
    let waypoints = Waypoints::between("s", "f").through("t*");
    assert!(search.any_path(&waypoints).unwrap().is_empty());
    assert!(search
        .all_paths(&waypoints, SearchLimits::default())
        .unwrap()
        .is_empty());

    let transparent = Options::wildcard().with_traverse_registers(true);
    let search = PathSearch::new(&graph, &transparent);
    let path = search.any_path(&waypoints).unwrap();
    assert_eq!(path.len(), 7);
    assert_eq!(
        search
            .all_paths(&waypoints, SearchLimits::default())
            .unwrap()
            .paths,
        vec![path]
    );
}

#[test]
fn test_depth_limit_ignores_dead_ends() {
    let mut b = GraphBuilder::new();
    let input = helpers::add_input(&mut b, "in").unwrap();
    let dead = helpers::add_net(&mut b, "dead").unwrap();
    let out = helpers::add_output(&mut b, "out").unwrap();
    helpers::add_assign(&mut b, "ASSIGN", &[input], &[dead]).unwrap();
    helpers::add_assign(&mut b, "ASSIGN", &[input], &[out]).unwrap();
    let graph = b.build();
    let options = Options::default();
    let set = PathSearch::new(&graph, &options)
        .all_paths(
            &Waypoints::between("in", "out"),
            SearchLimits::unbounded().with_max_depth(2),
        )
        .unwrap();
    assert_eq!(set.len(), 1);
    assert!(!set.truncated);
}
