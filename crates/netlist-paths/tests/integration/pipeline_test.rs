//! Register traversal and through points on a register pipeline.

use crate::fixtures;
use netlist_paths::{MatchMode, Multiplicity, Options, SearchLimits, Waypoints};

#[test]
fn test_register_blocks_path_without_traversal() {
    let netlist = fixtures::register_between();
    let waypoints = Waypoints::between("in", "out");
    assert!(!netlist.path_exists(&waypoints, &Options::default()).unwrap());
    let transparent = Options::default().with_traverse_registers(true);
    assert!(netlist.path_exists(&waypoints, &transparent).unwrap());
}

#[test]
fn test_register_is_still_a_start_and_finish() {
    let netlist = fixtures::register_between();
    let options = Options::default();
    assert!(netlist
        .path_exists(&Waypoints::between("in", "r"), &options)
        .unwrap());
    assert!(netlist
        .path_exists(&Waypoints::between("r", "out"), &options)
        .unwrap());
}

#[test]
fn test_stage_to_stage() {
    let netlist = fixtures::pipeline(4);
    let options = Options::default();
    for n in 0..3 {
        let waypoints = Waypoints::between(
            format!("pipeline.g_pipestage[{n}].u_pipestage.data_q"),
            format!("pipeline.g_pipestage[{}].u_pipestage.data_q", n + 1),
        );
        assert!(netlist.path_exists(&waypoints, &options).unwrap());
    }
    let skip = Waypoints::between(
        "pipeline.g_pipestage[0].u_pipestage.data_q",
        "pipeline.g_pipestage[2].u_pipestage.data_q",
    );
    assert!(!netlist.path_exists(&skip, &options).unwrap());
}

#[test]
fn test_through_registers_with_traversal() {
    let netlist = fixtures::pipeline(4);
    let options = Options::default().with_traverse_registers(true);
    let waypoints = Waypoints::between("pipeline.i_data", "pipeline.o_data")
        .through("pipeline.g_pipestage[1].u_pipestage.data_q")
        .through("pipeline.g_pipestage[3].u_pipestage.data_q");
    let path = netlist.any_path(&waypoints, &options).unwrap();
    // input, then logic + register per stage, then logic + output
    assert_eq!(path.len(), 1 + 4 * 2 + 2);
    let set = netlist
        .all_paths(&waypoints, &options, SearchLimits::default())
        .unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_through_point_beyond_register_needs_traversal() {
    let netlist = fixtures::pipeline(2);
    let waypoints = Waypoints::between("pipeline.i_data", "pipeline.o_data")
        .through("pipeline.g_pipestage[0].u_pipestage.data_q");
    assert!(netlist
        .any_path(&waypoints, &Options::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_fan_out_stops_at_first_register() {
    let netlist = fixtures::pipeline(3);
    let paths = netlist.fan_out("pipeline.i_data", &Options::default()).unwrap();
    assert_eq!(paths.len(), 1);
    let transparent = Options::default().with_traverse_registers(true);
    let paths = netlist.fan_out("pipeline.i_data", &transparent).unwrap();
    // three registers plus the output
    assert_eq!(paths.len(), 4);
}

#[test]
fn test_wildcard_stage_registers() {
    let netlist = fixtures::pipeline(4);
    let options = Options::default()
        .with_match_mode(MatchMode::Wildcard)
        .with_multiplicity(Multiplicity::AcceptAny);
    let registers = netlist
        .query(&options)
        .registers()
        .pattern("pipeline.g_pipestage[?].u_pipestage.data_q")
        .unwrap()
        .count();
    assert_eq!(registers, 4);
    assert!(netlist
        .path_exists(&Waypoints::between("pipeline.i_data", "*data_q"), &options)
        .unwrap());
}

#[test]
fn test_regex_listing_finds_partial_names() {
    let netlist = fixtures::pipeline(4);
    let options = Options::regex();
    let registers = netlist
        .query(&options)
        .registers()
        .pattern("data_q")
        .unwrap()
        .count();
    assert_eq!(registers, 4);
    let inputs = netlist.query(&options).ports().pattern("i_").unwrap().count();
    assert_eq!(inputs, 1);
    assert!(netlist.any_reg_exists("g_pipestage", &options).unwrap());
}
