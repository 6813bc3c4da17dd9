//! Loading descriptions from disk and writing Graphviz output.

use crate::fixtures::ADDER_JSON;
use netlist_paths::{Netlist, NetlistDescription, NetlistError, Options, Waypoints};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adder.json");
    fs::write(&path, ADDER_JSON).unwrap();

    let netlist = Netlist::from_file(&path).unwrap();
    assert_eq!(netlist.graph().vertex_count(), 5);
    assert_eq!(netlist.graph().edge_count(), 4);
    assert!(netlist
        .path_exists(
            &Waypoints::between("adder.i_a", "adder.o_sum"),
            &Options::default()
        )
        .unwrap());

    let port = netlist.vertex("adder.i_b", &Options::default()).unwrap();
    let location = port.location.as_ref().unwrap();
    assert_eq!(location.to_string(), "adder.sv:3:23");
}

#[test]
fn test_loaded_dtypes() {
    let netlist = Netlist::from_json(ADDER_JSON).unwrap();
    let options = Options::default();
    assert_eq!(netlist.vertex_dtype_str("adder.o_sum", &options).unwrap(), "[7:0] logic");
    assert_eq!(netlist.vertex_dtype_str("adder.o_co", &options).unwrap(), "logic");
    assert_eq!(netlist.dtype_width("[7:0] logic").unwrap(), 8);
    assert!(matches!(
        netlist.dtype_width("[3:0] logic").unwrap_err(),
        NetlistError::NotFound { .. }
    ));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Netlist::from_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, NetlistError::Io { .. }));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"vertices\": [").unwrap();
    let err = Netlist::from_file(&path).unwrap_err();
    assert!(matches!(err, NetlistError::Serialization { .. }));
}

#[test]
fn test_description_survives_rewrite() {
    let description = NetlistDescription::from_json(ADDER_JSON).unwrap();
    let rewritten = NetlistDescription::from_json(&description.to_json().unwrap()).unwrap();
    let netlist = Netlist::from_description(&rewritten).unwrap();
    assert_eq!(netlist.named_vertices().len(), 4);
}

#[test]
fn test_dump_dot() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("adder.dot");
    let netlist = Netlist::from_json(ADDER_JSON).unwrap();
    netlist.dump_dot(&path).unwrap();

    let dot = fs::read_to_string(&path).unwrap();
    assert!(dot.starts_with("digraph"));
    assert!(dot.contains("adder.i_a"));
    assert!(dot.contains("ASSIGNW"));
    assert_eq!(dot.matches("->").count(), 4);
}

#[test]
fn test_dump_dot_unwritable() {
    let dir = TempDir::new().unwrap();
    let netlist = Netlist::from_json(ADDER_JSON).unwrap();
    let err = netlist
        .dump_dot(dir.path().join("missing").join("out.dot"))
        .unwrap_err();
    assert!(matches!(err, NetlistError::Io { .. }));
}
