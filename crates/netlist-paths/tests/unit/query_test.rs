use netlist_paths::{
    helpers, DTypeBuilder, DTypeSortKey, GraphBuilder, Netlist, Options, VertexKind,
    VertexSortKey,
};
use pretty_assertions::assert_eq;

fn fifo() -> Netlist {
    let mut d = DTypeBuilder::new();
    let bit = d.scalar("logic");
    let byte = d.vector("logic", 7, 0);
    let ptr = d.vector("logic", 3, 0);
    let mem = d.array(byte, 15, 0, false);
    d.structure("entry_t", &[("data", byte), ("last", bit)]);
    let dtypes = d.build().unwrap();

    let mut b = GraphBuilder::new();
    let push = helpers::add_typed(&mut b, VertexKind::InputPort, "fifo.i_push", bit).unwrap();
    let data = helpers::add_typed(&mut b, VertexKind::InputPort, "fifo.i_data", byte).unwrap();
    let wr = helpers::add_typed(&mut b, VertexKind::Register, "fifo.wr_ptr_q", ptr).unwrap();
    let storage = helpers::add_typed(&mut b, VertexKind::Variable, "fifo.mem", mem).unwrap();
    let out = helpers::add_typed(&mut b, VertexKind::OutputPort, "fifo.o_data", byte).unwrap();
    let full = helpers::add_net(&mut b, "fifo.full").unwrap();
    helpers::add_assign(&mut b, "ALWAYS", &[push, wr], &[wr]).unwrap();
    helpers::add_assign(&mut b, "ALWAYS", &[data, wr], &[storage]).unwrap();
    helpers::add_assign(&mut b, "ASSIGNW", &[storage], &[out]).unwrap();
    helpers::add_assign(&mut b, "ASSIGNW", &[wr], &[full]).unwrap();
    Netlist::new(b.build(), dtypes)
}

fn names(vertices: &[&netlist_paths::Vertex]) -> Vec<String> {
    vertices.iter().map(|v| v.name().to_string()).collect()
}

#[test]
fn test_logic_is_never_listed() {
    let netlist = fifo();
    let options = Options::default();
    assert_eq!(netlist.query(&options).count(), 6);
    assert!(!netlist
        .query(&options)
        .kinds(&[VertexKind::Logic])
        .exists());
}

#[test]
fn test_ports_sorted_by_direction() {
    let netlist = fifo();
    let options = Options::default();
    let ports = netlist
        .query(&options)
        .ports()
        .sort_by(VertexSortKey::Direction)
        .execute();
    assert_eq!(
        names(&ports),
        vec!["fifo.i_data", "fifo.i_push", "fifo.o_data"]
    );
}

#[test]
fn test_typed_sorted_by_dtype() {
    let netlist = fifo();
    let options = Options::default();
    let typed = netlist
        .query(&options)
        .typed()
        .sort_by(VertexSortKey::DType)
        .execute();
    assert_eq!(typed.len(), 5);
    assert_eq!(
        names(&typed),
        vec![
            "fifo.wr_ptr_q",
            "fifo.i_data",
            "fifo.o_data",
            "fifo.mem",
            "fifo.i_push",
        ]
    );
}

#[test]
fn test_pattern_and_limit() {
    let netlist = fifo();
    let options = Options::wildcard();
    let query = netlist.query(&options).pattern("fifo.*data*").unwrap();
    assert_eq!(query.count(), 2);
    let first = query.sort_by(VertexSortKey::Name).limit(1).execute();
    assert_eq!(names(&first), vec!["fifo.i_data"]);
}

#[test]
fn test_custom_filter() {
    let netlist = fifo();
    let options = Options::default();
    let wide: Vec<String> = netlist
        .query(&options)
        .custom(|v| {
            v.dtype
                .map(|d| netlist.dtype_registry().width(d) >= 4)
                .unwrap_or(false)
        })
        .sort_by(VertexSortKey::Kind)
        .execute()
        .iter()
        .map(|v| v.name().to_string())
        .collect();
    assert_eq!(wide, vec!["fifo.wr_ptr_q", "fifo.i_data", "fifo.o_data"]);
}

#[test]
fn test_register_listing() {
    let netlist = fifo();
    let options = Options::default();
    let registers = netlist.query(&options).registers().execute();
    assert_eq!(names(&registers), vec!["fifo.wr_ptr_q"]);
}

#[test]
fn test_dtype_listing() {
    let netlist = fifo();
    let options = Options::default();
    let named: Vec<String> = netlist
        .dtypes(&options)
        .sort_by(DTypeSortKey::Description)
        .execute()
        .into_iter()
        .map(|(_, description)| description)
        .collect();
    assert_eq!(
        named,
        vec!["[3:0] logic", "[7:0] logic", "logic", "packed struct"]
    );

    let all = netlist.dtypes(&options).include_anonymous().execute();
    assert_eq!(all.len(), 5);
    assert_eq!(all[3].1, "[7:0] logic [15:0]");
}

#[test]
fn test_dtype_pattern() {
    let netlist = fifo();
    let options = Options::wildcard();
    let structs = netlist.dtypes(&options).pattern("*_t").unwrap().execute();
    assert_eq!(structs.len(), 1);
    assert_eq!(structs[0].0.name, "entry_t");
    assert_eq!(netlist.dtype_registry().width(structs[0].0.id), 9);
}
