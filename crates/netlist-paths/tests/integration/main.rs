//! Integration tests: whole netlists, queried end to end through [`Netlist`].

mod loading_test;
mod pipeline_test;
mod properties_test;
