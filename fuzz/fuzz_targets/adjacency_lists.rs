#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

use sociograph::{
    core::consistency::check_consistency,
    io::{read_and_fill, read_graph},
    Graph,
};

fuzz_target!(|input: &str| {
    let bulk = read_graph(Cursor::new(input));

    let mut incremental = Graph::new();
    let filled = read_and_fill(&mut incremental, Cursor::new(input));

    if let Ok(graph) = &bulk {
        check_consistency(graph.storage())
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();

        // Symmetric lists are accepted by both loaders with the same result.
        assert!(filled.is_ok());
        assert_eq!(graph, &incremental);
    }

    if filled.is_err() {
        assert!(incremental.is_empty());
    }
});
