#![no_main]

use libfuzzer_sys::fuzz_target;

use sociograph::{core::consistency::check_consistency, infra::arbitrary::MutOpsSeq, Graph};

fuzz_target!(|ops: MutOpsSeq<u8>| {
    let mut graph = Graph::new();

    for op in ops {
        let before = graph.clone();

        if op.apply(&mut graph).is_err() {
            assert_eq!(graph, before, "failed operation modified the graph");
        }

        check_consistency(graph.storage())
            .as_ref()
            .map_err(ToString::to_string)
            .unwrap();
    }
});
