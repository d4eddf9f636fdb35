//! Shared helpers for integration tests.

#![allow(dead_code)]

use degreewalk_core::{Direction, GraphNode, InMemoryGraph, NeighborPolicy};
use serde_json::json;

/// Installs a test subscriber honoring `RUST_LOG`; safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const PEOPLE: [(&str, &str, &str); 10] = [
    ("ishan", "Ishan", "iphone16"),
    ("riya", "Riya", "iphone15"),
    ("karan", "Karan", "iphone14"),
    ("meera", "Meera", "iphone13"),
    ("neel", "Neel", "iphone12"),
    ("tara", "Tara", "iphone15"),
    ("aarav", "Aarav", "iphone14"),
    ("anita", "Anita", "iphone13"),
    ("rohit", "Rohit", "iphone12"),
    ("pooja", "Pooja", "iphone15"),
];

const KNOWS: [(&str, &str); 14] = [
    ("ishan", "riya"),
    ("riya", "ishan"),
    ("karan", "riya"),
    ("riya", "karan"),
    ("karan", "meera"),
    ("meera", "neel"),
    ("neel", "tara"),
    ("tara", "aarav"),
    ("aarav", "anita"),
    ("anita", "rohit"),
    ("rohit", "pooja"),
    ("ishan", "neel"),
    ("karan", "tara"),
    ("anita", "pooja"),
];

/// Ten people, one phone each, linked by `knows`.
pub fn phone_network(direction: Direction) -> InMemoryGraph {
    let mut graph = InMemoryGraph::with_policy(NeighborPolicy::new(&["knows"], direction));

    for n in 12..=16 {
        graph
            .add_node(
                GraphNode::new(format!("phone:iphone{n}"), "phone")
                    .with_property("model", json!(format!("iPhone {n}"))),
            )
            .expect("add phone");
    }
    for (key, name, phone) in PEOPLE {
        graph
            .add_node(GraphNode::new(format!("person:{key}"), "person").with_property("name", json!(name)))
            .expect("add person");
        graph
            .relate(&format!("person:{key}"), "owns", &format!("phone:{phone}"))
            .expect("relate owns");
    }
    for (from, to) in KNOWS {
        graph
            .relate(&format!("person:{from}"), "knows", &format!("person:{to}"))
            .expect("relate knows");
    }
    graph
}
