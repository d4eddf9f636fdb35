//! Tests for the frontier-driven BFS and the direct-neighbor query.

use super::error::Error;
use super::test_support::{chain, ids, sample_graph, ScriptedSource};
use super::traversal::{direct_neighbors, traverse};
use super::types::NodeId;

fn id(raw: &str) -> NodeId {
    NodeId::from(raw)
}

// ── BFS Tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_bfs_sample_graph_layers() {
    let source = sample_graph();
    let result = traverse(&source, &id("A"), 6).await.unwrap();

    assert_eq!(result.layers.ids_at(1), ids(&["B", "D"]));
    assert_eq!(result.layers.ids_at(2), ids(&["C"]));
    assert_eq!(result.layers.ids_at(3), ids(&["E"]));
    assert_eq!(result.layers.depths().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(result.layers.ids_at(4).is_empty());
    assert_eq!(result.layers.len(), 4);
}

#[tokio::test]
async fn test_bfs_start_never_in_result() {
    let source = sample_graph();
    let result = traverse(&source, &id("A"), 6).await.unwrap();
    assert_eq!(result.layers.depth_of(&id("A")), None);
    assert_eq!(result.start, id("A"));
}

#[tokio::test]
async fn test_bfs_path_tracking() {
    let source = sample_graph();
    let result = traverse(&source, &id("A"), 6).await.unwrap();

    assert_eq!(result.layers.path_to(&id("B")).unwrap(), ids(&["A", "B"]).as_slice());
    assert_eq!(
        result.layers.path_to(&id("E")).unwrap(),
        ids(&["A", "B", "C", "E"]).as_slice()
    );
    assert!(result.layers.path_to(&id("Z")).is_none());
}

#[tokio::test]
async fn test_bfs_max_depth_records_but_does_not_expand_boundary() {
    let source = chain(5);
    let result = traverse(&source, &id("n0"), 2).await.unwrap();

    assert_eq!(result.layers.ids_at(1), ids(&["n1"]));
    assert_eq!(result.layers.ids_at(2), ids(&["n2"]));
    assert_eq!(result.layers.len(), 2);
    // n2 sits at the bound: recorded, never fetched.
    assert_eq!(source.fetched(), ids(&["n0", "n1"]));
}

#[tokio::test]
async fn test_bfs_zero_depth_fetches_nothing() {
    let source = sample_graph();
    let result = traverse(&source, &id("A"), 0).await.unwrap();
    assert!(result.layers.is_empty());
    assert!(source.fetched().is_empty());
}

#[tokio::test]
async fn test_bfs_diamond_no_duplicates() {
    // A -> B, A -> C, B -> D, C -> D: D is reached twice, admitted once via B.
    let source = ScriptedSource::new()
        .directed("A", "B")
        .directed("A", "C")
        .directed("B", "D")
        .directed("C", "D");
    let result = traverse(&source, &id("A"), 10).await.unwrap();

    assert_eq!(result.layers.ids_at(1), ids(&["B", "C"]));
    assert_eq!(result.layers.ids_at(2), ids(&["D"]));
    assert_eq!(result.layers.path_to(&id("D")).unwrap(), ids(&["A", "B", "D"]).as_slice());
    assert_eq!(result.stats.nodes_discovered, 3);
}

#[tokio::test]
async fn test_bfs_cycle_terminates() {
    let source = ScriptedSource::new()
        .directed("A", "B")
        .directed("B", "C")
        .directed("C", "A");
    let result = traverse(&source, &id("A"), 10).await.unwrap();

    assert_eq!(result.layers.len(), 2);
    assert_eq!(source.fetched(), ids(&["A", "B", "C"]));
}

#[tokio::test]
async fn test_bfs_neighbor_order_follows_source_order() {
    let source = ScriptedSource::new()
        .neighbors("S", &["Z", "M", "A"])
        .neighbors("Z", &["Q"])
        .neighbors("A", &["P"]);
    let result = traverse(&source, &id("S"), 3).await.unwrap();

    assert_eq!(result.layers.ids_at(1), ids(&["Z", "M", "A"]));
    // Parents dequeued Z, M, A: children follow that order.
    assert_eq!(result.layers.ids_at(2), ids(&["Q", "P"]));
}

#[tokio::test]
async fn test_bfs_duplicate_neighbors_in_one_answer() {
    let source = ScriptedSource::new().neighbors("S", &["X", "X", "S", "Y"]);
    let result = traverse(&source, &id("S"), 2).await.unwrap();
    assert_eq!(result.layers.ids_at(1), ids(&["X", "Y"]));
}

#[tokio::test]
async fn test_bfs_unknown_start_is_empty() {
    let source = sample_graph();
    let result = traverse(&source, &id("nobody"), 6).await.unwrap();
    assert!(result.layers.is_empty());
    assert_eq!(result.stats.neighbor_fetches, 1);
}

#[tokio::test]
async fn test_bfs_blank_start_is_rejected_before_fetching() {
    let source = sample_graph();
    let err = traverse(&source, &id("  "), 6).await.unwrap_err();
    assert!(matches!(err, Error::InvalidStartId(_)));
    assert!(source.fetched().is_empty());
}

#[tokio::test]
async fn test_bfs_failed_fetch_is_treated_as_empty() {
    // B fails: C and E become unreachable, D is unaffected.
    let source = sample_graph().failing("B");
    let result = traverse(&source, &id("A"), 6).await.unwrap();

    assert_eq!(result.layers.ids_at(1), ids(&["B", "D"]));
    assert!(result.layers.ids_at(2).is_empty());
    assert_eq!(result.stats.failed_fetches, 1);
    assert_eq!(result.stats.neighbor_fetches, 3);
}

#[tokio::test]
async fn test_bfs_failed_start_fetch_is_empty_result() {
    let source = sample_graph().failing("A");
    let result = traverse(&source, &id("A"), 6).await.unwrap();
    assert!(result.layers.is_empty());
    assert_eq!(result.stats.failed_fetches, 1);
}

#[tokio::test]
async fn test_bfs_stats() {
    let source = sample_graph();
    let result = traverse(&source, &id("A"), 6).await.unwrap();

    assert_eq!(result.stats.nodes_expanded, 5);
    assert_eq!(result.stats.neighbor_fetches, 5);
    assert_eq!(result.stats.nodes_discovered, 4);
    assert_eq!(result.stats.failed_fetches, 0);
    assert_eq!(result.stats.attribute_batches, 0);
}

#[tokio::test]
async fn test_layer_map_iter_and_into_layers() {
    let source = sample_graph();
    let layers = traverse(&source, &id("A"), 6).await.unwrap().layers;

    let sizes: Vec<(usize, usize)> = layers.iter().map(|(d, s)| (d, s.len())).collect();
    assert_eq!(sizes, vec![(1, 2), (2, 1), (3, 1)]);
    assert_eq!(layers.layer_count(), 3);

    let raw = layers.into_layers();
    assert_eq!(raw[&3][0].node_id, id("E"));
    assert_eq!(raw[&3][0].depth, 3);
}

// ── Direct neighbor Tests ──────────────────────────────────────────

#[tokio::test]
async fn test_direct_neighbors() {
    let source = sample_graph();
    let neighbors = direct_neighbors(&source, &id("A")).await.unwrap();
    assert_eq!(neighbors, ids(&["B", "D"]));
    assert_eq!(source.fetched(), ids(&["A"]));
}

#[tokio::test]
async fn test_direct_neighbors_deduplicates_and_skips_self() {
    let source = ScriptedSource::new().neighbors("S", &["X", "S", "X", "Y"]);
    let neighbors = direct_neighbors(&source, &id("S")).await.unwrap();
    assert_eq!(neighbors, ids(&["X", "Y"]));
}

#[tokio::test]
async fn test_direct_neighbors_failure_is_empty() {
    let source = sample_graph().failing("A");
    let neighbors = direct_neighbors(&source, &id("A")).await.unwrap();
    assert!(neighbors.is_empty());
}

#[tokio::test]
async fn test_direct_neighbors_blank_id_is_rejected() {
    let source = sample_graph();
    assert!(direct_neighbors(&source, &id("")).await.is_err());
}
