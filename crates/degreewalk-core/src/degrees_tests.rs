//! Tests for the ranked-degree classifier.

use serde_json::json;

use super::degrees::{ranked_degrees, Degree, DegreeBuckets, RANKED_MAX_DEPTH};
use super::test_support::{chain, ids, sample_graph, ScriptedSource};
use super::types::NodeId;

#[test]
fn test_degree_from_depth() {
    assert_eq!(Degree::from_depth(0), None);
    assert_eq!(Degree::from_depth(1), Some(Degree::First));
    assert_eq!(Degree::from_depth(6), Some(Degree::Sixth));
    assert_eq!(Degree::from_depth(7), None);
}

#[test]
fn test_degree_labels_and_depths() {
    let labels: Vec<&str> = Degree::ALL.iter().map(|d| d.label()).collect();
    assert_eq!(labels, vec!["first", "second", "third", "fourth", "fifth", "sixth"]);
    for (i, degree) in Degree::ALL.iter().enumerate() {
        assert_eq!(degree.depth(), i + 1);
    }
    assert_eq!(Degree::Third.to_string(), "third");
}

#[test]
fn test_empty_buckets_serialize_with_all_six_keys() {
    let value = serde_json::to_value(DegreeBuckets::default()).unwrap();
    assert_eq!(
        value,
        json!({
            "first": [], "second": [], "third": [],
            "fourth": [], "fifth": [], "sixth": []
        })
    );
}

#[tokio::test]
async fn test_ranked_sample_graph() {
    let source = sample_graph();
    let ranked = ranked_degrees(&source, &NodeId::from("A")).await.unwrap();
    let buckets = &ranked.buckets;

    assert_eq!(buckets.first, ids(&["B", "D"]));
    assert_eq!(buckets.second, ids(&["C"]));
    assert_eq!(buckets.third, ids(&["E"]));
    assert!(buckets.fourth.is_empty());
    assert!(buckets.fifth.is_empty());
    assert!(buckets.sixth.is_empty());
    assert_eq!(buckets.total(), 4);
    assert_eq!(buckets.degree_of(&NodeId::from("C")), Some(Degree::Second));
    assert_eq!(buckets.degree_of(&NodeId::from("A")), None);
}

#[tokio::test]
async fn test_ranked_stops_at_sixth_degree() {
    let source = chain(10);
    let ranked = ranked_degrees(&source, &NodeId::from("n0")).await.unwrap();

    for degree in Degree::ALL {
        assert_eq!(
            ranked.buckets.get(degree),
            ids(&[format!("n{}", degree.depth()).as_str()]).as_slice()
        );
    }
    assert_eq!(ranked.buckets.total(), RANKED_MAX_DEPTH);

    // Only depths 0..=5 are ever expanded; n6 is recorded, n7 never seen.
    let fetched = source.fetched();
    assert_eq!(fetched, ids(&["n0", "n1", "n2", "n3", "n4", "n5"]));
    assert_eq!(ranked.buckets.degree_of(&NodeId::from("n7")), None);
}

#[tokio::test]
async fn test_ranked_failing_start_yields_empty_buckets() {
    let source = sample_graph().failing("A");
    let ranked = ranked_degrees(&source, &NodeId::from("A")).await.unwrap();

    assert!(ranked.buckets.is_empty());
    assert_eq!(ranked.buckets, DegreeBuckets::default());
    assert_eq!(ranked.stats.failed_fetches, 1);
}

#[tokio::test]
async fn test_ranked_all_empty_neighborhoods() {
    let source = ScriptedSource::new();
    let ranked = ranked_degrees(&source, &NodeId::from("lonely")).await.unwrap();
    assert!(ranked.buckets.is_empty());
}

#[tokio::test]
async fn test_ranked_buckets_are_mutually_exclusive() {
    // Dense graph: every node knows every other node.
    let names = ["a", "b", "c", "d", "e"];
    let mut source = ScriptedSource::new();
    for x in names {
        for y in names {
            if x != y {
                source = source.directed(x, y);
            }
        }
    }
    let ranked = ranked_degrees(&source, &NodeId::from("a")).await.unwrap();

    assert_eq!(ranked.buckets.first, ids(&["b", "c", "d", "e"]));
    assert_eq!(ranked.buckets.total(), 4);
    let iterated: usize = ranked.buckets.iter().map(|(_, nodes)| nodes.len()).sum();
    assert_eq!(iterated, 4);
}

#[tokio::test]
async fn test_ranked_blank_start_errors() {
    let source = sample_graph();
    assert!(ranked_degrees(&source, &NodeId::from("")).await.is_err());
}
