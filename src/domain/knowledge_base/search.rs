//! Exhaustive top-k ranking shared by the vector store backends

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::entity::{KnowledgeBaseEntry, SearchResult};
use crate::domain::embedding::cosine_distance;
use crate::domain::DomainError;

/// Max-heap entry: the worst kept candidate sits on top.
#[derive(Debug)]
struct HeapEntry {
    distance: f32,
    position: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Later insertions lose ties
        self.distance
            .total_cmp(&other.distance)
            .then(self.position.cmp(&other.position))
    }
}

/// Rank `entries` by cosine distance to `query` and return the `top_k` closest,
/// nearest first. Equal distances keep insertion order.
pub fn rank_by_distance(
    entries: &[KnowledgeBaseEntry],
    query: &[f32],
    top_k: usize,
) -> Vec<SearchResult> {
    if top_k == 0 || entries.is_empty() {
        return Vec::new();
    }

    let mut heap: BinaryHeap<HeapEntry> = BinaryHeap::with_capacity(top_k + 1);

    for (position, entry) in entries.iter().enumerate() {
        let candidate = HeapEntry {
            distance: cosine_distance(&entry.embedding, query),
            position,
        };

        if heap.len() < top_k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.pop();
            heap.push(candidate);
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|hit| {
            let entry = &entries[hit.position];
            SearchResult::new(&entry.id, &entry.content, hit.distance)
                .with_all_metadata(entry.metadata.clone())
        })
        .collect()
}

/// Check that every entry matches the store's dimensionality (or each other's,
/// when the store is still empty). Returns the dimensionality of the batch.
pub fn check_dimensions(
    expected: Option<usize>,
    entries: &[KnowledgeBaseEntry],
) -> Result<Option<usize>, DomainError> {
    let mut dims = expected;

    for entry in entries {
        if entry.embedding.is_empty() {
            return Err(DomainError::validation(format!(
                "Entry {} has an empty embedding",
                entry.id
            )));
        }

        match dims {
            None => dims = Some(entry.embedding.len()),
            Some(d) if d != entry.embedding.len() => {
                return Err(DomainError::validation(format!(
                    "Embedding dimension mismatch: expected {}, got {}",
                    d,
                    entry.embedding.len()
                )));
            }
            Some(_) => {}
        }
    }

    Ok(dims)
}

/// Reject a query whose length differs from the store's dimensionality.
///
/// Mismatched vectors have no meaningful cosine distance; ranking them would
/// return arbitrary entries as if they matched.
pub fn check_query_dimensions(expected: Option<usize>, query: &[f32]) -> Result<(), DomainError> {
    match expected {
        Some(d) if d != query.len() => Err(DomainError::validation(format!(
            "Query dimension mismatch: store has {}, query has {}",
            d,
            query.len()
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingestion::Metadata;

    fn entry(content: &str, embedding: Vec<f32>) -> KnowledgeBaseEntry {
        KnowledgeBaseEntry::new(content, embedding, Metadata::new())
    }

    #[test]
    fn test_rank_orders_by_ascending_distance() {
        let entries = vec![
            entry("far", vec![0.0, 1.0]),
            entry("exact", vec![1.0, 0.0]),
            entry("near", vec![1.0, 0.2]),
        ];

        let results = rank_by_distance(&entries, &[1.0, 0.0], 2);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "exact");
        assert_eq!(results[1].content, "near");
        assert!(results[0].score <= results[1].score);
        assert!(results[0].score.abs() < 0.0001);
    }

    #[test]
    fn test_rank_ties_keep_insertion_order() {
        let entries = vec![
            entry("first", vec![1.0, 0.0]),
            entry("second", vec![2.0, 0.0]),
            entry("third", vec![3.0, 0.0]),
        ];

        let results = rank_by_distance(&entries, &[1.0, 0.0], 2);

        let contents: Vec<_> = results.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
    }

    #[test]
    fn test_rank_zero_k_or_empty() {
        let entries = vec![entry("a", vec![1.0])];

        assert!(rank_by_distance(&entries, &[1.0], 0).is_empty());
        assert!(rank_by_distance(&[], &[1.0], 5).is_empty());
    }

    #[test]
    fn test_rank_k_larger_than_store() {
        let entries = vec![entry("a", vec![1.0, 0.0]), entry("b", vec![0.0, 1.0])];

        assert_eq!(rank_by_distance(&entries, &[1.0, 0.0], 10).len(), 2);
    }

    #[test]
    fn test_check_dimensions() {
        let batch = vec![entry("a", vec![1.0, 0.0]), entry("b", vec![0.5, 0.5])];

        assert_eq!(check_dimensions(None, &batch).unwrap(), Some(2));
        assert_eq!(check_dimensions(Some(2), &[]).unwrap(), Some(2));
        assert!(check_dimensions(Some(3), &batch).is_err());
        assert!(check_dimensions(None, &[entry("a", vec![1.0]), entry("b", vec![1.0, 2.0])]).is_err());
        assert!(check_dimensions(None, &[entry("empty", vec![])]).is_err());
    }

    #[test]
    fn test_check_query_dimensions() {
        assert!(check_query_dimensions(Some(2), &[1.0, 0.0]).is_ok());
        assert!(check_query_dimensions(None, &[1.0, 0.0, 0.0]).is_ok());

        let err = check_query_dimensions(Some(16), &[0.0; 32]).unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }
}
