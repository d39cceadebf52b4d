//! Topic dropdown options, derived once from the full dataset.

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::article::Article;
use crate::filter::ALL_CLUSTERS;
use crate::TARGET_RENDER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterOption {
    pub value: String,
    pub label: String,
}

impl ClusterOption {
    pub fn topic(id: i64) -> Self {
        ClusterOption {
            value: id.to_string(),
            label: format!("Topic {}", id),
        }
    }

    pub fn all() -> Self {
        ClusterOption {
            value: ALL_CLUSTERS.to_string(),
            label: "All Topics".to_string(),
        }
    }
}

/// The selector control. It always holds the default "all" option first.
pub trait OptionsSurface {
    fn option_count(&self) -> usize;
    fn append_option(&mut self, option: &ClusterOption);
}

/// Sorted distinct topic ids across the given articles.
pub fn distinct_clusters(dataset: &[Article]) -> Vec<i64> {
    dataset
        .iter()
        .map(|a| a.topic_cluster)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Fills the selector from the full (unfiltered) dataset, but only while it
/// holds nothing beyond the default option. Later calls are no-ops so the
/// user's current selection survives a refresh.
///
/// Returns `true` when options were added.
pub fn ensure_populated<S: OptionsSurface + ?Sized>(dataset: &[Article], selector: &mut S) -> bool {
    if selector.option_count() > 1 {
        debug!(target: TARGET_RENDER, "Cluster options already present, keeping them");
        return false;
    }
    let clusters = distinct_clusters(dataset);
    if clusters.is_empty() {
        return false;
    }

    for &id in &clusters {
        selector.append_option(&ClusterOption::topic(id));
    }
    info!(target: TARGET_RENDER, "Populated {} topic options", clusters.len());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::fixtures::{article, sample_dataset};

    struct Selector {
        options: Vec<ClusterOption>,
    }

    impl Selector {
        fn new() -> Self {
            Selector {
                options: vec![ClusterOption::all()],
            }
        }
    }

    impl OptionsSurface for Selector {
        fn option_count(&self) -> usize {
            self.options.len()
        }

        fn append_option(&mut self, option: &ClusterOption) {
            self.options.push(option.clone());
        }
    }

    #[test]
    fn test_distinct_sorted_numerically() {
        let dataset = vec![
            article("a", 10, 0.0, "Neutral", "Normal"),
            article("b", 2, 0.0, "Neutral", "Normal"),
            article("c", 10, 0.0, "Neutral", "Normal"),
            article("d", 0, 0.0, "Neutral", "Normal"),
        ];
        assert_eq!(distinct_clusters(&dataset), vec![0, 2, 10]);
    }

    #[test]
    fn test_populates_once() {
        let mut selector = Selector::new();

        assert!(ensure_populated(&sample_dataset(), &mut selector));
        let labels: Vec<_> = selector.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["All Topics", "Topic 1", "Topic 2"]);

        let refreshed = vec![
            article("x", 7, 0.0, "Neutral", "Normal"),
            article("y", 8, 0.0, "Neutral", "Normal"),
        ];
        assert!(!ensure_populated(&refreshed, &mut selector));
        assert!(!ensure_populated(&sample_dataset(), &mut selector));
        assert_eq!(selector.options.len(), 3);
    }

    #[test]
    fn test_empty_dataset_leaves_selector_empty() {
        let mut selector = Selector::new();

        assert!(!ensure_populated(&[], &mut selector));
        assert_eq!(selector.option_count(), 1);

        // The first non-empty load still populates.
        assert!(ensure_populated(&sample_dataset(), &mut selector));
        assert_eq!(selector.option_count(), 3);
    }

    #[test]
    fn test_option_values() {
        let option = ClusterOption::topic(12);
        assert_eq!(option.value, "12");
        assert_eq!(option.label, "Topic 12");
        assert_eq!(ClusterOption::all().value, "all");
    }
}
