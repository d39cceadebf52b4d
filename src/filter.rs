//! Search and topic filtering over the loaded dataset.

use std::fmt;

use crate::article::Article;

pub const ALL_CLUSTERS: &str = "all";

/// Value of the topic dropdown.
///
/// Topics are compared as strings, the same way the dropdown stores them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClusterSelector {
    #[default]
    All,
    Topic(String),
}

impl ClusterSelector {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CLUSTERS {
            ClusterSelector::All
        } else {
            ClusterSelector::Topic(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ClusterSelector::All => ALL_CLUSTERS,
            ClusterSelector::Topic(id) => id,
        }
    }

    pub fn matches(&self, topic_cluster: i64) -> bool {
        match self {
            ClusterSelector::All => true,
            ClusterSelector::Topic(id) => topic_cluster.to_string() == *id,
        }
    }
}

impl fmt::Display for ClusterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current user filter. Only input events change it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub cluster: ClusterSelector,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, cluster: ClusterSelector) -> Self {
        FilterState {
            search_term: search_term.into(),
            cluster,
        }
    }

    /// True when the filter lets every article through.
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.cluster == ClusterSelector::All
    }

    fn matches(&self, article: &Article, needle: &str) -> bool {
        let haystack = format!("{}{}", article.title, article.summary).to_lowercase();
        haystack.contains(needle) && self.cluster.matches(article.topic_cluster)
    }
}

/// Returns the articles matching `state`, in dataset order.
///
/// The search term is a case-insensitive substring of title followed by
/// summary; an empty term matches everything.
pub fn apply<'a>(dataset: &'a [Article], state: &FilterState) -> Vec<&'a Article> {
    let needle = state.search_term.to_lowercase();
    dataset
        .iter()
        .filter(|article| state.matches(article, &needle))
        .collect()
}
