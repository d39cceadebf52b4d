//! Bounded article list with per-item tags.

use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::article::Article;
use crate::TARGET_RENDER;

/// Hard cap on rendered rows.
pub const MAX_LIST_ITEMS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Tag {
    Cluster(i64),
    Risk(String),
    Opportunity(String),
    Event(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Cluster(id) => write!(f, "Cluster {}", id),
            Tag::Risk(label) | Tag::Opportunity(label) | Tag::Event(label) => f.write_str(label),
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub source: String,
    /// Impact score with one decimal place.
    pub score: String,
    pub title: String,
    pub link: String,
    pub tags: Vec<Tag>,
}

impl ListItem {
    pub fn from_article(article: &Article) -> Self {
        ListItem {
            source: article.source.clone(),
            score: format!("{:.1}", article.impact_score),
            title: article.title.clone(),
            link: article.link.clone(),
            tags: tags_for(article),
        }
    }
}

/// Cluster tag first, then any of risk, opportunity and event. Not exclusive.
pub fn tags_for(article: &Article) -> Vec<Tag> {
    let mut tags = vec![Tag::Cluster(article.topic_cluster)];
    if article.impact_level.denotes_risk() {
        tags.push(Tag::Risk(article.impact_level.to_string()));
    }
    if article.impact_level.denotes_opportunity() {
        tags.push(Tag::Opportunity(article.impact_level.to_string()));
    }
    if !article.event_flag.is_normal() {
        tags.push(Tag::Event(article.event_flag.to_string()));
    }
    tags
}

/// Builds the rows for the first `MAX_LIST_ITEMS` filtered articles.
pub fn list_items(filtered: &[&Article]) -> Vec<ListItem> {
    filtered
        .iter()
        .take(MAX_LIST_ITEMS)
        .map(|article| ListItem::from_article(article))
        .collect()
}

/// Scrollable container the rows are written into.
pub trait ListContainer {
    fn clear_items(&mut self);
    fn append_item(&mut self, item: &ListItem);
}

/// Clears the container and inserts the capped rows in filtered order.
/// Returns the number of rows rendered.
pub fn render_list<C: ListContainer + ?Sized>(container: &mut C, filtered: &[&Article]) -> usize {
    container.clear_items();
    let items = list_items(filtered);
    for item in &items {
        container.append_item(item);
    }
    debug!(
        target: TARGET_RENDER,
        "Rendered {} of {} filtered articles",
        items.len(),
        filtered.len()
    );
    items.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::fixtures::article;

    #[derive(Default)]
    struct VecContainer {
        items: Vec<ListItem>,
        clears: usize,
    }

    impl ListContainer for VecContainer {
        fn clear_items(&mut self) {
            self.items.clear();
            self.clears += 1;
        }

        fn append_item(&mut self, item: &ListItem) {
            self.items.push(item.clone());
        }
    }

    #[test]
    fn test_list_is_capped() {
        let dataset: Vec<_> = (0..120)
            .map(|i| article(&format!("Story {}", i), i % 5, 0.0, "Neutral", "Normal"))
            .collect();
        let filtered: Vec<&Article> = dataset.iter().collect();

        let mut container = VecContainer::default();
        assert_eq!(render_list(&mut container, &filtered), MAX_LIST_ITEMS);
        assert_eq!(container.items.len(), MAX_LIST_ITEMS);
        assert_eq!(container.items[0].title, "Story 0");
        assert_eq!(container.items[49].title, "Story 49");
    }

    #[test]
    fn test_rerender_replaces_rows() {
        let dataset: Vec<_> = (0..3)
            .map(|i| article(&format!("Story {}", i), 1, 0.0, "Neutral", "Normal"))
            .collect();
        let filtered: Vec<&Article> = dataset.iter().collect();

        let mut container = VecContainer::default();
        render_list(&mut container, &filtered);
        render_list(&mut container, &filtered[1..]);

        assert_eq!(container.clears, 2);
        let titles: Vec<_> = container.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Story 1", "Story 2"]);
    }

    #[test]
    fn test_score_has_one_decimal() {
        let mut item = article("Rates", 1, 0.0, "Neutral", "Normal");
        item.impact_score = 7.0;
        assert_eq!(ListItem::from_article(&item).score, "7.0");
        item.impact_score = -3.46;
        assert_eq!(ListItem::from_article(&item).score, "-3.5");
    }

    #[test]
    fn test_tags_are_additive() {
        let plain = article("a", 3, 0.0, "Neutral", "Normal");
        assert_eq!(tags_for(&plain), vec![Tag::Cluster(3)]);

        let risky = article("b", 4, 0.0, "High Risk", "Major Event");
        assert_eq!(
            tags_for(&risky),
            vec![
                Tag::Cluster(4),
                Tag::Risk("High Risk".into()),
                Tag::Event("Major Event".into()),
            ]
        );

        // A mixed label earns both conditional tags.
        let mixed = article("c", 5, 0.0, "Risk and Opportunity", "Breaking");
        let tags = tags_for(&mixed);
        assert_eq!(tags.len(), 4);
        assert_eq!(tags[3].to_string(), "Breaking");
        assert!(matches!(&tags[1], Tag::Risk(label) if label == "Risk and Opportunity"));
        assert!(matches!(&tags[2], Tag::Opportunity(label) if label == "Risk and Opportunity"));
    }

    #[test]
    fn test_item_fields() {
        let item = ListItem::from_article(&article("Grid upgrade", 2, 0.4, "High Opportunity", "Normal"));
        assert_eq!(item.source, "Reuters");
        assert_eq!(item.link, "https://example.com/Grid-upgrade");
        assert_eq!(item.score, "5.3");
        assert_eq!(item.tags[0].to_string(), "Cluster 2");
    }
}
