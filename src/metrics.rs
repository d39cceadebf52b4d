use serde::Serialize;

use crate::article::{Article, EventFlag, ImpactLevel};

/// Headline counts for the metrics panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total: usize,
    pub high_risk: usize,
    pub high_opportunity: usize,
    pub major_events: usize,
}

impl Metrics {
    /// Counts the filtered subset in a single pass. Categories use exact matches.
    pub fn summarize<'a, I>(articles: I) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        articles
            .into_iter()
            .fold(Metrics::default(), |mut metrics, article| {
                metrics.total += 1;
                match article.impact_level {
                    ImpactLevel::HighRisk => metrics.high_risk += 1,
                    ImpactLevel::HighOpportunity => metrics.high_opportunity += 1,
                    _ => {}
                }
                if article.event_flag == EventFlag::MajorEvent {
                    metrics.major_events += 1;
                }
                metrics
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::fixtures::{article, sample_dataset};

    #[test]
    fn test_worked_example() {
        let dataset = sample_dataset();
        let metrics = Metrics::summarize(dataset.iter());
        assert_eq!(
            metrics,
            Metrics {
                total: 3,
                high_risk: 1,
                high_opportunity: 1,
                major_events: 0,
            }
        );
    }

    #[test]
    fn test_empty_subset() {
        let empty: Vec<Article> = Vec::new();
        assert_eq!(Metrics::summarize(&empty), Metrics::default());
    }

    #[test]
    fn test_counts_are_bounded() {
        let dataset = vec![
            article("a", 1, 0.3, "High Risk", "Major Event"),
            article("b", 1, 0.3, "High Risk", "Normal"),
            article("c", 2, 0.3, "High Opportunity", "Major Event"),
            article("d", 2, 0.3, "Neutral", "Minor Event"),
            article("e", 3, 0.3, "Moderate Risk", "Normal"),
        ];
        let metrics = Metrics::summarize(&dataset);

        assert_eq!(metrics.total, 5);
        assert_eq!(metrics.high_risk, 2);
        assert_eq!(metrics.high_opportunity, 1);
        assert_eq!(metrics.major_events, 2);
        assert!(metrics.high_risk + metrics.high_opportunity <= metrics.total);
        assert!(metrics.major_events <= metrics.total);
    }

    #[test]
    fn test_loose_labels_not_counted() {
        // "Moderate Risk" earns a risk tag in the list but is not a high-risk item.
        let dataset = vec![article("e", 3, 0.3, "Moderate Risk", "Normal")];
        assert_eq!(Metrics::summarize(&dataset).high_risk, 0);
    }
}
