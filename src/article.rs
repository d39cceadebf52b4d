//! Scored article records as produced by the analysis pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Impact category assigned by the analysis step.
///
/// The label text is part of the data contract and is kept verbatim; unknown
/// labels survive as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ImpactLevel {
    Neutral,
    HighRisk,
    HighOpportunity,
    Other(String),
}

impl ImpactLevel {
    pub fn as_str(&self) -> &str {
        match self {
            ImpactLevel::Neutral => "Neutral",
            ImpactLevel::HighRisk => "High Risk",
            ImpactLevel::HighOpportunity => "High Opportunity",
            ImpactLevel::Other(label) => label,
        }
    }

    /// Loose match: any label mentioning "Risk".
    pub fn denotes_risk(&self) -> bool {
        self.as_str().contains("Risk")
    }

    /// Loose match: any label mentioning "Opportunity".
    pub fn denotes_opportunity(&self) -> bool {
        self.as_str().contains("Opportunity")
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ImpactLevel {
    fn from(s: &str) -> Self {
        match s {
            "Neutral" => ImpactLevel::Neutral,
            "High Risk" => ImpactLevel::HighRisk,
            "High Opportunity" => ImpactLevel::HighOpportunity,
            other => ImpactLevel::Other(other.to_string()),
        }
    }
}

impl From<String> for ImpactLevel {
    fn from(s: String) -> Self {
        ImpactLevel::from(s.as_str())
    }
}

impl From<ImpactLevel> for String {
    fn from(level: ImpactLevel) -> Self {
        level.as_str().to_string()
    }
}

/// Event flag assigned by the analysis step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventFlag {
    Normal,
    MajorEvent,
    Other(String),
}

impl EventFlag {
    pub fn as_str(&self) -> &str {
        match self {
            EventFlag::Normal => "Normal",
            EventFlag::MajorEvent => "Major Event",
            EventFlag::Other(label) => label,
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, EventFlag::Normal)
    }
}

impl fmt::Display for EventFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for EventFlag {
    fn from(s: &str) -> Self {
        match s {
            "Normal" => EventFlag::Normal,
            "Major Event" => EventFlag::MajorEvent,
            other => EventFlag::Other(other.to_string()),
        }
    }
}

impl From<String> for EventFlag {
    fn from(s: String) -> Self {
        EventFlag::from(s.as_str())
    }
}

impl From<EventFlag> for String {
    fn from(flag: EventFlag) -> Self {
        flag.as_str().to_string()
    }
}

/// One dataset record. The generator writes `Title`/`Summary`/`Source`/`Link`
/// capitalised, so both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(alias = "Title")]
    pub title: String,
    #[serde(alias = "Summary", default)]
    pub summary: String,
    #[serde(alias = "Source", default)]
    pub source: String,
    #[serde(alias = "Link", default)]
    pub link: String,
    pub sentiment_score: f64,
    pub impact_score: f64,
    pub impact_level: ImpactLevel,
    pub event_flag: EventFlag,
    pub topic_cluster: i64,
}

/// Immutable, ordered collection of articles in API response order.
///
/// Cloning is cheap; a refresh builds a new `Dataset` rather than mutating one.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Vec<Article>")]
pub struct Dataset {
    articles: Arc<[Article]>,
}

impl Dataset {
    pub fn new(articles: Vec<Article>) -> Self {
        Dataset {
            articles: articles.into(),
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Dataset::new(Vec::new())
    }
}

impl From<Vec<Article>> for Dataset {
    fn from(articles: Vec<Article>) -> Self {
        Dataset::new(articles)
    }
}

impl Deref for Dataset {
    type Target = [Article];

    fn deref(&self) -> &Self::Target {
        &self.articles
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_lowercase_fields() {
        let json = r#"[{
            "title": "Rates hold",
            "summary": "Central bank pauses",
            "source": "FT",
            "link": "https://example.com/rates",
            "sentiment_score": 0.2,
            "impact_score": 7.5,
            "impact_level": "High Opportunity",
            "event_flag": "Major Event",
            "topic_cluster": 4
        }]"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].impact_level, ImpactLevel::HighOpportunity);
        assert_eq!(dataset[0].event_flag, EventFlag::MajorEvent);
        assert_eq!(dataset[0].topic_cluster, 4);
    }

    #[test]
    fn test_decode_capitalised_fields() {
        let json = r#"[{
            "Title": "Rates hold",
            "Summary": "Central bank pauses",
            "Source": "FT",
            "Link": "https://example.com/rates",
            "sentiment_score": -0.4,
            "impact_score": 2,
            "impact_level": "Moderate Risk",
            "event_flag": "Normal",
            "topic_cluster": 0
        }]"#;
        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset[0].title, "Rates hold");
        assert_eq!(dataset[0].source, "FT");
        assert_eq!(
            dataset[0].impact_level,
            ImpactLevel::Other("Moderate Risk".to_string())
        );
        assert!(dataset[0].impact_level.denotes_risk());
    }

    #[test]
    fn test_impact_level_loose_matching() {
        assert!(ImpactLevel::HighRisk.denotes_risk());
        assert!(!ImpactLevel::HighRisk.denotes_opportunity());
        assert!(ImpactLevel::HighOpportunity.denotes_opportunity());
        assert!(!ImpactLevel::Neutral.denotes_risk());
        assert!(!ImpactLevel::Neutral.denotes_opportunity());
    }

    #[test]
    fn test_labels_serialize_verbatim() {
        let json = serde_json::to_string(&EventFlag::MajorEvent).unwrap();
        assert_eq!(json, "\"Major Event\"");
        let json = serde_json::to_string(&ImpactLevel::Other("Low Risk".into())).unwrap();
        assert_eq!(json, "\"Low Risk\"");
    }
}
