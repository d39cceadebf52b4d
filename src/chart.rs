//! Chart series derivation and the handle-owning adapter around a chart engine.
//!
//! Charts are rebuilt on every synchronization: the previous handle is disposed
//! and a new chart is created from the latest filtered subset. Nothing is diffed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::article::Article;
use crate::TARGET_RENDER;

/// Half-width of the neutral zone of the sentiment classifier.
pub const NEUTRAL_BAND: f64 = 0.05;

pub const POSITIVE_COLOR: &str = "#10b981";
pub const NEUTRAL_COLOR: &str = "#94a3b8";
pub const NEGATIVE_COLOR: &str = "#ef4444";
pub const SCATTER_COLOR: &str = "#3b82f6";

/// The two charts on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ChartName {
    Sentiment,
    Impact,
}

impl ChartName {
    pub const ALL: [ChartName; 2] = [ChartName::Sentiment, ChartName::Impact];

    /// Identifier of the surface the chart is drawn on.
    pub fn target(&self) -> &'static str {
        match self {
            ChartName::Sentiment => "sentimentChart",
            ChartName::Impact => "impactChart",
        }
    }
}

impl fmt::Display for ChartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartName::Sentiment => write!(f, "Sentiment Distribution"),
            ChartName::Impact => write!(f, "Impact vs. Sentiment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SentimentBucket {
    Positive,
    Neutral,
    Negative,
}

impl SentimentBucket {
    /// Dead-band classifier; both edges of the band count as neutral.
    pub fn classify(score: f64) -> Self {
        if score > NEUTRAL_BAND {
            SentimentBucket::Positive
        } else if score < -NEUTRAL_BAND {
            SentimentBucket::Negative
        } else {
            SentimentBucket::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SentimentBucket::Positive => "Positive",
            SentimentBucket::Neutral => "Neutral",
            SentimentBucket::Negative => "Negative",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SentimentBucket::Positive => POSITIVE_COLOR,
            SentimentBucket::Neutral => NEUTRAL_COLOR,
            SentimentBucket::Negative => NEGATIVE_COLOR,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentDistribution {
    pub fn from_articles<'a, I>(articles: I) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut distribution = SentimentDistribution::default();
        for article in articles {
            match SentimentBucket::classify(article.sentiment_score) {
                SentimentBucket::Positive => distribution.positive += 1,
                SentimentBucket::Neutral => distribution.neutral += 1,
                SentimentBucket::Negative => distribution.negative += 1,
            }
        }
        distribution
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    /// Segments in display order.
    pub fn segments(&self) -> [(SentimentBucket, usize); 3] {
        [
            (SentimentBucket::Positive, self.positive),
            (SentimentBucket::Neutral, self.neutral),
            (SentimentBucket::Negative, self.negative),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Series data handed to the chart engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartSpec {
    Doughnut {
        labels: Vec<String>,
        values: Vec<usize>,
        colors: Vec<&'static str>,
    },
    Scatter {
        label: String,
        points: Vec<ScatterPoint>,
        color: &'static str,
        x_title: String,
        y_title: String,
    },
}

impl ChartSpec {
    pub fn sentiment(distribution: &SentimentDistribution) -> Self {
        let segments = distribution.segments();
        ChartSpec::Doughnut {
            labels: segments.iter().map(|(b, _)| b.label().to_string()).collect(),
            values: segments.iter().map(|(_, count)| *count).collect(),
            colors: segments.iter().map(|(b, _)| b.color()).collect(),
        }
    }

    pub fn impact<'a, I>(articles: I) -> Self
    where
        I: IntoIterator<Item = &'a Article>,
    {
        ChartSpec::Scatter {
            label: "Articles".to_string(),
            points: articles
                .into_iter()
                .map(|a| ScatterPoint {
                    x: a.sentiment_score,
                    y: a.impact_score,
                })
                .collect(),
            color: SCATTER_COLOR,
            x_title: "Sentiment".to_string(),
            y_title: "Impact Score".to_string(),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("render target `{target}` for {chart} is missing")]
    MissingTarget {
        chart: ChartName,
        target: &'static str,
    },
    #[error("chart engine failed: {0}")]
    Engine(String),
}

impl RenderError {
    pub fn missing(chart: ChartName) -> Self {
        RenderError::MissingTarget {
            chart,
            target: chart.target(),
        }
    }
}

/// Capability to draw a chart from series data.
pub trait ChartEngine {
    type Handle;

    fn create(&mut self, name: ChartName, spec: &ChartSpec) -> Result<Self::Handle, RenderError>;

    /// Releases a chart previously returned by `create`.
    fn dispose(&mut self, handle: Self::Handle);
}

/// Owns one live handle per chart name.
pub struct ChartAdapter<E: ChartEngine> {
    engine: E,
    handles: BTreeMap<ChartName, E::Handle>,
}

impl<E: ChartEngine> ChartAdapter<E> {
    pub fn new(engine: E) -> Self {
        ChartAdapter {
            engine,
            handles: BTreeMap::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_live(&self, name: ChartName) -> bool {
        self.handles.contains_key(&name)
    }

    /// Disposes the current chart under `name`, then creates its replacement.
    ///
    /// On failure the slot stays empty so no stale chart remains on screen.
    pub fn replace(&mut self, name: ChartName, spec: &ChartSpec) -> Result<(), RenderError> {
        if let Some(previous) = self.handles.remove(&name) {
            debug!(target: TARGET_RENDER, "Disposing previous {} chart", name);
            self.engine.dispose(previous);
        }
        let handle = self.engine.create(name, spec)?;
        self.handles.insert(name, handle);
        Ok(())
    }

    /// Rebuilds both charts from the filtered subset.
    ///
    /// A failing chart is logged and reported back; it never stops the other.
    pub fn sync(&mut self, filtered: &[&Article]) -> Vec<RenderError> {
        let distribution = SentimentDistribution::from_articles(filtered.iter().copied());
        let specs = [
            (ChartName::Sentiment, ChartSpec::sentiment(&distribution)),
            (ChartName::Impact, ChartSpec::impact(filtered.iter().copied())),
        ];

        let mut failures = Vec::new();
        for (name, spec) in specs {
            if let Err(e) = self.replace(name, &spec) {
                warn!(target: TARGET_RENDER, "Failed to render {} chart: {}", name, e);
                failures.push(e);
            }
        }
        failures
    }

    /// Disposes every live chart.
    pub fn clear(&mut self) {
        for (_, handle) in std::mem::take(&mut self.handles) {
            self.engine.dispose(handle);
        }
    }
}

impl<E: ChartEngine> Drop for ChartAdapter<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::collections::HashSet;

    /// Engine that records every call and can be told a surface is missing.
    #[derive(Default)]
    pub struct RecordingEngine {
        pub missing: HashSet<ChartName>,
        pub created: Vec<(u32, ChartName, ChartSpec)>,
        pub disposed: Vec<u32>,
        next_id: u32,
    }

    impl RecordingEngine {
        pub fn missing(name: ChartName) -> Self {
            let mut engine = RecordingEngine::default();
            engine.missing.insert(name);
            engine
        }

        pub fn live_count(&self) -> usize {
            self.created.len() - self.disposed.len()
        }

        pub fn last_spec(&self, name: ChartName) -> Option<&ChartSpec> {
            self.created
                .iter()
                .rev()
                .find(|(_, n, _)| *n == name)
                .map(|(_, _, spec)| spec)
        }
    }

    impl ChartEngine for RecordingEngine {
        type Handle = u32;

        fn create(&mut self, name: ChartName, spec: &ChartSpec) -> Result<u32, RenderError> {
            if self.missing.contains(&name) {
                return Err(RenderError::missing(name));
            }
            self.next_id += 1;
            self.created.push((self.next_id, name, spec.clone()));
            Ok(self.next_id)
        }

        fn dispose(&mut self, handle: u32) {
            self.disposed.push(handle);
        }
    }
}
