//! Application state and the synchronizer that keeps every view consistent
//! with (dataset, filter).
//!
//! All state lives in one owned `Dashboard`. Input arrives as
//! `DashboardEvent`s that are handled to completion one at a time; the only
//! asynchronous step, the fetch, is requested through `Command::Fetch` and its
//! outcome comes back as `DashboardEvent::DataLoaded`.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::article::{Article, Dataset};
use crate::chart::{ChartAdapter, ChartEngine, RenderError, SentimentDistribution};
use crate::filter::{self, ClusterSelector, FilterState};
use crate::list::{self, ListContainer, ListItem};
use crate::metrics::Metrics;
use crate::options::{self, OptionsSurface};
use crate::source::FetchError;
use crate::TARGET_RENDER;

/// Render surfaces other than the charts.
pub trait DashboardView: ListContainer + OptionsSurface {
    fn render_metrics(&mut self, metrics: &Metrics);

    /// Blocking, user-visible error notification.
    fn notify_error(&mut self, message: &str);
}

#[derive(Debug)]
pub enum DashboardEvent {
    SearchChanged(String),
    ClusterChanged(String),
    RefreshRequested,
    DataLoaded(Result<Dataset, FetchError>),
}

/// Work the runtime has to perform on the dashboard's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch,
}

/// Outcome of one synchronization pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub filtered: usize,
    pub rendered: usize,
    pub chart_failures: Vec<RenderError>,
    pub options_populated: bool,
}

/// Everything visible for the current state, without touching any surface.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub search_term: String,
    pub cluster: String,
    pub loaded: usize,
    pub metrics: Metrics,
    pub sentiment: SentimentDistribution,
    pub items: Vec<ListItem>,
}

pub struct Dashboard<E: ChartEngine> {
    dataset: Dataset,
    filter: FilterState,
    charts: ChartAdapter<E>,
}

impl<E: ChartEngine> Dashboard<E> {
    pub fn new(engine: E) -> Self {
        Dashboard::with_filter(engine, FilterState::default())
    }

    /// Starts with a preset filter, as if the inputs were already filled in.
    pub fn with_filter(engine: E, filter: FilterState) -> Self {
        Dashboard {
            dataset: Dataset::default(),
            filter,
            charts: ChartAdapter::new(engine),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn charts(&self) -> &ChartAdapter<E> {
        &self.charts
    }

    pub fn filtered(&self) -> Vec<&Article> {
        filter::apply(&self.dataset, &self.filter)
    }

    /// Applies one event. Returns a command when the runtime must act.
    pub fn handle<V: DashboardView + ?Sized>(
        &mut self,
        event: DashboardEvent,
        view: &mut V,
    ) -> Option<Command> {
        match event {
            DashboardEvent::SearchChanged(term) => {
                debug!("Search term changed to {:?}", term);
                self.filter.search_term = term;
                self.sync(view);
                None
            }
            DashboardEvent::ClusterChanged(value) => {
                debug!("Cluster selection changed to {:?}", value);
                self.filter.cluster = ClusterSelector::parse(&value);
                self.sync(view);
                None
            }
            DashboardEvent::RefreshRequested => Some(Command::Fetch),
            DashboardEvent::DataLoaded(Ok(dataset)) => {
                info!("Dataset replaced: {} articles", dataset.len());
                self.dataset = dataset;
                self.sync(view);
                None
            }
            DashboardEvent::DataLoaded(Err(e)) => {
                error!("Failed to load dataset: {}", e);
                view.notify_error(&e.user_message());
                None
            }
        }
    }

    /// Re-derives the filtered subset and pushes it to every view.
    ///
    /// Metrics, charts and list are independent; a chart failure is reported in
    /// the returned `SyncReport` and does not stop the others.
    pub fn sync<V: DashboardView + ?Sized>(&mut self, view: &mut V) -> SyncReport {
        let filtered = filter::apply(&self.dataset, &self.filter);

        view.render_metrics(&Metrics::summarize(filtered.iter().copied()));
        let chart_failures = self.charts.sync(&filtered);
        let rendered = list::render_list(view, &filtered);
        let options_populated = options::ensure_populated(&self.dataset, view);

        debug!(
            target: TARGET_RENDER,
            "Synchronized views: {} of {} articles match {:?}",
            filtered.len(),
            self.dataset.len(),
            self.filter
        );

        SyncReport {
            filtered: filtered.len(),
            rendered,
            chart_failures,
            options_populated,
        }
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let filtered = self.filtered();
        DashboardSnapshot {
            search_term: self.filter.search_term.clone(),
            cluster: self.filter.cluster.to_string(),
            loaded: self.dataset.len(),
            metrics: Metrics::summarize(filtered.iter().copied()),
            sentiment: SentimentDistribution::from_articles(filtered.iter().copied()),
            items: list::list_items(&filtered),
        }
    }
}
