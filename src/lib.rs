pub mod article;
pub mod chart;
pub mod dashboard;
pub mod environment;
pub mod filter;
pub mod list;
pub mod logging;
pub mod metrics;
pub mod options;
pub mod server;
pub mod session;
pub mod source;
pub mod terminal;

pub const TARGET_WEB_REQUEST: &str = "web_request";
pub const TARGET_RENDER: &str = "render";

pub use article::{Article, Dataset, EventFlag, ImpactLevel};
pub use dashboard::{Command, Dashboard, DashboardEvent, DashboardView};
pub use filter::{ClusterSelector, FilterState};
pub use metrics::Metrics;
pub use source::{DataSource, FetchError};
