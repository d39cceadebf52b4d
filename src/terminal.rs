//! Terminal rendering of the dashboard surfaces.

use chrono::Local;
use colored::{ColoredString, Colorize};
use prettytable::{Cell, Row, Table};
use std::collections::BTreeSet;
use std::io::{self, Write};
use tracing::{debug, warn};

use crate::chart::{ChartEngine, ChartName, ChartSpec, RenderError, ScatterPoint};
use crate::dashboard::DashboardView;
use crate::list::{ListContainer, ListItem, Tag};
use crate::metrics::Metrics;
use crate::options::{ClusterOption, OptionsSurface};
use crate::TARGET_RENDER;

const RULE_WIDTH: usize = 100;
const BAR_WIDTH: usize = 48;
const PLOT_WIDTH: usize = 60;
const PLOT_HEIGHT: usize = 14;

/// Parses `#rrggbb` into an RGB triple.
fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn write_or_warn(result: io::Result<()>) {
    if let Err(e) = result {
        warn!(target: TARGET_RENDER, "Failed to write to terminal: {}", e);
    }
}

/// Metrics panel, article list, topic selector and notifications.
pub struct TerminalView<W: Write> {
    out: W,
    options: Vec<ClusterOption>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalView::new(io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        TerminalView {
            out,
            options: vec![ClusterOption::all()],
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_heading(&mut self, heading: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}", heading.bright_blue())?;
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH).dimmed())
    }

    fn write_item(&mut self, item: &ListItem) -> io::Result<()> {
        let tags: Vec<String> = item
            .tags
            .iter()
            .map(|tag| {
                let text = format!("[{}]", tag);
                match tag {
                    Tag::Cluster(_) => text.bright_black().to_string(),
                    Tag::Risk(_) => text.bright_red().to_string(),
                    Tag::Opportunity(_) => text.bright_green().to_string(),
                    Tag::Event(_) => text.bright_yellow().to_string(),
                }
            })
            .collect();

        writeln!(
            self.out,
            "{}  {}",
            item.source.bright_magenta(),
            format!("Score: {}", item.score).dimmed()
        )?;
        writeln!(self.out, "  {}", item.title.bold())?;
        writeln!(self.out, "  {}", item.link.underline().dimmed())?;
        writeln!(self.out, "  {}", tags.join(" "))
    }

    fn write_metrics(&mut self, metrics: &Metrics) -> io::Result<()> {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Total Articles"),
            Cell::new("High Risk"),
            Cell::new("High Opportunity"),
            Cell::new("Major Events"),
        ]));
        table.add_row(Row::new(vec![
            Cell::new(&metrics.total.to_string()),
            Cell::new(&metrics.high_risk.to_string()),
            Cell::new(&metrics.high_opportunity.to_string()),
            Cell::new(&metrics.major_events.to_string()),
        ]));

        writeln!(self.out, "\n{}", "═".repeat(RULE_WIDTH).bright_blue())?;
        writeln!(
            self.out,
            "{}  {}",
            "NEWS ANALYSIS DASHBOARD".bright_blue(),
            Local::now().format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        )?;
        writeln!(self.out, "{}", "═".repeat(RULE_WIDTH).bright_blue())?;
        write!(self.out, "{}", table)
    }

    fn write_error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "\n{}", "═".repeat(RULE_WIDTH).bright_red())?;
        writeln!(self.out, "{}", message.bright_red())?;
        writeln!(self.out, "{}", "═".repeat(RULE_WIDTH).bright_red())?;
        self.out.flush()
    }

    fn print_options(&mut self) -> io::Result<()> {
        let labels: Vec<_> = self.options.iter().map(|o| o.label.as_str()).collect();
        writeln!(self.out, "{}: {}", "Topics".bright_blue(), labels.join(", "))
    }
}

impl<W: Write> ListContainer for TerminalView<W> {
    fn clear_items(&mut self) {
        write_or_warn(self.write_heading("Latest Analysis"));
    }

    fn append_item(&mut self, item: &ListItem) {
        write_or_warn(self.write_item(item));
    }
}

impl<W: Write> OptionsSurface for TerminalView<W> {
    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn append_option(&mut self, option: &ClusterOption) {
        self.options.push(option.clone());
        write_or_warn(self.print_options());
    }
}

impl<W: Write> DashboardView for TerminalView<W> {
    fn render_metrics(&mut self, metrics: &Metrics) {
        write_or_warn(self.write_metrics(metrics));
    }

    fn notify_error(&mut self, message: &str) {
        write_or_warn(self.write_error(message));
    }
}

/// Draws charts as text. A chart whose surface is not enabled cannot be drawn.
pub struct TerminalCharts<W: Write> {
    out: W,
    surfaces: BTreeSet<ChartName>,
    next_handle: u64,
}

impl TerminalCharts<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalCharts::new(io::stdout())
    }
}

impl<W: Write> TerminalCharts<W> {
    pub fn new(out: W) -> Self {
        TerminalCharts::with_surfaces(out, ChartName::ALL)
    }

    pub fn with_surfaces(out: W, surfaces: impl IntoIterator<Item = ChartName>) -> Self {
        TerminalCharts {
            out,
            surfaces: surfaces.into_iter().collect(),
            next_handle: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, name: ChartName, spec: &ChartSpec) -> io::Result<()> {
        writeln!(self.out, "\n{}", name.to_string().bright_blue())?;
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH).dimmed())?;
        match spec {
            ChartSpec::Doughnut {
                labels,
                values,
                colors,
            } => self.draw_proportions(labels, values, colors),
            ChartSpec::Scatter {
                points,
                color,
                x_title,
                y_title,
                ..
            } => self.draw_scatter(points, color, x_title, y_title),
        }
    }

    fn draw_proportions(
        &mut self,
        labels: &[String],
        values: &[usize],
        colors: &[&'static str],
    ) -> io::Result<()> {
        let total: usize = values.iter().sum();
        if total == 0 {
            return writeln!(self.out, "{}", "No articles".dimmed());
        }

        let mut bar = String::new();
        let mut legend = Vec::new();
        for ((label, value), color) in labels.iter().zip(values).zip(colors) {
            let width = (*value * BAR_WIDTH + total / 2) / total;
            bar.push_str(&paint(&"█".repeat(width), color).to_string());
            legend.push(format!(
                "{} {} {} ({:.0}%)",
                paint("■", color),
                label,
                value,
                *value as f64 * 100.0 / total as f64
            ));
        }
        writeln!(self.out, "{}", bar)?;
        writeln!(self.out, "{}", legend.join("   "))
    }

    fn draw_scatter(
        &mut self,
        points: &[ScatterPoint],
        color: &str,
        x_title: &str,
        y_title: &str,
    ) -> io::Result<()> {
        let grid = plot_grid(points, PLOT_WIDTH, PLOT_HEIGHT);
        let Some((y_min, y_max)) = y_range(points) else {
            return writeln!(self.out, "{}", "No articles".dimmed());
        };

        writeln!(self.out, "{} ({:.1} .. {:.1})", y_title, y_min, y_max)?;
        for row in grid {
            let line: String = row.into_iter().collect();
            writeln!(self.out, "│{}", paint(&line, color))?;
        }
        writeln!(self.out, "└{}", "─".repeat(PLOT_WIDTH))?;
        writeln!(self.out, " -1.0{:^w$}1.0", x_title, w = PLOT_WIDTH - 7)
    }
}

impl<W: Write> ChartEngine for TerminalCharts<W> {
    type Handle = u64;

    fn create(&mut self, name: ChartName, spec: &ChartSpec) -> Result<u64, RenderError> {
        if !self.surfaces.contains(&name) {
            return Err(RenderError::missing(name));
        }
        self.draw(name, spec)
            .map_err(|e| RenderError::Engine(e.to_string()))?;
        self.next_handle += 1;
        Ok(self.next_handle)
    }

    fn dispose(&mut self, handle: u64) {
        // Terminal output cannot be retracted; the next draw supersedes it.
        debug!(target: TARGET_RENDER, "Released chart handle {}", handle);
    }
}

fn y_range(points: &[ScatterPoint]) -> Option<(f64, f64)> {
    let mut ys = points.iter().map(|p| p.y).filter(|y| y.is_finite());
    let first = ys.next()?;
    let (min, max) = ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    if min == max {
        Some((min - 1.0, max + 1.0))
    } else {
        Some((min, max))
    }
}

/// Places points on a character grid. X spans the sentiment range [-1, 1],
/// Y spans the observed impact range; the top row holds the largest impact.
pub fn plot_grid(points: &[ScatterPoint], width: usize, height: usize) -> Vec<Vec<char>> {
    let mut grid = vec![vec![' '; width]; height];
    let Some((y_min, y_max)) = y_range(points) else {
        return grid;
    };

    let scale = |value: f64, lo: f64, hi: f64, cells: usize| -> usize {
        let t = ((value - lo) / (hi - lo)).clamp(0.0, 1.0);
        ((t * (cells - 1) as f64).round() as usize).min(cells - 1)
    };

    for point in points.iter().filter(|p| p.x.is_finite() && p.y.is_finite()) {
        let col = scale(point.x, -1.0, 1.0, width);
        let row = height - 1 - scale(point.y, y_min, y_max, height);
        grid[row][col] = match grid[row][col] {
            ' ' => '•',
            _ => '●',
        };
    }
    grid
}
