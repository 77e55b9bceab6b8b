//! Profile plot frames and runtime metric selection.

use crate::config::ReportConfig;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotFrame {
    pub src: String,
    pub height: u32,
    pub width: String,
    /// Whether the profile info panel should be shown alongside.
    pub show_info: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub frames: Vec<PlotFrame>,
    pub show_info: bool,
}

/// Whether a report was generated in many-solvers mode, from the flag
/// attribute on the plot trigger. Only an explicit `"False"` turns it off.
pub fn parse_many_solvers_flag(value: Option<&str>) -> bool {
    value.map_or(true, |flag| flag.trim() != "False")
}

/// Frame for one plot path.
///
/// Remote plots, and every plot of a report that is not in many-solvers
/// mode, get one profile height per `+`-joined plot name in the file name.
/// Offline plots in many-solvers mode collapse to a placeholder.
pub fn iframe_height(path: &str, many_solvers: bool, config: &ReportConfig) -> PlotFrame {
    let remote = path.starts_with("http");
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (height, show_info) = if remote || !many_solvers {
        let plots = u32::try_from(file_name.split('+').count()).unwrap_or(u32::MAX);
        (plots.saturating_mul(config.profile_plot_height), true)
    } else {
        (config.placeholder_plot_height, false)
    };
    PlotFrame {
        src: path.to_string(),
        height,
        width: "100%".to_string(),
        show_info,
    }
}

/// Frames for a `|`-delimited list of plot sources. Empty entries are
/// skipped; the last frame decides whether the info panel is shown.
pub fn plot_frames(sources: &str, many_solvers: bool, config: &ReportConfig) -> PlotLayout {
    let frames: Vec<PlotFrame> = sources
        .split('|')
        .map(str::trim)
        .filter(|source| !source.is_empty())
        .map(|source| iframe_height(source, many_solvers, config))
        .collect();
    let show_info = frames.last().is_some_and(|frame| frame.show_info);
    PlotLayout { frames, show_info }
}

/// Recovers the metric from a legacy inline handler such as
/// `update_runtime('mean')`.
pub fn metric_from_handler(handler: &str) -> Option<String> {
    let start = handler.find('(')? + 1;
    let end = start + handler[start..].find(')')?;
    let metric = handler[start..end].trim().trim_matches(|c| c == '\'' || c == '"');
    (!metric.is_empty()).then(|| metric.to_string())
}

/// Session-scoped runtime metric selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeMetricState {
    available: Vec<String>,
    selected: Option<String>,
}

impl RuntimeMetricState {
    /// `available` may be empty when the page offers no radio controls, in
    /// which case any metric is accepted.
    pub fn new(available: Vec<String>) -> Self {
        Self {
            available,
            selected: None,
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Selects `metric`. Returns `false`, leaving the selection untouched,
    /// for metrics the page does not offer.
    pub fn select(&mut self, metric: &str) -> bool {
        let metric = metric.trim();
        if metric.is_empty() {
            return false;
        }
        if !self.available.is_empty() && !self.available.iter().any(|known| known == metric) {
            warn!("ignoring unknown runtime metric '{}'", metric);
            return false;
        }
        self.selected = Some(metric.to_string());
        true
    }

    /// Whether the radio control for `metric` should be checked.
    pub fn is_selected(&self, metric: &str) -> bool {
        self.selected.as_deref() == Some(metric)
    }

    /// CSS display value for the `metric` span inside a result cell.
    pub fn display_for(&self, metric: &str) -> &'static str {
        if self.is_selected(metric) {
            "inline"
        } else {
            "none"
        }
    }
}
