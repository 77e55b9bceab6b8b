use serde::{Deserialize, Serialize};

/// Settings describing how the report was rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Id of the results table, also the prefix of every header and cell id.
    pub table_id: String,
    /// Frame height per performance profile plot.
    pub profile_plot_height: u32,
    /// Frame height used in many-solvers mode for offline plots.
    pub placeholder_plot_height: u32,
    /// 1-based `nth-child` index of the problem size column.
    pub problem_size_column: usize,
    pub metric_storage_key: String,
    /// Overrides the many-solvers flag read from the plot trigger.
    pub many_solvers: Option<bool>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            table_id: "T_table".to_string(),
            profile_plot_height: 650,
            placeholder_plot_height: 100,
            problem_size_column: 2,
            metric_storage_key: "selected_runtime_metric".to_string(),
            many_solvers: None,
        }
    }
}
