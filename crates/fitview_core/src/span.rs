//! Column span bookkeeping for the two grouping header rows.

use crate::model::ResultsTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpanMode {
    /// Count only columns currently shown.
    #[default]
    Visible,
    /// Count every column regardless of visibility.
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub visible: usize,
    pub total: usize,
}

impl ResultsTable {
    /// Number of minimizer columns under `cost_func`. Unknown names span 0.
    pub fn cost_function_span(&self, cost_func: &str, mode: SpanMode) -> usize {
        self.cost_function_index(cost_func)
            .map_or(0, |index| self.count_columns(&self.cost_functions[index].columns, mode))
    }

    /// Number of visible minimizer columns of `software` under `cost_func`.
    pub fn software_span(&self, cost_func: &str, software: &str) -> usize {
        self.cost_function_index(cost_func).map_or(0, |index| {
            self.count_columns(&self.software_columns(index, software), SpanMode::Visible)
        })
    }

    pub fn column_summary(&self, cost_func: &str) -> ColumnSummary {
        ColumnSummary {
            visible: self.cost_function_span(cost_func, SpanMode::Visible),
            total: self.cost_function_span(cost_func, SpanMode::All),
        }
    }

    /// Re-derives every colspan and header visibility beneath one cost
    /// function from its columns. A header is shown iff its span is non-zero.
    pub(crate) fn refresh_spans(&mut self, cost_function: usize) {
        for group in self.cost_functions[cost_function].softwares.clone() {
            let span = self.count_columns(&self.softwares[group].columns, SpanMode::Visible);
            let software = &mut self.softwares[group];
            software.colspan = span;
            software.visible = span > 0;
        }

        let span = self.count_columns(&self.cost_functions[cost_function].columns, SpanMode::Visible);
        let cf = &mut self.cost_functions[cost_function];
        cf.colspan = span;
        cf.visible = span > 0;
    }

    fn count_columns(&self, columns: &[usize], mode: SpanMode) -> usize {
        match mode {
            SpanMode::All => columns.len(),
            SpanMode::Visible => columns
                .iter()
                .filter(|&&index| self.columns[index].visible)
                .count(),
        }
    }
}
