//! As-rendered description of a results table.
//!
//! A `TableLayout` is what a scraper reads off the generated report before
//! any ownership has been resolved: header cells with their ids and text,
//! data rows with their cell ids, and the checkbox states of the filter
//! dropdowns.

use crate::ident::{COST_FUNCTION_LEVEL, MINIMIZER_LEVEL, SOFTWARE_LEVEL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderRole {
    CostFunction,
    Software,
    Minimizer,
}

impl HeaderRole {
    pub fn level(self) -> u8 {
        match self {
            HeaderRole::CostFunction => COST_FUNCTION_LEVEL,
            HeaderRole::Software => SOFTWARE_LEVEL,
            HeaderRole::Minimizer => MINIMIZER_LEVEL,
        }
    }

    /// Class carried by the header's anchor element.
    pub fn anchor_class(self) -> &'static str {
        match self {
            HeaderRole::CostFunction => "cost_function_header",
            HeaderRole::Software => "software_header",
            HeaderRole::Minimizer => "minimizer_header",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub role: HeaderRole,
    /// Id of the `th` element, `<prefix>_level<L>_col<N>`.
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub colspan: Option<usize>,
    /// `data-software` of minimizer headers.
    #[serde(default)]
    pub software: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowLayout {
    pub problem: String,
    /// Ids of the row's `td` cells.
    pub cells: Vec<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckboxLayout {
    pub value: String,
    pub checked: bool,
    #[serde(default)]
    pub disabled: bool,
    /// `data-software` on the checkbox or an enclosing element.
    #[serde(default)]
    pub software: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub headers: Vec<HeaderCell>,
    #[serde(default)]
    pub rows: Vec<RowLayout>,
    #[serde(default)]
    pub checkboxes: Vec<CheckboxLayout>,
    #[serde(default)]
    pub problem_size_checkbox: Option<bool>,
}

fn default_visible() -> bool {
    true
}
