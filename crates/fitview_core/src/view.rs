//! Projection of the model onto page elements.
//!
//! A [`ViewState`] is what the page should look like; the difference between
//! two states is the list of [`ViewChange`]s a renderer has to apply.

use crate::model::{CheckboxKind, CheckboxState, ResultsTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderView {
    pub visible: bool,
    pub colspan: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxView {
    pub role: CheckboxKind,
    pub value: String,
    /// Owning software of a minimizer checkbox.
    #[serde(default)]
    pub software: Option<String>,
    /// Position among the page's checkboxes sharing `value`.
    #[serde(default)]
    pub slot: usize,
    pub state: CheckboxState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub headers: BTreeMap<String, HeaderView>,
    pub cells: BTreeMap<String, bool>,
    pub rows: Vec<bool>,
    pub problem_size_column: bool,
    pub checkboxes: Vec<CheckboxView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewChange {
    /// A header was shown or hidden, or its span changed. A zero colspan is
    /// never written; the header is hidden instead.
    Header {
        id: String,
        visible: bool,
        colspan: usize,
    },
    Cell {
        id: String,
        visible: bool,
    },
    Row {
        index: usize,
        visible: bool,
    },
    ProblemSizeColumn {
        visible: bool,
    },
    /// Minimizer checkboxes carry their software and slot, since several
    /// softwares may offer a minimizer of the same name.
    Checkbox {
        role: CheckboxKind,
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        software: Option<String>,
        #[serde(default)]
        slot: usize,
        checked: bool,
        disabled: bool,
    },
}

impl ViewState {
    /// Changes that turn `before` into `self`.
    pub fn changes_since(&self, before: &ViewState) -> Vec<ViewChange> {
        let mut changes = Vec::new();

        for (id, header) in &self.headers {
            if before.headers.get(id) != Some(header) {
                changes.push(ViewChange::Header {
                    id: id.clone(),
                    visible: header.visible,
                    colspan: header.colspan,
                });
            }
        }

        for (id, &visible) in &self.cells {
            if before.cells.get(id) != Some(&visible) {
                changes.push(ViewChange::Cell {
                    id: id.clone(),
                    visible,
                });
            }
        }

        for (index, &visible) in self.rows.iter().enumerate() {
            if before.rows.get(index) != Some(&visible) {
                changes.push(ViewChange::Row { index, visible });
            }
        }

        if self.problem_size_column != before.problem_size_column {
            changes.push(ViewChange::ProblemSizeColumn {
                visible: self.problem_size_column,
            });
        }

        for checkbox in &self.checkboxes {
            if !before.checkboxes.contains(checkbox) {
                changes.push(ViewChange::Checkbox {
                    role: checkbox.role,
                    value: checkbox.value.clone(),
                    software: checkbox.software.clone(),
                    slot: checkbox.slot,
                    checked: checkbox.state.checked,
                    disabled: checkbox.state.disabled,
                });
            }
        }

        changes
    }
}

impl ResultsTable {
    pub fn view_state(&self) -> ViewState {
        let mut headers = BTreeMap::new();
        for cf in &self.cost_functions {
            headers.insert(
                cf.header_id.clone(),
                HeaderView {
                    visible: cf.visible,
                    colspan: cf.colspan,
                },
            );
        }
        for software in &self.softwares {
            headers.insert(
                software.header_id.clone(),
                HeaderView {
                    visible: software.visible,
                    colspan: software.colspan,
                },
            );
        }
        let mut cells = BTreeMap::new();
        for column in &self.columns {
            headers.insert(
                column.header_id.clone(),
                HeaderView {
                    visible: column.visible,
                    colspan: 1,
                },
            );
            for cell in &column.cells {
                cells.insert(cell.id.clone(), cell.visible);
            }
        }

        let mut checkboxes = Vec::new();
        for (name, state) in &self.cost_function_boxes {
            checkboxes.push(checkbox_view(CheckboxKind::CostFunction, name, *state));
        }
        for (name, state) in &self.software_boxes {
            checkboxes.push(checkbox_view(CheckboxKind::Software, name, *state));
        }
        for ((software, minimizer), state) in &self.minimizer_boxes {
            checkboxes.push(CheckboxView {
                software: Some(software.clone()),
                slot: self.minimizer_slot(software, minimizer).unwrap_or(0),
                ..checkbox_view(CheckboxKind::Minimizer, minimizer, *state)
            });
        }
        checkboxes.push(checkbox_view(
            CheckboxKind::ProblemSize,
            "problem_size",
            self.problem_size_box,
        ));

        ViewState {
            headers,
            cells,
            rows: self.rows.iter().map(|row| row.visible).collect(),
            problem_size_column: self.problem_size_visible,
            checkboxes,
        }
    }

    /// Runs `op` against the model and returns the page changes it caused.
    pub fn apply<F>(&mut self, op: F) -> Vec<ViewChange>
    where
        F: FnOnce(&mut Self),
    {
        let before = self.view_state();
        op(self);
        self.view_state().changes_since(&before)
    }
}

fn checkbox_view(role: CheckboxKind, value: &str, state: CheckboxState) -> CheckboxView {
    CheckboxView {
        role,
        value: value.to_string(),
        software: None,
        slot: 0,
        state,
    }
}
