//! Retained model of a rendered results table.
//!
//! Ownership between the three header levels is resolved once, when the
//! model is built from a [`TableLayout`]. Afterwards every group, column and
//! cell is addressed by index and only its visibility, span and checkbox
//! state change.

use crate::error::LayoutError;
use crate::ident::{self, composite_key, cost_function_key, parse_column_number};
use crate::layout::{HeaderCell, TableLayout};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckboxKind {
    CostFunction,
    Software,
    Minimizer,
    ProblemSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxState {
    pub checked: bool,
    pub disabled: bool,
}

impl CheckboxState {
    pub const ON: Self = Self {
        checked: true,
        disabled: false,
    };
    pub const OFF: Self = Self {
        checked: false,
        disabled: false,
    };
    pub const MIXED: Self = Self {
        checked: false,
        disabled: true,
    };

    /// A disabled box stands for a group with some members still shown.
    pub fn is_effectively_on(self) -> bool {
        self.checked || self.disabled
    }
}

/// Addresses one checkbox of the filter dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxTarget<'a> {
    CostFunction(&'a str),
    Software(&'a str),
    Minimizer { software: &'a str, minimizer: &'a str },
    ProblemSize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostFunctionGroup {
    /// Case-folded header text.
    pub name: String,
    pub header_id: String,
    pub column: usize,
    pub visible: bool,
    pub colspan: usize,
    pub softwares: Vec<usize>,
    pub columns: Vec<usize>,
}

/// One software header occurrence beneath a cost function.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftwareGroup {
    pub name: String,
    pub header_id: String,
    pub column: usize,
    pub cost_function: usize,
    pub visible: bool,
    pub colspan: usize,
    pub columns: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimizerColumn {
    pub name: String,
    pub header_id: String,
    pub column: usize,
    pub cost_function: usize,
    pub software: usize,
    /// `_<cost_func>_<minimizer>_[<software>`
    pub key: String,
    pub visible: bool,
    pub cells: Vec<DataCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataCell {
    pub id: String,
    pub row: usize,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProblemRow {
    pub name: String,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct ResultsTable {
    pub(crate) cost_functions: Vec<CostFunctionGroup>,
    pub(crate) softwares: Vec<SoftwareGroup>,
    pub(crate) columns: Vec<MinimizerColumn>,
    pub(crate) rows: Vec<ProblemRow>,
    pub(crate) cost_function_boxes: BTreeMap<String, CheckboxState>,
    pub(crate) software_boxes: BTreeMap<String, CheckboxState>,
    /// Keyed by (software, minimizer) as rendered.
    pub(crate) minimizer_boxes: BTreeMap<(String, String), CheckboxState>,
    pub(crate) problem_size_box: CheckboxState,
    pub(crate) problem_size_visible: bool,
}

/// A header of level 0 or 1 together with the columns it covers.
struct SpanningHeader<'a> {
    cell: &'a HeaderCell,
    start: usize,
    end: usize,
}

impl SpanningHeader<'_> {
    fn covers(&self, column: usize) -> bool {
        self.start <= column && column < self.end
    }
}

impl ResultsTable {
    pub fn from_layout(layout: TableLayout) -> Result<Self, LayoutError> {
        let mut levels: [Vec<(usize, &HeaderCell)>; 3] = Default::default();
        for header in &layout.headers {
            let Some(column) = parse_column_number(&header.id) else {
                warn!("skipping header '{}' with unparseable id '{}'", header.text, header.id);
                continue;
            };
            let level = header.role.level();
            if let Some(id_level) = ident::parse_header_level(&header.id) {
                if id_level != level {
                    warn!(
                        "header '{}' is tagged {:?} but its id says level {}",
                        header.id, header.role, id_level
                    );
                }
            }
            levels[usize::from(level)].push((column, header));
        }

        for (level, headers) in levels.iter_mut().enumerate() {
            headers.sort_by_key(|(column, _)| *column);
            if let Some(pair) = headers.windows(2).find(|pair| pair[0].0 == pair[1].0) {
                return Err(LayoutError::DuplicateColumn {
                    level: level as u8,
                    column: pair[0].0,
                });
            }
        }

        let cost_function_headers = spanning_headers(&levels[0]);
        let software_headers = spanning_headers(&levels[1]);

        let mut cost_functions: Vec<CostFunctionGroup> = cost_function_headers
            .iter()
            .map(|header| CostFunctionGroup {
                name: cost_function_key(&header.cell.text),
                header_id: header.cell.id.clone(),
                column: header.start,
                visible: header.cell.visible,
                colspan: 0,
                softwares: Vec::new(),
                columns: Vec::new(),
            })
            .collect();

        // Parallel to `software_headers`; `None` where the header has no owner.
        let mut software_slots: Vec<Option<usize>> = Vec::with_capacity(software_headers.len());
        let mut softwares: Vec<SoftwareGroup> = Vec::new();
        for header in &software_headers {
            let owner = cost_function_headers
                .iter()
                .position(|cf| cf.covers(header.start));
            let Some(cost_function) = owner else {
                warn!("software header '{}' lies outside every cost function", header.cell.id);
                software_slots.push(None);
                continue;
            };
            let index = softwares.len();
            cost_functions[cost_function].softwares.push(index);
            softwares.push(SoftwareGroup {
                name: header.cell.text.trim().to_string(),
                header_id: header.cell.id.clone(),
                column: header.start,
                cost_function,
                visible: header.cell.visible,
                colspan: 0,
                columns: Vec::new(),
            });
            software_slots.push(Some(index));
        }

        let mut columns: Vec<MinimizerColumn> = Vec::new();
        let mut column_index: BTreeMap<usize, usize> = BTreeMap::new();
        for &(column, header) in &levels[2] {
            let Some(cost_function) = cost_function_headers.iter().position(|cf| cf.covers(column))
            else {
                warn!("minimizer header '{}' lies outside every cost function", header.id);
                continue;
            };
            let software = software_headers
                .iter()
                .zip(&software_slots)
                .filter_map(|(sw, slot)| slot.filter(|_| sw.covers(column)))
                .find(|&index| softwares[index].cost_function == cost_function);
            let Some(software) = software else {
                warn!("minimizer header '{}' lies outside every software header", header.id);
                continue;
            };

            let name = header.text.trim().to_string();
            let software_name = &softwares[software].name;
            if let Some(tagged) = header.software.as_deref() {
                if tagged.trim() != software_name {
                    warn!(
                        "minimizer '{}' is tagged with software '{}' but sits under '{}'",
                        name, tagged, software_name
                    );
                }
            }
            let key = composite_key(&cost_functions[cost_function].name, &name, software_name);

            let index = columns.len();
            column_index.insert(column, index);
            cost_functions[cost_function].columns.push(index);
            softwares[software].columns.push(index);
            columns.push(MinimizerColumn {
                key,
                name,
                header_id: header.id.clone(),
                column,
                cost_function,
                software,
                visible: header.visible,
                cells: Vec::new(),
            });
        }

        if columns.is_empty() {
            return Err(LayoutError::NoColumns);
        }

        let mut rows = Vec::with_capacity(layout.rows.len());
        for (row, row_layout) in layout.rows.iter().enumerate() {
            for cell_id in &row_layout.cells {
                let owner = parse_column_number(cell_id).and_then(|col| column_index.get(&col));
                match owner {
                    Some(&index) => {
                        let visible = columns[index].visible;
                        columns[index].cells.push(DataCell {
                            id: cell_id.clone(),
                            row,
                            visible,
                        });
                    }
                    None => warn!("data cell '{}' has no minimizer column", cell_id),
                }
            }
            rows.push(ProblemRow {
                name: row_layout.problem.trim().to_string(),
                visible: row_layout.visible,
            });
        }

        let mut table = Self {
            cost_functions,
            softwares,
            columns,
            rows,
            cost_function_boxes: BTreeMap::new(),
            software_boxes: BTreeMap::new(),
            minimizer_boxes: BTreeMap::new(),
            problem_size_box: CheckboxState {
                checked: layout.problem_size_checkbox.unwrap_or(true),
                disabled: false,
            },
            problem_size_visible: layout.problem_size_checkbox.unwrap_or(true),
        };
        table.classify_checkboxes(&layout);
        for index in 0..table.cost_functions.len() {
            table.refresh_spans(index);
        }
        Ok(table)
    }

    /// Minimizer checkboxes scoped to a software (`data-software`) go to that
    /// software. Unscoped ones are handed to the softwares offering that
    /// minimizer in column order, one checkbox each.
    fn classify_checkboxes(&mut self, layout: &TableLayout) {
        let cost_function_names: BTreeSet<String> =
            self.cost_functions.iter().map(|cf| cf.name.clone()).collect();
        let software_names: BTreeSet<String> =
            self.softwares.iter().map(|sw| sw.name.clone()).collect();
        let mut minimizer_owners: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for column in &self.columns {
            let owners = minimizer_owners.entry(column.name.clone()).or_default();
            let software = &self.softwares[column.software].name;
            if !owners.contains(software) {
                owners.push(software.clone());
            }
        }
        let mut unscoped: BTreeMap<&str, usize> = BTreeMap::new();

        for checkbox in &layout.checkboxes {
            let value = checkbox.value.trim();
            let state = CheckboxState {
                checked: checkbox.checked,
                disabled: checkbox.disabled,
            };
            let cost_func = cost_function_key(value);
            if cost_function_names.contains(&cost_func) {
                self.cost_function_boxes.insert(cost_func, state);
            } else if software_names.contains(value) {
                self.software_boxes.insert(value.to_string(), state);
            } else if let Some(owners) = minimizer_owners.get(value) {
                let owner = match checkbox.software.as_deref() {
                    Some(scope) => owners.iter().find(|owner| owner.as_str() == scope.trim()),
                    None => {
                        let seen = unscoped.entry(value).or_insert(0);
                        *seen += 1;
                        owners.get(*seen - 1)
                    }
                };
                match owner {
                    Some(software) => {
                        self.minimizer_boxes
                            .insert((software.clone(), value.to_string()), state);
                    }
                    None => warn!("minimizer checkbox '{}' has no matching software", value),
                }
            } else {
                warn!("ignoring checkbox with unknown value '{}'", value);
            }
        }

        for name in cost_function_names {
            self.cost_function_boxes.entry(name).or_insert(CheckboxState::ON);
        }
        for name in software_names {
            self.software_boxes.entry(name).or_insert(CheckboxState::ON);
        }
        for (minimizer, owners) in minimizer_owners {
            for software in owners {
                self.minimizer_boxes
                    .entry((software, minimizer.clone()))
                    .or_insert(CheckboxState::ON);
            }
        }
    }

    pub fn cost_functions(&self) -> &[CostFunctionGroup] {
        &self.cost_functions
    }

    pub fn software_groups(&self) -> &[SoftwareGroup] {
        &self.softwares
    }

    pub fn columns(&self) -> &[MinimizerColumn] {
        &self.columns
    }

    pub fn rows(&self) -> &[ProblemRow] {
        &self.rows
    }

    pub fn problem_size_visible(&self) -> bool {
        self.problem_size_visible
    }

    pub fn cost_function(&self, name: &str) -> Option<&CostFunctionGroup> {
        self.cost_function_index(name)
            .map(|index| &self.cost_functions[index])
    }

    /// The occurrence of `software` beneath `cost_func`.
    pub fn software_group(&self, cost_func: &str, software: &str) -> Option<&SoftwareGroup> {
        let cost_function = self.cost_function_index(cost_func)?;
        self.cost_functions[cost_function]
            .softwares
            .iter()
            .map(|&index| &self.softwares[index])
            .find(|group| group.name == software.trim())
    }

    pub fn column_by_number(&self, column: usize) -> Option<&MinimizerColumn> {
        self.columns.iter().find(|candidate| candidate.column == column)
    }

    /// Ids of every data cell currently shown, rows aside.
    pub fn visible_cell_ids(&self) -> BTreeSet<String> {
        self.columns
            .iter()
            .flat_map(|column| column.cells.iter())
            .filter(|cell| cell.visible)
            .map(|cell| cell.id.clone())
            .collect()
    }

    pub fn checkbox(&self, target: CheckboxTarget<'_>) -> Option<CheckboxState> {
        match target {
            CheckboxTarget::CostFunction(name) => {
                self.cost_function_boxes.get(&cost_function_key(name)).copied()
            }
            CheckboxTarget::Software(name) => self.software_boxes.get(name.trim()).copied(),
            CheckboxTarget::Minimizer {
                software,
                minimizer,
            } => self
                .minimizer_boxes
                .get(&(software.trim().to_string(), minimizer.trim().to_string()))
                .copied(),
            CheckboxTarget::ProblemSize => Some(self.problem_size_box),
        }
    }

    pub(crate) fn checkbox_mut(&mut self, target: CheckboxTarget<'_>) -> Option<&mut CheckboxState> {
        match target {
            CheckboxTarget::CostFunction(name) => {
                self.cost_function_boxes.get_mut(&cost_function_key(name))
            }
            CheckboxTarget::Software(name) => self.software_boxes.get_mut(name.trim()),
            CheckboxTarget::Minimizer {
                software,
                minimizer,
            } => self
                .minimizer_boxes
                .get_mut(&(software.trim().to_string(), minimizer.trim().to_string())),
            CheckboxTarget::ProblemSize => Some(&mut self.problem_size_box),
        }
    }

    /// Records the live checked state of a checkbox, as read from the page.
    ///
    /// Returns `false` when no such checkbox exists.
    pub fn set_checked(&mut self, target: CheckboxTarget<'_>, checked: bool) -> bool {
        match self.checkbox_mut(target) {
            Some(state) => {
                state.checked = checked;
                true
            }
            None => {
                warn!("no checkbox for {:?}", target);
                false
            }
        }
    }

    pub(crate) fn set_column_visible(&mut self, index: usize, visible: bool) {
        let column = &mut self.columns[index];
        column.visible = visible;
        for cell in &mut column.cells {
            cell.visible = visible;
        }
    }

    /// Indices of cost functions whose checkbox is checked.
    pub(crate) fn checked_cost_functions(&self) -> Vec<usize> {
        self.cost_functions
            .iter()
            .enumerate()
            .filter(|(_, cf)| {
                self.cost_function_boxes
                    .get(&cf.name)
                    .is_some_and(|state| state.checked)
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Sorted level headers with the column range each one spans.
///
/// A header runs up to the next header of its level. Rendered colspans are
/// not trusted: they shrink as columns are hidden.
fn spanning_headers<'a>(headers: &[(usize, &'a HeaderCell)]) -> Vec<SpanningHeader<'a>> {
    headers
        .iter()
        .enumerate()
        .map(|(i, &(start, cell))| {
            let end = headers.get(i + 1).map_or(usize::MAX, |&(column, _)| column);
            if let Some(span) = cell.colspan {
                if start.saturating_add(span) > end {
                    warn!(
                        "header '{}' spans {} columns but the next header starts at column {}",
                        cell.id, span, end
                    );
                }
            }
            SpanningHeader { cell, start, end }
        })
        .collect()
}
