//! Name and identifier lookups over the table model.

use crate::ident::{composite_key, cost_function_key, software_token};
use crate::model::ResultsTable;

impl ResultsTable {
    /// Case-folded cost function names in column order.
    pub fn cost_function_names(&self) -> Vec<String> {
        dedup(self.cost_functions.iter().map(|cf| cf.name.as_str()))
    }

    pub fn software_names(&self) -> Vec<String> {
        dedup(self.softwares.iter().map(|sw| sw.name.as_str()))
    }

    /// Minimizers rendered under `software`, across every cost function.
    pub fn minimizer_names(&self, software: &str) -> Vec<String> {
        let token = software_token(software);
        dedup(
            self.columns
                .iter()
                .filter(|column| software_token(&self.softwares[column.software].name) == token)
                .map(|column| column.name.as_str()),
        )
    }

    /// Softwares offering `minimizer`, in the order their columns first appear.
    pub fn minimizer_owners(&self, minimizer: &str) -> Vec<String> {
        let minimizer = minimizer.trim();
        dedup(
            self.columns
                .iter()
                .filter(|column| column.name == minimizer)
                .map(|column| self.softwares[column.software].name.as_str()),
        )
    }

    /// Position of `software` among the owners of `minimizer`. The page lists
    /// one checkbox per owner, in this order.
    pub fn minimizer_slot(&self, software: &str, minimizer: &str) -> Option<usize> {
        self.minimizer_owners(minimizer)
            .iter()
            .position(|owner| owner == software.trim())
    }

    /// Data cell ids of `cost_func` and the column numbers they sit in.
    pub fn data_cells_for_cost_function(&self, cost_func: &str) -> (Vec<String>, Vec<usize>) {
        let Some(index) = self.cost_function_index(cost_func) else {
            return (Vec::new(), Vec::new());
        };
        let mut cell_ids = Vec::new();
        let mut columns = Vec::new();
        for &column in &self.cost_functions[index].columns {
            let column = &self.columns[column];
            cell_ids.extend(column.cells.iter().map(|cell| cell.id.clone()));
            if !column.cells.is_empty() && !columns.contains(&column.column) {
                columns.push(column.column);
            }
        }
        (cell_ids, columns)
    }

    /// Data cell ids of one minimizer column of `cost_func`.
    ///
    /// The minimizer may carry a `:` annotation, which is ignored. An unknown
    /// combination yields an empty list.
    pub fn data_cells_for_minimizer(
        &self,
        cost_func: &str,
        minimizer: &str,
        software: &str,
    ) -> Vec<String> {
        let Some(index) = self.cost_function_index(cost_func) else {
            return Vec::new();
        };
        self.minimizer_columns(index, minimizer, software)
            .into_iter()
            .flat_map(|column| self.columns[column].cells.iter())
            .map(|cell| cell.id.clone())
            .collect()
    }

    pub(crate) fn cost_function_index(&self, cost_func: &str) -> Option<usize> {
        let key = cost_function_key(cost_func);
        self.cost_functions.iter().position(|cf| cf.name == key)
    }

    /// Column indices of `minimizer` under `software` within one cost function.
    pub(crate) fn minimizer_columns(
        &self,
        cost_function: usize,
        minimizer: &str,
        software: &str,
    ) -> Vec<usize> {
        let cf = &self.cost_functions[cost_function];
        let key = composite_key(&cf.name, minimizer, software);
        cf.columns
            .iter()
            .copied()
            .filter(|&column| self.columns[column].key == key)
            .collect()
    }

    /// Column indices of every minimizer of `software` within one cost function.
    pub(crate) fn software_columns(&self, cost_function: usize, software: &str) -> Vec<usize> {
        let token = software_token(software);
        self.cost_functions[cost_function]
            .softwares
            .iter()
            .filter(|&&group| software_token(&self.softwares[group].name) == token)
            .flat_map(|&group| self.softwares[group].columns.iter().copied())
            .collect()
    }
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for name in names {
        let name = name.trim();
        if !unique.iter().any(|seen| seen == name) {
            unique.push(name.to_string());
        }
    }
    unique
}
