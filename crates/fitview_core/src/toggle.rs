//! Toggle operations driven by the filter dropdowns and row links.
//!
//! Every toggle first reads the checkbox states it depends on, then changes
//! column visibility, and only then recomputes spans. None of them keep
//! state between calls, so repeating a toggle with unchanged checkboxes is a
//! no-op.

use crate::model::{CheckboxState, CheckboxTarget, ResultsTable};
use log::{debug, warn};

impl ResultsTable {
    /// Shows or hides one minimizer in every checked cost function,
    /// following its checkbox.
    pub fn toggle_minimizer(&mut self, software: &str, minimizer: &str) {
        let Some(state) = self.checkbox(CheckboxTarget::Minimizer {
            software,
            minimizer,
        }) else {
            warn!("no checkbox for minimizer '{}' of '{}'", minimizer, software);
            return;
        };

        let plan: Vec<(usize, Vec<usize>)> = self
            .checked_cost_functions()
            .into_iter()
            .map(|cf| (cf, self.minimizer_columns(cf, minimizer, software)))
            .collect();

        for (_, columns) in &plan {
            for &column in columns {
                self.set_column_visible(column, state.checked);
            }
        }
        for (cf, _) in plan {
            self.refresh_spans(cf);
            self.log_summary(cf);
        }
        self.reconcile_software_checkbox(software);
    }

    /// Shows or hides every minimizer of `software` and forces their
    /// checkboxes to match the software checkbox.
    pub fn toggle_software(&mut self, software: &str) {
        let Some(state) = self.checkbox(CheckboxTarget::Software(software)) else {
            warn!("no checkbox for software '{}'", software);
            return;
        };

        let plan: Vec<(usize, Vec<usize>)> = self
            .checked_cost_functions()
            .into_iter()
            .map(|cf| (cf, self.software_columns(cf, software)))
            .collect();
        let minimizers = self.minimizer_names(software);

        for (_, columns) in &plan {
            for &column in columns {
                self.set_column_visible(column, state.checked);
            }
        }
        for (cf, _) in plan {
            self.refresh_spans(cf);
            self.log_summary(cf);
        }

        // The software box is authoritative here; no reconciliation.
        let forced = if state.checked {
            CheckboxState::ON
        } else {
            CheckboxState::OFF
        };
        for minimizer in &minimizers {
            if let Some(current) = self.checkbox_mut(CheckboxTarget::Minimizer {
                software,
                minimizer: minimizer.as_str(),
            }) {
                *current = forced;
            }
        }
        if let Some(current) = self.checkbox_mut(CheckboxTarget::Software(software)) {
            current.disabled = false;
        }
    }

    /// Shows or hides a whole cost function.
    ///
    /// Showing restores exactly the minimizers whose own checkboxes are
    /// checked, under softwares that are checked or mixed. Hiding leaves every
    /// checkbox beneath it untouched.
    pub fn toggle_cost_function(&mut self, cost_func: &str) {
        let Some(cf) = self.cost_function_index(cost_func) else {
            warn!("unknown cost function '{}'", cost_func);
            return;
        };
        let Some(state) = self.checkbox(CheckboxTarget::CostFunction(cost_func)) else {
            warn!("no checkbox for cost function '{}'", cost_func);
            return;
        };

        let this = &*self;
        let plan: Vec<(usize, bool)> = if state.checked {
            this.cost_functions[cf]
                .softwares
                .iter()
                .flat_map(move |&group| {
                    let software = &this.softwares[group];
                    let software_on = this
                        .checkbox(CheckboxTarget::Software(software.name.as_str()))
                        .is_some_and(CheckboxState::is_effectively_on);
                    software.columns.iter().map(move |&column| {
                        let shown = software_on
                            && this
                                .checkbox(CheckboxTarget::Minimizer {
                                    software: software.name.as_str(),
                                    minimizer: this.columns[column].name.as_str(),
                                })
                                .is_some_and(|minimizer| minimizer.checked);
                        (column, shown)
                    })
                })
                .collect()
        } else {
            this.cost_functions[cf]
                .columns
                .iter()
                .map(|&column| (column, false))
                .collect()
        };

        self.cost_functions[cf].visible = state.checked;
        for (column, shown) in plan {
            self.set_column_visible(column, shown);
        }
        self.refresh_spans(cf);
        self.log_summary(cf);
    }

    /// Flips the rows whose problem name matches, ignoring case and
    /// surrounding whitespace.
    pub fn toggle_row(&mut self, problem_name: &str) {
        let wanted = problem_name.trim().to_lowercase();
        let mut found = false;
        for row in self
            .rows
            .iter_mut()
            .filter(|row| row.name.to_lowercase() == wanted)
        {
            row.visible = !row.visible;
            found = true;
        }
        if !found {
            warn!("no row for problem '{}'", problem_name);
        }
    }

    /// Shows the problem size column iff its checkbox is checked.
    pub fn toggle_problem_size_column(&mut self) {
        self.problem_size_visible = self.problem_size_box.checked;
    }

    /// Clicks a minimizer checkbox and applies the result.
    pub fn click_minimizer(&mut self, software: &str, minimizer: &str) {
        if self.click(CheckboxTarget::Minimizer {
            software,
            minimizer,
        }) {
            self.toggle_minimizer(software, minimizer);
        }
    }

    pub fn click_software(&mut self, software: &str) {
        if self.click(CheckboxTarget::Software(software)) {
            self.toggle_software(software);
        }
    }

    pub fn click_cost_function(&mut self, cost_func: &str) {
        if self.click(CheckboxTarget::CostFunction(cost_func)) {
            self.toggle_cost_function(cost_func);
        }
    }

    pub fn click_problem_size(&mut self) {
        if self.click(CheckboxTarget::ProblemSize) {
            self.toggle_problem_size_column();
        }
    }

    /// Flips a checkbox the way a browser click does. Disabled boxes ignore
    /// clicks.
    fn click(&mut self, target: CheckboxTarget<'_>) -> bool {
        match self.checkbox_mut(target) {
            Some(state) if !state.disabled => {
                state.checked = !state.checked;
                true
            }
            Some(_) => {
                debug!("ignoring click on disabled checkbox {:?}", target);
                false
            }
            None => {
                warn!("no checkbox for {:?}", target);
                false
            }
        }
    }

    fn log_summary(&self, cost_function: usize) {
        let name = &self.cost_functions[cost_function].name;
        let summary = self.column_summary(name);
        debug!(
            "cost function '{}': {}/{} columns visible",
            name, summary.visible, summary.total
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{assert_invariants, layout, standard_table};
    use crate::model::{CheckboxState, CheckboxTarget, ResultsTable};

    fn scipy_table() -> ResultsTable {
        ResultsTable::from_layout(layout(
            &[("chi_sq", &[("scipy", &["lm", "trf"])])],
            &["prob_001", "prob_002", "prob_003"],
        ))
        .expect("layout should build")
    }

    fn minimizer<'a>(software: &'a str, minimizer: &'a str) -> CheckboxTarget<'a> {
        CheckboxTarget::Minimizer {
            software,
            minimizer,
        }
    }

    fn column_visible(table: &ResultsTable, column: usize) -> bool {
        table
            .column_by_number(column)
            .expect("column exists")
            .visible
    }

    #[test]
    fn unchecking_one_minimizer_shrinks_spans_and_mixes_software() {
        let mut table = scipy_table();
        table.click_minimizer("scipy", "lm");

        assert!(!column_visible(&table, 0));
        assert!(column_visible(&table, 1));
        let lm = table.column_by_number(0).expect("lm column");
        assert!(lm.cells.iter().all(|cell| !cell.visible));
        assert_eq!(table.cost_function("chi_sq").map(|cf| cf.colspan), Some(1));
        assert_eq!(table.software_group("chi_sq", "scipy").map(|sw| sw.colspan), Some(1));
        assert_eq!(table.checkbox(CheckboxTarget::Software("scipy")), Some(CheckboxState::MIXED));
        assert_invariants(&table);
    }

    #[test]
    fn unchecking_every_minimizer_hides_all_headers() {
        let mut table = scipy_table();
        table.click_minimizer("scipy", "lm");
        table.click_minimizer("scipy", "trf");

        assert_eq!(table.checkbox(CheckboxTarget::Software("scipy")), Some(CheckboxState::OFF));
        let scipy = table.software_group("chi_sq", "scipy").expect("scipy group");
        assert!(!scipy.visible);
        let chi_sq = table.cost_function("chi_sq").expect("chi_sq");
        assert_eq!(chi_sq.colspan, 0);
        assert!(!chi_sq.visible);
        assert!(table.visible_cell_ids().is_empty());
        assert_invariants(&table);
    }

    #[test]
    fn cost_function_round_trip_keeps_unchecked_minimizers_hidden() {
        let mut table = scipy_table();
        table.click_minimizer("scipy", "lm");
        table.click_minimizer("scipy", "trf");

        table.click_cost_function("chi_sq");
        table.click_cost_function("chi_sq");

        assert!(!column_visible(&table, 0));
        assert!(!column_visible(&table, 1));
        assert_eq!(table.checkbox(minimizer("scipy", "lm")), Some(CheckboxState::OFF));
        assert_eq!(table.checkbox(minimizer("scipy", "trf")), Some(CheckboxState::OFF));
        assert_eq!(table.checkbox(CheckboxTarget::CostFunction("chi_sq")), Some(CheckboxState::ON));
        assert_invariants(&table);
    }

    #[test]
    fn hiding_a_cost_function_cascades_without_touching_checkboxes() {
        let mut table = standard_table();
        table.click_minimizer("scipy", "trf");
        let before = table.visible_cell_ids();

        table.click_cost_function("nlls");
        let nlls = table.cost_function("nlls").expect("nlls");
        assert!(!nlls.visible);
        assert_eq!(nlls.colspan, 0);
        for &column in &nlls.columns {
            assert!(!table.columns()[column].visible);
        }
        for &group in &nlls.softwares {
            assert!(!table.software_groups()[group].visible);
        }
        assert_eq!(table.checkbox(minimizer("scipy", "lm")), Some(CheckboxState::ON));
        assert_eq!(table.checkbox(minimizer("minuit", "migrad")), Some(CheckboxState::ON));
        assert_eq!(table.checkbox(CheckboxTarget::Software("scipy")), Some(CheckboxState::MIXED));
        assert!(column_visible(&table, 0));
        assert_invariants(&table);

        table.click_cost_function("nlls");
        assert_eq!(table.visible_cell_ids(), before);
        assert!(!column_visible(&table, 4));
        assert!(column_visible(&table, 3));
        assert_invariants(&table);
    }

    #[test]
    fn minimizer_toggles_skip_unchecked_cost_functions() {
        let mut table = standard_table();
        table.click_cost_function("weighted_nlls");
        table.click_minimizer("scipy", "lm");
        table.click_minimizer("scipy", "lm");

        assert!(!column_visible(&table, 7));
        assert!(column_visible(&table, 0));
        assert!(column_visible(&table, 3));

        table.click_cost_function("weighted_nlls");
        assert!(column_visible(&table, 7));
        assert_invariants(&table);
    }

    #[test]
    fn software_toggle_forces_minimizer_checkboxes() {
        let mut table = standard_table();
        table.click_software("scipy");

        for column in [0, 1, 3, 4, 7, 8] {
            if let Some(found) = table.column_by_number(column) {
                assert!(!found.visible, "column {column} should be hidden");
            }
        }
        assert!(column_visible(&table, 2));
        assert_eq!(table.checkbox(minimizer("scipy", "lm")), Some(CheckboxState::OFF));
        assert_eq!(table.checkbox(minimizer("scipy", "trf")), Some(CheckboxState::OFF));
        assert!(table.cost_function("weighted_nlls").is_some_and(|cf| !cf.visible));
        assert_invariants(&table);

        table.click_software("scipy");
        assert_eq!(table.visible_cell_ids().len(), 9 * 3);
        assert_eq!(table.checkbox(minimizer("scipy", "trf")), Some(CheckboxState::ON));
        assert_invariants(&table);
    }

    #[test]
    fn disabled_software_ignores_clicks() {
        let mut table = scipy_table();
        table.click_minimizer("scipy", "lm");
        let before = table.visible_cell_ids();
        table.click_software("scipy");
        assert_eq!(table.visible_cell_ids(), before);
        assert_eq!(table.checkbox(CheckboxTarget::Software("scipy")), Some(CheckboxState::MIXED));
    }

    #[test]
    fn mixed_software_is_restored_with_its_cost_function() {
        let mut table = standard_table();
        table.click_minimizer("scipy", "lm");
        table.click_cost_function("chi_sq");
        table.click_cost_function("chi_sq");

        assert!(!column_visible(&table, 0));
        assert!(column_visible(&table, 1));
        assert!(column_visible(&table, 2));
        assert_eq!(table.cost_function("chi_sq").map(|cf| cf.colspan), Some(2));
        assert_invariants(&table);
    }

    #[test]
    fn unchecked_software_stays_hidden_when_cost_function_returns() {
        let mut table = standard_table();
        table.click_software("minuit");
        table.click_cost_function("chi_sq");
        table.click_cost_function("chi_sq");

        assert!(!column_visible(&table, 2));
        assert!(table.software_group("chi_sq", "minuit").is_some_and(|sw| !sw.visible));
        assert_eq!(table.cost_function("chi_sq").map(|cf| cf.colspan), Some(2));
        assert_invariants(&table);
    }

    #[test]
    fn annotated_minimizer_toggles_its_own_column() {
        let mut table = standard_table();
        table.click_minimizer("lm-scipy", "lm-scipy: j:best_available");
        assert!(!column_visible(&table, 6));
        assert_eq!(table.checkbox(CheckboxTarget::Software("lm-scipy")), Some(CheckboxState::OFF));
        assert!(table.software_group("nlls", "lm-scipy").is_some_and(|sw| !sw.visible));
        assert_eq!(table.cost_function("nlls").map(|cf| cf.colspan), Some(3));
        assert_invariants(&table);
    }

    #[test]
    fn repeating_a_toggle_with_unchanged_checkboxes_changes_nothing() {
        let mut table = standard_table();
        table.click_minimizer("scipy", "trf");
        table.click_cost_function("nlls");
        let cells = table.visible_cell_ids();
        let spans: Vec<usize> = table.cost_functions().iter().map(|cf| cf.colspan).collect();

        table.toggle_minimizer("scipy", "trf");
        table.toggle_cost_function("nlls");
        table.toggle_software("minuit");

        assert_eq!(table.visible_cell_ids(), cells);
        let again: Vec<usize> = table.cost_functions().iter().map(|cf| cf.colspan).collect();
        assert_eq!(again, spans);
        assert_invariants(&table);
    }

    #[test]
    fn inverse_toggles_restore_the_visible_cells() {
        let mut table = standard_table();
        let initial = table.visible_cell_ids();
        for step in 0..4 {
            let before = table.visible_cell_ids();
            for _ in 0..2 {
                match step {
                    0 => table.click_minimizer("scipy", "lm"),
                    1 => table.click_software("minuit"),
                    2 => table.click_cost_function("chi_sq"),
                    _ => table.click_minimizer("lm-scipy", "lm-scipy: j:best_available"),
                }
                assert_invariants(&table);
            }
            assert_eq!(table.visible_cell_ids(), before, "step {step}");
        }
        assert_eq!(table.visible_cell_ids(), initial);
    }

    #[test]
    fn toggle_row_flips_only_the_named_row() {
        let mut table = standard_table();
        let cells = table.visible_cell_ids();
        table.toggle_row(" PROB_003 ");

        let visible: Vec<bool> = table.rows().iter().map(|row| row.visible).collect();
        assert_eq!(visible, [true, true, false]);
        assert_eq!(table.visible_cell_ids(), cells);
        assert!(table.cost_functions().iter().all(|cf| cf.visible));

        table.toggle_row("prob_003");
        assert!(table.rows().iter().all(|row| row.visible));
        table.toggle_row("prob_999");
        assert!(table.rows().iter().all(|row| row.visible));
    }

    #[test]
    fn problem_size_column_follows_its_checkbox() {
        let mut table = standard_table();
        assert!(table.problem_size_visible());
        table.click_problem_size();
        assert!(!table.problem_size_visible());
        table.toggle_problem_size_column();
        assert!(!table.problem_size_visible());
        table.click_problem_size();
        assert!(table.problem_size_visible());
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut table = standard_table();
        let cells = table.visible_cell_ids();
        table.toggle_minimizer("scipy", "dogbox");
        table.toggle_software("gsl");
        table.toggle_cost_function("poisson");
        table.click_cost_function("poisson");
        assert_eq!(table.visible_cell_ids(), cells);
        assert_invariants(&table);
    }
}
