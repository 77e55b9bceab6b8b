//! Tri-state software checkboxes.

use crate::model::{CheckboxState, ResultsTable};
use log::warn;

/// Software checkbox state implied by its minimizers' checked flags.
///
/// All checked gives a checked box and none checked an unchecked one. A mix
/// disables the box, except for a single-minimizer software, which can
/// never be mixed.
pub fn software_tri_state(minimizers_checked: &[bool]) -> CheckboxState {
    let all_checked = minimizers_checked.iter().all(|&checked| checked);
    let none_checked = minimizers_checked.iter().all(|&checked| !checked);
    if all_checked {
        CheckboxState::ON
    } else if none_checked || minimizers_checked.len() == 1 {
        CheckboxState::OFF
    } else {
        CheckboxState::MIXED
    }
}

impl ResultsTable {
    /// Re-derives the checkbox of `software` from its minimizer checkboxes.
    pub fn reconcile_software_checkbox(&mut self, software: &str) {
        let software = software.trim();
        let minimizers = self.minimizer_names(software);
        if minimizers.is_empty() {
            warn!("software '{}' has no minimizers to reconcile", software);
            return;
        }
        let checked: Vec<bool> = minimizers
            .into_iter()
            .filter_map(|minimizer| {
                self.minimizer_boxes
                    .get(&(software.to_string(), minimizer))
                    .map(|state| state.checked)
            })
            .collect();
        let state = software_tri_state(&checked);
        match self.software_boxes.get_mut(software) {
            Some(current) => *current = state,
            None => warn!("software '{}' has no checkbox", software),
        }
    }
}
