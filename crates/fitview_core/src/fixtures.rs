//! Layout builders shared by the unit tests.

use crate::layout::{CheckboxLayout, HeaderCell, HeaderRole, RowLayout, TableLayout};
use crate::model::{CheckboxKind, ResultsTable};

pub(crate) type Group<'a> = (&'a str, &'a [(&'a str, &'a [&'a str])]);

/// Builds the layout a report generator would emit for `groups`, with every
/// header visible and every checkbox checked.
pub(crate) fn layout(groups: &[Group<'_>], problems: &[&str]) -> TableLayout {
    let mut headers = Vec::new();
    let mut checkboxes: Vec<CheckboxLayout> = Vec::new();
    let mut column = 0;

    let mut add_checkbox = |value: String| {
        if !checkboxes.iter().any(|checkbox| checkbox.value == value) {
            checkboxes.push(CheckboxLayout {
                value,
                checked: true,
                disabled: false,
                software: None,
            });
        }
    };

    for &(cost_func, softwares) in groups {
        let cf_width: usize = softwares.iter().map(|(_, minimizers)| minimizers.len()).sum();
        headers.push(header(HeaderRole::CostFunction, 0, column, cost_func, Some(cf_width), None));
        add_checkbox(cost_func.trim().to_lowercase());

        for &(software, minimizers) in softwares {
            headers.push(header(
                HeaderRole::Software,
                1,
                column,
                software,
                Some(minimizers.len()),
                None,
            ));
            add_checkbox(software.to_string());
            for &minimizer in minimizers {
                headers.push(header(
                    HeaderRole::Minimizer,
                    2,
                    column,
                    minimizer,
                    None,
                    Some(software),
                ));
                add_checkbox(minimizer.to_string());
                column += 1;
            }
        }
    }

    let rows = problems
        .iter()
        .enumerate()
        .map(|(row, problem)| RowLayout {
            problem: problem.to_string(),
            cells: (0..column)
                .map(|col| format!("T_table_row{row}_col{col}"))
                .collect(),
            visible: true,
        })
        .collect();

    TableLayout {
        headers,
        rows,
        checkboxes,
        problem_size_checkbox: Some(true),
    }
}

fn header(
    role: HeaderRole,
    level: u8,
    column: usize,
    text: &str,
    colspan: Option<usize>,
    software: Option<&str>,
) -> HeaderCell {
    HeaderCell {
        role,
        id: format!("T_table_level{level}_col{column}"),
        text: text.to_string(),
        colspan,
        software: software.map(str::to_string),
        visible: true,
    }
}

/// Three cost functions sharing software names, three problems.
///
/// Columns: chi_sq 0..=2, nlls 3..=6, weighted_nlls 7..=8.
pub(crate) fn standard_layout() -> TableLayout {
    layout(
        &[
            ("Chi_sq", &[("scipy", &["lm", "trf"]), ("minuit", &["migrad"])]),
            (
                "NLLS",
                &[
                    ("scipy", &["lm", "trf"]),
                    ("minuit", &["migrad"]),
                    ("lm-scipy", &["lm-scipy: j:best_available"]),
                ],
            ),
            ("weighted_nlls", &[("scipy", &["lm", "trf"])]),
        ],
        &["prob_001", "prob_002", "prob_003"],
    )
}

pub(crate) fn standard_table() -> ResultsTable {
    ResultsTable::from_layout(standard_layout()).expect("standard layout should build")
}

/// `layout` as the page shows it once `table`'s view has been rendered:
/// shrunken colspans, hidden headers and the live checkbox states.
pub(crate) fn rendered_layout(table: &ResultsTable, layout: &TableLayout) -> TableLayout {
    let view = table.view_state();
    let mut shown = layout.clone();
    for header in &mut shown.headers {
        if let Some(rendered) = view.headers.get(&header.id) {
            header.visible = rendered.visible;
            if rendered.colspan > 0 && header.colspan.is_some() {
                header.colspan = Some(rendered.colspan);
            }
        }
    }
    for (index, row) in shown.rows.iter_mut().enumerate() {
        row.visible = view.rows[index];
    }
    for checkbox in &mut shown.checkboxes {
        let rendered = view
            .checkboxes
            .iter()
            .find(|rendered| {
                rendered.role != CheckboxKind::ProblemSize
                    && rendered.value.eq_ignore_ascii_case(checkbox.value.trim())
            })
            .expect("every rendered checkbox has a view");
        checkbox.checked = rendered.state.checked;
        checkbox.disabled = rendered.state.disabled;
    }
    shown.problem_size_checkbox = Some(table.problem_size_visible());
    shown
}

/// Asserts every structural invariant of the model.
pub(crate) fn assert_invariants(table: &ResultsTable) {
    for (index, cost_func) in table.cost_functions().iter().enumerate() {
        let visible_columns = table
            .columns()
            .iter()
            .filter(|column| column.cost_function == index && column.visible)
            .count();
        assert_eq!(
            cost_func.colspan, visible_columns,
            "colspan of {} out of sync",
            cost_func.name
        );
        assert_eq!(cost_func.visible, cost_func.colspan > 0, "{} visibility", cost_func.name);
    }

    for software in table.software_groups() {
        let visible_columns = software
            .columns
            .iter()
            .filter(|&&index| table.columns()[index].visible)
            .count();
        assert_eq!(software.colspan, visible_columns, "colspan of {}", software.name);
        assert_eq!(software.visible, software.colspan > 0, "{} visibility", software.name);
    }

    for column in table.columns() {
        let cost_func = &table.cost_functions()[column.cost_function];
        let software = &table.software_groups()[column.software];
        let expected = column.visible && software.visible && cost_func.visible;
        for cell in &column.cells {
            assert_eq!(cell.visible, expected, "cell {} visibility", cell.id);
        }
    }

    for name in table.software_names() {
        let minimizers = table.minimizer_names(&name);
        let states: Vec<bool> = minimizers
            .iter()
            .map(|minimizer| {
                table
                    .checkbox(crate::model::CheckboxTarget::Minimizer {
                        software: &name,
                        minimizer,
                    })
                    .expect("minimizer checkbox should exist")
                    .checked
            })
            .collect();
        let software = table
            .checkbox(crate::model::CheckboxTarget::Software(&name))
            .expect("software checkbox should exist");
        let all = states.iter().all(|&checked| checked);
        let none = states.iter().all(|&checked| !checked);
        assert_eq!(software.checked, all, "{name} checked");
        if minimizers.len() == 1 {
            assert!(!software.disabled, "{name} has a single minimizer");
        } else {
            assert_eq!(software.disabled, !all && !none, "{name} disabled");
        }
    }
}
