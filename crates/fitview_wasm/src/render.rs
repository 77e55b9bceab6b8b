//! Applies `ViewChange`s computed by the core model to the page.

use crate::dom::{self, js_error, set_visible};
use anyhow::Result;
use fitview_core::{CheckboxKind, ReportConfig, ViewChange};
use log::warn;
use web_sys::{Document, Element};

pub(crate) fn apply_changes(
    document: &Document,
    config: &ReportConfig,
    changes: &[ViewChange],
) -> Result<()> {
    let mut rows: Option<Vec<Element>> = None;

    for change in changes {
        match change {
            ViewChange::Header {
                id,
                visible,
                colspan,
            } => {
                let Some(header) = document.get_element_by_id(id) else {
                    warn!("header '{}' is not on the page", id);
                    continue;
                };
                set_visible(&header, *visible)?;
                if *colspan > 0 {
                    header
                        .set_attribute("colspan", &colspan.to_string())
                        .map_err(js_error)?;
                }
            }
            ViewChange::Cell { id, visible } => match document.get_element_by_id(id) {
                Some(cell) => set_visible(&cell, *visible)?,
                None => warn!("cell '{}' is not on the page", id),
            },
            ViewChange::Row { index, visible } => {
                if rows.is_none() {
                    rows = Some(dom::problem_rows(document, config)?);
                }
                match rows.as_ref().and_then(|rows| rows.get(*index)) {
                    Some(row) => set_visible(row, *visible)?,
                    None => warn!("row {} is not on the page", index),
                }
            }
            ViewChange::ProblemSizeColumn { visible } => {
                let selector = format!(
                    "#{} th:nth-child({})",
                    config.table_id, config.problem_size_column
                );
                for header in dom::select_all(document, &selector)? {
                    set_visible(&header, *visible)?;
                }
            }
            ViewChange::Checkbox {
                role,
                value,
                software,
                slot,
                checked,
                disabled,
            } => {
                let inputs = match (role, software) {
                    (CheckboxKind::ProblemSize, _) => {
                        dom::problem_size_checkbox(document).into_iter().collect()
                    }
                    (CheckboxKind::Minimizer, Some(software)) => {
                        dom::minimizer_checkbox(document, value, software, *slot)?
                            .into_iter()
                            .collect()
                    }
                    _ => dom::checkboxes(document, value)?,
                };
                for input in inputs {
                    input.set_checked(*checked);
                    input.set_disabled(*disabled);
                }
            }
        }
    }
    Ok(())
}
