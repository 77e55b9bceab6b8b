//! Reading the rendered report into a `TableLayout`, plus small DOM helpers.

use anyhow::{anyhow, Result};
use fitview_core::layout::{CheckboxLayout, HeaderCell, HeaderRole, RowLayout, TableLayout};
use fitview_core::ReportConfig;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, NodeList};

pub(crate) const PROBLEM_SIZE_CHECKBOX_ID: &str = "checkbox_prob_size";

pub(crate) fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

pub(crate) fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| anyhow!("document is not available"))
}

pub(crate) fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>> {
    document
        .query_selector_all(selector)
        .map(elements)
        .map_err(js_error)
}

pub(crate) fn select_all_in(root: &Element, selector: &str) -> Result<Vec<Element>> {
    root.query_selector_all(selector)
        .map(elements)
        .map_err(js_error)
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Escapes a value for use inside a double-quoted attribute selector.
pub(crate) fn selector_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub(crate) fn set_visible(element: &Element, visible: bool) -> Result<()> {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return Ok(());
    };
    let style = html.style();
    if visible {
        style.remove_property("display").map_err(js_error)?;
    } else {
        style.set_property("display", "none").map_err(js_error)?;
    }
    Ok(())
}

pub(crate) fn set_display(element: &Element, display: &str) -> Result<()> {
    match element.dyn_ref::<HtmlElement>() {
        Some(html) => html
            .style()
            .set_property("display", display)
            .map_err(js_error),
        None => Ok(()),
    }
}

fn is_displayed(element: &Element) -> bool {
    element.dyn_ref::<HtmlElement>().map_or(true, |html| {
        html.style()
            .get_property_value("display")
            .map_or(true, |display| display != "none")
    })
}

/// Checkbox inputs whose value is `value`.
pub(crate) fn checkboxes(document: &Document, value: &str) -> Result<Vec<HtmlInputElement>> {
    let selector = format!(
        "input[type=\"checkbox\"][value=\"{}\"]",
        selector_value(value)
    );
    Ok(select_all(document, &selector)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
        .collect())
}

/// Live checked state of the first checkbox valued `value`.
pub(crate) fn checkbox_checked(document: &Document, value: &str) -> Result<Option<bool>> {
    Ok(checkboxes(document, value)?
        .first()
        .map(HtmlInputElement::checked))
}

/// `data-software` of the checkbox or its nearest tagged ancestor.
fn checkbox_scope(input: &Element) -> Option<String> {
    input
        .closest("[data-software]")
        .ok()
        .flatten()
        .and_then(|scope| scope.get_attribute("data-software"))
        .map(|software| software.trim().to_string())
}

/// The checkbox for `minimizer` under `software`. Scoped checkboxes are
/// matched by their software; otherwise the `slot`-th checkbox sharing the
/// value is taken.
pub(crate) fn minimizer_checkbox(
    document: &Document,
    minimizer: &str,
    software: &str,
    slot: usize,
) -> Result<Option<HtmlInputElement>> {
    let inputs = checkboxes(document, minimizer)?;
    if inputs.iter().any(|input| checkbox_scope(input).is_some()) {
        return Ok(inputs
            .into_iter()
            .find(|input| checkbox_scope(input).as_deref() == Some(software.trim())));
    }
    Ok(inputs.into_iter().nth(slot))
}

pub(crate) fn problem_size_checkbox(document: &Document) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(PROBLEM_SIZE_CHECKBOX_ID)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
}

/// Data rows of the results table, in document order.
pub(crate) fn problem_rows(document: &Document, config: &ReportConfig) -> Result<Vec<Element>> {
    let selector = format!("#{} a.problem_header", config.table_id);
    let mut rows = Vec::new();
    for anchor in select_all(document, &selector)? {
        if let Some(row) = anchor.closest("tr").map_err(js_error)? {
            rows.push(row);
        }
    }
    Ok(rows)
}

pub(crate) fn scrape_layout(document: &Document, config: &ReportConfig) -> Result<TableLayout> {
    let mut headers = Vec::new();
    for role in [
        HeaderRole::CostFunction,
        HeaderRole::Software,
        HeaderRole::Minimizer,
    ] {
        let selector = format!("#{} th a.{}", config.table_id, role.anchor_class());
        for anchor in select_all(document, &selector)? {
            let Some(cell) = anchor.closest("th").map_err(js_error)? else {
                continue;
            };
            headers.push(HeaderCell {
                role,
                id: cell.id(),
                text: anchor.text_content().unwrap_or_default(),
                colspan: cell
                    .get_attribute("colspan")
                    .and_then(|span| span.trim().parse().ok()),
                software: anchor.get_attribute("data-software"),
                visible: is_displayed(&cell),
            });
        }
    }

    let mut rows = Vec::new();
    for (index, row) in problem_rows(document, config)?.into_iter().enumerate() {
        let problem = select_all_in(&row, "a.problem_header")?
            .first()
            .and_then(|anchor| anchor.text_content())
            .unwrap_or_else(|| format!("row {index}"));
        let cells = select_all_in(&row, "td")?
            .iter()
            .map(Element::id)
            .filter(|id| !id.is_empty())
            .collect();
        rows.push(RowLayout {
            problem,
            cells,
            visible: is_displayed(&row),
        });
    }

    let checkboxes = select_all(document, "input[type=\"checkbox\"]")?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
        .filter(|input| input.id() != PROBLEM_SIZE_CHECKBOX_ID)
        .map(|input| CheckboxLayout {
            value: input.value(),
            checked: input.checked(),
            disabled: input.disabled(),
            software: checkbox_scope(&input),
        })
        .collect();

    Ok(TableLayout {
        headers,
        rows,
        checkboxes,
        problem_size_checkbox: problem_size_checkbox(document).map(|input| input.checked()),
    })
}
