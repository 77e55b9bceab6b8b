//! Runtime metric radios and the per-cell metric spans.

use crate::dom::{self, js_error};
use anyhow::Result;
use fitview_core::presentation::{metric_from_handler, RuntimeMetricState};
use fitview_core::ReportConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, Storage};

const RADIO_SELECTOR: &str = "input[name='runtime_selection']";

fn radios(document: &Document) -> Result<Vec<(HtmlInputElement, Option<String>)>> {
    Ok(dom::select_all(document, RADIO_SELECTOR)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlInputElement>().ok())
        .map(|radio| {
            let value = radio.value();
            let metric = if value.is_empty() || value == "on" {
                radio
                    .get_attribute("onclick")
                    .and_then(|handler| metric_from_handler(&handler))
            } else {
                Some(value)
            };
            (radio, metric)
        })
        .collect())
}

/// Metrics offered by the page's radio controls.
pub(crate) fn available_metrics(document: &Document) -> Result<Vec<String>> {
    Ok(radios(document)?
        .into_iter()
        .filter_map(|(_, metric)| metric)
        .collect())
}

fn session_storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.session_storage().ok().flatten())
}

pub(crate) fn stored_metric(config: &ReportConfig) -> Option<String> {
    session_storage()?
        .get_item(&config.metric_storage_key)
        .ok()
        .flatten()
}

pub(crate) fn persist(config: &ReportConfig, metric: &str) -> Result<()> {
    match session_storage() {
        Some(storage) => storage
            .set_item(&config.metric_storage_key, metric)
            .map_err(js_error),
        None => {
            log::warn!("session storage unavailable; runtime metric is not persisted");
            Ok(())
        }
    }
}

pub(crate) fn render(document: &Document, state: &RuntimeMetricState) -> Result<()> {
    for (radio, metric) in radios(document)? {
        radio.set_checked(metric.is_some_and(|metric| state.is_selected(&metric)));
    }

    for link in dom::select_all(document, "a.dark, a.light")? {
        for element in dom::select_all_in(&link, ".runtime")? {
            dom::set_display(&element, state.display_for(&element.id()))?;
        }
    }
    Ok(())
}
