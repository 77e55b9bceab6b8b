use fitview_core::{CheckboxTarget, ReportConfig, ResultsTable, ViewChange};
use fitview_core::presentation::RuntimeMetricState;
use serde_wasm_bindgen::{from_value, to_value};
use std::cell::RefCell;
use std::sync::Once;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

mod dom;
mod metric;
mod plots;
mod render;

/// Filter state for one results report page.
#[wasm_bindgen]
pub struct ReportFilter {
    config: ReportConfig,
    table: ResultsTable,
    metrics: RuntimeMetricState,
}

static LOGGER: Once = Once::new();

fn init_logging() {
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::default()));
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

fn document() -> Result<Document, JsValue> {
    dom::document().map_err(to_js)
}

#[wasm_bindgen]
impl ReportFilter {
    /// Reads the rendered table into a model. `config` is optional.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReportFilter, JsValue> {
        console_error_panic_hook::set_once();
        init_logging();

        let config: ReportConfig = if config.is_undefined() || config.is_null() {
            ReportConfig::default()
        } else {
            from_value(config).map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };
        let document = document()?;
        let layout = dom::scrape_layout(&document, &config).map_err(to_js)?;
        let table = ResultsTable::from_layout(layout)
            .map_err(|e| JsValue::from_str(&format!("Unreadable results table: {}", e)))?;

        let mut metrics =
            RuntimeMetricState::new(metric::available_metrics(&document).map_err(to_js)?);
        if let Some(stored) = metric::stored_metric(&config) {
            if metrics.select(&stored) {
                metric::render(&document, &metrics).map_err(to_js)?;
            }
        }

        log::info!(
            "results filter ready: {} cost functions, {} columns, {} problems",
            table.cost_functions().len(),
            table.columns().len(),
            table.rows().len()
        );
        Ok(ReportFilter {
            config,
            table,
            metrics,
        })
    }

    pub fn toggle_row(&mut self, problem_name: &str) -> Result<(), JsValue> {
        let changes = self.table.apply(|table| table.toggle_row(problem_name));
        self.render(&changes)
    }

    pub fn toggle_minimizer(&mut self, software: &str, minimizer: &str) -> Result<(), JsValue> {
        let document = document()?;
        let slot = self.table.minimizer_slot(software, minimizer).unwrap_or(0);
        let checked = dom::minimizer_checkbox(&document, minimizer, software, slot)
            .map_err(to_js)?
            .map(|input| input.checked());
        self.sync(CheckboxTarget::Minimizer { software, minimizer }, checked);
        let changes = self
            .table
            .apply(|table| table.toggle_minimizer(software, minimizer));
        self.render(&changes)
    }

    pub fn toggle_software(&mut self, software: &str) -> Result<(), JsValue> {
        let checked = dom::checkbox_checked(&document()?, software).map_err(to_js)?;
        self.sync(CheckboxTarget::Software(software), checked);
        let changes = self.table.apply(|table| table.toggle_software(software));
        self.render(&changes)
    }

    pub fn toggle_cost_function(&mut self, cost_func: &str) -> Result<(), JsValue> {
        let checked = dom::checkbox_checked(&document()?, cost_func).map_err(to_js)?;
        self.sync(CheckboxTarget::CostFunction(cost_func), checked);
        let changes = self
            .table
            .apply(|table| table.toggle_cost_function(cost_func));
        self.render(&changes)
    }

    pub fn toggle_problem_size_column(&mut self) -> Result<(), JsValue> {
        let document = document()?;
        if let Some(input) = dom::problem_size_checkbox(&document) {
            self.table
                .set_checked(CheckboxTarget::ProblemSize, input.checked());
        }
        let changes = self.table.apply(ResultsTable::toggle_problem_size_column);
        self.render(&changes)
    }

    /// Replaces the profile plots with the `|`-separated `sources`.
    pub fn load_plot(&self, sources: &str) -> Result<(), JsValue> {
        plots::load_plot(&document()?, &self.config, sources).map_err(to_js)
    }

    /// Replaces the profile plots with those named by `control`'s data
    /// attributes.
    pub fn load_plot_from_control(&self, control: &Element) -> Result<(), JsValue> {
        plots::load_plot_from_control(&document()?, &self.config, control).map_err(to_js)
    }

    /// Shows `metric` in every runtime cell and remembers it for the session.
    pub fn select_runtime_metric(&mut self, metric: &str) -> Result<bool, JsValue> {
        if !self.metrics.select(metric) {
            return Ok(false);
        }
        metric::persist(&self.config, metric.trim()).map_err(to_js)?;
        metric::render(&document()?, &self.metrics).map_err(to_js)?;
        Ok(true)
    }

    pub fn selected_runtime_metric(&self) -> Option<String> {
        self.metrics.selected().map(str::to_string)
    }

    pub fn cost_function_names(&self) -> js_sys::Array {
        self.table
            .cost_function_names()
            .into_iter()
            .map(JsValue::from)
            .collect()
    }

    /// Current view of the table as a plain object.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_value(&self.table.view_state())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

impl ReportFilter {
    /// Copies the live state of the clicked checkbox, read from the page,
    /// into the model.
    fn sync(&mut self, target: CheckboxTarget<'_>, checked: Option<bool>) {
        match checked {
            Some(checked) => {
                self.table.set_checked(target, checked);
            }
            None => log::debug!("no checkbox for {:?} on the page", target),
        }
    }

    fn render(&self, changes: &[ViewChange]) -> Result<(), JsValue> {
        log::debug!("applying {} page changes", changes.len());
        render::apply_changes(&document()?, &self.config, changes).map_err(to_js)
    }
}

thread_local! {
    static FILTER: RefCell<Option<ReportFilter>> = const { RefCell::new(None) };
}

/// Builds the page-wide filter. Safe to call more than once; the table is
/// re-read each time.
#[wasm_bindgen]
pub fn init_filter(config: JsValue) -> Result<(), JsValue> {
    let filter = ReportFilter::new(config)?;
    FILTER.with(|cell| *cell.borrow_mut() = Some(filter));
    Ok(())
}

/// Runs `f` against the page-wide filter, building it with the default
/// configuration on first use. Failures are logged to the console since
/// inline handlers have nowhere to report them.
fn with_filter<T: Default>(f: impl FnOnce(&mut ReportFilter) -> Result<T, JsValue>) -> T {
    FILTER.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            match ReportFilter::new(JsValue::UNDEFINED) {
                Ok(filter) => *slot = Some(filter),
                Err(err) => {
                    log::error!("results filter unavailable: {:?}", err);
                    return T::default();
                }
            }
        }
        let Some(filter) = slot.as_mut() else {
            return T::default();
        };
        f(filter).unwrap_or_else(|err| {
            log::error!("results filter: {:?}", err);
            T::default()
        })
    })
}

#[wasm_bindgen(js_name = toggle_problem)]
pub fn toggle_row(problem_name: &str) {
    with_filter(|filter| filter.toggle_row(problem_name))
}

#[wasm_bindgen]
pub fn toggle_minimizer(software: &str, minimizer: &str) {
    with_filter(|filter| filter.toggle_minimizer(software, minimizer))
}

#[wasm_bindgen]
pub fn toggle_software(software: &str) {
    with_filter(|filter| filter.toggle_software(software))
}

#[wasm_bindgen]
pub fn toggle_cost_function(cost_func: &str) {
    with_filter(|filter| filter.toggle_cost_function(cost_func))
}

#[wasm_bindgen(js_name = toggle_prob_size_header)]
pub fn toggle_problem_size_column() {
    with_filter(ReportFilter::toggle_problem_size_column)
}

#[wasm_bindgen(js_name = load_src)]
pub fn load_plot_from_control(control: &Element) {
    with_filter(|filter| filter.load_plot_from_control(control))
}

#[wasm_bindgen]
pub fn load_plot(sources: &str) {
    with_filter(|filter| filter.load_plot(sources))
}

#[wasm_bindgen(js_name = update_runtime)]
pub fn select_runtime_metric(metric: &str) -> bool {
    with_filter(|filter| filter.select_runtime_metric(metric))
}
