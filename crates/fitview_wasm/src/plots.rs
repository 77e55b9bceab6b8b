//! Performance profile frames.

use crate::dom::{self, js_error};
use anyhow::{anyhow, Result};
use fitview_core::presentation::{parse_many_solvers_flag, plot_frames, PlotLayout};
use fitview_core::ReportConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlIFrameElement};

const PLOT_CONTROL_ID: &str = "offline_plot";
const SOURCES_ATTRIBUTE: &str = "data-value1";
const MANY_SOLVERS_ATTRIBUTE: &str = "data-value3";

/// Many-solvers mode from config, else from the flag on `control`.
fn many_solvers(config: &ReportConfig, control: Option<&Element>) -> bool {
    config.many_solvers.unwrap_or_else(|| {
        parse_many_solvers_flag(
            control
                .and_then(|control| control.get_attribute(MANY_SOLVERS_ATTRIBUTE))
                .as_deref(),
        )
    })
}

pub(crate) fn load_plot(document: &Document, config: &ReportConfig, sources: &str) -> Result<()> {
    let control = document.get_element_by_id(PLOT_CONTROL_ID);
    let layout = plot_frames(sources, many_solvers(config, control.as_ref()), config);
    render(document, &layout)
}

pub(crate) fn load_plot_from_control(
    document: &Document,
    config: &ReportConfig,
    control: &Element,
) -> Result<()> {
    let sources = control.get_attribute(SOURCES_ATTRIBUTE).unwrap_or_default();
    let layout = plot_frames(&sources, many_solvers(config, Some(control)), config);
    render(document, &layout)
}

fn render(document: &Document, layout: &PlotLayout) -> Result<()> {
    let wrapper = dom::select_all(document, ".iframe-wrapper")?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("no .iframe-wrapper on the page"))?;

    let mut frames = Vec::with_capacity(layout.frames.len());
    for frame in &layout.frames {
        let iframe = document
            .create_element("iframe")
            .map_err(js_error)?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| anyhow!("created element is not an iframe"))?;
        iframe.set_src(&frame.src);
        iframe.set_height(&frame.height.to_string());
        iframe.set_width(&frame.width);
        iframe.set_attribute("frameborder", "0").map_err(js_error)?;
        iframe.set_attribute("seamless", "seamless").map_err(js_error)?;
        frames.push(iframe);
    }

    wrapper.set_inner_html("");
    for iframe in &frames {
        wrapper.append_child(iframe).map_err(js_error)?;
    }

    if let Some(info) = document.get_element_by_id("profiles_info") {
        dom::set_display(&info, if layout.show_info { "block" } else { "none" })?;
    }
    Ok(())
}
