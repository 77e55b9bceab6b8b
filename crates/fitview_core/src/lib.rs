//! The `fitview_core` crate holds the retained model behind the interactive
//! filters of a benchmark results report. The rendered table is read once
//! into a [`model::ResultsTable`]; every filter operation then works on that
//! model and reports the page changes it implies.
//!
//! Key components:
//! - **Model**: cost function, software and minimizer groups keyed by column index.
//! - **Resolver / Span / Reconcile**: lookups, colspans and tri-state software checkboxes.
//! - **Toggle**: the minimizer, software, cost function, row and problem size toggles.
//! - **View**: projection of the model and diffing into [`view::ViewChange`]s.
//! - **Presentation**: plot frame sizing and runtime metric selection.

pub mod config;
pub mod error;
pub mod ident;
pub mod layout;
pub mod model;
pub mod presentation;
pub mod reconcile;
pub mod resolver;
pub mod span;
pub mod toggle;
pub mod view;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::ReportConfig;
pub use error::LayoutError;
pub use layout::TableLayout;
pub use model::{CheckboxKind, CheckboxState, CheckboxTarget, ResultsTable};
pub use view::{ViewChange, ViewState};
