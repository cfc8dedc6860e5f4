//! egui rendering of the dashboard: selector panel, scatter and table.

pub mod panels;
pub mod plot;
pub mod table;
