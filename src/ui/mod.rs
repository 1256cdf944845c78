//! egui rendering. Widgets read [`AppState`](crate::state::AppState) and
//! mutate it through its methods; no pipeline logic lives here.

pub mod pages;
pub mod panels;
pub mod plots;
pub mod tables;
