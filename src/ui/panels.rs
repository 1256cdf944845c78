use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use sapre_dashboard::data::filter::amount_from_f64;
use sapre_dashboard::data::model::{Claimant, Status};

use crate::state::{AppState, Page, StatusMessage};

/// Step of the amount inputs, in reais.
const AMOUNT_STEP: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Left side panel – navigation, filters and actions
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new("SAPRE Dashboard").strong());
    });
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            navigation(ui, state);
            ui.separator();

            filters(ui, state);
            ui.separator();

            actions(ui, state);
            ui.separator();

            ui.strong("Informações");
            ui.label(format!("Sistema SAPRE v{}", env!("CARGO_PKG_VERSION")));
            ui.label(format!(
                "{} precatórios, semente {}, geração {}",
                state.store.count(),
                state.store.seed(),
                state.store.generation()
            ));
        });
}

fn navigation(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Navegação");
    for page in Page::ALL {
        ui.radio_value(&mut state.page, page, page.label());
    }
}

fn filters(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Filtros");

    // ---- Status multi-select ----
    let statuses: BTreeSet<Status> = state.records.iter().map(|r| r.status).collect();
    let n_selected = statuses
        .iter()
        .filter(|s| state.filters.is_status_selected(**s))
        .count();
    egui::CollapsingHeader::new(format!("Situação  ({n_selected}/{})", statuses.len()))
        .id_salt("status_filter")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Todas").clicked() {
                    state.select_all_statuses();
                }
                if ui.small_button("Nenhuma").clicked() {
                    state.select_no_statuses();
                }
            });
            for status in &statuses {
                let mut checked = state.filters.is_status_selected(*status);
                let text = RichText::new(status.label()).color(state.colors.color_for(*status));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_status(*status);
                }
            }
        });

    // ---- Claimant multi-select ----
    let claimants: BTreeSet<Claimant> = state.records.iter().map(|r| r.claimant).collect();
    let n_selected = claimants
        .iter()
        .filter(|c| state.filters.is_claimant_selected(**c))
        .count();
    egui::CollapsingHeader::new(format!("Credor  ({n_selected}/{})", claimants.len()))
        .id_salt("claimant_filter")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Todos").clicked() {
                    state.select_all_claimants();
                }
                if ui.small_button("Nenhum").clicked() {
                    state.select_no_claimants();
                }
            });
            for claimant in &claimants {
                let mut checked = state.filters.is_claimant_selected(*claimant);
                if ui.checkbox(&mut checked, claimant.to_string()).changed() {
                    state.toggle_claimant(*claimant);
                }
            }
        });

    ui.add_space(4.0);
    ui.label(RichText::new("Filtros Especiais:").strong());

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Valor mínimo (R$):");
        changed |= amount_input(ui, &mut state.filters.amount_min);
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Valor máximo (R$):");
        changed |= amount_input(ui, &mut state.filters.amount_max);
    });
    changed |= ui
        .add(egui::Slider::new(&mut state.filters.docs_min, 0..=100).text("Documentos (% mín.)"))
        .changed();

    if changed {
        state.refilter();
    }
}

/// Whole-real drag input bound to a decimal amount. Returns whether it changed.
fn amount_input(ui: &mut Ui, amount: &mut Decimal) -> bool {
    let mut value = amount.to_f64().unwrap_or(0.0);
    let response = ui.add(
        egui::DragValue::new(&mut value)
            .speed(AMOUNT_STEP)
            .range(0.0..=f64::MAX)
            .max_decimals(0),
    );
    if response.changed() {
        *amount = amount_from_f64(value);
        true
    } else {
        false
    }
}

fn actions(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Ações Rápidas");
    let width = ui.available_width();

    if ui
        .add_sized([width, 24.0], egui::Button::new("Atualizar Dados"))
        .clicked()
    {
        state.refresh();
    }
    if ui
        .add_sized([width, 24.0], egui::Button::new("Exportar Excel"))
        .clicked()
    {
        state.request_export(None);
    }
    if ui
        .add_sized([width, 24.0], egui::Button::new("Exportar como…"))
        .clicked()
    {
        save_file_dialog(state);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: counts and the latest status message.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} precatórios carregados, {} visíveis",
            state.records.len(),
            state.filtered.len()
        ));

        ui.separator();

        let mut dismiss = false;
        match &state.status_message {
            Some(StatusMessage::Success(msg)) => {
                ui.label(RichText::new(msg).color(Color32::from_rgb(46, 160, 67)));
                dismiss = ui.small_button("✕").clicked();
            }
            Some(StatusMessage::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
                dismiss = ui.small_button("✕").clicked();
            }
            None => {}
        }
        if dismiss {
            state.status_message = None;
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Exportar precatórios")
        .set_file_name("relatorio_precatorios.xlsx")
        .add_filter("Excel", &["xlsx"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .save_file();

    if let Some(path) = file {
        log::info!("Export requested to {}", path.display());
        state.request_export(Some(path));
    }
}
