use eframe::egui::{self, Color32, RichText, Ui};

use sapre_dashboard::data::report::{
    below_threshold, descriptive_stats, group_by_status, incomplete, summary,
};

use crate::state::AppState;
use crate::ui::{plots, tables};

const WARNING: Color32 = Color32::from_rgb(214, 150, 0);
const SUCCESS: Color32 = Color32::from_rgb(46, 160, 67);

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.set_min_width(ui.available_width());
        ui.label(RichText::new(label).small());
        ui.label(RichText::new(value).size(22.0).strong());
    });
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let records = &state.filtered;

    ui.heading("Dashboard de Monitoramento SAPRE");
    ui.label("Monitoramento de precatórios, documentos e honorários sem precisar entrar no sistema.");
    ui.add_space(8.0);

    // ---- Headline metrics ----
    ui.strong("Resumo Geral");
    let s = summary(records);
    ui.columns(4, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Precatórios", s.count.to_string());
        metric(&mut cols[1], "Média Documentos (%)", format!("{:.1}%", s.avg_docs_pct));
        metric(&mut cols[2], "Total Valor (R$)", tables::format_money(s.total_amount));
        metric(&mut cols[3], "Total Honorários (R$)", tables::format_money(s.total_fee));
    });
    ui.add_space(8.0);

    // ---- Alerts ----
    ui.strong("Alertas");
    if records.is_empty() {
        tables::no_data(ui);
        return;
    }
    let alerts = incomplete(records);
    if alerts.is_empty() {
        ui.label(RichText::new("Todos os precatórios têm documentos completos!").color(SUCCESS));
    } else {
        ui.label(
            RichText::new(format!(
                "{} precatórios com documentos incompletos (<100%)",
                alerts.len()
            ))
            .color(WARNING),
        );
        egui::CollapsingHeader::new("Ver detalhes dos alertas")
            .id_salt("alert_details")
            .show(ui, |ui: &mut Ui| tables::alerts_table(ui, &alerts));
    }
    let threshold = state.config.docs_alert_threshold;
    let critical = below_threshold(records, threshold);
    if !critical.is_empty() {
        ui.label(
            RichText::new(format!(
                "{} precatórios abaixo do limite de {threshold}% de documentos",
                critical.len()
            ))
            .color(Color32::RED),
        );
    }
    ui.add_space(8.0);

    // ---- Charts ----
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Precatórios por Situação");
        plots::status_histogram(&mut cols[0], records, &state.colors);
        cols[1].strong("Honorários por Advogado");
        plots::fees_by_claimant(&mut cols[1], records);
    });
    ui.add_space(8.0);

    ui.strong("Documentos Anexados por Precatório");
    plots::documents_by_record(ui, records, &state.colors);
    ui.add_space(8.0);

    ui.strong("Tabela Detalhada");
    tables::records_table(ui, "detail_table", records);
}

// ---------------------------------------------------------------------------
// Advanced analyses
// ---------------------------------------------------------------------------

pub fn analytics(ui: &mut Ui, state: &AppState) {
    ui.heading("Análises Avançadas");
    let records = &state.filtered;
    if records.is_empty() {
        tables::no_data(ui);
        return;
    }

    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Distribuição dos Valores dos Precatórios");
        plots::amount_histogram(&mut cols[0], records);
        cols[1].strong("Valor vs % Documentos Anexados");
        plots::amount_vs_documents(&mut cols[1], records, &state.colors);
    });
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub fn reports(ui: &mut Ui, state: &AppState) {
    ui.heading("Relatórios");
    let records = &state.filtered;
    if records.is_empty() {
        tables::no_data(ui);
        return;
    }

    ui.strong("Resumo Estatístico");
    tables::stats_table(ui, &descriptive_stats(records));
    ui.add_space(12.0);

    ui.strong("Relatório por Situação");
    let by_status: Vec<_> = group_by_status(records).into_iter().collect();
    tables::status_report_table(ui, &by_status);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

pub fn settings(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Configurações");

    ui.add_space(8.0);
    ui.strong("Personalização");
    ui.label("O tema segue a configuração do sistema operacional.");

    ui.add_space(8.0);
    ui.strong("Configurações de Dados");
    let mut fee_pct = state.config.fee_rate_pct();
    if ui
        .add(egui::Slider::new(&mut fee_pct, 1..=10).text("Taxa de Honorários (%)"))
        .changed()
    {
        state.set_fee_rate_pct(fee_pct);
    }

    ui.add_space(8.0);
    ui.strong("Notificações");
    ui.checkbox(&mut state.config.email_alerts, "Receber alertas por email");
    ui.add(
        egui::Slider::new(&mut state.config.docs_alert_threshold, 50..=100)
            .text("Limite para alerta de documentos (%)"),
    );

    ui.add_space(8.0);
    if ui.button("Salvar Configurações").clicked() {
        state.save_settings();
    }
}
