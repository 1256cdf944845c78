use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};
use rust_decimal::Decimal;

use sapre_dashboard::data::model::{ClaimRecord, EXPORT_COLUMNS, Status};
use sapre_dashboard::data::report::{ColumnStats, StatusReport};

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 360.0;

/// `R$ 1,234,567.89`
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}R$ {grouped}.{frac_part}")
}

fn header_row(header: &mut egui_extras::TableRow<'_, '_>, names: &[&str]) {
    for name in names {
        header.col(|ui| {
            ui.strong(*name);
        });
    }
}

// ---------------------------------------------------------------------------
// Record tables
// ---------------------------------------------------------------------------

/// Every column of the given records, in export order.
pub fn records_table(ui: &mut Ui, id: &str, records: &[ClaimRecord]) {
    ui.push_id(id, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(110.0))
            .column(Column::auto().at_least(180.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::remainder().at_least(100.0))
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header_row(&mut header, &EXPORT_COLUMNS);
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let rec = &records[row.index()];
                    row.col(|ui| {
                        ui.label(&rec.id);
                    });
                    row.col(|ui| {
                        ui.label(rec.claimant.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_money(rec.amount));
                    });
                    row.col(|ui| {
                        ui.label(rec.status.label());
                    });
                    row.col(|ui| {
                        ui.label(rec.documents_attached_pct.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_money(rec.fee));
                    });
                });
            });
    });
}

/// Identification and documents of records raising an alert.
pub fn alerts_table(ui: &mut Ui, records: &[ClaimRecord]) {
    ui.push_id("alerts_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(180.0))
            .column(Column::remainder())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header_row(
                    &mut header,
                    &[EXPORT_COLUMNS[0], EXPORT_COLUMNS[1], EXPORT_COLUMNS[3], EXPORT_COLUMNS[4]],
                );
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let rec = &records[row.index()];
                    row.col(|ui| {
                        ui.label(&rec.id);
                    });
                    row.col(|ui| {
                        ui.label(rec.claimant.to_string());
                    });
                    row.col(|ui| {
                        ui.label(rec.status.label());
                    });
                    row.col(|ui| {
                        ui.label(format!("{}%", rec.documents_attached_pct));
                    });
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Report tables
// ---------------------------------------------------------------------------

/// Descriptive statistics, one row per numeric column.
pub fn stats_table(ui: &mut Ui, stats: &[ColumnStats]) {
    const HEADERS: [&str; 9] = ["", "count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    ui.push_id("stats_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(160.0))
            .columns(Column::auto().at_least(80.0), HEADERS.len() - 1)
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header_row(&mut header, &HEADERS);
            })
            .body(|mut body| {
                for s in stats {
                    body.row(ROW_HEIGHT, |mut row| {
                        row.col(|ui| {
                            ui.strong(s.column.label());
                        });
                        let std = s.std.map_or_else(|| "NaN".to_string(), |v| format!("{v:.2}"));
                        let cells = [
                            s.count.to_string(),
                            format!("{:.2}", s.mean),
                            std,
                            format!("{:.2}", s.min),
                            format!("{:.2}", s.q25),
                            format!("{:.2}", s.median),
                            format!("{:.2}", s.q75),
                            format!("{:.2}", s.max),
                        ];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

/// Per-status aggregates, values rounded to two places.
pub fn status_report_table(ui: &mut Ui, report: &[(Status, StatusReport)]) {
    const HEADERS: [&str; 6] = [
        "Situação",
        "Quantidade",
        "Valor total",
        "Valor médio",
        "Honorários",
        "Documentos (% médio)",
    ];

    ui.push_id("status_report_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto().at_least(200.0))
            .columns(Column::auto().at_least(100.0), HEADERS.len() - 1)
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header_row(&mut header, &HEADERS);
            })
            .body(|mut body| {
                for (status, r) in report {
                    body.row(ROW_HEIGHT, |mut row| {
                        let cells = [
                            status.label().to_string(),
                            r.count.to_string(),
                            format_money(r.total_amount),
                            format_money(r.avg_amount),
                            format_money(r.total_fee),
                            format!("{:.2}", r.avg_docs_pct),
                        ];
                        for cell in cells {
                            row.col(|ui| {
                                ui.label(cell);
                            });
                        }
                    });
                }
            });
    });
}

/// Placeholder shown when the filters leave nothing to display.
pub fn no_data(ui: &mut Ui) {
    ui.add_space(8.0);
    ui.label(
        egui::RichText::new("Nenhum dado encontrado com os filtros aplicados.")
            .italics(),
    );
}
