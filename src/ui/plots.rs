use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot, PlotPoints, Points};
use rust_decimal::prelude::ToPrimitive;

use sapre_dashboard::data::model::{ClaimRecord, Status};
use sapre_dashboard::data::report::{NumericColumn, group_by_claimant_fee, histogram, status_counts};

use crate::color::{ACCENT, StatusColors};

const PLOT_HEIGHT: f32 = 300.0;

/// Bins of the amount distribution chart.
const AMOUNT_BINS: usize = 20;

/// Shared look of every chart. Scrolling is left to the page.
macro_rules! chart {
    ($id:expr) => {
        Plot::new($id)
            .legend(Legend::default())
            .height(PLOT_HEIGHT)
            .allow_scroll(false)
            .allow_boxed_zoom(true)
    };
}

/// Axis formatter that prints `labels[i]` at integer position `i` and nothing elsewhere.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark: GridMark, _range: &RangeInclusive<f64>| {
        let pos = mark.value;
        if pos.fract().abs() > f64::EPSILON || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Dashboard charts
// ---------------------------------------------------------------------------

/// Number of precatórios per status, one coloured bar per status.
pub fn status_histogram(ui: &mut Ui, records: &[ClaimRecord], colors: &StatusColors) {
    let counts = status_counts(records);
    chart!("status_histogram")
        .y_axis_label("Quantidade")
        .show_axes([false, true])
        .show(ui, |plot_ui| {
            for (i, (status, count)) in counts.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64)
                    .width(0.8)
                    .name(status.label());
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(status.label())
                        .color(colors.color_for(*status)),
                );
            }
        });
}

/// Total fees per claimant.
pub fn fees_by_claimant(ui: &mut Ui, records: &[ClaimRecord]) {
    let fees = group_by_claimant_fee(records);
    let labels: Vec<String> = fees.keys().map(|c| c.to_string()).collect();
    let bars: Vec<Bar> = fees
        .iter()
        .enumerate()
        .map(|(i, (claimant, fee))| {
            Bar::new(i as f64, fee.to_f64().unwrap_or(0.0))
                .width(0.7)
                .name(claimant.to_string())
        })
        .collect();

    chart!("fees_by_claimant")
        .y_axis_label("Honorário (R$)")
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Honorários").color(ACCENT));
        });
}

/// Attached-documents percentage of every record, coloured by status.
pub fn documents_by_record(ui: &mut Ui, records: &[ClaimRecord], colors: &StatusColors) {
    let labels: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
    let mut by_status: BTreeMap<Status, Vec<Bar>> = BTreeMap::new();
    for (i, rec) in records.iter().enumerate() {
        by_status.entry(rec.status).or_default().push(
            Bar::new(i as f64, f64::from(rec.documents_attached_pct))
                .width(0.8)
                .name(&rec.id),
        );
    }

    chart!("documents_by_record")
        .y_axis_label("Documentos Anexados (%)")
        .include_y(0.0)
        .include_y(100.0)
        .x_axis_formatter(category_axis(labels))
        .show(ui, |plot_ui| {
            for (status, bars) in by_status {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(status.label())
                        .color(colors.color_for(status)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Analytics charts
// ---------------------------------------------------------------------------

/// Distribution of claim amounts.
pub fn amount_histogram(ui: &mut Ui, records: &[ClaimRecord]) {
    let values: Vec<f64> = records.iter().map(|r| NumericColumn::Amount.value(r)).collect();
    let bars: Vec<Bar> = histogram(&values, AMOUNT_BINS)
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("R$ {:.0} – {:.0}", bin.start, bin.end))
        })
        .collect();

    chart!("amount_histogram")
        .x_axis_label("Valor (R$)")
        .y_axis_label("Quantidade")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Valor").color(ACCENT));
        });
}

/// Amount against attached documents, one series per status.
pub fn amount_vs_documents(ui: &mut Ui, records: &[ClaimRecord], colors: &StatusColors) {
    let mut by_status: BTreeMap<Status, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in records {
        by_status.entry(rec.status).or_default().push([
            NumericColumn::Amount.value(rec),
            NumericColumn::DocumentsPct.value(rec),
        ]);
    }

    chart!("amount_vs_documents")
        .x_axis_label("Valor (R$)")
        .y_axis_label("Documentos Anexados (%)")
        .show(ui, |plot_ui| {
            for (status, points) in by_status {
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(4.0)
                        .name(status.label())
                        .color(colors.color_for(status)),
                );
            }
        });
}
