use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use super::model::{ClaimRecord, Claimant, Status};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// Headline metrics of the dashboard. All zero for an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub avg_docs_pct: f64,
    pub total_amount: Decimal,
    pub total_fee: Decimal,
}

pub fn summary(records: &[ClaimRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }
    Summary {
        count: records.len(),
        avg_docs_pct: mean_docs(records),
        total_amount: records.iter().map(|r| r.amount).sum(),
        total_fee: records.iter().map(|r| r.fee).sum(),
    }
}

fn mean_docs(records: &[ClaimRecord]) -> f64 {
    let total: u64 = records.iter().map(|r| u64::from(r.documents_attached_pct)).sum();
    total as f64 / records.len() as f64
}

/// Records still missing documents (`< 100 %`), in input order.
pub fn incomplete(records: &[ClaimRecord]) -> Vec<ClaimRecord> {
    below_threshold(records, 100)
}

/// Records whose attached documents are below `threshold_pct`, in input order.
pub fn below_threshold(records: &[ClaimRecord], threshold_pct: u8) -> Vec<ClaimRecord> {
    records
        .iter()
        .filter(|r| r.documents_attached_pct < threshold_pct)
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Grouped reports
// ---------------------------------------------------------------------------

/// Per-status aggregate row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StatusReport {
    pub count: usize,
    pub total_amount: Decimal,
    pub avg_amount: Decimal,
    pub total_fee: Decimal,
    pub avg_docs_pct: f64,
}

/// One entry per status present in `records`; absent statuses are omitted.
pub fn group_by_status(records: &[ClaimRecord]) -> BTreeMap<Status, StatusReport> {
    let mut groups: BTreeMap<Status, Vec<&ClaimRecord>> = BTreeMap::new();
    for rec in records {
        groups.entry(rec.status).or_default().push(rec);
    }

    groups
        .into_iter()
        .map(|(status, rows)| {
            let count = rows.len();
            let total_amount: Decimal = rows.iter().map(|r| r.amount).sum();
            let docs: u64 = rows.iter().map(|r| u64::from(r.documents_attached_pct)).sum();
            let report = StatusReport {
                count,
                total_amount,
                avg_amount: total_amount / Decimal::from(count),
                total_fee: rows.iter().map(|r| r.fee).sum(),
                avg_docs_pct: docs as f64 / count as f64,
            };
            (status, report)
        })
        .collect()
}

/// Total fee per claimant present in `records`.
pub fn group_by_claimant_fee(records: &[ClaimRecord]) -> BTreeMap<Claimant, Decimal> {
    let mut fees: BTreeMap<Claimant, Decimal> = BTreeMap::new();
    for rec in records {
        *fees.entry(rec.claimant).or_default() += rec.fee;
    }
    fees
}

/// Record count per status present, in status order.
pub fn status_counts(records: &[ClaimRecord]) -> Vec<(Status, usize)> {
    let mut counts: BTreeMap<Status, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.status).or_default() += 1;
    }
    counts.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Numeric columns covered by [`descriptive_stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    Amount,
    DocumentsPct,
    Fee,
}

impl NumericColumn {
    pub const ALL: [NumericColumn; 3] = [
        NumericColumn::Amount,
        NumericColumn::DocumentsPct,
        NumericColumn::Fee,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            NumericColumn::Amount => "Valor",
            NumericColumn::DocumentsPct => "Documentos Anexados (%)",
            NumericColumn::Fee => "Honorário",
        }
    }

    pub fn value(&self, record: &ClaimRecord) -> f64 {
        match self {
            NumericColumn::Amount => record.amount.to_f64().unwrap_or(f64::NAN),
            NumericColumn::DocumentsPct => f64::from(record.documents_attached_pct),
            NumericColumn::Fee => record.fee.to_f64().unwrap_or(f64::NAN),
        }
    }
}

/// `count, mean, std, min, 25%, 50%, 75%, max` of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub column: NumericColumn,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Descriptive statistics for every numeric column. Empty input yields an
/// empty table.
pub fn descriptive_stats(records: &[ClaimRecord]) -> Vec<ColumnStats> {
    if records.is_empty() {
        return Vec::new();
    }
    NumericColumn::ALL
        .iter()
        .map(|&column| {
            let mut values: Vec<f64> = records.iter().map(|r| column.value(r)).collect();
            values.sort_by(f64::total_cmp);
            column_stats(column, &values)
        })
        .collect()
}

/// `sorted` must be non-empty and ascending.
fn column_stats(column: NumericColumn, sorted: &[f64]) -> ColumnStats {
    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let std = (n > 1).then(|| {
        let ss: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (n - 1) as f64).sqrt()
    });
    ColumnStats {
        column,
        count: n,
        mean,
        std,
        min: sorted[0],
        q25: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q75: quantile(sorted, 0.75),
        max: sorted[n - 1],
    }
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

/// Equal-width histogram over the range of `values`.
///
/// The last bin is closed on the right so the maximum is counted. A constant
/// input collapses into one bin of width 1 centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return vec![HistogramBin {
            start: min - 0.5,
            end: min + 0.5,
            count: finite.len(),
        }];
    }

    let width = range / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        out[idx].count += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::data::store::{DEFAULT_FEE_RATE, generate};

    fn record(status: Status, row: usize, amount: Decimal, docs: u8) -> ClaimRecord {
        ClaimRecord::new(
            (1000 + row).to_string(),
            Claimant::for_row(row),
            amount,
            status,
            docs,
            DEFAULT_FEE_RATE,
        )
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        let s = summary(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.avg_docs_pct, 0.0);
        assert_eq!(s.total_amount, Decimal::ZERO);
        assert_eq!(s.total_fee, Decimal::ZERO);
    }

    #[test]
    fn seed_42_total_fee_is_exactly_five_percent() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let s = summary(&records);
        assert_eq!(s.count, 50);
        assert_eq!(s.total_fee, dec!(0.05) * s.total_amount);
        assert!((70.0..=100.0).contains(&s.avg_docs_pct));
    }

    #[test]
    fn incomplete_excludes_full_documents() {
        let records = vec![
            record(Status::Granted, 0, dec!(1000), 100),
            record(Status::Granted, 1, dec!(1000), 99),
        ];
        let alerts = incomplete(&records);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].documents_attached_pct, 99);
        assert_eq!(below_threshold(&records, 99).len(), 0);
    }

    #[test]
    fn group_by_status_omits_absent_statuses() {
        let records = vec![
            record(Status::Published, 0, dec!(100000), 80),
            record(Status::Published, 1, dec!(50000), 90),
            record(Status::Archived, 2, dec!(70000), 100),
        ];
        let groups = group_by_status(&records);
        assert_eq!(groups.len(), 2);
        assert!(!groups.contains_key(&Status::Registered));
        assert!(groups.values().all(|g| g.count > 0));

        let published = groups[&Status::Published];
        assert_eq!(published.count, 2);
        assert_eq!(published.total_amount, dec!(150000));
        assert_eq!(published.avg_amount, dec!(75000));
        assert_eq!(published.total_fee, dec!(7500));
        assert_eq!(published.avg_docs_pct, 85.0);
    }

    #[test]
    fn group_by_status_on_generated_data_has_no_empty_groups() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let groups = group_by_status(&records);
        assert_eq!(groups.values().map(|g| g.count).sum::<usize>(), 50);
        assert!(groups.values().all(|g| g.count > 0));
        assert!(group_by_status(&[]).is_empty());
    }

    #[test]
    fn fee_per_claimant() {
        let records = vec![
            record(Status::Granted, 0, dec!(1000), 90),
            record(Status::Denied, 10, dec!(3000), 90),
            record(Status::Denied, 1, dec!(2000), 90),
        ];
        let fees = group_by_claimant_fee(&records);
        assert_eq!(fees.len(), 2);
        assert_eq!(fees[&Claimant::for_row(0)], dec!(200));
        assert_eq!(fees[&Claimant::for_row(1)], dec!(100));
    }

    #[test]
    fn status_counts_follow_status_order() {
        let records = vec![
            record(Status::Archived, 0, dec!(1), 90),
            record(Status::Registered, 1, dec!(1), 90),
            record(Status::Archived, 2, dec!(1), 90),
        ];
        assert_eq!(
            status_counts(&records),
            [(Status::Registered, 1), (Status::Archived, 2)]
        );
    }

    #[test]
    fn descriptive_stats_use_linear_quartiles() {
        let records: Vec<_> = [10, 20, 30, 40]
            .iter()
            .enumerate()
            .map(|(i, &docs)| record(Status::Granted, i, dec!(1000) * Decimal::from(i + 1), docs))
            .collect();
        let stats = descriptive_stats(&records);
        assert_eq!(stats.len(), 3);

        let docs = stats
            .iter()
            .find(|s| s.column == NumericColumn::DocumentsPct)
            .unwrap();
        assert_eq!(docs.count, 4);
        assert_eq!(docs.mean, 25.0);
        assert_eq!(docs.min, 10.0);
        assert_eq!(docs.q25, 17.5);
        assert_eq!(docs.median, 25.0);
        assert_eq!(docs.q75, 32.5);
        assert_eq!(docs.max, 40.0);
        let std = docs.std.unwrap();
        assert!((std - 12.909_944_487_358_056).abs() < 1e-9);

        let fee = stats.iter().find(|s| s.column == NumericColumn::Fee).unwrap();
        assert_eq!(fee.max, 200.0);
    }

    #[test]
    fn descriptive_stats_edge_cases() {
        assert!(descriptive_stats(&[]).is_empty());

        let single = [record(Status::Granted, 0, dec!(5000), 75)];
        let stats = descriptive_stats(&single);
        assert!(stats.iter().all(|s| s.std.is_none() && s.min == s.max));
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        let bins = histogram(&values, 20);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[19].end, 100.0);
        assert_eq!(bins[19].count, 6);
        assert_eq!(bins[0].width(), 5.0);
    }

    #[test]
    fn histogram_degenerate_inputs() {
        assert!(histogram(&[], 20).is_empty());
        assert!(histogram(&[1.0], 0).is_empty());

        let bins = histogram(&[7.0, 7.0, 7.0], 20);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[0].center(), 7.0);
    }
}
