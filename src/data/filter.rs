use std::collections::BTreeSet;

use rust_decimal::Decimal;

use super::model::{ClaimRecord, Claimant, Status};

/// Documents slider position the dashboard starts with.
pub const DEFAULT_DOCS_MIN: u8 = 70;

// ---------------------------------------------------------------------------
// FilterSpec – the user's predicates over the dataset
// ---------------------------------------------------------------------------

/// Conjunction of predicates narrowing the displayed records.
///
/// Set-valued filters follow one convention:
/// * `None` → no constraint on that column
/// * `Some(empty)` → nothing selected → no record passes
/// * `Some(values)` → the record's value must be one of `values`
///
/// Amount bounds are inclusive; `amount_min > amount_max` simply matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub statuses: Option<BTreeSet<Status>>,
    pub claimants: Option<BTreeSet<Claimant>>,
    pub amount_min: Decimal,
    pub amount_max: Decimal,
    pub docs_min: u8,
}

impl Default for FilterSpec {
    /// Unconstrained: every record passes.
    fn default() -> Self {
        Self {
            statuses: None,
            claimants: None,
            amount_min: Decimal::ZERO,
            amount_max: Decimal::MAX,
            docs_min: 0,
        }
    }
}

impl FilterSpec {
    /// Initial dashboard filter for a dataset: every status and claimant present
    /// is selected, amounts span `0..=largest amount`, documents start at 70 %.
    pub fn for_records(records: &[ClaimRecord]) -> Self {
        Self {
            statuses: Some(records.iter().map(|r| r.status).collect()),
            claimants: Some(records.iter().map(|r| r.claimant).collect()),
            amount_min: Decimal::ZERO,
            amount_max: records
                .iter()
                .map(|r| r.amount)
                .max()
                .unwrap_or(Decimal::ZERO),
            docs_min: DEFAULT_DOCS_MIN,
        }
    }

    /// Whether a single record passes every predicate.
    pub fn matches(&self, record: &ClaimRecord) -> bool {
        allowed(&self.statuses, &record.status)
            && allowed(&self.claimants, &record.claimant)
            && record.amount >= self.amount_min
            && record.amount <= self.amount_max
            && record.documents_attached_pct >= self.docs_min
    }

    /// Toggle one status. An unconstrained selection first becomes "every status".
    pub fn toggle_status(&mut self, status: Status) {
        let set = self
            .statuses
            .get_or_insert_with(|| Status::ALL.into_iter().collect());
        toggle(set, status);
    }

    /// Toggle one claimant. An unconstrained selection first becomes "every claimant".
    pub fn toggle_claimant(&mut self, claimant: Claimant) {
        let set = self
            .claimants
            .get_or_insert_with(|| Claimant::all().collect());
        toggle(set, claimant);
    }

    pub fn is_status_selected(&self, status: Status) -> bool {
        allowed(&self.statuses, &status)
    }

    pub fn is_claimant_selected(&self, claimant: Claimant) -> bool {
        allowed(&self.claimants, &claimant)
    }
}

/// Whole-real amount bound from a UI drag value.
///
/// Negative and NaN inputs clamp to zero; anything past the decimal range
/// saturates at [`Decimal::MAX`] so a huge bound never wraps back to zero.
pub fn amount_from_f64(value: f64) -> Decimal {
    if value.is_nan() || value <= 0.0 {
        return Decimal::ZERO;
    }
    Decimal::from_f64_retain(value.round()).unwrap_or(Decimal::MAX)
}

fn allowed<T: Ord>(selection: &Option<BTreeSet<T>>, value: &T) -> bool {
    selection.as_ref().is_none_or(|set| set.contains(value))
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

// ---------------------------------------------------------------------------
// Applying a filter
// ---------------------------------------------------------------------------

/// Records passing `spec`, in input order.
pub fn apply(records: &[ClaimRecord], spec: &FilterSpec) -> Vec<ClaimRecord> {
    records.iter().filter(|r| spec.matches(r)).cloned().collect()
}

/// Indices of records passing `spec`, ascending.
pub fn filtered_indices(records: &[ClaimRecord], spec: &FilterSpec) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| spec.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::data::store::{DEFAULT_FEE_RATE, generate};

    fn record(id: &str, status: Status, amount: Decimal, docs: u8) -> ClaimRecord {
        ClaimRecord::new(id, Claimant::for_row(0), amount, status, docs, DEFAULT_FEE_RATE)
    }

    #[test]
    fn default_spec_passes_everything() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        assert_eq!(apply(&records, &FilterSpec::default()), records);
    }

    #[test]
    fn initial_dashboard_spec_only_applies_docs_minimum() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let spec = FilterSpec::for_records(&records);
        let expected: Vec<_> = records
            .iter()
            .filter(|r| r.documents_attached_pct >= DEFAULT_DOCS_MIN)
            .cloned()
            .collect();
        assert_eq!(apply(&records, &spec), expected);
        assert_eq!(
            Some(spec.amount_max),
            records.iter().map(|r| r.amount).max()
        );
    }

    #[test]
    fn inverted_amount_bounds_yield_empty() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let spec = FilterSpec {
            amount_min: dec!(200000),
            amount_max: Decimal::ZERO,
            ..FilterSpec::default()
        };
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn docs_min_above_hundred_yields_empty() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let spec = FilterSpec {
            docs_min: 101,
            ..FilterSpec::default()
        };
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let spec = FilterSpec {
            statuses: Some(BTreeSet::new()),
            ..FilterSpec::default()
        };
        assert!(apply(&records, &spec).is_empty());

        let spec = FilterSpec {
            claimants: Some(BTreeSet::new()),
            ..FilterSpec::default()
        };
        assert!(apply(&records, &spec).is_empty());
    }

    #[test]
    fn bounds_are_inclusive_and_order_is_kept() {
        let records = vec![
            record("1", Status::Granted, dec!(100), 80),
            record("2", Status::Denied, dec!(200), 90),
            record("3", Status::Granted, dec!(300), 100),
            record("4", Status::Granted, dec!(400), 79),
        ];
        let spec = FilterSpec {
            statuses: Some(BTreeSet::from([Status::Granted])),
            amount_min: dec!(100),
            amount_max: dec!(300),
            docs_min: 80,
            ..FilterSpec::default()
        };
        let ids: Vec<_> = apply(&records, &spec).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(filtered_indices(&records, &spec), [0, 2]);
    }

    #[test]
    fn drag_values_become_whole_amounts() {
        assert_eq!(amount_from_f64(150_000.4), dec!(150000));
        assert_eq!(amount_from_f64(149_999.5), dec!(150000));
        assert_eq!(amount_from_f64(-10.0), Decimal::ZERO);
        assert_eq!(amount_from_f64(f64::NAN), Decimal::ZERO);
    }

    #[test]
    fn oversized_amount_bound_saturates() {
        assert_eq!(amount_from_f64(1e30), Decimal::MAX);
        assert_eq!(amount_from_f64(f64::MAX), Decimal::MAX);
        assert_eq!(amount_from_f64(f64::INFINITY), Decimal::MAX);

        let records = generate(42, 50, DEFAULT_FEE_RATE).unwrap();
        let spec = FilterSpec {
            amount_max: amount_from_f64(1e30),
            ..FilterSpec::default()
        };
        assert_eq!(apply(&records, &spec).len(), records.len());
    }

    #[test]
    fn toggling_materialises_and_flips_selection() {
        let mut spec = FilterSpec::default();
        assert!(spec.is_status_selected(Status::Published));

        spec.toggle_status(Status::Published);
        let statuses = spec.statuses.clone().unwrap();
        assert_eq!(statuses.len(), Status::ALL.len() - 1);
        assert!(!spec.is_status_selected(Status::Published));
        assert!(spec.is_status_selected(Status::Archived));

        spec.toggle_status(Status::Published);
        assert_eq!(spec.statuses.as_ref().map(BTreeSet::len), Some(Status::ALL.len()));

        let c = Claimant::for_row(3);
        spec.claimants = Some(BTreeSet::new());
        spec.toggle_claimant(c);
        assert!(spec.is_claimant_selected(c));
        assert!(!spec.is_claimant_selected(Claimant::for_row(4)));
    }
}
