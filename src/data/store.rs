use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::model::{ClaimRecord, Claimant, Status};
use crate::error::{Error, Result};

/// Fee rate applied when none is configured (5 %).
pub const DEFAULT_FEE_RATE: Decimal = dec!(0.05);

/// First identifier handed out; ids are `FIRST_ID + row`.
const FIRST_ID: usize = 1000;

/// Generated amounts fall in `[AMOUNT_LOW, AMOUNT_HIGH)`.
const AMOUNT_LOW: u64 = 50_000;
const AMOUNT_HIGH: u64 = 200_000;

/// Generated document percentages fall in `[DOCS_LOW, 100]`.
const DOCS_LOW: u8 = 70;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate `count` precatórios from `seed`.
///
/// The same `(seed, count, fee_rate)` always yields the same records.
pub fn generate(seed: u64, count: usize, fee_rate: Decimal) -> Result<Vec<ClaimRecord>> {
    validate(count, fee_rate)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let records = (0..count)
        .map(|row| {
            let amount = Decimal::from(rng.random_range(AMOUNT_LOW..AMOUNT_HIGH));
            let status = Status::ALL[rng.random_range(0..Status::ALL.len())];
            let docs = rng.random_range(DOCS_LOW..=100);
            ClaimRecord::new(
                (FIRST_ID + row).to_string(),
                Claimant::for_row(row),
                amount,
                status,
                docs,
                fee_rate,
            )
        })
        .collect();

    Ok(records)
}

fn validate(count: usize, fee_rate: Decimal) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidArgument(
            "record count must be a positive integer".into(),
        ));
    }
    if fee_rate.is_sign_negative() {
        return Err(Error::InvalidArgument(format!(
            "fee rate must not be negative, got {fee_rate}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// RecordStore – cached dataset with explicit invalidation
// ---------------------------------------------------------------------------

/// Holds the generated dataset for the session.
///
/// Records are built on first access and kept until [`invalidate`] or
/// [`set_fee_rate`] drops them; they are never mutated in place.
///
/// [`invalidate`]: RecordStore::invalidate
/// [`set_fee_rate`]: RecordStore::set_fee_rate
#[derive(Debug, Clone)]
pub struct RecordStore {
    seed: u64,
    count: usize,
    fee_rate: Decimal,
    cache: Option<Vec<ClaimRecord>>,
    generation: u64,
}

impl RecordStore {
    pub fn new(seed: u64, count: usize, fee_rate: Decimal) -> Result<Self> {
        validate(count, fee_rate)?;
        Ok(Self {
            seed,
            count,
            fee_rate,
            cache: None,
            generation: 0,
        })
    }

    /// The dataset, generated on first access.
    pub fn records(&mut self) -> &[ClaimRecord] {
        if self.cache.is_none() {
            // `new` and `set_fee_rate` run the same validation as `generate`.
            let generated = generate(self.seed, self.count, self.fee_rate);
            debug_assert!(generated.is_ok(), "store parameters failed validation");
            let records = match generated {
                Ok(records) => records,
                Err(e) => {
                    log::error!("Could not generate precatórios: {e}");
                    Vec::new()
                }
            };
            self.generation += 1;
            log::info!(
                "Generated {} precatórios (seed {}, fee rate {}, generation {})",
                records.len(),
                self.seed,
                self.fee_rate,
                self.generation
            );
            self.cache = Some(records);
        }
        self.cache.as_deref().unwrap_or_default()
    }

    /// Drop the cached records; the next [`records`](Self::records) call regenerates.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    /// Change the fee rate. Every record's fee is recomputed on next access.
    pub fn set_fee_rate(&mut self, fee_rate: Decimal) -> Result<()> {
        validate(self.count, fee_rate)?;
        if fee_rate != self.fee_rate {
            self.fee_rate = fee_rate;
            self.invalidate();
        }
        Ok(())
    }

    pub fn fee_rate(&self) -> Decimal {
        self.fee_rate
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of times the records have been (re)generated.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
