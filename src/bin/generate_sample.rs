//! Write a simulated precatórios dataset to disk.
//!
//! ```text
//! generate_sample [OUTPUT] [--seed N] [--count N] [--fee-rate R]
//! ```
//!
//! The output format follows the extension of `OUTPUT`
//! (`.parquet`, `.xlsx`, `.csv` or `.json`).

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;

use sapre_dashboard::data::export::export_records;
use sapre_dashboard::data::report::summary;
use sapre_dashboard::data::store::{DEFAULT_FEE_RATE, generate};

struct Args {
    output: PathBuf,
    seed: u64,
    count: usize,
    fee_rate: Decimal,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        output: PathBuf::from("sample_precatorios.parquet"),
        seed: 42,
        count: 50,
        fee_rate: DEFAULT_FEE_RATE,
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--seed" => {
                let v = it.next().context("--seed needs a value")?;
                args.seed = v.parse().with_context(|| format!("invalid seed '{v}'"))?;
            }
            "--count" => {
                let v = it.next().context("--count needs a value")?;
                args.count = v.parse().with_context(|| format!("invalid count '{v}'"))?;
            }
            "--fee-rate" => {
                let v = it.next().context("--fee-rate needs a value")?;
                args.fee_rate = v.parse().with_context(|| format!("invalid fee rate '{v}'"))?;
            }
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            path => args.output = PathBuf::from(path),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let records = generate(args.seed, args.count, args.fee_rate)?;
    export_records(&args.output, &records)?;

    let s = summary(&records);
    println!(
        "Wrote {} precatórios (seed {}) to {}: total R$ {}, fees R$ {}",
        s.count,
        args.seed,
        args.output.display(),
        s.total_amount,
        s.total_fee
    );
    Ok(())
}
