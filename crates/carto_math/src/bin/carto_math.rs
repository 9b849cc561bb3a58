//! Measures the per-call cost of the math primitives on a chosen scalar type.

use anyhow::Result;
use carto_math::benchmark::{self, Operation, ScalarKind};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(about = "Measure the per-call cost of the math primitives", long_about = None)]
struct Cli {
    /// Operation to measure (all operations if omitted)
    #[arg(short, long, value_enum)]
    operation: Option<Operation>,

    /// Scalar type to evaluate the operation on
    #[arg(short, long, value_enum, default_value_t = ScalarKind::F64)]
    scalar: ScalarKind,

    /// Number of calls to time for each operation
    #[arg(short, long, default_value_t = 1_000_000)]
    calls: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.calls > 0, "the number of calls must be positive");

    let operations: &[Operation] = match &cli.operation {
        Some(operation) => std::slice::from_ref(operation),
        None => &Operation::ALL,
    };

    println!(
        "{} ({} partial derivatives), {} calls per operation",
        cli.scalar.name(),
        cli.scalar.gradient_width(),
        cli.calls
    );
    for &operation in operations {
        let measurement = benchmark::measure_kind(operation, cli.scalar, cli.calls);
        println!(
            "{:<28}{:>10.2} ns/call",
            operation.name(),
            measurement.nanos_per_call()
        );
    }
    Ok(())
}
