// SPDX-License-Identifier: Apache-2.0

use clap::Parser;

use csa4::csa::LowSelect;
use csa4::verify::{run_sweep, ViewKind};

/// Runs the exhaustive 256-vector sweep over the 4-bit carry-select adder
/// model and reports the stage-classified outcome.
#[derive(Parser, Debug)]
struct Args {
    /// Which low-block select wiring variant to evaluate.
    #[arg(long, value_enum, default_value = "hardwired")]
    wiring: LowSelect,

    /// Which internal-signal view the verifier reads.
    #[arg(long, value_enum, default_value = "block-wires")]
    view: ViewKind,

    /// Emit the report as JSON instead of human-readable text.
    #[arg(long, default_value_t = false)]
    #[arg(action = clap::ArgAction::Set)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder().try_init();
    let args = Args::parse();

    let result = run_sweep(args.wiring, args.view);
    let summary = result.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for failure in summary.failures.iter() {
            match &failure.mismatch {
                Some(m) => println!(
                    "FAIL a={:2} b={:2} :: {:?} :: {} expected {:#07b} got {:#07b}",
                    failure.a, failure.b, failure.stage, m.signal, m.expected, m.actual
                ),
                None => println!(
                    "FAIL a={:2} b={:2} :: {:?}",
                    failure.a, failure.b, failure.stage
                ),
            }
        }
        println!(
            "total: {} pass: {} fail: {}",
            summary.total, summary.pass_count, summary.fail_count
        );
        println!(
            "overall: {}",
            if summary.overall_pass { "PASS" } else { "FAIL" }
        );
    }

    if !summary.overall_pass {
        std::process::exit(1);
    }
    Ok(())
}
