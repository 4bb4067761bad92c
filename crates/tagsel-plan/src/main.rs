mod args;
mod manifest;

use std::io::Write;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use tagsel_core::{PhasePlan, parse_selections};
use tagsel_model::Phase;
use tagsel_observe::{LogConfig, init_logging};

use crate::args::{Args, Output};
use crate::manifest::Manifest;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 1) logger
    let cfg = LogConfig {
        format: args.log_format,
        level: args.log_level.clone(),
        ..Default::default()
    };
    init_logging(&cfg)?;

    // 2) selection; a malformed expression aborts before anything is evaluated
    let filter = parse_selections(&args.test_tags).context("invalid --test-tags")?;
    info!(filter = %filter, "selection parsed");

    // 3) units
    let registry = Manifest::load(&args.manifest)?.into_registry()?;

    // 4) plan
    let plan = PhasePlan::build(&registry, &filter);

    let mut out = std::io::stdout().lock();
    match args.output {
        Output::Json => {
            serde_json::to_writer_pretty(&mut out, &plan)?;
            writeln!(out)?;
        }
        Output::Text => write_text(&mut out, &plan)?,
    }
    Ok(())
}

fn write_text(out: &mut impl Write, plan: &PhasePlan) -> std::io::Result<()> {
    writeln!(out, "filter: {:?}", plan.filter)?;
    for phase in Phase::ALL {
        let units = plan.units(phase);
        writeln!(out, "{phase} ({}):", units.len())?;
        for id in units {
            writeln!(out, "  {id}")?;
        }
    }
    writeln!(out, "skipped ({}):", plan.skipped.len())?;
    for id in &plan.skipped {
        writeln!(out, "  {id}")?;
    }
    Ok(())
}
