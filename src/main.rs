use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use moon_earth_sun::config::Args;
use moon_earth_sun::energy::{relative_drift, total_energy};
use moon_earth_sun::record::write_records;
use moon_earth_sun::scenario::labels;
use std::process::ExitCode;
use std::time::Instant;

/// The single line a failed run leaves on stderr.
fn failure_line(err: &anyhow::Error) -> String {
    format!("ERROR: {err:#}.")
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", failure_line(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut bodies = args
        .initial_bodies()
        .context("failed to load initial conditions")?;
    let sim = args.simulation().context("invalid run length")?;
    let mut record = sim.allocate_record()?;

    println!(
        "[{}] {} bodies, {} steps of {} s, sampling every {} steps",
        Utc::now().to_rfc3339(),
        bodies.len(),
        sim.total_steps,
        sim.time_step,
        sim.sample_interval
    );
    for body in &bodies {
        println!("  {body}");
    }

    let initial_energy = total_energy(&bodies);
    let start = Instant::now();
    sim.run(&mut bodies, &mut record)
        .context("simulation aborted, no output written")?;
    let elapsed = start.elapsed().as_secs_f64();

    let final_energy = total_energy(&bodies);
    println!(
        "Finished in {:.2} s. Total energy {:.6e} J -> {:.6e} J (drift {:.3e})",
        elapsed,
        initial_energy,
        final_energy,
        relative_drift(initial_energy, final_energy)
    );

    let names = labels(&bodies);
    write_records(
        &args.output,
        &record,
        &names[sim.selector.body_a],
        &names[sim.selector.body_b],
    )
    .with_context(|| format!("failed to write {}", args.output.display()))?;
    println!("Wrote {} samples to {}", record.len(), args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use moon_earth_sun::Error;

    #[test]
    fn failure_is_one_error_line_with_causes() {
        let err = anyhow::Error::new(Error::InvalidTimeStep(-1.0))
            .context("simulation aborted, no output written");
        assert_eq!(
            failure_line(&err),
            "ERROR: simulation aborted, no output written: \
             time step is less than or equal to zero (-1)."
        );
    }

    #[test]
    fn tiny_step_fails_before_stepping() {
        let output = std::env::temp_dir().join(format!("moon-earth-sun-fail-{}.dat", std::process::id()));
        let output_arg = output.to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "moon-earth-sun",
            "-s",
            "1e-300",
            "-m",
            "1",
            "-o",
            output_arg.as_str(),
        ])
        .unwrap();
        let err = run(&args).unwrap_err();
        let line = failure_line(&err);
        assert!(line.starts_with("ERROR: invalid run length: "));
        assert!(line.ends_with("needs more steps than can be counted."));
        assert!(!output.exists());
    }
}
