// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

mod err;
mod report;

use clap::Parser;
use err::PortopsError;
use portops_core::time::Duration;
use portops_engine::{
    alerts::{AlertThresholds, AlertThresholdsBuilder},
    allocation::BerthTopology,
    ledger::replay,
};
use portops_model::generator::{ScenarioGenConfigBuilder, ScenarioGenerator};
use report::{Report, ScenarioFile, WindowSpec};
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();
}

/// Replays a port scenario and reports allocations, stays, trips,
/// berth occupancy and proximity alerts as JSON.
#[derive(Parser, Debug, Clone)]
#[command(name = "portops", version)]
struct Cli {
    /// Scenario file to replay. Without one a scenario is generated.
    #[arg(long, short)]
    scenario: Option<PathBuf>,

    /// Seed for the generated scenario.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, default_value_t = 3)]
    quays: usize,

    #[arg(long, default_value_t = 6)]
    berths_per_quay: usize,

    #[arg(long, default_value_t = 24)]
    ships: usize,

    #[arg(long, default_value_t = 1_000)]
    updates: usize,

    /// Occupancy look-back from the last update, in hours. Overrides the
    /// window stored in the scenario file.
    #[arg(long)]
    lookback_hours: Option<i64>,

    #[arg(long)]
    approaching_nm: Option<f64>,

    #[arg(long)]
    pilot_nm: Option<f64>,

    /// Write the report here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

impl Cli {
    fn thresholds(
        &self,
        stored: Option<AlertThresholds>,
    ) -> Result<AlertThresholds, PortopsError> {
        let base = stored.unwrap_or_default();
        base.validate()?;
        let thresholds = AlertThresholdsBuilder::new()
            .approaching_nm(self.approaching_nm.unwrap_or(base.approaching().value()))
            .pilot_nm(self.pilot_nm.unwrap_or(base.pilot().value()))
            .build()?;
        Ok(thresholds)
    }
}

fn load(path: &Path) -> Result<ScenarioFile, PortopsError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn run(cli: &Cli) -> Result<(), PortopsError> {
    let t0 = Instant::now();
    let mut input = match &cli.scenario {
        Some(path) => {
            info!(path = %path.display(), "Loading scenario");
            load(path)?
        }
        None => {
            let config = ScenarioGenConfigBuilder::new()
                .quays(cli.quays)
                .berths_per_quay(cli.berths_per_quay)
                .ships(cli.ships)
                .updates(cli.updates)
                .seed(cli.seed)
                .build()?;
            info!(seed = cli.seed, "Generating scenario");
            ScenarioFile::new(ScenarioGenerator::new(config).generate())
        }
    };
    if let Some(hours) = cli.lookback_hours {
        if hours < 0 {
            warn!(hours, "Negative look-back treated as an empty window");
        }
        input.window = Some(WindowSpec::Trailing {
            lookback: Duration::from_hours(hours),
        });
    }

    let thresholds = cli.thresholds(input.thresholds)?;
    let topology = BerthTopology::new(input.scenario.berths().to_vec())?;
    let replayed = replay(&input.scenario, &topology)?;
    if cli.scenario.is_none() {
        input.request_anchored(&replayed);
    }
    let report = Report::build(&input, &topology, &replayed, thresholds);
    info!(
        events = report.events(),
        alerts = report.alerts().len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "Scenario replayed"
    );

    match &cli.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.flush()?;
            info!(path = %path.display(), "Report written");
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), PortopsError> {
    enable_tracing();
    let cli = Cli::parse();
    run(&cli)
}
