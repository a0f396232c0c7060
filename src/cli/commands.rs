use crate::cli::args::{Cli, Commands};
use crate::error::{ProcessingError, Result};
use crate::processors::{CleaningPipeline, PipelinePaths};
use crate::utils::progress::ProgressReporter;

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Clean {
            measurements,
            locations,
            pre_output,
            output,
            stations_dir,
            skip_stations,
            max_workers,
            report,
        } => {
            println!("Cleaning OpenAQ measurement data...");
            println!("Measurements: {}", measurements.display());
            println!("Locations: {}", locations.display());

            let progress = ProgressReporter::new_spinner("Running pipeline...", false);

            let paths = PipelinePaths {
                measurements,
                locations,
                pre_interpolation: pre_output,
                cleaned: output,
                stations_dir: (!skip_stations).then_some(stations_dir),
            };

            let pipeline = CleaningPipeline::new(max_workers);
            let run_report = pipeline.run(&paths, Some(&progress))?;

            progress.finish_with_message(&format!("Processed {} rows", run_report.merged_rows));
            println!("\n{}", run_report.summary());

            if let Some(report_path) = report {
                let json = serde_json::to_string_pretty(&run_report)?;
                std::fs::write(&report_path, json).map_err(|source| {
                    ProcessingError::FileWrite {
                        path: report_path.clone(),
                        source,
                    }
                })?;
                println!("Run report written to {}", report_path.display());
            }

            println!("Cleaning complete!");
        }

        Commands::Stations {
            input,
            stations_dir,
            max_workers,
        } => {
            println!("Splitting cleaned data by station...");
            println!("Input: {}", input.display());
            println!("Output directory: {}", stations_dir.display());

            let progress = ProgressReporter::new_spinner("Splitting stations...", false);

            let pipeline = CleaningPipeline::new(max_workers);
            let report =
                pipeline.split_stations_from_file(&input, &stations_dir, Some(&progress))?;

            progress.finish_with_message(&format!("Wrote {} station files", report.written));

            for station in &report.stations {
                println!("  {}", station);
            }
            if report.skipped > 0 {
                println!("{} empty partitions skipped", report.skipped);
            }
            println!("All stations saved!");
        }
    }

    Ok(())
}
