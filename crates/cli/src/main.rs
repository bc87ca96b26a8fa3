mod runner;

use anyhow::Context;
use boneboot_config::{Entry, SimScript};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "BoneBoot AM335x bring-up simulator", long_about = None)]
struct Args {
    /// Log every register access
    #[arg(short, long, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Boot a firmware entry on the simulated SoC and print its UART output
    Run {
        #[arg(short, long, value_enum, default_value = "blinky")]
        entry: EntryArg,

        /// Blink cycles to run after boot (blinky only)
        #[arg(short, long, default_value = "3")]
        cycles: u64,
    },
    /// Run a simulation script and check its assertions
    Test {
        /// Path to the simulation script (YAML)
        #[arg(short, long)]
        script: PathBuf,

        /// Directory for result.json
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Do not echo UART output to stdout
        #[arg(long)]
        no_uart_stdout: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EntryArg {
    Blinky,
    Hello,
}

impl From<EntryArg> for Entry {
    fn from(arg: EntryArg) -> Self {
        match arg {
            EntryArg::Blinky => Entry::Blinky,
            EntryArg::Hello => Entry::Hello,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only UART bytes.
    tracing_subscriber::fmt()
        .with_max_level(if args.trace {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    info!("Starting BoneBoot simulator");

    match args.command {
        Command::Run { entry, cycles } => {
            let entry = Entry::from(entry);
            if entry == Entry::Blinky {
                boneboot_config::check_cycles(cycles)?;
            }
            let report = runner::simulate(entry, cycles);
            std::io::stdout()
                .write_all(&report.uart)
                .context("Failed to write UART output")?;

            info!(
                "UART: {} bytes, LED edges: {}, register accesses: {}",
                report.uart_bytes, report.led_edges, report.register_accesses
            );
            for fault in &report.faults {
                warn!("Fault: {}", fault);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Test {
            script,
            output_dir,
            no_uart_stdout,
        } => {
            info!("Loading simulation script: {:?}", script);
            let script = SimScript::from_file(&script)?;
            let result = runner::run_script(&script);

            if !no_uart_stdout {
                std::io::stdout()
                    .write_all(&result.report.uart)
                    .context("Failed to write UART output")?;
            }

            for a in &result.assertions {
                if a.passed {
                    info!("PASS {}", a.assertion);
                } else {
                    error!("FAIL {}", a.assertion);
                }
            }

            if let Some(dir) = output_dir {
                std::fs::create_dir_all(&dir)
                    .with_context(|| format!("Failed to create output dir {:?}", dir))?;
                let path = dir.join("result.json");
                let json = serde_json::to_string_pretty(&result)?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                info!("Wrote {:?}", path);
            }

            Ok(if result.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
