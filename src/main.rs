/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

mod boards;
mod components;
mod error;
mod types;

use std::path::{Path, PathBuf};

use anyhow::Context;
use board_info::DuplicatePolicy;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::boards::const_str;
use crate::components::auto_version::{AutoVersion, VersionOutput};
use crate::components::board_info::BoardInfoGenerator;
use crate::components::build_size::BuildSizeReport;

#[derive(Parser)]
#[command(name = "jca-build-scripts")]
#[command(version = const_str::LONG_VERSION)]
#[command(about = "Build hooks of the JCA IOT webserver firmware", long_about = None)]
struct Cli {
    /// Firmware project directory
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Home directory holding `.platformio`, defaults to HOME or USERPROFILE
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the board selection header out of the Arduino cores' boards.txt
    BoardInfo {
        /// Board description file, repeatable, in `#if`/`#elif` order
        #[arg(short, long = "input")]
        inputs: Vec<PathBuf>,

        /// Header to write
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// reject, first-wins or keep-all
        #[arg(long, default_value_t = DuplicatePolicy::Reject)]
        on_duplicate: DuplicatePolicy,
    },
    /// Print AUTO_VERSION build flag and/or program name
    Version {
        /// flag, progname or both
        #[arg(long, default_value = "flag")]
        print: VersionOutput,

        /// Append `-dirty` for a modified work tree
        #[arg(long)]
        dirty: bool,

        /// Existing build flags, AUTO_VERSION is reused when present
        #[arg(long, env = "BUILD_FLAGS", allow_hyphen_values = true)]
        build_flags: Option<String>,
    },
    /// Write the nm symbol listing of the built firmware
    SizeReport {
        #[arg(long, env = "PIOENV")]
        env_name: String,

        #[arg(long, env = "PIOPLATFORM")]
        platform: String,

        #[arg(long, env = "PROGNAME")]
        program_name: String,
    },
}

fn home_dir(cli_home: Option<&Path>) -> anyhow::Result<PathBuf> {
    match cli_home {
        Some(home) => Ok(home.to_path_buf()),
        None => Ok(boards::home_dir()?),
    }
}

fn main() -> anyhow::Result<()> {
    // stdout is reserved for values read back by the build system
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jca_build_scripts=info,board_info=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    const_str::log_banner();

    let cli = Cli::parse();

    match cli.command {
        Commands::BoardInfo {
            inputs,
            output,
            on_duplicate,
        } => {
            let inputs = if inputs.is_empty() {
                boards::default_inputs(&home_dir(cli.home.as_deref())?)
            } else {
                inputs
            };
            let output = output.unwrap_or_else(|| boards::default_output(&cli.project_dir));
            let today = chrono::Local::now().date_naive();

            BoardInfoGenerator::new(inputs, output, today)
                .with_policy(on_duplicate)
                .run()
                .context("board info generation failed")?;
        }
        Commands::Version {
            print,
            dirty,
            build_flags,
        } => {
            let auto = AutoVersion {
                project_dir: &cli.project_dir,
                build_flags: build_flags.as_deref(),
                dirty,
            };
            let lines = auto
                .lines(print)
                .context("cannot determine firmware version")?;
            for line in lines {
                println!("{}", line);
            }
        }
        Commands::SizeReport {
            env_name,
            platform,
            program_name,
        } => {
            let home = home_dir(cli.home.as_deref())?;
            let report = BuildSizeReport {
                project_dir: &cli.project_dir,
                env_name: &env_name,
                program_name: &program_name,
                platform: &platform,
                home: &home,
            };
            report.run().context("size report failed")?;
        }
    }

    Ok(())
}
