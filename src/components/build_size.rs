/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{BuildScriptError, Result};
use crate::types::{Platform, SizeSummary};

const NM_ARGS: [&str; 2] = ["-S", "-td"];
const LARGEST_SYMBOLS: usize = 10;

/// Post build symbol size listing of `.pio/build/<env>/<progname>.elf`.
pub struct BuildSizeReport<'a> {
    pub project_dir: &'a Path,
    /// `PIOENV`
    pub env_name: &'a str,
    /// `PROGNAME`
    pub program_name: &'a str,
    /// `PIOPLATFORM`
    pub platform: &'a str,
    pub home: &'a Path,
}

impl BuildSizeReport<'_> {
    pub fn build_dir(&self) -> PathBuf {
        self.project_dir
            .join(".pio")
            .join("build")
            .join(self.env_name)
    }

    pub fn elf_path(&self) -> PathBuf {
        self.build_dir().join(format!("{}.elf", self.program_name))
    }

    pub fn output_path(&self) -> PathBuf {
        self.build_dir()
            .join(format!("nm_output_{}.txt", self.platform))
    }

    /// Unsupported platforms and a missing nm tool are reported and skipped,
    /// they never fail the firmware build.
    pub fn run(&self) -> Result<Option<SizeSummary>> {
        let platform: Platform = match self.platform.parse() {
            Ok(platform) => platform,
            Err(msg) => {
                tracing::warn!("{}", msg);
                return Ok(None);
            }
        };

        let nm_path = platform.nm_path(self.home);
        if !nm_path.is_file() {
            tracing::error!("nm tool not found at {}", nm_path.display());
            return Ok(None);
        }

        self.run_nm(&nm_path).map(Some)
    }

    fn run_nm(&self, nm_path: &Path) -> Result<SizeSummary> {
        let elf = self.elf_path();
        let output_path = self.output_path();

        tracing::info!(
            "Running: {} {} {} > {}",
            nm_path.display(),
            NM_ARGS.join(" "),
            elf.display(),
            output_path.display()
        );

        let output = Command::new(nm_path)
            .args(NM_ARGS)
            .arg(&elf)
            .output()
            .map_err(|source| BuildScriptError::ToolSpawn {
                tool: nm_path.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            tracing::warn!(
                "{} exited with {}: {}",
                nm_path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        fs::write(&output_path, &output.stdout).map_err(|source| BuildScriptError::Write {
            path: output_path.clone(),
            source,
        })?;

        let listing = String::from_utf8_lossy(&output.stdout);
        let summary = SizeSummary::from_listing(&listing, LARGEST_SYMBOLS);
        log_summary(&summary);

        Ok(summary)
    }
}

fn log_summary(summary: &SizeSummary) {
    tracing::info!("{} sized symbols, {} bytes", summary.symbols, summary.total);
    for (section, size) in summary.by_section.iter() {
        tracing::info!("  {:<8} {:>10}", section, size);
    }
    for symbol in summary.largest.iter() {
        tracing::debug!(
            "  {:>10} {} 0x{:08x} {}",
            symbol.size,
            symbol.kind,
            symbol.address,
            symbol.name
        );
    }
}
