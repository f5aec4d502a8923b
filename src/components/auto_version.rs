/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Firmware version out of the project repository.
//!
//! The version is what `git describe --tags` prints, it ends up in the firmware
//! as `-D AUTO_VERSION=\"<version>\"` and in the program name
//! `FW_<project dir>_<version>`.

use std::path::Path;

use git2::{DescribeFormatOptions, DescribeOptions, Repository};

use crate::error::{BuildScriptError, Result};

pub const VERSION_DEFINE: &str = "AUTO_VERSION";
pub const PROGRAM_PREFIX: &str = "FW_";
pub const DIRTY_SUFFIX: &str = "-dirty";

/// `git describe --tags [--dirty]`, falls back to the abbreviated commit id
/// when no tag is reachable from HEAD.
pub fn describe(project_dir: &Path, dirty: bool) -> Result<String> {
    let repo = Repository::discover(project_dir)?;

    let mut options = DescribeOptions::new();
    options.describe_tags().show_commit_oid_as_fallback(true);

    let mut format = DescribeFormatOptions::new();
    if dirty {
        format.dirty_suffix(DIRTY_SUFFIX);
    }

    let version = repo.describe(&options)?.format(Some(&format))?;
    tracing::debug!("git describe in {}: {}", project_dir.display(), version);

    Ok(version)
}

/// `-D AUTO_VERSION=\"<version>\"`, quotes escaped for the compiler command line
pub fn build_flag(version: &str) -> String {
    format!("-D {}=\\\"{}\\\"", VERSION_DEFINE, version)
}

pub fn program_name(project_dir: &Path, version: &str) -> Result<String> {
    let absolute = project_dir
        .canonicalize()
        .map_err(|source| BuildScriptError::Read {
            path: project_dir.to_path_buf(),
            source,
        })?;

    let dir_name = absolute
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| BuildScriptError::ProjectName(absolute.clone()))?;

    Ok(format!("{}{}_{}", PROGRAM_PREFIX, dir_name, version))
}

/// Value of `AUTO_VERSION` in an existing `BUILD_FLAGS` string.
/// Both `-D NAME=value` and `-DNAME=value` are accepted, the last one wins.
pub fn version_from_build_flags(flags: &str) -> Option<String> {
    let mut tokens = flags.split_whitespace();
    let mut found = None;

    while let Some(token) = tokens.next() {
        let define = match token {
            "-D" => match tokens.next() {
                Some(define) => define,
                None => break,
            },
            _ => match token.strip_prefix("-D") {
                Some(define) => define,
                None => continue,
            },
        };

        if let Some((name, value)) = define.split_once('=') {
            if name == VERSION_DEFINE {
                found = Some(unquote(value));
            }
        }
    }

    found.filter(|version| !version.is_empty())
}

fn unquote(value: &str) -> String {
    value.replace("\\\"", "").replace('"', "").replace('\'', "")
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum VersionOutput {
    BuildFlag,
    ProgramName,
    Both,
}

impl core::str::FromStr for VersionOutput {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s {
            "flag" => Ok(VersionOutput::BuildFlag),
            "progname" => Ok(VersionOutput::ProgramName),
            "both" => Ok(VersionOutput::Both),
            other => Err(format!(
                "unknown output `{}` (expected flag, progname or both)",
                other
            )),
        }
    }
}

pub struct AutoVersion<'a> {
    pub project_dir: &'a Path,
    /// `BUILD_FLAGS` handed over by the build system, may already carry the version
    pub build_flags: Option<&'a str>,
    pub dirty: bool,
}

impl AutoVersion<'_> {
    pub fn version(&self) -> Result<String> {
        if let Some(version) = self.build_flags.and_then(version_from_build_flags) {
            tracing::debug!("{} taken from BUILD_FLAGS: {}", VERSION_DEFINE, version);
            return Ok(version);
        }

        describe(self.project_dir, self.dirty)
    }

    /// Lines for the build system, one value per line
    pub fn lines(&self, output: VersionOutput) -> Result<Vec<String>> {
        let version = self.version()?;

        let lines = match output {
            VersionOutput::BuildFlag => vec![build_flag(&version)],
            VersionOutput::ProgramName => vec![program_name(self.project_dir, &version)?],
            VersionOutput::Both => vec![
                build_flag(&version),
                program_name(self.project_dir, &version)?,
            ],
        };

        Ok(lines)
    }
}
