/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildScriptError>;

#[derive(Debug, Error)]
pub enum BuildScriptError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("neither HOME nor USERPROFILE is set")]
    HomeNotFound,

    #[error("cannot derive a program name from {0}")]
    ProjectName(PathBuf),

    #[error("git: {0}")]
    Git(#[from] git2::Error),

    #[error("failed to run {tool}: {source}")]
    ToolSpawn { tool: PathBuf, source: io::Error },

    #[error(transparent)]
    BoardInfo(#[from] board_info::BoardInfoError),
}
