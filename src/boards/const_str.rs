/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

pub const PROJECT_NAME: &str = env!("PROJECT_NAME");

pub const VERSION_STR: &str = env!("PROJECT_VERSION");

pub const COMMIT_HASH: &str = env!("GIT_COMMIT_HASH");

pub const COMMIT_SHORT: &str = env!("GIT_COMMIT_SHORT_HASH");

pub const GIT_COMMIT_DATETIME: &str = env!("GIT_COMMIT_DATETIME");
pub const PRINT_BAR: &str = "+-----------------------------------------------------------+";

/// `--version` text, e.g. `0.1.0 (1a2b3c4d5 2024-03-09 12:00:00 +0100)`
pub const LONG_VERSION: &str = concat!(
    env!("PROJECT_VERSION"),
    " (",
    env!("GIT_COMMIT_SHORT_HASH"),
    " ",
    env!("GIT_COMMIT_DATETIME"),
    ")"
);

pub fn log_banner() {
    tracing::debug!("{}", PRINT_BAR);
    tracing::debug!("Build Tool Ver : {} {}", PROJECT_NAME, VERSION_STR);
    tracing::debug!("Git Hash       : {}", COMMIT_HASH);
    tracing::debug!("Git Datetime   : {} | {}", GIT_COMMIT_DATETIME, COMMIT_SHORT);
    tracing::debug!("{}", PRINT_BAR);
}
