/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use core::fmt;
use core::str::FromStr;

/// Where a board declaration was found, used for diagnostics only.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SourceLocation {
    /// Label of the board description, usually the file path
    pub source: String,
    /// 1-based line number of the `build.board` entry
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.line)
    }
}

/// One selectable board in the generated header.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BoardRecord {
    /// Macro safe identifier, `-` already replaced with `_`
    pub identifier: String,
    /// Pin/package variant name
    pub variant: String,
    /// Microcontroller model
    pub mcu: String,
    pub location: SourceLocation,
}

impl BoardRecord {
    /// Feature test macro the Arduino core defines for this board.
    pub fn macro_name(&self) -> String {
        format!("ARDUINO_{}", self.identifier)
    }
}

/// Turn a declared `build.board` value into a token usable in `ARDUINO_<id>`.
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().replace('-', "_")
}

/// ## How repeated board identifiers are handled
///
/// Vendor files reuse one `build.board` value for several boards, e.g.
/// `esp32`, `esp32wrover` and `esp32da` all declare `ESP32_DEV`. A repeat
/// with the same variant and MCU is folded into the first record under
/// `reject` and `first-wins`. The policy decides what happens to a repeat
/// with different values.
///
/// | Policy      | Conflicting repeat                                       |
/// | ----------- | -------------------------------------------------------- |
/// | `reject`    | generation fails, both locations are reported            |
/// | `first-wins`| later duplicates are dropped with a warning              |
/// | `keep-all`  | every duplicate is emitted, later branches are dead code |
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum DuplicatePolicy {
    #[default]
    Reject,
    FirstWins,
    KeepAll,
}

impl DuplicatePolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::FirstWins => "first-wins",
            DuplicatePolicy::KeepAll => "keep-all",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(DuplicatePolicy::Reject),
            "first-wins" => Ok(DuplicatePolicy::FirstWins),
            "keep-all" => Ok(DuplicatePolicy::KeepAll),
            other => Err(format!(
                "unknown duplicate policy `{}` (expected reject, first-wins or keep-all)",
                other
            )),
        }
    }
}
