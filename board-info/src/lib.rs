/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Board information for the JCA IOT webserver firmware.
//! Board description files (`boards.txt` of the Arduino cores) are parsed into
//! [`BoardRecord`]s and rendered into a C header that maps each
//! `ARDUINO_<id>` board macro to its variant and MCU strings.
//! Parsing and rendering are pure, reading and writing files is left to the caller.


pub mod header;
pub mod parser;
pub mod types;

use thiserror::Error;

pub use header::{render, BoardHeader};
pub use parser::BoardDescription;
pub use types::*;

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum BoardInfoError {
    /// Same `ARDUINO_<id>` declared twice, the second branch could never be taken
    #[error("duplicate board identifier `{identifier}` at {second} (first declared at {first})")]
    DuplicateIdentifier {
        identifier: String,
        first: SourceLocation,
        second: SourceLocation,
    },
}

/// Ordered board records collected across all board description files.
/// Insertion order is kept, it decides the `#if`/`#elif` order of the header.
#[derive(Debug, Default)]
pub struct BoardTable {
    records: Vec<BoardRecord>,
    policy: DuplicatePolicy,
}

impl BoardTable {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self {
            records: Vec::new(),
            policy,
        }
    }

    /// Add a record, returns whether it was kept.
    pub fn push(&mut self, record: BoardRecord) -> Result<bool, BoardInfoError> {
        let existing = self
            .records
            .iter()
            .find(|r| r.identifier == record.identifier);

        if let Some(first) = existing {
            let same_board = first.variant == record.variant && first.mcu == record.mcu;
            match self.policy {
                DuplicatePolicy::Reject | DuplicatePolicy::FirstWins if same_board => {
                    tracing::debug!(
                        "fold board {} at {} into {}",
                        record.macro_name(),
                        record.location,
                        first.location
                    );
                    return Ok(false);
                }
                DuplicatePolicy::Reject => {
                    return Err(BoardInfoError::DuplicateIdentifier {
                        identifier: record.identifier,
                        first: first.location.clone(),
                        second: record.location,
                    });
                }
                DuplicatePolicy::FirstWins => {
                    tracing::warn!(
                        "drop duplicate board {} at {}, already declared at {}",
                        record.macro_name(),
                        record.location,
                        first.location
                    );
                    return Ok(false);
                }
                DuplicatePolicy::KeepAll => {
                    tracing::warn!(
                        "board {} at {} shadowed by {}, branch is unreachable",
                        record.macro_name(),
                        record.location,
                        first.location
                    );
                }
            }
        }

        self.records.push(record);
        Ok(true)
    }

    /// Add every complete board of `description`, returns the count kept.
    pub fn extend_from(
        &mut self,
        description: &BoardDescription<'_>,
    ) -> Result<usize, BoardInfoError> {
        let mut kept = 0;
        for record in description.records() {
            if self.push(record)? {
                kept += 1;
            }
        }
        tracing::info!("{}: {} boards", description.source(), kept);
        Ok(kept)
    }

    pub fn records(&self) -> &[BoardRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BoardRecord> {
        self.records
    }
}

/// Collect board records from `(source label, file content)` pairs,
/// keeping input order first and line order second.
pub fn generate<'a, I>(
    inputs: I,
    policy: DuplicatePolicy,
) -> Result<Vec<BoardRecord>, BoardInfoError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut table = BoardTable::new(policy);
    for (source, text) in inputs {
        table.extend_from(&BoardDescription::parse(source, text))?;
    }
    Ok(table.into_records())
}
