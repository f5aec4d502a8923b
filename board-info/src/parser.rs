/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Single pass reader for vendor `boards.txt` files.
//!
//! Every relevant line looks like `<prefix>build.board=<id>`, where the prefix
//! (`esp32.`, `d1_mini.`, ...) namespaces all properties of one board.
//! The file is indexed once and board properties are looked up by key,
//! so the cost stays linear in the number of lines.

use std::collections::HashMap;

use crate::types::{normalize_identifier, BoardRecord, SourceLocation};

pub const BOARD_MARKER: &str = "build.board";
pub const VARIANT_KEY: &str = "build.variant";
pub const MCU_KEY: &str = "build.mcu";

const COMMENT_CHAR: char = '#';

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Entry<'a> {
    pub key: &'a str,
    pub value: &'a str,
    /// 1-based
    pub line: usize,
}

/// A `build.board` entry together with its key prefix
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct BoardDeclaration<'a> {
    /// Key prefix including the trailing separator, e.g. `esp32.`
    pub prefix: &'a str,
    /// Declared identifier as written in the file
    pub raw_identifier: &'a str,
    pub line: usize,
}

/// Parse one `key=value` line. Blank lines, comments and lines without `=`
/// are not entries.
///
/// The key is trimmed on both sides. The value keeps leading whitespace and
/// loses only the trailing line terminator and blanks, so `a.build.mcu= x`
/// yields `" x"`.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim_end();
    let content = trimmed.trim_start();
    if content.is_empty() || content.starts_with(COMMENT_CHAR) {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, value))
}

pub struct BoardDescription<'a> {
    source: &'a str,
    entries: Vec<Entry<'a>>,
    // last occurrence of a key wins
    index: HashMap<&'a str, usize>,
}

impl<'a> BoardDescription<'a> {
    pub fn parse(source: &'a str, text: &'a str) -> Self {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (line_idx, line) in text.lines().enumerate() {
            if let Some((key, value)) = parse_line(line) {
                index.insert(key, entries.len());
                entries.push(Entry {
                    key,
                    value,
                    line: line_idx + 1,
                });
            }
        }

        Self {
            source,
            entries,
            index,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.index.get(key).map(|&idx| self.entries[idx].value)
    }

    /// Lookup `<prefix><suffix>`, absent keys read as an empty string.
    pub fn property(&self, prefix: &str, suffix: &str) -> &'a str {
        let mut key = String::with_capacity(prefix.len() + suffix.len());
        key.push_str(prefix);
        key.push_str(suffix);
        self.get(&key).unwrap_or("")
    }

    /// All `build.board` declarations in line order.
    pub fn declarations(&self) -> impl Iterator<Item = BoardDeclaration<'a>> + '_ {
        self.entries.iter().filter_map(|entry| {
            entry
                .key
                .strip_suffix(BOARD_MARKER)
                .map(|prefix| BoardDeclaration {
                    prefix,
                    raw_identifier: entry.value,
                    line: entry.line,
                })
        })
    }

    /// Boards with a non-empty identifier, variant and mcu, in line order.
    /// Incomplete declarations are skipped without error.
    pub fn records(&self) -> Vec<BoardRecord> {
        let mut records = Vec::new();

        for decl in self.declarations() {
            let identifier = normalize_identifier(decl.raw_identifier);
            let variant = self.property(decl.prefix, VARIANT_KEY);
            let mcu = self.property(decl.prefix, MCU_KEY);

            if identifier.is_empty() || variant.is_empty() || mcu.is_empty() {
                tracing::debug!(
                    "skip board `{}` at {}:{} (variant: {:?}, mcu: {:?})",
                    decl.prefix,
                    self.source,
                    decl.line,
                    variant,
                    mcu
                );
                continue;
            }

            records.push(BoardRecord {
                identifier,
                variant: variant.to_owned(),
                mcu: mcu.to_owned(),
                location: SourceLocation {
                    source: self.source.to_owned(),
                    line: decl.line,
                },
            });
        }

        records
    }
}
