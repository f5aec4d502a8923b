/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use core::fmt;
use std::borrow::Cow;

use chrono::NaiveDate;

use crate::types::BoardRecord;

pub const HEADER_FILE_NAME: &str = "JCA_IOT_Webserver_Boardinfo.h";
pub const INCLUDE_GUARD: &str = "_JCA_IOT_WEBSERVER_BOARDINFO_";
pub const UNDEFINED_VALUE: &str = "undef";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Board selection header, written with `to_string()`.
///
/// ```text
/// #ifndef _JCA_IOT_WEBSERVER_BOARDINFO_
/// #define _JCA_IOT_WEBSERVER_BOARDINFO_
/// #if defined(ARDUINO_<ID1>)      <- first record only
/// #elif defined(ARDUINO_<ID2>)    <- every further record
/// #else                           <- "undef" fallback
/// #endif
/// #endif
/// ```
///
/// Without any record there is nothing to select from, so the fallback
/// defines are written unconditionally and the chain is left out.
pub struct BoardHeader<'a> {
    records: &'a [BoardRecord],
    date: NaiveDate,
}

impl<'a> BoardHeader<'a> {
    pub fn new(records: &'a [BoardRecord], date: NaiveDate) -> Self {
        Self { records, date }
    }

    fn write_doc_block(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "/**")?;
        writeln!(f, " * @file {}", HEADER_FILE_NAME)?;
        writeln!(f, " * @author JCA(https: // github.com/ichok)")?;
        writeln!(f, " * @brief Selection of Boardtypes")?;
        writeln!(f, " * Contains Variant and MCU Type.")?;
        writeln!(f, " * @version 0.1")?;
        writeln!(f, " * @date {}", self.date.format(DATE_FORMAT))?;
        writeln!(f, " *")?;
        writeln!(f, " * Copyright Jochen Cabrera 2022")?;
        writeln!(f, " * Apache License")?;
        writeln!(f, " *")?;
        writeln!(f, " */")?;
        writeln!(f)
    }
}

fn write_defines(
    f: &mut fmt::Formatter<'_>,
    indent: &str,
    variant: &str,
    mcu: &str,
) -> fmt::Result {
    writeln!(
        f,
        "{}#define BOARD_VARIANT \"{}\"",
        indent,
        escape_literal(variant)
    )?;
    writeln!(f, "{}#define BOARD_MCU \"{}\"", indent, escape_literal(mcu))
}

/// Escape a value for use inside a C string literal.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if !value.contains(|c: char| c == '"' || c == '\\') {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

impl fmt::Display for BoardHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_doc_block(f)?;
        writeln!(f, "#ifndef {}", INCLUDE_GUARD)?;
        writeln!(f, "#define {}", INCLUDE_GUARD)?;

        if self.records.is_empty() {
            write_defines(f, "", UNDEFINED_VALUE, UNDEFINED_VALUE)?;
            return writeln!(f, "#endif");
        }

        for (idx, record) in self.records.iter().enumerate() {
            let directive = if idx == 0 { "#if" } else { "#elif" };
            writeln!(f, "{} defined({})", directive, record.macro_name())?;
            write_defines(f, "  ", &record.variant, &record.mcu)?;
        }

        writeln!(f, "#else")?;
        write_defines(f, "  ", UNDEFINED_VALUE, UNDEFINED_VALUE)?;
        writeln!(f, "#endif")?;
        writeln!(f, "#endif")
    }
}

pub fn render(records: &[BoardRecord], date: NaiveDate) -> String {
    BoardHeader::new(records, date).to_string()
}
