/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::collections::BTreeMap;

/// One sized symbol out of `nm -S -td`, e.g.
/// `1075840660 00000052 T app_main`
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NmSymbol {
    pub address: u64,
    pub size: u64,
    pub kind: char,
    pub name: String,
}

impl NmSymbol {
    /// Lines of undefined symbols carry no address nor size and are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        let address = fields.next()?.parse().ok()?;
        let size = fields.next()?.parse().ok()?;

        let mut kind_field = fields.next()?.chars();
        let kind = kind_field.next()?;
        if kind_field.next().is_some() {
            return None;
        }

        let name = fields.collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return None;
        }

        Some(Self {
            address,
            size,
            kind,
            name,
        })
    }

    /// Text, read-only data and initialized/zeroed data, anything else is `other`
    pub fn section(&self) -> &'static str {
        match self.kind.to_ascii_lowercase() {
            't' | 'w' => "text",
            'r' => "rodata",
            'd' => "data",
            'b' => "bss",
            _ => "other",
        }
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SizeSummary {
    pub symbols: usize,
    pub total: u64,
    pub by_section: BTreeMap<&'static str, u64>,
    /// Largest first
    pub largest: Vec<NmSymbol>,
}

impl SizeSummary {
    pub fn from_listing(listing: &str, keep_largest: usize) -> Self {
        let mut symbols: Vec<NmSymbol> = listing.lines().filter_map(NmSymbol::parse).collect();

        let mut by_section = BTreeMap::new();
        for symbol in symbols.iter() {
            *by_section.entry(symbol.section()).or_insert(0) += symbol.size;
        }

        let total = symbols.iter().map(|s| s.size).sum();
        let count = symbols.len();

        symbols.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        symbols.truncate(keep_largest);

        Self {
            symbols: count,
            total,
            by_section,
            largest: symbols,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
         U __assert_func
1073741824 00000016 b s_flag
1074266112 00000120 D wifi_config
1075052544 00000512 T loop_task
1075053056 00002048 T app_main
1075840660 00000008 r version_str
1075840700 00000040 W operator new(unsigned int)
";

    #[test]
    fn test_parse_line() {
        let sym = NmSymbol::parse("1075053056 00002048 T app_main").unwrap();
        assert_eq!(sym.address, 1075053056);
        assert_eq!(sym.size, 2048);
        assert_eq!(sym.kind, 'T');
        assert_eq!(sym.name, "app_main");
        assert_eq!(sym.section(), "text");

        assert_eq!(NmSymbol::parse("         U __assert_func"), None);
        assert_eq!(NmSymbol::parse("1075053056 T no_size"), None);
        assert_eq!(NmSymbol::parse(""), None);
    }

    #[test]
    fn test_summary() {
        let summary = SizeSummary::from_listing(LISTING, 3);

        assert_eq!(summary.symbols, 6);
        assert_eq!(summary.total, 16 + 120 + 512 + 2048 + 8 + 40);
        assert_eq!(summary.by_section.get("text"), Some(&(512 + 2048 + 40)));
        assert_eq!(summary.by_section.get("bss"), Some(&16));
        assert_eq!(summary.by_section.get("rodata"), Some(&8));

        let names: Vec<&str> = summary.largest.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["app_main", "loop_task", "wifi_config"]);
    }

    #[test]
    fn test_demangled_name_with_spaces() {
        let summary = SizeSummary::from_listing(LISTING, 10);
        assert!(summary
            .largest
            .iter()
            .any(|s| s.name == "operator new(unsigned int)"));
    }
}
