/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

//! Where the Arduino cores keep their board descriptions and where the
//! generated board header belongs inside the firmware project.

pub mod const_str;

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{BuildScriptError, Result};

pub const BOARDS_TXT: &str = "boards.txt";
pub const WEBSERVER_LIB_DIR: &str = "lib/JCA_IOT_Webserver";

/// ## Arduino core packages scanned for `boards.txt`
///
/// | Package   | PlatformIO package directory      |
/// | --------- | --------------------------------- |
/// | `esp8266` | `framework-arduinoespressif8266`  |
/// | `esp32`   | `framework-arduinoespressif32`    |
///
/// The order of [`BoardPackage::ALL`] is the order of the `#if`/`#elif` chain.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BoardPackage {
    Esp8266,
    Esp32,
}

impl BoardPackage {
    pub const ALL: [BoardPackage; 2] = [BoardPackage::Esp8266, BoardPackage::Esp32];

    pub const fn framework_package(&self) -> &'static str {
        match self {
            BoardPackage::Esp8266 => "framework-arduinoespressif8266",
            BoardPackage::Esp32 => "framework-arduinoespressif32",
        }
    }

    pub fn boards_txt(&self, home: &Path) -> PathBuf {
        home.join(".platformio")
            .join("packages")
            .join(self.framework_package())
            .join(BOARDS_TXT)
    }
}

pub fn default_inputs(home: &Path) -> Vec<PathBuf> {
    BoardPackage::ALL
        .iter()
        .map(|package| package.boards_txt(home))
        .collect()
}

pub fn default_output(project_dir: &Path) -> PathBuf {
    project_dir
        .join(WEBSERVER_LIB_DIR)
        .join(board_info::header::HEADER_FILE_NAME)
}

/// `HOME` first, `USERPROFILE` for Windows hosts
pub fn home_dir() -> Result<PathBuf> {
    home_dir_from(|key| std::env::var_os(key))
}

fn home_dir_from(lookup: impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(BuildScriptError::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_inputs_order() {
        let inputs = default_inputs(Path::new("/home/jca"));
        assert_eq!(
            inputs,
            [
                PathBuf::from("/home/jca/.platformio/packages/framework-arduinoespressif8266/boards.txt"),
                PathBuf::from("/home/jca/.platformio/packages/framework-arduinoespressif32/boards.txt"),
            ]
        );
    }

    #[test]
    fn test_default_output() {
        assert_eq!(
            default_output(Path::new("/work/fw")),
            PathBuf::from("/work/fw/lib/JCA_IOT_Webserver/JCA_IOT_Webserver_Boardinfo.h")
        );
    }

    #[test]
    fn test_home_lookup_order() {
        let home = home_dir_from(|key| match key {
            "HOME" => Some("/home/jca".into()),
            "USERPROFILE" => Some("C:\\Users\\jca".into()),
            _ => None,
        });
        assert_eq!(home.unwrap(), PathBuf::from("/home/jca"));

        let profile = home_dir_from(|key| match key {
            "HOME" => Some(OsString::new()),
            "USERPROFILE" => Some("C:\\Users\\jca".into()),
            _ => None,
        });
        assert_eq!(profile.unwrap(), PathBuf::from("C:\\Users\\jca"));

        assert!(matches!(
            home_dir_from(|_| None),
            Err(BuildScriptError::HomeNotFound)
        ));
    }
}
