/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// ## PlatformIO platforms with a known symbol size tool
///
/// | `PIOPLATFORM`   | nm tool                  | toolchain package         |
/// | --------------- | ------------------------ | ------------------------- |
/// | `espressif32`   | `xtensa-esp32-elf-nm`    | `toolchain-xtensa-esp32`   |
/// | `espressif32s2` | `xtensa-esp32s2-elf-nm`  | `toolchain-xtensa-esp32s2` |
/// | `espressif32s3` | `xtensa-esp32s3-elf-nm`  | `toolchain-xtensa-esp32s3` |
/// | `espressif8266` | `xtensa-lx106-elf-nm`    | `toolchain-xtensa-lx106`   |
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Platform {
    Espressif32,
    Espressif32S2,
    Espressif32S3,
    Espressif8266,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Espressif32,
        Platform::Espressif32S2,
        Platform::Espressif32S3,
        Platform::Espressif8266,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Platform::Espressif32 => "espressif32",
            Platform::Espressif32S2 => "espressif32s2",
            Platform::Espressif32S3 => "espressif32s3",
            Platform::Espressif8266 => "espressif8266",
        }
    }

    /// nm tool name without executable suffix
    pub const fn nm_tool(&self) -> &'static str {
        match self {
            Platform::Espressif32 => "xtensa-esp32-elf-nm",
            Platform::Espressif32S2 => "xtensa-esp32s2-elf-nm",
            Platform::Espressif32S3 => "xtensa-esp32s3-elf-nm",
            Platform::Espressif8266 => "xtensa-lx106-elf-nm",
        }
    }

    /// Toolchain triple part before `-elf`, e.g. `xtensa-lx106`
    pub fn toolchain_name(&self) -> &'static str {
        let tool = self.nm_tool();
        tool.split("-elf").next().unwrap_or(tool)
    }

    pub fn toolchain_package(&self) -> String {
        format!("toolchain-{}", self.toolchain_name())
    }

    /// `<home>/.platformio/packages/toolchain-<name>/bin/<nm tool><exe suffix>`
    pub fn nm_path(&self, home: &Path) -> PathBuf {
        home.join(".platformio")
            .join("packages")
            .join(self.toolchain_package())
            .join("bin")
            .join(format!("{}{}", self.nm_tool(), std::env::consts::EXE_SUFFIX))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unsupported platform: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip_names() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>(), Ok(platform));
        }
        assert!("atmelavr".parse::<Platform>().is_err());
    }

    #[test]
    fn test_toolchain_package() {
        assert_eq!(Platform::Espressif32.toolchain_package(), "toolchain-xtensa-esp32");
        assert_eq!(Platform::Espressif8266.toolchain_name(), "xtensa-lx106");
    }

    #[test]
    fn test_nm_path() {
        let path = Platform::Espressif32S3.nm_path(Path::new("/home/jca"));
        let expected = format!(
            "/home/jca/.platformio/packages/toolchain-xtensa-esp32s3/bin/xtensa-esp32s3-elf-nm{}",
            std::env::consts::EXE_SUFFIX
        );
        assert_eq!(path, PathBuf::from(expected));
    }
}
