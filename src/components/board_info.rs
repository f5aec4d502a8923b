/*
 * SPDX-FileCopyrightText: © 2023 Jinwoo Park (pmnxis@gmail.com)
 *
 * SPDX-License-Identifier: MIT OR Apache-2.0
 */

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use board_info::DuplicatePolicy;
use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::error::{BuildScriptError, Result};

pub struct BoardInfoGenerator {
    inputs: Vec<PathBuf>,
    output: PathBuf,
    policy: DuplicatePolicy,
    date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GenerationSummary {
    pub files: usize,
    pub boards: usize,
}

impl BoardInfoGenerator {
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf, date: NaiveDate) -> Self {
        Self {
            inputs,
            output,
            policy: DuplicatePolicy::default(),
            date,
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Read every board description in order and return the header text.
    /// Nothing is written when an input cannot be read.
    pub fn render(&self) -> Result<(String, GenerationSummary)> {
        let mut sources = Vec::with_capacity(self.inputs.len());
        for path in self.inputs.iter() {
            let text = fs::read_to_string(path).map_err(|source| BuildScriptError::Read {
                path: path.clone(),
                source,
            })?;
            sources.push((path.display().to_string(), text));
        }

        let records = board_info::generate(
            sources
                .iter()
                .map(|(label, text)| (label.as_str(), text.as_str())),
            self.policy,
        )?;

        let summary = GenerationSummary {
            files: sources.len(),
            boards: records.len(),
        };

        Ok((board_info::render(&records, self.date), summary))
    }

    pub fn run(&self) -> Result<GenerationSummary> {
        let (header, summary) = self.render()?;
        write_atomic(&self.output, header.as_bytes())?;

        if summary.boards == 0 {
            tracing::warn!("no board found, {} only has the undef fallback", self.output.display());
        }
        tracing::info!(
            "Generation completed: {} boards from {} files into {}",
            summary.boards,
            summary.files,
            self.output.display()
        );

        Ok(summary)
    }
}

/// Write into a temporary file next to `path` and move it over `path`,
/// a failed run keeps the previous file.
///
/// The temporary file is created owner-only, so it takes the mode of the
/// file it replaces, or `HEADER_MODE` for a new one, before the rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let to_write_err = |source| BuildScriptError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(to_write_err)?;
    file.write_all(contents).map_err(to_write_err)?;
    file.flush().map_err(to_write_err)?;

    if let Some(permissions) = target_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .map_err(to_write_err)?;
    }
    file.persist(path).map_err(|e| to_write_err(e.error))?;

    Ok(())
}

#[cfg(unix)]
const HEADER_MODE: u32 = 0o644;

#[cfg(unix)]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    match fs::metadata(path) {
        Ok(metadata) => Some(metadata.permissions()),
        Err(_) => Some(fs::Permissions::from_mode(HEADER_MODE)),
    }
}

// new files are not owner-only outside unix
#[cfg(not(unix))]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path).ok().map(|metadata| metadata.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ESP8266: &str = "\
generic.name=Generic ESP8266 Module
generic.build.board=ESP8266_GENERIC
generic.build.mcu=esp8266
generic.build.variant=generic
";

    const ESP32: &str = "\
esp32.build.board=ESP32_DEV
esp32.build.mcu=esp32
esp32.build.variant=esp32
esp32s3.build.board=ESP32S3_DEV
esp32s3.build.mcu=esp32s3
";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_generate_header_file() {
        let dir = tempfile::tempdir().unwrap();
        let esp8266 = dir.path().join("esp8266.txt");
        let esp32 = dir.path().join("esp32.txt");
        let output = dir.path().join("Boardinfo.h");
        fs::write(&esp8266, ESP8266).unwrap();
        fs::write(&esp32, ESP32).unwrap();

        let summary = BoardInfoGenerator::new(vec![esp8266, esp32], output.clone(), date())
            .run()
            .unwrap();
        assert_eq!(summary, GenerationSummary { files: 2, boards: 2 });

        let header = fs::read_to_string(&output).unwrap();
        assert!(header.contains(" * @date 2024-03-09\n"));
        assert!(header.contains("#if defined(ARDUINO_ESP8266_GENERIC)\n"));
        assert!(header.contains("#elif defined(ARDUINO_ESP32_DEV)\n"));
        assert!(!header.contains("ESP32S3_DEV"));
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("boards.txt");
        let output = dir.path().join("Boardinfo.h");
        fs::write(&input, ESP32).unwrap();

        let generator = BoardInfoGenerator::new(vec![input], output.clone(), date());
        generator.run().unwrap();
        let first = fs::read(&output).unwrap();
        generator.run().unwrap();
        assert_eq!(first, fs::read(&output).unwrap());
    }

    #[test]
    fn test_missing_input_keeps_previous_header() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("Boardinfo.h");
        fs::write(&output, "previous").unwrap();

        let missing = dir.path().join("missing.txt");
        let err = BoardInfoGenerator::new(vec![missing.clone()], output.clone(), date())
            .run()
            .unwrap_err();

        match err {
            BuildScriptError::Read { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_duplicate_policy_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        let output = dir.path().join("Boardinfo.h");
        fs::write(&first, ESP32).unwrap();
        fs::write(
            &second,
            "esp32da.build.board=ESP32_DEV\nesp32da.build.mcu=esp32\nesp32da.build.variant=esp32da\n",
        )
        .unwrap();
        let inputs = vec![first, second];

        let err = BoardInfoGenerator::new(inputs.clone(), output.clone(), date())
            .run()
            .unwrap_err();
        assert!(matches!(err, BuildScriptError::BoardInfo(_)));
        assert!(!output.exists());

        let summary = BoardInfoGenerator::new(inputs, output, date())
            .with_policy(DuplicatePolicy::FirstWins)
            .run()
            .unwrap();
        assert_eq!(summary.boards, 1);
    }

    #[test]
    fn test_shared_board_id_with_default_policy() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("boards.txt");
        let output = dir.path().join("Boardinfo.h");
        fs::write(
            &input,
            "esp32.build.board=ESP32_DEV\n\
             esp32.build.mcu=esp32\n\
             esp32.build.variant=esp32\n\
             esp32wrover.build.board=ESP32_DEV\n\
             esp32wrover.build.mcu=esp32\n\
             esp32wrover.build.variant=esp32\n",
        )
        .unwrap();

        let summary = BoardInfoGenerator::new(vec![input], output.clone(), date())
            .run()
            .unwrap();
        assert_eq!(summary, GenerationSummary { files: 1, boards: 1 });

        let header = fs::read_to_string(&output).unwrap();
        assert_eq!(header.matches("defined(ARDUINO_ESP32_DEV)").count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_header_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("boards.txt");
        let output = dir.path().join("Boardinfo.h");
        fs::write(&input, ESP32).unwrap();

        let generator = BoardInfoGenerator::new(vec![input], output.clone(), date());
        generator.run().unwrap();
        let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, HEADER_MODE);

        // an existing header keeps its mode
        fs::set_permissions(&output, fs::Permissions::from_mode(0o664)).unwrap();
        generator.run().unwrap();
        let mode = fs::metadata(&output).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("boards.txt");
        fs::write(&input, ESP8266).unwrap();
        let output = dir.path().join("no_such_dir").join("Boardinfo.h");

        let err = BoardInfoGenerator::new(vec![input], output.clone(), date())
            .run()
            .unwrap_err();
        match err {
            BuildScriptError::Write { path, .. } => assert_eq!(path, output),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
