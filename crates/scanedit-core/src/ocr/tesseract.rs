//! OCR through the `tesseract` command-line tool.
//!
//! The page is written to a temporary PNG and recognized with
//! `tesseract <file> stdout -l <lang> --psm <n> --oem <n>`.

use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, instrument, warn};

use super::{OcrConfig, OcrEngine, OcrError};
use crate::encode::encode_png;
use crate::raster::ScanImage;

const DEFAULT_BINARY: &str = "tesseract";

/// OCR engine backed by the tesseract executable.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    config: OcrConfig,
}

impl TesseractCli {
    /// Create an engine after validating `config`.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for out-of-range settings, `BinaryNotFound` when an
    /// explicit `tesseract_path` is not an existing file.
    pub fn new(config: OcrConfig) -> Result<Self, OcrError> {
        config.validate()?;
        if let Some(path) = &config.tesseract_path {
            if !path.is_file() {
                return Err(OcrError::BinaryNotFound(path.display().to_string()));
            }
        }
        Ok(Self { config })
    }

    /// Engine configured from the environment (`TESSERACT`).
    pub fn from_env() -> Result<Self, OcrError> {
        Self::new(OcrConfig::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &OcrConfig {
        &self.config
    }

    /// Executable that will be run.
    pub fn binary(&self) -> PathBuf {
        self.config
            .tesseract_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BINARY))
    }

    /// Command-line arguments for recognizing `input`.
    pub fn command_args(&self, input: &Path) -> Vec<OsString> {
        vec![
            input.as_os_str().to_owned(),
            "stdout".into(),
            "-l".into(),
            self.config.language.clone().into(),
            "--psm".into(),
            self.config.psm.to_string().into(),
            "--oem".into(),
            self.config.oem.to_string().into(),
        ]
    }
}

impl OcrEngine for TesseractCli {
    #[instrument(skip(self, image), fields(width = image.width, height = image.height))]
    fn recognize(&self, image: &ScanImage) -> Result<String, OcrError> {
        let png = encode_png(image)?;

        let mut file = tempfile::Builder::new()
            .prefix("scanedit-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::Io(e.to_string()))?;
        file.write_all(&png)
            .and_then(|()| file.flush())
            .map_err(|e| OcrError::Io(e.to_string()))?;
        // Close our handle; the file is removed when `input` drops
        let input = file.into_temp_path();

        let binary = self.binary();
        info!(binary = %binary.display(), language = %self.config.language, "OCR started");

        let output = Command::new(&binary)
            .args(self.command_args(&input))
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    OcrError::BinaryNotFound(binary.display().to_string())
                }
                _ => OcrError::Io(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(code = ?output.status.code(), %stderr, "OCR engine failed");
            return Err(OcrError::EngineFailed {
                code: output.status.code(),
                stderr,
            });
        }

        let text =
            String::from_utf8(output.stdout).map_err(|e| OcrError::InvalidOutput(e.to_string()))?;
        info!(chars = text.chars().count(), "OCR finished");
        Ok(text)
    }
}
