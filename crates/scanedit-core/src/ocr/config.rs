//! OCR engine settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::OcrError;

/// Environment variable holding the path to the tesseract executable.
pub const TESSERACT_ENV: &str = "TESSERACT";

/// Highest page segmentation mode tesseract accepts.
const MAX_PSM: u8 = 13;
/// Highest engine mode tesseract accepts.
const MAX_OEM: u8 = 3;

/// Settings passed to the OCR engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit path to the executable. `None` searches `PATH`.
    pub tesseract_path: Option<PathBuf>,
    /// Tesseract language code(s), e.g. `"eng"` or `"eng+deu"`.
    pub language: String,
    /// Page segmentation mode (`--psm`), 0-13. 3 = fully automatic.
    pub psm: u8,
    /// OCR engine mode (`--oem`), 0-3. 1 = LSTM only.
    pub oem: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            language: "eng".to_string(),
            psm: 3,
            oem: 1,
        }
    }
}

impl OcrConfig {
    /// Defaults, with the executable path taken from `TESSERACT` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let tesseract_path = lookup(TESSERACT_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self {
            tesseract_path,
            ..Self::default()
        }
    }

    /// Set the language code(s).
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = psm;
        self
    }

    /// Check the values are ones tesseract accepts.
    pub fn validate(&self) -> Result<(), OcrError> {
        if self.language.trim().is_empty() {
            return Err(OcrError::InvalidConfig("language must not be empty".to_string()));
        }
        if self.psm > MAX_PSM {
            return Err(OcrError::InvalidConfig(format!(
                "psm must be 0-{}, got {}",
                MAX_PSM, self.psm
            )));
        }
        if self.oem > MAX_OEM {
            return Err(OcrError::InvalidConfig(format!(
                "oem must be 0-{}, got {}",
                MAX_OEM, self.oem
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OcrConfig::default();
        assert_eq!(config.tesseract_path, None);
        assert_eq!(config.language, "eng");
        assert_eq!((config.psm, config.oem), (3, 1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_path() {
        let config = OcrConfig::from_lookup(|key| {
            (key == TESSERACT_ENV).then(|| "/opt/tesseract/bin/tesseract".to_string())
        });
        assert_eq!(
            config.tesseract_path,
            Some(PathBuf::from("/opt/tesseract/bin/tesseract"))
        );
        assert_eq!(config.language, "eng");
    }

    #[test]
    fn test_from_lookup_ignores_blank() {
        let config = OcrConfig::from_lookup(|_| Some("  ".to_string()));
        assert_eq!(config.tesseract_path, None);
    }

    #[test]
    fn test_validate_ranges() {
        assert!(OcrConfig::default().with_psm(13).validate().is_ok());
        assert!(matches!(
            OcrConfig::default().with_psm(14).validate(),
            Err(OcrError::InvalidConfig(_))
        ));

        let mut config = OcrConfig::default();
        config.oem = 4;
        assert!(config.validate().is_err());

        assert!(OcrConfig::default().with_language("").validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: OcrConfig = serde_json::from_str(r#"{"language": "deu", "psm": 6}"#).unwrap();
        assert_eq!(config.language, "deu");
        assert_eq!(config.psm, 6);
        assert_eq!(config.oem, 1);
        assert_eq!(config.tesseract_path, None);
    }
}
