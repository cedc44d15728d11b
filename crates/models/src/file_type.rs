use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kinds of files the service accepts for storage.
///
/// Classification happens once, at upload time, from the MIME type the client
/// declared for the part. Anything outside these four kinds is dropped from
/// the submission without failing it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Pdf,
    Docx,
    Pptx,
    Zip,
}

impl FileType {
    /// Classifies a MIME type into a supported file kind.
    ///
    /// Returns `None` for unrecognized types; callers skip those files.
    pub fn from_mime_type(mime_type: &str) -> Option<Self> {
        match mime_type {
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                Some(Self::Pptx)
            }
            "application/zip" | "application/x-zip-compressed" => Some(Self::Zip),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Pptx => "PPTX",
            Self::Zip => "ZIP",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_classify_supported_mime_types() {
        assert_eq!(FileType::from_mime_type("application/pdf"), Some(FileType::Pdf));
        assert_eq!(
            FileType::from_mime_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(FileType::Docx)
        );
        assert_eq!(
            FileType::from_mime_type(
                "application/vnd.openxmlformats-officedocument.presentationml.presentation"
            ),
            Some(FileType::Pptx)
        );
        assert_eq!(FileType::from_mime_type("application/zip"), Some(FileType::Zip));
        assert_eq!(
            FileType::from_mime_type("application/x-zip-compressed"),
            Some(FileType::Zip)
        );
    }

    #[test]
    fn test_unrecognized_mime_types_are_dropped() {
        assert_eq!(FileType::from_mime_type("image/png"), None);
        assert_eq!(FileType::from_mime_type("text/plain"), None);
        assert_eq!(FileType::from_mime_type("application/octet-stream"), None);
        assert_eq!(FileType::from_mime_type(""), None);
        // Classification is exact, not prefix-based
        assert_eq!(FileType::from_mime_type("application/pdf; charset=utf-8"), None);
    }

    #[test]
    fn test_display_and_parse_round_trip() {
        assert_eq!(FileType::Pdf.to_string(), "PDF");
        assert_eq!(FileType::Docx.as_str(), "DOCX");
        assert_eq!(FileType::from_str("PPTX"), Ok(FileType::Pptx));
        assert_eq!(FileType::from_str("ZIP"), Ok(FileType::Zip));
        assert!(FileType::from_str("EXE").is_err());
    }
}
