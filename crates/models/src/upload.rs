use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Which property of a section a multipart field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionField {
    Title,
    Files,
}

/// Parses a bracket-indexed multipart key such as `sections[2][files]`.
///
/// Returns the section index and the addressed property, or `None` for keys
/// that do not follow the notation (those belong to the flat document-level
/// fields and are handled elsewhere).
pub fn parse_section_key(key: &str) -> Option<(usize, SectionField)> {
    let rest = key.strip_prefix("sections[")?;
    let close = rest.find(']')?;
    let index: usize = rest[..close].parse().ok()?;

    let field = match &rest[close + 1..] {
        "[title]" => SectionField::Title,
        "[files]" => SectionField::Files,
        _ => return None,
    };

    Some((index, field))
}

/// A file attachment pulled out of the multipart stream.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// File size in whole kilobytes, rounded to nearest.
    pub fn size_kb(&self) -> i32 {
        (self.data.len() as f64 / 1024.0).round() as i32
    }
}

/// A fully reconstructed section, ready for persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionUpload {
    pub title: String,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Default)]
struct SectionDraft {
    title: Option<String>,
    files: Vec<UploadedFile>,
}

/// Why a reconstructed submission was rejected before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFormError {
    /// The submission carried no section fields at all.
    NoSections,
    /// Section indices did not form a contiguous 0..n range.
    NonContiguousIndex(usize),
    /// A section arrived without a (non-empty) title field.
    MissingTitle(usize),
    /// A section arrived without any file attachments.
    NoFiles(usize),
}

impl Display for UploadFormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::NoSections => {
                write!(f, "Missing required fields, or a section is missing a title or files.")
            }
            Self::NonContiguousIndex(index) => {
                write!(f, "Section indices are not contiguous (gap before index {index}).")
            }
            Self::MissingTitle(index) => {
                write!(f, "Section {index} is missing a title.")
            }
            Self::NoFiles(index) => {
                write!(f, "Section {index} has no files.")
            }
        }
    }
}

/// Accumulates section fields as they stream in, in whatever order the client
/// interleaved them, and validates the result as a whole.
///
/// Fields sharing an index belong to the same section. Ordering of the output
/// follows the numeric index, not arrival order.
#[derive(Debug, Default)]
pub struct SectionsBuilder {
    drafts: BTreeMap<usize, SectionDraft>,
}

impl SectionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_title(&mut self, index: usize, title: String) {
        self.drafts.entry(index).or_default().title = Some(title);
    }

    pub fn add_file(&mut self, index: usize, file: UploadedFile) {
        self.drafts.entry(index).or_default().files.push(file);
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Validates contiguity and completeness, producing the ordered sections.
    pub fn into_sections(self) -> Result<Vec<SectionUpload>, UploadFormError> {
        if self.drafts.is_empty() {
            return Err(UploadFormError::NoSections);
        }

        let mut sections = Vec::with_capacity(self.drafts.len());
        for (expected, (index, draft)) in self.drafts.into_iter().enumerate() {
            if index != expected {
                return Err(UploadFormError::NonContiguousIndex(expected));
            }

            let title = match draft.title {
                Some(title) if !title.trim().is_empty() => title,
                _ => return Err(UploadFormError::MissingTitle(index)),
            };

            if draft.files.is_empty() {
                return Err(UploadFormError::NoFiles(index));
            }

            sections.push(SectionUpload {
                title,
                files: draft.files,
            });
        }

        Ok(sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            name: name.to_string(),
            content_type: "application/pdf".to_string(),
            data: vec![0; 2048],
        }
    }

    #[test]
    fn test_parse_section_key() {
        assert_eq!(parse_section_key("sections[0][title]"), Some((0, SectionField::Title)));
        assert_eq!(parse_section_key("sections[12][files]"), Some((12, SectionField::Files)));
    }

    #[test]
    fn test_parse_section_key_rejects_other_fields() {
        assert_eq!(parse_section_key("title"), None);
        assert_eq!(parse_section_key("sections[0][name]"), None);
        assert_eq!(parse_section_key("sections[][title]"), None);
        assert_eq!(parse_section_key("sections[x][files]"), None);
        assert_eq!(parse_section_key("section[0][title]"), None);
    }

    #[test]
    fn test_fields_sharing_an_index_form_one_section() {
        let mut builder = SectionsBuilder::new();
        builder.add_file(1, file("b.pdf"));
        builder.set_title(0, "Exams".to_string());
        builder.set_title(1, "Notes".to_string());
        builder.add_file(0, file("a.pdf"));
        builder.add_file(1, file("c.pdf"));

        let sections = builder.into_sections().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Exams");
        assert_eq!(sections[0].files.len(), 1);
        assert_eq!(sections[1].title, "Notes");
        assert_eq!(sections[1].files.len(), 2);
    }

    #[test]
    fn test_empty_submission_is_rejected() {
        let builder = SectionsBuilder::new();
        assert_eq!(builder.into_sections(), Err(UploadFormError::NoSections));
    }

    #[test]
    fn test_index_gap_is_rejected() {
        let mut builder = SectionsBuilder::new();
        builder.set_title(0, "Exams".to_string());
        builder.add_file(0, file("a.pdf"));
        builder.set_title(2, "Notes".to_string());
        builder.add_file(2, file("b.pdf"));

        assert_eq!(builder.into_sections(), Err(UploadFormError::NonContiguousIndex(1)));
    }

    #[test]
    fn test_missing_or_blank_title_is_rejected() {
        let mut builder = SectionsBuilder::new();
        builder.add_file(0, file("a.pdf"));
        assert_eq!(builder.into_sections(), Err(UploadFormError::MissingTitle(0)));

        let mut builder = SectionsBuilder::new();
        builder.set_title(0, "   ".to_string());
        builder.add_file(0, file("a.pdf"));
        assert_eq!(builder.into_sections(), Err(UploadFormError::MissingTitle(0)));
    }

    #[test]
    fn test_section_without_files_is_rejected() {
        let mut builder = SectionsBuilder::new();
        builder.set_title(0, "Exams".to_string());
        assert_eq!(builder.into_sections(), Err(UploadFormError::NoFiles(0)));
    }

    #[test]
    fn test_size_kb_rounds_to_nearest() {
        let mut f = file("a.pdf");
        assert_eq!(f.size_kb(), 2);

        f.data = vec![0; 1536]; // exactly 1.5 KB rounds up
        assert_eq!(f.size_kb(), 2);

        f.data = vec![0; 100];
        assert_eq!(f.size_kb(), 0);
    }
}
