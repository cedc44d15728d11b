pub mod course;
pub mod document;
pub mod document_file;
pub mod document_section;
pub mod exam;
pub mod lecturer;
pub mod university;

pub use self::course as courses;
pub use self::document as documents;
pub use self::document_file as document_files;
pub use self::document_section as document_sections;
pub use self::exam as exams;
pub use self::lecturer as lecturers;
pub use self::university as universities;
