pub mod document;
pub mod exam;
pub mod university;
