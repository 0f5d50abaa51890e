pub mod document;
pub mod placeholder;
