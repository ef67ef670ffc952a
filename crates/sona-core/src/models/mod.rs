pub mod result;
pub mod severity;
