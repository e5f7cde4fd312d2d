pub mod patch;
pub mod validation;
