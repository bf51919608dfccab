pub mod errors;
pub mod settings;
