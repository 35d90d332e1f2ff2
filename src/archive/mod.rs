pub mod error;
pub mod obfuscator;
pub mod observation;
pub mod store;
