pub mod admin;
pub mod employer;
pub mod talent;
pub(crate) mod validation;

pub use validation::{is_web_url, ValidationError};

#[cfg(test)]
mod tests;
