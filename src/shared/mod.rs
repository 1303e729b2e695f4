pub mod constants;
pub mod formatters;
pub mod types;
pub mod validation;

#[cfg(test)]
pub mod test_helpers;
