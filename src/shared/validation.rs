use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Regex for optional phone numbers: digits with spaces, dashes, parentheses and a leading plus
    /// - Valid: "+1 555 123 4567", "(555) 123-4567", "5551234567"
    /// - Invalid: "call me", "555#123"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9()\- ]{7,20}$").unwrap();
}

/// Flatten `validator` errors into one comma-joined message, ordered by field name
pub fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
