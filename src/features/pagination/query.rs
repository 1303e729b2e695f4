/// Filters that contribute independent query constraints to a listing URL
pub trait QueryFilters {
    /// Present, non-empty values only
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Ordered, URL-encoded query string builder.
///
/// Blank optional values are skipped so an "All" choice never reaches the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    pairs: Vec<(&'static str, String)>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn optional<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            let value = value.to_string();
            if !value.trim().is_empty() {
                self.pairs.push((key, value));
            }
        }
        self
    }

    pub fn filters<F: QueryFilters + ?Sized>(mut self, filters: &F) -> Self {
        for (key, value) in filters.query_pairs() {
            self = self.optional(key, Some(value));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn build(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `path?query`, or the bare path when nothing was added
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, self.build())
        }
    }
}
