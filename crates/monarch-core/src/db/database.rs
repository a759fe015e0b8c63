///
/// SqlFeature
///
/// SQL constructs whose availability varies across dialects.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SqlFeature {
    InClause,
}

///
/// Database
///
/// Dialect capability descriptor. The reader consults it for SQL-shape
/// decisions only (batch-key clause form and size); it carries no per-call
/// state. Permissive by default.
///

#[derive(Clone, Debug)]
pub struct Database {
    name: String,
    in_clause: bool,
    max_in_parameters: Option<usize>,
}

impl Database {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_clause: true,
            max_in_parameters: None,
        }
    }

    #[must_use]
    pub const fn without_in_clause(mut self) -> Self {
        self.in_clause = false;
        self
    }

    #[must_use]
    pub const fn with_max_in_parameters(mut self, limit: usize) -> Self {
        self.max_in_parameters = Some(limit);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn supports(&self, feature: SqlFeature) -> bool {
        match feature {
            SqlFeature::InClause => self.in_clause,
        }
    }

    /// Upper bound on positional parameters inside one `IN (...)` list,
    /// when the dialect has one.
    #[must_use]
    pub const fn max_in_parameters(&self) -> Option<usize> {
        self.max_in_parameters
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new("generic")
    }
}
