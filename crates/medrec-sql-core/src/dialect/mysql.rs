//! MySQL dialect.

use super::Dialect;

/// `%s` markers, the format style of the MySQL connector.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _position: usize) -> String {
        String::from("%s")
    }
}
