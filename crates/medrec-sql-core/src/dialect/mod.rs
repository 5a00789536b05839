//! SQL dialect support.
//!
//! Drivers disagree on how positional bind markers are written. A dialect
//! decides the marker used by batch `INSERT` templates.

mod generic;
mod mysql;
mod postgres;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;

/// Trait for dialect-specific statement text.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the bind marker for the 1-based parameter `position`.
    fn placeholder(&self, _position: usize) -> String {
        String::from("?")
    }

    /// Returns `count` markers joined by commas.
    fn placeholders(&self, count: usize) -> String {
        (1..=count)
            .map(|position| self.placeholder(position))
            .collect::<Vec<_>>()
            .join(",")
    }
}
