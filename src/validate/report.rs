//! Validation report types and formatting.

use std::collections::BTreeMap;
use std::fmt;

use owo_colors::OwoColorize;

use crate::utils::plural::plural_s;

/// Category of a validation check, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Check {
    Images,
    Integrity,
    References,
    Uniqueness,
    Stylesheet,
}

impl Check {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Integrity => "integrity",
            Self::References => "references",
            Self::Uniqueness => "uniqueness",
            Self::Stylesheet => "stylesheet",
        }
    }
}

/// All problems found by one validation pass, grouped by check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<Check, Vec<String>>,
}

impl ValidationReport {
    pub fn add(&mut self, check: Check, message: impl Into<String>) {
        self.errors.entry(check).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    /// Messages of one check, in the order they were found.
    #[cfg(test)]
    pub fn messages(&self, check: Check) -> &[String] {
        self.errors.get(&check).map(Vec::as_slice).unwrap_or_default()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.error_count();
        if total == 0 {
            return write!(f, "{}", "all checks passed".green());
        }

        write!(
            f,
            "validation {} {} {}",
            "found".dimmed(),
            total.to_string().red().bold(),
            format!("error{}", plural_s(total)).dimmed()
        )?;

        for (check, messages) in &self.errors {
            write!(
                f,
                "\n{} {}",
                check.name().red().bold(),
                format!("({} error{})", messages.len(), plural_s(messages.len())).dimmed()
            )?;
            for message in messages {
                write!(f, "\n{} {}", "→".red(), message)?;
            }
        }
        Ok(())
    }
}
