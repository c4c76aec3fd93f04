//! Template types for typed variable injection.

use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `__NAME__` placeholder with an upper-case, underscore-separated name.
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([A-Z]+(?:_[A-Z]+)*)__").expect("static regex"));

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

/// Replace every placeholder of `content` in a single pass.
///
/// Substituted values are never scanned again. Names `value` does not know
/// are left as they are.
pub fn fill_placeholders(content: &str, value: impl Fn(&str) -> Option<String>) -> String {
    PLACEHOLDER
        .replace_all(content, |caps: &Captures| {
            value(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}
