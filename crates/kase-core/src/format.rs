//! Display-name formatting configuration.

use std::borrow::Cow;

/// Separators used when joining labels and values into a display name.
///
/// The default produces names like `a1: 1 | a2: x`. No escaping is
/// applied: if a value's string form contains the separator, the name is
/// still produced verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NameFormat {
    /// Placed between a slot's label and its value. Default: `": "`.
    pub label_delimiter: Cow<'static, str>,
    /// Placed between consecutive slots. Default: `" | "`.
    pub separator: Cow<'static, str>,
}

impl NameFormat {
    /// Default label delimiter.
    pub const DEFAULT_LABEL_DELIMITER: &'static str = ": ";
    /// Default slot separator.
    pub const DEFAULT_SEPARATOR: &'static str = " | ";

    /// Replace the label delimiter.
    pub fn label_delimiter(mut self, delimiter: impl Into<Cow<'static, str>>) -> Self {
        self.label_delimiter = delimiter.into();
        self
    }

    /// Replace the slot separator.
    pub fn separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Join `(label, rendered value)` pairs in slot order.
    pub fn join<'a, I>(&self, slots: I) -> String
    where
        I: IntoIterator<Item = (&'a str, String)>,
    {
        let mut out = String::new();
        for (i, (label, value)) in slots.into_iter().enumerate() {
            if i > 0 {
                out.push_str(&self.separator);
            }
            out.push_str(label);
            out.push_str(&self.label_delimiter);
            out.push_str(&value);
        }
        out
    }
}

impl Default for NameFormat {
    fn default() -> Self {
        Self {
            label_delimiter: Cow::Borrowed(Self::DEFAULT_LABEL_DELIMITER),
            separator: Cow::Borrowed(Self::DEFAULT_SEPARATOR),
        }
    }
}
