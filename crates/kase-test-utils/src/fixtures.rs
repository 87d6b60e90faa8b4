//! Value fixtures that know their own labels.
//!
//! - [`Fruit`]: labels itself `"fruit"` through [`HasOwnLabel`].
//! - [`Color`]: labels itself with its variant kind.
//! - [`fixture_labels`]: a strategy resolving both, for `with_own_labels`.

use kase_core::{HasOwnLabel, LabelStrategy};
use std::any::Any;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fruit {
    Apple,
    Pear,
    Plum,
}

impl Fruit {
    pub const ALL: [Fruit; 3] = [Fruit::Apple, Fruit::Pear, Fruit::Plum];
}

impl fmt::Display for Fruit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Fruit::Apple => "apple",
            Fruit::Pear => "pear",
            Fruit::Plum => "plum",
        };
        f.write_str(name)
    }
}

impl HasOwnLabel for Fruit {
    fn own_label(&self) -> String {
        "fruit".to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Rgb(u8, u8, u8),
    Named(&'static str),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Color::Named(name) => f.write_str(name),
        }
    }
}

impl HasOwnLabel for Color {
    fn own_label(&self) -> String {
        match self {
            Color::Rgb(..) => "rgb".to_string(),
            Color::Named(_) => "color".to_string(),
        }
    }
}

/// Resolves own labels of [`Fruit`] and [`Color`]; other values keep
/// their current label.
pub fn fixture_labels() -> impl LabelStrategy + Clone + Send + Sync + 'static {
    |value: &dyn Any| {
        if let Some(fruit) = value.downcast_ref::<Fruit>() {
            return Some(fruit.own_label());
        }
        value.downcast_ref::<Color>().map(HasOwnLabel::own_label)
    }
}
