//! Declarative field validation.
//!
//! A type opts in by implementing [`Validate`], normally through
//! `#[derive(Validate)]` from `bills-macros`. The implementation exposes a
//! static table of [`FieldDescriptor`]s and an indexed accessor for the field
//! values, so the [`Validator`] never needs runtime reflection.
//!
//! # Rules
//!
//! | Rule | Passes when |
//! |---|---|
//! | `required` | the value is not its zero value (`""`, `0`, `false`, `None`) |
//! | `email` | text looks like an e-mail address |
//! | `number` | the value is numeric, or text that parses as a number |
//! | `gte = N` | number `>= N`, or text with at least `N` characters |
//! | `lte = N` | number `<= N`, or text with at most `N` characters |
//! | `oneof = "A B"` | the value equals one of the whitespace-separated options |
//!
//! Each field reports only its first failing rule. Every field is checked.
//!
//! # Example
//!
//! ```
//! use bills_core::validate::{FieldDescriptor, FieldValue, Rule, Validate, Validator};
//!
//! struct Payment {
//!     currency: String,
//! }
//!
//! impl Validate for Payment {
//!     fn fields() -> &'static [FieldDescriptor] {
//!         const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::new(
//!             "Currency",
//!             &[Rule::Required, Rule::OneOf("EUR")],
//!         )];
//!         FIELDS
//!     }
//!
//!     fn field(&self, index: usize) -> Option<&dyn FieldValue> {
//!         match index {
//!             0 => Some(&self.currency),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let validator = Validator::new();
//! let details = validator.validate(&Payment { currency: "DDD".into() });
//! assert_eq!(details.len(), 1);
//! assert_eq!(details[0].tag, "oneof");
//! assert_eq!(details[0].param, "EUR");
//! ```

use crate::problem::{split_quoted, ValidationDetail};
use regex::Regex;
use std::cmp::Ordering;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$";

/// A single validation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Value must not be its zero value.
    Required,
    /// Text must be an e-mail address.
    Email,
    /// Value must be numeric.
    Number,
    /// Lower bound (inclusive).
    Gte(&'static str),
    /// Upper bound (inclusive).
    Lte(&'static str),
    /// Allowed values, whitespace separated, optionally quoted.
    OneOf(&'static str),
}

impl Rule {
    /// The rule tag reported in a [`ValidationDetail`].
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::Number => "number",
            Self::Gte(_) => "gte",
            Self::Lte(_) => "lte",
            Self::OneOf(_) => "oneof",
        }
    }

    /// The rule parameter, empty for parameterless rules.
    #[must_use]
    pub const fn param(&self) -> &'static str {
        match self {
            Self::Gte(param) | Self::Lte(param) | Self::OneOf(param) => param,
            Self::Required | Self::Email | Self::Number => "",
        }
    }
}

/// Static description of one validated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Public field name used in messages.
    pub name: &'static str,
    /// Rules applied in order.
    pub rules: &'static [Rule],
}

impl FieldDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(name: &'static str, rules: &'static [Rule]) -> Self {
        Self { name, rules }
    }
}

/// A borrowed view of a field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    /// Text value.
    Text(&'a str),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Missing optional value.
    Absent,
}

impl FieldRef<'_> {
    /// Returns `true` for the zero value of the underlying type.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Number(number) => *number == 0.0,
            Self::Bool(flag) => !flag,
            Self::Absent => true,
        }
    }
}

/// Types that can appear as validated fields.
pub trait FieldValue {
    /// Borrows the value for rule evaluation.
    fn as_field(&self) -> FieldRef<'_>;
}

impl FieldValue for String {
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Text(self)
    }
}

impl FieldValue for &str {
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Text(self)
    }
}

impl FieldValue for bool {
    fn as_field(&self) -> FieldRef<'_> {
        FieldRef::Bool(*self)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn as_field(&self) -> FieldRef<'_> {
        self.as_ref().map_or(FieldRef::Absent, FieldValue::as_field)
    }
}

macro_rules! numeric_field {
    ($($ty:ty),*) => {
        $(
            impl FieldValue for $ty {
                #[allow(clippy::cast_lossless, clippy::cast_precision_loss)]
                fn as_field(&self) -> FieldRef<'_> {
                    FieldRef::Number(*self as f64)
                }
            }
        )*
    };
}

numeric_field!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Types with a static validation table.
pub trait Validate {
    /// The validated fields, in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// The value of the field at `index` in [`Validate::fields`].
    fn field(&self, index: usize) -> Option<&dyn FieldValue>;
}

/// Evaluates [`Validate`] tables.
///
/// Holds no per-call state; build one at startup and share it.
#[derive(Debug, Clone)]
pub struct Validator {
    email: Regex,
}

impl Validator {
    /// Creates a validator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            email: Regex::new(EMAIL_PATTERN).expect("e-mail pattern is valid"),
        }
    }

    /// Returns one detail per field whose rules are not all satisfied.
    pub fn validate<T: Validate>(&self, value: &T) -> Vec<ValidationDetail> {
        T::fields()
            .iter()
            .enumerate()
            .filter_map(|(index, descriptor)| {
                let field = value
                    .field(index)
                    .map_or(FieldRef::Absent, |field| field.as_field());
                descriptor
                    .rules
                    .iter()
                    .find(|rule| !self.satisfies(rule, field))
                    .map(|rule| ValidationDetail::new(rule.tag(), descriptor.name, rule.param()))
            })
            .collect()
    }

    /// Checks a single rule against a value.
    pub fn satisfies(&self, rule: &Rule, value: FieldRef<'_>) -> bool {
        match (rule, value) {
            (Rule::Required, value) => !value.is_zero(),
            (_, FieldRef::Absent) => true,
            (Rule::Email, FieldRef::Text(text)) => self.email.is_match(text),
            (Rule::Number, FieldRef::Text(text)) => {
                text.trim().parse::<f64>().is_ok_and(f64::is_finite)
            }
            (Rule::Number, FieldRef::Number(number)) => number.is_finite(),
            (Rule::Email | Rule::Number, _) => false,
            (Rule::Gte(bound), value) => {
                compare(value, bound).is_some_and(|order| order != Ordering::Less)
            }
            (Rule::Lte(bound), value) => {
                compare(value, bound).is_some_and(|order| order != Ordering::Greater)
            }
            (Rule::OneOf(options), value) => one_of(options, value),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(value: FieldRef<'_>, bound: &str) -> Option<Ordering> {
    let bound = bound.trim().parse::<f64>().ok()?;
    let measured = match value {
        FieldRef::Text(text) => text.chars().count() as f64,
        FieldRef::Number(number) => number,
        FieldRef::Bool(_) | FieldRef::Absent => return None,
    };
    measured.partial_cmp(&bound)
}

#[allow(clippy::float_cmp)]
fn one_of(options: &str, value: FieldRef<'_>) -> bool {
    let options: Vec<String> = split_quoted(options)
        .into_iter()
        .map(|option| option.trim_matches(['\'', '"']).to_string())
        .collect();
    match value {
        FieldRef::Text(text) => options.iter().any(|option| option == text),
        FieldRef::Number(number) => options
            .iter()
            .any(|option| option.parse::<f64>().is_ok_and(|parsed| parsed == number)),
        FieldRef::Bool(flag) => options
            .iter()
            .any(|option| option.parse::<bool>().is_ok_and(|parsed| parsed == flag)),
        FieldRef::Absent => true,
    }
}
