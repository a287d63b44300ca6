//! Scalar payloads stored in leaf nodes
//!
//! A leaf holds exactly one [`Scalar`]. Its [`ScalarType`] is derived from the
//! variant at assignment time and is never re-derived from string content, so
//! `"8080"` stays a string and `8080` stays an integer through every export and
//! save/load cycle.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::num::TryFromIntError;

// =============================================================================
// Scalar Type Tag
// =============================================================================

/// Kind of scalar held by a leaf node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

impl ScalarType {
    /// Lowercase name used in messages and serialized output
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Float => "float",
            ScalarType::Boolean => "boolean",
            ScalarType::Null => "null",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Scalar
// =============================================================================

/// A typed leaf value
///
/// Integers up to 32 bits convert with `From`. `u64`, `usize`, `isize` and
/// the 128-bit types go through `TryFrom`, since they can exceed `i64`:
///
/// ```rust
/// use configx::{ConfigTree, Scalar};
///
/// let hosts = vec!["a", "b", "c"];
/// let mut tree = ConfigTree::new();
/// tree.set("cluster.size", Scalar::try_from(hosts.len())?)?;
///
/// assert!(Scalar::try_from(u64::MAX).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl Scalar {
    /// The type tag for this scalar
    #[must_use]
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::String(_) => ScalarType::String,
            Scalar::Integer(_) => ScalarType::Integer,
            Scalar::Float(_) => ScalarType::Float,
            Scalar::Boolean(_) => ScalarType::Boolean,
            Scalar::Null => ScalarType::Null,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Project into the mapping form.
    ///
    /// Non-finite floats have no JSON number representation and project to
    /// `null`; [`Scalar::check`] keeps them out of the tree in the first place.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Integer(i) => Value::Number((*i).into()),
            Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Scalar::Boolean(b) => Value::Bool(*b),
            Scalar::Null => Value::Null,
        }
    }

    /// Infer a scalar from a JSON value.
    ///
    /// Booleans are matched before numbers, and numbers are classified as
    /// integer before float. Arrays and objects are not scalars.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the value is not a representable scalar.
    pub fn from_value(value: &Value) -> std::result::Result<Self, String> {
        match value {
            Value::Bool(b) => Ok(Scalar::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Scalar::Integer(i))
                } else if n.is_u64() {
                    Err(format!("integer {n} exceeds the signed 64-bit range"))
                } else {
                    n.as_f64()
                        .map(Scalar::Float)
                        .ok_or_else(|| format!("number {n} is not representable"))
                }
            }
            Value::String(s) => Ok(Scalar::String(s.clone())),
            Value::Null => Ok(Scalar::Null),
            Value::Array(_) => Err("arrays are not supported as scalar values".into()),
            Value::Object(_) => Err("a mapping is not a scalar value".into()),
        }
    }

    /// Reject scalars that cannot survive a round trip through the mapping form.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        match self {
            Scalar::Float(f) if !f.is_finite() => {
                Err(format!("non-finite float {f} cannot be stored"))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x:?}"),
            Scalar::Boolean(b) => write!(f, "{b}"),
            Scalar::Null => f.write_str("null"),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        scalar.to_value()
    }
}

// =============================================================================
// Conversions from Rust natives
// =============================================================================

macro_rules! scalar_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(v: $t) -> Self {
                    Scalar::Integer(i64::from(v))
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

// Wider or platform-sized integers may not fit in an i64
macro_rules! scalar_try_from_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl TryFrom<$t> for Scalar {
                type Error = TryFromIntError;

                fn try_from(v: $t) -> std::result::Result<Self, Self::Error> {
                    i64::try_from(v).map(Scalar::Integer)
                }
            }
        )*
    };
}

scalar_try_from_int!(u64, usize, isize, i128, u128);

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Scalar::Float(f64::from(v))
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Boolean(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(v: Option<T>) -> Self {
        v.map_or(Scalar::Null, Into::into)
    }
}

// =============================================================================
// Tests
// =============================================================================
