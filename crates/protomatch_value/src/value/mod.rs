//! Runtime values for schema-defined messages.
//!
//! # Shape
//!
//! A `Value` is a scalar, an ordered sequence, a key-unique mapping, or a
//! record. Records carry their schema and read unset fields as the field's
//! declared default (see [`RecordValue`]).
//!
//! # Heap Enforcement
//!
//! Heap payloads are wrapped in `Heap<T>`, whose constructor is private to
//! this module, so every heap value goes through a factory method:
//!
//! ```text
//! let s = Value::string("hello");                       // OK
//! let xs = Value::sequence(vec![Value::Int(1)]);        // OK
//! let m = Value::mapping([(MapKey::from("one"), Value::Int(1))]);
//! ```
//!
//! # Equality
//!
//! `equals` (and `PartialEq`, which delegates to it) is structural: records
//! compare by type and by every declared field after defaulting, so a field
//! explicitly set to its default equals the same field left unset. `Hash` is
//! consistent with that equality.

mod heap;
mod record;

use rustc_hash::FxHashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::schema::{FieldKind, MapKeyKind, ScalarKind};
use crate::stack::ensure_sufficient_stack;
use crate::Name;

pub use heap::Heap;
pub use record::{RecordBuilder, RecordValue};

/// An enum scalar: the enum type, the variant name, and its number.
///
/// Two enum values are equal when they share the enum type and number.
#[derive(Clone, Debug)]
pub struct EnumValue {
    pub enum_name: Name,
    pub variant: Name,
    pub number: i32,
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.enum_name == other.enum_name && self.number == other.number
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.enum_name.hash(state);
        self.number.hash(state);
    }
}

/// Key of a mapping entry.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
    Int(i64),
    Bool(bool),
    Str(Heap<String>),
}

impl MapKey {
    /// Create a string key.
    pub fn string(key: impl Into<String>) -> Self {
        MapKey::Str(Heap::new(key.into()))
    }

    pub fn kind(&self) -> MapKeyKind {
        match self {
            MapKey::Int(_) => MapKeyKind::Int,
            MapKey::Bool(_) => MapKeyKind::Bool,
            MapKey::Str(_) => MapKeyKind::Str,
        }
    }

    /// The key as a scalar value.
    pub fn to_value(&self) -> Value {
        match self {
            MapKey::Int(n) => Value::Int(*n),
            MapKey::Bool(b) => Value::Bool(*b),
            MapKey::Str(s) => Value::Str(s.clone()),
        }
    }
}

impl From<&str> for MapKey {
    fn from(key: &str) -> Self {
        MapKey::string(key)
    }
}

impl From<String> for MapKey {
    fn from(key: String) -> Self {
        MapKey::string(key)
    }
}

impl From<i64> for MapKey {
    fn from(key: i64) -> Self {
        MapKey::Int(key)
    }
}

impl From<bool> for MapKey {
    fn from(key: bool) -> Self {
        MapKey::Bool(key)
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Int(n) => write!(f, "{n}"),
            MapKey::Bool(b) => write!(f, "{b}"),
            MapKey::Str(s) => write!(f, "{:?}", s.as_str()),
        }
    }
}

impl fmt::Debug for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// A structured value: scalar, sequence, mapping, or record.
#[derive(Clone)]
pub enum Value {
    // Scalars
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(Heap<String>),
    Bytes(Heap<Vec<u8>>),
    Enum(EnumValue),

    // Containers
    /// Repeated field contents, in order.
    Sequence(Heap<Vec<Value>>),
    /// Map field contents. Keys are unique; order is irrelevant.
    Mapping(Heap<FxHashMap<MapKey, Value>>),

    /// Schema-typed record.
    Record(RecordValue),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a byte-string value.
    #[inline]
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(Heap::new(b.into()))
    }

    /// Create an enum scalar. Prefer `SharedRegistry::enum_value`, which
    /// checks the variant against the enum schema.
    #[inline]
    pub fn enumeration(enum_name: Name, variant: Name, number: i32) -> Self {
        Value::Enum(EnumValue {
            enum_name,
            variant,
            number,
        })
    }

    /// Create a sequence value.
    ///
    /// ```text
    /// let empty = Value::sequence(vec![]);
    /// let nums = Value::sequence(vec![Value::Int(1), Value::Int(2)]);
    /// ```
    #[inline]
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Heap::new(items))
    }

    /// Create a mapping value. Later duplicates of a key replace earlier ones.
    pub fn mapping<K: Into<MapKey>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let map: FxHashMap<MapKey, Value> =
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Mapping(Heap::new(map))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<RecordValue> for Value {
    fn from(record: RecordValue) -> Self {
        Value::Record(record)
    }
}

// Value Methods

impl Value {
    /// Returns `true` for scalar kinds (int, float, bool, str, bytes, enum).
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Sequence(_) | Value::Mapping(_) | Value::Record(_)
        )
    }

    /// Check if this value is truthy.
    ///
    /// Zero, empty, and `false` scalars are falsy, as are the zero variant of
    /// an enum and empty containers. Records are always truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Bytes(b) => !b.is_empty(),
            Value::Enum(e) => e.number != 0,
            Value::Sequence(items) => !items.is_empty(),
            Value::Mapping(map) => !map.is_empty(),
            Value::Record(_) => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self {
            Value::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&FxHashMap<MapKey, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Get the kind name for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Enum(_) => "enum",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "map",
            Value::Record(_) => "record",
        }
    }

    /// Describe this value's kind, naming record and enum types.
    pub fn describe_kind(&self) -> String {
        match self {
            Value::Enum(e) => format!("enum {}", e.enum_name),
            Value::Record(r) => format!("record {}", r.type_name()),
            _ => self.kind_name().to_string(),
        }
    }

    /// Check whether this value may be stored in a field of `kind`.
    pub fn conforms_to(&self, kind: &FieldKind) -> bool {
        ensure_sufficient_stack(|| match (kind, self) {
            (FieldKind::Scalar(scalar), _) => match (scalar, self) {
                (ScalarKind::Int, Value::Int(_))
                | (ScalarKind::Float, Value::Float(_))
                | (ScalarKind::Bool, Value::Bool(_))
                | (ScalarKind::Str, Value::Str(_))
                | (ScalarKind::Bytes, Value::Bytes(_)) => true,
                (ScalarKind::Enum(name), Value::Enum(e)) => e.enum_name == *name,
                _ => false,
            },
            (FieldKind::Record(type_name), Value::Record(r)) => r.type_name() == type_name,
            (FieldKind::Sequence(element), Value::Sequence(items)) => {
                items.iter().all(|item| item.conforms_to(element))
            }
            (FieldKind::Mapping(key_kind, value_kind), Value::Mapping(map)) => map
                .iter()
                .all(|(k, v)| k.kind() == *key_kind && v.conforms_to(value_kind)),
            _ => false,
        })
    }

    /// Check structural equality with another value.
    ///
    /// Scalars compare by kind and value (floats with IEEE `==`, so `NaN`
    /// never equals itself), sequences element-wise in order, mappings by
    /// key set and per-key value, records by type and every declared field
    /// after defaulting.
    #[allow(clippy::float_cmp, reason = "scalar equality is exact")]
    pub fn equals(&self, other: &Value) -> bool {
        ensure_sufficient_stack(|| match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.equals(y))
            }
            (Value::Mapping(a), Value::Mapping(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k).is_some_and(|w| v.equals(w)))
            }
            (Value::Record(a), Value::Record(b)) => a.equals(b),
            _ => false,
        })
    }
}

// Trait Implementations

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use discriminant tags to distinguish variants
        std::mem::discriminant(self).hash(state);

        ensure_sufficient_stack(|| match self {
            Value::Int(n) => n.hash(state),
            Value::Float(f) => {
                // 0.0 == -0.0, so both must hash alike
                let normalized = if *f == 0.0 { 0.0_f64 } else { *f };
                normalized.to_bits().hash(state);
            }
            Value::Bool(b) => b.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Bytes(b) => b.hash(state),
            Value::Enum(e) => e.hash(state),
            Value::Sequence(items) => {
                items.len().hash(state);
                for item in items.iter() {
                    item.hash(state);
                }
            }
            Value::Mapping(map) => {
                map.len().hash(state);
                // Map iteration order may vary, so we sort keys for determinism
                let mut keys: Vec<_> = map.keys().collect();
                keys.sort();
                for k in keys {
                    k.hash(state);
                    map.get(k).hash(state);
                }
            }
            Value::Record(r) => r.hash_into(state),
        });
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Bytes(b) => write!(f, "Bytes(b\"{}\")", b.escape_ascii()),
            Value::Enum(e) => write!(f, "Enum({}.{})", e.enum_name, e.variant),
            Value::Sequence(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Mapping(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                f.debug_map().entries(entries).finish()
            }
            Value::Record(r) => fmt::Debug::fmt(r, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::Enum(e) => write!(f, "{}.{}", e.enum_name, e.variant),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Mapping(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_by(|(a, _), (b, _)| a.cmp(b));
                write!(f, "{{")?;
                for (i, (k, v)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Record(r) => fmt::Display::fmt(r, f),
        }
    }
}
