//! Pattern language.
//!
//! A `Pattern` is a closed tree. Matching (`exec::control::try_match`),
//! rendering (`Display`) and static checking (`check`) each dispatch over it
//! exhaustively.

use std::fmt;

use protomatch_value::{MapKey, Name, Value};

/// Remainder marker of a sequence pattern (`*rest` or `*_`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Rest {
    /// `*name`: binds the unmatched middle slice as a sequence.
    Bind(Name),
    /// `*_`: accepts any middle slice without binding it.
    Discard,
}

impl Rest {
    pub fn name(&self) -> Option<&Name> {
        match self {
            Rest::Bind(name) => Some(name),
            Rest::Discard => None,
        }
    }
}

/// Structural match pattern.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Pattern {
    /// Wildcard: `_`
    Wildcard,
    /// Capture: `x`
    Capture(Name),
    /// Literal: `10`, `"s"`, `true`. Only scalars are meaningful here.
    Literal(Value),
    /// Record: `TestMessage(int_scalar=10, nested_msg=x)`
    ///
    /// Fields not listed are unconstrained. Listed fields are read with
    /// default-on-absence, so a pattern can match a field that was never set.
    Record {
        type_name: Name,
        fields: Vec<(Name, Pattern)>,
    },
    /// Sequence: `[a, b]`, `[a, *rest]`, `[a, *_, z]`
    ///
    /// `tail` holds the patterns after the star and is only meaningful when
    /// `rest` is present.
    Sequence {
        head: Vec<Pattern>,
        rest: Option<Rest>,
        tail: Vec<Pattern>,
    },
    /// Mapping: `{"one": x}` or `{"one": x, **rest}`
    Mapping {
        entries: Vec<(MapKey, Pattern)>,
        rest: Option<Name>,
    },
    /// Or pattern: `a | b`
    Or(Vec<Pattern>),
    /// As pattern: `p as name`
    At { name: Name, pattern: Box<Pattern> },
}

impl Pattern {
    pub fn wildcard() -> Self {
        Pattern::Wildcard
    }

    pub fn capture(name: impl Into<Name>) -> Self {
        Pattern::Capture(name.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }

    pub fn record<N: Into<Name>>(
        type_name: impl Into<Name>,
        fields: impl IntoIterator<Item = (N, Pattern)>,
    ) -> Self {
        Pattern::Record {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(n, p)| (n.into(), p)).collect(),
        }
    }

    /// Exact-length sequence pattern.
    pub fn sequence(items: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Sequence {
            head: items.into_iter().collect(),
            rest: None,
            tail: Vec::new(),
        }
    }

    /// `[head.., *rest]`
    pub fn sequence_rest(head: impl IntoIterator<Item = Pattern>, rest: impl Into<Name>) -> Self {
        Pattern::Sequence {
            head: head.into_iter().collect(),
            rest: Some(Rest::Bind(rest.into())),
            tail: Vec::new(),
        }
    }

    /// `[head.., *star, tail..]` with a bound or discarded star.
    pub fn sequence_star(
        head: impl IntoIterator<Item = Pattern>,
        star: Rest,
        tail: impl IntoIterator<Item = Pattern>,
    ) -> Self {
        Pattern::Sequence {
            head: head.into_iter().collect(),
            rest: Some(star),
            tail: tail.into_iter().collect(),
        }
    }

    pub fn mapping<K: Into<MapKey>>(entries: impl IntoIterator<Item = (K, Pattern)>) -> Self {
        Pattern::Mapping {
            entries: entries.into_iter().map(|(k, p)| (k.into(), p)).collect(),
            rest: None,
        }
    }

    /// `{entries.., **rest}`
    pub fn mapping_rest<K: Into<MapKey>>(
        entries: impl IntoIterator<Item = (K, Pattern)>,
        rest: impl Into<Name>,
    ) -> Self {
        Pattern::Mapping {
            entries: entries.into_iter().map(|(k, p)| (k.into(), p)).collect(),
            rest: Some(rest.into()),
        }
    }

    pub fn or(alternatives: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Or(alternatives.into_iter().collect())
    }

    /// `self as name`
    #[must_use]
    pub fn bind_as(self, name: impl Into<Name>) -> Self {
        Pattern::At {
            name: name.into(),
            pattern: Box::new(self),
        }
    }

    /// Returns `true` if the pattern matches every value of every kind.
    pub fn is_irrefutable(&self) -> bool {
        match self {
            Pattern::Wildcard | Pattern::Capture(_) => true,
            Pattern::At { pattern, .. } => pattern.is_irrefutable(),
            Pattern::Or(alternatives) => alternatives.iter().any(Pattern::is_irrefutable),
            Pattern::Literal(_)
            | Pattern::Record { .. }
            | Pattern::Sequence { .. }
            | Pattern::Mapping { .. } => false,
        }
    }

    /// Render the pattern in case-clause syntax.
    pub fn describe(&self) -> String {
        self.to_string()
    }

    fn needs_parens(&self) -> bool {
        matches!(self, Pattern::Or(_) | Pattern::At { .. })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Capture(name) => write!(f, "{name}"),
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::Record { type_name, fields } => {
                write!(f, "{type_name}(")?;
                for (i, (name, pattern)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}={pattern}")?;
                }
                write!(f, ")")
            }
            Pattern::Sequence { head, rest, tail } => {
                write!(f, "[")?;
                let mut first = true;
                let mut sep = |f: &mut fmt::Formatter<'_>| {
                    if first {
                        first = false;
                        Ok(())
                    } else {
                        write!(f, ", ")
                    }
                };
                for pattern in head {
                    sep(f)?;
                    write!(f, "{pattern}")?;
                }
                if let Some(rest) = rest {
                    sep(f)?;
                    match rest {
                        Rest::Bind(name) => write!(f, "*{name}")?,
                        Rest::Discard => write!(f, "*_")?,
                    }
                }
                for pattern in tail {
                    sep(f)?;
                    write!(f, "{pattern}")?;
                }
                write!(f, "]")
            }
            Pattern::Mapping { entries, rest } => {
                write!(f, "{{")?;
                for (i, (key, pattern)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {pattern}")?;
                }
                if let Some(rest) = rest {
                    if !entries.is_empty() {
                        write!(f, ", ")?;
                    }
                    write!(f, "**{rest}")?;
                }
                write!(f, "}}")
            }
            Pattern::Or(alternatives) => {
                for (i, pattern) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    if pattern.needs_parens() {
                        write!(f, "({pattern})")?;
                    } else {
                        write!(f, "{pattern}")?;
                    }
                }
                Ok(())
            }
            Pattern::At { name, pattern } => {
                if pattern.needs_parens() {
                    write!(f, "({pattern}) as {name}")
                } else {
                    write!(f, "{pattern} as {name}")
                }
            }
        }
    }
}
