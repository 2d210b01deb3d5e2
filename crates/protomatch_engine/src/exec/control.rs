//! Structural matching.
//!
//! `try_match` answers one question: does `pattern` fit `value`, and if so,
//! which names does it bind? It never runs guards or actions and has no
//! notion of arms. A structural mismatch is `Ok(None)`; the only error is a
//! record pattern naming an undeclared field.

use protomatch_value::{ensure_sufficient_stack, Name, RecordValue, Value, ValueError};

use crate::pattern::{Pattern, Rest};
use crate::Bindings;

/// Try to match a pattern against a value, returning bindings if successful.
///
/// Bindings are collected in traversal order. A name captured twice keeps
/// the later value.
pub fn try_match(pattern: &Pattern, value: &Value) -> Result<Option<Bindings>, ValueError> {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard => Ok(Some(Bindings::new())),

        Pattern::Capture(name) => {
            let mut bindings = Bindings::new();
            bindings.bind(name.clone(), value.clone());
            Ok(Some(bindings))
        }

        Pattern::Literal(literal) => {
            if value.is_scalar() && literal.equals(value) {
                Ok(Some(Bindings::new()))
            } else {
                Ok(None)
            }
        }

        Pattern::Record { type_name, fields } => {
            let Value::Record(record) = value else {
                return Ok(None);
            };
            if record.type_name() != type_name {
                return Ok(None);
            }
            match_record_fields(record, fields)
        }

        Pattern::Sequence { head, rest, tail } => {
            let Value::Sequence(items) = value else {
                return Ok(None);
            };
            let fixed = head.len() + tail.len();
            let fits = match rest {
                None => items.len() == fixed,
                Some(_) => items.len() >= fixed,
            };
            if !fits {
                return Ok(None);
            }

            let tail_start = items.len() - tail.len();
            let mut bindings = Bindings::new();
            if !match_all(head.iter().zip(items.iter()), &mut bindings)? {
                return Ok(None);
            }
            if let Some(name) = rest.as_ref().and_then(Rest::name) {
                let middle = items[head.len()..tail_start].to_vec();
                bindings.bind(name.clone(), Value::sequence(middle));
            }
            if !match_all(tail.iter().zip(items[tail_start..].iter()), &mut bindings)? {
                return Ok(None);
            }
            Ok(Some(bindings))
        }

        Pattern::Mapping { entries, rest } => {
            let Value::Mapping(map) = value else {
                return Ok(None);
            };
            let mut bindings = Bindings::new();
            for (key, pat) in entries {
                let Some(entry) = map.get(key) else {
                    return Ok(None);
                };
                match try_match(pat, entry)? {
                    Some(inner) => bindings.merge(inner),
                    None => return Ok(None),
                }
            }
            if let Some(name) = rest {
                let remaining = map
                    .iter()
                    .filter(|(key, _)| !entries.iter().any(|(named, _)| named == *key))
                    .map(|(key, entry)| (key.clone(), entry.clone()));
                bindings.bind(name.clone(), Value::mapping(remaining));
            }
            Ok(Some(bindings))
        }

        Pattern::Or(alternatives) => {
            for pat in alternatives {
                if let Some(bindings) = try_match(pat, value)? {
                    return Ok(Some(bindings));
                }
            }
            Ok(None)
        }

        Pattern::At { name, pattern } => {
            if let Some(mut bindings) = try_match(pattern, value)? {
                bindings.bind(name.clone(), value.clone());
                Ok(Some(bindings))
            } else {
                Ok(None)
            }
        }
    })
}

/// Match field patterns in order against a record of the right type.
///
/// Every listed field name is resolved before any field is tested, so an
/// undeclared name is reported even when an earlier field would mismatch.
fn match_record_fields(
    record: &RecordValue,
    fields: &[(Name, Pattern)],
) -> Result<Option<Bindings>, ValueError> {
    for (field, _) in fields {
        if record.schema().field_index(field).is_none() {
            return Err(ValueError::UnknownField {
                type_name: record.type_name().clone(),
                field: field.clone(),
            });
        }
    }

    let mut bindings = Bindings::new();
    for (field, pat) in fields {
        let field_value = record.get_field(field)?;
        match try_match(pat, &field_value)? {
            Some(inner) => bindings.merge(inner),
            None => {
                tracing::trace!(
                    type_name = %record.type_name(),
                    %field,
                    "record field mismatch"
                );
                return Ok(None);
            }
        }
    }
    Ok(Some(bindings))
}

/// Match pattern/value pairs left to right, merging into `bindings`.
///
/// Returns `false` on the first mismatch.
fn match_all<'p, 'v>(
    pairs: impl Iterator<Item = (&'p Pattern, &'v Value)>,
    bindings: &mut Bindings,
) -> Result<bool, ValueError> {
    for (pat, item) in pairs {
        match try_match(pat, item)? {
            Some(inner) => bindings.merge(inner),
            None => return Ok(false),
        }
    }
    Ok(true)
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests;
