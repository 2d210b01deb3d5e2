//! Static validation of match statements against a schema registry.
//!
//! Matching itself only reports an undeclared field when a record of the
//! right type reaches the pattern. `check` finds the same mistakes, and a
//! few others, before any value exists.

use protomatch_value::{ensure_sufficient_stack, Name, SchemaRegistry};

use crate::pattern::Pattern;
use crate::CheckError;

/// Check arms in order. Each item is an arm's pattern and whether it has a
/// guard.
pub(crate) fn check_arms<'p>(
    arms: impl IntoIterator<Item = (&'p Pattern, bool)>,
    registry: &SchemaRegistry,
) -> Result<(), CheckError> {
    let mut catch_all = None;
    for (arm, (pattern, guarded)) in arms.into_iter().enumerate() {
        if let Some(covered_by) = catch_all {
            return Err(CheckError::UnreachableArm { arm, covered_by });
        }
        check_pattern(pattern, arm, registry)?;
        if !guarded && pattern.is_irrefutable() {
            catch_all = Some(arm);
        }
    }
    Ok(())
}

/// Check a single pattern of arm `arm`.
pub(crate) fn check_pattern(
    pattern: &Pattern,
    arm: usize,
    registry: &SchemaRegistry,
) -> Result<(), CheckError> {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard | Pattern::Capture(_) => Ok(()),

        Pattern::Literal(value) => {
            if value.is_scalar() {
                Ok(())
            } else {
                Err(CheckError::NonScalarLiteral {
                    arm,
                    kind: value.describe_kind(),
                })
            }
        }

        Pattern::Record { type_name, fields } => {
            let Some(schema) = registry.record_schema(type_name) else {
                return Err(CheckError::UnknownType {
                    arm,
                    type_name: type_name.clone(),
                });
            };
            let mut seen: Vec<&Name> = Vec::with_capacity(fields.len());
            for (field, inner) in fields {
                if schema.field(field).is_none() {
                    return Err(CheckError::UnknownField {
                        arm,
                        type_name: type_name.clone(),
                        field: field.clone(),
                    });
                }
                if seen.contains(&field) {
                    return Err(CheckError::DuplicateField {
                        arm,
                        type_name: type_name.clone(),
                        field: field.clone(),
                    });
                }
                seen.push(field);
                check_pattern(inner, arm, registry)?;
            }
            Ok(())
        }

        Pattern::Sequence { head, rest, tail } => {
            if rest.is_none() && !tail.is_empty() {
                return Err(CheckError::TailWithoutRest { arm });
            }
            head.iter()
                .chain(tail)
                .try_for_each(|inner| check_pattern(inner, arm, registry))
        }

        Pattern::Mapping { entries, .. } => {
            for (i, (key, inner)) in entries.iter().enumerate() {
                if entries[..i].iter().any(|(earlier, _)| earlier == key) {
                    return Err(CheckError::DuplicateKey {
                        arm,
                        key: key.clone(),
                    });
                }
                check_pattern(inner, arm, registry)?;
            }
            Ok(())
        }

        Pattern::Or(alternatives) => alternatives
            .iter()
            .try_for_each(|inner| check_pattern(inner, arm, registry)),

        Pattern::At { pattern, .. } => check_pattern(pattern, arm, registry),
    })
}
