//! Match statements: ordered arms, guards, and first-success commit.
//!
//! Arms are tried in declaration order. An arm commits when its pattern
//! matches and its guard (if any) accepts the bindings; scanning stops there.
//! Bindings from an arm that did not commit are discarded and never seen by
//! another arm.

use std::convert::Infallible;
use std::fmt;

use protomatch_value::{SchemaRegistry, Value};

use crate::check::check_arms;
use crate::exec::control::try_match;
use crate::{Bindings, CheckError, MatchError, Pattern};

type GuardFn<'a, E> = Box<dyn Fn(&Bindings) -> Result<bool, E> + 'a>;
type ActionFn<'a, T, E> = Box<dyn Fn(Bindings) -> Result<T, E> + 'a>;

/// One `case` clause: a pattern, an optional guard, and an action.
pub struct MatchArm<'a, T, E = Infallible> {
    pattern: Pattern,
    guard: Option<GuardFn<'a, E>>,
    action: ActionFn<'a, T, E>,
}

impl<'a, T, E> MatchArm<'a, T, E> {
    pub fn new(pattern: Pattern, action: impl Fn(Bindings) -> T + 'a) -> Self {
        Self::try_new(pattern, move |bindings| Ok(action(bindings)))
    }

    /// Arm whose action may fail with the caller's error type.
    pub fn try_new(pattern: Pattern, action: impl Fn(Bindings) -> Result<T, E> + 'a) -> Self {
        MatchArm {
            pattern,
            guard: None,
            action: Box::new(action),
        }
    }

    /// Attach a guard. It sees only this arm's bindings.
    #[must_use]
    pub fn guard(self, guard: impl Fn(&Bindings) -> bool + 'a) -> Self {
        self.try_guard(move |bindings| Ok(guard(bindings)))
    }

    #[must_use]
    pub fn try_guard(mut self, guard: impl Fn(&Bindings) -> Result<bool, E> + 'a) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

impl<T, E> fmt::Debug for MatchArm<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchArm")
            .field("pattern", &self.pattern)
            .field("guarded", &self.is_guarded())
            .finish_non_exhaustive()
    }
}

/// Arm selected by `MatchStatement::select`, with its bindings.
///
/// The action has not run yet; call `run` to execute it.
pub struct Commit<'s, 'a, T, E> {
    /// Index of the committed arm in declaration order.
    pub arm_index: usize,
    pub bindings: Bindings,
    arm: &'s MatchArm<'a, T, E>,
}

impl<T, E> Commit<'_, '_, T, E> {
    pub fn pattern(&self) -> &Pattern {
        &self.arm.pattern
    }

    /// Run the committed arm's action with its bindings.
    pub fn run(self) -> Result<T, MatchError<E>> {
        let Commit {
            arm_index,
            bindings,
            arm,
        } = self;
        (arm.action)(bindings).map_err(|source| MatchError::Action {
            arm: arm_index,
            source,
        })
    }
}

impl<T, E> fmt::Debug for Commit<'_, '_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Commit")
            .field("arm_index", &self.arm_index)
            .field("bindings", &self.bindings)
            .finish_non_exhaustive()
    }
}

/// Ordered list of arms evaluated with first-success-commits semantics.
pub struct MatchStatement<'a, T, E = Infallible> {
    arms: Vec<MatchArm<'a, T, E>>,
}

impl<T> MatchStatement<'_, T> {
    /// Statement whose guards and actions cannot fail.
    pub fn new() -> Self {
        Self::fallible()
    }
}

impl<'a, T, E> MatchStatement<'a, T, E> {
    /// Statement whose guards and actions may fail with `E`.
    pub fn fallible() -> Self {
        MatchStatement { arms: Vec::new() }
    }

    #[must_use]
    pub fn arm(mut self, arm: MatchArm<'a, T, E>) -> Self {
        self.arms.push(arm);
        self
    }

    /// Unguarded arm.
    #[must_use]
    pub fn case(self, pattern: Pattern, action: impl Fn(Bindings) -> T + 'a) -> Self {
        self.arm(MatchArm::new(pattern, action))
    }

    /// Guarded arm.
    #[must_use]
    pub fn case_if(
        self,
        pattern: Pattern,
        guard: impl Fn(&Bindings) -> bool + 'a,
        action: impl Fn(Bindings) -> T + 'a,
    ) -> Self {
        self.arm(MatchArm::new(pattern, action).guard(guard))
    }

    /// Trailing `case _` arm.
    #[must_use]
    pub fn otherwise(self, action: impl Fn(Bindings) -> T + 'a) -> Self {
        self.arm(MatchArm::new(Pattern::Wildcard, action))
    }

    pub fn push(&mut self, arm: MatchArm<'a, T, E>) {
        self.arms.push(arm);
    }

    pub fn arms(&self) -> &[MatchArm<'a, T, E>] {
        &self.arms
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// Find the arm that commits for `value` without running its action.
    ///
    /// # Errors
    ///
    /// - `MatchError::Value` if a record pattern names an undeclared field
    ///   of a record it is tested against. Later arms are not tried.
    /// - `MatchError::Guard` if a guard fails. Later arms are not tried.
    /// - `MatchError::NoMatch` if no arm commits.
    #[tracing::instrument(level = "debug", skip_all, fields(arms = self.arms.len()))]
    pub fn select(&self, value: &Value) -> Result<Commit<'_, 'a, T, E>, MatchError<E>> {
        for (index, arm) in self.arms.iter().enumerate() {
            let Some(bindings) = try_match(&arm.pattern, value)? else {
                tracing::trace!(arm = index, pattern = %arm.pattern, "pattern did not match");
                continue;
            };

            // Bindings are visible to the guard
            if let Some(guard) = &arm.guard {
                let passed =
                    guard(&bindings).map_err(|source| MatchError::Guard { arm: index, source })?;
                if !passed {
                    tracing::debug!(arm = index, "guard rejected bindings");
                    continue;
                }
            }

            tracing::debug!(arm = index, bindings = bindings.len(), "arm committed");
            return Ok(Commit {
                arm_index: index,
                bindings,
                arm,
            });
        }

        tracing::debug!(%value, "no arm matched");
        Err(MatchError::NoMatch {
            value: value.clone(),
        })
    }

    /// Run the first committing arm's action and return its result.
    ///
    /// # Errors
    ///
    /// Everything `select` reports, plus `MatchError::Action` when the
    /// committed action fails.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&self, value: &Value) -> Result<T, MatchError<E>> {
        self.select(value)?.run()
    }

    /// Validate every arm against `registry` without a value.
    ///
    /// Reports the first problem in arm order: unknown record types or field
    /// names, literals that are not scalars, duplicated keys or fields, and
    /// arms that follow an unguarded catch-all.
    pub fn check(&self, registry: &SchemaRegistry) -> Result<(), CheckError> {
        check_arms(
            self.arms
                .iter()
                .map(|arm| (&arm.pattern, arm.is_guarded())),
            registry,
        )
    }
}

impl<T, E> Default for MatchStatement<'_, T, E> {
    fn default() -> Self {
        Self::fallible()
    }
}

impl<T, E> fmt::Debug for MatchStatement<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.arms.iter()).finish()
    }
}
