//! Execution modules for the match engine.
//!
//! - `control`: structural matching of a single pattern against a value
//!
//! Arm selection and guard evaluation live in `statement`, which delegates
//! each structural test here.

pub mod control;
