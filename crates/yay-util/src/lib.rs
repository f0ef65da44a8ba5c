//! yay-util - Foundation Types for the YAY Pipeline
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the types shared by every phase of the YAY pipeline:
//! the value tree produced by the parser and consumed by the emitter, the
//! error types surfaced to callers, and the Unicode code-point policy that
//! both the source validator and the emitter's escaping decisions rely on.
//!
//! DESIGN PRINCIPLES:
//! ------------------
//! 1. CLOSED DATA MODEL
//!    `Value` and the error kinds are closed enums. Every consumer matches
//!    exhaustively; there is no dynamic typing anywhere in the pipeline.
//!
//! 2. EXPLICIT ERROR PROPAGATION
//!    All fallible operations return `Result`. Syntax errors carry their
//!    1-based source position from the point of detection to the caller.
//!
//! 3. DETERMINISTIC ROUND-TRIPS
//!    Objects preserve insertion order (`IndexMap`), integers are
//!    arbitrary-precision (`BigInt`), and equality treats NaN as equal to
//!    itself, so `parse(emit(v))` compares equal to `v` structurally.

pub mod error;
pub mod unicode;
pub mod value;

pub use error::{SyntaxResult, YayError, YayResult, YaySyntaxError};
pub use value::Value;
