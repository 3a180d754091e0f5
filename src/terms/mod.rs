//! The term discovery pipeline: validity filtering, label normalization,
//! payload construction, discovery orchestration, and the per-term subject
//! fan-out.

pub mod aggregate;
pub mod discovery;
pub mod normalize;
pub mod payload;
pub mod validity;
