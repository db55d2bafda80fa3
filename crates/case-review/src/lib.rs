//! Scoring and gating engine for the two-stage (UQC/CQC) highlight case review.

pub mod config;
pub mod error;
pub mod review;
pub mod telemetry;
