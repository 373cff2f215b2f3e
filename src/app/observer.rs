//! Progress reporting for pipeline runs.
//!
//! The pipeline never logs on its own; it tells an observer what it is doing.
//! The binary plugs in [`TracingObserver`], tests use [`NoopObserver`] or their own.

use crate::domain::{Diagnostic, DiagnosticKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    NormalizeListings,
    NormalizeIncome,
    Affordability,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::NormalizeListings => "normalize-listings",
            Stage::NormalizeIncome => "normalize-income",
            Stage::Affordability => "affordability",
        };
        write!(f, "{name}")
    }
}

pub trait PipelineObserver: Sync {
    fn stage_started(&self, _stage: Stage) {}
    fn stage_finished(&self, _stage: Stage, _rows: usize) {}
    fn diagnostic(&self, _diagnostic: &Diagnostic) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that forwards progress to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn stage_started(&self, stage: Stage) {
        tracing::info!(%stage, "stage started");
    }

    fn stage_finished(&self, stage: Stage, rows: usize) {
        tracing::info!(%stage, rows, "stage finished");
    }

    fn diagnostic(&self, diagnostic: &Diagnostic) {
        let line = diagnostic.line.unwrap_or_default();
        match diagnostic.kind {
            DiagnosticKind::NullableParseFailure => {
                tracing::debug!(table = %diagnostic.table, line, field = diagnostic.field, "{}", diagnostic.message)
            }
            DiagnosticKind::SchemaParseFailure => {
                tracing::warn!(table = %diagnostic.table, line, field = diagnostic.field, "{}", diagnostic.message)
            }
            DiagnosticKind::JoinKeyMismatch => tracing::info!("{}", diagnostic.message),
        }
    }
}
