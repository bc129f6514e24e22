use crate::model::RuleId;
use thiserror::Error;

/// Anomalies détectées par l'audit du carnet de règles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    EmptyTimeRange,
    UnmatchableDateRange,
    StrayDaysOfWeek,
    MissingDaysOfWeek,
    InvalidWeekday,
    ShadowedRule,
}

#[derive(Debug, Clone)]
pub struct Finding {
    pub rule: RuleId,
    pub kind: FindingKind,
}

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid date range: end must not be before start")]
    InvalidDateRange,
    #[error("unknown rule: {0}")]
    UnknownRule(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
