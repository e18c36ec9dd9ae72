//! Health scoring and risk classification.
//!
//! Converts the finding list into a 0–100 health score via per-severity
//! deductions, then derives a risk tier. Weights and thresholds travel in
//! an explicit [`ScoreConfig`] so tests and tuning never reach for global
//! state.

use crate::core::{RiskLevel, ScoreBreakdown, Severity, SeverityDeduction, ValidationIssue};

/// Per-severity deduction weights and risk thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreConfig {
    /// Points deducted per critical finding.
    pub critical_deduction: u32,
    /// Points deducted per warning finding.
    pub warning_deduction: u32,
    /// Points deducted per info finding.
    pub info_deduction: u32,
    /// Scores below this are high risk (critical findings force high
    /// regardless of score).
    pub high_risk_below: u8,
    /// Scores below this (but not high) are medium risk.
    pub medium_risk_below: u8,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            critical_deduction: 15,
            warning_deduction: 5,
            info_deduction: 2,
            high_risk_below: 70,
            medium_risk_below: 90,
        }
    }
}

/// Outcome of scoring one finding list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub health_score: u8,
    pub risk_level: RiskLevel,
    pub breakdown: ScoreBreakdown,
}

/// Score a finding list: start at 100, deduct per severity, clamp to
/// [0, 100].
pub fn score(issues: &[ValidationIssue], config: &ScoreConfig) -> Score {
    let count = |severity: Severity| issues.iter().filter(|i| i.severity == severity).count();

    let critical = count(Severity::Critical);
    let warning = count(Severity::Warning);
    let info = count(Severity::Info);

    let critical_deduction = critical as u32 * config.critical_deduction;
    let warning_deduction = warning as u32 * config.warning_deduction;
    let info_deduction = info as u32 * config.info_deduction;
    let total_deduction = critical_deduction + warning_deduction + info_deduction;

    let health_score = 100u32.saturating_sub(total_deduction) as u8;

    let risk_level = if critical > 0 || health_score < config.high_risk_below {
        RiskLevel::High
    } else if health_score < config.medium_risk_below {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    Score {
        health_score,
        risk_level,
        breakdown: ScoreBreakdown {
            critical: SeverityDeduction {
                count: critical,
                deduction: critical_deduction,
            },
            warning: SeverityDeduction {
                count: warning,
                deduction: warning_deduction,
            },
            info: SeverityDeduction {
                count: info,
                deduction: info_deduction,
            },
            total_deduction,
        },
    }
}
