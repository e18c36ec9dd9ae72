//! Report assembly.
//!
//! Builds a severity-grouped, renderer-agnostic report from a
//! [`ValidationResult`]. The structured form is the single source of
//! truth; the plain-text form for email/PDF rendering is derived from it,
//! never computed separately.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{RiskLevel, Severity, ValidationResult};

/// Appended verbatim to every report instance.
pub const DISCLAIMER: &str = "This report is an automated compliance aid, not legal or tax advice. \
Verify findings with a qualified GST practitioner before filing; no liability is accepted for \
decisions taken on the basis of this report.";

/// Structured compliance report for UI consumption.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub check_id: String,
    pub health_score: u8,
    pub risk_level: RiskLevel,
    pub verdict: String,
    pub sections: Vec<ReportSection>,
    pub disclaimer: String,
    pub generated_at: DateTime<Utc>,
}

/// One ordered section of the report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub kind: SectionKind,
    pub heading: String,
    pub entries: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Critical,
    Warning,
    Info,
    Passed,
}

/// A single renderable line item of the report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportEntry {
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_to_fix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub law: Option<String>,
}

/// Free-text verdict from the health-score band.
pub fn verdict(health_score: u8) -> &'static str {
    match health_score {
        95..=u8::MAX => "Excellent — the invoice is compliant and ready to issue.",
        85..=94 => "Good — review the warnings before filing.",
        70..=84 => "Several issues need attention before this invoice is filed.",
        50..=69 => "Significant problems — correct the findings before proceeding.",
        _ => "Critical failures — do not submit this invoice until it is corrected.",
    }
}

/// Assemble the severity-grouped report: critical, warning and info
/// sections when non-empty, then always the passed-checks section.
pub fn build_report(result: &ValidationResult) -> Report {
    let mut sections = Vec::new();

    for (severity, kind, heading) in [
        (Severity::Critical, SectionKind::Critical, "Critical issues"),
        (Severity::Warning, SectionKind::Warning, "Warnings"),
        (Severity::Info, SectionKind::Info, "Notes"),
    ] {
        let entries: Vec<ReportEntry> = result
            .issues_found
            .iter()
            .filter(|issue| issue.severity == severity)
            .map(|issue| ReportEntry {
                title: issue.title.clone(),
                detail: issue.description.clone(),
                location: issue.location.clone(),
                expected: issue.expected.as_ref().map(ToString::to_string),
                found: issue.found.as_ref().map(ToString::to_string),
                difference: issue.difference.map(|d| d.to_string()),
                how_to_fix: Some(issue.how_to_fix.clone()),
                impact: Some(issue.impact.clone()),
                law: issue.gst_law_context.clone(),
            })
            .collect();
        if !entries.is_empty() {
            sections.push(ReportSection {
                kind,
                heading: heading.to_owned(),
                entries,
            });
        }
    }

    sections.push(ReportSection {
        kind: SectionKind::Passed,
        heading: "Checks passed".to_owned(),
        entries: result
            .checks_passed
            .iter()
            .map(|check| ReportEntry {
                title: check.title.clone(),
                detail: check.description.clone(),
                location: None,
                expected: None,
                found: None,
                difference: None,
                how_to_fix: None,
                impact: None,
                law: None,
            })
            .collect(),
    });

    Report {
        check_id: result.check_id.clone(),
        health_score: result.health_score,
        risk_level: result.risk_level,
        verdict: verdict(result.health_score).to_owned(),
        sections,
        disclaimer: DISCLAIMER.to_owned(),
        generated_at: result.timestamp,
    }
}

impl Report {
    /// Flatten the structured report for email/PDF rendering.
    pub fn to_plain_text(&self) -> String {
        use std::fmt::Write;

        let risk = match self.risk_level {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };

        let mut out = String::new();
        let _ = writeln!(out, "GST INVOICE COMPLIANCE REPORT");
        let _ = writeln!(out, "Check ID: {}", self.check_id);
        let _ = writeln!(
            out,
            "Health score: {}/100 (risk: {risk})",
            self.health_score
        );
        let _ = writeln!(out, "{}", self.verdict);

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", section.heading.to_uppercase());
            for (index, entry) in section.entries.iter().enumerate() {
                if section.kind == SectionKind::Passed {
                    let _ = writeln!(out, "  + {} — {}", entry.title, entry.detail);
                    continue;
                }
                let _ = match &entry.location {
                    Some(location) => {
                        writeln!(out, "  {}. {} ({location})", index + 1, entry.title)
                    }
                    None => writeln!(out, "  {}. {}", index + 1, entry.title),
                };
                let _ = writeln!(out, "     {}", entry.detail);
                if let (Some(expected), Some(found)) = (&entry.expected, &entry.found) {
                    let _ = writeln!(out, "     Expected {expected}, found {found}.");
                }
                if let Some(difference) = &entry.difference {
                    let _ = writeln!(out, "     Difference: {difference}");
                }
                if let Some(fix) = &entry.how_to_fix {
                    let _ = writeln!(out, "     Fix: {fix}");
                }
                if let Some(impact) = &entry.impact {
                    let _ = writeln!(out, "     Impact: {impact}");
                }
                if let Some(law) = &entry.law {
                    let _ = writeln!(out, "     Law: {law}");
                }
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "---");
        let _ = writeln!(out, "{}", self.disclaimer);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, LineItemBuilder, TaxType};
    use crate::engine::validate_with;
    use crate::rules::RuleContext;
    use crate::score::ScoreConfig;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ctx() -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        }
    }

    fn result_for(invoice: &crate::core::Invoice) -> ValidationResult {
        validate_with(invoice, &ctx(), &ScoreConfig::default())
    }

    fn broken_invoice() -> crate::core::Invoice {
        // same-state IGST plus a missing HSN: one critical, one warning
        InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .buyer_gstin("27AABCU9603R1ZJ")
            .place_of_supply("27")
            .add_line(
                LineItemBuilder::new(1, "Speakers", "")
                    .quantity_rate(dec!(1), dec!(1000))
                    .tax(dec!(18), TaxType::Igst)
                    .build(),
            )
            .totals(dec!(1000), dec!(180), dec!(1180))
            .build()
    }

    #[test]
    fn sections_in_severity_order_passed_always_last() {
        let report = build_report(&result_for(&broken_invoice()));
        let kinds: Vec<SectionKind> = report.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [SectionKind::Critical, SectionKind::Warning, SectionKind::Passed]
        );
        assert!(!report.sections.last().unwrap().entries.is_empty());
    }

    #[test]
    fn clean_result_has_only_passed_section() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .buyer_gstin("27AABCU9603R1ZJ")
            .place_of_supply("27")
            .add_line(
                LineItemBuilder::new(1, "Speakers", "8518")
                    .quantity_rate(dec!(1), dec!(1000))
                    .tax(dec!(18), TaxType::CgstSgst)
                    .build(),
            )
            .totals(dec!(1000), dec!(180), dec!(1180))
            .build();
        let report = build_report(&result_for(&inv));
        assert_eq!(report.sections.len(), 1);
        assert_eq!(report.sections[0].kind, SectionKind::Passed);
        assert!(report.verdict.starts_with("Excellent"));
    }

    #[test]
    fn verdict_bands() {
        assert!(verdict(100).starts_with("Excellent"));
        assert!(verdict(95).starts_with("Excellent"));
        assert!(verdict(94).starts_with("Good"));
        assert!(verdict(85).starts_with("Good"));
        assert!(verdict(84).starts_with("Several"));
        assert!(verdict(70).starts_with("Several"));
        assert!(verdict(69).starts_with("Significant"));
        assert!(verdict(50).starts_with("Significant"));
        assert!(verdict(49).starts_with("Critical"));
        assert!(verdict(0).starts_with("Critical"));
    }

    #[test]
    fn plain_text_derived_from_structure() {
        let report = build_report(&result_for(&broken_invoice()));
        let text = report.to_plain_text();

        assert!(text.contains("GST INVOICE COMPLIANCE REPORT"));
        assert!(text.contains("CRITICAL ISSUES"));
        assert!(text.contains("CHECKS PASSED"));
        assert!(text.contains(DISCLAIMER));
        // every structured entry title appears in the flattened form
        for section in &report.sections {
            for entry in &section.entries {
                assert!(text.contains(&entry.title), "missing {}", entry.title);
            }
        }
    }

    #[test]
    fn disclaimer_always_present() {
        let report = build_report(&result_for(&broken_invoice()));
        assert_eq!(report.disclaimer, DISCLAIMER);
    }
}
