//! The validation engine: normalize, run every rule, sweep passed checks,
//! score, and assemble the result.
//!
//! Each call is an independent pure computation over one invoice value —
//! no shared mutable state, nothing blocks, and a complete
//! [`ValidationResult`] is always returned (a rule that panics is isolated,
//! logged and skipped rather than poisoning the run).

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::core::{
    BijakError, Category, Invoice, ValidationCheck, ValidationResult, normalize,
};
use crate::rules::{RULES, RuleContext};
use crate::score::{Score, ScoreConfig, score};

/// Validate an invoice with today's date and default score weights.
///
/// This is the sole entry point surrounding infrastructure calls; callers
/// handle authorization, persistence and rendering around it.
pub fn validate(invoice: &Invoice) -> ValidationResult {
    let ctx = RuleContext {
        today: Utc::now().date_naive(),
    };
    validate_with(invoice, &ctx, &ScoreConfig::default())
}

/// Validate with an explicit rule context and score configuration.
///
/// Given equal inputs the outcome is deterministic; only `checkId` and
/// `timestamp` differ between runs.
pub fn validate_with(
    invoice: &Invoice,
    ctx: &RuleContext,
    config: &ScoreConfig,
) -> ValidationResult {
    let started = Instant::now();
    let normalized = normalize(invoice);

    let mut issues = Vec::new();
    for rule in RULES {
        match panic::catch_unwind(AssertUnwindSafe(|| (rule.check)(&normalized, ctx))) {
            Ok(found) => {
                debug!(rule = rule.id, findings = found.len(), "rule evaluated");
                issues.extend(found);
            }
            Err(_) => {
                error!(rule = rule.id, "rule panicked and was skipped");
            }
        }
    }

    // Every category is accounted for exactly once: in the finding list or
    // as a passed check, never both, never neither.
    let checks_passed: Vec<ValidationCheck> = Category::ALL
        .iter()
        .filter(|category| !issues.iter().any(|i| i.category == **category))
        .map(|category| ValidationCheck::passed(*category))
        .collect();

    let Score {
        health_score,
        risk_level,
        breakdown,
    } = score(&issues, config);

    info!(
        health_score,
        issues = issues.len(),
        passed = checks_passed.len(),
        "validation complete"
    );

    ValidationResult {
        check_id: Uuid::new_v4().to_string(),
        health_score,
        risk_level,
        issues_found: issues,
        checks_passed,
        score_breakdown: breakdown,
        processing_time_ms: started.elapsed().as_millis() as u64,
        timestamp: Utc::now(),
    }
}

/// Strict input boundary for JSON payloads: typed deserialization plus
/// shape checks the rule engine is not designed to defend against.
pub fn validate_json(payload: &str) -> Result<ValidationResult, BijakError> {
    let invoice: Invoice = serde_json::from_str(payload)?;
    check_shape(&invoice)?;
    Ok(validate(&invoice))
}

/// Shape constraints on a deserialized invoice. Line numbers must be
/// 1-based and contiguous — rules report locations by line number and rely
/// on it identifying exactly one line.
pub fn check_shape(invoice: &Invoice) -> Result<(), BijakError> {
    for (index, line) in invoice.line_items.iter().enumerate() {
        let expected = index as u32 + 1;
        if line.line_number != expected {
            return Err(BijakError::Shape(format!(
                "line numbers must be contiguous starting at 1; position {} carries lineNumber {}",
                index + 1,
                line.line_number
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, LineItemBuilder, RiskLevel, TaxType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ctx() -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        }
    }

    fn clean_invoice() -> Invoice {
        InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .buyer_gstin("27AABCU9603R1ZJ")
            .place_of_supply("27")
            .add_line(
                LineItemBuilder::new(1, "Bluetooth speakers", "8518")
                    .quantity_rate(dec!(1), dec!(1000))
                    .tax(dec!(18), TaxType::CgstSgst)
                    .build(),
            )
            .totals(dec!(1000), dec!(180), dec!(1180))
            .build()
    }

    #[test]
    fn clean_invoice_passes_everything() {
        let result = validate_with(&clean_invoice(), &ctx(), &ScoreConfig::default());
        assert!(result.issues_found.is_empty(), "{:?}", result.issues_found);
        assert_eq!(result.checks_passed.len(), Category::ALL.len());
        assert_eq!(result.health_score, 100);
        assert_eq!(result.risk_level, RiskLevel::Low);
    }

    #[test]
    fn category_partition_holds() {
        // A thoroughly broken invoice still accounts for every category
        // exactly once across findings and passed checks.
        let inv = InvoiceBuilder::new("", "not-a-date").build();
        let result = validate_with(&inv, &ctx(), &ScoreConfig::default());
        for category in Category::ALL {
            let in_issues = result.issues_found.iter().any(|i| i.category == category);
            let passed = result
                .checks_passed
                .iter()
                .filter(|c| c.category == category)
                .count();
            assert!(
                (in_issues && passed == 0) || (!in_issues && passed == 1),
                "category {category:?}: issues={in_issues} passed={passed}"
            );
        }
    }

    #[test]
    fn shape_rejects_non_contiguous_lines() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .add_line(
                LineItemBuilder::new(2, "Speakers", "8518")
                    .quantity_rate(dec!(1), dec!(100))
                    .tax(dec!(18), TaxType::CgstSgst)
                    .build(),
            )
            .build();
        assert!(check_shape(&inv).is_err());
    }

    #[test]
    fn json_boundary_round_trip() {
        let payload = serde_json::to_string(&clean_invoice()).unwrap();
        let result = validate_json(&payload).unwrap();
        assert!(result.issues_found.is_empty());
    }

    #[test]
    fn json_boundary_rejects_garbage() {
        assert!(validate_json("{\"invoiceNumber\": [1,2,3]}").is_err());
        assert!(validate_json("not json").is_err());
    }
}
