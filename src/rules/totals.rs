//! Rules 11–12: declared invoice-level totals vs derived sums.

use rust_decimal::Decimal;

use crate::core::{Category, Invoice, Severity, ValidationIssue, round_money};

use super::{MONEY_TOLERANCE, RuleContext};

const TOTALS_LAW: &str = "Rule 46 of the CGST Rules, 2017 — total value and tax shown on the invoice";

/// Rule 11: declared taxable total must equal the sum of line taxable
/// amounts within the money tolerance.
pub(super) fn taxable_total(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let derived: Decimal = invoice.line_items.iter().map(|l| l.taxable_amount).sum();
    let declared = invoice.taxable_total_amount;
    let difference = (derived - declared).abs();

    if difference <= MONEY_TOLERANCE {
        return Vec::new();
    }

    vec![
        ValidationIssue::new(
            "taxable-total",
            Category::TaxableTotal,
            Severity::Critical,
            "Declared taxable total does not match line items",
            format!(
                "The line items sum to a taxable value of {}, but the invoice declares {declared}.",
                round_money(derived)
            ),
            "Recompute the taxable total as the sum of every line's taxable amount and correct the invoice header.",
            "A header/line mismatch fails portal validation and makes the declared tax base unreliable for returns.",
        )
        .expected(round_money(derived))
        .found(declared)
        .difference(round_money(difference))
        .law(TOTALS_LAW),
    ]
}

/// Rule 12: declared grand total must equal declared taxable total plus
/// declared tax, within the money tolerance.
pub(super) fn grand_total(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let expected = invoice.taxable_total_amount + invoice.total_tax_amount;
    let declared = invoice.invoice_total_amount;
    let difference = (expected - declared).abs();

    if difference <= MONEY_TOLERANCE {
        return Vec::new();
    }

    vec![
        ValidationIssue::new(
            "invoice-total",
            Category::InvoiceTotal,
            Severity::Critical,
            "Invoice total does not equal taxable value plus tax",
            format!(
                "Taxable {} plus tax {} gives {}, but the invoice declares a total of {declared}.",
                invoice.taxable_total_amount,
                invoice.total_tax_amount,
                round_money(expected)
            ),
            "Correct the grand total to taxable total + total tax (or fix whichever component is wrong).",
            "A wrong grand total misstates the consideration payable and breaks three-way matching with payments and returns.",
        )
        .expected(round_money(expected))
        .found(declared)
        .difference(round_money(difference))
        .law(TOTALS_LAW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, LineItemBuilder, TaxType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ctx() -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        }
    }

    fn two_line_invoice() -> Invoice {
        InvoiceBuilder::new("INV/1", "2026-01-15")
            .add_line(
                LineItemBuilder::new(1, "Speakers", "8518")
                    .quantity_rate(dec!(2), dec!(500))
                    .tax(dec!(18), TaxType::CgstSgst)
                    .build(),
            )
            .add_line(
                LineItemBuilder::new(2, "Cables", "8544")
                    .quantity_rate(dec!(5), dec!(100))
                    .tax(dec!(18), TaxType::CgstSgst)
                    .build(),
            )
            .totals(dec!(1500), dec!(270), dec!(1770))
            .build()
    }

    #[test]
    fn consistent_totals_pass() {
        let inv = two_line_invoice();
        assert!(taxable_total(&inv, &ctx()).is_empty());
        assert!(grand_total(&inv, &ctx()).is_empty());
    }

    #[test]
    fn taxable_mismatch_flagged() {
        let mut inv = two_line_invoice();
        inv.taxable_total_amount = dec!(1400);
        let issues = taxable_total(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].difference, Some(dec!(100.00)));
        assert_eq!(issues[0].expected, Some(dec!(1500.00).into()));
    }

    #[test]
    fn grand_total_mismatch_flagged() {
        let mut inv = two_line_invoice();
        inv.invoice_total_amount = dec!(2000);
        let issues = grand_total(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].difference, Some(dec!(230.00)));
    }

    #[test]
    fn tolerance_absorbs_rounding() {
        let mut inv = two_line_invoice();
        inv.taxable_total_amount = dec!(1499.50);
        inv.invoice_total_amount = dec!(1770.40);
        assert!(taxable_total(&inv, &ctx()).is_empty());
        assert!(grand_total(&inv, &ctx()).is_empty());
    }
}
