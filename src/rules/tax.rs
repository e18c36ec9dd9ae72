//! Rules 4–7: tax regime selection, slab validity, and tax arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::gstin::state_code as gstin_state;
use crate::core::{Category, Invoice, LineItem, Severity, TaxType, ValidationIssue};

use super::{GST_SLABS, MONEY_TOLERANCE, RuleContext};

const JURISDICTION_LAW: &str =
    "Sections 7 and 8 of the IGST Act, 2017 — inter-state vs intra-state supply";

fn line_suffix(line: &LineItem) -> String {
    format!("line-{}", line.line_number)
}

fn line_display(line: &LineItem) -> String {
    format!("Line {}", line.line_number)
}

/// Rule 4: the charged regime must match the supply jurisdiction derived
/// from the GSTIN state codes — CGST+SGST for same-state, IGST otherwise.
///
/// When `placeOfSupply` is present it is the legally authoritative signal
/// (IGST Act §10–§13) and the place-of-supply rule judges the regime
/// instead; this rule then stands down so one defect yields one finding.
pub(super) fn tax_type_logic(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    if invoice.place_of_supply.is_some() {
        return Vec::new();
    }
    let (Some(supplier_state), Some(buyer_state)) = (
        gstin_state(&invoice.supplier_gstin),
        gstin_state(&invoice.buyer_gstin),
    ) else {
        // Without both state prefixes the jurisdiction is undecidable;
        // the GSTIN rules have already flagged the underlying problem.
        return Vec::new();
    };

    let same_state = supplier_state == buyer_state;
    let mut issues = Vec::new();

    for line in &invoice.line_items {
        match (same_state, line.tax_type) {
            (true, TaxType::Igst) => issues.push(
                ValidationIssue::new(
                    "tax-type",
                    Category::TaxType,
                    Severity::Critical,
                    "IGST charged on intra-state supply",
                    format!(
                        "Supplier and buyer are both registered in state {supplier_state}, so this is an intra-state supply — it attracts CGST+SGST, not IGST."
                    ),
                    "Change the line's tax type to CGST+SGST, splitting the tax equally between the two components.",
                    "Tax paid under the wrong head must be paid again under the correct head and the wrong payment claimed as refund (Section 77 CGST Act).",
                )
                .at(line_suffix(line), line_display(line))
                .expected("CGST_SGST")
                .found("IGST")
                .law(JURISDICTION_LAW),
            ),
            (false, TaxType::CgstSgst) => issues.push(
                ValidationIssue::new(
                    "tax-type",
                    Category::TaxType,
                    Severity::Critical,
                    "CGST+SGST charged on inter-state supply",
                    format!(
                        "Supplier (state {supplier_state}) and buyer (state {buyer_state}) are in different states, so this is an inter-state supply — it attracts IGST."
                    ),
                    "Change the line's tax type to IGST for the full tax amount.",
                    "Tax paid under the wrong head must be paid again under the correct head and the wrong payment claimed as refund (Section 77 CGST Act).",
                )
                .at(line_suffix(line), line_display(line))
                .expected("IGST")
                .found("CGST_SGST")
                .law(JURISDICTION_LAW),
            ),
            _ => {}
        }
    }

    issues
}

/// Rule 5: every line's tax rate must be one of the notified GST slabs.
pub(super) fn tax_rate_validity(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for line in &invoice.line_items {
        if !GST_SLABS.contains(&line.tax_rate.normalize()) {
            issues.push(
                ValidationIssue::new(
                    "tax-rate",
                    Category::TaxRate,
                    Severity::Critical,
                    "Tax rate is not a GST slab",
                    format!(
                        "{}% is not a notified GST rate; valid slabs are 0, 0.25, 3, 5, 12, 18 and 28 percent.",
                        line.tax_rate
                    ),
                    "Look up the correct slab for the line's HSN code in the GST rate schedule and re-price the tax.",
                    "A non-slab rate means tax was computed on a wrong basis — the return will not reconcile and may attract interest on short payment.",
                )
                .at(line_suffix(line), line_display(line))
                .found(line.tax_rate)
                .expected("one of 0, 0.25, 3, 5, 12, 18, 28")
                .law("GST rate schedules under Notification No. 1/2017-Central Tax (Rate), as amended"),
            );
        }
    }

    issues
}

/// Rule 6: per line, cgst+sgst+igst must equal taxableAmount × taxRate/100
/// within the money tolerance.
pub(super) fn gst_calculation(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for line in &invoice.line_items {
        let expected = line.taxable_amount * line.tax_rate / dec!(100);
        let actual = line.cgst + line.sgst + line.igst;
        let difference = (expected - actual).abs();
        if difference > MONEY_TOLERANCE {
            issues.push(
                ValidationIssue::new(
                    "tax-calculation",
                    Category::TaxCalculation,
                    Severity::Critical,
                    "Tax amount does not match taxable value × rate",
                    format!(
                        "Taxable value {} at {}% yields tax {}, but the line carries {}.",
                        line.taxable_amount,
                        line.tax_rate,
                        crate::core::round_money(expected),
                        actual
                    ),
                    "Recompute the line tax as taxable value × rate / 100 and update the tax amounts.",
                    "Under-charged tax becomes the supplier's liability with interest; over-charged tax must be refunded to the buyer.",
                )
                .at(line_suffix(line), line_display(line))
                .expected(crate::core::round_money(expected))
                .found(actual)
                .difference(crate::core::round_money(difference))
                .law("Section 15 of the CGST Act, 2017 — value of taxable supply"),
            );
        }
    }

    issues
}

/// Rule 7: when both CGST and SGST are charged they must be equal — the
/// two components are levied at the same rate.
pub(super) fn cgst_sgst_split(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for line in &invoice.line_items {
        if line.tax_type != TaxType::CgstSgst {
            continue;
        }
        if line.cgst <= Decimal::ZERO || line.sgst <= Decimal::ZERO {
            continue;
        }
        let difference = (line.cgst - line.sgst).abs();
        if difference > MONEY_TOLERANCE {
            issues.push(
                ValidationIssue::new(
                    "tax-split",
                    Category::TaxSplit,
                    Severity::Critical,
                    "CGST and SGST are not split equally",
                    format!(
                        "CGST {} and SGST {} differ; both components are levied at half the slab rate and must match.",
                        line.cgst, line.sgst
                    ),
                    "Set CGST and SGST each to half of the total line tax.",
                    "An unequal split short-pays one government and over-pays the other; both sides need correction in the return.",
                )
                .at(line_suffix(line), line_display(line))
                .difference(difference)
                .law("Section 9(1) of the CGST Act, 2017 and the corresponding SGST Acts — equal central and state levies"),
            );
        }
    }

    issues
}
