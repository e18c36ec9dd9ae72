//! Rules 13–15: place of supply, document type constraints, reverse charge.

use rust_decimal::Decimal;

use crate::core::gstin::state_code as gstin_state;
use crate::core::{Category, Invoice, InvoiceType, Severity, TaxType, ValidationIssue};

use super::{MONEY_TOLERANCE, RuleContext, total_line_tax};

const POS_LAW: &str = "Sections 10–13 of the IGST Act, 2017 — place of supply";
const RCM_LAW: &str = "Sections 9(3) and 9(4) of the CGST Act, 2017 — reverse charge";

/// Rule 13: place of supply must be present, and when present it is the
/// authoritative intra/inter-state signal for the regime charged per line.
pub(super) fn place_of_supply(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let Some(pos) = invoice.place_of_supply.as_deref() else {
        return vec![
            ValidationIssue::new(
                "place-of-supply",
                Category::PlaceOfSupply,
                Severity::Warning,
                "Place of supply missing",
                "No place-of-supply state code was provided.".to_owned(),
                "Add the 2-digit state code of the place of supply — usually the buyer's registered state, unless the supply rules fix it elsewhere.",
                "Without the place of supply the intra/inter-state classification rests on the GSTIN prefixes alone, which billing arrangements can contradict.",
            )
            .law(POS_LAW),
        ];
    };

    let Some(supplier_state) = gstin_state(&invoice.supplier_gstin) else {
        // No readable supplier state prefix; the GSTIN rules flag that.
        return Vec::new();
    };

    let intrastate = pos == supplier_state;
    let mut issues = Vec::new();

    for line in &invoice.line_items {
        let suffix = format!("line-{}", line.line_number);
        let display = format!("Line {}", line.line_number);
        match (intrastate, line.tax_type) {
            (true, TaxType::Igst) => issues.push(
                ValidationIssue::new(
                    "place-of-supply",
                    Category::PlaceOfSupply,
                    Severity::Critical,
                    "IGST charged but place of supply is intra-state",
                    format!(
                        "Place of supply {pos} equals the supplier's state — an intra-state supply attracts CGST+SGST, not IGST."
                    ),
                    "Change the line's tax type to CGST+SGST, or correct the place of supply if it is wrong.",
                    "Tax paid under the wrong head must be re-paid under the correct one and refunded (Section 77 CGST Act).",
                )
                .at(&suffix, &display)
                .expected("CGST_SGST")
                .found("IGST")
                .law(POS_LAW),
            ),
            (false, TaxType::CgstSgst) => issues.push(
                ValidationIssue::new(
                    "place-of-supply",
                    Category::PlaceOfSupply,
                    Severity::Critical,
                    "CGST+SGST charged but place of supply is inter-state",
                    format!(
                        "Place of supply {pos} differs from the supplier's state {supplier_state} — an inter-state supply attracts IGST."
                    ),
                    "Change the line's tax type to IGST, or correct the place of supply if it is wrong.",
                    "Tax paid under the wrong head must be re-paid under the correct one and refunded (Section 77 CGST Act).",
                )
                .at(&suffix, &display)
                .expected("IGST")
                .found("CGST_SGST")
                .law(POS_LAW),
            ),
            _ => {}
        }
    }

    issues
}

/// Rule 14: document-type constraints. Bills of supply carry no GST at
/// all; export invoices never carry the domestic CGST+SGST split.
pub(super) fn invoice_type(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    match invoice.invoice_type {
        InvoiceType::TaxInvoice | InvoiceType::CreditNote | InvoiceType::DebitNote => Vec::new(),

        InvoiceType::BillOfSupply => {
            let tax = total_line_tax(invoice);
            if tax <= Decimal::ZERO {
                return Vec::new();
            }
            vec![
                ValidationIssue::new(
                    "invoice-type",
                    Category::InvoiceType,
                    Severity::Critical,
                    "Bill of supply cannot charge GST",
                    format!(
                        "This document is a bill of supply but its lines carry {tax} of GST."
                    ),
                    "Either remove the tax amounts (exempt/composition supply) or issue a tax invoice instead.",
                    "Composition dealers and exempt supplies must not collect GST; tax collected on a bill of supply is collected without authority of law.",
                )
                .found(tax)
                .expected(Decimal::ZERO)
                .law("Section 31(3)(c) of the CGST Act, 2017 — bill of supply"),
            ]
        }

        InvoiceType::ExportInvoice => {
            let mut issues = Vec::new();
            for line in &invoice.line_items {
                if line.tax_type == TaxType::CgstSgst
                    && (line.cgst > Decimal::ZERO || line.sgst > Decimal::ZERO)
                {
                    issues.push(
                        ValidationIssue::new(
                            "invoice-type",
                            Category::InvoiceType,
                            Severity::Critical,
                            "Export invoice charges CGST+SGST",
                            "Exports are inter-state, zero-rated supplies — the domestic CGST+SGST split never applies.".to_owned(),
                            "Re-issue the line under IGST (with or without payment of tax, per the chosen export route).",
                            "CGST/SGST on an export blocks the zero-rating benefit and the refund route for the exporter.",
                        )
                        .at(format!("line-{}", line.line_number), format!("Line {}", line.line_number))
                        .law("Section 16 of the IGST Act, 2017 — zero-rated supply"),
                    );
                }
            }
            issues
        }
    }
}

/// Rule 15: under reverse charge the supplier must not collect tax; a
/// correctly zero-taxed RCM invoice still gets an informational note about
/// the buyer's self-assessment obligation.
pub(super) fn reverse_charge(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    if !invoice.reverse_charge {
        return Vec::new();
    }

    let tax = total_line_tax(invoice);
    if tax > MONEY_TOLERANCE {
        return vec![
            ValidationIssue::new(
                "reverse-charge",
                Category::ReverseCharge,
                Severity::Warning,
                "Tax charged on a reverse-charge invoice",
                format!(
                    "The invoice is marked reverse charge, yet the lines carry {tax} of GST charged by the supplier."
                ),
                "Remove the tax amounts — under RCM the recipient self-assesses and pays the tax directly.",
                "Tax wrongly collected by the supplier under RCM does not discharge the recipient's liability; the recipient must still pay.",
            )
            .found(tax)
            .expected(Decimal::ZERO)
            .law(RCM_LAW),
        ];
    }

    vec![
        ValidationIssue::new(
            "reverse-charge",
            Category::ReverseCharge,
            Severity::Info,
            "Reverse charge applies",
            "The invoice is correctly issued without supplier-charged tax; the recipient must self-assess GST on it.".to_owned(),
            "No change needed on the invoice. The recipient pays the tax in cash and may claim it as ITC where eligible.",
            "The recipient carries the tax liability for this supply and must report it in their GSTR-3B.",
        )
        .law(RCM_LAW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, LineItemBuilder};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn ctx() -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        }
    }

    fn igst_line(n: u32) -> crate::core::LineItem {
        LineItemBuilder::new(n, "Speakers", "8518")
            .quantity_rate(dec!(1), dec!(1000))
            .tax(dec!(18), TaxType::Igst)
            .build()
    }

    fn cgst_line(n: u32) -> crate::core::LineItem {
        LineItemBuilder::new(n, "Speakers", "8518")
            .quantity_rate(dec!(1), dec!(1000))
            .tax(dec!(18), TaxType::CgstSgst)
            .build()
    }

    fn untaxed_line(n: u32) -> crate::core::LineItem {
        LineItemBuilder::new(n, "Raw cotton", "5201")
            .quantity_rate(dec!(10), dec!(100))
            .tax(dec!(0), TaxType::CgstSgst)
            .build()
    }

    #[test]
    fn missing_pos_warns() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .add_line(cgst_line(1))
            .build();
        let issues = place_of_supply(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn igst_against_intrastate_pos() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .place_of_supply("27")
            .add_line(igst_line(1))
            .build();
        let issues = place_of_supply(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].expected, Some("CGST_SGST".into()));
    }

    #[test]
    fn cgst_against_interstate_pos() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .place_of_supply("29")
            .add_line(cgst_line(1))
            .build();
        let issues = place_of_supply(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].expected, Some("IGST".into()));
    }

    #[test]
    fn pos_consistent_regimes_pass() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .supplier_gstin("27AAPFU0939F1ZV")
            .place_of_supply("29")
            .add_line(igst_line(1))
            .build();
        assert!(place_of_supply(&inv, &ctx()).is_empty());
    }

    #[test]
    fn bill_of_supply_with_tax_flagged() {
        let inv = InvoiceBuilder::new("BOS/1", "2026-01-15")
            .invoice_type(InvoiceType::BillOfSupply)
            .add_line(cgst_line(1))
            .build();
        let issues = invoice_type(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
        assert_eq!(issues[0].found, Some(dec!(180.00).into()));
    }

    #[test]
    fn bill_of_supply_untaxed_passes() {
        let inv = InvoiceBuilder::new("BOS/1", "2026-01-15")
            .invoice_type(InvoiceType::BillOfSupply)
            .add_line(untaxed_line(1))
            .build();
        assert!(invoice_type(&inv, &ctx()).is_empty());
    }

    #[test]
    fn export_with_cgst_flagged_per_line() {
        let inv = InvoiceBuilder::new("EXP/1", "2026-01-15")
            .invoice_type(InvoiceType::ExportInvoice)
            .add_line(cgst_line(1))
            .add_line(igst_line(2))
            .add_line(cgst_line(3))
            .build();
        let issues = invoice_type(&inv, &ctx());
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].id, "invoice-type-line-1");
        assert_eq!(issues[1].id, "invoice-type-line-3");
    }

    #[test]
    fn tax_invoice_unconstrained() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .add_line(cgst_line(1))
            .build();
        assert!(invoice_type(&inv, &ctx()).is_empty());
    }

    #[test]
    fn rcm_with_tax_warns() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .reverse_charge(true)
            .add_line(cgst_line(1))
            .build();
        let issues = reverse_charge(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn rcm_correctly_untaxed_notes_info() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .reverse_charge(true)
            .add_line(untaxed_line(1))
            .build();
        let issues = reverse_charge(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Info);
    }

    #[test]
    fn rcm_not_marked_silent() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .add_line(cgst_line(1))
            .build();
        assert!(reverse_charge(&inv, &ctx()).is_empty());
    }
}
