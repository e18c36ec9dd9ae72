//! Rules 1–3: GSTIN presence, structure, state code, and uniqueness.

use crate::core::gstin::{GSTIN_LEN, segment_failure, state_code as gstin_state};
use crate::core::states;
use crate::core::{Category, Invoice, Severity, ValidationIssue};

use super::RuleContext;

const FORMAT_LAW: &str =
    "Section 25 of the CGST Act, 2017 read with Rule 10 of the CGST Rules — GSTIN structure";

fn parties(invoice: &Invoice) -> [(&str, Category, &'static str, &'static str); 2] {
    [
        (
            invoice.supplier_gstin.as_str(),
            Category::SupplierGstin,
            "supplier",
            "Supplier",
        ),
        (
            invoice.buyer_gstin.as_str(),
            Category::BuyerGstin,
            "buyer",
            "Buyer",
        ),
    ]
}

/// Rule 1: each GSTIN must be present, 15 characters, and match the
/// structural pattern.
pub(super) fn gstin_format(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (gstin, category, suffix, label) in parties(invoice) {
        if gstin.is_empty() {
            issues.push(
                ValidationIssue::new(
                    "gstin-format",
                    category,
                    Severity::Critical,
                    format!("{label} GSTIN missing"),
                    format!("The {} GSTIN is required on every GST invoice but was not provided.", suffix),
                    format!("Enter the {}'s 15-character GSTIN exactly as it appears on their registration certificate.", suffix),
                    "An invoice without both GSTINs is not a valid tax invoice; the buyer cannot claim input tax credit against it.",
                )
                .at(suffix, format!("{label} GSTIN"))
                .law(FORMAT_LAW),
            );
            continue;
        }

        if gstin.len() != GSTIN_LEN {
            issues.push(
                ValidationIssue::new(
                    "gstin-format",
                    category,
                    Severity::Critical,
                    format!("{label} GSTIN has wrong length"),
                    format!(
                        "A GSTIN is exactly 15 characters; '{}' has {}.",
                        gstin,
                        gstin.len()
                    ),
                    "Re-check the GSTIN against the registration certificate; characters are often dropped or duplicated when keying it in.",
                    "A wrong-length GSTIN will be rejected by the GST portal and invalidates the invoice for input tax credit.",
                )
                .at(suffix, format!("{label} GSTIN"))
                .expected("15 characters")
                .found(format!("{} characters", gstin.len()))
                .law(FORMAT_LAW),
            );
            continue;
        }

        if let Some(reason) = segment_failure(gstin) {
            issues.push(
                ValidationIssue::new(
                    "gstin-format",
                    category,
                    Severity::Critical,
                    format!("{label} GSTIN is malformed"),
                    format!("'{}' does not follow the GSTIN structure: {}.", gstin, reason),
                    "Verify the GSTIN on the GST portal (Search Taxpayer) and correct the mistyped characters.",
                    "A malformed GSTIN cannot be matched to a registered taxpayer, so the invoice fails reconciliation in GSTR-2B.",
                )
                .at(suffix, format!("{label} GSTIN"))
                .found(gstin)
                .law(FORMAT_LAW),
            );
        }
    }

    issues
}

/// Rule 2: the 2-digit state-code prefix of each present GSTIN must be a
/// notified GST state code. Structure problems are rule 1's concern — this
/// rule only judges prefixes it can actually read.
pub(super) fn state_code(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (gstin, category, suffix, label) in parties(invoice) {
        let Some(code) = gstin_state(gstin) else {
            continue;
        };
        if !states::is_valid_state_code(code) {
            issues.push(
                ValidationIssue::new(
                    "state-code",
                    category,
                    Severity::Critical,
                    format!("{label} GSTIN has invalid state code"),
                    format!(
                        "'{code}' is not a notified GST state code (01–38 or 97)."
                    ),
                    "Correct the first two digits of the GSTIN to the state code of the registered place of business.",
                    "The state code determines the tax jurisdiction; an invalid code makes intra/inter-state classification impossible.",
                )
                .at(suffix, format!("{label} GSTIN"))
                .found(code)
                .law("GST state codes notified for registration — first two digits of the GSTIN"),
            );
        }
    }

    issues
}

/// Rule 3: supplier and buyer GSTIN must differ — self-invoicing between
/// identical registrations is disallowed.
pub(super) fn duplication(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    if invoice.supplier_gstin.is_empty() || invoice.buyer_gstin.is_empty() {
        return Vec::new();
    }
    if invoice.supplier_gstin != invoice.buyer_gstin {
        return Vec::new();
    }

    vec![
        ValidationIssue::new(
            "gstin-duplication",
            Category::GstinDuplication,
            Severity::Critical,
            "Supplier and buyer GSTIN are identical",
            format!(
                "Both parties carry GSTIN '{}'; a supplier cannot invoice their own registration.",
                invoice.supplier_gstin
            ),
            "Enter the recipient's own GSTIN. For stock transfers between branches, each branch must use its distinct registration.",
            "Self-invoicing between identical GSTINs is rejected on the GST portal and voids the tax invoice.",
        )
        .found(invoice.supplier_gstin.as_str())
        .law("Section 31 of the CGST Act, 2017 — a tax invoice is issued by a supplier to a distinct recipient"),
    ]
}
