//! The GST compliance rule set.
//!
//! Each rule is a pure function of the (normalized) invoice and a
//! [`RuleContext`]; it returns zero or more findings and never mutates its
//! input. Rules are independent of each other, so execution order only
//! affects reporting order — the registry fixes the canonical order once,
//! at compile time.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::{Invoice, ValidationIssue};

mod document;
mod gstin;
mod supply;
mod tax;
mod totals;

/// Deliberate slack for money comparisons: real-world invoices accumulate
/// sub-rupee rounding differences that are not compliance defects.
pub const MONEY_TOLERANCE: Decimal = dec!(1);

/// The GST rate slabs in force (percent).
pub const GST_SLABS: &[Decimal] = &[
    dec!(0),
    dec!(0.25),
    dec!(3),
    dec!(5),
    dec!(12),
    dec!(18),
    dec!(28),
];

/// Read-only context shared by all rules in one run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    /// Reference date for date-window checks (normally today).
    pub today: NaiveDate,
}

/// A single compliance rule.
pub struct Rule {
    /// Stable rule identifier, used as the finding id prefix.
    pub id: &'static str,
    /// Human-readable rule name.
    pub name: &'static str,
    pub check: fn(&Invoice, &RuleContext) -> Vec<ValidationIssue>,
}

/// The full rule registry in canonical execution order.
///
/// Assembled once, immutable — new rules are added here and nowhere else.
pub static RULES: &[Rule] = &[
    Rule {
        id: "gstin-format",
        name: "GSTIN format",
        check: gstin::gstin_format,
    },
    Rule {
        id: "state-code",
        name: "GSTIN state code",
        check: gstin::state_code,
    },
    Rule {
        id: "gstin-duplication",
        name: "Distinct supplier and buyer GSTIN",
        check: gstin::duplication,
    },
    Rule {
        id: "tax-type",
        name: "Tax regime vs supply jurisdiction",
        check: tax::tax_type_logic,
    },
    Rule {
        id: "tax-rate",
        name: "GST slab validity",
        check: tax::tax_rate_validity,
    },
    Rule {
        id: "tax-calculation",
        name: "GST calculation accuracy",
        check: tax::gst_calculation,
    },
    Rule {
        id: "tax-split",
        name: "CGST/SGST equal split",
        check: tax::cgst_sgst_split,
    },
    Rule {
        id: "hsn-code",
        name: "HSN code presence and format",
        check: document::hsn_code,
    },
    Rule {
        id: "invoice-number",
        name: "Invoice number format",
        check: document::invoice_number,
    },
    Rule {
        id: "invoice-date",
        name: "Invoice date validity",
        check: document::invoice_date,
    },
    Rule {
        id: "taxable-total",
        name: "Taxable value total",
        check: totals::taxable_total,
    },
    Rule {
        id: "invoice-total",
        name: "Invoice grand total",
        check: totals::grand_total,
    },
    Rule {
        id: "place-of-supply",
        name: "Place of supply consistency",
        check: supply::place_of_supply,
    },
    Rule {
        id: "invoice-type",
        name: "Document type constraints",
        check: supply::invoice_type,
    },
    Rule {
        id: "reverse-charge",
        name: "Reverse charge treatment",
        check: supply::reverse_charge,
    },
];

/// Sum of all tax amounts across every line.
pub(crate) fn total_line_tax(invoice: &Invoice) -> Decimal {
    invoice
        .line_items
        .iter()
        .map(|l| l.cgst + l.sgst + l.igst)
        .sum()
}
