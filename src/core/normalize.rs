//! Invoice canonicalization.
//!
//! Runs before any rule: identifiers are cleaned up and every derived
//! money field is recomputed from its inputs rather than trusted. The
//! transform is pure (a fresh [`Invoice`] is returned) and idempotent.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::{Invoice, LineItem, TaxType};

/// Round a money value to 2 decimal places, half away from zero
/// (commercial rounding).
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Produce the canonical form of an invoice.
///
/// - GSTINs are upper-cased with all whitespace stripped.
/// - The invoice number is trimmed, internal whitespace runs collapsed.
/// - Per line: negative quantity/rate degrade to zero, `taxableAmount` is
///   recomputed as quantity × rate, tax amounts are recomputed from
///   `taxableAmount × taxRate / 100` (split evenly for CGST+SGST, wholly
///   IGST otherwise), and `totalAmount` is recomputed.
/// - All recomputed money is rounded to 2 decimal places.
///
/// Declared invoice-level totals are left as declared — the totals rules
/// judge them against the recomputed line sums.
pub fn normalize(invoice: &Invoice) -> Invoice {
    let mut inv = invoice.clone();
    inv.supplier_gstin = canonical_gstin(&inv.supplier_gstin);
    inv.buyer_gstin = canonical_gstin(&inv.buyer_gstin);
    inv.invoice_number = collapse_whitespace(&inv.invoice_number);
    for line in &mut inv.line_items {
        normalize_line(line);
    }
    inv
}

fn canonical_gstin(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_line(line: &mut LineItem) {
    line.quantity = line.quantity.max(Decimal::ZERO);
    line.rate = line.rate.max(Decimal::ZERO);
    line.taxable_amount = round_money(line.quantity * line.rate);

    let tax = line.taxable_amount * line.tax_rate / dec!(100);
    match line.tax_type {
        TaxType::CgstSgst => {
            let half = round_money(tax / dec!(2));
            line.cgst = half;
            line.sgst = half;
            line.igst = Decimal::ZERO;
        }
        TaxType::Igst => {
            line.igst = round_money(tax);
            line.cgst = Decimal::ZERO;
            line.sgst = Decimal::ZERO;
        }
    }

    line.total_amount = round_money(line.taxable_amount + line.cgst + line.sgst + line.igst);
}
