//! Rules 8–10: HSN codes, invoice number, and invoice date.

use chrono::NaiveDate;

use crate::core::{Category, Invoice, Severity, ValidationIssue};

use super::RuleContext;

const HSN_LAW: &str =
    "Notification No. 78/2020 – Central Tax — HSN digit requirements on tax invoices";
const NUMBER_LAW: &str =
    "Rule 46(b) of the CGST Rules, 2017 — consecutive serial number containing only letters, numerals, '-' and '/'";

/// Longest invoice number this checker accepts without complaint.
const MAX_INVOICE_NUMBER_LEN: usize = 50;

/// ITC claims time-bar after roughly a year (Section 16(4) CGST Act).
const ITC_WINDOW_DAYS: i64 = 365;

fn is_hsn(code: &str) -> bool {
    (4..=8).contains(&code.len()) && code.bytes().all(|b| b.is_ascii_digit())
}

/// Rule 8: every line needs an HSN/SAC code of 4–8 digits.
pub(super) fn hsn_code(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for line in &invoice.line_items {
        let suffix = format!("line-{}", line.line_number);
        let display = format!("Line {}", line.line_number);

        if line.hsn_code.is_empty() {
            issues.push(
                ValidationIssue::new(
                    "hsn-code",
                    Category::HsnCode,
                    Severity::Warning,
                    "HSN code missing",
                    "The line has no HSN/SAC classification code.".to_owned(),
                    "Look up the commodity's HSN code (goods) or SAC (services) and add it to the line.",
                    "Invoices above the turnover threshold must carry HSN codes; missing codes draw scrutiny and penalties under Section 125.",
                )
                .at(&suffix, &display)
                .law(HSN_LAW),
            );
        } else if !is_hsn(&line.hsn_code) {
            issues.push(
                ValidationIssue::new(
                    "hsn-code",
                    Category::HsnCode,
                    Severity::Warning,
                    "HSN code malformed",
                    format!(
                        "'{}' is not a valid HSN code — expected 4 to 8 digits.",
                        line.hsn_code
                    ),
                    "Replace the value with the numeric HSN/SAC code from the GST rate schedule.",
                    "A malformed HSN prevents rate verification and fails HSN-summary reporting in GSTR-1.",
                )
                .at(&suffix, &display)
                .found(line.hsn_code.as_str())
                .expected("4-8 digits")
                .law(HSN_LAW),
            );
        }
    }

    issues
}

/// Rule 9: invoice number must be present, within length, and limited to
/// the character set Rule 46(b) permits.
pub(super) fn invoice_number(invoice: &Invoice, _ctx: &RuleContext) -> Vec<ValidationIssue> {
    let number = &invoice.invoice_number;

    if number.is_empty() {
        return vec![
            ValidationIssue::new(
                "invoice-number",
                Category::InvoiceNumber,
                Severity::Critical,
                "Invoice number missing",
                "Every tax invoice must carry a serial number.".to_owned(),
                "Assign the next number from your consecutive invoice series.",
                "An unnumbered document is not a tax invoice; it cannot be reported in GSTR-1 or matched by the buyer.",
            )
            .law(NUMBER_LAW),
        ];
    }

    let mut issues = Vec::new();

    if number.chars().count() > MAX_INVOICE_NUMBER_LEN {
        issues.push(
            ValidationIssue::new(
                "invoice-number",
                Category::InvoiceNumber,
                Severity::Warning,
                "Invoice number unusually long",
                format!(
                    "'{}' is {} characters long; keep serial numbers short and consistent.",
                    number,
                    number.chars().count()
                ),
                "Shorten the serial number — a compact series like INV/2026/001 is easier to reconcile.",
                "Over-long numbers get truncated or mistyped in returns and purchase registers, breaking invoice matching.",
            )
            .at("length", "Invoice number")
            .law(NUMBER_LAW),
        );
    }

    let bad: String = number
        .chars()
        .filter(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '/' | '\\')))
        .collect();
    if !bad.is_empty() {
        issues.push(
            ValidationIssue::new(
                "invoice-number",
                Category::InvoiceNumber,
                Severity::Warning,
                "Invoice number contains special characters",
                format!("'{number}' contains characters outside letters, numerals, '-', '/' and '\\'."),
                "Restrict the serial number to letters, numerals, hyphen and slash.",
                "Disallowed characters are rejected by the e-invoice schema and portal uploads.",
            )
            .at("charset", "Invoice number")
            .found(bad)
            .law(NUMBER_LAW),
        );
    }

    issues
}

/// Rule 10: invoice date must parse, must not be in the future, and dates
/// older than a year raise the ITC time-bar warning.
pub(super) fn invoice_date(invoice: &Invoice, ctx: &RuleContext) -> Vec<ValidationIssue> {
    let raw = invoice.invoice_date.trim();

    if raw.is_empty() {
        return vec![
            ValidationIssue::new(
                "invoice-date",
                Category::InvoiceDate,
                Severity::Critical,
                "Invoice date missing",
                "Every tax invoice must carry its date of issue.".to_owned(),
                "Enter the date the invoice was issued, in YYYY-MM-DD form.",
                "Without a date the time of supply cannot be fixed, so the tax period and ITC eligibility are undeterminable.",
            )
            .law("Section 31 of the CGST Act, 2017 — time of issue of invoice"),
        ];
    }

    let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
        return vec![
            ValidationIssue::new(
                "invoice-date",
                Category::InvoiceDate,
                Severity::Critical,
                "Invoice date unreadable",
                format!("'{raw}' could not be parsed as an ISO date (YYYY-MM-DD)."),
                "Correct the date to YYYY-MM-DD form, e.g. 2026-01-15.",
                "An unreadable date cannot be reported in returns and blocks the buyer's ITC claim.",
            )
            .found(raw)
            .expected("YYYY-MM-DD")
            .law("Section 31 of the CGST Act, 2017 — time of issue of invoice"),
        ];
    };

    if date > ctx.today {
        return vec![
            ValidationIssue::new(
                "invoice-date",
                Category::InvoiceDate,
                Severity::Critical,
                "Invoice dated in the future",
                format!("The invoice is dated {date}, after today ({}).", ctx.today),
                "Correct the date to the actual date of issue.",
                "A future-dated invoice misstates the time of supply and shifts tax liability into the wrong period.",
            )
            .found(raw)
            .law("Section 31 of the CGST Act, 2017 — time of issue of invoice"),
        ];
    }

    if (ctx.today - date).num_days() > ITC_WINDOW_DAYS {
        return vec![
            ValidationIssue::new(
                "invoice-date",
                Category::InvoiceDate,
                Severity::Warning,
                "Invoice older than the ITC window",
                format!(
                    "The invoice is dated {date}, more than {ITC_WINDOW_DAYS} days ago."
                ),
                "Claim any pending input tax credit immediately — the statutory window is closing or closed.",
                "Section 16(4) bars ITC claims after the cut-off following the financial year of the invoice.",
            )
            .found(raw)
            .law("Section 16(4) of the CGST Act, 2017 — time limit for input tax credit"),
        ];
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{InvoiceBuilder, LineItemBuilder, TaxType};
    use rust_decimal_macros::dec;

    fn ctx() -> RuleContext {
        RuleContext {
            today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
        }
    }

    fn line_with_hsn(hsn: &str) -> crate::core::LineItem {
        LineItemBuilder::new(1, "Speakers", hsn)
            .quantity_rate(dec!(1), dec!(100))
            .tax(dec!(18), TaxType::CgstSgst)
            .build()
    }

    #[test]
    fn missing_hsn_warns() {
        let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
            .add_line(line_with_hsn(""))
            .build();
        let issues = hsn_code(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn malformed_hsn_warns() {
        for bad in ["85A8", "123", "123456789", "85-18"] {
            let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
                .add_line(line_with_hsn(bad))
                .build();
            assert_eq!(hsn_code(&inv, &ctx()).len(), 1, "hsn {bad}");
        }
    }

    #[test]
    fn valid_hsn_lengths_pass() {
        for good in ["8518", "851822", "85182200"] {
            let inv = InvoiceBuilder::new("INV/1", "2026-01-15")
                .add_line(line_with_hsn(good))
                .build();
            assert!(hsn_code(&inv, &ctx()).is_empty(), "hsn {good}");
        }
    }

    #[test]
    fn missing_invoice_number_critical() {
        let inv = InvoiceBuilder::new("", "2026-01-15").build();
        let issues = invoice_number(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Critical);
    }

    #[test]
    fn long_and_special_number_warns_twice() {
        let inv = InvoiceBuilder::new(format!("INV#{}", "9".repeat(60)), "2026-01-15").build();
        let issues = invoice_number(&inv, &ctx());
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::Warning));
    }

    #[test]
    fn clean_number_passes() {
        let inv = InvoiceBuilder::new("INV/2026-001\\A", "2026-01-15").build();
        assert!(invoice_number(&inv, &ctx()).is_empty());
    }

    #[test]
    fn unparsable_date_critical() {
        for bad in ["15-01-2026", "2026/01/15", "yesterday", "2026-13-40"] {
            let inv = InvoiceBuilder::new("INV/1", bad).build();
            let issues = invoice_date(&inv, &ctx());
            assert_eq!(issues.len(), 1, "date {bad}");
            assert_eq!(issues[0].severity, Severity::Critical);
        }
    }

    #[test]
    fn future_date_critical() {
        let inv = InvoiceBuilder::new("INV/1", "2026-06-16").build();
        let issues = invoice_date(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert!(issues[0].title.contains("future"));
    }

    #[test]
    fn stale_date_warns() {
        let inv = InvoiceBuilder::new("INV/1", "2025-06-01").build();
        let issues = invoice_date(&inv, &ctx());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn boundary_dates_pass() {
        // today and exactly 365 days ago are both acceptable
        for ok in ["2026-06-15", "2025-06-15"] {
            let inv = InvoiceBuilder::new("INV/1", ok).build();
            assert!(invoice_date(&inv, &ctx()).is_empty(), "date {ok}");
        }
    }
}
