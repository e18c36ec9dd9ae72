use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A GST invoice as submitted for compliance checking.
///
/// Field names follow the wire format consumed by existing callers
/// (`invoiceNumber`, `supplierGSTIN`, …). Money fields are [`Decimal`] —
/// never floating point. The invoice is immutable during validation;
/// the normalizer produces a fresh canonical copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Rule 46(b) CGST Rules: consecutive serial number, max 50 characters here.
    #[serde(default)]
    pub invoice_number: String,
    /// Issue date as an ISO `YYYY-MM-DD` string. Kept as text so an
    /// unparsable date reaches the date rule instead of failing upfront.
    #[serde(default)]
    pub invoice_date: String,
    /// Supplier's 15-character GSTIN.
    #[serde(default, rename = "supplierGSTIN")]
    pub supplier_gstin: String,
    /// Buyer's 15-character GSTIN.
    #[serde(default, rename = "buyerGSTIN")]
    pub buyer_gstin: String,
    /// Cosmetic only — never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    /// Cosmetic only — never validated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Declared sum of line taxable amounts.
    #[serde(default)]
    pub taxable_total_amount: Decimal,
    /// Declared total tax across all lines.
    #[serde(default)]
    pub total_tax_amount: Decimal,
    /// Declared grand total (taxable + tax).
    #[serde(default)]
    pub invoice_total_amount: Decimal,
    #[serde(default)]
    pub invoice_type: InvoiceType,
    /// 2-digit state code of the place of supply (IGST Act §10–§13).
    /// Authoritative for intra/inter-state determination when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_of_supply: Option<String>,
    /// §9(3)/§9(4) CGST Act — reverse charge mechanism applies.
    #[serde(default)]
    pub reverse_charge: bool,
}

/// A single invoice line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// 1-based position, contiguous across the invoice.
    pub line_number: u32,
    #[serde(default)]
    pub description: String,
    /// HSN/SAC commodity classification code, nominally 4–8 digits
    /// (Notification No. 78/2020 – Central Tax).
    #[serde(default)]
    pub hsn_code: String,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub rate: Decimal,
    /// quantity × rate — recomputed by the normalizer, never trusted.
    #[serde(default)]
    pub taxable_amount: Decimal,
    /// GST slab percentage (0, 0.25, 3, 5, 12, 18, 28).
    #[serde(default)]
    pub tax_rate: Decimal,
    pub tax_type: TaxType,
    #[serde(default)]
    pub cgst: Decimal,
    #[serde(default)]
    pub sgst: Decimal,
    #[serde(default)]
    pub igst: Decimal,
    /// taxableAmount + cgst + sgst + igst — recomputed by the normalizer.
    #[serde(default)]
    pub total_amount: Decimal,
}

/// The two mutually exclusive GST levy regimes.
///
/// CGST+SGST applies to intra-state supplies (§9 CGST Act), IGST to
/// inter-state supplies (§5 IGST Act).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxType {
    #[serde(rename = "CGST_SGST")]
    CgstSgst,
    #[serde(rename = "IGST")]
    Igst,
}

/// Document type per §31 CGST Act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceType {
    /// §31(1) — regular tax invoice.
    #[default]
    TaxInvoice,
    /// §31(3)(c) — issued for exempt supplies or by composition dealers,
    /// must not carry any GST.
    BillOfSupply,
    /// §34(1) — credit note.
    CreditNote,
    /// §34(3) — debit note.
    DebitNote,
    /// §16 IGST Act — zero-rated export supply.
    ExportInvoice,
}

/// Severity of a compliance finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

/// Overall risk tier derived from the health score and issue severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Reporting category of a finding or passed check.
///
/// Every category appears in exactly one of `issuesFound` (one or more
/// findings) or `checksPassed` (exactly one record) per validation run.
/// Supplier and buyer GSTIN are tracked independently so a defect on one
/// side never masks a clean result on the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SupplierGstin,
    BuyerGstin,
    GstinDuplication,
    TaxType,
    TaxRate,
    TaxCalculation,
    TaxSplit,
    HsnCode,
    InvoiceNumber,
    InvoiceDate,
    TaxableTotal,
    InvoiceTotal,
    PlaceOfSupply,
    InvoiceType,
    ReverseCharge,
}

impl Category {
    /// All categories, in canonical reporting order.
    pub const ALL: [Category; 15] = [
        Category::SupplierGstin,
        Category::BuyerGstin,
        Category::GstinDuplication,
        Category::TaxType,
        Category::TaxRate,
        Category::TaxCalculation,
        Category::TaxSplit,
        Category::HsnCode,
        Category::InvoiceNumber,
        Category::InvoiceDate,
        Category::TaxableTotal,
        Category::InvoiceTotal,
        Category::PlaceOfSupply,
        Category::InvoiceType,
        Category::ReverseCharge,
    ];

    /// Wire identifier (kebab-case, matches the serde form).
    pub fn id(&self) -> &'static str {
        match self {
            Self::SupplierGstin => "supplier-gstin",
            Self::BuyerGstin => "buyer-gstin",
            Self::GstinDuplication => "gstin-duplication",
            Self::TaxType => "tax-type",
            Self::TaxRate => "tax-rate",
            Self::TaxCalculation => "tax-calculation",
            Self::TaxSplit => "tax-split",
            Self::HsnCode => "hsn-code",
            Self::InvoiceNumber => "invoice-number",
            Self::InvoiceDate => "invoice-date",
            Self::TaxableTotal => "taxable-total",
            Self::InvoiceTotal => "invoice-total",
            Self::PlaceOfSupply => "place-of-supply",
            Self::InvoiceType => "invoice-type",
            Self::ReverseCharge => "reverse-charge",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SupplierGstin => "Supplier GSTIN",
            Self::BuyerGstin => "Buyer GSTIN",
            Self::GstinDuplication => "GSTIN Uniqueness",
            Self::TaxType => "Tax Type",
            Self::TaxRate => "Tax Rate",
            Self::TaxCalculation => "GST Calculation",
            Self::TaxSplit => "CGST/SGST Split",
            Self::HsnCode => "HSN Code",
            Self::InvoiceNumber => "Invoice Number",
            Self::InvoiceDate => "Invoice Date",
            Self::TaxableTotal => "Taxable Value Total",
            Self::InvoiceTotal => "Invoice Total",
            Self::PlaceOfSupply => "Place of Supply",
            Self::InvoiceType => "Invoice Type",
            Self::ReverseCharge => "Reverse Charge",
        }
    }

    /// Summary recorded when the category produced no findings.
    pub fn passed_description(&self) -> &'static str {
        match self {
            Self::SupplierGstin => {
                "Supplier GSTIN is present, well-formed and carries a valid state code"
            }
            Self::BuyerGstin => {
                "Buyer GSTIN is present, well-formed and carries a valid state code"
            }
            Self::GstinDuplication => "Supplier and buyer GSTINs are distinct",
            Self::TaxType => "Tax regime (CGST+SGST vs IGST) matches the supply jurisdiction",
            Self::TaxRate => "All line tax rates are valid GST slabs",
            Self::TaxCalculation => "Line tax amounts match taxable value × rate",
            Self::TaxSplit => "CGST and SGST amounts are split equally",
            Self::HsnCode => "All lines carry well-formed HSN codes",
            Self::InvoiceNumber => "Invoice number is present and well-formed",
            Self::InvoiceDate => "Invoice date is valid and within the ITC time window",
            Self::TaxableTotal => {
                "Declared taxable total matches the sum of line taxable amounts"
            }
            Self::InvoiceTotal => "Declared invoice total matches taxable total plus tax",
            Self::PlaceOfSupply => "Place of supply is consistent with the tax regime charged",
            Self::InvoiceType => "Document type constraints are satisfied",
            Self::ReverseCharge => "Reverse charge treatment is consistent",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Value payload for a finding's `expected`/`found` fields.
///
/// Serialized untagged so the wire stays string-or-number; renderers match
/// on the variant instead of inspecting runtime types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IssueValue {
    Amount(Decimal),
    Text(String),
}

impl From<Decimal> for IssueValue {
    fn from(d: Decimal) -> Self {
        Self::Amount(d)
    }
}

impl From<&str> for IssueValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for IssueValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl std::fmt::Display for IssueValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Amount(d) => write!(f, "{d}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single compliance finding.
///
/// Findings are data, not errors — an invoice with many findings is still a
/// successful validation run. `id` is stable per logical defect instance
/// (rule id plus location suffix), so repeated runs over the same invoice
/// produce identical finding ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub id: String,
    pub rule_id: String,
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<IssueValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found: Option<IssueValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difference: Option<Decimal>,
    pub how_to_fix: String,
    pub impact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_law_context: Option<String>,
}

impl ValidationIssue {
    /// Create a finding with the mandatory payload. The id defaults to the
    /// rule id; use [`ValidationIssue::at`] to anchor it to a location.
    pub fn new(
        rule_id: &'static str,
        category: Category,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        how_to_fix: impl Into<String>,
        impact: impl Into<String>,
    ) -> Self {
        Self {
            id: rule_id.to_owned(),
            rule_id: rule_id.to_owned(),
            severity,
            category,
            title: title.into(),
            description: description.into(),
            location: None,
            expected: None,
            found: None,
            difference: None,
            how_to_fix: how_to_fix.into(),
            impact: impact.into(),
            gst_law_context: None,
        }
    }

    /// Anchor the finding to a location: sets the display location and
    /// derives a stable id of the form `{rule_id}-{suffix}`.
    pub fn at(mut self, suffix: impl AsRef<str>, display: impl Into<String>) -> Self {
        self.id = format!("{}-{}", self.rule_id, suffix.as_ref());
        self.location = Some(display.into());
        self
    }

    pub fn expected(mut self, value: impl Into<IssueValue>) -> Self {
        self.expected = Some(value.into());
        self
    }

    pub fn found(mut self, value: impl Into<IssueValue>) -> Self {
        self.found = Some(value.into());
        self
    }

    pub fn difference(mut self, value: Decimal) -> Self {
        self.difference = Some(value);
        self
    }

    /// Attach the statutory citation backing this finding.
    pub fn law(mut self, citation: impl Into<String>) -> Self {
        self.gst_law_context = Some(citation.into());
        self
    }
}

/// Record of a category whose checks all passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationCheck {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
}

impl ValidationCheck {
    /// The single passed-check record for a clean category.
    pub fn passed(category: Category) -> Self {
        Self {
            id: format!("check-{}", category.id()),
            category,
            title: category.label().to_owned(),
            description: category.passed_description().to_owned(),
        }
    }
}

/// Per-severity slice of the score breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityDeduction {
    pub count: usize,
    pub deduction: u32,
}

/// How the health score was computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub critical: SeverityDeduction,
    pub warning: SeverityDeduction,
    pub info: SeverityDeduction,
    pub total_deduction: u32,
}

/// Complete output of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Opaque identifier for this run (UUID v4).
    pub check_id: String,
    /// Composite compliance score, 0–100.
    pub health_score: u8,
    pub risk_level: RiskLevel,
    pub issues_found: Vec<ValidationIssue>,
    pub checks_passed: Vec<ValidationCheck>,
    pub score_breakdown: ScoreBreakdown,
    pub processing_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}
