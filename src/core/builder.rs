use rust_decimal::Decimal;

use super::types::*;

/// Fluent constructor for [`Invoice`] values.
///
/// ```
/// use bijak::core::*;
/// use rust_decimal_macros::dec;
///
/// let invoice = InvoiceBuilder::new("INV/2026/001", "2026-01-15")
///     .supplier_gstin("27AAPFU0939F1ZV")
///     .buyer_gstin("27AABCU9603R1ZJ")
///     .add_line(
///         LineItemBuilder::new(1, "Bluetooth speakers", "8518")
///             .quantity_rate(dec!(2), dec!(500))
///             .tax(dec!(18), TaxType::CgstSgst)
///             .build(),
///     )
///     .totals(dec!(1000), dec!(180), dec!(1180))
///     .build();
///
/// assert_eq!(invoice.line_items.len(), 1);
/// ```
///
/// The builder only assembles the value — compliance checking happens in
/// the validation engine, which accepts any shape the type system allows.
pub struct InvoiceBuilder {
    invoice: Invoice,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            invoice: Invoice {
                invoice_number: number.into(),
                invoice_date: date.into(),
                supplier_gstin: String::new(),
                buyer_gstin: String::new(),
                supplier_name: None,
                buyer_name: None,
                line_items: Vec::new(),
                taxable_total_amount: Decimal::ZERO,
                total_tax_amount: Decimal::ZERO,
                invoice_total_amount: Decimal::ZERO,
                invoice_type: InvoiceType::TaxInvoice,
                place_of_supply: None,
                reverse_charge: false,
            },
        }
    }

    pub fn supplier_gstin(mut self, gstin: impl Into<String>) -> Self {
        self.invoice.supplier_gstin = gstin.into();
        self
    }

    pub fn buyer_gstin(mut self, gstin: impl Into<String>) -> Self {
        self.invoice.buyer_gstin = gstin.into();
        self
    }

    pub fn supplier_name(mut self, name: impl Into<String>) -> Self {
        self.invoice.supplier_name = Some(name.into());
        self
    }

    pub fn buyer_name(mut self, name: impl Into<String>) -> Self {
        self.invoice.buyer_name = Some(name.into());
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.invoice.line_items.push(line);
        self
    }

    /// Declared invoice-level totals: taxable, tax, grand total.
    pub fn totals(mut self, taxable: Decimal, tax: Decimal, total: Decimal) -> Self {
        self.invoice.taxable_total_amount = taxable;
        self.invoice.total_tax_amount = tax;
        self.invoice.invoice_total_amount = total;
        self
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice.invoice_type = invoice_type;
        self
    }

    pub fn place_of_supply(mut self, state_code: impl Into<String>) -> Self {
        self.invoice.place_of_supply = Some(state_code.into());
        self
    }

    pub fn reverse_charge(mut self, applies: bool) -> Self {
        self.invoice.reverse_charge = applies;
        self
    }

    pub fn build(self) -> Invoice {
        self.invoice
    }
}

/// Fluent constructor for [`LineItem`] values.
///
/// Derived fields (`taxableAmount`, tax amounts, `totalAmount`) default to
/// what quantity × rate × slab yields, rounded to 2 decimal places, so
/// built lines are arithmetically consistent unless overridden.
pub struct LineItemBuilder {
    line: LineItem,
}

impl LineItemBuilder {
    pub fn new(
        line_number: u32,
        description: impl Into<String>,
        hsn_code: impl Into<String>,
    ) -> Self {
        Self {
            line: LineItem {
                line_number,
                description: description.into(),
                hsn_code: hsn_code.into(),
                quantity: Decimal::ZERO,
                rate: Decimal::ZERO,
                taxable_amount: Decimal::ZERO,
                tax_rate: Decimal::ZERO,
                tax_type: TaxType::CgstSgst,
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
                igst: Decimal::ZERO,
                total_amount: Decimal::ZERO,
            },
        }
    }

    /// Set quantity and unit rate; recomputes the derived amounts.
    pub fn quantity_rate(mut self, quantity: Decimal, rate: Decimal) -> Self {
        self.line.quantity = quantity;
        self.line.rate = rate;
        self.recompute()
    }

    /// Set the tax slab and regime; recomputes the derived amounts.
    pub fn tax(mut self, tax_rate: Decimal, tax_type: TaxType) -> Self {
        self.line.tax_rate = tax_rate;
        self.line.tax_type = tax_type;
        self.recompute()
    }

    /// Override the taxable amount (for exercising rules on inconsistent data).
    pub fn taxable_amount(mut self, amount: Decimal) -> Self {
        self.line.taxable_amount = amount;
        self
    }

    /// Override the tax amounts (for exercising rules on inconsistent data).
    pub fn tax_amounts(mut self, cgst: Decimal, sgst: Decimal, igst: Decimal) -> Self {
        self.line.cgst = cgst;
        self.line.sgst = sgst;
        self.line.igst = igst;
        self
    }

    /// Override the line total (for exercising rules on inconsistent data).
    pub fn total_amount(mut self, amount: Decimal) -> Self {
        self.line.total_amount = amount;
        self
    }

    fn recompute(mut self) -> Self {
        use super::normalize::round_money;
        use rust_decimal_macros::dec;

        self.line.taxable_amount = round_money(self.line.quantity * self.line.rate);
        let tax = self.line.taxable_amount * self.line.tax_rate / dec!(100);
        match self.line.tax_type {
            TaxType::CgstSgst => {
                let half = round_money(tax / dec!(2));
                self.line.cgst = half;
                self.line.sgst = half;
                self.line.igst = Decimal::ZERO;
            }
            TaxType::Igst => {
                self.line.igst = round_money(tax);
                self.line.cgst = Decimal::ZERO;
                self.line.sgst = Decimal::ZERO;
            }
        }
        self.line.total_amount =
            round_money(self.line.taxable_amount + self.line.cgst + self.line.sgst + self.line.igst);
        self
    }

    pub fn build(self) -> LineItem {
        self.line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn built_line_is_consistent() {
        let line = LineItemBuilder::new(1, "Speakers", "8518")
            .quantity_rate(dec!(2), dec!(500))
            .tax(dec!(18), TaxType::CgstSgst)
            .build();

        assert_eq!(line.taxable_amount, dec!(1000.00));
        assert_eq!(line.cgst, dec!(90.00));
        assert_eq!(line.sgst, dec!(90.00));
        assert_eq!(line.total_amount, dec!(1180.00));
    }

    #[test]
    fn overrides_stick() {
        let line = LineItemBuilder::new(1, "Speakers", "8518")
            .quantity_rate(dec!(1), dec!(1000))
            .tax(dec!(18), TaxType::Igst)
            .tax_amounts(dec!(90), dec!(90), Decimal::ZERO)
            .build();

        // overridden after tax() — kept as given
        assert_eq!(line.cgst, dec!(90));
        assert_eq!(line.igst, Decimal::ZERO);
    }
}
