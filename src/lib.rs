//! # bijak
//!
//! GST (Indian Goods & Services Tax) invoice compliance checking library:
//! a fixed battery of domain rules over a structured invoice, a 0–100
//! health score with risk tier, and a severity-grouped report with legal
//! citations and fix guidance.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating
//! point. Validation is pure and synchronous: each call is an independent
//! computation over one invoice value, so arbitrarily many validations may
//! run concurrently without locking.
//!
//! ## Quick Start
//!
//! ```rust
//! use bijak::core::*;
//! use bijak::engine::validate_with;
//! use bijak::rules::RuleContext;
//! use bijak::score::ScoreConfig;
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let invoice = InvoiceBuilder::new("INV/2026/001", "2026-01-15")
//!     .supplier_gstin("27AAPFU0939F1ZV")
//!     .buyer_gstin("27AABCU9603R1ZJ")
//!     .place_of_supply("27")
//!     .add_line(
//!         LineItemBuilder::new(1, "Bluetooth speakers", "8518")
//!             .quantity_rate(dec!(2), dec!(500))
//!             .tax(dec!(18), TaxType::CgstSgst)
//!             .build(),
//!     )
//!     .totals(dec!(1000), dec!(180), dec!(1180))
//!     .build();
//!
//! let ctx = RuleContext {
//!     today: NaiveDate::from_ymd_opt(2026, 6, 15).unwrap(),
//! };
//! let result = validate_with(&invoice, &ctx, &ScoreConfig::default());
//!
//! assert_eq!(result.health_score, 100);
//! assert_eq!(result.risk_level, RiskLevel::Low);
//! assert!(result.issues_found.is_empty());
//! ```
//!
//! Non-compliant invoices are *successful* validations that report
//! findings — only a structurally invalid payload errors:
//!
//! ```rust
//! use bijak::engine::validate_json;
//!
//! assert!(validate_json("{\"invoiceNumber\": 42}").is_err());
//! ```

pub mod core;
pub mod engine;
pub mod report;
pub mod rules;
pub mod score;

// Re-export the common surface at the crate root for convenience.
pub use crate::core::*;
pub use crate::engine::{validate, validate_json, validate_with};
pub use crate::report::{Report, build_report};
pub use crate::score::{Score, ScoreConfig, score};
