//! Business events and their posting rules.
//!
//! This is the event rule registry: a closed mapping from business event
//! to the debit/credit lines it produces. Events are a tagged union and
//! dispatch is an exhaustive match, so adding an event type means adding
//! one variant and one match arm; the posting engine never changes.
//!
//! Account numbers follow the chart used by the chart-of-accounts loader
//! (see `folio-db`): 1000 bank, 1200 AR, 1400 VAT receivable, 2200 AP and
//! advances, 4000 expenses, 4700 VAT payable, 7600 revenue, plus the
//! profit-share accounts 6300/2600/2601/8400 and 4999 for rounding
//! differences.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_shared::types::quantize;

use super::types::RuleLine;

/// Bank / cash account.
pub const ACCT_BANK: &str = "1000";
/// Accounts receivable.
pub const ACCT_AR: &str = "1200";
/// VAT receivable (input VAT).
pub const ACCT_VAT_RECEIVABLE: &str = "1400";
/// Accounts payable and customer advances.
pub const ACCT_AP: &str = "2200";
/// Profit share owed to the company reserve.
pub const ACCT_PROFIT_COMPANY: &str = "2600";
/// Profit share owed to workers.
pub const ACCT_PROFIT_WORKERS: &str = "2601";
/// Goods in transit / intracommunity acquisitions.
pub const ACCT_IC_GOODS: &str = "3000";
/// Operating expenses.
pub const ACCT_EXPENSE: &str = "4000";
/// VAT payable (output VAT).
pub const ACCT_VAT_PAYABLE: &str = "4700";
/// Rounding differences.
pub const ACCT_ROUNDING: &str = "4999";
/// Profit distribution base.
pub const ACCT_PROFIT_BASE: &str = "6300";
/// Sales revenue.
pub const ACCT_REVENUE: &str = "7600";
/// Owner's profit share.
pub const ACCT_PROFIT_OWNER: &str = "8400";

/// A named business event together with its payload.
///
/// Every variant maps to a pure posting rule: identical payload always
/// yields the identical line set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessEvent {
    /// A domestic sales invoice was posted, with output VAT.
    SaleInvoicePosted {
        /// Net invoice amount.
        net: Decimal,
        /// VAT amount.
        vat: Decimal,
    },
    /// An export sale at 0% VAT.
    SaleExport {
        /// Net invoice amount.
        net: Decimal,
    },
    /// A customer paid an advance, creating a liability.
    AdvanceReceipt {
        /// Advance amount.
        amount: Decimal,
    },
    /// An advance was settled against an issued invoice.
    AdvanceSettlement {
        /// Settled amount.
        amount: Decimal,
    },
    /// An incoming supplier invoice with deductible VAT.
    PurchaseInvoicePosted {
        /// Net invoice amount.
        net: Decimal,
        /// VAT amount.
        vat: Decimal,
    },
    /// A customer paid an invoice via bank transfer.
    BankCustomerPayment {
        /// Payment amount.
        amount: Decimal,
    },
    /// A supplier invoice was paid from the bank account.
    BankSupplierPayment {
        /// Payment amount.
        amount: Decimal,
    },
    /// Reverse-charge construction services.
    RcConstruction {
        /// Net amount.
        net: Decimal,
        /// Self-assessed VAT amount.
        vat: Decimal,
    },
    /// Intracommunity acquisition with self-assessed VAT.
    IcAcquisition {
        /// Net amount.
        net: Decimal,
        /// Self-assessed VAT amount.
        vat: Decimal,
    },
    /// Annual profit distributed 50/30/20 between company, workers and owner.
    ProfitShare {
        /// Distribution base.
        base: Decimal,
    },
}

impl BusinessEvent {
    /// Returns the event's wire name (e.g. `SALE_INVOICE_POSTED`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SaleInvoicePosted { .. } => "SALE_INVOICE_POSTED",
            Self::SaleExport { .. } => "SALE_EXPORT",
            Self::AdvanceReceipt { .. } => "ADVANCE_RECEIPT",
            Self::AdvanceSettlement { .. } => "ADVANCE_SETTLEMENT",
            Self::PurchaseInvoicePosted { .. } => "PURCHASE_INVOICE_POSTED",
            Self::BankCustomerPayment { .. } => "BANK_CUSTOMER_PAYMENT",
            Self::BankSupplierPayment { .. } => "BANK_SUPPLIER_PAYMENT",
            Self::RcConstruction { .. } => "RC_CONSTRUCTION",
            Self::IcAcquisition { .. } => "IC_ACQUISITION",
            Self::ProfitShare { .. } => "PROFIT_SHARE",
        }
    }

    /// Resolves the event to its raw posting lines.
    ///
    /// Line amounts are not yet quantized; the posting engine normalizes
    /// them before persistence.
    #[must_use]
    pub fn lines(&self) -> Vec<RuleLine> {
        match *self {
            Self::SaleInvoicePosted { net, vat } => vec![
                RuleLine::debit(ACCT_AR, net + vat),
                RuleLine::credit(ACCT_REVENUE, net),
                RuleLine::credit(ACCT_VAT_PAYABLE, vat),
            ],
            Self::SaleExport { net } => vec![
                RuleLine::debit(ACCT_AR, net),
                RuleLine::credit(ACCT_REVENUE, net),
            ],
            Self::AdvanceReceipt { amount } => vec![
                RuleLine::debit(ACCT_BANK, amount),
                RuleLine::credit(ACCT_AP, amount),
            ],
            Self::AdvanceSettlement { amount } => vec![
                RuleLine::debit(ACCT_AP, amount),
                RuleLine::credit(ACCT_AR, amount),
            ],
            Self::PurchaseInvoicePosted { net, vat } => vec![
                RuleLine::debit(ACCT_EXPENSE, net),
                RuleLine::debit(ACCT_VAT_RECEIVABLE, vat),
                RuleLine::credit(ACCT_AP, net + vat),
            ],
            Self::BankCustomerPayment { amount } => vec![
                RuleLine::debit(ACCT_BANK, amount),
                RuleLine::credit(ACCT_AR, amount),
            ],
            Self::BankSupplierPayment { amount } => vec![
                RuleLine::debit(ACCT_AP, amount),
                RuleLine::credit(ACCT_BANK, amount),
            ],
            Self::RcConstruction { net, vat } => vec![
                RuleLine::debit(ACCT_EXPENSE, net),
                RuleLine::credit(ACCT_AP, net),
                RuleLine::debit(ACCT_VAT_RECEIVABLE, vat),
                RuleLine::credit(ACCT_VAT_PAYABLE, vat),
            ],
            Self::IcAcquisition { net, vat } => vec![
                RuleLine::debit(ACCT_IC_GOODS, net),
                RuleLine::credit(ACCT_AP, net),
                RuleLine::debit(ACCT_VAT_RECEIVABLE, vat),
                RuleLine::credit(ACCT_VAT_PAYABLE, vat),
            ],
            Self::ProfitShare { base } => profit_share_lines(base),
        }
    }

    /// Default entry description when the caller supplies none.
    #[must_use]
    pub fn default_description(&self) -> String {
        format!("Auto post {}", self.name())
    }
}

/// Quantized 50/30/20 profit split with an explicit rounding-difference line.
///
/// The three quantized shares may not sum exactly to the base (e.g.
/// base 0.03 splits into 0.02/0.01/0.01); the difference lands on the
/// rounding account so the entry always balances to the exact base.
///
/// The base is quantized first so the difference is measured against the
/// amount that will actually be posted on the base line.
fn profit_share_lines(base: Decimal) -> Vec<RuleLine> {
    let base = quantize(base);
    let company = quantize(base * Decimal::new(50, 2));
    let workers = quantize(base * Decimal::new(30, 2));
    let owner = quantize(base * Decimal::new(20, 2));
    let diff = base - (company + workers + owner);

    let mut lines = vec![
        RuleLine::debit(ACCT_PROFIT_BASE, base),
        RuleLine::credit(ACCT_PROFIT_COMPANY, company),
        RuleLine::credit(ACCT_PROFIT_WORKERS, workers),
        RuleLine::credit(ACCT_PROFIT_OWNER, owner),
    ];
    if !diff.is_zero() {
        if diff > Decimal::ZERO {
            lines.push(RuleLine::credit(ACCT_ROUNDING, diff));
        } else {
            lines.push(RuleLine::debit(ACCT_ROUNDING, -diff));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::Side;
    use rust_decimal_macros::dec;

    fn side_total(lines: &[RuleLine], side: Side) -> Decimal {
        lines
            .iter()
            .filter(|l| l.side == side)
            .map(|l| l.amount)
            .sum()
    }

    #[test]
    fn sale_invoice_lines() {
        let lines = BusinessEvent::SaleInvoicePosted {
            net: dec!(100.00),
            vat: dec!(25.00),
        }
        .lines();

        assert_eq!(
            lines,
            vec![
                RuleLine::debit(ACCT_AR, dec!(125.00)),
                RuleLine::credit(ACCT_REVENUE, dec!(100.00)),
                RuleLine::credit(ACCT_VAT_PAYABLE, dec!(25.00)),
            ]
        );
    }

    #[test]
    fn every_rule_is_balanced() {
        let amount = dec!(137.50);
        let net = dec!(110.00);
        let vat = dec!(27.50);
        let events = vec![
            BusinessEvent::SaleInvoicePosted { net, vat },
            BusinessEvent::SaleExport { net },
            BusinessEvent::AdvanceReceipt { amount },
            BusinessEvent::AdvanceSettlement { amount },
            BusinessEvent::PurchaseInvoicePosted { net, vat },
            BusinessEvent::BankCustomerPayment { amount },
            BusinessEvent::BankSupplierPayment { amount },
            BusinessEvent::RcConstruction { net, vat },
            BusinessEvent::IcAcquisition { net, vat },
            BusinessEvent::ProfitShare { base: amount },
        ];

        for event in events {
            let lines = event.lines();
            assert_eq!(
                side_total(&lines, Side::Debit),
                side_total(&lines, Side::Credit),
                "rule for {} is unbalanced",
                event.name()
            );
        }
    }

    #[test]
    fn rules_are_pure() {
        let event = BusinessEvent::PurchaseInvoicePosted {
            net: dec!(80.00),
            vat: dec!(20.00),
        };
        assert_eq!(event.lines(), event.lines());
    }

    #[test]
    fn profit_share_exact_split() {
        let lines = BusinessEvent::ProfitShare { base: dec!(100.00) }.lines();
        assert_eq!(
            lines,
            vec![
                RuleLine::debit(ACCT_PROFIT_BASE, dec!(100.00)),
                RuleLine::credit(ACCT_PROFIT_COMPANY, dec!(50.00)),
                RuleLine::credit(ACCT_PROFIT_WORKERS, dec!(30.00)),
                RuleLine::credit(ACCT_PROFIT_OWNER, dec!(20.00)),
            ]
        );
    }

    #[test]
    fn profit_share_rounding_closure() {
        // 0.03 splits into 0.02 (company), 0.01 (workers), 0.01 (owner);
        // the shares overshoot by 0.01, which lands as a rounding debit.
        let lines = BusinessEvent::ProfitShare { base: dec!(0.03) }.lines();

        let shares: Decimal = lines
            .iter()
            .filter(|l| l.side == Side::Credit)
            .map(|l| l.amount)
            .sum();
        let rounding_debits: Decimal = lines
            .iter()
            .filter(|l| l.side == Side::Debit && l.account == ACCT_ROUNDING)
            .map(|l| l.amount)
            .sum();

        assert_eq!(shares - rounding_debits, dec!(0.03));
        assert_eq!(side_total(&lines, Side::Debit), side_total(&lines, Side::Credit));
    }

    #[test]
    fn profit_share_sub_cent_base_balances() {
        // A base with sub-cent precision posts as its quantized value
        // (0.035 rounds half-up to 0.04); the rounding line must close
        // against that posted amount, not the raw input.
        let lines = BusinessEvent::ProfitShare { base: dec!(0.035) }.lines();

        let base_line = lines
            .iter()
            .find(|l| l.account == ACCT_PROFIT_BASE)
            .unwrap();
        assert_eq!(base_line.amount, dec!(0.04));
        assert_eq!(side_total(&lines, Side::Debit), side_total(&lines, Side::Credit));
    }

    #[test]
    fn event_names() {
        assert_eq!(
            BusinessEvent::SaleInvoicePosted {
                net: dec!(1),
                vat: dec!(0)
            }
            .name(),
            "SALE_INVOICE_POSTED"
        );
        assert_eq!(
            BusinessEvent::ProfitShare { base: dec!(1) }.name(),
            "PROFIT_SHARE"
        );
    }

    #[test]
    fn event_serde_uses_wire_names() {
        let event = BusinessEvent::BankCustomerPayment { amount: dec!(10.00) };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("BANK_CUSTOMER_PAYMENT"), "{json}");
        let back: BusinessEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
