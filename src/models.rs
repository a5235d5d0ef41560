// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Closed string enums shared across entities. Every value has exactly one
/// canonical spelling; parsing anything else is a validation error, so the
/// store never sees a category or kind that drifted from the model.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self { $($name::$variant => $text),+ }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = LedgerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(LedgerError::Validation(format!(
                        concat!("unknown ", stringify!($name), " '{}' (expected one of: {})"),
                        other,
                        $name::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    ))),
                }
            }
        }
    };
}

str_enum! {
    /// Spending category shared by transactions and budgets.
    Category {
        Housing => "housing",
        Transportation => "transportation",
        Food => "food",
        Utilities => "utilities",
        Entertainment => "entertainment",
        Healthcare => "healthcare",
        Shopping => "shopping",
        Personal => "personal",
        Debt => "debt",
        Other => "other",
    }
}

str_enum! {
    WalletKind {
        Cash => "cash",
        Bank => "bank",
        Credit => "credit",
        Investment => "investment",
        Crypto => "crypto",
    }
}

impl WalletKind {
    /// Credit wallets track what is owed, so their balance may run negative.
    pub fn allows_negative(&self) -> bool {
        matches!(self, WalletKind::Credit)
    }
}

str_enum! {
    TxKind {
        Income => "income",
        Expense => "expense",
    }
}

impl TxKind {
    /// Signed contribution of an amount of this kind to a wallet balance.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TxKind::Income => amount,
            TxKind::Expense => -amount,
        }
    }
}

str_enum! {
    IncomeSource {
        Salary => "salary",
        Freelance => "freelance",
        Investments => "investments",
        Rental => "rental",
        SideBusiness => "side-business",
        Other => "other",
    }
}

str_enum! {
    Frequency {
        OneTime => "one-time",
        Weekly => "weekly",
        BiWeekly => "bi-weekly",
        Monthly => "monthly",
        Quarterly => "quarterly",
        Annually => "annually",
    }
}

impl Frequency {
    /// Date of the occurrence following one on `date`, or `None` for
    /// one-time incomes. Month-based steps clamp to the shorter month end
    /// (Jan 31 -> Feb 28), which is what `chrono` does for us.
    pub fn step(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::OneTime => None,
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::BiWeekly => date.checked_add_days(Days::new(14)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Quarterly => date.checked_add_months(Months::new(3)),
            Frequency::Annually => date.checked_add_months(Months::new(12)),
        }
    }
}

str_enum! {
    InvestmentKind {
        Stock => "stock",
        Bond => "bond",
        Etf => "etf",
        MutualFund => "mutual-fund",
        RealEstate => "real-estate",
        Crypto => "crypto",
        Other => "other",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub kind: WalletKind,
    /// Cached aggregate: equals the signed sum of this wallet's transactions
    /// after every committed mutation. Maintained only by the ledger engine.
    pub balance: Decimal,
    pub currency: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: String,
    pub wallet_id: i64,
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: Category,
    pub description: String,
    pub date: NaiveDate,
    /// Set when the row was materialized from an income template.
    pub source: Option<IncomeSource>,
}

impl Transaction {
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// An income record. One-time incomes are single dated entries; recurring
/// ones are templates whose occurrences get posted to a wallet as income
/// transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: String,
    pub amount: Decimal,
    pub source: IncomeSource,
    pub description: String,
    pub frequency: Frequency,
    pub date: NaiveDate,
    /// Latest occurrence date already posted to the ledger, if any.
    pub posted_through: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: String,
    pub category: Category,
    /// Monthly spending limit. Utilization is never stored; the aggregation
    /// layer recomputes it from expense transactions on every read.
    pub amount: Decimal,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investment {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub kind: InvestmentKind,
    /// Cost basis. Gain/loss is `current_value - amount`, valued externally
    /// and never derived from the transaction ledger.
    pub amount: Decimal,
    pub current_value: Decimal,
    pub purchase_date: NaiveDate,
    pub currency: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_parse_roundtrip() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), *c);
        }
        assert_eq!("BANK".parse::<WalletKind>().unwrap(), WalletKind::Bank);
        assert_eq!(
            " bi-weekly ".parse::<Frequency>().unwrap(),
            Frequency::BiWeekly
        );
    }

    #[test]
    fn unknown_enum_value_rejected() {
        let err = "groceries".parse::<Category>().unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn signed_amounts() {
        let d = Decimal::new(1050, 2);
        assert_eq!(TxKind::Income.signed(d), d);
        assert_eq!(TxKind::Expense.signed(d), -d);
    }

    #[test]
    fn frequency_steps() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(Frequency::OneTime.step(d), None);
        assert_eq!(
            Frequency::Weekly.step(d),
            NaiveDate::from_ymd_opt(2025, 2, 7)
        );
        // Month step clamps to the end of February.
        assert_eq!(
            Frequency::Monthly.step(d),
            NaiveDate::from_ymd_opt(2025, 2, 28)
        );
        assert_eq!(
            Frequency::Annually.step(d),
            NaiveDate::from_ymd_opt(2026, 1, 31)
        );
    }
}
