// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Read-time projections over the entity store. Everything here is pure:
//! no locks are taken and nothing is written, so these are safe to call at
//! any time. Budget utilization in particular is always recomputed, never
//! stored.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, IncomeSource, InvestmentKind, TxKind};
use crate::store::transactions::TxFilter;
use crate::store::{budgets, goals, investments, transactions, wallets};
use crate::utils::month_bounds;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over_budget: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoalProgress {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    /// current/target, deliberately not clamped: 1.2 means over-funded.
    /// `None` when the target is zero.
    pub progress: Option<Decimal>,
    pub target_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestmentPerformance {
    pub id: i64,
    pub name: String,
    pub kind: InvestmentKind,
    pub cost_basis: Decimal,
    pub current_value: Decimal,
    pub gain: Decimal,
    /// gain/cost ratio; `None` when the cost basis is zero.
    pub gain_pct: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetWorth {
    pub wallet_total: Decimal,
    pub investment_total: Decimal,
    pub net_worth: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceAmount {
    pub source: IncomeSource,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub period: String,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub savings: Decimal,
    pub expenses_by_category: Vec<CategoryAmount>,
    pub income_by_source: Vec<SourceAmount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCashflow {
    pub month: String,
    pub income: Decimal,
    pub expense: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct WalletAudit {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    pub ledger_sum: Decimal,
    pub consistent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryPeriod {
    Month,
    Year,
    All,
}

impl SummaryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryPeriod::Month => "month",
            SummaryPeriod::Year => "year",
            SummaryPeriod::All => "all",
        }
    }

    fn start(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            SummaryPeriod::Month => NaiveDate::from_ymd_opt(today.year(), today.month(), 1),
            SummaryPeriod::Year => NaiveDate::from_ymd_opt(today.year(), 1, 1),
            SummaryPeriod::All => None,
        }
    }
}

impl std::str::FromStr for SummaryPeriod {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(SummaryPeriod::Month),
            "year" => Ok(SummaryPeriod::Year),
            "all" => Ok(SummaryPeriod::All),
            other => Err(LedgerError::Validation(format!(
                "unknown period '{}' (expected month, year, or all)",
                other
            ))),
        }
    }
}

/// Total expense spend in a category for a YYYY-MM month.
pub fn category_spend(
    conn: &Connection,
    user: &str,
    category: Category,
    month: &str,
) -> LedgerResult<Decimal> {
    let (from, to) = month_bounds(month).map_err(|e| LedgerError::Validation(e.to_string()))?;
    let filter = TxFilter {
        kind: Some(TxKind::Expense),
        category: Some(category),
        from: Some(from),
        to: Some(to),
        ..TxFilter::default()
    };
    let rows = transactions::list(conn, user, &filter)?;
    Ok(rows.iter().map(|t| t.amount).sum())
}

/// Expense totals per category for a YYYY-MM month, largest first.
pub fn spend_by_category(
    conn: &Connection,
    user: &str,
    month: &str,
) -> LedgerResult<Vec<CategoryAmount>> {
    let (from, to) = month_bounds(month).map_err(|e| LedgerError::Validation(e.to_string()))?;
    let filter = TxFilter {
        kind: Some(TxKind::Expense),
        from: Some(from),
        to: Some(to),
        ..TxFilter::default()
    };
    let mut agg: BTreeMap<&'static str, (Category, Decimal)> = BTreeMap::new();
    for t in transactions::list(conn, user, &filter)? {
        agg.entry(t.category.as_str())
            .or_insert((t.category, Decimal::ZERO))
            .1 += t.amount;
    }
    let mut items: Vec<CategoryAmount> = agg
        .into_values()
        .map(|(category, amount)| CategoryAmount { category, amount })
        .collect();
    items.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(items)
}

/// Per-budget utilization for a month: limit, spend so far, what is left,
/// and whether the limit is blown. Negative remaining stays visible.
pub fn budget_status(conn: &Connection, user: &str, month: &str) -> LedgerResult<Vec<BudgetStatus>> {
    let mut out = Vec::new();
    for budget in budgets::list(conn, user)? {
        let spent = category_spend(conn, user, budget.category, month)?;
        out.push(BudgetStatus {
            category: budget.category,
            limit: budget.amount,
            spent,
            remaining: budget.amount - spent,
            over_budget: spent > budget.amount,
        });
    }
    Ok(out)
}

pub fn goal_progress(conn: &Connection, user: &str) -> LedgerResult<Vec<GoalProgress>> {
    let out = goals::list(conn, user)?
        .into_iter()
        .map(|g| {
            let progress = if g.target_amount.is_zero() {
                None
            } else {
                Some(g.current_amount / g.target_amount)
            };
            GoalProgress {
                id: g.id,
                name: g.name,
                target_amount: g.target_amount,
                current_amount: g.current_amount,
                progress,
                target_date: g.target_date,
            }
        })
        .collect();
    Ok(out)
}

pub fn investment_performance(
    conn: &Connection,
    user: &str,
) -> LedgerResult<Vec<InvestmentPerformance>> {
    let out = investments::list(conn, user)?
        .into_iter()
        .map(|i| {
            let gain = i.current_value - i.amount;
            let gain_pct = if i.amount.is_zero() {
                None
            } else {
                Some(gain / i.amount)
            };
            InvestmentPerformance {
                id: i.id,
                name: i.name,
                kind: i.kind,
                cost_basis: i.amount,
                current_value: i.current_value,
                gain,
                gain_pct,
            }
        })
        .collect();
    Ok(out)
}

/// Wallet balances plus external investment valuations. Tolerates reading
/// concurrently with ledger writes; each committed mutation keeps the
/// stored balances exact.
pub fn net_worth(conn: &Connection, user: &str) -> LedgerResult<NetWorth> {
    let wallet_total: Decimal = wallets::list(conn, user)?.iter().map(|w| w.balance).sum();
    let investment_total: Decimal = investments::list(conn, user)?
        .iter()
        .map(|i| i.current_value)
        .sum();
    Ok(NetWorth {
        wallet_total,
        investment_total,
        net_worth: wallet_total + investment_total,
    })
}

/// Income/expense totals with per-category and per-source breakdowns for
/// the current month, year, or everything.
pub fn summary(
    conn: &Connection,
    user: &str,
    period: SummaryPeriod,
    today: NaiveDate,
) -> LedgerResult<Summary> {
    let filter = TxFilter {
        from: period.start(today),
        ..TxFilter::default()
    };
    let rows = transactions::list(conn, user, &filter)?;

    let mut total_income = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    let mut by_category: BTreeMap<&'static str, (Category, Decimal)> = BTreeMap::new();
    let mut by_source: BTreeMap<&'static str, (IncomeSource, Decimal)> = BTreeMap::new();

    for t in &rows {
        match t.kind {
            TxKind::Income => {
                total_income += t.amount;
                let source = t.source.unwrap_or(IncomeSource::Other);
                by_source.entry(source.as_str()).or_insert((source, Decimal::ZERO)).1 += t.amount;
            }
            TxKind::Expense => {
                total_expenses += t.amount;
                by_category
                    .entry(t.category.as_str())
                    .or_insert((t.category, Decimal::ZERO))
                    .1 += t.amount;
            }
        }
    }

    Ok(Summary {
        period: period.as_str().to_string(),
        total_income,
        total_expenses,
        savings: total_income - total_expenses,
        expenses_by_category: by_category
            .into_values()
            .map(|(category, amount)| CategoryAmount { category, amount })
            .collect(),
        income_by_source: by_source
            .into_values()
            .map(|(source, amount)| SourceAmount { source, amount })
            .collect(),
    })
}

/// Per-month income/expense totals, most recent `months` first.
pub fn monthly_cashflow(
    conn: &Connection,
    user: &str,
    months: usize,
) -> LedgerResult<Vec<MonthCashflow>> {
    let rows = transactions::list(conn, user, &TxFilter::default())?;
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in &rows {
        let key = format!("{:04}-{:02}", t.date.year(), t.date.month());
        let entry = map.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TxKind::Income => entry.0 += t.amount,
            TxKind::Expense => entry.1 += t.amount,
        }
    }
    Ok(map
        .into_iter()
        .rev()
        .take(months)
        .map(|(month, (income, expense))| MonthCashflow {
            month,
            income,
            expense,
        })
        .collect())
}

/// Compare each wallet's cached balance against its defining ledger sum.
pub fn wallet_audit(conn: &Connection, user: &str) -> LedgerResult<Vec<WalletAudit>> {
    let mut out = Vec::new();
    for w in wallets::list(conn, user)? {
        let ledger_sum = transactions::sum_signed(conn, user, w.id)?;
        out.push(WalletAudit {
            id: w.id,
            name: w.name,
            consistent: w.balance == ledger_sum,
            balance: w.balance,
            ledger_sum,
        });
    }
    Ok(out)
}
