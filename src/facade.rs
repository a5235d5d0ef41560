// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The only entry point callers get. Every operation carries the
//! authenticated user id, every failure comes back as one normalized
//! [`OpError`], and nothing below this layer is reachable from outside the
//! crate's own commands and tests. Cross-user reads are impossible by
//! construction: all queries filter on the user id, so another user's ids
//! simply come back `NotFound`.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::LedgerError;
use crate::ledger::{self, TxChanges};
use crate::models::{Budget, Category, Income, Investment, SavingsGoal, Transaction, Wallet};
use crate::reports::{
    self, BudgetStatus, CategoryAmount, GoalProgress, InvestmentPerformance, MonthCashflow,
    NetWorth, Summary, SummaryPeriod, WalletAudit,
};
use crate::store::incomes::NewIncome;
use crate::store::investments::NewInvestment;
use crate::store::transactions::{NewTransaction, TxFilter};
use crate::store::wallets::NewWallet;
use crate::store::{budgets, goals, incomes, investments, transactions, wallets};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Consistency,
    Storage,
}

/// Normalized failure result. This is the only error shape that crosses
/// the façade boundary.
#[derive(Debug, Clone, Serialize)]
pub struct OpError {
    pub kind: ErrorKind,
    pub message: String,
}

impl std::fmt::Display for OpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for OpError {}

impl From<LedgerError> for OpError {
    fn from(e: LedgerError) -> Self {
        let kind = match &e {
            LedgerError::Validation(_) => ErrorKind::Validation,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::Conflict(_) => ErrorKind::Conflict,
            LedgerError::Consistency(_) => ErrorKind::Consistency,
            LedgerError::Database(_) => ErrorKind::Storage,
        };
        OpError {
            kind,
            message: e.to_string(),
        }
    }
}

pub type OpResult<T> = Result<T, OpError>;

fn ensure_user(user: &str) -> OpResult<()> {
    if user.trim().is_empty() {
        return Err(OpError {
            kind: ErrorKind::Validation,
            message: "user id is required".to_string(),
        });
    }
    Ok(())
}

pub struct Facade<'c> {
    conn: &'c mut Connection,
}

impl<'c> Facade<'c> {
    pub fn new(conn: &'c mut Connection) -> Self {
        Self { conn }
    }

    // ---- wallets ----

    pub fn create_wallet(
        &mut self,
        user: &str,
        new: &NewWallet,
        opening: Option<Decimal>,
        date: NaiveDate,
    ) -> OpResult<Wallet> {
        ensure_user(user)?;
        Ok(ledger::open_wallet(self.conn, user, new, opening, date)?)
    }

    pub fn wallets(&mut self, user: &str) -> OpResult<Vec<Wallet>> {
        ensure_user(user)?;
        Ok(wallets::list(self.conn, user)?)
    }

    pub fn wallet(&mut self, user: &str, id: i64) -> OpResult<Wallet> {
        ensure_user(user)?;
        Ok(wallets::get(self.conn, user, id)?)
    }

    pub fn wallet_id(&mut self, user: &str, name: &str) -> OpResult<i64> {
        ensure_user(user)?;
        Ok(wallets::id_by_name(self.conn, user, name)?)
    }

    pub fn rename_wallet(&mut self, user: &str, id: i64, name: &str) -> OpResult<()> {
        ensure_user(user)?;
        Ok(wallets::rename(self.conn, user, id, name)?)
    }

    pub fn set_default_wallet(&mut self, user: &str, id: i64) -> OpResult<Wallet> {
        ensure_user(user)?;
        Ok(ledger::set_default_wallet(self.conn, user, id)?)
    }

    pub fn delete_wallet(&mut self, user: &str, id: i64) -> OpResult<()> {
        ensure_user(user)?;
        Ok(wallets::delete(self.conn, user, id)?)
    }

    // ---- transactions ----

    pub fn record_transaction(&mut self, user: &str, new: &NewTransaction) -> OpResult<Transaction> {
        ensure_user(user)?;
        Ok(ledger::record_transaction(self.conn, user, new)?)
    }

    pub fn transactions(&mut self, user: &str, filter: &TxFilter) -> OpResult<Vec<Transaction>> {
        ensure_user(user)?;
        Ok(transactions::list(self.conn, user, filter)?)
    }

    pub fn update_transaction(
        &mut self,
        user: &str,
        id: i64,
        changes: &TxChanges,
    ) -> OpResult<Transaction> {
        ensure_user(user)?;
        Ok(ledger::update_transaction(self.conn, user, id, changes)?)
    }

    pub fn delete_transaction(&mut self, user: &str, id: i64) -> OpResult<Transaction> {
        ensure_user(user)?;
        Ok(ledger::delete_transaction(self.conn, user, id)?)
    }

    // ---- budgets ----

    pub fn create_budget(
        &mut self,
        user: &str,
        category: Category,
        amount: Decimal,
    ) -> OpResult<Budget> {
        ensure_user(user)?;
        Ok(budgets::create(self.conn, user, category, amount)?)
    }

    pub fn budgets(&mut self, user: &str) -> OpResult<Vec<Budget>> {
        ensure_user(user)?;
        Ok(budgets::list(self.conn, user)?)
    }

    pub fn update_budget(
        &mut self,
        user: &str,
        category: Category,
        amount: Decimal,
    ) -> OpResult<Budget> {
        ensure_user(user)?;
        Ok(budgets::update_amount(self.conn, user, category, amount)?)
    }

    pub fn delete_budget(&mut self, user: &str, category: Category) -> OpResult<()> {
        ensure_user(user)?;
        Ok(budgets::delete(self.conn, user, category)?)
    }

    // ---- incomes ----

    pub fn add_income(&mut self, user: &str, new: &NewIncome) -> OpResult<Income> {
        ensure_user(user)?;
        Ok(incomes::create(self.conn, user, new)?)
    }

    pub fn incomes(&mut self, user: &str) -> OpResult<Vec<Income>> {
        ensure_user(user)?;
        Ok(incomes::list(self.conn, user)?)
    }

    pub fn delete_income(&mut self, user: &str, id: i64) -> OpResult<()> {
        ensure_user(user)?;
        Ok(incomes::delete(self.conn, user, id)?)
    }

    pub fn post_due_incomes(
        &mut self,
        user: &str,
        wallet_id: i64,
        through: NaiveDate,
    ) -> OpResult<Vec<Transaction>> {
        ensure_user(user)?;
        Ok(ledger::post_due_incomes(self.conn, user, wallet_id, through)?)
    }

    // ---- savings goals ----

    pub fn add_goal(
        &mut self,
        user: &str,
        name: &str,
        target_amount: Decimal,
        target_date: NaiveDate,
    ) -> OpResult<SavingsGoal> {
        ensure_user(user)?;
        Ok(goals::create(self.conn, user, name, target_amount, target_date)?)
    }

    pub fn goals(&mut self, user: &str) -> OpResult<Vec<SavingsGoal>> {
        ensure_user(user)?;
        Ok(goals::list(self.conn, user)?)
    }

    pub fn fund_goal(&mut self, user: &str, id: i64, delta: Decimal) -> OpResult<SavingsGoal> {
        ensure_user(user)?;
        Ok(goals::add_funds(self.conn, user, id, delta)?)
    }

    pub fn update_goal(
        &mut self,
        user: &str,
        id: i64,
        name: Option<&str>,
        target_amount: Option<Decimal>,
        target_date: Option<NaiveDate>,
    ) -> OpResult<SavingsGoal> {
        ensure_user(user)?;
        Ok(goals::update(self.conn, user, id, name, target_amount, target_date)?)
    }

    pub fn delete_goal(&mut self, user: &str, id: i64) -> OpResult<()> {
        ensure_user(user)?;
        Ok(goals::delete(self.conn, user, id)?)
    }

    // ---- investments ----

    pub fn add_investment(&mut self, user: &str, new: &NewInvestment) -> OpResult<Investment> {
        ensure_user(user)?;
        Ok(investments::create(self.conn, user, new)?)
    }

    pub fn investments(&mut self, user: &str) -> OpResult<Vec<Investment>> {
        ensure_user(user)?;
        Ok(investments::list(self.conn, user)?)
    }

    pub fn revalue_investment(
        &mut self,
        user: &str,
        id: i64,
        current_value: Decimal,
    ) -> OpResult<Investment> {
        ensure_user(user)?;
        Ok(investments::revalue(self.conn, user, id, current_value)?)
    }

    pub fn delete_investment(&mut self, user: &str, id: i64) -> OpResult<()> {
        ensure_user(user)?;
        Ok(investments::delete(self.conn, user, id)?)
    }

    // ---- aggregation ----

    pub fn category_spend(
        &mut self,
        user: &str,
        category: Category,
        month: &str,
    ) -> OpResult<Decimal> {
        ensure_user(user)?;
        Ok(reports::category_spend(self.conn, user, category, month)?)
    }

    pub fn spend_by_category(&mut self, user: &str, month: &str) -> OpResult<Vec<CategoryAmount>> {
        ensure_user(user)?;
        Ok(reports::spend_by_category(self.conn, user, month)?)
    }

    pub fn budget_status(&mut self, user: &str, month: &str) -> OpResult<Vec<BudgetStatus>> {
        ensure_user(user)?;
        Ok(reports::budget_status(self.conn, user, month)?)
    }

    pub fn goal_progress(&mut self, user: &str) -> OpResult<Vec<GoalProgress>> {
        ensure_user(user)?;
        Ok(reports::goal_progress(self.conn, user)?)
    }

    pub fn investment_performance(&mut self, user: &str) -> OpResult<Vec<InvestmentPerformance>> {
        ensure_user(user)?;
        Ok(reports::investment_performance(self.conn, user)?)
    }

    pub fn net_worth(&mut self, user: &str) -> OpResult<NetWorth> {
        ensure_user(user)?;
        Ok(reports::net_worth(self.conn, user)?)
    }

    pub fn summary(
        &mut self,
        user: &str,
        period: SummaryPeriod,
        today: NaiveDate,
    ) -> OpResult<Summary> {
        ensure_user(user)?;
        Ok(reports::summary(self.conn, user, period, today)?)
    }

    pub fn monthly_cashflow(&mut self, user: &str, months: usize) -> OpResult<Vec<MonthCashflow>> {
        ensure_user(user)?;
        Ok(reports::monthly_cashflow(self.conn, user, months)?)
    }

    pub fn wallet_audit(&mut self, user: &str) -> OpResult<Vec<WalletAudit>> {
        ensure_user(user)?;
        Ok(reports::wallet_audit(self.conn, user)?)
    }
}
