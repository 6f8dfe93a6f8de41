//! Balance calculation service.

use std::sync::Arc;

use chrono::Utc;
use meridian_core::balance::{AccountBalance, BalanceError, ClosingRow, TrialBalance};
use meridian_core::fiscal::PeriodStatus;
use meridian_shared::config::BalanceConfig;
use meridian_shared::types::{AccountId, PeriodRef};
use rust_decimal::Decimal;

use crate::repo::{
    AccountRepository, BalanceRepository, FiscalPeriodRepository, JournalRepository,
};

/// Balance calculation service.
///
/// Closed periods read their persisted snapshots; open (or nonexistent)
/// periods aggregate posted journal lines live, seeded with the previous
/// period's persisted closing balance.
pub struct BalanceService {
    journal: Arc<dyn JournalRepository>,
    accounts: Arc<dyn AccountRepository>,
    periods: Arc<dyn FiscalPeriodRepository>,
    balances: Arc<dyn BalanceRepository>,
    config: BalanceConfig,
}

impl BalanceService {
    /// Creates a new balance service.
    #[must_use]
    pub fn new(
        journal: Arc<dyn JournalRepository>,
        accounts: Arc<dyn AccountRepository>,
        periods: Arc<dyn FiscalPeriodRepository>,
        balances: Arc<dyn BalanceRepository>,
        config: BalanceConfig,
    ) -> Self {
        Self {
            journal,
            accounts,
            periods,
            balances,
            config,
        }
    }

    /// Returns the per-account balances of a period.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError` when activity references an unknown account
    /// or storage fails.
    pub async fn period_balances(
        &self,
        period: PeriodRef,
    ) -> Result<Vec<AccountBalance>, BalanceError> {
        if self.is_closed(period).await? {
            return Ok(self.balances.list_for_period(period).await?);
        }
        self.compute_live(period).await
    }

    /// Returns one account's balance for a period, or `None` when the
    /// account has neither activity nor an opening balance.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError` when the account is unknown or storage
    /// fails.
    pub async fn account_balance(
        &self,
        account_id: AccountId,
        period: PeriodRef,
    ) -> Result<Option<AccountBalance>, BalanceError> {
        if self.is_closed(period).await? {
            return Ok(self.balances.find(account_id, period).await?);
        }

        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(BalanceError::AccountNotFound(account_id))?;
        let opening = self.opening_balance(account_id, period).await?;
        let activity = self.journal.account_activity(account_id, period).await?;

        match activity {
            None if opening == Decimal::ZERO => Ok(None),
            maybe_activity => {
                let activity = maybe_activity.unwrap_or(
                    meridian_core::balance::AccountActivity {
                        account_id,
                        debit_total: Decimal::ZERO,
                        credit_total: Decimal::ZERO,
                    },
                );
                Ok(Some(AccountBalance::build(
                    account_id,
                    period,
                    account.normal_balance,
                    opening,
                    activity,
                    Utc::now(),
                )))
            }
        }
    }

    /// Recomputes and persists the snapshot set for a period: one row per
    /// account with posted activity, accounts without activity omitted.
    ///
    /// Triggered at period close, or on demand.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError` when activity references an unknown account
    /// or storage fails.
    pub async fn recalculate(
        &self,
        period: PeriodRef,
    ) -> Result<Vec<AccountBalance>, BalanceError> {
        let rows = self.compute_live(period).await?;
        self.balances.delete_for_period(period).await?;
        self.balances.save_all(&rows).await?;

        tracing::info!(period = %period, accounts = rows.len(), "balances recalculated");
        Ok(rows)
    }

    /// Builds the trial balance for a period.
    ///
    /// # Errors
    ///
    /// Returns `BalanceError` when an account is unknown or storage fails.
    pub async fn trial_balance(&self, period: PeriodRef) -> Result<TrialBalance, BalanceError> {
        let balances = self.period_balances(period).await?;

        let mut rows = Vec::with_capacity(balances.len());
        for balance in balances {
            let account = self
                .accounts
                .find_by_id(balance.account_id)
                .await?
                .ok_or(BalanceError::AccountNotFound(balance.account_id))?;
            rows.push(ClosingRow {
                account_id: balance.account_id,
                code: account.code,
                normal_balance: account.normal_balance,
                closing_balance: balance.closing_balance,
            });
        }

        Ok(TrialBalance::build(
            rows,
            self.config.trial_balance_tolerance,
        ))
    }

    /// Aggregates posted activity into fresh balance rows for a period.
    async fn compute_live(&self, period: PeriodRef) -> Result<Vec<AccountBalance>, BalanceError> {
        let activity = self.journal.activity_for_period(period).await?;
        let now = Utc::now();

        let mut rows = Vec::with_capacity(activity.len());
        for row in activity {
            let account = self
                .accounts
                .find_by_id(row.account_id)
                .await?
                .ok_or(BalanceError::AccountNotFound(row.account_id))?;
            let opening = self.opening_balance(row.account_id, period).await?;
            rows.push(AccountBalance::build(
                row.account_id,
                period,
                account.normal_balance,
                opening,
                row,
                now,
            ));
        }

        Ok(rows)
    }

    /// The opening balance of period N is the persisted closing balance of
    /// period N-1, or zero when none exists.
    async fn opening_balance(
        &self,
        account_id: AccountId,
        period: PeriodRef,
    ) -> Result<Decimal, BalanceError> {
        Ok(self
            .balances
            .find(account_id, period.prev())
            .await?
            .map(|snapshot| snapshot.closing_balance)
            .unwrap_or(Decimal::ZERO))
    }

    async fn is_closed(&self, period: PeriodRef) -> Result<bool, BalanceError> {
        Ok(self
            .periods
            .find_by_period(period)
            .await?
            .is_some_and(|record| {
                matches!(record.status, PeriodStatus::Closed | PeriodStatus::Locked)
            }))
    }
}
