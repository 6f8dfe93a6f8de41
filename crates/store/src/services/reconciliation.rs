//! Bank reconciliation service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use meridian_core::reconciliation::{
    AdjustedBalances, AmountDateMatcher, BankReconciliation, MatchCandidate, MatchConfig,
    MatchProposal, MatchStrategy, ReconciliationError, ReconciliationStatus, ReconcilingItem,
    ReconcilingItemKind,
};
use meridian_shared::config::ReconciliationConfig;
use meridian_shared::types::{
    BankAccountId, BankTransactionId, JournalLineId, PeriodRef, ReconciliationId, UserId,
};
use rust_decimal::Decimal;

use crate::repo::{
    BankAccountRepository, BankTransactionRepository, JournalRepository, ReconciliationRepository,
};

/// Bank reconciliation service.
pub struct ReconciliationService {
    bank_accounts: Arc<dyn BankAccountRepository>,
    bank_transactions: Arc<dyn BankTransactionRepository>,
    reconciliations: Arc<dyn ReconciliationRepository>,
    journal: Arc<dyn JournalRepository>,
    matcher: AmountDateMatcher,
}

impl ReconciliationService {
    /// Creates a new reconciliation service with the configured matching
    /// tolerance.
    #[must_use]
    pub fn new(
        bank_accounts: Arc<dyn BankAccountRepository>,
        bank_transactions: Arc<dyn BankTransactionRepository>,
        reconciliations: Arc<dyn ReconciliationRepository>,
        journal: Arc<dyn JournalRepository>,
        config: &ReconciliationConfig,
    ) -> Self {
        Self {
            bank_accounts,
            bank_transactions,
            reconciliations,
            journal,
            matcher: AmountDateMatcher::new(MatchConfig {
                date_window_days: config.match_date_window_days,
            }),
        }
    }

    /// Creates a draft reconciliation for a (bank account, period) pair.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` when one exists for the pair and
    /// `BankAccountNotFound` for unknown accounts.
    pub async fn create(
        &self,
        bank_account_id: BankAccountId,
        period: PeriodRef,
        statement_balance: Decimal,
        book_balance: Decimal,
        by: UserId,
    ) -> Result<BankReconciliation, ReconciliationError> {
        self.bank_accounts
            .find_by_id(bank_account_id)
            .await?
            .ok_or(ReconciliationError::BankAccountNotFound(bank_account_id))?;

        if self
            .reconciliations
            .find_for_period(bank_account_id, period)
            .await?
            .is_some()
        {
            return Err(ReconciliationError::AlreadyExists {
                bank_account_id,
                period,
            });
        }

        let reconciliation = BankReconciliation::new(
            bank_account_id,
            period,
            statement_balance,
            book_balance,
            by,
            Utc::now(),
        );
        self.reconciliations.save(&reconciliation).await?;

        tracing::info!(
            reconciliation_id = %reconciliation.id,
            bank_account_id = %bank_account_id,
            period = %period,
            "reconciliation created"
        );
        Ok(reconciliation)
    }

    /// Starts a draft reconciliation.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the status is Draft.
    pub async fn start(
        &self,
        id: ReconciliationId,
    ) -> Result<BankReconciliation, ReconciliationError> {
        let mut reconciliation = self.get(id).await?;
        reconciliation.start(Utc::now())?;
        self.reconciliations.save(&reconciliation).await?;
        Ok(reconciliation)
    }

    /// Manually matches an unmatched bank transaction to a journal line.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` outside matching, `AlreadyMatched` for
    /// matched transactions, and `JournalLineNotFound` for unknown lines.
    pub async fn match_transaction(
        &self,
        id: ReconciliationId,
        transaction_id: BankTransactionId,
        line_id: JournalLineId,
        by: UserId,
    ) -> Result<(), ReconciliationError> {
        let reconciliation = self.get(id).await?;
        if reconciliation.status != ReconciliationStatus::InProgress {
            return Err(ReconciliationError::NotInProgress(reconciliation.status));
        }

        let mut transaction = self
            .bank_transactions
            .find_by_id(transaction_id)
            .await?
            .filter(|txn| txn.bank_account_id == reconciliation.bank_account_id)
            .ok_or(ReconciliationError::TransactionNotFound(transaction_id))?;

        self.journal
            .find_line(line_id)
            .await?
            .ok_or(ReconciliationError::JournalLineNotFound(line_id))?;

        transaction.mark_matched(line_id, by, Utc::now())?;
        self.bank_transactions.save(&transaction).await?;

        tracing::info!(
            reconciliation_id = %id,
            transaction_id = %transaction_id,
            line_id = %line_id,
            "bank transaction matched"
        );
        Ok(())
    }

    /// Proposes matches between the reconciliation's unmatched bank
    /// transactions and the supplied candidate journal lines.
    ///
    /// No persisted state is touched; callers confirm accepted proposals
    /// via [`Self::match_transaction`].
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` outside matching.
    pub async fn auto_match(
        &self,
        id: ReconciliationId,
        candidates: &[MatchCandidate],
    ) -> Result<Vec<MatchProposal>, ReconciliationError> {
        let reconciliation = self.get(id).await?;
        if reconciliation.status != ReconciliationStatus::InProgress {
            return Err(ReconciliationError::NotInProgress(reconciliation.status));
        }

        let transactions = self
            .bank_transactions
            .list_unmatched(reconciliation.bank_account_id)
            .await?;

        Ok(self.matcher.propose(&transactions, candidates))
    }

    /// Adds a reconciling item while in progress.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` outside matching.
    pub async fn add_item(
        &self,
        id: ReconciliationId,
        kind: ReconcilingItemKind,
        description: &str,
        amount: Decimal,
        transaction_date: NaiveDate,
    ) -> Result<BankReconciliation, ReconciliationError> {
        let mut reconciliation = self.get(id).await?;
        let item = ReconcilingItem::new(kind, description, amount, transaction_date);
        reconciliation.add_item(item, Utc::now())?;
        self.reconciliations.save(&reconciliation).await?;
        Ok(reconciliation)
    }

    /// Calculates and stores the adjusted bank/book balances.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` outside matching.
    pub async fn calculate(
        &self,
        id: ReconciliationId,
    ) -> Result<AdjustedBalances, ReconciliationError> {
        let mut reconciliation = self.get(id).await?;
        let balances = reconciliation.calculate_adjusted_balances(Utc::now())?;
        self.reconciliations.save(&reconciliation).await?;
        Ok(balances)
    }

    /// Completes the reconciliation, calculating balances implicitly when
    /// they have not been calculated yet.
    ///
    /// # Errors
    ///
    /// Returns `NotInProgress` unless the status is InProgress.
    pub async fn complete(
        &self,
        id: ReconciliationId,
    ) -> Result<BankReconciliation, ReconciliationError> {
        let mut reconciliation = self.get(id).await?;
        reconciliation.complete(Utc::now())?;
        self.reconciliations.save(&reconciliation).await?;
        Ok(reconciliation)
    }

    /// Approves a completed reconciliation and updates the bank account's
    /// last-reconciled balance and date.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error unless the status is Completed.
    pub async fn approve(
        &self,
        id: ReconciliationId,
        by: UserId,
    ) -> Result<BankReconciliation, ReconciliationError> {
        let mut reconciliation = self.get(id).await?;
        reconciliation.approve(by, Utc::now())?;
        self.reconciliations.save(&reconciliation).await?;

        let mut account = self
            .bank_accounts
            .find_by_id(reconciliation.bank_account_id)
            .await?
            .ok_or(ReconciliationError::BankAccountNotFound(
                reconciliation.bank_account_id,
            ))?;
        account.record_reconciliation(
            reconciliation.statement_balance,
            reconciliation.period.last_day(),
            Utc::now(),
        );
        self.bank_accounts.save(&account).await?;

        tracing::info!(
            reconciliation_id = %id,
            approved_by = %by,
            period = %reconciliation.period,
            "reconciliation approved"
        );
        Ok(reconciliation)
    }

    /// Fetches a reconciliation by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub async fn get(
        &self,
        id: ReconciliationId,
    ) -> Result<BankReconciliation, ReconciliationError> {
        self.reconciliations
            .find_by_id(id)
            .await?
            .ok_or(ReconciliationError::NotFound(id))
    }
}
