//! In-memory repository implementations and fixtures for the service
//! integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use meridian_core::assets::{
    AssetCategory, AssetMaintenance, AssetStatus, DepreciationRun, FixedAsset,
};
use meridian_core::balance::{AccountActivity, AccountBalance};
use meridian_core::fiscal::FiscalPeriod;
use meridian_core::journal::{
    CreateJournalEntryInput, Direction, EntryStatus, JournalEntry, JournalLine, JournalLineInput,
};
use meridian_core::reconciliation::{BankAccount, BankReconciliation, BankTransaction, MatchState};
use meridian_core::registry::Account;
use meridian_shared::config::LedgerConfig;
use meridian_shared::types::{
    AccountId, AssetCategoryId, AssetMaintenanceId, BankAccountId, BankTransactionId,
    DepreciationRunId, FiscalPeriodId, FixedAssetId, JournalEntryId, JournalLineId, PeriodRef,
    ReconciliationId, UserId,
};
use meridian_store::error::RepoError;
use meridian_store::repo::{
    AccountRepository, AssetCategoryRepository, AssetMaintenanceRepository, BalanceRepository,
    BankAccountRepository, BankTransactionRepository, DepreciationRunRepository,
    FiscalPeriodRepository, FixedAssetRepository, JournalRepository, ProcessedEvent,
    ProcessedEventRepository, ReconciliationRepository,
};
use meridian_store::services::{
    AccountService, BalanceService, CreateAccountInput, DepreciationService, EventService,
    FiscalPeriodService, JournalService, ReconciliationService,
};

#[derive(Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    entries: HashMap<JournalEntryId, JournalEntry>,
    sequences: HashMap<PeriodRef, i64>,
    periods: HashMap<PeriodRef, FiscalPeriod>,
    balances: HashMap<(AccountId, PeriodRef), AccountBalance>,
    bank_accounts: HashMap<BankAccountId, BankAccount>,
    bank_transactions: HashMap<BankTransactionId, BankTransaction>,
    reconciliations: HashMap<ReconciliationId, BankReconciliation>,
    assets: HashMap<FixedAssetId, FixedAsset>,
    categories: HashMap<AssetCategoryId, AssetCategory>,
    maintenance: HashMap<AssetMaintenanceId, AssetMaintenance>,
    runs: HashMap<DepreciationRunId, DepreciationRun>,
    processed_events: HashMap<String, ProcessedEvent>,
}

/// Shared in-memory store implementing every repository interface.
#[derive(Clone, Default)]
pub struct MemStore {
    state: Arc<Mutex<State>>,
}

impl MemStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("store poisoned")
    }

    /// Number of journal entries currently stored.
    pub fn entry_count(&self) -> usize {
        self.lock().entries.len()
    }
}

#[async_trait]
impl AccountRepository for MemStore {
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepoError> {
        Ok(self.lock().accounts.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Account>, RepoError> {
        Ok(self
            .lock()
            .accounts
            .values()
            .find(|account| account.code == code)
            .cloned())
    }

    async fn find_children(&self, parent_id: AccountId) -> Result<Vec<Account>, RepoError> {
        Ok(self
            .lock()
            .accounts
            .values()
            .filter(|account| account.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Account>, RepoError> {
        Ok(self.lock().accounts.values().cloned().collect())
    }

    async fn has_postings(&self, id: AccountId) -> Result<bool, RepoError> {
        Ok(self
            .lock()
            .entries
            .values()
            .any(|entry| entry.lines.iter().any(|line| line.account_id == id)))
    }

    async fn save(&self, account: &Account) -> Result<(), RepoError> {
        self.lock().accounts.insert(account.id, account.clone());
        Ok(())
    }

    async fn delete(&self, id: AccountId) -> Result<(), RepoError> {
        self.lock().accounts.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl JournalRepository for MemStore {
    async fn find_by_id(&self, id: JournalEntryId) -> Result<Option<JournalEntry>, RepoError> {
        Ok(self.lock().entries.get(&id).cloned())
    }

    async fn find_by_entry_number(
        &self,
        period: PeriodRef,
        entry_number: i64,
    ) -> Result<Option<JournalEntry>, RepoError> {
        Ok(self
            .lock()
            .entries
            .values()
            .find(|entry| entry.period == period && entry.entry_number == entry_number)
            .cloned())
    }

    async fn find_by_source_reference(
        &self,
        source_service: &str,
        source_reference: &str,
    ) -> Result<Option<JournalEntry>, RepoError> {
        Ok(self
            .lock()
            .entries
            .values()
            .find(|entry| {
                entry.source_service.as_deref() == Some(source_service)
                    && entry.source_reference.as_deref() == Some(source_reference)
            })
            .cloned())
    }

    async fn find_line(
        &self,
        line_id: JournalLineId,
    ) -> Result<Option<(JournalEntry, JournalLine)>, RepoError> {
        Ok(self.lock().entries.values().find_map(|entry| {
            entry
                .lines
                .iter()
                .find(|line| line.id == line_id)
                .map(|line| (entry.clone(), line.clone()))
        }))
    }

    async fn list_for_period(&self, period: PeriodRef) -> Result<Vec<JournalEntry>, RepoError> {
        let mut entries: Vec<JournalEntry> = self
            .lock()
            .entries
            .values()
            .filter(|entry| entry.period == period)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| entry.entry_number);
        Ok(entries)
    }

    async fn next_entry_number(&self, period: PeriodRef) -> Result<i64, RepoError> {
        let mut state = self.lock();
        let next = state.sequences.entry(period).or_insert(0);
        *next += 1;
        Ok(*next)
    }

    async fn count_by_status(
        &self,
        period: PeriodRef,
        status: EntryStatus,
    ) -> Result<u64, RepoError> {
        Ok(self
            .lock()
            .entries
            .values()
            .filter(|entry| entry.period == period && entry.status == status)
            .count() as u64)
    }

    async fn activity_for_period(
        &self,
        period: PeriodRef,
    ) -> Result<Vec<AccountActivity>, RepoError> {
        let state = self.lock();
        let mut totals: HashMap<AccountId, (Decimal, Decimal)> = HashMap::new();

        for entry in state.entries.values() {
            if entry.period != period || entry.status != EntryStatus::Posted {
                continue;
            }
            for line in &entry.lines {
                let slot = totals
                    .entry(line.account_id)
                    .or_insert((Decimal::ZERO, Decimal::ZERO));
                slot.0 += line.debit();
                slot.1 += line.credit();
            }
        }

        Ok(totals
            .into_iter()
            .map(|(account_id, (debit_total, credit_total))| AccountActivity {
                account_id,
                debit_total,
                credit_total,
            })
            .collect())
    }

    async fn account_activity(
        &self,
        account_id: AccountId,
        period: PeriodRef,
    ) -> Result<Option<AccountActivity>, RepoError> {
        let all = self.activity_for_period(period).await?;
        Ok(all.into_iter().find(|row| row.account_id == account_id))
    }

    async fn save(&self, entry: &JournalEntry) -> Result<(), RepoError> {
        self.lock().entries.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete(&self, id: JournalEntryId) -> Result<(), RepoError> {
        self.lock().entries.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl FiscalPeriodRepository for MemStore {
    async fn find_by_id(&self, id: FiscalPeriodId) -> Result<Option<FiscalPeriod>, RepoError> {
        Ok(self
            .lock()
            .periods
            .values()
            .find(|period| period.id == id)
            .cloned())
    }

    async fn find_by_period(&self, period: PeriodRef) -> Result<Option<FiscalPeriod>, RepoError> {
        Ok(self.lock().periods.get(&period).cloned())
    }

    async fn find_for_date(&self, date: NaiveDate) -> Result<Option<FiscalPeriod>, RepoError> {
        Ok(self.lock().periods.get(&PeriodRef::from_date(date)).cloned())
    }

    async fn list(&self) -> Result<Vec<FiscalPeriod>, RepoError> {
        let mut periods: Vec<FiscalPeriod> = self.lock().periods.values().cloned().collect();
        periods.sort_by_key(|record| record.period);
        Ok(periods)
    }

    async fn save(&self, period: &FiscalPeriod) -> Result<(), RepoError> {
        self.lock().periods.insert(period.period, period.clone());
        Ok(())
    }
}

#[async_trait]
impl BalanceRepository for MemStore {
    async fn find(
        &self,
        account_id: AccountId,
        period: PeriodRef,
    ) -> Result<Option<AccountBalance>, RepoError> {
        Ok(self.lock().balances.get(&(account_id, period)).cloned())
    }

    async fn list_for_period(&self, period: PeriodRef) -> Result<Vec<AccountBalance>, RepoError> {
        Ok(self
            .lock()
            .balances
            .values()
            .filter(|balance| balance.period == period)
            .cloned()
            .collect())
    }

    async fn save_all(&self, balances: &[AccountBalance]) -> Result<(), RepoError> {
        let mut state = self.lock();
        for balance in balances {
            state
                .balances
                .insert((balance.account_id, balance.period), balance.clone());
        }
        Ok(())
    }

    async fn delete_for_period(&self, period: PeriodRef) -> Result<(), RepoError> {
        self.lock().balances.retain(|(_, p), _| *p != period);
        Ok(())
    }
}

#[async_trait]
impl BankAccountRepository for MemStore {
    async fn find_by_id(&self, id: BankAccountId) -> Result<Option<BankAccount>, RepoError> {
        Ok(self.lock().bank_accounts.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<BankAccount>, RepoError> {
        Ok(self.lock().bank_accounts.values().cloned().collect())
    }

    async fn save(&self, account: &BankAccount) -> Result<(), RepoError> {
        self.lock().bank_accounts.insert(account.id, account.clone());
        Ok(())
    }
}

#[async_trait]
impl BankTransactionRepository for MemStore {
    async fn find_by_id(
        &self,
        id: BankTransactionId,
    ) -> Result<Option<BankTransaction>, RepoError> {
        Ok(self.lock().bank_transactions.get(&id).cloned())
    }

    async fn list_unmatched(
        &self,
        bank_account_id: BankAccountId,
    ) -> Result<Vec<BankTransaction>, RepoError> {
        let mut transactions: Vec<BankTransaction> = self
            .lock()
            .bank_transactions
            .values()
            .filter(|txn| {
                txn.bank_account_id == bank_account_id && txn.match_state == MatchState::Unmatched
            })
            .cloned()
            .collect();
        transactions.sort_by_key(|txn| txn.transaction_date);
        Ok(transactions)
    }

    async fn save(&self, transaction: &BankTransaction) -> Result<(), RepoError> {
        self.lock()
            .bank_transactions
            .insert(transaction.id, transaction.clone());
        Ok(())
    }
}

#[async_trait]
impl ReconciliationRepository for MemStore {
    async fn find_by_id(
        &self,
        id: ReconciliationId,
    ) -> Result<Option<BankReconciliation>, RepoError> {
        Ok(self.lock().reconciliations.get(&id).cloned())
    }

    async fn find_for_period(
        &self,
        bank_account_id: BankAccountId,
        period: PeriodRef,
    ) -> Result<Option<BankReconciliation>, RepoError> {
        Ok(self
            .lock()
            .reconciliations
            .values()
            .find(|rec| rec.bank_account_id == bank_account_id && rec.period == period)
            .cloned())
    }

    async fn save(&self, reconciliation: &BankReconciliation) -> Result<(), RepoError> {
        self.lock()
            .reconciliations
            .insert(reconciliation.id, reconciliation.clone());
        Ok(())
    }
}

#[async_trait]
impl FixedAssetRepository for MemStore {
    async fn find_by_id(&self, id: FixedAssetId) -> Result<Option<FixedAsset>, RepoError> {
        Ok(self.lock().assets.get(&id).cloned())
    }

    async fn find_by_number(&self, asset_number: &str) -> Result<Option<FixedAsset>, RepoError> {
        Ok(self
            .lock()
            .assets
            .values()
            .find(|asset| asset.asset_number == asset_number)
            .cloned())
    }

    async fn list_by_status(&self, status: AssetStatus) -> Result<Vec<FixedAsset>, RepoError> {
        let mut assets: Vec<FixedAsset> = self
            .lock()
            .assets
            .values()
            .filter(|asset| asset.status == status)
            .cloned()
            .collect();
        assets.sort_by(|a, b| a.asset_number.cmp(&b.asset_number));
        Ok(assets)
    }

    async fn insert(&self, asset: &FixedAsset) -> Result<(), RepoError> {
        self.lock().assets.insert(asset.id, asset.clone());
        Ok(())
    }

    async fn update(&self, asset: &FixedAsset, expected_version: i64) -> Result<(), RepoError> {
        let mut state = self.lock();
        let stored = state
            .assets
            .get(&asset.id)
            .ok_or_else(|| RepoError::Storage(format!("asset {} missing", asset.id)))?;

        if stored.version != expected_version {
            return Err(RepoError::StaleVersion {
                entity: "fixed_asset",
                id: asset.id.into_inner(),
                expected: expected_version,
                actual: stored.version,
            });
        }

        let mut updated = asset.clone();
        updated.version = expected_version + 1;
        state.assets.insert(updated.id, updated);
        Ok(())
    }
}

#[async_trait]
impl AssetCategoryRepository for MemStore {
    async fn find_by_id(&self, id: AssetCategoryId) -> Result<Option<AssetCategory>, RepoError> {
        Ok(self.lock().categories.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<AssetCategory>, RepoError> {
        Ok(self.lock().categories.values().cloned().collect())
    }

    async fn save(&self, category: &AssetCategory) -> Result<(), RepoError> {
        self.lock().categories.insert(category.id, category.clone());
        Ok(())
    }
}

#[async_trait]
impl AssetMaintenanceRepository for MemStore {
    async fn find_by_id(
        &self,
        id: AssetMaintenanceId,
    ) -> Result<Option<AssetMaintenance>, RepoError> {
        Ok(self.lock().maintenance.get(&id).cloned())
    }

    async fn list_for_asset(
        &self,
        asset_id: FixedAssetId,
    ) -> Result<Vec<AssetMaintenance>, RepoError> {
        Ok(self
            .lock()
            .maintenance
            .values()
            .filter(|record| record.asset_id == asset_id)
            .cloned()
            .collect())
    }

    async fn save(&self, record: &AssetMaintenance) -> Result<(), RepoError> {
        self.lock().maintenance.insert(record.id, record.clone());
        Ok(())
    }
}

#[async_trait]
impl DepreciationRunRepository for MemStore {
    async fn find_by_id(
        &self,
        id: DepreciationRunId,
    ) -> Result<Option<DepreciationRun>, RepoError> {
        Ok(self.lock().runs.get(&id).cloned())
    }

    async fn find_by_period(
        &self,
        period: PeriodRef,
    ) -> Result<Option<DepreciationRun>, RepoError> {
        let state = self.lock();
        let mut runs: Vec<&DepreciationRun> = state
            .runs
            .values()
            .filter(|run| run.period == period)
            .collect();
        runs.sort_by_key(|run| run.calculated_at);
        Ok(runs.last().map(|run| (*run).clone()))
    }

    async fn save(&self, run: &DepreciationRun) -> Result<(), RepoError> {
        self.lock().runs.insert(run.id, run.clone());
        Ok(())
    }
}

#[async_trait]
impl ProcessedEventRepository for MemStore {
    async fn find(&self, event_id: &str) -> Result<Option<ProcessedEvent>, RepoError> {
        Ok(self.lock().processed_events.get(event_id).cloned())
    }

    async fn record(&self, event: &ProcessedEvent) -> Result<(), RepoError> {
        self.lock()
            .processed_events
            .insert(event.event_id.clone(), event.clone());
        Ok(())
    }
}

/// All services wired to one shared in-memory store.
pub struct TestContext {
    pub store: MemStore,
    pub accounts: AccountService,
    pub journal: Arc<JournalService>,
    pub balances: Arc<BalanceService>,
    pub fiscal: FiscalPeriodService,
    pub reconciliation: ReconciliationService,
    pub depreciation: DepreciationService,
    pub events: EventService,
}

/// Builds a fresh context with default configuration.
pub fn context() -> TestContext {
    let store = MemStore::default();
    let config = LedgerConfig::default();

    let accounts_repo: Arc<dyn AccountRepository> = Arc::new(store.clone());
    let journal_repo: Arc<dyn JournalRepository> = Arc::new(store.clone());
    let periods_repo: Arc<dyn FiscalPeriodRepository> = Arc::new(store.clone());
    let balances_repo: Arc<dyn BalanceRepository> = Arc::new(store.clone());

    let journal = Arc::new(JournalService::new(
        journal_repo.clone(),
        accounts_repo.clone(),
        periods_repo.clone(),
    ));
    let balances = Arc::new(BalanceService::new(
        journal_repo.clone(),
        accounts_repo.clone(),
        periods_repo.clone(),
        balances_repo,
        config.balance.clone(),
    ));

    TestContext {
        accounts: AccountService::new(accounts_repo),
        fiscal: FiscalPeriodService::new(periods_repo, journal_repo.clone(), balances.clone()),
        reconciliation: ReconciliationService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            journal_repo,
            &config.reconciliation,
        ),
        depreciation: DepreciationService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            journal.clone(),
            config.depreciation.clone(),
        ),
        events: EventService::new(Arc::new(store.clone()), journal.clone()),
        journal,
        balances,
        store,
    }
}

/// A throwaway user id.
pub fn user() -> UserId {
    UserId::new()
}

/// Creates a detail account through the account service.
pub async fn seed_account(ctx: &TestContext, code: &str, name: &str) -> Account {
    ctx.accounts
        .create_account(CreateAccountInput {
            code: code.to_string(),
            name: name.to_string(),
            description: None,
            is_header: false,
            is_system: false,
            parent_id: None,
        })
        .await
        .expect("seed account")
}

/// Two balanced lines: debit one account, credit another.
pub fn balanced_lines(
    debit_account: AccountId,
    credit_account: AccountId,
    amount: Decimal,
) -> Vec<JournalLineInput> {
    vec![
        JournalLineInput {
            account_id: debit_account,
            direction: Direction::Debit,
            amount,
            memo: None,
        },
        JournalLineInput {
            account_id: credit_account,
            direction: Direction::Credit,
            amount,
            memo: None,
        },
    ]
}

/// A minimal entry input.
pub fn entry_input(
    date: NaiveDate,
    description: &str,
    lines: Vec<JournalLineInput>,
) -> CreateJournalEntryInput {
    CreateJournalEntryInput {
        entry_date: date,
        description: description.to_string(),
        reference: None,
        notes: None,
        source_service: None,
        source_reference: None,
        lines,
        created_by: user(),
    }
}

/// Creates and posts a two-line entry.
pub async fn post_entry(
    ctx: &TestContext,
    date: NaiveDate,
    debit_account: AccountId,
    credit_account: AccountId,
    amount: Decimal,
) -> JournalEntry {
    let entry = ctx
        .journal
        .create_entry(entry_input(
            date,
            "test entry",
            balanced_lines(debit_account, credit_account, amount),
        ))
        .await
        .expect("create entry");
    ctx.journal
        .post_entry(entry.id, user())
        .await
        .expect("post entry")
}

/// Seeds an asset category with freshly created GL accounts.
pub async fn seed_category(ctx: &TestContext) -> AssetCategory {
    let asset_account = seed_account(ctx, "1400", "Machinery").await;
    let accumulated = seed_account(ctx, "1450", "Accumulated depreciation").await;
    let expense = seed_account(ctx, "6400", "Depreciation expense").await;
    let gain_loss = seed_account(ctx, "4950", "Gain/loss on disposal").await;

    let category = AssetCategory {
        id: AssetCategoryId::new(),
        name: "Machinery".to_string(),
        asset_account_id: asset_account.id,
        accumulated_depreciation_account_id: accumulated.id,
        depreciation_expense_account_id: expense.id,
        disposal_gain_loss_account_id: gain_loss.id,
        declining_rate: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    AssetCategoryRepository::save(&ctx.store, &category)
        .await
        .expect("seed category");
    category
}

/// Seeds a bank account linked to a fresh GL cash account.
pub async fn seed_bank_account(ctx: &TestContext) -> BankAccount {
    let gl = seed_account(ctx, "1015", "Cash - operating").await;
    let account = BankAccount {
        id: BankAccountId::new(),
        name: "Operating".to_string(),
        account_number: "000123".to_string(),
        gl_account_id: gl.id,
        last_reconciled_balance: None,
        last_reconciled_date: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    BankAccountRepository::save(&ctx.store, &account)
        .await
        .expect("seed bank account");
    account
}

/// Seeds an unmatched bank statement transaction.
pub async fn seed_bank_transaction(
    ctx: &TestContext,
    bank_account_id: BankAccountId,
    date: NaiveDate,
    amount: Decimal,
) -> BankTransaction {
    let transaction = BankTransaction {
        id: BankTransactionId::new(),
        bank_account_id,
        transaction_date: date,
        description: "statement line".to_string(),
        amount,
        match_state: MatchState::Unmatched,
        matched_line_id: None,
        matched_by: None,
        matched_at: None,
    };
    BankTransactionRepository::save(&ctx.store, &transaction)
        .await
        .expect("seed bank transaction");
    transaction
}

/// Shorthand for a date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Shorthand for a period reference.
pub fn period(year: i32, month: u32) -> PeriodRef {
    PeriodRef::new(year, month).expect("valid period")
}
