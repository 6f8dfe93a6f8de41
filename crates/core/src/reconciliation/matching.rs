//! Statement auto-matching.
//!
//! The matcher proposes links between unmatched bank transactions and
//! candidate journal lines without touching persisted state; callers
//! confirm and persist the matches they accept. The tolerance policy is a
//! strategy so installations can swap it out.

use chrono::NaiveDate;
use meridian_shared::types::{BankTransactionId, JournalEntryId, JournalLineId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{BankTransaction, MatchState};

/// Tolerance policy for the default matcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Maximum distance in days between statement and journal dates.
    pub date_window_days: i64,
}

/// A journal line offered to the matcher.
///
/// Amounts follow the bank statement's sign convention: lines that
/// increase the bank's GL account are positive, decreases negative.
#[derive(Debug, Clone)]
pub struct MatchCandidate {
    /// The journal line.
    pub line_id: JournalLineId,
    /// The entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// The entry date.
    pub line_date: NaiveDate,
    /// Signed amount.
    pub amount: Decimal,
    /// Line or entry description, for operator display.
    pub description: Option<String>,
}

/// A proposed match between a bank transaction and a journal line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchProposal {
    /// The bank transaction.
    pub transaction_id: BankTransactionId,
    /// The proposed journal line.
    pub line_id: JournalLineId,
    /// The entry the line belongs to.
    pub entry_id: JournalEntryId,
    /// Days between the two dates (absolute).
    pub date_distance_days: i64,
}

/// A matching strategy over unmatched transactions and candidate lines.
pub trait MatchStrategy {
    /// Proposes zero or more matches. Each candidate line is proposed at
    /// most once; already-matched transactions are skipped.
    fn propose(
        &self,
        transactions: &[BankTransaction],
        candidates: &[MatchCandidate],
    ) -> Vec<MatchProposal>;
}

/// Default strategy: exact amount, nearest date within the window.
///
/// Ties on date distance are broken by the earlier candidate date, then by
/// candidate order.
#[derive(Debug, Clone)]
pub struct AmountDateMatcher {
    config: MatchConfig,
}

impl AmountDateMatcher {
    /// Creates a matcher with the given tolerance policy.
    #[must_use]
    pub const fn new(config: MatchConfig) -> Self {
        Self { config }
    }
}

impl MatchStrategy for AmountDateMatcher {
    fn propose(
        &self,
        transactions: &[BankTransaction],
        candidates: &[MatchCandidate],
    ) -> Vec<MatchProposal> {
        let mut consumed = vec![false; candidates.len()];
        let mut proposals = Vec::new();

        for txn in transactions {
            if txn.match_state != MatchState::Unmatched {
                continue;
            }

            let mut best: Option<(usize, i64, NaiveDate)> = None;

            for (idx, candidate) in candidates.iter().enumerate() {
                if consumed[idx] || candidate.amount != txn.amount {
                    continue;
                }

                let distance = (candidate.line_date - txn.transaction_date)
                    .num_days()
                    .abs();
                if distance > self.config.date_window_days {
                    continue;
                }

                let closer = match best {
                    None => true,
                    Some((_, best_distance, best_date)) => {
                        distance < best_distance
                            || (distance == best_distance && candidate.line_date < best_date)
                    }
                };
                if closer {
                    best = Some((idx, distance, candidate.line_date));
                }
            }

            if let Some((idx, distance, _)) = best {
                consumed[idx] = true;
                proposals.push(MatchProposal {
                    transaction_id: txn.id,
                    line_id: candidates[idx].line_id,
                    entry_id: candidates[idx].entry_id,
                    date_distance_days: distance,
                });
            }
        }

        proposals
    }
}
