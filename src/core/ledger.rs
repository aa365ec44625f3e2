//! Ledger store module
//!
//! This module provides the `Ledger` struct which owns every account, payment
//! and favorite, and implements the wallet operations on top of them.
//!
//! The Ledger is responsible for:
//! - Registering accounts and assigning sequential account IDs
//! - Depositing funds and taking payments from account balances
//! - Rejecting (refunding) and repeating payments
//! - Saving payments as favorites and paying from them
//!
//! Lookups are linear scans over insertion-ordered vectors. Account counts are
//! small and insertion order keeps exports deterministic.

use crate::types::{
    Account, AccountId, Favorite, LedgerError, Money, Payment, PaymentStatus,
};
use uuid::Uuid;

/// In-memory wallet ledger
///
/// Entities are handed out by value or by short-lived reference only; callers
/// hold on to IDs, never to the records themselves.
#[derive(Debug, Default)]
pub struct Ledger {
    /// Last account ID handed out (or seen on import)
    pub(crate) last_account_id: AccountId,
    pub(crate) accounts: Vec<Account>,
    pub(crate) payments: Vec<Payment>,
    pub(crate) favorites: Vec<Favorite>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new account for a phone number
    ///
    /// The account gets the next sequential ID (starting at 1) and a zero
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns `DuplicatePhone` if any account already holds `phone`. The ID
    /// counter is not advanced in that case.
    pub fn register(&mut self, phone: &str) -> Result<Account, LedgerError> {
        if self.accounts.iter().any(|account| account.phone == phone) {
            return Err(LedgerError::duplicate_phone(phone));
        }

        self.last_account_id += 1;
        let account = Account::new(self.last_account_id, phone);
        self.accounts.push(account.clone());

        log::debug!("Registered account {} for phone {}", account.id, phone);
        Ok(account)
    }

    /// Find an account by ID
    pub fn find_account(&self, account_id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    fn find_account_mut(&mut self, account_id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or_else(|| LedgerError::account_not_found(account_id))
    }

    /// Deposit funds into an account
    ///
    /// Deposits are not recorded as payments.
    ///
    /// # Errors
    ///
    /// - `AmountMustBePositive` if `amount <= 0`
    /// - `AccountNotFound` if the account does not exist
    /// - `ArithmeticOverflow` if the balance would overflow
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let account = self.find_account_mut(account_id)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("deposit", account_id))?;

        Ok(())
    }

    /// Take a payment from an account
    ///
    /// This is the only operation that creates payments and the only one that
    /// decreases a balance. The new payment starts `INPROGRESS`.
    ///
    /// # Errors
    ///
    /// - `AmountMustBePositive` if `amount <= 0`
    /// - `AccountNotFound` if the account does not exist
    /// - `InsufficientBalance` if the balance is lower than `amount`
    ///
    /// The account is left untouched on every error.
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: &str,
    ) -> Result<Payment, LedgerError> {
        if amount <= 0 {
            return Err(LedgerError::amount_must_be_positive(amount));
        }

        let account = self.find_account_mut(account_id)?;
        if account.balance < amount {
            return Err(LedgerError::insufficient_balance(
                account_id,
                account.balance,
                amount,
            ));
        }
        account.balance -= amount;

        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            account_id,
            amount,
            category: category.to_string(),
            status: PaymentStatus::InProgress,
        };
        self.payments.push(payment.clone());

        Ok(payment)
    }

    /// Find a payment by ID
    pub fn find_payment(&self, payment_id: &str) -> Result<&Payment, LedgerError> {
        self.payments
            .iter()
            .find(|payment| payment.id == payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))
    }

    /// Reject a payment, refunding its full amount
    ///
    /// Marks the payment `FAIL` and adds its amount back to the account. The
    /// payment stays in the ledger.
    ///
    /// # Errors
    ///
    /// - `PaymentNotFound` if the payment does not exist
    /// - `PaymentAlreadyFailed` if the payment was already rejected
    /// - `AccountNotFound` if the payment's account is gone (imported data)
    /// - `ArithmeticOverflow` if the refund would overflow the balance
    pub fn reject(&mut self, payment_id: &str) -> Result<(), LedgerError> {
        let index = self
            .payments
            .iter()
            .position(|payment| payment.id == payment_id)
            .ok_or_else(|| LedgerError::payment_not_found(payment_id))?;

        let (account_id, amount, status) = {
            let payment = &self.payments[index];
            (payment.account_id, payment.amount, payment.status)
        };
        if status == PaymentStatus::Fail {
            return Err(LedgerError::payment_already_failed(payment_id));
        }

        let account = self.find_account_mut(account_id)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow("reject", account_id))?;

        self.payments[index].status = PaymentStatus::Fail;

        log::debug!(
            "Rejected payment {}, refunded {} to account {}",
            payment_id,
            amount,
            account_id
        );
        Ok(())
    }

    /// Repeat a payment
    ///
    /// Takes a new payment with the same account, amount and category. The new
    /// payment has its own ID and status. Errors from [`Ledger::pay`] are
    /// propagated.
    pub fn repeat(&mut self, payment_id: &str) -> Result<Payment, LedgerError> {
        let payment = self.find_payment(payment_id)?;
        let (account_id, amount, category) =
            (payment.account_id, payment.amount, payment.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Save a payment as a favorite
    ///
    /// Account, amount and category are copied from the payment now; later
    /// changes to the payment do not reach the favorite.
    pub fn favorite(&mut self, payment_id: &str, name: &str) -> Result<Favorite, LedgerError> {
        let payment = self.find_payment(payment_id)?;

        let favorite = Favorite {
            id: Uuid::new_v4().to_string(),
            account_id: payment.account_id,
            amount: payment.amount,
            name: name.to_string(),
            category: payment.category.clone(),
        };
        self.favorites.push(favorite.clone());

        Ok(favorite)
    }

    /// Find a favorite by ID
    pub fn find_favorite(&self, favorite_id: &str) -> Result<&Favorite, LedgerError> {
        self.favorites
            .iter()
            .find(|favorite| favorite.id == favorite_id)
            .ok_or_else(|| LedgerError::favorite_not_found(favorite_id))
    }

    /// Take a new payment using a favorite as the template
    ///
    /// Errors from [`Ledger::pay`] are propagated.
    pub fn pay_from_favorite(&mut self, favorite_id: &str) -> Result<Payment, LedgerError> {
        let favorite = self.find_favorite(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());

        self.pay(account_id, amount, &category)
    }

    /// Collect the payment history of one account, in ledger order
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn export_account_history(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<Payment>, LedgerError> {
        self.find_account(account_id)?;

        Ok(self
            .payments
            .iter()
            .filter(|payment| payment.account_id == account_id)
            .cloned()
            .collect())
    }

    /// All accounts in registration order
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All payments in creation order
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// All favorites in creation order
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Highest account ID handed out or imported so far
    pub fn last_account_id(&self) -> AccountId {
        self.last_account_id
    }

    /// Insert an account or overwrite the one with the same ID
    ///
    /// Advances the ID counter so later registrations never reuse `account.id`.
    pub(crate) fn upsert_account(&mut self, account: Account) {
        if self.last_account_id < account.id {
            self.last_account_id = account.id;
        }

        match self.accounts.iter_mut().find(|a| a.id == account.id) {
            Some(existing) => *existing = account,
            None => self.accounts.push(account),
        }
    }

    /// Insert a payment or overwrite the one with the same ID
    pub(crate) fn upsert_payment(&mut self, payment: Payment) {
        match self.payments.iter_mut().find(|p| p.id == payment.id) {
            Some(existing) => *existing = payment,
            None => self.payments.push(payment),
        }
    }

    /// Insert a favorite or overwrite the one with the same ID
    pub(crate) fn upsert_favorite(&mut self, favorite: Favorite) {
        match self.favorites.iter_mut().find(|f| f.id == favorite.id) {
            Some(existing) => *existing = favorite,
            None => self.favorites.push(favorite),
        }
    }
}
