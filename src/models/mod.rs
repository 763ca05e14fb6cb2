mod ledger;
mod transaction;

pub(crate) use ledger::Ledger;
pub(crate) use transaction::{CategoryType, Transaction, TransactionFields};

#[cfg(test)]
pub(crate) mod fixtures;
