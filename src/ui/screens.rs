pub(crate) mod dashboard;
pub(crate) mod filters;
pub(crate) mod transactions;
