//! # Mapping Module
//!
//! Naming-convention inference from request paths to page types.
//!
//! ## Automapping
//!
//! With package `com.mycorp`, the path `/admin/add-customer.htm` yields the
//! candidates:
//!
//! 1. `com.mycorp.admin.AddCustomer`
//! 2. `com.mycorp.admin.AddCustomerPage`
//!
//! The first candidate that loads wins. A candidate that loads but is not a
//! page is reported as a configuration error.
//!
//! ## Exclusions
//!
//! Exclusion rules veto inference for whole sub-trees (`secure/*`) or single
//! files (`/reports/q1.htm`). Excluded paths are served by the built-in
//! excluded handler and are never passed to the [`NameMapper`].
//!
//! Both components are immutable after construction and safe to share
//! between threads.

mod exclusion;
mod name;
#[cfg(test)]
mod tests;

pub use exclusion::{ExclusionMatcher, ExclusionRule};
pub use name::{camel_case, candidates, strip_extension, Candidates, NameMapper, PAGE_SUFFIX};
