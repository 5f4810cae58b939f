pub mod a001_payable;
pub mod a002_branch;
pub mod a003_category;
pub mod a004_supplier;
pub mod a005_payment_method;
pub mod common;
