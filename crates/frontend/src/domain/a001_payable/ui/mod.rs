pub mod details;
pub mod list;
pub mod payment_dialog;
