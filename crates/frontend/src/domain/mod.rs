pub mod a001_payable;
