pub mod api;
pub mod context;
pub mod guard;
pub mod refresh_gate;
pub mod storage;
