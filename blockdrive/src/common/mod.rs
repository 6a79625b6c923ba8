pub mod constants;
pub mod context;
pub mod identity;
pub mod key;
