pub mod common;
pub mod directory;
pub mod drive;
pub mod ledger;
pub mod utils;

#[cfg(test)]
mod tests;
