pub mod instruction;
pub mod processor;
pub mod quirks;
pub mod ram;
pub mod rom;
