pub mod list;
pub mod provision;
