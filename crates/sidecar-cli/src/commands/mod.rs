pub mod compare;
pub mod fetch;
