pub mod cli;
pub mod columns;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod input;
pub mod reference;
pub mod search;
pub mod session;
pub mod validate;
