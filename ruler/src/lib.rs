#![no_std]

mod contract;
mod errors;
mod rtokens;
mod storage;
mod utils;

mod tests;

pub use crate::contract::RulerContractClient;
