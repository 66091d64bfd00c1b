#![no_std]

pub mod contract;
pub mod errors;
pub mod storage;
mod utils;


pub use crate::contract::RTokenContractClient;
