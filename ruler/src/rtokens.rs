use soroban_sdk::{contractclient, Address, Env, String};

/// Client of the rToken ledger contract. The registry is set as the ruler of
/// both per-pair instances, which is what authorizes mint and forced burn.
#[contractclient(name = "RTokenClient")]
pub trait RToken {
    fn init(e: Env, ruler: Address, symbol: String, decimals: u32);
    fn decimals(e: Env) -> u32;
    fn total_supply(e: Env) -> i128;
    fn balance(e: Env, account: Address) -> i128;
    fn mint(e: Env, account: Address, amount: i128);
    fn burn_by_ruler(e: Env, account: Address, amount: i128);
}
