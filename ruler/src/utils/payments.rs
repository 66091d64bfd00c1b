use crate::errors::ContractErrors;
use crate::storage::fees::FeesStorageFunc;
use crate::utils::ratios::DECIMAL_BASE;
use log::error;
use num_integer::div_floor;
use soroban_sdk::{panic_with_error, token, Address, Env};

pub fn pull_funds(e: &Env, asset: &Address, from: &Address, amount: u128, err: ContractErrors) {
    let result = token::Client::new(e, asset).try_transfer(
        from,
        &e.current_contract_address(),
        &(amount as i128),
    );

    if result.is_err() {
        error!("funds pull from caller failed");
        panic_with_error!(&e, &err);
    }
}

pub fn push_funds(e: &Env, asset: &Address, to: &Address, amount: u128, err: ContractErrors) {
    let result = token::Client::new(e, asset).try_transfer(
        &e.current_contract_address(),
        to,
        &(amount as i128),
    );

    if result.is_err() {
        error!("funds push to caller failed");
        panic_with_error!(&e, &err);
    }
}

/// Pays `amount` minus the fee and returns the net amount. The fee is only
/// added to the fee map when `accrue` is set; the legs whose fee was already
/// taken earlier in the pair's life pass `false`.
pub fn send_amount_post_fees(
    e: &Env,
    asset: &Address,
    to: &Address,
    amount: u128,
    fee_rate: u128,
    accrue: bool,
) -> u128 {
    let fee: u128 = div_floor(amount * fee_rate, DECIMAL_BASE);
    let net: u128 = amount - fee;

    push_funds(e, asset, to, net, ContractErrors::PayoutFailed);

    if accrue {
        e._fees().accrue(asset, fee);
    }

    net
}
