use crate::errors::ContractErrors;
use crate::storage::balances::BalancesStorageFunc;
use crate::storage::core::CoreStorageFunc;
use crate::utils::core::{is_recognized_payment, require_ruler};
use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, symbol_short, Address, BytesN, Env,
    String,
};

/// Interface of contracts that can be told about an incoming payment. Invoked
/// on the recipient whenever a transfer carries a data tag.
#[contractclient(name = "PaymentNotifyClient")]
pub trait PaymentNotify {
    fn payment_notify(e: Env, from: Address, amount: i128, data: String);
}

pub trait RTokenContractTrait {
    /// One-time setup of the token instance. The ruler address is the only
    /// principal allowed to mint and force-burn afterwards.
    fn init(e: Env, ruler: Address, symbol: String, decimals: u32);

    fn upgrade(e: Env, hash: BytesN<32>);

    fn ruler(e: Env) -> Address;
    fn symbol(e: Env) -> String;
    fn decimals(e: Env) -> u32;
    fn total_supply(e: Env) -> i128;
    fn balance(e: Env, account: Address) -> i128;

    fn transfer(e: Env, from: Address, to: Address, amount: i128, data: Option<String>);
    fn mint(e: Env, account: Address, amount: i128);
    fn burn_by_ruler(e: Env, account: Address, amount: i128);

    fn payment_notify(e: Env, from: Address, amount: i128, data: String);
}

#[contract]
pub struct RTokenContract;

#[contractimpl]
impl RTokenContractTrait for RTokenContract {
    fn init(e: Env, ruler: Address, symbol: String, decimals: u32) {
        let core = e._core();

        if core.deployed() || core.ruler().is_some() || core.supply() != 0 {
            panic_with_error!(&e, &ContractErrors::AlreadyDeployed);
        }

        core.set_deployed();
        core.set_ruler(&ruler);
        core.set_symbol(&symbol);
        core.set_decimals(&decimals);
        core.bump();
    }

    fn upgrade(e: Env, hash: BytesN<32>) {
        require_ruler(&e);
        e.deployer().update_current_contract_wasm(hash);
        e._core().bump();
    }

    fn ruler(e: Env) -> Address {
        e._core().ruler().unwrap_or_else(|| {
            panic_with_error!(&e, &ContractErrors::NotDeployed);
        })
    }

    fn symbol(e: Env) -> String {
        e._core().symbol().unwrap_or_else(|| {
            panic_with_error!(&e, &ContractErrors::NotDeployed);
        })
    }

    fn decimals(e: Env) -> u32 {
        e._core().decimals().unwrap_or_else(|| {
            panic_with_error!(&e, &ContractErrors::NotDeployed);
        })
    }

    fn total_supply(e: Env) -> i128 {
        e._core().supply()
    }

    fn balance(e: Env, account: Address) -> i128 {
        e._balances().bump(&account);
        e._balances().get(&account)
    }

    fn transfer(e: Env, from: Address, to: Address, amount: i128, data: Option<String>) {
        if amount < 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        from.require_auth();

        let balances = e._balances();
        let from_balance = balances.get(&from);

        if from_balance < amount {
            panic_with_error!(&e, &ContractErrors::InsufficientBalance);
        }

        // A self-transfer or a zero amount still emits the event, it just
        // skips the balance writes.
        if from != to && amount != 0 {
            balances.set(&from, from_balance - amount);
            balances.set(&to, balances.get(&to) + amount);
        }

        balances.bump(&from);
        balances.bump(&to);

        e.events()
            .publish((symbol_short!("transfer"), from.clone(), to.clone()), amount);

        if let Some(tag) = data {
            let result = PaymentNotifyClient::new(&e, &to).try_payment_notify(&from, &amount, &tag);

            if result.is_err() {
                panic_with_error!(&e, &ContractErrors::PaymentNotifyFailed);
            }
        }

        e._core().bump();
    }

    fn mint(e: Env, account: Address, amount: i128) {
        require_ruler(&e);

        if amount <= 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let core = e._core();
        core.set_supply(&(core.supply() + amount));

        let balances = e._balances();
        balances.set(&account, balances.get(&account) + amount);
        balances.bump(&account);

        e.events()
            .publish((symbol_short!("mint"), account), amount);

        core.bump();
    }

    fn burn_by_ruler(e: Env, account: Address, amount: i128) {
        require_ruler(&e);

        if amount <= 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let balances = e._balances();
        let account_balance = balances.get(&account);

        if account_balance < amount {
            panic_with_error!(&e, &ContractErrors::InsufficientBalance);
        }

        balances.set(&account, account_balance - amount);

        let core = e._core();
        core.set_supply(&(core.supply() - amount));

        e.events()
            .publish((symbol_short!("burn"), account), amount);

        core.bump();
    }

    fn payment_notify(e: Env, _from: Address, _amount: i128, data: String) {
        if !is_recognized_payment(&e, &data) {
            panic_with_error!(&e, &ContractErrors::UnexpectedPayment);
        }
    }
}
