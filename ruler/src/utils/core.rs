use crate::errors::ContractErrors;
use crate::storage::core::{CoreState, CoreStorageFunc};
use soroban_sdk::{panic_with_error, Env, String};

// Payment tags recognized by `payment_notify`; any other tag is treated as an
// accidental payment and aborts the transaction.
pub const PAYMENT_TO_RULER: &str = "Transfer from caller to Ruler";
pub const PAYMENT_FROM_RULER: &str = "Transfer from Ruler to caller";

pub fn can_init_contract(e: &Env) {
    if e._core().state().is_some() {
        panic_with_error!(&e, &ContractErrors::ContractAlreadyInitiated);
    }
}

pub fn get_core_state(e: &Env) -> CoreState {
    e._core().state().unwrap_or_else(|| {
        panic_with_error!(&e, &ContractErrors::NotStarted);
    })
}

pub fn require_admin(e: &Env) -> CoreState {
    let core_state = get_core_state(e);
    core_state.admin.require_auth();
    core_state
}

pub fn is_recognized_payment(e: &Env, data: &String) -> bool {
    data == &String::from_str(e, PAYMENT_TO_RULER)
        || data == &String::from_str(e, PAYMENT_FROM_RULER)
}
