use crate::errors::ContractErrors;
use crate::storage::core::CoreStorageFunc;
use soroban_sdk::{panic_with_error, Env, String};

// Payment tags accepted by `payment_notify`; anything else is treated as an
// accidental payment and aborts the transaction.
pub const PAYMENT_TO_RULER: &str = "Transfer from caller to Ruler";
pub const PAYMENT_FROM_RULER: &str = "Transfer from Ruler to caller";

pub fn require_ruler(e: &Env) {
    match e._core().ruler() {
        None => panic_with_error!(&e, &ContractErrors::NotDeployed),
        Some(v) => v.require_auth(),
    }
}

pub fn is_recognized_payment(e: &Env, data: &String) -> bool {
    data == &String::from_str(e, PAYMENT_TO_RULER)
        || data == &String::from_str(e, PAYMENT_FROM_RULER)
}
