use crate::errors::ContractErrors;
use crate::storage::pairs::{Pair, PairId, PairsStorageFunc};
use soroban_sdk::{panic_with_error, token, Address, Env, String};

const MAX_SYMBOL_LEN: usize = 64;

pub fn find_pair(e: &Env, id: &PairId) -> Pair {
    let index: u32 = e._pairs().index(id).unwrap_or_else(|| {
        panic_with_error!(&e, &ContractErrors::PairDoesntExist);
    });

    e._pairs().pair(index).unwrap_or_else(|| {
        panic_with_error!(&e, &ContractErrors::PairDoesntExist);
    })
}

pub fn validate_deposit_inputs(e: &Env, pair: &Pair) {
    if !pair.active {
        panic_with_error!(&e, &ContractErrors::PairInactive);
    }
    require_unexpired(e, pair);
}

pub fn require_unexpired(e: &Env, pair: &Pair) {
    if e.ledger().timestamp() >= pair.expiry {
        panic_with_error!(&e, &ContractErrors::PairExpired);
    }
}

pub fn require_expired(e: &Env, pair: &Pair) {
    if e.ledger().timestamp() <= pair.expiry {
        panic_with_error!(&e, &ContractErrors::PairNotExpired);
    }
}

/// Builds an rToken symbol:
/// `{prefix}{col.symbol}_{mint_ratio_label}_{paired.symbol}_{expiry_label}`.
pub fn derive_symbol(
    e: &Env,
    prefix: &str,
    collateral: &Address,
    paired: &Address,
    mint_ratio_label: &String,
    expiry_label: &String,
) -> String {
    let col_symbol: String = token::Client::new(e, collateral).symbol();
    let paired_symbol: String = token::Client::new(e, paired).symbol();

    let mut buf = [0u8; MAX_SYMBOL_LEN];
    let mut len: usize = 0;

    write_bytes(e, &mut buf, &mut len, prefix.as_bytes());
    write_string(e, &mut buf, &mut len, &col_symbol);
    write_bytes(e, &mut buf, &mut len, b"_");
    write_string(e, &mut buf, &mut len, mint_ratio_label);
    write_bytes(e, &mut buf, &mut len, b"_");
    write_string(e, &mut buf, &mut len, &paired_symbol);
    write_bytes(e, &mut buf, &mut len, b"_");
    write_string(e, &mut buf, &mut len, expiry_label);

    match core::str::from_utf8(&buf[..len]) {
        Ok(s) => String::from_str(e, s),
        Err(_) => panic_with_error!(&e, &ContractErrors::InvalidSymbol),
    }
}

fn write_bytes(e: &Env, buf: &mut [u8; MAX_SYMBOL_LEN], len: &mut usize, bytes: &[u8]) {
    if *len + bytes.len() > buf.len() {
        panic_with_error!(&e, &ContractErrors::SymbolTooLong);
    }
    buf[*len..*len + bytes.len()].copy_from_slice(bytes);
    *len += bytes.len();
}

fn write_string(e: &Env, buf: &mut [u8; MAX_SYMBOL_LEN], len: &mut usize, value: &String) {
    let n: usize = value.len() as usize;
    if *len + n > buf.len() {
        panic_with_error!(&e, &ContractErrors::SymbolTooLong);
    }
    value.copy_into_slice(&mut buf[*len..*len + n]);
    *len += n;
}
