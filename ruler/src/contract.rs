use crate::errors::ContractErrors;
use crate::rtokens::RTokenClient;
use crate::storage::core::{CoreState, CoreStorageFunc};
use crate::storage::fees::FeesStorageFunc;
use crate::storage::pairs::{Pair, PairId, PairsStorageFunc};
use crate::utils::core::{
    can_init_contract, get_core_state, is_recognized_payment, require_admin,
};
use crate::utils::pairs::{
    derive_symbol, find_pair, require_expired, require_unexpired, validate_deposit_inputs,
};
use crate::utils::payments::{pull_funds, push_funds, send_amount_post_fees};
use crate::utils::ratios::{col_amount_from_rtoken, rtoken_amount_from_col, DECIMAL_BASE};
use log::error;
use num_integer::div_floor;
use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, token, Address, Bytes, BytesN, Env,
    String, Vec,
};

/// Contracts borrowing through `flash_loan` implement this. The receiver must
/// leave the repayment (amount + fee) approved for the registry to pull
/// before returning true.
#[contractclient(name = "FlashLoanReceiverClient")]
pub trait FlashLoanReceiver {
    fn on_flash_loan(
        e: Env,
        initiator: Address,
        token: Address,
        amount: i128,
        fee: i128,
        data: Bytes,
    ) -> bool;
}

pub trait RulerContractTrait {
    fn init(e: Env, admin: Address);
    fn upgrade(e: Env, hash: BytesN<32>);
    fn set_admin(e: Env, address: Address);
    fn set_fee_receiver(e: Env, address: Address);
    fn set_flash_loan_rate(e: Env, rate: u128);
    fn get_core_state(e: Env) -> CoreState;

    /// Pair management
    fn add_pair(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        expiry_label: String,
        mint_ratio: u128,
        mint_ratio_label: String,
        fee_rate: u128,
        rc_token: Address,
        rr_token: Address,
    ) -> u32;
    fn set_active(e: Env, pair_index: u32, active: bool);
    fn get_pair(e: Env, collateral: Address, paired: Address, expiry: u64, mint_ratio: u128)
        -> Pair;
    fn get_pair_by_index(e: Env, pair_index: u32) -> Pair;
    fn get_collaterals(e: Env) -> Vec<Address>;

    /// Lifecycle operations
    fn deposit(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        col_amount: u128,
    ) -> u128;
    fn mm_deposit(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        paired_amount: u128,
    ) -> u128;
    fn redeem(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        rtoken_amount: u128,
    ) -> u128;
    fn repay(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        rr_amount: u128,
    ) -> u128;
    fn collect(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        rc_amount: u128,
    ) -> u128;

    /// Fees
    fn get_fee(e: Env, token: Address) -> u128;
    fn get_fee_tokens(e: Env) -> Vec<Address>;
    fn collect_fee(e: Env, token: Address) -> u128;
    fn collect_fees(e: Env);

    /// Flash loans
    fn flash_loan(
        e: Env,
        caller: Address,
        receiver: Address,
        token_id: Address,
        amount: u128,
        data: Bytes,
    ) -> u128;

    fn payment_notify(e: Env, from: Address, amount: i128, data: String);
}

#[contract]
pub struct RulerContract;

#[contractimpl]
impl RulerContractTrait for RulerContract {
    fn init(e: Env, admin: Address) {
        can_init_contract(&e);

        e._core().set_state(&CoreState {
            admin: admin.clone(),
            fee_receiver: admin,
            flash_loan_rate: 0,
            next_pair_index: 1,
            collaterals: Vec::new(&e),
        });
        e._core().bump();
    }

    fn upgrade(e: Env, hash: BytesN<32>) {
        require_admin(&e);
        e.deployer().update_current_contract_wasm(hash);
        e._core().bump();
    }

    fn set_admin(e: Env, address: Address) {
        let mut core_state: CoreState = require_admin(&e);
        core_state.admin = address;
        e._core().set_state(&core_state);
        e._core().bump();
    }

    fn set_fee_receiver(e: Env, address: Address) {
        let mut core_state: CoreState = require_admin(&e);
        core_state.fee_receiver = address;
        e._core().set_state(&core_state);
        e._core().bump();
    }

    fn set_flash_loan_rate(e: Env, rate: u128) {
        if rate >= DECIMAL_BASE {
            panic_with_error!(&e, &ContractErrors::InvalidFeeRate);
        }

        let mut core_state: CoreState = require_admin(&e);
        core_state.flash_loan_rate = rate;
        e._core().set_state(&core_state);
        e._core().bump();
    }

    fn get_core_state(e: Env) -> CoreState {
        get_core_state(&e)
    }

    fn add_pair(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        expiry_label: String,
        mint_ratio: u128,
        mint_ratio_label: String,
        fee_rate: u128,
        rc_token: Address,
        rr_token: Address,
    ) -> u32 {
        caller.require_auth();

        let mut core_state: CoreState = get_core_state(&e);

        let id = PairId {
            collateral: collateral.clone(),
            paired: paired.clone(),
            expiry,
            mint_ratio,
        };

        if e._pairs().index(&id).is_some() {
            panic_with_error!(&e, &ContractErrors::PairAlreadyExists);
        }
        if mint_ratio == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidMintRatio);
        }
        if fee_rate >= DECIMAL_BASE {
            panic_with_error!(&e, &ContractErrors::InvalidFeeRate);
        }
        if expiry <= e.ledger().timestamp() {
            panic_with_error!(&e, &ContractErrors::InvalidExpiry);
        }

        let paired_decimals: u32 = token::Client::new(&e, &paired).decimals();

        let rc_symbol: String = derive_symbol(
            &e,
            "RC_",
            &collateral,
            &paired,
            &mint_ratio_label,
            &expiry_label,
        );
        let rr_symbol: String = derive_symbol(
            &e,
            "RR_",
            &collateral,
            &paired,
            &mint_ratio_label,
            &expiry_label,
        );

        // Claim the two freshly-deployed ledger instances. Their once-only
        // init aborts the whole call if an address was already claimed.
        RTokenClient::new(&e, &rc_token).init(
            &e.current_contract_address(),
            &rc_symbol,
            &paired_decimals,
        );
        RTokenClient::new(&e, &rr_token).init(
            &e.current_contract_address(),
            &rr_symbol,
            &paired_decimals,
        );

        let index: u32 = core_state.next_pair_index;

        // Pairs added by anyone but the admin start paused; this is the trust
        // boundary against malicious token contracts posing as collateral.
        let pair = Pair {
            index,
            active: caller == core_state.admin,
            collateral_token: collateral.clone(),
            paired_token: paired,
            rc_token,
            rr_token,
            expiry,
            mint_ratio,
            fee_rate,
            col_total: 0,
        };

        e._pairs().set_pair(&pair);
        e._pairs().set_index(&id, index);
        e._pairs().bump_pair(index);
        e._pairs().bump_index(&id);

        core_state.next_pair_index = index + 1;
        if !core_state.collaterals.contains(&collateral) {
            core_state.collaterals.push_back(collateral);
        }
        e._core().set_state(&core_state);
        e._core().bump();

        index
    }

    fn set_active(e: Env, pair_index: u32, active: bool) {
        require_admin(&e);

        let mut pair: Pair = e._pairs().pair(pair_index).unwrap_or_else(|| {
            panic_with_error!(&e, &ContractErrors::PairDoesntExist);
        });

        pair.active = active;

        e._pairs().set_pair(&pair);
        e._pairs().bump_pair(pair.index);
        e._core().bump();
    }

    fn get_pair(
        e: Env,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
    ) -> Pair {
        find_pair(
            &e,
            &PairId {
                collateral,
                paired,
                expiry,
                mint_ratio,
            },
        )
    }

    fn get_pair_by_index(e: Env, pair_index: u32) -> Pair {
        e._pairs().pair(pair_index).unwrap_or_else(|| {
            panic_with_error!(&e, &ContractErrors::PairDoesntExist);
        })
    }

    fn get_collaterals(e: Env) -> Vec<Address> {
        get_core_state(&e).collaterals
    }

    fn deposit(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        col_amount: u128,
    ) -> u128 {
        caller.require_auth();

        if col_amount == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let mut pair: Pair = find_pair(
            &e,
            &PairId {
                collateral,
                paired,
                expiry,
                mint_ratio,
            },
        );
        validate_deposit_inputs(&e, &pair);

        pull_funds(
            &e,
            &pair.collateral_token,
            &caller,
            col_amount,
            ContractErrors::CollateralDepositFailed,
        );

        pair.col_total += col_amount;

        let col_decimals: u32 = token::Client::new(&e, &pair.collateral_token).decimals();
        let paired_decimals: u32 = token::Client::new(&e, &pair.paired_token).decimals();
        let mint_amount: u128 =
            rtoken_amount_from_col(col_amount, col_decimals, paired_decimals, pair.mint_ratio);

        RTokenClient::new(&e, &pair.rc_token).mint(&caller, &(mint_amount as i128));
        RTokenClient::new(&e, &pair.rr_token).mint(&caller, &(mint_amount as i128));

        e._pairs().set_pair(&pair);
        e._pairs().bump_pair(pair.index);
        e._core().bump();

        mint_amount
    }

    fn mm_deposit(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        paired_amount: u128,
    ) -> u128 {
        caller.require_auth();

        if paired_amount == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let mut pair: Pair = find_pair(
            &e,
            &PairId {
                collateral,
                paired,
                expiry,
                mint_ratio,
            },
        );
        validate_deposit_inputs(&e, &pair);

        pull_funds(
            &e,
            &pair.paired_token,
            &caller,
            paired_amount,
            ContractErrors::PairedDepositFailed,
        );

        // Paired-side deposit: capital tokens are issued 1:1, the fee is
        // taken up front, and the pool's default exposure grows by the
        // collateral equivalent.
        RTokenClient::new(&e, &pair.rc_token).mint(&caller, &(paired_amount as i128));

        e._fees().accrue(
            &pair.paired_token,
            div_floor(paired_amount * pair.fee_rate, DECIMAL_BASE),
        );

        let col_decimals: u32 = token::Client::new(&e, &pair.collateral_token).decimals();
        let paired_decimals: u32 = token::Client::new(&e, &pair.paired_token).decimals();

        pair.col_total +=
            col_amount_from_rtoken(paired_amount, col_decimals, paired_decimals, pair.mint_ratio);

        e._pairs().set_pair(&pair);
        e._pairs().bump_pair(pair.index);
        e._core().bump();

        paired_amount
    }

    fn redeem(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        rtoken_amount: u128,
    ) -> u128 {
        caller.require_auth();

        if rtoken_amount == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let mut pair: Pair = find_pair(
            &e,
            &PairId {
                collateral,
                paired,
                expiry,
                mint_ratio,
            },
        );
        require_unexpired(&e, &pair);

        RTokenClient::new(&e, &pair.rc_token).burn_by_ruler(&caller, &(rtoken_amount as i128));
        RTokenClient::new(&e, &pair.rr_token).burn_by_ruler(&caller, &(rtoken_amount as i128));

        let col_decimals: u32 = token::Client::new(&e, &pair.collateral_token).decimals();
        let paired_decimals: u32 = token::Client::new(&e, &pair.paired_token).decimals();
        let col_to_pay: u128 =
            col_amount_from_rtoken(rtoken_amount, col_decimals, paired_decimals, pair.mint_ratio);

        // The only operation that ever reduces col_total
        pair.col_total -= col_to_pay;

        let net: u128 = send_amount_post_fees(
            &e,
            &pair.collateral_token,
            &caller,
            col_to_pay,
            pair.fee_rate,
            true,
        );

        e._pairs().set_pair(&pair);
        e._pairs().bump_pair(pair.index);
        e._core().bump();

        net
    }

    fn repay(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        rr_amount: u128,
    ) -> u128 {
        caller.require_auth();

        if rr_amount == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let pair: Pair = find_pair(
            &e,
            &PairId {
                collateral,
                paired,
                expiry,
                mint_ratio,
            },
        );
        require_unexpired(&e, &pair);

        pull_funds(
            &e,
            &pair.paired_token,
            &caller,
            rr_amount,
            ContractErrors::PairedDepositFailed,
        );

        e._fees().accrue(
            &pair.paired_token,
            div_floor(rr_amount * pair.fee_rate, DECIMAL_BASE),
        );

        // Only the repayment obligation is burned; the capital token stays
        // outstanding and is now a claim on the paired-token pool.
        RTokenClient::new(&e, &pair.rr_token).burn_by_ruler(&caller, &(rr_amount as i128));

        let col_decimals: u32 = token::Client::new(&e, &pair.collateral_token).decimals();
        let paired_decimals: u32 = token::Client::new(&e, &pair.paired_token).decimals();
        let col_to_pay: u128 =
            col_amount_from_rtoken(rr_amount, col_decimals, paired_decimals, pair.mint_ratio);

        // No fee on the collateral leg; the paired leg was already charged
        push_funds(
            &e,
            &pair.collateral_token,
            &caller,
            col_to_pay,
            ContractErrors::PayoutFailed,
        );

        e._pairs().bump_pair(pair.index);
        e._core().bump();

        col_to_pay
    }

    fn collect(
        e: Env,
        caller: Address,
        collateral: Address,
        paired: Address,
        expiry: u64,
        mint_ratio: u128,
        rc_amount: u128,
    ) -> u128 {
        caller.require_auth();

        if rc_amount == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let pair: Pair = find_pair(
            &e,
            &PairId {
                collateral,
                paired,
                expiry,
                mint_ratio,
            },
        );
        require_expired(&e, &pair);

        RTokenClient::new(&e, &pair.rc_token).burn_by_ruler(&caller, &(rc_amount as i128));

        // Whatever repayment obligation is still outstanding at expiry is
        // exactly the defaulted amount
        let defaulted: u128 = RTokenClient::new(&e, &pair.rr_token).total_supply() as u128;

        if defaulted == 0 {
            let net: u128 = send_amount_post_fees(
                &e,
                &pair.paired_token,
                &caller,
                rc_amount,
                pair.fee_rate,
                false,
            );

            e._pairs().bump_pair(pair.index);
            e._core().bump();

            return net;
        }

        let col_decimals: u32 = token::Client::new(&e, &pair.collateral_token).decimals();
        let paired_decimals: u32 = token::Client::new(&e, &pair.paired_token).decimals();

        // Pro-rata split: the solvent share of the pool is paid in paired
        // token, the defaulted share is recovered from collateral.
        let eligible: u128 =
            rtoken_amount_from_col(pair.col_total, col_decimals, paired_decimals, pair.mint_ratio);

        let paired_to_collect: u128 = div_floor(rc_amount * (eligible - defaulted), eligible);
        let net: u128 = send_amount_post_fees(
            &e,
            &pair.paired_token,
            &caller,
            paired_to_collect,
            pair.fee_rate,
            false,
        );

        let col_equivalent: u128 =
            col_amount_from_rtoken(rc_amount, col_decimals, paired_decimals, pair.mint_ratio);
        let col_to_collect: u128 = div_floor(col_equivalent * defaulted, eligible);
        send_amount_post_fees(
            &e,
            &pair.collateral_token,
            &caller,
            col_to_collect,
            pair.fee_rate,
            true,
        );

        e._pairs().bump_pair(pair.index);
        e._core().bump();

        net
    }

    fn get_fee(e: Env, token: Address) -> u128 {
        e._fees().fee(&token)
    }

    fn get_fee_tokens(e: Env) -> Vec<Address> {
        e._fees().tokens()
    }

    fn collect_fee(e: Env, token: Address) -> u128 {
        let core_state: CoreState = get_core_state(&e);

        let amount: u128 = e._fees().fee(&token);
        if amount > 0 {
            e._fees().clear(&token);
            push_funds(
                &e,
                &token,
                &core_state.fee_receiver,
                amount,
                ContractErrors::PayoutFailed,
            );
        }

        e._core().bump();
        amount
    }

    fn collect_fees(e: Env) {
        let core_state: CoreState = get_core_state(&e);

        for token in e._fees().tokens().iter() {
            let amount: u128 = e._fees().fee(&token);
            if amount > 0 {
                e._fees().clear(&token);
                push_funds(
                    &e,
                    &token,
                    &core_state.fee_receiver,
                    amount,
                    ContractErrors::PayoutFailed,
                );
            }
        }

        e._core().bump();
    }

    fn flash_loan(
        e: Env,
        caller: Address,
        receiver: Address,
        token_id: Address,
        amount: u128,
        data: Bytes,
    ) -> u128 {
        caller.require_auth();

        if amount == 0 {
            panic_with_error!(&e, &ContractErrors::InvalidAmount);
        }

        let core_state: CoreState = get_core_state(&e);

        let lend = token::Client::new(&e, &token_id).try_transfer(
            &e.current_contract_address(),
            &receiver,
            &(amount as i128),
        );
        if lend.is_err() {
            error!("flash loan transfer to receiver failed");
            panic_with_error!(&e, &ContractErrors::FlashLoanTransferFailed);
        }

        let fee: u128 = div_floor(amount * core_state.flash_loan_rate, DECIMAL_BASE);

        match FlashLoanReceiverClient::new(&e, &receiver).try_on_flash_loan(
            &caller,
            &token_id,
            &(amount as i128),
            &(fee as i128),
            &data,
        ) {
            Ok(Ok(true)) => {}
            _ => {
                error!("flash loan callback failed");
                panic_with_error!(&e, &ContractErrors::FlashLoanCallbackFailed);
            }
        }

        e._fees().accrue(&token_id, fee);

        let repayment = token::Client::new(&e, &token_id).try_transfer(
            &receiver,
            &e.current_contract_address(),
            &((amount + fee) as i128),
        );
        if repayment.is_err() {
            error!("flash loan repayment failed");
            panic_with_error!(&e, &ContractErrors::FlashLoanRepaymentFailed);
        }

        e._core().bump();

        fee
    }

    fn payment_notify(e: Env, _from: Address, _amount: i128, data: String) {
        if !is_recognized_payment(&e, &data) {
            panic_with_error!(&e, &ContractErrors::UnexpectedPayment);
        }
    }
}
