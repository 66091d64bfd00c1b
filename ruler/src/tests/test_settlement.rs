#![cfg(test)]

use crate::errors::ContractErrors;
use crate::storage::pairs::Pair;
use crate::tests::test_utils::{create_pair, create_test_data, init_contract, set_time, PairData, TestData};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env};

fn fund_and_deposit(test_data: &TestData, depositor: &Address, col_amount: u128) -> u128 {
    test_data
        .collateral_stellar
        .mock_all_auths()
        .mint(depositor, &(col_amount as i128));

    test_data.contract_client.mock_all_auths().deposit(
        depositor,
        &test_data.collateral_client.address,
        &test_data.paired_client.address,
        &test_data.expiry,
        &test_data.mint_ratio,
        &col_amount,
    )
}

#[test]
fn test_repay() {
    let e: Env = Env::default();
    let test_data: TestData = create_test_data(&e);
    init_contract(&test_data);
    let pair_data: PairData = create_pair(&e, &test_data, &test_data.admin, 0);

    let borrower: Address = Address::generate(&e);
    let minted: u128 = fund_and_deposit(&test_data, &borrower, 1_0000000);
    assert_eq!(minted, 7_0000000);

    test_data
        .paired_stellar
        .mock_all_auths()
        .mint(&borrower, &7_0000000);

    let col_back: u128 = test_data.contract_client.mock_all_auths().repay(
        &borrower,
        &test_data.collateral_client.address,
        &test_data.paired_client.address,
        &test_data.expiry,
        &test_data.mint_ratio,
        &7_0000000,
    );

    // The obligation is burned, the capital token stays outstanding
    assert_eq!(col_back, 1_0000000);
    assert_eq!(pair_data.rr_client.balance(&borrower), 0);
    assert_eq!(pair_data.rr_client.total_supply(), 0);
    assert_eq!(pair_data.rc_client.balance(&borrower), 7_0000000);

    assert_eq!(test_data.paired_client.balance(&borrower), 0);
    assert_eq!(test_data.collateral_client.balance(&borrower), 1_0000000);
    assert_eq!(
        test_data
            .paired_client
            .balance(&test_data.contract_client.address),
        7_0000000
    );

    // Repayment does not shrink the pool's exposure
    let pair: Pair = test_data.contract_client.get_pair_by_index(&pair_data.index);
    assert_eq!(pair.col_total, 1_0000000);
}

#[test]
fn test_repay_guards() {
    let e: Env = Env::default();
    let test_data: TestData = create_test_data(&e);
    init_contract(&test_data);
    create_pair(&e, &test_data, &test_data.admin, 0);

    let borrower: Address = Address::generate(&e);
    fund_and_deposit(&test_data, &borrower, 1_0000000);
    test_data
        .paired_stellar
        .mock_all_auths()
        .mint(&borrower, &7_0000000);

    let zero_error = test_data
        .contract_client
        .mock_all_auths()
        .try_repay(
            &borrower,
            &test_data.collateral_client.address,
            &test_data.paired_client.address,
            &test_data.expiry,
            &test_data.mint_ratio,
            &0,
        )
        .unwrap_err()
        .unwrap();
    assert_eq!(&zero_error, &ContractErrors::InvalidAmount.into());

    set_time(&e, test_data.expiry);

    let expired_error = test_data
        .contract_client
        .mock_all_auths()
        .try_repay(
            &borrower,
            &test_data.collateral_client.address,
            &test_data.paired_client.address,
            &test_data.expiry,
            &test_data.mint_ratio,
            &7_0000000,
        )
        .unwrap_err()
        .unwrap();
    assert_eq!(&expired_error, &ContractErrors::PairExpired.into());
}

#[test]
fn test_collect_before_expiry() {
    let e: Env = Env::default();
    let test_data: TestData = create_test_data(&e);
    init_contract(&test_data);
    create_pair(&e, &test_data, &test_data.admin, 0);

    let holder: Address = Address::generate(&e);
    fund_and_deposit(&test_data, &holder, 1_0000000);

    let early_error = test_data
        .contract_client
        .mock_all_auths()
        .try_collect(
            &holder,
            &test_data.collateral_client.address,
            &test_data.paired_client.address,
            &test_data.expiry,
            &test_data.mint_ratio,
            &7_0000000,
        )
        .unwrap_err()
        .unwrap();
    assert_eq!(&early_error, &ContractErrors::PairNotExpired.into());
}

#[test]
fn test_collect_fully_repaid() {
    let e: Env = Env::default();
    let test_data: TestData = create_test_data(&e);
    init_contract(&test_data);
    let pair_data: PairData = create_pair(&e, &test_data, &test_data.admin, 0);

    let borrower: Address = Address::generate(&e);
    fund_and_deposit(&test_data, &borrower, 1_0000000);

    test_data
        .paired_stellar
        .mock_all_auths()
        .mint(&borrower, &7_0000000);
    test_data.contract_client.mock_all_auths().repay(
        &borrower,
        &test_data.collateral_client.address,
        &test_data.paired_client.address,
        &test_data.expiry,
        &test_data.mint_ratio,
        &7_0000000,
    );

    set_time(&e, test_data.expiry + 1);

    let collected: u128 = test_data.contract_client.mock_all_auths().collect(
        &borrower,
        &test_data.collateral_client.address,
        &test_data.paired_client.address,
        &test_data.expiry,
        &test_data.mint_ratio,
        &7_0000000,
    );

    // Nothing defaulted: the capital token converts 1:1 into paired token
    assert_eq!(collected, 7_0000000);
    assert_eq!(pair_data.rc_client.balance(&borrower), 0);
    assert_eq!(test_data.paired_client.balance(&borrower), 7_0000000);
    assert_eq!(
        test_data
            .paired_client
            .balance(&test_data.contract_client.address),
        0
    );
}

#[test]
fn test_collect_pro_rata_on_default() {
    let e: Env = Env::default();
    let test_data: TestData = create_test_data(&e);
    init_contract(&test_data);
    create_pair(&e, &test_data, &test_data.admin, 0);

    let solvent: Address = Address::generate(&e);
    let defaulter: Address = Address::generate(&e);

    fund_and_deposit(&test_data, &solvent, 1_0000000);
    fund_and_deposit(&test_data, &defaulter, 1_0000000);

    // Only one of the two borrowers repays before expiry
    test_data
        .paired_stellar
        .mock_all_auths()
        .mint(&solvent, &7_0000000);
    test_data.contract_client.mock_all_auths().repay(
        &solvent,
        &test_data.collateral_client.address,
        &test_data.paired_client.address,
        &test_data.expiry,
        &test_data.mint_ratio,
        &7_0000000,
    );

    set_time(&e, test_data.expiry + 1);

    // Half the pool defaulted: each capital unit is worth half paired token
    // and half seized collateral.
    for claimant in [&solvent, &defaulter] {
        let collected: u128 = test_data.contract_client.mock_all_auths().collect(
            claimant,
            &test_data.collateral_client.address,
            &test_data.paired_client.address,
            &test_data.expiry,
            &test_data.mint_ratio,
            &7_0000000,
        );
        assert_eq!(collected, 3_5000000);
        assert_eq!(test_data.paired_client.balance(claimant), 3_5000000);
    }

    assert_eq!(test_data.collateral_client.balance(&defaulter), 0_5000000);
    // The repaid borrower already took their collateral back, the collect
    // seizure comes on top of it.
    assert_eq!(test_data.collateral_client.balance(&solvent), 1_5000000);

    // The pool is drained exactly
    assert_eq!(
        test_data
            .paired_client
            .balance(&test_data.contract_client.address),
        0
    );
    assert_eq!(
        test_data
            .collateral_client
            .balance(&test_data.contract_client.address),
        0
    );
}

#[test]
fn test_collect_guards() {
    let e: Env = Env::default();
    let test_data: TestData = create_test_data(&e);
    init_contract(&test_data);
    create_pair(&e, &test_data, &test_data.admin, 0);

    let holder: Address = Address::generate(&e);
    fund_and_deposit(&test_data, &holder, 1_0000000);

    set_time(&e, test_data.expiry + 1);

    let zero_error = test_data
        .contract_client
        .mock_all_auths()
        .try_collect(
            &holder,
            &test_data.collateral_client.address,
            &test_data.paired_client.address,
            &test_data.expiry,
            &test_data.mint_ratio,
            &0,
        )
        .unwrap_err()
        .unwrap();
    assert_eq!(&zero_error, &ContractErrors::InvalidAmount.into());

    // More capital tokens than the caller holds
    assert!(test_data
        .contract_client
        .mock_all_auths()
        .try_collect(
            &holder,
            &test_data.collateral_client.address,
            &test_data.paired_client.address,
            &test_data.expiry,
            &test_data.mint_ratio,
            &8_0000000,
        )
        .is_err());
}
