use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractErrors {
    // Core
    ContractAlreadyInitiated = 11,
    NotStarted = 12,

    // Pairs
    PairAlreadyExists = 21,
    PairDoesntExist = 22,
    InvalidMintRatio = 23,
    InvalidFeeRate = 24,
    InvalidExpiry = 25,
    PairInactive = 26,
    PairExpired = 27,
    PairNotExpired = 28,
    SymbolTooLong = 29,
    InvalidSymbol = 30,

    // Funds movement
    CollateralDepositFailed = 31,
    PairedDepositFailed = 32,
    PayoutFailed = 33,
    InvalidAmount = 34,

    // Flash loans
    FlashLoanTransferFailed = 41,
    FlashLoanCallbackFailed = 42,
    FlashLoanRepaymentFailed = 43,

    // Payments
    UnexpectedPayment = 51,
}
