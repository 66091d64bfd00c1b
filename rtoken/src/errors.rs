use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractErrors {
    AlreadyDeployed = 0,
    NotDeployed = 1,
    InvalidAmount = 2,
    InsufficientBalance = 3,
    UnexpectedPayment = 4,
    PaymentNotifyFailed = 5,
}
