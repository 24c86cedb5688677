use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidAmount = 800,
    InsufficientBalance = 801,
    LockNotFound = 802,
    ReentrancyError = 803,
    ArithmeticError = 804,
    TokenNotSet = 805,
}
