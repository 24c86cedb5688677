use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 700,
    NotInitialized = 701,
    Unauthorized = 702,
    GeyserOffline = 703,
    GeyserShutdown = 704,
    InsufficientBalance = 705,
    InsufficientStake = 706,
    InsufficientRewardPool = 707,
    InvalidDuration = 708,
    InvalidConfig = 709,
    InvalidAmount = 710,
    ArithmeticError = 711,
    MaxStakesReached = 712,
    VaultFactoryExists = 713,
    VaultFactoryNotFound = 714,
    BonusTokenExists = 715,
    MaxBonusTokensReached = 716,
    ProtectedToken = 717,
    SameOwner = 718,
}
