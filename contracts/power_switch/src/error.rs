use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    Unauthorized = 900,
    InvalidTransition = 901,
    OwnerNotSet = 902,
    SameOwner = 903,
}
