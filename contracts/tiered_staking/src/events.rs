use soroban_sdk::{contracttype, Address};

#[contracttype]
#[derive(Clone, Debug)]
pub struct TierCreatedEvent {
    pub tier_id: u32,
    pub lock_duration: u64,
    pub min_deposit: i128,
    pub annual_rate: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DepositedEvent {
    pub tier_id: u32,
    pub user: Address,
    pub amount: i128,
    pub principal: i128,
    pub unlock_time: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RewardPaidEvent {
    pub user: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PrincipalWithdrawnEvent {
    pub tier_id: u32,
    pub user: Address,
    pub amount: i128,
    pub remaining: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct RewardsFundedEvent {
    pub funder: Address,
    pub amount: i128,
}
