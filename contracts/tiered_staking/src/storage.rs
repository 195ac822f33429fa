use crate::error::Error;
use soroban_sdk::{contracttype, Address, Env, Vec};

// Constants
pub const RATE_SCALE: i128 = 10_000_000; // 7 decimals, 1.5 = 15_000_000
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 3600;
/// 100.0 per year. Keeps principal × rate × elapsed inside i128 for
/// principals up to 10^19 base units over a century.
pub const MAX_ANNUAL_RATE: i128 = 100 * RATE_SCALE;
/// Reward units per token base unit
pub const REWARD_DENOMINATOR: i128 = RATE_SCALE * SECONDS_PER_YEAR as i128;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tier {
    /// Ordinal id, equal to the tier's index in the registry
    pub id: u32,
    /// Seconds after the opening deposit before principal may leave
    pub lock_duration: u64,
    /// Minimum principal when opening a position
    pub min_deposit: i128,
    /// Annual reward rate scaled by RATE_SCALE
    pub annual_rate: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    /// Staked principal in token base units
    pub principal: i128,
    /// Start of the current deposit epoch, lock baseline
    pub deposit_time: u64,
    /// Accrual baseline
    pub last_settled: u64,
}

impl Position {
    pub fn empty() -> Self {
        Position {
            principal: 0,
            deposit_time: 0,
            last_settled: 0,
        }
    }

    pub fn unlock_time(&self, tier: &Tier) -> u64 {
        self.deposit_time.saturating_add(tier.lock_duration)
    }

    pub fn is_unlocked(&self, tier: &Tier, now: u64) -> bool {
        now.saturating_sub(self.deposit_time) >= tier.lock_duration
    }
}

/// Payout record returned by `withdraw`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalReceipt {
    pub reward: i128,
    pub principal: i128,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Admin,
    StakingToken,
    Tiers,
    TotalStaked,
    Position(u32, Address), // (tier_id, user)
    Earned(Address),        // user -> reward units
}

pub struct Storage;

impl Storage {
    // Config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn initialize(env: &Env, admin: &Address, staking_token: &Address) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, admin);
        env.storage()
            .instance()
            .set(&DataKey::StakingToken, staking_token);
        env.storage().instance().set(&DataKey::TotalStaked, &0i128);
    }

    pub fn get_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn get_staking_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::StakingToken)
            .ok_or(Error::NotInitialized)
    }

    // Tier registry
    pub fn get_tiers(env: &Env) -> Vec<Tier> {
        env.storage()
            .instance()
            .get::<DataKey, Vec<Tier>>(&DataKey::Tiers)
            .unwrap_or(Vec::new(env))
    }

    pub fn set_tiers(env: &Env, tiers: &Vec<Tier>) {
        env.storage().instance().set(&DataKey::Tiers, tiers);
    }

    // Global accounting
    pub fn get_total_staked(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalStaked)
            .unwrap_or(0)
    }

    pub fn set_total_staked(env: &Env, total: i128) {
        env.storage().instance().set(&DataKey::TotalStaked, &total);
    }

    // Positions
    pub fn get_position(env: &Env, tier_id: u32, user: &Address) -> Option<Position> {
        env.storage()
            .persistent()
            .get(&DataKey::Position(tier_id, user.clone()))
    }

    pub fn set_position(env: &Env, tier_id: u32, user: &Address, position: &Position) {
        env.storage()
            .persistent()
            .set(&DataKey::Position(tier_id, user.clone()), position);
    }

    // Aggregate earned balance, in reward units
    pub fn get_earned(env: &Env, user: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Earned(user.clone()))
            .unwrap_or(0)
    }

    pub fn set_earned(env: &Env, user: &Address, earned: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::Earned(user.clone()), &earned);
    }
}
