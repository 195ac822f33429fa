#![no_std]

mod error;
mod events;
mod positions;
mod rewards;
mod storage;
mod tiers;
mod validation;
mod withdrawal;

pub use error::Error;
pub use storage::{Position, Tier, WithdrawalReceipt, RATE_SCALE, SECONDS_PER_YEAR};

use positions::PositionLedger;
use rewards::RewardEngine;
use storage::Storage;
use tiers::TierRegistry;
use withdrawal::WithdrawalProcessor;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

#[contract]
pub struct TieredStaking;

#[contractimpl]
impl TieredStaking {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger with its admin and the staked token
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address, staking_token: Address) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        Storage::initialize(&env, &admin, &staking_token);
        Ok(())
    }

    /// Register a new tier (Admin only). Tiers can never be changed or removed.
    ///
    /// `annual_rate` is scaled by `RATE_SCALE` (1.5 = 15_000_000).
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidParameter`: lock_duration or min_deposit is zero, or rate is negative
    pub fn create_tier(
        env: Env,
        lock_duration: u64,
        min_deposit: i128,
        annual_rate: i128,
    ) -> Result<u32, Error> {
        Self::check_initialized(&env)?;
        TierRegistry::create(&env, lock_duration, min_deposit, annual_rate)
    }

    /// Pre-fund reward issuance
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InvalidAmount`: amount must be positive
    pub fn fund_rewards(env: Env, funder: Address, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        WithdrawalProcessor::fund_rewards(&env, &funder, amount)
    }

    // ============================================
    // USER OPERATIONS
    // ============================================

    /// Stake tokens into a tier. The ledger must be approved to spend `amount`.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnknownTier`: Tier doesn't exist
    /// - `InvalidAmount`: amount must be positive
    /// - `BelowMinimum`: Opening deposit smaller than the tier minimum
    pub fn deposit(env: Env, user: Address, tier_id: u32, amount: i128) -> Result<(), Error> {
        Self::check_initialized(&env)?;
        PositionLedger::deposit(&env, &user, tier_id, amount)
    }

    /// Pay out all reward and, once the tier lock has elapsed, up to
    /// `amount` of principal from `tier_id`
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `UnknownTier`: Tier doesn't exist
    /// - `InvalidAmount`: amount is negative
    /// - `InsufficientBalance`: Reward reserve cannot cover the payout
    pub fn withdraw(
        env: Env,
        tier_id: u32,
        amount: i128,
        user: Address,
    ) -> Result<WithdrawalReceipt, Error> {
        Self::check_initialized(&env)?;
        WithdrawalProcessor::withdraw(&env, tier_id, amount, &user)
    }

    /// Pay out all reward across every tier
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `InsufficientBalance`: Reward reserve cannot cover the payout
    pub fn claim(env: Env, user: Address) -> Result<i128, Error> {
        Self::check_initialized(&env)?;
        WithdrawalProcessor::claim(&env, &user)
    }

    // ============================================
    // VIEW FUNCTIONS
    // ============================================

    /// Get tier details
    pub fn get_tier(env: Env, tier_id: u32) -> Result<Tier, Error> {
        TierRegistry::get(&env, tier_id)
    }

    /// All tiers in creation order
    pub fn list_tiers(env: Env) -> Vec<Tier> {
        TierRegistry::list(&env)
    }

    pub fn tier_count(env: Env) -> u32 {
        TierRegistry::count(&env)
    }

    /// Principal staked by `user` in `tier_id`
    pub fn get_staked_amount(env: Env, tier_id: u32, user: Address) -> i128 {
        PositionLedger::staked_amount(&env, tier_id, &user)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        PositionLedger::total_staked(&env)
    }

    pub fn get_position(env: Env, tier_id: u32, user: Address) -> Result<Position, Error> {
        PositionLedger::position(&env, tier_id, &user)
    }

    pub fn get_unlock_time(env: Env, tier_id: u32, user: Address) -> Result<u64, Error> {
        PositionLedger::unlock_time(&env, tier_id, &user)
    }

    /// Seconds accrued on a position since its last settlement
    pub fn get_pending_time(env: Env, tier_id: u32, user: Address) -> Result<u64, Error> {
        RewardEngine::pending_time(&env, tier_id, &user)
    }

    pub fn get_pending_reward(env: Env, tier_id: u32, user: Address) -> Result<i128, Error> {
        RewardEngine::pending_reward(&env, tier_id, &user)
    }

    /// Unpaid reward across all tiers at the current time, pending
    /// reward included. The next withdrawal or claim pays this amount.
    pub fn get_earned_amount(env: Env, user: Address) -> Result<i128, Error> {
        RewardEngine::earned_amount(&env, &user)
    }

    /// Reward already booked by settlement and not yet paid
    pub fn get_settled_reward(env: Env, user: Address) -> i128 {
        RewardEngine::settled_amount(&env, &user)
    }

    /// Custody balance available for reward payouts
    pub fn reward_reserve(env: Env) -> Result<i128, Error> {
        WithdrawalProcessor::reward_reserve(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Storage::get_admin(&env)
    }

    pub fn staking_token(env: Env) -> Result<Address, Error> {
        Storage::get_staking_token(&env)
    }

    // ============================================
    // INTERNAL HELPERS
    // ============================================

    fn check_initialized(env: &Env) -> Result<(), Error> {
        if !Storage::is_initialized(env) {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }
}
