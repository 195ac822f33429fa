use crate::error::Error;
use crate::events::DepositedEvent;
use crate::rewards::RewardEngine;
use crate::storage::{Position, Storage};
use crate::tiers::TierRegistry;
use crate::validation::Validator;
use soroban_sdk::{token, Address, Env, Symbol};

/// Per-user, per-tier stake records and the global staked total.
pub struct PositionLedger;

impl PositionLedger {
    /// Stake `amount` into `tier_id`
    ///
    /// Pending reward is settled before principal changes. A top-up keeps
    /// the original `deposit_time`, so the lock clock is not restarted.
    pub fn deposit(env: &Env, user: &Address, tier_id: u32, amount: i128) -> Result<(), Error> {
        user.require_auth();

        let tier = TierRegistry::get(env, tier_id)?;
        let mut position =
            Storage::get_position(env, tier_id, user).unwrap_or(Position::empty());

        Validator::validate_deposit(&tier, &position, amount)?;

        let now = env.ledger().timestamp();
        RewardEngine::settle(env, user, &tier, &mut position, now)?;

        if position.principal == 0 {
            position.deposit_time = now;
        }
        position.principal = position
            .principal
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;

        let total_staked = Storage::get_total_staked(env)
            .checked_add(amount)
            .ok_or(Error::MathOverflow)?;

        Storage::set_position(env, tier_id, user, &position);
        Storage::set_total_staked(env, total_staked);

        // Pull stake into custody; a failed transfer rolls back the whole call
        let staking_token = Storage::get_staking_token(env)?;
        let contract = env.current_contract_address();
        token::Client::new(env, &staking_token).transfer_from(&contract, user, &contract, &amount);

        env.events().publish(
            (Symbol::new(env, "deposited"), tier_id, user.clone()),
            DepositedEvent {
                tier_id,
                user: user.clone(),
                amount,
                principal: position.principal,
                unlock_time: position.unlock_time(&tier),
            },
        );

        Ok(())
    }

    pub fn staked_amount(env: &Env, tier_id: u32, user: &Address) -> i128 {
        Storage::get_position(env, tier_id, user)
            .map(|position| position.principal)
            .unwrap_or(0)
    }

    pub fn position(env: &Env, tier_id: u32, user: &Address) -> Result<Position, Error> {
        TierRegistry::get(env, tier_id)?;
        Ok(Storage::get_position(env, tier_id, user).unwrap_or(Position::empty()))
    }

    /// When principal of the current epoch becomes withdrawable (0 if none)
    pub fn unlock_time(env: &Env, tier_id: u32, user: &Address) -> Result<u64, Error> {
        let tier = TierRegistry::get(env, tier_id)?;
        Ok(match Storage::get_position(env, tier_id, user) {
            Some(position) if position.principal > 0 => position.unlock_time(&tier),
            _ => 0,
        })
    }

    pub fn total_staked(env: &Env) -> i128 {
        Storage::get_total_staked(env)
    }
}
