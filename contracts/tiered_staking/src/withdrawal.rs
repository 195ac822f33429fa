use crate::error::Error;
use crate::events::{PrincipalWithdrawnEvent, RewardPaidEvent, RewardsFundedEvent};
use crate::rewards::RewardEngine;
use crate::storage::{Storage, WithdrawalReceipt, REWARD_DENOMINATOR};
use crate::tiers::TierRegistry;
use crate::validation::Validator;
use soroban_sdk::{token, Address, Env, Symbol};

/// Reward payout and lock-gated principal release.
pub struct WithdrawalProcessor;

impl WithdrawalProcessor {
    /// Pay out all reward, then release up to `amount` of principal from
    /// `tier_id` if its lock has elapsed. A locked position is not an
    /// error: the call degrades to a reward-only payout.
    pub fn withdraw(
        env: &Env,
        tier_id: u32,
        amount: i128,
        user: &Address,
    ) -> Result<WithdrawalReceipt, Error> {
        user.require_auth();
        Validator::validate_withdrawal(amount)?;

        let tier = TierRegistry::get(env, tier_id)?;
        let now = env.ledger().timestamp();

        RewardEngine::settle_all(env, user, now)?;
        let reward = Self::pay_reward(env, user)?;

        let mut released = 0;
        if let Some(mut position) = Storage::get_position(env, tier_id, user) {
            if position.principal > 0 && position.is_unlocked(&tier, now) {
                released = amount.min(position.principal);
            }

            if released > 0 {
                position.principal -= released;
                let total_staked = Storage::get_total_staked(env)
                    .checked_sub(released)
                    .ok_or(Error::MathOverflow)?;

                Storage::set_position(env, tier_id, user, &position);
                Storage::set_total_staked(env, total_staked);

                let staking_token = Storage::get_staking_token(env)?;
                token::Client::new(env, &staking_token).transfer(
                    &env.current_contract_address(),
                    user,
                    &released,
                );

                env.events().publish(
                    (Symbol::new(env, "principal_withdrawn"), tier_id, user.clone()),
                    PrincipalWithdrawnEvent {
                        tier_id,
                        user: user.clone(),
                        amount: released,
                        remaining: position.principal,
                    },
                );
            }
        }

        Ok(WithdrawalReceipt {
            reward,
            principal: released,
        })
    }

    /// Settle every position and pay out reward without touching principal
    pub fn claim(env: &Env, user: &Address) -> Result<i128, Error> {
        user.require_auth();

        RewardEngine::settle_all(env, user, env.ledger().timestamp())?;
        Self::pay_reward(env, user)
    }

    /// Transfer the whole-unit part of the earned balance to `user`.
    /// The sub-unit remainder carries over to the next payout.
    fn pay_reward(env: &Env, user: &Address) -> Result<i128, Error> {
        let earned = Storage::get_earned(env, user);
        let reward = RewardEngine::to_tokens(earned);
        if reward == 0 {
            return Ok(0);
        }

        let reserve = Self::reward_reserve(env)?;
        if reward > reserve {
            return Err(Error::InsufficientBalance);
        }

        Storage::set_earned(env, user, earned % REWARD_DENOMINATOR);

        let staking_token = Storage::get_staking_token(env)?;
        token::Client::new(env, &staking_token).transfer(
            &env.current_contract_address(),
            user,
            &reward,
        );

        env.events().publish(
            (Symbol::new(env, "reward_paid"), user.clone()),
            RewardPaidEvent {
                user: user.clone(),
                amount: reward,
            },
        );

        Ok(reward)
    }

    /// Move tokens into custody to back future reward payouts
    pub fn fund_rewards(env: &Env, funder: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        funder.require_auth();

        let staking_token = Storage::get_staking_token(env)?;
        token::Client::new(env, &staking_token).transfer(
            funder,
            &env.current_contract_address(),
            &amount,
        );

        env.events().publish(
            (Symbol::new(env, "rewards_funded"), funder.clone()),
            RewardsFundedEvent {
                funder: funder.clone(),
                amount,
            },
        );

        Ok(())
    }

    /// Custody balance not backing any staked principal
    pub fn reward_reserve(env: &Env) -> Result<i128, Error> {
        let staking_token = Storage::get_staking_token(env)?;
        let balance = token::Client::new(env, &staking_token).balance(&env.current_contract_address());

        Ok(balance.saturating_sub(Storage::get_total_staked(env)).max(0))
    }
}
