use crate::error::Error;
use crate::events::TierCreatedEvent;
use crate::storage::{Storage, Tier};
use crate::validation::Validator;
use soroban_sdk::{Env, Symbol, Vec};

/// Append-only catalog of staking tiers, addressed by ordinal id.
pub struct TierRegistry;

impl TierRegistry {
    /// Create a tier (Admin only)
    pub fn create(
        env: &Env,
        lock_duration: u64,
        min_deposit: i128,
        annual_rate: i128,
    ) -> Result<u32, Error> {
        let admin = Storage::get_admin(env)?;
        admin.require_auth();

        Validator::validate_tier_params(lock_duration, min_deposit, annual_rate)?;

        let mut tiers = Storage::get_tiers(env);
        let tier_id = tiers.len();
        tiers.push_back(Tier {
            id: tier_id,
            lock_duration,
            min_deposit,
            annual_rate,
        });
        Storage::set_tiers(env, &tiers);

        env.events().publish(
            (Symbol::new(env, "tier_created"), tier_id),
            TierCreatedEvent {
                tier_id,
                lock_duration,
                min_deposit,
                annual_rate,
            },
        );

        Ok(tier_id)
    }

    pub fn get(env: &Env, tier_id: u32) -> Result<Tier, Error> {
        Storage::get_tiers(env)
            .get(tier_id)
            .ok_or(Error::UnknownTier)
    }

    pub fn list(env: &Env) -> Vec<Tier> {
        Storage::get_tiers(env)
    }

    pub fn count(env: &Env) -> u32 {
        Storage::get_tiers(env).len()
    }
}
