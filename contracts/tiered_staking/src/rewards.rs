use crate::error::Error;
use crate::storage::{Position, Storage, Tier, REWARD_DENOMINATOR};
use crate::tiers::TierRegistry;
use soroban_sdk::{log, Address, Env};

/// Time-proportional reward accrual.
///
/// Reward is tracked in reward units, where one token base unit is
/// `REWARD_DENOMINATOR` units. Settlement never divides, so no precision
/// is lost no matter how often a position is settled.
pub struct RewardEngine;

impl RewardEngine {
    /// Unsettled reward of a position in reward units
    ///
    /// Formula: pending = principal × annual_rate × (now - last_settled)
    ///
    /// Example:
    /// - principal: 1,000, rate: 1.5 (15,000,000), elapsed: 1 day
    /// - pending: 1,000 × 15,000,000 × 86,400 units = 4.109... tokens
    pub fn pending_units(position: &Position, tier: &Tier, now: u64) -> Option<i128> {
        let elapsed = now.saturating_sub(position.last_settled) as i128;
        position
            .principal
            .checked_mul(tier.annual_rate)?
            .checked_mul(elapsed)
    }

    /// Whole token base units contained in `units`; the remainder stays behind
    pub fn to_tokens(units: i128) -> i128 {
        units / REWARD_DENOMINATOR
    }

    /// Book pending reward into the user's earned balance and move the
    /// accrual baseline to `now`. The caller persists `position`.
    pub fn settle(
        env: &Env,
        user: &Address,
        tier: &Tier,
        position: &mut Position,
        now: u64,
    ) -> Result<(), Error> {
        let pending = Self::pending_units(position, tier, now).ok_or(Error::MathOverflow)?;

        if pending > 0 {
            let earned = Storage::get_earned(env, user)
                .checked_add(pending)
                .ok_or(Error::MathOverflow)?;
            Storage::set_earned(env, user, earned);
            log!(env, "settled", tier.id, user.clone(), pending);
        }

        position.last_settled = now;
        Ok(())
    }

    /// Settle every position of `user` that holds principal
    pub fn settle_all(env: &Env, user: &Address, now: u64) -> Result<(), Error> {
        for tier in Storage::get_tiers(env).iter() {
            if let Some(mut position) = Storage::get_position(env, tier.id, user) {
                if position.principal > 0 {
                    Self::settle(env, user, &tier, &mut position, now)?;
                    Storage::set_position(env, tier.id, user, &position);
                }
            }
        }
        Ok(())
    }

    /// Seconds since the position was last settled (0 without a position)
    pub fn pending_time(env: &Env, tier_id: u32, user: &Address) -> Result<u64, Error> {
        TierRegistry::get(env, tier_id)?;
        let now = env.ledger().timestamp();

        Ok(Storage::get_position(env, tier_id, user)
            .map(|position| now.saturating_sub(position.last_settled))
            .unwrap_or(0))
    }

    /// Unsettled reward of one position in token base units
    pub fn pending_reward(env: &Env, tier_id: u32, user: &Address) -> Result<i128, Error> {
        let tier = TierRegistry::get(env, tier_id)?;
        let position = match Storage::get_position(env, tier_id, user) {
            Some(position) => position,
            None => return Ok(0),
        };

        let units = Self::pending_units(&position, &tier, env.ledger().timestamp())
            .ok_or(Error::MathOverflow)?;
        Ok(Self::to_tokens(units))
    }

    /// Settled, unpaid reward in token base units
    pub fn settled_amount(env: &Env, user: &Address) -> i128 {
        Self::to_tokens(Storage::get_earned(env, user))
    }

    /// Settled balance plus everything still pending across all tiers.
    /// This is what the next withdrawal or claim pays at the current time.
    pub fn earned_amount(env: &Env, user: &Address) -> Result<i128, Error> {
        let now = env.ledger().timestamp();
        let mut units = Storage::get_earned(env, user);

        for tier in Storage::get_tiers(env).iter() {
            if let Some(position) = Storage::get_position(env, tier.id, user) {
                let pending =
                    Self::pending_units(&position, &tier, now).ok_or(Error::MathOverflow)?;
                units = units.checked_add(pending).ok_or(Error::MathOverflow)?;
            }
        }

        Ok(Self::to_tokens(units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MAX_ANNUAL_RATE, RATE_SCALE, SECONDS_PER_YEAR};
    use soroban_sdk::testutils::Address as _;

    const DAY: u64 = 24 * 3600;

    fn tier(annual_rate: i128) -> Tier {
        Tier {
            id: 0,
            lock_duration: 5 * DAY,
            min_deposit: 1000,
            annual_rate,
        }
    }

    fn position(principal: i128, last_settled: u64) -> Position {
        Position {
            principal,
            deposit_time: last_settled,
            last_settled,
        }
    }

    #[test]
    fn test_full_year_pays_rate() {
        let tier = tier(15 * RATE_SCALE / 10); // 1.5
        let position = position(1000, 0);

        let units = RewardEngine::pending_units(&position, &tier, SECONDS_PER_YEAR).unwrap();
        assert_eq!(RewardEngine::to_tokens(units), 1500);
        assert_eq!(units % REWARD_DENOMINATOR, 0);
    }

    #[test]
    fn test_one_day() {
        let tier = tier(15 * RATE_SCALE / 10);
        let position = position(1000, 1000);

        let units = RewardEngine::pending_units(&position, &tier, 1000 + DAY).unwrap();
        assert_eq!(units, 1000 * 15_000_000 * 86_400);
        // 1000 × 1.5 / 365 = 4.109...
        assert_eq!(RewardEngine::to_tokens(units), 4);
    }

    #[test]
    fn test_no_elapsed_time() {
        let tier = tier(2 * RATE_SCALE);
        let position = position(7000, 5000);

        assert_eq!(RewardEngine::pending_units(&position, &tier, 5000), Some(0));
    }

    #[test]
    fn test_zero_rate_and_zero_principal() {
        let position = position(7000, 0);
        assert_eq!(RewardEngine::pending_units(&position, &tier(0), DAY), Some(0));

        let empty = Position::empty();
        assert_eq!(
            RewardEngine::pending_units(&empty, &tier(2 * RATE_SCALE), DAY),
            Some(0)
        );
    }

    #[test]
    fn test_split_accrual_matches_single_accrual() {
        let tier = tier(2 * RATE_SCALE);
        let start = position(7000, 0);

        let whole = RewardEngine::pending_units(&start, &tier, 3 * DAY).unwrap();

        let first = RewardEngine::pending_units(&start, &tier, DAY).unwrap();
        let second =
            RewardEngine::pending_units(&position(7000, DAY), &tier, 3 * DAY).unwrap();

        assert_eq!(first + second, whole);
    }

    #[test]
    fn test_settle_books_pending_and_moves_baseline() {
        let env = Env::default();
        let contract_id = env.register(crate::TieredStaking, ());
        let user = Address::generate(&env);
        let tier = tier(2 * RATE_SCALE);
        let mut position = position(7000, 0);

        env.as_contract(&contract_id, || {
            RewardEngine::settle(&env, &user, &tier, &mut position, DAY).unwrap();
            assert_eq!(position.last_settled, DAY);
            assert_eq!(Storage::get_earned(&env, &user), 7000 * 2 * RATE_SCALE * DAY as i128);

            // Nothing left to book at the same instant
            RewardEngine::settle(&env, &user, &tier, &mut position, DAY).unwrap();
            assert_eq!(Storage::get_earned(&env, &user), 7000 * 2 * RATE_SCALE * DAY as i128);
        });
    }

    #[test]
    fn test_max_rate_fits_for_a_century() {
        let tier = tier(MAX_ANNUAL_RATE);
        let position = position(10_000_000_000_000_000_000, 0);

        let units = RewardEngine::pending_units(&position, &tier, 100 * SECONDS_PER_YEAR);
        assert!(units.is_some());
    }

    #[test]
    fn test_overflow_is_reported() {
        let tier = tier(i128::MAX);
        let position = position(2, 0);

        assert_eq!(RewardEngine::pending_units(&position, &tier, DAY), None);
    }
}
