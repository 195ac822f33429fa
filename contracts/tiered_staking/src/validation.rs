use crate::error::Error;
use crate::storage::{Position, Tier, MAX_ANNUAL_RATE};

pub struct Validator;

impl Validator {
    pub fn validate_tier_params(
        lock_duration: u64,
        min_deposit: i128,
        annual_rate: i128,
    ) -> Result<(), Error> {
        if lock_duration == 0
            || min_deposit <= 0
            || !(0..=MAX_ANNUAL_RATE).contains(&annual_rate)
        {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    /// The minimum only applies when the deposit opens a new epoch.
    pub fn validate_deposit(tier: &Tier, position: &Position, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        if position.principal == 0 && amount < tier.min_deposit {
            return Err(Error::BelowMinimum);
        }
        Ok(())
    }

    pub fn validate_withdrawal(amount: i128) -> Result<(), Error> {
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier() -> Tier {
        Tier {
            id: 0,
            lock_duration: 5 * 24 * 3600,
            min_deposit: 1000,
            annual_rate: 15_000_000,
        }
    }

    #[test]
    fn test_tier_params() {
        assert_eq!(Validator::validate_tier_params(1, 1, 0), Ok(()));
        assert_eq!(
            Validator::validate_tier_params(0, 1000, 15_000_000),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            Validator::validate_tier_params(3600, 0, 15_000_000),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            Validator::validate_tier_params(3600, 1000, -1),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_rate_upper_bound() {
        assert_eq!(
            Validator::validate_tier_params(3600, 1000, MAX_ANNUAL_RATE),
            Ok(())
        );
        assert_eq!(
            Validator::validate_tier_params(3600, 1000, MAX_ANNUAL_RATE + 1),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            Validator::validate_tier_params(3600, 1000, i128::MAX / 4),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn test_opening_deposit_checks_minimum() {
        let position = Position::empty();
        assert_eq!(
            Validator::validate_deposit(&tier(), &position, 500),
            Err(Error::BelowMinimum)
        );
        assert_eq!(Validator::validate_deposit(&tier(), &position, 1000), Ok(()));
    }

    #[test]
    fn test_top_up_skips_minimum() {
        let position = Position {
            principal: 1000,
            deposit_time: 10,
            last_settled: 10,
        };
        assert_eq!(Validator::validate_deposit(&tier(), &position, 1), Ok(()));
        assert_eq!(
            Validator::validate_deposit(&tier(), &position, 0),
            Err(Error::InvalidAmount)
        );
    }

    #[test]
    fn test_withdrawal_amount() {
        assert_eq!(Validator::validate_withdrawal(0), Ok(()));
        assert_eq!(Validator::validate_withdrawal(-5), Err(Error::InvalidAmount));
    }
}
