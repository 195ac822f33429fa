use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-5)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // TIER ERRORS (20-29)
    // ============================================
    /// Tier id does not exist
    UnknownTier = 20,
    /// Lock duration or minimum deposit not positive, or negative rate
    InvalidParameter = 21,

    // ============================================
    // DEPOSIT ERRORS (30-39)
    // ============================================
    /// Opening deposit below the tier minimum
    BelowMinimum = 30,

    // ============================================
    // AMOUNT/BALANCE ERRORS (40-49)
    // ============================================
    /// Amount out of range for the operation
    InvalidAmount = 40,
    /// Reward reserve cannot cover the payout
    InsufficientBalance = 41,

    // ============================================
    // MATH ERRORS (50-59)
    // ============================================
    /// Checked arithmetic overflowed
    MathOverflow = 50,
}
