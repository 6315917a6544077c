/// Point numbers (4, 5, 6, 8, 9, 10)
pub const POINTS: [u8; 6] = [4, 5, 6, 8, 9, 10];

/// Come-out naturals (a "pass" for the line)
pub const NATURALS: [u8; 2] = [7, 11];

/// Come-out craps numbers
pub const CRAPS: [u8; 3] = [2, 3, 12];

pub const SEVEN: u8 = 7;

/// Faces on a single die
pub const DIE_FACES: u8 = 6;

/// Default roll budget per trial: 2 rolls a minute over a two hour session.
pub const DEFAULT_ROLLS: u64 = 2 * 60 * 2;

/// Default starting bankroll
pub const DEFAULT_BANKROLL: i64 = 440;

/// Default base seed; trial `t` is seeded with `DEFAULT_SEED + t`
pub const DEFAULT_SEED: i64 = 9_671_111;

/// Buy bet commission: 5.00% of the bet, rounded up to the cent
pub const BUY_COMMISSION_BPS: u32 = 500;
pub const BUY_COMMISSION_DENOM: u32 = 10_000;
