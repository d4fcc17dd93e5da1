use alloy_primitives::U256;
use std::time::Duration;

// Fees in wei
pub const SOCIAL_POST_FEE: U256 = U256::from_limbs([100_000_000_000_000, 0, 0, 0]); // 0.0001 ETH
pub const DEPLOY_TOKEN_FEE: U256 = U256::from_limbs([500_000_000_000_000, 0, 0, 0]); // 0.0005 ETH
pub const DEPLOY_COLLECTION_FEE: U256 = U256::from_limbs([500_000_000_000_000, 0, 0, 0]); // 0.0005 ETH
pub const MINT_PASS_FEE: U256 = U256::from_limbs([10_000_000_000_000, 0, 0, 0]); // 0.00001 ETH

/// Trailing marker that lets indexers find the attribution suffix.
pub const ATTRIBUTION_MARKER: [u8; 16] = [
    0x80, 0x21, 0x80, 0x21, 0x80, 0x21, 0x80, 0x21, 0x80, 0x21, 0x80, 0x21, 0x80, 0x21, 0x80, 0x21,
];
pub const ATTRIBUTION_SCHEMA_VERSION: u8 = 0;

pub const DEFAULT_CELEBRATION: Duration = Duration::from_millis(2500);
pub const DEFAULT_TOKEN_SUPPLY: &str = "1000000";

/// Longest error message surfaced to the notification area.
pub const MAX_NOTIFICATION_LEN: usize = 100;
