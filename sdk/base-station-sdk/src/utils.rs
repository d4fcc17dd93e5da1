use alloy_primitives::{Address, U256};

const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// `0x1685...4817`
pub fn short_address(address: &Address) -> String {
    let full = address.to_string();
    format!("{}...{}", &full[..6], &full[full.len() - 4..])
}

/// Cut a message to at most `max` characters, respecting char boundaries.
pub fn truncate_message(message: &str, max: usize) -> String {
    match message.char_indices().nth(max) {
        Some((idx, _)) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

/// Human readable ether amount without trailing zeros, e.g. `0.0001 ETH`.
pub fn format_fee(wei: U256) -> String {
    let unit = U256::from(WEI_PER_ETHER);
    let whole = wei / unit;
    let frac = wei % unit;
    if frac.is_zero() {
        return format!("{} ETH", whole);
    }
    let frac = format!("{:0>18}", frac.to_string());
    format!("{}.{} ETH", whole, frac.trim_end_matches('0'))
}
