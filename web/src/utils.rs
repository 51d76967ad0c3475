/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Numeric seeds are used as-is, anything else is hashed (FNV-1a) so any word can name a board.
pub(crate) fn parse_seed(seed: &str) -> u64 {
    seed.parse().unwrap_or_else(|_| {
        seed.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        })
    })
}

/// Three-character counter display, clamped to what fits.
pub(crate) fn format_for_counter(value: i32) -> String {
    match value {
        v if v < -99 => "-99".to_string(),
        v if v < 0 => format!("-{:02}", -v),
        v if v > 999 => "999".to_string(),
        v => format!("{:03}", v),
    }
}
