#[cfg(test)]
mod tests {
    use bitlayout_macros::test_traced;
    use tracing::{debug, error, info, trace};

    #[test_traced(level = "INFO")]
    fn test_info_level() {
        info!("packed header");
        debug!(bits = 12, "filtered out at this level");
        assert_eq!(0b1001_0000u8.count_ones(), 2);
    }

    #[test_traced]
    fn test_default_level() {
        debug!(order = "msb", "default level is debug");
        assert_eq!(u32::BITS / 8, 4);
    }

    #[test_traced(level = "trace")]
    fn test_lowercase_level() {
        trace!(cursor = 3, "levels are case-insensitive");
        assert_eq!(1u8 << 7, 0x80);
    }

    #[test_traced(level = "ERROR")]
    fn test_error_level() {
        error!("only errors are recorded");
        assert_eq!(5 * 2, 10);
    }

    #[test_traced]
    #[should_panic(expected = "decode failed")]
    fn test_panic_propagates() {
        panic!("decode failed");
    }
}
