//! Wallet file codec.
//!
//! The on-disk format is a single UTF-8 line of comma-separated positive
//! integers, no trailing delimiter. An empty or whitespace-only file is a
//! zero-balance wallet. Parsing is deliberately lenient: tokens that are
//! not positive integers are skipped rather than aborting the load.

/// Parse wallet file content into a coin list, preserving file order.
///
/// Tokens that fail to parse as an integer, or parse to zero, are dropped.
/// Negative tokens fail the `u64` parse and are dropped the same way.
pub fn parse_coins(content: &str) -> Vec<u64> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut coins = Vec::new();
    for token in trimmed.split(',') {
        let token = token.trim();
        match token.parse::<u64>() {
            Ok(value) if value > 0 => coins.push(value),
            _ => {
                tracing::debug!(token, "skipping invalid coin token");
            }
        }
    }
    coins
}

/// Encode a coin list as a single comma-separated line.
pub fn encode_coins(coins: &[u64]) -> String {
    coins
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_list() {
        assert_eq!(parse_coins("10,5,1"), vec![10, 5, 1]);
    }

    #[test]
    fn parse_preserves_file_order() {
        assert_eq!(parse_coins("3,1,2,1"), vec![3, 1, 2, 1]);
    }

    #[test]
    fn parse_empty_is_zero_balance() {
        assert!(parse_coins("").is_empty());
    }

    #[test]
    fn parse_whitespace_only_is_zero_balance() {
        assert!(parse_coins("  \n\t ").is_empty());
    }

    #[test]
    fn parse_skips_non_numeric_tokens() {
        assert_eq!(parse_coins("10,abc,5"), vec![10, 5]);
    }

    #[test]
    fn parse_skips_zero_and_negative() {
        assert_eq!(parse_coins("0,-3,7"), vec![7]);
    }

    #[test]
    fn parse_skips_mixed_numeric_garbage() {
        // "12abc" is not an integer; the lenient policy drops it whole.
        assert_eq!(parse_coins("12abc,4"), vec![4]);
    }

    #[test]
    fn parse_tolerates_surrounding_whitespace() {
        assert_eq!(parse_coins(" 10 , 5 ,1\n"), vec![10, 5, 1]);
    }

    #[test]
    fn parse_tolerates_trailing_comma() {
        assert_eq!(parse_coins("10,5,"), vec![10, 5]);
    }

    #[test]
    fn encode_simple_list() {
        assert_eq!(encode_coins(&[10, 5, 1]), "10,5,1");
    }

    #[test]
    fn encode_empty_list() {
        assert_eq!(encode_coins(&[]), "");
    }

    #[test]
    fn encode_single_coin_has_no_delimiter() {
        assert_eq!(encode_coins(&[42]), "42");
    }

    #[test]
    fn encode_then_parse_preserves_order() {
        let coins = vec![5, 1, 3, 1];
        assert_eq!(parse_coins(&encode_coins(&coins)), coins);
    }
}
