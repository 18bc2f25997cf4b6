use regex::Regex;
use std::sync::OnceLock;

/// Decodes a compact ISO-8601 duration token (`PT1H2M3S`) into seconds.
///
/// Hours, minutes and seconds are each optional; missing components count as
/// zero. An unparseable token also yields zero rather than an error: durations
/// are cosmetic and a malformed one must never abort a playlist fetch.
#[must_use]
pub fn parse_duration(token: &str) -> i64 {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("Invalid regex")
    });

    let Some(caps) = re.captures(token.trim()) else {
        return 0;
    };

    let component = |i: usize| -> i64 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    component(1) * 3600 + component(2) * 60 + component(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_duration() {
        assert_eq!(parse_duration("PT1H2M3S"), 3723);
        assert_eq!(parse_duration("PT10H0M0S"), 36000);
    }

    #[test]
    fn test_partial_components() {
        assert_eq!(parse_duration("PT45S"), 45);
        assert_eq!(parse_duration("PT3M"), 180);
        assert_eq!(parse_duration("PT2H"), 7200);
        assert_eq!(parse_duration("PT1H5S"), 3605);
    }

    #[test]
    fn test_zero_and_garbage() {
        assert_eq!(parse_duration("PT0S"), 0);
        assert_eq!(parse_duration("garbage"), 0);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("P1D"), 0);
    }

    #[test]
    fn test_round_trip_property() {
        for (h, m, s) in [(0, 0, 0), (1, 2, 3), (99, 59, 59), (0, 61, 0)] {
            let token = format!("PT{h}H{m}M{s}S");
            assert_eq!(parse_duration(&token), h * 3600 + m * 60 + s);
        }
    }
}
