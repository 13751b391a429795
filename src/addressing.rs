//! Team addressing scheme.
//!
//! Every team gets its own slice of `10.0.0.0/8`: the hundreds of the team
//! number select the second octet and the remainder selects the third, so
//! team 301 lives in `10.3.1.0/24` and team 42 in `10.0.42.0/24`.

/// Returns the three-octet network prefix for `team`, e.g. `"10.3.1"`.
pub fn ip4prefix(team: u32) -> String {
    format!("10.{}.{}", team / 100, team % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_teams() {
        assert_eq!(ip4prefix(301), "10.3.1");
        assert_eq!(ip4prefix(42), "10.0.42");
        assert_eq!(ip4prefix(10099), "10.100.99");
    }

    #[test]
    fn test_bucket_edges() {
        assert_eq!(ip4prefix(0), "10.0.0");
        assert_eq!(ip4prefix(99), "10.0.99");
        assert_eq!(ip4prefix(100), "10.1.0");
        assert_eq!(ip4prefix(25500), "10.255.0");
    }
}
