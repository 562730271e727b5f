//! Random access-token issuance.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::domain::ports::TokenIssuer;
use crate::domain::{ACCESS_TOKEN_BYTES, AccessToken};

/// Issues tokens from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRngTokenIssuer;

impl TokenIssuer for OsRngTokenIssuer {
    fn issue(&self) -> AccessToken {
        let mut bytes = [0_u8; ACCESS_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        AccessToken::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::domain::ACCESS_TOKEN_LEN;

    #[test]
    fn tokens_are_lower_case_hex_of_fixed_length() {
        let token = OsRngTokenIssuer.issue();
        assert_eq!(token.expose().len(), ACCESS_TOKEN_LEN);
        assert!(AccessToken::parse(token.expose()).is_ok());
    }

    #[test]
    fn large_samples_contain_no_repeats() {
        let sample = 10_000;
        let issued: HashSet<String> = (0..sample)
            .map(|_| OsRngTokenIssuer.issue().expose().to_owned())
            .collect();
        assert_eq!(issued.len(), sample);
    }
}
