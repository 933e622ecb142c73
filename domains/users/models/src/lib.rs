use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// The authenticated caller of a single request.
///
/// Produced by the auth collaborator in front of the service and passed
/// explicitly into every operation that needs to know who is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: UserId,
}

impl SessionIdentity {
    pub fn new(user_id: UserId) -> Self { Self { user_id } }
}

impl fmt::Display for SessionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user:{}", self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidIdentity;

impl fmt::Display for InvalidIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("identity must be a positive integer user id")
    }
}

impl std::error::Error for InvalidIdentity {}

impl FromStr for SessionIdentity {
    type Err = InvalidIdentity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<UserId>() {
            Ok(id) if id > 0 => Ok(Self::new(id)),
            _ => Err(InvalidIdentity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identity() {
        assert_eq!("42".parse::<SessionIdentity>(), Ok(SessionIdentity::new(42)));
        assert_eq!(" 7 ".parse::<SessionIdentity>(), Ok(SessionIdentity::new(7)));
    }

    #[test]
    fn test_reject_invalid_identity() {
        assert!("".parse::<SessionIdentity>().is_err());
        assert!("abc".parse::<SessionIdentity>().is_err());
        assert!("0".parse::<SessionIdentity>().is_err());
        assert!("-3".parse::<SessionIdentity>().is_err());
    }
}
