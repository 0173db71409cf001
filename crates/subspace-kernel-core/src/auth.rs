//! Capability tokens: a compact permission+expiry credential.
//!
//! An auth tag binds a permission bitmask to a causality key and a logical
//! expiration clock. It is created once by the author of an operation and
//! checked by any verifier holding a current clock reading; it is never
//! updated in place. A replacement tag supersedes an old one.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;

use crate::error::CoreError;

bitflags! {
    /// Permission bits carried by an auth tag.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Action: u8 {
        const READ = 1;
        const WRITE = 2;
        const EXECUTE = 4;
    }
}

/// A capability token: permission mask, causality key id, expiration clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTag {
    /// Permission mask (1=read, 2=write, 4=execute).
    pub action: Action,
    /// Causality key this token is scoped to.
    pub key: u32,
    /// Logical clock value at which the token expires.
    pub exp: u64,
}

impl AuthTag {
    /// Create a new auth tag. No range validation beyond the field widths.
    pub fn new(action: Action, key: u32, exp: u64) -> Self {
        Self { action, key, exp }
    }

    /// Whether the tag carries ANY of the requested permission bits.
    ///
    /// Callers requesting a combined mask get an any-of check, not all-of.
    pub fn has_permission(&self, requested: Action) -> bool {
        self.action.intersects(requested)
    }

    /// Whether the tag is expired at the given clock reading.
    ///
    /// The expiration value itself already counts as expired.
    pub fn is_expired(&self, current_clock: u64) -> bool {
        self.exp <= current_clock
    }
}

impl fmt::Display for AuthTag {
    /// Serialized form always emits `action,key,exp` in this order,
    /// independent of the order fields appeared in during parsing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "action={},key={},exp={}",
            self.action.bits(),
            self.key,
            self.exp
        )
    }
}

impl FromStr for AuthTag {
    type Err = CoreError;

    /// Parse `action=<u8>,key=<u32>,exp=<u64>` with the fields in any order.
    ///
    /// Exactly those three fields must appear, each exactly once. Unknown
    /// bits in `action` are kept as-is; only the integer width is checked.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 3 {
            return Err(CoreError::MalformedAuthTag(format!(
                "expected 3 fields, got {} in {text:?}",
                parts.len()
            )));
        }

        let mut action: Option<Action> = None;
        let mut key: Option<u32> = None;
        let mut exp: Option<u64> = None;

        for part in parts {
            let (name, value) = part.split_once('=').ok_or_else(|| {
                CoreError::MalformedAuthTag(format!("invalid field: {part:?}"))
            })?;
            match name {
                "action" => {
                    if action.is_some() {
                        return Err(CoreError::MalformedAuthTag("duplicate field: action".into()));
                    }
                    let bits: u8 = value.parse().map_err(|_| {
                        CoreError::MalformedAuthTag(format!("invalid action value: {value:?}"))
                    })?;
                    action = Some(Action::from_bits_retain(bits));
                }
                "key" => {
                    if key.is_some() {
                        return Err(CoreError::MalformedAuthTag("duplicate field: key".into()));
                    }
                    key = Some(value.parse().map_err(|_| {
                        CoreError::MalformedAuthTag(format!("invalid key value: {value:?}"))
                    })?);
                }
                "exp" => {
                    if exp.is_some() {
                        return Err(CoreError::MalformedAuthTag("duplicate field: exp".into()));
                    }
                    exp = Some(value.parse().map_err(|_| {
                        CoreError::MalformedAuthTag(format!("invalid exp value: {value:?}"))
                    })?);
                }
                other => {
                    return Err(CoreError::MalformedAuthTag(format!(
                        "unknown field: {other:?}"
                    )));
                }
            }
        }

        // Three parts, no duplicates, no unknown names: all fields present.
        match (action, key, exp) {
            (Some(action), Some(key), Some(exp)) => Ok(Self { action, key, exp }),
            _ => Err(CoreError::MalformedAuthTag(format!(
                "missing field in {text:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_and_permission_checks() {
        let auth = AuthTag::new(Action::READ | Action::WRITE, 30300, 1000);
        assert_eq!(auth.action, Action::READ | Action::WRITE);
        assert_eq!(auth.key, 30300);
        assert_eq!(auth.exp, 1000);

        assert!(auth.has_permission(Action::READ));
        assert!(auth.has_permission(Action::WRITE));
        assert!(!auth.has_permission(Action::EXECUTE));
        // Any-of: a combined request passes if one bit matches.
        assert!(auth.has_permission(Action::READ | Action::EXECUTE));
    }

    #[test]
    fn expiration_is_inclusive() {
        let auth = AuthTag::new(Action::READ, 30300, 1000);
        assert!(!auth.is_expired(999));
        assert!(auth.is_expired(1000));
        assert!(auth.is_expired(1001));
    }

    #[test]
    fn display_fixed_field_order() {
        let auth = AuthTag::new(Action::READ | Action::WRITE, 30300, 1000);
        assert_eq!(auth.to_string(), "action=3,key=30300,exp=1000");
    }

    #[test]
    fn parse_accepts_any_field_order() {
        let auth: AuthTag = "exp=1000,action=3,key=30300".parse().unwrap();
        assert_eq!(auth.to_string(), "action=3,key=30300,exp=1000");
    }

    #[test]
    fn parse_valid_tags() {
        for text in [
            "action=1,key=30300,exp=1000",
            "action=2,key=30301,exp=2000",
            "action=3,key=30302,exp=3000",
            "action=4,key=30303,exp=4000",
            "action=7,key=30304,exp=5000",
        ] {
            let auth: AuthTag = text.parse().unwrap();
            assert_eq!(auth.to_string(), text);
        }
    }

    #[test]
    fn parse_rejects_malformed_tags() {
        for text in [
            "",                                        // empty
            "action=1",                                // missing fields
            "action=1,key=30300",                      // missing exp
            "action=1,key=30300,exp=1000,extra=value", // extra field
            "action=1,key=30300,other=1000",           // unknown field name
            "action=invalid,key=30300,exp=1000",       // non-numeric action
            "action=1,key=invalid,exp=1000",           // non-numeric key
            "action=1,key=30300,exp=invalid",          // non-numeric exp
            "action=1,key=30300,exp=1000,",            // trailing comma
            ",action=1,key=30300,exp=1000",            // leading comma
            "action=1,action=2,exp=1000",              // duplicate field
            "action=256,key=30300,exp=1000",           // action over 8 bits
            "action=1,key=4294967296,exp=1000",        // key over 32 bits
        ] {
            assert!(
                text.parse::<AuthTag>().is_err(),
                "expected parse failure for {text:?}"
            );
        }
    }

    #[test]
    fn unknown_action_bits_survive_round_trip() {
        let auth: AuthTag = "action=255,key=1,exp=2".parse().unwrap();
        assert_eq!(auth.action.bits(), 255);
        assert_eq!(auth.to_string(), "action=255,key=1,exp=2");
    }

    proptest! {
        #[test]
        fn round_trip(action in any::<u8>(), key in any::<u32>(), exp in any::<u64>()) {
            let tag = AuthTag::new(Action::from_bits_retain(action), key, exp);
            let parsed: AuthTag = tag.to_string().parse().unwrap();
            prop_assert_eq!(parsed, tag);
        }

        #[test]
        fn boundary_expiration(key in any::<u32>(), exp in 1u64..) {
            let tag = AuthTag::new(Action::READ, key, exp);
            prop_assert!(tag.is_expired(exp));
            prop_assert!(!tag.is_expired(exp - 1));
        }
    }
}
