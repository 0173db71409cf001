//! Golden test vectors for cross-implementation verification.
//!
//! Every implementation of the subspace layer must derive identical
//! subspace ids from the same declarations and accept/reject the same auth
//! tag texts.

/// A subspace identity vector: declared strings and the expected id.
#[derive(Debug, Clone)]
pub struct IdentityVector {
    pub name: &'static str,
    pub ops: &'static str,
    pub rules: &'static str,
    pub expected_id: &'static str,
}

/// Subspace identity vectors, including the delimiter-free edge cases.
pub fn identity_vectors() -> Vec<IdentityVector> {
    vec![
        IdentityVector {
            name: "test-subspace",
            ops: "post=30300,propose=30301,vote=30302,invite=30303,mint=30304",
            rules: "energy>1000",
            expected_id: "0x2fff2dc9b8e966410c2120fda790d2a0011aa616bbe096a7858c9b00c0efac32",
        },
        IdentityVector {
            name: "s",
            ops: "o",
            rules: "r",
            expected_id: "0x54bca8d2372c18649c81035349a91aaf152e79e8dd5742c9a5aff701fc25653d",
        },
        // Concatenation collision pair: both triples hash "abc".
        IdentityVector {
            name: "ab",
            ops: "c",
            rules: "",
            expected_id: "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        IdentityVector {
            name: "a",
            ops: "bc",
            rules: "",
            expected_id: "0xba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        // All-empty declaration hashes the empty string.
        IdentityVector {
            name: "",
            ops: "",
            rules: "",
            expected_id: "0xe3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
    ]
}

/// An auth tag text and whether it must parse.
#[derive(Debug, Clone)]
pub struct AuthTagVector {
    pub text: &'static str,
    pub accept: bool,
}

/// Auth tag acceptance vectors.
pub fn auth_tag_vectors() -> Vec<AuthTagVector> {
    vec![
        AuthTagVector { text: "action=1,key=30300,exp=1000", accept: true },
        AuthTagVector { text: "action=7,key=0,exp=0", accept: true },
        AuthTagVector { text: "exp=5,key=4,action=3", accept: true },
        AuthTagVector { text: "action=255,key=4294967295,exp=18446744073709551615", accept: true },
        AuthTagVector { text: "", accept: false },
        AuthTagVector { text: "action=1", accept: false },
        AuthTagVector { text: "action=1,key=30300", accept: false },
        AuthTagVector { text: "action=1,key=30300,exp=1000,extra=value", accept: false },
        AuthTagVector { text: "action=1,key=30300,expiry=1000", accept: false },
        AuthTagVector { text: "action=x,key=30300,exp=1000", accept: false },
        AuthTagVector { text: "action=1,key=30300,exp=1000,", accept: false },
        AuthTagVector { text: ",action=1,key=30300,exp=1000", accept: false },
        AuthTagVector { text: "action=1,action=1,exp=1000", accept: false },
        AuthTagVector { text: "action=256,key=1,exp=1", accept: false },
        AuthTagVector { text: "action=1,key=1,exp=18446744073709551616", accept: false },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use subspace_kernel_core::{calculate_subspace_id, AuthTag};

    #[test]
    fn identity_vectors_reproduce() {
        for v in identity_vectors() {
            assert_eq!(
                calculate_subspace_id(v.name, v.ops, v.rules),
                v.expected_id,
                "identity mismatch for {:?}",
                v.name
            );
        }
    }

    #[test]
    fn auth_tag_vectors_accept_and_reject() {
        for v in auth_tag_vectors() {
            let result = v.text.parse::<AuthTag>();
            assert_eq!(result.is_ok(), v.accept, "vector {:?}", v.text);
        }
    }

    #[test]
    fn accepted_vectors_round_trip_through_display() {
        for v in auth_tag_vectors().into_iter().filter(|v| v.accept) {
            let tag: AuthTag = v.text.parse().unwrap();
            let reparsed: AuthTag = tag.to_string().parse().unwrap();
            assert_eq!(reparsed, tag);
        }
    }
}
