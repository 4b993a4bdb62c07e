use rand::Rng;

const ADDRESS_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Shape of the disposable addresses one strategy generates.
///
/// The producer is pure generation: it does not check for collisions.
/// Value uniqueness is enforced by the store, which rejects a colliding
/// address with `DuplicatedValue`.
#[derive(Debug, Clone, Copy)]
pub struct AddressShape {
    /// Literal prefix of the local part.
    pub prefix: &'static str,
    /// Number of random lowercase letters after the prefix.
    pub suffix_len: usize,
}

impl AddressShape {
    /// Produces a fresh disposable address under `email_domain`.
    pub fn produce(&self, email_domain: &str) -> String {
        format!(
            "{}{}@{}",
            self.prefix,
            random_suffix(self.suffix_len),
            email_domain
        )
    }
}

fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ADDRESS_CHARSET[rng.gen_range(0..ADDRESS_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produced_address_has_expected_shape() {
        let shape = AddressShape {
            prefix: "t-",
            suffix_len: 6,
        };
        let addr = shape.produce("relay.test");

        let (local, domain) = addr.split_once('@').unwrap();
        assert_eq!(domain, "relay.test");

        let suffix = local.strip_prefix("t-").unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn empty_prefix_yields_bare_suffix() {
        let shape = AddressShape {
            prefix: "",
            suffix_len: 4,
        };
        let addr = shape.produce("relay.test");

        let (local, _) = addr.split_once('@').unwrap();
        assert_eq!(local.len(), 4);
    }

    #[test]
    fn repeated_calls_do_not_trivially_collide() {
        let shape = AddressShape {
            prefix: "",
            suffix_len: 12,
        };
        let first = shape.produce("relay.test");
        let second = shape.produce("relay.test");
        assert_ne!(first, second);
    }
}
