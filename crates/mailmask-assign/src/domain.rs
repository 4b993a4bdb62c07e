use crate::error::DomainError;
use url::Url;

/// Reduces a raw URL to its registrable domain.
///
/// The host is extracted with the `url` parser and folded to the
/// public-suffix-aware root domain, so `music.youtube.com` and
/// `www.youtube.com` map to the same key while `a.github.io` and
/// `b.github.io` stay distinct (`github.io` is itself a public suffix).
///
/// Fails on unparsable input, on URLs without a host, and on hosts with no
/// determinable registrable domain (single-label hosts, bracketed IPv6
/// literals).
pub fn effective_domain(raw_url: &str) -> Result<String, DomainError> {
    let parsed = parse_lenient(raw_url)?;
    let host = parsed
        .host_str()
        .ok_or_else(|| DomainError::NoHost(raw_url.to_owned()))?;

    let domain = psl::domain_str(host)
        .ok_or_else(|| DomainError::NoEffectiveDomain(host.to_owned()))?;
    Ok(domain.to_owned())
}

fn parse_lenient(raw_url: &str) -> Result<Url, DomainError> {
    match Url::parse(raw_url) {
        Ok(parsed) => Ok(parsed),
        // Protocol-relative inputs ("//example.com/...") carry a host but no
        // scheme; retry with an assumed one.
        Err(url::ParseError::RelativeUrlWithoutBase) if raw_url.starts_with("//") => {
            Ok(Url::parse(&format!("http:{raw_url}"))?)
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_subdomains_to_registrable_domain() {
        assert_eq!(
            effective_domain("https://www.youtube.com/watch?v=mZ0sJQC8qkE").unwrap(),
            "youtube.com"
        );
        assert_eq!(
            effective_domain("https://music.youtube.com/channel/UCuCfKSM0").unwrap(),
            "youtube.com"
        );
    }

    #[test]
    fn private_suffix_keeps_user_sites_apart() {
        let first = effective_domain("https://kaz.github.io").unwrap();
        let second = effective_domain("https://sekai67.github.io").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn accepts_edge_case_urls() {
        let urls = [
            "//edge-success.test",
            "http://edge-success.test:8080",
            "http://127.0.0.1",
            "http://127.0.0.1:8080",
        ];
        for url in urls {
            assert!(effective_domain(url).is_ok(), "expected success for {url}");
        }
    }

    #[test]
    fn rejects_hostless_and_ipv6_urls() {
        let urls = ["/edge-fail.test", "http://[::1]", "http://[::1]:8080"];
        for url in urls {
            assert!(effective_domain(url).is_err(), "expected failure for {url}");
        }
    }

    #[test]
    fn rejects_urls_without_host() {
        let err = effective_domain("mailto:user@example.com").unwrap_err();
        assert!(matches!(err, DomainError::NoHost(_)));
    }

    #[test]
    fn host_is_case_insensitive() {
        assert_eq!(
            effective_domain("http://WWW.Example.COM").unwrap(),
            "example.com"
        );
    }
}
