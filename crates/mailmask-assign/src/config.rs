use crate::error::ConfigError;
use typed_builder::TypedBuilder;

/// Static configuration shared by all assignment strategies.
#[derive(Debug, Clone, TypedBuilder)]
pub struct StrategyConfig {
    /// Domain that generated disposable addresses live under.
    #[builder(setter(into))]
    pub email_domain: String,
    /// Fixed recipient every disposable address forwards to.
    #[builder(setter(into))]
    pub recipient: String,
}

impl StrategyConfig {
    /// Validates the configuration.
    ///
    /// Called by the strategy constructors so a bad deployment fails at
    /// startup instead of on the first assignment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email_domain.is_empty() {
            return Err(ConfigError::MissingEmailDomain);
        }
        if self.email_domain.contains('@') {
            return Err(ConfigError::InvalidEmailDomain(self.email_domain.clone()));
        }
        if self.recipient.is_empty() {
            return Err(ConfigError::MissingRecipient);
        }
        if !self.recipient.contains('@') {
            return Err(ConfigError::InvalidRecipient(self.recipient.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(email_domain: &str, recipient: &str) -> StrategyConfig {
        StrategyConfig::builder()
            .email_domain(email_domain)
            .recipient(recipient)
            .build()
    }

    #[test]
    fn valid_config() {
        assert!(config("relay.test", "me@inbox.test").validate().is_ok());
    }

    #[test]
    fn empty_email_domain() {
        let err = config("", "me@inbox.test").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEmailDomain));
    }

    #[test]
    fn email_domain_with_at_sign() {
        let err = config("user@relay.test", "me@inbox.test")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEmailDomain(_)));
    }

    #[test]
    fn empty_recipient() {
        let err = config("relay.test", "").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingRecipient));
    }

    #[test]
    fn recipient_without_at_sign() {
        let err = config("relay.test", "inbox.test").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRecipient(_)));
    }
}
