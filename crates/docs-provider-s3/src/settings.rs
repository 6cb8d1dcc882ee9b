//! Provider properties and the immutable settings bound from them.

use std::fmt;

use docs_provider_core::{ConfigError, PropertyRegistry, PropertyType, ProviderProperty};

pub const BUCKET_NAME: &str = "BucketName";
pub const ACCESS_KEY: &str = "AccessKey";
pub const SECRET_KEY: &str = "SecretKey";
pub const USER_NAME: &str = "UserName";
pub const PASSWORD: &str = "Password";
pub const REGION: &str = "Region";
pub const SERVICE_URL: &str = "ServiceUrl";

pub const DEFAULT_REGION: &str = "us-east-1";

/// Build the provider's property registry, sorted by sequence.
pub fn provider_properties() -> PropertyRegistry {
    let mut registry = PropertyRegistry::new();
    registry.add(ProviderProperty::new(BUCKET_NAME, PropertyType::String, true, "", 3));
    registry.add(ProviderProperty::new(ACCESS_KEY, PropertyType::String, true, "", 5));
    registry.add(ProviderProperty::new(SECRET_KEY, PropertyType::String, true, "", 6).encrypted());
    registry.add(ProviderProperty::new(USER_NAME, PropertyType::String, false, "", 7));
    registry.add(ProviderProperty::new(PASSWORD, PropertyType::String, false, "", 8).encrypted());
    registry.add(ProviderProperty::new(
        REGION,
        PropertyType::String,
        false,
        DEFAULT_REGION,
        9,
    ));
    registry.add(ProviderProperty::new(SERVICE_URL, PropertyType::String, false, "", 10));
    registry.sort_by_sequence();
    registry
}

/// Connection settings for the S3 provider, fixed once bound.
#[derive(Clone, PartialEq, Eq)]
pub struct S3Settings {
    pub bucket_name: String,
    pub access_key: String,
    pub secret_key: String,
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub region: String,
    /// Custom endpoint for S3-compatible services.
    pub service_url: Option<String>,
}

impl S3Settings {
    /// Read settings from a bound registry.
    ///
    /// Fails with [`ConfigError::MissingRequired`] when any required property
    /// has no value. Properties this provider does not know are ignored.
    pub fn from_registry(registry: &PropertyRegistry) -> Result<Self, ConfigError> {
        let missing = registry.missing_required();
        if !missing.is_empty() {
            return Err(ConfigError::MissingRequired(missing));
        }

        let mut settings = Self {
            bucket_name: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            user_name: None,
            password: None,
            region: DEFAULT_REGION.to_string(),
            service_url: None,
        };

        for property in registry.iter() {
            let value = property.effective_value().trim();
            match property.name.as_str() {
                BUCKET_NAME => settings.bucket_name = value.to_string(),
                ACCESS_KEY => settings.access_key = value.to_string(),
                SECRET_KEY => settings.secret_key = value.to_string(),
                USER_NAME => settings.user_name = non_empty(value),
                PASSWORD => settings.password = non_empty(value),
                REGION => {
                    if let Some(region) = non_empty(value) {
                        settings.region = region;
                    }
                }
                SERVICE_URL => settings.service_url = non_empty(value),
                _ => {}
            }
        }

        Ok(settings)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl fmt::Debug for S3Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("S3Settings")
            .field("bucket_name", &self.bucket_name)
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("user_name", &self.user_name)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .field("service_url", &self.service_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use docs_provider_core::ContentSource;

    use super::*;

    #[test]
    fn test_properties_in_sequence_order() {
        let registry = provider_properties();
        let order: Vec<_> = registry.iter().map(|p| (p.name.as_str(), p.sequence)).collect();
        assert_eq!(
            order,
            vec![
                (BUCKET_NAME, 3),
                (ACCESS_KEY, 5),
                (SECRET_KEY, 6),
                (USER_NAME, 7),
                (PASSWORD, 8),
                (REGION, 9),
                (SERVICE_URL, 10),
            ]
        );
        assert!(registry.get(SECRET_KEY).unwrap().encrypted);
        assert!(!registry.get(USER_NAME).unwrap().required);
    }

    #[test]
    fn test_bind_full_source() {
        let mut registry = provider_properties();
        registry.bind(
            &ContentSource::new("Archive")
                .with(BUCKET_NAME, "docs")
                .with(ACCESS_KEY, "AKIA")
                .with(SECRET_KEY, "shh")
                .with(USER_NAME, "alice")
                .with(SERVICE_URL, "http://localhost:9000")
                .with("Unrelated", "value"),
        );

        let settings = S3Settings::from_registry(&registry).unwrap();
        assert_eq!(settings.bucket_name, "docs");
        assert_eq!(settings.access_key, "AKIA");
        assert_eq!(settings.secret_key, "shh");
        assert_eq!(settings.user_name.as_deref(), Some("alice"));
        assert_eq!(settings.password, None);
        assert_eq!(settings.region, DEFAULT_REGION);
        assert_eq!(settings.service_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_missing_required_rejected_at_bind() {
        let mut registry = provider_properties();
        registry.bind(&ContentSource::new("Archive").with(BUCKET_NAME, "docs"));

        match S3Settings::from_registry(&registry) {
            Err(ConfigError::MissingRequired(names)) => {
                assert_eq!(names, vec![ACCESS_KEY.to_string(), SECRET_KEY.to_string()]);
            }
            other => panic!("expected MissingRequired, got {:?}", other),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let settings = S3Settings {
            bucket_name: "docs".to_string(),
            access_key: "AKIA".to_string(),
            secret_key: "top-secret".to_string(),
            user_name: None,
            password: Some("hunter2".to_string()),
            region: DEFAULT_REGION.to_string(),
            service_url: None,
        };
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("top-secret"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("docs"));
    }
}
