use crate::source::ContentSource;

/// Declared type of a provider property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Integer,
    Boolean,
}

/// A named, typed configuration property declared by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProperty {
    pub name: String,
    pub property_type: PropertyType,
    pub required: bool,
    pub default_value: String,
    /// Presentation and processing order.
    pub sequence: u32,
    pub validation_context: String,
    /// Value is a secret and must not be displayed or logged.
    pub encrypted: bool,
    pub visible: bool,
    pub value: Option<String>,
}

impl ProviderProperty {
    pub fn new(
        name: impl Into<String>,
        property_type: PropertyType,
        required: bool,
        default_value: impl Into<String>,
        sequence: u32,
    ) -> Self {
        Self {
            name: name.into(),
            property_type,
            required,
            default_value: default_value.into(),
            sequence,
            validation_context: String::new(),
            encrypted: false,
            visible: true,
            value: None,
        }
    }

    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// The bound value, falling back to the default when unbound.
    pub fn effective_value(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.default_value)
    }

    /// Whether a usable value is present (bound or defaulted, non-empty).
    pub fn has_value(&self) -> bool {
        !self.effective_value().trim().is_empty()
    }
}

/// Ordered set of provider properties.
///
/// Duplicate names are accepted; lookups return the first match in
/// sequence order.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    properties: Vec<ProviderProperty>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, property: ProviderProperty) {
        self.properties.push(property);
    }

    /// Stable ascending sort over `sequence`.
    pub fn sort_by_sequence(&mut self) {
        self.properties.sort_by_key(|p| p.sequence);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderProperty> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ProviderProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Bind current values from `source` by property name.
    ///
    /// Source entries with no matching property are ignored; properties the
    /// source does not mention keep their previous value.
    pub fn bind(&mut self, source: &ContentSource) {
        for property in &mut self.properties {
            if let Some(value) = source.get(&property.name) {
                property.value = Some(value.to_string());
            }
        }
    }

    /// Names of required properties lacking a usable value, in sequence order.
    pub fn missing_required(&self) -> Vec<String> {
        self.properties
            .iter()
            .filter(|p| p.required && !p.has_value())
            .map(|p| p.name.clone())
            .collect()
    }
}
