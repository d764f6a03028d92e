use std::fmt;

/// Name of a growth reference population.
///
/// The set is open: a dataset exists as soon as the store holds a table for it.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct DatasetName(String);

impl DatasetName {
    pub const BRITISH_1990: &'static str = "british_1990";
    pub const UK_WHO_PRETERM: &'static str = "UK_WHO_preterm";

    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self(value.trim().to_string())
    }

    pub fn british_1990() -> Self {
        Self::new(Self::BRITISH_1990)
    }

    pub fn uk_who_preterm() -> Self {
        Self::new(Self::UK_WHO_PRETERM)
    }

    /// Datasets shipped with the reference data directory.
    pub fn builtin() -> [DatasetName; 2] {
        [Self::british_1990(), Self::uk_who_preterm()]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for DatasetName {
    fn default() -> Self {
        Self::british_1990()
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatasetName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DatasetName {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
