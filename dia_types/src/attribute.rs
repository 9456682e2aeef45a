use std::fmt;

/// A key, with an optional value, annotating any [`crate::DiaValue`].
#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Attribute {
    pub key: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new<K: Into<String>>(key: K) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn with_value<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            None => write!(f, "@{}", self.key),
            Some(value) => write!(f, "@{}({})", self.key, value),
        }
    }
}
