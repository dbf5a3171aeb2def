#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ModelError::InvalidId {
                        kind: $kind,
                        value,
                    });
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().simple().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier of a marking or label form.
    FormId,
    "form"
);

string_id!(
    /// Stable identifier of a free-text "other" label item.
    OtherItemId,
    "label item"
);

string_id!(
    /// Identifier of a saved specification document.
    DocumentId,
    "document"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_and_rejects_blank() {
        assert_eq!(FormId::new("  abc ").unwrap().as_str(), "abc");
        assert!(matches!(
            FormId::new("   "),
            Err(ModelError::InvalidId { kind: "form", .. })
        ));
    }

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(OtherItemId::generate(), OtherItemId::generate());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = DocumentId::new("doc-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-1\"");
    }
}
