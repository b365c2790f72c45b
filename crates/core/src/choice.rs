//! "Choose from the catalog or type your own" field values.
//!
//! Several profile fields let a member either pick a catalog value (a role
//! type, a mentor, a school) or type free text when the catalog does not
//! cover them. Modelling this as two nullable sibling columns allows the
//! illegal "both set" state; the tagged union below makes that state
//! unrepresentable. Selecting one branch structurally erases the other.

use serde::{Deserialize, Serialize};

/// A catalog-or-custom field value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Choice {
    /// Nothing selected yet.
    #[default]
    None,
    /// A value picked from the catalog, with an optional display label
    /// captured at selection time.
    Existing {
        id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },
    /// Free text typed by the member.
    Custom { text: String },
}

impl Choice {
    /// Select a catalog value, clearing any custom text.
    pub fn choose_existing(id: impl Into<String>, label: Option<String>) -> Self {
        Self::Existing {
            id: id.into(),
            label,
        }
    }

    /// Enter free text, clearing any catalog selection. Blank or
    /// whitespace-only text normalizes to `None`.
    pub fn choose_custom(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::None
        } else {
            Self::Custom { text }
        }
    }

    /// Whether either branch is selected.
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// The catalog id, if the catalog branch is selected.
    pub fn existing_id(&self) -> Option<&str> {
        match self {
            Self::Existing { id, .. } => Some(id),
            _ => None,
        }
    }

    /// The free text, if the custom branch is selected.
    pub fn custom_text(&self) -> Option<&str> {
        match self {
            Self::Custom { text } => Some(text),
            _ => None,
        }
    }

    /// Rebuild a `Choice` from the two nullable columns used at the
    /// storage layer. A row that somehow carries both favors the catalog
    /// reference, matching how the columns are written (one side is always
    /// nulled on save).
    pub fn from_columns(existing: Option<String>, custom: Option<String>) -> Self {
        match (existing, custom) {
            (Some(id), _) => Self::Existing { id, label: None },
            (None, Some(text)) => Self::choose_custom(text),
            (None, None) => Self::None,
        }
    }

    /// Flatten into the `(existing, custom)` column pair for storage.
    pub fn into_columns(self) -> (Option<String>, Option<String>) {
        match self {
            Self::None => (None, None),
            Self::Existing { id, .. } => (Some(id), None),
            Self::Custom { text } => (None, Some(text)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choosing_existing_clears_custom() {
        let c = Choice::choose_custom("Ad-hoc coordinator");
        assert!(c.custom_text().is_some());

        let c = Choice::choose_existing("rc", Some("Regional Coordinator".into()));
        assert_eq!(c.existing_id(), Some("rc"));
        assert_eq!(c.custom_text(), None);
    }

    #[test]
    fn choosing_custom_clears_existing() {
        let c = Choice::choose_existing("rc", None);
        assert!(c.existing_id().is_some());

        let c = Choice::choose_custom("Something else");
        assert_eq!(c.existing_id(), None);
        assert_eq!(c.custom_text(), Some("Something else"));
    }

    #[test]
    fn blank_custom_text_is_none() {
        assert_eq!(Choice::choose_custom(""), Choice::None);
        assert_eq!(Choice::choose_custom("   "), Choice::None);
        assert!(!Choice::choose_custom("  ").is_set());
    }

    #[test]
    fn column_roundtrip() {
        let c = Choice::choose_existing("nnc", None);
        let (existing, custom) = c.clone().into_columns();
        assert_eq!(Choice::from_columns(existing, custom), c);

        let c = Choice::choose_custom("My local study circle");
        let (existing, custom) = c.clone().into_columns();
        assert_eq!(Choice::from_columns(existing, custom), c);

        assert_eq!(Choice::from_columns(None, None), Choice::None);
    }

    #[test]
    fn serde_shape_is_tagged() {
        let json = serde_json::to_value(Choice::choose_custom("x")).unwrap();
        assert_eq!(json["kind"], "custom");
        assert_eq!(json["text"], "x");

        let json = serde_json::to_value(Choice::None).unwrap();
        assert_eq!(json["kind"], "none");
    }
}
