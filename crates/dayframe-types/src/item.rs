use serde::{Deserialize, Serialize};

use crate::date::ArtDate;

/// A cataloged artwork record.
///
/// Every `Item` is paired 1:1 with an image stored at its date's canonical
/// path; the two form a single logical entity split across two stores. The
/// catalog row is the source of truth for existence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Row id, assigned by the catalog on insert.
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Calendar date this item occupies. Unique across the catalog.
    pub created: ArtDate,
    pub is_private: bool,
    /// Seed/historical data marker. Original items are immutable and
    /// undeletable through the mutation path.
    pub original: bool,
}

/// Insert payload for a catalog row. The id is assigned by the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewItem {
    pub created: ArtDate,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_private: bool,
    pub original: bool,
}

impl NewItem {
    /// A user-created item (the ordinary create path).
    pub fn user(
        created: ArtDate,
        title: Option<String>,
        description: Option<String>,
        is_private: bool,
    ) -> Self {
        Self {
            created,
            title,
            description,
            is_private,
            original: false,
        }
    }

    /// A seed item produced by the reconciliation scan: no title or
    /// description, protected from edit/delete.
    pub fn original(created: ArtDate) -> Self {
        Self {
            created,
            title: None,
            description: None,
            is_private: false,
            original: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> ArtDate {
        ArtDate::from_ymd(2024, 5, 1).unwrap()
    }

    #[test]
    fn user_item_is_not_original() {
        let new = NewItem::user(date(), Some("T".into()), None, false);
        assert!(!new.original);
        assert_eq!(new.title.as_deref(), Some("T"));
    }

    #[test]
    fn original_item_has_no_fields() {
        let new = NewItem::original(date());
        assert!(new.original);
        assert!(new.title.is_none());
        assert!(new.description.is_none());
        assert!(!new.is_private);
    }

    #[test]
    fn item_serde_roundtrip() {
        let item = Item {
            id: 1,
            title: Some("T".into()),
            description: None,
            created: date(),
            is_private: false,
            original: false,
        };
        let json = serde_json::to_string(&item).unwrap();
        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
