//! Item table storage.

use dayframe_types::{ArtDate, Item, NewItem};
use rusqlite::{params, Row};

use crate::db::{is_unique_violation, SqliteCatalog};
use crate::error::{CatalogError, CatalogResult};

/// Storage boundary for item rows.
///
/// Implementations must guarantee:
/// - At most one row per `created` date, enforced atomically at insert
///   time by the engine — never by a separate read-then-write.
/// - `list` returns stable insertion order.
/// - `delete_by_date` does not consult the `original` flag; protection is
///   the orchestrator's decision.
pub trait ItemStore: Send + Sync {
    /// Look up the item occupying a date, if any.
    fn lookup_by_date(&self, date: ArtDate) -> CatalogResult<Option<Item>>;

    /// List items in insertion order, paginated.
    fn list(&self, offset: u32, limit: u32) -> CatalogResult<Vec<Item>>;

    /// Insert an item row. A single atomic operation: fails
    /// [`CatalogError::DateAlreadyExists`] if a row for the date exists at
    /// commit time, regardless of what an earlier lookup returned.
    fn create(&self, new: &NewItem) -> CatalogResult<Item>;

    /// Delete the item row for a date. Fails
    /// [`CatalogError::ItemNotFound`] if absent.
    fn delete_by_date(&self, date: ArtDate) -> CatalogResult<()>;
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let created: String = row.get(3)?;
    let created = ArtDate::parse(&created).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        created,
        is_private: row.get(4)?,
        original: row.get(5)?,
    })
}

const ITEM_COLUMNS: &str = "id, title, description, created, is_private, original";

impl ItemStore for SqliteCatalog {
    fn lookup_by_date(&self, date: ArtDate) -> CatalogResult<Option<Item>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM item WHERE created = ?1;"
        ))?;
        let mut rows = stmt.query_map(params![date.to_string()], row_to_item)?;
        rows.next().transpose().map_err(CatalogError::from)
    }

    fn list(&self, offset: u32, limit: u32) -> CatalogResult<Vec<Item>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM item ORDER BY id LIMIT ?1 OFFSET ?2;"
        ))?;
        let rows = stmt.query_map(params![limit, offset], row_to_item)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(CatalogError::from)
    }

    fn create(&self, new: &NewItem) -> CatalogResult<Item> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO item (title, description, created, is_private, original)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                new.title,
                new.description,
                new.created.to_string(),
                new.is_private,
                new.original,
            ],
        )
        .map_err(|err| {
            if is_unique_violation(&err, "item.created") {
                CatalogError::DateAlreadyExists(new.created)
            } else {
                CatalogError::Sqlite(err)
            }
        })?;
        Ok(Item {
            id: conn.last_insert_rowid(),
            title: new.title.clone(),
            description: new.description.clone(),
            created: new.created,
            is_private: new.is_private,
            original: new.original,
        })
    }

    fn delete_by_date(&self, date: ArtDate) -> CatalogResult<()> {
        let deleted = self.conn().execute(
            "DELETE FROM item WHERE created = ?1;",
            params![date.to_string()],
        )?;
        if deleted == 0 {
            return Err(CatalogError::ItemNotFound(date));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SqliteCatalog {
        SqliteCatalog::in_memory().unwrap()
    }

    fn date(day: u32) -> ArtDate {
        ArtDate::from_ymd(2024, 5, day).unwrap()
    }

    #[test]
    fn create_then_lookup() {
        let catalog = catalog();
        let created = catalog
            .create(&NewItem::user(date(1), Some("T".into()), Some("D".into()), false))
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.created, date(1));
        assert!(!created.original);

        let found = catalog.lookup_by_date(date(1)).unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn lookup_missing_is_none() {
        assert!(catalog().lookup_by_date(date(1)).unwrap().is_none());
    }

    #[test]
    fn duplicate_date_fails_atomically() {
        let catalog = catalog();
        catalog.create(&NewItem::user(date(1), None, None, false)).unwrap();
        let err = catalog
            .create(&NewItem::user(date(1), Some("other".into()), None, true))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DateAlreadyExists(d) if d == date(1)));
        // First row is untouched.
        let kept = catalog.lookup_by_date(date(1)).unwrap().unwrap();
        assert!(kept.title.is_none());
    }

    #[test]
    fn list_is_insertion_ordered_and_paginated() {
        let catalog = catalog();
        for day in 1..=5 {
            catalog.create(&NewItem::user(date(day), None, None, false)).unwrap();
        }
        let all = catalog.list(0, 100).unwrap();
        assert_eq!(all.len(), 5);
        let ids: Vec<i64> = all.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        let page = catalog.list(2, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].created, date(3));
        assert_eq!(page[1].created, date(4));
    }

    #[test]
    fn delete_frees_the_date() {
        let catalog = catalog();
        catalog.create(&NewItem::user(date(1), None, None, false)).unwrap();
        catalog.delete_by_date(date(1)).unwrap();
        assert!(catalog.lookup_by_date(date(1)).unwrap().is_none());
        // Date can be reused; a new id is assigned.
        let recreated = catalog.create(&NewItem::user(date(1), None, None, false)).unwrap();
        assert_eq!(recreated.id, 2);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let err = catalog().delete_by_date(date(1)).unwrap_err();
        assert!(matches!(err, CatalogError::ItemNotFound(_)));
    }

    #[test]
    fn original_flag_roundtrips() {
        let catalog = catalog();
        let seed = catalog.create(&NewItem::original(date(1))).unwrap();
        assert!(seed.original);
        assert!(seed.title.is_none());
        let found = catalog.lookup_by_date(date(1)).unwrap().unwrap();
        assert!(found.original);
    }

    #[test]
    fn concurrent_creates_one_winner() {
        use std::sync::Arc;

        let catalog = Arc::new(catalog());
        let mut handles = Vec::new();
        for _ in 0..2 {
            let catalog = Arc::clone(&catalog);
            handles.push(std::thread::spawn(move || {
                catalog.create(&NewItem::user(date(1), None, None, false))
            }));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(CatalogError::DateAlreadyExists(_)))));
    }
}
