//! Admin table storage.

use dayframe_types::Admin;
use rusqlite::{params, Row};

use crate::db::{is_unique_violation, SqliteCatalog};
use crate::error::{CatalogError, CatalogResult};

/// Storage boundary for admin accounts.
///
/// Email uniqueness is enforced atomically at insert time by the engine's
/// UNIQUE constraint on `admin.email`.
pub trait AdminStore: Send + Sync {
    /// Insert an admin. `hashed_password` must already be a one-way hash;
    /// the store never sees plaintext.
    fn insert_admin(&self, email: &str, hashed_password: &str) -> CatalogResult<Admin>;

    /// Look up an admin by email.
    fn find_by_email(&self, email: &str) -> CatalogResult<Option<Admin>>;

    /// List admins in insertion order, paginated.
    fn list_admins(&self, offset: u32, limit: u32) -> CatalogResult<Vec<Admin>>;

    /// Remove an admin by email. Returns `true` if a row was removed.
    ///
    /// Maintenance operation only — nothing in the request surface
    /// deletes admins. Outstanding tokens for a removed admin fail
    /// subject resolution on their next use.
    fn remove_by_email(&self, email: &str) -> CatalogResult<bool>;
}

fn row_to_admin(row: &Row<'_>) -> rusqlite::Result<Admin> {
    Ok(Admin {
        id: row.get(0)?,
        email: row.get(1)?,
        hashed_password: row.get(2)?,
    })
}

impl AdminStore for SqliteCatalog {
    fn insert_admin(&self, email: &str, hashed_password: &str) -> CatalogResult<Admin> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO admin (email, hashed_password) VALUES (?1, ?2);",
            params![email, hashed_password],
        )
        .map_err(|err| {
            if is_unique_violation(&err, "admin.email") {
                CatalogError::DuplicateEmail(email.to_string())
            } else {
                CatalogError::Sqlite(err)
            }
        })?;
        Ok(Admin {
            id: conn.last_insert_rowid(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        })
    }

    fn find_by_email(&self, email: &str) -> CatalogResult<Option<Admin>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, email, hashed_password FROM admin WHERE email = ?1;")?;
        let mut rows = stmt.query_map(params![email], row_to_admin)?;
        rows.next().transpose().map_err(CatalogError::from)
    }

    fn list_admins(&self, offset: u32, limit: u32) -> CatalogResult<Vec<Admin>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, email, hashed_password FROM admin ORDER BY id LIMIT ?1 OFFSET ?2;",
        )?;
        let rows = stmt.query_map(params![limit, offset], row_to_admin)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(CatalogError::from)
    }

    fn remove_by_email(&self, email: &str) -> CatalogResult<bool> {
        let removed = self
            .conn()
            .execute("DELETE FROM admin WHERE email = ?1;", params![email])?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SqliteCatalog {
        SqliteCatalog::in_memory().unwrap()
    }

    #[test]
    fn insert_then_find() {
        let catalog = catalog();
        let admin = catalog.insert_admin("a@x.com", "$hash").unwrap();
        assert_eq!(admin.id, 1);
        let found = catalog.find_by_email("a@x.com").unwrap().unwrap();
        assert_eq!(found, admin);
    }

    #[test]
    fn find_missing_is_none() {
        assert!(catalog().find_by_email("nobody@x.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_rejected() {
        let catalog = catalog();
        catalog.insert_admin("a@x.com", "$h1").unwrap();
        let err = catalog.insert_admin("a@x.com", "$h2").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateEmail(e) if e == "a@x.com"));
    }

    #[test]
    fn remove_by_email_reports_presence() {
        let catalog = catalog();
        catalog.insert_admin("a@x.com", "$h").unwrap();
        assert!(catalog.remove_by_email("a@x.com").unwrap());
        assert!(!catalog.remove_by_email("a@x.com").unwrap());
        assert!(catalog.find_by_email("a@x.com").unwrap().is_none());
    }

    #[test]
    fn list_admins_paginates() {
        let catalog = catalog();
        catalog.insert_admin("a@x.com", "$h").unwrap();
        catalog.insert_admin("b@x.com", "$h").unwrap();
        catalog.insert_admin("c@x.com", "$h").unwrap();
        let page = catalog.list_admins(1, 1).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].email, "b@x.com");
    }
}
