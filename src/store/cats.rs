//! Spy cat rows

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{NewSpyCat, Page, SpyCat};

const COLUMNS: &str = "id, name, years_of_experience, breed, salary";

fn from_row(row: &Row) -> rusqlite::Result<SpyCat> {
    Ok(SpyCat {
        id: row.get(0)?,
        name: row.get(1)?,
        years_of_experience: row.get(2)?,
        breed: row.get(3)?,
        salary: row.get(4)?,
    })
}

pub fn insert(conn: &Connection, cat: &NewSpyCat) -> Result<SpyCat> {
    conn.execute(
        "INSERT INTO spy_cats (name, years_of_experience, breed, salary) VALUES (?1, ?2, ?3, ?4)",
        params![cat.name, cat.years_of_experience, cat.breed, cat.salary],
    )?;

    Ok(SpyCat {
        id: conn.last_insert_rowid(),
        name: cat.name.clone(),
        years_of_experience: cat.years_of_experience,
        breed: cat.breed.clone(),
        salary: cat.salary,
    })
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<SpyCat>> {
    let sql = format!("SELECT {} FROM spy_cats WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, [id], from_row).optional()?)
}

pub fn list(conn: &Connection, page: Page) -> Result<Vec<SpyCat>> {
    let sql = format!(
        "SELECT {} FROM spy_cats ORDER BY id LIMIT ?1 OFFSET ?2",
        COLUMNS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let cats = stmt
        .query_map(params![page.limit, page.skip], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(cats)
}

/// Returns the updated cat, or `None` when no row has this id
pub fn update_salary(conn: &Connection, id: i64, salary: i64) -> Result<Option<SpyCat>> {
    let changed = conn.execute(
        "UPDATE spy_cats SET salary = ?2 WHERE id = ?1",
        params![id, salary],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get(conn, id)
}

/// Returns whether a row was deleted
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM spy_cats WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn new_cat(name: &str) -> NewSpyCat {
        NewSpyCat {
            name: name.into(),
            years_of_experience: 3,
            breed: "Bengal".into(),
            salary: 1000,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.connection();
        let cat = insert(conn, &new_cat("Tom")).unwrap();

        assert_eq!(get(conn, cat.id).unwrap(), Some(cat));
        assert_eq!(get(conn, 999).unwrap(), None);
    }

    #[test]
    fn test_list_respects_page() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.connection();
        for name in ["A", "B", "C", "D"] {
            insert(conn, &new_cat(name)).unwrap();
        }

        let names: Vec<String> = list(conn, Page::new(1, 2))
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["B", "C"]);
        assert!(list(conn, Page::new(10, 5)).unwrap().is_empty());
    }

    #[test]
    fn test_update_salary_and_delete() {
        let store = Store::open_in_memory().unwrap();
        let conn = store.connection();
        let cat = insert(conn, &new_cat("Tom")).unwrap();

        let updated = update_salary(conn, cat.id, 2500).unwrap().unwrap();
        assert_eq!(updated.salary, 2500);
        assert_eq!(updated.name, "Tom");
        assert_eq!(update_salary(conn, 999, 1).unwrap(), None);

        assert!(delete(conn, cat.id).unwrap());
        assert!(!delete(conn, cat.id).unwrap());
    }
}
