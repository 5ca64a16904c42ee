//! Target rows

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::Result;
use crate::models::{NewTarget, Target};

const COLUMNS: &str = "id, name, country, notes, complete, mission_id";

fn from_row(row: &Row) -> rusqlite::Result<Target> {
    Ok(Target {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        notes: row.get(3)?,
        complete: row.get(4)?,
        mission_id: row.get(5)?,
    })
}

pub fn insert(conn: &Connection, mission_id: i64, target: &NewTarget) -> Result<Target> {
    let notes = target.notes.clone().unwrap_or_default();
    conn.execute(
        "INSERT INTO targets (name, country, notes, complete, mission_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![target.name, target.country, notes, target.complete, mission_id],
    )?;

    Ok(Target {
        id: conn.last_insert_rowid(),
        name: target.name.clone(),
        country: target.country.clone(),
        notes: Some(notes),
        complete: target.complete,
        mission_id,
    })
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Target>> {
    let sql = format!("SELECT {} FROM targets WHERE id = ?1", COLUMNS);
    Ok(conn.query_row(&sql, [id], from_row).optional()?)
}

/// Targets of a mission in creation order
pub fn for_mission(conn: &Connection, mission_id: i64) -> Result<Vec<Target>> {
    let sql = format!(
        "SELECT {} FROM targets WHERE mission_id = ?1 ORDER BY id",
        COLUMNS
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let targets = stmt
        .query_map([mission_id], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(targets)
}

/// Write every mutable field of `target` back to its row
pub fn save(conn: &Connection, target: &Target) -> Result<()> {
    conn.execute(
        "UPDATE targets SET name = ?2, country = ?3, notes = ?4, complete = ?5 WHERE id = ?1",
        params![
            target.id,
            target.name,
            target.country,
            target.notes,
            target.complete
        ],
    )?;
    Ok(())
}

pub fn count_incomplete(conn: &Connection, mission_id: i64) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM targets WHERE mission_id = ?1 AND complete = 0",
        [mission_id],
        |row| row.get(0),
    )?)
}

/// Returns the number of rows removed
pub fn delete_for_mission(conn: &Connection, mission_id: i64) -> Result<usize> {
    Ok(conn.execute("DELETE FROM targets WHERE mission_id = ?1", [mission_id])?)
}
