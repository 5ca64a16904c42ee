//! Mission rows. Targets are attached by id lookup on read.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::targets;
use crate::error::Result;
use crate::models::{Mission, Page};

/// Mission columns without its targets
struct MissionRow {
    id: i64,
    cat_id: Option<i64>,
    complete: bool,
    /// Set by the first assignment and never cleared, even when the cat is deleted
    assigned: bool,
}

fn from_row(row: &Row) -> rusqlite::Result<MissionRow> {
    Ok(MissionRow {
        id: row.get(0)?,
        cat_id: row.get(1)?,
        complete: row.get(2)?,
        assigned: row.get(3)?,
    })
}

fn attach_targets(conn: &Connection, row: MissionRow) -> Result<Mission> {
    Ok(Mission {
        id: row.id,
        cat_id: row.cat_id,
        complete: row.complete,
        targets: targets::for_mission(conn, row.id)?,
    })
}

/// Outcome of a conditional cat assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    Assigned,
    MissionNotFound,
    /// `cat_id` is `None` once the assigned cat has been deleted
    AlreadyAssigned { cat_id: Option<i64> },
    MissionComplete,
    /// The cat already holds another incomplete mission
    CatBusy { mission_id: i64 },
}

/// Insert an incomplete, unassigned mission and return its id
pub fn insert(conn: &Connection) -> Result<i64> {
    conn.execute("INSERT INTO missions (complete) VALUES (0)", [])?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Mission>> {
    let row = conn
        .query_row(
            "SELECT id, cat_id, complete, assigned FROM missions WHERE id = ?1",
            [id],
            from_row,
        )
        .optional()?;

    row.map(|row| attach_targets(conn, row)).transpose()
}

pub fn list(conn: &Connection, page: Page) -> Result<Vec<Mission>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, cat_id, complete, assigned FROM missions ORDER BY id LIMIT ?1 OFFSET ?2",
    )?;
    let rows = stmt
        .query_map(params![page.limit, page.skip], from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|row| attach_targets(conn, row))
        .collect()
}

/// The most recent mission referencing `cat_id`, incomplete ones first
pub fn for_cat(conn: &Connection, cat_id: i64) -> Result<Option<Mission>> {
    let row = conn
        .query_row(
            "SELECT id, cat_id, complete, assigned FROM missions WHERE cat_id = ?1
             ORDER BY complete ASC, id DESC LIMIT 1",
            [cat_id],
            from_row,
        )
        .optional()?;

    row.map(|row| attach_targets(conn, row)).transpose()
}

/// Set `cat_id` in one conditional statement: only when the mission was never
/// assigned, is incomplete and the cat holds no other incomplete mission.
/// When nothing changed, the blocking condition is reported.
pub fn assign_cat(conn: &Connection, mission_id: i64, cat_id: i64) -> Result<Assignment> {
    let changed = conn.execute(
        "UPDATE missions SET cat_id = ?2, assigned = 1
         WHERE id = ?1
           AND assigned = 0
           AND complete = 0
           AND NOT EXISTS (
               SELECT 1 FROM missions WHERE cat_id = ?2 AND complete = 0
           )",
        params![mission_id, cat_id],
    )?;
    if changed > 0 {
        return Ok(Assignment::Assigned);
    }

    let current = conn
        .query_row(
            "SELECT id, cat_id, complete, assigned FROM missions WHERE id = ?1",
            [mission_id],
            from_row,
        )
        .optional()?;

    match current {
        None => Ok(Assignment::MissionNotFound),
        Some(MissionRow {
            assigned: true,
            cat_id,
            ..
        }) => Ok(Assignment::AlreadyAssigned { cat_id }),
        Some(MissionRow { complete: true, .. }) => Ok(Assignment::MissionComplete),
        Some(_) => {
            let busy: i64 = conn.query_row(
                "SELECT id FROM missions WHERE cat_id = ?1 AND complete = 0 LIMIT 1",
                [cat_id],
                |row| row.get(0),
            )?;
            Ok(Assignment::CatBusy { mission_id: busy })
        }
    }
}

pub fn mark_complete(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("UPDATE missions SET complete = 1 WHERE id = ?1", [id])?;
    Ok(())
}

/// Returns whether a row was deleted
pub fn delete(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM missions WHERE id = ?1", [id])?;
    Ok(changed > 0)
}
