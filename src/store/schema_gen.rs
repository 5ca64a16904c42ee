use crate::schema::{OnDelete, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        // INTEGER PRIMARY KEY aliases the rowid, which SQLite assigns on insert
        let pk = if col.name == "id" { " PRIMARY KEY" } else { "" };
        let null_constraint = if !col.nullable && pk.is_empty() {
            " NOT NULL"
        } else {
            ""
        };
        let default = col
            .default
            .map(|value| format!(" DEFAULT {}", value))
            .unwrap_or_default();

        columns.push(format!(
            "    {} {}{}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint,
            default
        ));
    }

    for fk in schema.foreign_keys {
        let action = match fk.on_delete {
            OnDelete::Restrict => "",
            OnDelete::SetNull => " ON DELETE SET NULL",
        };
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({}){}",
            fk.column, fk.references_table, fk.references_column, action
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns and explicit indexes
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    let fk_indexes = schema.foreign_keys.iter().map(|fk| {
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
            schema.name, fk.column, schema.name, fk.column
        )
    });

    let explicit = schema.indexes.iter().map(|idx| {
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
            schema.name,
            idx.columns.join("_"),
            schema.name,
            idx.columns.join(", ")
        )
    });

    fk_indexes.chain(explicit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{MISSIONS, TARGETS};

    #[test]
    fn test_generate_create_table() {
        let sql = generate_create_table(&TARGETS);
        assert!(sql.contains("CREATE TABLE IF NOT EXISTS targets"));
        assert!(sql.contains("id INTEGER PRIMARY KEY,"));
        assert!(sql.contains("notes TEXT DEFAULT ''"));
        assert!(sql.contains("complete INTEGER NOT NULL DEFAULT 0"));
        assert!(sql.contains("FOREIGN KEY (mission_id) REFERENCES missions(id)\n"));
    }

    #[test]
    fn test_cat_reference_released_on_delete() {
        let sql = generate_create_table(&MISSIONS);
        assert!(sql.contains("cat_id INTEGER,"));
        assert!(sql.contains("assigned INTEGER NOT NULL DEFAULT 0"));
        assert!(sql.contains("REFERENCES spy_cats(id) ON DELETE SET NULL"));
    }

    #[test]
    fn test_generate_indexes() {
        let indexes = generate_indexes(&TARGETS);
        assert!(indexes.iter().any(|i| i.contains("idx_targets_mission_id")));
        assert!(indexes.iter().any(|i| i.contains("idx_targets_name ON targets(name)")));
    }
}
