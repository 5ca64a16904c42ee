//! Table definitions for the agency database

use super::types::*;

pub static SPY_CATS: TableSchema = TableSchema {
    name: "spy_cats",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("years_of_experience", ColumnType::Integer),
        Column::required("breed", ColumnType::Text),
        Column::required("salary", ColumnType::Integer),
    ],
    foreign_keys: &[],
    indexes: &[Index::on(&["name"])],
};

pub static MISSIONS: TableSchema = TableSchema {
    name: "missions",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::new("cat_id", ColumnType::Integer),
        Column::required("complete", ColumnType::Boolean).default_to("0"),
        Column::required("assigned", ColumnType::Boolean).default_to("0"),
    ],
    // Deleting a cat releases its missions instead of orphaning or removing them
    foreign_keys: &[ForeignKey::new("cat_id", "spy_cats").set_null()],
    indexes: &[],
};

pub static TARGETS: TableSchema = TableSchema {
    name: "targets",
    columns: &[
        Column::required("id", ColumnType::Integer),
        Column::required("name", ColumnType::Text),
        Column::required("country", ColumnType::Text),
        Column::new("notes", ColumnType::Text).default_to("''"),
        Column::required("complete", ColumnType::Boolean).default_to("0"),
        Column::required("mission_id", ColumnType::Integer),
    ],
    foreign_keys: &[ForeignKey::new("mission_id", "missions")],
    indexes: &[Index::on(&["name"])],
};

/// All tables, parents before children
pub static ALL_TABLES: &[&TableSchema] = &[&SPY_CATS, &MISSIONS, &TARGETS];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_listed_before_children() {
        for (pos, table) in ALL_TABLES.iter().enumerate() {
            for dep in table.dependencies() {
                let dep_pos = ALL_TABLES
                    .iter()
                    .position(|t| t.name == dep)
                    .expect("dependency must be a known table");
                assert!(dep_pos < pos, "{} must come before {}", dep, table.name);
            }
        }
    }
}
