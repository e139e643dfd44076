//! Schema fixture for the aggregate tables the catalog reads.
//!
//! Identifiers are matched case-insensitively, as MySQL does for column
//! names and SQLite does for all identifiers.

/// A column of a known table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: &'static str,
    /// Type used when creating fixture tables.
    pub sql_type: &'static str,
}

/// A known aggregate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [ColumnSchema],
}

impl TableSchema {
    /// Returns true if the table has a column with this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Renders a `CREATE TABLE` statement for fixture databases.
    pub fn create_statement(&self) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("    {} {}", c.name, c.sql_type))
            .collect();
        format!("CREATE TABLE {} (\n{}\n);", self.name, columns.join(",\n"))
    }
}

const fn col(name: &'static str, sql_type: &'static str) -> ColumnSchema {
    ColumnSchema { name, sql_type }
}

pub static KNOWN_TABLES: &[TableSchema] = &[
    TableSchema {
        name: "aggregated_transaction",
        columns: &[
            col("year", "INTEGER"),
            col("quarter", "INTEGER"),
            col("state", "TEXT"),
            col("transaction_type", "TEXT"),
            col("transaction_amount", "REAL"),
            col("transaction_count", "INTEGER"),
        ],
    },
    TableSchema {
        name: "aggregated_user",
        columns: &[
            col("User_Brand", "TEXT"),
            col("State", "TEXT"),
            col("User_Count", "INTEGER"),
            col("User_percentage", "REAL"),
        ],
    },
    TableSchema {
        name: "aggregated_insurance",
        columns: &[
            col("State", "TEXT"),
            col("Year", "INTEGER"),
            col("Insurance_Count", "INTEGER"),
            col("Insurance_Amount", "REAL"),
        ],
    },
    TableSchema {
        name: "map_transaction",
        columns: &[
            col("State", "TEXT"),
            col("Year", "INTEGER"),
            col("Quarter", "INTEGER"),
            col("Transaction_amount", "REAL"),
            col("Transaction_count", "INTEGER"),
        ],
    },
    TableSchema {
        name: "map_user",
        columns: &[
            col("State", "TEXT"),
            col("Users_registeredUsers", "INTEGER"),
            col("Users_appOpens", "INTEGER"),
        ],
    },
];

/// Looks up a known table by name.
pub fn find_table(name: &str) -> Option<&'static TableSchema> {
    KNOWN_TABLES
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
}

/// DDL creating every known table, for seeding fixture databases.
pub fn fixture_ddl() -> String {
    KNOWN_TABLES
        .iter()
        .map(TableSchema::create_statement)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_table_is_case_insensitive() {
        assert!(find_table("AGGREGATED_USER").is_some());
        assert!(find_table("aggregated_users").is_none());
    }

    #[test]
    fn test_has_column_is_case_insensitive() {
        let table = find_table("aggregated_transaction").unwrap();
        assert!(table.has_column("Transaction_amount"));
        assert!(table.has_column("STATE"));
        assert!(!table.has_column("User_Brand"));
    }

    #[test]
    fn test_create_statement() {
        let table = find_table("map_user").unwrap();
        assert_eq!(
            table.create_statement(),
            "CREATE TABLE map_user (\n    State TEXT,\n    Users_registeredUsers INTEGER,\n    Users_appOpens INTEGER\n);"
        );
    }

    #[test]
    fn test_fixture_ddl_covers_all_tables() {
        let ddl = fixture_ddl();
        for table in KNOWN_TABLES {
            assert!(ddl.contains(&format!("CREATE TABLE {} (", table.name)));
        }
    }
}
