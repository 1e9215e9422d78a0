//! SQL dialects and the semantic-type to column-type mapping.

use crate::database::ColumnType;
use crate::export::ExportError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Target SQL flavor of generated statements.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Mysql,
    #[serde(alias = "postgres", alias = "pg")]
    Postgresql,
    #[serde(alias = "sqlite3")]
    Sqlite,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Mysql, Dialect::Postgresql, Dialect::Sqlite];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Dialect::Mysql => "mysql",
            Dialect::Postgresql => "postgresql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Column type keyword for a semantic type in this dialect.
    pub const fn sql_type(&self, kind: ColumnType) -> &'static str {
        map_type(kind, *self)
    }
}

/// Maps a semantic column type to the column type keyword of `dialect`.
///
/// | type      | mysql        | postgresql       | sqlite   |
/// |-----------|--------------|------------------|----------|
/// | integer   | INT          | INTEGER          | INT      |
/// | float     | DOUBLE       | DOUBLE PRECISION | REAL     |
/// | boolean   | BOOLEAN      | BOOLEAN          | BOOLEAN  |
/// | timestamp | DATETIME     | TIMESTAMP        | DATETIME |
/// | text      | VARCHAR(255) | TEXT             | TEXT     |
pub const fn map_type(kind: ColumnType, dialect: Dialect) -> &'static str {
    match (kind, dialect) {
        (ColumnType::Integer, Dialect::Postgresql) => "INTEGER",
        (ColumnType::Integer, _) => "INT",
        (ColumnType::Float, Dialect::Mysql) => "DOUBLE",
        (ColumnType::Float, Dialect::Postgresql) => "DOUBLE PRECISION",
        (ColumnType::Float, Dialect::Sqlite) => "REAL",
        (ColumnType::Boolean, _) => "BOOLEAN",
        (ColumnType::Timestamp, Dialect::Postgresql) => "TIMESTAMP",
        (ColumnType::Timestamp, _) => "DATETIME",
        (ColumnType::Text, Dialect::Mysql) => "VARCHAR(255)",
        (ColumnType::Text, _) => "TEXT",
    }
}

impl FromStr for Dialect {
    type Err = ExportError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::Mysql),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgresql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(ExportError::UnknownDialect(name.to_owned())),
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_table() {
        use ColumnType::*;
        let expected = [
            (Integer, ["INT", "INTEGER", "INT"]),
            (Float, ["DOUBLE", "DOUBLE PRECISION", "REAL"]),
            (Boolean, ["BOOLEAN", "BOOLEAN", "BOOLEAN"]),
            (Timestamp, ["DATETIME", "TIMESTAMP", "DATETIME"]),
            (Text, ["VARCHAR(255)", "TEXT", "TEXT"]),
        ];
        for (kind, keywords) in expected {
            for (dialect, keyword) in Dialect::ALL.into_iter().zip(keywords) {
                assert_eq!(map_type(kind, dialect), keyword, "{kind:?} in {dialect}");
                assert_eq!(dialect.sql_type(kind), keyword);
            }
        }
    }

    #[test]
    fn parse_dialects() {
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::Mysql);
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::Postgresql);
        assert_eq!("pg".parse::<Dialect>().unwrap(), Dialect::Postgresql);
        assert_eq!("sqlite3".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert!("oracle".parse::<Dialect>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn deserialize_aliases() {
        let dialect: Dialect = serde_json::from_str(r#""postgres""#).unwrap();
        assert_eq!(dialect, Dialect::Postgresql);
    }
}
