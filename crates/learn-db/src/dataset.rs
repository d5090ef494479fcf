//! The sample dataset every lesson queries.
//!
//! Schema comes from `sql/sample_dataset.sql`; rows are inserted with bound
//! parameters inside one transaction, so a seeded database is always
//! complete or absent.

use libsql::{Connection, params};

use crate::error::DatabaseError;

pub(crate) const SCHEMA: &str = include_str!("../sql/sample_dataset.sql");

/// A table the learner can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableInfo {
    pub name: &'static str,
    pub rows: usize,
    pub columns: &'static [&'static str],
}

pub const TABLES: &[TableInfo] = &[
    TableInfo {
        name: "movies",
        rows: MOVIES.len(),
        columns: &[
            "id",
            "title",
            "director",
            "year",
            "length_minutes",
            "language",
            "worldwide_gross_millions",
        ],
    },
    TableInfo {
        name: "boxoffice",
        rows: BOXOFFICE.len(),
        columns: &[
            "movie_id",
            "rating",
            "domestic_sales_millions",
            "international_sales_millions",
        ],
    },
    TableInfo {
        name: "theaters",
        rows: THEATERS.len(),
        columns: &["id", "name", "location", "capacity"],
    },
];

type MovieRow = (i64, &'static str, &'static str, i64, i64, &'static str, f64);

const MOVIES: &[MovieRow] = &[
    (1, "Toy Story", "John Lasseter", 1995, 81, "English", 373.6),
    (2, "A Bug's Life", "John Lasseter", 1998, 95, "English", 363.4),
    (3, "Toy Story 2", "John Lasseter", 1999, 93, "English", 497.4),
    (4, "Monsters, Inc.", "Pete Docter", 2001, 92, "English", 577.4),
    (5, "Finding Nemo", "Andrew Stanton", 2003, 107, "English", 940.3),
    (6, "The Incredibles", "Brad Bird", 2004, 116, "English", 631.4),
    (7, "Cars", "John Lasseter", 2006, 117, "English", 462.2),
    (8, "Ratatouille", "Brad Bird", 2007, 115, "English", 623.7),
    (9, "WALL-E", "Andrew Stanton", 2008, 104, "English", 521.3),
    (10, "Up", "Pete Docter", 2009, 101, "English", 735.1),
    (11, "Toy Story 3", "Lee Unkrich", 2010, 103, "English", 1067.0),
    (12, "Cars 2", "John Lasseter", 2011, 106, "English", 559.9),
    (13, "Brave", "Brenda Chapman", 2012, 102, "English", 540.4),
    (14, "Monsters University", "Dan Scanlon", 2013, 104, "English", 743.6),
];

/// `(movie_id, rating, domestic, international)`, sales in millions.
const BOXOFFICE: &[(i64, f64, f64, f64)] = &[
    (1, 8.3, 191.8, 181.8),
    (2, 7.2, 162.8, 200.6),
    (3, 7.9, 245.9, 251.5),
    (4, 8.1, 289.9, 287.5),
    (5, 8.2, 380.8, 559.5),
    (6, 8.0, 261.4, 370.0),
    (7, 7.2, 244.1, 218.1),
    (8, 8.0, 206.4, 417.3),
    (9, 8.4, 223.8, 297.5),
    (10, 8.3, 293.0, 442.1),
    (11, 8.3, 415.0, 652.0),
    (12, 6.2, 191.5, 368.4),
    (13, 7.1, 237.3, 303.1),
    (14, 7.3, 268.5, 475.1),
];

const THEATERS: &[(i64, &str, &str, i64)] = &[
    (1, "AMC Downtown", "New York", 200),
    (2, "Regal Cinema", "Los Angeles", 300),
    (3, "Cinemark Theater", "Chicago", 250),
    (4, "AMC Westfield", "San Francisco", 180),
    (5, "Showcase Cinema", "Boston", 220),
];

/// Create and populate the sample tables.
///
/// # Errors
///
/// Returns `DatabaseError::Seed` if any statement fails; nothing is committed.
pub async fn seed(conn: &Connection) -> Result<(), DatabaseError> {
    seed_with_schema(conn, SCHEMA).await
}

pub(crate) async fn seed_with_schema(conn: &Connection, schema: &str) -> Result<(), DatabaseError> {
    let seed_err = |step: &str, e: libsql::Error| DatabaseError::Seed(format!("{step}: {e}"));

    let tx = conn
        .transaction()
        .await
        .map_err(|e| seed_err("begin", e))?;
    tx.execute_batch(schema)
        .await
        .map_err(|e| seed_err("schema", e))?;

    for &(id, title, director, year, length, language, gross) in MOVIES {
        tx.execute(
            "INSERT INTO movies VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![id, title, director, year, length, language, gross],
        )
        .await
        .map_err(|e| seed_err("movies", e))?;
    }
    for &(movie_id, rating, domestic, international) in BOXOFFICE {
        tx.execute(
            "INSERT INTO boxoffice VALUES (?1, ?2, ?3, ?4)",
            params![movie_id, rating, domestic, international],
        )
        .await
        .map_err(|e| seed_err("boxoffice", e))?;
    }
    for &(id, name, location, capacity) in THEATERS {
        tx.execute(
            "INSERT INTO theaters VALUES (?1, ?2, ?3, ?4)",
            params![id, name, location, capacity],
        )
        .await
        .map_err(|e| seed_err("theaters", e))?;
    }

    tx.commit().await.map_err(|e| seed_err("commit", e))?;
    tracing::info!(tables = TABLES.len(), "sample dataset seeded");
    Ok(())
}

/// Confirm every sample table holds its expected row count.
///
/// # Errors
///
/// Returns `DatabaseError::Seed` on a missing table or a count mismatch.
pub async fn verify(conn: &Connection) -> Result<(), DatabaseError> {
    for table in TABLES {
        let mut rows = conn
            .query(&format!("SELECT COUNT(*) FROM {}", table.name), ())
            .await
            .map_err(|e| DatabaseError::Seed(format!("{}: {e}", table.name)))?;
        let count = match rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };
        if usize::try_from(count).ok() != Some(table.rows) {
            return Err(DatabaseError::Seed(format!(
                "{} has {count} rows, expected {}",
                table.name, table.rows
            )));
        }
    }
    Ok(())
}
