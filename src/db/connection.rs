use rusqlite::{Connection, Result};

pub fn establish_connection(path: &str) -> Result<Connection> {
    let conn = Connection::open(path)?;
    create_store_table(&conn)?;
    Ok(conn)
}

#[cfg(test)]
pub fn establish_test_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    create_store_table(&conn)?;
    Ok(conn)
}

fn create_store_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}
