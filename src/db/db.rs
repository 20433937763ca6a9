use crate::libs::data_storage::DataStorage;
use rusqlite::{Connection, Result};
use std::error::Error;
use std::time::Duration;

pub const DB_FILE_NAME: &str = "stula.db";
pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn new() -> Result<Db, Box<dyn Error>> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        let conn: Connection = Connection::open(db_file_path)?;
        // Timer callbacks may write from overlapping connections.
        conn.busy_timeout(Duration::from_secs(5))?;

        Ok(Db { conn })
    }
}
