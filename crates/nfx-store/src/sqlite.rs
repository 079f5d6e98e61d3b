//! SQLite-backed record store (via rusqlite).
//!
//! Opens a note store dump read-only and answers the three foreign-key
//! queries the object engine needs against `ZICCLOUDSYNCINGOBJECT`.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row};
use tracing::debug;

use nfx_types::{NoteId, ObjectKey};

use crate::error::{StoreError, StoreResult};
use crate::rows::{AttachmentRow, MediaRow, ThumbnailRow};
use crate::traits::RecordStore;

const THUMBNAILS_SQL: &str = "SELECT Z_PK, ZIDENTIFIER, ZHEIGHT, ZWIDTH \
     FROM ZICCLOUDSYNCINGOBJECT \
     WHERE ZATTACHMENT = ?1 \
     ORDER BY Z_PK";

const ATTACHMENTS_SQL: &str = "SELECT Z_PK, ZIDENTIFIER, ZTYPEUTI, ZPARENTATTACHMENT, ZMEDIA \
     FROM ZICCLOUDSYNCINGOBJECT \
     WHERE ZNOTE = ?1 AND ZTYPEUTI IS NOT NULL AND ZATTACHMENT IS NULL \
     ORDER BY Z_PK";

const MEDIA_SQL: &str = "SELECT Z_PK, ZIDENTIFIER, ZFILENAME \
     FROM ZICCLOUDSYNCINGOBJECT \
     WHERE Z_PK = ?1";

/// Read-only record store over a SQLite note store.
pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Open the database at `path` read-only.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref();
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| StoreError::Unavailable(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "opened note store");
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already-open connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> StoreResult<T>) -> StoreResult<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("connection lock poisoned: {e}")))?;
        f(&conn)
    }
}

impl RecordStore for SqliteRecordStore {
    fn thumbnail_rows(&self, attachment: ObjectKey) -> StoreResult<Vec<ThumbnailRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(THUMBNAILS_SQL)?;
            let raw = stmt
                .query_map([attachment.get()], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<i64>>(2)?,
                        row.get::<_, Option<i64>>(3)?,
                    ))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            raw.into_iter()
                .map(|(key, uuid, height, width)| {
                    let key = ObjectKey::new(key);
                    Ok(ThumbnailRow {
                        key,
                        uuid: uuid.unwrap_or_default(),
                        height: dimension(key, "ZHEIGHT", height)?,
                        width: dimension(key, "ZWIDTH", width)?,
                    })
                })
                .collect()
        })
    }

    fn attachment_rows(&self, note: NoteId) -> StoreResult<Vec<AttachmentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(ATTACHMENTS_SQL)?;
            let rows = stmt
                .query_map([note.get()], |row| attachment_from_row(row, note))?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    fn media_row(&self, key: ObjectKey) -> StoreResult<Option<MediaRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare_cached(MEDIA_SQL)?;
            let row = stmt
                .query_row([key.get()], |row| {
                    Ok(MediaRow {
                        key: ObjectKey::new(row.get(0)?),
                        uuid: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        filename: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                })
                .optional()?;
            Ok(row)
        })
    }
}

impl std::fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteRecordStore").finish_non_exhaustive()
    }
}

fn attachment_from_row(row: &Row<'_>, note: NoteId) -> rusqlite::Result<AttachmentRow> {
    Ok(AttachmentRow {
        key: ObjectKey::new(row.get(0)?),
        uuid: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        type_tag: row.get(2)?,
        note,
        parent_attachment: row.get::<_, Option<i64>>(3)?.map(ObjectKey::new),
        media: row.get::<_, Option<i64>>(4)?.map(ObjectKey::new),
    })
}

/// NULL reads as zero; negative or oversized values are corrupt.
fn dimension(key: ObjectKey, column: &str, value: Option<i64>) -> StoreResult<u32> {
    match value {
        None => Ok(0),
        Some(v) => u32::try_from(v).map_err(|_| StoreError::CorruptRow {
            key,
            reason: format!("{column} out of range: {v}"),
        }),
    }
}
