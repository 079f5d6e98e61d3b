//! Fixed-width report rows and their CSV/JSON writers.
//!
//! [`ReportRow::HEADERS`] and [`ReportRow::to_record`] must stay in lockstep:
//! every row, at any nesting depth, produces exactly one cell per header.

use std::io::Write;

use serde::{Deserialize, Serialize};

use nfx_types::{NoteId, ObjectKey};

use crate::content::ObjectRecord;
use crate::error::ObjectResult;

/// One flattened object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub object_key: ObjectKey,
    pub note_id: NoteId,
    /// `None` for roots; written as an empty cell.
    pub parent_key: Option<ObjectKey>,
    pub uuid: String,
    pub type_tag: String,
    pub filename: String,
    /// Path on the original device.
    pub filepath: String,
    /// Path of the recovered copy on this machine.
    pub backup_location: Option<String>,
}

impl ReportRow {
    /// Column names, in row order.
    pub const HEADERS: [&'static str; 8] = [
        "Object Primary Key",
        "Note ID",
        "Parent Object ID",
        "Object UUID",
        "Object Type",
        "Object Filename",
        "Object Filepath on Phone",
        "Object Filepath on Computer",
    ];

    pub fn new(record: &ObjectRecord, parent_key: Option<ObjectKey>) -> Self {
        Self {
            object_key: record.key(),
            note_id: record.note(),
            parent_key,
            uuid: record.uuid().to_string(),
            type_tag: record.type_tag().to_string(),
            filename: record.filename.clone(),
            filepath: record.filepath.clone(),
            backup_location: record
                .backup_location()
                .map(|path| path.display().to_string()),
        }
    }

    /// The row as text cells, one per header.
    pub fn to_record(&self) -> [String; 8] {
        [
            self.object_key.to_string(),
            self.note_id.to_string(),
            self.parent_key.map(|k| k.to_string()).unwrap_or_default(),
            self.uuid.clone(),
            self.type_tag.clone(),
            self.filename.clone(),
            self.filepath.clone(),
            self.backup_location.clone().unwrap_or_default(),
        ]
    }
}

/// The report column names.
pub fn report_headers() -> &'static [&'static str] {
    &ReportRow::HEADERS
}

/// Write `rows` as CSV, headers first.
pub fn write_csv<W: Write>(rows: &[ReportRow], writer: W) -> ObjectResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ReportRow::HEADERS)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `rows` as a pretty-printed JSON array.
pub fn write_json<W: Write>(rows: &[ReportRow], mut writer: W) -> ObjectResult<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}
