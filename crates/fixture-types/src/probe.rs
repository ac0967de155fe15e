//! Type-probe records: one field per BSON value category.

use crate::error::FixtureError;
use crate::values::{binary, datetime, decimal};
use bson::{doc, Bson, Document};

/// Identifiers of the inserted probe records.
pub const PROBE_IDS: [i32; 3] = [1, 2, 3];

/// Decimal field targeted by the update and the value-match delete.
pub const NUMERIC_FIELD: &str = "numeric_test";

/// Initial value of [`NUMERIC_FIELD`] on every probe record.
pub const NUMERIC_INITIAL: &str = "5.36";

/// Value written to [`NUMERIC_FIELD`] by the update step.
pub const NUMERIC_UPDATED: &str = "6.36";

/// Probe record whose decimal field is updated.
pub const UPDATED_ID: i32 = 2;

/// Probe record removed by identifier.
pub const DELETED_ID: i32 = 1;

/// Build the probe record with the given identifier.
///
/// All probe records share the same field values; only `_id` differs.
pub fn probe_record(id: i32) -> Result<Document, FixtureError> {
    Ok(doc! {
        "_id": id,
        "available": true,
        "a": "four",
        "b": "This is a varchar",
        "c": "This is a text column data",
        "d": Bson::Null,
        "play_time": i64::MIN,
        "library_record": 1_844_674_407_370_955_161_i64,
        "bitn_test": binary("bitn_test", "AAU=")?,
        "floatn_test": 9_223_372_036_854_776_000.0_f64,
        "double_test": 9_223_372_036_854_776_000.0_f64,
        "doublen_test": decimal("doublen_test", "2147483645.1234")?,
        NUMERIC_FIELD: decimal(NUMERIC_FIELD, NUMERIC_INITIAL)?,
        "salary_decimal": decimal("salary_decimal", "999.99")?,
        "date_type": datetime("date_type", "2030-12-25T00:00:00Z")?,
        "datetime_type": datetime("datetime_type", "2050-12-31T22:59:57.150150Z")?,
        "time_type": "04:05:30",
        "timestamp_type": datetime("timestamp_type", "2004-10-19T10:23:54.999999Z")?,
        "year_type": 2025_i32,
        "json_type": { "color": "red", "value": "#f00" },
        "blob_type": binary("blob_type", "3q2+7w==")?
    })
}

/// Build every probe record, in identifier order.
pub fn probe_records() -> Result<Vec<Document>, FixtureError> {
    PROBE_IDS.iter().map(|id| probe_record(*id)).collect()
}

/// The record expected to survive the seed plan: record [`UPDATED_ID`] with
/// [`NUMERIC_FIELD`] set to [`NUMERIC_UPDATED`].
pub fn surviving_probe_record() -> Result<Document, FixtureError> {
    let mut record = probe_record(UPDATED_ID)?;
    record.insert(NUMERIC_FIELD, decimal(NUMERIC_FIELD, NUMERIC_UPDATED)?);
    Ok(record)
}
