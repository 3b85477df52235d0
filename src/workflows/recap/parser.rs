use std::io::Read;

use serde::{Deserialize, Deserializer};

/// One recap row: a single judge's submission for a single session.
#[derive(Debug)]
pub(crate) struct RecapRecord {
    pub(crate) session_id: String,
    pub(crate) village: String,
    pub(crate) class_group: String,
    pub(crate) age_group: String,
    pub(crate) category: String,
    pub(crate) status: String,
    pub(crate) scheduled_for: String,
    pub(crate) judge_name: String,
    pub(crate) marks: Option<String>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RecapRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<RecapRow>() {
        let row = record?;
        records.push(RecapRecord {
            session_id: row.session_id,
            village: row.village,
            class_group: row.class_group,
            age_group: row.age_group,
            category: row.category,
            status: row.status,
            scheduled_for: row.scheduled_for,
            judge_name: row.judge_name,
            marks: row.marks,
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct RecapRow {
    #[serde(rename = "Session ID")]
    session_id: String,
    #[serde(rename = "Village")]
    village: String,
    #[serde(rename = "Class Group")]
    class_group: String,
    #[serde(rename = "Age Group")]
    age_group: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Scheduled For")]
    scheduled_for: String,
    #[serde(rename = "Judge")]
    judge_name: String,
    #[serde(rename = "Marks", default, deserialize_with = "empty_string_as_none")]
    marks: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
