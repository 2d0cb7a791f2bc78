use super::{BoardDataset, PersistenceError, PersistenceResult};
use crate::board::BoardLayout;
use crate::booking::{Booking, BookingStatus, parse_hhmm};
use crate::resource::Resource;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

pub fn save_dataset_to_json<P: AsRef<Path>>(
    dataset: &BoardDataset,
    path: P,
) -> PersistenceResult<()> {
    dataset.validate()?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, dataset)?;
    Ok(())
}

pub fn load_dataset_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<BoardDataset> {
    let file = File::open(path)?;
    let dataset: BoardDataset = serde_json::from_reader(file)?;
    dataset.validate()?;
    Ok(dataset)
}

/// Write a computed layout for an external renderer.
pub fn save_layout_to_json<P: AsRef<Path>>(layout: &BoardLayout, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, layout)?;
    Ok(())
}

#[derive(Default, Serialize, Deserialize)]
struct BookingCsvRecord {
    id: String,
    #[serde(default)]
    resource_id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    status: String,
}

impl BookingCsvRecord {
    fn into_booking(self) -> PersistenceResult<Booking> {
        let status = BookingStatus::from_str(&self.status).map_err(|err| {
            PersistenceError::InvalidData(format!("booking {}: {err}", self.id))
        })?;
        Ok(Booking {
            start_date: parse_date(&self.start_date)?,
            end_date: parse_date(&self.end_date)?,
            start_time: parse_time(&self.start_time)?,
            end_time: parse_time(&self.end_time)?,
            resource_id: parse_string_option(self.resource_id),
            title: parse_string_option(self.title),
            id: self.id,
            status,
        })
    }
}

#[derive(Default, Serialize, Deserialize)]
struct ResourceCsvRecord {
    id: String,
    display_name: String,
    #[serde(default)]
    sort_key: String,
}

impl From<ResourceCsvRecord> for Resource {
    fn from(record: ResourceCsvRecord) -> Self {
        let resource = Resource::new(record.id, record.display_name);
        if record.sort_key.trim().is_empty() {
            resource
        } else {
            resource.with_sort_key(record.sort_key.trim())
        }
    }
}

/// Columns: `id,resource_id,title,start_date,end_date,start_time,end_time,status`.
/// Empty cells mean "absent".
pub fn load_bookings_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Booking>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut bookings = Vec::new();
    for record in reader.deserialize::<BookingCsvRecord>() {
        bookings.push(record?.into_booking()?);
    }
    tracing::debug!(count = bookings.len(), "loaded bookings from csv");
    Ok(bookings)
}

/// Columns: `id,display_name,sort_key`. A missing sort key falls back to the
/// lower-cased display name.
pub fn load_resources_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Resource>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
    let mut resources = Vec::new();
    for record in reader.deserialize::<ResourceCsvRecord>() {
        resources.push(Resource::from(record?));
    }
    if resources.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no resources".into(),
        ));
    }
    tracing::debug!(count = resources.len(), "loaded resources from csv");
    Ok(resources)
}

fn parse_date(input: &str) -> PersistenceResult<Option<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(format!("invalid date '{input}': {e}")))
}

fn parse_time(input: &str) -> PersistenceResult<Option<NaiveTime>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_hhmm(input)
        .map(Some)
        .map_err(|e| PersistenceError::InvalidData(e.to_string()))
}

fn parse_string_option(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
