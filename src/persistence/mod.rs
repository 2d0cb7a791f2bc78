use crate::booking::Booking;
use crate::resource::Resource;
use crate::validation::{self, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    Validation(ValidationError),
    InvalidData(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::Validation(err) => write!(f, "invalid dataset: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<ValidationError> for PersistenceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Resources and bookings as exported by the back-office data store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardDataset {
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

impl BoardDataset {
    pub fn new(resources: Vec<Resource>, bookings: Vec<Booking>) -> Self {
        Self {
            resources,
            bookings,
        }
    }

    pub fn validate(&self) -> PersistenceResult<()> {
        validation::validate_resources(&self.resources)?;
        validation::validate_bookings(&self.bookings)?;
        Ok(())
    }
}

/// Where a dataset comes from.
pub trait DatasetSource {
    fn load_dataset(&self) -> PersistenceResult<BoardDataset>;
}

/// A single JSON document holding both resources and bookings.
#[derive(Debug, Clone)]
pub struct JsonDataset {
    pub path: PathBuf,
}

impl DatasetSource for JsonDataset {
    fn load_dataset(&self) -> PersistenceResult<BoardDataset> {
        load_dataset_from_json(&self.path)
    }
}

/// A bookings CSV next to a resources CSV.
#[derive(Debug, Clone)]
pub struct CsvDataset {
    pub bookings: PathBuf,
    pub resources: PathBuf,
}

impl DatasetSource for CsvDataset {
    fn load_dataset(&self) -> PersistenceResult<BoardDataset> {
        let mut resources = load_resources_from_csv(&self.resources)?;
        crate::resource::sort_resources(&mut resources);
        let bookings = load_bookings_from_csv(&self.bookings)?;
        let dataset = BoardDataset::new(resources, bookings);
        dataset.validate()?;
        Ok(dataset)
    }
}

pub mod file;

pub use file::{
    load_bookings_from_csv, load_dataset_from_json, load_resources_from_csv,
    save_dataset_to_json, save_layout_to_json,
};
