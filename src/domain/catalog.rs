//! Movie and cinema catalog records.
//!
//! These are read-only snapshots of the backend catalog, already normalized
//! from the backend's inconsistent field naming by the HTTP adapter.

use serde::{Deserialize, Serialize};

/// A movie as listed by the backend catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Backend identifier (numeric ids are stringified).
    pub id: String,
    /// Display title.
    pub title: String,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    /// Genre names.
    pub genres: Vec<String>,
    /// Average rating out of 10.
    pub rating: Option<f64>,
    /// Raw release date as delivered by the backend.
    pub release_date: Option<String>,
    /// Synopsis / overview text.
    pub overview: Option<String>,
}

impl MovieRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            runtime: None,
            genres: Vec::new(),
            rating: None,
            release_date: None,
            overview: None,
        }
    }
}

/// A cinema (cluster) as listed by the backend catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CinemaRecord {
    /// Backend identifier (numeric ids are stringified).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: Option<String>,
    /// Hotline phone number.
    pub phone: Option<String>,
}

impl CinemaRecord {
    /// Creates a record with only the required fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: None,
            phone: None,
        }
    }
}
