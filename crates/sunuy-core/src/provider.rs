use std::path::Path;

use crate::artisans::{load_catalog, validate_catalog, ArtisanRecord};
use crate::locations::{load_locations, validate_regions, LocationIndex};
use crate::ConfigError;

/// Read-only source of directory data.
///
/// Filtering and cascading selection take their data through this trait so
/// a live data source can later replace the static seed files.
pub trait DirectoryProvider: Send + Sync {
    /// All records, in catalog order.
    fn artisans(&self) -> &[ArtisanRecord];

    fn locations(&self) -> &LocationIndex;

    fn artisan(&self, id: &str) -> Option<&ArtisanRecord> {
        self.artisans().iter().find(|a| a.id == id)
    }
}

/// In-memory provider backed by validated seed data.
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    artisans: Vec<ArtisanRecord>,
    locations: LocationIndex,
}

impl StaticDirectory {
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the catalog or the location index
    /// breaks its invariants.
    pub fn new(artisans: Vec<ArtisanRecord>, locations: LocationIndex) -> Result<Self, ConfigError> {
        validate_catalog(&artisans)?;
        validate_regions(locations.regions())?;
        Ok(Self {
            artisans,
            locations,
        })
    }

    /// Load both seed files.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if either file cannot be read, parsed, or validated.
    pub fn load(catalog_path: &Path, locations_path: &Path) -> Result<Self, ConfigError> {
        let catalog = load_catalog(catalog_path)?;
        let locations = load_locations(locations_path)?;
        tracing::info!(
            artisans = catalog.artisans.len(),
            regions = locations.regions().len(),
            "directory data loaded"
        );
        Ok(Self {
            artisans: catalog.artisans,
            locations,
        })
    }
}

impl DirectoryProvider for StaticDirectory {
    fn artisans(&self) -> &[ArtisanRecord] {
        &self.artisans
    }

    fn locations(&self) -> &LocationIndex {
        &self.locations
    }
}
