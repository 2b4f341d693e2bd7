use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentNode {
    pub name: String,
    #[serde(default)]
    pub communes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionNode {
    pub region: String,
    #[serde(default)]
    pub departments: Vec<DepartmentNode>,
}

/// Static region → department → commune table.
///
/// Region names are unique; department names are unique within their
/// region. Commune names may repeat across departments. Deserializing goes
/// through the same checks as [`LocationIndex::new`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocationsFile")]
pub struct LocationIndex {
    regions: Vec<RegionNode>,
}

impl LocationIndex {
    /// Build an index from region nodes, enforcing the uniqueness rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on empty or duplicate names.
    pub fn new(regions: Vec<RegionNode>) -> Result<Self, ConfigError> {
        validate_regions(&regions)?;
        Ok(Self { regions })
    }

    #[must_use]
    pub fn regions(&self) -> &[RegionNode] {
        &self.regions
    }

    pub fn region_names(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.region.as_str())
    }

    #[must_use]
    pub fn region(&self, region: &str) -> Option<&RegionNode> {
        self.regions.iter().find(|r| r.region == region)
    }

    /// Departments of `region`, or an empty slice when the region is unknown.
    #[must_use]
    pub fn departments(&self, region: &str) -> &[DepartmentNode] {
        self.region(region).map_or(&[], |r| r.departments.as_slice())
    }

    /// Communes of `department` within `region`, or an empty slice.
    #[must_use]
    pub fn communes(&self, region: &str, department: &str) -> &[String] {
        find_department(self.departments(region), department)
            .map_or(&[], |d| d.communes.as_slice())
    }
}

pub(crate) fn find_department<'a>(
    departments: &'a [DepartmentNode],
    name: &str,
) -> Option<&'a DepartmentNode> {
    departments.iter().find(|d| d.name == name)
}

/// On-disk shape of the location data file.
#[derive(Debug, Deserialize)]
pub struct LocationsFile {
    pub regions: Vec<RegionNode>,
}

impl TryFrom<LocationsFile> for LocationIndex {
    type Error = ConfigError;

    fn try_from(file: LocationsFile) -> Result<Self, Self::Error> {
        Self::new(file.regions)
    }
}

/// Load and validate the location index from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_locations(path: &Path) -> Result<LocationIndex, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DataFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let index: LocationIndex = serde_yaml::from_str(&content)?;

    tracing::debug!(
        path = %path.display(),
        regions = index.regions.len(),
        "loaded location index"
    );

    Ok(index)
}

pub(crate) fn validate_regions(regions: &[RegionNode]) -> Result<(), ConfigError> {
    let mut seen_regions = HashSet::new();

    for region in regions {
        if region.region.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }
        if !seen_regions.insert(region.region.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region: '{}'",
                region.region
            )));
        }

        let mut seen_departments = HashSet::new();
        for department in &region.departments {
            if department.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "region '{}' has a department with an empty name",
                    region.region
                )));
            }
            if !seen_departments.insert(department.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate department '{}' in region '{}'",
                    department.name, region.region
                )));
            }
        }
    }

    Ok(())
}
