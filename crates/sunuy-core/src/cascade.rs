//! Dependent region → department → commune selection.

use serde::Serialize;

use crate::locations::{find_department, DepartmentNode, LocationIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    NoRegion,
    RegionOnly,
    RegionAndDepartment,
    FullySelected,
}

/// Selection state for one set of cascading location selects.
///
/// Option lists are derived from the [`LocationIndex`] on every parent
/// change, and child selections are cleared whenever a parent changes.
#[derive(Debug, Clone)]
pub struct CascadingSelector<'a> {
    index: &'a LocationIndex,
    region: String,
    department: String,
    commune: String,
    department_options: &'a [DepartmentNode],
    commune_options: &'a [String],
}

impl<'a> CascadingSelector<'a> {
    #[must_use]
    pub fn new(index: &'a LocationIndex) -> Self {
        Self {
            index,
            region: String::new(),
            department: String::new(),
            commune: String::new(),
            department_options: &[],
            commune_options: &[],
        }
    }

    /// Select a region; an empty string clears it.
    pub fn select_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
        self.department.clear();
        self.commune.clear();
        self.commune_options = &[];
        self.department_options = if self.region.is_empty() {
            &[]
        } else {
            self.index.departments(&self.region)
        };
    }

    /// Select a department among the current options; an empty string clears it.
    pub fn select_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
        self.commune.clear();
        self.commune_options = if self.department.is_empty() {
            &[]
        } else {
            find_department(self.department_options, &self.department)
                .map_or(&[], |d| d.communes.as_slice())
        };
    }

    pub fn select_commune(&mut self, commune: impl Into<String>) {
        self.commune = commune.into();
    }

    pub fn clear(&mut self) {
        self.select_region("");
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    #[must_use]
    pub fn commune(&self) -> &str {
        &self.commune
    }

    pub fn region_options(&self) -> impl Iterator<Item = &'a str> {
        self.index.region_names()
    }

    #[must_use]
    pub fn department_options(&self) -> &'a [DepartmentNode] {
        self.department_options
    }

    #[must_use]
    pub fn commune_options(&self) -> &'a [String] {
        self.commune_options
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        match (
            self.region.is_empty(),
            self.department.is_empty(),
            self.commune.is_empty(),
        ) {
            (true, _, _) => SelectionState::NoRegion,
            (false, true, _) => SelectionState::RegionOnly,
            (false, false, true) => SelectionState::RegionAndDepartment,
            (false, false, false) => SelectionState::FullySelected,
        }
    }
}
