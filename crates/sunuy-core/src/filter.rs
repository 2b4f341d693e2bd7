//! Directory filtering.
//!
//! Every active constraint must hold for a record to be kept, and the output
//! preserves catalog order. An empty field imposes no constraint.

use serde::{Deserialize, Serialize};

use crate::artisans::ArtisanRecord;

/// Current search constraints for the directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    search: String,
    metier: String,
    region: String,
    department: String,
}

impl FilterCriteria {
    /// Build a complete criteria snapshot.
    pub fn new(
        search: impl Into<String>,
        metier: impl Into<String>,
        region: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            search: search.into(),
            metier: metier.into(),
            region: region.into(),
            department: department.into(),
        }
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn metier(&self) -> &str {
        &self.metier
    }

    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[must_use]
    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_metier(&mut self, metier: impl Into<String>) {
        self.metier = metier.into();
    }

    /// Changing the region always clears the department.
    pub fn set_region(&mut self, region: impl Into<String>) {
        self.region = region.into();
        self.department.clear();
    }

    pub fn set_department(&mut self, department: impl Into<String>) {
        self.department = department.into();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.metier.is_empty()
            && self.region.is_empty()
            && self.department.is_empty()
    }

    /// `true` if `artisan` satisfies every active constraint.
    #[must_use]
    pub fn matches(&self, artisan: &ArtisanRecord) -> bool {
        self.matches_search(artisan)
            && (self.metier.is_empty() || artisan.profession.as_str() == self.metier)
            && (self.region.is_empty() || artisan.region.as_deref() == Some(self.region.as_str()))
            && (self.department.is_empty()
                || artisan.department.as_deref() == Some(self.department.as_str()))
    }

    fn matches_search(&self, artisan: &ArtisanRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        let contains = |field: &str| field.to_lowercase().contains(&term);

        contains(&artisan.name)
            || contains(artisan.profession.as_str())
            || [
                artisan.region.as_deref(),
                artisan.department.as_deref(),
                artisan.commune.as_deref(),
                artisan.company.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(contains)
            || artisan.specialties.iter().any(|s| contains(s))
    }
}

/// Stable filter of `catalog` by `criteria`.
#[must_use]
pub fn filter_catalog<'a>(
    catalog: &'a [ArtisanRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a ArtisanRecord> {
    catalog.iter().filter(|a| criteria.matches(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profession::Profession;
    use crate::test_support::{artisan, sample_catalog};

    fn ids(records: &[&ArtisanRecord]) -> Vec<String> {
        records.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn empty_criteria_returns_full_catalog_in_order() {
        let catalog = sample_catalog();
        let result = filter_catalog(&catalog, &FilterCriteria::default());
        assert_eq!(result.len(), catalog.len());
        assert!(result.iter().zip(&catalog).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn metier_macon_matches_fatou_sow_only() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria::new("", "Maçon", "", "");
        let result = filter_catalog(&catalog, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Fatou Sow");
    }

    #[test]
    fn mis_encoded_metier_matches_nothing() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria::new("", "MaÃ§on", "", "");
        assert!(filter_catalog(&catalog, &criteria).is_empty());
    }

    #[test]
    fn search_dakar_matches_location_fields() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria::new("dakar", "", "", "");
        let result = filter_catalog(&catalog, &criteria);
        assert_eq!(ids(&result), ["1", "7", "18"]);
    }

    #[test]
    fn search_is_case_insensitive_and_partitions_catalog() {
        let catalog = sample_catalog();
        for term in ["DAKAR", "rénovation", "sow", "Thiès", "cuir"] {
            let criteria = FilterCriteria::new(term, "", "", "");
            let kept = filter_catalog(&catalog, &criteria);
            let needle = term.to_lowercase();
            let hit = |a: &ArtisanRecord| {
                let mut fields = vec![a.name.clone(), a.profession.as_str().to_string()];
                fields.extend(
                    [&a.region, &a.department, &a.commune, &a.company]
                        .into_iter()
                        .flatten()
                        .cloned(),
                );
                fields.extend(a.specialties.iter().cloned());
                fields.iter().any(|f| f.to_lowercase().contains(&needle))
            };
            for a in &catalog {
                let is_kept = kept.iter().any(|k| k.id == a.id);
                assert_eq!(is_kept, hit(a), "term {term:?}, record {}", a.id);
            }
        }
    }

    #[test]
    fn search_matches_specialty() {
        let mut record = artisan("x", "Anonyme", Profession::Bijouterie);
        record.specialties = vec!["Orfèvrerie".to_string()];
        let criteria = FilterCriteria::new("orfè", "", "", "");
        assert!(criteria.matches(&record));
    }

    #[test]
    fn search_ignores_public_markets_and_description() {
        let mut record = artisan("x", "Anonyme", Profession::Peintre);
        record.public_markets = vec!["Fourniture mobilier mairie de Dakar".to_string()];
        record.description = Some("Basé à Dakar".to_string());
        let criteria = FilterCriteria::new("dakar", "", "", "");
        assert!(!criteria.matches(&record));
    }

    #[test]
    fn constraints_are_combined() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria::new("", "", "Thiès", "Mbour");
        let result = filter_catalog(&catalog, &criteria);
        assert_eq!(ids(&result), ["8"]);

        let criteria = FilterCriteria::new("peinture", "Peintre", "Thiès", "");
        let result = filter_catalog(&catalog, &criteria);
        assert_eq!(ids(&result), ["5"]);

        let criteria = FilterCriteria::new("", "Peintre", "Dakar", "");
        assert!(filter_catalog(&catalog, &criteria).is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = sample_catalog();
        let criteria = FilterCriteria::new("a", "", "Thiès", "");
        let first = ids(&filter_catalog(&catalog, &criteria));
        let second = ids(&filter_catalog(&catalog, &criteria));
        assert_eq!(first, second);
    }

    #[test]
    fn set_region_clears_department() {
        let mut criteria = FilterCriteria::new("", "", "Dakar", "Rufisque");
        criteria.set_region("Thiès");
        assert_eq!(criteria.region(), "Thiès");
        assert_eq!(criteria.department(), "");
    }

    #[test]
    fn reset_clears_everything() {
        let mut criteria = FilterCriteria::new("sow", "Maçon", "Thiès", "Thiès");
        criteria.reset();
        assert!(criteria.is_empty());
    }

    #[test]
    fn region_filter_excludes_records_without_region() {
        let record = artisan("x", "Sans Lieu", Profession::Peintre);
        let criteria = FilterCriteria::new("", "", "Dakar", "");
        assert!(!criteria.matches(&record));
    }
}
