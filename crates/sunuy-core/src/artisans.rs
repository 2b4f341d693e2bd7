use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::profession::Profession;
use crate::ConfigError;

pub const APP_STORE_URL: &str =
    "https://apps.apple.com/sn/app/su%C3%B1uy-artisan/id6745223088?l=fr-FR";
pub const PLAY_STORE_URL: &str =
    "https://play.google.com/store/apps/details?id=com.sunuyartisan.app&hl=fr";

const UNSPECIFIED_LOCATION: &str = "Non spécifiée";

/// A directory entry. Location strings are free text and are not checked
/// against the [`LocationIndex`](crate::LocationIndex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtisanRecord {
    pub id: String,
    pub name: String,
    pub profession: Profession,
    pub rating: f32,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub agreed: bool,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub commune: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub card_number: Option<String>,
    #[serde(default)]
    pub approval_number: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub public_markets: Vec<String>,
}

impl ArtisanRecord {
    /// Region, then department when it differs from the region.
    #[must_use]
    pub fn display_location(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(2);
        if let Some(region) = self.region.as_deref() {
            parts.push(region);
        }
        if let Some(department) = self.department.as_deref() {
            if self.region.as_deref() != Some(department) {
                parts.push(department);
            }
        }
        if parts.is_empty() {
            UNSPECIFIED_LOCATION.to_string()
        } else {
            parts.join(", ")
        }
    }

    /// `tel:` deep link for the record's phone number.
    #[must_use]
    pub fn tel_link(&self) -> Option<String> {
        self.phone
            .as_deref()
            .map(|phone| format!("tel:{}", strip_whitespace(phone)))
    }

    /// `wa.me` deep link for the record's WhatsApp number.
    #[must_use]
    pub fn whatsapp_link(&self) -> Option<String> {
        self.whatsapp.as_deref().map(|number| {
            let digits = strip_whitespace(number);
            format!("https://wa.me/{}", digits.trim_start_matches('+'))
        })
    }

    /// Number of filled stars in a five-star display.
    #[must_use]
    pub fn full_stars(&self) -> u8 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let stars = self.rating.clamp(0.0, 5.0).floor() as u8;
        stars
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub artisans: Vec<ArtisanRecord>,
}

/// Load and validate the artisan catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<CatalogFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::DataFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: CatalogFile = serde_yaml::from_str(&content)?;

    validate_catalog(&catalog.artisans)?;

    tracing::debug!(
        path = %path.display(),
        artisans = catalog.artisans.len(),
        "loaded artisan catalog"
    );

    Ok(catalog)
}

pub(crate) fn validate_catalog(artisans: &[ArtisanRecord]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for artisan in artisans {
        if artisan.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "artisan id must be non-empty".to_string(),
            ));
        }

        if !seen_ids.insert(artisan.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate artisan id: '{}'",
                artisan.id
            )));
        }

        if artisan.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "artisan '{}' must have a non-empty name",
                artisan.id
            )));
        }

        if !(0.0..=5.0).contains(&artisan.rating) {
            return Err(ConfigError::Validation(format!(
                "artisan '{}' has invalid rating {}; must be between 0 and 5",
                artisan.id, artisan.rating
            )));
        }

        if !artisan.profession.is_listed() {
            return Err(ConfigError::Validation(format!(
                "artisan '{}' has unlisted profession '{}'",
                artisan.id, artisan.profession
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "artisans_test.rs"]
mod tests;
