use std::path::{Path, PathBuf};

use crate::artisans::{load_catalog, ArtisanRecord};
use crate::locations::{load_locations, LocationIndex};
use crate::profession::Profession;

pub(crate) fn artisan(id: &str, name: &str, profession: Profession) -> ArtisanRecord {
    ArtisanRecord {
        id: id.to_string(),
        name: name.to_string(),
        profession,
        rating: 4.0,
        image: None,
        agreed: true,
        region: None,
        department: None,
        commune: None,
        address: None,
        phone: None,
        whatsapp: None,
        company: None,
        card_number: None,
        approval_number: None,
        experience: None,
        specialties: vec![],
        description: None,
        certifications: vec![],
        availability: None,
        public_markets: vec![],
    }
}

fn config_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
}

pub(crate) fn sample_catalog() -> Vec<ArtisanRecord> {
    load_catalog(&config_dir().join("artisans.yaml"))
        .expect("sample catalog")
        .artisans
}

pub(crate) fn sample_locations() -> LocationIndex {
    load_locations(&config_dir().join("locations.yaml")).expect("sample locations")
}
