//! Seeded synthetic survey data

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use agri_core::data::DataSource;
use agri_core::{
    AquacultureOperation, CropPlanting, LivestockHolding, Person, RecordStore, TrainingStatus,
};

use crate::config::MockConfig;

const COUNTIES: [&str; 5] = ["Nairobi", "Kiambu", "Nakuru", "Mombasa", "Kisumu"];

const EDUCATION_LEVELS: [&str; 4] = ["Primary", "Secondary", "Tertiary", "None"];

const CROP_TYPES: [&str; 7] = ["Maize", "Beans", "Wheat", "Rice", "Potatoes", "Cassava", "Sorghum"];
const WATER_SOURCES: [&str; 4] = ["Rain-fed", "Irrigated", "Both", "None"];
const CROP_SYSTEMS: [&str; 4] = ["Small-scale", "Large-scale", "Commercial", "Subsistence"];
const PURPOSES: [&str; 3] = ["Commercial", "Subsistence", "Both"];

const LIVESTOCK_TYPES: [&str; 6] = ["Cattle", "Goats", "Sheep", "Chicken", "Pigs", "Rabbits"];
const LIVESTOCK_SYSTEMS: [&str; 4] = ["Zero-grazing", "Free-range", "Semi-intensive", "Intensive"];
const AGE_GROUPS: [&str; 3] = ["Young", "Adult", "Old"];

const FISH_SPECIES: [&str; 5] = ["Tilapia", "Catfish", "Carp", "Trout", "Salmon"];
const FISH_CATEGORIES: [&str; 3] = ["Freshwater", "Marine", "Brackish"];
const FISH_SYSTEMS: [&str; 4] = [
    "Pond",
    "Cage",
    "Tank",
    "Recirculating Aquaculture System (RAS)",
];

fn subcounties(county: &str) -> &'static [&'static str] {
    match county {
        "Nairobi" => &["Westlands", "Embakasi", "Dagoretti"],
        "Kiambu" => &["Kikuyu", "Thika", "Limuru"],
        "Nakuru" => &["Naivasha", "Gilgil", "Molo"],
        "Mombasa" => &["Nyali", "Kisauni", "Likoni"],
        "Kisumu" => &["Kisumu Central", "Kisumu West", "Nyando"],
        _ => &["Central"],
    }
}

fn wards(subcounty: &str) -> &'static [&'static str] {
    match subcounty {
        "Westlands" => &["Parklands", "Mountain View", "Kangemi"],
        "Embakasi" => &["Pipeline", "Utawala", "Mihango"],
        "Kikuyu" => &["Karai", "Nachu", "Sigona"],
        _ => &["Ward 1"],
    }
}

fn sub_categories(livestock: &str) -> &'static [&'static str] {
    match livestock {
        "Cattle" => &["Dairy", "Beef", "Mixed"],
        "Goats" => &["Dairy", "Meat"],
        "Sheep" => &["Wool", "Meat"],
        "Chicken" => &["Layers", "Broilers", "Indigenous"],
        "Pigs" => &["Breeding", "Fattening"],
        "Rabbits" => &["Fur", "Meat"],
        _ => &["General"],
    }
}

/// Generates a reproducible survey dataset from a seed
pub struct MockSource {
    config: MockConfig,
}

impl MockSource {
    pub fn new(config: MockConfig) -> Self {
        Self { config }
    }

    /// Generate the full dataset synchronously
    pub fn generate(&self) -> RecordStore {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let farmer_count = self.config.farmers.max(1) as u64;

        let people = (1..=self.config.farmers as u64)
            .map(|id| generate_person(&mut rng, id))
            .collect();
        let crops = (1..=self.config.crops as u64)
            .map(|id| generate_crop(&mut rng, id, farmer_count))
            .collect();
        let livestock = (1..=self.config.livestock as u64)
            .map(|id| generate_livestock(&mut rng, id, farmer_count))
            .collect();
        let aquaculture = (1..=self.config.aquaculture as u64)
            .map(|id| generate_aquaculture(&mut rng, id, farmer_count))
            .collect();

        RecordStore::new(people, crops, livestock, aquaculture)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

fn pick(rng: &mut StdRng, values: &[&'static str]) -> String {
    values.choose(rng).copied().unwrap_or_default().to_string()
}

fn location(rng: &mut StdRng) -> (String, String, String) {
    let county = pick(rng, &COUNTIES);
    let subcounty = pick(rng, subcounties(&county));
    let ward = pick(rng, wards(&subcounty));
    (county, subcounty, ward)
}

fn generate_person(rng: &mut StdRng, id: u64) -> Person {
    let (region, subregion, locality) = location(rng);
    let training = match rng.gen_range(0..3) {
        0 => TrainingStatus::No,
        1 => TrainingStatus::Yes,
        _ => TrainingStatus::NotRecorded,
    };

    Person {
        id,
        name: format!("Farmer {}", id),
        gender: if rng.gen_bool(0.5) { "Male" } else { "Female" }.to_string(),
        year_of_birth: 1960 + rng.gen_range(0..40),
        region,
        subregion,
        locality,
        crop_production: rng.gen_bool(0.7),
        livestock_production: rng.gen_bool(0.6),
        education: pick(rng, &EDUCATION_LEVELS),
        training,
    }
}

fn generate_crop(rng: &mut StdRng, id: u64, farmer_count: u64) -> CropPlanting {
    let farmer_id = rng.gen_range(1..=farmer_count);
    let crop_name = pick(rng, &CROP_TYPES);
    let acreage = (rng.gen::<f64>() * 1000.0).round() / 100.0;
    let (region, subregion, locality) = location(rng);

    CropPlanting {
        id,
        farmer_id,
        crop_name,
        acreage,
        region,
        subregion,
        locality,
        water_source: pick(rng, &WATER_SOURCES),
        production_system: pick(rng, &CROP_SYSTEMS),
        purpose: pick(rng, &PURPOSES),
        certified_seeds: rng.gen_bool(0.5),
    }
}

fn generate_livestock(rng: &mut StdRng, id: u64, farmer_count: u64) -> LivestockHolding {
    let farmer_id = rng.gen_range(1..=farmer_count);
    let species = pick(rng, &LIVESTOCK_TYPES);
    let sub_category = pick(rng, sub_categories(&species));
    let (region, subregion, locality) = location(rng);

    LivestockHolding {
        id,
        farmer_id,
        species,
        sub_category,
        region,
        subregion,
        locality,
        male_count: rng.gen_range(0..10),
        female_count: rng.gen_range(0..15),
        production_system: pick(rng, &LIVESTOCK_SYSTEMS),
        age_group: pick(rng, &AGE_GROUPS),
    }
}

fn generate_aquaculture(rng: &mut StdRng, id: u64, farmer_count: u64) -> AquacultureOperation {
    let farmer_id = rng.gen_range(1..=farmer_count);
    let (region, subregion, locality) = location(rng);

    AquacultureOperation {
        id,
        farmer_id,
        species: pick(rng, &FISH_SPECIES),
        species_category: pick(rng, &FISH_CATEGORIES),
        region,
        subregion,
        locality,
        production_system: pick(rng, &FISH_SYSTEMS),
        fingerlings: rng.gen_range(100..1100),
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn load(&self) -> anyhow::Result<RecordStore> {
        debug!("Generating mock survey data with seed {}", self.config.seed);
        Ok(self.generate())
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}
