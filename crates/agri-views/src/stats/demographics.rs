//! Farmer demographics

use serde::{Deserialize, Serialize};

use agri_core::Person;

use super::{count_by, percentage, sort_desc, CategoryCount};

/// Age bucket labels, youngest first
pub const AGE_GROUPS: [&str; 5] = ["0-20", "21-40", "41-60", "61-80", "81+"];

fn age_group(age: i32) -> &'static str {
    match age {
        a if a <= 20 => AGE_GROUPS[0],
        a if a <= 40 => AGE_GROUPS[1],
        a if a <= 60 => AGE_GROUPS[2],
        a if a <= 80 => AGE_GROUPS[3],
        _ => AGE_GROUPS[4],
    }
}

/// Domain-level scalars and breakdowns over a filtered set of farmers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicsSummary {
    pub total_farmers: usize,
    pub crop_farmers: usize,
    pub livestock_farmers: usize,

    /// Farmers growing crops or keeping livestock
    pub farming_households: usize,

    /// Share of farmers growing crops, `None` when there are no farmers
    pub crop_farmer_pct: Option<f64>,
    pub livestock_farmer_pct: Option<f64>,

    pub by_gender: Vec<CategoryCount>,

    /// Every bucket of [`AGE_GROUPS`], in order, including empty ones
    pub by_age_group: Vec<CategoryCount>,

    /// Sorted by count, largest first
    pub by_region: Vec<CategoryCount>,
    pub by_education: Vec<CategoryCount>,
    pub by_training: Vec<CategoryCount>,
}

impl DemographicsSummary {
    pub fn summarize(people: &[&Person], current_year: i32) -> Self {
        let total_farmers = people.len();
        let crop_farmers = people.iter().filter(|p| p.crop_production).count();
        let livestock_farmers = people.iter().filter(|p| p.livestock_production).count();
        let farming_households = people.iter().filter(|p| p.is_farming_household()).count();

        let mut by_age_group: Vec<CategoryCount> = AGE_GROUPS
            .iter()
            .map(|label| CategoryCount::new(*label, 0))
            .collect();
        for person in people {
            let label = age_group(person.age_in(current_year));
            if let Some(bucket) = by_age_group.iter_mut().find(|b| b.label == label) {
                bucket.count += 1;
            }
        }

        Self {
            total_farmers,
            crop_farmers,
            livestock_farmers,
            farming_households,
            crop_farmer_pct: percentage(crop_farmers, total_farmers),
            livestock_farmer_pct: percentage(livestock_farmers, total_farmers),
            by_gender: count_by(people, |p| p.gender.as_str()),
            by_age_group,
            by_region: sort_desc(count_by(people, |p| p.region.as_str())),
            by_education: count_by(people, |p| p.education.as_str()),
            by_training: count_by(people, |p| p.training.label()),
        }
    }
}
