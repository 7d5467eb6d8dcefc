//! Cascading dropdown option derivation
//!
//! Region options come from the whole collection of a domain. Subregion and
//! locality options are conditioned on the higher-level selection and always
//! lead with [`ALL`]; while the parent level is `All` they are just `["All"]`.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::filter::{FilterSelection, ALL};
use crate::records::{Domain, Located};
use crate::store::RecordStore;

/// Distinct regions in first-seen order
pub fn region_options<'a, R, I>(records: I) -> Vec<String>
where
    R: Located + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    distinct(records.into_iter().map(|record| record.region()))
}

/// Subregions valid under the selected region
pub fn subregion_options<'a, R, I>(records: I, selection: &FilterSelection) -> Vec<String>
where
    R: Located + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if selection.region == ALL {
        return vec![ALL.to_string()];
    }

    let values = records
        .into_iter()
        .filter(|record| record.region() == selection.region)
        .map(|record| record.subregion());
    with_all(distinct(values))
}

/// Localities valid under the selected region and subregion
pub fn locality_options<'a, R, I>(records: I, selection: &FilterSelection) -> Vec<String>
where
    R: Located + ?Sized + 'a,
    I: IntoIterator<Item = &'a R>,
{
    if selection.subregion == ALL {
        return vec![ALL.to_string()];
    }

    let values = records
        .into_iter()
        .filter(|record| {
            record.region() == selection.region && record.subregion() == selection.subregion
        })
        .map(|record| record.locality());
    with_all(distinct(values))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<IndexSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn with_all(values: Vec<String>) -> Vec<String> {
    std::iter::once(ALL.to_string()).chain(values).collect()
}

/// The three option lists offered for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub subregions: Vec<String>,
    pub localities: Vec<String>,
}

impl FilterOptions {
    /// Derive every list for `domain` under `selection`
    pub fn derive(store: &RecordStore, domain: Domain, selection: &FilterSelection) -> Self {
        let records = store.locations(domain);
        Self {
            regions: region_options(records.iter()),
            subregions: subregion_options(records.iter(), selection),
            localities: locality_options(records.iter(), selection),
        }
    }
}
