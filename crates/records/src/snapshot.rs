use serde::{Deserialize, Serialize};

use crate::{Category, ClimateRecord, DisasterRecord, EnvironmentalRecord};

/// Everything one fetch cycle produced. Replaced wholesale each cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub climate: Vec<ClimateRecord>,
    pub disasters: Vec<DisasterRecord>,
    pub environmental: Vec<EnvironmentalRecord>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.climate.is_empty() && self.disasters.is_empty() && self.environmental.is_empty()
    }

    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Temperature => self.climate.len(),
            Category::Disasters => self.disasters.len(),
            Category::Environmental => self.environmental.len(),
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.len(*c)).sum()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::mock;

    #[test]
    fn default_is_empty() {
        let snap = Snapshot::default();
        assert!(snap.is_empty());
        assert_eq!(snap.total(), 0);
    }

    #[test]
    fn counts_per_category() {
        let mut rng = SmallRng::seed_from_u64(1);
        let snap = Snapshot {
            climate: mock::climate_records(&mut rng, Utc::now()),
            ..Snapshot::default()
        };
        assert!(!snap.is_empty());
        assert_eq!(snap.len(Category::Temperature), mock::LOCATIONS.len());
        assert_eq!(snap.len(Category::Disasters), 0);
        assert_eq!(snap.total(), mock::LOCATIONS.len());
    }
}
