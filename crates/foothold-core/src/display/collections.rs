//! Newtype wrappers for displaying collections of domain objects.

use std::{fmt, ops::Index};

use crate::models::{ExposurePlan, ExposureTarget, Journey};

macro_rules! display_collection {
    ($(#[$meta:meta])* $name:ident, $item:ty, $empty:literal) => {
        $(#[$meta])*
        pub struct $name(pub Vec<$item>);

        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $name {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.is_empty() {
                    writeln!(f, "{}", $empty)
                } else {
                    for item in &self.0 {
                        write!(f, "{item}")?;
                    }
                    Ok(())
                }
            }
        }
    };
}

/// Compact listing of plans: one heading per plan, targets omitted.
pub struct Plans(pub Vec<ExposurePlan>);

impl Plans {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExposurePlan> {
        self.0.iter()
    }
}

impl fmt::Display for Plans {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in &self.0 {
            writeln!(
                f,
                "## {} (ID: {}) ({} targets)",
                plan.display_name(),
                plan.id,
                plan.targets.len()
            )?;
            writeln!(f)?;
            writeln!(f, "- **Sync**: {}", plan.sync_state)?;
            writeln!(
                f,
                "- **Created**: {}",
                super::LocalDateTime(&plan.created_at)
            )?;
            writeln!(f)?;
        }

        Ok(())
    }
}

display_collection!(
    /// Targets in plan order.
    Targets,
    ExposureTarget,
    "No targets found."
);

display_collection!(
    /// Journeys, newest first.
    Journeys,
    Journey,
    "No journeys found."
);

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        geo::Coordinate,
        models::{Lifecycle, SyncState},
    };

    fn plan(id: u64, name: &str) -> ExposurePlan {
        ExposurePlan {
            id,
            name: name.to_string(),
            lifecycle: Lifecycle::Active,
            sync_state: SyncState::PendingPush,
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
            targets: Vec::new(),
        }
    }

    fn target(id: u64, order_index: u32) -> ExposureTarget {
        ExposureTarget {
            id,
            plan_id: 1,
            name: format!("Stop {id}"),
            coordinate: Coordinate::new(40.0, -3.7),
            wait_time_seconds: 30,
            order_index,
            lifecycle: Lifecycle::Active,
            sync_state: SyncState::PendingPush,
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
        }
    }

    #[test]
    fn test_plans_display() {
        let output = Plans(vec![plan(1, "Errands"), plan(2, "")]).to_string();
        assert!(output.contains("## Errands (ID: 1) (0 targets)"));
        assert!(output.contains("## (unnamed plan) (ID: 2)"));

        assert_eq!(Plans(vec![]).to_string(), "No plans found.\n");
    }

    #[test]
    fn test_targets_display() {
        let targets = Targets(vec![target(7, 0), target(8, 1)]);
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].id, 8);

        let output = targets.to_string();
        assert!(output.contains("### 1. Stop 7 (ID: 7)"));
        assert!(output.contains("### 2. Stop 8 (ID: 8)"));

        assert_eq!(Targets(vec![]).to_string(), "No targets found.\n");
    }

    #[test]
    fn test_journeys_display_empty() {
        assert_eq!(Journeys(vec![]).to_string(), "No journeys found.\n");
    }
}
