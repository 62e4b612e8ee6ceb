//! Day grouping of media records
//!
//! Groups are keyed by their rendered label alone, so the same month and day
//! in different years end up in one group.

use crate::models::{DayGroup, MediaRecord};
use chrono::{DateTime, FixedOffset, Local, Locale, Utc};
use std::collections::HashMap;

/// "Month Day", e.g. "March 3"
pub const DAY_LABEL_FORMAT: &str = "%B %-d";

/// Time zone in which a capture instant is turned into a calendar day
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayZone {
    /// Device local time, including DST changes
    Local,
    Fixed(FixedOffset),
}

/// Renders the locale day label of a capture instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayLabeler {
    pub locale: Locale,
    pub zone: DayZone,
}

impl Default for DayLabeler {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            zone: DayZone::Local,
        }
    }
}

impl DayLabeler {
    pub fn new(locale: Locale, zone: DayZone) -> Self {
        Self { locale, zone }
    }

    /// Labeler in device local time for a chrono locale name such as "de_DE"
    ///
    /// Unknown names fall back to `en_US`.
    pub fn local(locale_name: &str) -> Self {
        let locale = Locale::try_from(locale_name).unwrap_or_else(|_| {
            log::warn!("Unknown locale '{}', falling back to en_US", locale_name);
            Locale::en_US
        });
        Self::new(locale, DayZone::Local)
    }

    pub fn label(&self, at: &DateTime<Utc>) -> String {
        match self.zone {
            DayZone::Local => at
                .with_timezone(&Local)
                .format_localized(DAY_LABEL_FORMAT, self.locale)
                .to_string(),
            DayZone::Fixed(offset) => at
                .with_timezone(&offset)
                .format_localized(DAY_LABEL_FORMAT, self.locale)
                .to_string(),
        }
    }
}

/// Buckets records by day label in one pass
///
/// Groups come out in the order their label is first seen scanning front to
/// back; items keep their source order inside each group.
pub fn group_by_day(records: &[MediaRecord], labeler: &DayLabeler) -> Vec<DayGroup> {
    let mut groups: Vec<DayGroup> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for record in records {
        let label = labeler.label(&record.captured_at);
        match index_by_label.get(&label) {
            Some(&idx) => groups[idx].items.push(record.clone()),
            None => {
                index_by_label.insert(label.clone(), groups.len());
                groups.push(DayGroup {
                    label,
                    items: vec![record.clone()],
                });
            }
        }
    }

    groups
}

/// Concatenates group items back into one sequence, group by group
pub fn flatten(groups: &[DayGroup]) -> Vec<MediaRecord> {
    groups
        .iter()
        .flat_map(|group| group.items.iter().cloned())
        .collect()
}
