//! Entities and the input shapes accepted by agency operations
//!
//! Relations are plain id fields. A mission carries its targets because they
//! are always read together; a cat's mission is looked up by id when needed.

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpyCat {
    pub id: i64,
    pub name: String,
    pub years_of_experience: i64,
    pub breed: String,
    pub salary: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSpyCat {
    pub name: String,
    pub years_of_experience: i64,
    pub breed: String,
    pub salary: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: i64,
    pub cat_id: Option<i64>,
    pub complete: bool,
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMission {
    /// Accepted for shape compatibility; missions always start incomplete
    #[serde(default)]
    pub complete: bool,
    pub targets: Vec<NewTarget>,
}

impl NewMission {
    pub fn with_targets(targets: Vec<NewTarget>) -> Self {
        Self {
            complete: false,
            targets,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: i64,
    pub name: String,
    pub country: String,
    pub notes: Option<String>,
    pub complete: bool,
    pub mission_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTarget {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub complete: bool,
}

impl NewTarget {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            notes: None,
            complete: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Partial target update. `None` leaves a field untouched.
///
/// `notes` distinguishes an absent key (`None`) from an explicit null
/// (`Some(None)`), which clears the stored notes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TargetUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "explicit_value")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub complete: Option<bool>,
}

impl TargetUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.country.is_none()
            && self.notes.is_none()
            && self.complete.is_none()
    }

    /// Apply the supplied fields onto `target`
    pub fn apply_to(&self, target: &mut Target) {
        if let Some(name) = &self.name {
            target.name = name.clone();
        }
        if let Some(country) = &self.country {
            target.country = country.clone();
        }
        if let Some(notes) = &self.notes {
            target.notes = notes.clone();
        }
        if let Some(complete) = self.complete {
            target.complete = complete;
        }
    }
}

/// Present keys, `null` included, become `Some`; absent keys keep the default `None`
fn explicit_value<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Offset/limit window for list operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_target() -> Target {
        Target {
            id: 1,
            name: "Dr. Mew".into(),
            country: "FR".into(),
            notes: Some("likes tuna".into()),
            complete: false,
            mission_id: 1,
        }
    }

    #[test]
    fn test_update_distinguishes_missing_and_null_notes() {
        let absent: TargetUpdate = serde_json::from_str(r#"{"name": "X"}"#).unwrap();
        assert_eq!(absent.notes, None);

        let null: TargetUpdate = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(null.notes, Some(None));

        let set: TargetUpdate = serde_json::from_str(r#"{"notes": "seen"}"#).unwrap();
        assert_eq!(set.notes, Some(Some("seen".to_string())));
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut target = sample_target();
        let update = TargetUpdate {
            country: Some("DE".into()),
            ..Default::default()
        };
        update.apply_to(&mut target);

        assert_eq!(target.country, "DE");
        assert_eq!(target.name, "Dr. Mew");
        assert_eq!(target.notes.as_deref(), Some("likes tuna"));
        assert!(!target.complete);
    }

    #[test]
    fn test_apply_explicit_null_clears_notes() {
        let mut target = sample_target();
        let update: TargetUpdate = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        update.apply_to(&mut target);
        assert_eq!(target.notes, None);
    }

    #[test]
    fn test_empty_update() {
        assert!(TargetUpdate::default().is_empty());
        let update: TargetUpdate = serde_json::from_str(r#"{"complete": true}"#).unwrap();
        assert!(!update.is_empty());
    }

    #[test]
    fn test_new_mission_defaults() {
        let mission: NewMission =
            serde_json::from_str(r#"{"targets": [{"name": "A", "country": "X"}]}"#).unwrap();
        assert!(!mission.complete);
        assert_eq!(mission.targets.len(), 1);
        assert_eq!(mission.targets[0].notes, None);
        assert!(!mission.targets[0].complete);
    }
}
