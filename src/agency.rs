//! Domain operations over the entity store.
//!
//! Every operation runs in a single transaction and either commits all of
//! its writes or none. Absent rows from the store become `NotFound` here.

use tracing::{debug, info, warn};

use crate::breeds::BreedCatalog;
use crate::error::{AgencyError, Result};
use crate::models::{Mission, NewMission, NewSpyCat, Page, SpyCat, Target, TargetUpdate};
use crate::store::{cats, missions, targets, Assignment, Store};

const CAT: &str = "Spy cat";
const MISSION: &str = "Mission";
const TARGET: &str = "Target";

pub struct Agency<C> {
    store: Store,
    breeds: C,
}

impl<C: BreedCatalog> Agency<C> {
    pub fn new(store: Store, breeds: C) -> Self {
        Self { store, breeds }
    }

    // -------------------------------------------------------------------------
    // Spy cats
    // -------------------------------------------------------------------------

    pub fn create_spy_cat(&mut self, cat: NewSpyCat) -> Result<SpyCat> {
        require_text("name", &cat.name)?;
        if cat.years_of_experience < 0 {
            return Err(AgencyError::ValidationFailed(
                "years_of_experience must not be negative".into(),
            ));
        }

        debug!(breed = %cat.breed, "checking breed");
        if !self.breeds.is_valid_breed(&cat.breed)? {
            warn!(breed = %cat.breed, "rejected unknown breed");
            return Err(AgencyError::ValidationFailed(format!(
                "breed '{}' is not a recognized cat breed",
                cat.breed
            )));
        }

        let tx = self.store.begin()?;
        let created = cats::insert(&tx, &cat)?;
        tx.commit()?;

        info!(cat_id = created.id, name = %created.name, "spy cat created");
        Ok(created)
    }

    pub fn list_spy_cats(&self, page: Page) -> Result<Vec<SpyCat>> {
        cats::list(self.store.connection(), page)
    }

    pub fn get_spy_cat(&self, cat_id: i64) -> Result<SpyCat> {
        cats::get(self.store.connection(), cat_id)?
            .ok_or_else(|| AgencyError::not_found(CAT, cat_id))
    }

    /// Salary is the only field of a cat that changes after creation
    pub fn update_spy_cat_salary(&mut self, cat_id: i64, salary: i64) -> Result<SpyCat> {
        let tx = self.store.begin()?;
        let updated = cats::update_salary(&tx, cat_id, salary)?
            .ok_or_else(|| AgencyError::not_found(CAT, cat_id))?;
        tx.commit()?;

        info!(cat_id, salary, "spy cat salary updated");
        Ok(updated)
    }

    /// Deletes the cat unconditionally. Missions it held lose their `cat_id`
    /// but stay closed to further assignment.
    pub fn delete_spy_cat(&mut self, cat_id: i64) -> Result<()> {
        let tx = self.store.begin()?;
        if !cats::delete(&tx, cat_id)? {
            return Err(AgencyError::not_found(CAT, cat_id));
        }
        tx.commit()?;

        info!(cat_id, "spy cat deleted");
        Ok(())
    }

    /// The mission currently or most recently held by the cat
    pub fn mission_for_cat(&self, cat_id: i64) -> Result<Option<Mission>> {
        missions::for_cat(self.store.connection(), cat_id)
    }

    // -------------------------------------------------------------------------
    // Missions
    // -------------------------------------------------------------------------

    /// Create a mission and all of its targets atomically
    pub fn create_mission(&mut self, mission: NewMission) -> Result<Mission> {
        for target in &mission.targets {
            require_text("target name", &target.name)?;
            require_text("target country", &target.country)?;
        }

        let tx = self.store.begin()?;
        let mission_id = missions::insert(&tx)?;
        let created = mission
            .targets
            .iter()
            .map(|target| targets::insert(&tx, mission_id, target))
            .collect::<Result<Vec<_>>>()?;

        // Targets that all arrive complete finish the mission right away
        let complete = !created.is_empty() && created.iter().all(|t| t.complete);
        if complete {
            missions::mark_complete(&tx, mission_id)?;
        }
        tx.commit()?;

        info!(mission_id, targets = created.len(), complete, "mission created");
        Ok(Mission {
            id: mission_id,
            cat_id: None,
            complete,
            targets: created,
        })
    }

    pub fn list_missions(&self, page: Page) -> Result<Vec<Mission>> {
        missions::list(self.store.connection(), page)
    }

    pub fn get_mission(&self, mission_id: i64) -> Result<Mission> {
        missions::get(self.store.connection(), mission_id)?
            .ok_or_else(|| AgencyError::not_found(MISSION, mission_id))
    }

    /// Deletes an incomplete mission together with its targets
    pub fn delete_mission(&mut self, mission_id: i64) -> Result<()> {
        let tx = self.store.begin()?;
        let mission = missions::get(&tx, mission_id)?
            .ok_or_else(|| AgencyError::not_found(MISSION, mission_id))?;

        if mission.complete {
            warn!(mission_id, "refusing to delete completed mission");
            return Err(AgencyError::InvalidState(format!(
                "mission {} is complete and cannot be deleted",
                mission_id
            )));
        }

        let removed = targets::delete_for_mission(&tx, mission_id)?;
        missions::delete(&tx, mission_id)?;
        tx.commit()?;

        info!(mission_id, targets = removed, "mission deleted");
        Ok(())
    }

    /// Assign a cat to an unassigned, incomplete mission. Assignment is permanent.
    pub fn assign_cat_to_mission(&mut self, mission_id: i64, cat_id: i64) -> Result<Mission> {
        let tx = self.store.begin()?;
        if cats::get(&tx, cat_id)?.is_none() {
            return Err(AgencyError::not_found(CAT, cat_id));
        }

        match missions::assign_cat(&tx, mission_id, cat_id)? {
            Assignment::Assigned => {}
            Assignment::MissionNotFound => return Err(AgencyError::not_found(MISSION, mission_id)),
            Assignment::AlreadyAssigned { cat_id: holder } => {
                warn!(mission_id, cat_id, ?holder, "mission already assigned");
                let message = match holder {
                    Some(holder) => format!(
                        "mission {} is already assigned to cat {}",
                        mission_id, holder
                    ),
                    None => format!(
                        "mission {} was already assigned to a cat that has since been deleted",
                        mission_id
                    ),
                };
                return Err(AgencyError::InvalidState(message));
            }
            Assignment::MissionComplete => {
                warn!(mission_id, cat_id, "mission already complete");
                return Err(AgencyError::InvalidState(format!(
                    "mission {} is complete and cannot be assigned",
                    mission_id
                )));
            }
            Assignment::CatBusy { mission_id: other } => {
                warn!(mission_id, cat_id, other, "cat already on an active mission");
                return Err(AgencyError::InvalidState(format!(
                    "cat {} is already on active mission {}",
                    cat_id, other
                )));
            }
        }

        let mission = missions::get(&tx, mission_id)?
            .ok_or_else(|| AgencyError::not_found(MISSION, mission_id))?;
        tx.commit()?;

        info!(mission_id, cat_id, "cat assigned to mission");
        Ok(mission)
    }

    // -------------------------------------------------------------------------
    // Targets
    // -------------------------------------------------------------------------

    /// Apply a partial update to an incomplete target of an incomplete mission.
    ///
    /// `mission_id` is the id the caller addressed the target through; the
    /// lookup goes by `target_id` alone. When the update leaves every target of
    /// the mission complete, the mission is marked complete as well.
    pub fn update_target(
        &mut self,
        mission_id: i64,
        target_id: i64,
        update: TargetUpdate,
    ) -> Result<Target> {
        if let Some(name) = &update.name {
            require_text("target name", name)?;
        }
        if let Some(country) = &update.country {
            require_text("target country", country)?;
        }

        if update.is_empty() {
            debug!(target_id, "target update carries no fields");
        }

        let tx = self.store.begin()?;
        let mut target = targets::get(&tx, target_id)?
            .ok_or_else(|| AgencyError::not_found(TARGET, target_id))?;

        if target.mission_id != mission_id {
            debug!(
                target_id,
                requested = mission_id,
                actual = target.mission_id,
                "target addressed through a different mission"
            );
        }

        if target.complete {
            warn!(target_id, "refusing to update completed target");
            return Err(AgencyError::InvalidState(format!(
                "target {} is complete and cannot be updated",
                target_id
            )));
        }

        let parent = missions::get(&tx, target.mission_id)?
            .ok_or_else(|| AgencyError::not_found(MISSION, target.mission_id))?;
        if parent.complete {
            warn!(
                target_id,
                mission_id = parent.id,
                "refusing to update target of completed mission"
            );
            return Err(AgencyError::InvalidState(format!(
                "mission {} is complete; its targets cannot be updated",
                parent.id
            )));
        }

        update.apply_to(&mut target);
        targets::save(&tx, &target)?;

        let mission_done = targets::count_incomplete(&tx, target.mission_id)? == 0;
        if mission_done {
            missions::mark_complete(&tx, target.mission_id)?;
        }
        tx.commit()?;

        info!(target_id, complete = target.complete, "target updated");
        if mission_done {
            info!(mission_id = target.mission_id, "all targets complete, mission completed");
        }
        Ok(target)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AgencyError::ValidationFailed(format!(
            "{} must not be blank",
            field
        )));
    }
    Ok(())
}
