use crate::model::Settings;
use crate::planner::PlannedWeek;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const DEFAULT_PROFILE: &str = "default";

/// Planning enregistré dans un profil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSchedule {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub start_week: String,
    pub weeks: Vec<PlannedWeek>,
}

impl SavedSchedule {
    pub fn new<S: Into<String>>(start_week: S, weeks: Vec<PlannedWeek>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            start_week: start_week.into(),
            weeks,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub schedules: BTreeMap<String, SavedSchedule>,
}

/// Ensemble des profils, dont un actif.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBook {
    pub active_profile: String,
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for ProfileBook {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(DEFAULT_PROFILE.to_string(), Profile::default());
        Self {
            active_profile: DEFAULT_PROFILE.to_string(),
            profiles,
        }
    }
}

impl ProfileBook {
    /// Vérifie que le profil actif existe.
    pub fn check(&self) -> Result<()> {
        if !self.profiles.contains_key(&self.active_profile) {
            bail!("active profile {} does not exist", self.active_profile);
        }
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn active(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .with_context(|| format!("unknown profile: {}", self.active_profile))
    }

    pub fn active_mut(&mut self) -> Result<&mut Profile> {
        let name = self.active_profile.clone();
        self.profiles
            .get_mut(&name)
            .with_context(|| format!("unknown profile: {name}"))
    }

    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            bail!("unknown profile: {name}");
        }
        self.active_profile = name.to_string();
        Ok(())
    }

    pub fn create(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            bail!("profile name cannot be empty");
        }
        if self.profiles.contains_key(name) {
            bail!("profile already exists: {name}");
        }
        self.profiles.insert(name.to_string(), Profile::default());
        Ok(())
    }

    pub fn update_settings(&mut self, name: &str, settings: Settings) -> Result<()> {
        let profile = self
            .profiles
            .get_mut(name)
            .with_context(|| format!("unknown profile: {name}"))?;
        profile.settings = settings;
        Ok(())
    }

    /// Renomme un profil ; suit le pointeur actif.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<()> {
        let new = new.trim();
        if new.is_empty() {
            bail!("profile name cannot be empty");
        }
        if self.profiles.contains_key(new) {
            bail!("profile already exists: {new}");
        }
        let profile = self
            .profiles
            .remove(old)
            .with_context(|| format!("unknown profile: {old}"))?;
        self.profiles.insert(new.to_string(), profile);
        if self.active_profile == old {
            self.active_profile = new.to_string();
        }
        Ok(())
    }

    /// Supprime un profil. Le dernier profil ne peut pas être supprimé ;
    /// si le profil actif disparaît, le premier restant devient actif.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            bail!("unknown profile: {name}");
        }
        if self.profiles.len() <= 1 {
            bail!("cannot delete the last profile");
        }
        self.profiles.remove(name);
        if self.active_profile == name {
            if let Some(next) = self.profiles.keys().next() {
                self.active_profile = next.clone();
            }
        }
        Ok(())
    }

    /// Enregistre (ou remplace) un planning dans le profil actif.
    pub fn save_schedule(&mut self, name: &str, schedule: SavedSchedule) -> Result<()> {
        if name.trim().is_empty() {
            bail!("schedule name cannot be empty");
        }
        self.active_mut()?
            .schedules
            .insert(name.trim().to_string(), schedule);
        Ok(())
    }

    pub fn schedule(&self, name: &str) -> Result<&SavedSchedule> {
        self.active()?
            .schedules
            .get(name)
            .with_context(|| format!("schedule not found: {name}"))
    }

    pub fn delete_schedule(&mut self, name: &str) -> Result<SavedSchedule> {
        self.active_mut()?
            .schedules
            .remove(name)
            .with_context(|| format!("schedule not found: {name}"))
    }
}
