#![forbid(unsafe_code)]
use chrono::{TimeZone, Utc};
use permanence::{
    plan_weeks, HolidayCalendar, IsoWeekCalendar, JsonStorage, Person, ProfileBook,
    SavedSchedule, Settings, Storage, Task,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

fn sample_settings() -> Settings {
    Settings {
        tasks: vec![Task::new("desk", 1)],
        personnel: vec![Person::new("alice", 5), Person::new("bob", 5)],
    }
}

fn sample_schedule() -> SavedSchedule {
    let weeks = plan_weeks(
        &sample_settings(),
        "2025-W02",
        1,
        &IsoWeekCalendar,
        &HolidayCalendar::new(),
        &mut StdRng::seed_from_u64(1),
    )
    .unwrap();
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
    SavedSchedule::new("2025-W02", weeks, now)
}

#[test]
fn default_book_has_one_active_profile() {
    let book = ProfileBook::default();
    assert_eq!(book.active_profile, "default");
    assert_eq!(book.names().collect::<Vec<_>>(), vec!["default"]);
    assert!(book.active().unwrap().settings.tasks.is_empty());
}

#[test]
fn create_use_and_rename() {
    let mut book = ProfileBook::default();
    book.create("night").unwrap();
    assert!(book.create("night").is_err());
    assert!(book.create("  ").is_err());

    book.set_active("night").unwrap();
    assert!(book.set_active("missing").is_err());

    book.update_settings("night", sample_settings()).unwrap();
    assert!(book.update_settings("missing", Settings::default()).is_err());

    book.rename("night", "weekend").unwrap();
    assert_eq!(book.active_profile, "weekend");
    assert_eq!(book.active().unwrap().settings, sample_settings());
    assert!(book.rename("weekend", "default").is_err());
    assert!(book.rename("missing", "other").is_err());
}

#[test]
fn last_profile_cannot_be_deleted() {
    let mut book = ProfileBook::default();
    assert!(book.delete("default").is_err());

    book.create("b").unwrap();
    book.delete("default").unwrap();
    assert_eq!(book.active_profile, "b");
    assert!(book.delete("b").is_err());
    assert!(book.delete("missing").is_err());
}

#[test]
fn schedules_live_in_the_active_profile() {
    let mut book = ProfileBook::default();
    book.save_schedule("january", sample_schedule()).unwrap();
    assert_eq!(book.schedule("january").unwrap().start_week, "2025-W02");

    book.create("other").unwrap();
    book.set_active("other").unwrap();
    assert!(book.schedule("january").is_err());

    book.set_active("default").unwrap();
    let removed = book.delete_schedule("january").unwrap();
    assert_eq!(removed.weeks.len(), 1);
    assert!(book.delete_schedule("january").is_err());
    assert!(book.save_schedule("", sample_schedule()).is_err());
}

#[test]
fn json_storage_roundtrip() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("profiles.json")).unwrap();

    let mut book = storage.load_or_default().unwrap();
    assert_eq!(book, ProfileBook::default());

    book.update_settings("default", sample_settings()).unwrap();
    book.save_schedule("january", sample_schedule()).unwrap();
    storage.save(&book).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded, book);

    let raw = std::fs::read_to_string(storage.path()).unwrap();
    assert!(raw.contains("\"activeProfile\""));
    assert!(raw.contains("\"scheduleDays\""));
    assert!(raw.contains("\"dateRange\""));
}

#[test]
fn storage_rejects_dangling_active_profile() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("profiles.json");
    std::fs::write(&path, r#"{"activeProfile": "ghost", "profiles": {"default": {}}}"#).unwrap();

    let storage = JsonStorage::open(&path).unwrap();
    assert!(storage.load().is_err());
}

#[test]
fn update_settings_replaces_the_whole_block() {
    let mut book = ProfileBook::default();
    book.update_settings("default", sample_settings()).unwrap();
    assert_eq!(book.active().unwrap().settings, sample_settings());

    let next = Settings {
        tasks: vec![Task::new("phone", 2)],
        personnel: vec![Person::new("carol", 3)],
    };
    book.update_settings("default", next.clone()).unwrap();
    assert_eq!(book.active().unwrap().settings, next);

    let err = book.update_settings("ghost", Settings::default()).unwrap_err();
    assert!(err.to_string().contains("unknown profile: ghost"));
    assert_eq!(book.active().unwrap().settings, next);
}
