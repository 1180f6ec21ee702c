//! The alarm store: the single persisted, ordered collection of alarms.
//!
//! Invariant: the list is sorted ascending by minutes-past-midnight after
//! every mutation that persists. All structural mutation is expected to
//! funnel through one logical thread; there is no interior locking.

use chrono::{DateTime, Local};

use crate::alarm::Alarm;
use crate::error::StoreError;
use crate::storage::Database;

/// The kv slot holding the serialized alarm list.
pub const ALARMS_KEY: &str = "alarms";

#[derive(Debug, Default)]
pub struct AlarmStore {
    alarms: Vec<Alarm>,
}

impl AlarmStore {
    /// Deserialize the persisted snapshot.
    ///
    /// # Errors
    /// `CorruptData` when the stored payload does not parse against the
    /// alarm schema; callers treat that as "no alarms" but must surface
    /// the diagnostic rather than silently discard.
    pub fn load(db: &Database) -> Result<Self, StoreError> {
        match db.kv_get(ALARMS_KEY)? {
            None => Ok(Self::default()),
            Some(json) => {
                let alarms: Vec<Alarm> = serde_json::from_str(&json)
                    .map_err(|e| StoreError::CorruptData(e.to_string()))?;
                let mut store = Self { alarms };
                store.sort();
                Ok(store)
            }
        }
    }

    /// Hardened load: corrupt data degrades to an empty store with a
    /// logged diagnostic instead of a failure.
    pub fn load_or_empty(db: &Database) -> Self {
        match Self::load(db) {
            Ok(store) => store,
            Err(e) => {
                log::warn!("discarding persisted alarms: {e}");
                Self::default()
            }
        }
    }

    /// Re-sort, serialize and persist. Called after every structural
    /// mutation.
    ///
    /// # Errors
    /// Returns an error if encoding or the database write fails.
    pub fn save(&mut self, db: &Database) -> Result<(), StoreError> {
        self.sort();
        let json = serde_json::to_string(&self.alarms).map_err(StoreError::Encode)?;
        db.kv_set(ALARMS_KEY, &json)
    }

    /// Insert an alarm, rejecting duplicates.
    ///
    /// # Errors
    /// `DuplicateAlarm` when an equal alarm (per the duplicate-detection
    /// equality) already exists; the store is left unchanged.
    pub fn add(&mut self, alarm: Alarm) -> Result<(), StoreError> {
        if self.alarms.iter().any(|existing| existing == &alarm) {
            return Err(StoreError::DuplicateAlarm);
        }
        self.alarms.push(alarm);
        self.sort();
        Ok(())
    }

    /// Edit path: swap out the alarm with the given notification id. The
    /// prior record is removed before the duplicate check, so an edit
    /// never collides with its own previous state. Returns the replaced
    /// alarm.
    ///
    /// # Errors
    /// `DuplicateAlarm` when the new configuration equals some *other*
    /// stored alarm; the prior record is restored.
    pub fn replace(&mut self, notification_id: &str, alarm: Alarm) -> Result<Option<Alarm>, StoreError> {
        let old = self.remove(notification_id);
        if let Err(e) = self.add(alarm) {
            if let Some(prior) = old {
                self.alarms.push(prior);
                self.sort();
            }
            return Err(e);
        }
        Ok(old)
    }

    /// Remove by notification id. `None` (not an error) when absent.
    pub fn remove(&mut self, notification_id: &str) -> Option<Alarm> {
        let index = self
            .alarms
            .iter()
            .position(|a| a.notification_id == notification_id)?;
        Some(self.alarms.remove(index))
    }

    /// All alarms in firing order.
    pub fn list(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }

    /// Mutable access for toggling; callers must `save` afterwards.
    pub fn alarm_mut(&mut self, index: usize) -> Option<&mut Alarm> {
        self.alarms.get_mut(index)
    }

    pub fn list_enabled(&self) -> Vec<&Alarm> {
        self.alarms.iter().filter(|a| a.enabled).collect()
    }

    /// Enabled alarms whose next activation has come due.
    pub fn list_activating(&self, now: DateTime<Local>) -> Vec<&Alarm> {
        self.list_enabled()
            .into_iter()
            .filter(|a| a.next_activate().is_some_and(|next| next < now))
            .collect()
    }

    /// Record a fire on the alarm with the given notification id.
    /// Returns false when no such alarm exists.
    pub fn mark_fired(&mut self, notification_id: &str, at: DateTime<Local>) -> bool {
        match self
            .alarms
            .iter_mut()
            .find(|a| a.notification_id == notification_id)
        {
            Some(alarm) => {
                alarm.mark_fired(at);
                true
            }
            None => false,
        }
    }

    fn sort(&mut self) {
        // Stable, so equal times keep their insertion order.
        self.alarms.sort_by_key(|a| a.minutes_of_day());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::WakeMethod;
    use crate::clock;
    use chrono::Duration;

    const WEEKDAYS: [bool; 7] = [false, true, true, true, true, true, false];

    fn alarm(hour: u32, minute: u32, label: &str) -> Alarm {
        Alarm::new(hour, minute, label, WakeMethod::Factor, 1005, WEEKDAYS)
    }

    #[test]
    fn add_rejects_duplicate_without_mutating() {
        let mut store = AlarmStore::default();
        store.add(alarm(7, 30, "Work")).unwrap();
        let result = store.add(alarm(7, 30, "Work"));
        assert!(matches!(result, Err(StoreError::DuplicateAlarm)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn same_time_different_label_is_not_a_duplicate() {
        let mut store = AlarmStore::default();
        store.add(alarm(7, 30, "Work")).unwrap();
        store.add(alarm(7, 30, "Gym")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn replace_is_exempt_from_its_own_prior_state() {
        let mut store = AlarmStore::default();
        let original = alarm(7, 30, "Work");
        let id = original.notification_id.clone();
        store.add(original).unwrap();

        // Re-saving the identical configuration under the same identity
        // must not count as a duplicate.
        let replaced = store.replace(&id, alarm(7, 30, "Work")).unwrap();
        assert!(replaced.is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_still_rejects_collision_with_other_alarm() {
        let mut store = AlarmStore::default();
        let a = alarm(7, 30, "Work");
        let id_a = a.notification_id.clone();
        store.add(a).unwrap();
        store.add(alarm(9, 0, "Gym")).unwrap();

        let result = store.replace(&id_a, alarm(9, 0, "Gym"));
        assert!(matches!(result, Err(StoreError::DuplicateAlarm)));
        // Prior record restored.
        assert_eq!(store.len(), 2);
        assert!(store.list().iter().any(|x| x.notification_id == id_a));
    }

    #[test]
    fn remove_missing_is_a_noop() {
        let mut store = AlarmStore::default();
        store.add(alarm(7, 30, "Work")).unwrap();
        assert!(store.remove("not-a-real-id").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn save_load_roundtrip_preserves_alarms_and_order() {
        let db = Database::open_memory().unwrap();
        let mut store = AlarmStore::default();
        store.add(alarm(22, 15, "Night")).unwrap();
        store.add(alarm(6, 45, "Early")).unwrap();
        store.add(alarm(12, 0, "Noon")).unwrap();
        store.save(&db).unwrap();

        let loaded = AlarmStore::load(&db).unwrap();
        assert_eq!(loaded.len(), 3);
        for (a, b) in store.list().iter().zip(loaded.list()) {
            assert_eq!(a, b);
            assert_eq!(a.notification_id, b.notification_id);
        }
        let minutes: Vec<u32> = loaded.list().iter().map(Alarm::minutes_of_day).collect();
        assert!(minutes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn corrupt_snapshot_is_an_error_then_degrades_to_empty() {
        let db = Database::open_memory().unwrap();
        db.kv_set(ALARMS_KEY, "{not json").unwrap();

        assert!(matches!(AlarmStore::load(&db), Err(StoreError::CorruptData(_))));
        let store = AlarmStore::load_or_empty(&db);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_snapshot_is_an_empty_store() {
        let db = Database::open_memory().unwrap();
        assert!(AlarmStore::load(&db).unwrap().is_empty());
    }

    #[test]
    fn list_enabled_filters_disabled() {
        let mut store = AlarmStore::default();
        store.add(alarm(7, 30, "Work")).unwrap();
        store.add(alarm(9, 0, "Gym")).unwrap();
        store.alarm_mut(0).unwrap().enabled = false;
        assert_eq!(store.list_enabled().len(), 1);
    }

    #[test]
    fn list_activating_returns_due_alarms_only() {
        let now = clock::now();
        let mut store = AlarmStore::default();

        // Due: last fired a day ago, slot earlier than now.
        let slot = now - Duration::minutes(5);
        let (_, m, _) = clock::hms(slot);
        let mut due = Alarm::new(clock::hms(slot).0, m, "Due", WakeMethod::Factor, 1005, [false; 7]);
        due.last_activate = now - Duration::days(1);
        let due_id = due.notification_id.clone();
        store.add(due).unwrap();

        // Not due: fresh alarm, reference is now so the next slot is ahead.
        let ahead = now + Duration::minutes(90);
        let (_, am, _) = clock::hms(ahead);
        store
            .add(Alarm::new(clock::hms(ahead).0, am, "Ahead", WakeMethod::Factor, 1005, [false; 7]))
            .unwrap();

        let active = store.list_activating(now);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].notification_id, due_id);

        // Firing re-arms past the boundary.
        store.mark_fired(&due_id, now);
        assert!(store.list_activating(now).is_empty());
    }
}
