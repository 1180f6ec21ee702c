//! Keeps the external notification registry in step with the alarm store.
//!
//! The store is the source of truth; every mutation is mirrored here so
//! the platform's pending notifications always match the stored list. The
//! sink behind [`Notifier`] is platform-specific and injected by the host.

use chrono::{DateTime, Local, Utc};

use crate::alarm::Alarm;
use crate::events::Event;

/// Platform notification sink. Registrations are keyed by the alarm's
/// notification id; scheduling an id that is already registered replaces
/// the pending request.
pub trait Notifier {
    fn schedule(&mut self, id: &str, fire_at: DateTime<Local>, summary: &str);
    fn cancel(&mut self, id: &str);
}

/// Mirror an insertion. Disabled alarms and never-firing recurrences get
/// no registration.
pub fn on_add(notifier: &mut dyn Notifier, alarm: &Alarm) -> Option<Event> {
    if !alarm.enabled {
        return None;
    }
    let fire_at = alarm.next_activate()?;
    let summary = alarm.summary();
    log::debug!("scheduling {} for {fire_at}", alarm.notification_id);
    notifier.schedule(&alarm.notification_id, fire_at, &summary);
    Some(Event::NotificationScheduled {
        id: alarm.notification_id.clone(),
        fire_at,
        summary,
        at: Utc::now(),
    })
}

/// Mirror an edit: drop the old registration, register the new state.
pub fn on_edit(notifier: &mut dyn Notifier, old_id: &str, alarm: &Alarm) -> Vec<Event> {
    let mut events = vec![on_remove(notifier, old_id)];
    events.extend(on_add(notifier, alarm));
    events
}

/// Mirror a removal or a disable.
pub fn on_remove(notifier: &mut dyn Notifier, id: &str) -> Event {
    log::debug!("cancelling {id}");
    notifier.cancel(id);
    Event::NotificationCancelled {
        id: id.to_string(),
        at: Utc::now(),
    }
}

/// Mirror a fire: the spent registration is gone, so re-register the next
/// occurrence for alarms that stay enabled. One-time alarms disabled
/// themselves in `mark_fired` and fall out here.
pub fn on_fired(notifier: &mut dyn Notifier, alarm: &Alarm) -> Vec<Event> {
    let mut events = vec![Event::AlarmFired {
        id: alarm.notification_id.clone(),
        summary: alarm.summary(),
        at: Utc::now(),
    }];
    events.extend(on_add(notifier, alarm));
    events
}
