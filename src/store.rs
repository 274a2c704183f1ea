//! The shared configuration store.
//!
//! [`SharedConfigStore`] owns one [`ReactiveCell`] per field. It is a cheap
//! handle: clone it and pass the clone to every collaborator that needs the
//! configuration, instead of reaching for a global.

use tracing::debug;

use crate::{
    cell::{ReactiveCell, Subscription},
    error::ConfigError,
    field::{Field, FieldValue},
    state::{ConfigState, Preset},
};

/// Backend URL, results window and origins toggle, each independently
/// observable. Clones share the same cells.
#[derive(Debug, Clone)]
pub struct SharedConfigStore {
    preset: Preset,
    backend_url: ReactiveCell<String>,
    time_span_minutes: ReactiveCell<i64>,
    show_origins: ReactiveCell<bool>,
}

impl Default for SharedConfigStore {
    fn default() -> Self {
        Self::with_preset(Preset::default())
    }
}

impl SharedConfigStore {
    /// Store holding the blank preset's defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `preset`'s defaults; [`reset`](Self::reset) returns here.
    pub fn with_preset(preset: Preset) -> Self {
        let state = preset.state();
        debug!(%preset, backend_url = %state.backend_url, "config store created");
        Self {
            preset,
            backend_url: ReactiveCell::new(state.backend_url),
            time_span_minutes: ReactiveCell::new(state.time_span_minutes),
            show_origins: ReactiveCell::new(state.show_origins),
        }
    }

    /// Preset the store was created from.
    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Cell behind `backendUrl`, for typed subscriptions.
    pub fn backend_url(&self) -> &ReactiveCell<String> {
        &self.backend_url
    }

    /// Cell behind `timeSpanMinutes`.
    pub fn time_span_minutes(&self) -> &ReactiveCell<i64> {
        &self.time_span_minutes
    }

    /// Cell behind `showOrigins`.
    pub fn show_origins(&self) -> &ReactiveCell<bool> {
        &self.show_origins
    }

    /// Current backend URL, possibly empty.
    pub fn get_backend_url(&self) -> String {
        self.backend_url.get()
    }

    /// Current results window in minutes.
    pub fn get_time_span_minutes(&self) -> i64 {
        self.time_span_minutes.get()
    }

    /// Whether origins are currently shown.
    pub fn get_show_origins(&self) -> bool {
        self.show_origins.get()
    }

    /// Replaces the backend URL; any string is accepted.
    pub fn set_backend_url(&self, url: impl Into<String>) {
        let url = url.into();
        debug!(field = %Field::BackendUrl, value = %url, "set");
        self.backend_url.set(url);
    }

    /// Replaces the results window; zero and negative values are accepted.
    pub fn set_time_span_minutes(&self, minutes: i64) {
        debug!(field = %Field::TimeSpanMinutes, value = minutes, "set");
        self.time_span_minutes.set(minutes);
    }

    /// Shows or hides the origins column.
    pub fn set_show_origins(&self, show: bool) {
        debug!(field = %Field::ShowOrigins, value = show, "set");
        self.show_origins.set(show);
    }

    /// Reads any field as a [`FieldValue`].
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::BackendUrl => FieldValue::Text(self.get_backend_url()),
            Field::TimeSpanMinutes => FieldValue::Integer(self.get_time_span_minutes()),
            Field::ShowOrigins => FieldValue::Flag(self.get_show_origins()),
        }
    }

    /// Writes any field from a [`FieldValue`].
    ///
    /// The only failure is a value whose type does not match the field; the
    /// store is left untouched and nobody is notified in that case.
    pub fn set(&self, field: Field, value: impl Into<FieldValue>) -> Result<(), ConfigError> {
        match (field, value.into()) {
            (Field::BackendUrl, FieldValue::Text(url)) => self.set_backend_url(url),
            (Field::TimeSpanMinutes, FieldValue::Integer(minutes)) => {
                self.set_time_span_minutes(minutes)
            }
            (Field::ShowOrigins, FieldValue::Flag(show)) => self.set_show_origins(show),
            (field, value) => {
                return Err(ConfigError::TypeMismatch {
                    field,
                    expected: field.kind(),
                    found: value.kind(),
                });
            }
        }
        Ok(())
    }

    /// Subscribes to any field, receiving values as [`FieldValue`]s.
    pub fn subscribe(
        &self,
        field: Field,
        mut callback: impl FnMut(&FieldValue) + 'static,
    ) -> Subscription {
        match field {
            Field::BackendUrl => self
                .backend_url
                .subscribe(move |url| callback(&FieldValue::Text(url.clone()))),
            Field::TimeSpanMinutes => self
                .time_span_minutes
                .subscribe(move |minutes| callback(&FieldValue::Integer(*minutes))),
            Field::ShowOrigins => self
                .show_origins
                .subscribe(move |show| callback(&FieldValue::Flag(*show))),
        }
    }

    /// Number of subscribers registered on `field`.
    pub fn subscriber_count(&self, field: Field) -> usize {
        match field {
            Field::BackendUrl => self.backend_url.subscriber_count(),
            Field::TimeSpanMinutes => self.time_span_minutes.subscriber_count(),
            Field::ShowOrigins => self.show_origins.subscriber_count(),
        }
    }

    /// Copies every current value into a plain [`ConfigState`].
    pub fn snapshot(&self) -> ConfigState {
        ConfigState {
            backend_url: self.get_backend_url(),
            time_span_minutes: self.get_time_span_minutes(),
            show_origins: self.get_show_origins(),
        }
    }

    /// Writes every default of the store's preset back, notifying subscribers.
    pub fn reset(&self) {
        let defaults = self.preset.state();
        debug!(preset = %self.preset, "reset to defaults");
        self.set_backend_url(defaults.backend_url);
        self.set_time_span_minutes(defaults.time_span_minutes);
        self.set_show_origins(defaults.show_origins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_defaults() {
        let store = SharedConfigStore::new();
        assert_eq!(store.get(Field::BackendUrl), FieldValue::Text(String::new()));
        assert_eq!(store.get(Field::TimeSpanMinutes), FieldValue::Integer(60));
        assert_eq!(store.get(Field::ShowOrigins), FieldValue::Flag(true));

        let hosted = SharedConfigStore::with_preset(Preset::Hosted);
        assert_eq!(hosted.get_backend_url(), "http://localhost:8000");
    }

    #[test]
    fn test_set_then_get() {
        let store = SharedConfigStore::new();
        store.set(Field::ShowOrigins, false).unwrap();
        assert_eq!(store.get(Field::ShowOrigins), FieldValue::Flag(false));

        store.set(Field::TimeSpanMinutes, -1i64).unwrap();
        assert_eq!(store.get_time_span_minutes(), -1);

        store.set(Field::BackendUrl, "::garbage::").unwrap();
        assert_eq!(store.get_backend_url(), "::garbage::");
    }

    #[test]
    fn test_type_mismatch_leaves_value_alone() {
        let store = SharedConfigStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = store.subscribe(Field::TimeSpanMinutes, move |_| *counter.borrow_mut() += 1);

        let err = store.set(Field::TimeSpanMinutes, "90").unwrap_err();
        assert_eq!(
            err,
            ConfigError::TypeMismatch {
                field: Field::TimeSpanMinutes,
                expected: crate::field::ValueKind::Integer,
                found: crate::field::ValueKind::Text,
            }
        );
        assert_eq!(store.get_time_span_minutes(), 60);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_dynamic_subscribe_sees_typed_writes() {
        let store = SharedConfigStore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(Field::BackendUrl, move |value| {
            sink.borrow_mut().push(value.clone())
        });

        store.set_backend_url("http://example:8000");
        assert_eq!(
            *seen.borrow(),
            vec![
                FieldValue::Text(String::new()),
                FieldValue::Text("http://example:8000".to_string()),
            ]
        );
    }

    #[test]
    fn test_fields_notify_independently() {
        let store = SharedConfigStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let _sub = store.subscribe(Field::ShowOrigins, move |_| *counter.borrow_mut() += 1);

        store.set_backend_url("http://a");
        store.set_time_span_minutes(5);
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let store = SharedConfigStore::new();
        let other = store.clone();
        other.set_time_span_minutes(15);
        assert_eq!(store.get_time_span_minutes(), 15);
    }

    #[test]
    fn test_reset_restores_preset_and_notifies() {
        let store = SharedConfigStore::with_preset(Preset::Hosted);
        store.set_backend_url("http://elsewhere");
        store.set_show_origins(false);

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = store.subscribe(Field::BackendUrl, move |value| {
            sink.borrow_mut().push(value.clone())
        });

        store.reset();
        assert_eq!(store.snapshot(), Preset::Hosted.state());
        assert_eq!(
            seen.borrow().last(),
            Some(&FieldValue::Text("http://localhost:8000".to_string()))
        );
    }
}
