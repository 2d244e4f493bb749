use std::sync::Arc;

use anyhow::Context;
use elector_logic::{NotificationPrefs, prelude::Result};
use tauri::{AppHandle, Wry};
use tauri_plugin_store::{Store, StoreExt};

const STORE_NAME: &str = "settings";

const KEY_ONBOARDED: &str = "isOnboarded";
const KEY_LOGGED_IN: &str = "isLoggedIn";
const KEY_EMAIL: &str = "userEmail";
const KEY_NOTIFICATION_PREFS: &str = "notificationPrefs";

/// The persisted app flags, all default-off for a fresh install.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoredFlags {
    pub is_onboarded: bool,
    pub is_logged_in: bool,
    pub email: String,
}

fn get_store(app: &AppHandle) -> Result<Arc<Store<Wry>>> {
    app.store(STORE_NAME)
        .context("Failed to open the settings store")
}

pub fn read_flags(app: &AppHandle) -> Result<StoredFlags> {
    let store = get_store(app)?;

    let flag = |key: &str| {
        store
            .get(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    };

    let flags = StoredFlags {
        is_onboarded: flag(KEY_ONBOARDED),
        is_logged_in: flag(KEY_LOGGED_IN),
        email: store
            .get(KEY_EMAIL)
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
    };

    store.close_resource();

    Ok(flags)
}

pub fn write_onboarded(app: &AppHandle, onboarded: bool) -> Result {
    get_store(app)?.set(KEY_ONBOARDED, onboarded);
    Ok(())
}

/// Persist a login (`Some(email)`) or a logout (`None`).
pub fn write_login(app: &AppHandle, email: Option<&str>) -> Result {
    let store = get_store(app)?;
    store.set(KEY_LOGGED_IN, email.is_some());
    store.set(KEY_EMAIL, email.unwrap_or_default());
    Ok(())
}

pub fn read_notification_prefs(app: &AppHandle) -> Result<NotificationPrefs> {
    let store = get_store(app)?;

    let prefs = store
        .get(KEY_NOTIFICATION_PREFS)
        .and_then(|v| serde_json::from_value::<NotificationPrefs>(v).ok())
        .unwrap_or_default();

    store.close_resource();

    Ok(prefs)
}

pub fn write_notification_prefs(app: &AppHandle, prefs: NotificationPrefs) -> Result {
    let value = serde_json::to_value(prefs).context("Failed to serialize")?;
    get_store(app)?.set(KEY_NOTIFICATION_PREFS, value);
    Ok(())
}
