use gloo_storage::{LocalStorage, Storage};
use serde::{de::DeserializeOwned, Serialize};

pub const LANGUAGE_KEY: &str = "monastery360.language";

pub fn save_to_storage<T: Serialize>(key: &str, value: &T) -> Result<(), String> {
    LocalStorage::set(key, value)
        .map_err(|e| format!("Could not write localStorage[{}]: {}", key, e))
}

/// Missing keys and undecodable values both read as `None`.
pub fn load_from_storage<T: DeserializeOwned>(key: &str) -> Option<T> {
    LocalStorage::get(key).ok()
}

