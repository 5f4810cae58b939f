//! Token persistence.
//!
//! "Remember me" sessions live in `localStorage`; everything else in
//! `sessionStorage` so tokens vanish with the tab. Reads check the durable
//! store first.

use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const REMEMBER_ME_KEY: &str = "remember_me";

/// Minimal key/value surface shared by the browser stores.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl KeyValueStore for web_sys::Storage {
    fn get(&self, key: &str) -> Option<String> {
        self.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if self.set_item(key, value).is_err() {
            log::warn!("storage: failed to write {}", key);
        }
    }

    fn remove(&self, key: &str) {
        let _ = self.remove_item(key);
    }
}

/// Durable and session stores seen as one token vault.
pub struct TokenStore<S: KeyValueStore> {
    durable: S,
    session: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(durable: S, session: S) -> Self {
        Self { durable, session }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.durable
            .get(key)
            .or_else(|| self.session.get(key))
            .filter(|v| !v.is_empty())
    }

    fn target(&self, remember_me: bool) -> (&S, &S) {
        if remember_me {
            (&self.durable, &self.session)
        } else {
            (&self.session, &self.durable)
        }
    }

    pub fn remember_me(&self) -> bool {
        self.read(REMEMBER_ME_KEY).as_deref() == Some("true")
    }

    pub fn access_token(&self) -> Option<String> {
        self.read(ACCESS_TOKEN_KEY)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read(REFRESH_TOKEN_KEY)
    }

    /// Stores a fresh login. Tokens are removed from the other store so a
    /// stale durable session cannot shadow a session-only one.
    pub fn save_login(&self, access: &str, refresh: &str, remember_me: bool) {
        let (target, other) = self.target(remember_me);
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, REMEMBER_ME_KEY] {
            other.remove(key);
        }
        target.set(ACCESS_TOKEN_KEY, access);
        target.set(REFRESH_TOKEN_KEY, refresh);
        target.set(REMEMBER_ME_KEY, if remember_me { "true" } else { "false" });
    }

    /// Stores refreshed tokens in whichever store holds the session.
    pub fn save_refreshed(&self, access: &str, refresh: Option<&str>) {
        let (target, _) = self.target(self.remember_me());
        target.set(ACCESS_TOKEN_KEY, access);
        if let Some(refresh) = refresh {
            target.set(REFRESH_TOKEN_KEY, refresh);
        }
    }

    pub fn clear(&self) {
        for store in [&self.durable, &self.session] {
            for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, REMEMBER_ME_KEY] {
                store.remove(key);
            }
        }
    }
}

fn browser_store() -> Option<TokenStore<web_sys::Storage>> {
    let w = window()?;
    let durable = w.local_storage().ok()??;
    let session = w.session_storage().ok()??;
    Some(TokenStore::new(durable, session))
}

pub fn get_access_token() -> Option<String> {
    browser_store()?.access_token()
}

pub fn get_refresh_token() -> Option<String> {
    browser_store()?.refresh_token()
}

pub fn save_login(access: &str, refresh: &str, remember_me: bool) {
    match browser_store() {
        Some(store) => store.save_login(access, refresh, remember_me),
        None => log::error!("storage: browser storage unavailable, session not persisted"),
    }
}

pub fn save_refreshed(access: &str, refresh: Option<&str>) {
    if let Some(store) = browser_store() {
        store.save_refreshed(access, refresh);
    }
}

/// Clear all authentication tokens
pub fn clear_tokens() {
    if let Some(store) = browser_store() {
        store.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.borrow().get(key).cloned()
        }
        fn set(&self, key: &str, value: &str) {
            self.0.borrow_mut().insert(key.to_string(), value.to_string());
        }
        fn remove(&self, key: &str) {
            self.0.borrow_mut().remove(key);
        }
    }

    fn store() -> TokenStore<MemoryStore> {
        TokenStore::new(MemoryStore::default(), MemoryStore::default())
    }

    #[test]
    fn test_remember_me_uses_durable_store() {
        let s = store();
        s.save_login("a1", "r1", true);
        assert_eq!(s.durable.get(ACCESS_TOKEN_KEY).as_deref(), Some("a1"));
        assert_eq!(s.session.get(ACCESS_TOKEN_KEY), None);
        assert!(s.remember_me());
    }

    #[test]
    fn test_session_login_replaces_durable_tokens() {
        let s = store();
        s.save_login("old", "old-r", true);
        s.save_login("a2", "r2", false);
        assert_eq!(s.durable.get(ACCESS_TOKEN_KEY), None);
        assert_eq!(s.access_token().as_deref(), Some("a2"));
        assert!(!s.remember_me());
    }

    #[test]
    fn test_refresh_keeps_store_and_optional_rotation() {
        let s = store();
        s.save_login("a1", "r1", false);
        s.save_refreshed("a2", None);
        assert_eq!(s.session.get(ACCESS_TOKEN_KEY).as_deref(), Some("a2"));
        assert_eq!(s.refresh_token().as_deref(), Some("r1"));

        s.save_refreshed("a3", Some("r3"));
        assert_eq!(s.refresh_token().as_deref(), Some("r3"));
    }

    #[test]
    fn test_clear_wipes_both_stores() {
        let s = store();
        s.save_login("a1", "r1", true);
        s.session.set(ACCESS_TOKEN_KEY, "stray");
        s.clear();
        assert_eq!(s.access_token(), None);
        assert_eq!(s.refresh_token(), None);
    }
}
