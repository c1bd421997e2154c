use crate::api::client::{DataQuery, LoginResponse};
use crate::store::error::StoreError;
use crate::store::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const DEVICE_ID_KEY: &str = "deviceId";

/// The authenticated session the dashboard needs before it may poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: Option<String>,
    pub device_id: Option<String>,
}

impl Session {
    /// Reads the session from `store`. Returns `None` when no token is stored; an empty token
    /// counts as missing.
    pub fn load(store: &impl KeyValueStore) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty())?;
        Some(Self {
            token,
            user_id: store.get(USER_ID_KEY),
            device_id: store.get(DEVICE_ID_KEY),
        })
    }

    /// Writes every field; `None` identifiers are removed from the store.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(TOKEN_KEY, &self.token)?;
        match &self.user_id {
            Some(user_id) => store.set(USER_ID_KEY, user_id)?,
            None => store.remove(USER_ID_KEY)?,
        }
        match &self.device_id {
            Some(device_id) => store.set(DEVICE_ID_KEY, device_id)?,
            None => store.remove(DEVICE_ID_KEY)?,
        }
        Ok(())
    }

    /// Forgets the session (logout).
    pub fn clear(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.remove(TOKEN_KEY)?;
        store.remove(USER_ID_KEY)?;
        store.remove(DEVICE_ID_KEY)
    }

    /// Builds a session from a login answer, keeping a previously selected device.
    pub fn from_login(response: LoginResponse, device_id: Option<String>) -> Self {
        Self {
            token: response.token,
            user_id: response.user_id,
            device_id,
        }
    }

    pub fn data_query(&self) -> DataQuery {
        DataQuery {
            user_id: self.user_id.clone(),
            device_id: self.device_id.clone(),
        }
    }
}
