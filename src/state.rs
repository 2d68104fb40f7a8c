use crate::{
    config::{RuntimeConfiguration, StoreConfig},
    error::{RegistrarResult, SetupStoreSnafu},
    store::{MemoryStudentStore, PostgresStudentStore, StudentStore},
};
use snafu::ResultExt;
use std::{ops::Deref, sync::Arc};

/// Shared by every handler; the store inside is opened once at startup and closed at shutdown.
#[derive(Clone, Debug)]
pub struct RegistrarState {
    store: Arc<dyn StudentStore>,
}

impl RegistrarState {
    pub async fn new(config: &RuntimeConfiguration) -> RegistrarResult<Self> {
        let store: Arc<dyn StudentStore> = match config.store_config() {
            StoreConfig::Postgres(db_config) => {
                let store = PostgresStudentStore::new(db_config)
                    .await
                    .context(SetupStoreSnafu)?;
                info!("Connected to postgres student store");
                Arc::new(store)
            }
            StoreConfig::Memory => {
                warn!("Using in-memory student store, nothing will persist across restarts");
                Arc::new(MemoryStudentStore::default())
            }
        };

        Ok(Self::from_store(store))
    }

    pub fn from_store(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }

    pub async fn sensible_shutdown(&self) {
        self.store.close().await;
    }
}

impl Deref for RegistrarState {
    type Target = dyn StudentStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref()
    }
}
