#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore, broadcast};

use landscape_core::{
    CatalogSnapshot, GameConfig, ItemDefinition, PlaceableCategory, Quantity, SaveCredentials,
    SaveReceipt, SaveRequest, Timestamp,
};
use landscape_runtime::{
    AutosaveEvent, Event, OracleManager, PersistError, PersistenceBackend, SessionEvent,
};

pub fn qty(value: i64) -> Quantity {
    Quantity::new(value, 0)
}

pub fn oracles() -> OracleManager {
    OracleManager::new(
        CatalogSnapshot::new()
            .with(
                ItemDefinition::new("Gnome", PlaceableCategory::Collectible)
                    .with_cost(qty(40))
                    .with_dimensions(1, 1),
            )
            .with(
                ItemDefinition::new("Flamingo", PlaceableCategory::Collectible)
                    .with_ingredient("Block Buck", qty(1))
                    .with_dimensions(1, 2),
            )
            .with(ItemDefinition::new("Tree", PlaceableCategory::Resource).with_dimensions(2, 2)),
        GameConfig::new(),
    )
}

pub fn credentials() -> SaveCredentials {
    SaveCredentials {
        token: "token".to_owned(),
        farm_id: 7,
    }
}

/// Backend that holds every call until the test releases it.
pub struct GatedBackend {
    pub calls: AtomicUsize,
    pub entered: Notify,
    gate: Semaphore,
}

impl GatedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            entered: Notify::new(),
            gate: Semaphore::new(0),
        })
    }

    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PersistenceBackend for GatedBackend {
    async fn save(&self, _: &str, request: SaveRequest) -> Result<SaveReceipt, PersistError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.entered.notify_one();
        self.gate
            .acquire()
            .await
            .map_err(|e| PersistError::Backend(e.to_string()))?
            .forget();
        Ok(SaveReceipt {
            revision: call as u64,
            saved_at: Timestamp::ZERO,
            actions: request.actions.len(),
        })
    }
}

/// Backend that fails the first call and accepts the rest.
#[derive(Default)]
pub struct FlakyBackend {
    pub calls: AtomicUsize,
}

#[async_trait]
impl PersistenceBackend for FlakyBackend {
    async fn save(&self, _: &str, request: SaveRequest) -> Result<SaveReceipt, PersistError> {
        match self.calls.fetch_add(1, Ordering::SeqCst) {
            0 => Err(PersistError::Backend("offline".to_owned())),
            n => Ok(SaveReceipt {
                revision: n as u64,
                saved_at: Timestamp::ZERO,
                actions: request.actions.len(),
            }),
        }
    }
}

/// Backend that never answers.
pub struct StalledBackend;

#[async_trait]
impl PersistenceBackend for StalledBackend {
    async fn save(&self, _: &str, _: SaveRequest) -> Result<SaveReceipt, PersistError> {
        std::future::pending().await
    }
}

pub async fn next_autosave(rx: &mut broadcast::Receiver<Event>) -> AutosaveEvent {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Event::Autosave(event) = rx.recv().await.unwrap() {
                return event;
            }
        }
    })
    .await
    .expect("autosave event within 5s")
}

pub async fn next_session(rx: &mut broadcast::Receiver<Event>) -> SessionEvent {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Event::Session(event) = rx.recv().await.unwrap() {
                return event;
            }
        }
    })
    .await
    .expect("session event within 5s")
}
