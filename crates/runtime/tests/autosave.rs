mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use landscape_core::{ActionTag, EditingState, SavingState, Selection, WorkflowEvent};
use landscape_runtime::{AutosaveEvent, PersistError, Session, SessionConfig, Topic};

use common::{
    FlakyBackend, GatedBackend, StalledBackend, credentials, next_autosave, oracles,
};

#[tokio::test]
async fn second_save_while_autosaving_is_dropped() {
    let backend = GatedBackend::new();
    let session = Session::builder()
        .oracles(oracles())
        .persistence(backend.clone())
        .build()
        .await
        .unwrap();
    let handle = session.handle();
    let mut autosave = handle.subscribe(Topic::Autosave);

    let first = handle.save(credentials()).await.unwrap();
    assert!(first.handled);
    assert!(first.save_started);

    let second = handle.save(credentials()).await.unwrap();
    assert!(!second.handled);
    assert!(!second.save_started);

    backend.entered.notified().await;
    assert_eq!(handle.machine().saving, SavingState::Autosaving);

    backend.release();
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Started { .. }
    ));
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Saved(_)
    ));

    let mut view = handle.observe();
    view.wait_for(|view| view.machine.saving == SavingState::Idle)
        .await
        .unwrap();
    assert_eq!(backend.calls(), 1);

    // Idle again, so the next save goes through.
    let third = handle.save(credentials()).await.unwrap();
    assert!(third.save_started);
    backend.release();
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Started { .. }
    ));
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Saved(_)
    ));
    assert_eq!(backend.calls(), 2);

    drop(handle);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn cancel_while_saving_and_dragging_ends_both_regions() {
    let backend = GatedBackend::new();
    let session = Session::builder()
        .oracles(oracles())
        .persistence(backend.clone())
        .build()
        .await
        .unwrap();
    let handle = session.handle();
    let mut autosave = handle.subscribe(Topic::Autosave);

    handle
        .dispatch(WorkflowEvent::Select(Selection::new(
            "Gnome",
            ActionTag::Place,
        )))
        .await
        .unwrap();
    handle.dispatch(WorkflowEvent::Drag).await.unwrap();
    handle.save(credentials()).await.unwrap();
    backend.entered.notified().await;

    let machine = handle.machine();
    assert_eq!(machine.saving, SavingState::Autosaving);
    assert_eq!(machine.editing, EditingState::Dragging);

    let cancelled = handle.dispatch(WorkflowEvent::Cancel).await.unwrap();
    assert!(cancelled.handled);
    let machine = handle.machine();
    assert_eq!(machine.saving, SavingState::Done);
    assert_eq!(machine.editing, EditingState::Done);

    let drag = handle.dispatch(WorkflowEvent::Drag).await.unwrap();
    assert!(!drag.handled);
    let save = handle.save(credentials()).await.unwrap();
    assert!(!save.handled);
    assert!(!save.save_started);
    assert!(handle.machine().is_done());

    // The call already in flight still completes and is reported.
    backend.release();
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Started { .. }
    ));
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Saved(_)
    ));
    assert_eq!(backend.calls(), 1);
    assert!(handle.machine().is_done());

    drop(handle);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn failed_save_is_retryable() {
    let backend = Arc::new(FlakyBackend::default());
    let session = Session::builder()
        .oracles(oracles())
        .persistence(backend.clone())
        .build()
        .await
        .unwrap();
    let handle = session.handle();
    let mut autosave = handle.subscribe(Topic::Autosave);

    assert!(handle.save(credentials()).await.unwrap().save_started);
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Started { .. }
    ));
    match next_autosave(&mut autosave).await {
        AutosaveEvent::Failed { reason } => assert!(reason.contains("offline"), "{reason}"),
        other => panic!("expected failure, got {other:?}"),
    }

    let mut view = handle.observe();
    view.wait_for(|view| view.machine.saving == SavingState::Idle)
        .await
        .unwrap();

    assert!(handle.save(credentials()).await.unwrap().save_started);
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Started { .. }
    ));
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Saved(_)
    ));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);

    drop(handle);
    session.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn timeout_fails_the_save() {
    let session = Session::builder()
        .oracles(oracles())
        .persistence(Arc::new(StalledBackend))
        .config(SessionConfig {
            autosave_timeout_ms: Some(50),
            ..SessionConfig::default()
        })
        .build()
        .await
        .unwrap();
    let handle = session.handle();
    let mut autosave = handle.subscribe(Topic::Autosave);

    handle.save(credentials()).await.unwrap();
    assert!(matches!(
        next_autosave(&mut autosave).await,
        AutosaveEvent::Started { .. }
    ));
    match next_autosave(&mut autosave).await {
        AutosaveEvent::Failed { reason } => {
            assert_eq!(reason, PersistError::Timeout { after_ms: 50 }.to_string());
        }
        other => panic!("expected timeout, got {other:?}"),
    }

    let mut view = handle.observe();
    view.wait_for(|view| view.machine.saving == SavingState::Idle)
        .await
        .unwrap();

    drop(handle);
    session.shutdown().await.unwrap();
}
