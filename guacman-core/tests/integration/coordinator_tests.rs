//! Admin view coordinator behaviour against scripted services

use std::sync::Arc;
use std::time::Duration;

use guacman_core::{ApiError, LoadState, ObjectPermissionType, ROOT_IDENTIFIER, User, ViewError};
use tokio::sync::oneshot;

use super::fakes::{
    FakeAdmin, FakeSurface, coordinator, loaded, sample_protocols, sample_tree, usernames, users,
};

/// Lets spawned tasks on the current-thread runtime make progress
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

/// Permission signal controlled by the test
fn permission_signal() -> (oneshot::Sender<()>, impl Future<Output = ()> + Send + 'static) {
    let (tx, rx) = oneshot::channel::<()>();
    (tx, async move {
        let _ = rx.await;
    })
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "Internal Server Error".into(),
    }
}

#[tokio::test]
async fn fresh_view_is_loading_and_empty() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = coordinator(&admin, &surface);

    let state = coordinator.snapshot();
    assert!(state.is_loading_connections());
    assert!(state.is_loading_users());
    assert!(state.protocols_state().is_loading());
    assert!(state.root_group().is_none());
    assert!(state.users().is_empty());
    assert!(state.protocols().is_empty());
    assert_eq!(state.new_username(), "");

    settle().await;
    assert!(admin.tree_requests.lock().unwrap().is_empty());
    assert_eq!(admin.protocols.calls(), 0);
}

#[tokio::test]
async fn fetches_wait_for_basic_permissions() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    admin.tree.ready(Ok(sample_tree()));
    admin.users.ready(Ok(users(&["alice"])));
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    let (permissions, signal) = permission_signal();
    assert!(coordinator.initialize(signal));

    // Protocols do not depend on the permission signal
    let state = coordinator
        .wait_for(|s| s.protocols_state().is_loaded())
        .await
        .unwrap();
    assert_eq!(state.protocols().len(), 2);

    settle().await;
    assert!(admin.tree_requests.lock().unwrap().is_empty());
    assert!(admin.user_requests.lock().unwrap().is_empty());
    assert!(coordinator.snapshot().is_loading_connections());
    assert!(coordinator.snapshot().is_loading_users());

    permissions.send(()).unwrap();
    let state = coordinator.wait_until_loaded().await.unwrap();

    assert_eq!(
        *admin.tree_requests.lock().unwrap(),
        vec![(ROOT_IDENTIFIER.to_string(), ObjectPermissionType::Update)]
    );
    assert_eq!(
        *admin.user_requests.lock().unwrap(),
        vec![ObjectPermissionType::Update]
    );
    assert_eq!(state.root_group(), Some(&sample_tree()));
    assert_eq!(usernames(&coordinator), vec!["alice"]);
}

#[tokio::test]
async fn unresolved_permissions_keep_both_loads_pending() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::pending());

    coordinator
        .wait_for(|s| s.protocols_state().is_loaded())
        .await
        .unwrap();
    settle().await;

    let state = coordinator.snapshot();
    assert!(state.is_loading_connections());
    assert!(state.is_loading_users());
    assert_eq!(admin.tree.calls(), 0);
    assert_eq!(admin.users.calls(), 0);
}

#[tokio::test]
async fn tree_settles_before_users() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let tree = admin.tree.pending();
    let user_list = admin.users.pending();
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    settle().await;

    tree.send(Ok(sample_tree())).unwrap();
    let state = coordinator
        .wait_for(|s| !s.is_loading_connections())
        .await
        .unwrap();
    assert!(state.connections_state().is_loaded());
    assert!(state.is_loading_users());
    assert!(!state.is_loaded());

    user_list.send(Ok(users(&["alice", "bob"]))).unwrap();
    let state = coordinator.wait_until_loaded().await.unwrap();
    assert!(state.users_state().is_loaded());
    assert_eq!(state.users().len(), 2);
}

#[tokio::test]
async fn users_settle_before_tree() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let tree = admin.tree.pending();
    let user_list = admin.users.pending();
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    settle().await;

    user_list.send(Ok(users(&["alice"]))).unwrap();
    let state = coordinator
        .wait_for(|s| !s.is_loading_users())
        .await
        .unwrap();
    assert!(state.is_loading_connections());
    assert!(state.root_group().is_none());
    assert_eq!(state.users().len(), 1);

    tree.send(Ok(sample_tree())).unwrap();
    let state = coordinator.wait_until_loaded().await.unwrap();
    assert_eq!(state.root_group().map(|g| g.connection_count()), Some(2));
}

#[tokio::test]
async fn protocol_failure_does_not_block_other_loads() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    admin.tree.ready(Ok(sample_tree()));
    admin.users.ready(Ok(users(&["alice"])));
    admin.protocols.ready(Err(unavailable()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    let state = coordinator.wait_until_settled().await.unwrap();

    assert!(state.is_loaded());
    assert!(state.protocols_state().is_failed());
    assert!(state.protocols().is_empty());

    admin.protocols.ready(Ok(sample_protocols()));
    assert!(coordinator.retry_protocols());
    let state = coordinator
        .wait_for(|s| s.protocols_state().is_loaded())
        .await
        .unwrap();
    assert!(state.protocols().contains_key("ssh"));
    assert_eq!(admin.protocols.calls(), 2);
}

#[tokio::test]
async fn failed_tree_load_reports_error_and_can_retry() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    admin.tree.ready(Err(unavailable()));
    admin.users.ready(Ok(users(&["alice"])));
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    let state = coordinator.wait_until_settled().await.unwrap();

    assert!(!state.is_loading_connections());
    assert!(state.root_group().is_none());
    let error = state.connections_state().error().unwrap();
    assert!(error.contains("500"), "{error}");
    assert!(state.users_state().is_loaded());

    // Retrying a load that has not failed is a no-op
    assert!(!coordinator.retry_users());

    let tree = admin.tree.pending();
    assert!(coordinator.retry_connections());
    assert!(coordinator.snapshot().is_loading_connections());
    assert!(!coordinator.retry_connections());

    tree.send(Ok(sample_tree())).unwrap();
    let state = coordinator.wait_until_loaded().await.unwrap();
    assert_eq!(state.connections_state(), &LoadState::Loaded);
    assert_eq!(state.root_group(), Some(&sample_tree()));
}

#[tokio::test]
async fn failed_user_load_can_retry() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    admin.tree.ready(Ok(sample_tree()));
    admin.users.ready(Err(ApiError::Transport("connection reset".into())));
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    let state = coordinator.wait_until_settled().await.unwrap();
    assert!(state.users_state().is_failed());
    assert!(state.users().is_empty());

    admin.users.ready(Ok(users(&["alice", "bob"])));
    assert!(coordinator.retry_users());
    coordinator.wait_until_loaded().await.unwrap();
    assert_eq!(usernames(&coordinator), vec!["alice", "bob"]);
}

#[tokio::test]
async fn initialize_twice_is_rejected() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["alice"]).await;

    assert!(!coordinator.initialize(std::future::ready(())));
    settle().await;
    assert_eq!(admin.tree.calls(), 1);
    assert_eq!(admin.users.calls(), 1);
    assert_eq!(admin.protocols.calls(), 1);
}

#[tokio::test]
async fn remove_user_drops_only_the_first_match() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["alice", "bob", "carol"]).await;

    let removed = coordinator.remove_user(&User::new("bob"));
    assert_eq!(removed.map(|u| u.username), Some("bob".to_string()));
    assert_eq!(usernames(&coordinator), vec!["alice", "carol"]);

    assert!(coordinator.remove_user(&User::new("dave")).is_none());
    assert_eq!(usernames(&coordinator), vec!["alice", "carol"]);
}

#[tokio::test]
async fn remove_user_with_duplicates_keeps_later_entries() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["bob", "alice", "bob"]).await;

    coordinator.remove_user(&User::new("bob"));
    assert_eq!(usernames(&coordinator), vec!["alice", "bob"]);
}

#[tokio::test]
async fn new_user_with_empty_input_sends_nothing() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["bob"]).await;

    assert_eq!(coordinator.new_user().await.unwrap(), None);
    assert_eq!(admin.create.calls(), 0);
    assert_eq!(usernames(&coordinator), vec!["bob"]);
}

#[tokio::test]
async fn new_user_clears_input_and_appends_after_confirmation() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["bob"]).await;
    let confirm = admin.create.pending();

    coordinator.set_new_username("alice");
    assert_eq!(coordinator.snapshot().new_username(), "alice");

    let creating = coordinator.new_user();
    tokio::pin!(creating);
    tokio::select! {
        biased;
        _ = &mut creating => panic!("creation finished before the server replied"),
        () = settle() => {}
    }

    // Input is cleared as soon as the request is issued
    let state = coordinator.snapshot();
    assert_eq!(state.new_username(), "");
    assert_eq!(usernames(&coordinator), vec!["bob"]);
    assert_eq!(*admin.created.lock().unwrap(), vec![User::new("alice")]);

    confirm.send(Ok(())).unwrap();
    let created = creating.await.unwrap();
    assert_eq!(created, Some(User::new("alice")));
    assert_eq!(usernames(&coordinator), vec!["bob", "alice"]);
    assert_eq!(admin.create.calls(), 1);
}

#[tokio::test]
async fn failed_creation_restores_username() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["bob"]).await;
    admin.create.ready(Err(ApiError::Status {
        status: 400,
        message: "User already exists".into(),
    }));

    coordinator.set_new_username("bob");
    let err = coordinator.new_user().await.unwrap_err();

    assert!(err.to_string().contains("User already exists"));
    assert_eq!(coordinator.snapshot().new_username(), "bob");
    assert_eq!(usernames(&coordinator), vec!["bob"]);
}

#[tokio::test]
async fn failed_creation_keeps_newer_input() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &[]).await;
    let reply = admin.create.pending();

    coordinator.set_new_username("alice");
    let creating = coordinator.new_user();
    tokio::pin!(creating);
    tokio::select! {
        biased;
        _ = &mut creating => panic!("creation finished before the server replied"),
        () = settle() => {}
    }

    coordinator.set_new_username("carol");
    reply.send(Err(unavailable())).unwrap();
    assert!(creating.await.is_err());
    assert_eq!(coordinator.snapshot().new_username(), "carol");
}

#[tokio::test]
async fn dropped_creation_still_applies_the_reply() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &["bob"]).await;
    let confirm = admin.create.pending();

    coordinator.set_new_username("alice");
    {
        let creating = coordinator.new_user();
        tokio::pin!(creating);
        tokio::select! {
            biased;
            _ = &mut creating => panic!("creation finished before the server replied"),
            () = settle() => {}
        }
    }
    assert_eq!(coordinator.snapshot().new_username(), "");

    confirm.send(Ok(())).unwrap();
    let state = tokio::time::timeout(
        Duration::from_secs(2),
        coordinator.wait_for(|s| s.users().len() == 2),
    )
    .await
    .expect("created user was never appended")
    .unwrap();
    assert_eq!(state.users()[1], User::new("alice"));
}

#[tokio::test]
async fn dropped_failed_creation_still_restores_username() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &[]).await;
    let reply = admin.create.pending();

    coordinator.set_new_username("alice");
    {
        let creating = coordinator.new_user();
        tokio::pin!(creating);
        tokio::select! {
            biased;
            _ = &mut creating => panic!("creation finished before the server replied"),
            () = settle() => {}
        }
    }

    reply.send(Err(unavailable())).unwrap();
    let state = tokio::time::timeout(
        Duration::from_secs(2),
        coordinator.wait_for(|s| s.new_username() == "alice"),
    )
    .await
    .expect("username was never restored")
    .unwrap();
    assert!(state.users().is_empty());
}

#[tokio::test]
async fn shutdown_during_creation_reports_unavailable() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let coordinator = loaded(&admin, &surface, &[]).await;
    let mut reply = admin.create.pending();

    coordinator.set_new_username("alice");
    let creating = coordinator.new_user();
    tokio::pin!(creating);
    tokio::select! {
        biased;
        _ = &mut creating => panic!("creation finished before the server replied"),
        () = settle() => {}
    }

    coordinator.shutdown();
    let err = creating.await.unwrap_err();
    assert!(matches!(err, ApiError::Unavailable(_)));
    tokio::time::timeout(Duration::from_secs(2), reply.closed())
        .await
        .expect("create request was not cancelled");
}

#[tokio::test]
async fn shutdown_wakes_pending_waiters() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let _tree = admin.tree.pending();
    let _user_list = admin.users.pending();
    let _protocols = admin.protocols.pending();

    let coordinator = Arc::new(coordinator(&admin, &surface));
    coordinator.initialize(std::future::ready(()));

    let waiter = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        async move { coordinator.wait_until_loaded().await }
    });
    settle().await;
    assert!(!waiter.is_finished());

    coordinator.shutdown();
    let result = tokio::time::timeout(Duration::from_secs(2), waiter)
        .await
        .expect("waiter was not woken by shutdown")
        .unwrap();
    assert!(matches!(result, Err(ViewError::Closed)));
}

#[tokio::test]
async fn waits_after_shutdown_end_unless_already_satisfied() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let _tree = admin.tree.pending();
    admin.users.ready(Ok(users(&["alice"])));
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    coordinator
        .wait_for(|s| !s.is_loading_users())
        .await
        .unwrap();
    coordinator.shutdown();

    let loaded = tokio::time::timeout(Duration::from_secs(2), coordinator.wait_until_loaded())
        .await
        .expect("wait after shutdown hung");
    assert!(matches!(loaded, Err(ViewError::Closed)));

    let users = coordinator
        .wait_for(|s| !s.is_loading_users())
        .await
        .unwrap();
    assert_eq!(users.users().len(), 1);
}

#[tokio::test]
async fn dropping_the_view_aborts_pending_fetches() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let mut tree = admin.tree.pending();
    let mut user_list = admin.users.pending();
    let mut protocols = admin.protocols.pending();

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    settle().await;
    assert_eq!(admin.tree.calls(), 1);

    drop(coordinator);

    tokio::time::timeout(Duration::from_secs(5), async {
        tree.closed().await;
        user_list.closed().await;
        protocols.closed().await;
    })
    .await
    .expect("in-flight fetches were not cancelled");
}

#[tokio::test]
async fn shutdown_keeps_state_but_stops_loading() {
    let admin = Arc::new(FakeAdmin::default());
    let surface = Arc::new(FakeSurface::default());
    let mut tree = admin.tree.pending();
    admin.users.ready(Ok(users(&["alice"])));
    admin.protocols.ready(Ok(sample_protocols()));

    let coordinator = coordinator(&admin, &surface);
    coordinator.initialize(std::future::ready(()));
    coordinator
        .wait_for(|s| !s.is_loading_users())
        .await
        .unwrap();

    coordinator.shutdown();
    tokio::time::timeout(Duration::from_secs(5), tree.closed())
        .await
        .expect("tree fetch was not cancelled");

    let state = coordinator.snapshot();
    assert!(state.is_loading_connections());
    assert_eq!(state.users().len(), 1);
}
