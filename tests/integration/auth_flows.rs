//! End-to-end identity gateway flows against the mock backend.

use supabase_todo::{ApiError, Auth, Credentials};

use crate::common::mock_backend::spawn_backend;

#[tokio::test]
async fn test_sign_up_then_sign_in_yields_user() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());
    let credentials = Credentials::new("a@b.com", "secret123");

    let created = auth
        .sign_up(&credentials)
        .await
        .expect("sign-up with valid credentials succeeds");
    assert_eq!(created.email.as_deref(), Some("a@b.com"));

    let signed_in = auth
        .sign_in(&credentials)
        .await
        .expect("sign-in with the same credentials succeeds");
    assert_eq!(signed_in.id, created.id);
}

#[tokio::test]
async fn test_weak_password_policy_error_unmodified() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());

    let err = auth
        .sign_up(&Credentials::new("a@b.com", "short"))
        .await
        .expect_err("the mock enforces a minimum password length");

    match err {
        ApiError::Provider(provider) => {
            assert_eq!(provider.status, 422);
            assert_eq!(provider.code.as_deref(), Some("weak_password"));
            assert_eq!(
                provider.message,
                "Password should be at least 6 characters."
            );
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_sign_up_rejected() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());
    let credentials = Credentials::new("dup@b.com", "secret123");

    auth.sign_up(&credentials)
        .await
        .expect("first registration succeeds");

    let err = auth
        .sign_up(&credentials)
        .await
        .expect_err("second registration is rejected");

    match err {
        ApiError::Provider(provider) => {
            assert_eq!(provider.code.as_deref(), Some("user_already_exists"));
            assert_eq!(provider.message, "User already registered");
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_password_rejected() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());

    auth.sign_up(&Credentials::new("a@b.com", "secret123"))
        .await
        .expect("registration succeeds");

    let err = auth
        .sign_in(&Credentials::new("a@b.com", "wrong-password"))
        .await
        .expect_err("wrong password is rejected");

    match err {
        ApiError::Provider(provider) => {
            assert_eq!(provider.status, 400);
            assert_eq!(provider.code.as_deref(), Some("invalid_credentials"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_no_session_means_no_user() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());

    assert!(auth.current_user().await.is_none());
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let backend = spawn_backend().await;
    let client = backend.client();
    let auth = Auth::new(client.clone());
    let credentials = Credentials::new("a@b.com", "secret123");

    auth.sign_up(&credentials)
        .await
        .expect("registration succeeds");
    assert!(client.has_session().await, "auto-confirm sign-up signs in");
    assert!(auth.is_authenticated().await);

    let user = auth.current_user().await.expect("session is active");
    assert_eq!(user.email.as_deref(), Some("a@b.com"));

    auth.sign_out().await.expect("sign-out succeeds");
    assert!(!client.has_session().await);
    assert!(auth.current_user().await.is_none());
    assert!(!auth.is_authenticated().await);
    assert_eq!(
        backend.live_token_count(),
        0,
        "the backend session was terminated, not just forgotten locally"
    );
}

/// A rejected logout still returns the error and clears the local
/// session slot; the handle never retains a session the caller asked to
/// terminate.
#[tokio::test]
async fn test_rejected_sign_out_still_clears_session() {
    let backend = spawn_backend().await;
    let client = backend.client();
    let auth = Auth::new(client.clone());

    auth.sign_up(&Credentials::new("a@b.com", "secret123"))
        .await
        .expect("registration succeeds");
    assert!(client.has_session().await);
    backend.revoke_tokens();

    let err = auth
        .sign_out()
        .await
        .expect_err("the backend no longer knows the session");
    match err {
        ApiError::Provider(provider) => {
            assert_eq!(provider.status, 403);
            assert_eq!(provider.code.as_deref(), Some("session_not_found"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    assert!(!client.has_session().await);
    assert!(!auth.is_authenticated().await);
}

/// Same guarantee under a transport fault.
#[tokio::test]
async fn test_sign_out_transport_fault_still_clears_session() {
    let backend = spawn_backend().await;
    let client = backend.client();
    let auth = Auth::new(client.clone());

    auth.sign_up(&Credentials::new("a@b.com", "secret123"))
        .await
        .expect("registration succeeds");
    assert!(client.has_session().await);
    backend.shutdown();

    let err = auth
        .sign_out()
        .await
        .expect_err("no server is listening");
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(!client.has_session().await);
}

#[tokio::test]
async fn test_sign_out_without_session_is_noop() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());

    auth.sign_out()
        .await
        .expect("sign-out with no session is a no-op success");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());
    backend.shutdown();

    let err = auth
        .sign_in(&Credentials::new("a@b.com", "secret123"))
        .await
        .expect_err("no server is listening");
    assert!(matches!(err, ApiError::Transport(_)));
}

/// A transport fault mid-session collapses to None from current_user,
/// same as no session. Never a panic.
#[tokio::test]
async fn test_current_user_collapses_transport_fault() {
    let backend = spawn_backend().await;
    let auth = Auth::new(backend.client());

    auth.sign_up(&Credentials::new("a@b.com", "secret123"))
        .await
        .expect("registration succeeds");
    backend.shutdown();

    assert!(auth.current_user().await.is_none());
    assert!(!auth.is_authenticated().await);
}

#[tokio::test]
async fn test_concurrent_sign_ins_are_independent() {
    let backend = spawn_backend().await;
    let auth_a = Auth::new(backend.client());
    let auth_b = Auth::new(backend.client());

    auth_a
        .sign_up(&Credentials::new("a@b.com", "secret123"))
        .await
        .expect("registration succeeds");
    auth_b
        .sign_up(&Credentials::new("b@b.com", "secret456"))
        .await
        .expect("registration succeeds");

    let creds_a = Credentials::new("a@b.com", "secret123");
    let creds_b = Credentials::new("b@b.com", "secret456");
    let (a, b) = tokio::join!(auth_a.sign_in(&creds_a), auth_b.sign_in(&creds_b),);

    let a = a.expect("first sign-in succeeds");
    let b = b.expect("second sign-in succeeds");
    assert_ne!(a.id, b.id);
}
