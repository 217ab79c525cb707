use super::*;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serializes env mutation across the tests in this module.
fn lock_env() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`lock_env`].
unsafe fn clear_ipmsg_env() {
    unsafe {
        std::env::remove_var("TWILIO_ACCOUNT_SID");
        std::env::remove_var("TWILIO_AUTH_TOKEN");
        std::env::remove_var("IPMSG_BASE_URL");
        std::env::remove_var("IPMSG_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("IPMSG_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = lock_env();
    unsafe {
        clear_ipmsg_env();
        std::env::set_var("TWILIO_ACCOUNT_SID", "AC123");
        std::env::set_var("TWILIO_AUTH_TOKEN", "secret");
    }

    let cfg = IpMsgConfig::from_env().unwrap();
    assert_eq!(cfg.account_sid, "AC123");
    assert_eq!(cfg.auth_token, "secret");
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.timeouts, IpMsgTimeouts::default());

    unsafe { clear_ipmsg_env() };
}

#[test]
fn from_env_parses_overrides() {
    let _guard = lock_env();
    unsafe {
        clear_ipmsg_env();
        std::env::set_var("TWILIO_ACCOUNT_SID", "AC123");
        std::env::set_var("TWILIO_AUTH_TOKEN", "secret");
        std::env::set_var("IPMSG_BASE_URL", "http://127.0.0.1:8080/v1//");
        std::env::set_var("IPMSG_REQUEST_TIMEOUT_SECS", "42");
        std::env::set_var("IPMSG_CONNECT_TIMEOUT_SECS", "7");
    }

    let cfg = IpMsgConfig::from_env().unwrap();
    assert_eq!(cfg.base_url, "http://127.0.0.1:8080/v1");
    assert_eq!(cfg.timeouts, IpMsgTimeouts { request_secs: 42, connect_secs: 7 });

    unsafe { clear_ipmsg_env() };
}

#[test]
fn from_env_bad_timeout_falls_back_to_default() {
    let _guard = lock_env();
    unsafe {
        clear_ipmsg_env();
        std::env::set_var("TWILIO_ACCOUNT_SID", "AC123");
        std::env::set_var("TWILIO_AUTH_TOKEN", "secret");
        std::env::set_var("IPMSG_REQUEST_TIMEOUT_SECS", "soon");
    }

    let cfg = IpMsgConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    unsafe { clear_ipmsg_env() };
}

#[test]
fn from_env_missing_account_sid_errors() {
    let _guard = lock_env();
    unsafe {
        clear_ipmsg_env();
        std::env::set_var("TWILIO_AUTH_TOKEN", "secret");
    }

    let err = IpMsgConfig::from_env().unwrap_err();
    assert!(matches!(err, IpMsgError::MissingCredential { ref var } if var == "TWILIO_ACCOUNT_SID"));

    unsafe { clear_ipmsg_env() };
}

#[test]
fn from_env_empty_auth_token_errors() {
    let _guard = lock_env();
    unsafe {
        clear_ipmsg_env();
        std::env::set_var("TWILIO_ACCOUNT_SID", "AC123");
        std::env::set_var("TWILIO_AUTH_TOKEN", "");
    }

    let err = IpMsgConfig::from_env().unwrap_err().to_string();
    assert!(err.contains("TWILIO_AUTH_TOKEN"));

    unsafe { clear_ipmsg_env() };
}

#[test]
fn normalize_base_url_strips_trailing_slashes() {
    assert_eq!(normalize_base_url("https://example.test/v1/"), "https://example.test/v1");
    assert_eq!(normalize_base_url("https://example.test/v1"), "https://example.test/v1");
}
