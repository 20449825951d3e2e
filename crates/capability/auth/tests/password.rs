use iot_auth::{hash_password, verify_password_and_maybe_upgrade};

#[test]
fn argon2_hash_verifies() {
    let hash = hash_password("s3cret").expect("hash");
    let check = verify_password_and_maybe_upgrade(&hash, "s3cret").expect("check");
    assert!(check.verified);
    assert!(check.upgrade_hash.is_none());

    let check = verify_password_and_maybe_upgrade(&hash, "wrong").expect("check");
    assert!(!check.verified);
}

#[test]
fn plaintext_match_yields_upgrade_hash() {
    let check = verify_password_and_maybe_upgrade("s3cret", "s3cret").expect("check");
    assert!(check.verified);
    assert!(
        check
            .upgrade_hash
            .as_deref()
            .unwrap_or_default()
            .starts_with("$argon2")
    );
}

#[test]
fn plaintext_mismatch_rejected() {
    let check = verify_password_and_maybe_upgrade("s3cret", "bad").expect("check");
    assert!(!check.verified);
    assert!(check.upgrade_hash.is_none());
}
