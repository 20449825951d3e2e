use domain::{Decision, Operation, Principal, authorize};

#[test]
fn principal_builds() {
    let principal = Principal::new(7, false);
    assert_eq!(principal.user_id, 7);
    assert!(!principal.is_superuser);
    assert_eq!(Principal::superuser(1), Principal::new(1, true));
}

#[test]
fn owner_is_allowed() {
    let owner = Principal::user(7);
    for op in [Operation::Read, Operation::Write] {
        assert_eq!(authorize(&owner, 7, op), Decision::Allow);
    }
}

#[test]
fn stranger_is_denied() {
    let stranger = Principal::user(8);
    for op in [Operation::Read, Operation::Write] {
        assert_eq!(authorize(&stranger, 7, op), Decision::Deny);
    }
}

#[test]
fn superuser_is_allowed_on_foreign_resource() {
    let admin = Principal::superuser(1);
    for op in [Operation::Read, Operation::Write] {
        assert!(authorize(&admin, 7, op).is_allowed());
    }
}

#[test]
fn decision_matches_rule_for_all_combinations() {
    for user_id in 0..4_i64 {
        for owner_id in 0..4_i64 {
            for is_superuser in [false, true] {
                let principal = Principal::new(user_id, is_superuser);
                let expected = is_superuser || user_id == owner_id;
                assert_eq!(
                    authorize(&principal, owner_id, Operation::Read).is_allowed(),
                    expected
                );
                assert_eq!(
                    authorize(&principal, owner_id, Operation::Write),
                    authorize(&principal, owner_id, Operation::Read)
                );
            }
        }
    }
}
