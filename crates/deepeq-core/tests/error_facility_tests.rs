use deepeq_core::errors::{DeepEqError, ExError, ExErrorKind};
use deepeq_core::value::Kind;
use deepeq_core::{difference, Handle, Side};
use std::sync::mpsc;

#[test]
fn test_absent_handle_verifiable_by_kind() {
    let err = difference(&1u8, Handle::absent()).unwrap_err();

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidHandle);
    assert_eq!(ex_err.code(), "ERR_INVALID_HANDLE");
    assert_eq!(ex_err.side(), Some(Side::Right));
    assert!(ex_err.message().contains("absent handle"));
}

#[test]
fn test_unsupported_kind_structured_fields() {
    let (tx, _rx) = mpsc::sync_channel::<u8>(1);
    let err = difference(&tx, &tx.clone()).unwrap_err();

    assert!(matches!(
        &err,
        DeepEqError::UnsupportedKind {
            kind: Kind::Chan,
            ..
        }
    ));

    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::UnsupportedKind);
    assert_eq!(ex_err.type_name(), Some("SyncSender<u8>"));
    assert_eq!(ex_err.side(), None);
}

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::InvalidHandle, "ERR_INVALID_HANDLE"),
        (ExErrorKind::UnsupportedKind, "ERR_UNSUPPORTED_KIND"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_display_mentions_side_and_type() {
    let ex_err = ExError::new(ExErrorKind::UnsupportedKind)
        .with_op("side_by_side")
        .with_type_name("fn() -> i32")
        .with_message("not comparable");
    assert_eq!(
        ex_err.to_string(),
        "[ERR_UNSUPPORTED_KIND] in operation 'side_by_side': not comparable (type: fn() -> i32)"
    );

    let ex_err: ExError = DeepEqError::InvalidHandle { side: Side::Left }.into();
    assert_eq!(
        ex_err.to_string(),
        "[ERR_INVALID_HANDLE]: left value is an absent handle (side: left)"
    );
}
