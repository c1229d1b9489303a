//! Integration tests for token issuing

use std::{sync::Arc, thread};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use jiff::Timestamp;
use testresult::TestResult;

use tls_sig::{
    buffer::{RoomRef, UserBuf},
    encoding::{TokenClaims, decode_token},
    prelude::*,
};

const SDK_APP_ID: u32 = 1_400_000_000;
const SECRET: &str = "testsecret";
const ISSUED_AT: i64 = 1_700_000_000;

fn frozen_issuer(reads: usize) -> TestResult<Issuer<MockClock>> {
    let now = Timestamp::from_second(ISSUED_AT)?;

    let mut clock = MockClock::new();
    clock.expect_now().times(reads).return_const(now);

    Ok(Issuer::with_clock(IssuerConfig::new(SDK_APP_ID, SECRET)?, clock))
}

#[test]
fn user_sig_is_deterministic_under_frozen_clock() -> TestResult {
    let issuer = frozen_issuer(2)?;

    let first = issuer.issue_user_sig("test_user", 86_400)?;
    let second = issuer.issue_user_sig("test_user", 86_400)?;

    assert_eq!(first, second, "same inputs and instant must give the same token");

    Ok(())
}

#[test]
fn user_sig_known_vector() -> TestResult {
    let token = frozen_issuer(1)?.issue_user_sig("test_user", 86_400)?;

    assert_eq!(
        decode_token(&token)?,
        r#"{"TLS.ver":"2.0","TLS.identifier":"test_user","TLS.sdkappid":1400000000,"TLS.expire":86400,"TLS.time":1700000000,"TLS.sig":"OwQOZiihYoLjPsCctYDQANffkiSQA9pmeO7hqB20pPg="}"#
    );

    Ok(())
}

#[test]
fn private_map_key_known_vector() -> TestResult {
    let token = frozen_issuer(1)?.issue_private_map_key(
        "test_user",
        86_400,
        1234,
        PrivilegeMap::ALL,
    )?;

    assert_eq!(
        decode_token(&token)?,
        r#"{"TLS.ver":"2.0","TLS.identifier":"test_user","TLS.sdkappid":1400000000,"TLS.expire":86400,"TLS.time":1700000000,"TLS.sig":"AqwilCdoEayqpKqDfHITxSr15489tPC4OKheqcd/qYM=","TLS.userbuf":"AAAJdGVzdF91c2VyU3JOAAAABNJlVUKAAAAA/wAAAAA="}"#
    );

    Ok(())
}

#[test]
fn private_map_key_by_room_name_known_vector() -> TestResult {
    let token = frozen_issuer(1)?.issue_private_map_key_by_room_name(
        "test_user",
        86_400,
        "room-a",
        PrivilegeMap::from_bits(42),
    )?;

    let claims = TokenClaims::from_token(&token)?;

    assert_eq!(claims.signature, "fVywQi7CSGi1ZXHYnm1k1HcB85h2vykW5STln987rF4=");
    assert_eq!(
        claims.userbuf.as_deref(),
        Some("AQAJdGVzdF91c2VyU3JOAAAAAABlVUKAAAAAKgAAAAAABnJvb20tYQ==")
    );

    Ok(())
}

#[test]
fn empty_room_name_issues_numeric_room_zero() -> TestResult {
    let token = frozen_issuer(1)?.issue_private_map_key_by_room_name(
        "test_user",
        86_400,
        "",
        PrivilegeMap::ALL,
    )?;

    let claims = TokenClaims::from_token(&token)?;

    // Same buffer as numeric room 0: kind flag 0x00 and no trailing room name
    assert_eq!(claims.signature, "sAGmVmOJ5SF0ox7JIIIdtq+WNTNlixbK1jcxh2m1tGA=");
    assert_eq!(
        claims.userbuf.as_deref(),
        Some("AAAJdGVzdF91c2VyU3JOAAAAAABlVUKAAAAA/wAAAAA=")
    );
    assert_eq!(
        claims.user_buf()?.map(|user_buf| user_buf.room),
        Some(RoomRef::Numeric(0))
    );

    Ok(())
}

#[test]
fn only_private_map_keys_carry_userbuf() -> TestResult {
    let user_sig = frozen_issuer(1)?.issue_user_sig("test_user", 86_400)?;
    let map_key =
        frozen_issuer(1)?.issue_private_map_key("test_user", 86_400, 7, PrivilegeMap::ALL)?;
    let named = frozen_issuer(1)?.issue_private_map_key_by_room_name(
        "test_user",
        86_400,
        "lobby",
        PrivilegeMap::JOIN_ROOM,
    )?;

    assert!(
        !decode_token(&user_sig)?.contains("TLS.userbuf"),
        "user sig must not carry a userbuf"
    );
    assert!(
        decode_token(&map_key)?.contains("TLS.userbuf"),
        "numeric private map key must carry a userbuf"
    );
    assert!(
        decode_token(&named)?.contains("TLS.userbuf"),
        "named private map key must carry a userbuf"
    );

    Ok(())
}

#[test]
fn embedded_buffer_matches_request() -> TestResult {
    let token = frozen_issuer(1)?.issue_private_map_key_by_room_name(
        "test_user",
        3_600,
        "room-a",
        PrivilegeMap::JOIN_ROOM | PrivilegeMap::RECV_AUDIO,
    )?;

    let claims = TokenClaims::from_token(&token)?;
    let userbuf = claims.userbuf.as_deref().ok_or("missing userbuf")?;
    let decoded = UserBuf::decode(&BASE64.decode(userbuf)?)?;

    assert_eq!(
        decoded,
        UserBuf {
            account: "test_user".to_string(),
            sdk_app_id: SDK_APP_ID,
            room: RoomRef::Named("room-a".to_string()),
            expires_at: 1_700_003_600,
            privilege_map: PrivilegeMap::from_bits(10),
            account_type: 0,
        }
    );

    Ok(())
}

#[test]
fn token_text_is_url_safe() -> TestResult {
    let issuer = Issuer::new(IssuerConfig::new(SDK_APP_ID, SECRET)?);

    for identifier in ["a", "test_user", "another-user_with-a-longer-name"] {
        let token = issuer.issue_private_map_key(
            identifier,
            DEFAULT_EXPIRE_SECONDS,
            99,
            PrivilegeMap::ALL,
        )?;

        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '*' | '-' | '_')),
            "token {token} contains characters outside the URL-safe alphabet"
        );
    }

    Ok(())
}

#[test]
fn default_lifetime_is_180_days() -> TestResult {
    let token = frozen_issuer(1)?.issue_user_sig("test_user", DEFAULT_EXPIRE_SECONDS)?;

    assert_eq!(TokenClaims::from_token(&token)?.expire, 15_552_000);

    Ok(())
}

#[test]
fn different_secrets_sign_differently() -> TestResult {
    let now = Timestamp::from_second(ISSUED_AT)?;

    let mut tokens = Vec::new();
    for secret in ["testsecret", "testsecreu"] {
        let mut clock = MockClock::new();
        clock.expect_now().return_const(now);

        let issuer = Issuer::with_clock(IssuerConfig::new(SDK_APP_ID, secret)?, clock);
        tokens.push(TokenClaims::from_token(&issuer.issue_user_sig("test_user", 60)?)?);
    }

    assert_ne!(
        tokens.first().map(|claims| &claims.signature),
        tokens.last().map(|claims| &claims.signature),
        "a one-byte change in the secret must change the signature"
    );

    Ok(())
}

#[test]
fn rejects_unencodable_inputs() -> TestResult {
    let long_identifier = "a".repeat(70_000);

    assert!(matches!(
        frozen_issuer(1)?.issue_private_map_key(&long_identifier, 60, 1, PrivilegeMap::ALL),
        Err(TokenError::FieldTooLong { field: "account", .. })
    ));
    assert!(matches!(
        frozen_issuer(1)?.issue_private_map_key_by_room_name(
            "test_user",
            60,
            "salle-été",
            PrivilegeMap::ALL
        ),
        Err(TokenError::NonAsciiField { field: "room name" })
    ));

    Ok(())
}

#[test]
fn empty_secret_fails_at_construction() {
    assert!(matches!(
        IssuerConfig::new(SDK_APP_ID, ""),
        Err(ConfigError::EmptySecret)
    ));
}

#[test]
fn issuer_is_shareable_across_threads() -> TestResult {
    let issuer = Arc::new(Issuer::new(IssuerConfig::new(SDK_APP_ID, SECRET)?));

    let handles: Vec<_> = (0..4_u32)
        .map(|room_id| {
            let issuer = Arc::clone(&issuer);
            thread::spawn(move || {
                issuer.issue_private_map_key("test_user", 60, room_id, PrivilegeMap::ALL)
            })
        })
        .collect();

    for (room_id, handle) in (0..4_u32).zip(handles) {
        let token = handle.join().map_err(|_panic| "issuing thread panicked")??;
        let user_buf = TokenClaims::from_token(&token)?
            .user_buf()?
            .ok_or("missing userbuf")?;

        assert_eq!(user_buf.room, RoomRef::Numeric(room_id));
    }

    Ok(())
}
