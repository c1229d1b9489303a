use std::fmt::Write as _;

use clap::Args;
use jiff::Timestamp;
use tls_sig::{buffer::RoomRef, encoding::TokenClaims};

#[derive(Debug, Args)]
pub(crate) struct InspectArgs {
    /// Token to decode
    token: String,
}

pub(crate) fn execute(args: &InspectArgs) -> Result<String, String> {
    let claims =
        TokenClaims::from_token(&args.token).map_err(|error| format!("invalid token: {error}"))?;

    let user_buf = claims
        .user_buf()
        .map_err(|error| format!("invalid permission buffer: {error}"))?;

    let mut output = String::new();

    // Writing into a String cannot fail.
    _ = writeln!(output, "version: {}", claims.version);
    _ = writeln!(output, "identifier: {}", claims.identifier);
    _ = writeln!(output, "sdk_app_id: {}", claims.sdk_app_id);
    _ = writeln!(output, "issued_at: {}", format_time(claims.issued_at));
    _ = writeln!(output, "expire: {}s", claims.expire);
    _ = writeln!(
        output,
        "expires_at: {}",
        format_time(claims.issued_at + i64::from(claims.expire))
    );
    _ = write!(output, "signature: {}", claims.signature);

    if let Some(user_buf) = user_buf {
        let room = match &user_buf.room {
            RoomRef::Numeric(room_id) => format!("{room_id}"),
            RoomRef::Named(room_name) => format!("{room_name:?}"),
        };

        _ = write!(
            output,
            "\nroom: {room}\nprivilege_map: {}\naccount_type: {}\nbuffer_expires_at: {}",
            user_buf.privilege_map,
            user_buf.account_type,
            format_time(i64::from(user_buf.expires_at)),
        );
    }

    Ok(output)
}

fn format_time(unix_seconds: i64) -> String {
    Timestamp::from_second(unix_seconds)
        .map_or_else(|_out_of_range| unix_seconds.to_string(), |time| time.to_string())
}
