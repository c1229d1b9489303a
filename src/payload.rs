//! Token payload text.
//!
//! The payload is JSON-shaped but written from a fixed template, so the field order
//! and punctuation never depend on a serializer.

/// Version tag written into every payload.
pub const TOKEN_VERSION: &str = "2.0";

/// Values carried by a token payload.
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a> {
    /// User identifier, inserted verbatim
    pub identifier: &'a str,

    /// Application id
    pub sdk_app_id: u32,

    /// Lifetime in seconds
    pub expire: u32,

    /// Issuance time in unix seconds
    pub issued_at: i64,

    /// Base64 signature
    pub signature: &'a str,

    /// Base64 permission buffer, for private map keys
    pub userbuf: Option<&'a str>,
}

impl Payload<'_> {
    /// Render the payload as compact text:
    ///
    /// `{"TLS.ver":"2.0","TLS.identifier":"<id>","TLS.sdkappid":<appid>,"TLS.expire":<expire>,"TLS.time":<time>,"TLS.sig":"<sig>"[,"TLS.userbuf":"<buf>"]}`
    #[must_use]
    pub fn render(&self) -> String {
        let userbuf = self
            .userbuf
            .map(|userbuf| format!(r#","TLS.userbuf":"{userbuf}""#))
            .unwrap_or_default();

        format!(
            r#"{{"TLS.ver":"{TOKEN_VERSION}","TLS.identifier":"{}","TLS.sdkappid":{},"TLS.expire":{},"TLS.time":{},"TLS.sig":"{}"{userbuf}}}"#,
            self.identifier, self.sdk_app_id, self.expire, self.issued_at, self.signature,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(userbuf: Option<&str>) -> Payload<'_> {
        Payload {
            identifier: "test_user",
            sdk_app_id: 1_400_000_000,
            expire: 86_400,
            issued_at: 1_700_000_000,
            signature: "c2ln",
            userbuf,
        }
    }

    #[test]
    fn renders_user_sig_payload() {
        assert_eq!(
            payload(None).render(),
            r#"{"TLS.ver":"2.0","TLS.identifier":"test_user","TLS.sdkappid":1400000000,"TLS.expire":86400,"TLS.time":1700000000,"TLS.sig":"c2ln"}"#
        );
    }

    #[test]
    fn renders_userbuf_last() {
        assert_eq!(
            payload(Some("AAAA")).render(),
            r#"{"TLS.ver":"2.0","TLS.identifier":"test_user","TLS.sdkappid":1400000000,"TLS.expire":86400,"TLS.time":1700000000,"TLS.sig":"c2ln","TLS.userbuf":"AAAA"}"#
        );
    }
}
