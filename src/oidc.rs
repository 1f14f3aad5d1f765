use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::Error;

/// Payload claims of an identity token.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Decode an ID token (JWT) and return the payload claims.
/// This does NOT verify the signature. The claims are for display only;
/// anything that needs to trust them must verify the token server-side.
pub fn decode_id_token(id_token: &str) -> Result<Claims, Error> {
    let payload = id_token.split('.').nth(1).ok_or(Error::InvalidIdToken)?;

    // Strip any padding characters before decoding with URL_SAFE_NO_PAD
    let payload = payload.trim_end_matches('=');

    let decoded = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| Error::InvalidIdToken)?;

    serde_json::from_slice(&decoded).map_err(|_| Error::InvalidIdToken)
}

/// Short name for the account menu: the local part of the `email` claim.
pub fn account_label(claims: &Claims) -> Option<&str> {
    let email = claims.get("email")?.as_str()?;
    email.split('@').next().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b64url(data: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(data)
    }

    /// Build a fake JWT from header and payload JSON strings.
    fn make_jwt(header: &str, payload: &str) -> String {
        format!(
            "{}.{}.fake-signature",
            b64url(header.as_bytes()),
            b64url(payload.as_bytes())
        )
    }

    #[test]
    fn decode_known_jwt() {
        let header = r#"{"alg":"RS256","typ":"JWT"}"#;
        let payload = r#"{"sub":"1234567890","email":"jane@example.com","iat":1516239022}"#;
        let token = make_jwt(header, payload);

        let claims = decode_id_token(&token).unwrap();
        assert_eq!(claims["sub"], "1234567890");
        assert_eq!(claims["email"], "jane@example.com");
        assert_eq!(claims["iat"], 1516239022);
    }

    #[test]
    fn malformed_token_single_segment() {
        assert!(matches!(
            decode_id_token("not-a-jwt"),
            Err(Error::InvalidIdToken)
        ));
    }

    #[test]
    fn invalid_base64_payload() {
        assert!(decode_id_token("header.!!!invalid-base64!!!.signature").is_err());
    }

    #[test]
    fn payload_must_be_a_json_object() {
        let token = format!("h.{}.s", b64url(b"[1,2,3]"));
        assert!(decode_id_token(&token).is_err());

        let token = format!("h.{}.s", b64url(b"this is not json"));
        assert!(decode_id_token(&token).is_err());
    }

    #[test]
    fn token_with_padded_base64() {
        let payload_b64 = b64url(br#"{"sub":"test"}"#);
        let padded = match payload_b64.len() % 4 {
            2 => format!("{payload_b64}=="),
            3 => format!("{payload_b64}="),
            _ => payload_b64,
        };
        let token = format!("{}.{padded}.sig", b64url(br#"{"alg":"none"}"#));

        let claims = decode_id_token(&token).unwrap();
        assert_eq!(claims["sub"], "test");
    }

    #[test]
    fn two_segment_token_no_signature() {
        let token = format!(
            "{}.{}",
            b64url(br#"{"alg":"none"}"#),
            b64url(br#"{"sub":"no-sig"}"#)
        );
        let claims = decode_id_token(&token).unwrap();
        assert_eq!(claims["sub"], "no-sig");
    }

    #[test]
    fn account_label_is_email_local_part() {
        let token = make_jwt("{}", r#"{"email":"maria.perez@example.cl"}"#);
        let claims = decode_id_token(&token).unwrap();
        assert_eq!(account_label(&claims), Some("maria.perez"));
    }

    #[test]
    fn account_label_requires_email() {
        let claims = decode_id_token(&make_jwt("{}", r#"{"sub":"abc"}"#)).unwrap();
        assert_eq!(account_label(&claims), None);

        let claims = decode_id_token(&make_jwt("{}", r#"{"email":42}"#)).unwrap();
        assert_eq!(account_label(&claims), None);

        let claims = decode_id_token(&make_jwt("{}", r#"{"email":"@example.com"}"#)).unwrap();
        assert_eq!(account_label(&claims), None);
    }
}
