use super::*;
use crate::sign;

const SECRET: &str = "s3cret";
const BODY: &[u8] =
    br#"{"action":"opened","repository":{"full_name":"acme/widgets"},"sender":{"login":"alice"}}"#;

#[test]
fn test_valid_request_yields_parsed_delivery() {
    let signature = sign(BODY, SECRET);
    let delivery = WebhookRequest {
        body: BODY,
        signature: Some(&signature),
        event_type: Some("issues"),
        delivery_id: Some("d-1"),
    }
    .authenticate(SECRET)
    .unwrap();

    assert_eq!(delivery.event_type().as_str(), "issues");
    assert_eq!(delivery.event().repository(), "acme/widgets");
    assert_eq!(delivery.event().sender(), "alice");
    assert_eq!(delivery.delivery_id().unwrap().as_str(), "d-1");
}

#[test]
fn test_missing_event_header_defaults_to_event() {
    let signature = sign(BODY, SECRET);
    let delivery = WebhookRequest {
        body: BODY,
        signature: Some(&signature),
        event_type: None,
        delivery_id: None,
    }
    .authenticate(SECRET)
    .unwrap();

    assert_eq!(delivery.event_type().as_str(), "event");
    assert!(delivery.delivery_id().is_none());
}

fn push_request(signature: Option<&str>) -> WebhookRequest<'_> {
    WebhookRequest {
        body: BODY,
        signature,
        event_type: Some("push"),
        delivery_id: None,
    }
}

#[test]
fn test_rejections() {
    let signature = sign(BODY, SECRET);

    assert_eq!(
        push_request(Some(&signature)).authenticate("").unwrap_err(),
        Rejection::SecretUnset
    );
    assert_eq!(
        push_request(None).authenticate(SECRET).unwrap_err(),
        Rejection::MissingSignature
    );
    assert_eq!(
        push_request(Some("sha256=00")).authenticate(SECRET).unwrap_err(),
        Rejection::SignatureMismatch
    );
}

#[test]
fn test_signed_non_object_body_is_accepted_with_defaults() {
    let body = b"[]";
    let signature = sign(body, SECRET);
    let delivery = WebhookRequest {
        body,
        signature: Some(&signature),
        event_type: Some("ping"),
        delivery_id: None,
    }
    .authenticate(SECRET)
    .unwrap();

    assert_eq!(delivery.event().repository(), "Unknown Repo");
}
