//! Identifier lookup proxy core.
//!
//! A lookup takes one identifier (phone number, BIN, IFSC code, Aadhaar
//! number or Instagram handle), validates it, queries the provider bound to its
//! kind, normalizes the provider's answer and inlines declared image URLs.
//! [`Dispatcher::handle`] runs the whole pipeline.

pub mod cipher;
mod client;
mod dedup;
mod dispatch;
mod error;
mod inline;
mod kind;
mod normalize;
mod path;
mod provider;
mod validate;

pub use client::{HttpTransport, Transport, TransportResponse, UpstreamClient};
pub use dedup::dedup_rows;
pub use dispatch::Dispatcher;
pub use error::{
    ConfigError, ErrorKind, LookupError, TransportError, UnknownKind, INTERNAL_ERROR_MESSAGE,
};
pub use inline::{detect_content_type, MediaInliner};
pub use kind::LookupKind;
pub use normalize::normalize;
pub use path::FieldPath;
pub use provider::{
    ErrorBody, ProviderConfig, ProviderTable, Requirement, SuccessCheck, INPUT_SLOT,
};
pub use validate::{rule_for, validate, ValidationRule};

/// Payload on success, taxonomy error otherwise.
pub type CanonicalResult = Result<serde_json::Value, LookupError>;

/// One inbound lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub kind: LookupKind,
    pub raw_input: String,
}

impl LookupRequest {
    pub fn new(kind: LookupKind, raw_input: impl Into<String>) -> Self {
        Self {
            kind,
            raw_input: raw_input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_dispatcher(mock_server: &MockServer) -> Dispatcher {
        let uri = mock_server.uri();
        let providers = ProviderTable::new()
            .with_template(LookupKind::PhoneBasic, format!("{}/api/nex?number={{input}}", uri))
            .unwrap()
            .with_template(LookupKind::PhoneTruecaller, format!("{}/search?phone={{input}}", uri))
            .unwrap()
            .with_template(LookupKind::BankBin, format!("{}/bin/{{input}}", uri))
            .unwrap()
            .with_template(LookupKind::BankIfsc, format!("{}/ifsc/{{input}}", uri))
            .unwrap()
            .with_template(LookupKind::InstagramProfile, format!("{}/user?username={{input}}", uri))
            .unwrap()
            .with_template(LookupKind::InstagramPosts, format!("{}/posts?username={{input}}", uri))
            .unwrap()
            .with_template(
                LookupKind::NationalIdFamily,
                format!("{}/fetch?aadhaar={{input}}&key=fxt", uri),
            )
            .unwrap();

        let transport = HttpTransport::new(Some(Duration::from_secs(5)), "lookup-core-test").unwrap();
        Dispatcher::new(providers, Arc::new(transport))
    }

    #[tokio::test]
    async fn test_family_lookup_with_empty_member_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/fetch"))
            .and(query_param("aadhaar", "123456789012"))
            .and(query_param("key", "fxt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "address": "",
                "rcId": "RC1",
                "memberDetailsList": []
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let result = dispatcher
            .handle(LookupKind::NationalIdFamily, "123456789012")
            .await;

        assert_eq!(
            result.unwrap_err(),
            LookupError::reported(404, "No family details found for this Aadhaar number.")
        );
    }

    #[tokio::test]
    async fn test_short_bin_makes_no_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let result = dispatcher.handle(LookupKind::BankBin, "45717").await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message(), "Please enter a valid 6 to 8-digit BIN.");
    }

    #[tokio::test]
    async fn test_ifsc_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ifsc/SBIN0000691"))
            .respond_with(ResponseTemplate::new(404).set_body_string("\"Not Found\""))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let result = dispatcher.handle(LookupKind::BankIfsc, "SBIN0000691").await;

        assert_eq!(
            result.unwrap_err(),
            LookupError::reported(404, "No data found for this IFSC code.")
        );
    }

    #[tokio::test]
    async fn test_profile_pic_fetch_failure_keeps_url() {
        let mock_server = MockServer::start().await;
        let pic_url = format!("{}/pics/nasa.jpg", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/user"))
            .and(query_param("username", "nasa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "nasa",
                "full_name": "NASA",
                "followers": 97000000,
                "profile_pic": pic_url
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/pics/nasa.jpg"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let payload = dispatcher
            .handle(LookupKind::InstagramProfile, "@nasa")
            .await
            .unwrap();

        assert_eq!(payload["profile_pic"], pic_url.as_str());
        assert_eq!(payload["followers"], 97000000);
    }

    #[tokio::test]
    async fn test_profile_pic_is_inlined() {
        let mock_server = MockServer::start().await;
        let pic_url = format!("{}/pics/nasa.jpg", mock_server.uri());

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "nasa",
                "profile_pic": pic_url
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/pics/nasa.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"jpegbytes".to_vec(), "image/jpeg"))
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let payload = dispatcher
            .handle(LookupKind::InstagramProfile, "nasa")
            .await
            .unwrap();

        assert_eq!(payload["profile_pic"], "data:image/jpeg;base64,anBlZ2J5dGVz");
    }

    #[tokio::test]
    async fn test_posts_thumbnails_only() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        Mock::given(method("GET"))
            .and(path("/posts"))
            .and(query_param("username", "nasa"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "username": "nasa",
                "posts": [
                    {
                        "shortcode": "a1",
                        "thumbnail_url": format!("{}/t/1.jpg", uri),
                        "image_url": format!("{}/full/1.jpg", uri)
                    },
                    {
                        "shortcode": "b2",
                        "thumbnail_url": format!("{}/t/2.jpg", uri),
                        "image_url": format!("{}/full/2.jpg", uri)
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/t/1.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"one".to_vec(), "image/jpeg"))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/t/2.jpg"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/full/1.jpg"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let payload = dispatcher
            .handle(LookupKind::InstagramPosts, "nasa")
            .await
            .unwrap();

        let posts = payload["posts"].as_array().unwrap();
        assert_eq!(posts[0]["shortcode"], "a1");
        assert_eq!(posts[0]["thumbnail_url"], "data:image/jpeg;base64,b25l");
        assert_eq!(posts[0]["image_url"], format!("{}/full/1.jpg", uri));
        assert_eq!(posts[1]["shortcode"], "b2");
        assert_eq!(posts[1]["thumbnail_url"], format!("{}/t/2.jpg", uri));
    }

    #[tokio::test]
    async fn test_truecaller_image_is_inlined() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("phone", "+919876543210"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "name": "Test User",
                    "image": format!("{}/avatar", uri)
                }
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/avatar"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(b"png".to_vec(), "image/png"))
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let payload = dispatcher
            .handle(LookupKind::PhoneTruecaller, "+919876543210")
            .await
            .unwrap();

        assert_eq!(payload["data"]["name"], "Test User");
        assert_eq!(payload["data"]["image"], "data:image/png;base64,cG5n");
    }

    #[tokio::test]
    async fn test_phone_lookup_is_idempotent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/nex"))
            .and(query_param("number", "9876543210"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"name": "A", "mobile": "9876543210"}],
                "credit": "@provider",
                "developer": "someone"
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let dispatcher = create_test_dispatcher(&mock_server);
        let first = dispatcher.handle(LookupKind::PhoneBasic, "9876543210").await;
        let second = dispatcher.handle(LookupKind::PhoneBasic, "9876543210").await;

        assert_eq!(first, second);
        assert_eq!(
            first.unwrap(),
            json!({"data": [{"name": "A", "mobile": "9876543210"}]})
        );
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_internal() {
        let providers = ProviderTable::new()
            .with_template(LookupKind::BankBin, "http://127.0.0.1:1/bin/{input}")
            .unwrap();
        let transport = HttpTransport::new(Some(Duration::from_secs(5)), "lookup-core-test").unwrap();
        let dispatcher = Dispatcher::new(providers, Arc::new(transport));

        let err = dispatcher.handle(LookupKind::BankBin, "457173").await.unwrap_err();
        assert_eq!(err, LookupError::Internal);
        assert_eq!(err.message(), INTERNAL_ERROR_MESSAGE);
    }
}
