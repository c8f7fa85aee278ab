use crate::api::NppaApi;
use crate::logger::discard_logger;
use crate::models::{BehaviorCollection, BehaviorType, CertType, RealNameAuthStatus};
use mockito::{mock, Matcher};
use nppa_core::config::model::endpoint::EndpointConfig;
use nppa_core::error::request::RequestError;
use nppa_core::http::context::CallContext;
use nppa_core::http::transport::build_transport;

const ENVELOPE: &str = r#"^\{"data":"[A-Za-z0-9+/]+=*"\}$"#;
const SIGN: &str = "^[0-9a-f]{64}$";

fn endpoint(api: &str) -> EndpointConfig {
    EndpointConfig {
        host: mockito::server_url(),
        api: api.to_string(),
        app_id: "test-app".to_string(),
        secret_key: "00112233445566778899aabbccddeeff".to_string(),
        biz_id: "1101999999".to_string(),
        skip_tls_verify: false,
    }
}

#[tokio::test]
async fn real_name_auth_posts_encrypted_body() {
    let auth_mock = mock("POST", "/idcard/authentication/check")
        .match_header("content-type", "application/json")
        .match_header("appid", "test-app")
        .match_header("bizid", "1101999999")
        .match_header("timestamps", Matcher::Regex("^[0-9]{13}$".to_string()))
        .match_header("sign", Matcher::Regex(SIGN.to_string()))
        .match_body(Matcher::Regex(ENVELOPE.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"errcode":0,"errmsg":"OK","data":{"result":{"status":0,"pi":"1fffbjzos82bs9cnyj1dna7d6d29zg4esnh99u"}}}"#)
        .create();

    let config = endpoint("/idcard/authentication/check");
    let transport = build_transport(&config).unwrap();
    let api = NppaApi::new(config, discard_logger());

    let result = api
        .real_name_auth(&CallContext::new(), &transport, "u1", "Li", "110101199003077777")
        .await
        .unwrap();

    auth_mock.assert();
    assert_eq!(result.status, RealNameAuthStatus::Success);
    assert_eq!(result.pi, "1fffbjzos82bs9cnyj1dna7d6d29zg4esnh99u");
}

#[tokio::test]
async fn real_name_auth_query_sends_ai_without_body() {
    let query_mock = mock(
        "GET",
        Matcher::Regex("^/idcard/authentication/query".to_string()),
    )
    .match_query(Matcher::UrlEncoded("ai".to_string(), "u2".to_string()))
    .match_header("sign", Matcher::Regex(SIGN.to_string()))
    .match_body("")
    .with_status(200)
    .with_body(r#"{"errcode":0,"errmsg":"OK","data":{"result":{"status":1,"pi":""}}}"#)
    .create();

    let config = endpoint("/idcard/authentication/query");
    let transport = build_transport(&config).unwrap();
    let api = NppaApi::new(config, discard_logger());

    let result = api
        .real_name_auth_query(&CallContext::new(), &transport, "u2")
        .await
        .unwrap();

    query_mock.assert();
    assert_eq!(result.status, RealNameAuthStatus::Processing);
    assert!(result.pi.is_empty());
}

#[tokio::test]
async fn business_error_code_is_surfaced() {
    let auth_mock = mock("POST", "/idcard/authentication/rejected")
        .with_status(200)
        .with_body(r#"{"errcode":1012,"errmsg":"BUS AUTH IDNUM ILLEGAL"}"#)
        .create();

    let config = endpoint("/idcard/authentication/rejected");
    let transport = build_transport(&config).unwrap();
    let api = NppaApi::new(config, discard_logger());

    let err = api
        .real_name_auth(&CallContext::new(), &transport, "u3", "Li", "not-an-id")
        .await
        .unwrap_err();

    auth_mock.assert();
    match err {
        RequestError::Remote(remote) => {
            assert_eq!(remote.code, 1012);
            assert_eq!(remote.message, "BUS AUTH IDNUM ILLEGAL");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_page_is_an_encoding_error() {
    let auth_mock = mock("POST", "/idcard/authentication/down")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create();

    let config = endpoint("/idcard/authentication/down");
    let transport = build_transport(&config).unwrap();
    let api = NppaApi::new(config, discard_logger());

    let err = api
        .real_name_auth(&CallContext::new(), &transport, "u4", "Li", "110101199003077777")
        .await
        .unwrap_err();

    auth_mock.assert();
    assert!(matches!(err, RequestError::Encoding(_)));
}

#[tokio::test]
async fn behavior_report_returns_rejected_events() {
    let report_mock = mock("POST", "/behavior/collection/loginout")
        .match_header("sign", Matcher::Regex(SIGN.to_string()))
        .match_body(Matcher::Regex(ENVELOPE.to_string()))
        .with_status(200)
        .with_body(r#"{"errcode":0,"errmsg":"OK","data":{"results":[{"no":2,"errcode":3003,"errmsg":"BUS COLLECT NO PI"}]}}"#)
        .create();

    let config = endpoint("/behavior/collection/loginout");
    let transport = build_transport(&config).unwrap();
    let api = NppaApi::new(config, discard_logger());

    let collections = vec![
        BehaviorCollection::new(1, "s1", BehaviorType::Online, CertType::Guest, "d1", ""),
        BehaviorCollection::new(2, "s2", BehaviorType::Online, CertType::Authenticated, "", ""),
    ];
    let results = api
        .player_behavior_report(&CallContext::new(), &transport, collections)
        .await
        .unwrap();

    report_mock.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].no, 2);
    assert_eq!(results[0].errcode, 3003);
}
