//! Integration tests for the endpoint methods against the mock reseller API.
//!
//! Each test checks the request the client put on the wire (verb, path,
//! headers, form body) and the typed result it decoded.

use planethoster_kit::*;

use crate::mock_server::{API_KEY, API_USER, MockReseller, Route};

const OK: &str = r#"{"error_code":0,"error":"","message":"ok"}"#;

fn jane() -> Contact {
    Contact {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: "jane@example.com".into(),
        address1: "123 Main St".into(),
        city: "Montreal".into(),
        postal_code: "H2X 1Y4".into(),
        state: "QC".into(),
        country_code: "CA".into(),
        phone: "+1.5145550100".into(),
        ..Default::default()
    }
}

// =============================================================================
// Request shape
// =============================================================================

#[tokio::test]
async fn test_every_request_is_authenticated_form() {
    let server = MockReseller::start(vec![(
        "/reseller-api/domain-info",
        Route::json(r#"{"error_code":0,"order_id":7}"#),
    )])
    .await;

    server.client().domain_info("example", "com").await.unwrap();

    let request = server.single_request();
    assert_eq!(request.method, "GET");
    assert_eq!(request.path, "/reseller-api/domain-info");
    assert_eq!(
        request.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.user_agent.as_deref(), Some(USER_AGENT));
    assert_eq!(request.names(), vec!["api_key", "api_user", "sld", "tld"]);
    assert_eq!(request.get("api_key"), Some(API_KEY));
    assert_eq!(request.get("api_user"), Some(API_USER));
    assert_eq!(request.get("sld"), Some("example"));
    assert_eq!(request.get("tld"), Some("com"));
}

// =============================================================================
// Read operations
// =============================================================================

#[tokio::test]
async fn test_connection_success() {
    let server = MockReseller::start(vec![(
        "/reseller-api/test-connection",
        Route::json(r#"{"error_code":0,"message":"Connected","successful_connection":true}"#),
    )])
    .await;

    let result = server.client().test_connection().await.unwrap();
    assert!(result.successful_connection);
    assert_eq!(result.message, "Connected");
    assert_eq!(server.single_request().names(), vec!["api_key", "api_user"]);
}

#[tokio::test]
async fn test_account_info() {
    let server = MockReseller::start(vec![(
        "/reseller-api/account-info",
        Route::json(
            r#"{"error_code":0,"message":"","credit_remaining":"250.00","credit_currency":"CAD",
                "num_active_orders":4,"num_active_domains":31}"#,
        ),
    )])
    .await;

    let info = server.client().account_info().await.unwrap();
    assert_eq!(info.credit_remaining, "250.00");
    assert_eq!(info.credit_currency, "CAD");
    assert_eq!(info.num_active_orders, 4);
    assert_eq!(info.num_active_domains, 31);
}

#[tokio::test]
async fn test_check_availability() {
    let server = MockReseller::start(vec![(
        "/reseller-api/check-availability",
        Route::json(
            r#"{"error_code":0,"available":true,"is_premium":true,
                "premium_register_price":"1200.00","premium_renew_price":"45.00"}"#,
        ),
    )])
    .await;

    let result = server
        .client()
        .check_availability("shiny", "io")
        .await
        .unwrap();
    assert!(result.available);
    assert!(result.is_premium);
    assert_eq!(result.premium_register_price, "1200.00");
    assert_eq!(server.single_request().get("tld"), Some("io"));
}

#[tokio::test]
async fn test_read_endpoints_hit_their_paths() {
    let server = MockReseller::start(vec![
        (
            "/reseller-api/get-contact-details",
            Route::json(r#"{"error_code":0,"contacts":[{"name":"Jane Doe","contact_type":"registrant"}]}"#),
        ),
        (
            "/reseller-api/get-nameservers",
            Route::json(r#"{"error_code":0,"nameservers":[{"host":"ns1.example.net"},{"host":"ns2.example.net"}]}"#),
        ),
        (
            "/reseller-api/get-ph-dns-records",
            Route::json(r#"{"error_code":0,"records":[{"type":"A","hostname":"@","address":"192.0.2.1"}]}"#),
        ),
        (
            "/reseller-api/get-registrar-lock",
            Route::json(r#"{"error_code":0,"is_locked":true}"#),
        ),
    ])
    .await;
    let client = server.client();

    let contacts = client.contact_details("example", "com").await.unwrap();
    assert_eq!(contacts.by_type("registrant").unwrap().name, "Jane Doe");

    let nameservers = client.nameservers("example", "com").await.unwrap();
    assert_eq!(nameservers.hosts(), vec!["ns1.example.net", "ns2.example.net"]);

    let records = client.dns_records("example", "com").await.unwrap();
    assert_eq!(records.records, vec![DnsRecord::new("@", "192.0.2.1", "A")]);

    let lock = client.registrar_lock("example", "com").await.unwrap();
    assert!(lock.is_locked);

    let paths: Vec<_> = server.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/reseller-api/get-contact-details",
            "/reseller-api/get-nameservers",
            "/reseller-api/get-ph-dns-records",
            "/reseller-api/get-registrar-lock",
        ]
    );
    assert!(server.requests().iter().all(|r| r.method == "GET"));
}

#[tokio::test]
async fn test_tld_prices() {
    let server = MockReseller::start(vec![(
        "/reseller-api/tld-prices",
        Route::json(
            r#"{"error_code":0,"tlds":{
                "com":{"register":"15.99","transfer":"15.99","renew":"17.99",
                       "transfer_requires_epp_code":true,"id_protection_supported":true},
                "fr":{"register":"12.00","transfer":"12.00","renew":"12.00"}}}"#,
        ),
    )])
    .await;

    let prices = server.client().tld_prices().await.unwrap();
    assert_eq!(prices.tlds.keys().collect::<Vec<_>>(), vec!["com", "fr"]);
    assert!(prices.get("com").unwrap().transfer_requires_epp_code);
    assert_eq!(prices.get("fr").unwrap().renew, "12.00");
}

// =============================================================================
// Write operations
// =============================================================================

#[tokio::test]
async fn test_register_domain_sends_flattened_payload() {
    let server = MockReseller::start(vec![(
        "/reseller-api/register-domain",
        Route::json(r#"{"error_code":0,"message":"Registered","order_id":1234}"#),
    )])
    .await;

    let registration = DomainRegistration::new(jane(), "nsa.example.net", "nsb.example.net")
        .nameserver("nsc.example.net")
        .id_protection(true)
        .contact(ContactRole::Admin, jane());

    let result = server
        .client()
        .register_domain("example", "com", 2, &registration)
        .await
        .unwrap();
    assert_eq!(result.message, "Registered");
    assert_eq!(result.field("order_id"), Some(&serde_json::json!(1234)));

    let request = server.single_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.get("period"), Some("2"));
    assert_eq!(request.get("registrant_first_name"), Some("Jane"));
    assert_eq!(request.get("registrant_country_code"), Some("CA"));
    assert_eq!(request.get("id_protection"), Some("1"));
    assert_eq!(request.get("register_if_premium"), Some("0"));
    assert_eq!(request.get("ns1"), Some("nsa.example.net"));
    assert_eq!(request.get("ns3"), Some("nsc.example.net"));
    assert_eq!(request.count("ns4"), 0);
    assert_eq!(request.get("admin_email"), Some("jane@example.com"));
    assert_eq!(request.count("tech_email"), 0);
    assert_eq!(&request.names()[..5], &["api_key", "api_user", "sld", "tld", "period"]);
}

#[tokio::test]
async fn test_register_domain_invalid_payload_sends_nothing() {
    let server = MockReseller::start(vec![("/reseller-api/register-domain", Route::json(OK))]).await;

    let no_registrant = DomainRegistration {
        nameservers: vec!["ns1.example.net".into(), "ns2.example.net".into()],
        ..Default::default()
    };
    let err = server
        .client()
        .register_domain("example", "com", 1, &no_registrant)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingRegistrant)
    ));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_renew_and_epp_code() {
    let server = MockReseller::start(vec![
        ("/reseller-api/renew-domain", Route::json(OK)),
        ("/reseller-api/email-epp-code", Route::json(OK)),
    ])
    .await;
    let client = server.client();

    client.renew_domain("example", "com", 3).await.unwrap();
    client.email_epp_code("example", "com").await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].path, "/reseller-api/renew-domain");
    assert_eq!(requests[0].get("period"), Some("3"));
    assert_eq!(requests[1].path, "/reseller-api/email-epp-code");
    assert_eq!(requests[1].names(), vec!["api_key", "api_user", "sld", "tld"]);
    assert!(requests.iter().all(|r| r.method == "POST"));
}

#[tokio::test]
async fn test_save_contact_details() {
    let server = MockReseller::start(vec![(
        "/reseller-api/save-contact-details",
        Route::json(OK),
    )])
    .await;

    let update = ContactUpdate::new()
        .with(ContactRole::Tech, jane())
        .with(ContactRole::Registrant, jane());
    server
        .client()
        .save_contact_details("example", "com", &update)
        .await
        .unwrap();

    let request = server.single_request();
    assert_eq!(request.get("contact_types"), Some("registrant,tech"));
    assert_eq!(request.get("registrant_city"), Some("Montreal"));
    assert_eq!(request.get("tech_city"), Some("Montreal"));
    assert_eq!(request.count("admin_city"), 0);
    assert_eq!(request.names().last(), Some(&"contact_types"));
}

#[tokio::test]
async fn test_save_contact_details_nothing_to_do() {
    let server = MockReseller::start(vec![(
        "/reseller-api/save-contact-details",
        Route::json(OK),
    )])
    .await;

    let err = server
        .client()
        .save_contact_details("example", "com", &ContactUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::NothingToDo)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_save_nameservers_fills_five_slots() {
    let server = MockReseller::start(vec![("/reseller-api/save-nameservers", Route::json(OK))]).await;

    server
        .client()
        .save_nameservers("example", "com", &["ns1.example.net", "ns2.example.net"])
        .await
        .unwrap();

    let request = server.single_request();
    assert_eq!(
        &request.names()[4..],
        &["ns1", "ns2", "ns3", "ns4", "ns5"]
    );
    assert_eq!(request.get("ns2"), Some("ns2.example.net"));
    assert_eq!(request.get("ns3"), Some(""));
}

#[tokio::test]
async fn test_save_dns_records_indexed_from_one() {
    let server = MockReseller::start(vec![(
        "/reseller-api/save-ph-dns-records",
        Route::json(OK),
    )])
    .await;

    let records = vec![
        DnsRecord::new("@", "192.0.2.10", "A"),
        DnsRecord::new("www", "example.com.", "CNAME"),
        DnsRecord::new("@", "10 mx.example.com.", "MX"),
    ];
    server
        .client()
        .save_dns_records("example", "com", &records)
        .await
        .unwrap();

    let request = server.single_request();
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        assert_eq!(request.get(&format!("hostname{n}")), Some(record.hostname.as_str()));
        assert_eq!(request.get(&format!("address{n}")), Some(record.address.as_str()));
        assert_eq!(request.get(&format!("type{n}")), Some(record.record_type.as_str()));
    }
    assert_eq!(request.count("hostname0"), 0);
    assert_eq!(request.count("hostname4"), 0);
}

#[tokio::test]
async fn test_lock_and_zone_deletion() {
    let server = MockReseller::start(vec![
        ("/reseller-api/save-registrar-lock", Route::json(OK)),
        ("/reseller-api/delete-ph-dns-zone", Route::json(OK)),
    ])
    .await;
    let client = server.client();

    client
        .save_registrar_lock("example", "com", LockAction::Unlock)
        .await
        .unwrap();
    client.delete_dns_zone("example", "com").await.unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].get("lock_action"), Some("unlock"));
    assert_eq!(requests[1].path, "/reseller-api/delete-ph-dns-zone");
}

#[tokio::test]
async fn test_generic_call() {
    let server = MockReseller::start(vec![(
        "/reseller-api/domain-info",
        Route::json(r#"{"error_code":0,"order_id":99}"#),
    )])
    .await;

    let info: DomainInfo = server
        .client()
        .call(
            reqwest::Method::GET,
            "/reseller-api/domain-info",
            Params::domain("example", "org"),
        )
        .await
        .unwrap();
    assert_eq!(info.order_id, 99);
}

#[tokio::test]
async fn test_concurrent_calls_share_one_client() {
    let server = MockReseller::start(vec![(
        "/reseller-api/check-availability",
        Route::json(r#"{"error_code":0,"available":false}"#),
    )])
    .await;
    let client = server.client();

    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.check_availability(&format!("name{i}"), "com").await
        }));
    }
    for handle in handles {
        assert!(!handle.await.unwrap().unwrap().available);
    }

    let mut slds: Vec<_> = server
        .requests()
        .iter()
        .map(|r| r.get("sld").unwrap().to_string())
        .collect();
    slds.sort();
    assert_eq!(slds.len(), 8);
    assert_eq!(slds[0], "name0");
}
