//! End-to-end tests of the client against the in-memory registry.

use urnreg_client::{RegistryConfig, UrnClient};
use urnreg_core::{Error, RegistryUrl, SeriesCode, TargetUrl, Urn};
use urnreg_mem::MemRegistry;

async fn seeded_registry() -> MemRegistry {
    let registry = MemRegistry::new();
    registry.add_account("alice", "s3cret").await;
    registry.add_account("bob", "hunter2").await;
    registry.add_series("no-nb", true).await;
    registry.add_series("no-x", false).await;
    registry.grant_authority("alice", "no-nb").await;
    registry.grant_authority("alice", "no-x").await;
    registry
}

fn client_for(registry: MemRegistry) -> UrnClient<MemRegistry> {
    let config = RegistryConfig::new(
        RegistryUrl::new("https://id.example.org/service").unwrap(),
    )
    .with_username("alice")
    .with_password("s3cret");
    UrnClient::new(registry, config)
}

fn remote_code(err: Error) -> String {
    match err {
        Error::Remote(remote) => remote.code.unwrap_or_default(),
        other => panic!("expected remote failure, got {other:?}"),
    }
}

#[tokio::test]
async fn full_session_lifecycle() {
    let registry = seeded_registry().await;
    let client = client_for(registry.clone());
    let series = SeriesCode::from("no-nb");
    let url_a = TargetUrl::from("http://example.org/a");
    let url_b = TargetUrl::from("http://example.org/b");
    let url_c = TargetUrl::from("http://example.org/c");

    client.login(None, None).await.unwrap();
    assert_eq!(registry.session_count().await, 1);

    let created = client.create_urn(&series, &url_a).await.unwrap();
    let urn = Urn::new(created["urn"].as_str().unwrap());
    assert_eq!(urn.as_str(), "URN:NBN:no-nb-1");

    client.add_url(&urn, &url_b).await.unwrap();
    client.set_default_url(&urn, &url_b).await.unwrap();
    client.replace_url(&urn, &url_a, &url_c).await.unwrap();

    let record = registry.record(&urn).await.unwrap();
    assert_eq!(record.targets.len(), 2);
    assert_eq!(record.default_target().unwrap().url, url_b);
    assert!(record.has_target(&url_c));
    assert!(!record.has_target(&url_a));

    client.delete_url(&urn, &url_c).await.unwrap();
    let record = registry.record(&urn).await.unwrap();
    assert_eq!(record.targets.len(), 1);

    let found = client.find_urns_for_url(&url_b).await.unwrap();
    assert_eq!(found, serde_json::json!(["URN:NBN:no-nb-1"]));

    let result = client.logout().await.unwrap();
    assert!(result.is_some());
    assert_eq!(registry.session_count().await, 0);
}

#[tokio::test]
async fn reserve_then_register_binds_first_target() {
    let registry = seeded_registry().await;
    let client = client_for(registry.clone());
    let urn = Urn::from("URN:NBN:no-x:mything");
    let url = TargetUrl::from("http://example.org/thing");

    client.login(None, None).await.unwrap();

    let reserved = client.reserve_urn(&urn).await.unwrap();
    assert!(reserved["targets"].as_array().unwrap().is_empty());

    client.register_urn(&urn, &url).await.unwrap();
    let record = registry.record(&urn).await.unwrap();
    assert_eq!(record.targets.len(), 1);
    assert!(record.default_target().is_some());

    let again = client.reserve_urn(&urn).await.unwrap_err();
    assert_eq!(remote_code(again), "UrnAlreadyRegistered");
}

#[tokio::test]
async fn serial_assignment_rules_are_enforced_remotely() {
    let registry = seeded_registry().await;
    let client = client_for(registry.clone());
    let url = TargetUrl::from("http://example.org/x");

    client.login(None, None).await.unwrap();

    // Reserving a name in a serial series is refused.
    let err = client.reserve_urn(&Urn::from("URN:NBN:no-nb-42")).await.unwrap_err();
    assert_eq!(remote_code(err), "SerialSeries");

    // Creating in a series without serial assignment is refused.
    let err = client
        .create_urn(&SeriesCode::from("no-x"), &url)
        .await
        .unwrap_err();
    assert_eq!(remote_code(err), "NoSerialAssignment");
}

#[tokio::test]
async fn get_next_urn_peeks_without_storing() {
    let registry = seeded_registry().await;
    let client = client_for(registry.clone());
    let series = SeriesCode::from("no-nb");

    client.login(None, None).await.unwrap();

    let first = client.get_next_urn(&series).await.unwrap();
    let second = client.get_next_urn(&series).await.unwrap();
    assert_eq!(first, second);

    let next = Urn::new(first.as_str().unwrap());
    assert!(registry.record(&next).await.is_none());

    // The peeked URN is what creation hands out.
    let created = client
        .create_urn(&series, &TargetUrl::from("http://example.org/x"))
        .await
        .unwrap();
    assert_eq!(created["urn"], first);
}

#[tokio::test]
async fn authority_is_enforced_per_series() {
    let registry = seeded_registry().await;
    let client = client_for(registry);

    client.login(Some("bob"), Some("hunter2")).await.unwrap();

    let err = client
        .create_urn(&SeriesCode::from("no-nb"), &TargetUrl::from("http://x"))
        .await
        .unwrap_err();
    assert_eq!(remote_code(err), "NoAuthority");
}

#[tokio::test]
async fn bad_credentials_leave_no_session() {
    let registry = seeded_registry().await;
    let client = client_for(registry.clone());

    let err = client.login(Some("alice"), Some("wrong")).await.unwrap_err();
    match err {
        Error::Remote(remote) => assert!(remote.is_auth_fault()),
        other => panic!("expected remote failure, got {other:?}"),
    }
    assert!(!client.is_authenticated());
    assert_eq!(registry.session_count().await, 0);
}

#[tokio::test]
async fn deleting_the_last_target_is_refused() {
    let registry = seeded_registry().await;
    let client = client_for(registry);
    let url = TargetUrl::from("http://example.org/only");

    client.login(None, None).await.unwrap();
    let created = client
        .create_urn(&SeriesCode::from("no-nb"), &url)
        .await
        .unwrap();
    let urn = Urn::new(created["urn"].as_str().unwrap());

    let err = client.delete_url(&urn, &url).await.unwrap_err();
    assert_eq!(remote_code(err), "LastUrl");
}

#[tokio::test]
async fn lookups_work_without_authentication() {
    let registry = seeded_registry().await;

    // One authenticated client registers; a second client never logs in.
    let writer = client_for(registry.clone());
    writer.login(None, None).await.unwrap();
    let created = writer
        .create_urn(&SeriesCode::from("no-nb"), &TargetUrl::from("http://example.org/x"))
        .await
        .unwrap();
    let urn = Urn::new(created["urn"].as_str().unwrap());

    let reader = client_for(registry);
    let found = reader.find_urn(&urn).await.unwrap();
    assert_eq!(found["urn"], serde_json::json!(urn.as_str()));

    let err = reader.find_urn(&Urn::from("URN:NBN:no-nb-999")).await.unwrap_err();
    assert_eq!(remote_code(err), "UnknownUrn");
}
