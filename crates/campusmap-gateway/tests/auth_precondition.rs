//! The missing-auth precondition short-circuits before any request.

use std::sync::Arc;

use campusmap_core::{BuildingId, FloorId, GatewayError, PersistenceGateway};
use campusmap_gateway::{Anonymous, GatewayConfig, HttpGateway};

fn anonymous_gateway() -> HttpGateway {
    // An unroutable base URL: if a request were ever issued these tests
    // would fail with a transport error instead of MissingAuth.
    let config = GatewayConfig {
        base_url: "http://192.0.2.1:1/api".to_string(),
        timeout_ms: 50,
    };
    HttpGateway::new(&config, Arc::new(Anonymous)).unwrap()
}

#[tokio::test]
async fn save_pins_without_a_token_never_reaches_the_network() {
    let gateway = anonymous_gateway();
    let result = gateway
        .save_pins(&BuildingId::from("b1"), &FloorId::from("f1"), &[], &[])
        .await;
    assert!(matches!(result, Err(GatewayError::MissingAuth)));
}

#[tokio::test]
async fn loads_and_mutations_share_the_precondition() {
    let gateway = anonymous_gateway();

    assert!(matches!(
        gateway.load_floors(&BuildingId::from("b1")).await,
        Err(GatewayError::MissingAuth)
    ));
    assert!(matches!(
        gateway.publish_building(&BuildingId::from("b1")).await,
        Err(GatewayError::MissingAuth)
    ));
    assert!(matches!(
        gateway.delete_floor(&BuildingId::from("b1"), &FloorId::from("f1")).await,
        Err(GatewayError::MissingAuth)
    ));
}
