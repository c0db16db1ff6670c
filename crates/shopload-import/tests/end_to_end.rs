//! Full upload through the real `AdminClient` against a wiremock store.

mod common;

use common::{row, single_sheet, COLLECTION_ID, LOCATION_ID};
use serde_json::json;
use shopload_admin::{AdminClient, RetryPolicy};
use shopload_import::{Column, Importer, RowOutcome, SUCCESS_MESSAGE};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn purge_then_import_block_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": 11}, {"id": 12}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    for id in [11, 12] {
        Mock::given(method("DELETE"))
            .and(path(format!("/products/{id}.json")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/products.json"))
        .and(body_json(json!({
            "product": {
                "handle": "tee",
                "title": "Tee",
                "status": "active",
                "options": [{"name": "Color", "values": ["Red", "Blue"]}]
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "product": {
                "id": 1,
                "handle": "tee",
                "variants": [{"id": 10, "product_id": 1, "inventory_item_id": 100}]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/collects.json"))
        .and(body_json(json!({"collect": {"product_id": 1, "collection_id": COLLECTION_ID}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "collect": {"id": 5, "product_id": 1, "collection_id": COLLECTION_ID}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/variants/10.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "variant": {"id": 10, "product_id": 1, "inventory_item_id": 100}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/products/1/variants.json"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "errors": {"base": ["The variant 'Blue' already exists."]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/inventory_levels/set.json"))
        .and(body_json(json!({
            "location_id": LOCATION_ID,
            "inventory_item_id": 100,
            "available": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "inventory_level": {"inventory_item_id": 100, "location_id": LOCATION_ID, "available": 3}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AdminClient::with_base_url(&server.uri(), "shpat_test", 5, RetryPolicy::none())
        .expect("client should build");
    let importer = Importer::new(client, common::settings());
    let bytes = single_sheet(vec![
        row("tee")
            .text(Column::Title, "Tee")
            .flag(Column::Published, true)
            .text(Column::Option1Name, "Color")
            .variant("Red", "10.00", 3.0),
        row("tee").variant("Blue", "10.00", 2.0),
    ]);

    let (response, report) = importer
        .upload_with_report(Some(bytes.as_slice()), true)
        .await
        .expect("upload should finish");

    assert!(response.success);
    assert_eq!(response.message, SUCCESS_MESSAGE);
    assert_eq!(report.purged, 2);
    assert!(matches!(
        report.rows[0].outcome,
        RowOutcome::ProductCreated {
            product_id: 1,
            variant_id: 10
        }
    ));
    let RowOutcome::Failed { error, .. } = &report.rows[1].outcome else {
        panic!("expected the duplicate variant to fail");
    };
    assert_eq!(
        error.response_body(),
        Some(&json!({"errors": {"base": ["The variant 'Blue' already exists."]}}))
    );
}
