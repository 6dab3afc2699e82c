#[cfg(test)]
mod integration_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::handlers::acts::CreateActRequest;
    use crate::handlers::stores::{CreateStoreRequest, UpdateStoreRequest};
    use crate::handlers::summaries::CreateSummaryRequest;
    use crate::handlers::supplies::CreateSupplyRequest;
    use crate::handlers::transactions::CreateTransactionRequest;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Amounts travel as exact decimal strings; parse them back for
    /// numeric comparison.
    fn amount(value: &serde_json::Value) -> Decimal {
        value
            .as_str()
            .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
            .parse()
            .unwrap()
    }

    async fn create_store(server: &TestServer, name: &str) -> i64 {
        let response = server
            .post("/api/v1/stores")
            .json(&CreateStoreRequest {
                name: name.to_string(),
                address: None,
                phone: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    async fn create_supply(server: &TestServer, id: &str, store_id: i64, amount: &str, on: NaiveDate) {
        let response = server
            .post("/api/v1/supplies")
            .json(&CreateSupplyRequest {
                id: id.to_string(),
                amount: amount.parse().unwrap(),
                date: on,
                store_id: store_id as i32,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    async fn create_payment(server: &TestServer, store_id: i64, amount: &str, on: NaiveDate) {
        let response = server
            .post("/api/v1/transactions")
            .json(&CreateTransactionRequest {
                amount: amount.parse().unwrap(),
                date: on,
                store_id: store_id as i32,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let doc: serde_json::Value = response.json();
        assert_eq!(doc["info"]["title"], "ReconRust API");
    }

    #[tokio::test]
    async fn test_create_store() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/stores")
            .json(&CreateStoreRequest {
                name: "Corner Grocery".to_string(),
                address: Some("12 Main St".to_string()),
                phone: Some("+1 555 0100".to_string()),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Store created successfully");
        assert_eq!(body.data["name"], "Corner Grocery");
        assert_eq!(body.data["address"], "12 Main St");
        assert!(body.data["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_get_stores() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_store(&server, "First").await;
        create_store(&server, "Second").await;

        let response = server.get("/api/v1/stores").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert!(body.success);
        assert_eq!(body.data.len(), 2);
        assert_eq!(body.data[0]["name"], "First");
        assert_eq!(body.data[1]["name"], "Second");
    }

    #[tokio::test]
    async fn test_get_store_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/stores/99999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_store() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Old Name").await;

        let response = server
            .put(&format!("/api/v1/stores/{}", store_id))
            .json(&UpdateStoreRequest {
                name: Some("New Name".to_string()),
                address: None,
                phone: Some("+1 555 0199".to_string()),
            })
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["name"], "New Name");
        assert_eq!(body.data["phone"], "+1 555 0199");
    }

    #[tokio::test]
    async fn test_delete_store_cascades() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Doomed").await;
        create_supply(&server, "INV-1", store_id, "100.00", date(2024, 1, 5)).await;
        create_payment(&server, store_id, "50.00", date(2024, 1, 6)).await;

        let response = server.delete(&format!("/api/v1/stores/{}", store_id)).await;
        response.assert_status(StatusCode::OK);

        // The store and its records are gone
        server
            .get(&format!("/api/v1/stores/{}", store_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get("/api/v1/supplies/INV-1")
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let payments = server.get("/api/v1/transactions").await;
        let body: ApiResponse<Vec<serde_json::Value>> = payments.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_create_supply_and_get() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;
        create_supply(&server, "INV-2024-001", store_id, "1000.00", date(2024, 1, 5)).await;

        let response = server.get("/api/v1/supplies/INV-2024-001").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["id"], "INV-2024-001");
        assert_eq!(amount(&body.data["amount"]), Decimal::new(100000, 2));
        assert_eq!(body.data["date"], "2024-01-05");
    }

    #[tokio::test]
    async fn test_duplicate_supply_id_is_conflict() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;
        create_supply(&server, "INV-1", store_id, "100.00", date(2024, 1, 5)).await;

        let response = server
            .post("/api/v1/supplies")
            .json(&CreateSupplyRequest {
                id: "INV-1".to_string(),
                amount: "200.00".parse().unwrap(),
                date: date(2024, 1, 6),
                store_id: store_id as i32,
            })
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_supply_for_unknown_store() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/supplies")
            .json(&CreateSupplyRequest {
                id: "INV-1".to_string(),
                amount: "100.00".parse().unwrap(),
                date: date(2024, 1, 5),
                store_id: 99999,
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_supplies_filtered_by_store() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let first = create_store(&server, "First").await;
        let second = create_store(&server, "Second").await;
        create_supply(&server, "INV-2", first, "20.00", date(2024, 1, 20)).await;
        create_supply(&server, "INV-1", first, "10.00", date(2024, 1, 5)).await;
        create_supply(&server, "INV-3", second, "30.00", date(2024, 1, 10)).await;

        let response = server
            .get("/api/v1/supplies")
            .add_query_param("store_id", first)
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 2);
        // Oldest first
        assert_eq!(body.data[0]["id"], "INV-1");
        assert_eq!(body.data[1]["id"], "INV-2");
    }

    #[tokio::test]
    async fn test_payment_crud_round_trip() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;

        let response = server
            .post("/api/v1/transactions")
            .json(&CreateTransactionRequest {
                amount: "400.00".parse().unwrap(),
                date: date(2024, 1, 10),
                store_id: store_id as i32,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let payment_id = body.data["id"].as_i64().unwrap();

        let response = server
            .put(&format!("/api/v1/transactions/{}", payment_id))
            .json(&json!({"amount": "450.00"}))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(amount(&body.data["amount"]), Decimal::new(45000, 2));
        assert_eq!(body.data["date"], "2024-01-10");

        server
            .delete(&format!("/api/v1/transactions/{}", payment_id))
            .await
            .assert_status(StatusCode::OK);
        server
            .get(&format!("/api/v1/transactions/{}", payment_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_ledger_endpoint() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;
        create_supply(&server, "INV-1", store_id, "1000.00", date(2024, 1, 5)).await;
        create_payment(&server, store_id, "400.00", date(2024, 1, 10)).await;

        let response = server
            .get(&format!("/api/v1/stores/{}/ledger", store_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(amount(&body.data["supply_total"]), Decimal::new(100000, 2));
        assert_eq!(amount(&body.data["transaction_total"]), Decimal::new(40000, 2));
        assert_eq!(amount(&body.data["net_position"]), Decimal::new(60000, 2));
        assert_eq!(amount(&body.data["debt"]), Decimal::new(60000, 2));
    }

    #[tokio::test]
    async fn test_store_ledger_clamps_overpayment() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Overpaid").await;
        create_supply(&server, "INV-1", store_id, "100.00", date(2024, 1, 5)).await;
        create_payment(&server, store_id, "500.00", date(2024, 1, 10)).await;

        let response = server
            .get(&format!("/api/v1/stores/{}/ledger", store_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(amount(&body.data["net_position"]), Decimal::new(-40000, 2));
        assert_eq!(amount(&body.data["debt"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_store_ledger_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/stores/99999/ledger").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    /// One debtor and one overpaying store: the fleet total counts only the
    /// debtor, and the listing leads with the biggest debt.
    #[tokio::test]
    async fn test_dashboard_overview() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let overpaid = create_store(&server, "Overpaid").await;
        create_supply(&server, "INV-1", overpaid, "100.00", date(2024, 1, 5)).await;
        create_payment(&server, overpaid, "200.00", date(2024, 1, 6)).await;

        let debtor = create_store(&server, "Debtor").await;
        create_supply(&server, "INV-2", debtor, "500.00", date(2024, 1, 5)).await;

        let response = server.get("/api/v1/dashboard").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["store_count"], 2);
        assert_eq!(amount(&body.data["total_debt"]), Decimal::new(50000, 2));

        let stores = body.data["stores"].as_array().unwrap();
        assert_eq!(stores[0]["store_name"], "Debtor");
        assert_eq!(stores[1]["store_name"], "Overpaid");
        assert_eq!(amount(&stores[1]["debt"]), Decimal::ZERO);
        assert_eq!(amount(&stores[1]["net_position"]), Decimal::new(-10000, 2));
    }

    #[tokio::test]
    async fn test_act_report_round_trip() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;
        // Prior history, lands in the opening balance
        create_supply(&server, "INV-0", store_id, "200.00", date(2023, 12, 1)).await;
        // In-period records
        create_supply(&server, "INV-1", store_id, "1000.00", date(2024, 1, 5)).await;
        create_payment(&server, store_id, "400.00", date(2024, 1, 10)).await;

        let response = server
            .post("/api/v1/acts")
            .json(&CreateActRequest {
                store_id: store_id as i32,
                period_start: date(2024, 1, 1),
                period_end: date(2024, 1, 31),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let act_id = body.data["id"].as_i64().unwrap();

        let response = server.get(&format!("/api/v1/acts/{}/report", act_id)).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let report = &body.data;

        assert_eq!(report["store_name"], "Corner Grocery");
        assert_eq!(amount(&report["balance_before"]), Decimal::new(20000, 2));
        assert_eq!(amount(&report["total_supply"]), Decimal::new(100000, 2));
        assert_eq!(amount(&report["total_transaction"]), Decimal::new(40000, 2));
        assert_eq!(amount(&report["balance_after"]), Decimal::new(80000, 2));
        assert_eq!(amount(&report["debt"]), Decimal::new(80000, 2));
        assert_eq!(amount(&report["overpayment"]), Decimal::ZERO);

        let events = report["events"].as_array().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0]["kind"], "supply");
        assert_eq!(events[0]["supply_id"], "INV-1");
        assert_eq!(events[1]["kind"], "transaction");
        // Running balance is relative to the period, not the opening balance
        assert_eq!(amount(&events[1]["balance"]), Decimal::new(60000, 2));
    }

    /// Acts store parameters only; the report follows the data.
    #[tokio::test]
    async fn test_act_report_recomputes_on_read() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;
        create_supply(&server, "INV-1", store_id, "1000.00", date(2024, 1, 5)).await;

        let response = server
            .post("/api/v1/acts")
            .json(&CreateActRequest {
                store_id: store_id as i32,
                period_start: date(2024, 1, 1),
                period_end: date(2024, 1, 31),
            })
            .await;
        let body: ApiResponse<serde_json::Value> = response.json();
        let act_id = body.data["id"].as_i64().unwrap();

        let response = server.get(&format!("/api/v1/acts/{}/report", act_id)).await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(amount(&body.data["debt"]), Decimal::new(100000, 2));

        // A payment registered after the act was drawn up shows on re-read
        create_payment(&server, store_id, "1000.00", date(2024, 1, 20)).await;

        let response = server.get(&format!("/api/v1/acts/{}/report", act_id)).await;
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(amount(&body.data["debt"]), Decimal::ZERO);
        assert_eq!(amount(&body.data["balance_after"]), Decimal::ZERO);
        assert_eq!(amount(&body.data["overpayment"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_act_with_inverted_period_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;

        let response = server
            .post("/api/v1/acts")
            .json(&CreateActRequest {
                store_id: store_id as i32,
                period_start: date(2024, 2, 1),
                period_end: date(2024, 1, 1),
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);

        // Nothing was written
        let body: ApiResponse<Vec<serde_json::Value>> = server.get("/api/v1/acts").await.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_act_update_cannot_invert_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let store_id = create_store(&server, "Corner Grocery").await;
        let response = server
            .post("/api/v1/acts")
            .json(&CreateActRequest {
                store_id: store_id as i32,
                period_start: date(2024, 1, 1),
                period_end: date(2024, 1, 31),
            })
            .await;
        let body: ApiResponse<serde_json::Value> = response.json();
        let act_id = body.data["id"].as_i64().unwrap();

        // Moving the end before the existing start must fail
        let response = server
            .put(&format!("/api/v1/acts/{}", act_id))
            .json(&json!({"period_end": "2023-12-01"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_act_for_unknown_store_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/acts")
            .json(&CreateActRequest {
                store_id: 99999,
                period_start: date(2024, 1, 1),
                period_end: date(2024, 1, 31),
            })
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_crud_and_report() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let first = create_store(&server, "First").await;
        let second = create_store(&server, "Second").await;
        create_supply(&server, "INV-1", first, "300.00", date(2024, 1, 5)).await;
        create_supply(&server, "INV-2", second, "100.00", date(2024, 1, 5)).await;
        create_payment(&server, second, "250.00", date(2024, 1, 10)).await;

        let response = server
            .post("/api/v1/summaries")
            .json(&CreateSummaryRequest {
                period_start: date(2024, 1, 1),
                period_end: date(2024, 1, 31),
                store_ids: vec![first as i32, second as i32],
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let summary_id = body.data["id"].as_i64().unwrap();
        assert_eq!(body.data["store_ids"].as_array().unwrap().len(), 2);

        let response = server
            .get(&format!("/api/v1/summaries/{}/report", summary_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let fleet = &body.data["fleet"];
        assert_eq!(fleet["store_count"], 2);
        // Second overpaid by 150.00 and contributes nothing to the total
        assert_eq!(amount(&fleet["total_debt"]), Decimal::new(30000, 2));
        assert_eq!(amount(&fleet["total_supply"]), Decimal::new(40000, 2));
        assert_eq!(amount(&fleet["total_transaction"]), Decimal::new(25000, 2));

        // Replace the store set and shift the period
        let response = server
            .put(&format!("/api/v1/summaries/{}", summary_id))
            .json(&json!({
                "period_end": "2024-02-29",
                "store_ids": [first]
            }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["period_end"], "2024-02-29");
        assert_eq!(body.data["store_ids"], json!([first]));

        server
            .delete(&format!("/api/v1/summaries/{}", summary_id))
            .await
            .assert_status(StatusCode::OK);
        server
            .get(&format!("/api/v1/summaries/{}", summary_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_with_inverted_period_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/summaries")
            .json(&CreateSummaryRequest {
                period_start: date(2024, 2, 1),
                period_end: date(2024, 1, 1),
                store_ids: vec![],
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
