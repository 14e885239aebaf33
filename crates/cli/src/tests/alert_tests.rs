#[cfg(test)]
mod tests {
    use crate::cmd::alert::{self, Submit};
    use crate::cmd::helpers::Reported;
    use serde_json::{json, Value};
    use zmon_client::memory::Call;
    use zmon_client::{ClientError, Document, InMemoryGateway};

    const URL: &str = "https://zmon.example.org";

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    async fn seeded() -> InMemoryGateway {
        let gw = InMemoryGateway::new(URL);
        for alert in [
            json!({"id": 1, "name": "cpu", "team": "Platform", "priority": 1, "status": "ACTIVE", "parent_id": null}),
            json!({"id": 2, "name": "disk", "team": "Storage", "priority": 2, "status": "ACTIVE"}),
            json!({"id": 3, "name": "mem", "team": "Platform", "priority": 2, "status": "ACTIVE"}),
            json!({"id": 4, "name": "old", "team": "Platform", "status": "INACTIVE"}),
        ] {
            gw.seed_alert(doc(alert)).await.unwrap();
        }
        gw
    }

    fn ids(alerts: &[Document]) -> Vec<i64> {
        alerts.iter().filter_map(|a| a["id"].as_i64()).collect()
    }

    #[tokio::test]
    async fn get_strips_null_fields() {
        let gw = seeded().await;
        let alert = alert::fetch_alert(&gw, 1).await.unwrap();

        assert!(!alert.contains_key("parent_id"));
        assert!(alert.values().all(|v| !v.is_null()));
        assert_eq!(alert["name"], "cpu");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let gw = seeded().await;
        let err = alert::fetch_alert(&gw, 99).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[test]
    fn strip_nulls_keeps_other_values() {
        let mut d = doc(json!({"a": null, "b": "", "c": 0, "d": false, "e": []}));
        alert::strip_nulls(&mut d);
        assert_eq!(d.len(), 4);
        assert!(!d.contains_key("a"));
    }

    #[tokio::test]
    async fn list_adds_detail_links() {
        let gw = seeded().await;
        let alerts = alert::fetch_active_alerts(&gw, None).await.unwrap();

        assert_eq!(ids(&alerts), vec![1, 2, 3]);
        assert_eq!(alerts[0]["link"], "https://zmon.example.org#/alert-details/1/");
    }

    #[tokio::test]
    async fn filter_is_subset_of_list() {
        let gw = seeded().await;
        let all = alert::fetch_active_alerts(&gw, None).await.unwrap();
        let filtered = alert::fetch_active_alerts(&gw, Some(("team", "Platform")))
            .await
            .unwrap();

        let expected: Vec<Document> = all
            .into_iter()
            .filter(|a| a.get("team") == Some(&json!("Platform")))
            .collect();
        assert_eq!(filtered, expected);
        assert_eq!(ids(&filtered), vec![1, 3]);
    }

    #[tokio::test]
    async fn filter_unknown_field_is_empty() {
        let gw = seeded().await;
        let filtered = alert::fetch_active_alerts(&gw, Some(("no_such_field", "x")))
            .await
            .unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn filter_does_not_coerce_types() {
        let alerts = vec![doc(json!({"priority": 2})), doc(json!({"priority": "2"}))];
        let filtered = alert::filter_alerts(alerts, "priority", "2");
        assert_eq!(filtered, vec![doc(json!({"priority": "2"}))]);
    }

    #[tokio::test]
    async fn create_overrides_last_modified_by() {
        let gw = InMemoryGateway::new(URL);
        let source = doc(json!({
            "check_definition_id": "5",
            "condition": ">100",
            "last_modified_by": "someone-else"
        }));

        let url = alert::submit_alert(&gw, source, "jdoe", Submit::Create).await.unwrap();
        assert_eq!(url, "https://zmon.example.org#/alert-details/1001/");

        let calls = gw.calls().await;
        match &calls[0] {
            Call::CreateAlert(sent) => assert_eq!(sent["last_modified_by"], "jdoe"),
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_overrides_last_modified_by() {
        let gw = seeded().await;
        let source = doc(json!({"id": 2, "check_definition_id": "5", "name": "disk"}));

        let url = alert::submit_alert(&gw, source, "unknown", Submit::Update).await.unwrap();
        assert_eq!(url, "https://zmon.example.org#/alert-details/2/");
        assert_eq!(gw.alert(2).await.unwrap()["last_modified_by"], "unknown");
    }

    #[tokio::test]
    async fn update_without_id_is_argument_error() {
        let gw = seeded().await;
        let source = doc(json!({"check_definition_id": "5"}));

        let err = alert::submit_alert(&gw, source, "jdoe", Submit::Update)
            .await
            .unwrap_err();
        assert!(err.is_argument());
    }

    #[tokio::test]
    async fn rejected_create_is_argument_error() {
        let gw = InMemoryGateway::new(URL);
        let source = doc(json!({"name": "no check id"}));

        let err = alert::submit_alert(&gw, source, "jdoe", Submit::Create)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("check_definition_id"));
    }

    #[tokio::test]
    async fn rejected_create_is_reported_once() {
        let gw = InMemoryGateway::new(URL);
        let source = doc(json!({"name": "no check id"}));

        let result = alert::submit_alert(&gw, source, "jdoe", Submit::Create).await;
        let err = alert::submit_outcome(result, Submit::Create).unwrap_err();
        assert!(err.is::<Reported>());
        assert!(gw.alert(1001).await.is_none());
    }

    #[test]
    fn server_rejection_is_reported() {
        let result = Err(ClientError::Argument("condition is required".into()));
        let err = alert::submit_outcome(result, Submit::Update).unwrap_err();
        assert!(err.is::<Reported>());
    }

    #[test]
    fn other_failures_keep_their_cause() {
        let not_found = Err(ClientError::NotFound("alert-definitions/7".into()));
        let err = alert::submit_outcome(not_found, Submit::Update).unwrap_err();
        assert!(!err.is::<Reported>());
        assert!(err.to_string().contains("updating alert definition"));
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::NotFound(_))
        ));

        let http = Err(ClientError::Http {
            status: 500,
            body: "boom".into(),
        });
        let err = alert::submit_outcome(http, Submit::Create).unwrap_err();
        assert!(!err.is::<Reported>());
        assert!(format!("{err:#}").contains("boom"));
    }

    #[test]
    fn accepted_submit_passes_url_through() {
        let url = alert::submit_outcome(Ok("https://zmon#/alert-details/1/".into()), Submit::Create)
            .unwrap();
        assert_eq!(url, "https://zmon#/alert-details/1/");
    }
}
