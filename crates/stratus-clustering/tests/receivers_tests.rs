//! Receivers operations against an in-memory API client.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use stratus_clustering::receivers::{self, CreateOpts, ListOpts, UpdateOpts};
use stratus_clustering::stratus_results::{zero_time, ApiVersion, Object, Response, ResultError};
use stratus_clustering::{
    ApiClient, ApiRequest, ClusteringConfig, ClusteringError, Method, Receiver, ReceiverType,
};

/// Replays canned responses and records every request it sees.
#[derive(Default)]
struct MockClient {
    responses: Mutex<VecDeque<Response>>,
    pages: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<ApiRequest>>,
    config: ClusteringConfig,
}

impl MockClient {
    fn replying(response: Response) -> Self {
        let client = Self::default();
        client.responses.lock().unwrap().push_back(response);
        client
    }

    fn with_next_pages(self, pages: Vec<Response>) -> Self {
        self.pages.lock().unwrap().extend(pages);
        self
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ApiClient for MockClient {
    async fn request(&self, request: &ApiRequest) -> stratus_clustering::Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClusteringError::Transport("no canned response".into()))
    }

    async fn next_page(
        &self,
        _request: &ApiRequest,
        _current: &Response,
    ) -> stratus_clustering::Result<Option<Response>> {
        Ok(self.pages.lock().unwrap().pop_front())
    }

    fn config(&self) -> ClusteringConfig {
        self.config.clone()
    }
}

fn receiver_json(created_at: Value, updated_at: Value) -> Value {
    json!({
        "action": "CLUSTER_SCALE_OUT",
        "actor": {
            "trust_id": [
                "6dc6d336e3fc4c0a951b5698cd1236d9"
            ]
        },
        "channel": {
            "alarm_url": "http://node1:8778/v1/webhooks/e03dd2e5-8f2e-4ec1-8c6a-74ba891e5422/trigger?V=1&count=1"
        },
        "cluster_id": "ae63a10b-4a90-452c-aef1-113a0b255ee3",
        "created_at": created_at,
        "domain": "Default",
        "id": "573aa1ba-bf45-49fd-907d-6b5d6e6adfd3",
        "name": "cluster_inflate",
        "params": {
            "count": "1"
        },
        "project": "6e18cc2bdbeb48a5b3cad2dc499f6804",
        "type": "webhook",
        "updated_at": updated_at,
        "user": "b4ad2d6e18cc2b9c48049f6dbe8a5b3c"
    })
}

fn single(created_at: Value, updated_at: Value) -> Response {
    Response::new(200, json!({ "receiver": receiver_json(created_at, updated_at) }))
}

fn object(value: Value) -> Object {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected object, got {other}"),
    }
}

type Stamp = (i32, u32, u32, u32, u32, u32);

fn expected_receiver(created: Stamp, updated: Option<Stamp>) -> Receiver {
    let at = |(y, mo, d, h, mi, s): Stamp| Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap();
    Receiver {
        action: "CLUSTER_SCALE_OUT".into(),
        actor: object(json!({"trust_id": ["6dc6d336e3fc4c0a951b5698cd1236d9"]})),
        channel: object(json!({
            "alarm_url": "http://node1:8778/v1/webhooks/e03dd2e5-8f2e-4ec1-8c6a-74ba891e5422/trigger?V=1&count=1"
        })),
        cluster_id: "ae63a10b-4a90-452c-aef1-113a0b255ee3".into(),
        created_at: at(created),
        domain: "Default".into(),
        id: "573aa1ba-bf45-49fd-907d-6b5d6e6adfd3".into(),
        name: "cluster_inflate".into(),
        params: object(json!({"count": "1"})),
        project: "6e18cc2bdbeb48a5b3cad2dc499f6804".into(),
        receiver_type: "webhook".into(),
        updated_at: updated.map(at).unwrap_or_else(zero_time),
        user: "b4ad2d6e18cc2b9c48049f6dbe8a5b3c".into(),
    }
}

fn create_opts() -> CreateOpts {
    CreateOpts {
        name: "cluster_inflate".into(),
        cluster_id: "ae63a10b-4a90-452c-aef1-113a0b255ee3".into(),
        receiver_type: Some(ReceiverType::Webhook),
        action: "CLUSTER_SCALE_OUT".into(),
        ..Default::default()
    }
}

// ==================== Create ====================

#[tokio::test]
async fn test_create_receiver() {
    let client = MockClient::replying(single(
        json!("2015-11-04T05:21:41Z"),
        json!("2016-11-04T05:21:41Z"),
    ));

    let actual = receivers::create(&client, &create_opts()).await.unwrap();
    assert_eq!(
        actual,
        expected_receiver((2015, 11, 4, 5, 21, 41), Some((2016, 11, 4, 5, 21, 41)))
    );

    let requests = client.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(requests[0].path, "receivers");
    assert_eq!(
        requests[0].body.as_ref().unwrap()["receiver"]["type"],
        json!("webhook")
    );
}

#[tokio::test]
async fn test_create_receiver_invalid_time_float() {
    let client = MockClient::replying(single(json!(123456789.0), json!(123456789.0)));
    let result = receivers::create(&client, &create_opts()).await;
    assert!(matches!(
        result,
        Err(ClusteringError::Results(ResultError::TimeParse { .. }))
    ));
}

#[tokio::test]
async fn test_create_receiver_invalid_time_string() {
    let client = MockClient::replying(single(json!("invalid"), json!("invalid")));
    assert!(receivers::create(&client, &create_opts()).await.is_err());
}

#[tokio::test]
async fn test_create_receiver_requires_name() {
    let client = MockClient::default();
    let opts = CreateOpts {
        name: String::new(),
        ..create_opts()
    };
    assert!(matches!(
        receivers::create(&client, &opts).await,
        Err(ClusteringError::MissingField("name"))
    ));
    assert!(client.requests().is_empty());
}

// ==================== Get ====================

#[tokio::test]
async fn test_get_receiver() {
    let client = MockClient::replying(single(
        json!("2015-11-04T05:21:41Z"),
        json!("2016-11-04T05:21:41Z"),
    ));

    let actual = receivers::get(&client, "573aa1ba-bf45-49fd-907d-6b5d6e6adfd3")
        .await
        .unwrap();
    assert_eq!(
        actual,
        expected_receiver((2015, 11, 4, 5, 21, 41), Some((2016, 11, 4, 5, 21, 41)))
    );

    let requests = client.requests();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(
        requests[0].path,
        "receivers/573aa1ba-bf45-49fd-907d-6b5d6e6adfd3"
    );
}

#[tokio::test]
async fn test_get_receiver_invalid_created_at_time() {
    let client = MockClient::replying(single(json!("foo"), json!("2016-11-04T05:21:41Z")));
    let result = receivers::get(&client, "9e1c6f42-acf5-4688-be2c-8ce954ef0f23").await;
    match result {
        Err(ClusteringError::Results(ResultError::TimeParse { field, .. })) => {
            assert_eq!(field, "created_at")
        }
        other => panic!("Expected TimeParse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_receiver_invalid_updated_at_time() {
    let client = MockClient::replying(single(json!("2015-11-04T05:21:41Z"), json!("foo")));
    let result = receivers::get(&client, "9e1c6f42-acf5-4688-be2c-8ce954ef0f23").await;
    match result {
        Err(ClusteringError::Results(ResultError::TimeParse { field, .. })) => {
            assert_eq!(field, "updated_at")
        }
        other => panic!("Expected TimeParse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_get_receiver_not_found() {
    let client = MockClient::replying(Response::new(
        404,
        json!({"error": {"message": "The receiver could not be found."}}),
    ));
    match receivers::get(&client, "missing").await {
        Err(ClusteringError::Api { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

// ==================== Update ====================

#[tokio::test]
async fn test_update_receiver() {
    let client = MockClient::replying(single(json!("2015-06-27T05:09:43Z"), json!(null)));

    let mut params = Object::new();
    params.insert("count".into(), json!("2"));
    let opts = UpdateOpts {
        name: "cluster_inflate".into(),
        action: "CLUSTER_SCALE_OUT".into(),
        params,
    };
    let actual = receivers::update(&client, "6dc6d336e3fc4c0a951b5698cd1236ee", &opts)
        .await
        .unwrap();
    assert_eq!(actual, expected_receiver((2015, 6, 27, 5, 9, 43), None));
    assert_eq!(actual.updated_at, zero_time());

    let requests = client.requests();
    assert_eq!(requests[0].method, Method::Patch);
    assert_eq!(
        requests[0].path,
        "receivers/6dc6d336e3fc4c0a951b5698cd1236ee"
    );
    assert_eq!(
        requests[0].body,
        Some(json!({
            "receiver": {
                "name": "cluster_inflate",
                "action": "CLUSTER_SCALE_OUT",
                "params": {"count": "2"}
            }
        }))
    );
}

#[tokio::test]
async fn test_update_receiver_invalid_time_float() {
    let client = MockClient::replying(single(json!(123456789.0), json!(null)));
    let opts = UpdateOpts::default();
    let result = receivers::update(&client, "6dc6d336e3fc4c0a951b5698cd1236ee", &opts).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_receiver_invalid_time_string() {
    let client = MockClient::replying(single(json!("invalid"), json!(null)));
    let opts = UpdateOpts::default();
    let result = receivers::update(&client, "6dc6d336e3fc4c0a951b5698cd1236ee", &opts).await;
    assert!(result.is_err());
}

// ==================== List ====================

fn list_page(created_at: Value) -> Response {
    Response::new(
        200,
        json!({ "receivers": [receiver_json(created_at, json!(null))] }),
    )
}

#[tokio::test]
async fn test_list_receivers() {
    let client = MockClient::replying(list_page(json!("2015-06-27T05:09:43Z")));
    let opts = ListOpts {
        limit: Some(2),
        sort: "name:asc,status:desc".into(),
        ..Default::default()
    };

    let pager = receivers::list(&client, &opts).unwrap();
    let mut count = 0;
    pager
        .each_page(|page| {
            count += 1;
            assert_eq!(page.number, 1);
            assert_eq!(
                page.items,
                vec![expected_receiver((2015, 6, 27, 5, 9, 43), None)]
            );
            Ok(true)
        })
        .await
        .unwrap();
    assert_eq!(count, 1);

    let requests = client.requests();
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].path, "receivers");
    assert_eq!(
        requests[0].query,
        vec![
            ("limit".to_string(), "2".to_string()),
            ("sort".to_string(), "name:asc,status:desc".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_list_receivers_invalid_time_float() {
    let client = MockClient::replying(list_page(json!(123456789.0)));
    let mut count = 0;
    let result = receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|_| {
            count += 1;
            Ok(true)
        })
        .await;
    assert!(result.is_err());
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_list_receivers_invalid_time_string() {
    let client = MockClient::replying(list_page(json!("invalid")));
    let mut count = 0;
    let result = receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|_| {
            count += 1;
            Ok(true)
        })
        .await;
    assert!(result.is_err());
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_list_fails_whole_page_on_second_element() {
    let body = json!({
        "receivers": [
            receiver_json(json!("2015-06-27T05:09:43Z"), json!(null)),
            receiver_json(json!("invalid"), json!(null))
        ]
    });
    let client = MockClient::replying(Response::new(200, body));
    let mut seen = 0;
    let result = receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|page| {
            seen += page.items.len();
            Ok(true)
        })
        .await;
    assert!(result.is_err());
    assert_eq!(seen, 0);
}

#[tokio::test]
async fn test_list_walks_pages_until_empty() {
    let client = MockClient::replying(list_page(json!("2015-06-27T05:09:43Z")))
        .with_next_pages(vec![
            list_page(json!("2015-06-28T05:09:43Z")),
            Response::new(200, json!({"receivers": []})),
            list_page(json!("2015-06-29T05:09:43Z")),
        ]);

    let all = receivers::list(&client, &ListOpts::default())
        .unwrap()
        .all_pages()
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(
        all[1].created_at,
        Utc.with_ymd_and_hms(2015, 6, 28, 5, 9, 43).unwrap()
    );
}

#[tokio::test]
async fn test_list_stops_when_handler_declines() {
    let client = MockClient::replying(list_page(json!("2015-06-27T05:09:43Z")))
        .with_next_pages(vec![list_page(json!("2015-06-28T05:09:43Z"))]);

    let mut count = 0;
    receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|_| {
            count += 1;
            Ok(false)
        })
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(client.pages.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_rejects_failed_later_page() {
    let client = MockClient::replying(list_page(json!("2015-06-27T05:09:43Z")))
        .with_next_pages(vec![Response::new(
            500,
            json!({"error": {"message": "backend unavailable"}}),
        )]);

    let mut count = 0;
    let result = receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|_| {
            count += 1;
            Ok(true)
        })
        .await;
    match result {
        Err(ClusteringError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("backend unavailable"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_list_ignores_unreadable_version_header() {
    let client = MockClient::replying(
        list_page(json!("2015-06-27T05:09:43Z"))
            .with_header("OpenStack-API-Version", "clustering latest"),
    );

    let mut versions = Vec::new();
    receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|page| {
            assert_eq!(page.items.len(), 1);
            versions.push(page.api_version);
            Ok(true)
        })
        .await
        .unwrap();
    assert_eq!(versions, vec![None]);
}

#[tokio::test]
async fn test_list_propagates_handler_error() {
    let client = MockClient::replying(list_page(json!("2015-06-27T05:09:43Z")));
    let result = receivers::list(&client, &ListOpts::default())
        .unwrap()
        .each_page(|_| Err(ClusteringError::Transport("consumer gave up".into())))
        .await;
    assert!(matches!(result, Err(ClusteringError::Transport(_))));
}

#[tokio::test]
async fn test_list_uses_configured_page_limit_and_version() {
    let mut client = MockClient::replying(
        list_page(json!("2015-06-27T05:09:43Z"))
            .with_header("OpenStack-API-Version", "clustering 1.10"),
    );
    client.config.default_page_limit = Some(25);

    let pager = receivers::list(&client, &ListOpts::default()).unwrap();
    assert_eq!(
        pager.request().query,
        vec![("limit".to_string(), "25".to_string())]
    );

    let mut versions = Vec::new();
    pager
        .each_page(|page| {
            versions.push(page.api_version);
            Ok(true)
        })
        .await
        .unwrap();
    assert_eq!(versions, vec![Some(ApiVersion::new(1, 10))]);
}

// ==================== Delete / Notify ====================

#[tokio::test]
async fn test_delete_receiver() {
    let client = MockClient::replying(Response::new(204, Value::Null));
    receivers::delete(&client, "6dc6d336e3fc4c0a951b5698cd1236ee")
        .await
        .unwrap();

    let requests = client.requests();
    assert_eq!(requests[0].method, Method::Delete);
    assert_eq!(
        requests[0].path,
        "receivers/6dc6d336e3fc4c0a951b5698cd1236ee"
    );
}

#[tokio::test]
async fn test_delete_receiver_unexpected_status() {
    let client = MockClient::replying(Response::new(200, Value::Null));
    assert!(matches!(
        receivers::delete(&client, "6dc6d336e3fc4c0a951b5698cd1236ee").await,
        Err(ClusteringError::Api { status: 200, .. })
    ));
}

#[tokio::test]
async fn test_notify_receiver() {
    let client = MockClient::replying(
        Response::new(202, Value::Null)
            .with_header("X-Openstack-Request-Id", "req-781e9bdc-4163-46eb-91c9-786c53188bbb"),
    );
    let request_id = receivers::notify(&client, "6dc6d336e3fc4c0a951b5698cd1236ee")
        .await
        .unwrap();
    assert_eq!(request_id, "req-781e9bdc-4163-46eb-91c9-786c53188bbb");

    let requests = client.requests();
    assert_eq!(requests[0].method, Method::Post);
    assert_eq!(
        requests[0].path,
        "receivers/6dc6d336e3fc4c0a951b5698cd1236ee/actions/notify"
    );
    assert!(requests[0].body.is_none());
}

#[tokio::test]
async fn test_transport_errors_propagate() {
    let client = MockClient::default();
    assert!(matches!(
        receivers::get(&client, "abc").await,
        Err(ClusteringError::Transport(_))
    ));
}
