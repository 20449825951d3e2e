use domain::Principal;
use iot_access::{AccessError, ReadingDraft, ReadingService, SensorDraft, SensorService};
use iot_storage::{InMemoryReadingStore, InMemorySensorStore, Page};
use std::sync::Arc;

const OWNER: i64 = 2;
const OTHER: i64 = 3;

struct Fixture {
    sensors: SensorService,
    readings: ReadingService,
    reading_store: Arc<InMemoryReadingStore>,
}

fn fixture() -> Fixture {
    let sensor_store = Arc::new(InMemorySensorStore::new());
    let reading_store = Arc::new(InMemoryReadingStore::new());
    Fixture {
        sensors: SensorService::new(sensor_store.clone()),
        readings: ReadingService::new(sensor_store, reading_store.clone()),
        reading_store,
    }
}

async fn owned_sensor(fixture: &Fixture) -> i64 {
    fixture
        .sensors
        .create(
            &Principal::user(OWNER),
            SensorDraft {
                name: "t1".to_string(),
                measurement: "temperature".to_string(),
                location: "lab".to_string(),
                description: None,
            },
        )
        .await
        .expect("create")
        .sensor_id
}

fn reading(value: f64) -> ReadingDraft {
    ReadingDraft {
        value,
        ts_ms: Some(1_700_000_000_000),
    }
}

#[tokio::test]
async fn append_stamps_sensor_id() {
    let fixture = fixture();
    let sensor_id = owned_sensor(&fixture).await;
    let created = fixture
        .readings
        .append(&Principal::user(OWNER), sensor_id, reading(21.5))
        .await
        .expect("append");
    assert_eq!(created.sensor_id, sensor_id);
    assert_eq!(created.value, 21.5);
    assert_eq!(created.ts_ms, 1_700_000_000_000);
}

#[tokio::test]
async fn append_defaults_timestamp() {
    let fixture = fixture();
    let sensor_id = owned_sensor(&fixture).await;
    let created = fixture
        .readings
        .append(
            &Principal::user(OWNER),
            sensor_id,
            ReadingDraft {
                value: 1.0,
                ts_ms: None,
            },
        )
        .await
        .expect("append");
    assert!(created.ts_ms > 0);
}

#[tokio::test]
async fn append_to_missing_sensor_persists_nothing() {
    let fixture = fixture();
    let err = fixture
        .readings
        .append(&Principal::user(OWNER), 42, reading(1.0))
        .await
        .expect_err("missing");
    assert!(matches!(err, AccessError::NotFound("sensor")));
    assert!(fixture.reading_store.is_empty());
}

#[tokio::test]
async fn append_to_foreign_sensor_is_forbidden() {
    let fixture = fixture();
    let sensor_id = owned_sensor(&fixture).await;
    let err = fixture
        .readings
        .append(&Principal::user(OTHER), sensor_id, reading(1.0))
        .await
        .expect_err("denied");
    assert!(matches!(err, AccessError::Forbidden));
    assert!(fixture.reading_store.is_empty());
}

#[tokio::test]
async fn append_rejects_non_finite_value() {
    let fixture = fixture();
    let sensor_id = owned_sensor(&fixture).await;
    let err = fixture
        .readings
        .append(&Principal::user(OWNER), sensor_id, reading(f64::NAN))
        .await
        .expect_err("nan");
    assert!(matches!(err, AccessError::Validation(_)));
    assert!(fixture.reading_store.is_empty());
}

#[tokio::test]
async fn superuser_appends_to_any_sensor() {
    let fixture = fixture();
    let sensor_id = owned_sensor(&fixture).await;
    fixture
        .readings
        .append(&Principal::superuser(1), sensor_id, reading(3.0))
        .await
        .expect("append");
    assert_eq!(fixture.reading_store.len(), 1);
}

#[tokio::test]
async fn list_past_end_keeps_total() {
    let fixture = fixture();
    let owner = Principal::user(OWNER);
    let sensor_id = owned_sensor(&fixture).await;
    for value in 0..5 {
        fixture
            .readings
            .append(&owner, sensor_id, reading(value as f64))
            .await
            .expect("append");
    }
    let page = fixture
        .readings
        .list(&owner, sensor_id, Page::new(5, 10))
        .await
        .expect("list");
    assert!(page.items.is_empty());
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn list_is_scoped_to_sensor_in_order() {
    let fixture = fixture();
    let owner = Principal::user(OWNER);
    let first = owned_sensor(&fixture).await;
    let second = owned_sensor(&fixture).await;
    for (sensor_id, value) in [(first, 1.0), (second, 9.0), (first, 2.0), (first, 3.0)] {
        fixture
            .readings
            .append(&owner, sensor_id, reading(value))
            .await
            .expect("append");
    }
    let page = fixture
        .readings
        .list(&owner, first, Page::new(1, 10))
        .await
        .expect("list");
    assert_eq!(page.total, 3);
    let values: Vec<f64> = page.items.iter().map(|item| item.value).collect();
    assert_eq!(values, vec![2.0, 3.0]);
}

#[tokio::test]
async fn list_checks_existence_then_ownership() {
    let fixture = fixture();
    let sensor_id = owned_sensor(&fixture).await;
    let missing = fixture
        .readings
        .list(&Principal::user(OTHER), 999, Page::new(0, 10))
        .await
        .expect_err("missing");
    assert!(matches!(missing, AccessError::NotFound(_)));
    let denied = fixture
        .readings
        .list(&Principal::user(OTHER), sensor_id, Page::new(0, 10))
        .await
        .expect_err("denied");
    assert!(matches!(denied, AccessError::Forbidden));
}

#[tokio::test]
async fn readings_of_deleted_sensor_are_unreachable() {
    let fixture = fixture();
    let owner = Principal::user(OWNER);
    let sensor_id = owned_sensor(&fixture).await;
    fixture
        .readings
        .append(&owner, sensor_id, reading(1.0))
        .await
        .expect("append");
    fixture.sensors.delete(&owner, sensor_id).await.expect("delete");
    let err = fixture
        .readings
        .list(&owner, sensor_id, Page::new(0, 10))
        .await
        .expect_err("gone");
    assert!(matches!(err, AccessError::NotFound(_)));
}
