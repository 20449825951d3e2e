use iot_storage::{InMemoryReadingStore, NewReading, Page, ReadingStore};

#[tokio::test]
async fn readings_are_scoped_by_sensor() {
    let store = InMemoryReadingStore::new();
    for (sensor_id, value) in [(1, 1.0), (2, 2.0), (1, 3.0)] {
        store
            .create_reading(NewReading {
                sensor_id,
                value,
                ts_ms: 1_700_000_000_000,
            })
            .await
            .expect("create");
    }
    assert_eq!(store.len(), 3);
    assert_eq!(store.count_readings(1).await.expect("count"), 2);
    assert_eq!(store.count_readings(3).await.expect("count"), 0);

    let list = store.list_readings(1, Page::new(0, 10)).await.expect("list");
    let values: Vec<f64> = list.iter().map(|item| item.value).collect();
    assert_eq!(values, vec![1.0, 3.0]);
    assert!(list.iter().all(|item| item.sensor_id == 1));
}

#[tokio::test]
async fn reading_ids_increase() {
    let store = InMemoryReadingStore::new();
    let first = store
        .create_reading(NewReading {
            sensor_id: 1,
            value: 0.5,
            ts_ms: 1,
        })
        .await
        .expect("create");
    let second = store
        .create_reading(NewReading {
            sensor_id: 1,
            value: 0.6,
            ts_ms: 2,
        })
        .await
        .expect("create");
    assert_eq!(second.reading_id, first.reading_id + 1);
}
