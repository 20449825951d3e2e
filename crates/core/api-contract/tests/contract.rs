use api_contract::{
    CreateReadingRequest, CreateSensorRequest, LoginResponse, RefreshTokenRequest,
    RefreshTokenResponse, SensorDto, SensorsDto, UpdateSensorRequest,
};
use serde_json::Value;

#[test]
fn login_response_is_camel_case() {
    let response = LoginResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires: 1_700_000_000_000,
        user_id: 1,
        username: "admin".to_string(),
        is_superuser: true,
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert!(value.get("accessToken").is_some());
    assert!(value.get("refreshToken").is_some());
    assert!(value.get("isSuperuser").is_some());
    assert!(value.get("access_token").is_none());
    assert!(matches!(value.get("expires"), Some(Value::Number(_))));
}

#[test]
fn refresh_token_request_accepts_both_cases() {
    let camel: RefreshTokenRequest =
        serde_json::from_str(r#"{"refreshToken":"token-1"}"#).expect("parse");
    assert_eq!(camel.refresh_token, "token-1");
    let snake: RefreshTokenRequest =
        serde_json::from_str(r#"{"refresh_token":"token-2"}"#).expect("parse");
    assert_eq!(snake.refresh_token, "token-2");
}

#[test]
fn refresh_token_response_is_camel_case() {
    let response = RefreshTokenResponse {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        expires: 1_700_000_000_000,
    };
    let value = serde_json::to_value(response).expect("serialize");
    assert!(value.get("accessToken").is_some());
    assert!(value.get("refresh_token").is_none());
}

#[test]
fn create_sensor_ignores_owner_field() {
    let payload = r#"{"name":"t1","measurement":"temp","location":"lab","ownerId":99}"#;
    let req: CreateSensorRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.name, "t1");
    assert_eq!(req.measurement, "temp");
    assert_eq!(req.location, "lab");
    assert!(req.description.is_none());
}

#[test]
fn create_sensor_requires_measurement_and_location() {
    let missing_location = r#"{"name":"t1","measurement":"temp"}"#;
    assert!(serde_json::from_str::<CreateSensorRequest>(missing_location).is_err());
    let missing_measurement = r#"{"name":"t1","location":"lab"}"#;
    assert!(serde_json::from_str::<CreateSensorRequest>(missing_measurement).is_err());
}

#[test]
fn update_sensor_distinguishes_null_from_absent() {
    let absent: UpdateSensorRequest = serde_json::from_str(r#"{"name":"n"}"#).expect("parse");
    assert_eq!(absent.name.as_deref(), Some("n"));
    assert!(absent.description.is_none());

    let cleared: UpdateSensorRequest =
        serde_json::from_str(r#"{"description":null}"#).expect("parse");
    assert_eq!(cleared.description, Some(None));

    let set: UpdateSensorRequest =
        serde_json::from_str(r#"{"description":"roof"}"#).expect("parse");
    assert_eq!(set.description, Some(Some("roof".to_string())));
}

#[test]
fn create_reading_ignores_sensor_field() {
    let req: CreateReadingRequest =
        serde_json::from_str(r#"{"value":21.5,"sensorId":7}"#).expect("parse");
    assert_eq!(req.value, 21.5);
    assert!(req.ts_ms.is_none());
}

#[test]
fn sensors_page_shape() {
    let page = SensorsDto {
        data: vec![SensorDto {
            id: 1,
            name: "t1".to_string(),
            measurement: "temp".to_string(),
            location: "lab".to_string(),
            description: None,
            owner_id: 2,
        }],
        count: 3,
    };
    let value = serde_json::to_value(page).expect("serialize");
    assert_eq!(value["count"], 3);
    assert_eq!(value["data"][0]["ownerId"], 2);
}
