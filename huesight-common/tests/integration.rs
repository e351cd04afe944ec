//! Integration tests for huesight-common library.

use std::collections::HashMap;

use huesight_common::{Light, LightState, LogFormat, LoggingConfig, parse_config};

#[test]
fn test_decode_bridge_lights_object() {
    // Shape of GET /api/<username>/lights
    let json = r#"{
        "1": {
            "state": { "on": true, "bri": 144, "hue": 13088, "sat": 212, "reachable": true },
            "name": "Hue Lamp 1",
            "uniqueid": "00:17:88:01:00:bd:c7:b9-0b"
        },
        "2": {
            "state": { "on": false, "bri": 0, "reachable": false },
            "name": "Hue Lamp 2",
            "uniqueid": "00:17:88:01:00:bd:c7:ba-0b"
        }
    }"#;

    let lights: HashMap<String, Light> = serde_json::from_str(json).expect("decode failed");

    assert_eq!(lights.len(), 2);

    let lamp1 = &lights["1"];
    assert_eq!(lamp1.name, "Hue Lamp 1");
    assert_eq!(
        lamp1.state,
        LightState {
            on: true,
            reachable: true,
            bri: 144,
            hue: 13088,
            sat: 212,
        }
    );

    let lamp2 = &lights["2"];
    assert_eq!(lamp2.unique_id, "00:17:88:01:00:bd:c7:ba-0b");
    assert!(!lamp2.state.on);
    assert_eq!(lamp2.state.hue, 0);
}

#[test]
fn test_light_serializes_with_bridge_field_names() {
    let light = Light::new(7, "Porch", "AA:BB:CC");
    let value = serde_json::to_value(&light).unwrap();

    assert_eq!(value["uniqueid"], "AA:BB:CC");
    assert_eq!(value["name"], "Porch");
    assert_eq!(value["state"]["on"], false);
}

#[test]
fn test_logging_config_roundtrip_through_json5() {
    #[derive(serde::Deserialize)]
    struct Config {
        logging: LoggingConfig,
    }

    let config: Config = parse_config(r#"{ logging: { level: "warn", format: "json" } }"#).unwrap();

    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, LogFormat::Json);
}
