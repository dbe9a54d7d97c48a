extern crate slot_stack;

use slot_stack::*;

#[test]
fn test_config_load() {
    let data = r#"{"growth": "linear", "initialCapacity": 16}"#;
    let config = Config::load(data.as_bytes()).unwrap();
    assert_eq!(config.growth, GrowthPolicy::Linear);
    assert_eq!(config.initial_capacity, 16);

    let st: Stack<u8> = Stack::with_config(&config).unwrap();
    assert_eq!(st.capacity(), 16);
    assert_eq!(st.policy(), GrowthPolicy::Linear);
}

#[test]
fn test_config_load_defaults() {
    let config = Config::load("{}".as_bytes()).unwrap();
    assert_eq!(config, Config::default());

    let config = Config::load(r#"{"initialCapacity": 2}"#.as_bytes()).unwrap();
    assert_eq!(config.growth, GrowthPolicy::Doubling);
    assert_eq!(config.initial_capacity, 2);
}

#[test]
fn test_config_load_invalid() {
    match Config::load(r#"{"growth": "tripling"}"#.as_bytes()) {
        Err(Error::Config(_)) => {}
        r => panic!("unexpected {:?}", r),
    }
    match Config::load("not json".as_bytes()) {
        Err(Error::Config(_)) => {}
        r => panic!("unexpected {:?}", r),
    }
}

#[test]
fn test_config_roundtrip() {
    let config = Config {
        growth: GrowthPolicy::Linear,
        initial_capacity: 3,
    };
    let data = serde_json::to_string(&config).unwrap();
    assert_eq!(data, r#"{"growth":"linear","initialCapacity":3}"#);
}

#[test]
fn test_config_overflow() {
    let config = Config {
        growth: GrowthPolicy::Doubling,
        initial_capacity: usize::MAX,
    };
    assert_eq!(
        Stack::<u32>::with_config(&config).err(),
        Some(Error::Buffer(buffer::Error::CapacityOverflow))
    );
}
