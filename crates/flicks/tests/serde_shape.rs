//! Serialized form of `Flicks` with the `serde` feature.

use flicks::Flicks;

#[test]
fn serializes_as_raw_count() {
    let json = serde_json::to_string(&Flicks::ONE_SECOND).expect("serialize");
    assert_eq!(json, "705600000");
    let back: Flicks = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, Flicks::ONE_SECOND);
}

#[test]
fn negative_counts_round_trip() {
    let value = -Flicks::ONE_TWENTY_FOURTH_OF_SECOND;
    let json = serde_json::to_string(&value).expect("serialize");
    assert_eq!(json, "-29400000");
    assert_eq!(serde_json::from_str::<Flicks>(&json).expect("deserialize"), value);
}
