use chrono::{DateTime, Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use slotbook_core::errors::BookingError;
use slotbook_core::models::slot_record::{
    SLOTS_PER_DAY, SlotRecord, decode_slot_index, encode_key,
};

#[rstest]
#[case(2015, 9, 9, 0, "2015-09-09-00")]
#[case(2015, 8, 30, 1, "2015-08-30-01")]
#[case(2024, 2, 29, 23, "2024-02-29-23")]
#[case(987, 12, 1, 10, "0987-12-01-10")]
fn test_encode_key_zero_pads(
    #[case] year: i32,
    #[case] month: u32,
    #[case] day: u32,
    #[case] hour: u32,
    #[case] expected: &str,
) {
    assert_eq!(encode_key(year, month, day, hour), expected);
}

#[rstest]
#[case(2015, 9, 9)]
#[case(0, 1, 1)]
#[case(2016, 2, 29)]
#[case(1999, 12, 31)]
#[case(9999, 12, 31)]
fn test_every_hour_round_trips(#[case] year: i32, #[case] month: u32, #[case] day: u32) {
    for hour in 0..SLOTS_PER_DAY {
        let key = encode_key(year, month, day, hour);
        assert_eq!(decode_slot_index(&key).unwrap(), hour);
    }
}

#[rstest]
#[case("2015-08-30-01BLAH")]
#[case("2015-08-30-")]
#[case("2015083001")]
#[case("")]
#[case("2015-08-30-+1")]
#[case("2015-08-30- 1")]
#[case("2015-08-30-1.0")]
#[case("2015-13-30-01")]
#[case("2015-02-30-01")]
#[case("garbage-01")]
#[case("2015-08-30-24")]
#[case("2015-08-30-99999999999")]
#[case("+015-08-30-01")]
#[case(" 015-08-30-01")]
#[case("2015-08- 1-01")]
#[case("2015- 8-30-01")]
#[case("2015/08/30-01")]
fn test_decode_rejects_malformed_keys(#[case] key: &str) {
    let err = decode_slot_index(key).unwrap_err();
    assert!(
        matches!(err, BookingError::MalformedKey(_)),
        "expected MalformedKey for {key:?}, got {err:?}"
    );
}

#[test]
fn test_malformed_key_error_names_the_key() {
    let err = decode_slot_index("2015-08-30-01BLAH").unwrap_err();
    assert!(err.to_string().contains("2015-08-30-01BLAH"));
}

#[test]
fn test_decode_accepts_unpadded_index() {
    assert_eq!(decode_slot_index("2015-08-30-7").unwrap(), 7);
}

#[test]
fn test_record_slot_index() {
    let start = Utc.with_ymd_and_hms(2015, 8, 30, 9, 0, 30).unwrap();
    let record = SlotRecord::new(
        "trainerId",
        "2015-08-30-01",
        "clientId",
        start,
        start + Duration::hours(1),
    );

    assert_eq!(record.slot_index().unwrap(), 1);
}

#[test]
fn test_slot_record_serialization() {
    let start: DateTime<Utc> = Utc.with_ymd_and_hms(2015, 9, 9, 16, 0, 0).unwrap();
    let record = SlotRecord::new(
        "trainerId",
        "2015-09-09-09",
        "clientId",
        start,
        start + Duration::hours(1),
    );

    let json = to_string(&record).expect("Failed to serialize slot record");
    let deserialized: SlotRecord = from_str(&json).expect("Failed to deserialize slot record");

    assert_eq!(deserialized, record);
}
