//! Property-based tests for mpdump.
//!
//! These generate random message sets to find edge cases in the
//! partitioner and the timestamp parser.

use proptest::prelude::*;

use mpdump::Message;
use mpdump::partition::partition_by_day;
use mpdump::timestamp::parse_slack_ts;

/// Epochs inside a few-year window around 2020, so generated messages
/// land on a healthy spread of calendar days.
fn arb_epoch() -> impl Strategy<Value = i64> {
    1_546_300_800i64..1_640_995_200i64
}

/// A timestamp string, with or without a fractional suffix.
fn arb_ts() -> impl Strategy<Value = String> {
    (arb_epoch(), prop::option::of(0u32..1_000_000u32)).prop_map(|(epoch, fraction)| {
        match fraction {
            Some(fraction) => format!("{epoch}.{fraction:06}"),
            None => epoch.to_string(),
        }
    })
}

fn arb_message() -> impl Strategy<Value = Message> {
    (arb_ts(), prop::sample::select(vec!["hi", "a/b", "<@U1>", "x & y", ""]))
        .prop_map(|(ts, text)| Message::new(ts).with_field("text", text))
}

fn arb_messages(max_len: usize) -> impl Strategy<Value = Vec<Message>> {
    prop::collection::vec(arb_message(), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ============================================
    // PARTITION PROPERTIES
    // ============================================

    /// Every input message lands in exactly one bucket.
    #[test]
    fn partition_covers_input_exactly_once(messages in arb_messages(40)) {
        let total = messages.len();
        let buckets = partition_by_day(messages).unwrap();
        let emitted: usize = buckets.iter().map(|b| b.messages.len()).sum();
        prop_assert_eq!(emitted, total);
    }

    /// Buckets come out in ascending date order with unique filenames.
    #[test]
    fn partition_buckets_ascend_and_never_repeat(messages in arb_messages(40)) {
        let buckets = partition_by_day(messages).unwrap();
        for pair in buckets.windows(2) {
            prop_assert!(pair[0].filename < pair[1].filename);
        }
    }

    /// Within a bucket, messages ascend by parsed instant.
    #[test]
    fn partition_buckets_are_internally_sorted(messages in arb_messages(40)) {
        let buckets = partition_by_day(messages).unwrap();
        for bucket in &buckets {
            let instants: Vec<_> = bucket
                .messages
                .iter()
                .map(|m| m.local_instant().unwrap().unwrap())
                .collect();
            for pair in instants.windows(2) {
                prop_assert!(pair[0] <= pair[1]);
            }
        }
    }

    /// No bucket mixes two calendar days, and each message sits in the
    /// bucket its own date maps to.
    #[test]
    fn partition_buckets_are_single_day(messages in arb_messages(40)) {
        let buckets = partition_by_day(messages).unwrap();
        for bucket in &buckets {
            for message in &bucket.messages {
                let instant = message.local_instant().unwrap().unwrap();
                let expected = mpdump::timestamp::day_filename(&instant);
                prop_assert_eq!(&bucket.filename, &expected);
            }
        }
    }

    /// Input order never changes the set of buckets produced.
    #[test]
    fn partition_is_order_insensitive(mut messages in arb_messages(20)) {
        let forward = partition_by_day(messages.clone()).unwrap();
        messages.reverse();
        let backward = partition_by_day(messages).unwrap();

        let names =
            |buckets: &[mpdump::partition::DayBucket]| -> Vec<(String, usize)> {
                buckets
                    .iter()
                    .map(|b| (b.filename.clone(), b.messages.len()))
                    .collect()
            };
        prop_assert_eq!(names(&forward), names(&backward));
    }

    // ============================================
    // TIMESTAMP PROPERTIES
    // ============================================

    /// The fraction never shifts which second (or day) a message lands on.
    #[test]
    fn fraction_is_ignored(epoch in arb_epoch(), fraction in 0u32..1_000_000u32) {
        let plain = parse_slack_ts(&epoch.to_string()).unwrap().unwrap();
        let fractional = parse_slack_ts(&format!("{epoch}.{fraction:06}"))
            .unwrap()
            .unwrap();
        prop_assert_eq!(plain, fractional);
    }

    /// Parsing round-trips the epoch.
    #[test]
    fn parsed_instant_preserves_epoch(epoch in arb_epoch()) {
        let instant = parse_slack_ts(&epoch.to_string()).unwrap().unwrap();
        prop_assert_eq!(instant.timestamp(), epoch);
    }
}
