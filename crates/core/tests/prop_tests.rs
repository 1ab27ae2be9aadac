use proptest::prelude::*;

use hashcash_core::{
    DifficultyUnit, Engine, Stamp, digest, is_valid, meets_difficulty, mine, verify,
};

fn nonce_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z]{10}"
}

fn resource_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9:@.-]{0,24}"
}

proptest! {
    /// A mined stamp always passes its own verification.
    #[test]
    fn mined_stamp_always_verifies(
        resource in resource_strategy(),
        nonce in nonce_strategy(),
        timestamp in any::<i64>(),
        difficulty in 0u32..=2,
    ) {
        let mut stamp = Stamp::from_parts(1, difficulty, timestamp, resource, nonce, 0);
        mine(&mut stamp, None).unwrap();
        prop_assert!(verify(&stamp), "mined stamp must verify");
    }

    /// Zero difficulty is satisfied by any counter.
    #[test]
    fn zero_difficulty_always_passes(
        resource in resource_strategy(),
        nonce in nonce_strategy(),
        timestamp in any::<i64>(),
        counter in any::<u64>(),
    ) {
        let stamp = Stamp::from_parts(1, 0, timestamp, resource, nonce, counter);
        prop_assert!(verify(&stamp));
    }

    /// The wire format parses back to the same stamp.
    #[test]
    fn wire_format_round_trips(
        difficulty in any::<u32>(),
        resource in resource_strategy(),
        nonce in nonce_strategy(),
        timestamp in any::<i64>(),
        counter in any::<u64>(),
    ) {
        let stamp = Stamp::from_parts(1, difficulty, timestamp, resource, nonce, counter);
        let parsed: Stamp = stamp.to_string().parse().unwrap();
        prop_assert_eq!(parsed, stamp);
    }

    /// Any text the parser accepts renders back to exactly that text.
    #[test]
    fn parsed_text_renders_back_unchanged(
        version in "[+-]?0{0,2}[0-9]{1,3}",
        difficulty in "[+-]?0{0,2}[0-9]{1,3}",
        timestamp in "[+-]?0{0,2}[0-9]{1,10}",
        resource in resource_strategy(),
        nonce in nonce_strategy(),
        counter in "[+-]?0{0,2}[0-9]{1,12}",
    ) {
        let text = format!("{version}:{difficulty}:{timestamp}:{resource}::{nonce}:{counter}");
        if let Ok(stamp) = text.parse::<Stamp>() {
            prop_assert_eq!(stamp.to_string(), text);
        }
    }

    /// Serialization and digest are pure functions of the fields.
    #[test]
    fn serialization_is_deterministic(
        resource in resource_strategy(),
        nonce in nonce_strategy(),
        counter in any::<u64>(),
    ) {
        let a = Stamp::from_parts(1, 3, 1_700_000_000, resource.clone(), nonce.clone(), counter);
        let b = Stamp::from_parts(1, 3, 1_700_000_000, resource, nonce, counter);
        prop_assert_eq!(a.serialize(), b.serialize());
        prop_assert_eq!(a.digest(), b.digest());
    }

    /// The allocation-free predicate agrees with the textual one.
    #[test]
    fn predicates_agree(input in prop::collection::vec(any::<u8>(), 0..64), difficulty in 0u32..70) {
        let d = digest(&input);
        prop_assert_eq!(
            meets_difficulty(&d, difficulty, DifficultyUnit::HexDigit),
            is_valid(&d.to_hex(), difficulty)
        );
    }

    /// The budget caps the counter and is never overrun.
    #[test]
    fn budget_is_respected(nonce in nonce_strategy(), budget in 0u64..32) {
        let mut stamp = Stamp::from_parts(1, 20, 1_700_000_000, "client-42", nonce, 0);
        let result = Engine::new().mine(&mut stamp, Some(budget));
        prop_assert!(result.is_err());
        prop_assert_eq!(stamp.counter(), budget);
    }
}
