//! Property tests for the Slack block translation.

use proptest::prelude::*;

use deploy_notify::domain::services::render;
use deploy_notify::infrastructure::slack::blocks::{from_blocks, to_blocks, Block};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any rendered document survives the trip through Slack JSON.
    #[test]
    fn property_blocks_round_trip(
        banner in "[A-Za-z][ -~]{0,29}",
        steps in proptest::collection::hash_set("[A-Za-z][A-Za-z0-9 _-]{0,11}", 1..5),
        environments in proptest::collection::hash_set("[A-Za-z][A-Za-z0-9-]{0,7}", 0..3),
        state in "[ -~]{0,24}",
    ) {
        let steps: Vec<String> = steps.into_iter().collect();
        let environments: Vec<String> = environments.into_iter().collect();
        let document = render(&banner, &environments, &steps, &state).unwrap();

        let json = serde_json::to_string(&to_blocks(&document)).unwrap();
        let blocks: Vec<Block> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(from_blocks(&blocks).unwrap(), document);
    }
}
