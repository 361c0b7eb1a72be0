//! Property tests for deployment id validation.

use proptest::prelude::*;

use deploy_notify::DeploymentId;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: validation never panics, whatever the input.
    #[test]
    fn property_deployment_id_never_panics(raw in any::<String>()) {
        let _ = DeploymentId::new(raw);
    }

    /// PROPERTY: accepted ids are usable as a single path segment.
    #[test]
    fn property_accepted_ids_are_plain_file_names(raw in "[ -~]{0,40}") {
        if let Ok(id) = DeploymentId::new(raw.as_str()) {
            prop_assert_eq!(id.as_str(), raw.as_str());
            prop_assert!(!id.as_str().contains('/'));
            prop_assert!(!id.as_str().contains('\\'));
            prop_assert!(id.as_str() != "." && id.as_str() != "..");
        }
    }

    /// PROPERTY: ids from the allowed alphabet are always accepted.
    #[test]
    fn property_allowed_alphabet_is_accepted(raw in "[A-Za-z0-9_-][A-Za-z0-9._-]{0,127}") {
        prop_assert!(DeploymentId::new(raw).is_ok());
    }
}
