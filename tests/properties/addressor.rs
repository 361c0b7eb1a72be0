//! Property tests for rendering and addressing step entries.

use proptest::prelude::*;

use deploy_notify::domain::services::{locate, render, set_state, DEFAULT_BANNER};
use deploy_notify::{NotifyError, Section};

fn step_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[A-Za-z][A-Za-z0-9 _-]{0,11}", 1..6)
        .prop_map(|set| set.into_iter().collect())
}

fn environment_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[A-Za-z][A-Za-z0-9-]{0,7}", 0..4)
        .prop_map(|set| set.into_iter().collect())
}

fn state_text() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

/// `None` for the implicit scope, otherwise each environment in turn
fn scopes(environments: &[String]) -> Vec<Option<&str>> {
    if environments.is_empty() {
        vec![None]
    } else {
        environments.iter().map(|env| Some(env.as_str())).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every rendered (environment, step) pair can be located and
    /// shows the initial state.
    #[test]
    fn property_render_then_locate_finds_every_step(
        steps in step_names(),
        environments in environment_names(),
        initial in state_text(),
    ) {
        let document = render(DEFAULT_BANNER, &environments, &steps, &initial).unwrap();

        let scope_count = environments.len().max(1);
        prop_assert_eq!(document.step_entries().count(), steps.len() * scope_count);

        for scope in scopes(&environments) {
            for step in &steps {
                let index = locate(&document, scope, step).unwrap();
                prop_assert_eq!(
                    document.get(index),
                    Some(&Section::step_entry(step.as_str(), initial.as_str()))
                );
            }
        }
    }

    /// PROPERTY: applying the same update twice equals applying it once.
    #[test]
    fn property_set_state_is_idempotent(
        steps in step_names(),
        environments in environment_names(),
        pick in any::<prop::sample::Index>(),
        state in state_text(),
    ) {
        let document = render(DEFAULT_BANNER, &environments, &steps, "Not started").unwrap();
        let step = pick.get(&steps);
        let scope = scopes(&environments)[pick.index(environments.len().max(1))];

        let once = set_state(&document, scope, step, &state).unwrap();
        let twice = set_state(&once, scope, step, &state).unwrap();

        prop_assert_eq!(once, twice);
    }

    /// PROPERTY: an update changes exactly one section and keeps the length.
    #[test]
    fn property_set_state_touches_only_target(
        steps in step_names(),
        environments in environment_names(),
        pick in any::<prop::sample::Index>(),
        state in "[A-Za-z]{1,8}!",
    ) {
        let document = render(DEFAULT_BANNER, &environments, &steps, "Not started").unwrap();
        let step = pick.get(&steps);
        let scope = scopes(&environments)[pick.index(environments.len().max(1))];
        let target = locate(&document, scope, step).unwrap();

        let updated = set_state(&document, scope, step, &state).unwrap();

        prop_assert_eq!(updated.len(), document.len());
        for (index, (before, after)) in document
            .sections()
            .iter()
            .zip(updated.sections())
            .enumerate()
        {
            if index == target {
                prop_assert_eq!(after, &Section::step_entry(step.as_str(), state.as_str()));
            } else {
                prop_assert_eq!(before, after);
            }
        }
    }

    /// PROPERTY: steps that were never rendered are never found, in any scope.
    #[test]
    fn property_absent_step_is_not_found(
        steps in step_names(),
        environments in environment_names(),
    ) {
        let document = render(DEFAULT_BANNER, &environments, &steps, "Not started").unwrap();
        // Generated names never contain '#'
        let absent = format!("{}#", steps[0]);

        for scope in scopes(&environments) {
            let is_step_not_found = matches!(
                locate(&document, scope, &absent),
                Err(NotifyError::StepNotFound { .. })
            );
            prop_assert!(is_step_not_found);
        }
    }

    /// PROPERTY: naming an environment that was not rendered never matches.
    #[test]
    fn property_unknown_environment_is_not_found(
        steps in step_names(),
        environments in environment_names(),
    ) {
        let document = render(DEFAULT_BANNER, &environments, &steps, "Not started").unwrap();

        let result = locate(&document, Some("no such env"), &steps[0]);
        let is_step_not_found = matches!(result, Err(NotifyError::StepNotFound { .. }));
        prop_assert!(is_step_not_found);
    }
}
