#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::harness::conjunction::{ evaluate_conjunction, fold };
    use crate::harness::{ Aggregator, VerificationDriver };
    use crate::models::directive::ExpectedVerdict::{ Fail, Pass };
    use crate::models::report::{ SetupError, SetupErrorKind, Summary };
    use crate::models::verification::{ CaseStatus, MemberOutcome, Outcome, Verdict };
    use crate::models::CaseKind;
    use crate::errors::ToolFailure;
    use crate::tests::support::*;

    fn driver(checker: ScriptedChecker, jobs: usize) -> (Arc<ScriptedChecker>, VerificationDriver) {
        let checker = Arc::new(checker);
        let driver = VerificationDriver::new(checker.clone(), jobs);
        (checker, driver)
    }

    fn verdicts(report: &crate::models::RunReport) -> Vec<Option<Verdict>> {
        report.results
            .iter()
            .map(|r| r.outcome.verdict())
            .collect()
    }

    #[tokio::test]
    async fn scenario_1_matches_annotations() {
        init_logging();
        let (_, driver) = driver(ScriptedChecker::scenarios(), 4);
        let suite = suite(
            vec![
                crate::harness::Definition::Property(
                    property("scenario1", SCENARIO_1, &[(Pass, "c.a.b"), (Pass, "b"), (Fail, "a.b.c.b")])
                )
            ]
        );

        let report = Aggregator::new(driver).run(&suite).await;

        assert_eq!(
            verdicts(&report),
            vec![Some(Verdict::Holds), Some(Verdict::Holds), Some(Verdict::Violated)]
        );
        assert!(report.is_success());
        assert_eq!(report.summary.matches, 3);
    }

    #[tokio::test]
    async fn scenario_2_matches_annotations() {
        let (_, driver) = driver(ScriptedChecker::scenarios(), 4);
        let suite = suite(
            vec![
                crate::harness::Definition::Property(
                    property("scenario2", SCENARIO_2, &[(Pass, "c.a.b"), (Fail, "b"), (Pass, "a.b.c.b")])
                )
            ]
        );

        let report = Aggregator::new(driver).run(&suite).await;

        assert_eq!(
            verdicts(&report),
            vec![Some(Verdict::Holds), Some(Verdict::Violated), Some(Verdict::Holds)]
        );
        assert!(report.is_success());
    }

    #[tokio::test]
    async fn collection_is_the_conjunction_of_its_members() {
        let (checker, driver) = driver(ScriptedChecker::scenarios(), 2);
        let p1 = property("scenario1", SCENARIO_1, &[]);
        let p2 = property("scenario2", SCENARIO_2, &[]);
        let suite = suite(
            vec![collection("both", &[p1, p2], &[(Pass, "c.a.b"), (Fail, "b"), (Fail, "a.b.c.b")])]
        );

        let report = Aggregator::new(driver).run(&suite).await;

        assert_eq!(
            verdicts(&report),
            vec![Some(Verdict::Holds), Some(Verdict::Violated), Some(Verdict::Violated)]
        );
        assert!(report.is_success());
        assert_eq!(checker.call_count(), 6);

        let on_b = &report.results[1];
        assert_eq!(on_b.id.kind, CaseKind::Collection);
        let violated: Vec<_> = on_b.violated_members().map(|m| m.property.as_str()).collect();
        assert_eq!(violated, vec!["scenario2"]);
    }

    #[tokio::test]
    async fn conjunction_checks_every_member_after_a_failure() {
        let checker = ScriptedChecker::scenarios().broken(SCENARIO_1);
        let (checker, driver) = driver(checker, 1);
        let members = vec![
            property("scenario1", SCENARIO_1, &[]),
            property("scenario2", SCENARIO_2, &[])
        ];

        let conjunction = evaluate_conjunction(&driver, &members, &trace("b")).await;

        assert_eq!(checker.call_count(), 2);
        assert_eq!(conjunction.members.len(), 2);
        assert_eq!(conjunction.members[1].outcome.verdict(), Some(Verdict::Violated));
        match &conjunction.outcome {
            Outcome::ToolFailure { failure } => assert!(failure.detail.contains("scenario1")),
            other => panic!("expected a tool failure, got {:?}", other),
        }
    }

    #[test]
    fn fold_is_logical_and() {
        let member = |name: &str, verdict| MemberOutcome {
            property: name.to_string(),
            outcome: Outcome::Verdict { verdict },
        };
        let holds = Outcome::Verdict { verdict: Verdict::Holds };
        let violated = Outcome::Verdict { verdict: Verdict::Violated };

        assert_eq!(fold(&[member("x", Verdict::Holds), member("y", Verdict::Holds)]), holds);
        assert_eq!(fold(&[member("x", Verdict::Holds), member("y", Verdict::Violated)]), violated);
        assert_eq!(fold(&[member("x", Verdict::Violated), member("y", Verdict::Holds)]), violated);

        let failed = MemberOutcome {
            property: "z".to_string(),
            outcome: Outcome::ToolFailure { failure: ToolFailure::new("pbessolve", "crashed") },
        };
        assert!(matches!(fold(&[member("x", Verdict::Violated), failed]), Outcome::ToolFailure { .. }));
    }

    #[tokio::test]
    async fn mismatches_and_tool_failures_are_counted_separately() {
        let checker = ScriptedChecker::scenarios().broken(SCENARIO_2);
        let (_, driver) = driver(checker, 4);
        let suite = suite(
            vec![
                crate::harness::Definition::Property(
                    property("scenario1", SCENARIO_1, &[(Fail, "c.a.b"), (Pass, "b")])
                ),
                crate::harness::Definition::Property(property("scenario2", SCENARIO_2, &[(Pass, "b")]))
            ]
        );

        let report = Aggregator::new(driver).run(&suite).await;

        let statuses: Vec<_> = report.results
            .iter()
            .map(|r| r.status)
            .collect();
        assert_eq!(statuses, vec![CaseStatus::Mismatch, CaseStatus::Match, CaseStatus::ToolFailure]);
        assert_eq!(
            report.summary,
            Summary { total: 3, matches: 1, mismatches: 1, tool_failures: 1, setup_errors: 0 }
        );
        assert!(!report.is_success());

        let message = report.results[0].to_error().unwrap().to_string();
        assert!(message.contains("expected FAIL"), "{}", message);
        assert!(report.results[1].to_error().is_none());
    }

    #[tokio::test]
    async fn results_are_reported_in_definition_order() {
        let checker = ScriptedChecker::scenarios().delayed("c.a.b", Duration::from_millis(50));
        let (_, driver) = driver(checker, 8);
        let suite = suite(
            vec![
                crate::harness::Definition::Property(
                    property("scenario1", SCENARIO_1, &[(Pass, "c.a.b"), (Pass, "b")])
                ),
                crate::harness::Definition::Property(
                    property("scenario2", SCENARIO_2, &[(Pass, "c.a.b"), (Fail, "b")])
                )
            ]
        );

        let mut completion_order = Vec::new();
        let report = Aggregator::new(driver).run_until(&suite, std::future::pending::<()>(), |r| {
            completion_order.push(r.id.sort_key())
        }).await;

        let keys: Vec<_> = report.results
            .iter()
            .map(|r| r.id.sort_key())
            .collect();
        assert_eq!(keys, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert_eq!(completion_order.len(), 4);
        assert_ne!(completion_order, keys);
    }

    #[tokio::test]
    async fn checker_invocations_are_bounded_by_jobs() {
        let checker = ScriptedChecker::scenarios()
            .delayed("c.a.b", Duration::from_millis(20))
            .delayed("b", Duration::from_millis(20))
            .delayed("a.b.c.b", Duration::from_millis(20));
        let (checker, driver) = driver(checker, 2);
        let p1 = property("scenario1", SCENARIO_1, &[(Pass, "c.a.b"), (Pass, "b"), (Fail, "a.b.c.b")]);
        let p2 = property("scenario2", SCENARIO_2, &[(Pass, "c.a.b"), (Fail, "b"), (Pass, "a.b.c.b")]);
        let suite = suite(
            vec![
                crate::harness::Definition::Property(p1.clone()),
                crate::harness::Definition::Property(p2.clone()),
                collection("both", &[p1, p2], &[(Pass, "c.a.b"), (Fail, "b"), (Fail, "a.b.c.b")])
            ]
        );

        let report = Aggregator::new(driver).run(&suite).await;

        assert!(report.is_success());
        assert_eq!(checker.call_count(), 12);
        let peak = checker.max_in_flight.load(Ordering::SeqCst);
        assert!(peak <= 2, "peak concurrency {}", peak);
    }

    #[tokio::test]
    async fn repeated_runs_agree() {
        let (_, driver) = driver(ScriptedChecker::scenarios(), 3);
        let p1 = property("scenario1", SCENARIO_1, &[(Pass, "c.a.b"), (Pass, "b"), (Fail, "a.b.c.b")]);
        let suite = suite(vec![crate::harness::Definition::Property(p1)]);
        let aggregator = Aggregator::new(driver);

        let first = aggregator.run(&suite).await;
        let second = aggregator.run(&suite).await;

        assert_eq!(verdicts(&first), verdicts(&second));
        assert_eq!(first.summary, second.summary);
    }

    #[tokio::test]
    async fn abort_keeps_completed_results() {
        let checker = ScriptedChecker::scenarios()
            .delayed("c.a.b", Duration::from_secs(30))
            .delayed("b", Duration::from_millis(1));
        let (_, driver) = driver(checker, 4);
        let suite = suite(
            vec![
                crate::harness::Definition::Property(
                    property("scenario1", SCENARIO_1, &[(Pass, "c.a.b"), (Pass, "b")])
                )
            ]
        );

        let shutdown = tokio::time::sleep(Duration::from_millis(300));
        let report = Aggregator::new(driver).run_until(&suite, shutdown, |_| {}).await;

        assert!(report.aborted);
        assert!(!report.is_success());
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].trace, trace("b"));
    }

    #[tokio::test]
    async fn setup_errors_fail_the_run() {
        let (_, driver) = driver(ScriptedChecker::scenarios(), 1);
        let mut suite = suite(Vec::new());
        suite.setup_errors.push(SetupError {
            path: "properties/broken.mcf".into(),
            kind: SetupErrorKind::MalformedAnnotation,
            message: "broken".to_string(),
        });

        let report = Aggregator::new(driver).run(&suite).await;

        assert_eq!(report.summary.total, 0);
        assert_eq!(report.summary.setup_errors, 1);
        assert!(!report.is_success());
    }

    #[tokio::test]
    async fn json_report_names_statuses() {
        let (_, driver) = driver(ScriptedChecker::scenarios(), 1);
        let suite = suite(
            vec![crate::harness::Definition::Property(property("scenario2", SCENARIO_2, &[(Pass, "b")]))]
        );

        let report = Aggregator::new(driver).run(&suite).await;
        let json = crate::cli::report::to_json(&report).unwrap();

        assert!(json.contains("\"status\": \"mismatch\""), "{}", json);
        assert!(json.contains("\"expected\": \"PASS\""), "{}", json);
        assert!(json.contains("\"verdict\": \"violated\""), "{}", json);
    }
}
