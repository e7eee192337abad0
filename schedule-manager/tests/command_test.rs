mod tools;

#[cfg(test)]
mod command_tests {
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    use production_schedule::{Direction, ScheduleError, Slot};
    use schedule_manager::{
        application::commands::*,
        domain::config_model::ScheduleConfig,
        domain::error::StoreError,
        AppServices,
    };

    use crate::tools;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create memory pool");

        schedule_manager::migrate(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    async fn setup_test_services() -> AppServices {
        AppServices::new(setup_test_db().await)
    }

    /// 画面から設定していく流れ
    async fn setup_workflow(services: &AppServices) {
        services.status.add_status("not-assigned", Slot::Nesting).await.unwrap();
        services.status.add_status("nesting-complete", Slot::Nesting).await.unwrap();
        services.status.add_status("machining-complete", Slot::Machining).await.unwrap();
        services.status.add_status("assembly-complete", Slot::Assembly).await.unwrap();
        services.status.add_status("delivered", Slot::Delivery).await.unwrap();
        services.status.set_anchor("delivered").await.unwrap();
        services.status.set_final("delivered", true).await.unwrap();

        services.rule.add_rule("nesting-complete", "delivered", 6, Direction::Before).await.unwrap();
        services.rule.add_rule("machining-complete", "delivered", 4, Direction::Before).await.unwrap();
        services.rule.add_rule("assembly-complete", "delivered", 2, Direction::Before).await.unwrap();
    }

    #[tokio::test]
    async fn test_full_scenario_from_ui() {
        let services = setup_test_services().await;
        setup_workflow(&services).await;

        let config = load_config(&services).await.unwrap();
        tools::show_output::show_schedule_config_debug_data(&config);

        // 基準ステータスは省略 -> delivered
        let schedule = propose_schedule(&services, "14/07/2025", None).await.unwrap();
        tools::show_output::show_proposed_schedule_debug_data(&schedule);

        assert_eq!(schedule.anchor_status_key, "delivered");
        assert_eq!(schedule.date_of(Slot::Delivery), Some("14/07/2025"));
        assert_eq!(schedule.date_of(Slot::Assembly), Some("10/07/2025"));
        assert_eq!(schedule.date_of(Slot::Machining), Some("08/07/2025"));
        assert_eq!(schedule.date_of(Slot::Nesting), Some("04/07/2025"));

        let distances: Vec<i64> = schedule.slots.iter().map(|s| s.working_days_from_anchor).collect();
        // Nesting, Machining, Assembly, Delivery の順
        assert_eq!(distances, vec![-6, -4, -2, 0]);
    }

    #[tokio::test]
    async fn test_holiday_moves_proposal() {
        let services = setup_test_services().await;
        setup_workflow(&services).await;
        services.holiday.add_holiday("11/07/2025".parse().unwrap(), "Shutdown").await.unwrap();

        let schedule = propose_schedule(&services, "14/07/2025", Some("delivered")).await.unwrap();

        assert_eq!(schedule.date_of(Slot::Assembly), Some("09/07/2025"));
        let assembly = schedule.slots.iter().find(|s| s.slot == Slot::Assembly).unwrap();
        assert_eq!(assembly.working_days_from_anchor, -2);
    }

    #[tokio::test]
    async fn test_disabled_rule_leaves_slot_empty() {
        let services = setup_test_services().await;
        setup_workflow(&services).await;
        let rules = services.rule.list_rules().await.unwrap();
        let nesting = rules.iter().find(|r| r.subject_status_key == "nesting-complete").unwrap();
        services.rule.set_active(nesting.id, false).await.unwrap();

        let schedule = propose_schedule(&services, "14/07/2025", None).await.unwrap();

        assert_eq!(schedule.date_of(Slot::Nesting), None);
        assert_eq!(schedule.slots.len(), 3);
    }

    #[tokio::test]
    async fn test_errors_are_passed_through() {
        let services = setup_test_services().await;
        setup_workflow(&services).await;

        let r = propose_schedule(&services, "14-07-2025", None).await;
        assert!(matches!(r, Err(StoreError::Schedule(ScheduleError::InvalidAnchorDate(_)))));

        let r = propose_schedule(&services, "14/07/2025", Some("shipped")).await;
        assert!(matches!(r, Err(StoreError::Schedule(ScheduleError::UnknownAnchorStatus(_)))));
    }

    #[tokio::test]
    async fn test_no_anchor_configured() {
        let services = setup_test_services().await;
        services.status.add_status("delivered", Slot::Delivery).await.unwrap();

        let r = propose_schedule(&services, "14/07/2025", None).await;
        assert!(matches!(r, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_advance_job_status_cycles() {
        let services = setup_test_services().await;
        setup_workflow(&services).await;

        let next = advance_job_status(&services, "assembly-complete").await.unwrap();
        assert_eq!(next.key, "delivered");
        assert!(next.is_final);

        let next = advance_job_status(&services, "delivered").await.unwrap();
        assert_eq!(next.key, "not-assigned");
        assert!(!next.is_final);

        // 並び替え後は新しい順で回る
        services
            .status
            .reorder_statuses(&["delivered", "not-assigned", "nesting-complete", "machining-complete", "assembly-complete"])
            .await
            .unwrap();
        let next = advance_job_status(&services, "assembly-complete").await.unwrap();
        assert_eq!(next.key, "delivered");
        let next = advance_job_status(&services, "delivered").await.unwrap();
        assert_eq!(next.key, "not-assigned");
    }

    #[tokio::test]
    async fn test_advance_errors() {
        let services = setup_test_services().await;

        let r = advance_job_status(&services, "delivered").await;
        assert!(matches!(r, Err(StoreError::Schedule(ScheduleError::EmptyStatusSet))));

        setup_workflow(&services).await;
        let r = advance_job_status(&services, "painted").await;
        assert!(matches!(r, Err(StoreError::Schedule(ScheduleError::UnknownStatus(_)))));
    }

    #[tokio::test]
    async fn test_import_config_from_json() {
        let services = setup_test_services().await;

        let config: ScheduleConfig = serde_json::from_str(
            r#"{
                "statuses": [
                    {"id": 1, "key": "assembly-complete", "order": 10, "slot": "assembly"},
                    {"id": 2, "key": "delivered", "order": 20, "slot": "delivery", "isAnchor": true, "isFinal": true}
                ],
                "rules": [
                    {"id": 1, "subjectStatusKey": "assembly-complete", "anchorStatusKey": "delivered",
                     "offsetDays": 2, "direction": "before"}
                ],
                "holidays": ["10/07/2025"]
            }"#,
        )
        .unwrap();

        let summary = import_config(&services, &config).await.unwrap();
        assert_eq!((summary.statuses, summary.rules, summary.holidays), (2, 1, 1));

        let schedule = propose_schedule(&services, "14/07/2025", None).await.unwrap();
        // 10日が休みなので 11(1), 09(2)
        assert_eq!(schedule.date_of(Slot::Assembly), Some("09/07/2025"));

        let stored = load_config(&services).await.unwrap();
        assert_eq!(stored.statuses[1].order, 20);
        assert!(stored.statuses[1].is_final);
    }

    // 途中のルールで失敗したら何も残らず、同じ設定をやり直せる
    #[tokio::test]
    async fn test_failed_import_leaves_store_empty() {
        let services = setup_test_services().await;

        let mut config: ScheduleConfig = serde_json::from_str(
            r#"{
                "statuses": [
                    {"id": 1, "key": "assembly-complete", "order": 10, "slot": "assembly"},
                    {"id": 2, "key": "delivered", "order": 20, "slot": "delivery", "isAnchor": true}
                ],
                "rules": [
                    {"id": 1, "subjectStatusKey": "assembly-complete", "anchorStatusKey": "delivered",
                     "offsetDays": 2, "direction": "before"},
                    {"id": 2, "subjectStatusKey": "painted", "anchorStatusKey": "delivered",
                     "offsetDays": 1, "direction": "before"}
                ],
                "holidays": ["10/07/2025"]
            }"#,
        )
        .unwrap();

        let r = import_config(&services, &config).await;
        assert!(matches!(r, Err(StoreError::Database(_))));

        let stored = load_config(&services).await.unwrap();
        assert!(stored.statuses.is_empty());
        assert!(stored.rules.is_empty());
        assert!(stored.holidays.is_empty());

        config.rules.pop();
        let summary = import_config(&services, &config).await.unwrap();
        assert_eq!((summary.statuses, summary.rules, summary.holidays), (2, 1, 1));
    }

    #[tokio::test]
    async fn test_import_rejects_duplicate_order() {
        let services = setup_test_services().await;

        let config: ScheduleConfig = serde_json::from_str(
            r#"{
                "statuses": [
                    {"id": 1, "key": "assembly-complete", "order": 10, "slot": "assembly"},
                    {"id": 2, "key": "delivered", "order": 10, "slot": "delivery", "isAnchor": true}
                ]
            }"#,
        )
        .unwrap();

        let r = import_config(&services, &config).await;
        assert!(matches!(r, Err(StoreError::InvalidRecord(_))));
        assert!(load_config(&services).await.unwrap().statuses.is_empty());
    }

    // 同じ対象に2つのルール. 先に登録した (id が小さい) 方が使われる
    #[tokio::test]
    async fn test_lowest_rule_id_wins_for_same_subject() {
        let services = setup_test_services().await;
        setup_workflow(&services).await;

        let later = services.rule.add_rule("assembly-complete", "delivered", 1, Direction::Before).await.unwrap();
        let rules = services.rule.list_rules().await.unwrap();
        let earlier = rules
            .iter()
            .find(|r| r.subject_status_key == "assembly-complete" && r.id != later)
            .map(|r| r.id)
            .unwrap();
        assert!(earlier < later);

        // 2稼働日前 (earlier) -> 10/07
        let schedule = propose_schedule(&services, "14/07/2025", None).await.unwrap();
        assert_eq!(schedule.date_of(Slot::Assembly), Some("10/07/2025"));

        // earlier を消すと 1稼働日前 (later) -> 11/07
        services.rule.delete_rule(earlier).await.unwrap();
        let schedule = propose_schedule(&services, "14/07/2025", None).await.unwrap();
        assert_eq!(schedule.date_of(Slot::Assembly), Some("11/07/2025"));
    }

    #[tokio::test]
    async fn test_propose_without_store() {
        let config: ScheduleConfig = serde_json::from_str(
            r#"{
                "statuses": [
                    {"id": 1, "key": "assembly-complete", "order": 1, "slot": "assembly"},
                    {"id": 2, "key": "delivered", "order": 2, "slot": "delivery", "isAnchor": true}
                ],
                "rules": [
                    {"id": 1, "subjectStatusKey": "assembly-complete", "anchorStatusKey": "delivered",
                     "offsetDays": 2, "direction": "before"}
                ]
            }"#,
        )
        .unwrap();

        let schedule = propose_schedule_with(&config, "13/07/2025", None).unwrap();
        assert_eq!(schedule.date_of(Slot::Assembly), Some("10/07/2025"));
    }
}
