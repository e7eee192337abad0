use schedule_manager::application::dto::ProposedScheduleDto;
use schedule_manager::domain::config_model::ScheduleConfig;

pub fn show_proposed_schedule_debug_data(schedule: &ProposedScheduleDto) {
    println!("\n=======================================================");
    println!("🗓️ [DEBUG] 提案スケジュール (基準: {} @ {})", schedule.anchor_status_key, schedule.anchor_date);
    println!("=======================================================");

    for slot in &schedule.slots {
        println!(
            "   {:<10} : {}  ({:+} 稼働日)",
            slot.slot.as_str(), slot.date, slot.working_days_from_anchor
        );
    }
    println!("=======================================================\n");
}

pub fn show_schedule_config_debug_data(config: &ScheduleConfig) {
    println!("\n=======================================================");
    println!("📋 [DEBUG] スケジュール設定データ");
    println!("=======================================================");
    for status in &config.statuses {
        println!(
            "🔖 ステータス: {} (order: {}, slot: {}){}{}",
            status.key,
            status.order,
            status.slot.as_str(),
            if status.is_anchor { " [基準]" } else { "" },
            if status.is_final { " [完了]" } else { "" },
        );
    }
    println!("-------------------------------------------------------");
    for rule in &config.rules {
        println!(
            "📏 ルール[{}]: {} = {} の {} 稼働日 {:?}{}",
            rule.id,
            rule.subject_status_key,
            rule.anchor_status_key,
            rule.offset_days,
            rule.direction,
            if rule.active { "" } else { " (無効)" },
        );
    }
    println!("-------------------------------------------------------");
    for holiday in &config.holidays {
        println!("🚫 休日: {}", holiday);
    }
    println!("=======================================================\n");
}
