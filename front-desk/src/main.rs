use anyhow::Context;
use front_desk::{Config, FrontDesk, init_logger_with_file, seed};
use shared::models::{FoodOrderLine, TaskStatus};
use shared::ops::{OpsCommand, OpsCommandPayload};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境 (.env) 与日志
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );

    tracing::info!(hotel = %config.hotel_name, "Front desk starting...");

    // 2. 演示数据
    let mut desk = FrontDesk::new(seed::demo(), &config);
    let mut notices = desk.subscribe();
    let mut changes = desk.subscribe_changes();

    // 3. 前台办理入住
    let response = desk
        .execute(OpsCommand::new(
            "s2",
            OpsCommandPayload::CheckIn {
                booking_id: "b1".to_string(),
            },
        ))
        .await;
    if let Some(error) = &response.error {
        anyhow::bail!("check-in failed: {}", error.message);
    }
    println!("{}", response.message.unwrap_or_default());

    // 4. 客人点餐
    let club = seed::menu()
        .into_iter()
        .find(|m| m.name == "Club Sandwich")
        .context("menu has no Club Sandwich")?;
    let receipt = desk
        .guest_portal()
        .order_food("r2", vec![FoodOrderLine { item: club, quantity: 2 }])
        .await?;
    println!("{} (ref {})", receipt.message, receipt.reference);

    // 5. 客房部看板
    for task in desk.lane("s3", TaskStatus::Pending)? {
        println!("[housekeeping] {} ({:?})", task.title, task.priority);
    }

    let snapshot = desk.snapshot();
    println!(
        "revision {}: {} emails ({} unread), {} unread guest messages",
        snapshot.revision(),
        snapshot.staff_emails().len(),
        snapshot.unread_email_count(),
        desk.total_unread_messages()
    );

    while let Ok(notice) = notices.try_recv() {
        tracing::debug!(revision = notice.revision, command = %notice.command, "Desk notice");
    }
    while let Ok(change) = changes.try_recv() {
        tracing::debug!(
            revision = change.revision,
            collections = ?change.collections,
            "Store commit"
        );
    }
    Ok(())
}
