use anyhow::Context;
use room_server::seed::{default_menu, default_rooms};
use room_server::{Config, RoomManager, SystemClock, init_logger_with_file, print_banner};
use shared::{Decimal, Language};
use shared::format::{format_currency, format_duration};
use std::path::Path;
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    // 1. 环境 (.env 可选)
    dotenv::dotenv().ok();

    // 2. 加载配置
    let config = Config::from_env();
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref().map(Path::new),
    );

    print_banner();
    tracing::info!(
        work_dir = %config.work_dir,
        backend = ?config.store_backend,
        timezone = %config.timezone,
        "Room server starting..."
    );

    // 3. 存储 + 管理器
    let store = config.open_store().context("failed to open store")?;
    let manager = RoomManager::open(store, Arc::new(SystemClock), config.billing.clone())
        .context("failed to load rooms")?;
    manager
        .seed_if_empty(default_rooms(), default_menu())
        .context("failed to seed default catalog")?;

    // 4. 打印包厢看板
    print_board(&manager);
    Ok(())
}

fn print_board(manager: &RoomManager) {
    let lang = Language::En;
    println!("{:<6} {:<14} {:<12} {:>10} {:>14}", "ID", "NAME", "STATUS", "TIME", "BILL");
    for room in manager.rooms() {
        let (time, bill) = match (manager.current_duration(&room.id), manager.current_bill(&room.id)) {
            (Some(ms), Some(bill)) => (
                format_duration(ms.try_into().unwrap_or(i64::MAX)),
                format_currency(bill.total_amount, lang),
            ),
            _ => ("-".to_string(), "-".to_string()),
        };
        println!(
            "{:<6} {:<14} {:<12} {:>10} {:>14}",
            room.id,
            room.name.get(lang),
            room.status,
            time,
            bill
        );
    }

    let history = manager.history();
    let revenue: Decimal = history.iter().map(|r| r.settlement.total_bill).sum();
    println!(
        "\n{} completed sessions, {}",
        history.len(),
        format_currency(revenue, lang)
    );
}
