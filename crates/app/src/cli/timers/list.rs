use countdown_app::domain::timers::TimersService;

use super::ShopArgs;

pub(crate) async fn run(args: ShopArgs) -> Result<(), String> {
    let service = args.service().await?;
    let now = args.point_in_time();

    let timers = service
        .list_timers(args.shop.clone())
        .await
        .map_err(|error| format!("failed to list timers: {error}"))?;

    if timers.is_empty() {
        println!("no timers found for shop {}", args.shop);
        return Ok(());
    }

    for timer in timers {
        println!("timer_uuid: {}", timer.uuid);
        println!("title: {}", timer.title);
        println!("status: {}", timer.status(now));
        println!("starts_at: {}", timer.starts_at);
        println!("ends_at: {}", timer.ends_at);
        println!("in_urgency_mode: {}", timer.is_in_urgency_mode(now));
        println!();
    }

    Ok(())
}
