use countdown_app::domain::timers::TimersService;

use super::ShopArgs;

pub(crate) async fn run(args: ShopArgs) -> Result<(), String> {
    let service = args.service().await?;

    let stats = service
        .timer_stats(args.shop.clone(), args.point_in_time())
        .await
        .map_err(|error| format!("failed to compute timer stats: {error}"))?;

    println!("shop: {}", args.shop);
    println!("total: {}", stats.total);
    println!("active: {}", stats.active);
    println!("scheduled: {}", stats.scheduled);
    println!("expired: {}", stats.expired);
    println!("inactive: {}", stats.inactive);

    Ok(())
}
