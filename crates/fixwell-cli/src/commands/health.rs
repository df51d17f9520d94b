use fixwell_db::StoreService;
use tracing::{info, warn};

pub async fn run(service: &StoreService) -> anyhow::Result<()> {
    let healthy = service.check_health().await;
    let rebuilds = service.supervisor().rebuild_attempts();

    if healthy {
        info!(rebuilds, "health probe passed");
        println!("store: ok (connection rebuilds so far: {rebuilds})");
        Ok(())
    } else {
        warn!(rebuilds, "health probe failed after forced reconnect");
        println!("store: UNREACHABLE (connection rebuilds so far: {rebuilds})");
        anyhow::bail!("health probe failed even after a forced reconnect");
    }
}
