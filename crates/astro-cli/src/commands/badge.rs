use anyhow::{Result, anyhow};
use astro_core::achievement::{Achievement, AchievementQueue};
use astro_core::config::AppConfig;

use super::{AuthArgs, start_app, wait_for_session};

fn parse_achievement(name: &str) -> Result<Achievement> {
    Achievement::from_flag_name(name)
        .or_else(|| Achievement::from_flag_name(&format!("achieved{}", name)))
        .or_else(|| {
            Achievement::ALL
                .iter()
                .copied()
                .find(|a| a.title().eq_ignore_ascii_case(name))
        })
        .ok_or_else(|| anyhow!("unknown achievement '{}'", name))
}

pub async fn run(
    config: &AppConfig,
    auth: AuthArgs,
    achievement: &str,
    pending: Vec<String>,
) -> Result<()> {
    let achievement = parse_achievement(achievement)?;
    let app = start_app(config, auth);
    wait_for_session(&app).await?;

    let target = app
        .achievements()
        .complete_achievement(achievement, AchievementQueue::new(pending))
        .await;

    let commander = app
        .store()
        .snapshot()
        .map(|s| s.profile.name.clone())
        .unwrap_or_default();
    println!("{}\n", achievement.title());
    println!("{}\n", achievement.narrative(&commander));
    println!("Next screen: {}", target.screen);
    if !target.pending_queue.is_empty() {
        let rest: Vec<&str> = target.pending_queue.iter().map(|s| s.as_str()).collect();
        println!("Still pending: {}", rest.join(", "));
    }

    app.shutdown().await;
    Ok(())
}
