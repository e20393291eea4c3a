use anyhow::Result;
use chrono::Utc;
use eisen_core::promotion::PromotionDecision;
use eisen_core::repository::Repository;
use owo_colors::OwoColorize;

pub async fn promote_tasks(repo: &impl Repository) -> Result<()> {
    let outcomes = repo.refresh_promotions(Utc::now()).await?;
    if outcomes.is_empty() {
        println!("Nothing to promote.");
        return Ok(());
    }

    for outcome in &outcomes {
        let destination = match outcome.decision {
            PromotionDecision::PromoteToTarget { target } => target.label().to_string(),
            PromotionDecision::PromoteToBuffer { buffer, .. } => format!("{} (buffer)", buffer.label()),
            PromotionDecision::Reschedule { .. } | PromotionDecision::NoChange => continue,
        };
        println!(
            "{} {} → {}",
            outcome.task.short_id().yellow(),
            outcome.task.title,
            destination.bold()
        );
    }
    println!("Promoted {} task(s).", outcomes.len());

    Ok(())
}
