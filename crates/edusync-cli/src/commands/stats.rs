use super::{Context, GlobalArgs};

pub async fn run_stats(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::resolve(global)?;
    let board = ctx.load().await?;
    let stats = board.view(ctx.today, &ctx.ranker(), 1).stats;

    if global.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Total:     {}", stats.total);
        println!("Completed: {}", stats.completed);
        println!("Overdue:   {}", stats.overdue);
        println!("Urgent:    {}", stats.urgent);
    }
    Ok(())
}

pub async fn run_courses(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::resolve(global)?;
    let board = ctx.load().await?;
    let courses = edusync_core::courses(board.tasks());

    if global.json {
        println!("{}", serde_json::to_string_pretty(&courses)?);
    } else {
        for course in courses {
            println!("{course}");
        }
    }
    Ok(())
}
