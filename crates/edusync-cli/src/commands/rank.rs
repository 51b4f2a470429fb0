//! Ranked task queue and next-task recommendation.

use clap::Args;

use edusync_core::{BoardAction, EnergyLevel, Priority, RankedEntry, TaskBoard};

use super::{Context, GlobalArgs};

#[derive(Args, Debug)]
pub struct RankArgs {
    /// Override the logged energy level (high, medium, low)
    #[arg(long)]
    pub energy: Option<EnergyLevel>,
    /// Only tasks of this course (exact match)
    #[arg(long)]
    pub course: Option<String>,
    /// Only tasks of this priority
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Show at most N tasks
    #[arg(long, value_parser = parse_limit)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct NextArgs {
    /// Override the logged energy level (high, medium, low)
    #[arg(long)]
    pub energy: Option<EnergyLevel>,
}

fn parse_limit(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn apply_args(
    board: &TaskBoard,
    energy: Option<EnergyLevel>,
    course: Option<String>,
    priority: Option<Priority>,
) -> TaskBoard {
    let mut actions = Vec::new();
    if let Some(energy) = energy {
        actions.push(BoardAction::SetEnergy(energy));
    }
    if course.is_some() {
        actions.push(BoardAction::SetCourseFilter(course));
    }
    if priority.is_some() {
        actions.push(BoardAction::SetPriorityFilter(priority));
    }
    board.apply_all(actions)
}

pub async fn run_rank(
    global: &GlobalArgs,
    args: RankArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::resolve(global)?;
    let board = apply_args(&ctx.load().await?, args.energy, args.course, args.priority);

    let mut view = board.view(ctx.today, &ctx.ranker(), ctx.config.ranking.queue_size);
    if let Some(limit) = args.limit {
        view.ranked.truncate(limit);
        view.queue.truncate(limit);
    }

    if global.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!(
        "Optimized for {} energy ({} shown, {} hidden by filters)",
        view.energy,
        view.ranked.len(),
        view.filtered_out
    );
    if view.ranked.is_empty() {
        if board.filter().is_empty() {
            println!("No tasks found.");
        } else {
            println!("No tasks found. Try adjusting your filters.");
        }
        return Ok(());
    }

    println!(
        "{:>3}  {:>5}  {:<8}  {:<10}  {:<10}  {:<12}  {}",
        "#", "Score", "Priority", "Due", "Status", "Course", "Title"
    );
    for entry in &view.ranked {
        println!("{}", format_row(entry));
    }
    Ok(())
}

pub async fn run_next(
    global: &GlobalArgs,
    args: NextArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::resolve(global)?;
    let board = apply_args(&ctx.load().await?, args.energy, None, None);
    let view = board.view(ctx.today, &ctx.ranker(), ctx.config.ranking.queue_size);

    if global.json {
        println!("{}", serde_json::to_string_pretty(&view.next)?);
        return Ok(());
    }

    let Some(next) = view.next else {
        println!("Nothing to do. Create your first task to get started!");
        return Ok(());
    };
    let task = &next.ranked.task;
    println!("Recommended next task ({} energy):", view.energy);
    println!("  {} [{}]", task.title, task.priority);
    println!("  Course: {}", task.course);
    println!("  Due:    {} ({})", task.due_date, next.due_status);
    if let Some(progress) = task.progress {
        println!("  Progress: {progress}%");
    }

    if view.queue.len() > 1 {
        println!("\nUp next:");
        for entry in view.queue.iter().skip(1) {
            println!("  {}. {} ({})", entry.ranked.rank, entry.ranked.task.title, entry.due_status);
        }
    }
    Ok(())
}

fn format_row(entry: &RankedEntry) -> String {
    let task = &entry.ranked.task;
    let marker = if entry.due_status.needs_attention() { "!" } else { " " };
    format!(
        "{:>3}  {:>5}  {:<8}  {:<10}  {}{:<9}  {:<12}  {}",
        entry.ranked.rank,
        entry.ranked.score.total,
        task.priority.as_str(),
        task.due_date.format("%Y-%m-%d").to_string(),
        marker,
        entry.due_status.to_string(),
        task.course,
        task.title
    )
}
