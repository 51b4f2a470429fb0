//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;

use edusync_core::{DataSource, NewTask, Priority, TaskFilter};

use super::{split_tags, Context, GlobalArgs};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task in the document store
    Add {
        /// Task title
        title: String,
        /// Course or subject
        #[arg(long)]
        course: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: NaiveDate,
        /// Priority: high, medium or low (default: medium)
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },
    /// List tasks in stored order, without ranking
    List {
        /// Filter by course
        #[arg(long)]
        course: Option<String>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<Priority>,
    },
}

pub async fn run(
    global: &GlobalArgs,
    action: TaskAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::resolve(global)?;

    match action {
        TaskAction::Add {
            title,
            course,
            due,
            priority,
            description,
            tags,
        } => {
            let DataSource::Remote(client) = &ctx.source else {
                return Err("task add needs the document store; drop --demo/--tasks-file".into());
            };
            let new_task = NewTask {
                title,
                course,
                due_date: due,
                priority,
                description,
                tags: tags.as_deref().map(split_tags).unwrap_or_default(),
            };
            let task = client.create_task(&ctx.owner_id, &new_task).await?;
            if global.json {
                println!("{}", serde_json::to_string_pretty(&task)?);
            } else {
                println!("Task created: {}", task.id);
            }
        }
        TaskAction::List { course, priority } => {
            let board = ctx.load().await?;
            let mut filter = TaskFilter::new();
            if let Some(course) = course {
                filter = filter.with_course(course);
            }
            if let Some(priority) = priority {
                filter = filter.with_priority(priority);
            }
            let tasks = filter.apply(board.tasks());

            if global.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                for task in &tasks {
                    println!(
                        "{}  {:<6}  {}  {} ({})",
                        task.due_date,
                        task.priority.as_str(),
                        task.course,
                        task.title,
                        task.id
                    );
                }
            }
        }
    }
    Ok(())
}
