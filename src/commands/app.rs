//! Interactive session: the list stays on screen and is re-derived after
//! every action, like the single-page app it stands in for.

use anyhow::Result;
use countdown_core::config::CountdownConfig;
use countdown_core::controller::{AddOutcome, View};
use countdown_core::view_model::{DecoratedEvent, Deriver};
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use super::{AppController, connect, load, print_heading};
use crate::render::{Render, pick_label};
use crate::utils::tui;

const ACTIONS: [&str; 4] = ["Add event", "Delete event", "Refresh", "Quit"];

pub async fn run(config: &CountdownConfig) -> Result<()> {
    let mut controller = connect(config)?;
    load(&mut controller).await?;

    loop {
        let view = controller.view(&mut Deriver::new(config.display));
        println!();
        print_heading();
        println!("{}", view.render());
        println!();

        let action = Select::new()
            .with_prompt("What next?")
            .items(&ACTIONS)
            .default(0)
            .interact()?;

        match action {
            0 => add(&mut controller).await?,
            1 => {
                let rows = match view {
                    View::Events(rows) => rows,
                    View::Loading | View::Empty => Vec::new(),
                };
                delete(&mut controller, &rows).await?
            }
            2 => {
                if let Err(e) = load(&mut controller).await {
                    eprintln!("{}", format!("{e:#}").red());
                }
            }
            _ => return Ok(()),
        }
    }
}

async fn add(controller: &mut AppController) -> Result<()> {
    let name: String = Input::new()
        .with_prompt("Event name")
        .allow_empty(true)
        .interact_text()?;
    let date: String = Input::new()
        .with_prompt("Event date (YYYY-MM-DD)")
        .allow_empty(true)
        .interact_text()?;

    controller.set_name(name);
    controller.set_date(date);

    let spinner = tui::create_spinner("Adding...");
    let result = controller.add().await;
    spinner.finish_and_clear();

    match result {
        Ok(AddOutcome::Added) => {}
        Ok(AddOutcome::Skipped) => println!("{}", "Event name and date are required".dimmed()),
        Err(notice) => eprintln!("{}", notice.render()),
    }

    Ok(())
}

/// Pick from the rows currently on screen, so labels match what was shown.
async fn delete(controller: &mut AppController, rows: &[DecoratedEvent]) -> Result<()> {
    if rows.is_empty() {
        println!("{}", "Nothing to delete".dimmed());
        return Ok(());
    }

    let mut items: Vec<String> = rows.iter().map(pick_label).collect();
    items.push("Cancel".to_string());

    let choice = Select::new()
        .with_prompt("Delete which event?")
        .items(&items)
        .default(0)
        .interact()?;

    let Some(row) = rows.get(choice) else {
        return Ok(());
    };

    let spinner = tui::create_spinner("Deleting...");
    let result = controller.delete(&row.event.id).await;
    spinner.finish_and_clear();

    if let Err(notice) = result {
        eprintln!("{}", notice.render());
    }

    Ok(())
}
