use anyhow::Result;
use countdown_core::config::CountdownConfig;
use countdown_core::controller::AddOutcome;
use countdown_core::view_model::Deriver;
use owo_colors::OwoColorize;

use super::{connect, print_heading};
use crate::render::Render;
use crate::utils::tui;

pub async fn run(config: &CountdownConfig, name: String, date: String) -> Result<()> {
    let mut controller = connect(config)?;
    controller.set_name(name.as_str());
    controller.set_date(date);

    let spinner = tui::create_spinner(format!("Adding {name}..."));
    let result = controller.add().await;
    spinner.finish_and_clear();

    match result {
        Ok(AddOutcome::Added) => {
            println!("{} {}\n", "Added".green(), name.trim());
            let mut deriver = Deriver::new(config.display);
            print_heading();
            println!("{}", controller.view(&mut deriver).render());
            Ok(())
        }
        Ok(AddOutcome::Skipped) => anyhow::bail!("Event name and date are required"),
        Err(notice) => {
            eprintln!("{}", notice.render());
            Err(notice.into())
        }
    }
}
