use anyhow::Result;
use countdown_core::config::CountdownConfig;
use countdown_core::view_model::Deriver;
use owo_colors::OwoColorize;

use super::{connect, load, print_heading};
use crate::render::Render;
use crate::utils::tui;

pub async fn run(config: &CountdownConfig, id: &str) -> Result<()> {
    let mut controller = connect(config)?;
    load(&mut controller).await?;

    let name = controller
        .events()
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.name.clone())
        .unwrap_or_else(|| id.to_string());

    let spinner = tui::create_spinner(format!("Deleting {name}..."));
    let result = controller.delete(id).await;
    spinner.finish_and_clear();

    if let Err(notice) = result {
        eprintln!("{}", notice.render());
        return Err(notice.into());
    }

    println!("{} {}\n", "Deleted".red(), name);
    let mut deriver = Deriver::new(config.display);
    print_heading();
    println!("{}", controller.view(&mut deriver).render());

    Ok(())
}
