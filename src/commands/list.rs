use anyhow::Result;
use countdown_core::config::CountdownConfig;
use countdown_core::view_model::Deriver;

use super::{connect, load, print_heading};
use crate::render::Render;

pub async fn run(config: &CountdownConfig, json: bool) -> Result<()> {
    let mut controller = connect(config)?;
    load(&mut controller).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(controller.events())?);
        return Ok(());
    }

    let mut deriver = Deriver::new(config.display);
    print_heading();
    println!("{}", controller.view(&mut deriver).render());

    Ok(())
}
