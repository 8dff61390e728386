//! Recent command - inspect and edit the recent searches list

use clap::Subcommand;

use crate::AppServices;

#[derive(Subcommand, Debug, Clone)]
pub enum RecentCommand {
    /// List recent searches, most recent first
    List,

    /// Record a search
    Add { text: String },

    /// Delete the entry at a position in the list
    Delete { index: usize },

    /// Delete every entry
    Clear,

    /// Move an existing entry to the front
    Touch { text: String },
}

/// Run a recent searches command
pub fn run(services: &AppServices, command: RecentCommand) -> anyhow::Result<()> {
    let recents = &services.recents;

    match command {
        RecentCommand::List => {}
        RecentCommand::Add { text } => recents.add(text),
        RecentCommand::Delete { index } => {
            let len = recents.recent_searches().len();
            if index >= len {
                anyhow::bail!("No recent search at index {} (list has {} entries)", index, len);
            }
            recents.delete(index);
        }
        RecentCommand::Clear => recents.clear(),
        RecentCommand::Touch { text } => recents.update_recent(&text),
    }

    print_list(&recents.recent_searches());
    Ok(())
}

fn print_list(entries: &[String]) {
    if entries.is_empty() {
        println!("No recent searches");
        return;
    }

    for (index, entry) in entries.iter().enumerate() {
        println!("{:>3}  {}", index, entry);
    }
}
