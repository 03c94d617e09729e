use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use paneldeck::cli::Cli;
use paneldeck::workspace::{Workspace, WorkspaceHost};
use paneldeck::{VERSION, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Stdout is the protocol channel; logging goes to a file.
    logging::init();
    log::info!("Starting paneldeck v{VERSION}");

    let workspace = Arc::new(Workspace::new(cli.deadline()));
    let tab = match cli.tab_title {
        Some(title) => workspace.create_tab_titled(title),
        None => workspace.create_tab(),
    };
    log::info!("serving MCP session for tab {tab}");

    let mut host = WorkspaceHost::new(Arc::clone(&workspace), tab);
    paneldeck_mcp::run_mcp_server(&mut host);

    log::info!("MCP session ended");
    Ok(())
}
