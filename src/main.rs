use clap::Parser;
use notepad::cli::{
    handle_add, handle_delete, handle_edit, handle_list, handle_render, handle_shell, handle_show,
    Cli, Commands,
};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "NOTEPAD_LOG";

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let data_dir = cli.data_dir;
    let result = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => handle_shell(data_dir),
        Commands::Render { text } => handle_render(data_dir, text),
        Commands::List { json } => handle_list(data_dir, json),
        Commands::Show { id, json } => handle_show(data_dir, id, json),
        Commands::Add {
            title,
            content,
            stdin,
            json,
        } => handle_add(data_dir, title, content, stdin, json),
        Commands::Edit {
            id,
            title,
            content,
            stdin,
            json,
        } => handle_edit(data_dir, id, title, content, stdin, json),
        Commands::Delete { id, force } => handle_delete(data_dir, id, force),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
