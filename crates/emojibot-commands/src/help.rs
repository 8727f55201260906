//! `help` command.

use crate::framework::{Context, Error};

const FOOTER: &str = "Emoji can be given as markdown, ID or name. \
`steal` also takes a message ID or link.";

fn configuration() -> poise::builtins::HelpConfiguration<'static> {
    poise::builtins::HelpConfiguration {
        extra_text_at_bottom: FOOTER,
        show_subcommands: true,
        ..Default::default()
    }
}

/// Sends the help text of one command.
pub async fn send_command_help(ctx: Context<'_>, command: &str) -> Result<(), Error> {
    poise::builtins::help(ctx, Some(command), configuration()).await?;
    Ok(())
}

/// Shows this help menu or the help of one command.
#[poise::command(prefix_command, slash_command, track_edits)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show help about"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    poise::builtins::help(ctx, command.as_deref(), configuration()).await?;
    Ok(())
}
