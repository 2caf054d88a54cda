//! Unavailability messages with remediation commands.

use owo_colors::OwoColorize;

fn command(cmd: &str) -> String {
    format!("`{}`", cmd.white().bold())
}

/// Suffix listing the commands that select a space.
pub(crate) fn space_remediation() -> String {
    format!(
        "\n\nPlease run: \n- {} to create a new space\n- {} to use an existing space\n- {} to list existing spaces",
        command("devspace create space [NAME]"),
        command("devspace use space [NAME]"),
        command("devspace list spaces"),
    )
}

/// Suffix for a space whose provider is missing from the provider config.
pub(crate) fn provider_remediation() -> String {
    format!(
        "\n\nPlease run: \n- {} to log into the provider again\n- {} to switch to a space of a known provider",
        command("devspace login"),
        command("devspace use space [NAME]"),
    )
}

pub(crate) fn not_a_space(variable: &str) -> String {
    format!(
        "Current context is not a space, but predefined var {} is used.{}",
        variable,
        space_remediation()
    )
}

pub(crate) fn not_logged_in(variable: &str) -> String {
    format!(
        "You are not logged into DevSpace Cloud, but predefined var {} is used.\n\nPlease run: \n- {} to login into devspace cloud. Alternatively you can also remove the variable ${{{}}} from your config",
        variable,
        command("devspace login"),
        variable
    )
}

pub(crate) fn no_git_repository(variable: &str) -> String {
    format!(
        "No git repository found, but predefined var {} is used",
        variable
    )
}

pub(crate) fn not_resolved(variable: &str) -> String {
    format!("Predefined var {} has not been resolved", variable)
}
