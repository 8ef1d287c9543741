//! Registration table of the chat commands the plugin serves.

use crate::command::{
    GET_CURRENT_LIMITS, GET_LOG, SET_LOGS_LIMIT, SET_LOGS_START_TIME, SET_REPORT_FREQUENCY,
    SUBSCRIBE, UNSUBSCRIBE,
};

/// Metadata the host needs to register and describe a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    /// Trigger word, e.g. `get-log`.
    pub name: &'static str,
    /// One-line description for help output.
    pub description: &'static str,
    /// Autocomplete hint describing the parameters.
    pub hint: &'static str,
}

const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: SET_LOGS_LIMIT,
        description: "Set the maximum number of records returned by get-log",
        hint: "<count>",
    },
    CommandInfo {
        name: SET_LOGS_START_TIME,
        description: "Set how far back get-log looks, in seconds",
        hint: "<seconds>",
    },
    CommandInfo {
        name: GET_LOG,
        description: "Show recent alerts or notifications",
        hint: "alerts|notifications [host <name>|service <description>]",
    },
    CommandInfo {
        name: SET_REPORT_FREQUENCY,
        description: "Set the system monitoring report interval, in minutes",
        hint: "<minutes>",
    },
    CommandInfo {
        name: SUBSCRIBE,
        description: "Post reports or configuration changes into this channel",
        hint: "report|configuration-changes",
    },
    CommandInfo {
        name: UNSUBSCRIBE,
        description: "Stop posting reports or configuration changes",
        hint: "report|configuration-changes",
    },
    CommandInfo {
        name: GET_CURRENT_LIMITS,
        description: "Show the current settings",
        hint: "",
    },
];

/// All registered commands, in help order.
pub fn registered_commands() -> &'static [CommandInfo] {
    COMMANDS
}

/// Multi-line help text, one command per line.
pub fn help_text() -> String {
    COMMANDS
        .iter()
        .map(|info| {
            if info.hint.is_empty() {
                format!("/{} - {}", info.name, info.description)
            } else {
                format!("/{} {} - {}", info.name, info.hint, info.description)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
