use clap::{Arg, ArgAction, Command, value_parser};
use clap_complete::Shell;

use blues_traveler_core::HookEvent;

const EVENT_NAMES: [&str; 9] = [
    "PreToolUse",
    "PostToolUse",
    "UserPromptSubmit",
    "Notification",
    "Stop",
    "SubagentStop",
    "PreCompact",
    "SessionStart",
    "SessionEnd",
];

fn global_scope_arg() -> Arg {
    Arg::new("global")
        .long("global")
        .short('g')
        .help("Operate on ~/.claude/settings.json instead of the project settings")
        .action(ArgAction::SetTrue)
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

fn event_arg() -> Arg {
    Arg::new("event")
        .long("event")
        .short('e')
        .help("Lifecycle event to attach to")
        .value_parser(EVENT_NAMES)
}

pub fn build_cli() -> Command {
    Command::new("blues-traveler")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage tool-use hooks and their layered configuration")
        .long_about("blues-traveler installs hook commands into Claude settings files and resolves which hooks configuration applies to a project, merging project and global files and keeping per-project config in an XDG registry.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("install")
                .about("Install a hook command into settings")
                .arg(
                    Arg::new("hook-type")
                        .help("Hook type to run (for example: security, format)")
                        .required_unless_present("group")
                        .index(1)
                )
                .arg(
                    Arg::new("group")
                        .long("group")
                        .help("Install every job of a hooks config group")
                        .conflicts_with("hook-type")
                )
                .arg(event_arg().default_value(HookEvent::PreToolUse.as_str()))
                .arg(
                    Arg::new("matcher")
                        .long("matcher")
                        .short('m')
                        .help("Tool matcher pattern")
                        .default_value("*")
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .short('t')
                        .help("Timeout in seconds")
                        .value_parser(value_parser!(u64))
                )
                .arg(
                    Arg::new("args")
                        .long("arg")
                        .help("Extra argument appended to the hook command (repeatable)")
                        .action(ArgAction::Append)
                        .allow_hyphen_values(true)
                )
                .arg(global_scope_arg())
        )
        .subcommand(
            Command::new("uninstall")
                .about("Remove hook commands from settings")
                .arg(
                    Arg::new("hook-type")
                        .help("Hook type to remove")
                        .required_unless_present_any(["all", "group"])
                        .index(1)
                )
                .arg(
                    Arg::new("all")
                        .long("all")
                        .help("Remove every blues-traveler hook")
                        .action(ArgAction::SetTrue)
                        .conflicts_with_all(["hook-type", "group"])
                )
                .arg(
                    Arg::new("group")
                        .long("group")
                        .help("Remove the hooks generated from a config group")
                        .conflicts_with("hook-type")
                )
                .arg(
                    event_arg()
                        .requires("group")
                        .conflicts_with_all(["hook-type", "all"])
                )
                .arg(global_scope_arg())
        )
        .subcommand(
            Command::new("list")
                .about("List installed hooks")
                .arg(global_scope_arg())
                .arg(json_arg())
        )
        .subcommand(
            Command::new("plugin")
                .about("Enable, disable or inspect a plugin")
                .subcommand_required(true)
                .subcommand(
                    Command::new("status")
                        .about("Show the effective state of a plugin and where it comes from")
                        .arg(Arg::new("key").help("Plugin key").required(true).index(1))
                )
                .subcommand(
                    Command::new("enable")
                        .about("Explicitly enable a plugin")
                        .arg(Arg::new("key").help("Plugin key").required(true).index(1))
                        .arg(global_scope_arg())
                )
                .subcommand(
                    Command::new("disable")
                        .about("Explicitly disable a plugin")
                        .arg(Arg::new("key").help("Plugin key").required(true).index(1))
                        .arg(global_scope_arg())
                )
                .subcommand(
                    Command::new("reset")
                        .about("Remove the explicit state so the plugin inherits")
                        .arg(Arg::new("key").help("Plugin key").required(true).index(1))
                        .arg(global_scope_arg())
                )
        )
        .subcommand(
            Command::new("config")
                .about("Inspect, validate and migrate configuration")
                .subcommand_required(true)
                .arg(
                    Arg::new("strategy")
                        .long("strategy")
                        .help("Where to load app config from")
                        .value_parser(["xdg", "xdg-only", "legacy"])
                        .default_value("xdg")
                        .global(true)
                )
                .subcommand(
                    Command::new("show")
                        .about("Show the app config document and where it was loaded from")
                        .arg(
                            Arg::new("global")
                                .long("global")
                                .short('g')
                                .help("Show the global document instead of the project one")
                                .action(ArgAction::SetTrue)
                        )
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .short('f')
                                .help("Output format")
                                .value_parser(["json", "yaml", "toml"])
                                .default_value("json")
                        )
                )
                .subcommand(
                    Command::new("hooks")
                        .about("Show the merged hooks configuration")
                        .arg(json_arg())
                )
                .subcommand(
                    Command::new("validate")
                        .about("Validate the merged hooks configuration")
                )
                .subcommand(
                    Command::new("migrate")
                        .about("Move legacy per-project configs into the XDG registry")
                        .arg(
                            Arg::new("paths")
                                .help("Directories to search (default: home directory)")
                                .num_args(0..)
                                .value_parser(value_parser!(std::path::PathBuf))
                        )
                        .arg(
                            Arg::new("dry-run")
                                .long("dry-run")
                                .help("Report what would be migrated without writing anything")
                                .action(ArgAction::SetTrue)
                        )
                )
                .subcommand(
                    Command::new("status")
                        .about("Show the migration status of the current project")
                )
                .subcommand(
                    Command::new("cleanup")
                        .about("Remove registry entries for projects that no longer exist")
                )
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Target shell")
                        .required(true)
                        .index(1)
                        .value_parser(value_parser!(Shell))
                )
        )
}
