use clap::{Args, Subcommand};
use log::error;
use shelllink::{
    grab_lnk_directory, grab_lnk_file, read_shortcut, write_shortcut, Hotkey, LnkError, Shortcut,
    WindowStyle,
};
use std::path::Path;

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Parse a Shortcut file, or every lnk file in a directory, and print JSON
    Parse {
        /// Path to a lnk file or directory
        #[arg(long)]
        path: String,
    },
    /// Create a new Shortcut file
    Create {
        /// Path of the lnk file to create
        #[arg(long)]
        output: String,
        #[command(flatten)]
        options: ShortcutArgs,
    },
    /// Edit an existing Shortcut file
    Edit {
        /// Path to the lnk file
        #[arg(long)]
        path: String,
        /// Write the result to a different file
        #[arg(long, default_value = None)]
        output: Option<String>,
        #[command(flatten)]
        options: ShortcutArgs,
    },
}

#[derive(Args, Debug, Default)]
pub(crate) struct ShortcutArgs {
    /// Target path. Ex: C:\Windows\notepad.exe or \\server\share\file.txt
    #[arg(long)]
    target: Option<String>,
    /// Command line arguments
    #[arg(long)]
    arguments: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    working_directory: Option<String>,
    #[arg(long)]
    relative_path: Option<String>,
    /// Path of the file containing the icon
    #[arg(long)]
    icon_path: Option<String>,
    #[arg(long)]
    icon_index: Option<i32>,
    /// Hotkey such as CTRL+ALT+T. An empty value removes the hotkey
    #[arg(long)]
    hotkey: Option<String>,
    /// normal, maximized, or minimized
    #[arg(long)]
    window_style: Option<String>,
    /// Target path with environment variables. Ex: %windir%\notepad.exe
    #[arg(long)]
    environment_path: Option<String>,
}

/// Run a Shortcut subcommand
pub(crate) fn run_command(command: &Commands) -> Result<(), LnkError> {
    match command {
        Commands::Parse { path } => {
            let info = if Path::new(path).is_dir() {
                grab_lnk_directory(path)?
            } else {
                vec![grab_lnk_file(path)?]
            };
            match serde_json::to_string_pretty(&info) {
                Ok(result) => println!("{result}"),
                Err(err) => error!("[shelllink] Could not serialize {path}: {err:?}"),
            }
        }
        Commands::Create { output, options } => {
            let mut shortcut = Shortcut::new();
            apply_options(&mut shortcut, options)?;
            write_shortcut(output, &shortcut)?;
        }
        Commands::Edit {
            path,
            output,
            options,
        } => {
            let mut shortcut = read_shortcut(path)?;
            apply_options(&mut shortcut, options)?;
            write_shortcut(output.as_deref().unwrap_or(path), &shortcut)?;
        }
    }
    Ok(())
}

/// Apply the provided options. Options that are not provided are left unchanged
fn apply_options(shortcut: &mut Shortcut, options: &ShortcutArgs) -> Result<(), LnkError> {
    if let Some(target) = &options.target {
        shortcut.set_path(target);
    }
    if let Some(arguments) = &options.arguments {
        shortcut.set_arguments(arguments);
    }
    if let Some(description) = &options.description {
        shortcut.set_description(description);
    }
    if let Some(directory) = &options.working_directory {
        shortcut.set_working_directory(directory);
    }
    if let Some(path) = &options.relative_path {
        shortcut.set_relative_path(path);
    }
    if let Some(path) = &options.icon_path {
        shortcut.set_icon_location(path);
    }
    if let Some(index) = options.icon_index {
        shortcut.set_icon_index(index);
    }
    if let Some(hotkey) = &options.hotkey {
        let value = if hotkey.is_empty() {
            None
        } else {
            Some(hotkey.parse::<Hotkey>()?)
        };
        shortcut.set_hotkey(value)?;
    }
    if let Some(window) = &options.window_style {
        shortcut.set_window_style(window_style(window)?);
    }
    if let Some(path) = &options.environment_path {
        shortcut.set_environment_path(path)?;
    }
    Ok(())
}

fn window_style(window: &str) -> Result<WindowStyle, LnkError> {
    let style = match window.to_lowercase().as_str() {
        "normal" => WindowStyle::Normal,
        "maximized" => WindowStyle::Maximized,
        "minimized" => WindowStyle::MinimizedNoActive,
        _ => {
            error!("[shelllink] Unknown window style: {window}");
            return Err(LnkError::BadWindowStyle);
        }
    };
    Ok(style)
}
