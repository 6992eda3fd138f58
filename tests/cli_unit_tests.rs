//! Unit tests for CLI argument parsing and shared model types

use clap::Parser;
use dexview::cli::args::{Cli, Commands};
use dexview::config::AppConfig;
use dexview::models::{DeviceState, MirrorSettings};

#[test]
fn test_no_arguments_defaults_to_interactive() {
    let cli = Cli::try_parse_from(["dexview"]).unwrap();
    assert!(cli.command.is_none());
    assert!(!cli.cli);
    assert!(!cli.gui);
    assert_eq!(cli.verbose, 0);
}

#[test]
fn test_gui_flag() {
    let cli = Cli::try_parse_from(["dexview", "--gui"]).unwrap();
    assert!(cli.gui);
    assert!(cli.command.is_none());
}

#[test]
fn test_devices_subcommand_with_json() {
    let cli = Cli::try_parse_from(["dexview", "devices", "--json"]).unwrap();
    match cli.command {
        Some(Commands::Devices { json }) => assert!(json),
        _ => panic!("expected devices subcommand"),
    }
}

#[test]
fn test_global_device_flag_after_subcommand() {
    let cli = Cli::try_parse_from(["dexview", "check", "-s", "R3CN30XXXX"]).unwrap();
    assert_eq!(cli.device.as_deref(), Some("R3CN30XXXX"));
    assert!(matches!(cli.command, Some(Commands::Check)));
}

#[test]
fn test_mirror_subcommand_flags() {
    let cli = Cli::try_parse_from([
        "dexview",
        "mirror",
        "--max-size",
        "1920",
        "--no-stay-awake",
        "--turn-screen-off",
    ])
    .unwrap();
    match cli.command {
        Some(Commands::Mirror {
            max_size,
            no_stay_awake,
            turn_screen_off,
        }) => {
            assert_eq!(max_size, Some(1920));
            assert!(no_stay_awake);
            assert!(turn_screen_off);
        }
        _ => panic!("expected mirror subcommand"),
    }
}

#[test]
fn test_push_requires_both_paths() {
    assert!(Cli::try_parse_from(["dexview", "push", "only-local"]).is_err());
    let cli = Cli::try_parse_from(["dexview", "push", "a.txt", "/sdcard/a.txt"]).unwrap();
    match cli.command {
        Some(Commands::Push { local, remote }) => {
            assert_eq!(local, "a.txt");
            assert_eq!(remote, "/sdcard/a.txt");
        }
        _ => panic!("expected push subcommand"),
    }
}

#[test]
fn test_verbose_count() {
    let cli = Cli::try_parse_from(["dexview", "-vv", "devices"]).unwrap();
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_mirror_settings_reflect_config() {
    let mut config = AppConfig::default();
    config.mirror.max_size = 800;
    config.mirror.stay_awake = false;
    let settings = config.mirror_settings();
    let args = settings.to_args("serial123");
    assert!(args.contains(&"--max-size".to_string()));
    assert!(args.contains(&"800".to_string()));
    assert!(!args.contains(&"--stay-awake".to_string()));
}

#[test]
fn test_default_mirror_settings_match_defaults() {
    let settings = MirrorSettings::default();
    assert_eq!(settings.max_size, 1280);
    assert!(settings.stay_awake);
    assert!(!settings.turn_screen_off);
}

#[test]
fn test_device_state_usability() {
    assert!(DeviceState::Device.is_usable());
    assert!(!DeviceState::Offline.is_usable());
    assert!(!DeviceState::Unauthorized.is_usable());
    assert!(!DeviceState::from_token("weird-state").is_usable());
}

#[test]
fn test_config_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.mirror.extra_args = vec!["--always-on-top".to_string()];
    config.ui.poll_interval_secs = 2;
    config.save_to(&path).unwrap();

    let loaded = AppConfig::load_from(&path).unwrap();
    assert_eq!(loaded.mirror.extra_args, vec!["--always-on-top"]);
    assert_eq!(loaded.ui.poll_interval_secs, 2);
}
