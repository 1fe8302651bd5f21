use clap::Parser;
use notegrid::cli::args::{Args, Command};
use std::path::PathBuf;

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["notegrid", "-v"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_list_command_when_parsing_then_json_defaults_to_false() {
    // Arrange
    let args = vec!["notegrid", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { json } => assert!(!json),
        _ => panic!("Expected List command"),
    }
    assert_eq!(parsed.config, None);
}

#[test]
fn given_json_flag_when_parsing_list_command_then_json_is_true() {
    // Arrange
    let args = vec!["notegrid", "list", "--json"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::List { json } => assert!(json),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn given_create_command_when_parsing_then_reads_fields_and_image() {
    // Arrange
    let args = vec![
        "notegrid",
        "create",
        "--name",
        "Groceries",
        "-d",
        "Milk",
        "--image",
        "/tmp/img1.png",
    ];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Create {
            name,
            description,
            image,
        } => {
            assert_eq!(name, "Groceries");
            assert_eq!(description, "Milk");
            assert_eq!(image, Some(PathBuf::from("/tmp/img1.png")));
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn given_create_without_description_when_parsing_then_fails() {
    let args = vec!["notegrid", "create", "--name", "Groceries"];

    let result = Args::try_parse_from(args);

    assert!(result.is_err());
}

#[test]
fn given_delete_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["notegrid", "delete", "a1b2-c3"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Delete { note_id } => assert_eq!(note_id, "a1b2-c3"),
        _ => panic!("Expected Delete command"),
    }
}

#[test]
fn given_global_config_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange - global flags work anywhere when marked as global
    let args = vec!["notegrid", "delete", "-c", "/etc/notegrid.toml", "42"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Delete { note_id } => assert_eq!(note_id, "42"),
        _ => panic!("Expected Delete command"),
    }
    assert_eq!(parsed.config, Some(PathBuf::from("/etc/notegrid.toml")));
}

#[test]
fn given_verbose_flag_when_parsing_then_increments_count() {
    // Arrange
    let args = vec!["notegrid", "-vv", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_view_with_output_when_parsing_then_keeps_path() {
    // Arrange
    let args = vec!["notegrid", "view", "-o", "board.html"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::View { output } => assert_eq!(output, Some(PathBuf::from("board.html"))),
        _ => panic!("Expected View command"),
    }
}

#[test]
fn given_upload_and_init_config_when_parsing_then_both_succeed() {
    let upload = Args::try_parse_from(["notegrid", "upload", "cat.png"]).unwrap();
    let init = Args::try_parse_from(["notegrid", "init-config"]).unwrap();

    assert!(matches!(upload.command, Command::Upload { path } if path == PathBuf::from("cat.png")));
    assert!(matches!(init.command, Command::InitConfig { path: None }));
}
