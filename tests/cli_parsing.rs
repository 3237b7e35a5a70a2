use clap::Parser;
use std::path::PathBuf;
use taskforge::cli::{Cli, Commands};

#[test]
fn test_parse_analyze() {
    let cli = Cli::try_parse_from([
        "taskforge",
        "analyze",
        "Build user API",
        "--description",
        "Schema plus endpoints",
        "--priority",
        "high",
        "--skill",
        "backend",
        "-e",
        "PT6H",
        "--context",
        "ctx.yaml",
        "--save",
        "out.json",
    ])
    .unwrap();

    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.title, "Build user API");
            assert_eq!(args.description, "Schema plus endpoints");
            assert_eq!(args.priority, "high");
            assert_eq!(args.skill.as_deref(), Some("backend"));
            assert_eq!(args.estimate.as_deref(), Some("PT6H"));
            assert_eq!(args.context, Some(PathBuf::from("ctx.yaml")));
            assert_eq!(args.save, Some(PathBuf::from("out.json")));
            assert!(!args.offline);
        }
        _ => panic!("Wrong command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_analyze_defaults() {
    let cli = Cli::try_parse_from(["taskforge", "analyze", "Write spec", "--offline"]).unwrap();

    match cli.command {
        Commands::Analyze(args) => {
            assert_eq!(args.priority, "medium");
            assert!(args.description.is_empty());
            assert!(args.offline);
            assert!(args.to_task().is_ok());
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_decompose_strict() {
    let cli = Cli::try_parse_from(["taskforge", "decompose", "analysis.json", "--strict", "--json"]).unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Decompose(args) => {
            assert_eq!(args.file, PathBuf::from("analysis.json"));
            assert!(args.strict);
            assert!(args.output.is_none());
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_global_config() {
    let cli = Cli::try_parse_from(["taskforge", "--config", "custom.yaml", "duration", "2 hours"]).unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    match cli.command {
        Commands::Duration(args) => assert_eq!(args.text, "2 hours"),
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_parse_experience() {
    let cli = Cli::try_parse_from([
        "taskforge",
        "experience",
        "Refactor parser",
        "-e",
        "PT2H",
        "--category",
        "maintenance",
    ])
    .unwrap();

    match cli.command {
        Commands::Experience(args) => {
            assert_eq!(args.title, "Refactor parser");
            assert_eq!(args.estimate.as_deref(), Some("PT2H"));
            assert_eq!(args.category.as_deref(), Some("maintenance"));
            assert!(args.skill.is_none());
        }
        _ => panic!("Wrong command"),
    }
}

#[test]
fn test_analyze_requires_title() {
    assert!(Cli::try_parse_from(["taskforge", "analyze"]).is_err());
}

#[test]
fn test_unknown_command_fails() {
    assert!(Cli::try_parse_from(["taskforge", "schedule"]).is_err());
}
