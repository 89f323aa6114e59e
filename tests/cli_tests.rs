use clap::Parser;

use link_hints::{
    cli::{
        commands::replay,
        config::{
            AppConfig, Cli, Commands, DEFAULT_ALPHABET, Platform, parse_config, resolve_settings,
            resolve_trace_path,
        },
    },
    controller::{
        host::HostEvent,
        session::{ActionMode, Phase},
    },
    error::HintError,
    hints::hint_model::{HintMode, Key},
    report::console::{format_marker_table, format_replay_report, format_scan_report},
    scanner::scanner::scan,
    trace::logger::TraceLogger,
};

use crate::common::utils::{fixture, keys, settings};

mod common;

// =========================================================================
// Argument parsing and settings resolution
// =========================================================================

#[test]
fn replay_defaults() {
    let cli = Cli::parse_from(["link-hints", "replay", "--page", "p.json", "--keys", "t r"]);

    match cli.command {
        Commands::Replay {
            page,
            keys,
            action,
            key_interval_ms,
            settle_ms,
        } => {
            assert_eq!(page, "p.json");
            assert_eq!(keys, "t r");
            assert_eq!(action, "current");
            assert_eq!(key_interval_ms, 0);
            assert_eq!(settle_ms, 1000);
        }
        other => panic!("expected replay, got {:?}", other),
    }
    assert_eq!(cli.verbose, 0);
    assert!(cli.mode.is_none());
}

#[test]
fn cli_flags_override_config_file() {
    let config = parse_config(
        "hints:\n  mode: sequential\n  alphabet: xyz\n  platform: mac\ntrace:\n  path: from-config.jsonl\n",
        "link-hints.yaml",
    )
    .unwrap();

    let cli = Cli::parse_from(["link-hints", "hints", "--page", "p.json", "--mode", "filter"]);
    let settings = resolve_settings(&cli, &config).unwrap();

    assert_eq!(settings.mode, HintMode::Filter);
    assert_eq!(settings.alphabet, "xyz");
    assert_eq!(settings.platform, Platform::Mac);
    assert_eq!(settings.current_tab_click_delay_ms, 400);
    assert_eq!(resolve_trace_path(&cli, &config).as_deref(), Some("from-config.jsonl"));

    let cli = Cli::parse_from([
        "link-hints", "-vv", "scan", "--page", "p.json", "--trace", "cli.jsonl",
    ]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(resolve_trace_path(&cli, &config).as_deref(), Some("cli.jsonl"));
}

#[test]
fn empty_config_gives_defaults() {
    let config = parse_config("  \n", "link-hints.yaml").unwrap();
    assert_eq!(config.hints.alphabet, DEFAULT_ALPHABET);
    assert_eq!(config.hints.filter_text_delay_ms, 200);
    assert!(config.trace.path.is_none());
}

#[test]
fn malformed_config_is_an_error() {
    let err = parse_config("hints:\n  current_tab_click_delay_ms: soon\n", "bad.yaml").unwrap_err();
    assert!(matches!(err, HintError::ConfigParse { .. }));
    assert!(err.to_string().contains("bad.yaml"));
}

#[test]
fn invalid_alphabet_is_rejected() {
    let config = AppConfig::default();

    let cli = Cli::parse_from(["link-hints", "hints", "--page", "p", "--alphabet", "a"]);
    assert!(matches!(
        resolve_settings(&cli, &config),
        Err(HintError::InvalidAlphabet(_))
    ));

    let cli = Cli::parse_from(["link-hints", "hints", "--page", "p", "--alphabet", "abca"]);
    assert!(matches!(
        resolve_settings(&cli, &config),
        Err(HintError::InvalidAlphabet(_))
    ));
}

#[test]
fn unknown_mode_names_are_rejected() {
    let cli = Cli::parse_from(["link-hints", "hints", "--page", "p", "--mode", "fuzzy"]);
    assert!(matches!(
        resolve_settings(&cli, &AppConfig::default()),
        Err(HintError::UnknownHintMode(_))
    ));
    assert!(matches!(
        "teleport".parse::<ActionMode>(),
        Err(HintError::UnknownActionMode(_))
    ));
    assert_eq!("queue".parse::<ActionMode>().unwrap(), ActionMode::Queued);
}

// =========================================================================
// Key scripts
// =========================================================================

#[test]
fn key_script_parsing() {
    assert_eq!(
        keys("t R <BS> <Del> <Enter> <Esc> <Shift> <Space>"),
        vec![
            Key::Char('t'),
            Key::Char('R'),
            Key::Backspace,
            Key::Delete,
            Key::Enter,
            Key::Escape,
            Key::Shift,
            Key::Char(' '),
        ]
    );

    assert!(matches!(
        Key::parse_script("a <Bogus>"),
        Err(HintError::UnknownKey(_))
    ));
    assert!(matches!(Key::parse_script("ab"), Err(HintError::UnknownKey(_))));
}

// =========================================================================
// Replay and console output
// =========================================================================

#[test]
fn replay_records_each_step() {
    let page = fixture("two_links.json");
    let report = replay(
        &page,
        &keys("t r e"),
        ActionMode::CurrentTab,
        settings(HintMode::Filter),
        TraceLogger::disabled(),
        0,
        1000,
    );

    let phases: Vec<Phase> = report.steps.iter().map(|s| s.phase).collect();
    assert_eq!(phases, vec![Phase::Active, Phase::Delaying, Phase::Delaying]);
    assert!(report.steps.iter().all(|s| !s.propagated));
    assert!(report.steps[2].events.is_empty(), "swallowed key has no effect");

    assert_eq!(report.final_phase, Phase::Inactive);
    assert_eq!(report.elapsed_ms, 1000);
    assert!(report.settle.contains(&HostEvent::Click {
        node: 2,
        modifiers: Default::default(),
    }));
    assert!(matches!(report.activation[0], HostEvent::ShowStatus(_)));

    let text = format_replay_report(&report);
    assert!(text.starts_with("=== Replay (CurrentTab) ===\n"));
    assert!(text.contains("key r -> delaying"));
    assert!(text.contains("click node 2"));
    assert!(text.ends_with("=== Finished: inactive after 1000ms ===\n"));
}

#[test]
fn replay_writes_trace_lines() {
    let path = std::env::temp_dir().join(format!("link-hints-trace-{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let page = fixture("two_links.json");
    let tracer = TraceLogger::new(path.to_str().unwrap());
    assert!(tracer.is_enabled());

    replay(
        &page,
        &keys("<Esc>"),
        ActionMode::NewTab,
        settings(HintMode::Sequential),
        tracer,
        0,
        0,
    );

    let content = std::fs::read_to_string(&path).unwrap();
    let decisions: Vec<String> = content
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["decision"].as_str().unwrap_or_default().to_string()
        })
        .collect();
    let _ = std::fs::remove_file(&path);

    assert_eq!(decisions, vec!["activate", "markers_built", "escape", "teardown"]);
}

#[test]
fn scan_and_marker_reports() {
    let page = fixture("form_page.json");
    let elements = scan(&page);

    let scan_text = format_scan_report(&page, &elements);
    assert!(scan_text.starts_with("6 actionable elements\n"));
    assert!(scan_text.contains("<textarea>"));

    let mut labeler = link_hints::hints::hint_model::labeler_for(HintMode::Filter, DEFAULT_ALPHABET, 200);
    let markers = labeler.build_markers(&page, &elements);
    let table = format_marker_table(&page, &markers, labeler.as_ref());

    assert!(table.starts_with("6 hint markers (Filter mode)\n"));
    assert!(table.contains("1: Username"));
    assert!(table.contains("\"need help?\""));
}
