use crate::cli::config::HintSettings;
use crate::controller::controller::HintController;
use crate::controller::host::RecordingHost;
use crate::controller::session::ActionMode;
use crate::dom::dom_model::DocumentSource;
use crate::dom::snapshot::PageSnapshot;
use crate::hints::hint_model::{Key, labeler_for};
use crate::report::console::{format_marker_table, format_replay_report, format_scan_report};
use crate::report::report_model::{ReplayReport, ReplayStep};
use crate::scanner::scanner::scan;
use crate::trace::logger::TraceLogger;

// ============================================================================
// scan subcommand
// ============================================================================

pub fn cmd_scan(page: &str, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = PageSnapshot::load(page)?;

    if verbose > 0 {
        eprintln!("Scanning {} ({} nodes)...", page, snapshot.nodes.len());
    }

    let elements = scan(&snapshot);
    print!("{}", format_scan_report(&snapshot, &elements));
    Ok(())
}

// ============================================================================
// hints subcommand
// ============================================================================

pub fn cmd_hints(
    page: &str,
    settings: &HintSettings,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = PageSnapshot::load(page)?;

    if verbose > 0 {
        eprintln!("Labeling {} in {:?} mode...", page, settings.mode);
    }

    let elements = scan(&snapshot);
    let mut labeler = labeler_for(settings.mode, &settings.alphabet, settings.filter_text_delay_ms);
    let markers = labeler.build_markers(&snapshot, &elements);

    print!("{}", format_marker_table(&snapshot, &markers, labeler.as_ref()));
    Ok(())
}

// ============================================================================
// replay subcommand
// ============================================================================

pub fn cmd_replay(
    page: &str,
    keys: &str,
    action: &str,
    key_interval_ms: u64,
    settle_ms: u64,
    settings: &HintSettings,
    trace_path: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = PageSnapshot::load(page)?;
    let keys = Key::parse_script(keys)?;
    let mode: ActionMode = action.parse()?;

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    if verbose > 0 {
        eprintln!(
            "Replaying {} keys on {} ({:?}, {:?} mode)...",
            keys.len(),
            page,
            mode,
            settings.mode
        );
    }

    let report = replay(
        &snapshot,
        &keys,
        mode,
        settings.clone(),
        tracer,
        key_interval_ms,
        settle_ms,
    );
    print!("{}", format_replay_report(&report));
    Ok(())
}

/// Activate hint mode on `doc`, press and release each key in turn, then let
/// `settle_ms` of virtual time pass so delayed actions run.
pub fn replay(
    doc: &dyn DocumentSource,
    keys: &[Key],
    mode: ActionMode,
    settings: HintSettings,
    tracer: TraceLogger,
    key_interval_ms: u64,
    settle_ms: u64,
) -> ReplayReport {
    let mut controller = HintController::with_tracer(settings, tracer);
    let mut host = RecordingHost::new();
    let mut report = ReplayReport::new(mode);

    controller.activate(mode, doc, &mut host);
    report.activation = std::mem::take(&mut host.events);

    for key in keys {
        let propagated = controller.on_key_down(key, doc, &mut host);
        if *key != Key::Shift {
            controller.on_key_up(key, &mut host);
        }
        controller.advance(key_interval_ms, doc, &mut host);

        report.steps.push(ReplayStep {
            key: key.to_string(),
            propagated,
            phase: controller.phase(),
            events: std::mem::take(&mut host.events),
        });
    }

    controller.advance(settle_ms, doc, &mut host);
    report.settle = std::mem::take(&mut host.events);
    report.final_phase = controller.phase();
    report.elapsed_ms = controller.now_ms();

    report
}
