//! Tests for the kill-agent adapter, driven through a fake scheduler

mod common;

use std::fs;

use common::Fixture;
use dnd_core::application::plist;
use dnd_core::{Adapter, ApplicationRestriction, Diff, Error};
use pretty_assertions::assert_eq;

fn write_agent(fx: &Fixture, pattern: &str) -> ApplicationRestriction {
    let app = ApplicationRestriction::new(pattern, &fx.agents);
    fs::write(app.file(), plist::render(pattern, app.label(), &fx.log)).unwrap();
    app
}

#[test]
fn sync_empty_directory() {
    let fx = Fixture::new();
    let synced = fx.application_adapter().sync().unwrap();
    assert!(synced.entries.is_empty());
    assert!(synced.failures.is_empty());
}

#[test]
fn sync_missing_directory_is_empty() {
    let fx = Fixture::new();
    fs::remove_dir(&fx.agents).unwrap();
    assert!(fx.application_adapter().sync().unwrap().entries.is_empty());
}

#[test]
fn sync_recovers_own_agents_and_ignores_others() {
    let fx = Fixture::new();
    write_agent(&fx, "spotify");
    write_agent(&fx, "chrome");
    fs::write(
        fx.agents.join("com.apple.other.plist"),
        "<plist><dict><key>Label</key><string>com.apple.other</string></dict></plist>",
    )
    .unwrap();

    let synced = fx.application_adapter().sync().unwrap();
    let mut patterns: Vec<&str> = synced.entries.iter().map(|a| a.pattern()).collect();
    patterns.sort();
    assert_eq!(patterns, vec!["chrome", "spotify"]);
    assert!(synced.failures.is_empty());
}

#[test]
fn sync_reports_loaded_state() {
    let fx = Fixture::new();
    let app = write_agent(&fx, "spotify");
    fx.scheduler.state().loaded.insert(app.label().to_string());
    write_agent(&fx, "chrome");

    let synced = fx.application_adapter().sync().unwrap();
    for entry in &synced.entries {
        let expected = entry.pattern() == "spotify";
        assert_eq!(entry.loaded(), Some(expected), "{}", entry);
    }
}

#[test]
fn sync_with_some_corrupt_files_is_partial() {
    let fx = Fixture::new();
    write_agent(&fx, "spotify");
    fs::write(fx.agents.join("com.dnd.pkillbroken.plist"), "<plist><dict><key>Label").unwrap();

    let synced = fx.application_adapter().sync().unwrap();
    assert_eq!(synced.entries.len(), 1);
    assert_eq!(synced.failures.len(), 1);
    assert!(synced.failures.to_string().contains("com.dnd.pkillbroken.plist"));
}

#[test]
fn sync_with_only_corrupt_files_fails() {
    let fx = Fixture::new();
    fs::write(fx.agents.join("a.plist"), "<dict><key>Label</string>").unwrap();

    let err = fx.application_adapter().sync().unwrap_err();
    assert!(matches!(err, Error::Unreadable(_)), "got {:?}", err);
}

#[test]
fn commit_writes_and_registers_missing() {
    let fx = Fixture::new();
    let adapter = fx.application_adapter();
    let diff = Diff {
        missing: vec![adapter.render("spotify")],
        ..Diff::default()
    };

    let report = adapter.commit(&diff).unwrap();
    assert_eq!(report.committed, 1);

    let label = ApplicationRestriction::label_for("spotify");
    assert_eq!(fx.agent_files(), vec![format!("{}.plist", label)]);
    assert_eq!(fx.scheduler.loaded(), vec![label.clone()]);

    let content = fs::read_to_string(fx.agents.join(format!("{}.plist", label))).unwrap();
    assert!(content.contains(&fx.log.display().to_string()));
}

#[test]
fn commit_removes_and_deregisters_deleted() {
    let fx = Fixture::new();
    let app = write_agent(&fx, "spotify");
    fx.scheduler.state().loaded.insert(app.label().to_string());
    let adapter = fx.application_adapter();

    let diff = Diff {
        delete: adapter.sync().unwrap().entries,
        ..Diff::default()
    };
    let report = adapter.commit(&diff).unwrap();

    assert_eq!(report.committed, 1);
    assert!(fx.agent_files().is_empty());
    assert!(fx.scheduler.loaded().is_empty());
    assert_eq!(fx.scheduler.calls(), vec![format!("deregister {}", app.label())]);
}

#[test]
fn deleting_absent_file_counts_as_done() {
    let fx = Fixture::new();
    let adapter = fx.application_adapter();
    let diff = Diff {
        delete: vec![adapter.render("ghost")],
        ..Diff::default()
    };

    let report = adapter.commit(&diff).unwrap();
    assert_eq!(report.committed, 1);
}

#[test]
fn registration_failure_keeps_written_agent() {
    let fx = Fixture::new();
    fx.scheduler.set_fail_register(true);
    let adapter = fx.application_adapter();
    let diff = Diff {
        missing: vec![adapter.render("spotify"), adapter.render("chrome")],
        ..Diff::default()
    };

    let err = adapter.commit(&diff).unwrap_err();
    match err {
        Error::PartialCommit { committed, failures } => {
            assert_eq!(committed, 2);
            assert_eq!(failures.len(), 2);
        }
        other => panic!("expected PartialCommit, got {:?}", other),
    }
    assert_eq!(fx.agent_files().len(), 2);
}

#[test]
fn deregistration_failure_is_reported_but_processing_continues() {
    let fx = Fixture::new();
    let a = write_agent(&fx, "spotify");
    let b = write_agent(&fx, "chrome");
    {
        let mut state = fx.scheduler.state();
        state.loaded.insert(a.label().to_string());
        state.loaded.insert(b.label().to_string());
        state.fail_deregister = true;
    }
    let adapter = fx.application_adapter();
    let diff = Diff {
        delete: adapter.sync().unwrap().entries,
        ..Diff::default()
    };

    let err = adapter.commit(&diff).unwrap_err();
    assert!(err.is_partial_commit(), "got {:?}", err);
    assert!(fx.agent_files().is_empty());
}

#[cfg(unix)]
#[test]
fn write_failure_is_a_commit_error() {
    use std::os::unix::fs::PermissionsExt;

    if common::is_root() {
        eprintln!("Skipping test: running as root bypasses permission checks");
        return;
    }

    let fx = Fixture::new();
    fs::set_permissions(&fx.agents, fs::Permissions::from_mode(0o555)).unwrap();

    let adapter = fx.application_adapter();
    let diff = Diff {
        missing: vec![adapter.render("spotify")],
        ..Diff::default()
    };
    let err = adapter.commit(&diff).unwrap_err();
    fs::set_permissions(&fx.agents, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(err, Error::Commit(_)), "got {:?}", err);
    assert!(fx.scheduler.calls().is_empty());
}

#[test]
fn matched_but_unloaded_agent_is_reloaded() {
    let fx = Fixture::new();
    let app = write_agent(&fx, "spotify");
    let adapter = fx.application_adapter();

    let synced = adapter.sync().unwrap();
    assert!(synced.entries[0].needs_registration());

    let diff = Diff {
        matched: synced.entries,
        ..Diff::default()
    };
    let report = adapter.commit(&diff).unwrap();

    assert_eq!(report.committed, 1);
    assert_eq!(fx.scheduler.loaded(), vec![app.label().to_string()]);
}

#[test]
fn pattern_with_markup_round_trips_through_disk() {
    let fx = Fixture::new();
    let adapter = fx.application_adapter();
    let pattern = "Foo & <Bar>";
    adapter
        .commit(&Diff {
            missing: vec![adapter.render(pattern)],
            ..Diff::default()
        })
        .unwrap();

    let synced = adapter.sync().unwrap();
    assert_eq!(synced.entries, vec![adapter.render(pattern)]);
}
