//! Tests for the file-level agent: configuration and result envelopes.
#![allow(clippy::unwrap_used)]

use std::fs;
use tempfile::tempdir;
use zv0::agent::Agent;

#[test]
fn test_envelope_for_valid_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("script.py");
    fs::write(&file, "data = open('x.txt')\nexec(data.read())\n").unwrap();

    let envelope = Agent::default().analyze_file(&file, "python");
    assert!(envelope.success);
    assert!(envelope.error.is_none());
    let data = envelope.data.unwrap();
    assert_eq!(data.overall_score, 90);
    assert_eq!(data.issues, 2);
    assert_eq!(
        data.suggestions,
        vec![
            "Security: Potentially dangerous function: open",
            "Security: Potentially dangerous function: exec",
        ]
    );
}

#[test]
fn test_envelope_for_missing_file() {
    let dir = tempdir().unwrap();
    let envelope = Agent::default().analyze_file(&dir.path().join("absent.py"), "python");
    assert!(!envelope.success);
    assert!(envelope.data.is_none());
    assert!(envelope.error.unwrap().contains("absent.py"));
}

#[test]
fn test_invalid_source_is_still_a_success_envelope() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("broken.py");
    fs::write(&file, "class :\n").unwrap();

    let envelope = Agent::default().analyze_file(&file, "py");
    assert!(envelope.success);
    let data = envelope.data.unwrap();
    assert_eq!(data.overall_score, 0);
    assert_eq!(data.suggestions, vec!["Check your input code"]);
}

#[test]
fn test_yaml_config_drives_analysis() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("agent.yaml");
    fs::write(
        &config,
        "agent:\n  name: Reviewer\n  version: 2.0.0\nanalysis:\n  performance_checks: false\n  dangerous_functions: [compile]\n",
    )
    .unwrap();
    let file = dir.path().join("code.py");
    fs::write(
        &file,
        "for a in x:\n    for b in y:\n        for c in z:\n            eval(compile(c, 'f', 'exec'))\n",
    )
    .unwrap();

    let agent = Agent::new(Some(&config));
    assert_eq!(agent.config().agent.name, "Reviewer");
    assert_eq!(agent.config().agent.version, "2.0.0");

    let report = agent.analyze_path(&file, "python").unwrap();
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].message, "Potentially dangerous function: compile");
    assert_eq!(report.performance_score, 100);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("agent.toml");
    fs::write(&config, "[analysis\n").unwrap();

    let agent = Agent::new(Some(&config));
    assert_eq!(agent.config().agent.name, "ZV.0");
    assert!(agent.analyzer().settings().security_checks);
}

#[test]
fn test_agent_is_shareable_across_threads() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("ok.py");
    fs::write(&file, "print('hi')\n").unwrap();
    let agent = Agent::default();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| agent.analyze_path(&file, "python").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().overall_score, 100);
        }
    });
}
