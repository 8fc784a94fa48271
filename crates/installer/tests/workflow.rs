//! Integration tests for the full installation workflow.
//!
//! These tests drive `Installer::run` end to end with a scripted operator and
//! a fake process runner whose `git clone` lays down a worker repository.

use std::path::Path;

use media_worker_installer::testing::{RecordingRunner, ScriptedPrompter};
use media_worker_installer::{ExecMode, InstallError, InstallMode, Installer, InstallerSettings};
use serde_json::{json, Value};

const REPO_NAME: &str = "media-library-source-worker";

// =============================================================================
// Fixtures
// =============================================================================

/// Config shipped by the worker repository, with keys the installer must keep.
fn shipped_config() -> Value {
    json!({
        "apiUrl": "https://api.streamy.sh",
        "workerId": "",
        "libraryPath": "/replace/me",
        "libraryMoviePath": "Movies",
        "libraryTvPath": "TV",
        "transcode": { "enabled": true, "maxJobs": 2 }
    })
}

/// Runner whose `git clone` writes a repository with both config files.
fn worker_repo_runner() -> RecordingRunner {
    RecordingRunner::new()
        .stdout("docker --version", "Docker version 27.0.3, build 7d4bcd8")
        .on_run("git clone", |inv| {
            let repo = inv.cwd.clone().unwrap().join(REPO_NAME);
            let config_dir = repo.join("config");
            std::fs::create_dir_all(&config_dir).unwrap();
            let body = serde_json::to_string_pretty(&shipped_config()).unwrap();
            std::fs::write(config_dir.join("dev.json"), &body).unwrap();
            std::fs::write(config_dir.join("prod.json"), &body).unwrap();
        })
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn test_defaults_end_to_end() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();

    let runner = worker_repo_runner();
    let prompter = ScriptedPrompter::new(["", library_str.as_str(), "", ""]);

    let ctx = Installer::new(&runner, &prompter, InstallMode::Prod, workdir.path().into())
        .run()
        .unwrap();

    assert_eq!(ctx.install_path, workdir.path());
    assert_eq!(ctx.repo_path, workdir.path().join(REPO_NAME));
    assert_eq!(ctx.library_path, library_str);
    assert_eq!(ctx.movie_collection_path, "Movies");
    assert_eq!(ctx.tv_collection_path, "TV");
    assert_eq!(ctx.mode, InstallMode::Prod);

    let prod = read_json(&ctx.repo_path.join("config").join("prod.json"));
    assert_eq!(prod["libraryPath"], library_str.as_str());
    assert_eq!(prod["libraryMoviePath"], "Movies");
    assert_eq!(prod["libraryTvPath"], "TV");
    assert_eq!(prod["apiUrl"], shipped_config()["apiUrl"]);
    assert_eq!(prod["transcode"], shipped_config()["transcode"]);

    // dev.json is left exactly as shipped
    let dev = read_json(&ctx.repo_path.join("config").join("dev.json"));
    assert_eq!(dev, shipped_config());

    assert_eq!(
        runner.commands(),
        vec![
            "git clone https://github.com/anuvgupta/media-library-source-worker",
            "docker --version",
            "docker ps",
            "bash ./build-worker.sh",
            "bash ./setup-worker.sh",
            "bash ./stop-worker.sh",
            "bash ./start-worker.sh",
        ]
    );
}

#[test]
fn test_dev_mode_writes_dev_config_and_sets_stage() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();

    let runner = worker_repo_runner();
    let prompter = ScriptedPrompter::new([
        "install-here",
        library_str.as_str(),
        "Films",
        "Shows",
    ]);

    let ctx = Installer::new(&runner, &prompter, InstallMode::Dev, workdir.path().into())
        .run()
        .unwrap();

    assert_eq!(ctx.install_path, workdir.path().join("install-here"));
    let dev = read_json(&ctx.repo_path.join("config").join("dev.json"));
    assert_eq!(dev["libraryMoviePath"], "Films");
    assert_eq!(dev["libraryTvPath"], "Shows");
    assert_eq!(
        read_json(&ctx.repo_path.join("config").join("prod.json")),
        shipped_config()
    );

    let scripts: Vec<_> = runner
        .calls()
        .into_iter()
        .filter(|(_, mode)| *mode == ExecMode::Interactive)
        .collect();
    assert_eq!(scripts.len(), 4);
    for (inv, _) in scripts {
        assert!(inv.env.contains(&("STAGE".to_string(), "dev".to_string())));
        assert_eq!(inv.cwd.as_deref(), Some(ctx.repo_path.as_path()));
    }
}

#[test]
fn test_rerun_replaces_previous_clone() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();
    let runner = worker_repo_runner();

    let first = ScriptedPrompter::new(["", library_str.as_str(), "", ""]);
    let ctx = Installer::new(&runner, &first, InstallMode::Prod, workdir.path().into())
        .run()
        .unwrap();
    std::fs::write(ctx.repo_path.join("leftover.log"), "old run").unwrap();

    let second = ScriptedPrompter::new(["", library_str.as_str(), "Cinema", ""]);
    let ctx = Installer::new(&runner, &second, InstallMode::Prod, workdir.path().into())
        .run()
        .unwrap();

    assert!(!ctx.repo_path.join("leftover.log").exists());
    let prod = read_json(&ctx.repo_path.join("config").join("prod.json"));
    assert_eq!(prod["libraryMoviePath"], "Cinema");
}

#[test]
fn test_failed_stop_still_starts_worker() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();

    let runner = worker_repo_runner().fail("stop-worker.sh", 1);
    let prompter = ScriptedPrompter::new(["", library_str.as_str(), "", ""]);

    Installer::new(&runner, &prompter, InstallMode::Prod, workdir.path().into())
        .run()
        .unwrap();

    assert_eq!(
        runner.commands().last().map(String::as_str),
        Some("bash ./start-worker.sh")
    );
}

#[test]
fn test_failed_setup_aborts_before_stop_and_start() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();

    let runner = worker_repo_runner().fail("setup-worker.sh", 1);
    let prompter = ScriptedPrompter::new(["", library_str.as_str(), "", ""]);

    let err = Installer::new(&runner, &prompter, InstallMode::Prod, workdir.path().into())
        .run()
        .unwrap_err();

    assert!(matches!(err, InstallError::ScriptFailed { ref script } if script == "setup-worker.sh"));
    assert!(!runner
        .commands()
        .iter()
        .any(|c| c.contains("stop-worker.sh") || c.contains("start-worker.sh")));
}

#[test]
fn test_nonexistent_library_declined_then_replaced() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();
    let missing = workdir.path().join("no-such-library");
    let missing_str = missing.to_string_lossy().into_owned();

    let runner = worker_repo_runner();
    let prompter = ScriptedPrompter::new(["", missing_str.as_str(), library_str.as_str(), "", ""])
        .with_confirmations([false]);

    let ctx = Installer::new(&runner, &prompter, InstallMode::Prod, workdir.path().into())
        .run()
        .unwrap();

    assert_eq!(ctx.library_path, library_str);
    let prod = read_json(&ctx.repo_path.join("config").join("prod.json"));
    assert_ne!(prod["libraryPath"], missing_str.as_str());
}

#[test]
fn test_custom_settings_are_honored() {
    let workdir = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let library_str = library.path().to_string_lossy().into_owned();

    let settings = InstallerSettings {
        repo_url: "https://git.example.com/media/worker-fork".into(),
        repo_name: "worker-fork".into(),
        runtime_name: "Podman".into(),
        runtime_program: "podman".into(),
        ..InstallerSettings::default()
    };
    let runner = RecordingRunner::new().on_run("git clone", |inv| {
        let config_dir = inv.cwd.clone().unwrap().join("worker-fork").join("config");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join("prod.json"), "{}").unwrap();
    });
    let prompter = ScriptedPrompter::new(["", library_str.as_str(), "", ""]);

    let ctx = Installer::new(&runner, &prompter, InstallMode::Prod, workdir.path().into())
        .with_settings(settings)
        .run()
        .unwrap();

    assert_eq!(ctx.repo_path, workdir.path().join("worker-fork"));
    let commands = runner.commands();
    assert_eq!(commands[0], "git clone https://git.example.com/media/worker-fork");
    assert_eq!(commands[1], "podman --version");
    assert_eq!(commands[2], "podman ps");
}
