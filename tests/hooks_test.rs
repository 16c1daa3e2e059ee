use std::fs;
use std::path::Path;

use plugin_scaffold::{
    constants::HOOK_PATHS,
    hooks::{reconcile_hooks, HookOutcome},
    prompt::ScriptedResponses,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

/// Template holds "A<n>" for every hook, the plugin "B<n>".
fn conflicting_fixture() -> (TempDir, TempDir) {
    let template = TempDir::new().unwrap();
    let plugin = TempDir::new().unwrap();
    for (i, hook) in HOOK_PATHS.iter().enumerate() {
        write(template.path(), hook, &format!("A{i}"));
        write(plugin.path(), hook, &format!("B{i}"));
    }
    (template, plugin)
}

#[test]
fn test_invalid_response_reprompts_then_overwrites() {
    let template = TempDir::new().unwrap();
    let plugin = TempDir::new().unwrap();
    let hook = ["on_plugin_install.py"];
    write(template.path(), hook[0], "A");
    write(plugin.path(), hook[0], "B");

    let mut responses = ScriptedResponses::new(["z", "o"]);
    let report =
        reconcile_hooks(template.path(), plugin.path(), &hook, false, &mut responses).unwrap();

    assert_eq!(read(plugin.path(), hook[0]), "A");
    assert_eq!(responses.prompts().len(), 2);
    assert_eq!(responses.prompts()[0], responses.prompts()[1]);
    assert_eq!(report.outcomes[0].1, HookOutcome::Overwritten);
}

#[test]
fn test_skip_all_stops_immediately() {
    let (template, plugin) = conflicting_fixture();

    let mut responses = ScriptedResponses::new(["k", "o", "o"]);
    let report =
        reconcile_hooks(template.path(), plugin.path(), &HOOK_PATHS, false, &mut responses)
            .unwrap();

    assert!(report.stopped_early);
    assert_eq!(report.outcomes.len(), 1);
    assert_eq!(responses.prompts().len(), 1);
    assert_eq!(responses.remaining(), 2);
    for (i, hook) in HOOK_PATHS.iter().enumerate() {
        assert_eq!(read(plugin.path(), hook), format!("B{i}"));
    }
}

#[test]
fn test_skip_leaves_file_and_continues() {
    let (template, plugin) = conflicting_fixture();

    let mut responses = ScriptedResponses::new(["s", "", "o"]);
    let report =
        reconcile_hooks(template.path(), plugin.path(), &HOOK_PATHS, false, &mut responses)
            .unwrap();

    assert!(!report.stopped_early);
    assert_eq!(read(plugin.path(), HOOK_PATHS[0]), "B0");
    assert_eq!(read(plugin.path(), HOOK_PATHS[1]), "B1");
    assert_eq!(read(plugin.path(), HOOK_PATHS[2]), "A2");
}

#[test]
fn test_overwrite_all_skips_remaining_prompts() {
    let (template, plugin) = conflicting_fixture();

    let mut responses = ScriptedResponses::new(["s", "a"]);
    reconcile_hooks(template.path(), plugin.path(), &HOOK_PATHS, false, &mut responses).unwrap();

    assert_eq!(responses.prompts().len(), 2);
    assert_eq!(read(plugin.path(), HOOK_PATHS[0]), "B0");
    assert_eq!(read(plugin.path(), HOOK_PATHS[1]), "A1");
    assert_eq!(read(plugin.path(), HOOK_PATHS[2]), "A2");
}

#[test]
fn test_force_overwrite_never_prompts() {
    let (template, plugin) = conflicting_fixture();

    let mut responses = ScriptedResponses::new(Vec::<String>::new());
    let report =
        reconcile_hooks(template.path(), plugin.path(), &HOOK_PATHS, true, &mut responses)
            .unwrap();

    assert!(responses.prompts().is_empty());
    assert!(report.outcomes.iter().all(|(_, o)| *o == HookOutcome::Overwritten));
    for (i, hook) in HOOK_PATHS.iter().enumerate() {
        assert_eq!(read(plugin.path(), hook), format!("A{i}"));
    }
}

#[test]
fn test_backup_preserves_previous_content() {
    let template = TempDir::new().unwrap();
    let plugin = TempDir::new().unwrap();
    let hook = ["hooks/Linux/on_plugin_install.sh"];
    write(template.path(), hook[0], "A");
    write(plugin.path(), hook[0], "B");

    let mut responses = ScriptedResponses::new(["b"]);
    let report =
        reconcile_hooks(template.path(), plugin.path(), &hook, false, &mut responses).unwrap();

    let HookOutcome::BackedUp { backup } = &report.outcomes[0].1 else {
        panic!("Expected BackedUp outcome, got {:?}", report.outcomes[0].1);
    };
    assert_eq!(fs::read_to_string(backup).unwrap(), "B");
    assert_eq!(backup.parent(), plugin.path().join(hook[0]).parent());
    let name = backup.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("on_plugin_install.sh."));
    let stamp = name.trim_start_matches("on_plugin_install.sh.");
    assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%Hh%Mm%S").is_ok());
    assert_eq!(read(plugin.path(), hook[0]), "A");
}

#[test]
fn test_identical_and_missing_files_need_no_prompt() {
    let template = TempDir::new().unwrap();
    let plugin = TempDir::new().unwrap();
    for hook in HOOK_PATHS {
        write(template.path(), hook, "same");
    }
    write(plugin.path(), HOOK_PATHS[0], "same");

    let mut responses = ScriptedResponses::new(Vec::<String>::new());
    let report =
        reconcile_hooks(template.path(), plugin.path(), &HOOK_PATHS, false, &mut responses)
            .unwrap();

    assert!(responses.prompts().is_empty());
    assert_eq!(report.outcomes[0].1, HookOutcome::Identical);
    assert_eq!(report.outcomes[1].1, HookOutcome::Created);
    assert_eq!(report.outcomes[2].1, HookOutcome::Created);
    assert_eq!(read(plugin.path(), HOOK_PATHS[1]), "same");
}

#[test]
fn test_missing_template_hook_is_an_error() {
    let template = TempDir::new().unwrap();
    let plugin = TempDir::new().unwrap();

    let mut responses = ScriptedResponses::new(Vec::<String>::new());
    let result =
        reconcile_hooks(template.path(), plugin.path(), &HOOK_PATHS, false, &mut responses);

    assert!(result.is_err());
}
