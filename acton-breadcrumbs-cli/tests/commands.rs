//! Integration tests for the publish, check and list commands

use acton_breadcrumbs::config::BreadcrumbsConfig;
use acton_breadcrumbs_cli_lib::commands::publish::Published;
use acton_breadcrumbs_cli_lib::{CheckCommand, ListCommand, PublishCommand, PublishTarget};
use std::fs;
use tempfile::TempDir;

fn never_confirm(_: &std::path::Path) -> anyhow::Result<bool> {
    Ok(false)
}

#[test]
fn test_publish_views() {
    let temp_dir = TempDir::new().unwrap();
    let command = PublishCommand::new(PublishTarget::Views, temp_dir.path().to_path_buf(), false);

    let published = command.publish(never_confirm).unwrap();
    assert_eq!(published.len(), 4);

    let dir = temp_dir.path().join("templates/vendor/breadcrumbs");
    for stem in ["tailwind", "bootstrap5", "bulma", "json-ld"] {
        assert!(dir.join(format!("{stem}.html")).is_file(), "missing {stem}.html");
    }
}

#[test]
fn test_publish_does_not_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config/breadcrumbs.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "# mine\n").unwrap();

    let command =
        PublishCommand::new(PublishTarget::Definitions, temp_dir.path().to_path_buf(), false);
    let published = command.publish(never_confirm).unwrap();

    assert_eq!(published, vec![Published::Skipped(path.clone())]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# mine\n");

    let forced = PublishCommand::new(PublishTarget::Definitions, temp_dir.path().to_path_buf(), true);
    let published = forced.publish(never_confirm).unwrap();

    assert_eq!(published, vec![Published::Written(path.clone())]);
    assert!(fs::read_to_string(&path).unwrap().contains("[[breadcrumb]]"));
}

#[test]
fn test_publish_overwrites_after_confirmation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config/breadcrumbs.toml");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "# mine\n").unwrap();

    let command =
        PublishCommand::new(PublishTarget::Definitions, temp_dir.path().to_path_buf(), false);
    let published = command.publish(|_| Ok(true)).unwrap();

    assert_eq!(published, vec![Published::Written(path)]);
}

#[test]
fn test_publish_config_keeps_other_sections() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[server]\nport = 8080\n").unwrap();

    let command = PublishCommand::new(PublishTarget::Config, temp_dir.path().to_path_buf(), false);
    command.publish(never_confirm).unwrap();

    let source = fs::read_to_string(&config).unwrap();
    assert!(source.contains("port = 8080"));

    let loaded = BreadcrumbsConfig::load_from(&config).unwrap();
    assert_eq!(loaded.breadcrumbs.view.as_deref(), Some("breadcrumbs::tailwind"));

    // A second publish leaves the existing section alone
    let published = command.publish(never_confirm).unwrap();
    assert_eq!(published, vec![Published::Skipped(config)]);
}

#[test]
fn test_check_published_project() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    for target in [PublishTarget::Config, PublishTarget::Definitions, PublishTarget::Views] {
        PublishCommand::new(target, root.clone(), false)
            .publish(never_confirm)
            .unwrap();
    }

    let report = CheckCommand::new(root.join("config.toml")).run().unwrap();
    assert_eq!(report.breadcrumbs, 4);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
}

#[test]
fn test_check_reports_unknown_parent_and_view() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[breadcrumbs]\nview = \"breadcrumbs::nope\"\nfiles = [\"crumbs.toml\"]\n",
    )
    .unwrap();
    fs::write(
        temp_dir.path().join("crumbs.toml"),
        "[[breadcrumb]]\nname = \"blog\"\ntitle = \"Blog\"\nparent = \"home\"\n",
    )
    .unwrap();

    let report = CheckCommand::new(temp_dir.path().join("config.toml")).run().unwrap();

    assert_eq!(report.breadcrumbs, 1);
    assert_eq!(report.warnings.len(), 2);
    assert!(report.warnings[0].contains("breadcrumbs::nope"));
    assert!(report.warnings[1].contains("unknown parent \"home\""));
}

#[test]
fn test_check_reports_blank_view_as_unset() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[breadcrumbs]\nview = \" \"\nfiles = []\n",
    )
    .unwrap();

    let report = CheckCommand::new(temp_dir.path().join("config.toml")).run().unwrap();
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("view not specified"));

    let listing = ListCommand::new(temp_dir.path().join("config.toml")).run().unwrap();
    assert_eq!(listing.default_view, None);
}

#[test]
fn test_check_fails_on_missing_file_with_solution() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.toml"),
        "[breadcrumbs]\nfiles = [\"missing.toml\"]\n",
    )
    .unwrap();

    let err = CheckCommand::new(temp_dir.path().join("config.toml"))
        .run()
        .unwrap_err()
        .to_string();

    assert!(err.contains("does not exist"));
    assert!(err.contains("acton-breadcrumbs publish definitions"));
}

#[test]
fn test_list() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    PublishCommand::new(PublishTarget::Definitions, root.clone(), false)
        .publish(never_confirm)
        .unwrap();
    fs::write(root.join("config.toml"), "[breadcrumbs]\nview = \"breadcrumbs::bulma\"\n").unwrap();

    let listing = ListCommand::new(root.join("config.toml")).run().unwrap();

    assert_eq!(listing.breadcrumbs, vec!["blog", "blog.post", "errors.404", "home"]);
    assert!(listing.views.contains(&"breadcrumbs::bulma".to_string()));
    assert_eq!(listing.default_view.as_deref(), Some("breadcrumbs::bulma"));
}
