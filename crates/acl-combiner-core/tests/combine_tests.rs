//! End-to-end pipeline tests over fixture directories

use std::fs;
use std::path::Path;

use acl_combiner_core::{Combiner, CombinerConfig, ConfigLoader, ErrorKind, PrinterOptions};
use tempfile::TempDir;

fn write(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

const BASE: &str = r#"// Tailnet policy
{
	"tagOwners": {
		"tag:server": ["group:ops"],
	},
	"acls": [
		// ops can reach everything
		{"action": "accept", "src": ["group:ops"], "dst": ["*:*"]},
	],
	"autoApprovers": {"routes": {}},
}
"#;

#[test]
fn test_combine_base_and_fragments() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "policy.hujson", BASE);
    write(
        root,
        "fragments/10-web.hujson",
        r#"{
	// web team
	"acls": [
		{"action": "accept", "src": ["group:web"], "dst": ["tag:web:443"]},
	],
	"tagOwners": {"tag:web": ["group:web"]},
}"#,
    );
    write(
        root,
        "fragments/20-db.json",
        r#"{"groups": {"group:db": ["dana@example.com"]}, "tests": [{"src": "dana@example.com", "accept": ["tag:db:5432"]}]}"#,
    );
    write(root, "fragments/README.md", "not a fragment");

    let outcome = Combiner::new(root.join("fragments"))
        .run(Some(&root.join("policy.hujson")))
        .unwrap();

    let expected = r#"// Tailnet policy
{
	"acls": [
		// ops can reach everything
		{"action": "accept", "src": ["group:ops"], "dst": ["*:*"]},
		// web team
		{"action": "accept", "src": ["group:web"], "dst": ["tag:web:443"]},
	],
	"autoApprovers": {"routes": {}},
	"groups": {
		"group:db": ["dana@example.com"],
	},
	"tagOwners": {
		"tag:server": ["group:ops"],
		"tag:web": ["group:web"],
	},
	"tests": [
		{"src": "dana@example.com", "accept": ["tag:db:5432"]},
	],
}
"#;
    assert_eq!(outcome.rendered, expected);
    assert_eq!(outcome.report.fragments, 2);
    assert_eq!(outcome.report.appended.get("acls"), Some(&1));
    assert_eq!(outcome.report.total_appended(), 4);
}

#[test]
fn test_combine_output_is_stable_when_fed_back() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "policy.hujson", BASE);
    write(root, "frags/a.hujson", r#"{"ssh": [{"action": "check"}]}"#);

    let first = Combiner::new(root.join("frags"))
        .run(Some(&root.join("policy.hujson")))
        .unwrap();

    write(root, "combined.hujson", &first.rendered);
    let empty = root.join("empty");
    fs::create_dir_all(&empty).unwrap();
    let second = Combiner::new(&empty)
        .run(Some(&root.join("combined.hujson")))
        .unwrap();

    assert_eq!(first.rendered, second.rendered);
}

#[test]
fn test_unsupported_section_names_fragment() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "frags/a.hujson", r#"{"acls": []}"#);
    write(root, "frags/b.hujson", r#"{"derpMap": {}}"#);

    let err = Combiner::new(root.join("frags")).run(None).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsupportedSection);
    assert!(err.to_string().contains("b.hujson"));
}

#[test]
fn test_config_drives_sections_and_output() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "frags/a.hujson", r#"{"acls": [1], "ipsets": {"ipset:lan": []}}"#);
    write(root, "frags/drafts/b.hujson", r#"{"hosts": {}}"#);
    write(
        root,
        "acl-combiner.yaml",
        "sections:\n  shapes:\n    ipsets: Object\nfiles:\n  exclude: [\"drafts/*\"]\noutput:\n  useTabs: false\n  indentSize: 2\n",
    );

    let config = ConfigLoader::load(None, &root.join("frags")).unwrap();
    let combiner = Combiner::from_config(&config, root.join("frags"));
    assert_eq!(combiner.printer, PrinterOptions::spaces(2));

    let outcome = combiner.run(None).unwrap();
    assert_eq!(
        outcome.rendered,
        "{\n  \"acls\": [\n    1,\n  ],\n  \"ipsets\": {\n    \"ipset:lan\": [],\n  },\n}\n"
    );
}

#[test]
fn test_allow_list_from_config_rejects_other_sections() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "frags/a.hujson", r#"{"acls": [], "ssh": []}"#);

    let config: CombinerConfig =
        serde_json::from_str(r#"{"sections": {"allow": ["acls"]}}"#).unwrap();
    let err = Combiner::from_config(&config, root.join("frags"))
        .run(None)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        format!(
            "unsupported section [\"ssh\"] in file [{}]",
            root.join("frags").join("a.hujson").display()
        )
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_fragment_is_merged() {
    use std::os::unix::fs::symlink;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "frags/a.hujson", r#"{"acls": ["a"]}"#);
    write(root, "shared/team.hujson", r#"{"acls": ["team"]}"#);
    symlink(root.join("shared/team.hujson"), root.join("frags/team.hujson")).unwrap();

    let outcome = Combiner::new(root.join("frags")).run(None).unwrap();

    assert_eq!(
        outcome.rendered,
        "{\n\t\"acls\": [\n\t\t\"a\",\n\t\t\"team\",\n\t],\n}\n"
    );
    assert_eq!(outcome.report.fragments, 2);
}
