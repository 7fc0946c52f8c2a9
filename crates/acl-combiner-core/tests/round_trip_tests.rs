//! Round-trip tests: parse, serialize, parse again

use acl_combiner_core::{PrinterOptions, load_str, serialize};

fn render(source: &str) -> String {
    serialize(&load_str(source, "policy.hujson").unwrap(), &PrinterOptions::default())
}

const POLICY: &str = r#"// Example/default ACLs for unrestricted connections.
{
	// Declare static groups of users. Use autogroups for all users or users with a specific role.
	"groups": {
		"group:example": ["alice@example.com", "bob@example.com"],
	},

	// Define the tags which can be applied to devices and by which users.
	"tagOwners": {
		"tag:example": ["autogroup:admin"],
	},

	// Define access control lists for users, groups, autogroups, tags,
	// Tailscale IP addresses, and subnet ranges.
	"acls": [
		// Allow all connections.
		{"action": "accept", "src": ["*"], "dst": ["*:*"]},
	],

	// Define users and devices that can use Tailscale SSH.
	"ssh": [
		// Allow all users to SSH into their own devices in check mode.
		{
			"action": "check",
			"src":    ["autogroup:member"],
			"dst":    ["autogroup:self"],
			"users":  ["autogroup:nonroot", "root"],
		},
	],

	// Test access rules every time they're saved.
	"tests": [
		// {
		//   "src": "alice@example.com",
		//   "accept": ["tag:example"],
		//   "deny": ["100.101.102.103:443"],
		// },
	],
}
"#;

/// Serializing a parsed document twice gives the same text
#[test]
fn test_policy_round_trip_is_stable() {
    let once = render(POLICY);
    let twice = render(&once);
    assert_eq!(once, twice);
}

/// Comments survive in their places
#[test]
fn test_policy_comments_preserved() {
    let out = render(POLICY);

    assert!(out.starts_with("// Example/default ACLs for unrestricted connections.\n{\n"));
    assert!(out.contains("\t// Define access control lists for users, groups, autogroups, tags,\n\t// Tailscale IP addresses, and subnet ranges.\n\t\"acls\": [\n"));
    assert!(out.contains("\t\t// Allow all connections.\n\t\t{\"action\": \"accept\", \"src\": [\"*\"], \"dst\": [\"*:*\"]},\n"));
    assert!(out.contains("\t\t// {\n\t\t//   \"src\": \"alice@example.com\",\n"));
    assert!(out.ends_with("\t],\n}\n"));
}

/// Alignment whitespace inside block objects is normalised
#[test]
fn test_policy_whitespace_normalised() {
    let out = render(POLICY);
    assert!(out.contains("\t\t\t\"src\": [\"autogroup:member\"],\n"));
}

/// Blank lines between sections are kept
#[test]
fn test_policy_paragraphs_kept() {
    let out = render(POLICY);
    assert!(out.contains("\t},\n\n\t// Define the tags"));
}

#[test]
fn test_output_has_single_trailing_newline() {
    let out = render("{}\n\n\n");
    assert_eq!(out, "{}\n");
}

#[test]
fn test_crlf_input() {
    let out = render("{\r\n  \"acls\": [\r\n    1,\r\n  ],\r\n}\r\n");
    assert_eq!(out, "{\n\t\"acls\": [\n\t\t1,\n\t],\n}\n");
}
