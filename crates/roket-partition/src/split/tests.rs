//! Unit tests for module splitting.

use rstest::rstest;

use super::*;

#[test]
fn splits_tagged_sections() {
    let partition = split("a=1\n--#server\nb=2\n--#client\nc=3\n--#end\nd=4\n");
    assert_eq!(partition.server(), "a=1\nb=2\nd=4\n");
    assert_eq!(partition.client(), "a=1\nc=3\nd=4\n");
}

#[rstest]
#[case("local x = 1\nprint(x)\n", "local x = 1\nprint(x)\n")]
#[case("local x = 1\nprint(x)", "local x = 1\nprint(x)\n")]
#[case("a\n\nb\n", "a\n\nb\n")]
#[case("crlf\r\nline\r\n", "crlf\r\nline\r\n")]
fn directive_free_text_is_shared(#[case] source: &str, #[case] expected: &str) {
    let partition = split(source);
    assert_eq!(partition.server(), expected);
    assert_eq!(partition.client(), partition.server());
}

#[test]
fn empty_source_yields_empty_partition() {
    let partition = split("");
    assert!(partition.is_empty());
}

#[test]
fn server_only_module_leaves_client_empty() {
    let partition = split("--#server\nstart()\n");
    assert_eq!(partition.server(), "start()\n");
    assert!(partition.client().is_empty());
    assert!(!partition.is_empty());
}

#[test]
fn scope_persists_until_next_directive() {
    let partition = split("--#client\na\nb\n--#client\nc\n");
    assert_eq!(partition.client(), "a\nb\nc\n");
    assert!(partition.server().is_empty());
}

#[test]
fn indented_and_spaced_directives_switch_scope() {
    let source = "static() {\n\t\t-- #server\n\t\tfire()\n\t\t-- #client\n\t\tlisten()\n\t\t-- #end\n}\n";
    let partition = split(source);
    assert_eq!(partition.server(), "static() {\n\t\tfire()\n}\n");
    assert_eq!(partition.client(), "static() {\n\t\tlisten()\n}\n");
}

#[test]
fn shared_lines_are_rewritten_once_for_both_variants() {
    let source = concat!(
        r#"local Car = TS.import(script, game:GetService("ServerStorage"), "TS", "RoketScripts", "Car").default"#,
        "\n--#server\n",
        r#"local Db = require(script.Parent, "Db")"#,
        "\n--#end\n",
    );
    let (server, client) = split(source).into_parts();
    assert_eq!(
        server,
        "local Car = require(script.Parent.Car).default\nlocal Db = require(script.Parent.Db)\n"
    );
    assert_eq!(client, "local Car = require(script.Parent.Car).default\n");
}

#[test]
fn output_preserves_relative_order() {
    let source = "1\n--#server\n2\n--#end\n3\n--#client\n4\n--#server\n5\n--#end\n6\n";
    let partition = split(source);
    assert_eq!(partition.server(), "1\n2\n3\n5\n6\n");
    assert_eq!(partition.client(), "1\n3\n4\n6\n");
}
