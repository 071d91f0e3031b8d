//! Crate-level property and BDD tests.

use rstest::rstest;

use crate::{Scope, classify, rewrite_references, split};

mod behaviour;

/// Recomputes which variants each non-directive line should reach.
fn expected_membership(source: &str) -> (Vec<String>, Vec<String>) {
    let mut scope = Scope::Shared;
    let mut server = Vec::new();
    let mut client = Vec::new();
    for line in source.split_terminator('\n') {
        if let Some(next) = classify(line) {
            scope = next;
            continue;
        }
        let rewritten = rewrite_references(line).into_owned();
        if scope.reaches_server() {
            server.push(rewritten.clone());
        }
        if scope.reaches_client() {
            client.push(rewritten);
        }
    }
    (server, client)
}

fn lines_of(text: &str) -> Vec<String> {
    text.split_terminator('\n').map(str::to_owned).collect()
}

#[rstest]
#[case("a=1\n--#server\nb=2\n--#client\nc=3\n--#end\nd=4\n")]
#[case("--#client\n--#server\n--#end\n")]
#[case("x\n  --#server extra\ny\n-- #client\nz")]
#[case("--#end\nonly shared\n")]
#[case(concat!(
    "local Car = TS.import(script, game:GetService(\"ServerStorage\"), \"TS\", \"RoketScripts\", \"Car\").default\n",
    "--#client\n",
    "Car.new()\n",
))]
fn every_line_lands_by_active_scope(#[case] source: &str) {
    let (server, client) = expected_membership(source);
    let partition = split(source);
    assert_eq!(lines_of(partition.server()), server);
    assert_eq!(lines_of(partition.client()), client);
}

#[rstest]
#[case("a=1\n--#server\nb=2\n--#client\nc=3\n--#end\nd=4\n")]
#[case("--#server\nfire()\n--#end\n")]
fn split_output_is_directive_free(#[case] source: &str) {
    let partition = split(source);
    for text in [partition.server(), partition.client()] {
        assert!(text.lines().all(|line| classify(line).is_none()));
        assert_eq!(split(text).server(), text);
    }
}
