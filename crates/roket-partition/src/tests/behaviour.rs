//! Behaviour-driven tests for partitioning script trees.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{BootstrapReport, MemoryTree, PartitionError, bootstrap};

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    source: MemoryTree,
    server: MemoryTree,
    client: MemoryTree,
    outcome: Option<Result<BootstrapReport, PartitionError>>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

/// Feature files spell a module body as `|`-separated lines.
fn module_text(lines: &str) -> String {
    let mut text = lines.trim_matches('"').replace('|', "\n");
    text.push('\n');
    text
}

fn report(world: &TestWorld) -> &BootstrapReport {
    world
        .outcome
        .as_ref()
        .expect("bootstrap has not run")
        .as_ref()
        .expect("bootstrap failed")
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a script {name} with lines {lines}")]
fn given_script(world: &mut TestWorld, name: String, lines: String) {
    let module = name.trim_matches('"').to_owned();
    world.source = std::mem::take(&mut world.source).with_module(module, module_text(&lines));
}

#[given("the server destination already holds {name}")]
fn given_stale_server_module(world: &mut TestWorld, name: String) {
    let module = name.trim_matches('"').to_owned();
    world.server = std::mem::take(&mut world.server).with_module(module, "stale\n");
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the scripts are bootstrapped")]
fn when_bootstrapped(world: &mut TestWorld) {
    let result = bootstrap(&world.source, &mut world.server, &mut world.client);
    world.outcome = Some(result);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the server module {name} reads {lines}")]
fn then_server_module(world: &mut TestWorld, name: String, lines: String) {
    let module = name.trim_matches('"');
    assert_eq!(world.server.get(module), Some(module_text(&lines).as_str()));
}

#[then("the client module {name} reads {lines}")]
fn then_client_module(world: &mut TestWorld, name: String, lines: String) {
    let module = name.trim_matches('"');
    assert_eq!(world.client.get(module), Some(module_text(&lines).as_str()));
}

#[then("the client destination has no module {name}")]
fn then_client_missing(world: &mut TestWorld, name: String) {
    assert_eq!(world.client.get(name.trim_matches('"')), None);
}

#[then("the server destination has no module {name}")]
fn then_server_missing(world: &mut TestWorld, name: String) {
    assert_eq!(world.server.get(name.trim_matches('"')), None);
}

#[then("{count} module(s) are reported as ignored")]
fn then_ignored_count(world: &mut TestWorld, count: usize) {
    assert_eq!(report(world).ignored.len(), count);
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/partition.feature",
    name = "Tagged sections are split between server and client"
)]
fn tagged_sections_split(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/partition.feature",
    name = "Sibling imports are retargeted in both variants"
)]
fn sibling_imports_retargeted(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/partition.feature",
    name = "Ignored scripts are skipped"
)]
fn ignored_scripts_skipped(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/partition.feature",
    name = "Stale destination modules are cleared"
)]
fn stale_modules_cleared(world: TestWorld) {
    let _ = world;
}
