use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::process::{exit, Child, Command, Stdio};
use std::thread::sleep;
use std::time::Duration;

// --- Data structures for scenario YAML files ---

#[derive(Debug, Deserialize, Default)]
struct Scenario {
    description: String,
    command: Vec<String>,
    assertions: Assertions,
    // Present when the scenario needs the postal mock service running.
    mock_service: Option<MockService>,
}

#[derive(Debug, Deserialize)]
struct MockService {
    bind_addr: String,
    #[serde(default = "default_mock_binary")]
    binary: String,
    #[serde(default)]
    fixtures_path: Option<String>,
    #[serde(default = "default_startup_wait_ms")]
    startup_wait_ms: u64,
}

fn default_mock_binary() -> String {
    "target/debug/postal-mock".to_string()
}

fn default_startup_wait_ms() -> u64 {
    500
}

#[derive(Debug, Deserialize, Default)]
struct Assertions {
    exit_code: Option<i32>,
    stdout_contains: Option<String>,
    stderr_contains: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Harness Error:\n{:#}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let scenario_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("Path to a scenario YAML file not provided."))?;

    println!("--- Running Test Scenario: {} ---", scenario_path);

    let scenario_content = fs::read_to_string(&scenario_path)
        .with_context(|| format!("Failed to read scenario file at '{}'", scenario_path))?;
    let scenario: Scenario = serde_yaml::from_str(&scenario_content)
        .with_context(|| "Failed to parse YAML from scenario file")?;

    println!("Description: {}", scenario.description);

    let mut mock = match &scenario.mock_service {
        Some(service) => Some(start_mock_service(service)?),
        None => None,
    };

    let result = run_command(&scenario);

    // The mock dies with the scenario regardless of the verdict.
    if let Some(child) = mock.as_mut() {
        let _ = child.kill();
        let _ = child.wait();
    }

    result?;
    println!("--- Scenario Passed ---");
    Ok(())
}

/// Spawn the postal mock sidecar and give it time to bind its port.
fn start_mock_service(service: &MockService) -> Result<Child> {
    let mut command = Command::new(&service.binary);
    command
        .env("BIND_ADDR", &service.bind_addr)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(fixtures_path) = &service.fixtures_path {
        command.env("FIXTURES_PATH", fixtures_path);
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("Failed to spawn mock service '{}'", service.binary))?;

    println!(
        "Harness: Waiting {}ms for the mock service on {}...",
        service.startup_wait_ms, service.bind_addr
    );
    sleep(Duration::from_millis(service.startup_wait_ms));

    // A mock that died this early never bound its port, so capture its
    // output to see why.
    if let Some(status) = child.try_wait()? {
        let mut stdout = Vec::new();
        child.stdout.take().unwrap().read_to_end(&mut stdout)?;
        let mut stderr = Vec::new();
        child.stderr.take().unwrap().read_to_end(&mut stderr)?;

        return Err(anyhow!(
            "Mock service exited prematurely with status: {}\n---\nSTDOUT:\n{}\n---\nSTDERR:\n{}",
            status,
            String::from_utf8_lossy(&stdout),
            String::from_utf8_lossy(&stderr)
        ));
    }

    Ok(child)
}

fn run_command(scenario: &Scenario) -> Result<()> {
    let mut cmd_parts = scenario.command.iter();
    let executable = cmd_parts
        .next()
        .ok_or_else(|| anyhow!("Command in scenario file cannot be empty"))?;

    let output = Command::new(executable)
        .args(cmd_parts)
        .output()
        .with_context(|| format!("Failed to execute command: {:?}", scenario.command))?;

    verify_assertions(
        &output.stdout,
        &output.stderr,
        output.status,
        &scenario.assertions,
    )
}

fn verify_assertions(
    stdout: &[u8],
    stderr: &[u8],
    status: std::process::ExitStatus,
    assertions: &Assertions,
) -> Result<()> {
    if let Some(expected_code) = assertions.exit_code {
        if status.code() != Some(expected_code) {
            return Err(anyhow!(
                "Assertion failed: Exit code mismatch.\nExpected: {}\nActual: {:?}\n---\nSTDOUT:\n{}\n---\nSTDERR:\n{}",
                expected_code,
                status.code(),
                String::from_utf8_lossy(stdout),
                String::from_utf8_lossy(stderr)
            ));
        }
    }

    if let Some(expected) = &assertions.stdout_contains {
        let stdout_str = String::from_utf8_lossy(stdout);
        if !stdout_str.contains(expected) {
            return Err(anyhow!(
                "Assertion failed: STDOUT did not contain expected text.\nExpected: '{}'\n---\nActual STDOUT:\n{}",
                expected,
                stdout_str
            ));
        }
    }

    if let Some(expected) = &assertions.stderr_contains {
        let stderr_str = String::from_utf8_lossy(stderr);
        if !stderr_str.contains(expected) {
            return Err(anyhow!(
                "Assertion failed: STDERR did not contain expected text.\nExpected: '{}'\n---\nActual STDERR:\n{}",
                expected,
                stderr_str
            ));
        }
    }

    Ok(())
}
