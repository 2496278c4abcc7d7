use std::process::Command;

#[test]
fn basic_example_reports_growth_allocations() {
    let output = Command::new("cargo")
        .args(["run", "-p", "test-alloc", "--example", "basic"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Process did not exit successfully.\n\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("sum: 1771"),
        "Expected demo output, got:\n{stdout}"
    );

    // Allocation records go to the diagnostic stream.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("B (align"),
        "No allocation records on stderr:\n{stderr}"
    );
}

#[test]
fn default_source_example_reports_installed_tap() {
    let output = Command::new("cargo")
        .args(["run", "-p", "test-alloc", "--example", "default_source"])
        .output()
        .expect("Failed to execute command");

    assert!(
        output.status.success(),
        "Process did not exit successfully.\n\nstderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("allocated 64 bytes through the default source"),
        "Expected demo output, got:\n{stdout}"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("alloc 64 B (align 16)"),
        "Expected a record for the 64-byte request, got:\n{stderr}"
    );
}
