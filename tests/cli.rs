use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spendwise(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spendwise").unwrap();
    cmd.env("SPENDWISE_CONFIG_DIR", config_dir.path())
        .env_remove("SPENDWISE_API_URL")
        .env_remove("SPENDWISE_USERNAME")
        .env_remove("SPENDWISE_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn config_shows_defaults() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000"))
        .stdout(predicate::str::contains("Currency symbol: ₹"));
}

#[test]
fn api_url_flag_overrides_settings() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--api-url", "https://budget.example.com/v1", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://budget.example.com/v1"));
}

#[test]
fn demo_expense_list() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Groceries"))
        .stdout(predicate::str::contains("5 expense(s), total ₹5300.00"));
}

#[test]
fn demo_expense_list_filtered() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "list", "--category", "transport"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Petrol"))
        .stdout(predicate::str::contains("Groceries").not());
}

#[test]
fn unknown_category_is_rejected() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "list", "--category", "gadgets"])
        .assert()
        .failure();
}

#[test]
fn demo_dashboard() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "dashboard"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Spent:        ₹5300.00"))
        .stdout(predicate::str::contains("Transport"));
}

#[test]
fn demo_weekly_report() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "report", "--bucket", "week"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spending Report (weekly)"))
        .stdout(predicate::str::contains("-W"));
}

#[test]
fn demo_add_expense() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args([
            "--demo", "expense", "add", "Coffee", "120", "--category", "food", "--date", "2024-04-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense 8"))
        .stdout(predicate::str::contains("₹120.00"));
}

#[test]
fn zero_amount_fails_validation() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "add", "Coffee", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must be greater than zero"));
}

#[test]
fn invalid_amount_fails() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "add", "Coffee", "ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid amount"));
}

#[test]
fn delete_with_yes_skips_prompt() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "delete", "2", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted expense 2"));
}

#[test]
fn delete_declined_on_stdin() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "expense", "delete", "2"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Aborted."));
}

#[test]
fn demo_export_csv() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("expenses.csv");
    spendwise(&dir)
        .args(["--demo", "export", "csv"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 5 expenses"));

    let contents = std::fs::read_to_string(&output).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(r#""description","category","amount","date""#));
    assert!(contents.contains(r#""Petrol","Transport","2000.00""#));
}

#[test]
fn demo_export_report_yaml() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("report.yaml");
    spendwise(&dir)
        .args(["--demo", "export", "report", "--format", "yaml"])
        .arg(&output)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.starts_with("# SpendWise Spending Report"));
    assert!(contents.contains("timeRange: monthly"));
}

#[test]
fn demo_budget_overview() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["--demo", "budget", "overview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Food"))
        .stdout(predicate::str::contains("₹5000.00"));
}

#[test]
fn wrong_demo_password_fails() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .env("SPENDWISE_PASSWORD", "wrong")
        .args(["--demo", "login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password"));
}

#[test]
fn missing_username_fails_without_prompt() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .args(["expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No username given"));
}

#[test]
fn unreachable_store_is_reported() {
    let dir = TempDir::new().unwrap();
    spendwise(&dir)
        .env("SPENDWISE_PASSWORD", "secret")
        .args(["--api-url", "http://127.0.0.1:1", "--username", "alice", "expense", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not reach the record store"));
}
