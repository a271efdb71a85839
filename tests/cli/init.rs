use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(".qlotrc.json"));

    let config = test.read_file(".qlotrc.json")?;
    assert!(config.contains("\"languages\""));
    assert!(config.contains("\"sourceLang\""));
    assert!(config.contains("**/*.qmd"));

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::with_file(".qlotrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("already exists"));

    Ok(())
}
