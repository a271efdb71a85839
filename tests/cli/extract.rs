use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const SAMPLE: &str = "---\n\
title: \"My Report\"\n\
localize:\n\
\x20 languages: [en, fr]\n\
---\n\
\n\
# Introduction\n\
\n\
Welcome.\n";

#[test]
fn test_extract_writes_per_language_copies() -> Result<()> {
    let test = CliTest::with_file("report.qmd", SAMPLE)?;

    let output = test.extract(&["report.qmd"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let en = test.read_file("report.en.qmd")?;
    assert_eq!(
        en,
        "---\n\
         lang: en\n\
         title: \"{{< meta langstrings.meta_my_report >}}\"\n\
         langstrings:\n\
         \x20 header_introduction: \"Introduction\"\n\
         \x20 meta_my_report: \"My Report\"\n\
         \x20 para_welcome: \"Welcome.\"\n\
         ---\n\
         \n\
         # {{< meta langstrings.header_introduction >}}\n\
         \n\
         {{< meta langstrings.para_welcome >}}\n"
    );

    let fr = test.read_file("report.fr.qmd")?;
    assert!(fr.contains("lang: fr\n"));
    assert!(fr.contains("draft: true\n"));
    assert!(fr.contains("  header_introduction: \"\" # Introduction\n"));
    assert!(fr.contains("  meta_my_report: \"\" # My Report\n"));
    assert!(fr.contains("  para_welcome: \"\" # Welcome.\n"));
    assert!(!fr.contains("localize:"));

    Ok(())
}

#[test]
fn test_extract_is_reentrant_on_emitted_files() -> Result<()> {
    let test = CliTest::with_file("report.qmd", SAMPLE)?;

    test.extract(&["report.qmd"])?;
    let before = test.read_file("report.en.qmd")?;

    let output = test.extract(&["report.en.qmd", "--verbose"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("skipped"));
    assert_eq!(test.read_file("report.en.qmd")?, before);

    Ok(())
}

#[test]
fn test_extract_directory_walk() -> Result<()> {
    let test = CliTest::with_file("chapters/one.qmd", SAMPLE)?;
    test.write_file("chapters/notes.txt", "not a document")?;

    let output = test.extract(&["--languages", "en"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.has_file("chapters/one.en.qmd"));
    assert!(!test.has_file("chapters/notes.en.txt"));

    Ok(())
}

#[test]
fn test_extract_language_flag_overrides_document() -> Result<()> {
    let test = CliTest::with_file("report.qmd", SAMPLE)?;

    let output = test.extract(&["report.qmd", "--languages", "de,it", "--source-lang", "de"])?;
    assert!(output.status.success());
    assert!(test.has_file("report.de.qmd"));
    assert!(test.has_file("report.it.qmd"));
    assert!(!test.has_file("report.fr.qmd"));

    let de = test.read_file("report.de.qmd")?;
    assert!(!de.contains("draft: true"));
    assert!(de.contains("  para_welcome: \"Welcome.\"\n"));

    Ok(())
}

#[test]
fn test_extract_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("report.qmd", SAMPLE)?;

    let output = test.extract(&["report.qmd", "--dry-run"])?;
    assert!(output.status.success());
    assert!(stdout(&output).contains("would write"));
    assert!(!test.has_file("report.en.qmd"));
    assert!(!test.has_file("report.fr.qmd"));

    Ok(())
}

#[test]
fn test_extract_missing_file_reports_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.extract(&["missing.qmd"])?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ERROR:"));

    Ok(())
}

#[test]
fn test_extract_uses_config_file_defaults() -> Result<()> {
    let test = CliTest::with_file(
        "report.qmd",
        "---\ntitle: \"My Report\"\n---\n\nWelcome.\n",
    )?;
    test.write_file(
        ".qlotrc.json",
        r#"{ "languages": ["en", "es"], "sourceLang": "en" }"#,
    )?;

    let output = test.extract(&["report.qmd"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(test.has_file("report.en.qmd"));
    assert!(test.has_file("report.es.qmd"));

    Ok(())
}

#[test]
fn test_extract_directive_rewrite_end_to_end() -> Result<()> {
    let test = CliTest::with_file(
        "report.qmd",
        "---\n---\n{{< video url=\"https://x\" title=\"Intro\" >}}\n",
    )?;

    let output = test.extract(&["report.qmd", "--languages", "en"])?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let en = test.read_file("report.en.qmd")?;
    assert!(en.contains("{{< video\n  url  =\"t:video_https_x\"\n  title=\"t:video_intro\"\n>}}"));
    assert!(en.contains("  video_intro: \"Intro\"\n"));
    assert!(en.contains("  video_https_x: \"https://x\"\n"));

    Ok(())
}

#[test]
fn test_extract_help_lists_commands() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let help = stdout(&output);
    assert!(help.contains("extract"));
    assert!(help.contains("init"));

    Ok(())
}
