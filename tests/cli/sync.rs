use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, PRIMARY_TABLE};

#[test]
fn test_sync_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_project()?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command(), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    would create (+2 new, ~0 modified, -0 deprecated)
          de    would create (+2 new, ~0 modified, -0 deprecated)
          Debug would create (+2 new, ~0 modified, -0 deprecated)

        Would update 3 table(s) (+6 new, ~0 modified, -0 deprecated)
        Run with --apply to write these changes.

        ----- stderr -----
        ");
    });

    assert!(!test.root().join("Localization/fr").exists());
    assert!(!test.root().join("Localization/Debug").exists());
    assert_eq!(test.read_file("Localization/en/loc_Game_en.csv")?, PRIMARY_TABLE);

    Ok(())
}

#[test]
fn test_sync_apply_creates_missing_tables() -> Result<()> {
    let test = CliTest::with_project()?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    created (+2 new, ~0 modified, -0 deprecated)
          de    created (+2 new, ~0 modified, -0 deprecated)
          Debug created (+2 new, ~0 modified, -0 deprecated)

        ✓ Updated 3 table(s) (+6 new, ~0 modified, -0 deprecated)

        ----- stderr -----
        ");
    });

    assert_eq!(
        test.read_file("Localization/fr/loc_Game_fr.csv")?,
        "Key,SourceString,Comment,Primary,Status\r\n\
         \"Hello\",\"Hello\",\"Greeting\",\"Hello\",\"NEW\"\r\n\
         \"Bye\",\"Goodbye\",\"\",\"Goodbye\",\"NEW\"\r\n"
    );
    assert!(test.root().join("Localization/de/loc_Game_de.csv").is_file());

    let debug = test.read_file("Localization/Debug/loc_Game_Debug.csv")?;
    assert!(debug.contains("\"Hello\",\"[Heeellooo]\",\"Greeting\",\"Hello\",\"NEW\"\r\n"));

    // The primary table is never touched.
    assert_eq!(test.read_file("Localization/en/loc_Game_en.csv")?, PRIMARY_TABLE);

    Ok(())
}

#[test]
fn test_sync_is_idempotent() -> Result<()> {
    let test = CliTest::with_project()?;

    test.sync_command().arg("--apply").output()?;
    let first = test.read_file("Localization/fr/loc_Game_fr.csv")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)

        ✓ All tables are up to date

        ----- stderr -----
        ");
    });
    assert_eq!(test.read_file("Localization/fr/loc_Game_fr.csv")?, first);

    Ok(())
}

#[test]
fn test_sync_updates_existing_translation() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Localization/fr/loc_Game_fr.csv",
        "Key,SourceString,Comment,Primary,Status\r\n\
         Hello,Bonjour,,Hello,\r\n\
         Old,Vieux,,Old,\r\n",
    )?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    updated (+1 new, ~0 modified, -1 deprecated)
          de    created (+2 new, ~0 modified, -0 deprecated)
          Debug created (+2 new, ~0 modified, -0 deprecated)

        ✓ Updated 3 table(s) (+5 new, ~0 modified, -1 deprecated)

        ----- stderr -----
        ");
    });

    assert_eq!(
        test.read_file("Localization/fr/loc_Game_fr.csv")?,
        "Key,SourceString,Comment,Primary,Status\r\n\
         \"Hello\",\"Bonjour\",\"Greeting\",\"Hello\",\"\"\r\n\
         \"Bye\",\"Goodbye\",\"\",\"Goodbye\",\"NEW\"\r\n\
         \"Old\",\"Vieux\",\"\",\"Old\",\"DEPRECATED\"\r\n"
    );

    Ok(())
}

#[test]
fn test_sync_flags_changed_primary_text() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Localization/fr/loc_Game_fr.csv",
        "Key,SourceString,Comment,Primary,Status\r\n\
         Hello,Bonjour,Greeting,Hi,\r\n\
         Bye,Au revoir,,Goodbye,\r\n",
    )?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    updated (+0 new, ~1 modified, -0 deprecated)
          de    created (+2 new, ~0 modified, -0 deprecated)
          Debug created (+2 new, ~0 modified, -0 deprecated)

        ✓ Updated 3 table(s) (+4 new, ~1 modified, -0 deprecated)

        ----- stderr -----
        ");
    });

    let fr = test.read_file("Localization/fr/loc_Game_fr.csv")?;
    assert!(fr.contains("\"Hello\",\"Bonjour\",\"Greeting\",\"Hello\",\"MODIFIED from [Hi]\"\r\n"));
    assert!(fr.contains("\"Bye\",\"Au revoir\",\"\",\"Goodbye\",\"\"\r\n"));

    Ok(())
}

#[test]
fn test_sync_notes_duplicate_keys() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Localization/fr/loc_Game_fr.csv",
        "Key,SourceString,Comment,Primary,Status\r\n\
         Hello,Bonjour,Greeting,Hello,\r\n\
         Hello,Salut,Greeting,Hello,\r\n\
         Bye,Au revoir,,Goodbye,\r\n",
    )?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    updated
                note: 1 duplicate key(s) ignored
          de    created (+2 new, ~0 modified, -0 deprecated)
          Debug created (+2 new, ~0 modified, -0 deprecated)

        ✓ Updated 3 table(s) (+4 new, ~0 modified, -0 deprecated)

        ----- stderr -----
        ");
    });

    // The first row wins; the duplicate is dropped on rewrite.
    assert_eq!(
        test.read_file("Localization/fr/loc_Game_fr.csv")?,
        "Key,SourceString,Comment,Primary,Status\r\n\
         \"Hello\",\"Bonjour\",\"Greeting\",\"Hello\",\"\"\r\n\
         \"Bye\",\"Au revoir\",\"\",\"Goodbye\",\"\"\r\n"
    );

    Ok(())
}

#[test]
fn test_sync_reports_broken_table_and_continues() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("Localization/fr/loc_Game_fr.csv", "Name,Text\r\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: false
        exit_code: 1
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    ✘ invalid-header: Column 0 in header must be 'Key', found 'Name'
          de    created (+2 new, ~0 modified, -0 deprecated)
          Debug created (+2 new, ~0 modified, -0 deprecated)

        ✓ Updated 2 table(s) (+4 new, ~0 modified, -0 deprecated)
        ✘ 1 table(s) could not be processed

        ----- stderr -----
        ");
    });

    assert_eq!(test.read_file("Localization/fr/loc_Game_fr.csv")?, "Name,Text\r\n");
    assert!(test.root().join("Localization/de/loc_Game_de.csv").is_file());

    Ok(())
}

#[test]
fn test_sync_does_not_overwrite_ignored_table() -> Result<()> {
    let test = CliTest::with_file(
        ".locsyncrc.json",
        r#"{
  "languagesInUse": ["en", "fr"],
  "ignores": ["*/fr/*"]
}"#,
    )?;
    test.write_file("Localization/en/loc_Game_en.csv", PRIMARY_TABLE)?;
    let translated = "Key,SourceString,Comment,Primary,Status\r\nHello,Bonjour,,Hello,\r\n";
    test.write_file("Localization/fr/loc_Game_fr.csv", translated)?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.sync_command().arg("--apply"), @r"
        success: false
        exit_code: 1
        ----- stdout -----
        Game ([ROOT]/Localization/en/loc_Game_en.csv)
          fr    ✘ excluded: Table exists but is excluded from discovery: [ROOT]/Localization/fr/loc_Game_fr.csv
          Debug created (+2 new, ~0 modified, -0 deprecated)

        ✓ Updated 1 table(s) (+2 new, ~0 modified, -0 deprecated)
        ✘ 1 table(s) could not be processed

        ----- stderr -----
        ");
    });

    assert_eq!(test.read_file("Localization/fr/loc_Game_fr.csv")?, translated);

    Ok(())
}

#[test]
fn test_sync_primary_locale_override() -> Result<()> {
    let test = CliTest::with_file(
        ".locsyncrc.json",
        r#"{ "primaryLocale": "en", "languagesInUse": ["en", "fr"] }"#,
    )?;
    test.write_file("Localization/fr/loc_Menu_fr.csv", "Key,SourceString\r\nPlay,Jouer\r\n")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(
            test.sync_command().args(["--primary-locale", "fr", "--apply"]),
            @r"
        success: true
        exit_code: 0
        ----- stdout -----
        Menu ([ROOT]/Localization/fr/loc_Menu_fr.csv)
          en    created (+1 new, ~0 modified, -0 deprecated)
          Debug created (+1 new, ~0 modified, -0 deprecated)

        ✓ Updated 2 table(s) (+2 new, ~0 modified, -0 deprecated)

        ----- stderr -----
        "
        );
    });

    // fr is now the primary, so en becomes a target.
    let en = test.read_file("Localization/en/loc_Menu_en.csv")?;
    assert!(en.contains("\"Play\",\"Jouer\",\"\",\"Jouer\",\"NEW\"\r\n"));
    let debug = test.read_file("Localization/Debug/loc_Menu_Debug.csv")?;
    assert!(debug.contains("\"Play\",\"[Joouueer]\",\"\",\"Jouer\",\"NEW\"\r\n"));

    Ok(())
}

#[test]
fn test_sync_without_tables_warns() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.sync_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    warning: No primary tables found. Check `primaryLocale` and `localizationRoot` in .locsyncrc.json.

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_sync_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".locsyncrc.json", "{ not json")?;

    let output = test.sync_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: Failed to parse config file"));

    Ok(())
}
