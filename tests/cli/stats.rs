use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_stats_counts_statuses() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Localization/fr/loc_Game_fr.csv",
        "Key,SourceString,Comment,Primary,Status\r\n\
         Hello,Bonjour,,Hello,\r\n\
         Bye,Goodbye,,Goodbye,NEW\r\n\
         Old,Vieux,,Old,DEPRECATED\r\n",
    )?;

    assert_cmd_snapshot!(test.stats_command().args(["--locale", "fr"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Game  fr     Français      3 entries  ok    1  new    1  modified    0  deprecated    1

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_stats_notes_duplicate_keys() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "Localization/fr/loc_Game_fr.csv",
        "Key,SourceString\r\nHello,Bonjour\r\nHello,Salut\r\n",
    )?;

    assert_cmd_snapshot!(test.stats_command().args(["--locale", "fr"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Game  fr     Français      2 entries  ok    2  new    0  modified    0  deprecated    0
      note: 1 duplicate key(s)

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_stats_reports_unreadable_table() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("Localization/fr/loc_Game_fr.csv", "Broken\r\n")?;

    assert_cmd_snapshot!(test.stats_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    Game  en     English       2 entries  ok    2  new    0  modified    0  deprecated    0
    Game  fr     Français  ✘ invalid-header: Column 0 in header must be 'Key', found 'Broken'

    ----- stderr -----
    ");

    Ok(())
}
