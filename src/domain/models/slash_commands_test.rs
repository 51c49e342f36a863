use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    assert!(SlashCommand::parse("").is_none());
}

#[test]
fn it_parse_space_only() {
    assert!(SlashCommand::parse(" ").is_none());
}

#[test]
fn it_parse_single_slash() {
    assert!(SlashCommand::parse("/").is_none());
}

#[test]
fn it_parse_invalid_prefix() {
    assert!(SlashCommand::parse("!q").is_none());
}

#[test]
fn it_parse_plain_text() {
    assert!(SlashCommand::parse("show me a counter component").is_none());
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}

#[test]
fn it_is_copy_without_args() {
    let cmd = SlashCommand::parse("/copy").unwrap();
    assert!(cmd.is_copy());
    assert!(cmd.args.is_empty());
}

#[test]
fn it_is_copy_with_index() {
    let cmd = SlashCommand::parse("/c 2").unwrap();
    assert!(cmd.is_copy());
    assert_eq!(cmd.args, vec!["2".to_string()]);
}

#[test]
fn it_is_artifact() {
    let cmd = SlashCommand::parse("/artifact 1").unwrap();
    assert!(cmd.is_artifact());
    assert_eq!(cmd.args, vec!["1".to_string()]);
}

#[test]
fn it_is_preview() {
    assert!(SlashCommand::parse("/preview").unwrap().is_preview());
}

#[test]
fn it_is_download() {
    assert!(SlashCommand::parse("/download").unwrap().is_download());
}
