use anyhow::Result;
use test_utils::codeblock_fixture;

use super::BubbleList;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::services::Themes;

#[test]
fn it_has_no_cached_lines() -> Result<()> {
    let theme = Themes::get("base16-ocean.dark", "")?;
    let bubble_list = BubbleList::new(theme);

    assert_eq!(bubble_list.cache.len(), 0);
    return Ok(());
}

#[test]
fn it_caches_lines_per_message() -> Result<()> {
    let theme = Themes::get("base16-ocean.dark", "")?;
    let messages = vec![
        Message::new(Role::Assistant, "Hi there!"),
        Message::new(Role::Assistant, codeblock_fixture()),
    ];

    let mut bubble_list = BubbleList::new(theme);
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.cache.len(), 2);
    assert!(bubble_list.len() > 0);
    return Ok(());
}

#[test]
fn it_recomputes_a_growing_streaming_message() -> Result<()> {
    let theme = Themes::get("base16-ocean.dark", "")?;
    let mut streaming = Message::new_streaming(Role::Assistant);
    streaming.append("chunk one");

    let mut bubble_list = BubbleList::new(theme);
    bubble_list.set_messages(&[streaming.clone()], 50);
    let initial_len = bubble_list.len();

    streaming.append("\nchunk two\nchunk three");
    bubble_list.set_messages(&[streaming.clone()], 50);
    assert!(bubble_list.len() > initial_len);

    // Finalizing without a content change still invalidates the cache so
    // the cursor disappears.
    streaming.finalize();
    bubble_list.set_messages(&[streaming], 50);
    return Ok(());
}
